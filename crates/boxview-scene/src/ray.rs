use glam::{Mat4, Vec2, Vec3, Vec4};

/// ピッキング用レイ
///
/// originはニアプレーン上の点、directionはニア→ファーを張るベクトル。
/// 交差パラメータtの定義域は[0,1]で、無限レイではない。
#[derive(Debug, Clone, Copy)]
pub struct PickRay {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl PickRay {
    /// ニア/ファー両端点からレイを作成
    pub fn new(near: Vec3, far: Vec3) -> Self {
        Self {
            origin: near,
            direction: far - near,
        }
    }

    /// パラメータt位置の点
    pub fn point_at(&self, t: f32) -> Vec3 {
        self.origin + t * self.direction
    }

    /// スクリーンピクセル座標からワールド空間レイへ逆射影する
    ///
    /// ピクセル座標を[-1,1]のNDCに正規化（yは上下反転）し、z=-1と
    /// z=+1の2点を合成行列の逆行列で変換してw除算する。
    ///
    /// 合成行列が退化していて逆行列を持たない場合はNoneを返す。
    /// リサイズ中などに起こる回復可能な状態で、呼び出し側はその
    /// フレームのピックをスキップすればよい。
    pub fn from_screen(pos: Vec2, viewport: Vec2, world_to_view: Mat4) -> Option<PickRay> {
        let half_w = viewport.x / 2.0;
        let half_h = viewport.y / 2.0;
        if half_w <= 0.0 || half_h <= 0.0 {
            return None;
        }

        let det = world_to_view.determinant();
        if det == 0.0 || !det.is_finite() {
            return None;
        }
        let inverted = world_to_view.inverse();

        let ndc_x = (pos.x - half_w) / half_w;
        let ndc_y = -(pos.y - half_h) / half_h;

        let near = inverted * Vec4::new(ndc_x, ndc_y, -1.0, 1.0);
        let far = inverted * Vec4::new(ndc_x, ndc_y, 1.0, 1.0);
        if near.w == 0.0 || far.w == 0.0 {
            return None;
        }

        // 透視除算
        let near = near.truncate() / near.w;
        let far = far.truncate() / far.w;
        if !near.is_finite() || !far.is_finite() {
            return None;
        }

        Some(PickRay::new(near, far))
    }
}
