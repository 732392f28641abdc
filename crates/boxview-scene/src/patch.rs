use glam::Vec3;

use crate::ray::PickRay;

/// 向き付き矩形（ボックスの1面分のパッチ）
///
/// offsetを起点として辺ベクトルaとbが張る平行四辺形。normalは単位長で
/// a×b方向を向く。角をCCW順（外側から見て反時計回り）で渡すとnormalは
/// 外向きになる。
#[derive(Debug, Clone, Copy)]
pub struct Patch {
    pub offset: Vec3,
    pub a: Vec3,
    pub b: Vec3,
    pub normal: Vec3,
}

/// Cramerの公式で2x2連立一次方程式を解く:
///   a x + c y = e
///   b x + d y = f
/// 行列式がゼロならNone
fn solve(a: f32, b: f32, c: f32, d: f32, e: f32, f: f32) -> Option<(f32, f32)> {
    let det = a * d - b * c;
    if det == 0.0 {
        return None;
    }
    let x = (e * d - c * f) / det;
    let y = (a * f - e * b) / det;
    Some((x, y))
}

impl Patch {
    /// 3つの角からパッチを作成
    ///
    /// a_cornerが起点、b_cornerとd_cornerが隣接する2つの角。
    /// 3点は同一直線上にないこと。
    pub fn from_corners(a_corner: Vec3, b_corner: Vec3, d_corner: Vec3) -> Self {
        let a = b_corner - a_corner;
        let b = d_corner - a_corner;
        let normal = a.cross(b).normalize();
        Self {
            offset: a_corner,
            a,
            b,
            normal,
        }
    }

    /// レイとパッチの交差判定。受理時はレイパラメータt（[0,1]）を返す
    ///
    /// 表面側からの交差のみ受け付ける（directionとnormalのなす角が
    /// 90度超、つまりcos < 0）。交点の平面内座標(x, y)が両方とも
    /// 開区間(0, 1)に入るときだけヒット。境界上はヒットしない。
    pub fn intersect(&self, ray: &PickRay) -> Option<f32> {
        let d = ray.direction;

        // 表面判定。背面・平行・長さゼロ（cosがNaN）はすべてここで弾く
        let denom = d.dot(self.normal);
        let cos = denom / d.length();
        if !(cos < 0.0) {
            return None;
        }

        // 平面との交点パラメータ。レイの定義域[0,1]の外は棄却
        let t = (self.offset - ray.origin).dot(self.normal) / denom;
        if !t.is_finite() || t < 0.0 || t > 1.0 {
            return None;
        }

        let x0 = ray.point_at(t);
        let rhs = x0 - self.offset;

        // 平面内座標は3通りの座標ペア射影のどれかで解ける。行列式が
        // ゼロになる退化した射影のときだけ次のペアへ進む
        if let Some((x, y)) = solve(self.a.x, self.a.y, self.b.x, self.b.y, rhs.x, rhs.y) {
            return accept(x, y, t, 1);
        }
        if let Some((x, y)) = solve(self.a.x, self.a.z, self.b.x, self.b.z, rhs.x, rhs.z) {
            return accept(x, y, t, 2);
        }
        if let Some((x, y)) = solve(self.a.y, self.a.z, self.b.y, self.b.z, rhs.y, rhs.z) {
            return accept(x, y, t, 3);
        }

        None
    }
}

fn accept(x: f32, y: f32, t: f32, projection: u32) -> Option<f32> {
    if x > 0.0 && x < 1.0 && y > 0.0 && y < 1.0 {
        log::trace!("intersection found ({}) at t = {}", projection, t);
        Some(t)
    } else {
        None
    }
}
