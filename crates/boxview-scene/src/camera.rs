use glam::{Mat4, Quat, Vec3};

/// 3Dカメラ
/// 平行移動と回転（クォータニオン）で姿勢を、fov/aspect/near/farで投影を持つ
#[derive(Debug, Clone)]
pub struct Camera {
    pub translation: Vec3,
    pub rotation: Quat,
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

// カメラローカル座標系の基準軸
const LOCAL_FORWARD: Vec3 = Vec3::NEG_Z;
const LOCAL_UP: Vec3 = Vec3::Y;
const LOCAL_RIGHT: Vec3 = Vec3::X;

impl Camera {
    /// デフォルト姿勢で新しいカメラを作成
    pub fn new(aspect: f32) -> Self {
        Self {
            translation: Vec3::new(0.0, 2.0, 5.0),
            rotation: Quat::IDENTITY,
            fov: 45.0_f32.to_radians(),
            aspect,
            near: 0.1,
            far: 1000.0,
        }
    }

    /// 視線方向（ローカル-Z）のワールドベクトル
    pub fn forward(&self) -> Vec3 {
        self.rotation * LOCAL_FORWARD
    }

    /// 上方向（ローカル+Y）のワールドベクトル
    pub fn up(&self) -> Vec3 {
        self.rotation * LOCAL_UP
    }

    /// 右方向（ローカル+X）のワールドベクトル
    pub fn right(&self) -> Vec3 {
        self.rotation * LOCAL_RIGHT
    }

    /// カメラを移動
    pub fn translate(&mut self, delta: Vec3) {
        self.translation += delta;
    }

    /// 軸まわりにangleラジアンの回転を加える。軸は非ゼロであること
    pub fn rotate(&mut self, angle: f32, axis: Vec3) {
        self.rotation = Quat::from_axis_angle(axis.normalize(), angle) * self.rotation;
    }

    /// アスペクト比を設定
    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
    }

    /// ワールド→ビュー行列（スケールなし）
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_quat(self.rotation.conjugate()) * Mat4::from_translation(-self.translation)
    }

    /// 投影行列。深度は-1..+1のGLクリップ規約
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh_gl(self.fov, self.aspect, self.near, self.far)
    }

    /// 投影×ビューの合成行列
    pub fn world_to_view(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}
