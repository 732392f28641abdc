use serde::{Deserialize, Serialize};

/// カメラナビゲーションの速度設定
///
/// 欠けたフィールドはデシリアライズ時にデフォルト値で補われる。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    /// 1フレームあたりの移動量
    pub translation_speed: f32,
    /// Shift押下時の移動量
    pub slow_translation_speed: f32,
    /// マウス移動1ピクセルあたりの回転角（度）
    pub rotation_speed: f32,
    /// ホイール1ステップあたりの前進量
    pub wheel_speed: f32,
    /// Shift押下時のホイール前進量
    pub slow_wheel_speed: f32,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            translation_speed: 0.8,
            slow_translation_speed: 0.1,
            rotation_speed: 0.4,
            wheel_speed: 8.0,
            slow_wheel_speed: 0.8,
        }
    }
}

impl NavigationConfig {
    /// JSON文字列から読み込む
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// JSON文字列へ書き出す
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
