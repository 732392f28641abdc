//! 数学型の再エクスポート
//!
//! ワークスペース全体で同じglamバージョンを使うため、型はここから参照する

pub use glam::{IVec2, Mat4, Quat, Vec2, Vec3, Vec4};
