pub mod box_mesh;
pub mod camera;
pub mod patch;
pub mod picking;
pub mod ray;
pub mod scene;

pub use box_mesh::{BoxMesh, Face};
pub use camera::Camera;
pub use patch::Patch;
pub use picking::{PickHit, PickResult};
pub use ray::PickRay;
pub use scene::{Scene, SceneBox};

// Re-export glam types for consistent version usage
pub use glam;
