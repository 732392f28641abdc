pub mod components;
pub mod input;
pub mod math;

// Re-exports
pub use components::{Name, Transform};
pub use input::{Key, KeyState, KeyboardMouseHandler, MouseButton};
