use serde::{Deserialize, Serialize};

/// Platform-independent key identifier.
///
/// Only the keys the viewer actually reacts to are listed; the handler
/// additionally filters against its recognized-key set, so growing this
/// enum never changes tracking behavior by itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    W,
    A,
    S,
    D,
    Q,
    E,
    R,
    F,
    Space,
    Shift,
    Control,
    Alt,
    Escape,
    Left,
    Right,
    Up,
    Down,
}

/// The three tracked mouse buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
}
