//! キーボード/マウス入力の状態トラッカー
//!
//! 低レベルの押下/解放イベントを、フレーム単位で問い合わせ可能な状態に変換する。
//! 利用側の1フレームの流れ:
//!
//! 1. イベント到着時: `key_press_event` / `mouse_press_event` などを呼ぶ
//! 2. フレーム処理中: `key_down` / `button_released` / 各deltaを何度でも参照
//! 3. フレーム終端で一度だけ `clear_was_pressed_states` を呼ぶ
//!
//! 手順3を忘れると解放済みの信号が次フレームまで残る。

pub mod handler;
pub mod keys;
pub mod state;

pub use handler::KeyboardMouseHandler;
pub use keys::{Key, MouseButton};
pub use state::KeyState;
