/// 追跡対象のキー/マウスボタン1つ分の状態
///
/// 解放は `NotPressed` へ直接戻らず必ず `WasPressed` を経由する。
/// フレーム間に押して離された操作を、フレーム毎に1回しか状態を見ない
/// 利用側でも取りこぼさないための仕組み。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyState {
    /// 押されていない
    #[default]
    NotPressed,
    /// 押下中
    Held,
    /// 解放済みだが未消費（フレーム終端のclearでNotPressedへ戻る）
    WasPressed,
}

impl KeyState {
    /// 押下イベント。WasPressed中の再押下もHeldへ戻す
    pub fn press(&mut self) {
        *self = KeyState::Held;
    }

    /// 解放イベント
    pub fn release(&mut self) {
        *self = KeyState::WasPressed;
    }

    /// フレーム終端の消費処理。WasPressedのみNotPressedへ降格する
    pub fn clear_was_pressed(&mut self) {
        if *self == KeyState::WasPressed {
            *self = KeyState::NotPressed;
        }
    }

    #[inline]
    pub fn is_held(self) -> bool {
        self == KeyState::Held
    }

    #[inline]
    pub fn was_pressed(self) -> bool {
        self == KeyState::WasPressed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_not_pressed() {
        assert_eq!(KeyState::default(), KeyState::NotPressed);
    }

    #[test]
    fn test_press_release_cycle() {
        let mut s = KeyState::NotPressed;
        s.press();
        assert_eq!(s, KeyState::Held);
        s.release();
        // 解放直後はNotPressedではなくWasPressed
        assert_eq!(s, KeyState::WasPressed);
        s.clear_was_pressed();
        assert_eq!(s, KeyState::NotPressed);
    }

    #[test]
    fn test_repress_while_was_pressed() {
        let mut s = KeyState::Held;
        s.release();
        s.press();
        assert_eq!(s, KeyState::Held);
    }

    #[test]
    fn test_clear_keeps_held() {
        let mut s = KeyState::Held;
        s.clear_was_pressed();
        assert_eq!(s, KeyState::Held);
    }
}
