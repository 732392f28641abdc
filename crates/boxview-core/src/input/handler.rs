use glam::IVec2;

use crate::input::{Key, KeyState, MouseButton};

/// キーボード/マウスの状態をまとめて追跡するハンドラ
///
/// キーは`add_recognized_key`で登録したものだけを追跡し、それ以外の
/// イベントは「未処理」として無視する。マウスボタンは左/中/右を常時追跡。
///
/// delta系の問い合わせは読み取りと消費を分けている:
/// `mouse_delta`/`wheel_delta`は状態を変えず、`reset_mouse_delta`/
/// `reset_wheel_delta`は値を返すと同時にアンカー/累積をリセットする。
#[derive(Debug, Clone)]
pub struct KeyboardMouseHandler {
    keys: Vec<Key>,
    key_states: Vec<KeyState>,
    left_button: KeyState,
    middle_button: KeyState,
    right_button: KeyState,
    mouse_down_pos: IVec2,
    mouse_release_pos: IVec2,
    wheel_delta: i32,
}

impl KeyboardMouseHandler {
    pub fn new() -> Self {
        Self {
            keys: Vec::new(),
            key_states: Vec::new(),
            left_button: KeyState::NotPressed,
            middle_button: KeyState::NotPressed,
            right_button: KeyState::NotPressed,
            mouse_down_pos: IVec2::ZERO,
            mouse_release_pos: IVec2::ZERO,
            wheel_delta: 0,
        }
    }

    // ------------------------------------------------------------------
    // 追跡キーの登録
    // ------------------------------------------------------------------

    /// 追跡対象キーを登録する。登録済みなら何もしない
    pub fn add_recognized_key(&mut self, key: Key) {
        if self.keys.contains(&key) {
            return; // already known
        }
        self.keys.push(key);
        self.key_states.push(KeyState::NotPressed);
    }

    /// 追跡対象キーをすべて解除する
    pub fn clear_recognized_keys(&mut self) {
        self.keys.clear();
        self.key_states.clear();
    }

    // ------------------------------------------------------------------
    // イベント入口
    // ------------------------------------------------------------------

    /// キー押下イベント。オートリピートは完全に無視する。
    /// 追跡対象外のキーなら`false`（未処理）を返す
    pub fn key_press_event(&mut self, key: Key, auto_repeat: bool) -> bool {
        if auto_repeat {
            return false;
        }
        self.press_key(key)
    }

    /// キー解放イベント。オートリピートは完全に無視する
    pub fn key_release_event(&mut self, key: Key, auto_repeat: bool) -> bool {
        if auto_repeat {
            return false;
        }
        self.release_key(key)
    }

    /// マウスボタン押下イベント。押下位置をアンカーとして記録する
    pub fn mouse_press_event(&mut self, button: MouseButton, pos: IVec2) {
        self.button_state_mut(button).press();
        self.mouse_down_pos = pos;
    }

    /// マウスボタン解放イベント。解放位置を記録する
    pub fn mouse_release_event(&mut self, button: MouseButton, pos: IVec2) {
        self.button_state_mut(button).release();
        self.mouse_release_pos = pos;
    }

    /// ホイールイベント
    ///
    /// ピクセル精度のdeltaがあればそのy成分を、なければ1/8度単位の
    /// 角度deltaを15度=1ステップに正規化して累積する。
    pub fn wheel_event(&mut self, pixel_delta: IVec2, angle_delta: IVec2) {
        if pixel_delta != IVec2::ZERO {
            self.wheel_delta += pixel_delta.y;
        } else if angle_delta != IVec2::ZERO {
            let steps = angle_delta / 8 / 15;
            self.wheel_delta += steps.y;
        }
    }

    // ------------------------------------------------------------------
    // 状態遷移
    // ------------------------------------------------------------------

    fn press_key(&mut self, key: Key) -> bool {
        for (i, k) in self.keys.iter().enumerate() {
            if *k == key {
                self.key_states[i].press();
                return true;
            }
        }
        false
    }

    fn release_key(&mut self, key: Key) -> bool {
        for (i, k) in self.keys.iter().enumerate() {
            if *k == key {
                self.key_states[i].release();
                return true;
            }
        }
        false
    }

    fn button_state_mut(&mut self, button: MouseButton) -> &mut KeyState {
        match button {
            MouseButton::Left => &mut self.left_button,
            MouseButton::Middle => &mut self.middle_button,
            MouseButton::Right => &mut self.right_button,
        }
    }

    fn button_state(&self, button: MouseButton) -> KeyState {
        match button {
            MouseButton::Left => self.left_button,
            MouseButton::Middle => self.middle_button,
            MouseButton::Right => self.right_button,
        }
    }

    /// フレーム終端の消費処理
    ///
    /// WasPressedのキー/ボタンをNotPressedへ降格する。全状態を読み終えた
    /// あと、1フレームに一度だけ呼ぶこと。呼び忘れると解放信号が
    /// 次フレームに持ち越される。
    pub fn clear_was_pressed_states(&mut self) {
        self.left_button.clear_was_pressed();
        self.middle_button.clear_was_pressed();
        self.right_button.clear_was_pressed();
        for state in &mut self.key_states {
            state.clear_was_pressed();
        }
    }

    // ------------------------------------------------------------------
    // 問い合わせ（副作用なし）
    // ------------------------------------------------------------------

    /// キーが押下中か。追跡対象外のキーは常にfalse
    pub fn key_down(&self, key: Key) -> bool {
        self.keys
            .iter()
            .position(|k| *k == key)
            .map(|i| self.key_states[i].is_held())
            .unwrap_or(false)
    }

    /// ボタンが押下中か
    pub fn button_down(&self, button: MouseButton) -> bool {
        self.button_state(button).is_held()
    }

    /// ボタンが解放済み（未消費）か
    pub fn button_released(&self, button: MouseButton) -> bool {
        self.button_state(button).was_pressed()
    }

    /// 直近のボタン押下位置
    pub fn mouse_down_pos(&self) -> IVec2 {
        self.mouse_down_pos
    }

    /// 直近のボタン解放位置
    pub fn mouse_release_pos(&self) -> IVec2 {
        self.mouse_release_pos
    }

    /// 押下アンカーからの移動量を読むだけ（アンカーは動かさない）
    pub fn mouse_delta(&self, current_pos: IVec2) -> IVec2 {
        current_pos - self.mouse_down_pos
    }

    /// 押下アンカーからの移動量を返し、アンカーを現在位置へ進める
    pub fn reset_mouse_delta(&mut self, current_pos: IVec2) -> IVec2 {
        let delta = current_pos - self.mouse_down_pos;
        self.mouse_down_pos = current_pos;
        delta
    }

    /// 累積ホイールステップを読むだけ
    pub fn wheel_delta(&self) -> i32 {
        self.wheel_delta
    }

    /// 累積ホイールステップを返してゼロに戻す
    pub fn reset_wheel_delta(&mut self) -> i32 {
        let delta = self.wheel_delta;
        self.wheel_delta = 0;
        delta
    }
}

impl Default for KeyboardMouseHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handler_with_keys(keys: &[Key]) -> KeyboardMouseHandler {
        let mut h = KeyboardMouseHandler::new();
        for k in keys {
            h.add_recognized_key(*k);
        }
        h
    }

    #[test]
    fn test_press_then_release_passes_was_pressed() {
        let mut h = handler_with_keys(&[Key::W]);
        assert!(h.key_press_event(Key::W, false));
        assert!(h.key_down(Key::W));
        assert!(h.key_release_event(Key::W, false));
        // 解放後、clearまではdownではないが状態はWasPressedのまま
        assert!(!h.key_down(Key::W));
        h.clear_was_pressed_states();
        assert!(!h.key_down(Key::W));
    }

    #[test]
    fn test_untracked_key_not_handled() {
        let mut h = handler_with_keys(&[Key::W]);
        assert!(!h.key_press_event(Key::Space, false));
        assert!(!h.key_release_event(Key::Space, false));
        assert!(!h.key_down(Key::Space));
        // 追跡中のキーにも影響しない
        assert!(!h.key_down(Key::W));
    }

    #[test]
    fn test_auto_repeat_is_filtered() {
        let mut h = handler_with_keys(&[Key::W]);
        assert!(!h.key_press_event(Key::W, true));
        assert!(!h.key_down(Key::W));
        h.key_press_event(Key::W, false);
        // 押下中のリピート解放イベントも状態を変えない
        assert!(!h.key_release_event(Key::W, true));
        assert!(h.key_down(Key::W));
    }

    #[test]
    fn test_key_down_is_idempotent() {
        let mut h = handler_with_keys(&[Key::A]);
        h.key_press_event(Key::A, false);
        assert!(h.key_down(Key::A));
        assert!(h.key_down(Key::A));
        assert!(h.key_down(Key::A));
    }

    #[test]
    fn test_add_recognized_key_ignores_duplicates() {
        let mut h = KeyboardMouseHandler::new();
        h.add_recognized_key(Key::W);
        h.add_recognized_key(Key::W);
        h.key_press_event(Key::W, false);
        assert!(h.key_down(Key::W));
        h.clear_recognized_keys();
        assert!(!h.key_press_event(Key::W, false));
    }

    #[test]
    fn test_button_release_until_cleared() {
        let mut h = KeyboardMouseHandler::new();
        h.mouse_press_event(MouseButton::Left, IVec2::new(10, 20));
        assert!(h.button_down(MouseButton::Left));
        h.mouse_release_event(MouseButton::Left, IVec2::new(12, 22));
        assert!(!h.button_down(MouseButton::Left));
        assert!(h.button_released(MouseButton::Left));
        // clearするまで解放信号は立ったまま（取りこぼし防止）
        assert!(h.button_released(MouseButton::Left));
        h.clear_was_pressed_states();
        assert!(!h.button_released(MouseButton::Left));
    }

    #[test]
    fn test_buttons_are_independent() {
        let mut h = KeyboardMouseHandler::new();
        h.mouse_press_event(MouseButton::Right, IVec2::ZERO);
        assert!(h.button_down(MouseButton::Right));
        assert!(!h.button_down(MouseButton::Left));
        assert!(!h.button_down(MouseButton::Middle));
    }

    #[test]
    fn test_mouse_anchor_positions() {
        let mut h = KeyboardMouseHandler::new();
        h.mouse_press_event(MouseButton::Left, IVec2::new(3, 4));
        h.mouse_release_event(MouseButton::Left, IVec2::new(7, 9));
        assert_eq!(h.mouse_down_pos(), IVec2::new(3, 4));
        assert_eq!(h.mouse_release_pos(), IVec2::new(7, 9));
    }

    #[test]
    fn test_mouse_delta_consume_on_read() {
        let mut h = KeyboardMouseHandler::new();
        h.mouse_press_event(MouseButton::Right, IVec2::new(100, 100));
        let current = IVec2::new(110, 95);
        assert_eq!(h.reset_mouse_delta(current), IVec2::new(10, -5));
        // 同じカーソル位置での2回目はゼロ
        assert_eq!(h.reset_mouse_delta(current), IVec2::ZERO);
    }

    #[test]
    fn test_mouse_delta_peek_does_not_consume() {
        let mut h = KeyboardMouseHandler::new();
        h.mouse_press_event(MouseButton::Right, IVec2::new(100, 100));
        let current = IVec2::new(104, 100);
        assert_eq!(h.mouse_delta(current), IVec2::new(4, 0));
        assert_eq!(h.mouse_delta(current), IVec2::new(4, 0));
        assert_eq!(h.reset_mouse_delta(current), IVec2::new(4, 0));
    }

    #[test]
    fn test_wheel_steps_accumulate_and_reset() {
        let mut h = KeyboardMouseHandler::new();
        // 1ノッチ = 15度 = 120 (1/8度単位)
        h.wheel_event(IVec2::ZERO, IVec2::new(0, 120));
        h.wheel_event(IVec2::ZERO, IVec2::new(0, 120));
        h.wheel_event(IVec2::ZERO, IVec2::new(0, -120));
        assert_eq!(h.wheel_delta(), 1);
        assert_eq!(h.reset_wheel_delta(), 1);
        assert_eq!(h.reset_wheel_delta(), 0);
    }

    #[test]
    fn test_wheel_prefers_pixel_delta() {
        let mut h = KeyboardMouseHandler::new();
        h.wheel_event(IVec2::new(0, 3), IVec2::new(0, 120));
        assert_eq!(h.wheel_delta(), 3);
    }

    #[test]
    fn test_repress_before_clear_overwrites_pending_release() {
        let mut h = handler_with_keys(&[Key::D]);
        h.key_press_event(Key::D, false);
        h.key_release_event(Key::D, false);
        h.key_press_event(Key::D, false);
        h.clear_was_pressed_states();
        // clearはHeldへ影響しない
        assert!(h.key_down(Key::D));
    }
}
