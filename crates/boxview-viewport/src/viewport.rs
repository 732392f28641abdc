use std::time::Instant;

use glam::{IVec2, Mat4, Vec2, Vec3};

use boxview_core::{Key, KeyboardMouseHandler, MouseButton, Transform};
use boxview_scene::{Camera, PickHit, PickRay, Scene};

use crate::config::NavigationConfig;

/// ナビゲーションで使う移動キー
const NAVIGATION_KEYS: [Key; 6] = [Key::W, Key::A, Key::S, Key::D, Key::Q, Key::E];

/// ヨー回転の基準となるワールド上方向
const WORLD_UP: Vec3 = Vec3::Y;

/// GUIツールキットに埋め込むシーンビューポートのコントローラ
///
/// 生の入力イベントを受けて`KeyboardMouseHandler`へ流し、フレーム毎に
/// `process_input`でカメラの移動・回転・ズームとピックへ変換する。
/// 描画そのものは持たず、再描画が必要になったことを要求フラグで
/// 知らせる。要求は保留中に何度イベントが来ても1つに合流する。
///
/// 1フレームの呼び出し順:
/// 1. イベント到着時に`key_press_event`等の入口を呼ぶ
/// 2. `take_render_request`がtrueを返したら再描画をスケジュールする
/// 3. 描画の先頭で`process_input`を一度だけ呼ぶ。戻り値のヒットが
///    あれば選択処理（ハイライト等）を行う
pub struct SceneViewport {
    input: KeyboardMouseHandler,
    camera: Camera,
    scene: Scene,
    world_transform: Transform,
    config: NavigationConfig,
    viewport_size: Vec2,
    cursor_pos: IVec2,
    world_to_view: Mat4,
    input_event_received: bool,
    render_requested: bool,
}

impl SceneViewport {
    /// 指定サイズ（ピクセル）のビューポートを作成
    pub fn new(viewport_size: Vec2, config: NavigationConfig) -> Self {
        let mut input = KeyboardMouseHandler::new();
        for key in NAVIGATION_KEYS {
            input.add_recognized_key(key);
        }
        input.add_recognized_key(Key::Shift);

        let camera = Camera::new(viewport_size.x / viewport_size.y);
        let world_transform = Transform::identity();
        let world_to_view = camera.world_to_view() * world_transform.to_matrix();

        Self {
            input,
            camera,
            scene: Scene::new(),
            world_transform,
            config,
            viewport_size,
            cursor_pos: IVec2::ZERO,
            world_to_view,
            input_event_received: false,
            render_requested: false,
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// カメラへの可変参照。外から姿勢を変えたら
    /// `update_world_to_view`を呼んで合成行列を追従させること
    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn input(&self) -> &KeyboardMouseHandler {
        &self.input
    }

    pub fn world_transform_mut(&mut self) -> &mut Transform {
        &mut self.world_transform
    }

    // ------------------------------------------------------------------
    // イベント入口
    // ------------------------------------------------------------------

    pub fn key_press_event(&mut self, key: Key, auto_repeat: bool) {
        self.input.key_press_event(key, auto_repeat);
        self.check_input();
    }

    pub fn key_release_event(&mut self, key: Key, auto_repeat: bool) {
        self.input.key_release_event(key, auto_repeat);
        self.check_input();
    }

    pub fn mouse_press_event(&mut self, button: MouseButton, pos: IVec2) {
        self.cursor_pos = pos;
        self.input.mouse_press_event(button, pos);
        self.check_input();
    }

    pub fn mouse_release_event(&mut self, button: MouseButton, pos: IVec2) {
        self.cursor_pos = pos;
        self.input.mouse_release_event(button, pos);
        self.check_input();
    }

    pub fn mouse_move_event(&mut self, pos: IVec2) {
        self.cursor_pos = pos;
        self.check_input();
    }

    pub fn wheel_event(&mut self, pixel_delta: IVec2, angle_delta: IVec2) {
        self.input.wheel_event(pixel_delta, angle_delta);
        self.check_input();
    }

    /// ビューポートサイズ変更
    pub fn resize(&mut self, viewport_size: Vec2) {
        if viewport_size.x > 0.0 && viewport_size.y > 0.0 {
            self.viewport_size = viewport_size;
            self.camera.set_aspect(viewport_size.x / viewport_size.y);
            self.update_world_to_view();
        }
    }

    // ------------------------------------------------------------------
    // フレーム処理
    // ------------------------------------------------------------------

    /// 現在の入力状態がシーン更新を要するか調べ、必要なら再描画を要求する
    ///
    /// どのキー/マウスイベントの後にも呼ばれる。
    fn check_input(&mut self) {
        // 右ボタン押下中はカメラ操作の可能性がある
        if self.input.button_down(MouseButton::Right) {
            if NAVIGATION_KEYS.iter().any(|k| self.input.key_down(*k)) {
                self.input_event_received = true;
                self.request_render();
                return;
            }
            if self.input.mouse_down_pos() != self.cursor_pos {
                self.input_event_received = true;
                self.request_render();
                return;
            }
        }
        // 左ボタンが解放された（＝ピック要求）
        if self.input.button_released(MouseButton::Left) {
            self.input_event_received = true;
            self.request_render();
            return;
        }
        // ホイールが回った
        if self.input.wheel_delta() != 0 {
            self.input_event_received = true;
            self.request_render();
        }
    }

    fn request_render(&mut self) {
        // 保留中の要求には合流するだけ
        self.render_requested = true;
    }

    /// 保留中の再描画要求を取り出す
    pub fn take_render_request(&mut self) -> bool {
        std::mem::take(&mut self.render_requested)
    }

    /// フレーム毎の入力処理。描画の先頭で一度だけ呼ぶ
    ///
    /// 保持中のキー状態からカメラの移動・回転・ズームを適用し、左
    /// ボタンが解放済みなら解放位置でピックを行う。最後にWasPressed
    /// 状態を消費し、合成行列を更新する。処理すべき入力がなければ
    /// 何もしない。
    pub fn process_input(&mut self) -> Option<PickHit> {
        if !self.input_event_received {
            return None;
        }
        self.input_event_received = false;

        if self.input.button_down(MouseButton::Right) {
            // 移動
            let mut translation = Vec3::ZERO;
            if self.input.key_down(Key::W) {
                translation += self.camera.forward();
            }
            if self.input.key_down(Key::S) {
                translation -= self.camera.forward();
            }
            if self.input.key_down(Key::A) {
                translation -= self.camera.right();
            }
            if self.input.key_down(Key::D) {
                translation += self.camera.right();
            }
            if self.input.key_down(Key::Q) {
                translation -= self.camera.up();
            }
            if self.input.key_down(Key::E) {
                translation += self.camera.up();
            }

            let speed = if self.input.key_down(Key::Shift) {
                self.config.slow_translation_speed
            } else {
                self.config.translation_speed
            };
            self.camera.translate(speed * translation);

            // 回転。deltaの読み取りと同時にアンカーを現在位置へ進める
            let mouse_delta = self.input.reset_mouse_delta(self.cursor_pos);
            if mouse_delta != IVec2::ZERO {
                let yaw = (-self.config.rotation_speed * mouse_delta.x as f32).to_radians();
                let pitch = (-self.config.rotation_speed * mouse_delta.y as f32).to_radians();
                self.camera.rotate(yaw, WORLD_UP);
                let right = self.camera.right();
                self.camera.rotate(pitch, right);
            }
        }

        // ズーム
        let wheel_delta = self.input.reset_wheel_delta();
        if wheel_delta != 0 {
            let speed = if self.input.key_down(Key::Shift) {
                self.config.slow_wheel_speed
            } else {
                self.config.wheel_speed
            };
            self.camera
                .translate(wheel_delta as f32 * speed * self.camera.forward());
        }

        // ピック
        let mut hit = None;
        if self.input.button_released(MouseButton::Left) {
            hit = self.pick(self.input.mouse_release_pos());
        }

        // WasPressed状態の消費はフレームに一度、ここだけで行う
        self.input.clear_was_pressed_states();

        self.update_world_to_view();
        hit
    }

    /// スクリーン座標でピックを実行する
    ///
    /// 合成行列が退化しているフレームでは警告を出してスキップする。
    pub fn pick(&self, pos: IVec2) -> Option<PickHit> {
        let start = Instant::now();

        let Some(ray) = PickRay::from_screen(pos.as_vec2(), self.viewport_size, self.world_to_view)
        else {
            log::warn!("cannot invert world-to-view matrix, skipping pick");
            return None;
        };

        let hit = self.scene.pick(&ray)?;
        let name = self
            .scene
            .get(hit.object_id)
            .map(|b| b.name().as_str().to_string())
            .unwrap_or_default();
        log::debug!(
            "pick successful (box #{} \"{}\", face #{}, t = {}) after {} ms",
            hit.object_id,
            name,
            hit.face.index(),
            hit.dist,
            start.elapsed().as_millis()
        );
        Some(hit)
    }

    /// model→world→view→NDCの合成行列を更新する
    pub fn update_world_to_view(&mut self) {
        self.world_to_view = self.camera.world_to_view() * self.world_transform.to_matrix();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use boxview_scene::{BoxMesh, Face};
    use glam::Quat;

    const SIZE: Vec2 = Vec2::new(800.0, 600.0);

    fn viewport() -> SceneViewport {
        SceneViewport::new(SIZE, NavigationConfig::default())
    }

    #[test]
    fn test_key_alone_does_not_move_camera() {
        let mut v = viewport();
        let before = v.camera().translation;
        // 右ボタンなしではWだけ押しても何も起きない
        v.key_press_event(Key::W, false);
        assert!(v.process_input().is_none());
        assert_eq!(v.camera().translation, before);
        assert!(!v.take_render_request());
    }

    #[test]
    fn test_right_button_plus_key_moves_forward() {
        let mut v = viewport();
        let before = v.camera().translation;
        let forward = v.camera().forward();

        v.mouse_press_event(MouseButton::Right, IVec2::new(400, 300));
        v.key_press_event(Key::W, false);
        assert!(v.take_render_request());

        let hit = v.process_input();
        assert!(hit.is_none());
        let moved = v.camera().translation - before;
        assert!((moved - 0.8 * forward).length() < 1e-5);
    }

    #[test]
    fn test_shift_slows_translation() {
        let mut v = viewport();
        let before = v.camera().translation;
        let forward = v.camera().forward();

        v.mouse_press_event(MouseButton::Right, IVec2::new(400, 300));
        v.key_press_event(Key::Shift, false);
        v.key_press_event(Key::W, false);
        v.process_input();

        let moved = v.camera().translation - before;
        assert!((moved - 0.1 * forward).length() < 1e-5);
    }

    #[test]
    fn test_mouse_drag_rotates_camera() {
        let mut v = viewport();
        v.mouse_press_event(MouseButton::Right, IVec2::new(100, 100));
        v.mouse_move_event(IVec2::new(110, 100));

        v.process_input();
        // 右へのドラッグは負のヨーなので視線は+X側へ振れる
        assert!(v.camera().forward().x > 0.0);
        // アンカーは消費されて現在位置に進んでいる
        assert_eq!(v.input().mouse_down_pos(), IVec2::new(110, 100));
    }

    #[test]
    fn test_wheel_zooms_forward() {
        let mut v = viewport();
        let before = v.camera().translation;
        let forward = v.camera().forward();

        v.wheel_event(IVec2::ZERO, IVec2::new(0, 120));
        assert!(v.take_render_request());
        v.process_input();

        let moved = v.camera().translation - before;
        assert!((moved - 8.0 * forward).length() < 1e-4);

        // 累積はリセットされているので2回目は動かない
        let after = v.camera().translation;
        v.process_input();
        assert_eq!(v.camera().translation, after);
    }

    #[test]
    fn test_render_requests_coalesce() {
        let mut v = viewport();
        v.wheel_event(IVec2::ZERO, IVec2::new(0, 120));
        v.wheel_event(IVec2::ZERO, IVec2::new(0, 120));
        v.wheel_event(IVec2::ZERO, IVec2::new(0, 120));
        // 要求は1つに合流する
        assert!(v.take_render_request());
        assert!(!v.take_render_request());
    }

    #[test]
    fn test_left_release_picks_box_under_cursor() {
        let mut v = viewport();
        v.scene_mut().add_box("box", BoxMesh::new(4.0, 2.0, 3.0));

        // 原点の真上から見下ろす
        let camera = v.camera_mut();
        camera.translation = Vec3::new(0.0, 10.0, 0.0);
        camera.rotation = Quat::from_axis_angle(Vec3::X, -std::f32::consts::FRAC_PI_2);
        v.update_world_to_view();

        let center = IVec2::new(400, 300);
        v.mouse_press_event(MouseButton::Left, center);
        v.mouse_release_event(MouseButton::Left, center);
        assert!(v.take_render_request());

        let hit = v.process_input().expect("box should be picked");
        assert_eq!(hit.object_id, 0);
        assert_eq!(hit.face, Face::Top);

        // 解放信号はフレーム内で消費済み
        assert!(!v.input().button_released(MouseButton::Left));
    }

    #[test]
    fn test_release_signal_persists_until_processed() {
        let mut v = viewport();
        let center = IVec2::new(400, 300);
        v.mouse_press_event(MouseButton::Left, center);
        v.mouse_release_event(MouseButton::Left, center);

        // process_inputを呼ぶまでは解放信号が残り続ける
        assert!(v.input().button_released(MouseButton::Left));
        assert!(v.input().button_released(MouseButton::Left));
        v.process_input();
        assert!(!v.input().button_released(MouseButton::Left));
    }

    #[test]
    fn test_pick_empty_scene_returns_none() {
        let mut v = viewport();
        let center = IVec2::new(400, 300);
        v.mouse_press_event(MouseButton::Left, center);
        v.mouse_release_event(MouseButton::Left, center);
        assert!(v.process_input().is_none());
    }

    #[test]
    fn test_resize_updates_aspect() {
        let mut v = viewport();
        v.resize(Vec2::new(400.0, 400.0));
        assert!((v.camera().aspect - 1.0).abs() < 1e-6);
        // 不正なサイズは無視
        v.resize(Vec2::new(0.0, 100.0));
        assert!((v.camera().aspect - 1.0).abs() < 1e-6);
    }
}
