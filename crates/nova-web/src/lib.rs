pub mod runner;
pub mod surface;

pub use runner::{points_from_flat, WebRunner};
pub use surface::CanvasSurface;
pub use js_sys;
pub use nova_engine;

/// Generate all `#[wasm_bindgen]` exports for a game.
///
/// The generated module keeps one [`WebRunner`] in a `thread_local!` and
/// exports free functions the page calls: setup, the two loops, input,
/// window events, resources and sound commands. Every export is a no-op
/// until `engine_init` succeeded.
///
/// # Usage
///
/// ```ignore
/// use wasm_bindgen::prelude::*;
/// use nova_web::WebRunner;
///
/// mod scenes;
///
/// fn register(runner: &mut WebRunner) {
///     runner.add_scene("menu", scenes::Menu::default());
///     runner.add_scene("level-1", scenes::Level::new(1));
/// }
///
/// nova_web::export_engine!(register, "my-game");
/// ```
///
/// # Arguments
///
/// - `$setup`: a `fn(&mut WebRunner)` that adds the game's scenes
/// - `$game_name`: A string literal used in the initialization log message
#[macro_export]
macro_rules! export_engine {
    ($setup:path, $game_name:literal) => {
        use std::cell::RefCell;

        thread_local! {
            static RUNNER: RefCell<Option<$crate::WebRunner>> = RefCell::new(None);
        }

        fn with_runner<R>(f: impl FnOnce(&mut $crate::WebRunner) -> R) -> Option<R> {
            RUNNER.with(|cell| {
                let mut borrow = cell.borrow_mut();
                match borrow.as_mut() {
                    Some(runner) => Some(f(runner)),
                    None => {
                        log::warn!("{}: engine not initialized, call engine_init() first", $game_name);
                        None
                    }
                }
            })
        }

        fn to_js(err: $crate::nova_engine::EngineError) -> JsValue {
            JsValue::from_str(&err.to_string())
        }

        #[wasm_bindgen]
        pub fn engine_init(canvas: web_sys::HtmlCanvasElement, options_json: &str) -> Result<(), JsValue> {
            console_error_panic_hook::set_once();
            let _ = console_log::init_with_level(log::Level::Info);

            let mut runner = $crate::WebRunner::new(canvas, options_json).map_err(to_js)?;
            $setup(&mut runner);
            RUNNER.with(|cell| {
                *cell.borrow_mut() = Some(runner);
            });
            log::info!("{}: initialized", $game_name);
            Ok(())
        }

        #[wasm_bindgen]
        pub fn engine_load_scene(name: &str) -> Result<(), JsValue> {
            with_runner(|r| r.load_scene(name)).unwrap_or(Ok(())).map_err(to_js)
        }

        #[wasm_bindgen]
        pub fn engine_frame(timestamp: f64) {
            with_runner(|r| r.frame(timestamp));
        }

        #[wasm_bindgen]
        pub fn engine_fixed_tick() -> u32 {
            with_runner(|r| r.fixed_tick()).unwrap_or(0)
        }

        #[wasm_bindgen]
        pub fn engine_fixed_interval_ms() -> u32 {
            with_runner(|r| r.fixed_interval_ms()).unwrap_or(0)
        }

        // ---- Resources ----

        #[wasm_bindgen]
        pub fn engine_add_resource(url: &str, bytes: $crate::js_sys::Uint8Array) {
            with_runner(|r| r.add_resource(url, bytes.to_vec()));
        }

        #[wasm_bindgen]
        pub fn engine_add_image(name: &str, image: web_sys::HtmlImageElement) {
            with_runner(|r| r.add_image(name, image));
        }

        #[wasm_bindgen]
        pub fn engine_drain_sound_commands() -> String {
            with_runner(|r| r.drain_sound_commands()).unwrap_or_else(|| "[]".to_string())
        }

        // ---- Input ----

        #[wasm_bindgen]
        pub fn engine_mouse_move(x: f32, y: f32) {
            with_runner(|r| r.push_input($crate::nova_engine::InputEvent::MouseMove { x, y }));
        }

        #[wasm_bindgen]
        pub fn engine_mouse_down(button: u16) {
            with_runner(|r| r.push_input($crate::nova_engine::InputEvent::MouseDown { button: button.into() }));
        }

        #[wasm_bindgen]
        pub fn engine_mouse_up(button: u16) {
            with_runner(|r| r.push_input($crate::nova_engine::InputEvent::MouseUp { button: button.into() }));
        }

        #[wasm_bindgen]
        pub fn engine_mouse_click() {
            with_runner(|r| r.push_input($crate::nova_engine::InputEvent::MouseClick));
        }

        #[wasm_bindgen]
        pub fn engine_key_down(key_code: u32) {
            with_runner(|r| r.push_input($crate::nova_engine::InputEvent::KeyDown { key_code }));
        }

        #[wasm_bindgen]
        pub fn engine_key_up(key_code: u32) {
            with_runner(|r| r.push_input($crate::nova_engine::InputEvent::KeyUp { key_code }));
        }

        /// `coords` is `[x0, y0, x1, y1, ...]` for every finger still down.
        #[wasm_bindgen]
        pub fn engine_touch_changed(coords: $crate::js_sys::Float32Array) {
            let points = $crate::points_from_flat(&coords.to_vec());
            with_runner(|r| r.push_input($crate::nova_engine::InputEvent::TouchChanged { points }));
        }

        #[wasm_bindgen]
        pub fn engine_touch_end(coords: $crate::js_sys::Float32Array) {
            let points = $crate::points_from_flat(&coords.to_vec());
            with_runner(|r| r.push_input($crate::nova_engine::InputEvent::TouchEnd { points }));
        }

        #[wasm_bindgen]
        pub fn engine_touch_cancel() {
            with_runner(|r| r.push_input($crate::nova_engine::InputEvent::TouchCancel));
        }

        // ---- Window ----

        #[wasm_bindgen]
        pub fn engine_resize(width: f32, height: f32) {
            with_runner(|r| r.push_window_event($crate::nova_engine::WindowEvent::Resized { width, height }));
        }

        #[wasm_bindgen]
        pub fn engine_focus(focused: bool) {
            let event = if focused {
                $crate::nova_engine::WindowEvent::FocusGained
            } else {
                $crate::nova_engine::WindowEvent::FocusLost
            };
            with_runner(|r| r.push_window_event(event));
        }

        #[wasm_bindgen]
        pub fn engine_visibility(hidden: bool) {
            with_runner(|r| r.push_window_event($crate::nova_engine::WindowEvent::VisibilityChanged { hidden }));
        }
    };
}
