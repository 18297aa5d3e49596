pub mod runner;

pub use runner::GameRunner;

// Re-exported so `export_game!` expands in crates that don't depend on js-sys.
#[doc(hidden)]
pub use js_sys;

/// Generate all `#[wasm_bindgen]` exports for a game.
///
/// Generates:
/// - `thread_local!` storage for the GameRunner
/// - `with_runner()` helper function
/// - All wasm-bindgen exports (game_init, game_tick, input handlers,
///   game_load_manifest, data accessors)
///
/// # Usage
///
/// ```ignore
/// use wasm_bindgen::prelude::*;
/// use trace_engine::*;
///
/// mod game;
/// use game::MyGame;
///
/// trace_web::export_game!(MyGame, "my-game");
/// ```
///
/// # Arguments
///
/// - `$game_type`: The game struct type that implements `trace_engine::Game`
/// - `$game_name`: A string literal used in the initialization log message
///
/// After every `game_tick()` the host copies `get_surface_len()` bytes from
/// `get_surface_ptr()` into an `ImageData`, forwards sound and game events,
/// and speaks `get_speech_text()` (cancelling current speech first when
/// `get_speech_interrupt()` is true).
#[macro_export]
macro_rules! export_game {
    ($game_type:ty, $game_name:literal) => {
        use std::cell::RefCell;

        thread_local! {
            static RUNNER: RefCell<Option<$crate::GameRunner<$game_type>>> = RefCell::new(None);
        }

        fn with_runner<R>(f: impl FnOnce(&mut $crate::GameRunner<$game_type>) -> R) -> R {
            RUNNER.with(|cell| {
                let mut borrow = cell.borrow_mut();
                let runner = borrow.as_mut().expect("Game not initialized. Call game_init() first.");
                f(runner)
            })
        }

        #[wasm_bindgen]
        pub fn game_init() {
            console_error_panic_hook::set_once();
            let _ = console_log::init_with_level(log::Level::Info);

            let game = <$game_type>::new();
            let runner = $crate::GameRunner::new(game);

            RUNNER.with(|cell| {
                *cell.borrow_mut() = Some(runner);
            });

            with_runner(|r| r.init());
            log::info!("{}: initialized", $game_name);
        }

        #[wasm_bindgen]
        pub fn game_tick() {
            with_runner(|r| r.tick());
        }

        #[wasm_bindgen]
        pub fn game_pointer_down(x: f32, y: f32) {
            with_runner(|r| r.push_input(InputEvent::PointerDown { x, y }));
        }

        #[wasm_bindgen]
        pub fn game_pointer_up(x: f32, y: f32) {
            with_runner(|r| r.push_input(InputEvent::PointerUp { x, y }));
        }

        #[wasm_bindgen]
        pub fn game_pointer_move(x: f32, y: f32) {
            with_runner(|r| r.push_input(InputEvent::PointerMove { x, y }));
        }

        #[wasm_bindgen]
        pub fn game_custom_event(kind: u32, a: f32, b: f32, c: f32) {
            with_runner(|r| r.push_input(InputEvent::Custom { kind, a, b, c }));
        }

        /// Hand game data (JSON) to the game; applied at the start of the next tick.
        #[wasm_bindgen]
        pub fn game_load_manifest(json: &str) {
            with_runner(|r| r.load_manifest(json));
        }

        // ---- Data accessors ----

        #[wasm_bindgen]
        pub fn get_surface_ptr() -> *const u8 {
            with_runner(|r| r.surface_ptr())
        }

        #[wasm_bindgen]
        pub fn get_surface_len() -> u32 {
            with_runner(|r| r.surface_len())
        }

        /// Copy of the surface bytes, for hosts that don't read WASM memory directly.
        #[wasm_bindgen]
        pub fn get_surface_bytes() -> $crate::js_sys::Uint8Array {
            with_runner(|r| $crate::js_sys::Uint8Array::from(r.surface_bytes()))
        }

        #[wasm_bindgen]
        pub fn get_surface_width() -> u32 {
            with_runner(|r| r.surface_width())
        }

        #[wasm_bindgen]
        pub fn get_surface_height() -> u32 {
            with_runner(|r| r.surface_height())
        }

        #[wasm_bindgen]
        pub fn get_sound_events_ptr() -> *const u8 {
            with_runner(|r| r.sound_events_ptr())
        }

        #[wasm_bindgen]
        pub fn get_sound_events_len() -> u32 {
            with_runner(|r| r.sound_events_len())
        }

        #[wasm_bindgen]
        pub fn get_game_events_ptr() -> *const f32 {
            with_runner(|r| r.game_events_ptr())
        }

        #[wasm_bindgen]
        pub fn get_game_events_len() -> u32 {
            with_runner(|r| r.game_events_len())
        }

        #[wasm_bindgen]
        pub fn get_speech_text() -> Option<String> {
            with_runner(|r| r.speech_text())
        }

        #[wasm_bindgen]
        pub fn get_speech_interrupt() -> bool {
            with_runner(|r| r.speech_interrupt())
        }

        // ---- Capacity accessors ----

        #[wasm_bindgen]
        pub fn get_max_sounds() -> u32 {
            with_runner(|r| r.max_sounds())
        }

        #[wasm_bindgen]
        pub fn get_max_events() -> u32 {
            with_runner(|r| r.max_events())
        }
    };
}
