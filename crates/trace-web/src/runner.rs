use trace_engine::{
    Game, GameConfig, EngineContext, RenderContext,
    InputEvent, InputQueue, Rgba8, Surface,
};

/// Generic game runner that wires up the engine loop.
///
/// Each concrete game creates a `thread_local!` GameRunner and exports free
/// functions via `#[wasm_bindgen]`, because wasm-bindgen cannot export
/// generic structs directly.
pub struct GameRunner<G: Game> {
    game: G,
    ctx: EngineContext,
    input: InputQueue,
    /// What the game presented on the last tick.
    screen: Surface,
    /// `screen` in straight alpha, what the host copies into its `ImageData`.
    frame: Vec<Rgba8>,
    /// Manifest JSON waiting for the next tick.
    pending_manifest: Option<String>,
    config: GameConfig,
    initialized: bool,
    /// Flat buffer of sound event IDs for the host to read.
    sound_buffer: Vec<u8>,
}

impl<G: Game> GameRunner<G> {
    pub fn new(game: G) -> Self {
        let config = game.config();
        let screen = Surface::new(config.surface_width, config.surface_height);
        let frame = Vec::with_capacity(screen.len());
        let sound_buffer = Vec::with_capacity(config.max_sounds);

        Self {
            game,
            ctx: EngineContext::with_config(&config),
            input: InputQueue::new(),
            screen,
            frame,
            pending_manifest: None,
            config,
            initialized: false,
            sound_buffer,
        }
    }

    /// Initialize the game. Call once after construction.
    pub fn init(&mut self) {
        self.config = self.game.config();
        self.ctx = EngineContext::with_config(&self.config);
        self.game.init(&mut self.ctx);
        self.render();
        self.initialized = true;
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Queue game data for the next tick. A newer manifest replaces one not
    /// yet applied.
    pub fn load_manifest(&mut self, json: &str) {
        self.pending_manifest = Some(json.to_owned());
    }

    /// Run one tick: apply a pending manifest, hand queued input to the game,
    /// then present.
    pub fn tick(&mut self) {
        if !self.initialized {
            return;
        }

        // Clear per-tick transient data
        self.ctx.clear_frame_data();

        if let Some(json) = self.pending_manifest.take() {
            self.game.load_manifest(&mut self.ctx, &json);
        }

        if !self.input.is_empty() {
            self.game.update(&mut self.ctx, &self.input);
            self.input.drain();
        }

        self.render();

        // Pack sound events into flat buffer
        self.sound_buffer.clear();
        for sound in &self.ctx.sounds {
            self.sound_buffer.push(sound.0 as u8);
        }
    }

    fn render(&mut self) {
        let mut render_ctx = RenderContext {
            surface: &mut self.screen,
        };
        self.game.render(&mut render_ctx);
        self.screen.write_rgba(&mut self.frame);
    }

    // ---- Accessors for host reads ----

    /// Straight-alpha RGBA bytes of the presented surface.
    pub fn surface_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.frame)
    }

    pub fn surface_ptr(&self) -> *const u8 {
        self.surface_bytes().as_ptr()
    }

    pub fn surface_len(&self) -> u32 {
        self.surface_bytes().len() as u32
    }

    pub fn surface_width(&self) -> u32 {
        self.screen.width() as u32
    }

    pub fn surface_height(&self) -> u32 {
        self.screen.height() as u32
    }

    pub fn sound_events_ptr(&self) -> *const u8 {
        self.sound_buffer.as_ptr()
    }

    pub fn sound_events_len(&self) -> u32 {
        self.sound_buffer.len() as u32
    }

    pub fn game_events_ptr(&self) -> *const f32 {
        self.ctx.events.as_ptr() as *const f32
    }

    pub fn game_events_len(&self) -> u32 {
        self.ctx.events.len() as u32
    }

    pub fn speech_text(&self) -> Option<String> {
        self.ctx.speech().map(|cue| cue.text.clone())
    }

    pub fn speech_interrupt(&self) -> bool {
        self.ctx.speech().is_some_and(|cue| cue.interrupt)
    }

    pub fn max_sounds(&self) -> u32 {
        self.config.max_sounds as u32
    }

    pub fn max_events(&self) -> u32 {
        self.config.max_events as u32
    }

    pub fn screen(&self) -> &Surface {
        &self.screen
    }

    pub fn context(&self) -> &EngineContext {
        &self.ctx
    }
}
