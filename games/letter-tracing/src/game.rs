use glam::Vec2;
use trace_engine::*;

use crate::letters::LetterSet;
use crate::manifest::Manifest;

/// UI commands, sent as `InputEvent::Custom { kind, a, .. }`.
pub mod command {
    /// `a` = index into the letter set.
    pub const SELECT_LETTER: u32 = 1;
    pub const CLEAR_RESET: u32 = 2;
    pub const TRY_AGAIN: u32 = 3;
    pub const FINISH: u32 = 4;
    pub const NEXT_LETTER: u32 = 5;
}

/// Game event kinds sent to the page.
pub mod event {
    /// `a` = letter index.
    pub const GLYPH_SELECTED: u32 = 1;
    /// `a` = coverage ratio.
    pub const COVERAGE: u32 = 2;
    /// `a` = final coverage ratio.
    pub const COMPLETE: u32 = 3;
    pub const MENU: u32 = 4;
}

pub const SOUND_CELEBRATE: SoundEvent = SoundEvent(1);

/// Which page is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Letter picker, nothing on the canvas.
    Menu,
    Tracing,
    /// Letter finished, waiting for Try Again, Finish or Next.
    Celebration,
}

pub struct LetterTracing {
    engine: TracingEngine,
    letters: LetterSet,
    current: Option<usize>,
    screen: Screen,
    blank: Surface,
}

impl LetterTracing {
    pub fn new() -> Self {
        Self::with_config(TraceConfig::default(), LetterSet::latin_uppercase())
    }

    pub fn with_config(config: TraceConfig, letters: LetterSet) -> Self {
        let blank = Surface::new(config.width, config.height);
        Self {
            engine: TracingEngine::with_default_font(config),
            letters,
            current: None,
            screen: Screen::Menu,
            blank,
        }
    }

    #[cfg(test)]
    pub fn screen(&self) -> Screen {
        self.screen
    }

    #[cfg(test)]
    pub fn current_letter(&self) -> Option<&str> {
        self.current.and_then(|i| self.letters.pick(i))
    }

    #[cfg(test)]
    pub fn engine(&self) -> &TracingEngine {
        &self.engine
    }

    fn select(&mut self, ctx: &mut EngineContext, index: usize) {
        let Some(letter) = self.letters.pick(index) else {
            log::warn!("no letters to select from");
            return;
        };

        self.engine.select_glyph(letter);
        if let Some(cue) = self.engine.take_cue() {
            ctx.speak(cue);
        }

        let index = index % self.letters.len();
        self.current = Some(index);
        self.screen = Screen::Tracing;
        ctx.emit_event(GameEvent::new(event::GLYPH_SELECTED, index as f32));
    }

    fn handle_command(&mut self, ctx: &mut EngineContext, kind: u32, a: f32) {
        match kind {
            command::SELECT_LETTER => {
                let index = if a.is_finite() && a >= 0.0 { a as usize } else { 0 };
                self.select(ctx, index);
            }
            command::CLEAR_RESET if self.screen == Screen::Tracing => {
                self.engine.reset();
                ctx.emit_event(GameEvent::new(event::COVERAGE, 0.0));
            }
            command::TRY_AGAIN if self.screen == Screen::Celebration => {
                if let Some(index) = self.current {
                    self.select(ctx, index);
                }
            }
            command::FINISH => {
                self.current = None;
                self.screen = Screen::Menu;
                ctx.emit_event(GameEvent::new(event::MENU, 0.0));
            }
            command::NEXT_LETTER => {
                let next = self.current.map_or(0, |i| self.letters.next_index(i));
                self.select(ctx, next);
            }
            _ => log::debug!("command {kind} ignored on {:?}", self.screen),
        }
    }

    /// Returns whether coverage may have changed.
    fn handle_pointer(&mut self, ctx: &mut EngineContext, input: &InputEvent) -> bool {
        if self.screen != Screen::Tracing {
            return false;
        }

        let result = match *input {
            InputEvent::PointerDown { x, y } => self.engine.begin_stroke(Vec2::new(x, y)),
            InputEvent::PointerMove { x, y } => self.engine.extend_stroke(Vec2::new(x, y)),
            InputEvent::PointerUp { .. } => self.engine.end_stroke(),
            InputEvent::Custom { .. } => TraceResult::Ignored,
        };

        match result {
            TraceResult::Completed => {
                self.screen = Screen::Celebration;
                ctx.emit_event(GameEvent::new(event::COMPLETE, self.engine.coverage()));
                ctx.emit_sound(SOUND_CELEBRATE);
                false
            }
            TraceResult::Accepted => !matches!(input, InputEvent::PointerDown { .. }),
            TraceResult::Restarted | TraceResult::Ignored => false,
        }
    }
}

impl Default for LetterTracing {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for LetterTracing {
    fn config(&self) -> GameConfig {
        let trace = self.engine.config();
        GameConfig {
            surface_width: trace.width,
            surface_height: trace.height,
            ..GameConfig::default()
        }
    }

    fn init(&mut self, ctx: &mut EngineContext) {
        log::info!("Letter tracing initialized with {} letters", self.letters.len());
        ctx.emit_event(GameEvent::new(event::MENU, 0.0));
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
        // One coverage event per tick, however many moves arrived.
        let mut coverage_changed = false;

        for ev in input.iter() {
            match *ev {
                InputEvent::Custom { kind, a, .. } => {
                    self.handle_command(ctx, kind, a);
                    coverage_changed = false;
                }
                _ => coverage_changed |= self.handle_pointer(ctx, ev),
            }
        }

        if coverage_changed && self.screen == Screen::Tracing {
            ctx.emit_event(GameEvent::new(event::COVERAGE, self.engine.coverage()));
        }
    }

    /// Swap in new letters and/or tracing config. A letter in progress is
    /// selected again under the new data, so its strokes are discarded.
    fn load_manifest(&mut self, ctx: &mut EngineContext, json: &str) {
        let manifest = match Manifest::from_json(json) {
            Ok(manifest) => manifest,
            Err(err) => {
                log::error!("manifest rejected: {err}");
                return;
            }
        };

        if let Some(letters) = manifest.letters {
            if letters.is_empty() {
                log::warn!("manifest has no letters, keeping the current {}", self.letters.len());
            } else {
                self.letters = letters;
            }
        }

        if let Some(config) = manifest.config {
            self.blank = Surface::new(config.width, config.height);
            self.engine = TracingEngine::with_default_font(config);
        }

        log::info!("manifest loaded: {} letters", self.letters.len());
        if let Some(index) = self.current {
            self.select(ctx, index);
        }
    }

    fn render(&self, ctx: &mut RenderContext) {
        match self.screen {
            Screen::Menu => ctx.present(&self.blank),
            Screen::Tracing | Screen::Celebration => ctx.present(self.engine.surface()),
        }
    }
}
