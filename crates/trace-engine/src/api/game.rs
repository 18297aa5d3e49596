use crate::api::types::{GameEvent, SoundEvent, SpeechCue};
use crate::input::queue::InputQueue;
use crate::surface::Surface;

/// Configuration for the engine, provided by the game.
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    /// Width of the presented surface in pixels.
    pub surface_width: usize,
    /// Height of the presented surface in pixels.
    pub surface_height: usize,
    /// Maximum number of sound events per tick (default: 32).
    pub max_sounds: usize,
    /// Maximum number of game events per tick (default: 32).
    pub max_events: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            surface_width: 400,
            surface_height: 400,
            max_sounds: 32,
            max_events: 32,
        }
    }
}

/// The core contract every game must fulfill.
pub trait Game {
    /// Return engine configuration. Called once before init.
    fn config(&self) -> GameConfig {
        GameConfig::default()
    }

    /// Setup initial state.
    fn init(&mut self, ctx: &mut EngineContext);

    /// Handle the queued input in order. Input is serialized: every event is
    /// fully processed before the next one is looked at.
    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue);

    /// Optional read-only render pass: copy whatever should be on screen into
    /// the presented surface.
    fn render(&self, _ctx: &mut RenderContext) {}

    /// Apply game data (letter lists, tuning) sent by the host as JSON.
    /// Runs at the start of a tick, before that tick's input.
    fn load_manifest(&mut self, _ctx: &mut EngineContext, _json: &str) {
        log::warn!("manifest ignored: this game has no loader");
    }
}

/// Mutable access to engine state, passed to Game::init and Game::update.
pub struct EngineContext {
    pub sounds: Vec<SoundEvent>,
    pub events: Vec<GameEvent>,
    speech: Option<SpeechCue>,
    max_sounds: usize,
    max_events: usize,
}

impl EngineContext {
    pub fn new() -> Self {
        Self::with_config(&GameConfig::default())
    }

    pub fn with_config(config: &GameConfig) -> Self {
        Self {
            sounds: Vec::with_capacity(config.max_sounds),
            events: Vec::with_capacity(config.max_events),
            speech: None,
            max_sounds: config.max_sounds,
            max_events: config.max_events,
        }
    }

    /// Emit a sound event to be forwarded to the host.
    pub fn emit_sound(&mut self, event: SoundEvent) {
        if self.sounds.len() < self.max_sounds {
            self.sounds.push(event);
        } else {
            log::warn!("sound event {:?} dropped: {} per tick max", event, self.max_sounds);
        }
    }

    /// Emit a game event to be forwarded to the host.
    pub fn emit_event(&mut self, event: GameEvent) {
        if self.events.len() < self.max_events {
            self.events.push(event);
        } else {
            log::warn!("game event {:?} dropped: {} per tick max", event, self.max_events);
        }
    }

    /// Queue a speech cue. A newer cue replaces one not yet picked up.
    pub fn speak(&mut self, cue: SpeechCue) {
        log::debug!("speech cue: {:?}", cue.text);
        self.speech = Some(cue);
    }

    /// The speech cue queued this tick, if any.
    pub fn speech(&self) -> Option<&SpeechCue> {
        self.speech.as_ref()
    }

    /// Clear per-tick transient data (sounds, events, speech).
    pub fn clear_frame_data(&mut self) {
        self.sounds.clear();
        self.events.clear();
        self.speech = None;
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Render context handed to [`Game::render`].
pub struct RenderContext<'a> {
    pub surface: &'a mut Surface,
}

impl RenderContext<'_> {
    /// Copy `source` to the presented surface.
    pub fn present(&mut self, source: &Surface) {
        self.surface.copy_from(source);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::Rgba8;
    use crate::systems::vector::{StrokeStyle, VectorState};
    use glam::Vec2;

    #[test]
    fn events_are_capped_per_tick() {
        let config = GameConfig {
            max_events: 2,
            max_sounds: 1,
            ..GameConfig::default()
        };
        let mut ctx = EngineContext::with_config(&config);
        for i in 0..5 {
            ctx.emit_event(GameEvent::new(i, 0.0));
            ctx.emit_sound(SoundEvent(i));
        }
        assert_eq!(ctx.events.len(), 2);
        assert_eq!(ctx.sounds, vec![SoundEvent(0)]);
    }

    #[test]
    fn newer_speech_replaces_pending() {
        let mut ctx = EngineContext::new();
        ctx.speak(SpeechCue::interrupting("This is the letter A"));
        ctx.speak(SpeechCue::interrupting("This is the letter B"));
        assert_eq!(ctx.speech().unwrap().text, "This is the letter B");
        assert!(ctx.speech().unwrap().interrupt);

        ctx.clear_frame_data();
        assert!(ctx.speech().is_none());
    }

    #[test]
    fn present_copies_surface() {
        let mut source = Surface::new(8, 8);
        let mut vectors = VectorState::new();
        vectors.stroke_segment(Vec2::new(2.0, 4.0), Vec2::new(6.0, 4.0));
        vectors.paint(&mut source, &StrokeStyle::round(4.0), Rgba8::GREEN);
        let mut screen = Surface::new(2, 2);

        RenderContext { surface: &mut screen }.present(&source);
        assert_eq!(screen.width(), 8);
        assert_eq!(screen.pixel(4, 4), Some(Rgba8::GREEN));
    }
}
