use bytemuck::{Pod, Zeroable};

/// A sound event emitted by the game logic.
/// The numeric value maps to a game-defined sound in the host's sound manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(transparent)]
pub struct SoundEvent(pub u32);

/// A game event communicated from Rust to the host page.
/// Generic container: `kind` identifies the event, `a/b/c` carry payload.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct GameEvent {
    pub kind: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl GameEvent {
    pub const FLOATS: usize = 4;

    pub fn new(kind: u32, a: f32) -> Self {
        Self {
            kind: kind as f32,
            a,
            ..Self::default()
        }
    }
}

/// A line of text for the host's speech synthesizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeechCue {
    pub text: String,
    /// Cancel whatever is being spoken before starting this cue.
    pub interrupt: bool,
}

impl SpeechCue {
    /// A cue that replaces any speech in progress.
    pub fn interrupting(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            interrupt: true,
        }
    }
}
