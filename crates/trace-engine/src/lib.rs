pub mod api;
pub mod input;
pub mod surface;
pub mod systems;
pub mod text;
pub mod tracing;

// Re-export key types at crate root for convenience
pub use api::game::{Game, GameConfig, EngineContext, RenderContext};
pub use api::types::{SoundEvent, GameEvent, SpeechCue};
pub use input::queue::{InputEvent, InputQueue};
pub use surface::{Rgba8, Surface};
pub use systems::vector::{StrokeStyle, VectorState};
pub use text::{draw_text, GlyphDef, StrokeFont, TextStyle};
pub use tracing::{
    CoverageBand, ReferenceMask, TraceConfig, TraceResult, TraceState, TracingEngine,
};
