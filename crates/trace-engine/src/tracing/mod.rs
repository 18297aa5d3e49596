//! Letter tracing: reference glyph, pen strokes held to the glyph, and
//! coverage scoring against a target band.

pub mod config;
pub mod engine;
pub mod mask;

pub use config::{CoverageBand, TraceConfig};
pub use engine::{TraceResult, TraceState, TracingEngine};
pub use mask::ReferenceMask;
