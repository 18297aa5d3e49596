use serde::Deserialize;
use trace_engine::TraceConfig;

use crate::letters::LetterSet;

/// Game data the host can send after start-up. Every part is optional.
///
/// ```json
/// { "letters": ["A", "B"], "config": { "stroke_width": 16.0 } }
/// ```
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Manifest {
    /// Replaces the tracing config. Missing fields take their defaults.
    pub config: Option<TraceConfig>,
    /// Replaces the letters offered on the menu.
    pub letters: Option<LetterSet>,
}

impl Manifest {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
