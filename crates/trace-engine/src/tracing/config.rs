use serde::{Deserialize, Serialize};

use crate::surface::Rgba8;

/// Inclusive coverage range that counts as "traced enough".
///
/// Upper-bounded on purpose: scribbling over the whole letter overshoots the
/// band and does not finish the round.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoverageBand {
    pub min: f32,
    pub max: f32,
}

impl CoverageBand {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, ratio: f32) -> bool {
        ratio >= self.min && ratio <= self.max
    }
}

impl Default for CoverageBand {
    fn default() -> Self {
        Self::new(0.70, 0.80)
    }
}

/// Tracing engine configuration. Deserialized from a game manifest or built
/// in code; every field has a default so partial JSON is fine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TraceConfig {
    /// Surface width in pixels.
    pub width: usize,
    /// Surface height in pixels.
    pub height: usize,
    /// Pen color. Drawn pixels are recognized by this exact RGB.
    pub stroke_color: Rgba8,
    /// Pen width in pixels.
    pub stroke_width: f32,
    /// Fill of the reference glyph.
    pub guide_color: Rgba8,
    /// A pixel is a guide pixel when alpha > 0 and R, G and B all exceed this.
    pub guide_threshold: u8,
    /// Em size of the reference glyph in pixels.
    pub font_size: f32,
    /// Glyph pen width as a fraction of the em size.
    pub font_weight: f32,
    pub band: CoverageBand,
    /// Spoken when a glyph is selected; `{glyph}` is replaced with the symbol.
    pub announce_template: String,
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            width: 400,
            height: 400,
            stroke_color: Rgba8::GREEN,
            stroke_width: 12.0,
            guide_color: Rgba8::new(255, 255, 255, 51),
            guide_threshold: 200,
            font_size: 220.0,
            font_weight: 0.14,
            band: CoverageBand::default(),
            announce_template: "This is the letter {glyph}".to_string(),
        }
    }
}

impl TraceConfig {
    /// Set the pen.
    pub fn with_stroke(mut self, color: Rgba8, width: f32) -> Self {
        self.stroke_color = color;
        self.stroke_width = width;
        self
    }

    /// Set the completion band.
    pub fn with_band(mut self, min: f32, max: f32) -> Self {
        self.band = CoverageBand::new(min, max);
        self
    }

    /// Set the glyph em size and pen weight.
    pub fn with_font(mut self, size: f32, weight: f32) -> Self {
        self.font_size = size;
        self.font_weight = weight;
        self
    }

    /// Whether a live or snapshot pixel shows the guide's brightness signature.
    pub fn is_guide_pixel(&self, px: Rgba8) -> bool {
        let t = self.guide_threshold;
        px.a > 0 && px.r > t && px.g > t && px.b > t
    }

    /// Whether a pixel carries the pen color.
    pub fn is_drawn_pixel(&self, px: Rgba8) -> bool {
        px.rgb_eq(self.stroke_color)
    }

    /// Announcement text for `glyph`.
    pub fn announcement(&self, glyph: &str) -> String {
        self.announce_template.replace("{glyph}", glyph)
    }
}
