use glam::Vec2;

use super::font::StrokeFont;
use crate::systems::vector::{StrokeStyle, VectorState};

/// How a symbol is laid out on the surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    /// Em size in pixels.
    pub size: f32,
    /// Pen width as a fraction of the em size.
    pub weight: f32,
    /// The run is centered horizontally and the em box vertically on this point.
    pub center: Vec2,
}

impl TextStyle {
    pub fn new(size: f32, weight: f32, center: Vec2) -> Self {
        Self { size, weight, center }
    }

    pub fn pen(&self) -> StrokeStyle {
        StrokeStyle::round(self.size * self.weight)
    }

    /// Top-left of the em box of a run `advance` ems wide.
    pub fn origin(&self, advance: f32) -> Vec2 {
        self.center - Vec2::new(advance * self.size * 0.5, self.size * 0.5)
    }
}

/// Queue the strokes of `text` into `vectors`, laid out with `style`. Paint
/// them with [`TextStyle::pen`]. Returns the number of glyphs that produced
/// strokes.
pub fn draw_text(vectors: &mut VectorState, font: &StrokeFont, text: &str, style: &TextStyle) -> usize {
    let mut cursor = style.origin(font.measure(text));
    let mut drawn = 0;
    let mut points: Vec<Vec2> = Vec::with_capacity(32);

    for ch in text.chars() {
        let Some(glyph) = font.glyph(ch) else {
            log::debug!("no glyph for {ch:?} in font {:?}", font.name);
            continue;
        };

        for stroke in &glyph.strokes {
            points.clear();
            points.extend(stroke.iter().map(|&[x, y]| cursor + Vec2::new(x, y) * style.size));
            vectors.stroke_polyline(&points);
        }
        if !glyph.strokes.is_empty() {
            drawn += 1;
        }
        cursor.x += glyph.advance * style.size;
    }

    drawn
}
