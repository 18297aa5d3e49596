//! Stroked path batching on top of tiny-skia.
//!
//! Polylines (pen segments, glyph strokes) are collected as subpaths of one
//! path and painted onto a [`Surface`] with a single `stroke_path`, so pixels
//! where subpaths overlap are composited once.
//!
//! # Usage
//!
//! ```ignore
//! let mut vectors = VectorState::new();
//! vectors.stroke_segment(from, to);
//! vectors.paint(&mut surface, &StrokeStyle::round(12.0), Rgba8::GREEN);
//! ```

use glam::Vec2;
use tiny_skia::{LineCap, LineJoin, PathBuilder, Stroke};

use crate::surface::{Rgba8, Surface};

/// Pen description for a stroke.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    pub width: f32,
    pub cap: LineCap,
    pub join: LineJoin,
}

impl StrokeStyle {
    /// Round caps and round joins, the felt-tip pen look.
    pub const fn round(width: f32) -> Self {
        Self {
            width,
            cap: LineCap::Round,
            join: LineJoin::Round,
        }
    }

    fn to_stroke(self) -> Stroke {
        Stroke {
            width: self.width,
            line_cap: self.cap,
            line_join: self.join,
            ..Stroke::default()
        }
    }
}

/// Pending subpaths since the last [`paint`](Self::paint).
pub struct VectorState {
    builder: PathBuilder,
}

impl VectorState {
    pub fn new() -> Self {
        Self {
            builder: PathBuilder::new(),
        }
    }

    /// Add an open polyline. A single point becomes a zero-length segment,
    /// which round caps turn into a dot.
    pub fn stroke_polyline(&mut self, points: &[Vec2]) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };

        self.builder.move_to(first.x, first.y);
        if rest.is_empty() {
            self.builder.line_to(first.x, first.y);
        }
        for p in rest {
            self.builder.line_to(p.x, p.y);
        }
    }

    /// Add one pen segment from `from` to `to`.
    pub fn stroke_segment(&mut self, from: Vec2, to: Vec2) {
        self.stroke_polyline(&[from, to]);
    }

    /// Stroke every pending subpath onto `surface` in one pass and clear them.
    /// Returns false when there was nothing to draw.
    pub fn paint(&mut self, surface: &mut Surface, style: &StrokeStyle, color: Rgba8) -> bool {
        let builder = std::mem::replace(&mut self.builder, PathBuilder::new());
        if style.width <= 0.0 {
            return false;
        }

        match builder.finish() {
            Some(path) => {
                surface.stroke_path(&path, &style.to_stroke(), color);
                true
            }
            None => false,
        }
    }
}

impl Default for VectorState {
    fn default() -> Self {
        Self::new()
    }
}
