use crate::surface::{Rgba8, Surface};

/// Snapshot of which pixels belonged to the freshly rendered guide glyph.
///
/// Captured once per glyph attempt, before any pen strokes, and never
/// updated afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReferenceMask {
    guide: Vec<bool>,
    guide_count: usize,
}

impl ReferenceMask {
    /// Classify every pixel of `surface` with `is_guide`.
    pub fn capture(surface: &Surface, is_guide: impl Fn(Rgba8) -> bool) -> Self {
        let guide: Vec<bool> = surface.colors().map(is_guide).collect();
        let guide_count = guide.iter().filter(|&&g| g).count();
        Self { guide, guide_count }
    }

    /// Number of guide pixels.
    pub fn guide_count(&self) -> usize {
        self.guide_count
    }

    /// Whether the pixel at row-major index `idx` was a guide pixel.
    pub fn is_guide(&self, idx: usize) -> bool {
        self.guide.get(idx).copied().unwrap_or(false)
    }

    /// Per-pixel guide flags, row-major.
    pub fn flags(&self) -> &[bool] {
        &self.guide
    }
}
