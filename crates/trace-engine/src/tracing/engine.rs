use glam::Vec2;

use super::config::TraceConfig;
use super::mask::ReferenceMask;
use crate::api::types::SpeechCue;
use crate::surface::Surface;
use crate::systems::vector::{StrokeStyle, VectorState};
use crate::text::{draw_text, StrokeFont, TextStyle};

/// State of a single glyph attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceState {
    /// Guide rendered, waiting for the first stroke.
    Idle,
    /// The user has started tracing.
    Tracing,
    /// Coverage landed in the target band. Terminal until reset or a new glyph.
    Complete,
}

/// Result of processing a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceResult {
    /// Stroke started, or a segment was drawn.
    Accepted,
    /// Pointer was off the guide: path restarted there, nothing drawn.
    Restarted,
    /// This event pushed coverage into the target band.
    Completed,
    /// No action (not drawing, or the attempt is already complete).
    Ignored,
}

/// Pen state between pointer events.
#[derive(Debug, Clone, Copy, Default)]
struct StrokeState {
    drawing: bool,
    last: Vec2,
}

/// Renders a translucent reference glyph, accepts pen strokes that stay on
/// it, and measures how much of the glyph has been traced.
///
/// Coverage is a full rescan of the surface after every drawn segment and on
/// pointer release.
pub struct TracingEngine {
    config: TraceConfig,
    font: StrokeFont,
    vectors: VectorState,
    surface: Surface,
    mask: ReferenceMask,
    symbol: String,
    stroke: StrokeState,
    coverage: f32,
    state: TraceState,
    pending_cue: Option<SpeechCue>,
}

impl TracingEngine {
    /// Create an engine with a blank surface and no glyph selected.
    pub fn new(config: TraceConfig, font: StrokeFont) -> Self {
        let surface = Surface::new(config.width, config.height);
        let mask = ReferenceMask::capture(&surface, |px| config.is_guide_pixel(px));
        Self {
            config,
            font,
            vectors: VectorState::new(),
            surface,
            mask,
            symbol: String::new(),
            stroke: StrokeState::default(),
            coverage: 0.0,
            state: TraceState::Idle,
            pending_cue: None,
        }
    }

    /// Create an engine using the bundled A–Z font.
    pub fn with_default_font(config: TraceConfig) -> Self {
        Self::new(config, StrokeFont::default_latin())
    }

    /// Start a new attempt on `symbol`: redraw the guide, capture the
    /// reference mask, zero coverage and queue the pronunciation cue.
    ///
    /// Symbols the font can't draw leave an empty guide.
    pub fn select_glyph(&mut self, symbol: &str) {
        self.symbol.clear();
        self.symbol.push_str(symbol);
        self.restart_attempt();

        self.pending_cue = Some(SpeechCue::interrupting(self.config.announcement(symbol)));
        log::info!(
            "glyph {:?} selected: {} guide pixels",
            self.symbol,
            self.mask.guide_count()
        );
    }

    /// Wipe all strokes and start the same glyph over.
    pub fn reset(&mut self) {
        self.restart_attempt();
        log::debug!("glyph {:?} reset", self.symbol);
    }

    fn restart_attempt(&mut self) {
        self.render_guide();
        self.stroke = StrokeState::default();
        self.coverage = 0.0;
        self.state = TraceState::Idle;
    }

    fn render_guide(&mut self) {
        self.surface.clear();

        let style = TextStyle::new(self.config.font_size, self.config.font_weight, self.surface.center());
        draw_text(&mut self.vectors, &self.font, &self.symbol, &style);
        self.vectors.paint(&mut self.surface, &style.pen(), self.config.guide_color);

        let config = &self.config;
        let mask = ReferenceMask::capture(&self.surface, |px| config.is_guide_pixel(px));
        self.mask = mask;
    }

    /// Handle pointer down.
    pub fn begin_stroke(&mut self, pos: Vec2) -> TraceResult {
        if self.state == TraceState::Complete {
            return TraceResult::Ignored;
        }

        self.stroke = StrokeState { drawing: true, last: pos };
        self.state = TraceState::Tracing;
        TraceResult::Accepted
    }

    /// Handle pointer move.
    ///
    /// Draws only when the pixel under `pos` still shows the guide on the
    /// live surface. A pixel already inked by the pen no longer counts as
    /// guide, so moving onto it restarts the path too.
    pub fn extend_stroke(&mut self, pos: Vec2) -> TraceResult {
        if self.state == TraceState::Complete || !self.stroke.drawing {
            return TraceResult::Ignored;
        }

        if !self.is_on_guide(pos) {
            self.stroke.last = pos;
            return TraceResult::Restarted;
        }

        let pen = StrokeStyle::round(self.config.stroke_width);
        self.vectors.stroke_segment(self.stroke.last, pos);
        self.vectors.paint(&mut self.surface, &pen, self.config.stroke_color);
        self.stroke.last = pos;

        self.compute_coverage();
        log::debug!("coverage {:.3} on {:?}", self.coverage, self.symbol);

        if self.state == TraceState::Complete {
            TraceResult::Completed
        } else {
            TraceResult::Accepted
        }
    }

    /// Handle pointer up (or the pointer leaving the surface).
    pub fn end_stroke(&mut self) -> TraceResult {
        if !self.stroke.drawing {
            return TraceResult::Ignored;
        }
        self.stroke.drawing = false;

        if self.state == TraceState::Complete {
            return TraceResult::Ignored;
        }

        self.compute_coverage();
        if self.state == TraceState::Complete {
            TraceResult::Completed
        } else {
            TraceResult::Accepted
        }
    }

    /// Rescan the surface: guide pixels come from the reference mask, drawn
    /// pixels are guide pixels whose live color is the pen color.
    ///
    /// Entering the target band moves the attempt to `Complete`. A glyph with
    /// no guide pixels scores 0 and never completes.
    pub fn compute_coverage(&mut self) -> f32 {
        let mut guide = 0usize;
        let mut drawn = 0usize;

        for (&is_guide, px) in self.mask.flags().iter().zip(self.surface.colors()) {
            if is_guide {
                guide += 1;
                if self.config.is_drawn_pixel(px) {
                    drawn += 1;
                }
            }
        }

        if guide == 0 {
            self.coverage = 0.0;
            return self.coverage;
        }

        self.coverage = drawn as f32 / guide as f32;

        if self.state != TraceState::Complete && self.config.band.contains(self.coverage) {
            self.state = TraceState::Complete;
            log::info!(
                "glyph {:?} traced: coverage {:.3} ({drawn}/{guide})",
                self.symbol,
                self.coverage
            );
        }

        self.coverage
    }

    pub fn is_complete(&self) -> bool {
        self.state == TraceState::Complete
    }

    /// Whether the live pixel under `pos` carries the guide signature.
    pub fn is_on_guide(&self, pos: Vec2) -> bool {
        self.surface
            .pixel_at(pos)
            .is_some_and(|px| self.config.is_guide_pixel(px))
    }

    /// Take the pronunciation cue queued by the last `select_glyph`.
    pub fn take_cue(&mut self) -> Option<SpeechCue> {
        self.pending_cue.take()
    }

    /// Last computed coverage ratio in [0, 1].
    pub fn coverage(&self) -> f32 {
        self.coverage
    }

    pub fn state(&self) -> TraceState {
        self.state
    }

    pub fn is_drawing(&self) -> bool {
        self.stroke.drawing
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn mask(&self) -> &ReferenceMask {
        &self.mask
    }

    pub fn config(&self) -> &TraceConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::Rgba8;

    /// Two horizontal bars: top at y = 120, bottom at y = 280, x 120..280,
    /// 40px thick with round ends. Gap between y = 140 and y = 260.
    const BARS_FONT: &str = r#"{ "glyphs": {
        "=": { "strokes": [[[0.1, 0.1], [0.9, 0.1]], [[0.1, 0.9], [0.9, 0.9]]] }
    } }"#;

    fn bars_engine(config: TraceConfig) -> TracingEngine {
        let font = StrokeFont::from_json(BARS_FONT).unwrap();
        let mut engine = TracingEngine::new(config.with_font(200.0, 0.2), font);
        engine.select_glyph("=");
        engine
    }

    fn letter_a() -> TracingEngine {
        let mut engine = TracingEngine::with_default_font(TraceConfig::default());
        engine.select_glyph("A");
        engine
    }

    fn p(x: f32, y: f32) -> Vec2 {
        Vec2::new(x, y)
    }

    #[test]
    fn fresh_glyph_has_guide_and_zero_coverage() {
        let mut engine = letter_a();
        assert!(engine.mask().guide_count() > 1000);
        assert_eq!(engine.state(), TraceState::Idle);
        assert_eq!(engine.compute_coverage(), 0.0);
        assert!(!engine.is_complete());
    }

    #[test]
    fn guide_is_translucent_white() {
        let engine = letter_a();
        // Middle of the left leg of "A".
        assert_eq!(engine.surface().pixel(167, 200), Some(Rgba8::new(255, 255, 255, 51)));
        assert_eq!(engine.surface().pixel(5, 5), Some(Rgba8::TRANSPARENT));
    }

    #[test]
    fn empty_glyph_scores_zero_without_completing() {
        let mut engine = TracingEngine::with_default_font(TraceConfig::default().with_band(0.0, 0.8));
        engine.select_glyph("?");
        assert_eq!(engine.mask().guide_count(), 0);
        assert_eq!(engine.compute_coverage(), 0.0);
        assert!(!engine.is_complete());

        engine.begin_stroke(p(200.0, 200.0));
        assert_eq!(engine.extend_stroke(p(220.0, 200.0)), TraceResult::Restarted);
        assert_eq!(engine.end_stroke(), TraceResult::Accepted);
        assert_eq!(engine.coverage(), 0.0);
        assert!(!engine.is_complete());
    }

    #[test]
    fn tracing_inside_guide_never_lowers_coverage() {
        let mut engine = letter_a();
        engine.begin_stroke(p(134.0, 277.0));

        // Walk up the left leg in 8px steps (further than the 6px pen radius).
        let from = p(134.0, 277.0);
        let to = p(200.0, 123.0);
        let steps = (from.distance(to) / 8.0) as usize;
        let mut last = 0.0;
        let mut drawn = 0;
        for i in 1..=steps {
            let pos = from.lerp(to, i as f32 / steps as f32);
            if engine.extend_stroke(pos) == TraceResult::Accepted {
                drawn += 1;
            }
            assert!(engine.coverage() >= last, "coverage dropped at step {i}");
            last = engine.coverage();
        }
        engine.end_stroke();

        assert!(drawn > 10);
        assert!(engine.coverage() > 0.0);
        assert!(engine.coverage() >= last);
        assert_eq!(engine.state(), TraceState::Tracing);
    }

    #[test]
    fn inked_pixel_is_no_longer_guide() {
        let mut engine = bars_engine(TraceConfig::default());
        engine.begin_stroke(p(200.0, 120.0));
        assert_eq!(engine.extend_stroke(p(240.0, 120.0)), TraceResult::Accepted);
        assert_eq!(engine.surface().pixel(240, 120), Some(Rgba8::GREEN));

        // Still inside the reference mask, but the live pixel is green now.
        assert!(!engine.is_on_guide(p(243.0, 120.0)));
        assert_eq!(engine.extend_stroke(p(243.0, 120.0)), TraceResult::Restarted);
    }

    #[test]
    fn stroke_leaving_guide_is_not_drawn_across_gap() {
        let mut engine = bars_engine(TraceConfig::default());
        engine.begin_stroke(p(200.0, 120.0));
        assert_eq!(engine.extend_stroke(p(240.0, 120.0)), TraceResult::Accepted);

        // Out into the gap, then back onto the bottom bar.
        assert_eq!(engine.extend_stroke(p(380.0, 200.0)), TraceResult::Restarted);
        assert_eq!(engine.extend_stroke(p(200.0, 280.0)), TraceResult::Accepted);

        // Along the excluded segment (240,120) -> (380,200).
        for t in [0.3, 0.5, 0.7] {
            let q = p(240.0, 120.0).lerp(p(380.0, 200.0), t);
            assert_eq!(
                engine.surface().pixel_at(q),
                Some(Rgba8::TRANSPARENT),
                "pixel at {q} was drawn"
            );
        }
        // The path restarted at the outside point and was drawn from there.
        assert_eq!(engine.surface().pixel(200, 280), Some(Rgba8::GREEN));
        assert_eq!(engine.surface().pixel(290, 240), Some(Rgba8::GREEN));
    }

    #[test]
    fn landing_in_band_completes_and_freezes() {
        // Ink the whole top bar and nothing else: half the guide.
        let mut engine = bars_engine(TraceConfig::default().with_stroke(Rgba8::GREEN, 44.0).with_band(0.4, 0.6));
        engine.begin_stroke(p(120.0, 120.0));
        assert_eq!(engine.extend_stroke(p(280.0, 120.0)), TraceResult::Completed);
        assert!((engine.coverage() - 0.5).abs() < 0.01, "coverage {}", engine.coverage());
        assert!(engine.is_complete());

        let frozen = engine.surface().clone();
        assert_eq!(engine.extend_stroke(p(200.0, 280.0)), TraceResult::Ignored);
        assert_eq!(engine.end_stroke(), TraceResult::Ignored);
        assert_eq!(engine.begin_stroke(p(200.0, 280.0)), TraceResult::Ignored);
        assert_eq!(engine.extend_stroke(p(220.0, 280.0)), TraceResult::Ignored);
        assert_eq!(engine.surface(), &frozen);
        assert_eq!(engine.state(), TraceState::Complete);
    }

    #[test]
    fn coverage_outside_band_does_not_complete() {
        let mut engine = bars_engine(TraceConfig::default().with_stroke(Rgba8::GREEN, 44.0).with_band(0.4, 0.45));
        engine.begin_stroke(p(120.0, 120.0));
        assert_eq!(engine.extend_stroke(p(280.0, 120.0)), TraceResult::Accepted);
        assert!((engine.coverage() - 0.5).abs() < 0.01, "coverage {}", engine.coverage());
        assert!(!engine.is_complete());
    }

    #[test]
    fn full_coverage_of_a_overshoots_band() {
        // A pen wide enough to flood the whole 400x400 surface in one segment.
        let config = TraceConfig::default().with_stroke(Rgba8::GREEN, 600.0);
        let mut engine = TracingEngine::with_default_font(config);
        engine.select_glyph("A");

        engine.begin_stroke(p(167.0, 200.0));
        assert_eq!(engine.extend_stroke(p(233.0, 200.0)), TraceResult::Accepted);
        assert_eq!(engine.coverage(), 1.0);
        assert!(!engine.is_complete());
        assert_eq!(engine.end_stroke(), TraceResult::Accepted);
        assert!(!engine.is_complete());
    }

    #[test]
    fn reset_after_complete_restores_fresh_guide() {
        let mut engine = bars_engine(TraceConfig::default().with_stroke(Rgba8::GREEN, 44.0).with_band(0.4, 0.6));
        let fresh = engine.surface().clone();
        engine.take_cue();

        engine.begin_stroke(p(120.0, 120.0));
        engine.extend_stroke(p(280.0, 120.0));
        assert!(engine.is_complete());

        engine.reset();
        assert_eq!(engine.coverage(), 0.0);
        assert_eq!(engine.state(), TraceState::Idle);
        assert!(!engine.is_drawing());
        assert_eq!(engine.surface(), &fresh);
        assert_eq!(engine.symbol(), "=");
        assert!(engine.take_cue().is_none());

        assert_eq!(engine.begin_stroke(p(200.0, 120.0)), TraceResult::Accepted);
        assert_eq!(engine.state(), TraceState::Tracing);
    }

    #[test]
    fn select_glyph_queues_replacing_cue() {
        let mut engine = TracingEngine::with_default_font(TraceConfig::default());
        engine.select_glyph("A");
        engine.select_glyph("B");

        let cue = engine.take_cue().unwrap();
        assert_eq!(cue.text, "This is the letter B");
        assert!(cue.interrupt);
        assert!(engine.take_cue().is_none());
    }

    #[test]
    fn selecting_new_glyph_discards_strokes() {
        let mut engine = letter_a();
        engine.begin_stroke(p(167.0, 200.0));
        engine.extend_stroke(p(180.0, 170.0));
        assert!(engine.coverage() > 0.0);

        engine.select_glyph("B");
        assert_eq!(engine.coverage(), 0.0);
        assert_eq!(engine.state(), TraceState::Idle);
        assert!(!engine.surface().colors().any(|px| px == Rgba8::GREEN));
    }

    #[test]
    fn move_without_press_is_ignored() {
        let mut engine = letter_a();
        assert_eq!(engine.extend_stroke(p(167.0, 200.0)), TraceResult::Ignored);
        assert_eq!(engine.end_stroke(), TraceResult::Ignored);

        engine.begin_stroke(p(167.0, 200.0));
        engine.end_stroke();
        assert_eq!(engine.extend_stroke(p(180.0, 170.0)), TraceResult::Ignored);
    }
}
