use std::collections::HashMap;
use serde::Deserialize;

static LATIN_UPPERCASE: &str = include_str!("../../assets/latin_uppercase.json");

/// A single-line stroke font: every glyph is a set of pen strokes.
///
/// Coordinates are in em units, y down: x in `[0, advance]`, y in `[0, 1]`.
/// Rendering the strokes with a wide pen gives the bold block letters the
/// child traces over.
#[derive(Debug, Clone, Deserialize)]
pub struct StrokeFont {
    #[serde(default)]
    pub name: String,
    pub glyphs: HashMap<String, GlyphDef>,
}

/// Definition of a single glyph (character).
#[derive(Debug, Clone, Deserialize)]
pub struct GlyphDef {
    /// Horizontal advance in em units.
    #[serde(default = "default_advance")]
    pub advance: f32,
    /// Each stroke is a polyline of [x, y] points.
    #[serde(default)]
    pub strokes: Vec<Vec<[f32; 2]>>,
}

fn default_advance() -> f32 {
    1.0
}

impl StrokeFont {
    /// Parse a stroke font from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// The bundled A–Z uppercase font (plus space).
    pub fn default_latin() -> Self {
        match Self::from_json(LATIN_UPPERCASE) {
            Ok(font) => font,
            Err(err) => {
                log::error!("bundled font failed to parse: {err}");
                Self::empty()
            }
        }
    }

    /// A font with no glyphs; everything renders blank.
    pub fn empty() -> Self {
        Self {
            name: String::new(),
            glyphs: HashMap::new(),
        }
    }

    /// Look up a character's glyph.
    pub fn glyph(&self, ch: char) -> Option<&GlyphDef> {
        let mut buf = [0u8; 4];
        self.glyphs.get(ch.encode_utf8(&mut buf) as &str)
    }

    /// Check if this font has data for a given character.
    pub fn has_char(&self, ch: char) -> bool {
        self.glyph(ch).is_some()
    }

    /// Total advance of `text` in em units. Unknown characters take no space.
    pub fn measure(&self, text: &str) -> f32 {
        text.chars()
            .filter_map(|ch| self.glyph(ch))
            .map(|g| g.advance)
            .sum()
    }
}

impl Default for StrokeFont {
    fn default() -> Self {
        Self::default_latin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_JSON: &str = r#"{
        "name": "test",
        "glyphs": {
            "=": { "strokes": [[[0.1, 0.1], [0.9, 0.1]], [[0.1, 0.9], [0.9, 0.9]]] },
            "i": { "advance": 0.5, "strokes": [[[0.25, 0.3], [0.25, 0.9]]] },
            " ": { "advance": 0.4 }
        }
    }"#;

    #[test]
    fn parse_stroke_font() {
        let font = StrokeFont::from_json(TEST_JSON).unwrap();
        assert_eq!(font.name, "test");
        assert_eq!(font.glyphs.len(), 3);
        assert_eq!(font.glyph('=').unwrap().strokes.len(), 2);
        assert!(font.glyph(' ').unwrap().strokes.is_empty());
    }

    #[test]
    fn advance_defaults_to_one_em() {
        let font = StrokeFont::from_json(TEST_JSON).unwrap();
        assert_eq!(font.glyph('=').unwrap().advance, 1.0);
        assert_eq!(font.glyph('i').unwrap().advance, 0.5);
    }

    #[test]
    fn measure_skips_unknown() {
        let font = StrokeFont::from_json(TEST_JSON).unwrap();
        assert!((font.measure("= i") - 1.9).abs() < 1e-6);
        assert_eq!(font.measure("?"), 0.0);
    }

    #[test]
    fn bundled_font_has_whole_alphabet() {
        let font = StrokeFont::default_latin();
        for ch in 'A'..='Z' {
            let glyph = font.glyph(ch).unwrap_or_else(|| panic!("missing {ch}"));
            assert!(!glyph.strokes.is_empty(), "{ch} has no strokes");
        }
        assert!(font.has_char(' '));
        assert!(!font.has_char('a'));
    }

    #[test]
    fn bad_json_is_an_error() {
        assert!(StrokeFont::from_json("{ \"glyphs\": 3 }").is_err());
    }
}
