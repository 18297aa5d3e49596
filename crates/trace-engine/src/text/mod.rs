//! Stroke-font text: the reference glyphs drawn under the child's pen.

pub mod font;
pub mod render;

pub use font::{GlyphDef, StrokeFont};
pub use render::{draw_text, TextStyle};
