use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};
use tiny_skia::{ColorU8, PremultipliedColorU8};

/// One pixel as the host sees it: 8-bit RGBA with straight (non-premultiplied)
/// alpha, same byte order as a canvas `ImageData`.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Pod, Zeroable, Serialize, Deserialize)]
#[serde(from = "[u8; 4]", into = "[u8; 4]")]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    /// Create a color from RGBA components.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create a fully opaque color from RGB components.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// True when the RGB channels match, ignoring alpha.
    pub fn rgb_eq(self, other: Rgba8) -> bool {
        self.r == other.r && self.g == other.g && self.b == other.b
    }

    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const GREEN: Self = Self::rgb(0, 255, 0);
    pub const RED: Self = Self::rgb(255, 0, 0);
    pub const BLUE: Self = Self::rgb(0, 0, 255);
}

impl From<ColorU8> for Rgba8 {
    fn from(c: ColorU8) -> Self {
        Self::new(c.red(), c.green(), c.blue(), c.alpha())
    }
}

/// Demultiplies, the way a canvas `getImageData` reports pixels.
impl From<PremultipliedColorU8> for Rgba8 {
    fn from(c: PremultipliedColorU8) -> Self {
        c.demultiply().into()
    }
}

impl From<[u8; 4]> for Rgba8 {
    fn from([r, g, b, a]: [u8; 4]) -> Self {
        Self { r, g, b, a }
    }
}

impl From<Rgba8> for [u8; 4] {
    fn from(c: Rgba8) -> Self {
        [c.r, c.g, c.b, c.a]
    }
}
