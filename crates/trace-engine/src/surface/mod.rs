//! Raster surface the tracing engine paints into and reads back from,
//! backed by tiny-skia.

pub mod buffer;
pub mod color;

pub use buffer::Surface;
pub use color::Rgba8;
