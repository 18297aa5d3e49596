use glam::Vec2;
use tiny_skia::{Paint, Path, PixmapMut, PixmapRef, PremultipliedColorU8, Stroke, Transform};

use super::color::Rgba8;

/// A fixed-size raster in tiny-skia's premultiplied RGBA8 layout, row-major,
/// origin at the top-left. Starts fully transparent.
///
/// Painting goes through tiny-skia with anti-aliasing off, so every painted
/// pixel carries exactly the paint color. Reads are demultiplied back to
/// straight alpha. Reads outside the grid return `None`. A zero-sized surface
/// reads nothing and paints nothing.
#[derive(Debug, Clone, PartialEq)]
pub struct Surface {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl Surface {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0; width * height * 4],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of pixels in the grid.
    pub fn len(&self) -> usize {
        self.width * self.height
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    fn view(&self) -> Option<PixmapRef<'_>> {
        PixmapRef::from_bytes(&self.data, self.width as u32, self.height as u32)
    }

    fn view_mut(&mut self) -> Option<PixmapMut<'_>> {
        PixmapMut::from_bytes(&mut self.data, self.width as u32, self.height as u32)
    }

    /// Reset every pixel to transparent black.
    pub fn clear(&mut self) {
        self.data.fill(0);
    }

    /// Stroke `path` with `stroke`, source-over, aliased.
    pub fn stroke_path(&mut self, path: &Path, stroke: &Stroke, color: Rgba8) {
        let Some(mut pixmap) = self.view_mut() else {
            return;
        };

        let mut paint = Paint::default();
        paint.set_color_rgba8(color.r, color.g, color.b, color.a);
        paint.anti_alias = false;
        pixmap.stroke_path(path, &paint, stroke, Transform::identity(), None);
    }

    pub fn pixel(&self, x: i32, y: i32) -> Option<Rgba8> {
        if x < 0 || y < 0 {
            return None;
        }
        self.view()?.pixel(x as u32, y as u32).map(Rgba8::from)
    }

    /// Pixel under a surface-space position (floored to the containing pixel).
    pub fn pixel_at(&self, pos: Vec2) -> Option<Rgba8> {
        if !pos.is_finite() {
            return None;
        }
        self.pixel(pos.x.floor() as i32, pos.y.floor() as i32)
    }

    /// Every pixel in row-major order, straight alpha.
    pub fn colors(&self) -> impl Iterator<Item = Rgba8> + '_ {
        self.data.chunks_exact(4).map(|px| {
            PremultipliedColorU8::from_rgba(px[0], px[1], px[2], px[3])
                .map_or(Rgba8::TRANSPARENT, Rgba8::from)
        })
    }

    /// Replace `out` with the straight-alpha pixels, ready for an `ImageData`.
    pub fn write_rgba(&self, out: &mut Vec<Rgba8>) {
        out.clear();
        out.extend(self.colors());
    }

    /// Copy another surface's pixels. Mismatched sizes resize this surface.
    pub fn copy_from(&mut self, other: &Surface) {
        self.width = other.width;
        self.height = other.height;
        self.data.clone_from(&other.data);
    }

    /// Center point of the surface.
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width as f32 * 0.5, self.height as f32 * 0.5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tiny_skia::{LineCap, PathBuilder};

    fn line(x0: f32, y0: f32, x1: f32, y1: f32) -> Path {
        let mut pb = PathBuilder::new();
        pb.move_to(x0, y0);
        pb.line_to(x1, y1);
        pb.finish().unwrap()
    }

    fn pen(width: f32) -> Stroke {
        Stroke {
            width,
            line_cap: LineCap::Butt,
            ..Stroke::default()
        }
    }

    #[test]
    fn new_surface_is_transparent() {
        let s = Surface::new(4, 3);
        assert_eq!(s.len(), 12);
        assert!(s.colors().all(|p| p == Rgba8::TRANSPARENT));
    }

    #[test]
    fn out_of_bounds_reads_none() {
        let s = Surface::new(4, 4);
        assert_eq!(s.pixel(-1, 0), None);
        assert_eq!(s.pixel(4, 0), None);
        assert_eq!(s.pixel_at(Vec2::new(3.9, 3.9)), Some(Rgba8::TRANSPARENT));
        assert_eq!(s.pixel_at(Vec2::new(-0.5, 1.0)), None);
        assert_eq!(s.pixel_at(Vec2::new(f32::NAN, 1.0)), None);
    }

    #[test]
    fn aliased_stroke_paints_exact_color() {
        let mut s = Surface::new(20, 10);
        s.stroke_path(&line(2.0, 5.0, 18.0, 5.0), &pen(4.0), Rgba8::GREEN);

        assert_eq!(s.pixel(10, 4), Some(Rgba8::GREEN));
        assert_eq!(s.pixel(10, 5), Some(Rgba8::GREEN));
        // No soft edge: outside the pen stays untouched.
        assert_eq!(s.pixel(10, 8), Some(Rgba8::TRANSPARENT));
        assert_eq!(s.pixel(0, 5), Some(Rgba8::TRANSPARENT));
    }

    #[test]
    fn translucent_paint_reads_back_straight() {
        let guide = Rgba8::new(255, 255, 255, 51);
        let mut s = Surface::new(20, 10);
        s.stroke_path(&line(2.0, 5.0, 18.0, 5.0), &pen(4.0), guide);
        assert_eq!(s.pixel(10, 5), Some(guide));

        // Opaque pen over the guide replaces it.
        s.stroke_path(&line(8.0, 5.0, 12.0, 5.0), &pen(4.0), Rgba8::GREEN);
        assert_eq!(s.pixel(10, 5), Some(Rgba8::GREEN));
        assert_eq!(s.pixel(4, 5), Some(guide));
    }

    #[test]
    fn zero_sized_surface_is_inert() {
        let mut s = Surface::new(0, 0);
        assert!(s.is_empty());
        s.stroke_path(&line(0.0, 0.0, 5.0, 5.0), &pen(2.0), Rgba8::RED);
        assert_eq!(s.pixel(0, 0), None);
        assert_eq!(s.colors().count(), 0);
    }

    #[test]
    fn clear_and_copy() {
        let mut a = Surface::new(3, 3);
        // Wide enough to cover the whole grid.
        a.stroke_path(&line(0.0, 1.5, 3.0, 1.5), &pen(6.0), Rgba8::BLUE);

        let mut b = Surface::new(1, 1);
        b.copy_from(&a);
        assert_eq!(b.width(), 3);
        assert_eq!(b.pixel(2, 2), Some(Rgba8::BLUE));

        a.clear();
        assert_eq!(a.pixel(1, 1), Some(Rgba8::TRANSPARENT));
        assert_eq!(b.pixel(1, 1), Some(Rgba8::BLUE));

        let mut out = vec![Rgba8::RED; 2];
        b.write_rgba(&mut out);
        assert_eq!(out, vec![Rgba8::BLUE; 9]);
    }
}
