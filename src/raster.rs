//! Software rasterizer surface.
//!
//! Draws anti-aliased circles and lines into an [`image::RgbaImage`] so a
//! frame can be rendered and saved without a GPU:
//!
//! ```ignore
//! let mut surface = RasterSurface::new(1280, 720, Rgba::rgb8(5, 5, 12));
//! field.render(&mut surface);
//! surface.save_png("frame.png")?;
//! ```

use std::path::Path;

use glam::Vec2;
use image::{Rgba as Pixel, RgbaImage};

use crate::error::ExportError;
use crate::surface::Surface;
use crate::visuals::Rgba;

/// A CPU-side [`Surface`] backed by an RGBA8 image.
pub struct RasterSurface {
    image: RgbaImage,
    background: Rgba,
}

impl RasterSurface {
    /// Create a surface of the given pixel size filled with `background`.
    pub fn new(width: u32, height: u32, background: Rgba) -> Self {
        let image = RgbaImage::from_pixel(width, height, Pixel(background.to_rgba8()));
        Self { image, background }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    /// The pixel at `(x, y)`, or `None` outside the image.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        self.image.get_pixel_checked(x, y).map(|p| p.0)
    }

    /// Write the current contents as a PNG file.
    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<(), ExportError> {
        self.image
            .save_with_format(path.as_ref(), image::ImageFormat::Png)?;
        Ok(())
    }

    /// Pixel rows/columns whose centers can be touched by a shape spanning
    /// `min..max`, clipped to the image. `None` for a zero-sized image.
    fn pixel_span(&self, min: Vec2, max: Vec2) -> Option<(u32, u32, u32, u32)> {
        let (w, h) = (self.image.width() as f32, self.image.height() as f32);
        if w == 0.0 || h == 0.0 || max.x < 0.0 || max.y < 0.0 || min.x >= w || min.y >= h {
            return None;
        }
        let x0 = min.x.floor().max(0.0) as u32;
        let y0 = min.y.floor().max(0.0) as u32;
        let x1 = (max.x.ceil().min(w - 1.0)).max(0.0) as u32;
        let y1 = (max.y.ceil().min(h - 1.0)).max(0.0) as u32;
        Some((x0, y0, x1, y1))
    }

    /// Source-over blend `color` at `coverage` onto one pixel.
    fn blend(&mut self, x: u32, y: u32, color: Rgba, coverage: f32) {
        let alpha = (color.a * coverage).clamp(0.0, 1.0);
        if alpha <= 0.0 {
            return;
        }
        let dst = self.image.get_pixel_mut(x, y);
        let [dr, dg, db, da] = dst.0.map(|c| c as f32 / 255.0);

        let out_a = alpha + da * (1.0 - alpha);
        let mix = |s: f32, d: f32| {
            if out_a <= 0.0 {
                0.0
            } else {
                (s * alpha + d * da * (1.0 - alpha)) / out_a
            }
        };
        let out = Rgba::new(mix(color.r, dr), mix(color.g, dg), mix(color.b, db), out_a);
        dst.0 = out.to_rgba8();
    }
}

impl Surface for RasterSurface {
    fn clear(&mut self, width: f32, height: f32) {
        let (w, h) = (width.max(0.0).round() as u32, height.max(0.0).round() as u32);
        if (w, h) != self.image.dimensions() && w > 0 && h > 0 {
            self.image = RgbaImage::new(w, h);
        }
        let px = Pixel(self.background.to_rgba8());
        for p in self.image.pixels_mut() {
            *p = px;
        }
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
        if radius <= 0.0 {
            return;
        }
        let reach = Vec2::splat(radius + 1.0);
        let Some((x0, y0, x1, y1)) = self.pixel_span(center - reach, center + reach) else {
            return;
        };
        for y in y0..=y1 {
            for x in x0..=x1 {
                let d = Vec2::new(x as f32 + 0.5, y as f32 + 0.5).distance(center);
                let coverage = (radius + 0.5 - d).clamp(0.0, 1.0);
                if coverage > 0.0 {
                    self.blend(x, y, color, coverage);
                }
            }
        }
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Rgba) {
        if width <= 0.0 {
            return;
        }
        let half = width * 0.5;
        let reach = Vec2::splat(half + 1.0);
        let Some((x0, y0, x1, y1)) = self.pixel_span(from.min(to) - reach, from.max(to) + reach)
        else {
            return;
        };

        let seg = to - from;
        let len_sq = seg.length_squared();
        for y in y0..=y1 {
            for x in x0..=x1 {
                let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                let t = if len_sq > 0.0 {
                    ((p - from).dot(seg) / len_sq).clamp(0.0, 1.0)
                } else {
                    0.0
                };
                let d = p.distance(from + seg * t);
                // Hairlines keep their width as partial coverage.
                let coverage = (half + 0.5 - d).clamp(0.0, 1.0).min(width);
                if coverage > 0.0 {
                    self.blend(x, y, color, coverage);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BG: Rgba = Rgba::rgb8(0, 0, 0);

    #[test]
    fn test_new_is_filled_with_background() {
        let s = RasterSurface::new(4, 3, Rgba::rgb8(10, 20, 30));
        assert_eq!(s.pixel(0, 0), Some([10, 20, 30, 255]));
        assert_eq!(s.pixel(3, 2), Some([10, 20, 30, 255]));
        assert_eq!(s.pixel(4, 0), None);
    }

    #[test]
    fn test_circle_covers_center_only() {
        let mut s = RasterSurface::new(32, 32, BG);
        s.fill_circle(Vec2::new(16.0, 16.0), 4.0, Rgba::WHITE);
        assert_eq!(s.pixel(16, 16), Some([255, 255, 255, 255]));
        assert_eq!(s.pixel(0, 0), Some([0, 0, 0, 255]));
        assert_eq!(s.pixel(16, 25), Some([0, 0, 0, 255]));
    }

    #[test]
    fn test_translucent_circle_blends() {
        let mut s = RasterSurface::new(16, 16, BG);
        s.fill_circle(Vec2::new(8.0, 8.0), 3.0, Rgba::WHITE.with_alpha(0.5));
        let [r, g, b, a] = s.pixel(8, 8).unwrap();
        assert!((127..=129).contains(&r));
        assert_eq!(r, g);
        assert_eq!(g, b);
        assert_eq!(a, 255);
    }

    #[test]
    fn test_line_touches_midpoint() {
        let mut s = RasterSurface::new(32, 32, BG);
        s.stroke_line(Vec2::new(2.0, 16.5), Vec2::new(30.0, 16.5), 2.0, Rgba::WHITE);
        assert_eq!(s.pixel(16, 16), Some([255, 255, 255, 255]));
        assert_eq!(s.pixel(16, 4), Some([0, 0, 0, 255]));
    }

    #[test]
    fn test_offscreen_shapes_are_ignored() {
        let mut s = RasterSurface::new(8, 8, BG);
        s.fill_circle(Vec2::new(-50.0, -50.0), 3.0, Rgba::WHITE);
        s.stroke_line(Vec2::new(100.0, 0.0), Vec2::new(200.0, 0.0), 1.0, Rgba::WHITE);
        assert!(s.image().pixels().all(|p| p.0 == [0, 0, 0, 255]));
    }

    #[test]
    fn test_clear_resizes_and_repaints() {
        let mut s = RasterSurface::new(8, 8, BG);
        s.fill_circle(Vec2::new(4.0, 4.0), 2.0, Rgba::WHITE);
        s.clear(12.0, 6.0);
        assert_eq!((s.width(), s.height()), (12, 6));
        assert!(s.image().pixels().all(|p| p.0 == [0, 0, 0, 255]));
    }

    #[test]
    fn test_zero_sized_surface_draws_nothing() {
        let mut s = RasterSurface::new(0, 10, BG);
        s.fill_circle(Vec2::new(0.0, 5.0), 3.0, Rgba::WHITE);
        s.stroke_line(Vec2::new(-2.0, 0.0), Vec2::new(2.0, 10.0), 1.0, Rgba::WHITE);

        let mut s = RasterSurface::new(10, 0, BG);
        s.fill_circle(Vec2::new(5.0, 0.0), 3.0, Rgba::WHITE);
        assert_eq!(s.pixel(5, 0), None);
    }
}
