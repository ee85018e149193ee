//! Off-screen pixel surfaces and the primitives drawn onto them.
//!
//! Pixels are straight-alpha `0xAARRGGBB`. Shapes are rasterized with
//! analytic coverage from a signed distance to the shape outline, sampled at
//! pixel centers, which gives one pixel of anti-aliasing on every edge.

use image::RgbaImage;

use crate::core::Color;

/// Vertical squash applied when painting a surface.
///
/// Maps a source point `(x, y)` to `(x * scale_x + translate_x,
/// y * scale_y + translate_y)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub translate_x: f32,
    pub translate_y: f32,
    pub scale_x: f32,
    pub scale_y: f32,
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        translate_x: 0.0,
        translate_y: 0.0,
        scale_x: 1.0,
        scale_y: 1.0,
    };

    /// Squash a `size`-tall surface vertically by `scale`, keeping it
    /// vertically centered.
    #[must_use]
    pub fn vertical_squash(size: u32, scale: f32) -> Self {
        Self {
            translate_y: size as f32 * (1.0 - scale) / 2.0,
            scale_y: scale,
            ..Self::IDENTITY
        }
    }

    #[must_use]
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Axis-aligned rounded rectangle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RoundedRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub radius: f32,
}

impl RoundedRect {
    /// Rounded square covering `0..size` on both axes.
    #[must_use]
    pub fn square(size: u32, radius: f32) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: size as f32,
            height: size as f32,
            radius,
        }
    }

    /// Signed distance from `(px, py)` to the outline; negative inside.
    #[must_use]
    pub fn distance(&self, px: f32, py: f32) -> f32 {
        let hw = self.width / 2.0;
        let hh = self.height / 2.0;
        let r = self.radius.min(hw).min(hh).max(0.0);
        let qx = (px - (self.x + hw)).abs() - (hw - r);
        let qy = (py - (self.y + hh)).abs() - (hh - r);
        let outside = qx.max(0.0).hypot(qy.max(0.0));
        let inside = qx.max(qy).min(0.0);
        outside + inside - r
    }
}

fn coverage(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// A rectangular RGBA pixel buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Surface {
    width: u32,
    height: u32,
    pixels: Vec<u32>,
}

impl Surface {
    /// Fully transparent surface.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, Color::TRANSPARENT)
    }

    #[must_use]
    pub fn filled(width: u32, height: u32, color: Color) -> Self {
        Self {
            width,
            height,
            pixels: vec![color.to_argb(); (width as usize) * (height as usize)],
        }
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw `0xAARRGGBB` pixels, row-major.
    #[must_use]
    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    /// Color at `(x, y)`; transparent outside the surface.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Color {
        if x >= self.width || y >= self.height {
            return Color::TRANSPARENT;
        }
        Color::from_argb(self.pixels[self.offset(x, y)])
    }

    pub fn fill(&mut self, color: Color) {
        self.pixels.fill(color.to_argb());
    }

    /// Paint `color` over the pixel at `(x, y)`; ignored outside.
    pub fn blend(&mut self, x: i32, y: i32, color: Color) {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return;
        }
        let idx = self.offset(x as u32, y as u32);
        let dst = Color::from_argb(self.pixels[idx]);
        self.pixels[idx] = color.over(dst).to_argb();
    }

    pub fn fill_rounded_rect(&mut self, rect: &RoundedRect, color: Color) {
        self.rasterize(rect, 0.0, |d, _| coverage(0.5 - d), color);
    }

    /// Stroke the outline of `rect` with a line of `line_width` centered on it.
    pub fn stroke_rounded_rect(&mut self, rect: &RoundedRect, line_width: f32, color: Color) {
        let half = line_width / 2.0;
        self.rasterize(rect, half, |d, half| coverage(half + 0.5 - d.abs()), color);
    }

    /// Paint an 8-bit coverage mask in `color` with its top-left at `(x, y)`.
    pub fn draw_mask(&mut self, x: i32, y: i32, width: u32, height: u32, mask: &[u8], color: Color) {
        for row in 0..height {
            for col in 0..width {
                let Some(&alpha) = mask.get((row * width + col) as usize) else {
                    return;
                };
                if alpha > 0 {
                    self.blend(x + col as i32, y + row as i32, color.with_coverage(alpha));
                }
            }
        }
    }

    /// Composite an RGBA image unscaled with its top-left at `(x, y)`.
    pub fn draw_image(&mut self, image: &RgbaImage, x: i32, y: i32) {
        for (ix, iy, px) in image.enumerate_pixels() {
            let [r, g, b, a] = px.0;
            if a > 0 {
                self.blend(x + ix as i32, y + iy as i32, Color::rgba(r, g, b, a));
            }
        }
    }

    /// Paint `source` onto this surface through `transform`.
    ///
    /// Each destination pixel center is mapped back into `source` and the
    /// nearest source pixel is blended over the destination.
    pub fn composite(&mut self, source: &Surface, transform: Transform) {
        if transform.scale_x <= 0.0 || transform.scale_y <= 0.0 {
            return;
        }
        for y in 0..self.height {
            let sy = ((y as f32 + 0.5 - transform.translate_y) / transform.scale_y).floor();
            if sy < 0.0 || sy >= source.height as f32 {
                continue;
            }
            for x in 0..self.width {
                let sx = ((x as f32 + 0.5 - transform.translate_x) / transform.scale_x).floor();
                if sx < 0.0 || sx >= source.width as f32 {
                    continue;
                }
                let color = source.pixel(sx as u32, sy as u32);
                if color.a > 0 {
                    self.blend(x as i32, y as i32, color);
                }
            }
        }
    }

    fn rasterize<F>(&mut self, rect: &RoundedRect, spread: f32, cover: F, color: Color)
    where
        F: Fn(f32, f32) -> u8,
    {
        let x0 = (rect.x - spread - 1.0).floor().max(0.0) as u32;
        let y0 = (rect.y - spread - 1.0).floor().max(0.0) as u32;
        let x1 = ((rect.x + rect.width + spread + 1.0).ceil().max(0.0) as u32).min(self.width);
        let y1 = ((rect.y + rect.height + spread + 1.0).ceil().max(0.0) as u32).min(self.height);

        for y in y0..y1 {
            for x in x0..x1 {
                let d = rect.distance(x as f32 + 0.5, y as f32 + 0.5);
                let alpha = cover(d, spread);
                if alpha > 0 {
                    self.blend(x as i32, y as i32, color.with_coverage(alpha));
                }
            }
        }
    }

    #[inline]
    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize) * (self.width as usize) + x as usize
    }
}
