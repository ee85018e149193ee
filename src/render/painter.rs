//! Face preparation and on-screen composition.
//!
//! Rendering happens in two stages:
//!
//! 1. `render_face` draws one face (background, border, image, text) into a
//!    new `size x size` surface. Cards cache the result per face.
//! 2. `compose` paints a cached face onto the widget's target through the
//!    current animation transform and adds the highlight outline.

use image::RgbaImage;

use super::surface::{RoundedRect, Surface, Transform};
use crate::core::{CardStyle, Color, SurfaceProps};
use crate::text::TextLayout;

/// Everything that feeds the rendering of one face.
#[derive(Clone, Copy, Debug)]
pub struct FaceSpec<'a> {
    pub size: u32,
    pub style: &'a CardStyle,
    pub surface: &'a SurfaceProps,
    /// Image drawn at the style's padding, unscaled.
    pub image: Option<&'a RgbaImage>,
    /// Fitted text and its color.
    pub text: Option<(&'a TextLayout, Color)>,
}

/// How a cached face is put on screen.
#[derive(Clone, Copy, Debug)]
pub struct CompositeSpec {
    pub background: Color,
    pub transform: Transform,
    /// Outline `(color, width, radius)` drawn on top, if highlighted.
    pub highlight: Option<(Color, f32, f32)>,
}

/// Draw a face into a fresh surface.
#[must_use]
pub fn render_face(spec: &FaceSpec<'_>) -> Surface {
    let size = spec.size;
    let style = spec.style;
    let mut surface = Surface::new(size, size);

    let outline = RoundedRect::square(size, style.radius());
    surface.fill_rounded_rect(&outline, spec.surface.fill_color);
    surface.stroke_rounded_rect(
        &outline,
        style.border_width() as f32,
        spec.surface.stroke_color,
    );

    if let Some(image) = spec.image {
        let pad = style.image_padding() as i32;
        surface.draw_image(image, pad, pad);
    }

    if let Some((layout, color)) = spec.text {
        let (width, height) = layout.pixel_size();
        let x = (size as i32 - width as i32) / 2;
        let y = (size as i32 - height as i32) / 2;
        for glyph in layout.glyphs() {
            surface.draw_mask(
                x + glyph.x,
                y + glyph.y,
                glyph.width,
                glyph.height,
                &glyph.coverage,
                color,
            );
        }
    }

    tracing::trace!(size, "rendered card face");
    surface
}

/// Paint `face` onto `target` through the animation transform.
pub fn compose(target: &mut Surface, face: &Surface, spec: &CompositeSpec) {
    target.fill(spec.background);
    target.composite(face, spec.transform);

    if let Some((color, width, radius)) = spec.highlight {
        let outline = RoundedRect {
            x: 0.0,
            y: 0.0,
            width: target.width() as f32,
            height: target.height() as f32,
            radius,
        };
        target.stroke_rounded_rect(&outline, width, color);
    }
}
