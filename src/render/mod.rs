//! Software rendering of card faces.
//!
//! - `Surface`: RGBA pixel buffer with rounded-rect, mask and image primitives
//! - `render_face`: rasterizes one face into a cacheable surface
//! - `compose`: paints a cached face through the animation transform

mod painter;
mod surface;

pub use painter::{compose, render_face, CompositeSpec, FaceSpec};
pub use surface::{RoundedRect, Surface, Transform};
