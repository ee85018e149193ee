//! Card images.
//!
//! An image is either a path, decoded on the card's first flip, or pixels
//! that are already in memory. Decoded pixels are reference counted so the
//! two cards of a pair can share them.

use image::imageops::{self, FilterType};
use image::RgbaImage;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::core::{CardError, Result};

/// Image attached to a card's front face.
#[derive(Clone, Debug, PartialEq)]
pub enum CardImage {
    /// File to decode on demand.
    Path(PathBuf),
    /// Decoded RGBA pixels.
    Pixels(Rc<RgbaImage>),
}

impl CardImage {
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        CardImage::Path(path.into())
    }

    pub fn from_pixels(pixels: RgbaImage) -> Self {
        CardImage::Pixels(Rc::new(pixels))
    }

    /// Decoded pixels, if already in memory.
    #[must_use]
    pub fn pixels(&self) -> Option<&Rc<RgbaImage>> {
        match self {
            CardImage::Pixels(pixels) => Some(pixels),
            CardImage::Path(_) => None,
        }
    }

    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            CardImage::Path(path) => Some(path),
            CardImage::Pixels(_) => None,
        }
    }

    /// Native `(width, height)` of decoded pixels.
    #[must_use]
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        self.pixels().map(|p| p.dimensions())
    }

    /// Decode if needed.
    pub fn load(&self) -> Result<Rc<RgbaImage>> {
        match self {
            CardImage::Pixels(pixels) => Ok(Rc::clone(pixels)),
            CardImage::Path(path) => {
                let decoded = image::open(path).map_err(|source| CardError::ImageLoad {
                    path: path.display().to_string(),
                    source,
                })?;
                tracing::debug!(path = %path.display(), "decoded card image");
                Ok(Rc::new(decoded.to_rgba8()))
            }
        }
    }

    /// Decode and bilinearly scale to an `edge x edge` square unless it
    /// already has exactly that size.
    pub fn load_fitted(&self, edge: u32) -> Result<Rc<RgbaImage>> {
        let pixels = self.load()?;
        if pixels.dimensions() == (edge, edge) || edge == 0 {
            return Ok(pixels);
        }
        Ok(Rc::new(imageops::resize(
            &*pixels,
            edge,
            edge,
            FilterType::Triangle,
        )))
    }
}

impl From<RgbaImage> for CardImage {
    fn from(pixels: RgbaImage) -> Self {
        CardImage::from_pixels(pixels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pixels_accessors() {
        let image = CardImage::from_pixels(RgbaImage::new(3, 4));
        assert_eq!(image.dimensions(), Some((3, 4)));
        assert!(image.path().is_none());
        assert!(image.pixels().is_some());
    }

    #[test]
    fn test_fitted_rescales() {
        let image = CardImage::from_pixels(RgbaImage::new(50, 20));
        let fitted = image.load_fitted(98).unwrap();
        assert_eq!(fitted.dimensions(), (98, 98));
    }

    #[test]
    fn test_fitted_keeps_exact_size() {
        let pixels = Rc::new(RgbaImage::new(98, 98));
        let image = CardImage::Pixels(Rc::clone(&pixels));
        let fitted = image.load_fitted(98).unwrap();
        assert!(Rc::ptr_eq(&pixels, &fitted));
    }

    #[test]
    fn test_missing_file() {
        let image = CardImage::from_path("/nonexistent/card.png");
        assert_eq!(image.dimensions(), None);
        assert!(matches!(image.load(), Err(CardError::ImageLoad { .. })));
    }
}
