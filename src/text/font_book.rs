//! Font loading and the fontdue-backed shaper.

use fontdue::layout::{
    CoordinateSystem, HorizontalAlign, Layout, LayoutSettings, TextStyle, WrapStyle,
};
use fontdue::{Font, FontSettings};
use rustc_hash::FxHashMap;
use std::cell::RefCell;

use super::shaper::{Align, PlacedGlyph, ShapeRequest, TextLayout, TextShaper};
use crate::core::{CardError, Result};

/// Fonts registered by family name.
///
/// The first font loaded is the fallback for unknown family names.
#[derive(Default)]
pub struct FontBook {
    fonts: Vec<Font>,
    by_name: FxHashMap<String, usize>,
}

impl FontBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `bytes` as a TrueType/OpenType font and register it under `name`.
    ///
    /// Loading a name twice replaces the earlier font for that name.
    pub fn load(&mut self, name: impl Into<String>, bytes: &[u8]) -> Result<()> {
        let name = name.into();
        let font = Font::from_bytes(bytes, FontSettings::default()).map_err(|reason| {
            CardError::FontLoad {
                name: name.clone(),
                reason: reason.to_string(),
            }
        })?;

        tracing::debug!(font = %name, "loaded font");
        self.fonts.push(font);
        self.by_name.insert(name, self.fonts.len() - 1);
        Ok(())
    }

    /// Font for `name`, or the fallback font.
    #[must_use]
    pub fn resolve(&self, name: &str) -> Option<&Font> {
        match self.by_name.get(name) {
            Some(&idx) => self.fonts.get(idx),
            None => {
                let fallback = self.fonts.first();
                if fallback.is_some() {
                    tracing::warn!(font = %name, "unknown font, using fallback");
                }
                fallback
            }
        }
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

/// `TextShaper` backed by fontdue's layout engine and rasterizer.
pub struct FontdueShaper {
    book: FontBook,
    layout: RefCell<Layout>,
}

impl FontdueShaper {
    pub fn new(book: FontBook) -> Self {
        Self {
            book,
            layout: RefCell::new(Layout::new(CoordinateSystem::PositiveYDown)),
        }
    }

    #[must_use]
    pub fn book(&self) -> &FontBook {
        &self.book
    }
}

impl TextShaper for FontdueShaper {
    fn shape(&self, request: &ShapeRequest<'_>) -> TextLayout {
        let Some(font) = self.book.resolve(request.font_name) else {
            tracing::warn!(font = %request.font_name, "no fonts loaded, text not shaped");
            return TextLayout::empty(request.font_size);
        };

        let mut layout = self.layout.borrow_mut();
        layout.reset(&LayoutSettings {
            max_width: Some(request.wrap_width as f32),
            horizontal_align: match request.align {
                Align::Left => HorizontalAlign::Left,
                Align::Center => HorizontalAlign::Center,
            },
            wrap_style: WrapStyle::Word,
            ..LayoutSettings::default()
        });
        layout.append(
            &[font],
            &TextStyle::new(request.text, request.font_size as f32, 0),
        );

        let line_count = layout.lines().map_or(0, |lines| lines.len());
        let height = layout.height().ceil() as u32;

        let mut glyphs = Vec::with_capacity(layout.glyphs().len());
        let mut min_x = f32::MAX;
        let mut max_x = f32::MIN;
        for pos in layout.glyphs() {
            if pos.char_data.is_whitespace() || pos.width == 0 || pos.height == 0 {
                continue;
            }
            let (metrics, coverage) = font.rasterize_config(pos.key);
            min_x = min_x.min(pos.x);
            max_x = max_x.max(pos.x + metrics.width as f32);
            glyphs.push(PlacedGlyph {
                x: pos.x.round() as i32,
                y: pos.y.round() as i32,
                width: metrics.width as u32,
                height: metrics.height as u32,
                coverage,
            });
        }
        let width = if glyphs.is_empty() {
            0
        } else {
            (max_x - min_x).ceil() as u32
        };

        TextLayout::new(
            request.font_size,
            request.align,
            line_count,
            width,
            height,
            glyphs,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_rejects_garbage() {
        let mut book = FontBook::new();
        let err = book.load("Broken", b"not a font").unwrap_err();
        assert!(matches!(err, CardError::FontLoad { ref name, .. } if name == "Broken"));
        assert!(book.is_empty());
        assert!(!book.contains("Broken"));
    }

    #[test]
    fn test_empty_book_shapes_nothing() {
        let shaper = FontdueShaper::new(FontBook::new());
        let layout = shaper.shape(&ShapeRequest {
            text: "Hello",
            font_name: "Sans",
            font_size: 20,
            wrap_width: 100,
            align: Align::Left,
        });
        assert_eq!(layout.line_count(), 0);
        assert_eq!(layout.pixel_size(), (0, 0));
        assert!(shaper.book().resolve("Sans").is_none());
    }
}
