//! Font size search for card text.
//!
//! The fitter tries a fixed list of font sizes, largest first, and keeps the
//! first one whose layout satisfies all of:
//!
//! - line count <= number of whitespace-separated words
//! - pixel width  <= card size - 2 * border width
//! - pixel height <= card size - 2 * border width
//!
//! When no size qualifies the smallest size is used. Multi-line results are
//! re-shaped centered; single lines stay left aligned because centering a
//! lone line shifts it off the visual center in the host's layout engine.

use std::rc::Rc;

use super::cache::{LayoutCache, LayoutKey};
use super::shaper::{Align, ShapeRequest, TextLayout, TextShaper};

/// Candidate font sizes, largest first.
pub const FONT_SIZES: [u32; 24] = [
    80, 72, // step 8
    66, 60, 54, 48, // step 6
    44, 40, 36, 32, 28, // step 4
    24, 22, 20, 18, 16, // step 2
    15, 14, 13, 12, 11, 10, 9, 8,
];

/// Maximum number of lines `text` may wrap into.
#[must_use]
pub fn max_lines(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Picks the largest font size at which a text fits a card.
pub struct TextFitter<'a> {
    shaper: &'a dyn TextShaper,
    border_width: u32,
}

impl<'a> TextFitter<'a> {
    pub fn new(shaper: &'a dyn TextShaper, border_width: u32) -> Self {
        Self {
            shaper,
            border_width,
        }
    }

    /// Usable edge length inside the border of a card of `card_size`.
    #[must_use]
    pub fn inner_size(&self, card_size: u32) -> u32 {
        card_size.saturating_sub(2 * self.border_width)
    }

    /// Fit `text` without consulting any cache.
    #[must_use]
    pub fn fit(&self, text: &str, card_size: u32, font_name: &str) -> TextLayout {
        let inner = self.inner_size(card_size);
        let allowed_lines = max_lines(text);
        let shape = |font_size: u32, align: Align| {
            self.shaper.shape(&ShapeRequest {
                text,
                font_name,
                font_size,
                wrap_width: inner,
                align,
            })
        };

        let mut chosen = None;
        for &font_size in &FONT_SIZES {
            let layout = shape(font_size, Align::Left);
            let fits = layout.line_count() <= allowed_lines && layout.fits_within(inner);
            chosen = Some(layout);
            if fits {
                break;
            }
        }

        // FONT_SIZES is non-empty, so the loop always ran.
        let layout = chosen.unwrap_or_else(|| TextLayout::empty(FONT_SIZES[FONT_SIZES.len() - 1]));
        tracing::debug!(
            size = layout.font_size(),
            lines = layout.line_count(),
            card = card_size,
            "fitted card text"
        );

        if layout.line_count() > 1 {
            shape(layout.font_size(), Align::Center)
        } else {
            layout
        }
    }

    /// Cache key of `text` on a card of `card_size` under this fitter's border.
    #[must_use]
    pub fn key(&self, text: &str, card_size: u32) -> LayoutKey {
        LayoutKey::new(card_size, self.border_width, text)
    }

    /// Fit `text`, memoized in `cache` under [`TextFitter::key`].
    ///
    /// The key does not identify the shaper; a cache must only ever be fed
    /// by one shaper.
    pub fn fit_cached(
        &self,
        cache: &mut LayoutCache,
        text: &str,
        card_size: u32,
        font_name: &str,
    ) -> Rc<TextLayout> {
        let key = self.key(text, card_size);
        if let Some(layout) = cache.get(&key) {
            return layout;
        }
        let layout = self.fit(text, card_size, font_name);
        cache.insert(key, layout)
    }
}
