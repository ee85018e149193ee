//! Card text: shaping, size fitting and layout caching.
//!
//! ## Key Types
//!
//! - `TextShaper`: layout service (`MonospaceShaper`, `FontdueShaper`)
//! - `TextLayout`: wrapped, measured, rasterized text
//! - `TextFitter`: largest-font-that-fits search
//! - `LayoutCache`: shared LRU of fitted layouts keyed by size, border and text

pub mod cache;
pub mod fitter;
pub mod font_book;
pub mod shaper;

pub use cache::{CacheStats, LayoutCache, LayoutKey, SharedLayoutCache, LAYOUT_CACHE_CAPACITY};
pub use fitter::{max_lines, TextFitter, FONT_SIZES};
pub use font_book::{FontBook, FontdueShaper};
pub use shaper::{wrap_words, Align, MonospaceShaper, PlacedGlyph, ShapeRequest, TextLayout, TextShaper};
