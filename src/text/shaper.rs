//! Text shaping collaborator and the layouts it produces.
//!
//! A `TextShaper` turns a string into a word-wrapped `TextLayout` at a given
//! font size: positioned glyph coverage masks plus measured pixel size. The
//! fitter only needs line counts and pixel size; the renderer paints the
//! glyph masks.

use smallvec::SmallVec;

/// Horizontal alignment of wrapped lines.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Align {
    Left,
    Center,
}

/// One glyph's coverage mask placed relative to the layout origin.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlacedGlyph {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
    /// Row-major alpha coverage, `width * height` bytes.
    pub coverage: Vec<u8>,
}

impl PlacedGlyph {
    /// A fully covered rectangle.
    #[must_use]
    pub fn solid(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
            coverage: vec![0xff; (width * height) as usize],
        }
    }
}

/// A shaped, wrapped and measured block of text.
///
/// Layouts are immutable once built; the cache hands out shared references.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextLayout {
    font_size: u32,
    align: Align,
    line_count: usize,
    width: u32,
    height: u32,
    glyphs: Vec<PlacedGlyph>,
}

impl TextLayout {
    /// Build a layout. Glyph positions are normalized so that the leftmost
    /// glyph starts at x = 0.
    #[must_use]
    pub fn new(
        font_size: u32,
        align: Align,
        line_count: usize,
        width: u32,
        height: u32,
        mut glyphs: Vec<PlacedGlyph>,
    ) -> Self {
        if let Some(min_x) = glyphs.iter().map(|g| g.x).min() {
            if min_x != 0 {
                for glyph in &mut glyphs {
                    glyph.x -= min_x;
                }
            }
        }
        Self {
            font_size,
            align,
            line_count,
            width,
            height,
            glyphs,
        }
    }

    /// Layout of nothing.
    #[must_use]
    pub fn empty(font_size: u32) -> Self {
        Self::new(font_size, Align::Left, 0, 0, 0, Vec::new())
    }

    #[must_use]
    pub fn font_size(&self) -> u32 {
        self.font_size
    }

    #[must_use]
    pub fn align(&self) -> Align {
        self.align
    }

    #[must_use]
    pub fn line_count(&self) -> usize {
        self.line_count
    }

    /// Measured `(width, height)` in pixels.
    #[must_use]
    pub fn pixel_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    #[must_use]
    pub fn glyphs(&self) -> &[PlacedGlyph] {
        &self.glyphs
    }

    /// True if the layout fits in a `max` x `max` box.
    #[must_use]
    pub fn fits_within(&self, max: u32) -> bool {
        self.width <= max && self.height <= max
    }
}

/// Parameters of a single shaping call.
#[derive(Clone, Copy, Debug)]
pub struct ShapeRequest<'a> {
    pub text: &'a str,
    pub font_name: &'a str,
    pub font_size: u32,
    /// Width lines are wrapped at (on word boundaries).
    pub wrap_width: u32,
    pub align: Align,
}

/// Text layout service.
///
/// Implementations wrap on word boundaries at `wrap_width`; a single word
/// wider than `wrap_width` is left on its own line and overflows, which the
/// fitter then rejects on pixel width.
pub trait TextShaper {
    fn shape(&self, request: &ShapeRequest<'_>) -> TextLayout;
}

/// Deterministic shaper with fixed-advance box glyphs.
///
/// Needs no font files, which makes it the default for headless use and
/// tests. Every character advances `0.6 * size` (rounded up) and lines are
/// `1.2 * size` tall.
#[derive(Clone, Copy, Debug, Default)]
pub struct MonospaceShaper;

impl MonospaceShaper {
    /// Horizontal advance of one character.
    #[must_use]
    pub fn advance(font_size: u32) -> u32 {
        ((font_size * 3 + 4) / 5).max(1)
    }

    /// Height of one line.
    #[must_use]
    pub fn line_height(font_size: u32) -> u32 {
        (font_size * 6 + 4) / 5
    }
}

impl TextShaper for MonospaceShaper {
    fn shape(&self, request: &ShapeRequest<'_>) -> TextLayout {
        let advance = Self::advance(request.font_size);
        let line_height = Self::line_height(request.font_size);
        let measure = |line: &str| line.chars().count() as u32 * advance;

        let lines = wrap_words(request.text, request.wrap_width, measure);
        let width = lines.iter().map(|l| measure(l)).max().unwrap_or(0);
        let height = lines.len() as u32 * line_height;

        let glyph_top = (line_height - request.font_size) / 2;
        let mut glyphs = Vec::new();
        for (row, line) in lines.iter().enumerate() {
            let offset = match request.align {
                Align::Left => 0,
                Align::Center => (width - measure(line)) / 2,
            };
            for (col, ch) in line.chars().enumerate() {
                if ch.is_whitespace() {
                    continue;
                }
                glyphs.push(PlacedGlyph::solid(
                    (offset + col as u32 * advance) as i32,
                    (row as u32 * line_height + glyph_top) as i32,
                    advance,
                    request.font_size,
                ));
            }
        }

        TextLayout::new(
            request.font_size,
            request.align,
            lines.len(),
            width,
            height,
            glyphs,
        )
    }
}

/// Greedy word wrap.
///
/// Words are separated by any whitespace and rejoined with single spaces.
/// A word is moved to a new line when appending it would exceed `max_width`;
/// a word wider than `max_width` on an empty line stays there.
pub fn wrap_words<F>(text: &str, max_width: u32, measure: F) -> SmallVec<[String; 4]>
where
    F: Fn(&str) -> u32,
{
    let mut lines: SmallVec<[String; 4]> = SmallVec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
            continue;
        }

        let candidate_len = current.len() + 1 + word.len();
        let mut candidate = String::with_capacity(candidate_len);
        candidate.push_str(&current);
        candidate.push(' ');
        candidate.push_str(word);

        if measure(&candidate) <= max_width {
            current = candidate;
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(text: &str, size: u32, wrap: u32) -> ShapeRequest<'_> {
        ShapeRequest {
            text,
            font_name: "Sans",
            font_size: size,
            wrap_width: wrap,
            align: Align::Left,
        }
    }

    #[test]
    fn test_wrap_words_greedy() {
        let lines = wrap_words("aa bb cc", 5, |s| s.len() as u32);
        assert_eq!(lines.as_slice(), ["aa bb", "cc"]);
    }

    #[test]
    fn test_wrap_words_overlong_word() {
        let lines = wrap_words("abcdefgh ij", 4, |s| s.len() as u32);
        assert_eq!(lines.as_slice(), ["abcdefgh", "ij"]);
    }

    #[test]
    fn test_wrap_words_collapses_whitespace() {
        let lines = wrap_words("  a \t b  ", 100, |s| s.len() as u32);
        assert_eq!(lines.as_slice(), ["a b"]);
        assert!(wrap_words("   ", 100, |s| s.len() as u32).is_empty());
    }

    #[test]
    fn test_monospace_metrics() {
        assert_eq!(MonospaceShaper::advance(10), 6);
        assert_eq!(MonospaceShaper::line_height(10), 12);
        assert_eq!(MonospaceShaper::advance(1), 1);
    }

    #[test]
    fn test_monospace_single_line() {
        let layout = MonospaceShaper.shape(&request("Hello", 10, 100));
        assert_eq!(layout.line_count(), 1);
        assert_eq!(layout.pixel_size(), (30, 12));
        assert_eq!(layout.glyphs().len(), 5);
        assert_eq!(layout.font_size(), 10);
    }

    #[test]
    fn test_monospace_wraps() {
        let layout = MonospaceShaper.shape(&request("Hello World", 10, 40));
        assert_eq!(layout.line_count(), 2);
        assert_eq!(layout.pixel_size(), (30, 24));
        // Spaces produce no glyphs
        assert_eq!(layout.glyphs().len(), 10);
    }

    #[test]
    fn test_monospace_center_offsets_short_lines() {
        let mut req = request("Hello my World", 10, 40);
        req.align = Align::Center;
        let layout = MonospaceShaper.shape(&req);
        // "Hello" / "my" / "World": "my" is centered under a 30px line
        assert_eq!(layout.line_count(), 3);
        let second_line: Vec<_> = layout.glyphs().iter().filter(|g| g.y == 13).collect();
        assert_eq!(second_line[0].x, 9);
    }

    #[test]
    fn test_layout_normalizes_origin() {
        let glyphs = vec![PlacedGlyph::solid(5, 0, 2, 2), PlacedGlyph::solid(9, 0, 2, 2)];
        let layout = TextLayout::new(10, Align::Center, 1, 6, 2, glyphs);
        assert_eq!(layout.glyphs()[0].x, 0);
        assert_eq!(layout.glyphs()[1].x, 4);
        assert!(layout.fits_within(6));
        assert!(!layout.fits_within(5));
    }
}
