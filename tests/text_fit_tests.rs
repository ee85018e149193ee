//! Text fitting and layout cache integration tests.

use memory_card::text::{max_lines, Align, ShapeRequest, LAYOUT_CACHE_CAPACITY, FONT_SIZES};
use memory_card::{
    Card, CardId, CardStyle, Face, FaceOverrides, LayoutCache, MonospaceShaper, TextFitter,
    TextLayout, TextShaper,
};
use proptest::prelude::*;
use std::cell::Cell;
use std::rc::Rc;

fn fitter(shaper: &MonospaceShaper) -> TextFitter<'_> {
    TextFitter::new(shaper, CardStyle::default().border_width())
}

#[test]
fn test_single_word_stays_left_aligned() {
    let shaper = MonospaceShaper;
    let layout = fitter(&shaper).fit("Match", 120, "Sans");
    assert_eq!(layout.line_count(), 1);
    assert_eq!(layout.align(), Align::Left);
    assert!(layout.fits_within(120 - 2 * 7));
}

#[test]
fn test_two_words_wrap_centered() {
    let shaper = MonospaceShaper;
    let layout = fitter(&shaper).fit("Hello World", 120, "Sans");
    assert_eq!(layout.line_count(), 2);
    assert_eq!(layout.align(), Align::Center);
}

#[test]
fn test_unfittable_text_uses_smallest_size() {
    let shaper = MonospaceShaper;
    let layout = fitter(&shaper).fit("Supercalifragilisticexpialidocious", 40, "Sans");
    assert_eq!(layout.font_size(), FONT_SIZES[FONT_SIZES.len() - 1]);
}

#[test]
fn test_max_lines_counts_words() {
    assert_eq!(max_lines("one"), 1);
    assert_eq!(max_lines("  one   two\tthree "), 3);
    assert_eq!(max_lines(""), 0);
}

#[test]
fn test_cache_evicts_least_recently_used() {
    let shaper = MonospaceShaper;
    let fitter = fitter(&shaper);
    let mut cache = LayoutCache::new(LAYOUT_CACHE_CAPACITY);

    for i in 0..LAYOUT_CACHE_CAPACITY {
        fitter.fit_cached(&mut cache, &format!("word{}", i), 120, "Sans");
    }
    assert_eq!(cache.len(), 50);

    // Touch the oldest entry so the second oldest becomes the victim
    fitter.fit_cached(&mut cache, "word0", 120, "Sans");
    fitter.fit_cached(&mut cache, "word50", 120, "Sans");

    assert_eq!(cache.len(), 50);
    assert!(cache.contains(&fitter.key("word0", 120)));
    assert!(!cache.contains(&fitter.key("word1", 120)));
    assert!(cache.contains(&fitter.key("word50", 120)));

    let stats = cache.stats();
    assert_eq!(stats.hits, 1);
    assert_eq!(stats.misses, 51);
    assert_eq!(stats.evictions, 1);
}

#[test]
fn test_cache_keyed_by_size_and_text() {
    let shaper = MonospaceShaper;
    let fitter = fitter(&shaper);
    let mut cache = LayoutCache::new(4);

    let small = fitter.fit_cached(&mut cache, "Dog", 60, "Sans");
    let large = fitter.fit_cached(&mut cache, "Dog", 200, "Sans");
    assert_eq!(cache.len(), 2);
    assert!(small.font_size() <= large.font_size());

    let again = fitter.fit_cached(&mut cache, "Dog", 60, "Sans");
    assert!(std::rc::Rc::ptr_eq(&small, &again));
}

/// Counts shaping calls while delegating to the monospace shaper.
#[derive(Default)]
struct CountingShaper {
    calls: Cell<usize>,
}

impl TextShaper for CountingShaper {
    fn shape(&self, request: &ShapeRequest<'_>) -> TextLayout {
        self.calls.set(self.calls.get() + 1);
        MonospaceShaper.shape(request)
    }
}

fn back_text_card(style: CardStyle) -> Card {
    Card::builder(CardId::new(1), 120)
        .overrides(FaceOverrides::new().with_text(Face::Back, "Hello World"))
        .style(Rc::new(style))
        .build()
}

/// Cards on the shared cache with different borders get their own layouts.
#[test]
fn test_shared_cache_respects_border_width() {
    let mut thin = back_text_card(CardStyle::default());
    let mut thick = back_text_card(CardStyle::default().with_ui_scale(1.5));

    // 120 - 2 * 7 = 106px inner box
    let a = thin.text_layout(Face::Back);
    assert_eq!(a.font_size(), 32);
    assert_eq!(a.pixel_size(), (100, 78));

    // 120 - 2 * 15 = 90px inner box
    let b = thick.text_layout(Face::Back);
    assert_eq!(b.font_size(), 28);
    assert_eq!(b.pixel_size(), (85, 68));
    assert!(b.fits_within(90));

    let shared = LayoutCache::shared();
    assert_eq!(shared.borrow().len(), 2);
}

/// A card with its own shaper does not pick up another shaper's layouts.
#[test]
fn test_custom_shaper_gets_private_cache() {
    let mut plain = back_text_card(CardStyle::default());
    let cached = plain.text_layout(Face::Back);

    let shaper = Rc::new(CountingShaper::default());
    let mut custom = Card::builder(CardId::new(2), 120)
        .overrides(FaceOverrides::new().with_text(Face::Back, "Hello World"))
        .shaper(shaper.clone())
        .build();
    let own = custom.text_layout(Face::Back);

    assert!(shaper.calls.get() > 0);
    assert!(!Rc::ptr_eq(&cached, &own));
    assert_eq!(LayoutCache::shared().borrow().len(), 1);
}

fn words() -> impl Strategy<Value = String> {
    prop::collection::vec("[a-zA-Z]{1,10}", 1..5).prop_map(|w| w.join(" "))
}

proptest! {
    #[test]
    fn prop_font_size_grows_with_card(text in words(), small in 40u32..300, extra in 0u32..200) {
        let shaper = MonospaceShaper;
        let fitter = fitter(&shaper);
        let a = fitter.fit(&text, small, "Sans");
        let b = fitter.fit(&text, small + extra, "Sans");
        prop_assert!(a.font_size() <= b.font_size());
    }

    #[test]
    fn prop_more_words_never_grow_font(text in words(), tail in words(), size in 40u32..300) {
        let shaper = MonospaceShaper;
        let fitter = fitter(&shaper);
        let longer = format!("{} {}", text, tail);
        let short = fitter.fit(&text, size, "Sans");
        let long = fitter.fit(&longer, size, "Sans");
        prop_assert!(long.font_size() <= short.font_size());
    }

    #[test]
    fn prop_fitted_layout_respects_limits(text in words(), size in 40u32..300) {
        let shaper = MonospaceShaper;
        let fitter = fitter(&shaper);
        let layout = fitter.fit(&text, size, "Sans");
        prop_assert!(FONT_SIZES.contains(&layout.font_size()));
        if layout.font_size() > FONT_SIZES[FONT_SIZES.len() - 1] {
            prop_assert!(layout.line_count() <= max_lines(&text));
            prop_assert!(layout.fits_within(fitter.inner_size(size)));
        }
    }
}
