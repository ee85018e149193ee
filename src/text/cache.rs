//! Shared cache of fitted text layouts.
//!
//! Layouts are keyed by card size, border width and text, the inputs that
//! decide the box a text is fitted into. One instance lives per UI thread and
//! is reached through [`LayoutCache::shared`]; cards may also be given an
//! explicit instance, which they need when they use their own shaper.

use lru::LruCache;
use std::cell::RefCell;
use std::num::NonZeroUsize;
use std::rc::Rc;

use super::shaper::TextLayout;

/// Capacity of the shared layout cache.
pub const LAYOUT_CACHE_CAPACITY: usize = 50;

/// Key of the layout cache.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct LayoutKey {
    pub card_size: u32,
    pub border_width: u32,
    pub text: String,
}

impl LayoutKey {
    pub fn new(card_size: u32, border_width: u32, text: impl Into<String>) -> Self {
        Self {
            card_size,
            border_width,
            text: text.into(),
        }
    }
}

/// Hit/miss counters of a layout cache.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
}

/// Handle to a layout cache shared between cards.
pub type SharedLayoutCache = Rc<RefCell<LayoutCache>>;

thread_local! {
    static SHARED: SharedLayoutCache =
        Rc::new(RefCell::new(LayoutCache::new(LAYOUT_CACHE_CAPACITY)));
}

/// LRU of fitted text layouts.
pub struct LayoutCache {
    entries: LruCache<LayoutKey, Rc<TextLayout>>,
    stats: CacheStats,
}

impl std::fmt::Debug for LayoutCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayoutCache")
            .field("len", &self.entries.len())
            .field("capacity", &self.entries.cap())
            .field("stats", &self.stats)
            .finish()
    }
}

impl LayoutCache {
    /// Cache holding up to `capacity` layouts; zero is treated as one.
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: LruCache::new(capacity),
            stats: CacheStats::default(),
        }
    }

    /// The cache shared by every card on the current (UI) thread.
    ///
    /// Created on first use with `LAYOUT_CACHE_CAPACITY` entries.
    #[must_use]
    pub fn shared() -> SharedLayoutCache {
        SHARED.with(Rc::clone)
    }

    /// A fresh cache behind a shareable handle.
    #[must_use]
    pub fn new_shared(capacity: usize) -> SharedLayoutCache {
        Rc::new(RefCell::new(Self::new(capacity)))
    }

    /// Look up a layout, marking it most recently used.
    pub fn get(&mut self, key: &LayoutKey) -> Option<Rc<TextLayout>> {
        match self.entries.get(key) {
            Some(layout) => {
                self.stats.hits += 1;
                Some(Rc::clone(layout))
            }
            None => {
                self.stats.misses += 1;
                None
            }
        }
    }

    /// Store a layout, returning the shared handle to it.
    pub fn insert(&mut self, key: LayoutKey, layout: TextLayout) -> Rc<TextLayout> {
        let layout = Rc::new(layout);
        let replaced = self.entries.contains(&key);
        if let Some((evicted, _)) = self.entries.push(key, Rc::clone(&layout)) {
            if !replaced {
                self.stats.evictions += 1;
                tracing::debug!(size = evicted.card_size, text = %evicted.text, "evicted text layout");
            }
        }
        layout
    }

    /// Drop one layout.
    pub fn remove(&mut self, key: &LayoutKey) -> bool {
        self.entries.pop(key).is_some()
    }

    /// True if `key` is cached. Does not touch recency.
    #[must_use]
    pub fn contains(&self, key: &LayoutKey) -> bool {
        self.entries.contains(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.entries.cap().get()
    }

    #[must_use]
    pub fn stats(&self) -> CacheStats {
        self.stats
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
