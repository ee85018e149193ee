//! A set of cards sharing one host.
//!
//! `Board` owns cards keyed by `CardKey`, a `TimerQueue` for their animation
//! ticks, the pending redraw list and an optional speaker. It stands in for
//! a toolkit main loop: the embedder calls `advance` with elapsed time,
//! repaints whatever `take_damage` returns, and routes input to cards via
//! `with_card`.
//!
//! Ticks addressed to a card that has been removed are dropped.
//!
//! ```
//! use std::time::Duration;
//! use memory_card::{Board, Card, CardId, FaceOverrides};
//!
//! let mut board = Board::new();
//! let key = board.insert(Card::new(CardId::new(0), FaceOverrides::new(), None, 120));
//!
//! board.with_card(key, |card, host| card.flip(true, host));
//! board.advance(Duration::from_millis(500));
//!
//! assert!(board.get(key).unwrap().is_flipped());
//! ```

use std::time::Duration;

use rustc_hash::FxHashMap;

use crate::anim::{TickToken, TimerQueue};
use crate::cards::{Card, CardHost, HostTarget, Speaker};
use crate::core::CardKey;
use crate::render::Surface;

/// `CardHost` implementation backing a `Board`.
#[derive(Default)]
struct BoardHost {
    timers: TimerQueue,
    /// Cards waiting for a repaint, in request order, without repeats.
    damage: Vec<CardKey>,
    speaker: Option<Box<dyn Speaker>>,
    targets: FxHashMap<CardKey, HostTarget>,
}

impl CardHost for BoardHost {
    fn queue_draw(&mut self, card: CardKey) {
        if !self.damage.contains(&card) {
            self.damage.push(card);
        }
    }

    fn schedule_tick(&mut self, delay: Duration, token: TickToken) {
        self.timers.schedule(delay, token);
    }

    fn acquire_speaker(&mut self) -> Option<&mut dyn Speaker> {
        let speaker = self.speaker.as_mut()?;
        Some(speaker.as_mut() as &mut dyn Speaker)
    }

    fn switch_target(&mut self, card: CardKey, target: HostTarget) {
        self.targets.insert(card, target);
    }
}

/// Cards plus the host services that drive them.
#[derive(Default)]
pub struct Board {
    cards: FxHashMap<CardKey, Card>,
    /// Insertion order, for deterministic iteration.
    order: Vec<CardKey>,
    host: BoardHost,
}

impl Board {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Board whose cards may speak through `speaker`.
    #[must_use]
    pub fn with_speaker(speaker: Box<dyn Speaker>) -> Self {
        let mut board = Self::default();
        board.host.speaker = Some(speaker);
        board
    }

    /// Add a card and queue its first paint.
    pub fn insert(&mut self, card: Card) -> CardKey {
        let key = card.key();
        if self.cards.insert(key, card).is_none() {
            self.order.push(key);
        }
        self.host.targets.insert(key, HostTarget::Drawing);
        self.host.queue_draw(key);
        tracing::debug!(card = %key, "card added to board");
        key
    }

    /// Take a card off the board, cancelling its pending ticks.
    pub fn remove(&mut self, key: CardKey) -> Option<Card> {
        let card = self.cards.remove(&key)?;
        self.order.retain(|k| *k != key);
        self.host.timers.cancel_card(key);
        self.host.damage.retain(|k| *k != key);
        self.host.targets.remove(&key);
        tracing::debug!(card = %key, "card removed from board");
        Some(card)
    }

    #[must_use]
    pub fn get(&self, key: CardKey) -> Option<&Card> {
        self.cards.get(&key)
    }

    /// Direct access to a card for calls that need no host, such as
    /// `Card::face_surface`.
    pub fn get_mut(&mut self, key: CardKey) -> Option<&mut Card> {
        self.cards.get_mut(&key)
    }

    /// Run `f` on a card together with the board's host.
    pub fn with_card<R>(
        &mut self,
        key: CardKey,
        f: impl FnOnce(&mut Card, &mut dyn CardHost) -> R,
    ) -> Option<R> {
        let card = self.cards.get_mut(&key)?;
        Some(f(card, &mut self.host))
    }

    /// Move the clock forward by `elapsed`, delivering every tick that
    /// comes due on the way. Returns the number of ticks delivered.
    pub fn advance(&mut self, elapsed: Duration) -> usize {
        let until = self.host.timers.now() + elapsed;
        let mut delivered = 0;

        while let Some(token) = self.host.timers.pop_due(until) {
            match self.cards.get_mut(&token.card) {
                Some(card) => {
                    card.on_tick(token, &mut self.host);
                    delivered += 1;
                }
                None => tracing::trace!(card = %token.card, "dropped tick for removed card"),
            }
        }

        self.host.timers.set_now(until);
        delivered
    }

    /// Cards that asked for a repaint since the last call.
    pub fn take_damage(&mut self) -> Vec<CardKey> {
        std::mem::take(&mut self.host.damage)
    }

    /// Paint one card onto `target`. Returns false for unknown keys.
    pub fn paint(&mut self, key: CardKey, target: &mut Surface) -> bool {
        match self.cards.get_mut(&key) {
            Some(card) => {
                card.paint(target);
                true
            }
            None => false,
        }
    }

    /// What the host currently shows in a card's slot.
    #[must_use]
    pub fn target(&self, key: CardKey) -> Option<HostTarget> {
        self.host.targets.get(&key).copied()
    }

    /// Card keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = CardKey> + '_ {
        self.order.iter().copied()
    }

    #[must_use]
    pub fn now(&self) -> Duration {
        self.host.timers.now()
    }

    /// Time until the next animation tick, if any is pending.
    #[must_use]
    pub fn next_tick_in(&self) -> Option<Duration> {
        self.host.timers.next_due_in()
    }

    #[must_use]
    pub fn pending_ticks(&self) -> usize {
        self.host.timers.len()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CardId, FaceOverrides};
    use crate::text::LayoutCache;

    fn card(id: i64) -> Card {
        Card::builder(CardId::new(id), 60)
            .overrides(FaceOverrides::new())
            .layout_cache(LayoutCache::new_shared(4))
            .build()
    }

    #[test]
    fn test_insert_queues_paint() {
        let mut board = Board::new();
        let key = board.insert(card(0));
        assert_eq!(board.len(), 1);
        assert_eq!(board.take_damage(), vec![key]);
        assert!(board.take_damage().is_empty());
        assert_eq!(board.target(key), Some(HostTarget::Drawing));
    }

    #[test]
    fn test_damage_is_coalesced() {
        let mut board = Board::new();
        let key = board.insert(card(0));
        board.take_damage();
        board.with_card(key, |card, host| {
            card.set_highlight(true, false, host);
            card.set_highlight(false, false, host);
        });
        assert_eq!(board.take_damage(), vec![key]);
    }

    #[test]
    fn test_advance_runs_animation() {
        let mut board = Board::new();
        let key = board.insert(card(0));
        board.with_card(key, |card, host| card.flip(true, host));
        assert_eq!(board.pending_ticks(), 1);
        assert_eq!(board.next_tick_in(), Some(Duration::from_millis(100)));

        assert_eq!(board.advance(Duration::from_millis(250)), 2);
        assert!(!board.get(key).unwrap().is_flipped());
        assert_eq!(board.now(), Duration::from_millis(250));

        assert_eq!(board.advance(Duration::from_secs(1)), 3);
        assert!(board.get(key).unwrap().is_flipped());
        assert_eq!(board.pending_ticks(), 0);
    }

    #[test]
    fn test_remove_cancels_ticks() {
        let mut board = Board::new();
        let keep = board.insert(card(0));
        let gone = board.insert(card(1));
        board.with_card(keep, |card, host| card.flip(true, host));
        board.with_card(gone, |card, host| card.flip(true, host));

        let removed = board.remove(gone).unwrap();
        assert!(!removed.is_flipped());
        assert_eq!(board.pending_ticks(), 1);
        assert_eq!(board.keys().collect::<Vec<_>>(), vec![keep]);

        board.advance(Duration::from_secs(1));
        assert!(board.get(keep).unwrap().is_flipped());
        assert!(board.get(gone).is_none());
        assert!(board.with_card(gone, |_, _| ()).is_none());
    }
}
