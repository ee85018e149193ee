//! One-shot timer queue driven by an explicit clock.
//!
//! The queue never reads wall time. Its owner advances it, either from a
//! real frame/timer callback or from a test, and pops the ticks that came
//! due in order. Ticks due at the same instant fire in scheduling order.

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::time::Duration;

use super::flip::TickToken;
use crate::core::CardKey;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct Pending {
    due: Duration,
    seq: u64,
    token: TickToken,
}

/// Pending animation ticks ordered by due time.
#[derive(Clone, Debug, Default)]
pub struct TimerQueue {
    now: Duration,
    seq: u64,
    pending: BinaryHeap<Reverse<Pending>>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current time of the queue's clock.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Deliver `token` once `delay` has passed.
    pub fn schedule(&mut self, delay: Duration, token: TickToken) {
        self.seq += 1;
        self.pending.push(Reverse(Pending {
            due: self.now + delay,
            seq: self.seq,
            token,
        }));
    }

    /// Pop the earliest tick due at or before `until`, moving the clock to
    /// its due time.
    pub fn pop_due(&mut self, until: Duration) -> Option<TickToken> {
        let Reverse(next) = self.pending.peek()?;
        if next.due > until {
            return None;
        }
        let Reverse(next) = self.pending.pop()?;
        self.now = self.now.max(next.due);
        Some(next.token)
    }

    /// Move the clock forward to `time` without firing anything.
    pub fn set_now(&mut self, time: Duration) {
        self.now = self.now.max(time);
    }

    /// Time until the next tick is due.
    #[must_use]
    pub fn next_due_in(&self) -> Option<Duration> {
        self.pending
            .peek()
            .map(|Reverse(p)| p.due.saturating_sub(self.now))
    }

    /// Drop every pending tick addressed to `card`.
    pub fn cancel_card(&mut self, card: CardKey) {
        self.pending.retain(|Reverse(p)| p.token.card != card);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(card: u64, generation: u64) -> TickToken {
        TickToken {
            card: CardKey(card),
            generation,
        }
    }

    #[test]
    fn test_fires_in_due_order() {
        let mut timers = TimerQueue::new();
        timers.schedule(Duration::from_millis(200), token(1, 1));
        timers.schedule(Duration::from_millis(100), token(2, 1));

        let until = Duration::from_millis(250);
        assert_eq!(timers.pop_due(until), Some(token(2, 1)));
        assert_eq!(timers.now(), Duration::from_millis(100));
        assert_eq!(timers.pop_due(until), Some(token(1, 1)));
        assert_eq!(timers.pop_due(until), None);
    }

    #[test]
    fn test_not_due_yet() {
        let mut timers = TimerQueue::new();
        timers.schedule(Duration::from_millis(100), token(1, 1));
        assert_eq!(timers.pop_due(Duration::from_millis(99)), None);
        assert_eq!(timers.next_due_in(), Some(Duration::from_millis(100)));
        timers.set_now(Duration::from_millis(60));
        assert_eq!(timers.next_due_in(), Some(Duration::from_millis(40)));
    }

    #[test]
    fn test_same_instant_keeps_schedule_order() {
        let mut timers = TimerQueue::new();
        timers.schedule(Duration::from_millis(10), token(9, 1));
        timers.schedule(Duration::from_millis(10), token(3, 1));
        let until = Duration::from_millis(10);
        assert_eq!(timers.pop_due(until), Some(token(9, 1)));
        assert_eq!(timers.pop_due(until), Some(token(3, 1)));
    }

    #[test]
    fn test_schedule_relative_to_clock() {
        let mut timers = TimerQueue::new();
        timers.set_now(Duration::from_millis(500));
        timers.schedule(Duration::from_millis(100), token(1, 1));
        assert_eq!(timers.pop_due(Duration::from_millis(599)), None);
        assert!(timers.pop_due(Duration::from_millis(600)).is_some());
    }

    #[test]
    fn test_cancel_card() {
        let mut timers = TimerQueue::new();
        timers.schedule(Duration::from_millis(10), token(1, 1));
        timers.schedule(Duration::from_millis(10), token(2, 1));
        timers.cancel_card(CardKey(1));
        assert_eq!(timers.len(), 1);
        assert_eq!(timers.pop_due(Duration::from_secs(1)), Some(token(2, 1)));
        assert!(timers.is_empty());
    }
}
