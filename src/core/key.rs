//! Card identification.
//!
//! ## CardId vs CardKey
//!
//! - `CardId` is the game-assigned identifier passed at construction. Pairs
//!   of matching cards may share it, and `CardId::NO_SPEECH` (-1) marks a
//!   card that never speaks.
//! - `CardKey` is unique per constructed card within the process. Hosts use
//!   it to route deferred animation ticks back to the card that asked.
//!
//! ```
//! use memory_card::core::{CardId, CardKey};
//!
//! assert!(!CardId::NO_SPEECH.can_speak());
//! assert!(CardId::new(3).can_speak());
//! assert_ne!(CardKey::next(), CardKey::next());
//! ```

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Game-assigned card identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardId(pub i64);

impl CardId {
    /// Sentinel for cards that never trigger speech.
    pub const NO_SPEECH: CardId = CardId(-1);

    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn raw(self) -> i64 {
        self.0
    }

    /// False for the `NO_SPEECH` sentinel.
    #[must_use]
    pub const fn can_speak(self) -> bool {
        self.0 != Self::NO_SPEECH.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

static NEXT_KEY: AtomicU64 = AtomicU64::new(1);

/// Process-unique handle of a constructed card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardKey(pub u64);

impl CardKey {
    /// Allocate a fresh key.
    #[must_use]
    pub fn next() -> Self {
        Self(NEXT_KEY.fetch_add(1, Ordering::Relaxed))
    }

    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for CardKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Key({})", self.0)
    }
}
