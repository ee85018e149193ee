//! Collaborators a card talks to while it runs.
//!
//! A card never owns its host. Every operation that may repaint, schedule a
//! tick or speak takes `&mut dyn CardHost`, so the same card works under a
//! toolkit main loop, the crate's `Board`, or a test recorder.

use std::time::Duration;

use crate::anim::TickToken;
use crate::core::CardKey;

/// What the host shows in the card's slot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum HostTarget {
    /// The card's own drawing area.
    #[default]
    Drawing,
    /// An animated speaking face, while the card's text is read aloud.
    SpeakingFace,
}

/// Speech synthesis resource.
pub trait Speaker {
    /// Select a voice for a language tag such as `"en"` or `"es"`.
    fn set_voice(&mut self, lang: &str);

    /// Read `text` aloud.
    fn say(&mut self, text: &str);
}

/// Services a card needs from whatever hosts it.
pub trait CardHost {
    /// Ask for `card` to be repainted. Requests may be coalesced.
    fn queue_draw(&mut self, card: CardKey);

    /// Deliver `token` back to its card via `Card::on_tick` after `delay`.
    fn schedule_tick(&mut self, delay: Duration, token: TickToken);

    /// Borrow a speaker, if one is available right now.
    fn acquire_speaker(&mut self) -> Option<&mut dyn Speaker> {
        None
    }

    /// Show `target` in the card's slot.
    fn switch_target(&mut self, card: CardKey, target: HostTarget) {
        let _ = (card, target);
    }
}
