//! Shared test hosts.

#![allow(dead_code)]

use std::time::Duration;

use memory_card::{Card, CardHost, CardKey, HostTarget, Speaker, TickToken};

/// Everything a card asked of its host, in order.
#[derive(Clone, Debug, PartialEq)]
pub enum HostEvent {
    Draw(CardKey),
    Tick(Duration, TickToken),
    Voice(String),
    Say(String),
    Target(CardKey, HostTarget),
}

#[derive(Default)]
pub struct RecordingSpeaker {
    pub log: Vec<HostEvent>,
}

impl Speaker for RecordingSpeaker {
    fn set_voice(&mut self, lang: &str) {
        self.log.push(HostEvent::Voice(lang.to_string()));
    }

    fn say(&mut self, text: &str) {
        self.log.push(HostEvent::Say(text.to_string()));
    }
}

/// Host that records calls and hands ticks back on demand.
///
/// Speaker calls are written into the same event log so tests can check
/// ordering against redraws.
#[derive(Default)]
pub struct RecordingHost {
    pub events: Vec<HostEvent>,
    pub has_speaker: bool,
    speaker: RecordingSpeaker,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_speaker() -> Self {
        Self {
            has_speaker: true,
            ..Self::default()
        }
    }

    pub fn draws(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, HostEvent::Draw(_)))
            .count()
    }

    pub fn pending_ticks(&self) -> Vec<TickToken> {
        self.events
            .iter()
            .filter_map(|e| match e {
                HostEvent::Tick(_, token) => Some(*token),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Deliver the most recently scheduled tick. Returns false if none.
    pub fn tick(&mut self, card: &mut Card) -> bool {
        let Some(token) = self.pending_ticks().last().copied() else {
            return false;
        };
        self.events.retain(|e| !matches!(e, HostEvent::Tick(..)));
        card.on_tick(token, self);
        true
    }

    /// Deliver ticks until the card stops scheduling them.
    pub fn run(&mut self, card: &mut Card) -> usize {
        let mut count = 0;
        while self.tick(card) {
            count += 1;
        }
        count
    }
}

impl CardHost for RecordingHost {
    fn queue_draw(&mut self, card: CardKey) {
        self.record(HostEvent::Draw(card));
    }

    fn schedule_tick(&mut self, delay: Duration, token: TickToken) {
        self.record(HostEvent::Tick(delay, token));
    }

    fn acquire_speaker(&mut self) -> Option<&mut dyn Speaker> {
        if !self.has_speaker {
            return None;
        }
        Some(&mut self.speaker)
    }

    fn switch_target(&mut self, card: CardKey, target: HostTarget) {
        self.record(HostEvent::Target(card, target));
    }
}

impl RecordingHost {
    /// Append `event` after anything the speaker said since the last call.
    fn record(&mut self, event: HostEvent) {
        let spoken = std::mem::take(&mut self.speaker.log);
        self.events.extend(spoken);
        self.events.push(event);
    }
}
