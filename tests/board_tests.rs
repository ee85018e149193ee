//! Board integration tests: timing, teardown and speech routing.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use memory_card::{
    Board, Card, CardId, CardPhase, Face, FaceOverrides, HostTarget, LayoutCache, Speaker, Surface,
};

/// Speaker that writes into a log shared with the test.
struct SharedSpeaker(Rc<RefCell<Vec<String>>>);

impl Speaker for SharedSpeaker {
    fn set_voice(&mut self, lang: &str) {
        self.0.borrow_mut().push(format!("voice:{}", lang));
    }

    fn say(&mut self, text: &str) {
        self.0.borrow_mut().push(format!("say:{}", text));
    }
}

fn card(id: i64, front: &str) -> Card {
    Card::builder(CardId::new(id), 80)
        .overrides(FaceOverrides::new().with_text(Face::Front, front))
        .layout_cache(LayoutCache::new_shared(8))
        .build()
}

#[test]
fn test_pair_flip_and_reset() {
    let mut board = Board::new();
    let a = board.insert(card(0, "Cat"));
    let b = board.insert(card(1, "Cat"));

    board.with_card(a, |card, host| card.flip(true, host));
    board.advance(Duration::from_millis(200));
    board.with_card(b, |card, host| card.flip(true, host));
    board.advance(Duration::from_millis(300));

    assert!(board.get(a).unwrap().is_flipped());
    assert_eq!(board.get(b).unwrap().phase(), CardPhase::FlippingToFront);

    board.advance(Duration::from_millis(200));
    assert!(board.get(b).unwrap().is_flipped());

    for key in board.keys().collect::<Vec<_>>() {
        board.with_card(key, |card, host| card.reset(host));
    }
    board.advance(Duration::from_secs(1));
    assert!(board.keys().all(|k| !board.get(k).unwrap().is_flipped()));
}

#[test]
fn test_removed_card_ticks_are_dropped() {
    let mut board = Board::new();
    let key = board.insert(card(0, "Sun"));
    board.with_card(key, |card, host| card.flip(true, host));
    board.advance(Duration::from_millis(150));

    let card = board.remove(key).unwrap();
    assert_eq!(card.phase(), CardPhase::FlippingToFront);
    assert_eq!(board.pending_ticks(), 0);
    assert_eq!(board.advance(Duration::from_secs(1)), 0);
    assert!(board.is_empty());
    assert!(board.take_damage().is_empty());
}

#[test]
fn test_speech_through_board_speaker() {
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut board = Board::with_speaker(Box::new(SharedSpeaker(Rc::clone(&log))));
    let overrides = FaceOverrides::new()
        .with_text(Face::Front, "Hello World")
        .with_speak("en");
    let key = board.insert(Card::new(CardId::new(7), overrides, None, 120));

    board.with_card(key, |card, host| card.flip(true, host));
    assert_eq!(*log.borrow(), vec!["voice:en", "say:Hello World"]);
    assert_eq!(board.target(key), Some(HostTarget::SpeakingFace));

    board.advance(Duration::from_millis(500));
    assert!(board.get(key).unwrap().is_flipped());

    board.with_card(key, |card, host| card.flop(host));
    board.advance(Duration::from_millis(500));
    assert_eq!(board.target(key), Some(HostTarget::Drawing));
}

#[test]
fn test_paint_damaged_cards() {
    let mut board = Board::new();
    let a = board.insert(card(0, "A"));
    let b = board.insert(card(1, "B"));
    board.take_damage();

    board.with_card(b, |card, host| card.flip(false, host));
    let damaged = board.take_damage();
    assert_eq!(damaged, vec![b]);

    let mut target = Surface::new(80, 80);
    for key in damaged {
        assert!(board.paint(key, &mut target));
    }
    assert_eq!(target.pixel(40, 2), board.get(b).unwrap().props().front.stroke_color);

    board.remove(a);
    assert!(!board.paint(a, &mut target));
}
