//! Reconstruction steps are checked by replaying them over the initial
//! table, not by matching prose: the replayed end state must equal the
//! target partition with the hand empty.

use makiaveli::cards::{parse_cards, Card};
use makiaveli::groups::Group;
use makiaveli::pool::Pool;
use makiaveli::reconstruct::{reconstruct_steps, SourceRef, Step};

fn cards(s: &str) -> Vec<Card> {
    parse_cards(s).unwrap()
}

fn group(s: &str) -> Group {
    Group::new(cards(s)).expect("test group must be valid")
}

// ---------------------------------------------------------------------------
// Replay harness
// ---------------------------------------------------------------------------

struct Replay {
    groups: Vec<Pool>,
    anchors: Pool,
    hand: Pool,
    pot: Pool,
}

impl Replay {
    fn new(floor: &[Vec<Card>], cross: &[Card], hand: &[Card]) -> Replay {
        Replay {
            groups: floor.iter().map(|g| Pool::from_cards(g)).collect(),
            anchors: Pool::from_cards(cross),
            hand: Pool::from_cards(hand),
            pot: Pool::new(),
        }
    }

    fn move_in(&mut self, card: Card) {
        // Additions draw from the hand first, then from freed cards.
        if self.hand.remove(card) {
            return;
        }
        assert!(
            self.pot.remove(card),
            "step consumes a card that is not available: {}",
            card.code()
        );
    }

    fn apply(&mut self, step: &Step) {
        match step {
            Step::TakeFrom {
                source: SourceRef::Group(i),
                cards,
            } => {
                for &card in cards {
                    assert!(
                        self.groups[*i].remove(card),
                        "take from group #{} misses {}",
                        i + 1,
                        card.code()
                    );
                    self.pot.add(card);
                }
            }
            Step::TakeFrom {
                source: SourceRef::Anchor(card),
                ..
            } => {
                assert!(self.anchors.remove(*card), "anchor {} missing", card.code());
                self.pot.add(*card);
            }
            Step::AddTo {
                source: SourceRef::Group(i),
                cards,
            } => {
                for &card in cards {
                    self.move_in(card);
                    self.groups[*i].add(card);
                }
            }
            Step::AddTo {
                source: SourceRef::Anchor(anchor),
                cards,
            } => {
                assert!(self.anchors.remove(*anchor), "anchor {} missing", anchor.code());
                let mut built = Pool::from_cards(&[*anchor]);
                for &card in cards {
                    self.move_in(card);
                    built.add(card);
                }
                self.groups.push(built);
            }
            Step::NewGroup { cards } => {
                let mut built = Pool::new();
                for &card in cards {
                    self.move_in(card);
                    built.add(card);
                }
                self.groups.push(built);
            }
        }
    }

    /// Non-empty groups left on the table, as multiset pools.
    fn final_groups(&self) -> Vec<Pool> {
        self.groups.iter().filter(|g| !g.is_empty()).cloned().collect()
    }
}

fn assert_replay_reaches(
    floor: &[Vec<Card>],
    cross: &[Card],
    hand: &[Card],
    target: &[Group],
    steps: &[Step],
) {
    let mut replay = Replay::new(floor, cross, hand);
    for step in steps {
        replay.apply(step);
    }
    assert!(replay.hand.is_empty(), "hand must be empty after replay");
    assert!(replay.pot.is_empty(), "no freed card may be left floating");

    let mut got = replay.final_groups();
    let mut want: Vec<Pool> = target.iter().map(|g| g.pool()).collect();
    // Compare as multisets of groups.
    got.sort_by_key(|p| p.cards());
    want.sort_by_key(|p| p.cards());
    assert_eq!(got, want, "replayed table must equal the target partition");
}

// ---------------------------------------------------------------------------
// Classification cases
// ---------------------------------------------------------------------------

#[test]
fn unchanged_table_needs_no_steps() {
    let floor = vec![cards("7H 7D 7C")];
    let target = vec![group("7H 7D 7C")];
    let steps = reconstruct_steps(&floor, &[], &[], &target).unwrap();
    assert!(steps.is_empty());
}

#[test]
fn extension_from_hand_is_a_single_add() {
    let floor = vec![cards("5S 6S 7S")];
    let hand = cards("3S 4S");
    let target = vec![group("3S 4S 5S 6S 7S")];
    let steps = reconstruct_steps(&floor, &[], &hand, &target).unwrap();
    assert_eq!(steps.len(), 1);
    match &steps[0] {
        Step::AddTo {
            source: SourceRef::Group(0),
            cards: added,
        } => assert_eq!(added, &cards("3S 4S")),
        other => panic!("expected an add step, got {:?}", other),
    }
    assert_replay_reaches(&floor, &[], &hand, &target, &steps);
}

#[test]
fn synthesized_groups_split_their_donors() {
    let floor = vec![cards("7S 8S 9S")];
    let hand = cards("10S JS 7H 7D 7C");
    let target = vec![group("7S 7H 7D 7C"), group("8S 9S 10S JS")];
    let steps = reconstruct_steps(&floor, &[], &hand, &target).unwrap();
    assert_replay_reaches(&floor, &[], &hand, &target, &steps);

    let takes = steps
        .iter()
        .filter(|s| matches!(s, Step::TakeFrom { .. }))
        .count();
    let news = steps
        .iter()
        .filter(|s| matches!(s, Step::NewGroup { .. }))
        .count();
    assert_eq!(takes, 2, "both pieces of the broken run need a take step");
    assert_eq!(news, 2);
}

#[test]
fn building_onto_a_standing_anchor() {
    let cross = cards("2S");
    let hand = cards("3S 4S");
    let target = vec![group("2S 3S 4S")];
    let steps = reconstruct_steps(&[], &cross, &hand, &target).unwrap();
    assert_eq!(steps.len(), 1);
    match &steps[0] {
        Step::AddTo {
            source: SourceRef::Anchor(anchor),
            cards: added,
        } => {
            assert_eq!(anchor.code(), "2S");
            assert_eq!(added, &cards("3S 4S"));
        }
        other => panic!("expected an anchor build step, got {:?}", other),
    }
    assert_replay_reaches(&[], &cross, &hand, &target, &steps);
}

#[test]
fn mixed_extension_and_anchor_build() {
    let floor = vec![cards("7S 8S 9S"), cards("10S JS QS")];
    let cross = cards("7C");
    let hand = cards("7H 7D");
    let target = vec![group("8S 9S 10S JS QS"), group("7S 7H 7D 7C")];
    let steps = reconstruct_steps(&floor, &cross, &hand, &target).unwrap();
    assert_replay_reaches(&floor, &cross, &hand, &target, &steps);
}

#[test]
fn untouched_anchor_survives_replay() {
    let cross = cards("9D");
    let hand = cards("3S 4S 5S");
    let target = vec![group("3S 4S 5S")];
    let steps = reconstruct_steps(&[], &cross, &hand, &target).unwrap();
    let mut replay = Replay::new(&[], &cross, &hand);
    for step in &steps {
        replay.apply(step);
    }
    assert_eq!(replay.anchors.cards(), cards("9D"));
}

#[test]
fn step_text_is_stable() {
    let floor = vec![cards("5S 6S 7S")];
    let hand = cards("3S 4S");
    let target = vec![group("3S 4S 5S 6S 7S")];
    let steps = reconstruct_steps(&floor, &[], &hand, &target).unwrap();
    assert_eq!(
        steps[0].description(),
        "Add 3\u{2660} 4\u{2660} to group #1"
    );
}

// ---------------------------------------------------------------------------
// Contract violations
// ---------------------------------------------------------------------------

#[test]
fn leftover_hand_card_is_a_reconstruction_failure() {
    let floor = vec![cards("7H 7D 7C")];
    let hand = cards("2S");
    let target = vec![group("7H 7D 7C")];
    let err = reconstruct_steps(&floor, &[], &hand, &target).unwrap_err();
    assert_eq!(err.kind(), "ReconstructionFailure");
}

#[test]
fn leftover_floor_card_is_a_reconstruction_failure() {
    let floor = vec![cards("7H 7D 7C"), cards("3S 4S 5S")];
    let target = vec![group("7H 7D 7C")];
    let err = reconstruct_steps(&floor, &[], &[], &target).unwrap_err();
    assert_eq!(err.kind(), "ReconstructionFailure");
}
