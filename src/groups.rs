//! Group validity: the pure predicate deciding whether a multiset of cards
//! forms a legal table group, and the canonical [`Group`] value the solver
//! builds partitions out of.

use std::fmt;

use itertools::Itertools;

use crate::cards::{Card, Rank};
use crate::pool::Pool;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GroupKind {
    /// 3-4 cards of one rank, all suits distinct.
    Set,
    /// >=3 cards of one suit with contiguous ranks, Ace low or Ace high.
    Run,
}

impl GroupKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            GroupKind::Set => "Set",
            GroupKind::Run => "Run",
        }
    }
}

/// A validated group in canonical card order: sets by suit, runs in sequence
/// order with an Ace-high Ace last.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Group {
    kind: GroupKind,
    cards: Vec<Card>,
}

impl Group {
    /// Canonicalize a card list into a group, or `None` if it is not one.
    pub fn new(mut cards: Vec<Card>) -> Option<Group> {
        let kind = classify(&cards)?;
        match kind {
            GroupKind::Set => cards.sort(),
            GroupKind::Run => {
                let ace_high = is_ace_high_run(&cards);
                cards.sort_by_key(|c| {
                    if ace_high {
                        c.rank.ace_high_value()
                    } else {
                        c.rank.value()
                    }
                });
            }
        }
        Some(Group { kind, cards })
    }

    pub fn kind(&self) -> GroupKind {
        self.kind
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn pool(&self) -> Pool {
        Pool::from_cards(&self.cards)
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.cards.iter().map(|c| c.pretty()).join(" "))
    }
}

/// Classify a card multiset as a set or run, or `None` if it is neither.
pub fn classify(cards: &[Card]) -> Option<GroupKind> {
    if cards.len() < 3 {
        return None;
    }
    let ranks_equal = cards.iter().all(|c| c.rank == cards[0].rank);
    if ranks_equal {
        let mut suits = cards.iter().map(|c| c.suit).collect::<Vec<_>>();
        suits.sort();
        suits.dedup();
        if suits.len() == cards.len() {
            return Some(GroupKind::Set);
        }
        return None;
    }
    let suits_equal = cards.iter().all(|c| c.suit == cards[0].suit);
    if suits_equal {
        let values = distinct_sorted_values(cards)?;
        if is_contiguous(&values) {
            return Some(GroupKind::Run);
        }
        // Ace-high: remap 1 -> 14 and retry. A window that still has a gap
        // after the remap is a wrap (K,A,2) and stays rejected.
        if values[0] == 1 && values[values.len() - 1] == 13 {
            let mut high: Vec<u8> = values
                .iter()
                .map(|&v| if v == 1 { 14 } else { v })
                .collect();
            high.sort_unstable();
            if is_contiguous(&high) {
                return Some(GroupKind::Run);
            }
        }
    }
    None
}

pub fn is_valid_group(cards: &[Card]) -> bool {
    classify(cards).is_some()
}

/// Sorted rank values, or `None` if any rank repeats.
fn distinct_sorted_values(cards: &[Card]) -> Option<Vec<u8>> {
    let mut values: Vec<u8> = cards.iter().map(|c| c.rank.value()).collect();
    values.sort_unstable();
    let len = values.len();
    values.dedup();
    if values.len() == len {
        Some(values)
    } else {
        None
    }
}

fn is_contiguous(sorted: &[u8]) -> bool {
    sorted.windows(2).all(|w| w[1] == w[0] + 1)
}

/// True for a validated run whose Ace sits above the King.
fn is_ace_high_run(cards: &[Card]) -> bool {
    let has_ace = cards.iter().any(|c| c.rank == Rank::Ace);
    let has_king = cards.iter().any(|c| c.rank == Rank::King);
    if !has_ace || !has_king {
        return false;
    }
    // If the low ordering is already contiguous this is the full A..K run.
    match distinct_sorted_values(cards) {
        Some(values) => !is_contiguous(&values),
        None => false,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
