//! Canonical multiset of cards.
//!
//! A pool is a 52-slot count vector indexed by [`Card::index`]. With two
//! decks in play every count stays in 0..=2. The count vector is already the
//! canonical signature: two pools that are equal as multisets compare equal
//! regardless of insertion order, so a `Pool` can be used directly as a memo
//! key.

use crate::cards::Card;

pub const POOL_SLOTS: usize = 52;

/// Copies of one (rank, suit) the two-deck game allows.
pub const MAX_COPIES: u8 = 2;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Pool {
    counts: [u8; POOL_SLOTS],
}

impl Default for Pool {
    fn default() -> Pool {
        Pool {
            counts: [0; POOL_SLOTS],
        }
    }
}

impl Pool {
    pub fn new() -> Pool {
        Pool::default()
    }

    pub fn from_cards(cards: &[Card]) -> Pool {
        let mut pool = Pool::new();
        for &card in cards {
            pool.add(card);
        }
        pool
    }

    pub fn count(&self, card: Card) -> u8 {
        self.counts[card.index()]
    }

    pub fn total(&self) -> usize {
        self.counts.iter().map(|&c| c as usize).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|&c| c == 0)
    }

    pub fn add(&mut self, card: Card) {
        self.counts[card.index()] += 1;
    }

    /// Remove one copy. Returns whether a copy was present.
    pub fn remove(&mut self, card: Card) -> bool {
        let slot = &mut self.counts[card.index()];
        if *slot == 0 {
            return false;
        }
        *slot -= 1;
        true
    }

    /// Remove one copy if present, silently doing nothing otherwise.
    pub fn discard(&mut self, card: Card) {
        let slot = &mut self.counts[card.index()];
        *slot = slot.saturating_sub(1);
    }

    pub fn absorb(&mut self, other: &Pool) {
        for i in 0..POOL_SLOTS {
            self.counts[i] += other.counts[i];
        }
    }

    /// Does this pool hold at least every card of `other`, with multiplicity?
    pub fn contains(&self, other: &Pool) -> bool {
        (0..POOL_SLOTS).all(|i| self.counts[i] >= other.counts[i])
    }

    /// Remove every card of `other`. Returns false (leaving self clamped at
    /// zero per slot) if `other` was not fully contained.
    pub fn subtract(&mut self, other: &Pool) -> bool {
        let mut ok = true;
        for i in 0..POOL_SLOTS {
            if self.counts[i] < other.counts[i] {
                ok = false;
                self.counts[i] = 0;
            } else {
                self.counts[i] -= other.counts[i];
            }
        }
        ok
    }

    /// Smallest present card under the (suit, rank) total order.
    pub fn first(&self) -> Option<Card> {
        self.counts
            .iter()
            .position(|&c| c > 0)
            .map(Card::from_index)
    }

    /// Expand to a card list in canonical order, repeating per multiplicity.
    pub fn cards(&self) -> Vec<Card> {
        let mut out = Vec::with_capacity(self.total());
        for (i, &count) in self.counts.iter().enumerate() {
            for _ in 0..count {
                out.push(Card::from_index(i));
            }
        }
        out
    }

    /// First card exceeding the two-deck copy limit, if any.
    pub fn over_limit(&self) -> Option<Card> {
        self.counts
            .iter()
            .position(|&c| c > MAX_COPIES)
            .map(Card::from_index)
    }
}
