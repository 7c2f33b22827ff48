//! Partition search: repartition a pool of cards into valid groups.
//!
//! The search is a recursive partition construction with a canonical card
//! order and per-solve memoization. At each node the pivot is the smallest
//! still-required card; every valid group containing the pivot is tried in a
//! fixed order (runs before sets, larger before smaller, lexicographically
//! smaller first under the card total order), so identical inputs always
//! yield identical witness partitions. Optional cards (unincorporated cross
//! anchors) may be left out of the partition; required cards may not.

use std::cmp::Reverse;
use std::collections::HashMap;
use std::time::Instant;

use itertools::Itertools;

use crate::cards::{Card, Suit, ALL_RANKS, ALL_SUITS};
use crate::error::{SolverError, SolverResult};
use crate::groups::{Group, GroupKind};
use crate::pool::Pool;

/// Search for a partition of `pool` into valid groups covering every card of
/// `required` (`required` must be a sub-multiset of `pool`; the remainder is
/// optional and may stay unplaced).
///
/// Returns `Ok(None)` when the search space is exhausted, `Err(Timeout)` when
/// the deadline elapses mid-search.
pub fn find_partition(
    pool: &Pool,
    required: &Pool,
    deadline: Option<Instant>,
) -> SolverResult<Option<Vec<Group>>> {
    if let Some(card) = pool.over_limit() {
        return Err(SolverError::TooManyCopies(card.code()));
    }
    debug_assert!(pool.contains(required), "required cards must be pooled");
    let mut search = Search {
        deadline,
        memo: HashMap::new(),
    };
    search.run(pool, required)
}

struct Search {
    deadline: Option<Instant>,
    /// Remaining-pool signature -> witness partition of its required cards,
    /// or None for exhausted subpools. The required portion is a function of
    /// the remaining counts, so the pool alone is a sound key.
    memo: HashMap<Pool, Option<Vec<Group>>>,
}

impl Search {
    fn run(&mut self, pool: &Pool, required: &Pool) -> SolverResult<Option<Vec<Group>>> {
        if let Some(deadline) = self.deadline {
            if Instant::now() >= deadline {
                return Err(SolverError::Timeout);
            }
        }
        let pivot = match required.first() {
            Some(card) => card,
            None => return Ok(Some(Vec::new())),
        };
        if let Some(cached) = self.memo.get(pool) {
            return Ok(cached.clone());
        }
        for group in candidate_groups(pool, pivot) {
            let mut next_pool = pool.clone();
            let mut next_required = required.clone();
            for &card in group.cards() {
                next_pool.remove(card);
                next_required.discard(card);
            }
            if let Some(mut rest) = self.run(&next_pool, &next_required)? {
                rest.insert(0, group);
                self.memo.insert(pool.clone(), Some(rest.clone()));
                return Ok(Some(rest));
            }
        }
        self.memo.insert(pool.clone(), None);
        Ok(None)
    }
}

/// Every valid group within `pool` that contains `pivot`, in trial order.
fn candidate_groups(pool: &Pool, pivot: Card) -> Vec<Group> {
    let mut candidates: Vec<Group> = Vec::new();
    candidates.extend(run_windows(pool, pivot).into_iter().filter_map(Group::new));
    candidates.extend(set_combinations(pool, pivot).into_iter().filter_map(Group::new));
    candidates.sort_by_cached_key(|group| {
        let mut ordered = group.cards().to_vec();
        ordered.sort();
        let kind = match group.kind() {
            GroupKind::Run => 0u8,
            GroupKind::Set => 1,
        };
        (kind, Reverse(group.len()), ordered)
    });
    // The full-suit run shows up both Ace-low and Ace-high; keep one.
    candidates.dedup();
    candidates
}

fn card_at(suit: Suit, value: u8) -> Card {
    Card::new(ALL_RANKS[value as usize - 1], suit)
}

/// All same-suit contiguous windows of length >=3 around the pivot.
///
/// Ordinary windows live in Ace-low value space 1..=13. Ace-high windows map
/// the Ace to 14 and must actually reach 14, otherwise they duplicate an
/// ordinary window. A window never holds both endpoints of a wrap.
fn run_windows(pool: &Pool, pivot: Card) -> Vec<Vec<Card>> {
    let suit = pivot.suit;
    let mut have = [false; 15];
    for value in 1..=13u8 {
        have[value as usize] = pool.count(card_at(suit, value)) > 0;
    }
    have[14] = have[1];

    let mut windows: Vec<Vec<Card>> = Vec::new();

    let pivot_value = pivot.rank.value() as usize;
    let mut lo_min = pivot_value;
    while lo_min > 1 && have[lo_min - 1] {
        lo_min -= 1;
    }
    let mut hi_max = pivot_value;
    while hi_max < 13 && have[hi_max + 1] {
        hi_max += 1;
    }
    for lo in lo_min..=pivot_value {
        for hi in pivot_value..=hi_max {
            if hi - lo >= 2 {
                windows.push((lo..=hi).map(|v| card_at(suit, v as u8)).collect());
            }
        }
    }

    if have[14] && have[13] {
        let pivot_high = pivot.rank.ace_high_value() as usize;
        let mut lo_min = pivot_high;
        while lo_min > 2 && have[lo_min - 1] {
            lo_min -= 1;
        }
        let mut hi_max = pivot_high;
        while hi_max < 14 && have[hi_max + 1] {
            hi_max += 1;
        }
        if hi_max == 14 {
            for lo in lo_min..=pivot_high.min(12) {
                windows.push(
                    (lo..=14)
                        .map(|v| card_at(suit, if v == 14 { 1 } else { v as u8 }))
                        .collect(),
                );
            }
        }
    }

    windows
}

/// All sets at the pivot's rank: the pivot plus every >=2-suit subset of the
/// other suits present. A set holds at most one copy per suit, so the second
/// deck never widens this enumeration.
fn set_combinations(pool: &Pool, pivot: Card) -> Vec<Vec<Card>> {
    let others: Vec<Card> = ALL_SUITS
        .iter()
        .copied()
        .filter(|&suit| suit != pivot.suit)
        .map(|suit| Card::new(pivot.rank, suit))
        .filter(|&card| pool.count(card) > 0)
        .collect();
    others
        .into_iter()
        .powerset()
        .filter(|subset| subset.len() >= 2)
        .map(|subset| {
            let mut group = vec![pivot];
            group.extend(subset);
            group
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
