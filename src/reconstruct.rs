//! Step reconstruction: explain how to get from the current table to the
//! target partition.
//!
//! Sources are the floor groups plus each standing cross anchor as a
//! singleton. Every target group is matched against them in preservation
//! order: identical multiset first, then any source the target fully
//! contains, then synthesized from scratch. Unmatched sources are broken up;
//! their cards, together with the hand, supply whatever the changed targets
//! need. Steps come out splits first, then additions, then new groups, and
//! replaying them over the initial table yields exactly the target
//! partition with the hand empty.

use std::fmt;

use itertools::Itertools;

use crate::cards::Card;
use crate::error::{SolverError, SolverResult};
use crate::groups::Group;
use crate::pool::Pool;

/// Where a step takes cards from or adds cards to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceRef {
    /// Zero-based floor group index (displayed one-based).
    Group(usize),
    /// A standing cross anchor.
    Anchor(Card),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Take cards out of an existing group, breaking it apart.
    TakeFrom { source: SourceRef, cards: Vec<Card> },
    /// Put cards onto a surviving group or a standing anchor.
    AddTo { source: SourceRef, cards: Vec<Card> },
    /// Lay down a brand-new group.
    NewGroup { cards: Vec<Card> },
}

impl Step {
    pub fn description(&self) -> String {
        match self {
            Step::TakeFrom {
                source: SourceRef::Group(i),
                cards,
            } => format!("Take {} from group #{}", pretty_list(cards), i + 1),
            Step::TakeFrom {
                source: SourceRef::Anchor(card),
                ..
            } => format!("Pick up the {} anchor", card.pretty()),
            Step::AddTo {
                source: SourceRef::Group(i),
                cards,
            } => format!("Add {} to group #{}", pretty_list(cards), i + 1),
            Step::AddTo {
                source: SourceRef::Anchor(card),
                cards,
            } => format!("Build {} onto the {} anchor", pretty_list(cards), card.pretty()),
            Step::NewGroup { cards } => format!("New group: {}", pretty_list(cards)),
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

fn pretty_list(cards: &[Card]) -> String {
    cards.iter().map(|c| c.pretty()).join(" ")
}

#[derive(Debug, Clone)]
enum TargetClass {
    Unchanged,
    Extended { source: usize, added: Pool },
    Synthesized,
}

/// Per-target attribution of where its new cards come from.
struct TargetMoves {
    class: TargetClass,
    /// (source index, cards taken from it), floor groups before anchors.
    contributions: Vec<(usize, Vec<Card>)>,
}

/// Produce the step sequence turning (`floor_groups`, standing `cross`
/// anchors, `hand`) into `target`. The caller guarantees the multiset
/// identity `union(target) ⊆ floor ∪ hand ∪ cross` with every floor and
/// hand card covered; a violation surfaces as `ReconstructionFailure`.
pub fn reconstruct_steps(
    floor_groups: &[Vec<Card>],
    cross: &[Card],
    hand: &[Card],
    target: &[Group],
) -> SolverResult<Vec<Step>> {
    let mut sources: Vec<(SourceRef, Pool)> = floor_groups
        .iter()
        .enumerate()
        .map(|(i, group)| (SourceRef::Group(i), Pool::from_cards(group)))
        .collect();
    let anchors_start = sources.len();
    for &card in cross {
        sources.push((SourceRef::Anchor(card), Pool::from_cards(&[card])));
    }

    let target_pools: Vec<Pool> = target.iter().map(|g| g.pool()).collect();
    let mut matched = vec![false; sources.len()];
    let mut classes: Vec<Option<TargetClass>> = vec![None; target.len()];

    // Pass 1: targets identical to a source survive untouched.
    for (t, target_pool) in target_pools.iter().enumerate() {
        let hit = (0..sources.len()).find(|&s| !matched[s] && sources[s].1 == *target_pool);
        if let Some(s) = hit {
            matched[s] = true;
            classes[t] = Some(TargetClass::Unchanged);
        }
    }

    // Pass 2: targets that fully contain a source extend it in place. Prefer
    // the largest such source; ties go to the lowest index.
    for (t, target_pool) in target_pools.iter().enumerate() {
        if classes[t].is_some() {
            continue;
        }
        let best = (0..sources.len())
            .filter(|&s| !matched[s] && target_pool.contains(&sources[s].1))
            .max_by_key(|&s| (sources[s].1.total(), std::cmp::Reverse(s)));
        if let Some(s) = best {
            matched[s] = true;
            let mut added = target_pool.clone();
            added.subtract(&sources[s].1);
            classes[t] = Some(TargetClass::Extended { source: s, added });
        }
    }

    // Everything else is synthesized from the hand and broken sources.
    for class in classes.iter_mut() {
        if class.is_none() {
            *class = Some(TargetClass::Synthesized);
        }
    }

    // Attribute the needed cards: hand first, then broken floor groups in
    // index order, then standing anchors.
    let mut hand_pool = Pool::from_cards(hand);
    let mut remaining: Vec<Pool> = sources.iter().map(|(_, pool)| pool.clone()).collect();
    let mut moves: Vec<TargetMoves> = Vec::with_capacity(target.len());
    for (t, target_pool) in target_pools.iter().enumerate() {
        let class = classes[t].clone().ok_or_else(|| {
            SolverError::Reconstruction("unclassified target group".to_string())
        })?;
        let needed = match &class {
            TargetClass::Unchanged => Pool::new(),
            TargetClass::Extended { added, .. } => added.clone(),
            TargetClass::Synthesized => target_pool.clone(),
        };
        let mut contributions: Vec<(usize, Vec<Card>)> = Vec::new();
        for card in needed.cards() {
            if hand_pool.remove(card) {
                continue;
            }
            let donor = (0..sources.len())
                .find(|&s| !matched[s] && remaining[s].count(card) > 0)
                .ok_or_else(|| {
                    SolverError::Reconstruction(format!(
                        "no source left for {}",
                        card.code()
                    ))
                })?;
            remaining[donor].remove(card);
            match contributions.iter_mut().find(|(s, _)| *s == donor) {
                Some((_, cards)) => cards.push(card),
                None => contributions.push((donor, vec![card])),
            }
        }
        moves.push(TargetMoves {
            class,
            contributions,
        });
    }

    // The hand must be gone and every broken floor group fully consumed;
    // leftovers in unmatched anchors are the remaining cross.
    if !hand_pool.is_empty() {
        return Err(SolverError::Reconstruction(format!(
            "hand cards left over: {}",
            pretty_list(&hand_pool.cards())
        )));
    }
    for s in 0..anchors_start {
        if !matched[s] && !remaining[s].is_empty() {
            return Err(SolverError::Reconstruction(format!(
                "floor cards left over in group #{}: {}",
                s + 1,
                pretty_list(&remaining[s].cards())
            )));
        }
    }

    // Emission: splits feeding synthesized targets, then splits feeding
    // extensions, then the additions, then the new groups.
    let mut steps: Vec<Step> = Vec::new();
    for synthesized_pass in [true, false] {
        for m in &moves {
            let is_synth = matches!(m.class, TargetClass::Synthesized);
            if is_synth != synthesized_pass {
                continue;
            }
            for (s, cards) in &m.contributions {
                steps.push(Step::TakeFrom {
                    source: sources[*s].0,
                    cards: cards.clone(),
                });
            }
        }
    }
    for m in &moves {
        if let TargetClass::Extended { source, added } = &m.class {
            steps.push(Step::AddTo {
                source: sources[*source].0,
                cards: added.cards(),
            });
        }
    }
    for (t, m) in moves.iter().enumerate() {
        if matches!(m.class, TargetClass::Synthesized) {
            steps.push(Step::NewGroup {
                cards: target[t].cards().to_vec(),
            });
        }
    }

    Ok(steps)
}
