//! The solver entry point: pool the hand, floor and cross, search for a
//! repartition that places every hand and floor card, and explain the result.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::cards::{parse_card, Card};
use crate::enumerator::find_partition;
use crate::error::{SolverError, SolverResult};
use crate::groups::Group;
use crate::pool::Pool;
use crate::reconstruct::{reconstruct_steps, Step};

/// The cross holds at most four anchor cards.
pub const MAX_CROSS: usize = 4;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SolveRequest {
    #[serde(default)]
    pub hand: Vec<String>,
    #[serde(default)]
    pub floor_groups: Vec<Vec<String>>,
    #[serde(default)]
    pub cross: Vec<String>,
    #[serde(default)]
    pub deadline_ms: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardDetail {
    pub code: String,
    pub rank: u8,
    pub suit: String,
    pub display: String,
}

impl CardDetail {
    fn of(card: Card) -> CardDetail {
        CardDetail {
            code: card.code(),
            rank: card.rank.value(),
            suit: card.suit.code().to_string(),
            display: card.pretty(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepDetail {
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolveResponse {
    pub solvable: bool,
    pub elapsed_seconds: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_groups: Option<Vec<Vec<CardDetail>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub steps: Option<Vec<StepDetail>>,
    pub remaining_cross: Vec<CardDetail>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// A solved turn at the card level, before serialization.
#[derive(Debug, Clone)]
pub struct Solution {
    pub target_groups: Vec<Group>,
    pub steps: Vec<Step>,
    pub remaining_cross: Vec<Card>,
}

/// Solve at the card level. `Ok(None)` means the search space is exhausted
/// (the turn cannot be completed, which is not an error).
pub fn solve_turn(
    hand: &[Card],
    floor_groups: &[Vec<Card>],
    cross: &[Card],
    deadline: Option<Duration>,
) -> SolverResult<Option<Solution>> {
    if cross.len() > MAX_CROSS {
        return Err(SolverError::CrossOverflow {
            max: MAX_CROSS,
            got: cross.len(),
        });
    }

    let mut pool = Pool::new();
    let mut required = Pool::new();
    for &card in hand {
        pool.add(card);
        required.add(card);
    }

    // Cross anchors start out standing; one gets consumed in place for each
    // partially built anchor pile on the floor.
    let mut standing_cross = Pool::from_cards(cross);
    for (index, group) in floor_groups.iter().enumerate() {
        if group.len() >= 3 {
            // Pooled without a validity check: the enumerator either rehomes
            // every card of a malformed pile or reports no solution.
            for &card in group {
                pool.add(card);
                required.add(card);
            }
            continue;
        }
        // A short pile is legal only while it sits on a cross anchor. The
        // anchor copy stays optional; the cards built onto it are floor
        // cards and must be replaced into some group.
        let anchor = group
            .iter()
            .copied()
            .find(|&card| standing_cross.count(card) > 0)
            .ok_or(SolverError::UndersizedFloorGroup { index })?;
        standing_cross.remove(anchor);
        let mut anchor_seen = false;
        for &card in group {
            pool.add(card);
            if card == anchor && !anchor_seen {
                anchor_seen = true;
            } else {
                required.add(card);
            }
        }
    }
    let standing_cross: Vec<Card> = standing_cross.cards();
    for &card in &standing_cross {
        pool.add(card);
    }

    if let Some(card) = pool.over_limit() {
        return Err(SolverError::TooManyCopies(card.code()));
    }

    let deadline = deadline.map(|budget| Instant::now() + budget);
    let target_groups = match find_partition(&pool, &required, deadline)? {
        Some(groups) => groups,
        None => return Ok(None),
    };

    let mut leftovers = pool;
    for group in &target_groups {
        leftovers.subtract(&group.pool());
    }
    let remaining_cross = leftovers.cards();

    let steps = reconstruct_steps(floor_groups, &standing_cross, hand, &target_groups)?;

    Ok(Some(Solution {
        target_groups,
        steps,
        remaining_cross,
    }))
}

/// String-level entry point: parse the request, solve, time it, and fold
/// errors into the response as stable kind names.
pub fn solve(request: &SolveRequest) -> SolveResponse {
    let started = Instant::now();
    let outcome = solve_request(request);
    let elapsed_seconds = started.elapsed().as_secs_f64();
    match outcome {
        Ok(Some(solution)) => SolveResponse {
            solvable: true,
            elapsed_seconds,
            target_groups: Some(
                solution
                    .target_groups
                    .iter()
                    .map(|g| g.cards().iter().copied().map(CardDetail::of).collect())
                    .collect(),
            ),
            steps: Some(
                solution
                    .steps
                    .iter()
                    .map(|s| StepDetail {
                        description: s.description(),
                    })
                    .collect(),
            ),
            remaining_cross: solution
                .remaining_cross
                .iter()
                .copied()
                .map(CardDetail::of)
                .collect(),
            error: None,
        },
        Ok(None) => SolveResponse {
            solvable: false,
            elapsed_seconds,
            target_groups: None,
            steps: None,
            remaining_cross: Vec::new(),
            error: None,
        },
        Err(err) => SolveResponse {
            solvable: false,
            elapsed_seconds,
            target_groups: None,
            steps: None,
            remaining_cross: Vec::new(),
            error: Some(err.kind().to_string()),
        },
    }
}

fn solve_request(request: &SolveRequest) -> SolverResult<Option<Solution>> {
    let hand = parse_codes(&request.hand)?;
    let floor_groups = request
        .floor_groups
        .iter()
        .map(|group| parse_codes(group))
        .collect::<SolverResult<Vec<Vec<Card>>>>()?;
    let cross = parse_codes(&request.cross)?;
    let deadline = request.deadline_ms.map(Duration::from_millis);
    solve_turn(&hand, &floor_groups, &cross, deadline)
}

fn parse_codes(codes: &[String]) -> SolverResult<Vec<Card>> {
    codes.iter().map(|code| parse_card(code)).collect()
}
