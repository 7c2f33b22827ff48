//! Search engine behavior: witness ordering, optional cards, two-deck
//! multiplicity and deadline handling.

use std::time::Instant;

use makiaveli::cards::parse_cards;
use makiaveli::enumerator::find_partition;
use makiaveli::groups::{is_valid_group, GroupKind};
use makiaveli::pool::Pool;

fn pool_of(s: &str) -> Pool {
    Pool::from_cards(&parse_cards(s).unwrap())
}

fn codes(group: &makiaveli::groups::Group) -> Vec<String> {
    group.cards().iter().map(|c| c.code()).collect()
}

// ---------------------------------------------------------------------------
// Basic partitions
// ---------------------------------------------------------------------------

#[test]
fn single_run_partition() {
    let pool = pool_of("3S 4S 5S");
    let groups = find_partition(&pool, &pool, None).unwrap().unwrap();
    assert_eq!(groups.len(), 1);
    assert_eq!(codes(&groups[0]), vec!["3S", "4S", "5S"]);
}

#[test]
fn single_set_partition() {
    let pool = pool_of("7H 7D 7C");
    let groups = find_partition(&pool, &pool, None).unwrap().unwrap();
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].kind(), GroupKind::Set);
}

#[test]
fn all_partitions_cover_required_cards() {
    let pool = pool_of("3S 4S 5S 7H 7D 7C QD KD AD");
    let groups = find_partition(&pool, &pool, None).unwrap().unwrap();
    let mut union = Pool::new();
    for group in &groups {
        assert!(is_valid_group(group.cards()));
        union.absorb(&group.pool());
    }
    assert_eq!(union, pool, "partition must cover the pool exactly");
}

#[test]
fn unplaceable_required_card_exhausts() {
    let pool = pool_of("2H");
    assert!(find_partition(&pool, &pool, None).unwrap().is_none());
}

// ---------------------------------------------------------------------------
// Candidate ordering is observable in the witness
// ---------------------------------------------------------------------------

#[test]
fn larger_group_is_preferred() {
    // Both [2S..5S] and [3S..5S] place the required 3S; the witness must
    // pick up the optional 2S because longer windows are tried first.
    let pool = pool_of("2S 3S 4S 5S");
    let required = pool_of("3S 4S 5S");
    let groups = find_partition(&pool, &required, None).unwrap().unwrap();
    assert_eq!(groups.len(), 1);
    assert_eq!(codes(&groups[0]), vec!["2S", "3S", "4S", "5S"]);
}

#[test]
fn runs_are_tried_before_sets() {
    let pool = pool_of("7S 8S 9S 10S 7H 7D 7C");
    let groups = find_partition(&pool, &pool, None).unwrap().unwrap();
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].kind(), GroupKind::Run);
    assert_eq!(codes(&groups[0]), vec!["7S", "8S", "9S", "10S"]);
    assert_eq!(groups[1].kind(), GroupKind::Set);
}

#[test]
fn witness_is_deterministic() {
    let pool = pool_of("3H 4H 5H 5H 6H 7H 5S 5D 5C");
    let first = find_partition(&pool, &pool, None).unwrap();
    let second = find_partition(&pool, &pool, None).unwrap();
    assert_eq!(first, second);
}

// ---------------------------------------------------------------------------
// Optional cards
// ---------------------------------------------------------------------------

#[test]
fn optional_card_may_stay_out() {
    let pool = pool_of("7H 7D 7C 9D");
    let required = pool_of("7H 7D 7C");
    let groups = find_partition(&pool, &required, None).unwrap().unwrap();
    assert_eq!(groups.len(), 1, "the lone 9D must not force a failure");
    let mut union = Pool::new();
    for group in &groups {
        union.absorb(&group.pool());
    }
    assert_eq!(union, required);
}

#[test]
fn optional_card_is_used_when_it_completes_a_group() {
    let pool = pool_of("QS KS AS");
    let required = pool_of("QS KS");
    let groups = find_partition(&pool, &required, None).unwrap().unwrap();
    assert_eq!(codes(&groups[0]), vec!["QS", "KS", "AS"]);
}

// ---------------------------------------------------------------------------
// Two-deck multiplicity
// ---------------------------------------------------------------------------

#[test]
fn doubled_card_splits_a_long_run() {
    let pool = pool_of("3H 4H 5H 5H 6H 7H");
    let groups = find_partition(&pool, &pool, None).unwrap().unwrap();
    assert_eq!(groups.len(), 2);
    assert_eq!(codes(&groups[0]), vec!["3H", "4H", "5H"]);
    assert_eq!(codes(&groups[1]), vec!["5H", "6H", "7H"]);
}

#[test]
fn second_copy_cannot_join_the_same_set() {
    // One 7S fits the set; the other has no legal home.
    let pool = pool_of("7S 7S 7H 7D 7C");
    assert!(find_partition(&pool, &pool, None).unwrap().is_none());
}

#[test]
fn three_copies_are_invalid_input() {
    let pool = pool_of("AS AS AS");
    let err = find_partition(&pool, &pool, None).unwrap_err();
    assert_eq!(err.kind(), "InvalidInput");
}

// ---------------------------------------------------------------------------
// Wrap rejection
// ---------------------------------------------------------------------------

#[test]
fn wrap_around_is_never_a_run() {
    let pool = pool_of("KS AS 2S");
    assert!(find_partition(&pool, &pool, None).unwrap().is_none());
}

// ---------------------------------------------------------------------------
// Deadlines
// ---------------------------------------------------------------------------

#[test]
fn expired_deadline_times_out() {
    let pool = pool_of("3S 4S 5S");
    let err = find_partition(&pool, &pool, Some(Instant::now())).unwrap_err();
    assert_eq!(err.kind(), "Timeout");
}
