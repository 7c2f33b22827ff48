//! Makiaveli turn solver.
//!
//! Given a hand, the current table (floor groups) and up to four cross
//! anchor cards, decide whether every hand card can be discarded in a single
//! turn. On success the solver returns the target table configuration plus a
//! human-readable sequence of rearrangement steps.
//!
//! The pipeline: [`cards`] models the two-deck card multiset, [`groups`]
//! validates sets and runs, [`enumerator`] searches for a repartition of the
//! pooled cards, [`reconstruct`] turns the found partition into steps, and
//! [`solve`] is the single entry point tying them together.

pub mod cards;
pub mod cli;
pub mod display;
pub mod enumerator;
pub mod error;
pub mod groups;
pub mod pool;
pub mod reconstruct;
pub mod solve;
