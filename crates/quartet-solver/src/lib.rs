//! Quartet Solver - interactive group matching
//!
//! This crate turns similarity scores into a partition of the pool:
//! - [`candidates`] - enumerate and rank every candidate group
//! - [`history`] - rejected groups and per-round one-away/far-away feedback
//! - [`round`] - the per-round proposal state machine
//! - [`matcher`] - [`GroupMatcher`], one round against an oracle
//! - [`solver`] - [`PuzzleSolver`], rounds until the pool is empty
//! - [`prompt`] - [`TerminalOracle`], verdicts read from a terminal
//! - [`statistics`] - per-round and per-run counters

pub mod candidates;
pub mod history;
pub mod matcher;
pub mod prompt;
pub mod round;
pub mod solver;
pub mod statistics;

pub use candidates::{combination_count, enumerate_groups, rank_candidates, Candidate};
pub use history::{History, PruneReason, RoundConstraints};
pub use matcher::{GroupMatcher, RoundOutcome, RoundReport};
pub use prompt::{TerminalOracle, VERDICT_PROMPT};
pub use round::{Round, RoundState};
pub use solver::{PuzzleSolver, SolveReport, SolveStatus};
pub use statistics::{RoundStatistics, SolveStatistics};
