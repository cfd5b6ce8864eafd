//! Quartet - partition words into groups of related words
//!
//! Candidates are ranked by mean pairwise similarity and proposed one at a
//! time to an oracle, whose one-away and far-away feedback prunes the rest.
//!
//! # Example
//!
//! ```rust
//! use quartet::prelude::*;
//!
//! let verdict: Verdict = "2+".parse().unwrap();
//! assert_eq!(verdict, Verdict::FarAway);
//!
//! let group = Group::new(["ice_cream", "cake"].map(Item::from));
//! assert_eq!(group.to_string(), "[CAKE, ICE CREAM]");
//! ```

// Core types
pub use quartet_core::{
    canonical_form, Constraint, Group, Item, Normalizer, Oracle, Proposal, QuartetError, Result,
    Severity, SimilarityScore, SimilaritySource, Verdict, VerdictParseError, DEFAULT_GROUP_SIZE,
};

// Scoring and similarity sources
pub use quartet_scoring::{SimilarityScorer, SnapshotStore, VectorTable};

// Matching and solving
pub use quartet_solver::{
    Candidate, GroupMatcher, History, PuzzleSolver, RoundOutcome, RoundReport, SolveReport,
    SolveStatistics, SolveStatus, TerminalOracle,
};

// Configuration
pub use quartet_config::{ConfigError, MatchingConfig, QuartetConfig};

#[cfg(feature = "console")]
pub use quartet_console as console;

mod solve;
pub use solve::solve_lines;

pub mod prelude {
    pub use super::{Group, Item, Oracle, Proposal, SimilaritySource, Verdict};
    pub use super::{GroupMatcher, History, PuzzleSolver, SolveReport, SolveStatus};
    pub use super::{QuartetConfig, QuartetError, SimilarityScore};
    pub use super::solve_lines;
}
