//! Quartet Core - Core types and traits for group partitioning
//!
//! This crate provides the fundamental abstractions for quartet:
//! - Items and canonical fixed-size groups
//! - Similarity scores and the similarity source seam
//! - Oracle verdicts and the negative-feedback constraints they produce
//! - Item normalization against a vocabulary

pub mod error;
pub mod feedback;
pub mod group;
pub mod item;
pub mod normalize;
pub mod oracle;
pub mod score;
pub mod source;


pub use error::{QuartetError, Result};
pub use feedback::{Constraint, Severity, Verdict, VerdictParseError};
pub use group::Group;
pub use item::Item;
pub use normalize::{canonical_form, Normalizer};
pub use oracle::{Oracle, Proposal};
pub use score::SimilarityScore;
pub use source::SimilaritySource;

/// Group size used when nothing else is configured.
pub const DEFAULT_GROUP_SIZE: usize = 4;
