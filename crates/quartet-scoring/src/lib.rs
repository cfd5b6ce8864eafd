//! Similarity scoring for quartet.
//!
//! This crate provides:
//! - [`SimilarityScorer`]: mean pairwise similarity of a group
//! - [`VectorTable`]: a cosine-similarity source over word vectors
//! - [`SnapshotStore`]: the on-disk snapshot cache for vector tables
//!
//! # Lifecycle
//!
//! A similarity source is loaded once, before any matching round, and is
//! then shared read-only by reference. Scorers borrow it; nothing here holds
//! process-wide state.

pub mod scorer;
pub mod snapshot;
pub mod vectors;

pub use scorer::SimilarityScorer;
pub use snapshot::SnapshotStore;
pub use vectors::VectorTable;
