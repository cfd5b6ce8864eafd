//! Error types for quartet

use thiserror::Error;

/// Main error type for quartet operations.
///
/// Every variant is fatal for the run that produced it. Unrecognized oracle
/// answers are not represented here; they are re-prompted where they are read.
#[derive(Debug, Error)]
pub enum QuartetError {
    /// A raw token matched no vocabulary entry in any tried spelling.
    #[error("{token} not found in dataset")]
    NotFound { token: String },

    /// The item list cannot be partitioned into groups of the configured size.
    #[error("Number of words must be a positive multiple of {group_size} (got {count})")]
    Validation { count: usize, group_size: usize },

    /// The list contains the same normalized item twice.
    #[error("Duplicate word: {item}")]
    Duplicate { item: String },

    /// An item reached the scorer without being known to the similarity source.
    #[error("Similarity lookup failed for '{item}'")]
    Lookup { item: String },

    /// The similarity snapshot or vector file is malformed.
    #[error("Snapshot error: {0}")]
    Snapshot(String),

    /// IO error while reading words, vectors or snapshots.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for quartet operations
pub type Result<T> = std::result::Result<T, QuartetError>;
