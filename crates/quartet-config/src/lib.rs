//! Configuration system for quartet.
//!
//! Load solver configuration from TOML or YAML files to choose the group
//! size, the similarity dataset and how candidates are scored, without code
//! changes.
//!
//! # Examples
//!
//! Load configuration from TOML string:
//!
//! ```
//! use quartet_config::QuartetConfig;
//! use std::path::Path;
//!
//! let config = QuartetConfig::from_toml_str(r#"
//!     group_size = 4
//!     dataset = "glove-wiki-gigaword-100"
//!     data_dir = "cache"
//!     vectors = "glove.6B.100d.txt"
//!
//!     [matching]
//!     parallel_scoring = false
//!     max_proposals_per_round = 25
//! "#).unwrap();
//!
//! assert_eq!(config.snapshot_path(), Path::new("cache/glove-wiki-gigaword-100.qvec"));
//! assert_eq!(config.matching.max_proposals_per_round, Some(25));
//! ```
//!
//! Use default config when file is missing:
//!
//! ```
//! use quartet_config::QuartetConfig;
//!
//! let config = QuartetConfig::load("quartet.toml").unwrap_or_default();
//! // Proceeds with defaults if file doesn't exist
//! assert_eq!(config.group_size, 4);
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Dataset used when none is configured.
pub const DEFAULT_DATASET: &str = "word2vec-google-news-300";

/// Snapshot directory used when none is configured.
pub const DEFAULT_DATA_DIR: &str = "data";

/// Main solver configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "snake_case", default)]
pub struct QuartetConfig {
    /// Number of items in every group.
    pub group_size: usize,

    /// Dataset name; keys the similarity snapshot file.
    pub dataset: String,

    /// Directory holding similarity snapshots.
    pub data_dir: PathBuf,

    /// Word-vector text file used to build the snapshot on first run.
    pub vectors: Option<PathBuf>,

    /// Candidate ranking and proposal settings.
    pub matching: MatchingConfig,
}

impl Default for QuartetConfig {
    fn default() -> Self {
        Self {
            group_size: quartet_core::DEFAULT_GROUP_SIZE,
            dataset: DEFAULT_DATASET.to_string(),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            vectors: None,
            matching: MatchingConfig::default(),
        }
    }
}

impl QuartetConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist, contains invalid TOML, or fails
    /// [`validate`](Self::validate).
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Sets the group size.
    pub fn with_group_size(mut self, group_size: usize) -> Self {
        self.group_size = group_size;
        self
    }

    /// Sets the dataset name.
    pub fn with_dataset(mut self, dataset: impl Into<String>) -> Self {
        self.dataset = dataset.into();
        self
    }

    /// Sets the snapshot directory.
    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }

    /// Sets the word-vector text file.
    pub fn with_vectors(mut self, vectors: impl Into<PathBuf>) -> Self {
        self.vectors = Some(vectors.into());
        self
    }

    /// Sets the per-round proposal cap.
    pub fn with_max_proposals_per_round(mut self, limit: usize) -> Self {
        self.matching.max_proposals_per_round = Some(limit);
        self
    }

    /// Checks values that deserialization alone cannot.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.group_size < 2 {
            return Err(ConfigError::Invalid(format!(
                "group_size must be at least 2, got {}",
                self.group_size
            )));
        }
        if self.dataset.trim().is_empty() {
            return Err(ConfigError::Invalid("dataset must not be empty".into()));
        }
        if self.matching.max_proposals_per_round == Some(0) {
            return Err(ConfigError::Invalid(
                "max_proposals_per_round must be positive".into(),
            ));
        }
        Ok(())
    }

    /// Path of the similarity snapshot for the configured dataset.
    pub fn snapshot_path(&self) -> PathBuf {
        self.data_dir.join(format!("{}.qvec", self.dataset))
    }
}

/// Candidate ranking and proposal settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case", default)]
pub struct MatchingConfig {
    /// Score candidates on the rayon thread pool.
    pub parallel_scoring: bool,

    /// Maximum proposals in a single round; reaching it exhausts the round.
    pub max_proposals_per_round: Option<usize>,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            parallel_scoring: true,
            max_proposals_per_round: None,
        }
    }
}
