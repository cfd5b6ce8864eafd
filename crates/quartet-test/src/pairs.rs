//! Pair-table similarity source.
//!
//! Every similarity is given explicitly (or falls back to a default), which
//! makes candidate rankings easy to reason about in tests.

use std::collections::{BTreeSet, HashMap};

use quartet_core::SimilaritySource;

/// A similarity source backed by an explicit table of word pairs.
///
/// Pairs are symmetric. A word is in the vocabulary once it appears in any
/// pair or is added with [`with_words`](Self::with_words). Known pairs
/// without an entry use the default similarity; a word compared with itself
/// has similarity 1.
#[derive(Debug, Clone)]
pub struct PairTable {
    default: f64,
    words: BTreeSet<String>,
    pairs: HashMap<(String, String), f64>,
}

impl PairTable {
    /// Creates an empty table with the given default similarity.
    pub fn new(default: f64) -> Self {
        Self {
            default,
            words: BTreeSet::new(),
            pairs: HashMap::new(),
        }
    }

    fn key(a: &str, b: &str) -> (String, String) {
        if a <= b {
            (a.to_string(), b.to_string())
        } else {
            (b.to_string(), a.to_string())
        }
    }

    /// Sets the similarity of one pair.
    pub fn with_pair(mut self, a: &str, b: &str, similarity: f64) -> Self {
        self.words.insert(a.to_string());
        self.words.insert(b.to_string());
        self.pairs.insert(Self::key(a, b), similarity);
        self
    }

    /// Sets every pair within `cluster` to `similarity`.
    pub fn with_cluster(mut self, cluster: &[&str], similarity: f64) -> Self {
        for (i, a) in cluster.iter().enumerate() {
            for b in &cluster[i + 1..] {
                self = self.with_pair(a, b, similarity);
            }
        }
        self
    }

    /// Adds words to the vocabulary without setting any pair.
    pub fn with_words<'a>(mut self, words: impl IntoIterator<Item = &'a str>) -> Self {
        self.words.extend(words.into_iter().map(str::to_string));
        self
    }
}

impl SimilaritySource for PairTable {
    fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    fn similarity(&self, a: &str, b: &str) -> Option<f64> {
        if !self.contains(a) || !self.contains(b) {
            return None;
        }
        if a == b {
            return Some(1.0);
        }
        Some(
            self.pairs
                .get(&Self::key(a, b))
                .copied()
                .unwrap_or(self.default),
        )
    }

    fn vocabulary_size(&self) -> Option<usize> {
        Some(self.words.len())
    }
}
