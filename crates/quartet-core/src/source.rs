//! The similarity source seam.

use std::sync::Arc;

/// Read-only pairwise similarity over a fixed vocabulary.
///
/// Implementations are loaded once before any matching round and are never
/// mutated afterwards; they are shared by reference for the process lifetime.
/// The `Sync` bound lets scorers read them from several threads at once.
///
/// # Examples
///
/// ```
/// use quartet_core::SimilaritySource;
///
/// struct Constant;
///
/// impl SimilaritySource for Constant {
///     fn contains(&self, word: &str) -> bool {
///         !word.is_empty()
///     }
///
///     fn similarity(&self, a: &str, b: &str) -> Option<f64> {
///         (self.contains(a) && self.contains(b)).then_some(0.5)
///     }
/// }
///
/// assert_eq!(Constant.similarity("a", "b"), Some(0.5));
/// assert_eq!(Constant.similarity("a", ""), None);
/// ```
pub trait SimilaritySource: Sync {
    /// Returns true if `word` is in the vocabulary.
    fn contains(&self, word: &str) -> bool;

    /// Similarity of two vocabulary entries, or `None` if either is unknown.
    fn similarity(&self, a: &str, b: &str) -> Option<f64>;

    /// Number of vocabulary entries, when known.
    fn vocabulary_size(&self) -> Option<usize> {
        None
    }
}

impl<T: SimilaritySource + ?Sized> SimilaritySource for &T {
    fn contains(&self, word: &str) -> bool {
        (**self).contains(word)
    }

    fn similarity(&self, a: &str, b: &str) -> Option<f64> {
        (**self).similarity(a, b)
    }

    fn vocabulary_size(&self) -> Option<usize> {
        (**self).vocabulary_size()
    }
}

impl<T: SimilaritySource + Send + ?Sized> SimilaritySource for Arc<T> {
    fn contains(&self, word: &str) -> bool {
        (**self).contains(word)
    }

    fn similarity(&self, a: &str, b: &str) -> Option<f64> {
        (**self).similarity(a, b)
    }

    fn vocabulary_size(&self) -> Option<usize> {
        (**self).vocabulary_size()
    }
}
