//! SimilarityScore - aggregate similarity of a group

use std::cmp::Ordering;
use std::fmt;

/// Mean pairwise similarity of a group.
///
/// Wraps an `f64` with a total order (`f64::total_cmp`) so candidates can be
/// sorted and compared without `partial_cmp` fallbacks. Higher is better.
///
/// # Examples
///
/// ```
/// use quartet_core::SimilarityScore;
///
/// let weak = SimilarityScore::of(0.12);
/// let strong = SimilarityScore::of(0.58);
///
/// assert!(strong > weak);
/// assert_eq!(strong.to_string(), "0.5800");
/// ```
#[derive(Clone, Copy, Default)]
pub struct SimilarityScore {
    value: f64,
}

impl SimilarityScore {
    /// The zero score.
    pub const ZERO: SimilarityScore = SimilarityScore { value: 0.0 };

    /// Creates a new score with the given value.
    #[inline]
    pub const fn of(value: f64) -> Self {
        SimilarityScore { value }
    }

    /// Mean of `total` over `pairs` pairs; zero pairs gives zero.
    #[inline]
    pub fn mean(total: f64, pairs: usize) -> Self {
        if pairs == 0 {
            Self::ZERO
        } else {
            SimilarityScore::of(total / pairs as f64)
        }
    }

    /// Returns the score value.
    #[inline]
    pub const fn value(&self) -> f64 {
        self.value
    }
}

impl PartialEq for SimilarityScore {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SimilarityScore {}

impl Ord for SimilarityScore {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.total_cmp(&other.value)
    }
}

impl PartialOrd for SimilarityScore {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Debug for SimilarityScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SimilarityScore({})", self.value)
    }
}

impl fmt::Display for SimilarityScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}", self.value)
    }
}
