//! Mean pairwise similarity of a group.

use itertools::Itertools;
use rayon::prelude::*;

use quartet_core::{Group, Item, QuartetError, Result, SimilarityScore, SimilaritySource};

/// Scores groups by the mean similarity over all unordered member pairs.
///
/// For a group of size `k` there are `k * (k - 1) / 2` pairs. The scorer is
/// stateless: it only borrows the similarity source, so scoring different
/// groups from several threads at once is safe.
///
/// # Examples
///
/// ```
/// use quartet_core::{Group, Item, SimilaritySource};
/// use quartet_scoring::SimilarityScorer;
///
/// struct Half;
/// impl SimilaritySource for Half {
///     fn contains(&self, _: &str) -> bool { true }
///     fn similarity(&self, _: &str, _: &str) -> Option<f64> { Some(0.5) }
/// }
///
/// let scorer = SimilarityScorer::new(&Half);
/// let group = Group::new(["a", "b", "c", "d"].map(Item::from));
/// assert_eq!(scorer.score(&group).unwrap().value(), 0.5);
/// ```
#[derive(Debug)]
pub struct SimilarityScorer<'a, S: ?Sized> {
    source: &'a S,
}

impl<S: ?Sized> Clone for SimilarityScorer<'_, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S: ?Sized> Copy for SimilarityScorer<'_, S> {}

impl<'a, S: SimilaritySource + ?Sized> SimilarityScorer<'a, S> {
    /// Creates a scorer over `source`.
    pub fn new(source: &'a S) -> Self {
        Self { source }
    }

    /// Returns the underlying similarity source.
    pub fn source(&self) -> &'a S {
        self.source
    }

    /// Checks that every item is known to the similarity source.
    ///
    /// # Errors
    ///
    /// Returns [`QuartetError::Lookup`] for the first unknown item.
    pub fn check_known<'i>(&self, items: impl IntoIterator<Item = &'i Item>) -> Result<()> {
        for item in items {
            if !self.source.contains(item.as_str()) {
                return Err(QuartetError::Lookup {
                    item: item.as_str().to_string(),
                });
            }
        }
        Ok(())
    }

    /// Mean pairwise similarity of `group`.
    ///
    /// # Errors
    ///
    /// Returns [`QuartetError::Lookup`] if any member is unknown to the
    /// similarity source. Upstream normalization should make this impossible.
    pub fn score(&self, group: &Group) -> Result<SimilarityScore> {
        self.check_known(group)?;

        let mut total = 0.0;
        let mut pairs = 0;
        for (a, b) in group.members().iter().tuple_combinations() {
            let similarity = self
                .source
                .similarity(a.as_str(), b.as_str())
                .ok_or_else(|| QuartetError::Lookup {
                    item: format!("{} / {}", a, b),
                })?;
            total += similarity;
            pairs += 1;
        }

        Ok(SimilarityScore::mean(total, pairs))
    }

    /// Scores every group, returning scores in input order.
    ///
    /// With `parallel` set the work is spread over the rayon pool; the result
    /// order is the same either way.
    pub fn score_all(&self, groups: &[Group], parallel: bool) -> Result<Vec<SimilarityScore>> {
        if parallel {
            groups.par_iter().map(|group| self.score(group)).collect()
        } else {
            groups.iter().map(|group| self.score(group)).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quartet_test::{fruit_and_vehicles, PairTable};

    fn group(words: &[&str]) -> Group {
        words.iter().copied().map(Item::from).collect()
    }

    #[test]
    fn test_mean_over_all_pairs() {
        let table = PairTable::new(0.0)
            .with_pair("a", "b", 0.6)
            .with_pair("c", "d", 0.6)
            .with_words(["a", "b", "c", "d"]);
        let scorer = SimilarityScorer::new(&table);

        // 1.2 spread over six pairs
        let score = scorer.score(&group(&["a", "b", "c", "d"])).unwrap();
        assert!((score.value() - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_score_is_order_independent() {
        let table = fruit_and_vehicles();
        let scorer = SimilarityScorer::new(&table);
        let a = scorer.score(&group(&["apple", "banana", "dog", "cat"])).unwrap();
        let b = scorer.score(&group(&["cat", "dog", "banana", "apple"])).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_unknown_item_is_lookup_error() {
        let table = fruit_and_vehicles();
        let scorer = SimilarityScorer::new(&table);
        match scorer.score(&group(&["apple", "banana", "dog", "zebra"])) {
            Err(QuartetError::Lookup { item }) => assert_eq!(item, "zebra"),
            other => panic!("expected Lookup, got {:?}", other),
        }
    }

    #[test]
    fn test_score_all_parallel_matches_sequential() {
        let table = fruit_and_vehicles();
        let scorer = SimilarityScorer::new(&table);
        let groups = vec![
            group(&["apple", "banana", "dog", "cat"]),
            group(&["car", "truck", "bike", "train"]),
            group(&["apple", "car", "dog", "train"]),
        ];

        let sequential = scorer.score_all(&groups, false).unwrap();
        let parallel = scorer.score_all(&groups, true).unwrap();
        assert_eq!(sequential, parallel);
        assert!(sequential[0] > sequential[2]);
    }
}
