//! Candidate enumeration and ranking.

use itertools::Itertools;

use quartet_core::{Group, Item, Result, SimilarityScore, SimilaritySource};
use quartet_scoring::SimilarityScorer;

/// A scored candidate group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub group: Group,
    pub score: SimilarityScore,
}

/// Every `group_size`-combination of `pool`, in lexicographic order of pool
/// positions.
///
/// # Examples
///
/// ```
/// use quartet_core::Item;
/// use quartet_solver::candidates::enumerate_groups;
///
/// let pool: Vec<Item> = ["a", "b", "c", "d", "e"].map(Item::from).to_vec();
/// let groups = enumerate_groups(&pool, 4);
/// assert_eq!(groups.len(), 5);
/// assert_eq!(groups[0].to_string(), "[A, B, C, D]");
/// ```
pub fn enumerate_groups(pool: &[Item], group_size: usize) -> Vec<Group> {
    if group_size == 0 || pool.len() < group_size {
        return Vec::new();
    }
    pool.iter()
        .cloned()
        .combinations(group_size)
        .map(Group::new)
        .collect()
}

/// Scores every candidate from `pool` and sorts them by score, best first.
///
/// The sort is stable, so equal scores keep enumeration order and the ranking
/// is reproducible for a fixed pool and similarity source.
///
/// # Errors
///
/// Propagates [`QuartetError::Lookup`](quartet_core::QuartetError::Lookup)
/// from the scorer.
pub fn rank_candidates<S: SimilaritySource + ?Sized>(
    scorer: &SimilarityScorer<'_, S>,
    pool: &[Item],
    group_size: usize,
    parallel: bool,
) -> Result<Vec<Candidate>> {
    let groups = enumerate_groups(pool, group_size);
    let scores = scorer.score_all(&groups, parallel)?;

    let mut candidates: Vec<Candidate> = groups
        .into_iter()
        .zip(scores)
        .map(|(group, score)| Candidate { group, score })
        .collect();
    candidates.sort_by(|a, b| b.score.cmp(&a.score));
    Ok(candidates)
}

/// Number of `k`-combinations of `n` items.
pub fn combination_count(n: usize, k: usize) -> u64 {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    (0..k).fold(1u64, |acc, i| acc * (n - i) as u64 / (i + 1) as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use quartet_test::{fruit_and_vehicles, group, items, near_miss, FRUIT_AND_VEHICLES};

    #[test]
    fn test_combination_count() {
        assert_eq!(combination_count(16, 4), 1820);
        assert_eq!(combination_count(8, 4), 70);
        assert_eq!(combination_count(4, 4), 1);
        assert_eq!(combination_count(3, 4), 0);
    }

    #[test]
    fn test_enumeration_covers_every_combination() {
        let pool = items(&FRUIT_AND_VEHICLES);
        let groups = enumerate_groups(&pool, 4);
        assert_eq!(groups.len() as u64, combination_count(8, 4));

        let unique: std::collections::HashSet<_> = groups.iter().collect();
        assert_eq!(unique.len(), groups.len());
    }

    #[test]
    fn test_small_pool_has_no_candidates() {
        let pool = items(&["a", "b", "c"]);
        assert!(enumerate_groups(&pool, 4).is_empty());
    }

    #[test]
    fn test_ranking_is_descending() {
        let table = fruit_and_vehicles();
        let scorer = SimilarityScorer::new(&table);
        let ranked = rank_candidates(&scorer, &items(&FRUIT_AND_VEHICLES), 4, false).unwrap();

        assert_eq!(ranked[0].group, group(&["apple", "banana", "dog", "cat"]));
        assert_eq!(ranked[1].group, group(&["car", "truck", "bike", "train"]));
        assert!(ranked.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn test_ties_keep_enumeration_order() {
        let table = near_miss();
        let scorer = SimilarityScorer::new(&table);
        let ranked = rank_candidates(&scorer, &items(&FRUIT_AND_VEHICLES), 4, true).unwrap();

        let top: Vec<Group> = ranked.iter().take(6).map(|c| c.group.clone()).collect();
        assert_eq!(
            top,
            vec![
                group(&["apple", "banana", "car", "dog"]),
                group(&["apple", "banana", "car", "cat"]),
                group(&["apple", "car", "dog", "cat"]),
                group(&["banana", "car", "dog", "cat"]),
                group(&["apple", "banana", "dog", "cat"]),
                group(&["car", "truck", "bike", "train"]),
            ]
        );
        assert_eq!(ranked[1].score, ranked[3].score);
    }

    #[test]
    fn test_ranking_is_deterministic() {
        let table = near_miss();
        let scorer = SimilarityScorer::new(&table);
        let pool = items(&FRUIT_AND_VEHICLES);
        let first = rank_candidates(&scorer, &pool, 4, true).unwrap();
        for _ in 0..5 {
            assert_eq!(rank_candidates(&scorer, &pool, 4, true).unwrap(), first);
        }
    }
}
