//! Solve entry point that hides the normalize-validate-solve wiring.

use quartet_config::QuartetConfig;
use quartet_core::{Normalizer, Oracle, Result, SimilaritySource};
use quartet_solver::{PuzzleSolver, SolveReport};

/// Normalizes raw word lines and solves the resulting pool.
///
/// Blank lines are skipped. Every other line must name a word the similarity
/// source knows, in its literal, capitalized or uppercase spelling.
///
/// # Errors
///
/// Fails with [`QuartetError::NotFound`](quartet_core::QuartetError::NotFound),
/// [`Duplicate`](quartet_core::QuartetError::Duplicate) or
/// [`Validation`](quartet_core::QuartetError::Validation) before any proposal
/// is made.
pub fn solve_lines<S, I, O>(
    source: &S,
    lines: I,
    config: &QuartetConfig,
    oracle: &mut O,
) -> Result<SolveReport>
where
    S: SimilaritySource + ?Sized,
    I: IntoIterator,
    I::Item: AsRef<str>,
    O: Oracle + ?Sized,
{
    let pool = Normalizer::new(source, config.group_size).normalize_lines(lines)?;
    PuzzleSolver::from_config(source, config).solve(pool, oracle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use quartet_core::QuartetError;
    use quartet_test::{fruit_and_vehicles, group, TruthOracle};

    #[test]
    fn test_solves_raw_lines() {
        let table = fruit_and_vehicles();
        let lines = "Apple\nbanana\nCAR\ntruck\n\ndog\ncat\nbike\ntrain\n".lines();
        let mut oracle = TruthOracle::new([
            group(&["apple", "banana", "dog", "cat"]),
            group(&["car", "truck", "bike", "train"]),
        ]);

        let report = solve_lines(&table, lines, &QuartetConfig::default(), &mut oracle).unwrap();
        assert!(report.is_solved());
        assert_eq!(report.groups.len(), 2);
    }

    #[test]
    fn test_unknown_word_fails_before_proposing() {
        let table = fruit_and_vehicles();
        let mut oracle = TruthOracle::new([group(&["apple", "banana", "dog", "cat"])]);
        let lines = ["apple", "banana", "Hot Dog", "cat"];

        let err = solve_lines(&table, lines, &QuartetConfig::default(), &mut oracle).unwrap_err();
        assert!(matches!(err, QuartetError::NotFound { token } if token == "hot_dog"));
        assert!(oracle.proposals().is_empty());
    }
}
