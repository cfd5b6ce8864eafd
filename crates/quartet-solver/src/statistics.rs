//! Solver statistics collection and reporting.
//!
//! This module provides types for tracking how much work each matching round
//! did: candidates ranked, proposals made, candidates pruned and time spent.

use std::time::Duration;

use crate::history::PruneReason;

/// Statistics for a single matching round.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoundStatistics {
    /// Index of this round (0-based).
    pub round_index: usize,
    /// Pool size when the round started.
    pub pool_size: usize,
    /// Number of candidates enumerated and scored.
    pub candidates_ranked: usize,
    /// Number of candidates shown to the oracle.
    pub proposals: usize,
    /// Candidates skipped because the identical group was rejected before.
    pub pruned_rejected: usize,
    /// Candidates skipped by one-away feedback.
    pub pruned_one_away: usize,
    /// Candidates skipped by far-away feedback.
    pub pruned_far_away: usize,
    /// Time spent in this round, including waiting for the oracle.
    pub duration: Duration,
}

impl RoundStatistics {
    /// Creates empty statistics for a round.
    pub fn new(round_index: usize, pool_size: usize) -> Self {
        Self {
            round_index,
            pool_size,
            ..Self::default()
        }
    }

    /// Records one pruned candidate.
    pub fn record_prune(&mut self, reason: PruneReason) {
        match reason {
            PruneReason::AlreadyRejected => self.pruned_rejected += 1,
            PruneReason::OneAway => self.pruned_one_away += 1,
            PruneReason::FarAway => self.pruned_far_away += 1,
        }
    }

    /// Total candidates pruned for any reason.
    pub fn pruned(&self) -> usize {
        self.pruned_rejected + self.pruned_one_away + self.pruned_far_away
    }

    /// Candidates neither proposed nor pruned.
    pub fn unvisited(&self) -> usize {
        self.candidates_ranked
            .saturating_sub(self.proposals + self.pruned())
    }
}

/// Complete statistics for a solve run.
#[derive(Debug, Clone, Default)]
pub struct SolveStatistics {
    /// Total time spent solving.
    pub total_duration: Duration,
    /// Statistics for each round, in order.
    pub rounds: Vec<RoundStatistics>,
}

impl SolveStatistics {
    /// Creates empty solve statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of rounds.
    pub fn round_count(&self) -> usize {
        self.rounds.len()
    }

    /// Total proposals across all rounds.
    pub fn total_proposals(&self) -> usize {
        self.rounds.iter().map(|r| r.proposals).sum()
    }

    /// Total candidates scored across all rounds.
    pub fn total_candidates(&self) -> usize {
        self.rounds.iter().map(|r| r.candidates_ranked).sum()
    }

    /// Total candidates pruned across all rounds.
    pub fn total_pruned(&self) -> usize {
        self.rounds.iter().map(RoundStatistics::pruned).sum()
    }

    /// Average proposals per round.
    pub fn avg_proposals_per_round(&self) -> f64 {
        if self.rounds.is_empty() {
            0.0
        } else {
            self.total_proposals() as f64 / self.rounds.len() as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_counts() {
        let mut stats = RoundStatistics::new(0, 8);
        stats.candidates_ranked = 70;
        stats.proposals = 3;
        stats.record_prune(PruneReason::OneAway);
        stats.record_prune(PruneReason::OneAway);
        stats.record_prune(PruneReason::FarAway);

        assert_eq!(stats.pruned(), 3);
        assert_eq!(stats.unvisited(), 64);
    }

    #[test]
    fn test_solve_totals() {
        let mut solve = SolveStatistics::new();
        assert_eq!(solve.avg_proposals_per_round(), 0.0);

        let mut first = RoundStatistics::new(0, 8);
        first.proposals = 3;
        first.candidates_ranked = 70;
        let mut second = RoundStatistics::new(1, 4);
        second.proposals = 1;
        second.candidates_ranked = 1;
        solve.rounds.push(first);
        solve.rounds.push(second);

        assert_eq!(solve.round_count(), 2);
        assert_eq!(solve.total_proposals(), 4);
        assert_eq!(solve.total_candidates(), 71);
        assert_eq!(solve.avg_proposals_per_round(), 2.0);
    }
}
