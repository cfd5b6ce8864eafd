//! The host solve loop: rounds until the pool is partitioned.

use std::collections::HashSet;
use std::fmt;
use std::time::Instant;

use tracing::info;

use quartet_config::QuartetConfig;
use quartet_core::{Item, Oracle, QuartetError, Result, SimilaritySource};

use crate::candidates::Candidate;
use crate::history::History;
use crate::matcher::{GroupMatcher, RoundOutcome};
use crate::statistics::SolveStatistics;

/// How a solve run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveStatus {
    /// Every item was placed in a confirmed group.
    Solved,
    /// A round ran out of candidates.
    Exhausted,
    /// The oracle stopped answering.
    Abandoned,
}

impl fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolveStatus::Solved => write!(f, "solved"),
            SolveStatus::Exhausted => write!(f, "exhausted"),
            SolveStatus::Abandoned => write!(f, "abandoned"),
        }
    }
}

/// Result of a solve run.
#[derive(Debug, Clone)]
pub struct SolveReport {
    /// Confirmed groups in the order they were found.
    pub groups: Vec<Candidate>,
    pub status: SolveStatus,
    /// Items not placed in any confirmed group.
    pub remaining: Vec<Item>,
    /// Every group rejected during the run.
    pub history: History,
    pub statistics: SolveStatistics,
}

impl SolveReport {
    pub fn is_solved(&self) -> bool {
        self.status == SolveStatus::Solved
    }
}

/// Partitions a pool into groups by running matching rounds until it is empty.
///
/// Groups rejected in any round are remembered for the whole run. After a
/// confirmation, the confirmed members leave the pool and the next round
/// starts over the rest.
#[derive(Debug)]
pub struct PuzzleSolver<'a, S: ?Sized> {
    matcher: GroupMatcher<'a, S>,
}

impl<'a, S: SimilaritySource + ?Sized> PuzzleSolver<'a, S> {
    pub fn new(matcher: GroupMatcher<'a, S>) -> Self {
        Self { matcher }
    }

    pub fn from_config(source: &'a S, config: &QuartetConfig) -> Self {
        Self::new(GroupMatcher::from_config(source, config))
    }

    pub fn matcher(&self) -> &GroupMatcher<'a, S> {
        &self.matcher
    }

    /// Checks that `pool` can be partitioned and scored.
    ///
    /// # Errors
    ///
    /// [`QuartetError::Validation`] if the pool is empty or not a multiple of
    /// the group size, [`QuartetError::Duplicate`] if an item repeats, and
    /// [`QuartetError::Lookup`] if an item is unknown to the similarity source.
    pub fn validate(&self, pool: &[Item]) -> Result<()> {
        let group_size = self.matcher.group_size();
        if pool.is_empty() || group_size == 0 || pool.len() % group_size != 0 {
            return Err(QuartetError::Validation {
                count: pool.len(),
                group_size,
            });
        }

        let mut seen = HashSet::with_capacity(pool.len());
        for item in pool {
            if !seen.insert(item) {
                return Err(QuartetError::Duplicate {
                    item: item.as_str().to_string(),
                });
            }
        }

        self.matcher.scorer().check_known(pool)
    }

    /// Solves `pool`, asking `oracle` about each proposal.
    ///
    /// Stops early when a round is exhausted or the oracle stops answering;
    /// the report then lists the groups found so far and the unplaced items.
    pub fn solve<O: Oracle + ?Sized>(&self, pool: Vec<Item>, oracle: &mut O) -> Result<SolveReport> {
        self.validate(&pool)?;

        let start = Instant::now();
        let group_size = self.matcher.group_size();
        let mut remaining = pool;
        let mut history = History::new();
        let mut groups = Vec::new();
        let mut statistics = SolveStatistics::new();

        info!(
            event = "solve_start",
            item_count = remaining.len() as u64,
            group_size = group_size as u64,
            group_count = (remaining.len() / group_size) as u64,
        );

        let mut status = SolveStatus::Solved;
        let mut round_index = 0;
        while !remaining.is_empty() {
            let report = self
                .matcher
                .match_group(round_index, &remaining, &history, oracle)?;
            statistics.rounds.push(report.statistics);

            match report.outcome {
                RoundOutcome::Confirmed {
                    group,
                    score,
                    rejected,
                } => {
                    history.extend(rejected);
                    remaining.retain(|item| !group.contains(item));
                    groups.push(Candidate { group, score });
                }
                RoundOutcome::Exhausted { rejected } => {
                    history.extend(rejected);
                    status = SolveStatus::Exhausted;
                    break;
                }
                RoundOutcome::Abandoned { rejected } => {
                    history.extend(rejected);
                    status = SolveStatus::Abandoned;
                    break;
                }
            }
            round_index += 1;
        }

        statistics.total_duration = start.elapsed();

        info!(
            event = "solve_end",
            status = %status,
            groups = groups.len() as u64,
            remaining = remaining.len() as u64,
            proposals = statistics.total_proposals() as u64,
            rejected = history.len() as u64,
            duration_ms = statistics.total_duration.as_millis() as u64,
        );

        Ok(SolveReport {
            groups,
            status,
            remaining,
            history,
            statistics,
        })
    }
}
