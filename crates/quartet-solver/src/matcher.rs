//! The group matcher: ranks candidates and drives one verdict exchange.

use std::time::Instant;

use tracing::{debug, info};

use quartet_config::QuartetConfig;
use quartet_core::{Group, Item, Oracle, Result, SimilarityScore, SimilaritySource};
use quartet_scoring::SimilarityScorer;

use crate::candidates::{rank_candidates, Candidate};
use crate::history::History;
use crate::round::{Round, RoundState};
use crate::statistics::RoundStatistics;

/// How a round ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoundOutcome {
    /// The oracle confirmed `group`.
    Confirmed {
        group: Group,
        score: SimilarityScore,
        rejected: Vec<Group>,
    },
    /// Every candidate was proposed or pruned without a confirmation.
    Exhausted { rejected: Vec<Group> },
    /// The oracle stopped answering.
    Abandoned { rejected: Vec<Group> },
}

impl RoundOutcome {
    /// The confirmed group, if any.
    pub fn group(&self) -> Option<&Group> {
        match self {
            RoundOutcome::Confirmed { group, .. } => Some(group),
            _ => None,
        }
    }

    /// Groups rejected during the round, in proposal order.
    pub fn rejected(&self) -> &[Group] {
        match self {
            RoundOutcome::Confirmed { rejected, .. }
            | RoundOutcome::Exhausted { rejected }
            | RoundOutcome::Abandoned { rejected } => rejected,
        }
    }

    pub fn is_confirmed(&self) -> bool {
        matches!(self, RoundOutcome::Confirmed { .. })
    }

    /// Splits the outcome into `(group, rejected)`.
    ///
    /// Without a confirmation the group is [`Group::empty`].
    pub fn into_parts(self) -> (Group, Vec<Group>) {
        match self {
            RoundOutcome::Confirmed {
                group, rejected, ..
            } => (group, rejected),
            RoundOutcome::Exhausted { rejected } | RoundOutcome::Abandoned { rejected } => {
                (Group::empty(), rejected)
            }
        }
    }

    fn label(&self) -> &'static str {
        match self {
            RoundOutcome::Confirmed { .. } => "confirmed",
            RoundOutcome::Exhausted { .. } => "exhausted",
            RoundOutcome::Abandoned { .. } => "abandoned",
        }
    }
}

/// Outcome and statistics of one round.
#[derive(Debug, Clone)]
pub struct RoundReport {
    pub outcome: RoundOutcome,
    pub statistics: RoundStatistics,
}

/// Finds one group in a pool by proposing candidates to an oracle.
///
/// Candidates are every `group_size`-combination of the pool, ranked by mean
/// pairwise similarity. They are proposed best first; after each rejection
/// the remaining candidates are filtered by the history of rejected groups
/// and by the round's one-away and far-away feedback.
///
/// # Examples
///
/// ```
/// use quartet_core::{Item, Oracle, Proposal, SimilaritySource, Verdict};
/// use quartet_solver::{GroupMatcher, History};
///
/// struct Flat;
/// impl SimilaritySource for Flat {
///     fn contains(&self, _: &str) -> bool { true }
///     fn similarity(&self, _: &str, _: &str) -> Option<f64> { Some(0.5) }
/// }
///
/// struct Yes;
/// impl Oracle for Yes {
///     fn judge(&mut self, _: &Proposal) -> Option<Verdict> { Some(Verdict::Correct) }
/// }
///
/// let pool: Vec<Item> = ["a", "b", "c", "d"].map(Item::from).to_vec();
/// let matcher = GroupMatcher::new(&Flat, 4);
/// let report = matcher.match_group(0, &pool, &History::new(), &mut Yes).unwrap();
/// assert!(report.outcome.is_confirmed());
/// ```
#[derive(Debug)]
pub struct GroupMatcher<'a, S: ?Sized> {
    scorer: SimilarityScorer<'a, S>,
    group_size: usize,
    parallel: bool,
    proposal_limit: Option<usize>,
}

impl<'a, S: SimilaritySource + ?Sized> GroupMatcher<'a, S> {
    /// Creates a matcher with parallel scoring and no proposal cap.
    pub fn new(source: &'a S, group_size: usize) -> Self {
        Self {
            scorer: SimilarityScorer::new(source),
            group_size,
            parallel: true,
            proposal_limit: None,
        }
    }

    /// Creates a matcher from the group size and `[matching]` settings.
    pub fn from_config(source: &'a S, config: &QuartetConfig) -> Self {
        Self::new(source, config.group_size)
            .with_parallel_scoring(config.matching.parallel_scoring)
            .with_proposal_limit(config.matching.max_proposals_per_round)
    }

    pub fn with_parallel_scoring(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Caps proposals per round; `None` removes the cap.
    pub fn with_proposal_limit(mut self, limit: Option<usize>) -> Self {
        self.proposal_limit = limit;
        self
    }

    #[inline]
    pub fn group_size(&self) -> usize {
        self.group_size
    }

    pub fn scorer(&self) -> &SimilarityScorer<'a, S> {
        &self.scorer
    }

    /// Every candidate from `pool`, best first.
    pub fn rank(&self, pool: &[Item]) -> Result<Vec<Candidate>> {
        rank_candidates(&self.scorer, pool, self.group_size, self.parallel)
    }

    /// Runs one round over `pool`.
    ///
    /// Proposals are shown to `oracle` one at a time; no group in `history`
    /// is proposed again. The round ends on the first `Correct` verdict, when
    /// no candidate survives filtering, or when the oracle declines.
    ///
    /// # Errors
    ///
    /// Returns [`QuartetError::Lookup`](quartet_core::QuartetError::Lookup)
    /// if a pool item is unknown to the similarity source.
    pub fn match_group<O: Oracle + ?Sized>(
        &self,
        round_index: usize,
        pool: &[Item],
        history: &History,
        oracle: &mut O,
    ) -> Result<RoundReport> {
        let start = Instant::now();

        info!(
            event = "round_start",
            round = round_index as u64,
            pool_size = pool.len() as u64,
            group_size = self.group_size as u64,
        );

        let mut round = Round::new(round_index, self.group_size, pool.len(), history)
            .with_proposal_limit(self.proposal_limit);
        round.load_candidates(self.rank(pool)?);

        let mut abandoned = false;
        while let Some(proposal) = round.next_proposal() {
            debug!(
                event = "proposal",
                round = round_index as u64,
                attempt = proposal.attempt as u64,
                group = %proposal.group,
                score = %proposal.score,
            );

            let Some(verdict) = oracle.judge(&proposal) else {
                abandoned = true;
                break;
            };

            debug!(
                event = "verdict",
                round = round_index as u64,
                attempt = proposal.attempt as u64,
                verdict = %verdict,
            );

            if round.apply(verdict) == RoundState::Confirmed {
                break;
            }
        }

        let (confirmed, rejected, mut statistics) = round.finish();
        statistics.duration = start.elapsed();

        let outcome = match confirmed {
            Some(Candidate { group, score }) => RoundOutcome::Confirmed {
                group,
                score,
                rejected,
            },
            None if abandoned => RoundOutcome::Abandoned { rejected },
            None => RoundOutcome::Exhausted { rejected },
        };

        info!(
            event = "round_end",
            round = round_index as u64,
            outcome = outcome.label(),
            group = %outcome.group().cloned().unwrap_or_default(),
            proposals = statistics.proposals as u64,
            candidates = statistics.candidates_ranked as u64,
            pruned = statistics.pruned() as u64,
            duration_ms = statistics.duration.as_millis() as u64,
        );

        Ok(RoundReport {
            outcome,
            statistics,
        })
    }
}

#[cfg(test)]
#[path = "matcher_tests.rs"]
mod tests;
