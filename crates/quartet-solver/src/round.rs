//! One matching round as an explicit state machine.
//!
//! ```text
//! Ranking ──load_candidates──▶ Proposing ──next_proposal──▶ AwaitingFeedback
//!                                  ▲                              │
//!                                  └──── OneAway/FarAway/Incorrect┤
//!                                                                 ├─ Correct ──▶ Confirmed
//!              Proposing ──(no surviving candidate)──▶ Exhausted  │
//! ```
//!
//! Transitions are pure: the round never talks to an oracle or a scorer
//! itself, so protocols can be driven step by step in tests.

use std::collections::HashSet;

use tracing::trace;

use quartet_core::{Group, Proposal, Verdict};

use crate::candidates::Candidate;
use crate::history::{History, PruneReason, RoundConstraints};
use crate::statistics::RoundStatistics;

/// Where a round is in its protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundState {
    /// Waiting for ranked candidates.
    Ranking,
    /// Looking for the next candidate that survives every filter.
    Proposing,
    /// A proposal is out; waiting for its verdict.
    AwaitingFeedback,
    /// A proposal was confirmed. Terminal.
    Confirmed,
    /// No surviving candidate is left. Terminal.
    Exhausted,
}

impl RoundState {
    pub fn is_terminal(self) -> bool {
        matches!(self, RoundState::Confirmed | RoundState::Exhausted)
    }
}

/// State of one matching round.
#[derive(Debug)]
pub struct Round<'h> {
    index: usize,
    group_size: usize,
    history: &'h History,
    state: RoundState,
    candidates: Vec<Candidate>,
    cursor: usize,
    pending: Option<Proposal>,
    confirmed: Option<Candidate>,
    constraints: RoundConstraints,
    rejected: Vec<Group>,
    rejected_index: HashSet<Group>,
    proposal_limit: Option<usize>,
    stats: RoundStatistics,
}

impl<'h> Round<'h> {
    /// Starts round `index` over a pool of `pool_size` items.
    ///
    /// `history` holds the groups rejected in earlier rounds of the same pool.
    pub fn new(index: usize, group_size: usize, pool_size: usize, history: &'h History) -> Self {
        Self {
            index,
            group_size,
            history,
            state: RoundState::Ranking,
            candidates: Vec::new(),
            cursor: 0,
            pending: None,
            confirmed: None,
            constraints: RoundConstraints::new(),
            rejected: Vec::new(),
            rejected_index: HashSet::new(),
            proposal_limit: None,
            stats: RoundStatistics::new(index, pool_size),
        }
    }

    /// Caps the number of proposals; reaching the cap exhausts the round.
    pub fn with_proposal_limit(mut self, limit: Option<usize>) -> Self {
        self.proposal_limit = limit;
        self
    }

    /// Supplies candidates ranked best first. `Ranking → Proposing`.
    ///
    /// Ignored outside the `Ranking` state.
    pub fn load_candidates(&mut self, candidates: Vec<Candidate>) {
        if self.state != RoundState::Ranking {
            return;
        }
        self.stats.candidates_ranked = candidates.len();
        self.candidates = candidates;
        self.state = RoundState::Proposing;
    }

    /// Why `group` may not be proposed now, if anything.
    pub fn prune_reason(&self, group: &Group) -> Option<PruneReason> {
        if self.history.contains(group) || self.rejected_index.contains(group) {
            return Some(PruneReason::AlreadyRejected);
        }
        self.constraints
            .violation(group, self.group_size)
            .map(PruneReason::from)
    }

    /// Advances to the next surviving candidate. `Proposing → AwaitingFeedback`,
    /// or `Proposing → Exhausted` when none is left.
    ///
    /// While awaiting feedback this returns the outstanding proposal again.
    /// Returns `None` in every other state.
    pub fn next_proposal(&mut self) -> Option<Proposal> {
        match self.state {
            RoundState::AwaitingFeedback => return self.pending.clone(),
            RoundState::Proposing => {}
            _ => return None,
        }

        if self
            .proposal_limit
            .is_some_and(|limit| self.stats.proposals >= limit)
        {
            self.state = RoundState::Exhausted;
            return None;
        }

        while self.cursor < self.candidates.len() {
            let position = self.cursor;
            self.cursor += 1;

            let group = &self.candidates[position].group;
            if let Some(reason) = self.prune_reason(group) {
                trace!(
                    event = "pruned",
                    round = self.index as u64,
                    group = %group,
                    reason = %reason,
                );
                self.stats.record_prune(reason);
                continue;
            }

            let candidate = &self.candidates[position];
            self.stats.proposals += 1;
            let proposal = Proposal {
                group: candidate.group.clone(),
                score: candidate.score,
                round: self.index,
                attempt: self.stats.proposals,
            };
            self.pending = Some(proposal.clone());
            self.state = RoundState::AwaitingFeedback;
            return Some(proposal);
        }

        self.state = RoundState::Exhausted;
        None
    }

    /// Applies the oracle's verdict on the outstanding proposal.
    ///
    /// `Correct` confirms the round; any other verdict rejects the proposal,
    /// records its severity (if any) and returns to `Proposing`. Ignored
    /// unless a proposal is outstanding. Returns the new state.
    pub fn apply(&mut self, verdict: Verdict) -> RoundState {
        if self.state != RoundState::AwaitingFeedback {
            return self.state;
        }
        let Some(proposal) = self.pending.take() else {
            return self.state;
        };

        if verdict.is_correct() {
            self.confirmed = Some(Candidate {
                group: proposal.group,
                score: proposal.score,
            });
            self.state = RoundState::Confirmed;
            return self.state;
        }

        if let Some(severity) = verdict.severity() {
            self.constraints.record(proposal.group.clone(), severity);
        }
        self.rejected_index.insert(proposal.group.clone());
        self.rejected.push(proposal.group);
        self.state = RoundState::Proposing;
        self.state
    }

    #[inline]
    pub fn state(&self) -> RoundState {
        self.state
    }

    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    /// The confirmed candidate, once the round is `Confirmed`.
    pub fn confirmed(&self) -> Option<&Candidate> {
        self.confirmed.as_ref()
    }

    /// Groups rejected in this round, in proposal order.
    pub fn rejected(&self) -> &[Group] {
        &self.rejected
    }

    /// Severity feedback recorded in this round.
    pub fn constraints(&self) -> &RoundConstraints {
        &self.constraints
    }

    pub fn statistics(&self) -> &RoundStatistics {
        &self.stats
    }

    /// Consumes the round, returning its confirmed candidate, rejected groups
    /// and statistics.
    pub fn finish(self) -> (Option<Candidate>, Vec<Group>, RoundStatistics) {
        (self.confirmed, self.rejected, self.stats)
    }
}

#[cfg(test)]
#[path = "round_tests.rs"]
mod tests;
