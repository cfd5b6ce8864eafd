//! Oracles for tests.
//!
//! Both oracles record every proposal they are shown, so tests can assert
//! on the exact proposal sequence.

use std::collections::VecDeque;

use quartet_core::{Group, Oracle, Proposal, Verdict};

/// Answers from a fixed script, then declines once the script runs out.
#[derive(Debug, Clone, Default)]
pub struct ScriptedOracle {
    script: VecDeque<Verdict>,
    proposals: Vec<Proposal>,
}

impl ScriptedOracle {
    pub fn new(script: impl IntoIterator<Item = Verdict>) -> Self {
        Self {
            script: script.into_iter().collect(),
            proposals: Vec::new(),
        }
    }

    /// Every proposal shown so far, in order.
    pub fn proposals(&self) -> &[Proposal] {
        &self.proposals
    }

    /// The groups of every proposal shown so far, in order.
    pub fn proposed_groups(&self) -> Vec<Group> {
        self.proposals.iter().map(|p| p.group.clone()).collect()
    }

    /// Verdicts not consumed yet.
    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl Oracle for ScriptedOracle {
    fn judge(&mut self, proposal: &Proposal) -> Option<Verdict> {
        self.proposals.push(proposal.clone());
        self.script.pop_front()
    }
}

/// Answers truthfully from a known partition.
///
/// A proposal equal to a true group is `Correct`; one sharing all but one
/// member with some true group is `OneAway`; anything else is `FarAway`.
#[derive(Debug, Clone)]
pub struct TruthOracle {
    truth: Vec<Group>,
    proposals: Vec<Proposal>,
}

impl TruthOracle {
    pub fn new(truth: impl IntoIterator<Item = Group>) -> Self {
        Self {
            truth: truth.into_iter().collect(),
            proposals: Vec::new(),
        }
    }

    pub fn proposals(&self) -> &[Proposal] {
        &self.proposals
    }

    pub fn proposed_groups(&self) -> Vec<Group> {
        self.proposals.iter().map(|p| p.group.clone()).collect()
    }

    /// The verdict this oracle gives for `group`.
    pub fn verdict_for(&self, group: &Group) -> Verdict {
        let best = self
            .truth
            .iter()
            .map(|t| t.overlap(group))
            .max()
            .unwrap_or(0);
        if best == group.len() {
            Verdict::Correct
        } else if best + 1 == group.len() {
            Verdict::OneAway
        } else {
            Verdict::FarAway
        }
    }
}

impl Oracle for TruthOracle {
    fn judge(&mut self, proposal: &Proposal) -> Option<Verdict> {
        self.proposals.push(proposal.clone());
        Some(self.verdict_for(&proposal.group))
    }
}
