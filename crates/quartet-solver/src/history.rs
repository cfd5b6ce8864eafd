//! Rejected-group history and per-round constraints.
//!
//! [`History`] lives as long as the pool and prevents any group from being
//! proposed twice. [`RoundConstraints`] holds the severity feedback of the
//! current round only and is discarded once the round ends.

use std::collections::HashSet;
use std::fmt;

use quartet_core::{Constraint, Group, Severity};

/// Ordered record of every rejected group.
///
/// # Examples
///
/// ```
/// use quartet_core::{Group, Item};
/// use quartet_solver::History;
///
/// let mut history = History::new();
/// let g = Group::new(["a", "b", "c", "d"].map(Item::from));
/// assert!(history.push(g.clone()));
/// assert!(!history.push(g.clone()));
/// assert!(history.contains(&g));
/// assert_eq!(history.len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct History {
    rejected: Vec<Group>,
    index: HashSet<Group>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a rejected group. Returns false if it was already recorded.
    pub fn push(&mut self, group: Group) -> bool {
        if self.index.contains(&group) {
            return false;
        }
        self.index.insert(group.clone());
        self.rejected.push(group);
        true
    }

    /// Returns true if an identical group has been rejected before.
    pub fn contains(&self, group: &Group) -> bool {
        self.index.contains(group)
    }

    /// Rejected groups in the order they were recorded.
    pub fn rejected(&self) -> &[Group] {
        &self.rejected
    }

    pub fn len(&self) -> usize {
        self.rejected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rejected.is_empty()
    }
}

impl Extend<Group> for History {
    fn extend<I: IntoIterator<Item = Group>>(&mut self, iter: I) {
        for group in iter {
            self.push(group);
        }
    }
}

impl FromIterator<Group> for History {
    fn from_iter<I: IntoIterator<Item = Group>>(iter: I) -> Self {
        let mut history = History::new();
        history.extend(iter);
        history
    }
}

/// Why a candidate was skipped without being proposed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PruneReason {
    /// The identical group was rejected before.
    AlreadyRejected,
    /// The candidate differs by more than one member from a one-away group.
    OneAway,
    /// The candidate is one member away from a far-away group.
    FarAway,
}

impl fmt::Display for PruneReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PruneReason::AlreadyRejected => write!(f, "already rejected"),
            PruneReason::OneAway => write!(f, "inconsistent with one-away feedback"),
            PruneReason::FarAway => write!(f, "inconsistent with far-away feedback"),
        }
    }
}

impl From<Severity> for PruneReason {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::OneAway => PruneReason::OneAway,
            Severity::FarAway => PruneReason::FarAway,
        }
    }
}

/// Severity feedback accumulated within one round.
#[derive(Debug, Clone, Default)]
pub struct RoundConstraints {
    constraints: Vec<Constraint>,
}

impl RoundConstraints {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, group: Group, severity: Severity) {
        self.constraints.push(Constraint::new(group, severity));
    }

    /// All recorded constraints, oldest first.
    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    /// Groups recorded with the given severity.
    pub fn groups(&self, severity: Severity) -> impl Iterator<Item = &Group> {
        self.constraints
            .iter()
            .filter(move |c| c.severity == severity)
            .map(|c| &c.group)
    }

    /// The first constraint `candidate` violates, if any.
    ///
    /// One-away constraints are checked before far-away ones.
    pub fn violation(&self, candidate: &Group, group_size: usize) -> Option<Severity> {
        [Severity::OneAway, Severity::FarAway]
            .into_iter()
            .find(|&severity| {
                self.constraints
                    .iter()
                    .filter(|c| c.severity == severity)
                    .any(|c| !c.admits(candidate, group_size))
            })
    }

    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    pub fn len(&self) -> usize {
        self.constraints.len()
    }
}
