//! The oracle seam: whoever confirms or refutes proposed groups.

use crate::feedback::Verdict;
use crate::group::Group;
use crate::score::SimilarityScore;

/// A candidate group presented to the oracle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Proposal {
    /// The proposed members.
    pub group: Group,
    /// The group's aggregate similarity.
    pub score: SimilarityScore,
    /// Index of the round this proposal belongs to (0-based).
    pub round: usize,
    /// Position of this proposal within its round (1-based).
    pub attempt: usize,
}

/// Source of ground-truth verdicts about proposed groups.
///
/// The exchange is blocking: the matcher does not propose another group until
/// `judge` returns. Returning `None` means the oracle declined to answer
/// (e.g. its input was closed); the current round then ends without a result.
///
/// Implementations own their input validation. Unrecognized answers are
/// retried inside `judge` and never reach the matcher.
pub trait Oracle {
    fn judge(&mut self, proposal: &Proposal) -> Option<Verdict>;
}

impl<O: Oracle + ?Sized> Oracle for &mut O {
    fn judge(&mut self, proposal: &Proposal) -> Option<Verdict> {
        (**self).judge(proposal)
    }
}

impl<O: Oracle + ?Sized> Oracle for Box<O> {
    fn judge(&mut self, proposal: &Proposal) -> Option<Verdict> {
        (**self).judge(proposal)
    }
}
