//! Oracle verdicts and the negative-feedback constraints derived from them.
//!
//! A rejected proposal may carry a severity telling how far it was from a
//! true group. Each severity becomes a [`Constraint`] that later candidates of
//! the same round must satisfy:
//!
//! - **OneAway**: exactly one member is wrong, so the true group shares
//!   `k - 1` members with the rejected one. Only candidates with overlap
//!   `>= k - 1` remain possible.
//! - **FarAway**: two or more members are wrong, so the true group shares at
//!   most `k - 2` members. Candidates with overlap `>= k - 1` are impossible.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::group::Group;

/// The oracle's answer to one proposed group.
///
/// # Examples
///
/// ```
/// use quartet_core::Verdict;
///
/// assert_eq!("y".parse::<Verdict>().unwrap(), Verdict::Correct);
/// assert_eq!(" 2+ ".parse::<Verdict>().unwrap(), Verdict::FarAway);
/// assert!("maybe".parse::<Verdict>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Verdict {
    /// The proposal is a true group.
    Correct,
    /// Exactly one member does not belong.
    OneAway,
    /// Two or more members do not belong.
    FarAway,
    /// Wrong, with no indication of distance.
    Incorrect,
}

impl Verdict {
    /// All verdicts, in prompt order.
    pub const ALL: [Verdict; 4] = [
        Verdict::Correct,
        Verdict::OneAway,
        Verdict::FarAway,
        Verdict::Incorrect,
    ];

    /// The token an oracle types for this verdict.
    pub const fn token(self) -> &'static str {
        match self {
            Verdict::Correct => "y",
            Verdict::OneAway => "1",
            Verdict::FarAway => "2+",
            Verdict::Incorrect => "n",
        }
    }

    /// Constraint severity carried by a rejection, if any.
    pub const fn severity(self) -> Option<Severity> {
        match self {
            Verdict::OneAway => Some(Severity::OneAway),
            Verdict::FarAway => Some(Severity::FarAway),
            Verdict::Correct | Verdict::Incorrect => None,
        }
    }

    #[inline]
    pub const fn is_correct(self) -> bool {
        matches!(self, Verdict::Correct)
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Correct => write!(f, "correct"),
            Verdict::OneAway => write!(f, "one away"),
            Verdict::FarAway => write!(f, "two or more away"),
            Verdict::Incorrect => write!(f, "incorrect"),
        }
    }
}

/// Unrecognized verdict text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unrecognized verdict '{0}'")]
pub struct VerdictParseError(pub String);

impl FromStr for Verdict {
    type Err = VerdictParseError;

    /// Parses a verdict token, ignoring surrounding whitespace and case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim().to_lowercase();
        Verdict::ALL
            .into_iter()
            .find(|v| v.token() == token)
            .ok_or_else(|| VerdictParseError(s.trim().to_string()))
    }
}

/// Severity tag of a rejected group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Severity {
    OneAway,
    FarAway,
}

/// Negative feedback about one rejected group.
///
/// # Examples
///
/// ```
/// use quartet_core::{Constraint, Group, Item, Severity};
///
/// let rejected = Group::new(["apple", "banana", "car", "dog"].map(Item::from));
/// let one_away = Constraint::new(rejected.clone(), Severity::OneAway);
/// let far_away = Constraint::new(rejected, Severity::FarAway);
///
/// let three_shared = Group::new(["apple", "banana", "cat", "dog"].map(Item::from));
/// let two_shared = Group::new(["apple", "banana", "cat", "bike"].map(Item::from));
///
/// assert!(one_away.admits(&three_shared, 4));
/// assert!(!one_away.admits(&two_shared, 4));
/// assert!(!far_away.admits(&three_shared, 4));
/// assert!(far_away.admits(&two_shared, 4));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Constraint {
    /// The rejected group this feedback is about.
    pub group: Group,
    /// How far the rejected group was from a true group.
    pub severity: Severity,
}

impl Constraint {
    pub fn new(group: Group, severity: Severity) -> Self {
        Self { group, severity }
    }

    /// Returns true if `candidate` can still be a true group under this feedback.
    pub fn admits(&self, candidate: &Group, group_size: usize) -> bool {
        let near = candidate.overlap(&self.group) >= group_size.saturating_sub(1);
        match self.severity {
            Severity::OneAway => near,
            Severity::FarAway => !near,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("Y".parse::<Verdict>(), Ok(Verdict::Correct));
        assert_eq!("N\n".parse::<Verdict>(), Ok(Verdict::Incorrect));
        assert_eq!("1".parse::<Verdict>(), Ok(Verdict::OneAway));
    }

    #[test]
    fn test_parse_rejects_near_misses() {
        for text in ["", "yes", "2", "no", "1 away"] {
            assert!(text.parse::<Verdict>().is_err(), "{text:?} should not parse");
        }
    }

    #[test]
    fn test_severity() {
        assert_eq!(Verdict::OneAway.severity(), Some(Severity::OneAway));
        assert_eq!(Verdict::FarAway.severity(), Some(Severity::FarAway));
        assert_eq!(Verdict::Incorrect.severity(), None);
        assert_eq!(Verdict::Correct.severity(), None);
    }
}
