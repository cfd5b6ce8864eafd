//! Canonical fixed-size groups of items.

use std::fmt;

use crate::item::Item;

/// An unordered selection of distinct items in canonical (sorted) form.
///
/// Two groups with the same members compare and hash equal regardless of the
/// order the members were supplied in, so groups can be stored in and looked
/// up from history collections directly.
///
/// The empty group is the "no match" sentinel returned when a round runs out
/// of candidates.
///
/// # Examples
///
/// ```
/// use quartet_core::{Group, Item};
///
/// let a = Group::new(["dog", "cat", "apple", "banana"].map(Item::from));
/// let b = Group::new(["apple", "banana", "cat", "dog"].map(Item::from));
/// assert_eq!(a, b);
/// assert_eq!(a.len(), 4);
///
/// let c = Group::new(["apple", "banana", "cat", "car"].map(Item::from));
/// assert_eq!(a.overlap(&c), 3);
/// ```
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Group {
    members: Vec<Item>,
}

impl Group {
    /// Creates a group from its members, sorting them into canonical order.
    pub fn new(members: impl IntoIterator<Item = Item>) -> Self {
        let mut members: Vec<Item> = members.into_iter().collect();
        members.sort_unstable();
        Group { members }
    }

    /// The empty sentinel group.
    pub const fn empty() -> Self {
        Group {
            members: Vec::new(),
        }
    }

    /// Returns true for the empty sentinel.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Members in canonical order.
    #[inline]
    pub fn members(&self) -> &[Item] {
        &self.members
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Item> {
        self.members.iter()
    }

    pub fn contains(&self, item: &Item) -> bool {
        self.members.binary_search(item).is_ok()
    }

    /// Number of members shared with `other`.
    ///
    /// Both member lists are sorted, so this is a single merge pass.
    pub fn overlap(&self, other: &Group) -> usize {
        let (mut i, mut j, mut shared) = (0, 0, 0);
        while i < self.members.len() && j < other.members.len() {
            match self.members[i].cmp(&other.members[j]) {
                std::cmp::Ordering::Equal => {
                    shared += 1;
                    i += 1;
                    j += 1;
                }
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
            }
        }
        shared
    }

    /// Human-readable labels of the members, in canonical order.
    pub fn labels(&self) -> Vec<String> {
        self.members.iter().map(Item::label).collect()
    }
}

impl<'a> IntoIterator for &'a Group {
    type Item = &'a Item;
    type IntoIter = std::slice::Iter<'a, Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.iter()
    }
}

impl FromIterator<Item> for Group {
    fn from_iter<I: IntoIterator<Item = Item>>(iter: I) -> Self {
        Group::new(iter)
    }
}

impl fmt::Debug for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set()
            .entries(self.members.iter().map(Item::as_str))
            .finish()
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.labels().join(", "))
    }
}
