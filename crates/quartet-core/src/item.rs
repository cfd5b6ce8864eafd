//! Items: normalized vocabulary entries.

use std::fmt;

/// An opaque, normalized word drawn from the similarity source's vocabulary.
///
/// Items are created once by the [`Normalizer`](crate::Normalizer) and are
/// immutable afterwards.
///
/// # Examples
///
/// ```
/// use quartet_core::Item;
///
/// let item = Item::new("ice_cream");
/// assert_eq!(item.as_str(), "ice_cream");
/// assert_eq!(item.label(), "ICE CREAM");
/// ```
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Item(String);

impl Item {
    /// Wraps an already-normalized vocabulary entry.
    pub fn new(word: impl Into<String>) -> Self {
        Item(word.into())
    }

    /// Returns the vocabulary key.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Human-readable form: uppercase, with `_` and `-` shown as spaces.
    pub fn label(&self) -> String {
        self.0.to_uppercase().replace(['_', '-'], " ")
    }
}

impl AsRef<str> for Item {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Item {
    fn from(word: &str) -> Self {
        Item::new(word)
    }
}

impl From<String> for Item {
    fn from(word: String) -> Self {
        Item(word)
    }
}

impl fmt::Debug for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Item({})", self.0)
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
