//! Item normalization: raw user tokens to vocabulary entries.
//!
//! A raw line is first folded to a canonical form (trimmed, lowercased,
//! apostrophes removed, spaces and hyphens turned into underscores). The
//! normalizer then tries, in order, the canonical form, its capitalized form
//! and its all-uppercase form against the vocabulary.

use std::collections::HashSet;

use crate::error::{QuartetError, Result};
use crate::item::Item;
use crate::source::SimilaritySource;

/// Folds a raw token into its canonical lowercase form.
///
/// # Examples
///
/// ```
/// use quartet_core::canonical_form;
///
/// assert_eq!(canonical_form("  Ice Cream "), "ice_cream");
/// assert_eq!(canonical_form("Rock-'n'-Roll"), "rock_n_roll");
/// ```
pub fn canonical_form(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .replace(' ', "_")
        .replace('\'', "")
        .replace('-', "_")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Maps raw tokens to items recognized by a similarity source.
#[derive(Debug)]
pub struct Normalizer<'a, S: ?Sized> {
    source: &'a S,
    group_size: usize,
}

impl<'a, S: SimilaritySource + ?Sized> Normalizer<'a, S> {
    /// Creates a normalizer validating against `source`'s vocabulary.
    pub fn new(source: &'a S, group_size: usize) -> Self {
        Self { source, group_size }
    }

    /// Spellings tried for a canonical form, in order.
    fn spellings(canonical: &str) -> [String; 3] {
        [
            canonical.to_string(),
            capitalize(canonical),
            canonical.to_uppercase(),
        ]
    }

    /// Normalizes one raw line.
    ///
    /// Returns `Ok(None)` for blank lines.
    ///
    /// # Errors
    ///
    /// Returns [`QuartetError::NotFound`] if no spelling is in the vocabulary.
    pub fn normalize_token(&self, raw: &str) -> Result<Option<Item>> {
        let canonical = canonical_form(raw);
        if canonical.is_empty() {
            return Ok(None);
        }

        Self::spellings(&canonical)
            .into_iter()
            .find(|spelling| self.source.contains(spelling))
            .map(|spelling| Some(Item::new(spelling)))
            .ok_or(QuartetError::NotFound { token: canonical })
    }

    /// Normalizes every line and validates the resulting pool.
    ///
    /// # Errors
    ///
    /// Fails on the first unknown token, on a repeated item, or when the
    /// number of items is not a positive multiple of the group size.
    pub fn normalize_lines<I>(&self, lines: I) -> Result<Vec<Item>>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut items = Vec::new();
        let mut seen = HashSet::new();
        for line in lines {
            if let Some(item) = self.normalize_token(line.as_ref())? {
                if !seen.insert(item.clone()) {
                    return Err(QuartetError::Duplicate {
                        item: item.as_str().to_string(),
                    });
                }
                items.push(item);
            }
        }

        self.validate_count(items.len())?;
        Ok(items)
    }

    /// Checks that `count` items can be split into whole groups.
    pub fn validate_count(&self, count: usize) -> Result<()> {
        if count == 0 || self.group_size == 0 || count % self.group_size != 0 {
            return Err(QuartetError::Validation {
                count,
                group_size: self.group_size,
            });
        }
        Ok(())
    }
}
