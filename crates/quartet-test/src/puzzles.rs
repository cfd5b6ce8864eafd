//! Ready-made puzzles.
//!
//! Similarities are dyadic fractions so pair sums are exact and score ties
//! are real ties.

use quartet_core::{Group, Item};

use crate::pairs::PairTable;

/// The eight-word pool used by the fixtures below, in input order.
pub const FRUIT_AND_VEHICLES: [&str; 8] = [
    "apple", "banana", "car", "truck", "dog", "cat", "bike", "train",
];

/// Builds items from words, keeping their order.
pub fn items(words: &[&str]) -> Vec<Item> {
    words.iter().copied().map(Item::from).collect()
}

/// Builds a canonical group from words.
pub fn group(words: &[&str]) -> Group {
    words.iter().copied().map(Item::from).collect()
}

/// Similarities under which `{apple, banana, dog, cat}` scores highest.
///
/// - within `{apple, banana, dog, cat}`: 0.75
/// - within `{car, truck, bike, train}`: 0.5
/// - across: 0.125
pub fn fruit_and_vehicles() -> PairTable {
    PairTable::new(0.125)
        .with_cluster(&["apple", "banana", "dog", "cat"], 0.75)
        .with_cluster(&["car", "truck", "bike", "train"], 0.5)
}

/// Similarities under which `{apple, banana, car, dog}` scores highest,
/// although the true groups are `{apple, banana, cat, dog}` and
/// `{car, truck, bike, train}`.
///
/// Ranking over [`FRUIT_AND_VEHICLES`] starts:
///
/// 1. `{apple, banana, car, dog}` (0.6875)
/// 2. `{apple, banana, car, cat}`, `{apple, car, cat, dog}`,
///    `{banana, car, cat, dog}` (0.5417 each)
/// 3. `{apple, banana, cat, dog}`, `{bike, car, train, truck}` (0.5 each)
pub fn near_miss() -> PairTable {
    PairTable::new(0.0)
        .with_cluster(&["apple", "banana", "cat", "dog"], 0.5)
        .with_cluster(&["car", "truck", "bike", "train"], 0.5)
        .with_pair("car", "apple", 0.875)
        .with_pair("car", "banana", 0.875)
        .with_pair("car", "dog", 0.875)
}
