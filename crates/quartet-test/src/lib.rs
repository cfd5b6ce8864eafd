//! Shared test fixtures for quartet crates.
//!
//! This crate provides similarity sources and oracles for testing.
//! It depends only on `quartet-core` so every other crate can take it as a
//! dev-dependency without cycles.
//!
//! - [`pairs`] - Explicit pair-table similarity source
//! - [`oracle`] - Scripted and ground-truth oracles that record proposals
//! - [`puzzles`] - Ready-made puzzles
//!
//! # Usage
//!
//! Add as a dev-dependency in your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! quartet-test = { workspace = true }
//! ```
//!
//! Then import the fixtures you need:
//!
//! ```ignore
//! use quartet_test::{fruit_and_vehicles, ScriptedOracle, TruthOracle};
//! ```

pub mod oracle;
pub mod pairs;
pub mod puzzles;

pub use oracle::{ScriptedOracle, TruthOracle};
pub use pairs::PairTable;
pub use puzzles::{fruit_and_vehicles, group, items, near_miss, FRUIT_AND_VEHICLES};
