//! Query helpers for battle decision making
//!
//! Utilities for analyzing type matchups, useful both inside the resolver
//! and in scoring layers built on top of the simulator.

mod matchup;

pub use matchup::{is_immune_to, is_weak_to_any, resistances, weaknesses};
