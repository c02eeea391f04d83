//! Deterministic single-turn battle resolution for fray.
//!
//! This crate is the turn engine: given a [`BattleState`](fray_battle::BattleState),
//! two actions, and a seeded randomness source, it resolves one full turn
//! and returns the mutated state plus an ordered plain-text event log. It is
//! built for an external decision/search layer: everything is synchronous,
//! free of I/O, and reproducible, and hypothetical lines are explored by
//! deep-copying the state before each turn.
//!
//! # Overview
//!
//! ```text
//! fray-battle (domain types + state)
//!        │
//! fray-dex (rule records: moves, abilities, items)
//!        │
//!        ▼
//! fray-sim (turn resolution) ← THIS CRATE
//! ```
//!
//! # Main Types
//!
//! - [`Action`] - one side's chosen action, parsed from `"Move: <name>"` /
//!   `"Switch: <identifier>"` tokens
//! - [`valid_actions`] - the pure legality query drivers must draw from
//! - [`BattleRng`] - the injectable, seedable randomness source
//! - [`apply_turn`] - the turn resolver
//! - [`Simulator`] - seeded front door with legality validation
//! - [`DamageModel`] / [`StandardModel`] - the pluggable damage formula
//! - [`TurnLog`] - ordered descriptive log lines
//!
//! # Example Usage
//!
//! ```ignore
//! use fray_sim::{Action, Simulator};
//!
//! let mut sim = Simulator::new(0xf4a1);
//! let mut branch = state.branch();
//! let outcome = sim.step(&mut branch, &Action::mv("Surf"), &Action::mv("Protect"))?;
//! for line in outcome.log.lines() {
//!     println!("{line}");
//! }
//! ```

pub mod actions;
pub mod damage;
pub mod effects;
pub mod log;
pub mod mechanics;
pub mod order;
pub mod pipeline;
pub mod residual;
pub mod rng;
pub mod triggers;
pub mod turn;

// Re-export the driver-facing surface at the crate root
pub use actions::{valid_actions, Action, ActionError};
pub use damage::{DamageModel, DamageOutcome, StandardModel};
pub use log::TurnLog;
pub use order::{decide_order, TurnOrder};
pub use rng::BattleRng;
pub use turn::{apply_turn, apply_turn_with_model, Simulator, TurnOutcome};
