//! Battle state and domain types for fray.
//!
//! This crate provides the shared type system used by the turn simulator
//! and by anything built on top of it (search layers, scoring heuristics).
//!
//! # Overview
//!
//! `fray-battle` sits at the bottom of the fray workspace:
//!
//! ```text
//! fray-battle (domain types + state) ← THIS CRATE
//!        │
//!        ├─> fray-dex (rule data keyed on these types)
//!        └─> fray-sim (turn resolution)
//! ```
//!
//! # Main Types
//!
//! ## Domain Types
//! - [`Type`] - Creature types with effectiveness chart
//! - [`Status`] - Primary status conditions (Burn, Freeze, etc.)
//! - [`Volatile`] - Volatile conditions (Confusion, Taunt, etc.) with
//!   per-condition [`VolatileState`] countdowns
//! - [`StatBlock`], [`StatStages`] - Base stats and stage modifiers (-6 to +6)
//! - [`Weather`], [`Terrain`], [`SideCondition`] - Field conditions
//! - [`Combatant`] - Full combatant battle state
//! - [`SideState`] - One party's roster and side conditions
//! - [`FieldState`] - Global field conditions with durations
//!
//! ## Battle State
//! - [`BattleState`] - Both sides plus the field; [`BattleState::branch`]
//!   deep-copies for hypothetical simulation
//!
//! # Invariants
//!
//! The state types enforce the simulator's core invariants at the mutation
//! boundary: stat stages clamp to `[-6, 6]`, HP clamps to `[0, max]`, a
//! combatant holds at most one primary status, hazard layers never exceed
//! their per-condition cap, and the weather/terrain slots hold at most one
//! condition each.
//!
//! # Example Usage
//!
//! ```ignore
//! use fray_battle::{BattleState, Combatant, MoveSlot, SideId, SideState, StatBlock, Type};
//!
//! let attacker = Combatant::new("Emberlynx", 50, vec![Type::Fire],
//!     StatBlock::new(78, 84, 78, 109, 85, 100), "Blaze")
//!     .with_moves(vec![MoveSlot::new("Flamethrower", 24)]);
//! let defender = Combatant::new("Verdantoad", 50, vec![Type::Grass],
//!     StatBlock::new(80, 82, 83, 100, 100, 80), "Overgrow");
//!
//! let state = BattleState::new(
//!     SideState::new(vec![attacker]),
//!     SideState::new(vec![defender]),
//! );
//!
//! // Branch before exploring a hypothetical line
//! let hypothetical = state.branch();
//! assert!(state.is_live());
//! # let _ = hypothetical;
//! ```

pub mod query;
pub mod state;
pub mod types;

// Re-export main types at crate root for convenience
pub use state::{BattleState, Outcome, SideId};
pub use types::{
    Combatant, Effectiveness, FieldState, MoveSlot, SideCondition, SideConditionState, SideState,
    Stat, StatBlock, StatStages, Status, Terrain, TerrainState, Type, Volatile, VolatileState,
    Weather, WeatherState, TYPE_CHART,
};
