//! Per-move bespoke effects
//!
//! The hundreds of named exceptions in the move pool resolve through a
//! registry mapping normalized move identity to a handler function, built
//! once and consulted with a single lookup per move. Handlers are grouped
//! by concern: field-shaping moves, hazards and their removal, volatile
//! and disruption moves, and the one-off mechanics.
//!
//! A handler runs after the uniform parts of the pipeline (damage,
//! secondaries, data-driven stat changes); it mutates state through
//! [`EffectCtx`] and may mark the move as failed.

use std::collections::HashMap;
use std::sync::LazyLock;

use fray_battle::{BattleState, SideId};
use fray_dex::{normalize_id, MoveData};

use crate::log::TurnLog;
use crate::rng::BattleRng;

mod field_moves;
mod hazards;
mod status_moves;
mod unique;

/// Mutable context handed to a move's bespoke handler
pub struct EffectCtx<'a> {
    pub state: &'a mut BattleState,
    /// Side that used the move
    pub user: SideId,
    pub mov: &'static MoveData,
    pub rng: &'a mut BattleRng,
    pub log: &'a mut TurnLog,
    /// Total damage the move dealt this use (0 for status moves)
    pub damage_dealt: u16,
    /// Set by the handler when the move does nothing ("But it failed!")
    pub failed: bool,
}

impl EffectCtx<'_> {
    /// The opposing side
    pub fn target(&self) -> SideId {
        self.user.opponent()
    }

    /// Mark the move as failed
    pub fn fail(&mut self) {
        self.failed = true;
    }

    pub(crate) fn user_name(&self) -> String {
        self.state.active(self.user).species.clone()
    }

    pub(crate) fn target_name(&self) -> String {
        self.state.active(self.target()).species.clone()
    }
}

/// A bespoke move handler
pub type EffectFn = fn(&mut EffectCtx);

static REGISTRY: LazyLock<HashMap<&'static str, EffectFn>> = LazyLock::new(|| {
    let mut map: HashMap<&'static str, EffectFn> = HashMap::new();
    field_moves::register(&mut map);
    hazards::register(&mut map);
    status_moves::register(&mut map);
    unique::register(&mut map);
    map
});

/// Look up the bespoke handler for a move, if it has one
pub fn effect_for(move_name: &str) -> Option<EffectFn> {
    REGISTRY.get(normalize_id(move_name).as_str()).copied()
}
