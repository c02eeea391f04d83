//! Action encoding and legality
//!
//! Actions travel between the driver and the simulator in two textual forms,
//! `"Move: <name>"` and `"Switch: <identifier>"`. The driver must only
//! submit actions produced by [`valid_actions`]; the parser rejects
//! malformed tokens, and the [`crate::Simulator`] front door rejects tokens
//! that parse but are not currently legal.

use std::fmt;
use std::str::FromStr;

use fray_battle::{BattleState, SideId, Type, Volatile};
use fray_dex::move_data;
use thiserror::Error;

/// One side's chosen action for a turn
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Action {
    /// Use a move by name
    Move(String),
    /// Switch to the named roster member
    Switch(String),
}

impl Action {
    /// Convenience constructor for a move action
    pub fn mv(name: impl Into<String>) -> Self {
        Action::Move(name.into())
    }

    /// Convenience constructor for a switch action
    pub fn switch(name: impl Into<String>) -> Self {
        Action::Switch(name.into())
    }

    /// Whether this is a switch action
    pub fn is_switch(&self) -> bool {
        matches!(self, Action::Switch(_))
    }
}

/// Errors from parsing or validating an action token
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ActionError {
    #[error("Malformed action token: {0:?}")]
    Malformed(String),

    #[error("Empty action name in token: {0:?}")]
    EmptyName(String),

    #[error("Illegal action for side {side}: {action}")]
    Illegal { side: String, action: String },
}

impl FromStr for Action {
    type Err = ActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (kind, name) = s
            .split_once(':')
            .ok_or_else(|| ActionError::Malformed(s.to_string()))?;
        let name = name.trim();
        if name.is_empty() {
            return Err(ActionError::EmptyName(s.to_string()));
        }
        match kind.trim() {
            "Move" => Ok(Action::Move(name.to_string())),
            "Switch" => Ok(Action::Switch(name.to_string())),
            _ => Err(ActionError::Malformed(s.to_string())),
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Move(name) => write!(f, "Move: {name}"),
            Action::Switch(name) => write!(f, "Switch: {name}"),
        }
    }
}

/// Enumerate the legal actions for a side.
///
/// Pure: the same unmutated state always yields the same ordered list.
/// Moves come first in slot order, then switches in roster order. A fainted
/// active with no replacement yields an empty list.
pub fn valid_actions(state: &BattleState, side: SideId) -> Vec<Action> {
    let side_state = state.side(side);
    let active = side_state.active();

    let switches = || -> Vec<Action> {
        side_state
            .bench()
            .map(|(_, c)| Action::switch(c.species.clone()))
            .collect()
    };

    // Forced replacement: only switches are legal
    if active.is_fainted() || active.must_switch {
        return switches();
    }

    let mut actions = Vec::new();

    // Mid-charge, the only legal action is finishing the move
    if let Some(charging) = &active.charging_move {
        return vec![Action::mv(charging.clone())];
    }

    // A rampaging combatant repeats its locked move
    if let Some(locked) = active
        .volatile(Volatile::LockedMove)
        .and_then(|s| s.linked_move.clone())
    {
        return vec![Action::mv(locked)];
    }

    let encored = active
        .volatile(Volatile::Encore)
        .and_then(|s| s.linked_move.clone());
    let disabled = active
        .volatile(Volatile::Disable)
        .and_then(|s| s.linked_move.clone());
    let taunted = active.has_volatile(Volatile::Taunt);
    let heal_blocked = active.has_volatile(Volatile::HealBlock);
    let tormented = active.has_volatile(Volatile::Torment);

    for slot in &active.moves {
        if !slot.has_pp() {
            continue;
        }
        if let Some(lock) = &active.choice_lock {
            if &slot.name != lock {
                continue;
            }
        }
        if let Some(encore) = &encored {
            if &slot.name != encore {
                continue;
            }
        }
        if disabled.as_deref() == Some(slot.name.as_str()) {
            continue;
        }
        let data = move_data(&slot.name);
        if taunted && !data.is_damaging() {
            continue;
        }
        if heal_blocked && data.is_healing() {
            continue;
        }
        if tormented && active.last_move.as_deref() == Some(slot.name.as_str()) {
            continue;
        }
        actions.push(Action::mv(slot.name.clone()));
    }

    // Everything filtered out: Struggle is always available
    if actions.is_empty() {
        actions.push(Action::mv("Struggle"));
    }

    // Trapped combatants cannot switch; Ghost-types always can
    let trapped = (active.has_volatile(Volatile::Trapped)
        || active.has_volatile(Volatile::PartialTrap)
        || active.has_volatile(Volatile::Ingrain))
        && !active.has_type(Type::Ghost);
    if !trapped {
        actions.extend(switches());
    }

    actions
}
