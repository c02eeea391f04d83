//! Combatant state

use std::collections::HashMap;

use super::creature_type::Type;
use super::stats::{StatBlock, StatStages};
use super::status::{Status, Volatile, VolatileState};

/// One move slot with its remaining PP
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveSlot {
    pub name: String,
    pub pp: u8,
    pub max_pp: u8,
}

impl MoveSlot {
    /// Create a slot with full PP
    pub fn new(name: impl Into<String>, max_pp: u8) -> Self {
        Self {
            name: name.into(),
            pp: max_pp,
            max_pp,
        }
    }

    /// Whether the slot has PP remaining
    pub fn has_pp(&self) -> bool {
        self.pp > 0
    }

    /// Spend one PP; returns false if the slot was already empty
    pub fn use_pp(&mut self) -> bool {
        if self.pp == 0 {
            return false;
        }
        self.pp -= 1;
        true
    }
}

/// A single combatant: identity, stats, resource pool, statuses, loadout,
/// and the transient flags the turn resolver reads and writes.
///
/// HP mutations go through [`Combatant::take_damage`] / [`Combatant::heal`] /
/// [`Combatant::set_hp`], which clamp to `[0, max_hp]`. Stat stages clamp in
/// [`StatStages`]. Exactly one primary status may be held at a time;
/// [`Combatant::set_status`] refuses a second.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Combatant {
    /// Species name
    pub species: String,

    /// Level (1-100)
    pub level: u8,

    /// Species base stats
    pub base: StatBlock,

    /// Stats computed from base stats at this level
    pub stats: StatBlock,

    // === HP ===
    /// Current HP
    hp: u16,

    /// Maximum HP
    pub max_hp: u16,

    // === Status ===
    /// Primary status condition (at most one)
    pub status: Option<Status>,

    /// Remaining sleep turns while asleep
    pub sleep_turns: u8,

    /// Escalation counter while badly poisoned (damage = n/16 of max HP)
    pub toxic_counter: u8,

    // === Combat state (cleared on switch) ===
    /// Stat stage modifiers
    pub stages: StatStages,

    /// Active volatile conditions with their countdowns
    pub volatiles: HashMap<Volatile, VolatileState>,

    // === Types ===
    /// Original types from species
    pub base_types: Vec<Type>,

    /// Current types (may change during battle)
    pub types: Vec<Type>,

    // === Loadout ===
    /// Ability name
    pub ability: String,

    /// Held item name, if any
    pub item: Option<String>,

    /// Whether the held item has been consumed this battle
    pub item_consumed: bool,

    /// Move slots
    pub moves: Vec<MoveSlot>,

    // === Turn-resolver flags ===
    /// Must be replaced before a normal turn proceeds
    pub must_switch: bool,

    /// Move currently being charged (two-turn moves)
    pub charging_move: Option<String>,

    /// Move this combatant is choice-locked into
    pub choice_lock: Option<String>,

    /// Last move this combatant used
    pub last_move: Option<String>,

    /// Consecutive successful protection uses
    pub protect_streak: u8,

    /// Turns this combatant has been active since switching in
    pub active_turns: u16,
}

impl Combatant {
    /// Create a combatant with stats computed at its level and full HP
    pub fn new(
        species: impl Into<String>,
        level: u8,
        types: Vec<Type>,
        base: StatBlock,
        ability: impl Into<String>,
    ) -> Self {
        let stats = base.at_level(level);
        Self {
            species: species.into(),
            level,
            base,
            stats,
            hp: stats.hp,
            max_hp: stats.hp,
            status: None,
            sleep_turns: 0,
            toxic_counter: 0,
            stages: StatStages::new(),
            volatiles: HashMap::new(),
            base_types: types.clone(),
            types,
            ability: ability.into(),
            item: None,
            item_consumed: false,
            moves: Vec::new(),
            must_switch: false,
            charging_move: None,
            choice_lock: None,
            last_move: None,
            protect_streak: 0,
            active_turns: 0,
        }
    }

    /// Set the held item (builder style)
    pub fn with_item(mut self, item: impl Into<String>) -> Self {
        self.item = Some(item.into());
        self
    }

    /// Set the move slots (builder style); PP values come from the caller
    pub fn with_moves(mut self, moves: Vec<MoveSlot>) -> Self {
        self.moves = moves;
        self
    }

    // === HP ===

    /// Current HP
    pub fn hp(&self) -> u16 {
        self.hp
    }

    /// Get HP as percentage (0-100)
    pub fn hp_percent(&self) -> u32 {
        if self.max_hp == 0 {
            return 0;
        }
        (self.hp as u32 * 100) / self.max_hp as u32
    }

    /// Set HP directly, clamped to `[0, max_hp]`
    pub fn set_hp(&mut self, hp: u16) {
        self.hp = hp.min(self.max_hp);
    }

    /// Apply damage to the HP pool; returns the amount actually lost
    pub fn take_damage(&mut self, amount: u16) -> u16 {
        let dealt = amount.min(self.hp);
        self.hp -= dealt;
        dealt
    }

    /// Restore HP; returns the amount actually recovered
    pub fn heal(&mut self, amount: u16) -> u16 {
        let healed = amount.min(self.max_hp - self.hp);
        self.hp += healed;
        healed
    }

    /// Check if this combatant has fainted
    pub fn is_fainted(&self) -> bool {
        self.hp == 0
    }

    /// Check if this combatant can still fight
    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    // === Status ===

    /// Apply a primary status. Fails if one is already held or the
    /// combatant has fainted; the status slot is mutually exclusive.
    pub fn set_status(&mut self, status: Status) -> bool {
        if self.status.is_some() || self.is_fainted() {
            return false;
        }
        self.status = Some(status);
        match status {
            Status::BadPoison => self.toxic_counter = 1,
            Status::Sleep => {} // Sleep turns rolled by the resolver
            _ => {}
        }
        true
    }

    /// Remove the primary status and its counters
    pub fn cure_status(&mut self) -> Option<Status> {
        self.sleep_turns = 0;
        self.toxic_counter = 0;
        self.status.take()
    }

    // === Volatiles ===

    /// Check for a volatile condition
    pub fn has_volatile(&self, v: Volatile) -> bool {
        self.volatiles.contains_key(&v)
    }

    /// Add a volatile condition; returns false if it was already present
    pub fn add_volatile(&mut self, v: Volatile, state: VolatileState) -> bool {
        if self.volatiles.contains_key(&v) {
            return false;
        }
        self.volatiles.insert(v, state);
        true
    }

    /// Remove a volatile condition
    pub fn remove_volatile(&mut self, v: Volatile) -> bool {
        self.volatiles.remove(&v).is_some()
    }

    /// Get the state of a volatile condition
    pub fn volatile(&self, v: Volatile) -> Option<&VolatileState> {
        self.volatiles.get(&v)
    }

    /// Get the state of a volatile condition mutably
    pub fn volatile_mut(&mut self, v: Volatile) -> Option<&mut VolatileState> {
        self.volatiles.get_mut(&v)
    }

    // === Moves ===

    /// Find a move slot by name
    pub fn move_slot(&self, name: &str) -> Option<&MoveSlot> {
        self.moves.iter().find(|m| m.name == name)
    }

    /// Find a move slot by name mutably
    pub fn move_slot_mut(&mut self, name: &str) -> Option<&mut MoveSlot> {
        self.moves.iter_mut().find(|m| m.name == name)
    }

    /// Whether any move slot still has PP
    pub fn has_any_pp(&self) -> bool {
        self.moves.iter().any(|m| m.has_pp())
    }

    // === Types ===

    /// Check if the combatant currently has a type
    pub fn has_type(&self, t: Type) -> bool {
        self.types.contains(&t)
    }

    // === Switching ===

    /// Called when this combatant switches out: combat state resets,
    /// primary status persists.
    pub fn on_switch_out(&mut self) {
        self.stages.clear();
        self.volatiles.clear();
        self.types = self.base_types.clone();
        self.toxic_counter = if self.status == Some(Status::BadPoison) { 1 } else { 0 };
        self.must_switch = false;
        self.charging_move = None;
        self.choice_lock = None;
        self.last_move = None;
        self.protect_streak = 0;
        self.active_turns = 0;
    }
}
