//! Status conditions (volatile and non-volatile)

/// Non-volatile status conditions (persist through switching).
/// A combatant holds at most one at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Status {
    Burn,
    Freeze,
    Paralysis,
    Poison,
    BadPoison, // Toxic
    Sleep,
}

impl Status {
    /// Get display name
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Burn => "Burn",
            Status::Freeze => "Freeze",
            Status::Paralysis => "Paralysis",
            Status::Poison => "Poison",
            Status::BadPoison => "Toxic",
            Status::Sleep => "Sleep",
        }
    }

    /// Log phrasing for the moment the status lands
    pub fn applied_text(&self) -> &'static str {
        match self {
            Status::Burn => "was burned",
            Status::Freeze => "was frozen solid",
            Status::Paralysis => "is paralyzed! It may be unable to move",
            Status::Poison => "was poisoned",
            Status::BadPoison => "was badly poisoned",
            Status::Sleep => "fell asleep",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Volatile conditions (cleared on switching). Multiple may be held at once;
/// each is keyed in the combatant's volatile map with its own [`VolatileState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Volatile {
    // Mental effects
    Confusion,
    Taunt,
    Encore,
    Disable,
    Torment,
    Infatuation,
    HealBlock,

    // Damage over time / delayed
    LeechSeed,
    Curse,
    Nightmare,
    PerishSong,
    Yawn,

    // Protection
    Protect,
    Endure,
    Substitute,

    // Movement restriction
    Trapped,
    PartialTrap,

    // Turn-based states
    Flinch,
    Recharging,
    Charging,
    LockedMove,

    // Crit / targeting
    FocusEnergy,
    LockOn,

    // Grounding / rooting
    MagnetRise,
    Ingrain,
    AquaRing,

    // Ability-related
    FlashFire,

    // Misc
    DestinyBond,
    DefenseCurl,
    Minimize,
}

impl Volatile {
    /// Conditions that last exactly one turn and are wiped in turn cleanup
    pub fn is_single_turn(&self) -> bool {
        matches!(
            self,
            Volatile::Flinch | Volatile::Protect | Volatile::Endure | Volatile::DestinyBond
        )
    }

    /// Get display name
    pub fn as_str(&self) -> &'static str {
        match self {
            Volatile::Confusion => "Confusion",
            Volatile::Taunt => "Taunt",
            Volatile::Encore => "Encore",
            Volatile::Disable => "Disable",
            Volatile::Torment => "Torment",
            Volatile::Infatuation => "Infatuation",
            Volatile::HealBlock => "Heal Block",
            Volatile::LeechSeed => "Leech Seed",
            Volatile::Curse => "Curse",
            Volatile::Nightmare => "Nightmare",
            Volatile::PerishSong => "Perish Song",
            Volatile::Yawn => "Yawn",
            Volatile::Protect => "Protect",
            Volatile::Endure => "Endure",
            Volatile::Substitute => "Substitute",
            Volatile::Trapped => "Trapped",
            Volatile::PartialTrap => "Partial Trap",
            Volatile::Flinch => "Flinch",
            Volatile::Recharging => "Recharging",
            Volatile::Charging => "Charging",
            Volatile::LockedMove => "Locked Move",
            Volatile::FocusEnergy => "Focus Energy",
            Volatile::LockOn => "Lock-On",
            Volatile::MagnetRise => "Magnet Rise",
            Volatile::Ingrain => "Ingrain",
            Volatile::AquaRing => "Aqua Ring",
            Volatile::FlashFire => "Flash Fire",
            Volatile::DestinyBond => "Destiny Bond",
            Volatile::DefenseCurl => "Defense Curl",
            Volatile::Minimize => "Minimize",
        }
    }
}

impl std::fmt::Display for Volatile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Per-condition bookkeeping for an active volatile.
///
/// `turns_left` is `None` for conditions with no countdown (Substitute,
/// Ingrain). `linked_move` names the move an Encore/Disable/Charging entry
/// is bound to. `hp` backs a Substitute's remaining pool.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VolatileState {
    pub turns_left: Option<u8>,
    pub linked_move: Option<String>,
    pub hp: u16,
}

impl VolatileState {
    /// A condition with no countdown
    pub fn permanent() -> Self {
        Self::default()
    }

    /// A condition that expires after `turns` end-of-turn ticks
    pub fn for_turns(turns: u8) -> Self {
        Self {
            turns_left: Some(turns),
            ..Self::default()
        }
    }

    /// A condition bound to a specific move (Encore, Disable, Charging)
    pub fn with_move(move_name: impl Into<String>, turns: Option<u8>) -> Self {
        Self {
            turns_left: turns,
            linked_move: Some(move_name.into()),
            hp: 0,
        }
    }

    /// A substitute with its own HP pool
    pub fn substitute(hp: u16) -> Self {
        Self {
            turns_left: None,
            linked_move: None,
            hp,
        }
    }

    /// Decrement the countdown; returns true when the condition expires.
    /// Conditions without a countdown never expire here.
    pub fn tick(&mut self) -> bool {
        match self.turns_left.as_mut() {
            Some(turns) => {
                *turns = turns.saturating_sub(1);
                *turns == 0
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_display() {
        assert_eq!(Status::Burn.as_str(), "Burn");
        assert_eq!(Status::BadPoison.as_str(), "Toxic");
        assert_eq!(format!("{}", Status::Sleep), "Sleep");
    }

    #[test]
    fn test_volatile_single_turn() {
        assert!(Volatile::Flinch.is_single_turn());
        assert!(Volatile::Protect.is_single_turn());
        assert!(Volatile::Endure.is_single_turn());
        assert!(!Volatile::Confusion.is_single_turn());
        assert!(!Volatile::Substitute.is_single_turn());
    }

    #[test]
    fn test_volatile_state_for_turns() {
        let mut state = VolatileState::for_turns(3);
        assert!(!state.tick());
        assert!(!state.tick());
        assert!(state.tick()); // Expires on the third tick
        assert_eq!(state.turns_left, Some(0));
    }

    #[test]
    fn test_volatile_state_permanent_never_expires() {
        let mut state = VolatileState::permanent();
        for _ in 0..10 {
            assert!(!state.tick());
        }
    }

    #[test]
    fn test_volatile_state_with_move() {
        let state = VolatileState::with_move("Thunderbolt", Some(3));
        assert_eq!(state.linked_move.as_deref(), Some("Thunderbolt"));
        assert_eq!(state.turns_left, Some(3));
    }

    #[test]
    fn test_volatile_state_substitute() {
        let state = VolatileState::substitute(75);
        assert_eq!(state.hp, 75);
        assert!(state.turns_left.is_none());
    }
}
