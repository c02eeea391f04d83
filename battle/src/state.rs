//! Whole-battle state

use crate::types::{Combatant, FieldState, SideState};

/// Identifies one of the two sides
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SideId {
    A,
    B,
}

impl SideId {
    /// Both sides in canonical order
    pub const BOTH: [SideId; 2] = [SideId::A, SideId::B];

    /// The opposing side
    pub fn opponent(&self) -> SideId {
        match self {
            SideId::A => SideId::B,
            SideId::B => SideId::A,
        }
    }

    /// Array index for this side
    pub fn index(&self) -> usize {
        match self {
            SideId::A => 0,
            SideId::B => 1,
        }
    }
}

impl std::fmt::Display for SideId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SideId::A => write!(f, "A"),
            SideId::B => write!(f, "B"),
        }
    }
}

/// Terminal outcome of a battle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome {
    Win(SideId),
    Draw,
}

/// Canonical state of a battle: both sides plus the field.
///
/// Constructed once per battle. For branch simulation, [`BattleState::branch`]
/// deep-copies the whole state; branches never share mutable data, so a
/// hypothetical turn on a branch leaves the canonical state untouched.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleState {
    /// The two sides, indexed by [`SideId`]
    pub sides: [SideState; 2],

    /// Global field conditions
    pub field: FieldState,

    /// Current turn number (0 = not started)
    pub turn: u32,
}

impl BattleState {
    /// Create a battle from two rosters
    pub fn new(side_a: SideState, side_b: SideState) -> Self {
        Self {
            sides: [side_a, side_b],
            field: FieldState::new(),
            turn: 0,
        }
    }

    /// Get a side
    pub fn side(&self, id: SideId) -> &SideState {
        &self.sides[id.index()]
    }

    /// Get a side mutably
    pub fn side_mut(&mut self, id: SideId) -> &mut SideState {
        &mut self.sides[id.index()]
    }

    /// Get both sides mutably (caller side first)
    pub fn sides_mut(&mut self, id: SideId) -> (&mut SideState, &mut SideState) {
        let [a, b] = &mut self.sides;
        match id {
            SideId::A => (a, b),
            SideId::B => (b, a),
        }
    }

    /// Get a side's active combatant
    pub fn active(&self, id: SideId) -> &Combatant {
        self.side(id).active()
    }

    /// Get a side's active combatant mutably
    pub fn active_mut(&mut self, id: SideId) -> &mut Combatant {
        self.side_mut(id).active_mut()
    }

    /// Both actives mutably (caller side first)
    pub fn actives_mut(&mut self, id: SideId) -> (&mut Combatant, &mut Combatant) {
        let (own, other) = self.sides_mut(id);
        (own.active_mut(), other.active_mut())
    }

    /// Deep-copy this state for hypothetical simulation.
    /// The copy owns all of its data; mutating it never touches `self`.
    pub fn branch(&self) -> BattleState {
        self.clone()
    }

    /// Terminal outcome, if the battle has been decided
    pub fn outcome(&self) -> Option<Outcome> {
        let a_out = self.side(SideId::A).all_fainted();
        let b_out = self.side(SideId::B).all_fainted();
        match (a_out, b_out) {
            (true, true) => Some(Outcome::Draw),
            (true, false) => Some(Outcome::Win(SideId::B)),
            (false, true) => Some(Outcome::Win(SideId::A)),
            (false, false) => None,
        }
    }

    /// Check if the battle is still undecided
    pub fn is_live(&self) -> bool {
        self.outcome().is_none()
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Combatant, StatBlock, Type};

    fn member(species: &str) -> Combatant {
        Combatant::new(
            species,
            50,
            vec![Type::Water],
            StatBlock::new(70, 70, 70, 70, 70, 70),
            "Torrent",
        )
    }

    fn battle() -> BattleState {
        BattleState::new(
            SideState::new(vec![member("Aqua"), member("Brine")]),
            SideState::new(vec![member("Coral")]),
        )
    }

    #[test]
    fn test_side_id_opponent() {
        assert_eq!(SideId::A.opponent(), SideId::B);
        assert_eq!(SideId::B.opponent(), SideId::A);
        assert_eq!(SideId::A.index(), 0);
        assert_eq!(SideId::B.index(), 1);
    }

    #[test]
    fn test_accessors() {
        let mut state = battle();
        assert_eq!(state.active(SideId::A).species, "Aqua");
        assert_eq!(state.active(SideId::B).species, "Coral");

        state.active_mut(SideId::A).take_damage(10);
        assert_eq!(
            state.active(SideId::A).hp(),
            state.active(SideId::A).max_hp - 10
        );
    }

    #[test]
    fn test_actives_mut_order() {
        let mut state = battle();
        let (own, other) = state.actives_mut(SideId::B);
        assert_eq!(own.species, "Coral");
        assert_eq!(other.species, "Aqua");
    }

    #[test]
    fn test_branch_is_independent() {
        let state = battle();
        let mut branch = state.branch();

        branch.active_mut(SideId::A).take_damage(40);
        branch.turn = 7;

        assert_eq!(state.active(SideId::A).hp(), state.active(SideId::A).max_hp);
        assert_eq!(state.turn, 0);
    }

    #[test]
    fn test_outcome() {
        let mut state = battle();
        assert!(state.is_live());

        // Side B's only member faints
        state.active_mut(SideId::B).set_hp(0);
        assert_eq!(state.outcome(), Some(Outcome::Win(SideId::A)));

        // Everyone down is a draw
        for c in &mut state.side_mut(SideId::A).roster {
            c.set_hp(0);
        }
        assert_eq!(state.outcome(), Some(Outcome::Draw));
    }
}
