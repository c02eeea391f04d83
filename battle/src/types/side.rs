//! Side (one party's roster and conditions)

use std::collections::HashMap;

use super::combatant::Combatant;
use super::conditions::{SideCondition, SideConditionState};

/// One party's side of the battle: the roster, which member is active,
/// and the side-wide conditions (hazards, screens, Tailwind...).
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SideState {
    /// Roster in party order
    pub roster: Vec<Combatant>,

    /// Index of the active combatant
    pub active: usize,

    /// Side conditions with layer counts and countdowns
    pub conditions: HashMap<SideCondition, SideConditionState>,

    /// Last move used by this side (for Encore-style memory)
    pub last_move: Option<String>,
}

impl SideState {
    /// Create a side from a roster; the first member starts active
    pub fn new(roster: Vec<Combatant>) -> Self {
        Self {
            roster,
            active: 0,
            conditions: HashMap::new(),
            last_move: None,
        }
    }

    /// Get the active combatant
    pub fn active(&self) -> &Combatant {
        &self.roster[self.active]
    }

    /// Get the active combatant mutably
    pub fn active_mut(&mut self) -> &mut Combatant {
        &mut self.roster[self.active]
    }

    /// Iterate over bench combatants (not active, not fainted) with their indices
    pub fn bench(&self) -> impl Iterator<Item = (usize, &Combatant)> {
        let active = self.active;
        self.roster
            .iter()
            .enumerate()
            .filter(move |(idx, c)| *idx != active && c.is_alive())
    }

    /// Count non-fainted roster members
    pub fn alive_count(&self) -> usize {
        self.roster.iter().filter(|c| c.is_alive()).count()
    }

    /// Whether any bench member can come in
    pub fn has_replacement(&self) -> bool {
        self.bench().next().is_some()
    }

    /// Check if every roster member has fainted
    pub fn all_fainted(&self) -> bool {
        !self.roster.is_empty() && self.roster.iter().all(|c| c.is_fainted())
    }

    /// Find a roster member by species name
    pub fn find_member(&self, name: &str) -> Option<usize> {
        self.roster.iter().position(|c| c.species == name)
    }

    /// Promote a roster member to active. The outgoing member's combat
    /// state is reset. Returns false for an out-of-range or fainted target.
    pub fn switch_to(&mut self, index: usize) -> bool {
        let Some(incoming) = self.roster.get(index) else {
            return false;
        };
        if incoming.is_fainted() || index == self.active {
            return false;
        }
        self.roster[self.active].on_switch_out();
        self.active = index;
        self.last_move = None;
        true
    }

    // === Side conditions ===

    /// Check if side has a condition
    pub fn has_condition(&self, cond: SideCondition) -> bool {
        self.conditions.contains_key(&cond)
    }

    /// Get layers for a condition (0 if not present)
    pub fn condition_layers(&self, cond: SideCondition) -> u8 {
        self.conditions.get(&cond).map_or(0, |s| s.layers)
    }

    /// Add a side condition, or a layer to a stackable one.
    /// Returns false when already at the layer cap.
    pub fn add_condition(&mut self, cond: SideCondition) -> bool {
        if let Some(state) = self.conditions.get_mut(&cond) {
            state.add_layer(cond)
        } else {
            self.conditions.insert(cond, SideConditionState::new(cond));
            true
        }
    }

    /// Add a side condition with an explicit duration (e.g. Light Clay screens)
    pub fn add_condition_with_duration(&mut self, cond: SideCondition, turns: u8) -> bool {
        if self.conditions.contains_key(&cond) {
            return false;
        }
        self.conditions
            .insert(cond, SideConditionState::with_duration(turns));
        true
    }

    /// Remove a side condition
    pub fn remove_condition(&mut self, cond: SideCondition) -> bool {
        self.conditions.remove(&cond).is_some()
    }

    /// Remove all entry hazards; returns the removed kinds
    pub fn clear_hazards(&mut self) -> Vec<SideCondition> {
        let hazards: Vec<SideCondition> = self
            .conditions
            .keys()
            .copied()
            .filter(|c| c.is_hazard())
            .collect();
        for h in &hazards {
            self.conditions.remove(h);
        }
        hazards
    }

    /// Check if any hazards are set
    pub fn has_hazards(&self) -> bool {
        self.conditions.keys().any(|c| c.is_hazard())
    }

    /// Check if any screens are active
    pub fn has_screens(&self) -> bool {
        self.conditions.keys().any(|c| c.is_screen())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::creature_type::Type;
    use crate::types::stats::StatBlock;

    fn member(species: &str) -> Combatant {
        Combatant::new(
            species,
            50,
            vec![Type::Normal],
            StatBlock::new(80, 80, 80, 80, 80, 80),
            "Limber",
        )
    }

    fn side() -> SideState {
        SideState::new(vec![member("Aron"), member("Brill"), member("Corvid")])
    }

    #[test]
    fn test_new_side_first_active() {
        let side = side();
        assert_eq!(side.active, 0);
        assert_eq!(side.active().species, "Aron");
        assert_eq!(side.alive_count(), 3);
    }

    #[test]
    fn test_bench_excludes_active_and_fainted() {
        let mut side = side();
        side.roster[2].set_hp(0);

        let bench: Vec<_> = side.bench().map(|(i, _)| i).collect();
        assert_eq!(bench, vec![1]);
        assert!(side.has_replacement());
    }

    #[test]
    fn test_switch_to() {
        let mut side = side();
        side.active_mut().stages.boost(crate::types::stats::Stat::Atk, 2);

        assert!(side.switch_to(1));
        assert_eq!(side.active().species, "Brill");
        // Outgoing member's stages were reset
        assert!(side.roster[0].stages.is_clear());
    }

    #[test]
    fn test_switch_to_rejects_fainted_and_self() {
        let mut side = side();
        side.roster[1].set_hp(0);

        assert!(!side.switch_to(1)); // Fainted
        assert!(!side.switch_to(0)); // Already active
        assert!(!side.switch_to(9)); // Out of range
    }

    #[test]
    fn test_all_fainted() {
        let mut side = side();
        assert!(!side.all_fainted());
        for c in &mut side.roster {
            c.set_hp(0);
        }
        assert!(side.all_fainted());
        assert!(!side.has_replacement());
    }

    #[test]
    fn test_condition_layer_cap() {
        let mut side = side();

        assert!(side.add_condition(SideCondition::Spikes));
        assert!(side.add_condition(SideCondition::Spikes));
        assert!(side.add_condition(SideCondition::Spikes));
        assert!(!side.add_condition(SideCondition::Spikes)); // Cap of 3
        assert_eq!(side.condition_layers(SideCondition::Spikes), 3);

        assert!(side.add_condition(SideCondition::StealthRock));
        assert!(!side.add_condition(SideCondition::StealthRock)); // Cap of 1
    }

    #[test]
    fn test_clear_hazards_leaves_screens() {
        let mut side = side();
        side.add_condition(SideCondition::Spikes);
        side.add_condition(SideCondition::StealthRock);
        side.add_condition(SideCondition::Reflect);

        let removed = side.clear_hazards();
        assert_eq!(removed.len(), 2);
        assert!(!side.has_hazards());
        assert!(side.has_screens());
    }

    #[test]
    fn test_condition_with_duration() {
        let mut side = side();
        assert!(side.add_condition_with_duration(SideCondition::Reflect, 8));
        assert_eq!(
            side.conditions[&SideCondition::Reflect].turns_left,
            Some(8)
        );
        assert!(!side.add_condition_with_duration(SideCondition::Reflect, 8));
    }

    #[test]
    fn test_find_member() {
        let side = side();
        assert_eq!(side.find_member("Brill"), Some(1));
        assert_eq!(side.find_member("Zed"), None);
    }
}
