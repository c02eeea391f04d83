//! Ability records and lookup
//!
//! Ability *behavior* lives in the simulator's trigger handlers, keyed by
//! normalized id. The records here carry identity plus the two traits the
//! dispatcher itself needs: whether an attacker with the ability punches
//! through defensive abilities, and whether the ability shuts down every
//! other ability on the field.

use std::collections::HashMap;
use std::sync::LazyLock;

use crate::{normalize_id, DexError};

/// An ability record
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AbilityData {
    pub name: &'static str,
    /// Ignores the defender's ability while attacking (Mold Breaker line)
    pub breaks_mold: bool,
    /// Suppresses all other abilities while on the field (Neutralizing Gas)
    pub neutralizing: bool,
}

impl AbilityData {
    /// Whether this record is the unknown-ability fallback
    pub fn is_unknown(&self) -> bool {
        std::ptr::eq(self, &UNKNOWN_ABILITY)
    }
}

const fn ability(name: &'static str) -> AbilityData {
    AbilityData {
        name,
        breaks_mold: false,
        neutralizing: false,
    }
}

/// Fallback record for unrecognized ability identifiers: a no-op
pub static UNKNOWN_ABILITY: AbilityData = ability("Unknown Ability");

fn entries() -> Vec<AbilityData> {
    let mut list: Vec<AbilityData> = [
        // Pinch boosts
        "Blaze",
        "Torrent",
        "Overgrow",
        "Swarm",
        // Offense
        "Guts",
        "Huge Power",
        "Pure Power",
        "Technician",
        "Adaptability",
        "Tinted Lens",
        "Sheer Force",
        "Sniper",
        "Super Luck",
        "Skill Link",
        "Serene Grace",
        // Defense
        "Solid Rock",
        "Filter",
        "Multiscale",
        "Thick Fat",
        "Sturdy",
        "Shield Dust",
        "Magic Guard",
        "Unaware",
        "Infiltrator",
        "Rock Head",
        // Immunity / absorption
        "Levitate",
        "Volt Absorb",
        "Water Absorb",
        "Flash Fire",
        "Lightning Rod",
        "Sap Sipper",
        "Dry Skin",
        // Status guards
        "Limber",
        "Insomnia",
        "Vital Spirit",
        "Water Veil",
        "Immunity",
        "Own Tempo",
        "Oblivious",
        "Inner Focus",
        // Switch-in
        "Intimidate",
        "Drizzle",
        "Drought",
        "Sand Stream",
        "Snow Warning",
        "Electric Surge",
        "Grassy Surge",
        "Misty Surge",
        "Psychic Surge",
        // Contact reactions
        "Static",
        "Flame Body",
        "Poison Point",
        "Rough Skin",
        "Iron Barbs",
        "Effect Spore",
        "Aftermath",
        "Justified",
        "Anger Point",
        // End of turn
        "Speed Boost",
        "Shed Skin",
        "Hydration",
        "Rain Dish",
        "Ice Body",
        "Poison Heal",
        // Speed
        "Swift Swim",
        "Chlorophyll",
        "Sand Rush",
        "Slush Rush",
        "Quick Feet",
        // Accuracy
        "Compound Eyes",
        "No Guard",
        // Stat-drop guards
        "Clear Body",
        "White Smoke",
        "Contrary",
        // Priority
        "Prankster",
        "Gale Wings",
        // Misc
        "Synchronize",
        "Natural Cure",
        "Regenerator",
    ]
    .into_iter()
    .map(ability)
    .collect();

    for name in ["Mold Breaker", "Teravolt", "Turboblaze"] {
        list.push(AbilityData { breaks_mold: true, ..ability(name) });
    }
    list.push(AbilityData { neutralizing: true, ..ability("Neutralizing Gas") });
    list
}

static ABILITIES: LazyLock<HashMap<String, AbilityData>> = LazyLock::new(|| {
    entries()
        .into_iter()
        .map(|a| (normalize_id(a.name), a))
        .collect()
});

/// Look up an ability record; unknown identifiers get the inert fallback
pub fn ability_data(id: &str) -> &'static AbilityData {
    ABILITIES.get(&normalize_id(id)).unwrap_or(&UNKNOWN_ABILITY)
}

/// Strict lookup returning an error for unknown identifiers
pub fn try_ability_data(id: &str) -> Result<&'static AbilityData, DexError> {
    ABILITIES
        .get(&normalize_id(id))
        .ok_or_else(|| DexError::UnknownAbility(normalize_id(id)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_normalizes() {
        assert_eq!(ability_data("Huge Power").name, "Huge Power");
        assert_eq!(ability_data("hugepower").name, "Huge Power");
        assert_eq!(ability_data("HUGE-POWER").name, "Huge Power");
    }

    #[test]
    fn test_unknown_fallback() {
        let unknown = ability_data("Cosmic Luck");
        assert!(unknown.is_unknown());
        assert!(!unknown.breaks_mold);
        assert!(!unknown.neutralizing);

        assert!(try_ability_data("Cosmic Luck").is_err());
        assert!(try_ability_data("Intimidate").is_ok());
    }

    #[test]
    fn test_mold_breaker_line() {
        assert!(ability_data("Mold Breaker").breaks_mold);
        assert!(ability_data("Teravolt").breaks_mold);
        assert!(ability_data("Turboblaze").breaks_mold);
        assert!(!ability_data("Intimidate").breaks_mold);
    }

    #[test]
    fn test_neutralizing_gas() {
        assert!(ability_data("Neutralizing Gas").neutralizing);
        assert!(!ability_data("Mold Breaker").neutralizing);
    }
}
