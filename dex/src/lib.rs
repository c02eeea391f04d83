//! Static rule data for fray: move, ability, and item records.
//!
//! Rule records are keyed by normalized identifiers: lowercase with spaces,
//! dashes, apostrophes, and periods stripped, so `"Thunder Wave"`,
//! `"thunder-wave"`, and `"thunderwave"` all resolve to the same record.
//!
//! # Lookup contract
//!
//! The primary lookups ([`move_data`], [`ability_data`], [`item_data`]) never
//! fail: an unrecognized identifier resolves to an inert fallback record
//! (a 0-power typeless-in-effect move, a no-op ability, a no-op item). This
//! keeps simulation over partially-known rosters from ever aborting on a
//! data miss. Use [`MoveData::is_unknown`] (and friends) to detect the
//! fallback, or the `try_*` variants to get a [`DexError`] instead.

use thiserror::Error;

pub mod abilities;
pub mod items;
pub mod moves;

pub use abilities::{ability_data, try_ability_data, AbilityData};
pub use items::{item_data, try_item_data, ItemData};
pub use moves::{
    move_data, try_move_data, FixedDamage, MoveCategory, MoveData, MultiHit, SecondaryEffect,
    SecondaryKind, STRUGGLE, UNKNOWN_MOVE,
};

/// Errors from the strict (`try_*`) lookup variants
#[derive(Error, Debug, PartialEq, Eq)]
pub enum DexError {
    #[error("Unknown move: {0}")]
    UnknownMove(String),

    #[error("Unknown ability: {0}")]
    UnknownAbility(String),

    #[error("Unknown item: {0}")]
    UnknownItem(String),
}

/// Normalize an identifier for table lookup: lowercase, with spaces,
/// dashes, apostrophes, and periods removed.
pub fn normalize_id(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, ' ' | '-' | '\'' | '.'))
        .flat_map(|c| c.to_lowercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_id() {
        assert_eq!(normalize_id("Thunder Wave"), "thunderwave");
        assert_eq!(normalize_id("thunder-wave"), "thunderwave");
        assert_eq!(normalize_id("King's Shield"), "kingsshield");
        assert_eq!(normalize_id("U-turn"), "uturn");
        assert_eq!(normalize_id("Mt. Doom"), "mtdoom");
        assert_eq!(normalize_id("already"), "already");
    }

    #[test]
    fn test_dex_error_display() {
        let err = DexError::UnknownMove("splashdance".to_string());
        assert_eq!(err.to_string(), "Unknown move: splashdance");
    }
}
