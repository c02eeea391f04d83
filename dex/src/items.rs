//! Held-item records and lookup
//!
//! As with abilities, item *behavior* lives in the simulator's handlers
//! keyed by normalized id; the records carry identity and the consumption
//! classification the resolver needs.

use std::collections::HashMap;
use std::sync::LazyLock;

use crate::{normalize_id, DexError};

/// A held-item record
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ItemData {
    pub name: &'static str,
    /// Berries are single-use and eaten by their holder
    pub is_berry: bool,
    /// Choice items boost one stat and lock the holder into its first move
    pub is_choice: bool,
    /// Consumed on activation (berries, Focus Sash, Power Herb, Air Balloon)
    pub consumable: bool,
}

impl ItemData {
    /// Whether this record is the unknown-item fallback
    pub fn is_unknown(&self) -> bool {
        std::ptr::eq(self, &UNKNOWN_ITEM)
    }
}

const fn item(name: &'static str) -> ItemData {
    ItemData {
        name,
        is_berry: false,
        is_choice: false,
        consumable: false,
    }
}

const fn berry(name: &'static str) -> ItemData {
    ItemData {
        name,
        is_berry: true,
        is_choice: false,
        consumable: true,
    }
}

const fn choice(name: &'static str) -> ItemData {
    ItemData {
        name,
        is_berry: false,
        is_choice: true,
        consumable: false,
    }
}

const fn consumable(name: &'static str) -> ItemData {
    ItemData {
        name,
        is_berry: false,
        is_choice: false,
        consumable: true,
    }
}

/// Fallback record for unrecognized item identifiers: a no-op
pub static UNKNOWN_ITEM: ItemData = item("Unknown Item");

fn entries() -> Vec<ItemData> {
    vec![
        // Residual healing
        item("Leftovers"),
        item("Black Sludge"),
        // Offense
        item("Life Orb"),
        item("Expert Belt"),
        item("Muscle Band"),
        item("Wise Glasses"),
        choice("Choice Band"),
        choice("Choice Specs"),
        choice("Choice Scarf"),
        // Survival
        consumable("Focus Sash"),
        item("Assault Vest"),
        item("Rocky Helmet"),
        consumable("Air Balloon"),
        // Berries
        berry("Sitrus Berry"),
        berry("Oran Berry"),
        berry("Lum Berry"),
        berry("Chesto Berry"),
        // Duration extenders
        item("Light Clay"),
        item("Heat Rock"),
        item("Damp Rock"),
        item("Smooth Rock"),
        item("Icy Rock"),
        item("Terrain Extender"),
        // Procs
        item("Quick Claw"),
        item("King's Rock"),
        item("Razor Claw"),
        item("Scope Lens"),
        item("Wide Lens"),
        item("Bright Powder"),
        consumable("Power Herb"),
        item("Shell Bell"),
        // Self-status orbs
        item("Toxic Orb"),
        item("Flame Orb"),
    ]
}

static ITEMS: LazyLock<HashMap<String, ItemData>> = LazyLock::new(|| {
    entries()
        .into_iter()
        .map(|i| (normalize_id(i.name), i))
        .collect()
});

/// Look up an item record; unknown identifiers get the inert fallback
pub fn item_data(id: &str) -> &'static ItemData {
    ITEMS.get(&normalize_id(id)).unwrap_or(&UNKNOWN_ITEM)
}

/// Strict lookup returning an error for unknown identifiers
pub fn try_item_data(id: &str) -> Result<&'static ItemData, DexError> {
    ITEMS
        .get(&normalize_id(id))
        .ok_or_else(|| DexError::UnknownItem(normalize_id(id)))
}
