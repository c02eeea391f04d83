//! Global field state

use super::conditions::{Terrain, Weather};

/// An occupied weather slot with its remaining duration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeatherState {
    pub kind: Weather,
    pub turns_left: u8,
}

/// An occupied terrain slot with its remaining duration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TerrainState {
    pub kind: Terrain,
    pub turns_left: u8,
}

/// Global field state affecting both sides.
///
/// Weather and terrain each occupy a single slot; setting a new one replaces
/// whatever was there. Room effects are plain turn counters (0 = inactive).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FieldState {
    /// Current weather with remaining duration
    pub weather: Option<WeatherState>,

    /// Current terrain with remaining duration
    pub terrain: Option<TerrainState>,

    /// Trick Room turns remaining (slower combatants act first while > 0)
    pub trick_room_turns: u8,

    /// Gravity turns remaining (grounds everything, boosts accuracy while > 0)
    pub gravity_turns: u8,
}

impl FieldState {
    /// Create a new empty field state
    pub fn new() -> Self {
        Self::default()
    }

    /// Active weather kind, if any
    pub fn weather(&self) -> Option<Weather> {
        self.weather.map(|w| w.kind)
    }

    /// Active terrain kind, if any
    pub fn terrain(&self) -> Option<Terrain> {
        self.terrain.map(|t| t.kind)
    }

    /// Set weather, replacing any existing weather.
    /// Returns false (and leaves the slot alone) if that weather is already up.
    pub fn set_weather(&mut self, kind: Weather, turns: u8) -> bool {
        if self.weather() == Some(kind) {
            return false;
        }
        self.weather = Some(WeatherState { kind, turns_left: turns });
        true
    }

    /// Clear the weather slot
    pub fn clear_weather(&mut self) {
        self.weather = None;
    }

    /// Set terrain, replacing any existing terrain.
    /// Returns false if that terrain is already up.
    pub fn set_terrain(&mut self, kind: Terrain, turns: u8) -> bool {
        if self.terrain() == Some(kind) {
            return false;
        }
        self.terrain = Some(TerrainState { kind, turns_left: turns });
        true
    }

    /// Clear the terrain slot
    pub fn clear_terrain(&mut self) {
        self.terrain = None;
    }

    /// Whether Trick Room is active
    pub fn trick_room(&self) -> bool {
        self.trick_room_turns > 0
    }

    /// Whether Gravity is active
    pub fn gravity(&self) -> bool {
        self.gravity_turns > 0
    }

    /// Decrement the weather countdown; returns the weather that just ended
    pub fn tick_weather(&mut self) -> Option<Weather> {
        if let Some(state) = self.weather.as_mut() {
            state.turns_left = state.turns_left.saturating_sub(1);
            if state.turns_left == 0 {
                let ended = state.kind;
                self.weather = None;
                return Some(ended);
            }
        }
        None
    }

    /// Decrement the terrain countdown; returns the terrain that just ended
    pub fn tick_terrain(&mut self) -> Option<Terrain> {
        if let Some(state) = self.terrain.as_mut() {
            state.turns_left = state.turns_left.saturating_sub(1);
            if state.turns_left == 0 {
                let ended = state.kind;
                self.terrain = None;
                return Some(ended);
            }
        }
        None
    }

    /// Decrement Trick Room; returns true if it just ended
    pub fn tick_trick_room(&mut self) -> bool {
        if self.trick_room_turns > 0 {
            self.trick_room_turns -= 1;
            return self.trick_room_turns == 0;
        }
        false
    }

    /// Decrement Gravity; returns true if it just ended
    pub fn tick_gravity(&mut self) -> bool {
        if self.gravity_turns > 0 {
            self.gravity_turns -= 1;
            return self.gravity_turns == 0;
        }
        false
    }

    /// Check if any field condition is active
    pub fn has_any_condition(&self) -> bool {
        self.weather.is_some()
            || self.terrain.is_some()
            || self.trick_room_turns > 0
            || self.gravity_turns > 0
    }
}
