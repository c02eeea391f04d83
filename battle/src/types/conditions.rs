//! Field and side conditions

/// Weather conditions (one slot, mutually exclusive)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Weather {
    Sun,
    Rain,
    Sand,
    Hail,
    Snow,
}

impl Weather {
    /// Parse from a move or condition name
    pub fn from_name(s: &str) -> Option<Self> {
        let normalized = s.to_lowercase().replace([' ', '-'], "");
        match normalized.as_str() {
            "sunnyday" | "sun" | "harshsunlight" => Some(Weather::Sun),
            "raindance" | "rain" => Some(Weather::Rain),
            "sandstorm" | "sand" => Some(Weather::Sand),
            "hail" => Some(Weather::Hail),
            "snowscape" | "snow" => Some(Weather::Snow),
            _ => None,
        }
    }

    /// Whether this weather chips non-immune combatants at end of turn
    pub fn is_damaging(&self) -> bool {
        matches!(self, Weather::Sand | Weather::Hail)
    }

    /// Get display name
    pub fn as_str(&self) -> &'static str {
        match self {
            Weather::Sun => "Sun",
            Weather::Rain => "Rain",
            Weather::Sand => "Sandstorm",
            Weather::Hail => "Hail",
            Weather::Snow => "Snow",
        }
    }
}

impl std::fmt::Display for Weather {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Terrain conditions (one slot, mutually exclusive)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Terrain {
    Electric,
    Grassy,
    Misty,
    Psychic,
}

impl Terrain {
    /// Parse from a move or condition name
    pub fn from_name(s: &str) -> Option<Self> {
        let normalized = s.to_lowercase().replace([' ', '-'], "");
        match normalized.as_str() {
            "electricterrain" | "electric" => Some(Terrain::Electric),
            "grassyterrain" | "grassy" => Some(Terrain::Grassy),
            "mistyterrain" | "misty" => Some(Terrain::Misty),
            "psychicterrain" | "psychic" => Some(Terrain::Psychic),
            _ => None,
        }
    }

    /// Get display name
    pub fn as_str(&self) -> &'static str {
        match self {
            Terrain::Electric => "Electric Terrain",
            Terrain::Grassy => "Grassy Terrain",
            Terrain::Misty => "Misty Terrain",
            Terrain::Psychic => "Psychic Terrain",
        }
    }
}

impl std::fmt::Display for Terrain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Side conditions (hazards, screens, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SideCondition {
    // Screens
    Reflect,
    LightScreen,
    AuroraVeil,

    // Entry hazards
    Spikes,      // Stackable 1-3
    ToxicSpikes, // Stackable 1-2
    StealthRock,
    StickyWeb,

    // Other
    Tailwind,
    Safeguard,
    Mist,
}

impl SideCondition {
    /// Check if this condition is stackable
    pub fn is_stackable(&self) -> bool {
        matches!(self, SideCondition::Spikes | SideCondition::ToxicSpikes)
    }

    /// Get maximum layers for this condition
    pub fn max_layers(&self) -> u8 {
        match self {
            SideCondition::Spikes => 3,
            SideCondition::ToxicSpikes => 2,
            _ => 1,
        }
    }

    /// Check if this is a screen
    pub fn is_screen(&self) -> bool {
        matches!(
            self,
            SideCondition::Reflect | SideCondition::LightScreen | SideCondition::AuroraVeil
        )
    }

    /// Check if this is an entry hazard
    pub fn is_hazard(&self) -> bool {
        matches!(
            self,
            SideCondition::Spikes
                | SideCondition::ToxicSpikes
                | SideCondition::StealthRock
                | SideCondition::StickyWeb
        )
    }

    /// Base duration in turns, `None` for conditions that persist until removed
    pub fn base_duration(&self) -> Option<u8> {
        match self {
            SideCondition::Reflect | SideCondition::LightScreen | SideCondition::AuroraVeil => {
                Some(5)
            }
            SideCondition::Tailwind => Some(4),
            SideCondition::Safeguard | SideCondition::Mist => Some(5),
            _ => None, // Hazards persist until removed
        }
    }

    /// Get display name
    pub fn as_str(&self) -> &'static str {
        match self {
            SideCondition::Reflect => "Reflect",
            SideCondition::LightScreen => "Light Screen",
            SideCondition::AuroraVeil => "Aurora Veil",
            SideCondition::Spikes => "Spikes",
            SideCondition::ToxicSpikes => "Toxic Spikes",
            SideCondition::StealthRock => "Stealth Rock",
            SideCondition::StickyWeb => "Sticky Web",
            SideCondition::Tailwind => "Tailwind",
            SideCondition::Safeguard => "Safeguard",
            SideCondition::Mist => "Mist",
        }
    }
}

impl std::fmt::Display for SideCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// State for an active side condition: layer count for stackable hazards,
/// remaining turns for duration-limited conditions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SideConditionState {
    pub layers: u8,
    pub turns_left: Option<u8>,
}

impl SideConditionState {
    /// Create state for a freshly-set condition with 1 layer and its base duration
    pub fn new(condition: SideCondition) -> Self {
        Self {
            layers: 1,
            turns_left: condition.base_duration(),
        }
    }

    /// Create state with an overridden duration (e.g. Light Clay screens)
    pub fn with_duration(turns: u8) -> Self {
        Self {
            layers: 1,
            turns_left: Some(turns),
        }
    }

    /// Add a layer, returns true if below the cap
    pub fn add_layer(&mut self, condition: SideCondition) -> bool {
        if self.layers < condition.max_layers() {
            self.layers += 1;
            true
        } else {
            false
        }
    }

    /// Decrement the countdown; returns true when the condition expires
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
    fn test_weather_from_name() {
        assert_eq!(Weather::from_name("Sunny Day"), Some(Weather::Sun));
        assert_eq!(Weather::from_name("RainDance"), Some(Weather::Rain));
        assert_eq!(Weather::from_name("Sandstorm"), Some(Weather::Sand));
        assert_eq!(Weather::from_name("Snowscape"), Some(Weather::Snow));
        assert_eq!(Weather::from_name("unknown"), None);
    }

    #[test]
    fn test_weather_is_damaging() {
        assert!(Weather::Sand.is_damaging());
        assert!(Weather::Hail.is_damaging());
        assert!(!Weather::Sun.is_damaging());
        assert!(!Weather::Rain.is_damaging());
        assert!(!Weather::Snow.is_damaging());
    }

    #[test]
    fn test_terrain_from_name() {
        assert_eq!(Terrain::from_name("Electric Terrain"), Some(Terrain::Electric));
        assert_eq!(Terrain::from_name("grassyterrain"), Some(Terrain::Grassy));
        assert_eq!(Terrain::from_name("none"), None);
    }

    #[test]
    fn test_side_condition_stackable() {
        assert!(SideCondition::Spikes.is_stackable());
        assert!(SideCondition::ToxicSpikes.is_stackable());
        assert!(!SideCondition::StealthRock.is_stackable());
        assert!(!SideCondition::Reflect.is_stackable());
    }

    #[test]
    fn test_side_condition_max_layers() {
        assert_eq!(SideCondition::Spikes.max_layers(), 3);
        assert_eq!(SideCondition::ToxicSpikes.max_layers(), 2);
        assert_eq!(SideCondition::StealthRock.max_layers(), 1);
    }

    #[test]
    fn test_side_condition_classification() {
        assert!(SideCondition::Reflect.is_screen());
        assert!(SideCondition::AuroraVeil.is_screen());
        assert!(!SideCondition::Spikes.is_screen());

        assert!(SideCondition::Spikes.is_hazard());
        assert!(SideCondition::StickyWeb.is_hazard());
        assert!(!SideCondition::Tailwind.is_hazard());
    }

    #[test]
    fn test_side_condition_duration() {
        assert_eq!(SideCondition::Reflect.base_duration(), Some(5));
        assert_eq!(SideCondition::Tailwind.base_duration(), Some(4));
        assert_eq!(SideCondition::StealthRock.base_duration(), None);
    }

    #[test]
    fn test_side_condition_state_layers() {
        let mut state = SideConditionState::new(SideCondition::Spikes);
        assert_eq!(state.layers, 1);

        assert!(state.add_layer(SideCondition::Spikes));
        assert_eq!(state.layers, 2);
        assert!(state.add_layer(SideCondition::Spikes));
        assert_eq!(state.layers, 3);
        assert!(!state.add_layer(SideCondition::Spikes)); // At max
        assert_eq!(state.layers, 3);
    }

    #[test]
    fn test_side_condition_state_tick() {
        let mut screen = SideConditionState::new(SideCondition::Reflect);
        for _ in 0..4 {
            assert!(!screen.tick());
        }
        assert!(screen.tick()); // Fifth tick expires

        let mut rocks = SideConditionState::new(SideCondition::StealthRock);
        assert!(!rocks.tick()); // Hazards never time out
    }

    #[test]
    fn test_side_condition_state_with_duration() {
        let state = SideConditionState::with_duration(8);
        assert_eq!(state.turns_left, Some(8));
        assert_eq!(state.layers, 1);
    }
}
