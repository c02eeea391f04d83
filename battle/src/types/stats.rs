//! Base stats, computed stats, and stat stages

/// Boostable stats plus accuracy/evasion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Stat {
    Atk,
    Def,
    Spa,
    Spd,
    Spe,
    Accuracy,
    Evasion,
}

impl Stat {
    /// Get display name
    pub fn as_str(&self) -> &'static str {
        match self {
            Stat::Atk => "Attack",
            Stat::Def => "Defense",
            Stat::Spa => "Special Attack",
            Stat::Spd => "Special Defense",
            Stat::Spe => "Speed",
            Stat::Accuracy => "accuracy",
            Stat::Evasion => "evasiveness",
        }
    }
}

impl std::fmt::Display for Stat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A full stat spread (species base stats, or stats computed at a level)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatBlock {
    pub hp: u16,
    pub atk: u16,
    pub def: u16,
    pub spa: u16,
    pub spd: u16,
    pub spe: u16,
}

impl StatBlock {
    /// Create a stat block from the six values in standard order
    pub fn new(hp: u16, atk: u16, def: u16, spa: u16, spd: u16, spe: u16) -> Self {
        Self { hp, atk, def, spa, spd, spe }
    }

    /// Get a non-HP stat value
    pub fn get(&self, stat: Stat) -> u16 {
        match stat {
            Stat::Atk => self.atk,
            Stat::Def => self.def,
            Stat::Spa => self.spa,
            Stat::Spd => self.spd,
            Stat::Spe => self.spe,
            // Accuracy/evasion have no base stat; they are pure stage values
            Stat::Accuracy | Stat::Evasion => 100,
        }
    }

    /// Compute battle stats from base stats at a level.
    ///
    /// Uses the flat spread the simulator assumes for every combatant
    /// (maximum individual values, no effort values, neutral nature):
    /// HP = floor((2*base + 31) * level / 100) + level + 10, others
    /// = floor((2*base + 31) * level / 100) + 5.
    pub fn at_level(&self, level: u8) -> StatBlock {
        let level = level as u32;
        let scale = |base: u16| ((2 * base as u32 + 31) * level / 100) as u16;
        StatBlock {
            hp: scale(self.hp) + level as u16 + 10,
            atk: scale(self.atk) + 5,
            def: scale(self.def) + 5,
            spa: scale(self.spa) + 5,
            spd: scale(self.spd) + 5,
            spe: scale(self.spe) + 5,
        }
    }
}

/// Stat stages (-6 to +6)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatStages {
    pub atk: i8,
    pub def: i8,
    pub spa: i8,
    pub spd: i8,
    pub spe: i8,
    pub accuracy: i8,
    pub evasion: i8,
}

impl StatStages {
    /// Create new stat stages (all at 0)
    pub fn new() -> Self {
        Self::default()
    }

    /// Get stage for a stat
    pub fn get(&self, stat: Stat) -> i8 {
        match stat {
            Stat::Atk => self.atk,
            Stat::Def => self.def,
            Stat::Spa => self.spa,
            Stat::Spd => self.spd,
            Stat::Spe => self.spe,
            Stat::Accuracy => self.accuracy,
            Stat::Evasion => self.evasion,
        }
    }

    /// Set stage for a stat (clamped to -6..+6)
    pub fn set(&mut self, stat: Stat, value: i8) {
        let clamped = value.clamp(-6, 6);
        match stat {
            Stat::Atk => self.atk = clamped,
            Stat::Def => self.def = clamped,
            Stat::Spa => self.spa = clamped,
            Stat::Spd => self.spd = clamped,
            Stat::Spe => self.spe = clamped,
            Stat::Accuracy => self.accuracy = clamped,
            Stat::Evasion => self.evasion = clamped,
        }
    }

    /// Apply a boost to a stat, returns actual change applied
    pub fn boost(&mut self, stat: Stat, amount: i8) -> i8 {
        let current = self.get(stat);
        let new_value = (current + amount).clamp(-6, 6);
        let actual_change = new_value - current;
        self.set(stat, new_value);
        actual_change
    }

    /// Apply an unboost (negative boost) to a stat, returns actual change applied
    pub fn unboost(&mut self, stat: Stat, amount: i8) -> i8 {
        self.boost(stat, -amount)
    }

    /// Reset all stages to 0
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Get the multiplier for a stat stage (for atk/def/spa/spd/spe)
    /// +1 = 1.5x, +2 = 2x, ..., +6 = 4x
    /// -1 = 0.67x, -2 = 0.5x, ..., -6 = 0.25x
    pub fn multiplier(stage: i8) -> f32 {
        let stage = stage.clamp(-6, 6);
        if stage >= 0 {
            (2 + stage as i32) as f32 / 2.0
        } else {
            2.0 / (2 - stage as i32) as f32
        }
    }

    /// Get the multiplier for accuracy/evasion stages (different formula)
    /// +1 = 1.33x, +2 = 1.67x, ..., +6 = 3x
    /// -1 = 0.75x, -2 = 0.6x, ..., -6 = 0.33x
    pub fn accuracy_multiplier(stage: i8) -> f32 {
        let stage = stage.clamp(-6, 6);
        if stage >= 0 {
            (3 + stage as i32) as f32 / 3.0
        } else {
            3.0 / (3 - stage as i32) as f32
        }
    }

    /// Check if all stats are at 0
    pub fn is_clear(&self) -> bool {
        self.atk == 0
            && self.def == 0
            && self.spa == 0
            && self.spd == 0
            && self.spe == 0
            && self.accuracy == 0
            && self.evasion == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_stages_are_zero() {
        let stages = StatStages::new();
        assert!(stages.is_clear());
    }

    #[test]
    fn test_get_set() {
        let mut stages = StatStages::new();
        stages.set(Stat::Atk, 3);
        assert_eq!(stages.get(Stat::Atk), 3);

        stages.set(Stat::Spe, -2);
        assert_eq!(stages.get(Stat::Spe), -2);
    }

    #[test]
    fn test_set_clamps_to_bounds() {
        let mut stages = StatStages::new();
        stages.set(Stat::Atk, 10);
        assert_eq!(stages.atk, 6);

        stages.set(Stat::Def, -10);
        assert_eq!(stages.def, -6);
    }

    #[test]
    fn test_boost() {
        let mut stages = StatStages::new();

        // Normal boost
        let change = stages.boost(Stat::Atk, 2);
        assert_eq!(change, 2);
        assert_eq!(stages.atk, 2);

        // Boost that hits cap
        stages.atk = 5;
        let change = stages.boost(Stat::Atk, 3);
        assert_eq!(change, 1); // Only +1 actually applied
        assert_eq!(stages.atk, 6);

        // Boost when already at max
        let change = stages.boost(Stat::Atk, 1);
        assert_eq!(change, 0);
        assert_eq!(stages.atk, 6);
    }

    #[test]
    fn test_unboost() {
        let mut stages = StatStages::new();

        let change = stages.unboost(Stat::Def, 2);
        assert_eq!(change, -2);
        assert_eq!(stages.def, -2);

        // Unboost to minimum
        stages.def = -5;
        let change = stages.unboost(Stat::Def, 3);
        assert_eq!(change, -1);
        assert_eq!(stages.def, -6);
    }

    #[test]
    fn test_clear() {
        let mut stages = StatStages {
            atk: 3,
            def: -2,
            spa: 1,
            spd: -1,
            spe: 6,
            accuracy: 2,
            evasion: -3,
        };

        stages.clear();
        assert!(stages.is_clear());
    }

    #[test]
    fn test_stat_multiplier() {
        // Positive stages
        assert!((StatStages::multiplier(0) - 1.0).abs() < 0.001);
        assert!((StatStages::multiplier(1) - 1.5).abs() < 0.001);
        assert!((StatStages::multiplier(2) - 2.0).abs() < 0.001);
        assert!((StatStages::multiplier(6) - 4.0).abs() < 0.001);

        // Negative stages
        assert!((StatStages::multiplier(-1) - 2.0 / 3.0).abs() < 0.001);
        assert!((StatStages::multiplier(-2) - 0.5).abs() < 0.001);
        assert!((StatStages::multiplier(-6) - 0.25).abs() < 0.001);
    }

    #[test]
    fn test_accuracy_multiplier() {
        assert!((StatStages::accuracy_multiplier(0) - 1.0).abs() < 0.001);
        assert!((StatStages::accuracy_multiplier(1) - 4.0 / 3.0).abs() < 0.001);
        assert!((StatStages::accuracy_multiplier(6) - 3.0).abs() < 0.001);
        assert!((StatStages::accuracy_multiplier(-1) - 0.75).abs() < 0.001);
        assert!((StatStages::accuracy_multiplier(-6) - 1.0 / 3.0).abs() < 0.001);
    }

    #[test]
    fn test_stat_block_at_level() {
        // 100 base across the board at level 100:
        // HP = (200 + 31) * 100 / 100 + 100 + 10 = 341
        // others = (200 + 31) * 100 / 100 + 5 = 236
        let base = StatBlock::new(100, 100, 100, 100, 100, 100);
        let computed = base.at_level(100);
        assert_eq!(computed.hp, 341);
        assert_eq!(computed.atk, 236);
        assert_eq!(computed.spe, 236);

        // Level scaling: level 50 gives roughly half
        let at_50 = base.at_level(50);
        assert_eq!(at_50.hp, (231 * 50 / 100) + 50 + 10);
        assert_eq!(at_50.atk, (231 * 50 / 100) + 5);
    }

    #[test]
    fn test_stat_block_get() {
        let block = StatBlock::new(100, 110, 90, 130, 85, 95);
        assert_eq!(block.get(Stat::Atk), 110);
        assert_eq!(block.get(Stat::Spa), 130);
        assert_eq!(block.get(Stat::Spe), 95);
    }
}
