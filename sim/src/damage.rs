//! Damage calculation
//!
//! [`StandardModel`] is the in-process implementation of [`DamageModel`];
//! the trait seam exists so a driver can substitute an external damage
//! oracle without touching the pipeline.
//!
//! The modifier chain runs in one fixed, documented order: variable-power
//! override → base formula → same-type bonus → type effectiveness →
//! critical hit → weather → terrain → screens → ability/item multipliers →
//! 16-roll spread. The returned [`DamageOutcome`] carries the full spread
//! so callers can reason about ranges, plus the one sampled value the
//! pipeline applies.

use fray_battle::{
    BattleState, Effectiveness, SideCondition, SideId, Stat, StatStages, Status, Type, Volatile,
    Weather,
};
use fray_dex::{ability_data, normalize_id, MoveCategory, MoveData};

use crate::mechanics::{
    defender_ability_active, effective_speed, has_ability, has_item, is_grounded,
};
use crate::rng::BattleRng;

/// Result of one damage computation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DamageOutcome {
    /// The sampled damage value the pipeline should apply
    pub damage: u16,
    /// The full 16-roll spread (single entry for fixed-damage moves)
    pub rolls: Vec<u16>,
    /// Classification of the type matchup, for logs and ability hooks
    pub effectiveness: Effectiveness,
    pub category: MoveCategory,
    pub crit: bool,
}

/// Pluggable damage formula provider
pub trait DamageModel {
    /// Compute damage for the attacker's move against the current defender
    fn compute(
        &self,
        state: &BattleState,
        attacker: SideId,
        mov: &MoveData,
        rng: &mut BattleRng,
    ) -> DamageOutcome;
}

/// The built-in level-scaled formula
#[derive(Debug, Default, Clone, Copy)]
pub struct StandardModel;

/// Integer multiply-then-floor step, the only rounding the chain uses
fn modify(value: u32, num: u32, den: u32) -> u32 {
    value * num / den
}

/// Per-move variable base power, resolved before the formula proper.
/// Returns `None` for moves whose table power stands.
pub fn power_override(
    state: &BattleState,
    attacker: SideId,
    mov: &MoveData,
) -> Option<u16> {
    let defender = attacker.opponent();
    let user = state.active(attacker);
    let target = state.active(defender);

    match normalize_id(mov.name).as_str() {
        "facade" if user.status.is_some() => Some(140),
        "hex" if target.status.is_some() => Some(130),
        "venoshock"
            if matches!(target.status, Some(Status::Poison | Status::BadPoison)) =>
        {
            Some(130)
        }
        "brine" if target.hp() * 2 <= target.max_hp => Some(130),
        "acrobatics" if user.item.is_none() || user.item_consumed => Some(110),
        "knockoff" if target.item.is_some() && !target.item_consumed => Some(97),
        "gyroball" => {
            let user_spe = effective_speed(state, attacker).max(1);
            let target_spe = effective_speed(state, defender);
            Some((25 * target_spe / user_spe + 1).min(150) as u16)
        }
        "electroball" => {
            let user_spe = effective_speed(state, attacker);
            let target_spe = effective_speed(state, defender).max(1);
            Some(match user_spe / target_spe {
                0 => 40,
                1 => 60,
                2 => 80,
                3 => 120,
                _ => 150,
            })
        }
        "storedpower" => {
            let s = &user.stages;
            let positive: i8 = [s.atk, s.def, s.spa, s.spd, s.spe, s.accuracy, s.evasion]
                .iter()
                .filter(|&&v| v > 0)
                .sum();
            Some(20 + 20 * positive as u16)
        }
        "eruption" | "waterspout" => {
            Some(((150 * user.hp() as u32 / user.max_hp.max(1) as u32) as u16).max(1))
        }
        "flail" => {
            let p = 48 * user.hp() as u32 / user.max_hp.max(1) as u32;
            Some(match p {
                33.. => 20,
                17..=32 => 40,
                10..=16 => 80,
                5..=9 => 100,
                2..=4 => 150,
                _ => 200,
            })
        }
        "weatherball" if state.field.weather().is_some() => Some(100),
        "solarbeam"
            if matches!(
                state.field.weather(),
                Some(Weather::Rain | Weather::Sand | Weather::Hail | Weather::Snow)
            ) =>
        {
            Some(60)
        }
        _ => None,
    }
}

/// Per-move forced type, resolved alongside the power override
pub fn type_override(state: &BattleState, mov: &MoveData) -> Option<Type> {
    match normalize_id(mov.name).as_str() {
        "weatherball" => match state.field.weather()? {
            Weather::Sun => Some(Type::Fire),
            Weather::Rain => Some(Type::Water),
            Weather::Sand => Some(Type::Rock),
            Weather::Hail | Weather::Snow => Some(Type::Ice),
        },
        _ => None,
    }
}

/// Critical-stage probability table: stage 0 = 1/24, 1 = 1/8, 2 = 1/2, 3+ = always
fn crit_chance(stage: u8) -> (u32, u32) {
    match stage {
        0 => (1, 24),
        1 => (1, 8),
        2 => (1, 2),
        _ => (1, 1),
    }
}

/// A stat scaled by its stage multiplier
pub(crate) fn staged_stat(stat: u16, stage: i8) -> u32 {
    (stat as f32 * StatStages::multiplier(stage)) as u32
}

impl DamageModel for StandardModel {
    fn compute(
        &self,
        state: &BattleState,
        attacker: SideId,
        mov: &MoveData,
        rng: &mut BattleRng,
    ) -> DamageOutcome {
        let defender = attacker.opponent();
        let user = state.active(attacker);
        let target = state.active(defender);
        let is_struggle = normalize_id(mov.name) == "struggle";

        let move_type = type_override(state, mov).unwrap_or(mov.typ);
        let eff_mult = if is_struggle {
            1.0
        } else {
            move_type.effectiveness_multi(&target.types)
        };
        let effectiveness = Effectiveness::classify(eff_mult);

        // Fixed-damage rules bypass the formula entirely
        if mov.ohko {
            return DamageOutcome {
                damage: target.max_hp,
                rolls: vec![target.max_hp],
                effectiveness,
                category: mov.category,
                crit: false,
            };
        }
        if let Some(fixed) = mov.fixed {
            let damage = match fixed {
                fray_dex::FixedDamage::Level => user.level as u16,
                fray_dex::FixedDamage::Exact(n) => n,
                fray_dex::FixedDamage::HalfCurrentHp => (target.hp() / 2).max(1),
            };
            return DamageOutcome {
                damage,
                rolls: vec![damage],
                effectiveness,
                category: mov.category,
                crit: false,
            };
        }

        if effectiveness == Effectiveness::Immune {
            return DamageOutcome {
                damage: 0,
                rolls: vec![0],
                effectiveness,
                category: mov.category,
                crit: false,
            };
        }

        // Critical roll
        let crit = if mov.always_crit {
            true
        } else {
            let mut stage = mov.crit_stage;
            if user.has_volatile(Volatile::FocusEnergy) {
                stage += 2;
            }
            if has_item(state, attacker, "Scope Lens") || has_item(state, attacker, "Razor Claw")
            {
                stage += 1;
            }
            if has_ability(state, attacker, "Super Luck") {
                stage += 1;
            }
            let (num, den) = crit_chance(stage);
            rng.chance(num, den)
        };

        // Base power
        let mut power = power_override(state, attacker, mov).unwrap_or(mov.power) as u32;
        if power == 0 {
            power = 1;
        }
        if has_ability(state, attacker, "Technician") && power <= 60 {
            power = modify(power, 3, 2);
        }

        // Attacking and defending stats, with stat substitution and the
        // crit/Unaware stage exemptions
        let attack_stat = mov.offense_stat.unwrap_or(match mov.category {
            MoveCategory::Physical => Stat::Atk,
            _ => Stat::Spa,
        });
        let defense_stat = mov.defense_stat.unwrap_or(match mov.category {
            MoveCategory::Physical => Stat::Def,
            _ => Stat::Spd,
        });

        let mut atk_stage = user.stages.get(attack_stat);
        if crit && atk_stage < 0 {
            atk_stage = 0;
        }
        if defender_ability_active(state, defender)
            && ability_data(&target.ability).name == "Unaware"
        {
            atk_stage = 0;
        }
        let mut def_stage = target.stages.get(defense_stat);
        if crit && def_stage > 0 {
            def_stage = 0;
        }
        if has_ability(state, attacker, "Unaware") {
            def_stage = 0;
        }

        let mut attack = staged_stat(user.stats.get(attack_stat), atk_stage);
        let mut defense = staged_stat(target.stats.get(defense_stat), def_stage).max(1);

        // Attack-side multipliers
        let physical = mov.category == MoveCategory::Physical;
        if physical
            && (has_ability(state, attacker, "Huge Power")
                || has_ability(state, attacker, "Pure Power"))
        {
            attack *= 2;
        }
        let guts = has_ability(state, attacker, "Guts");
        if guts && user.status.is_some() && physical {
            attack = modify(attack, 3, 2);
        }
        if physical && has_item(state, attacker, "Choice Band") {
            attack = modify(attack, 3, 2);
        }
        if !physical && has_item(state, attacker, "Choice Specs") {
            attack = modify(attack, 3, 2);
        }
        if physical && has_item(state, attacker, "Muscle Band") {
            attack = modify(attack, 11, 10);
        }
        if !physical && has_item(state, attacker, "Wise Glasses") {
            attack = modify(attack, 11, 10);
        }
        if user.status == Some(Status::Burn) && physical && !guts {
            attack /= 2;
        }
        if defender_ability_active(state, defender)
            && ability_data(&target.ability).name == "Thick Fat"
            && matches!(move_type, Type::Fire | Type::Ice)
        {
            attack /= 2;
        }
        if user.has_volatile(Volatile::FlashFire) && move_type == Type::Fire {
            attack = modify(attack, 3, 2);
        }

        // Defense-side multipliers
        if defense_stat == Stat::Spd && has_item(state, defender, "Assault Vest") {
            defense = modify(defense, 3, 2);
        }

        // Level-scaled base formula
        let level_term = (2 * user.level as u32) / 5 + 2;
        let mut damage = level_term * power * attack / defense / 50 + 2;

        // Same-type bonus
        if !is_struggle && user.has_type(move_type) {
            if has_ability(state, attacker, "Adaptability") {
                damage = modify(damage, 2, 1);
            } else {
                damage = modify(damage, 3, 2);
            }
        }

        // Type effectiveness as an exact fraction (quarters)
        let quarters = (eff_mult * 4.0) as u32;
        damage = modify(damage, quarters, 4);

        // Critical hit
        if crit {
            damage = modify(damage, 3, 2);
            if has_ability(state, attacker, "Sniper") {
                damage = modify(damage, 3, 2);
            }
        }

        // Weather
        match state.field.weather() {
            Some(Weather::Sun) => {
                if move_type == Type::Fire {
                    damage = modify(damage, 3, 2);
                } else if move_type == Type::Water {
                    damage = modify(damage, 1, 2);
                }
            }
            Some(Weather::Rain) => {
                if move_type == Type::Water {
                    damage = modify(damage, 3, 2);
                } else if move_type == Type::Fire {
                    damage = modify(damage, 1, 2);
                }
            }
            _ => {}
        }

        // Terrain
        if let Some(terrain) = state.field.terrain() {
            let user_grounded = is_grounded(user, &state.field, crate::mechanics::ability_active(state, attacker));
            let target_grounded =
                is_grounded(target, &state.field, defender_ability_active(state, defender));
            use fray_battle::Terrain;
            match terrain {
                Terrain::Electric if user_grounded && move_type == Type::Electric => {
                    damage = modify(damage, 13, 10);
                }
                Terrain::Grassy if user_grounded && move_type == Type::Grass => {
                    damage = modify(damage, 13, 10);
                }
                Terrain::Psychic if user_grounded && move_type == Type::Psychic => {
                    damage = modify(damage, 13, 10);
                }
                Terrain::Misty if target_grounded && move_type == Type::Dragon => {
                    damage = modify(damage, 1, 2);
                }
                _ => {}
            }
        }

        // Screens, unless pierced by a crit or an Infiltrator attacker
        let infiltrates = has_ability(state, attacker, "Infiltrator");
        if !crit && !infiltrates {
            let def_side = state.side(defender);
            let screened = def_side.has_condition(SideCondition::AuroraVeil)
                || (physical && def_side.has_condition(SideCondition::Reflect))
                || (!physical && def_side.has_condition(SideCondition::LightScreen));
            if screened {
                damage = modify(damage, 1, 2);
            }
        }

        // Ability and item final multipliers
        if user.hp() * 3 <= user.max_hp {
            let pinch = match ability_data(&user.ability).name {
                "Blaze" => move_type == Type::Fire,
                "Torrent" => move_type == Type::Water,
                "Overgrow" => move_type == Type::Grass,
                "Swarm" => move_type == Type::Bug,
                _ => false,
            };
            if pinch && crate::mechanics::ability_active(state, attacker) {
                damage = modify(damage, 3, 2);
            }
        }
        if has_ability(state, attacker, "Tinted Lens")
            && effectiveness == Effectiveness::NotVeryEffective
        {
            damage = modify(damage, 2, 1);
        }
        if has_ability(state, attacker, "Sheer Force") && mov.secondary.is_some() {
            damage = modify(damage, 13, 10);
        }
        if has_item(state, attacker, "Life Orb") {
            damage = modify(damage, 13, 10);
        }
        if has_item(state, attacker, "Expert Belt")
            && effectiveness == Effectiveness::SuperEffective
        {
            damage = modify(damage, 6, 5);
        }
        if defender_ability_active(state, defender) {
            let def_ability = ability_data(&target.ability).name;
            if matches!(def_ability, "Solid Rock" | "Filter")
                && effectiveness == Effectiveness::SuperEffective
            {
                damage = modify(damage, 3, 4);
            }
            if def_ability == "Multiscale" && target.hp() == target.max_hp {
                damage = modify(damage, 1, 2);
            }
        }

        // Roll spread, sampled once
        let rolls: Vec<u16> = (85..=100u32)
            .map(|r| (modify(damage, r, 100).max(1)).min(u16::MAX as u32) as u16)
            .collect();
        let roll = rng.damage_roll();
        let damage = rolls[(roll - 85) as usize];

        DamageOutcome {
            damage,
            rolls,
            effectiveness,
            category: mov.category,
            crit,
        }
    }
}
