//! Stateless mechanics helpers: effective stats, accuracy, groundedness,
//! and stat-stage application with its guard abilities.

use fray_battle::{
    BattleState, Combatant, FieldState, SideCondition, Stat, StatStages, Status, SideId, Type,
    Volatile, Weather,
};
use fray_dex::{ability_data, move_data, MoveData};

use crate::log::TurnLog;
use crate::rng::BattleRng;

/// Whether any active combatant's ability shuts down abilities field-wide
pub fn abilities_suppressed(state: &BattleState) -> bool {
    SideId::BOTH
        .iter()
        .any(|&id| ability_data(&state.active(id).ability).neutralizing)
}

/// Whether a side's active ability is currently functional
pub fn ability_active(state: &BattleState, side: SideId) -> bool {
    let own = ability_data(&state.active(side).ability);
    // A neutralizing ability is immune to its own suppression
    own.neutralizing || !abilities_suppressed(state)
}

/// Whether the defender's ability matters against this attacker
/// (suppression field-wide, or a mold-breaking attacker)
pub fn defender_ability_active(state: &BattleState, defender: SideId) -> bool {
    if !ability_active(state, defender) {
        return false;
    }
    let attacker = defender.opponent();
    !(ability_active(state, attacker)
        && ability_data(&state.active(attacker).ability).breaks_mold)
}

/// Check a side's active for a named, functional ability
pub fn has_ability(state: &BattleState, side: SideId, name: &str) -> bool {
    ability_data(&state.active(side).ability).name == name && ability_active(state, side)
}

/// Check a side's active for a named, unconsumed held item
pub fn has_item(state: &BattleState, side: SideId, name: &str) -> bool {
    let active = state.active(side);
    active.item.as_deref().map(fray_dex::normalize_id) == Some(fray_dex::normalize_id(name))
        && !active.item_consumed
}

/// Whether a combatant is affected by ground-touching effects
/// (Ground moves, Spikes, terrain)
pub fn is_grounded(c: &Combatant, field: &FieldState, ability_works: bool) -> bool {
    // Grounding overrides beat airborne sources
    if field.gravity() || c.has_volatile(Volatile::Ingrain) {
        return true;
    }
    if c.has_type(Type::Flying) {
        return false;
    }
    if ability_works && ability_data(&c.ability).name == "Levitate" {
        return false;
    }
    if c.has_volatile(Volatile::MagnetRise) {
        return false;
    }
    if let Some(item) = &c.item {
        if !c.item_consumed && fray_dex::normalize_id(item) == "airballoon" {
            return false;
        }
    }
    true
}

/// Effective speed for turn ordering.
///
/// Multiplication order is fixed: stat × stage → ability → item → status →
/// side conditions. Trick Room inversion is the orderer's concern, not a
/// speed modifier.
pub fn effective_speed(state: &BattleState, side: SideId) -> u32 {
    let active = state.active(side);
    let mut speed =
        (active.stats.spe as f32 * StatStages::multiplier(active.stages.spe)) as u32;

    if ability_active(state, side) {
        let boosted = match ability_data(&active.ability).name {
            "Swift Swim" => state.field.weather() == Some(Weather::Rain),
            "Chlorophyll" => state.field.weather() == Some(Weather::Sun),
            "Sand Rush" => state.field.weather() == Some(Weather::Sand),
            "Slush Rush" => {
                matches!(state.field.weather(), Some(Weather::Hail | Weather::Snow))
            }
            _ => false,
        };
        if boosted {
            speed *= 2;
        }
        if ability_data(&active.ability).name == "Quick Feet" && active.status.is_some() {
            speed = speed * 3 / 2;
        }
    }

    if has_item(state, side, "Choice Scarf") {
        speed = speed * 3 / 2;
    }

    if active.status == Some(Status::Paralysis) && !has_ability(state, side, "Quick Feet") {
        speed /= 2;
    }

    if state.side(side).has_condition(SideCondition::Tailwind) {
        speed *= 2;
    }

    speed
}

/// Resolve the accuracy gate for one move use. Returns true on a hit.
pub fn accuracy_check(
    state: &BattleState,
    attacker: SideId,
    defender: SideId,
    mov: &MoveData,
    rng: &mut BattleRng,
) -> bool {
    let atk = state.active(attacker);
    let def = state.active(defender);

    let no_guard =
        has_ability(state, attacker, "No Guard") || has_ability(state, defender, "No Guard");

    // A charging defender is untargetable mid-charge (Fly, Dig, Dive...)
    if !no_guard {
        if let Some(charging) = &def.charging_move {
            if move_data(charging).semi_invulnerable {
                return false;
            }
        }
    }

    if no_guard || mov.accuracy.is_none() {
        return true;
    }

    // Lock-On guarantees the next hit
    if atk.has_volatile(Volatile::LockOn) {
        return true;
    }

    // One-hit KO moves use their own level-gated formula, no stage mods
    if mov.ohko {
        if def.level > atk.level {
            return false;
        }
        let pct = 30 + (atk.level - def.level) as u32;
        return rng.chance(pct.min(100), 100);
    }

    let mut base = mov.accuracy.unwrap_or(100) as f32;

    // Weather rewrites for the big storm moves
    let id = fray_dex::normalize_id(mov.name);
    match id.as_str() {
        "thunder" | "hurricane" => match state.field.weather() {
            Some(Weather::Rain) => return true,
            Some(Weather::Sun) => base = 50.0,
            _ => {}
        },
        "blizzard" => {
            if matches!(state.field.weather(), Some(Weather::Hail | Weather::Snow)) {
                return true;
            }
        }
        _ => {}
    }

    let stage = (atk.stages.accuracy - def.stages.evasion).clamp(-6, 6);
    let mut pct = base * StatStages::accuracy_multiplier(stage);

    if has_ability(state, attacker, "Compound Eyes") {
        pct *= 1.3;
    }
    if has_item(state, attacker, "Wide Lens") {
        pct *= 1.1;
    }
    if has_item(state, defender, "Bright Powder") {
        pct *= 0.9;
    }
    if state.field.gravity() {
        pct *= 5.0 / 3.0;
    }

    rng.chance((pct as u32).min(100), 100)
}

/// Apply a batch of stat-stage changes to a side's active, honoring the
/// guard abilities and logging each change.
///
/// `from_opponent` marks changes inflicted by the other side, which Clear
/// Body, White Smoke, and Mist can refuse.
pub fn apply_stat_changes(
    state: &mut BattleState,
    side: SideId,
    changes: &[(Stat, i8)],
    from_opponent: bool,
    log: &mut TurnLog,
) {
    let contrary = has_ability(state, side, "Contrary");
    let guarded = from_opponent
        && (has_ability(state, side, "Clear Body")
            || has_ability(state, side, "White Smoke")
            || state.side(side).has_condition(SideCondition::Mist));

    for &(stat, amount) in changes {
        let amount = if contrary { -amount } else { amount };
        if amount < 0 && guarded {
            let name = state.active(side).species.clone();
            log.push(format!("{name}'s stats were not lowered!"));
            continue;
        }

        let active = state.active_mut(side);
        let name = active.species.clone();
        let applied = active.stages.boost(stat, amount);

        let line = match applied {
            0 if amount > 0 => format!("{name}'s {stat} won't go any higher!"),
            0 => format!("{name}'s {stat} won't go any lower!"),
            1 => format!("{name}'s {stat} rose!"),
            2 => format!("{name}'s {stat} rose sharply!"),
            n if n > 2 => format!("{name}'s {stat} rose drastically!"),
            -1 => format!("{name}'s {stat} fell!"),
            -2 => format!("{name}'s {stat} harshly fell!"),
            _ => format!("{name}'s {stat} severely fell!"),
        };
        log.push(line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fray_battle::{MoveSlot, SideState, StatBlock, VolatileState};

    fn member(species: &str, ability: &str, spe: u16) -> Combatant {
        Combatant::new(
            species,
            50,
            vec![Type::Normal],
            StatBlock::new(80, 80, 80, 80, 80, spe),
            ability,
        )
        .with_moves(vec![MoveSlot::new("Tackle", 35)])
    }

    fn battle_with(a: Combatant, b: Combatant) -> BattleState {
        BattleState::new(SideState::new(vec![a]), SideState::new(vec![b]))
    }

    #[test]
    fn test_effective_speed_stage_multiplier() {
        let mut state = battle_with(member("A", "Limber", 100), member("B", "Limber", 100));
        let base = effective_speed(&state, SideId::A);

        state.active_mut(SideId::A).stages.set(Stat::Spe, 2);
        assert_eq!(effective_speed(&state, SideId::A), base * 2);

        state.active_mut(SideId::A).stages.set(Stat::Spe, -2);
        assert_eq!(effective_speed(&state, SideId::A), base / 2);
    }

    #[test]
    fn test_paralysis_halves_speed() {
        let mut state = battle_with(member("A", "Limber", 100), member("B", "Limber", 100));
        let base = effective_speed(&state, SideId::A);

        state.active_mut(SideId::A).status = Some(Status::Paralysis);
        assert_eq!(effective_speed(&state, SideId::A), base / 2);
    }

    #[test]
    fn test_quick_feet_overrides_paralysis_drop() {
        let mut state = battle_with(member("A", "Quick Feet", 100), member("B", "Limber", 100));
        let base = effective_speed(&state, SideId::A);

        state.active_mut(SideId::A).status = Some(Status::Paralysis);
        assert_eq!(effective_speed(&state, SideId::A), base * 3 / 2);
    }

    #[test]
    fn test_swift_swim_in_rain() {
        let mut state = battle_with(member("A", "Swift Swim", 100), member("B", "Limber", 100));
        let base = effective_speed(&state, SideId::A);

        state.field.set_weather(Weather::Rain, 5);
        assert_eq!(effective_speed(&state, SideId::A), base * 2);

        state.field.set_weather(Weather::Sun, 5);
        assert_eq!(effective_speed(&state, SideId::A), base);
    }

    #[test]
    fn test_tailwind_doubles_speed() {
        let mut state = battle_with(member("A", "Limber", 100), member("B", "Limber", 100));
        let base = effective_speed(&state, SideId::A);

        state.side_mut(SideId::A).add_condition(SideCondition::Tailwind);
        assert_eq!(effective_speed(&state, SideId::A), base * 2);
    }

    #[test]
    fn test_choice_scarf() {
        let mut state = battle_with(
            member("A", "Limber", 100).with_item("Choice Scarf"),
            member("B", "Limber", 100),
        );
        let scarfed = effective_speed(&state, SideId::A);
        state.active_mut(SideId::A).item = None;
        assert_eq!(scarfed, effective_speed(&state, SideId::A) * 3 / 2);
    }

    #[test]
    fn test_grounded_basics() {
        let field = FieldState::new();
        let normal = member("A", "Limber", 100);
        assert!(is_grounded(&normal, &field, true));

        let mut flyer = member("B", "Limber", 100);
        flyer.types = vec![Type::Flying];
        assert!(!is_grounded(&flyer, &field, true));

        let levitator = member("C", "Levitate", 100);
        assert!(!is_grounded(&levitator, &field, true));
        // Suppressed Levitate no longer lifts
        assert!(is_grounded(&levitator, &field, false));
    }

    #[test]
    fn test_gravity_grounds_everything() {
        let mut field = FieldState::new();
        field.gravity_turns = 5;

        let mut flyer = member("A", "Levitate", 100);
        flyer.types = vec![Type::Flying];
        assert!(is_grounded(&flyer, &field, true));
    }

    #[test]
    fn test_air_balloon_lifts_until_consumed() {
        let field = FieldState::new();
        let mut holder = member("A", "Limber", 100).with_item("Air Balloon");
        assert!(!is_grounded(&holder, &field, true));

        holder.item_consumed = true;
        assert!(is_grounded(&holder, &field, true));
    }

    #[test]
    fn test_accuracy_never_miss() {
        let state = battle_with(member("A", "Limber", 100), member("B", "Limber", 100));
        let mut rng = BattleRng::seeded(1);
        let swift = move_data("Swift");
        for _ in 0..20 {
            assert!(accuracy_check(&state, SideId::A, SideId::B, swift, &mut rng));
        }
    }

    #[test]
    fn test_accuracy_semi_invulnerable_dodges() {
        let mut state = battle_with(member("A", "Limber", 100), member("B", "Limber", 100));
        state.active_mut(SideId::B).charging_move = Some("Fly".to_string());

        let mut rng = BattleRng::seeded(1);
        let tackle = move_data("Tackle");
        assert!(!accuracy_check(&state, SideId::A, SideId::B, tackle, &mut rng));
    }

    #[test]
    fn test_accuracy_no_guard_hits_anything() {
        let mut state = battle_with(member("A", "No Guard", 100), member("B", "Limber", 100));
        state.active_mut(SideId::B).charging_move = Some("Fly".to_string());

        let mut rng = BattleRng::seeded(1);
        let blast = move_data("Focus Blast");
        for _ in 0..20 {
            assert!(accuracy_check(&state, SideId::A, SideId::B, blast, &mut rng));
        }
    }

    #[test]
    fn test_ohko_fails_against_higher_level() {
        let mut state = battle_with(member("A", "Limber", 100), member("B", "Limber", 100));
        state.active_mut(SideId::B).level = 60;

        let mut rng = BattleRng::seeded(1);
        let fissure = move_data("Fissure");
        assert!(!accuracy_check(&state, SideId::A, SideId::B, fissure, &mut rng));
    }

    #[test]
    fn test_thunder_sure_hit_in_rain() {
        let mut state = battle_with(member("A", "Limber", 100), member("B", "Limber", 100));
        state.field.set_weather(Weather::Rain, 5);

        let mut rng = BattleRng::seeded(1);
        let thunder = move_data("Thunder");
        for _ in 0..20 {
            assert!(accuracy_check(&state, SideId::A, SideId::B, thunder, &mut rng));
        }
    }

    #[test]
    fn test_apply_stat_changes_logs_and_clamps() {
        let mut state = battle_with(member("A", "Limber", 100), member("B", "Limber", 100));
        let mut log = TurnLog::new();

        apply_stat_changes(&mut state, SideId::A, &[(Stat::Atk, 2)], false, &mut log);
        assert_eq!(state.active(SideId::A).stages.atk, 2);
        assert!(log.contains("rose sharply"));

        state.active_mut(SideId::A).stages.set(Stat::Atk, 6);
        apply_stat_changes(&mut state, SideId::A, &[(Stat::Atk, 1)], false, &mut log);
        assert!(log.contains("won't go any higher"));
        assert_eq!(state.active(SideId::A).stages.atk, 6);
    }

    #[test]
    fn test_clear_body_blocks_opponent_drops() {
        let mut state = battle_with(member("A", "Clear Body", 100), member("B", "Limber", 100));
        let mut log = TurnLog::new();

        apply_stat_changes(&mut state, SideId::A, &[(Stat::Atk, -1)], true, &mut log);
        assert_eq!(state.active(SideId::A).stages.atk, 0);
        assert!(log.contains("were not lowered"));

        // Self-inflicted drops still apply
        apply_stat_changes(&mut state, SideId::A, &[(Stat::Def, -1)], false, &mut log);
        assert_eq!(state.active(SideId::A).stages.def, -1);
    }

    #[test]
    fn test_contrary_inverts() {
        let mut state = battle_with(member("A", "Contrary", 100), member("B", "Limber", 100));
        let mut log = TurnLog::new();

        apply_stat_changes(&mut state, SideId::A, &[(Stat::Atk, -1)], true, &mut log);
        assert_eq!(state.active(SideId::A).stages.atk, 1);
    }

    #[test]
    fn test_neutralizing_gas_suppression() {
        let state = battle_with(member("A", "Levitate", 100), member("B", "Neutralizing Gas", 100));
        assert!(abilities_suppressed(&state));
        assert!(!ability_active(&state, SideId::A));
        // The gas holder's own ability keeps working
        assert!(ability_active(&state, SideId::B));
    }

    #[test]
    fn test_mold_breaker_ignores_defender_ability() {
        let state = battle_with(member("A", "Mold Breaker", 100), member("B", "Levitate", 100));
        assert!(!defender_ability_active(&state, SideId::B));
        assert!(defender_ability_active(&state, SideId::A));
    }
}
