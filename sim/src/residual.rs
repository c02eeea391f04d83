//! End-of-turn pass
//!
//! One uniform rule everywhere: apply the effect first, then decrement the
//! counter, and announce the condition's end when it reaches zero. Steps run
//! in a fixed order (weather, terrain, rooms, items, abilities, statuses,
//! drains, delayed conditions, countdowns, side conditions), side A before
//! side B within each step.

use fray_battle::{
    BattleState, SideCondition, SideId, Status, Terrain, Type, Volatile, Weather,
};

use crate::log::TurnLog;
use crate::mechanics::{ability_active, has_ability, is_grounded};
use crate::rng::BattleRng;
use crate::triggers::{
    end_of_turn_abilities, end_of_turn_items, indirect_damage, try_confuse, try_status,
};

/// Run the whole end-of-turn pass
pub fn end_of_turn(state: &mut BattleState, rng: &mut BattleRng, log: &mut TurnLog) {
    weather_pass(state, log);
    terrain_pass(state, log);
    rooms_pass(state, log);

    for side in SideId::BOTH {
        end_of_turn_items(state, side, log, rng);
    }
    for side in SideId::BOTH {
        end_of_turn_abilities(state, side, log, rng);
    }
    for side in SideId::BOTH {
        status_residual(state, side, log);
    }
    for side in SideId::BOTH {
        rooted_healing(state, side, log);
        drain_residuals(state, side, log);
    }
    for side in SideId::BOTH {
        delayed_conditions(state, side, log, rng);
    }
    for side in SideId::BOTH {
        volatile_countdowns(state, side, log, rng);
    }
    side_condition_countdowns(state, log);
}

fn check_faint(state: &BattleState, side: SideId, log: &mut TurnLog) {
    if state.active(side).is_fainted() {
        let name = state.active(side).species.clone();
        log.push(format!("{name} fainted!"));
    }
}

/// Weather chip for both actives, then the weather countdown
fn weather_pass(state: &mut BattleState, log: &mut TurnLog) {
    if let Some(weather) = state.field.weather() {
        if weather.is_damaging() {
            for side in SideId::BOTH {
                if state.active(side).is_fainted() {
                    continue;
                }
                let immune = match weather {
                    Weather::Sand => {
                        let c = state.active(side);
                        c.has_type(Type::Rock) || c.has_type(Type::Ground) || c.has_type(Type::Steel)
                            || has_ability(state, side, "Sand Rush")
                    }
                    Weather::Hail => {
                        state.active(side).has_type(Type::Ice)
                            || has_ability(state, side, "Ice Body")
                            || has_ability(state, side, "Slush Rush")
                    }
                    _ => false,
                };
                if !immune {
                    let amount = (state.active(side).max_hp / 16).max(1);
                    let what = if weather == Weather::Sand { "the sandstorm" } else { "the hail" };
                    indirect_damage(state, side, amount, what, log);
                    check_faint(state, side, log);
                }
            }
        }
        if let Some(ended) = state.field.tick_weather() {
            let line = match ended {
                Weather::Sun => "The sunlight faded.",
                Weather::Rain => "The rain stopped.",
                Weather::Sand => "The sandstorm subsided.",
                Weather::Hail => "The hail stopped.",
                Weather::Snow => "The snow stopped.",
            };
            log.push(line.to_string());
        }
    }
}

/// Grassy healing for grounded actives, then the terrain countdown
fn terrain_pass(state: &mut BattleState, log: &mut TurnLog) {
    if state.field.terrain() == Some(Terrain::Grassy) {
        for side in SideId::BOTH {
            if state.active(side).is_fainted() {
                continue;
            }
            let grounded = is_grounded(
                state.active(side),
                &state.field,
                ability_active(state, side),
            );
            if grounded {
                let amount = state.active(side).max_hp / 16;
                if state.active_mut(side).heal(amount) > 0 {
                    let name = state.active(side).species.clone();
                    log.push(format!("{name} was healed by the grassy terrain!"));
                }
            }
        }
    }
    if let Some(ended) = state.field.tick_terrain() {
        log.push(format!("The {ended} disappeared."));
    }
}

fn rooms_pass(state: &mut BattleState, log: &mut TurnLog) {
    if state.field.tick_trick_room() {
        log.push("The twisted dimensions returned to normal!".to_string());
    }
    if state.field.tick_gravity() {
        log.push("Gravity returned to normal!".to_string());
    }
}

/// Burn, poison, and the escalating toxic counter
fn status_residual(state: &mut BattleState, side: SideId, log: &mut TurnLog) {
    if state.active(side).is_fainted() {
        return;
    }
    let max_hp = state.active(side).max_hp as u32;

    match state.active(side).status {
        Some(Status::Burn) => {
            indirect_damage(state, side, (max_hp / 16).max(1) as u16, "its burn", log);
        }
        Some(Status::Poison) => {
            if has_ability(state, side, "Poison Heal") {
                poison_heal(state, side, log);
            } else {
                indirect_damage(state, side, (max_hp / 8).max(1) as u16, "poison", log);
            }
        }
        Some(Status::BadPoison) => {
            if has_ability(state, side, "Poison Heal") {
                poison_heal(state, side, log);
            } else {
                let counter = state.active(side).toxic_counter.max(1) as u32;
                let amount = (max_hp * counter / 16).max(1) as u16;
                indirect_damage(state, side, amount, "poison", log);
            }
            let active = state.active_mut(side);
            active.toxic_counter = active.toxic_counter.saturating_add(1);
        }
        _ => {}
    }
    check_faint(state, side, log);
}

fn poison_heal(state: &mut BattleState, side: SideId, log: &mut TurnLog) {
    let amount = state.active(side).max_hp / 8;
    if state.active_mut(side).heal(amount) > 0 {
        let name = state.active(side).species.clone();
        log.push(format!("{name}'s Poison Heal restored some HP!"));
    }
}

/// Ingrain and Aqua Ring restore a sixteenth each turn
fn rooted_healing(state: &mut BattleState, side: SideId, log: &mut TurnLog) {
    if state.active(side).is_fainted() {
        return;
    }
    for (volatile, what) in [
        (Volatile::Ingrain, "its roots"),
        (Volatile::AquaRing, "its veil of water"),
    ] {
        if state.active(side).has_volatile(volatile) {
            let amount = state.active(side).max_hp / 16;
            if state.active_mut(side).heal(amount) > 0 {
                let name = state.active(side).species.clone();
                log.push(format!("{name} restored HP with {what}!"));
            }
        }
    }
}

/// Leech Seed, Curse, Nightmare, and partial-trap chip
fn drain_residuals(state: &mut BattleState, side: SideId, log: &mut TurnLog) {
    if state.active(side).is_fainted() {
        return;
    }
    let max_hp = state.active(side).max_hp as u32;

    if state.active(side).has_volatile(Volatile::LeechSeed) {
        let amount = (max_hp / 8).max(1) as u16;
        let drained = indirect_damage(state, side, amount, "Leech Seed", log);
        let opponent = side.opponent();
        if drained > 0 && state.active(opponent).is_alive() {
            state.active_mut(opponent).heal(drained);
        }
        check_faint(state, side, log);
    }

    if state.active(side).has_volatile(Volatile::Curse) && state.active(side).is_alive() {
        indirect_damage(state, side, (max_hp / 4).max(1) as u16, "the curse", log);
        check_faint(state, side, log);
    }

    if state.active(side).has_volatile(Volatile::Nightmare) && state.active(side).is_alive() {
        if state.active(side).status == Some(Status::Sleep) {
            indirect_damage(state, side, (max_hp / 4).max(1) as u16, "its nightmare", log);
            check_faint(state, side, log);
        } else {
            state.active_mut(side).remove_volatile(Volatile::Nightmare);
        }
    }

    if state.active(side).has_volatile(Volatile::PartialTrap) && state.active(side).is_alive() {
        indirect_damage(state, side, (max_hp / 8).max(1) as u16, "the binding", log);
        check_faint(state, side, log);
    }
}

/// Yawn drowsiness and the Perish Song clock
fn delayed_conditions(
    state: &mut BattleState,
    side: SideId,
    log: &mut TurnLog,
    rng: &mut BattleRng,
) {
    if state.active(side).is_fainted() {
        return;
    }

    let yawn_expired = state
        .active_mut(side)
        .volatile_mut(Volatile::Yawn)
        .map(|v| v.tick())
        .unwrap_or(false);
    if yawn_expired {
        state.active_mut(side).remove_volatile(Volatile::Yawn);
        try_status(state, side, Status::Sleep, None, log, rng);
    }

    if state.active(side).has_volatile(Volatile::PerishSong) {
        let expired = state
            .active_mut(side)
            .volatile_mut(Volatile::PerishSong)
            .map(|v| v.tick())
            .unwrap_or(false);
        let name = state.active(side).species.clone();
        if expired {
            let hp = state.active(side).hp();
            state.active_mut(side).take_damage(hp);
            log.push(format!("{name}'s perish count fell to 0!"));
            log.push(format!("{name} fainted!"));
        } else {
            let left = state
                .active(side)
                .volatile(Volatile::PerishSong)
                .and_then(|v| v.turns_left)
                .unwrap_or(0);
            log.push(format!("{name}'s perish count fell to {left}!"));
        }
    }
}

/// Tick the timed volatiles, announcing each expiry
fn volatile_countdowns(
    state: &mut BattleState,
    side: SideId,
    log: &mut TurnLog,
    rng: &mut BattleRng,
) {
    if state.active(side).is_fainted() {
        return;
    }
    let name = state.active(side).species.clone();

    let timed = [
        (Volatile::Taunt, "taunt wore off"),
        (Volatile::Encore, "encore ended"),
        (Volatile::Disable, "move is no longer disabled"),
        (Volatile::HealBlock, "Heal Block wore off"),
        (Volatile::MagnetRise, "electromagnetism wore off"),
        (Volatile::PartialTrap, "binding loosened"),
    ];
    for (volatile, message) in timed {
        let expired = state
            .active_mut(side)
            .volatile_mut(volatile)
            .map(|v| v.tick())
            .unwrap_or(false);
        if expired {
            state.active_mut(side).remove_volatile(volatile);
            log.push(format!("{name}'s {message}!"));
        }
    }

    // Rampage locks end in confusion
    let rampage_over = state
        .active_mut(side)
        .volatile_mut(Volatile::LockedMove)
        .map(|v| v.tick())
        .unwrap_or(false);
    if rampage_over {
        state.active_mut(side).remove_volatile(Volatile::LockedMove);
        log.push(format!("{name} became confused due to fatigue!"));
        try_confuse(state, side, log, rng);
    }
}

/// Tick screens, Tailwind, Safeguard, and Mist on both sides.
/// Conditions are visited in a fixed order so logs replay identically.
fn side_condition_countdowns(state: &mut BattleState, log: &mut TurnLog) {
    const TIMED: [SideCondition; 6] = [
        SideCondition::Reflect,
        SideCondition::LightScreen,
        SideCondition::AuroraVeil,
        SideCondition::Tailwind,
        SideCondition::Safeguard,
        SideCondition::Mist,
    ];

    for side in SideId::BOTH {
        for cond in TIMED {
            let expired = state
                .side_mut(side)
                .conditions
                .get_mut(&cond)
                .map(|s| s.tick())
                .unwrap_or(false);
            if expired {
                state.side_mut(side).remove_condition(cond);
                let line = match cond {
                    SideCondition::Tailwind => format!("Side {side}'s Tailwind petered out!"),
                    _ => format!("Side {side}'s {cond} wore off!"),
                };
                log.push(line);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fray_battle::{Combatant, SideState, StatBlock, VolatileState};

    fn member(species: &str, typ: Type, ability: &str) -> Combatant {
        Combatant::new(
            species,
            50,
            vec![typ],
            StatBlock::new(100, 100, 100, 100, 100, 100),
            ability,
        )
    }

    fn battle() -> BattleState {
        BattleState::new(
            SideState::new(vec![member("Alpha", Type::Normal, "Limber")]),
            SideState::new(vec![member("Beta", Type::Normal, "Limber")]),
        )
    }

    fn run(state: &mut BattleState) -> TurnLog {
        let mut log = TurnLog::new();
        let mut rng = BattleRng::seeded(1);
        end_of_turn(state, &mut rng, &mut log);
        log
    }

    #[test]
    fn test_burn_residual() {
        let mut state = battle();
        state.active_mut(SideId::A).set_status(Status::Burn);
        let max = state.active(SideId::A).max_hp;

        run(&mut state);
        assert_eq!(state.active(SideId::A).hp(), max - max / 16);
    }

    #[test]
    fn test_toxic_escalates() {
        let mut state = battle();
        state.active_mut(SideId::A).set_status(Status::BadPoison);
        let max = state.active(SideId::A).max_hp;

        run(&mut state);
        let after_one = max - max / 16;
        assert_eq!(state.active(SideId::A).hp(), after_one);

        run(&mut state);
        let after_two = after_one - (max as u32 * 2 / 16) as u16;
        assert_eq!(state.active(SideId::A).hp(), after_two);

        run(&mut state);
        let after_three = after_two - (max as u32 * 3 / 16) as u16;
        assert_eq!(state.active(SideId::A).hp(), after_three);
    }

    #[test]
    fn test_poison_heal_inverts_poison() {
        let mut state = battle();
        state.active_mut(SideId::A).ability = "Poison Heal".to_string();
        state.active_mut(SideId::A).set_status(Status::Poison);
        let max = state.active(SideId::A).max_hp;
        state.active_mut(SideId::A).set_hp(max / 2);

        run(&mut state);
        assert_eq!(state.active(SideId::A).hp(), max / 2 + max / 8);
    }

    #[test]
    fn test_sandstorm_chips_non_immune() {
        let mut state = BattleState::new(
            SideState::new(vec![member("Soft", Type::Normal, "Limber")]),
            SideState::new(vec![member("Stone", Type::Rock, "Limber")]),
        );
        state.field.set_weather(Weather::Sand, 5);
        let max_a = state.active(SideId::A).max_hp;
        let max_b = state.active(SideId::B).max_hp;

        run(&mut state);
        assert_eq!(state.active(SideId::A).hp(), max_a - max_a / 16);
        assert_eq!(state.active(SideId::B).hp(), max_b);
    }

    #[test]
    fn test_weather_applies_then_decrements() {
        let mut state = battle();
        state.field.set_weather(Weather::Sand, 2);
        let max = state.active(SideId::A).max_hp;

        // Turn 1: chip lands, counter falls to 1
        let log = run(&mut state);
        assert_eq!(state.active(SideId::A).hp(), max - max / 16);
        assert!(!log.contains("subsided"));

        // Turn 2: chip lands again, then the weather ends
        let log = run(&mut state);
        assert_eq!(state.active(SideId::A).hp(), max - 2 * (max / 16));
        assert!(log.contains("subsided"));
        assert!(state.field.weather().is_none());
    }

    #[test]
    fn test_grassy_terrain_heals_grounded() {
        let mut state = battle();
        state.field.set_terrain(Terrain::Grassy, 5);
        let max = state.active(SideId::A).max_hp;
        state.active_mut(SideId::A).set_hp(max / 2);

        run(&mut state);
        assert_eq!(state.active(SideId::A).hp(), max / 2 + max / 16);
    }

    #[test]
    fn test_leech_seed_transfers() {
        let mut state = battle();
        state
            .active_mut(SideId::A)
            .add_volatile(Volatile::LeechSeed, VolatileState::permanent());
        let max_a = state.active(SideId::A).max_hp;
        let max_b = state.active(SideId::B).max_hp;
        state.active_mut(SideId::B).set_hp(max_b / 2);

        run(&mut state);
        assert_eq!(state.active(SideId::A).hp(), max_a - max_a / 8);
        assert_eq!(state.active(SideId::B).hp(), max_b / 2 + max_a / 8);
    }

    #[test]
    fn test_taunt_counts_down_and_expires() {
        let mut state = battle();
        state
            .active_mut(SideId::A)
            .add_volatile(Volatile::Taunt, VolatileState::for_turns(2));

        let log = run(&mut state);
        assert!(state.active(SideId::A).has_volatile(Volatile::Taunt));
        assert!(!log.contains("taunt wore off"));

        let log = run(&mut state);
        assert!(!state.active(SideId::A).has_volatile(Volatile::Taunt));
        assert!(log.contains("taunt wore off"));
    }

    #[test]
    fn test_yawn_puts_to_sleep() {
        let mut state = battle();
        state
            .active_mut(SideId::A)
            .add_volatile(Volatile::Yawn, VolatileState::for_turns(1));

        run(&mut state);
        assert_eq!(state.active(SideId::A).status, Some(Status::Sleep));
        assert!(!state.active(SideId::A).has_volatile(Volatile::Yawn));
    }

    #[test]
    fn test_perish_song_clock() {
        let mut state = battle();
        state
            .active_mut(SideId::A)
            .add_volatile(Volatile::PerishSong, VolatileState::for_turns(3));

        let log = run(&mut state);
        assert!(log.contains("fell to 2"));
        assert!(state.active(SideId::A).is_alive());

        run(&mut state);
        let log = run(&mut state);
        assert!(log.contains("fell to 0"));
        assert!(state.active(SideId::A).is_fainted());
    }

    #[test]
    fn test_screen_countdown_expires() {
        let mut state = battle();
        state.side_mut(SideId::A).add_condition(SideCondition::Reflect);

        for _ in 0..4 {
            let log = run(&mut state);
            assert!(!log.contains("wore off"));
        }
        let log = run(&mut state);
        assert!(log.contains("Reflect wore off"));
        assert!(!state.side(SideId::A).has_condition(SideCondition::Reflect));
    }

    #[test]
    fn test_rampage_ends_in_confusion() {
        let mut state = battle();
        state.active_mut(SideId::A).add_volatile(
            Volatile::LockedMove,
            VolatileState::with_move("Outrage", Some(1)),
        );

        let log = run(&mut state);
        assert!(!state.active(SideId::A).has_volatile(Volatile::LockedMove));
        assert!(log.contains("fatigue"));
        assert!(state.active(SideId::A).has_volatile(Volatile::Confusion));
    }

    #[test]
    fn test_hazards_do_not_time_out() {
        let mut state = battle();
        state.side_mut(SideId::A).add_condition(SideCondition::Spikes);

        for _ in 0..10 {
            run(&mut state);
        }
        assert!(state.side(SideId::A).has_condition(SideCondition::Spikes));
    }
}
