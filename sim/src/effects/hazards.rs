//! Entry hazards, hazard removal, and screen-shattering attacks

use std::collections::HashMap;

use fray_battle::{SideCondition, Stat};

use crate::mechanics::apply_stat_changes;

use super::{EffectCtx, EffectFn};

pub(super) fn register(map: &mut HashMap<&'static str, EffectFn>) {
    map.insert("spikes", spikes);
    map.insert("toxicspikes", toxic_spikes);
    map.insert("stealthrock", stealth_rock);
    map.insert("stickyweb", sticky_web);

    map.insert("rapidspin", rapid_spin);
    map.insert("defog", defog);

    map.insert("brickbreak", shatter_screens);
    map.insert("psychicfangs", shatter_screens);
}

fn spikes(ctx: &mut EffectCtx) {
    set_hazard(ctx, SideCondition::Spikes);
}

fn toxic_spikes(ctx: &mut EffectCtx) {
    set_hazard(ctx, SideCondition::ToxicSpikes);
}

fn stealth_rock(ctx: &mut EffectCtx) {
    set_hazard(ctx, SideCondition::StealthRock);
}

fn sticky_web(ctx: &mut EffectCtx) {
    set_hazard(ctx, SideCondition::StickyWeb);
}

/// Lay a hazard on the opposing side. Re-laying a capped hazard fails and
/// leaves the stored layer count untouched.
fn set_hazard(ctx: &mut EffectCtx, hazard: SideCondition) {
    let target = ctx.target();
    if ctx.state.side_mut(target).add_condition(hazard) {
        let name = ctx.target_name();
        let line = match hazard {
            SideCondition::Spikes => format!("Spikes were scattered around {name}'s team!"),
            SideCondition::ToxicSpikes => {
                format!("Poison spikes were scattered around {name}'s team!")
            }
            SideCondition::StealthRock => {
                format!("Pointed stones float in the air around {name}'s team!")
            }
            _ => format!("A sticky web spreads out beneath {name}'s team!"),
        };
        ctx.log.push(line);
    } else {
        ctx.fail();
    }
}

/// Rapid Spin clears the spinner's own hazards and picks up speed
fn rapid_spin(ctx: &mut EffectCtx) {
    let user = ctx.user;
    let removed = ctx.state.side_mut(user).clear_hazards();
    if !removed.is_empty() {
        let name = ctx.user_name();
        ctx.log.push(format!("{name} blew away the hazards with Rapid Spin!"));
    }
    let leech = ctx
        .state
        .active_mut(user)
        .remove_volatile(fray_battle::Volatile::LeechSeed);
    if leech {
        let name = ctx.user_name();
        ctx.log.push(format!("{name} shed Leech Seed with Rapid Spin!"));
    }
    apply_stat_changes(ctx.state, user, &[(Stat::Spe, 1)], false, ctx.log);
}

/// Defog strips hazards and screens from both sides
fn defog(ctx: &mut EffectCtx) {
    let mut cleared = false;
    for id in fray_battle::SideId::BOTH {
        let side = ctx.state.side_mut(id);
        cleared |= !side.clear_hazards().is_empty();
        for screen in [
            SideCondition::Reflect,
            SideCondition::LightScreen,
            SideCondition::AuroraVeil,
            SideCondition::Safeguard,
            SideCondition::Mist,
        ] {
            cleared |= side.remove_condition(screen);
        }
    }
    if cleared {
        ctx.log.push("The battlefield was cleared of hazards and screens!".to_string());
    }
}

/// Brick Break and Psychic Fangs smash the target's screens
fn shatter_screens(ctx: &mut EffectCtx) {
    let target = ctx.target();
    let side = ctx.state.side_mut(target);
    let mut broke = false;
    for screen in [
        SideCondition::Reflect,
        SideCondition::LightScreen,
        SideCondition::AuroraVeil,
    ] {
        broke |= side.remove_condition(screen);
    }
    if broke {
        let name = ctx.target_name();
        ctx.log.push(format!("{name}'s screens shattered!"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::effect_for;
    use crate::log::TurnLog;
    use crate::rng::BattleRng;
    use fray_battle::{BattleState, Combatant, SideId, SideState, StatBlock, Type, Volatile, VolatileState};
    use fray_dex::move_data;

    fn run(state: &mut BattleState, user: SideId, move_name: &str) -> bool {
        let mut log = TurnLog::new();
        let mut rng = BattleRng::seeded(1);
        let mut ctx = EffectCtx {
            state,
            user,
            mov: move_data(move_name),
            rng: &mut rng,
            log: &mut log,
            damage_dealt: 10,
            failed: false,
        };
        effect_for(move_name).expect("handler registered")(&mut ctx);
        ctx.failed
    }

    fn battle() -> BattleState {
        let member = |name: &str| {
            Combatant::new(
                name,
                50,
                vec![Type::Normal],
                StatBlock::new(80, 80, 80, 80, 80, 80),
                "Limber",
            )
        };
        BattleState::new(
            SideState::new(vec![member("Layer")]),
            SideState::new(vec![member("Victim")]),
        )
    }

    #[test]
    fn test_spikes_stack_to_three_then_fail() {
        let mut state = battle();

        assert!(!run(&mut state, SideId::A, "Spikes"));
        assert!(!run(&mut state, SideId::A, "Spikes"));
        assert!(!run(&mut state, SideId::A, "Spikes"));
        assert_eq!(state.side(SideId::B).condition_layers(SideCondition::Spikes), 3);

        // Fourth layer fails and the count stays put
        assert!(run(&mut state, SideId::A, "Spikes"));
        assert_eq!(state.side(SideId::B).condition_layers(SideCondition::Spikes), 3);
    }

    #[test]
    fn test_stealth_rock_single_layer() {
        let mut state = battle();
        assert!(!run(&mut state, SideId::A, "Stealth Rock"));
        assert!(run(&mut state, SideId::A, "Stealth Rock"));
        assert_eq!(
            state.side(SideId::B).condition_layers(SideCondition::StealthRock),
            1
        );
    }

    #[test]
    fn test_rapid_spin_clears_own_side_only() {
        let mut state = battle();
        state.side_mut(SideId::A).add_condition(SideCondition::Spikes);
        state.side_mut(SideId::B).add_condition(SideCondition::StealthRock);
        state
            .active_mut(SideId::A)
            .add_volatile(Volatile::LeechSeed, VolatileState::permanent());

        run(&mut state, SideId::A, "Rapid Spin");

        assert!(!state.side(SideId::A).has_hazards());
        assert!(state.side(SideId::B).has_hazards());
        assert!(!state.active(SideId::A).has_volatile(Volatile::LeechSeed));
        assert_eq!(state.active(SideId::A).stages.spe, 1);
    }

    #[test]
    fn test_defog_clears_both_sides() {
        let mut state = battle();
        state.side_mut(SideId::A).add_condition(SideCondition::Spikes);
        state.side_mut(SideId::B).add_condition(SideCondition::Reflect);
        state.side_mut(SideId::B).add_condition(SideCondition::StealthRock);

        run(&mut state, SideId::A, "Defog");

        assert!(!state.side(SideId::A).has_hazards());
        assert!(!state.side(SideId::B).has_hazards());
        assert!(!state.side(SideId::B).has_screens());
    }

    #[test]
    fn test_brick_break_shatters_screens() {
        let mut state = battle();
        state.side_mut(SideId::B).add_condition(SideCondition::Reflect);
        state.side_mut(SideId::B).add_condition(SideCondition::LightScreen);

        run(&mut state, SideId::A, "Brick Break");
        assert!(!state.side(SideId::B).has_screens());
    }
}
