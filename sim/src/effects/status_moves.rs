//! Volatile-inflicting and disruption moves

use std::collections::HashMap;

use fray_battle::{SideId, Status, Type, Volatile, VolatileState};

use crate::mechanics::{apply_stat_changes, has_ability};
use crate::triggers::try_confuse;

use super::{EffectCtx, EffectFn};

pub(super) fn register(map: &mut HashMap<&'static str, EffectFn>) {
    map.insert("taunt", taunt);
    map.insert("encore", encore);
    map.insert("disable", disable);
    map.insert("torment", torment);
    map.insert("attract", attract);
    map.insert("confuseray", confuse_ray);
    map.insert("swagger", swagger);
    map.insert("yawn", yawn);
    map.insert("meanlook", trap);
    map.insert("lockon", lock_on);
    map.insert("focusenergy", focus_energy);
    map.insert("magnetrise", magnet_rise);
    map.insert("ingrain", ingrain);
    map.insert("aquaring", aqua_ring);
    map.insert("nightmare", nightmare);
    map.insert("perishsong", perish_song);
    map.insert("haze", haze);
    map.insert("healbell", heal_bell);
    map.insert("destinybond", destiny_bond);
}

fn taunt(ctx: &mut EffectCtx) {
    let target = ctx.target();
    if has_ability(ctx.state, target, "Oblivious") {
        ctx.fail();
        return;
    }
    if ctx
        .state
        .active_mut(target)
        .add_volatile(Volatile::Taunt, VolatileState::for_turns(3))
    {
        let name = ctx.target_name();
        ctx.log.push(format!("{name} fell for the taunt!"));
    } else {
        ctx.fail();
    }
}

/// Encore locks the target into repeating its last move for 3 turns
fn encore(ctx: &mut EffectCtx) {
    let target = ctx.target();
    let Some(last) = ctx.state.active(target).last_move.clone() else {
        ctx.fail();
        return;
    };
    if ctx
        .state
        .active_mut(target)
        .add_volatile(Volatile::Encore, VolatileState::with_move(last, Some(3)))
    {
        let name = ctx.target_name();
        ctx.log.push(format!("{name} received an encore!"));
    } else {
        ctx.fail();
    }
}

/// Disable forbids the target's last move for 4 turns
fn disable(ctx: &mut EffectCtx) {
    let target = ctx.target();
    let Some(last) = ctx.state.active(target).last_move.clone() else {
        ctx.fail();
        return;
    };
    if ctx
        .state
        .active_mut(target)
        .add_volatile(Volatile::Disable, VolatileState::with_move(last.clone(), Some(4)))
    {
        let name = ctx.target_name();
        ctx.log.push(format!("{name}'s {last} was disabled!"));
    } else {
        ctx.fail();
    }
}

fn torment(ctx: &mut EffectCtx) {
    let target = ctx.target();
    if ctx
        .state
        .active_mut(target)
        .add_volatile(Volatile::Torment, VolatileState::permanent())
    {
        let name = ctx.target_name();
        ctx.log.push(format!("{name} was subjected to torment!"));
    } else {
        ctx.fail();
    }
}

fn attract(ctx: &mut EffectCtx) {
    let target = ctx.target();
    if has_ability(ctx.state, target, "Oblivious") {
        ctx.fail();
        return;
    }
    if ctx
        .state
        .active_mut(target)
        .add_volatile(Volatile::Infatuation, VolatileState::permanent())
    {
        let name = ctx.target_name();
        ctx.log.push(format!("{name} fell in love!"));
    } else {
        ctx.fail();
    }
}

fn confuse_ray(ctx: &mut EffectCtx) {
    let target = ctx.target();
    let (state, log, rng) = (&mut *ctx.state, &mut *ctx.log, &mut *ctx.rng);
    if !try_confuse(state, target, log, rng) {
        ctx.fail();
    }
}

/// Swagger muddles the target and pumps its Attack
fn swagger(ctx: &mut EffectCtx) {
    let target = ctx.target();
    apply_stat_changes(ctx.state, target, &[(fray_battle::Stat::Atk, 2)], true, ctx.log);
    let (state, log, rng) = (&mut *ctx.state, &mut *ctx.log, &mut *ctx.rng);
    try_confuse(state, target, log, rng);
}

/// Yawn puts the target to sleep at the end of the next turn
fn yawn(ctx: &mut EffectCtx) {
    let target = ctx.target();
    if ctx.state.active(target).status.is_some() {
        ctx.fail();
        return;
    }
    if ctx
        .state
        .active_mut(target)
        .add_volatile(Volatile::Yawn, VolatileState::for_turns(1))
    {
        let name = ctx.target_name();
        ctx.log.push(format!("{name} grew drowsy!"));
    } else {
        ctx.fail();
    }
}

fn trap(ctx: &mut EffectCtx) {
    let target = ctx.target();
    if ctx.state.active(target).has_type(Type::Ghost) {
        ctx.fail();
        return;
    }
    if ctx
        .state
        .active_mut(target)
        .add_volatile(Volatile::Trapped, VolatileState::permanent())
    {
        let name = ctx.target_name();
        ctx.log.push(format!("{name} can no longer escape!"));
    } else {
        ctx.fail();
    }
}

/// Lock-On guarantees the user's next strike
fn lock_on(ctx: &mut EffectCtx) {
    let user = ctx.user;
    if ctx
        .state
        .active_mut(user)
        .add_volatile(Volatile::LockOn, VolatileState::permanent())
    {
        let (user_name, target_name) = (ctx.user_name(), ctx.target_name());
        ctx.log.push(format!("{user_name} took aim at {target_name}!"));
    } else {
        ctx.fail();
    }
}

fn focus_energy(ctx: &mut EffectCtx) {
    let user = ctx.user;
    if ctx
        .state
        .active_mut(user)
        .add_volatile(Volatile::FocusEnergy, VolatileState::permanent())
    {
        let name = ctx.user_name();
        ctx.log.push(format!("{name} is getting pumped!"));
    } else {
        ctx.fail();
    }
}

fn magnet_rise(ctx: &mut EffectCtx) {
    let user = ctx.user;
    if ctx.state.field.gravity() {
        ctx.fail();
        return;
    }
    if ctx
        .state
        .active_mut(user)
        .add_volatile(Volatile::MagnetRise, VolatileState::for_turns(5))
    {
        let name = ctx.user_name();
        ctx.log.push(format!("{name} levitated with electromagnetism!"));
    } else {
        ctx.fail();
    }
}

fn ingrain(ctx: &mut EffectCtx) {
    let user = ctx.user;
    if ctx
        .state
        .active_mut(user)
        .add_volatile(Volatile::Ingrain, VolatileState::permanent())
    {
        let name = ctx.user_name();
        ctx.log.push(format!("{name} planted its roots!"));
    } else {
        ctx.fail();
    }
}

fn aqua_ring(ctx: &mut EffectCtx) {
    let user = ctx.user;
    if ctx
        .state
        .active_mut(user)
        .add_volatile(Volatile::AquaRing, VolatileState::permanent())
    {
        let name = ctx.user_name();
        ctx.log.push(format!("{name} surrounded itself with a veil of water!"));
    } else {
        ctx.fail();
    }
}

/// Nightmare only torments sleeping targets
fn nightmare(ctx: &mut EffectCtx) {
    let target = ctx.target();
    if ctx.state.active(target).status != Some(Status::Sleep) {
        ctx.fail();
        return;
    }
    if ctx
        .state
        .active_mut(target)
        .add_volatile(Volatile::Nightmare, VolatileState::permanent())
    {
        let name = ctx.target_name();
        ctx.log.push(format!("{name} began having a nightmare!"));
    } else {
        ctx.fail();
    }
}

/// Perish Song puts a three-turn clock on both actives
fn perish_song(ctx: &mut EffectCtx) {
    let mut any = false;
    for id in SideId::BOTH {
        if ctx.state.active(id).is_alive() {
            any |= ctx
                .state
                .active_mut(id)
                .add_volatile(Volatile::PerishSong, VolatileState::for_turns(3));
        }
    }
    if any {
        ctx.log.push("All combatants that heard the song will faint in three turns!".to_string());
    } else {
        ctx.fail();
    }
}

/// Haze wipes every stage change on the field
fn haze(ctx: &mut EffectCtx) {
    for id in SideId::BOTH {
        ctx.state.active_mut(id).stages.clear();
    }
    ctx.log.push("All stat changes were eliminated!".to_string());
}

/// Heal Bell chimes every status off the user's roster
fn heal_bell(ctx: &mut EffectCtx) {
    let user = ctx.user;
    let mut cured = false;
    for member in &mut ctx.state.side_mut(user).roster {
        if member.status.is_some() && member.is_alive() {
            member.cure_status();
            cured = true;
        }
    }
    if cured {
        ctx.log.push("A bell chimed! The team was cured of status!".to_string());
    } else {
        ctx.fail();
    }
}

fn destiny_bond(ctx: &mut EffectCtx) {
    let user = ctx.user;
    ctx.state
        .active_mut(user)
        .add_volatile(Volatile::DestinyBond, VolatileState::permanent());
    let name = ctx.user_name();
    ctx.log.push(format!("{name} is hoping to take its attacker down with it!"));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::effect_for;
    use crate::log::TurnLog;
    use crate::rng::BattleRng;
    use fray_battle::{BattleState, Combatant, SideState, StatBlock};
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
            damage_dealt: 0,
            failed: false,
        };
        effect_for(move_name).expect("handler registered")(&mut ctx);
        ctx.failed
    }

    fn battle() -> BattleState {
        let member = |name: &str, ability: &str| {
            Combatant::new(
                name,
                50,
                vec![Type::Normal],
                StatBlock::new(80, 80, 80, 80, 80, 80),
                ability,
            )
        };
        BattleState::new(
            SideState::new(vec![member("Caster", "Limber")]),
            SideState::new(vec![member("Victim", "Limber")]),
        )
    }

    #[test]
    fn test_taunt_applies_once() {
        let mut state = battle();
        assert!(!run(&mut state, SideId::A, "Taunt"));
        assert!(state.active(SideId::B).has_volatile(Volatile::Taunt));
        assert!(run(&mut state, SideId::A, "Taunt"));
    }

    #[test]
    fn test_taunt_blocked_by_oblivious() {
        let mut state = battle();
        state.active_mut(SideId::B).ability = "Oblivious".to_string();
        assert!(run(&mut state, SideId::A, "Taunt"));
        assert!(!state.active(SideId::B).has_volatile(Volatile::Taunt));
    }

    #[test]
    fn test_encore_requires_last_move() {
        let mut state = battle();
        assert!(run(&mut state, SideId::A, "Encore"));

        state.active_mut(SideId::B).last_move = Some("Tackle".to_string());
        assert!(!run(&mut state, SideId::A, "Encore"));
        let encore = state.active(SideId::B).volatile(Volatile::Encore).unwrap();
        assert_eq!(encore.linked_move.as_deref(), Some("Tackle"));
        assert_eq!(encore.turns_left, Some(3));
    }

    #[test]
    fn test_disable_links_last_move() {
        let mut state = battle();
        state.active_mut(SideId::B).last_move = Some("Surf".to_string());
        assert!(!run(&mut state, SideId::A, "Disable"));
        let disable = state.active(SideId::B).volatile(Volatile::Disable).unwrap();
        assert_eq!(disable.linked_move.as_deref(), Some("Surf"));
    }

    #[test]
    fn test_yawn_fails_on_statused_target() {
        let mut state = battle();
        state.active_mut(SideId::B).set_status(Status::Burn);
        assert!(run(&mut state, SideId::A, "Yawn"));

        state.active_mut(SideId::B).cure_status();
        assert!(!run(&mut state, SideId::A, "Yawn"));
        assert!(state.active(SideId::B).has_volatile(Volatile::Yawn));
    }

    #[test]
    fn test_mean_look_fails_on_ghosts() {
        let mut state = battle();
        state.active_mut(SideId::B).types = vec![Type::Ghost];
        assert!(run(&mut state, SideId::A, "Mean Look"));

        state.active_mut(SideId::B).types = vec![Type::Normal];
        assert!(!run(&mut state, SideId::A, "Mean Look"));
        assert!(state.active(SideId::B).has_volatile(Volatile::Trapped));
    }

    #[test]
    fn test_nightmare_needs_sleeping_target() {
        let mut state = battle();
        assert!(run(&mut state, SideId::A, "Nightmare"));

        state.active_mut(SideId::B).set_status(Status::Sleep);
        assert!(!run(&mut state, SideId::A, "Nightmare"));
        assert!(state.active(SideId::B).has_volatile(Volatile::Nightmare));
    }

    #[test]
    fn test_perish_song_clocks_both() {
        let mut state = battle();
        assert!(!run(&mut state, SideId::A, "Perish Song"));
        for id in SideId::BOTH {
            let perish = state.active(id).volatile(Volatile::PerishSong).unwrap();
            assert_eq!(perish.turns_left, Some(3));
        }
    }

    #[test]
    fn test_haze_clears_everyone() {
        let mut state = battle();
        state.active_mut(SideId::A).stages.set(fray_battle::Stat::Atk, 4);
        state.active_mut(SideId::B).stages.set(fray_battle::Stat::Spe, -3);

        run(&mut state, SideId::A, "Haze");
        assert!(state.active(SideId::A).stages.is_clear());
        assert!(state.active(SideId::B).stages.is_clear());
    }

    #[test]
    fn test_heal_bell_cures_roster() {
        let member = |name: &str| {
            Combatant::new(
                name,
                50,
                vec![Type::Normal],
                StatBlock::new(80, 80, 80, 80, 80, 80),
                "Limber",
            )
        };
        let mut bench = member("Bench");
        bench.set_status(Status::Poison);
        let mut lead = member("Lead");
        lead.set_status(Status::Burn);

        let mut state = BattleState::new(
            SideState::new(vec![lead, bench]),
            SideState::new(vec![member("Foe")]),
        );

        assert!(!run(&mut state, SideId::A, "Heal Bell"));
        assert!(state.side(SideId::A).roster.iter().all(|c| c.status.is_none()));
    }

    #[test]
    fn test_confuse_ray_respects_own_tempo() {
        let mut state = battle();
        state.active_mut(SideId::B).ability = "Own Tempo".to_string();
        assert!(run(&mut state, SideId::A, "Confuse Ray"));

        state.active_mut(SideId::B).ability = "Limber".to_string();
        assert!(!run(&mut state, SideId::A, "Confuse Ray"));
        assert!(state.active(SideId::B).has_volatile(Volatile::Confusion));
    }
}
