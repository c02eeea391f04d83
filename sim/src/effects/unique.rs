//! One-off move mechanics that fit no broader family

use std::collections::HashMap;

use fray_battle::{Stat, Status, Type, Volatile, VolatileState, Weather};

use crate::mechanics::apply_stat_changes;

use super::{EffectCtx, EffectFn};

pub(super) fn register(map: &mut HashMap<&'static str, EffectFn>) {
    map.insert("substitute", substitute);
    map.insert("leechseed", leech_seed);

    map.insert("wrap", partial_trap);
    map.insert("firespin", partial_trap);
    map.insert("whirlpool", partial_trap);

    map.insert("outrage", rampage);

    map.insert("curse", curse);
    map.insert("bellydrum", belly_drum);
    map.insert("rest", rest);

    map.insert("moonlight", weather_heal);
    map.insert("morningsun", weather_heal);
    map.insert("synthesis", weather_heal);

    map.insert("explosion", self_destruct);
    map.insert("selfdestruct", self_destruct);
    map.insert("memento", memento);

    map.insert("knockoff", knock_off);
}

/// Substitute costs a quarter of max HP and soaks hits until it breaks
fn substitute(ctx: &mut EffectCtx) {
    let user = ctx.user;
    let active = ctx.state.active(user);
    let cost = active.max_hp / 4;
    if active.has_volatile(Volatile::Substitute) || active.hp() <= cost {
        ctx.fail();
        return;
    }
    let active = ctx.state.active_mut(user);
    active.take_damage(cost);
    active.add_volatile(Volatile::Substitute, VolatileState::substitute(cost));
    let name = ctx.user_name();
    ctx.log.push(format!("{name} put in a substitute!"));
}

/// Leech Seed roots into anything that is not Grass-typed
fn leech_seed(ctx: &mut EffectCtx) {
    let target = ctx.target();
    if ctx.state.active(target).has_type(Type::Grass) {
        ctx.fail();
        return;
    }
    if ctx
        .state
        .active_mut(target)
        .add_volatile(Volatile::LeechSeed, VolatileState::permanent())
    {
        let name = ctx.target_name();
        ctx.log.push(format!("{name} was seeded!"));
    } else {
        ctx.fail();
    }
}

/// Binding moves chip the target each turn for 4-5 turns
fn partial_trap(ctx: &mut EffectCtx) {
    if ctx.damage_dealt == 0 {
        return;
    }
    let target = ctx.target();
    let turns = ctx.rng.range(4, 5);
    if ctx
        .state
        .active_mut(target)
        .add_volatile(Volatile::PartialTrap, VolatileState::for_turns(turns))
    {
        let name = ctx.target_name();
        let mov = ctx.mov.name;
        ctx.log.push(format!("{name} was trapped in {mov}!"));
    }
}

/// Rampage moves lock the user in for 2-3 turns; confusion lands when the
/// lock expires (handled by the end-of-turn pass)
fn rampage(ctx: &mut EffectCtx) {
    let user = ctx.user;
    if !ctx.state.active(user).has_volatile(Volatile::LockedMove) {
        let turns = ctx.rng.range(2, 3);
        let mov = ctx.mov.name;
        ctx.state
            .active_mut(user)
            .add_volatile(Volatile::LockedMove, VolatileState::with_move(mov, Some(turns)));
    }
}

/// Ghost-types pay half their HP to curse the target; everyone else trades
/// Speed for offense and bulk
fn curse(ctx: &mut EffectCtx) {
    let user = ctx.user;
    if ctx.state.active(user).has_type(Type::Ghost) {
        let target = ctx.target();
        if ctx.state.active(target).has_volatile(Volatile::Curse) {
            ctx.fail();
            return;
        }
        let cost = (ctx.state.active(user).max_hp / 2).max(1);
        ctx.state.active_mut(user).take_damage(cost);
        ctx.state
            .active_mut(target)
            .add_volatile(Volatile::Curse, VolatileState::permanent());
        let (user_name, target_name) = (ctx.user_name(), ctx.target_name());
        ctx.log.push(format!(
            "{user_name} cut its own HP and laid a curse on {target_name}!"
        ));
        if ctx.state.active(user).is_fainted() {
            ctx.log.push(format!("{user_name} fainted!"));
        }
    } else {
        apply_stat_changes(
            ctx.state,
            user,
            &[(Stat::Atk, 1), (Stat::Def, 1), (Stat::Spe, -1)],
            false,
            ctx.log,
        );
    }
}

/// Belly Drum pays half of max HP for maximum Attack
fn belly_drum(ctx: &mut EffectCtx) {
    let user = ctx.user;
    let active = ctx.state.active(user);
    let cost = active.max_hp / 2;
    if active.hp() <= cost || active.stages.atk >= 6 {
        ctx.fail();
        return;
    }
    let active = ctx.state.active_mut(user);
    active.take_damage(cost);
    active.stages.set(Stat::Atk, 6);
    let name = ctx.user_name();
    ctx.log.push(format!("{name} cut its own HP and maximized its Attack!"));
}

/// Rest trades two turns of sleep for a full heal
fn rest(ctx: &mut EffectCtx) {
    let user = ctx.user;
    let active = ctx.state.active(user);
    if active.hp() == active.max_hp || active.status == Some(Status::Sleep) {
        ctx.fail();
        return;
    }
    let active = ctx.state.active_mut(user);
    active.cure_status();
    active.set_status(Status::Sleep);
    active.sleep_turns = 2;
    let max = active.max_hp;
    active.set_hp(max);
    let name = ctx.user_name();
    ctx.log.push(format!("{name} slept and became healthy!"));
}

/// Sun doubles down on photosynthetic healing; other weather stifles it
fn weather_heal(ctx: &mut EffectCtx) {
    let user = ctx.user;
    let max = ctx.state.active(user).max_hp as u32;
    let amount = match ctx.state.field.weather() {
        Some(Weather::Sun) => max * 2 / 3,
        None => max / 2,
        Some(_) => max / 4,
    } as u16;

    let healed = ctx.state.active_mut(user).heal(amount);
    if healed > 0 {
        let name = ctx.user_name();
        ctx.log.push(format!("{name} regained health!"));
    } else {
        ctx.fail();
    }
}

/// The user goes down with the blast, even on a miss
fn self_destruct(ctx: &mut EffectCtx) {
    let user = ctx.user;
    let hp = ctx.state.active(user).hp();
    ctx.state.active_mut(user).take_damage(hp);
    let name = ctx.user_name();
    ctx.log.push(format!("{name} fainted!"));
}

/// Memento sacrifices the user; the offense drop rides the data tables
fn memento(ctx: &mut EffectCtx) {
    self_destruct(ctx);
}

/// Knock Off strips the target's held item
fn knock_off(ctx: &mut EffectCtx) {
    let target = ctx.target();
    let active = ctx.state.active(target);
    if active.item.is_none() || active.item_consumed || active.is_fainted() {
        return;
    }
    let active = ctx.state.active_mut(target);
    let item = active.item.take().unwrap_or_default();
    let (user_name, target_name) = (ctx.user_name(), ctx.target_name());
    ctx.log.push(format!("{user_name} knocked off {target_name}'s {item}!"));
}
