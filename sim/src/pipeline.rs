//! The move-effect pipeline: one action, resolved through an ordered chain
//! of short-circuiting gates. Each gate either blocks (logging why) or
//! passes the action further along.
//!
//! Gate order: alive → recharge → self-inability (sleep, freeze, flinch,
//! confusion, infatuation, paralysis) → move-legality locks → two-turn
//! charge handling → self-protection → opposing protection → pre-use
//! conditions → immunity → accuracy → damage (looped per hit) → on-hit
//! triggers → secondaries → data-driven stat changes → bespoke registry
//! effect → post-move consumption (recoil, drain, items, faints, switches).

use fray_battle::{
    BattleState, SideId, Status, Type, Volatile, VolatileState, Weather,
};
use fray_dex::{
    item_data, move_data, normalize_id, MoveCategory, MoveData, MultiHit, SecondaryKind, STRUGGLE,
};

use crate::actions::Action;
use crate::damage::DamageModel;
use crate::effects::{effect_for, EffectCtx};
use crate::log::TurnLog;
use crate::mechanics::{
    accuracy_check, apply_stat_changes, defender_ability_active, has_ability, has_item,
};
use crate::rng::BattleRng;
use crate::triggers::{
    indirect_damage, on_damaging_hit, on_faint, on_switch_in, status_immunity_reason, try_confuse,
    try_status,
};

/// What the pipeline needs to know about the rest of the turn
#[derive(Debug, Clone)]
pub struct TurnContext {
    /// The opposing side's chosen action this turn
    pub opponent_action: Action,
    /// Whether the opposing side has already resolved its action
    pub opponent_has_acted: bool,
}

/// Execute one side's action against the current state
pub fn execute_action(
    state: &mut BattleState,
    side: SideId,
    action: &Action,
    tctx: &TurnContext,
    model: &dyn DamageModel,
    rng: &mut BattleRng,
    log: &mut TurnLog,
) {
    match action {
        Action::Switch(target) => execute_switch(state, side, target, log, rng),
        Action::Move(name) => execute_move(state, side, name, tctx, model, rng, log),
    }
}

/// Resolve a voluntary switch
pub fn execute_switch(
    state: &mut BattleState,
    side: SideId,
    target: &str,
    log: &mut TurnLog,
    rng: &mut BattleRng,
) {
    let Some(index) = state.side(side).find_member(target) else {
        log.push(format!("{side} has no {target} to send out!"));
        return;
    };

    // Outgoing combatant's parting abilities
    if state.active(side).is_alive() && crate::mechanics::ability_active(state, side) {
        match fray_dex::ability_data(&state.active(side).ability).name {
            "Natural Cure" => {
                state.active_mut(side).cure_status();
            }
            "Regenerator" => {
                let amount = state.active(side).max_hp / 3;
                state.active_mut(side).heal(amount);
            }
            _ => {}
        }
    }

    if !state.side_mut(side).switch_to(index) {
        log.push(format!("{side} could not switch to {target}!"));
        return;
    }

    let name = state.active(side).species.clone();
    log.push(format!("Side {side} sent out {name}!"));
    on_switch_in(state, side, log, rng);
}

/// Reasons a move fails before it even rolls accuracy
fn pre_use_failure(
    state: &BattleState,
    side: SideId,
    mov: &MoveData,
    tctx: &TurnContext,
) -> bool {
    match normalize_id(mov.name).as_str() {
        // Only works on the user's first action after entering (the cleanup
        // pass has already advanced the counter once by then)
        "fakeout" => state.active(side).active_turns > 1,
        // Only connects while the target is readying a damaging move
        "suckerpunch" => {
            if tctx.opponent_has_acted {
                return true;
            }
            match &tctx.opponent_action {
                Action::Move(name) => !move_data(name).is_damaging(),
                Action::Switch(_) => true,
            }
        }
        _ => false,
    }
}

/// Self-sacrifice moves blow up even when they fail to connect
fn sacrifice_on_failure(state: &mut BattleState, side: SideId, mov: &MoveData, log: &mut TurnLog) {
    if matches!(
        normalize_id(mov.name).as_str(),
        "explosion" | "selfdestruct" | "memento"
    ) {
        let hp = state.active(side).hp();
        state.active_mut(side).take_damage(hp);
        let name = state.active(side).species.clone();
        log.push(format!("{name} fainted!"));
    }
}

/// Confusion's self-hit: a 40-power typeless physical strike at oneself
fn confusion_self_hit(state: &mut BattleState, side: SideId, rng: &mut BattleRng) -> u16 {
    let active = state.active(side);
    let attack = crate::damage::staged_stat(active.stats.atk, active.stages.atk);
    let defense = crate::damage::staged_stat(active.stats.def, active.stages.def).max(1);
    let level_term = (2 * active.level as u32) / 5 + 2;
    let base = level_term * 40 * attack / defense / 50 + 2;
    let roll = rng.damage_roll() as u32;
    (base * roll / 100).max(1) as u16
}

/// Apply move damage to the defender's real HP pool, honoring the
/// survive-at-1 outs (Endure, Focus Sash, Sturdy). Returns damage dealt.
fn apply_move_damage(
    state: &mut BattleState,
    defender: SideId,
    amount: u16,
    log: &mut TurnLog,
) -> u16 {
    let active = state.active(defender);
    let name = active.species.clone();
    let hp = active.hp();

    if amount >= hp {
        if active.has_volatile(Volatile::Endure) {
            let dealt = hp - 1;
            state.active_mut(defender).set_hp(1);
            log.push(format!("{name} endured the hit!"));
            return dealt;
        }
        let full = hp == active.max_hp;
        if full && has_item(state, defender, "Focus Sash") {
            let dealt = hp - 1;
            let active = state.active_mut(defender);
            active.set_hp(1);
            active.item = None;
            active.item_consumed = true;
            log.push(format!("{name} hung on using its Focus Sash!"));
            return dealt;
        }
        if full && defender_ability_active(state, defender)
            && fray_dex::ability_data(&state.active(defender).ability).name == "Sturdy"
        {
            let dealt = hp - 1;
            state.active_mut(defender).set_hp(1);
            log.push(format!("{name} endured the hit with Sturdy!"));
            return dealt;
        }
    }

    state.active_mut(defender).take_damage(amount)
}

/// Whether the defender's substitute soaks this move
fn substitute_blocks(state: &BattleState, attacker: SideId, mov: &MoveData) -> bool {
    state
        .active(attacker.opponent())
        .has_volatile(Volatile::Substitute)
        && !mov.sound
        && !has_ability(state, attacker, "Infiltrator")
}

/// Ability-based absorption and immunity, checked before accuracy.
/// Returns true (and logs) when the defender's ability nullifies the move.
fn ability_absorbs(
    state: &mut BattleState,
    attacker: SideId,
    mov: &MoveData,
    log: &mut TurnLog,
) -> bool {
    let defender = attacker.opponent();
    if !defender_ability_active(state, defender) {
        return false;
    }
    let ability = fray_dex::ability_data(&state.active(defender).ability).name;
    let name = state.active(defender).species.clone();

    match (ability, mov.typ) {
        ("Levitate", Type::Ground) if !state.field.gravity() => {
            log.push(format!("{name}'s Levitate makes Ground moves miss!"));
            true
        }
        ("Volt Absorb", Type::Electric) => {
            let amount = state.active(defender).max_hp / 4;
            state.active_mut(defender).heal(amount);
            log.push(format!("{name}'s Volt Absorb soaked up the attack!"));
            true
        }
        ("Water Absorb", Type::Water) | ("Dry Skin", Type::Water) => {
            let amount = state.active(defender).max_hp / 4;
            state.active_mut(defender).heal(amount);
            log.push(format!("{name}'s {ability} soaked up the attack!"));
            true
        }
        ("Flash Fire", Type::Fire) => {
            state
                .active_mut(defender)
                .add_volatile(Volatile::FlashFire, VolatileState::permanent());
            log.push(format!("{name}'s Flash Fire raised the power of its Fire moves!"));
            true
        }
        ("Lightning Rod", Type::Electric) => {
            log.push(format!("{name}'s Lightning Rod drew in the attack!"));
            apply_stat_changes(state, defender, &[(fray_battle::Stat::Spa, 1)], false, log);
            true
        }
        ("Sap Sipper", Type::Grass) => {
            log.push(format!("{name}'s Sap Sipper drew in the attack!"));
            apply_stat_changes(state, defender, &[(fray_battle::Stat::Atk, 1)], false, log);
            true
        }
        _ => false,
    }
}

/// Resolve one move action through the full gate chain
pub fn execute_move(
    state: &mut BattleState,
    side: SideId,
    chosen: &str,
    tctx: &TurnContext,
    model: &dyn DamageModel,
    rng: &mut BattleRng,
    log: &mut TurnLog,
) {
    let target = side.opponent();

    // Gate: actor alive
    if state.active(side).is_fainted() {
        return;
    }
    let name = state.active(side).species.clone();

    // Gate: forced recharge consumes the turn
    if state.active(side).has_volatile(Volatile::Recharging) {
        state.active_mut(side).remove_volatile(Volatile::Recharging);
        log.push(format!("{name} must recharge!"));
        return;
    }

    // Gate: sleep
    if state.active(side).status == Some(Status::Sleep) {
        let active = state.active_mut(side);
        active.sleep_turns = active.sleep_turns.saturating_sub(1);
        if active.sleep_turns == 0 {
            active.cure_status();
            log.push(format!("{name} woke up!"));
        } else {
            log.push(format!("{name} is fast asleep."));
            return;
        }
    }

    // Gate: freeze, with a 20% natural thaw and thawing moves
    if state.active(side).status == Some(Status::Freeze) {
        let chosen_data = move_data(chosen);
        if chosen_data.thaws_user || rng.percent(20) {
            state.active_mut(side).cure_status();
            log.push(format!("{name} thawed out!"));
        } else {
            log.push(format!("{name} is frozen solid!"));
            return;
        }
    }

    // Gate: flinch
    if state.active(side).has_volatile(Volatile::Flinch) {
        log.push(format!("{name} flinched and couldn't move!"));
        return;
    }

    // Gate: confusion, counted down per action attempt
    if state.active(side).has_volatile(Volatile::Confusion) {
        let expired = state
            .active_mut(side)
            .volatile_mut(Volatile::Confusion)
            .map(|v| v.tick())
            .unwrap_or(false);
        if expired {
            state.active_mut(side).remove_volatile(Volatile::Confusion);
            log.push(format!("{name} snapped out of its confusion!"));
        } else {
            log.push(format!("{name} is confused!"));
            if rng.chance(33, 100) {
                let damage = confusion_self_hit(state, side, rng);
                state.active_mut(side).take_damage(damage);
                log.push("It hurt itself in its confusion!".to_string());
                if state.active(side).is_fainted() {
                    log.push(format!("{name} fainted!"));
                }
                return;
            }
        }
    }

    // Gate: infatuation
    if state.active(side).has_volatile(Volatile::Infatuation) && rng.percent(50) {
        log.push(format!("{name} is immobilized by love!"));
        return;
    }

    // Gate: full paralysis
    if state.active(side).status == Some(Status::Paralysis) && rng.percent(25) {
        log.push(format!("{name} is paralyzed! It can't move!"));
        return;
    }

    // Gate: move-legality locks. The legality layer keeps drivers honest;
    // these re-checks keep the pipeline itself honest.
    let mut chosen = chosen.to_string();
    if let Some(encored) = state
        .active(side)
        .volatile(Volatile::Encore)
        .and_then(|v| v.linked_move.clone())
    {
        chosen = encored;
    }
    {
        let active = state.active(side);
        let data = move_data(&chosen);
        if active.has_volatile(Volatile::Taunt) && !data.is_damaging() {
            log.push(format!("{name} can't use {chosen} after the taunt!"));
            return;
        }
        if active
            .volatile(Volatile::Disable)
            .and_then(|v| v.linked_move.as_deref())
            == Some(chosen.as_str())
        {
            log.push(format!("{name}'s {chosen} is disabled!"));
            return;
        }
        if active.has_volatile(Volatile::Torment)
            && active.last_move.as_deref() == Some(chosen.as_str())
        {
            log.push(format!("{name} can't use {chosen} twice in a row!"));
            return;
        }
        if active.has_volatile(Volatile::HealBlock) && data.is_healing() {
            log.push(format!("{name} can't heal while blocked!"));
            return;
        }
        if let Some(lock) = &active.choice_lock {
            if lock != &chosen {
                log.push(format!("{name} is locked into {lock}!"));
                return;
            }
        }
    }

    // Gate: PP. An empty slot (or a move the combatant doesn't know)
    // falls back to Struggle.
    let releasing_charge = state.active(side).charging_move.as_deref() == Some(chosen.as_str());
    let mut mov: &'static MoveData = move_data(&chosen);
    if !releasing_charge {
        let has_pp = state
            .active(side)
            .move_slot(&chosen)
            .map(|s| s.has_pp())
            .unwrap_or(false);
        if has_pp {
            if let Some(slot) = state.active_mut(side).move_slot_mut(&chosen) {
                slot.use_pp();
            }
        } else {
            mov = &STRUGGLE;
            chosen = "Struggle".to_string();
        }
    }

    log.push(format!("{name} used {chosen}!"));
    state.active_mut(side).last_move = Some(chosen.clone());
    state.side_mut(side).last_move = Some(chosen.clone());

    // Unknown rule data resolves to an inert record that simply fails
    if mov.is_unknown() {
        log.push("But it failed!".to_string());
        return;
    }

    // Gate: two-turn charge moves
    if mov.charge {
        if releasing_charge {
            state.active_mut(side).charging_move = None;
            state.active_mut(side).remove_volatile(Volatile::Charging);
        } else {
            let skip = (mov.charge_skip_in_sun
                && state.field.weather() == Some(Weather::Sun))
                || has_item(state, side, "Power Herb");
            if skip {
                if has_item(state, side, "Power Herb")
                    && !(mov.charge_skip_in_sun
                        && state.field.weather() == Some(Weather::Sun))
                {
                    let active = state.active_mut(side);
                    active.item = None;
                    active.item_consumed = true;
                    log.push(format!("{name} became fully charged due to its Power Herb!"));
                }
            } else {
                state.active_mut(side).charging_move = Some(chosen.clone());
                state
                    .active_mut(side)
                    .add_volatile(Volatile::Charging, VolatileState::with_move(chosen.clone(), None));
                log.push(format!("{name} began charging {chosen}!"));
                return;
            }
        }
    }

    // Gate: self-protection moves. A streak of one succeeds; the next
    // consecutive use fails and resets the streak to zero.
    if mov.is_protection() {
        if state.active(side).protect_streak >= 1 {
            state.active_mut(side).protect_streak = 0;
            log.push("But it failed!".to_string());
            return;
        }
        let volatile = if mov.endure {
            Volatile::Endure
        } else {
            Volatile::Protect
        };
        let active = state.active_mut(side);
        active.protect_streak = 1;
        active.add_volatile(volatile, VolatileState::with_move(chosen.clone(), None));
        if mov.endure {
            log.push(format!("{name} braced itself!"));
        } else {
            log.push(format!("{name} protected itself!"));
        }
        return;
    }

    // Self- and field-targeting status moves skip the targeting gates
    if mov.category == MoveCategory::Status && !mov.protectable {
        run_self_status(state, side, mov, rng, log);
        post_move(state, side, mov, 0, log);
        handle_switch_effects(state, side, mov, true, rng, log);
        return;
    }

    // Gate: opposing protection
    if state.active(target).has_volatile(Volatile::Protect)
        && mov.protectable
        && !mov.bypass_protect
    {
        let target_name = state.active(target).species.clone();
        log.push(format!("{target_name} protected itself!"));
        // Contact against a spiky protector stings
        if mov.contact {
            let protector = state
                .active(target)
                .volatile(Volatile::Protect)
                .and_then(|v| v.linked_move.clone())
                .map(|m| normalize_id(&m))
                .unwrap_or_default();
            match protector.as_str() {
                "spikyshield" => {
                    let chip = (state.active(side).max_hp / 8).max(1);
                    indirect_damage(state, side, chip, "the spiky shield", log);
                }
                "banefulbunker" => {
                    try_status(state, side, Status::Poison, None, log, rng);
                }
                _ => {}
            }
        }
        sacrifice_on_failure(state, side, mov, log);
        return;
    }

    // Gate: pre-use conditions (first-turn-only moves, readied-target moves)
    if pre_use_failure(state, side, mov, tctx) {
        log.push("But it failed!".to_string());
        return;
    }

    // Gate: immunity
    let is_struggle = normalize_id(&chosen) == "struggle";
    if !is_struggle {
        let target_name = state.active(target).species.clone();
        if mov.powder && state.active(target).has_type(Type::Grass) {
            log.push(format!("It doesn't affect {target_name}..."));
            return;
        }
        let typed_immune = fray_battle::query::is_immune_to(&state.active(target).types, mov.typ)
            && (mov.is_damaging() || mov.inflicts_status.is_some());
        if typed_immune {
            log.push(format!("It doesn't affect {target_name}..."));
            return;
        }
        if mov.is_damaging() && ability_absorbs(state, side, mov, log) {
            return;
        }
    }

    // Gate: accuracy
    if !accuracy_check(state, side, target, mov, rng) {
        log.push(format!("{name}'s attack missed!"));
        sacrifice_on_failure(state, side, mov, log);
        post_move_miss(state, side, log);
        return;
    }

    // Opponent-targeting status moves
    if mov.category == MoveCategory::Status {
        if substitute_blocks(state, side, mov) {
            log.push("But it failed!".to_string());
            return;
        }
        run_target_status(state, side, mov, rng, log);
        post_move(state, side, mov, 0, log);
        handle_switch_effects(state, side, mov, true, rng, log);
        return;
    }

    // Damage, looped per hit
    let hits = match mov.multi_hit {
        None => 1,
        Some(MultiHit::Fixed(n)) => n,
        Some(MultiHit::TwoToFive) => {
            if has_ability(state, side, "Skill Link") {
                5
            } else {
                rng.multi_hit_count()
            }
        }
    };

    let mut total_dealt: u16 = 0;
    let mut landed_hits = 0u8;
    let mut sub_hit = false;

    for hit in 0..hits {
        if state.active(target).is_fainted() {
            break;
        }
        let outcome = model.compute(state, side, mov, rng);
        if outcome.effectiveness == fray_battle::Effectiveness::Immune {
            let target_name = state.active(target).species.clone();
            log.push(format!("It doesn't affect {target_name}..."));
            break;
        }

        if substitute_blocks(state, side, mov) {
            sub_hit = true;
            let broke = {
                let sub = state
                    .active_mut(target)
                    .volatile_mut(Volatile::Substitute)
                    .expect("substitute present");
                sub.hp = sub.hp.saturating_sub(outcome.damage);
                sub.hp == 0
            };
            let target_name = state.active(target).species.clone();
            if broke {
                state.active_mut(target).remove_volatile(Volatile::Substitute);
                log.push(format!("{target_name}'s substitute faded!"));
            } else {
                log.push("The substitute took the hit!".to_string());
            }
            landed_hits += 1;
            continue;
        }

        let dealt = apply_move_damage(state, target, outcome.damage, log);
        total_dealt = total_dealt.saturating_add(dealt);
        landed_hits += 1;

        if hit == 0 {
            match outcome.effectiveness {
                fray_battle::Effectiveness::SuperEffective => {
                    log.push("It's super effective!".to_string())
                }
                fray_battle::Effectiveness::NotVeryEffective => {
                    log.push("It's not very effective...".to_string())
                }
                _ => {}
            }
        }
        if outcome.crit {
            log.push("A critical hit!".to_string());
        }

        on_damaging_hit(state, side, target, mov, outcome.crit, log, rng);
        if state.active(side).is_fainted() {
            break;
        }
    }

    if hits > 1 && landed_hits > 0 {
        log.push(format!("Hit {landed_hits} time(s)!"));
    }

    if mov.ohko && state.active(target).is_fainted() {
        log.push("It's a one-hit KO!".to_string());
    }

    // Secondary effects: blocked by a substitute, skipped by Sheer Force,
    // shrugged off by Shield Dust, doubled by Serene Grace
    if total_dealt > 0 && !sub_hit && state.active(target).is_alive() {
        if let Some(secondary) = mov.secondary {
            let skip = has_ability(state, side, "Sheer Force");
            let shielded = defender_ability_active(state, target)
                && fray_dex::ability_data(&state.active(target).ability).name == "Shield Dust";
            let self_directed = matches!(secondary.kind, SecondaryKind::SelfBoosts(_));
            if !skip && (self_directed || !shielded) {
                let mut chance = secondary.chance as u32;
                if has_ability(state, side, "Serene Grace") {
                    chance *= 2;
                }
                if rng.chance(chance.min(100), 100) {
                    match secondary.kind {
                        SecondaryKind::Status(status) => {
                            try_status(state, target, status, Some(side), log, rng);
                        }
                        SecondaryKind::Volatile(Volatile::Flinch) => {
                            if !has_ability(state, target, "Inner Focus") {
                                state
                                    .active_mut(target)
                                    .add_volatile(Volatile::Flinch, VolatileState::permanent());
                            }
                        }
                        SecondaryKind::Volatile(Volatile::Confusion) => {
                            try_confuse(state, target, log, rng);
                        }
                        SecondaryKind::Volatile(v) => {
                            state
                                .active_mut(target)
                                .add_volatile(v, VolatileState::permanent());
                        }
                        SecondaryKind::Boosts(boosts) => {
                            apply_stat_changes(state, target, boosts, true, log);
                        }
                        SecondaryKind::SelfBoosts(boosts) => {
                            apply_stat_changes(state, side, boosts, false, log);
                        }
                    }
                }
            }
        }

        // Guaranteed stat drops riding a damaging move
        if !mov.target_boosts.is_empty() {
            apply_stat_changes(state, target, mov.target_boosts, true, log);
        }
        // Guaranteed status riding a damaging move
        if let Some(status) = mov.inflicts_status {
            try_status(state, target, status, Some(side), log, rng);
        }
    }

    // Self stat changes land whether or not the target survived
    if landed_hits > 0 && !mov.self_boosts.is_empty() && state.active(side).is_alive() {
        apply_stat_changes(state, side, mov.self_boosts, false, log);
    }

    // Bespoke registry effect
    if landed_hits > 0 || !mov.is_damaging() {
        if let Some(handler) = effect_for(&chosen) {
            let mut ctx = EffectCtx {
                state,
                user: side,
                mov,
                rng,
                log,
                damage_dealt: total_dealt,
                failed: false,
            };
            handler(&mut ctx);
            if ctx.failed {
                log.push("But it failed!".to_string());
            }
        }
    }

    // Faint processing for the target
    if state.active(target).is_fainted() {
        on_faint(state, target, side, mov.contact, log);
    }

    post_move(state, side, mov, total_dealt, log);
    handle_switch_effects(state, side, mov, landed_hits > 0, rng, log);
}

/// Forced switching (Roar, Dragon Tail) and self-switching (U-turn,
/// Teleport), after all the dust settles
fn handle_switch_effects(
    state: &mut BattleState,
    side: SideId,
    mov: &'static MoveData,
    landed: bool,
    rng: &mut BattleRng,
    log: &mut TurnLog,
) {
    let target = side.opponent();

    if mov.force_switch
        && landed
        && state.active(target).is_alive()
        && state.side(target).has_replacement()
    {
        let bench: Vec<usize> = state.side(target).bench().map(|(i, _)| i).collect();
        let pick = bench[rng.index(bench.len())];
        state.side_mut(target).switch_to(pick);
        let dragged = state.active(target).species.clone();
        log.push(format!("{dragged} was dragged out!"));
        on_switch_in(state, target, log, rng);
    }

    if mov.self_switch
        && landed
        && state.active(side).is_alive()
        && state.side(side).has_replacement()
    {
        state.active_mut(side).must_switch = true;
        let name = state.active(side).species.clone();
        log.push(format!("{name} is returning to its team!"));
    }
}

/// Apply the data-driven payload of a self- or field-targeting status move
fn run_self_status(
    state: &mut BattleState,
    side: SideId,
    mov: &'static MoveData,
    rng: &mut BattleRng,
    log: &mut TurnLog,
) {
    let mut did_anything = false;

    if !mov.self_boosts.is_empty() {
        apply_stat_changes(state, side, mov.self_boosts, false, log);
        did_anything = true;
    }

    if let Some((num, den)) = mov.heal_fraction {
        let amount = (state.active(side).max_hp as u32 * num as u32 / den as u32) as u16;
        let healed = state.active_mut(side).heal(amount);
        let name = state.active(side).species.clone();
        if healed > 0 {
            log.push(format!("{name} regained health!"));
        } else {
            log.push("But it failed!".to_string());
        }
        did_anything = true;
    }

    if let Some(handler) = effect_for(mov.name) {
        let mut ctx = EffectCtx {
            state,
            user: side,
            mov,
            rng,
            log,
            damage_dealt: 0,
            failed: false,
        };
        handler(&mut ctx);
        if ctx.failed {
            log.push("But it failed!".to_string());
        }
        did_anything = true;
    }

    if !did_anything {
        log.push("But it failed!".to_string());
    }
}

/// Apply the data-driven payload of an opponent-targeting status move
fn run_target_status(
    state: &mut BattleState,
    side: SideId,
    mov: &'static MoveData,
    rng: &mut BattleRng,
    log: &mut TurnLog,
) {
    let target = side.opponent();
    let mut did_anything = false;

    if let Some(status) = mov.inflicts_status {
        if let Some(_reason) = status_immunity_reason(state, target, status, true) {
            log.push("But it failed!".to_string());
        } else {
            try_status(state, target, status, Some(side), log, rng);
        }
        did_anything = true;
    }

    if !mov.target_boosts.is_empty() {
        apply_stat_changes(state, target, mov.target_boosts, true, log);
        did_anything = true;
    }

    if !mov.self_boosts.is_empty() {
        apply_stat_changes(state, side, mov.self_boosts, false, log);
        did_anything = true;
    }

    if let Some(handler) = effect_for(mov.name) {
        let mut ctx = EffectCtx {
            state,
            user: side,
            mov,
            rng,
            log,
            damage_dealt: 0,
            failed: false,
        };
        handler(&mut ctx);
        if ctx.failed {
            log.push("But it failed!".to_string());
        }
        did_anything = true;
    }

    if !did_anything {
        log.push("But it failed!".to_string());
    }

}

/// Book-keeping common to every resolved move: Lock-On consumption
fn post_move_miss(state: &mut BattleState, side: SideId, _log: &mut TurnLog) {
    state.active_mut(side).remove_volatile(Volatile::LockOn);
}

/// Post-move passive consumption: recoil, drain, items, self-faints,
/// choice locking, recharge flagging
fn post_move(
    state: &mut BattleState,
    side: SideId,
    mov: &'static MoveData,
    total_dealt: u16,
    log: &mut TurnLog,
) {
    state.active_mut(side).remove_volatile(Volatile::LockOn);

    if state.active(side).is_fainted() {
        return;
    }
    let name = state.active(side).species.clone();

    // Recoil (Struggle pays a quarter of max HP regardless of damage)
    let is_struggle = normalize_id(mov.name) == "struggle";
    if is_struggle {
        let chip = (state.active(side).max_hp / 4).max(1);
        indirect_damage(state, side, chip, "recoil", log);
    } else if let Some((num, den)) = mov.recoil {
        if total_dealt > 0 && !has_ability(state, side, "Rock Head") {
            let chip = ((total_dealt as u32 * num as u32 / den as u32) as u16).max(1);
            indirect_damage(state, side, chip, "recoil", log);
        }
    }

    // Drain healing (Heal Block was already checked at the legality gate)
    if let Some((num, den)) = mov.drain {
        if total_dealt > 0 {
            let amount = ((total_dealt as u32 * num as u32 / den as u32) as u16).max(1);
            if state.active_mut(side).heal(amount) > 0 {
                log.push(format!("{name} drained health!"));
            }
        }
    }

    // Shell Bell skims a little off every hit
    if total_dealt > 0 && has_item(state, side, "Shell Bell") {
        let amount = (total_dealt / 8).max(1);
        state.active_mut(side).heal(amount);
    }

    // Life Orb exacts its price
    if total_dealt > 0 && has_item(state, side, "Life Orb") {
        let chip = (state.active(side).max_hp / 10).max(1);
        indirect_damage(state, side, chip, "the Life Orb", log);
    }

    // Choice items lock in the first move used
    if state.active(side).choice_lock.is_none() {
        if let Some(item) = state.active(side).item.as_deref() {
            if item_data(item).is_choice && !state.active(side).item_consumed {
                state.active_mut(side).choice_lock = Some(mov.name.to_string());
            }
        }
    }

    // Recharge moves demand a turn of rest
    if mov.recharge && total_dealt > 0 {
        state
            .active_mut(side)
            .add_volatile(Volatile::Recharging, VolatileState::permanent());
    }

    if state.active(side).is_fainted() {
        log.push(format!("{name} fainted!"));
    }
}
