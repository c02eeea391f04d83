//! Passive reaction dispatch: abilities and held items responding to
//! switch-ins, damaging hits, status application, faints, and end of turn.
//!
//! Every event consults both participants' ability and item records at most
//! once per occurrence. Suppression comes in two flavors: a field-wide
//! neutralizer shuts abilities off entirely, and a mold-breaking attacker
//! ignores the defender's ability during move resolution (but not its
//! after-the-fact reactions).

use fray_battle::{
    BattleState, SideCondition, SideId, Stat, Status, Terrain, Type, Volatile, VolatileState,
    Weather,
};
use fray_dex::{ability_data, item_data, normalize_id, MoveData};

use crate::log::TurnLog;
use crate::mechanics::{
    ability_active, apply_stat_changes, has_ability, has_item, is_grounded,
};
use crate::rng::BattleRng;

/// Weather set by this side lasts 8 turns with the matching rock, else 5
pub(crate) fn weather_turns(state: &BattleState, side: SideId, weather: Weather) -> u8 {
    let rock = match weather {
        Weather::Sun => "Heat Rock",
        Weather::Rain => "Damp Rock",
        Weather::Sand => "Smooth Rock",
        Weather::Hail | Weather::Snow => "Icy Rock",
    };
    if has_item(state, side, rock) { 8 } else { 5 }
}

/// Terrain set by this side lasts 8 turns with a Terrain Extender, else 5
pub(crate) fn terrain_turns(state: &BattleState, side: SideId) -> u8 {
    if has_item(state, side, "Terrain Extender") { 8 } else { 5 }
}

/// Apply indirect (non-move) damage: hazards, residuals, recoil, reactive
/// item chip. Magic Guard holders ignore all of it. Returns damage dealt.
pub(crate) fn indirect_damage(
    state: &mut BattleState,
    side: SideId,
    amount: u16,
    what: &str,
    log: &mut TurnLog,
) -> u16 {
    if has_ability(state, side, "Magic Guard") {
        return 0;
    }
    let active = state.active_mut(side);
    let dealt = active.take_damage(amount);
    if dealt > 0 {
        let name = state.active(side).species.clone();
        log.push(format!("{name} is hurt by {what}!"));
    }
    dealt
}

/// Why a primary status cannot land, if it cannot
pub(crate) fn status_immunity_reason(
    state: &BattleState,
    side: SideId,
    status: Status,
    from_opponent: bool,
) -> Option<&'static str> {
    let target = state.active(side);

    if target.status.is_some() || target.is_fainted() {
        return Some("it is already afflicted");
    }

    // Type immunities
    let type_immune = match status {
        Status::Burn => target.has_type(Type::Fire),
        Status::Freeze => target.has_type(Type::Ice),
        Status::Paralysis => target.has_type(Type::Electric),
        Status::Poison | Status::BadPoison => {
            target.has_type(Type::Poison) || target.has_type(Type::Steel)
        }
        Status::Sleep => false,
    };
    if type_immune {
        return Some("its typing protects it");
    }

    // Ability guards
    if ability_active(state, side) {
        let guard = match ability_data(&target.ability).name {
            "Limber" => status == Status::Paralysis,
            "Water Veil" => status == Status::Burn,
            "Immunity" => matches!(status, Status::Poison | Status::BadPoison),
            "Insomnia" | "Vital Spirit" => status == Status::Sleep,
            _ => false,
        };
        if guard {
            return Some("its ability protects it");
        }
    }

    if from_opponent {
        if state.side(side).has_condition(SideCondition::Safeguard) {
            return Some("Safeguard protects it");
        }
        let grounded = is_grounded(target, &state.field, ability_active(state, side));
        if grounded {
            match state.field.terrain() {
                Some(Terrain::Misty) => return Some("the Misty Terrain protects it"),
                Some(Terrain::Electric) if status == Status::Sleep => {
                    return Some("the Electric Terrain keeps it awake")
                }
                _ => {}
            }
        }
    }

    None
}

/// Try to inflict a primary status, with immunity checks, sleep-turn rolls,
/// logging, and the on-status reactions. Returns true if the status landed.
pub(crate) fn try_status(
    state: &mut BattleState,
    side: SideId,
    status: Status,
    source: Option<SideId>,
    log: &mut TurnLog,
    rng: &mut BattleRng,
) -> bool {
    let from_opponent = source == Some(side.opponent());
    if status_immunity_reason(state, side, status, from_opponent).is_some() {
        return false;
    }

    let active = state.active_mut(side);
    if !active.set_status(status) {
        return false;
    }
    if status == Status::Sleep {
        active.sleep_turns = rng.range(1, 3);
    }
    let name = active.species.clone();
    log.push(format!("{name} {}!", status.applied_text()));

    on_status_applied(state, side, status, source, log, rng);
    true
}

/// Try to confuse a combatant: Own Tempo and Misty Terrain (for grounded
/// targets) refuse it. Confusion runs 2-5 action attempts.
pub(crate) fn try_confuse(
    state: &mut BattleState,
    side: SideId,
    log: &mut TurnLog,
    rng: &mut BattleRng,
) -> bool {
    if has_ability(state, side, "Own Tempo") {
        return false;
    }
    if state.field.terrain() == Some(Terrain::Misty)
        && is_grounded(state.active(side), &state.field, ability_active(state, side))
    {
        return false;
    }
    let turns = rng.range(2, 5);
    let active = state.active_mut(side);
    if !active.add_volatile(Volatile::Confusion, VolatileState::for_turns(turns)) {
        return false;
    }
    let name = active.species.clone();
    log.push(format!("{name} became confused!"));
    true
}

/// Reactions to a primary status landing
pub(crate) fn on_status_applied(
    state: &mut BattleState,
    side: SideId,
    status: Status,
    source: Option<SideId>,
    log: &mut TurnLog,
    rng: &mut BattleRng,
) {
    // Synchronize reflects mirrored conditions onto the inflictor
    if has_ability(state, side, "Synchronize")
        && source == Some(side.opponent())
        && matches!(
            status,
            Status::Burn | Status::Poison | Status::BadPoison | Status::Paralysis
        )
    {
        let name = state.active(side).species.clone();
        log.push(format!("{name}'s Synchronize!"));
        // Source is None so the reflection cannot ping-pong
        try_status(state, side.opponent(), status, None, log, rng);
    }

    // Curative berries eat themselves immediately
    let cures = match state.active(side).item.as_deref().map(normalize_id) {
        Some(id) if id == "lumberry" => true,
        Some(id) if id == "chestoberry" => status == Status::Sleep,
        _ => false,
    };
    if cures && !state.active(side).item_consumed {
        let active = state.active_mut(side);
        let item = active.item.clone().unwrap_or_default();
        active.cure_status();
        active.item_consumed = true;
        active.item = None;
        let name = active.species.clone();
        log.push(format!("{name}'s {item} cured its status!"));
    }
}

/// Entry hazards and switch-in reactions, in that order
pub fn on_switch_in(state: &mut BattleState, side: SideId, log: &mut TurnLog, rng: &mut BattleRng) {
    apply_entry_hazards(state, side, log, rng);
    if state.active(side).is_fainted() {
        return;
    }
    switch_in_ability(state, side, log);

    if has_item(state, side, "Air Balloon") {
        let name = state.active(side).species.clone();
        log.push(format!("{name} floats in the air with its Air Balloon!"));
    }
}

fn apply_entry_hazards(
    state: &mut BattleState,
    side: SideId,
    log: &mut TurnLog,
    rng: &mut BattleRng,
) {
    let name = state.active(side).species.clone();

    if state.side(side).has_condition(SideCondition::StealthRock) {
        let types = state.active(side).types.clone();
        let quarters = (Type::Rock.effectiveness_multi(&types) * 4.0) as u32;
        let max_hp = state.active(side).max_hp as u32;
        let damage = (max_hp * quarters / 32).max(1) as u16;
        indirect_damage(state, side, damage, "the pointed stones", log);
        if state.active(side).is_fainted() {
            return;
        }
    }

    let grounded = is_grounded(
        state.active(side),
        &state.field,
        ability_active(state, side),
    );
    if grounded {
        let spike_layers = state.side(side).condition_layers(SideCondition::Spikes);
        if spike_layers > 0 {
            let max_hp = state.active(side).max_hp as u32;
            let damage = match spike_layers {
                1 => max_hp / 8,
                2 => max_hp / 6,
                _ => max_hp / 4,
            }
            .max(1) as u16;
            indirect_damage(state, side, damage, "the spikes", log);
            if state.active(side).is_fainted() {
                return;
            }
        }

        let toxic_layers = state.side(side).condition_layers(SideCondition::ToxicSpikes);
        if toxic_layers > 0 {
            if state.active(side).has_type(Type::Poison) {
                state.side_mut(side).remove_condition(SideCondition::ToxicSpikes);
                log.push(format!("{name} absorbed the toxic spikes!"));
            } else {
                let status = if toxic_layers >= 2 {
                    Status::BadPoison
                } else {
                    Status::Poison
                };
                try_status(state, side, status, None, log, rng);
            }
        }

        if state.side(side).has_condition(SideCondition::StickyWeb) {
            log.push(format!("{name} was caught in a sticky web!"));
            apply_stat_changes(state, side, &[(Stat::Spe, -1)], true, log);
        }
    }
}

fn switch_in_ability(state: &mut BattleState, side: SideId, log: &mut TurnLog) {
    if !ability_active(state, side) {
        return;
    }
    let name = state.active(side).species.clone();
    let ability = ability_data(&state.active(side).ability).name;

    let announce = |log: &mut TurnLog| log.push(format!("{name}'s {ability}!"));

    match ability {
        "Intimidate" => {
            let opp = side.opponent();
            if state.active(opp).is_alive() {
                announce(log);
                apply_stat_changes(state, opp, &[(Stat::Atk, -1)], true, log);
            }
        }
        "Drizzle" => {
            let turns = weather_turns(state, side, Weather::Rain);
            if state.field.set_weather(Weather::Rain, turns) {
                announce(log);
                log.push("It started to rain!".to_string());
            }
        }
        "Drought" => {
            let turns = weather_turns(state, side, Weather::Sun);
            if state.field.set_weather(Weather::Sun, turns) {
                announce(log);
                log.push("The sunlight turned harsh!".to_string());
            }
        }
        "Sand Stream" => {
            let turns = weather_turns(state, side, Weather::Sand);
            if state.field.set_weather(Weather::Sand, turns) {
                announce(log);
                log.push("A sandstorm kicked up!".to_string());
            }
        }
        "Snow Warning" => {
            let turns = weather_turns(state, side, Weather::Snow);
            if state.field.set_weather(Weather::Snow, turns) {
                announce(log);
                log.push("It started to snow!".to_string());
            }
        }
        "Electric Surge" => {
            if state.field.set_terrain(Terrain::Electric, terrain_turns(state, side)) {
                announce(log);
                log.push("An electric current ran across the battlefield!".to_string());
            }
        }
        "Grassy Surge" => {
            if state.field.set_terrain(Terrain::Grassy, terrain_turns(state, side)) {
                announce(log);
                log.push("Grass grew to cover the battlefield!".to_string());
            }
        }
        "Misty Surge" => {
            if state.field.set_terrain(Terrain::Misty, terrain_turns(state, side)) {
                announce(log);
                log.push("Mist swirled around the battlefield!".to_string());
            }
        }
        "Psychic Surge" => {
            if state.field.set_terrain(Terrain::Psychic, terrain_turns(state, side)) {
                announce(log);
                log.push("The battlefield got weird!".to_string());
            }
        }
        _ => {}
    }
}

/// Reactions to one damaging hit connecting
pub fn on_damaging_hit(
    state: &mut BattleState,
    attacker: SideId,
    defender: SideId,
    mov: &MoveData,
    crit: bool,
    log: &mut TurnLog,
    rng: &mut BattleRng,
) {
    let defender_name = state.active(defender).species.clone();

    // Contact punishment from the defender's ability
    if mov.contact && ability_active(state, defender) {
        match ability_data(&state.active(defender).ability).name {
            "Static" if rng.percent(30) => {
                log.push(format!("{defender_name}'s Static!"));
                try_status(state, attacker, Status::Paralysis, None, log, rng);
            }
            "Flame Body" if rng.percent(30) => {
                log.push(format!("{defender_name}'s Flame Body!"));
                try_status(state, attacker, Status::Burn, None, log, rng);
            }
            "Poison Point" if rng.percent(30) => {
                log.push(format!("{defender_name}'s Poison Point!"));
                try_status(state, attacker, Status::Poison, None, log, rng);
            }
            "Effect Spore" if rng.percent(30) => {
                if !state.active(attacker).has_type(Type::Grass) {
                    log.push(format!("{defender_name}'s Effect Spore!"));
                    let status = match rng.index(3) {
                        0 => Status::Poison,
                        1 => Status::Paralysis,
                        _ => Status::Sleep,
                    };
                    try_status(state, attacker, status, None, log, rng);
                }
            }
            "Rough Skin" | "Iron Barbs" => {
                let chip = (state.active(attacker).max_hp / 8).max(1);
                indirect_damage(state, attacker, chip, "the rough surface", log);
            }
            _ => {}
        }
    }

    // Contact punishment from the defender's item
    if mov.contact && has_item(state, defender, "Rocky Helmet") {
        let chip = (state.active(attacker).max_hp / 6).max(1);
        indirect_damage(state, attacker, chip, "the Rocky Helmet", log);
    }

    if ability_active(state, defender) && state.active(defender).is_alive() {
        let def_ability = ability_data(&state.active(defender).ability).name;
        if def_ability == "Justified" && mov.typ == Type::Dark {
            log.push(format!("{defender_name}'s Justified!"));
            apply_stat_changes(state, defender, &[(Stat::Atk, 1)], false, log);
        }
        if def_ability == "Anger Point" && crit {
            state.active_mut(defender).stages.set(Stat::Atk, 6);
            log.push(format!("{defender_name}'s Anger Point maxed its Attack!"));
        }
    }

    // The balloon pops on any hit that connects
    if has_item(state, defender, "Air Balloon") {
        let active = state.active_mut(defender);
        active.item = None;
        active.item_consumed = true;
        log.push(format!("{defender_name}'s Air Balloon popped!"));
    }

    // Recovery berries check their threshold after each hit
    if state.active(defender).is_alive() {
        let hp = state.active(defender).hp();
        let max = state.active(defender).max_hp;
        let berry = state
            .active(defender)
            .item
            .as_deref()
            .map(normalize_id)
            .filter(|_| !state.active(defender).item_consumed);
        match berry.as_deref() {
            Some("sitrusberry") if hp * 2 <= max => {
                let active = state.active_mut(defender);
                active.item = None;
                active.item_consumed = true;
                let healed = active.heal(max / 4);
                if healed > 0 {
                    log.push(format!(
                        "{defender_name} restored health with its Sitrus Berry!"
                    ));
                }
            }
            Some("oranberry") if hp * 2 <= max => {
                let active = state.active_mut(defender);
                active.item = None;
                active.item_consumed = true;
                active.heal(10);
                log.push(format!(
                    "{defender_name} restored a little health with its Oran Berry!"
                ));
            }
            _ => {}
        }
    }

    // A flinch-proccing item on the attacker, for moves without their own
    let has_flinch_secondary = matches!(
        mov.secondary,
        Some(fray_dex::SecondaryEffect {
            kind: fray_dex::SecondaryKind::Volatile(Volatile::Flinch),
            ..
        })
    );
    if has_item(state, attacker, "King's Rock")
        && !has_flinch_secondary
        && state.active(defender).is_alive()
        && !has_ability(state, defender, "Inner Focus")
        && rng.percent(10)
    {
        state
            .active_mut(defender)
            .add_volatile(Volatile::Flinch, VolatileState::permanent());
    }
}

/// Reactions to a combatant fainting
pub fn on_faint(
    state: &mut BattleState,
    fainted: SideId,
    attacker: SideId,
    contact: bool,
    log: &mut TurnLog,
) {
    let name = state.active(fainted).species.clone();
    log.push(format!("{name} fainted!"));

    if state.active(fainted).has_volatile(Volatile::DestinyBond)
        && state.active(attacker).is_alive()
    {
        let taken = state.active(attacker).hp();
        state.active_mut(attacker).take_damage(taken);
        let attacker_name = state.active(attacker).species.clone();
        log.push(format!("{name} took {attacker_name} down with it!"));
        log.push(format!("{attacker_name} fainted!"));
    }

    if contact
        && ability_active(state, fainted)
        && ability_data(&state.active(fainted).ability).name == "Aftermath"
        && state.active(attacker).is_alive()
    {
        log.push(format!("{name}'s Aftermath!"));
        let chip = (state.active(attacker).max_hp / 4).max(1);
        indirect_damage(state, attacker, chip, "the blast", log);
        if state.active(attacker).is_fainted() {
            let attacker_name = state.active(attacker).species.clone();
            log.push(format!("{attacker_name} fainted!"));
        }
    }
}

/// End-of-turn ability residuals for one side
pub fn end_of_turn_abilities(
    state: &mut BattleState,
    side: SideId,
    log: &mut TurnLog,
    rng: &mut BattleRng,
) {
    if !ability_active(state, side) || state.active(side).is_fainted() {
        return;
    }
    let name = state.active(side).species.clone();
    let weather = state.field.weather();

    match ability_data(&state.active(side).ability).name {
        "Speed Boost" => {
            log.push(format!("{name}'s Speed Boost!"));
            apply_stat_changes(state, side, &[(Stat::Spe, 1)], false, log);
        }
        "Shed Skin" => {
            if state.active(side).status.is_some() && rng.chance(1, 3) {
                state.active_mut(side).cure_status();
                log.push(format!("{name} shed its skin and was cured!"));
            }
        }
        "Hydration" => {
            if weather == Some(Weather::Rain) && state.active(side).status.is_some() {
                state.active_mut(side).cure_status();
                log.push(format!("{name}'s Hydration cured its status!"));
            }
        }
        "Rain Dish" => {
            if weather == Some(Weather::Rain) {
                let amount = state.active(side).max_hp / 16;
                if state.active_mut(side).heal(amount) > 0 {
                    log.push(format!("{name}'s Rain Dish restored a little HP!"));
                }
            }
        }
        "Ice Body" => {
            if matches!(weather, Some(Weather::Hail | Weather::Snow)) {
                let amount = state.active(side).max_hp / 16;
                if state.active_mut(side).heal(amount) > 0 {
                    log.push(format!("{name}'s Ice Body restored a little HP!"));
                }
            }
        }
        "Dry Skin" => match weather {
            Some(Weather::Rain) => {
                let amount = state.active(side).max_hp / 8;
                if state.active_mut(side).heal(amount) > 0 {
                    log.push(format!("{name}'s Dry Skin restored some HP!"));
                }
            }
            Some(Weather::Sun) => {
                let amount = (state.active(side).max_hp / 8).max(1);
                indirect_damage(state, side, amount, "the harsh sunlight", log);
            }
            _ => {}
        },
        _ => {}
    }
}

/// End-of-turn item residuals for one side
pub fn end_of_turn_items(
    state: &mut BattleState,
    side: SideId,
    log: &mut TurnLog,
    rng: &mut BattleRng,
) {
    if state.active(side).is_fainted() {
        return;
    }
    let Some(item) = state.active(side).item.clone() else {
        return;
    };
    if state.active(side).item_consumed {
        return;
    }
    let name = state.active(side).species.clone();

    match item_data(&item).name {
        "Leftovers" => {
            let amount = state.active(side).max_hp / 16;
            if state.active_mut(side).heal(amount) > 0 {
                log.push(format!("{name} restored a little HP with its Leftovers!"));
            }
        }
        "Black Sludge" => {
            if state.active(side).has_type(Type::Poison) {
                let amount = state.active(side).max_hp / 16;
                if state.active_mut(side).heal(amount) > 0 {
                    log.push(format!("{name} restored a little HP with its Black Sludge!"));
                }
            } else {
                let amount = (state.active(side).max_hp / 8).max(1);
                indirect_damage(state, side, amount, "the Black Sludge", log);
            }
        }
        "Toxic Orb" => {
            try_status(state, side, Status::BadPoison, None, log, rng);
        }
        "Flame Orb" => {
            try_status(state, side, Status::Burn, None, log, rng);
        }
        _ => {}
    }
}
