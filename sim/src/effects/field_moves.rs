//! Field-shaping moves: weather, terrain, rooms, and side-wide support

use std::collections::HashMap;

use fray_battle::{SideCondition, Terrain, Weather};

use crate::mechanics::has_item;
use crate::triggers::{terrain_turns, weather_turns};

use super::{EffectCtx, EffectFn};

pub(super) fn register(map: &mut HashMap<&'static str, EffectFn>) {
    map.insert("sunnyday", sunny_day);
    map.insert("raindance", rain_dance);
    map.insert("sandstorm", sandstorm);
    map.insert("hail", hail);
    map.insert("snowscape", snowscape);

    map.insert("electricterrain", electric_terrain);
    map.insert("grassyterrain", grassy_terrain);
    map.insert("mistyterrain", misty_terrain);
    map.insert("psychicterrain", psychic_terrain);

    map.insert("trickroom", trick_room);
    map.insert("gravity", gravity);
    map.insert("tailwind", tailwind);

    map.insert("reflect", reflect);
    map.insert("lightscreen", light_screen);
    map.insert("auroraveil", aurora_veil);
    map.insert("safeguard", safeguard);
    map.insert("mist", mist);
}

fn sunny_day(ctx: &mut EffectCtx) {
    set_weather(ctx, Weather::Sun, "The sunlight turned harsh!");
}

fn rain_dance(ctx: &mut EffectCtx) {
    set_weather(ctx, Weather::Rain, "It started to rain!");
}

fn sandstorm(ctx: &mut EffectCtx) {
    set_weather(ctx, Weather::Sand, "A sandstorm kicked up!");
}

fn hail(ctx: &mut EffectCtx) {
    set_weather(ctx, Weather::Hail, "It started to hail!");
}

fn snowscape(ctx: &mut EffectCtx) {
    set_weather(ctx, Weather::Snow, "It started to snow!");
}

fn electric_terrain(ctx: &mut EffectCtx) {
    set_terrain(ctx, Terrain::Electric, "An electric current ran across the battlefield!");
}

fn grassy_terrain(ctx: &mut EffectCtx) {
    set_terrain(ctx, Terrain::Grassy, "Grass grew to cover the battlefield!");
}

fn misty_terrain(ctx: &mut EffectCtx) {
    set_terrain(ctx, Terrain::Misty, "Mist swirled around the battlefield!");
}

fn psychic_terrain(ctx: &mut EffectCtx) {
    set_terrain(ctx, Terrain::Psychic, "The battlefield got weird!");
}

fn reflect(ctx: &mut EffectCtx) {
    screen(ctx, SideCondition::Reflect);
}

fn light_screen(ctx: &mut EffectCtx) {
    screen(ctx, SideCondition::LightScreen);
}

fn safeguard(ctx: &mut EffectCtx) {
    side_support(ctx, SideCondition::Safeguard);
}

fn mist(ctx: &mut EffectCtx) {
    side_support(ctx, SideCondition::Mist);
}

fn set_weather(ctx: &mut EffectCtx, weather: Weather, line: &str) {
    let turns = weather_turns(ctx.state, ctx.user, weather);
    if ctx.state.field.set_weather(weather, turns) {
        ctx.log.push(line.to_string());
    } else {
        ctx.fail();
    }
}

fn set_terrain(ctx: &mut EffectCtx, terrain: Terrain, line: &str) {
    let turns = terrain_turns(ctx.state, ctx.user);
    if ctx.state.field.set_terrain(terrain, turns) {
        ctx.log.push(line.to_string());
    } else {
        ctx.fail();
    }
}

/// Trick Room toggles: a second cast tears its own dimensions down
fn trick_room(ctx: &mut EffectCtx) {
    if ctx.state.field.trick_room() {
        ctx.state.field.trick_room_turns = 0;
        ctx.log.push("The twisted dimensions returned to normal!".to_string());
    } else {
        ctx.state.field.trick_room_turns = 5;
        let name = ctx.user_name();
        ctx.log.push(format!("{name} twisted the dimensions!"));
    }
}

fn gravity(ctx: &mut EffectCtx) {
    if ctx.state.field.gravity() {
        ctx.fail();
    } else {
        ctx.state.field.gravity_turns = 5;
        ctx.log.push("Gravity intensified!".to_string());
    }
}

fn tailwind(ctx: &mut EffectCtx) {
    let user = ctx.user;
    if ctx.state.side_mut(user).add_condition(SideCondition::Tailwind) {
        let name = ctx.user_name();
        ctx.log.push(format!("The Tailwind blew from behind {name}'s team!"));
    } else {
        ctx.fail();
    }
}

fn screen(ctx: &mut EffectCtx, kind: SideCondition) {
    let user = ctx.user;
    let turns = if has_item(ctx.state, user, "Light Clay") { 8 } else { 5 };
    if ctx.state.side_mut(user).add_condition_with_duration(kind, turns) {
        ctx.log.push(format!("{kind} made {}'s team stronger!", ctx.user_name()));
    } else {
        ctx.fail();
    }
}

/// Aurora Veil only goes up while it is hailing or snowing
fn aurora_veil(ctx: &mut EffectCtx) {
    if !matches!(
        ctx.state.field.weather(),
        Some(Weather::Hail | Weather::Snow)
    ) {
        ctx.fail();
        return;
    }
    screen(ctx, SideCondition::AuroraVeil);
}

fn side_support(ctx: &mut EffectCtx, kind: SideCondition) {
    let user = ctx.user;
    if ctx.state.side_mut(user).add_condition(kind) {
        ctx.log.push(format!("{kind} shrouded {}'s team!", ctx.user_name()));
    } else {
        ctx.fail();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::effect_for;
    use crate::log::TurnLog;
    use crate::rng::BattleRng;
    use fray_battle::{BattleState, Combatant, SideId, SideState, StatBlock, Type};
    use fray_dex::move_data;

    fn run(state: &mut BattleState, user: SideId, move_name: &str) -> (TurnLog, bool) {
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
        let handler = effect_for(move_name).expect("handler registered");
        handler(&mut ctx);
        let failed = ctx.failed;
        (log, failed)
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
            SideState::new(vec![member("Caster")]),
            SideState::new(vec![member("Foe")]),
        )
    }

    #[test]
    fn test_rain_dance_sets_and_refuses_repeat() {
        let mut state = battle();

        let (log, failed) = run(&mut state, SideId::A, "Rain Dance");
        assert!(!failed);
        assert_eq!(state.field.weather(), Some(Weather::Rain));
        assert!(log.contains("rain"));

        let (_, failed) = run(&mut state, SideId::A, "Rain Dance");
        assert!(failed);
    }

    #[test]
    fn test_weather_replaces_weather() {
        let mut state = battle();
        run(&mut state, SideId::A, "Rain Dance");
        let (_, failed) = run(&mut state, SideId::A, "Sunny Day");
        assert!(!failed);
        assert_eq!(state.field.weather(), Some(Weather::Sun));
    }

    #[test]
    fn test_trick_room_toggles() {
        let mut state = battle();
        run(&mut state, SideId::A, "Trick Room");
        assert!(state.field.trick_room());
        assert_eq!(state.field.trick_room_turns, 5);

        run(&mut state, SideId::A, "Trick Room");
        assert!(!state.field.trick_room());
    }

    #[test]
    fn test_screens_with_light_clay() {
        let mut state = battle();
        state.active_mut(SideId::A).item = Some("Light Clay".to_string());

        run(&mut state, SideId::A, "Reflect");
        assert_eq!(
            state.side(SideId::A).conditions[&SideCondition::Reflect].turns_left,
            Some(8)
        );

        let (_, failed) = run(&mut state, SideId::A, "Reflect");
        assert!(failed);
    }

    #[test]
    fn test_aurora_veil_needs_snowfall() {
        let mut state = battle();
        let (_, failed) = run(&mut state, SideId::A, "Aurora Veil");
        assert!(failed);

        state.field.set_weather(Weather::Snow, 5);
        let (_, failed) = run(&mut state, SideId::A, "Aurora Veil");
        assert!(!failed);
        assert!(state.side(SideId::A).has_condition(SideCondition::AuroraVeil));
    }

    #[test]
    fn test_tailwind_on_own_side() {
        let mut state = battle();
        let (log, failed) = run(&mut state, SideId::B, "Tailwind");
        assert!(!failed);
        assert!(state.side(SideId::B).has_condition(SideCondition::Tailwind));
        assert!(!state.side(SideId::A).has_condition(SideCondition::Tailwind));
        assert!(log.contains("Tailwind"));
    }

    #[test]
    fn test_terrain_with_extender() {
        let mut state = battle();
        state.active_mut(SideId::A).item = Some("Terrain Extender".to_string());

        run(&mut state, SideId::A, "Grassy Terrain");
        assert_eq!(state.field.terrain(), Some(Terrain::Grassy));
        assert_eq!(state.field.terrain.unwrap().turns_left, 8);
    }
}
