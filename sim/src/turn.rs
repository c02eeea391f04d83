//! Turn resolution
//!
//! [`apply_turn`] runs one full turn: forced-replacement handling, action
//! ordering, both actions through the move-effect pipeline, the end-of-turn
//! pass, and cleanup. An unexpected panic during action resolution is caught
//! at the turn boundary, logged as a fatal marker, and the partially-applied
//! state is returned; the caller decides how to proceed.
//!
//! [`Simulator`] wraps a seeded rng and a legality check into a convenient
//! step interface for drivers.

use std::panic::{catch_unwind, AssertUnwindSafe};

use anyhow::Context;
use fray_battle::{BattleState, SideId, Volatile};

use crate::actions::{valid_actions, Action, ActionError};
use crate::damage::{DamageModel, StandardModel};
use crate::log::TurnLog;
use crate::order::decide_order;
use crate::pipeline::{execute_action, execute_switch, TurnContext};
use crate::residual::end_of_turn;
use crate::rng::BattleRng;

/// Result of resolving one turn
#[derive(Debug)]
pub struct TurnOutcome {
    /// Ordered event log for the whole turn
    pub log: TurnLog,
    /// An internal fault was caught; the state is partially applied
    pub fatal: bool,
}

fn needs_replacement(state: &BattleState, side: SideId) -> bool {
    let active = state.active(side);
    active.is_fainted() || active.must_switch
}

/// Resolve one turn with the standard damage model
pub fn apply_turn(
    state: &mut BattleState,
    action_a: &Action,
    action_b: &Action,
    rng: &mut BattleRng,
) -> TurnOutcome {
    apply_turn_with_model(state, action_a, action_b, &StandardModel, rng)
}

/// Resolve one turn with a caller-supplied damage model
pub fn apply_turn_with_model(
    state: &mut BattleState,
    action_a: &Action,
    action_b: &Action,
    model: &dyn DamageModel,
    rng: &mut BattleRng,
) -> TurnOutcome {
    let mut log = TurnLog::new();
    state.turn += 1;
    log.push(format!("Turn {}", state.turn));
    tracing::debug!(turn = state.turn, "resolving turn");

    // Forced replacement: when either side must replace its active, only
    // switch actions are processed and the normal turn does not happen.
    if needs_replacement(state, SideId::A) || needs_replacement(state, SideId::B) {
        for (side, action) in [(SideId::A, action_a), (SideId::B, action_b)] {
            if needs_replacement(state, side) {
                if let Action::Switch(target) = action {
                    execute_switch(state, side, target, &mut log, rng);
                }
                // A side with no legal replacement simply takes no action
            }
        }
        cleanup(state);
        return TurnOutcome { log, fatal: false };
    }

    let order = decide_order(state, action_a, action_b, rng);
    if let Some(side) = order.quick_claw {
        let name = state.active(side).species.clone();
        log.push(format!("{name}'s Quick Claw let it move first!"));
    }

    let action_for = |side: SideId| match side {
        SideId::A => action_a,
        SideId::B => action_b,
    };

    // Remember who was in when actions were chosen; a combatant dragged in
    // mid-turn does not inherit the departed one's action.
    let chosen_actives = [state.side(SideId::A).active, state.side(SideId::B).active];

    for (i, side) in order.sequence().into_iter().enumerate() {
        if state.outcome().is_some() {
            break;
        }
        if i > 0 {
            let actor = state.active(side);
            if actor.is_fainted() || actor.must_switch {
                continue;
            }
            if state.side(side).active != chosen_actives[side.index()] {
                continue;
            }
        }

        let tctx = TurnContext {
            opponent_action: action_for(side.opponent()).clone(),
            opponent_has_acted: i > 0,
        };

        let result = catch_unwind(AssertUnwindSafe(|| {
            execute_action(state, side, action_for(side), &tctx, model, rng, &mut log);
        }));
        if result.is_err() {
            tracing::error!(side = %side, "internal fault during action resolution");
            log.push(format!(
                "!! internal fault while resolving side {side}'s action; turn aborted"
            ));
            return TurnOutcome { log, fatal: true };
        }
    }

    if state.outcome().is_none() {
        end_of_turn(state, rng, &mut log);
    }

    cleanup(state);
    TurnOutcome { log, fatal: false }
}

/// Turn cleanup: wipe one-turn volatiles, settle protection streaks, and
/// advance the active-turn counters.
fn cleanup(state: &mut BattleState) {
    for side in SideId::BOTH {
        let active = state.active_mut(side);
        let protected =
            active.has_volatile(Volatile::Protect) || active.has_volatile(Volatile::Endure);
        active.volatiles.retain(|v, _| !v.is_single_turn());
        if !protected {
            active.protect_streak = 0;
        }
        if active.is_alive() {
            active.active_turns += 1;
        }
    }
}

/// A seeded driver-facing front door: validates legality, then resolves.
#[derive(Debug)]
pub struct Simulator {
    rng: BattleRng,
}

impl Simulator {
    /// Create a simulator with a fixed seed; identical seeds replay
    /// identical battles
    pub fn new(seed: u64) -> Self {
        Self {
            rng: BattleRng::seeded(seed),
        }
    }

    /// Validate both actions against [`valid_actions`] and resolve the turn.
    /// Illegal submissions are rejected before the pipeline ever sees them.
    pub fn step(
        &mut self,
        state: &mut BattleState,
        action_a: &Action,
        action_b: &Action,
    ) -> anyhow::Result<TurnOutcome> {
        for (side, action) in [(SideId::A, action_a), (SideId::B, action_b)] {
            let legal = valid_actions(state, side);
            if !legal.is_empty() && !legal.contains(action) {
                return Err(ActionError::Illegal {
                    side: side.to_string(),
                    action: action.to_string(),
                })
                .context("action rejected by the legality layer");
            }
        }
        Ok(apply_turn(state, action_a, action_b, &mut self.rng))
    }

    /// Parse two textual action tokens and resolve the turn
    pub fn step_tokens(
        &mut self,
        state: &mut BattleState,
        token_a: &str,
        token_b: &str,
    ) -> anyhow::Result<TurnOutcome> {
        let action_a: Action = token_a
            .parse()
            .with_context(|| format!("side A submitted {token_a:?}"))?;
        let action_b: Action = token_b
            .parse()
            .with_context(|| format!("side B submitted {token_b:?}"))?;
        self.step(state, &action_a, &action_b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::damage::DamageOutcome;
    use fray_battle::{
        Combatant, MoveSlot, Outcome, SideState, Stat, StatBlock, Status, Type,
    };
    use fray_dex::MoveData;

    fn member(species: &str, typ: Type, spe: u16, moves: &[&str]) -> Combatant {
        Combatant::new(
            species,
            50,
            vec![typ],
            StatBlock::new(90, 90, 90, 90, 90, spe),
            "Limber",
        )
        .with_moves(moves.iter().map(|m| MoveSlot::new(*m, 24)).collect())
    }

    fn battle() -> BattleState {
        BattleState::new(
            SideState::new(vec![
                member("Aron", Type::Normal, 120, &["Tackle", "Protect", "Swords Dance", "Spikes"]),
                member("Brill", Type::Water, 80, &["Surf"]),
            ]),
            SideState::new(vec![
                member("Corvid", Type::Normal, 60, &["Tackle", "Thunder Wave"]),
                member("Dunlin", Type::Flying, 70, &["Tackle"]),
            ]),
        )
    }

    #[test]
    fn test_turn_is_deterministic() {
        let base = battle();

        let run = |seed: u64| {
            let mut state = base.branch();
            let mut rng = BattleRng::seeded(seed);
            let outcome = apply_turn(
                &mut state,
                &Action::mv("Tackle"),
                &Action::mv("Tackle"),
                &mut rng,
            );
            (state.active(SideId::A).hp(), state.active(SideId::B).hp(), outcome.log)
        };

        let (a1, b1, log1) = run(42);
        let (a2, b2, log2) = run(42);
        assert_eq!(a1, a2);
        assert_eq!(b1, b2);
        assert_eq!(log1, log2);

        // A different seed is allowed to differ (damage rolls), but the
        // same-seed replay above is the property that matters.
    }

    #[test]
    fn test_invariants_hold_after_turns() {
        let mut state = battle();
        let mut rng = BattleRng::seeded(7);

        for _ in 0..10 {
            if state.outcome().is_some() {
                break;
            }
            apply_turn(
                &mut state,
                &Action::mv("Swords Dance"),
                &Action::mv("Tackle"),
                &mut rng,
            );

            for side in SideId::BOTH {
                for c in &state.side(side).roster {
                    for stat in [Stat::Atk, Stat::Def, Stat::Spa, Stat::Spd, Stat::Spe, Stat::Accuracy, Stat::Evasion] {
                        let stage = c.stages.get(stat);
                        assert!((-6..=6).contains(&stage));
                    }
                    assert!(c.hp() <= c.max_hp);
                }
            }
        }
    }

    #[test]
    fn test_protect_succeeds_then_fails() {
        let mut state = battle();
        let mut rng = BattleRng::seeded(3);

        // Turn 1: Protect blocks the slower Tackle
        let outcome = apply_turn(
            &mut state,
            &Action::mv("Protect"),
            &Action::mv("Tackle"),
            &mut rng,
        );
        assert!(outcome.log.contains("protected itself"));
        assert_eq!(state.active(SideId::A).hp(), state.active(SideId::A).max_hp);
        assert_eq!(state.active(SideId::A).protect_streak, 1);

        // Turn 2: consecutive Protect fails and the streak resets to zero
        let outcome = apply_turn(
            &mut state,
            &Action::mv("Protect"),
            &Action::mv("Tackle"),
            &mut rng,
        );
        assert!(outcome.log.contains("But it failed!"));
        assert!(state.active(SideId::A).hp() < state.active(SideId::A).max_hp);
        assert_eq!(state.active(SideId::A).protect_streak, 0);
    }

    #[test]
    fn test_faster_side_acts_first_in_log() {
        let mut state = battle();
        let mut rng = BattleRng::seeded(1);
        let outcome = apply_turn(
            &mut state,
            &Action::mv("Tackle"),
            &Action::mv("Tackle"),
            &mut rng,
        );

        let lines = outcome.log.lines();
        let first_use = lines.iter().position(|l| l.contains("used Tackle")).unwrap();
        assert!(lines[first_use].starts_with("Aron"));
    }

    #[test]
    fn test_fainted_actor_does_not_act() {
        let mut state = battle();
        // Corvid cannot survive a max-roll Tackle from a +6 attacker
        state.active_mut(SideId::A).stages.set(Stat::Atk, 6);
        state.active_mut(SideId::B).set_hp(1);

        let mut rng = BattleRng::seeded(1);
        let outcome = apply_turn(
            &mut state,
            &Action::mv("Tackle"),
            &Action::mv("Tackle"),
            &mut rng,
        );

        assert!(state.active(SideId::B).is_fainted());
        assert!(outcome.log.contains("Corvid fainted!"));
        assert!(!outcome.log.contains("Corvid used"));
    }

    #[test]
    fn test_forced_replacement_turn() {
        let mut state = battle();
        state.active_mut(SideId::B).set_hp(0);

        let mut rng = BattleRng::seeded(1);
        let outcome = apply_turn(
            &mut state,
            &Action::mv("Tackle"),
            &Action::switch("Dunlin"),
            &mut rng,
        );

        // Only the replacement happened; no move was used
        assert_eq!(state.active(SideId::B).species, "Dunlin");
        assert!(!outcome.log.contains("used Tackle"));
        assert!(outcome.log.contains("sent out Dunlin"));
    }

    #[test]
    fn test_side_with_no_replacement_takes_no_action() {
        let mut state = BattleState::new(
            SideState::new(vec![member("Lone", Type::Normal, 50, &["Tackle"])]),
            SideState::new(vec![member("Foe", Type::Normal, 60, &["Tackle"])]),
        );
        state.active_mut(SideId::A).set_hp(0);
        assert!(valid_actions(&state, SideId::A).is_empty());

        let mut rng = BattleRng::seeded(1);
        let outcome = apply_turn(
            &mut state,
            &Action::mv("Tackle"),
            &Action::mv("Tackle"),
            &mut rng,
        );

        // The battle is already decided; no action is performed for anyone
        assert!(!outcome.log.contains("used"));
        assert_eq!(state.outcome(), Some(Outcome::Win(SideId::B)));
    }

    #[test]
    fn test_switch_resolves_before_moves() {
        let mut state = battle();
        let mut rng = BattleRng::seeded(1);
        let outcome = apply_turn(
            &mut state,
            &Action::mv("Tackle"),
            &Action::switch("Dunlin"),
            &mut rng,
        );

        let lines = outcome.log.lines();
        let switch_pos = lines.iter().position(|l| l.contains("sent out Dunlin")).unwrap();
        let move_pos = lines.iter().position(|l| l.contains("used Tackle")).unwrap();
        assert!(switch_pos < move_pos);
    }

    #[test]
    fn test_thunder_wave_paralyzes_and_residuals_run() {
        // Thunder Wave is 90% accurate; scan seeds until one connects
        let mut landed = false;
        for seed in 0..20 {
            let mut state = battle();
            let mut rng = BattleRng::seeded(seed);
            apply_turn(
                &mut state,
                &Action::mv("Swords Dance"),
                &Action::mv("Thunder Wave"),
                &mut rng,
            );

            assert_eq!(state.active(SideId::A).stages.atk, 2);
            if state.active(SideId::A).status == Some(Status::Paralysis) {
                landed = true;
                break;
            }
        }
        assert!(landed);
    }

    #[test]
    fn test_fatal_marker_on_internal_fault() {
        struct ExplodingModel;
        impl DamageModel for ExplodingModel {
            fn compute(
                &self,
                _state: &BattleState,
                _attacker: SideId,
                _mov: &MoveData,
                _rng: &mut BattleRng,
            ) -> DamageOutcome {
                panic!("synthetic fault");
            }
        }

        let mut state = battle();
        let mut rng = BattleRng::seeded(1);
        let outcome = apply_turn_with_model(
            &mut state,
            &Action::mv("Tackle"),
            &Action::mv("Tackle"),
            &ExplodingModel,
            &mut rng,
        );

        assert!(outcome.fatal);
        assert!(outcome.log.contains("internal fault"));
        // The partially-applied state is returned, not rolled back
        assert_eq!(state.turn, 1);
    }

    #[test]
    fn test_simulator_rejects_illegal_action() {
        let mut state = battle();
        let mut sim = Simulator::new(9);

        let err = sim
            .step(&mut state, &Action::mv("Hydro Cannon"), &Action::mv("Tackle"))
            .unwrap_err();
        assert!(err.to_string().contains("legality"));

        // Legal submissions go through
        let outcome = sim
            .step(&mut state, &Action::mv("Tackle"), &Action::mv("Tackle"))
            .unwrap();
        assert!(!outcome.fatal);
    }

    #[test]
    fn test_simulator_parses_tokens() {
        let mut state = battle();
        let mut sim = Simulator::new(9);

        let outcome = sim
            .step_tokens(&mut state, "Move: Tackle", "Move: Tackle")
            .unwrap();
        assert!(outcome.log.contains("used Tackle"));

        let err = sim
            .step_tokens(&mut state, "Tackle", "Move: Tackle")
            .unwrap_err();
        assert!(err.to_string().contains("side A"));
    }

    #[test]
    fn test_branching_leaves_canonical_state_alone() {
        let state = battle();
        let mut branch = state.branch();
        let mut rng = BattleRng::seeded(11);

        apply_turn(
            &mut branch,
            &Action::mv("Tackle"),
            &Action::mv("Tackle"),
            &mut rng,
        );

        assert_eq!(state.turn, 0);
        assert_eq!(state.active(SideId::A).hp(), state.active(SideId::A).max_hp);
        assert_ne!(branch.turn, state.turn);
    }

    #[test]
    fn test_spikes_then_switch_in_damage() {
        let mut state = battle();
        let mut rng = BattleRng::seeded(4);

        // Aron lays Spikes while Corvid idles
        apply_turn(
            &mut state,
            &Action::mv("Spikes"),
            &Action::mv("Thunder Wave"),
            &mut rng,
        );
        // B switches into the hazard; Dunlin is Flying and floats over it
        apply_turn(
            &mut state,
            &Action::mv("Swords Dance"),
            &Action::switch("Dunlin"),
            &mut rng,
        );
        assert_eq!(state.active(SideId::B).hp(), state.active(SideId::B).max_hp);
    }

    #[test]
    fn test_active_turns_advance() {
        let mut state = battle();
        let mut rng = BattleRng::seeded(5);
        assert_eq!(state.active(SideId::A).active_turns, 0);

        apply_turn(
            &mut state,
            &Action::mv("Swords Dance"),
            &Action::mv("Thunder Wave"),
            &mut rng,
        );
        assert_eq!(state.active(SideId::A).active_turns, 1);
    }
}
