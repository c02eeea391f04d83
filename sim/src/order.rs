//! Action ordering: priority brackets, effective speed, and tie-breaks

use std::cmp::Ordering;

use fray_battle::{BattleState, SideId, Type};
use fray_dex::{ability_data, move_data, MoveCategory};

use crate::actions::Action;
use crate::mechanics::{ability_active, effective_speed, has_item};
use crate::rng::BattleRng;

/// Result of ordering a turn's two actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnOrder {
    /// The side that acts first
    pub first: SideId,
    /// A side whose held item let it jump its priority bracket this turn
    pub quick_claw: Option<SideId>,
}

impl TurnOrder {
    /// Both sides in resolution order
    pub fn sequence(&self) -> [SideId; 2] {
        [self.first, self.first.opponent()]
    }
}

#[derive(Debug, PartialEq, Eq)]
struct OrderKey {
    /// Switches outrank every move
    is_switch: bool,
    /// Move priority bracket (0 for switches)
    priority: i8,
    /// Random move-first item proc within the bracket
    quick_proc: bool,
    /// Effective speed, already inverted under Trick Room
    speed: u32,
}

impl OrderKey {
    fn beats(&self, other: &Self) -> Option<bool> {
        match (self.is_switch, other.is_switch) {
            (true, false) => return Some(true),
            (false, true) => return Some(false),
            _ => {}
        }
        match self.priority.cmp(&other.priority) {
            Ordering::Greater => return Some(true),
            Ordering::Less => return Some(false),
            Ordering::Equal => {}
        }
        match (self.quick_proc, other.quick_proc) {
            (true, false) => return Some(true),
            (false, true) => return Some(false),
            _ => {}
        }
        match self.speed.cmp(&other.speed) {
            Ordering::Greater => Some(true),
            Ordering::Less => Some(false),
            Ordering::Equal => None,
        }
    }
}

/// Dynamic move priority: base priority plus ability bonuses
fn move_priority(state: &BattleState, side: SideId, move_name: &str) -> i8 {
    let data = move_data(move_name);
    let mut priority = data.priority;

    if ability_active(state, side) {
        let active = state.active(side);
        match ability_data(&active.ability).name {
            "Prankster" if data.category == MoveCategory::Status => priority += 1,
            "Gale Wings" if data.typ == Type::Flying && active.hp() == active.max_hp => {
                priority += 1
            }
            _ => {}
        }
    }

    priority
}

/// Decide which side acts first this turn.
///
/// Switches outrank moves; moves compare by dynamic priority, then by the
/// random move-first item proc, then by effective speed (inverted while
/// Trick Room is up). Equal speed resolves by a fair coin flip from the
/// injected rng, so the tie-break is random but reproducible per seed.
pub fn decide_order(
    state: &BattleState,
    action_a: &Action,
    action_b: &Action,
    rng: &mut BattleRng,
) -> TurnOrder {
    let mut quick_claw = None;

    let key = |side: SideId, action: &Action, rng: &mut BattleRng| -> OrderKey {
        let (is_switch, priority) = match action {
            Action::Switch(_) => (true, 0),
            Action::Move(name) => (false, move_priority(state, side, name)),
        };
        let quick_proc =
            !is_switch && has_item(state, side, "Quick Claw") && rng.percent(20);
        let raw_speed = effective_speed(state, side);
        let speed = if state.field.trick_room() {
            u32::MAX - raw_speed
        } else {
            raw_speed
        };
        OrderKey { is_switch, priority, quick_proc, speed }
    };

    let key_a = key(SideId::A, action_a, rng);
    let key_b = key(SideId::B, action_b, rng);

    if key_a.quick_proc {
        quick_claw = Some(SideId::A);
    } else if key_b.quick_proc {
        quick_claw = Some(SideId::B);
    }

    let first = match key_a.beats(&key_b) {
        Some(true) => SideId::A,
        Some(false) => SideId::B,
        // Speed tie: uniform random, deterministic per seed
        None => {
            if rng.coin_flip() {
                SideId::A
            } else {
                SideId::B
            }
        }
    };

    TurnOrder { first, quick_claw }
}
