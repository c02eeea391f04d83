//! Move records and lookup

use std::collections::HashMap;
use std::sync::LazyLock;

use fray_battle::{Stat, Status, Type, Volatile};

use crate::{normalize_id, DexError};

/// Damage category of a move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum MoveCategory {
    Physical,
    Special,
    Status,
}

impl MoveCategory {
    /// Whether this category goes through the damage calculator
    pub fn is_damaging(&self) -> bool {
        !matches!(self, MoveCategory::Status)
    }
}

/// Hit-count behavior for multi-hit moves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum MultiHit {
    /// Always exactly this many hits
    Fixed(u8),
    /// 2-5 hits, weighted 35/35/15/15
    TwoToFive,
}

/// Fixed-damage rules that bypass the damage formula
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum FixedDamage {
    /// Damage equal to the attacker's level
    Level,
    /// A constant amount
    Exact(u16),
    /// Half the target's current HP (minimum 1)
    HalfCurrentHp,
}

/// What a chance-based secondary effect does when it procs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum SecondaryKind {
    /// Inflict a primary status on the target
    Status(Status),
    /// Inflict a volatile condition on the target
    Volatile(Volatile),
    /// Stage changes on the target
    Boosts(&'static [(Stat, i8)]),
    /// Stage changes on the user
    SelfBoosts(&'static [(Stat, i8)]),
}

/// A chance-based secondary effect attached to a damaging move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SecondaryEffect {
    /// Proc chance in percent (1-100)
    pub chance: u8,
    pub kind: SecondaryKind,
}

/// A fully-specified move record.
///
/// Everything uniform enough to be table-driven lives here; truly bespoke
/// behavior (field moves, hazards, variable power...) is keyed off the
/// normalized move id by the simulator's effect registry.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MoveData {
    pub name: &'static str,
    pub typ: Type,
    pub category: MoveCategory,
    /// Base power (0 for status moves and variable/fixed-damage moves)
    pub power: u16,
    /// Base accuracy in percent; `None` never misses
    pub accuracy: Option<u8>,
    pub priority: i8,
    pub pp: u8,

    // Flags
    pub contact: bool,
    /// Blocked by opposing protection
    pub protectable: bool,
    /// Goes through opposing protection even though it targets the opponent
    pub bypass_protect: bool,
    /// Sound-based: goes through substitutes
    pub sound: bool,
    pub punch: bool,
    /// Powder-based: Grass-types are immune
    pub powder: bool,

    // Crits
    pub crit_stage: u8,
    pub always_crit: bool,

    // Hit structure
    pub multi_hit: Option<MultiHit>,

    // Fractions are (numerator, denominator)
    /// Recoil as a fraction of damage dealt
    pub recoil: Option<(u8, u8)>,
    /// HP recovered as a fraction of damage dealt
    pub drain: Option<(u8, u8)>,
    /// HP recovered as a fraction of the user's max HP
    pub heal_fraction: Option<(u8, u8)>,

    // Guaranteed effects
    /// Primary status this move inflicts on hit (100%)
    pub inflicts_status: Option<Status>,
    /// Chance-based secondary effect
    pub secondary: Option<SecondaryEffect>,
    /// Stage changes always applied to the user after a successful use
    pub self_boosts: &'static [(Stat, i8)],
    /// Stage changes always applied to the target on hit
    pub target_boosts: &'static [(Stat, i8)],

    // Stat substitution (transient attacker/defender views)
    /// Attack with this stat instead of the category default
    pub offense_stat: Option<Stat>,
    /// Hit this defense stat instead of the category default
    pub defense_stat: Option<Stat>,

    // Damage overrides
    pub fixed: Option<FixedDamage>,
    pub ohko: bool,

    // Multi-turn structure
    pub charge: bool,
    /// Charge turn is skipped in Sun (Solar Beam)
    pub charge_skip_in_sun: bool,
    /// User is untargetable during the charge turn (Fly, Dig, Dive...)
    pub semi_invulnerable: bool,
    pub recharge: bool,

    // Protection moves
    pub protection: bool,
    pub endure: bool,

    // Switching
    /// Forces the target out (Roar, Dragon Tail)
    pub force_switch: bool,
    /// Switches the user out after use (U-turn, Teleport)
    pub self_switch: bool,

    /// Healing move for Heal Block purposes (drain moves count separately)
    pub healing: bool,
    /// Using this move thaws a frozen user
    pub thaws_user: bool,
}

impl MoveData {
    /// Whether this record is the unknown-move fallback
    pub fn is_unknown(&self) -> bool {
        std::ptr::eq(self, &UNKNOWN_MOVE)
    }

    /// Whether this move goes through the damage calculator
    pub fn is_damaging(&self) -> bool {
        self.category.is_damaging()
    }

    /// Whether Heal Block forbids this move
    pub fn is_healing(&self) -> bool {
        self.healing || self.heal_fraction.is_some() || self.drain.is_some()
    }

    /// Whether this is a self-protection move (Protect family or Endure)
    pub fn is_protection(&self) -> bool {
        self.protection || self.endure
    }
}

const fn base(
    name: &'static str,
    typ: Type,
    category: MoveCategory,
    power: u16,
    accuracy: Option<u8>,
    pp: u8,
) -> MoveData {
    MoveData {
        name,
        typ,
        category,
        power,
        accuracy,
        priority: 0,
        pp,
        contact: false,
        protectable: true,
        bypass_protect: false,
        sound: false,
        punch: false,
        powder: false,
        crit_stage: 0,
        always_crit: false,
        multi_hit: None,
        recoil: None,
        drain: None,
        heal_fraction: None,
        inflicts_status: None,
        secondary: None,
        self_boosts: &[],
        target_boosts: &[],
        offense_stat: None,
        defense_stat: None,
        fixed: None,
        ohko: false,
        charge: false,
        charge_skip_in_sun: false,
        semi_invulnerable: false,
        recharge: false,
        protection: false,
        endure: false,
        force_switch: false,
        self_switch: false,
        healing: false,
        thaws_user: false,
    }
}

/// Contact physical attack
const fn phys(name: &'static str, typ: Type, power: u16, acc: u8, pp: u8) -> MoveData {
    let mut m = base(name, typ, MoveCategory::Physical, power, Some(acc), pp);
    m.contact = true;
    m
}

/// Non-contact physical attack
const fn phys_ranged(name: &'static str, typ: Type, power: u16, acc: u8, pp: u8) -> MoveData {
    base(name, typ, MoveCategory::Physical, power, Some(acc), pp)
}

/// Special attack
const fn special(name: &'static str, typ: Type, power: u16, acc: u8, pp: u8) -> MoveData {
    base(name, typ, MoveCategory::Special, power, Some(acc), pp)
}

/// Status move aimed at the opponent
const fn status(name: &'static str, typ: Type, acc: u8, pp: u8) -> MoveData {
    base(name, typ, MoveCategory::Status, 0, Some(acc), pp)
}

/// Status move targeting the user, the user's side, or the field
const fn status_self(name: &'static str, typ: Type, pp: u8) -> MoveData {
    let mut m = base(name, typ, MoveCategory::Status, 0, None, pp);
    m.protectable = false;
    m
}

const fn sec_status(chance: u8, st: Status) -> Option<SecondaryEffect> {
    Some(SecondaryEffect { chance, kind: SecondaryKind::Status(st) })
}

const fn sec_volatile(chance: u8, v: Volatile) -> Option<SecondaryEffect> {
    Some(SecondaryEffect { chance, kind: SecondaryKind::Volatile(v) })
}

const fn sec_boosts(chance: u8, boosts: &'static [(Stat, i8)]) -> Option<SecondaryEffect> {
    Some(SecondaryEffect { chance, kind: SecondaryKind::Boosts(boosts) })
}

const fn sec_self_boosts(chance: u8, boosts: &'static [(Stat, i8)]) -> Option<SecondaryEffect> {
    Some(SecondaryEffect { chance, kind: SecondaryKind::SelfBoosts(boosts) })
}

/// Fallback record for unrecognized move identifiers: a 0-power status move
/// with nothing attached, which the pipeline resolves as a failed move.
pub static UNKNOWN_MOVE: MoveData = base("Unknown Move", Type::Normal, MoveCategory::Status, 0, None, 1);

/// Struggle, used when no move slot has PP. Typeless in effect (the
/// calculator skips the type chart for it) with fixed recoil handled by the
/// pipeline.
pub static STRUGGLE: MoveData = {
    let mut m = phys("Struggle", Type::Normal, 50, 100, 1);
    m.accuracy = None;
    m
};

#[rustfmt::skip]
fn entries() -> Vec<MoveData> {
    use Type::*;

    vec![
        // === Normal ===
        phys("Tackle", Normal, 40, 100, 35),
        MoveData { priority: 1, ..phys("Quick Attack", Normal, 40, 100, 30) },
        MoveData { priority: 2, ..phys("Extreme Speed", Normal, 80, 100, 5) },
        MoveData { recoil: Some((1, 3)), ..phys("Double-Edge", Normal, 120, 100, 15) },
        MoveData { recoil: Some((1, 4)), ..phys("Take Down", Normal, 90, 85, 20) },
        MoveData { secondary: sec_status(30, Status::Paralysis), ..phys("Body Slam", Normal, 85, 100, 15) },
        MoveData { secondary: sec_volatile(30, Volatile::Flinch), ..phys("Headbutt", Normal, 70, 100, 15) },
        MoveData { crit_stage: 1, ..phys("Slash", Normal, 70, 100, 20) },
        MoveData { multi_hit: Some(MultiHit::Fixed(2)), ..phys("Double Hit", Normal, 35, 90, 10) },
        phys("Mega Kick", Normal, 120, 75, 5),
        // Doubled by the power override while the user is statused
        phys("Facade", Normal, 70, 100, 20),
        MoveData { recharge: true, ..phys("Giga Impact", Normal, 150, 90, 5) },
        MoveData { priority: 3, secondary: sec_volatile(100, Volatile::Flinch), ..phys("Fake Out", Normal, 40, 100, 10) },
        MoveData { fixed: Some(FixedDamage::Level), ..phys("Seismic Toss", Fighting, 0, 100, 20) },
        MoveData { fixed: Some(FixedDamage::HalfCurrentHp), ..phys("Super Fang", Normal, 0, 90, 10) },
        MoveData { fixed: Some(FixedDamage::Exact(20)), ..special("Sonic Boom", Normal, 0, 90, 20) },
        phys_ranged("Explosion", Normal, 250, 100, 5),
        phys_ranged("Self-Destruct", Normal, 200, 100, 5),
        // Power scales with remaining HP via the override table
        phys("Flail", Normal, 0, 100, 15),
        MoveData { recharge: true, ..special("Hyper Beam", Normal, 150, 90, 5) },
        special("Swift", Normal, 60, 0, 20).never_miss(),
        MoveData { sound: true, ..special("Hyper Voice", Normal, 90, 100, 10) },
        MoveData { sound: true, ..special("Boomburst", Normal, 140, 100, 10) },
        MoveData { ohko: true, ..phys_ranged("Guillotine", Normal, 0, 30, 5) },
        MoveData { ohko: true, ..phys_ranged("Horn Drill", Normal, 0, 30, 5) },

        // === Fire ===
        MoveData { punch: true, secondary: sec_status(10, Status::Burn), thaws_user: true, ..phys("Fire Punch", Fire, 75, 100, 15) },
        MoveData { recoil: Some((1, 3)), secondary: sec_status(10, Status::Burn), thaws_user: true, ..phys("Flare Blitz", Fire, 120, 100, 15) },
        MoveData { secondary: sec_status(10, Status::Burn), ..phys("Fire Fang", Fire, 65, 95, 15) },
        MoveData { secondary: sec_status(10, Status::Burn), ..special("Flamethrower", Fire, 90, 100, 15) },
        MoveData { secondary: sec_status(10, Status::Burn), ..special("Fire Blast", Fire, 110, 85, 5) },
        MoveData { secondary: sec_status(10, Status::Burn), ..special("Heat Wave", Fire, 95, 90, 10) },
        MoveData { self_boosts: &[(Stat::Spa, -2)], ..special("Overheat", Fire, 130, 90, 5) },
        // Power scales with remaining HP via the override table
        special("Eruption", Fire, 150, 100, 5),

        // === Water ===
        MoveData { secondary: sec_status(30, Status::Burn), thaws_user: true, ..special("Scald", Water, 80, 100, 15) },
        special("Surf", Water, 90, 100, 15),
        special("Hydro Pump", Water, 110, 80, 5),
        special("Water Spout", Water, 150, 100, 5),
        MoveData { priority: 1, ..phys("Aqua Jet", Water, 40, 100, 20) },
        phys("Waterfall", Water, 80, 100, 15).with_secondary(sec_volatile(20, Volatile::Flinch)),
        MoveData { secondary: sec_boosts(20, &[(Stat::Def, -1)]), ..phys("Liquidation", Water, 85, 100, 10) },
        // Partial trap applied by the effect registry
        special("Whirlpool", Water, 35, 85, 15),
        MoveData { charge: true, semi_invulnerable: true, ..phys("Dive", Water, 80, 100, 10) },
        // Doubled by the power override when the target is at half HP or less
        special("Brine", Water, 65, 100, 10),

        // === Electric ===
        MoveData { punch: true, secondary: sec_status(10, Status::Paralysis), ..phys("Thunder Punch", Electric, 75, 100, 15) },
        MoveData { recoil: Some((1, 4)), ..phys("Wild Charge", Electric, 90, 100, 15) },
        MoveData { recoil: Some((1, 3)), secondary: sec_status(10, Status::Paralysis), ..phys("Volt Tackle", Electric, 120, 100, 15) },
        MoveData { secondary: sec_status(10, Status::Paralysis), ..special("Thunderbolt", Electric, 90, 100, 15) },
        // Rain makes it sure-hit and Sun halves its accuracy (accuracy override)
        MoveData { secondary: sec_status(30, Status::Paralysis), ..special("Thunder", Electric, 110, 70, 10) },
        MoveData { self_switch: true, ..special("Volt Switch", Electric, 70, 100, 20) },
        // Power from the speed ratio via the override table
        special("Electro Ball", Electric, 0, 100, 10),
        MoveData { inflicts_status: Some(Status::Paralysis), ..status("Thunder Wave", Electric, 90, 20) },

        // === Grass ===
        MoveData { crit_stage: 1, ..phys("Leaf Blade", Grass, 90, 100, 15) },
        phys("Power Whip", Grass, 120, 85, 10),
        MoveData { multi_hit: Some(MultiHit::TwoToFive), ..phys_ranged("Bullet Seed", Grass, 25, 100, 30) },
        MoveData { recoil: Some((1, 3)), ..phys("Wood Hammer", Grass, 120, 100, 15) },
        MoveData { drain: Some((1, 2)), ..special("Giga Drain", Grass, 75, 100, 10) },
        MoveData { secondary: sec_boosts(10, &[(Stat::Spd, -1)]), ..special("Energy Ball", Grass, 90, 100, 10) },
        MoveData { self_boosts: &[(Stat::Spa, -2)], ..special("Leaf Storm", Grass, 130, 90, 5) },
        MoveData { charge: true, charge_skip_in_sun: true, ..special("Solar Beam", Grass, 120, 100, 10) },
        MoveData { powder: true, inflicts_status: Some(Status::Sleep), ..status("Sleep Powder", Grass, 75, 15) },
        MoveData { powder: true, inflicts_status: Some(Status::Sleep), ..status("Spore", Grass, 100, 15) },
        MoveData { powder: true, inflicts_status: Some(Status::Poison), ..status("Poison Powder", Poison, 75, 35) },
        MoveData { powder: true, inflicts_status: Some(Status::Paralysis), ..status("Stun Spore", Grass, 75, 30) },
        // Seeding handled by the effect registry (Grass-types are immune)
        status("Leech Seed", Grass, 90, 10),

        // === Ice ===
        MoveData { punch: true, secondary: sec_status(10, Status::Freeze), ..phys("Ice Punch", Ice, 75, 100, 15) },
        MoveData { priority: 1, ..phys_ranged("Ice Shard", Ice, 40, 100, 30) },
        MoveData { secondary: sec_volatile(30, Volatile::Flinch), ..phys_ranged("Icicle Crash", Ice, 85, 90, 10) },
        MoveData { multi_hit: Some(MultiHit::TwoToFive), ..phys_ranged("Icicle Spear", Ice, 25, 100, 30) },
        MoveData { secondary: sec_status(10, Status::Freeze), ..special("Ice Beam", Ice, 90, 100, 10) },
        // Sure-hit in Hail/Snow via the accuracy override
        MoveData { secondary: sec_status(10, Status::Freeze), ..special("Blizzard", Ice, 110, 70, 5) },
        MoveData { always_crit: true, ..special("Frost Breath", Ice, 60, 90, 10) },
        MoveData { ohko: true, ..special("Sheer Cold", Ice, 0, 30, 5) },

        // === Fighting ===
        // Screens on the target's side are shattered by the effect registry
        phys("Brick Break", Fighting, 75, 100, 15),
        MoveData { self_boosts: &[(Stat::Def, -1), (Stat::Spd, -1)], ..phys("Close Combat", Fighting, 120, 100, 5) },
        MoveData { self_boosts: &[(Stat::Atk, -1), (Stat::Def, -1)], ..phys("Superpower", Fighting, 120, 100, 5) },
        MoveData { punch: true, drain: Some((1, 2)), ..phys("Drain Punch", Fighting, 75, 100, 10) },
        MoveData { punch: true, priority: 1, ..phys("Mach Punch", Fighting, 40, 100, 30) },
        MoveData { target_boosts: &[(Stat::Spe, -1)], ..phys("Low Sweep", Fighting, 65, 100, 20) },
        MoveData { offense_stat: Some(Stat::Def), ..phys("Body Press", Fighting, 80, 100, 10) },
        special("Aura Sphere", Fighting, 80, 0, 20).never_miss(),
        MoveData { secondary: sec_boosts(10, &[(Stat::Spd, -1)]), ..special("Focus Blast", Fighting, 120, 70, 5) },
        MoveData { ohko: true, ..phys_ranged("Fissure", Ground, 0, 30, 5) },

        // === Poison ===
        MoveData { secondary: sec_status(30, Status::Poison), ..phys("Poison Jab", Poison, 80, 100, 20) },
        MoveData { secondary: sec_status(30, Status::Poison), ..phys_ranged("Gunk Shot", Poison, 120, 80, 5) },
        MoveData { secondary: sec_status(30, Status::Poison), ..special("Sludge Bomb", Poison, 90, 100, 10) },
        MoveData { secondary: sec_status(10, Status::Poison), ..special("Sludge Wave", Poison, 95, 100, 10) },
        // Doubled by the power override against a poisoned target
        special("Venoshock", Poison, 65, 100, 10),
        // Stage reset handled by the effect registry
        special("Clear Smog", Poison, 50, 0, 15).never_miss(),
        MoveData { inflicts_status: Some(Status::BadPoison), ..status("Toxic", Poison, 90, 10) },

        // === Ground ===
        phys_ranged("Earthquake", Ground, 100, 100, 10),
        MoveData { crit_stage: 1, ..phys("Drill Run", Ground, 80, 95, 10) },
        phys("High Horsepower", Ground, 95, 95, 10),
        MoveData { charge: true, semi_invulnerable: true, ..phys("Dig", Ground, 80, 100, 10) },
        MoveData { secondary: sec_boosts(10, &[(Stat::Spd, -1)]), ..special("Earth Power", Ground, 90, 100, 10) },

        // === Flying ===
        MoveData { recoil: Some((1, 3)), ..phys("Brave Bird", Flying, 120, 100, 15) },
        MoveData { charge: true, semi_invulnerable: true, ..phys("Fly", Flying, 90, 95, 15) },
        MoveData { multi_hit: Some(MultiHit::Fixed(2)), ..phys("Dual Wingbeat", Flying, 40, 90, 10) },
        // Doubled by the power override when the user holds no item
        phys("Acrobatics", Flying, 55, 100, 15),
        MoveData { secondary: sec_volatile(30, Volatile::Flinch), ..special("Air Slash", Flying, 75, 95, 15) },
        // Rain makes it sure-hit and Sun halves its accuracy (accuracy override)
        MoveData { secondary: sec_volatile(30, Volatile::Confusion), ..special("Hurricane", Flying, 110, 70, 10) },

        // === Psychic ===
        MoveData { secondary: sec_volatile(20, Volatile::Flinch), ..phys("Zen Headbutt", Psychic, 80, 90, 15) },
        // Screens on the target's side are shattered by the effect registry
        phys("Psychic Fangs", Psychic, 85, 100, 10),
        MoveData { secondary: sec_boosts(10, &[(Stat::Spd, -1)]), ..special("Psychic", Psychic, 90, 100, 10) },
        MoveData { defense_stat: Some(Stat::Def), ..special("Psyshock", Psychic, 80, 100, 10) },
        // Power from accumulated boosts via the override table
        special("Stored Power", Psychic, 0, 100, 10),

        // === Bug ===
        phys("X-Scissor", Bug, 80, 100, 15),
        MoveData { self_switch: true, ..phys("U-turn", Bug, 70, 100, 20) },
        MoveData { target_boosts: &[(Stat::Atk, -1)], ..phys("Lunge", Bug, 80, 100, 15) },
        MoveData { sound: true, secondary: sec_boosts(10, &[(Stat::Spd, -1)]), ..special("Bug Buzz", Bug, 90, 100, 10) },

        // === Rock ===
        MoveData { crit_stage: 1, ..phys_ranged("Stone Edge", Rock, 100, 80, 5) },
        MoveData { secondary: sec_volatile(30, Volatile::Flinch), ..phys_ranged("Rock Slide", Rock, 75, 90, 10) },
        MoveData { multi_hit: Some(MultiHit::TwoToFive), ..phys_ranged("Rock Blast", Rock, 25, 90, 10) },
        MoveData { recoil: Some((1, 2)), ..phys("Head Smash", Rock, 150, 80, 5) },
        special("Power Gem", Rock, 80, 100, 20),

        // === Ghost ===
        MoveData { charge: true, semi_invulnerable: true, bypass_protect: true, ..phys("Phantom Force", Ghost, 90, 100, 10) },
        MoveData { crit_stage: 1, ..phys("Shadow Claw", Ghost, 70, 100, 15) },
        MoveData { priority: 1, ..phys("Shadow Sneak", Ghost, 40, 100, 30) },
        MoveData { secondary: sec_boosts(20, &[(Stat::Spd, -1)]), ..special("Shadow Ball", Ghost, 80, 100, 15) },
        // Doubled by the power override against a statused target
        special("Hex", Ghost, 65, 100, 10),
        MoveData { fixed: Some(FixedDamage::Level), ..special("Night Shade", Ghost, 0, 100, 15) },
        status("Confuse Ray", Ghost, 100, 10),

        // === Dragon ===
        phys("Dragon Claw", Dragon, 80, 100, 15),
        // Locks the user in for 2-3 turns, then confuses (effect registry)
        phys("Outrage", Dragon, 120, 100, 10),
        MoveData { priority: -6, force_switch: true, ..phys("Dragon Tail", Dragon, 60, 90, 10) },
        special("Dragon Pulse", Dragon, 85, 100, 10),
        MoveData { self_boosts: &[(Stat::Spa, -2)], ..special("Draco Meteor", Dragon, 130, 90, 5) },
        MoveData { fixed: Some(FixedDamage::Exact(40)), ..special("Dragon Rage", Dragon, 0, 100, 10) },

        // === Dark ===
        MoveData { secondary: sec_boosts(20, &[(Stat::Def, -1)]), ..phys("Crunch", Dark, 80, 100, 15) },
        // Item removal and the held-item power bonus live in the registry
        phys("Knock Off", Dark, 65, 100, 20),
        // Fails unless the target is about to use a damaging move (registry)
        MoveData { priority: 1, ..phys("Sucker Punch", Dark, 70, 100, 5) },
        MoveData { secondary: sec_volatile(20, Volatile::Flinch), ..special("Dark Pulse", Dark, 80, 100, 15) },

        // === Steel ===
        MoveData { secondary: sec_volatile(30, Volatile::Flinch), ..phys("Iron Head", Steel, 80, 100, 15) },
        MoveData { punch: true, priority: 1, ..phys("Bullet Punch", Steel, 40, 100, 30) },
        MoveData { punch: true, secondary: sec_self_boosts(20, &[(Stat::Atk, 1)]), ..phys("Meteor Mash", Steel, 90, 90, 10) },
        // Power from the speed ratio via the override table
        phys("Gyro Ball", Steel, 0, 100, 5),
        MoveData { secondary: sec_boosts(10, &[(Stat::Spd, -1)]), ..special("Flash Cannon", Steel, 80, 100, 10) },

        // === Fairy ===
        MoveData { secondary: sec_boosts(10, &[(Stat::Atk, -1)]), ..phys("Play Rough", Fairy, 90, 90, 10) },
        MoveData { secondary: sec_boosts(30, &[(Stat::Spa, -1)]), ..special("Moonblast", Fairy, 95, 100, 15) },
        special("Dazzling Gleam", Fairy, 80, 100, 10),

        // === Weather / field-shaping (handled by the effect registry) ===
        status_self("Sunny Day", Fire, 5),
        status_self("Rain Dance", Water, 5),
        status_self("Sandstorm", Rock, 10),
        status_self("Hail", Ice, 10),
        status_self("Snowscape", Ice, 10),
        // Type and power shift with the weather (override table)
        special("Weather Ball", Normal, 50, 100, 10),
        status_self("Electric Terrain", Electric, 10),
        status_self("Grassy Terrain", Grass, 10),
        status_self("Misty Terrain", Fairy, 10),
        status_self("Psychic Terrain", Psychic, 10),
        MoveData { priority: -7, ..status_self("Trick Room", Psychic, 5) },
        status_self("Gravity", Psychic, 5),
        status_self("Tailwind", Flying, 15),

        // === Hazards and removal ===
        status_self("Spikes", Ground, 20),
        status_self("Toxic Spikes", Poison, 20),
        status_self("Stealth Rock", Rock, 20),
        status_self("Sticky Web", Bug, 20),
        // Clears own hazards and raises Speed (registry)
        phys_ranged("Rapid Spin", Normal, 50, 100, 40),
        // Clears hazards and screens on both sides, drops evasion (registry)
        MoveData { target_boosts: &[(Stat::Evasion, -1)], ..status("Defog", Flying, 0, 15).never_miss() },

        // === Screens and side protection ===
        status_self("Reflect", Psychic, 20),
        status_self("Light Screen", Psychic, 30),
        // Requires Hail or Snow (registry)
        status_self("Aurora Veil", Ice, 20),
        status_self("Safeguard", Normal, 25),
        status_self("Mist", Ice, 30),

        // === Protection ===
        MoveData { priority: 4, protection: true, ..status_self("Protect", Normal, 10) },
        MoveData { priority: 4, protection: true, ..status_self("Detect", Fighting, 5) },
        MoveData { priority: 4, protection: true, ..status_self("Spiky Shield", Grass, 10) },
        MoveData { priority: 4, protection: true, ..status_self("Baneful Bunker", Poison, 10) },
        MoveData { priority: 4, endure: true, ..status_self("Endure", Normal, 10) },
        // Protection-bypassing hit
        MoveData { priority: 2, bypass_protect: true, ..phys("Feint", Normal, 30, 100, 10) },

        // === Healing ===
        MoveData { heal_fraction: Some((1, 2)), healing: true, ..status_self("Recover", Normal, 5) },
        MoveData { heal_fraction: Some((1, 2)), healing: true, ..status_self("Roost", Flying, 5) },
        MoveData { heal_fraction: Some((1, 2)), healing: true, ..status_self("Slack Off", Normal, 5) },
        MoveData { heal_fraction: Some((1, 2)), healing: true, ..status_self("Soft-Boiled", Normal, 5) },
        // Weather-scaled healing via the effect registry
        MoveData { healing: true, ..status_self("Moonlight", Fairy, 5) },
        MoveData { healing: true, ..status_self("Morning Sun", Normal, 5) },
        MoveData { healing: true, ..status_self("Synthesis", Grass, 5) },
        // Full heal plus a 2-turn sleep (registry)
        MoveData { healing: true, ..status_self("Rest", Psychic, 5) },
        // Cures the whole party's statuses (registry)
        MoveData { sound: true, ..status_self("Heal Bell", Normal, 5) },

        // === Stat moves (self) ===
        MoveData { self_boosts: &[(Stat::Atk, 2)], ..status_self("Swords Dance", Normal, 20) },
        MoveData { self_boosts: &[(Stat::Spa, 2)], ..status_self("Nasty Plot", Dark, 20) },
        MoveData { self_boosts: &[(Stat::Atk, 1), (Stat::Spe, 1)], ..status_self("Dragon Dance", Dragon, 20) },
        MoveData { self_boosts: &[(Stat::Spa, 1), (Stat::Spd, 1)], ..status_self("Calm Mind", Psychic, 20) },
        MoveData { self_boosts: &[(Stat::Atk, 1), (Stat::Def, 1)], ..status_self("Bulk Up", Fighting, 20) },
        MoveData { self_boosts: &[(Stat::Spa, 1), (Stat::Spd, 1), (Stat::Spe, 1)], ..status_self("Quiver Dance", Bug, 20) },
        MoveData { self_boosts: &[(Stat::Atk, 2), (Stat::Spa, 2), (Stat::Spe, 2), (Stat::Def, -1), (Stat::Spd, -1)], ..status_self("Shell Smash", Normal, 15) },
        MoveData { self_boosts: &[(Stat::Spe, 2)], ..status_self("Agility", Psychic, 30) },
        MoveData { self_boosts: &[(Stat::Def, 2)], ..status_self("Iron Defense", Steel, 15) },
        MoveData { self_boosts: &[(Stat::Spd, 2)], ..status_self("Amnesia", Psychic, 20) },
        MoveData { self_boosts: &[(Stat::Atk, 1), (Stat::Def, 1), (Stat::Accuracy, 1)], ..status_self("Coil", Poison, 20) },
        // Halves HP, maxes Attack (registry)
        status_self("Belly Drum", Normal, 10),

        // === Stat moves (target) ===
        MoveData { sound: true, target_boosts: &[(Stat::Atk, -1)], ..status("Growl", Normal, 100, 40) },
        MoveData { target_boosts: &[(Stat::Def, -1)], ..status("Leer", Normal, 100, 30) },
        MoveData { target_boosts: &[(Stat::Def, -1)], ..status("Tail Whip", Normal, 100, 30) },
        MoveData { target_boosts: &[(Stat::Atk, -2)], ..status("Charm", Fairy, 100, 20) },
        MoveData { sound: true, target_boosts: &[(Stat::Def, -2)], ..status("Screech", Normal, 85, 40) },
        MoveData { target_boosts: &[(Stat::Spe, -2)], ..status("Scary Face", Normal, 100, 10) },
        // Confuses and sharply raises the target's Attack (registry)
        status("Swagger", Normal, 85, 15),

        // === Primary status (direct) ===
        MoveData { inflicts_status: Some(Status::Burn), ..status("Will-O-Wisp", Fire, 85, 15) },
        MoveData { inflicts_status: Some(Status::Sleep), ..status("Hypnosis", Psychic, 60, 20) },
        MoveData { inflicts_status: Some(Status::Paralysis), ..status("Glare", Normal, 100, 30) },

        // === Volatile infliction and disruption (registry) ===
        status("Taunt", Dark, 100, 20),
        status("Encore", Normal, 100, 5),
        status("Disable", Normal, 100, 20),
        status("Torment", Dark, 100, 15),
        status("Attract", Normal, 100, 15),
        status("Yawn", Normal, 0, 10).never_miss(),
        status("Mean Look", Normal, 0, 5).never_miss(),
        status_self("Focus Energy", Normal, 30),
        status("Lock-On", Normal, 0, 5).never_miss(),
        status_self("Magnet Rise", Electric, 10),
        status_self("Ingrain", Grass, 20),
        status_self("Aqua Ring", Water, 20),
        status("Nightmare", Ghost, 100, 15),
        // Ghost-types pay HP to curse; others boost Atk/Def at Speed's cost
        status("Curse", Ghost, 0, 10).never_miss(),
        status_self("Destiny Bond", Ghost, 5),
        MoveData { sound: true, bypass_protect: true, ..status_self("Perish Song", Normal, 5) },
        // Both stage resets handled by the registry
        MoveData { bypass_protect: true, ..status_self("Haze", Ice, 30) },
        status_self("Substitute", Normal, 10),
        // Self-faint, heavy offense drop on the target (registry)
        MoveData { target_boosts: &[(Stat::Atk, -2), (Stat::Spa, -2)], ..status("Memento", Dark, 100, 10) },

        // === Partial traps ===
        special("Fire Spin", Fire, 35, 85, 15),
        phys("Wrap", Normal, 15, 90, 20),

        // === Forced switching ===
        MoveData { priority: -6, force_switch: true, sound: true, bypass_protect: true, ..status("Roar", Normal, 0, 20).never_miss() },
        MoveData { priority: -6, force_switch: true, bypass_protect: true, ..status("Whirlwind", Normal, 0, 20).never_miss() },
        MoveData { priority: -6, self_switch: true, ..status_self("Teleport", Psychic, 20) },
        MoveData { sound: true, self_switch: true, target_boosts: &[(Stat::Atk, -1), (Stat::Spa, -1)], ..status("Parting Shot", Dark, 100, 20) },
    ]
}

impl MoveData {
    const fn never_miss(mut self) -> MoveData {
        self.accuracy = None;
        self
    }

    const fn with_secondary(mut self, secondary: Option<SecondaryEffect>) -> MoveData {
        self.secondary = secondary;
        self
    }
}

static MOVES: LazyLock<HashMap<String, MoveData>> = LazyLock::new(|| {
    entries()
        .into_iter()
        .map(|m| (normalize_id(m.name), m))
        .collect()
});

/// Look up a move record; unknown identifiers get the inert fallback
pub fn move_data(id: &str) -> &'static MoveData {
    MOVES.get(&normalize_id(id)).unwrap_or(&UNKNOWN_MOVE)
}

/// Strict lookup returning an error for unknown identifiers
pub fn try_move_data(id: &str) -> Result<&'static MoveData, DexError> {
    MOVES
        .get(&normalize_id(id))
        .ok_or_else(|| DexError::UnknownMove(normalize_id(id)))
}
