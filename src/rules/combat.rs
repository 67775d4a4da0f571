//! Dice resolution for melee and ranged combat, forced moves and support.
//!
//! ## Melee
//!
//! ```text
//! attacker total = attack  + die + angle bonus
//! defender total = defense + die
//! ```
//!
//! A higher attacker total defeats the defender outright when the margin
//! reaches `defeat_margin`, otherwise the defender retreats. A higher
//! defender total reverses the attacker. Equal totals leave the pair engaged.
//!
//! ## Ranged
//!
//! The shot hits when `die + strength >= defense + ranged_hit_bonus`.

use super::engagement::EngagementAngle;
use crate::board::{forward_space, spaces_within_distance, Board, Coordinate, Facing};
use crate::core::{GameRng, PlayerSide, RulesConfig};
use crate::phases::{MeleeOutcome, MeleeResult};
use crate::units::UnitInstance;

/// Classify a melee from its totals.
#[must_use]
pub fn melee_result(config: &RulesConfig, attacker_total: u16, defender_total: u16) -> MeleeResult {
    if attacker_total > defender_total {
        if attacker_total - defender_total >= u16::from(config.defeat_margin) {
            MeleeResult::DefenderDefeated
        } else {
            MeleeResult::DefenderRetreats
        }
    } else if defender_total > attacker_total {
        MeleeResult::AttackerReverses
    } else {
        MeleeResult::Stalemate
    }
}

/// Roll one melee. The attacker rolls first.
pub fn roll_melee(
    rng: &mut GameRng,
    config: &RulesConfig,
    attack: u8,
    defense: u8,
    angle: EngagementAngle,
) -> MeleeOutcome {
    let attacker_total =
        u16::from(attack) + u16::from(rng.roll_die(config.die_sides)) + u16::from(angle.attack_bonus());
    let defender_total = u16::from(defense) + u16::from(rng.roll_die(config.die_sides));
    MeleeOutcome {
        attacker_total,
        defender_total,
        result: melee_result(config, attacker_total, defender_total),
    }
}

/// Whether a ranged roll hits.
#[must_use]
pub fn ranged_hit(config: &RulesConfig, roll: u8, strength: u8, defense: u8) -> bool {
    u16::from(roll) + u16::from(strength) >= u16::from(defense) + u16::from(config.ranged_hit_bonus)
}

/// Roll one ranged attack, returning the die and whether it hit.
pub fn roll_ranged(rng: &mut GameRng, config: &RulesConfig, strength: u8, defense: u8) -> (u8, bool) {
    let roll = rng.roll_die(config.die_sides);
    (roll, ranged_hit(config, roll, strength, defense))
}

/// The space a retreating or reversing unit would land on, if it is free.
///
/// The space one step in `direction` must be on the board, passable and
/// empty.
#[must_use]
pub fn forced_move_destination(board: &Board, from: Coordinate, direction: Facing) -> Option<Coordinate> {
    forward_space(board, from, direction).filter(|c| {
        board
            .space(*c)
            .is_some_and(|space| space.terrain.is_passable() && space.presence.is_empty())
    })
}

/// Units of `side` beyond `support_distance` of their commander.
///
/// Every unit is out of support when the commander is lost.
#[must_use]
pub fn units_out_of_support(board: &Board, side: PlayerSide, support_distance: u8) -> Vec<UnitInstance> {
    let units = board.units_of(side);
    let Some(commander) = board.commander_position(side) else {
        return units.into_iter().map(|u| u.unit).collect();
    };
    let supported = spaces_within_distance(board, commander, support_distance);
    units
        .into_iter()
        .filter(|u| u.placement.coordinate != commander && !supported.contains(&u.placement.coordinate))
        .map(|u| u.unit)
        .collect()
}
