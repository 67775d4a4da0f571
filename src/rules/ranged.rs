//! Ranged attack legality.
//!
//! A unit with a ranged profile may shoot an unengaged enemy unit standing
//! inside its forward arc of `range` steps. The shooter must not be engaged.

use std::collections::BTreeSet;

use super::ruleset::Ruleset;
use crate::board::{spaces_in_arc, Board, Coordinate, UnitPresence};
use crate::core::{RuleViolation, Validation};
use crate::units::{UnitInstance, UnitPlacement};

/// Coordinates of every enemy unit `unit` could shoot from `placement`.
#[must_use]
pub fn ranged_targets(
    ruleset: &Ruleset,
    board: &Board,
    unit: &UnitInstance,
    placement: UnitPlacement,
) -> BTreeSet<Coordinate> {
    let Some(profile) = ruleset.unit_type(unit).ok().and_then(|t| t.ranged) else {
        return BTreeSet::new();
    };
    if board.presence(placement.coordinate).is_engaged() {
        return BTreeSet::new();
    }
    spaces_in_arc(board, placement.coordinate, placement.facing, profile.range)
        .into_iter()
        .filter(|c| matches!(board.presence(*c), UnitPresence::Single { unit: target, .. } if !target.is_friendly_to(unit)))
        .collect()
}

/// Can `unit` at `placement` shoot at `target`.
pub fn is_legal_ranged_attack(
    ruleset: &Ruleset,
    board: &Board,
    unit: &UnitInstance,
    placement: UnitPlacement,
    target: Coordinate,
) -> Validation {
    let profile = ruleset
        .unit_type(unit)?
        .ranged
        .ok_or(RuleViolation::NoRangedAttack(*unit))?;
    if board.presence(placement.coordinate).is_engaged() {
        return Err(RuleViolation::UnitEngaged(*unit));
    }
    if board.space(target).is_none() {
        return Err(RuleViolation::OffBoard(target));
    }
    if !spaces_in_arc(board, placement.coordinate, placement.facing, profile.range).contains(&target) {
        return Err(RuleViolation::TargetOutOfArc { unit: *unit, target });
    }
    match board.presence(target) {
        UnitPresence::Single { unit: occupant, .. } if !occupant.is_friendly_to(unit) => Ok(()),
        UnitPresence::Engaged { .. } => Err(RuleViolation::SpaceEngaged(target)),
        _ => Err(RuleViolation::NoTarget(target)),
    }
}
