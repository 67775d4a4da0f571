//! Unit movement legality.
//!
//! ## Occupancy
//!
//! [`can_move_into`] decides whether a unit may end its move on a space:
//!
//! | space | result |
//! |---|---|
//! | empty | legal |
//! | engaged pair | illegal |
//! | single friendly unit | illegal |
//! | single enemy unit | legal, starts an engagement |
//!
//! [`can_move_through`] decides whether a unit may cross a space without
//! stopping: empty spaces always, a friendly unit only when the two units'
//! combined flexibility reaches the configured threshold, never an enemy or
//! an engaged pair. Impassable terrain blocks both.
//!
//! ## Search
//!
//! [`legal_unit_moves`] is a breadth-first search over `(coordinate, facing)`
//! nodes. Each edge costs one movement point:
//!
//! - advance into any front space, keeping the current facing
//! - turn 45° in place
//!
//! Entering an enemy unit ends that branch of the search.

use std::collections::{BTreeSet, VecDeque};

use rustc_hash::FxHashSet;

use super::ruleset::Ruleset;
use crate::board::{front_spaces, Board, Coordinate, UnitPresence};
use crate::core::{RuleViolation, Validation};
use crate::units::{UnitInstance, UnitPlacement};

fn passable(board: &Board, coordinate: Coordinate) -> Validation {
    let space = board.space(coordinate).ok_or(RuleViolation::OffBoard(coordinate))?;
    if space.terrain.is_passable() {
        Ok(())
    } else {
        Err(RuleViolation::Impassable(coordinate))
    }
}

/// Can `unit` end its move on `coordinate`.
pub fn can_move_into(unit: &UnitInstance, board: &Board, coordinate: Coordinate) -> Validation {
    passable(board, coordinate)?;
    match board.presence(coordinate) {
        UnitPresence::None => Ok(()),
        UnitPresence::Engaged { .. } => Err(RuleViolation::SpaceEngaged(coordinate)),
        UnitPresence::Single { unit: occupant, .. } if occupant.is_friendly_to(unit) => {
            Err(RuleViolation::FriendlyOccupied(coordinate))
        }
        UnitPresence::Single { .. } => Ok(()),
    }
}

/// Can `unit` pass over `coordinate` without stopping.
pub fn can_move_through(
    ruleset: &Ruleset,
    unit: &UnitInstance,
    board: &Board,
    coordinate: Coordinate,
) -> Validation {
    passable(board, coordinate)?;
    match board.presence(coordinate) {
        UnitPresence::None => Ok(()),
        UnitPresence::Engaged { .. } => Err(RuleViolation::SpaceEngaged(coordinate)),
        UnitPresence::Single { unit: occupant, .. } if occupant.is_friendly_to(unit) => {
            let combined = ruleset
                .unit_type(unit)?
                .flexibility
                .saturating_add(ruleset.unit_type(&occupant)?.flexibility);
            let required = ruleset.config.flexibility_threshold;
            if combined >= required {
                Ok(())
            } else {
                Err(RuleViolation::InsufficientFlexibility { combined, required })
            }
        }
        UnitPresence::Single { .. } => Err(RuleViolation::EnemyOccupied(coordinate)),
    }
}

/// Every placement `unit` can reach from `start` this activation.
///
/// `speed_bonus` comes from the command ordering the move. A unit standing
/// in an engaged space cannot move. The start placement is never included.
pub fn legal_unit_moves(
    ruleset: &Ruleset,
    board: &Board,
    unit: &UnitInstance,
    start: UnitPlacement,
    speed_bonus: u8,
) -> BTreeSet<UnitPlacement> {
    let mut result = BTreeSet::new();
    if board.presence(start.coordinate).is_engaged() {
        return result;
    }
    let Ok(unit_type) = ruleset.unit_type(unit) else {
        return result;
    };
    let speed = unit_type.speed.saturating_add(speed_bonus);

    let mut visited: FxHashSet<UnitPlacement> = FxHashSet::default();
    visited.insert(start);
    let mut queue: VecDeque<(UnitPlacement, u8)> = VecDeque::from([(start, 0)]);

    while let Some((node, spent)) = queue.pop_front() {
        if spent >= speed {
            continue;
        }

        for facing in node.facing.adjacent_facings() {
            let turned = UnitPlacement::new(node.coordinate, facing);
            if visited.insert(turned) {
                if endable(ruleset, board, unit, start, turned.coordinate) {
                    result.insert(turned);
                }
                queue.push_back((turned, spent + 1));
            }
        }

        for target in front_spaces(board, node.coordinate, node.facing) {
            let next = UnitPlacement::new(target, node.facing);
            if visited.contains(&next) {
                continue;
            }
            match step_into(ruleset, board, unit, start, target) {
                Step::Blocked => {}
                Step::Engage => {
                    visited.insert(next);
                    result.insert(next);
                }
                Step::Transit => {
                    visited.insert(next);
                    queue.push_back((next, spent + 1));
                }
                Step::Stop => {
                    visited.insert(next);
                    result.insert(next);
                    queue.push_back((next, spent + 1));
                }
            }
        }
    }

    result.remove(&start);
    result
}

/// Is `to` among the placements [`legal_unit_moves`] returns.
pub fn is_legal_unit_move(
    ruleset: &Ruleset,
    board: &Board,
    unit: &UnitInstance,
    from: UnitPlacement,
    to: UnitPlacement,
    speed_bonus: u8,
) -> Validation {
    if board.presence(from.coordinate).is_engaged() {
        return Err(RuleViolation::UnitEngaged(*unit));
    }
    if legal_unit_moves(ruleset, board, unit, from, speed_bonus).contains(&to) {
        Ok(())
    } else {
        Err(RuleViolation::UnreachablePlacement {
            unit: *unit,
            coordinate: to.coordinate,
            facing: to.facing,
        })
    }
}

enum Step {
    Blocked,
    /// Crossing a friendly unit.
    Transit,
    /// Empty space: may stop or continue.
    Stop,
    /// Enemy unit: must stop and engage.
    Engage,
}

fn step_into(
    ruleset: &Ruleset,
    board: &Board,
    unit: &UnitInstance,
    start: UnitPlacement,
    target: Coordinate,
) -> Step {
    if target == start.coordinate {
        return Step::Stop;
    }
    match board.presence(target) {
        UnitPresence::Single { unit: occupant, .. } if !occupant.is_friendly_to(unit) => {
            if can_move_into(unit, board, target).is_ok() {
                Step::Engage
            } else {
                Step::Blocked
            }
        }
        _ if can_move_into(unit, board, target).is_ok() => Step::Stop,
        _ if can_move_through(ruleset, unit, board, target).is_ok() => Step::Transit,
        _ => Step::Blocked,
    }
}

fn endable(
    ruleset: &Ruleset,
    board: &Board,
    unit: &UnitInstance,
    start: UnitPlacement,
    coordinate: Coordinate,
) -> bool {
    // Turning on a friendly unit's space mid-transit is allowed, stopping there is not.
    matches!(step_into(ruleset, board, unit, start, coordinate), Step::Stop)
}
