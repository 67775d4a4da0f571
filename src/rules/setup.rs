//! Deployment legality.

use rustc_hash::FxHashSet;

use super::ruleset::Ruleset;
use crate::board::Coordinate;
use crate::core::{GameState, PlayerSide, RuleViolation, Validation};
use crate::units::UnitWithPlacement;

fn in_deployment_zone(ruleset: &Ruleset, side: PlayerSide, coordinate: Coordinate) -> Validation {
    if ruleset.deployment_rows(side).contains(&coordinate.row()) {
        Ok(())
    } else {
        Err(RuleViolation::OutsideDeploymentZone { side, coordinate })
    }
}

/// Can `side` deploy these units and its commander.
///
/// Every unit must come from the side's reserve and stand on an empty,
/// passable space in the side's deployment rows, one unit per space. The
/// commander must also start in those rows.
pub fn is_legal_setup(
    ruleset: &Ruleset,
    state: &GameState,
    side: PlayerSide,
    placements: &[UnitWithPlacement],
    commander: Coordinate,
) -> Validation {
    if placements.is_empty() {
        return Err(RuleViolation::EmptyDeployment(side));
    }

    let mut units = FxHashSet::default();
    let mut spaces = FxHashSet::default();
    for UnitWithPlacement { unit, placement } in placements {
        if unit.side != side {
            return Err(RuleViolation::NotOwnUnit { side, unit: *unit });
        }
        ruleset.unit_type(unit)?;
        if !state.reserved_units.contains(unit) {
            return Err(RuleViolation::NotInReserve(*unit));
        }
        if !units.insert(*unit) {
            return Err(RuleViolation::DuplicatePlacement(*unit));
        }

        let coordinate = placement.coordinate;
        let space = state
            .board
            .space(coordinate)
            .ok_or(RuleViolation::OffBoard(coordinate))?;
        in_deployment_zone(ruleset, side, coordinate)?;
        if !space.terrain.is_passable() {
            return Err(RuleViolation::Impassable(coordinate));
        }
        if !space.presence.is_empty() {
            return Err(RuleViolation::SpaceNotEmpty(coordinate));
        }
        if !spaces.insert(coordinate) {
            return Err(RuleViolation::SharedSetupSpace(coordinate));
        }
    }

    if state.board.space(commander).is_none() {
        return Err(RuleViolation::OffBoard(commander));
    }
    in_deployment_zone(ruleset, side, commander)
}
