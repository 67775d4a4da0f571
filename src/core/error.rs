//! Error types.
//!
//! Two distinct classes:
//!
//! - [`RuleViolation`]: an expected, player-facing rejection. Legality checks
//!   return [`Validation`] and callers branch on it; nothing is thrown.
//! - [`InvariantViolation`]: a reducer or the expected-event oracle was run
//!   against a state it cannot reconcile with its preconditions. This means
//!   the validation gate and the state machine have desynchronized and the
//!   game session must be treated as corrupted.

use thiserror::Error;

use crate::board::{Coordinate, Facing};
use crate::cards::CardId;
use crate::core::PlayerSide;
use crate::units::{UnitInstance, UnitTypeId};

/// Outcome of a legality check.
pub type Validation = Result<(), RuleViolation>;

/// Why a player choice (or an advisory classification) was rejected.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum RuleViolation {
    // === Spaces ===
    #[error("{0} is not on the board")]
    OffBoard(Coordinate),

    #[error("{0} is impassable terrain")]
    Impassable(Coordinate),

    #[error("{0} already holds an engaged pair")]
    SpaceEngaged(Coordinate),

    #[error("{0} is occupied by a friendly unit")]
    FriendlyOccupied(Coordinate),

    #[error("{0} is occupied by an enemy unit")]
    EnemyOccupied(Coordinate),

    #[error("{0} is not empty")]
    SpaceNotEmpty(Coordinate),

    #[error("combined flexibility {combined} is below the pass-through threshold {required}")]
    InsufficientFlexibility { combined: u8, required: u8 },

    // === Engagement angle ===
    #[error("attacker facing {attacker} is not opposite defender facing {defender}")]
    NotFrontEngagement { attacker: Facing, defender: Facing },

    #[error("attacker facing {attacker} is not orthogonal to defender facing {defender}")]
    NotFlankEngagement { attacker: Facing, defender: Facing },

    #[error("attacker facing {attacker} is not within 45 degrees of defender facing {defender}")]
    NotRearEngagement { attacker: Facing, defender: Facing },

    // === Commanders ===
    #[error("{side} commander is not at {coordinate}")]
    CommanderNotPresent { side: PlayerSide, coordinate: Coordinate },

    #[error("{to} is more than {max} spaces from {from}")]
    CommanderOutOfRange { from: Coordinate, to: Coordinate, max: u8 },

    #[error("{0} commander has been lost")]
    CommanderLost(PlayerSide),

    // === Cards ===
    #[error("{card} is not in {side}'s hand")]
    CardNotInHand { side: PlayerSide, card: CardId },

    #[error("{0} has already chosen a card this round")]
    CardAlreadyChosen(PlayerSide),

    #[error("{0} cannot decline a rally with an empty hand")]
    MustRally(PlayerSide),

    #[error("{0} has no discarded cards to rally")]
    NothingToRally(PlayerSide),

    #[error("expected {expected} cards to discard, got {actual}")]
    WrongDiscardCount { expected: usize, actual: usize },

    #[error("{0} was listed more than once")]
    DuplicateCard(CardId),

    #[error("{0} owes no cards for routed units")]
    NoRoutDiscard(PlayerSide),

    // === Units ===
    #[error("unknown unit type {0}")]
    UnknownUnitType(UnitTypeId),

    #[error("{unit} does not belong to {side}")]
    NotOwnUnit { side: PlayerSide, unit: UnitInstance },

    #[error("{unit} is not at {coordinate}")]
    UnitNotAt { unit: UnitInstance, coordinate: Coordinate },

    #[error("{0} is not on the board")]
    UnitNotDeployed(UnitInstance),

    #[error("{0} is engaged and cannot act")]
    UnitEngaged(UnitInstance),

    #[error("{0} has already been commanded this round")]
    AlreadyCommanded(UnitInstance),

    #[error("no remaining command can be issued to {0}")]
    NoCommandForUnit(UnitInstance),

    #[error("{unit} cannot reach {coordinate} facing {facing}")]
    UnreachablePlacement {
        unit: UnitInstance,
        coordinate: Coordinate,
        facing: Facing,
    },

    // === Setup ===
    #[error("{0} is not in reserve")]
    NotInReserve(UnitInstance),

    #[error("{coordinate} is outside {side}'s deployment zone")]
    OutsideDeploymentZone { side: PlayerSide, coordinate: Coordinate },

    #[error("{0} was placed more than once")]
    DuplicatePlacement(UnitInstance),

    #[error("{0} is placed on a space already used by another unit")]
    SharedSetupSpace(Coordinate),

    #[error("{0} has no units to deploy")]
    EmptyDeployment(PlayerSide),

    // === Ranged ===
    #[error("{0} has no ranged attack")]
    NoRangedAttack(UnitInstance),

    #[error("{target} is outside the firing arc of {unit}")]
    TargetOutOfArc { unit: UnitInstance, target: Coordinate },

    #[error("no enemy unit to target at {0}")]
    NoTarget(Coordinate),
}

/// Board data that cannot describe a playable board.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum BoardError {
    #[error("board must have at least one space, got {rows} x {columns}")]
    Empty { rows: u8, columns: u8 },

    #[error("board has {rows} rows but at most {max} are supported")]
    TooManyRows { rows: u8, max: u8 },

    #[error("elevation {elevation:?} exceeds the maximum of {max}")]
    ElevationOutOfRange { elevation: [u8; 4], max: u8 },
}

/// A state-machine precondition failed inside a reducer or the oracle.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum InvariantViolation {
    #[error("expected phase {expected} but state is in phase {found}")]
    PhaseMismatch {
        expected: &'static str,
        found: &'static str,
    },

    #[error("expected step {expected} but phase is at step {found}")]
    StepMismatch { expected: String, found: String },

    #[error("no current {0} resolution state found")]
    MissingResolutionState(&'static str),

    #[error("a {0} resolution is already in progress")]
    ResolutionInProgress(&'static str),

    #[error("{0} resolution is already completed with no further work")]
    ResolutionCompleted(&'static str),

    #[error("rally resolution complete but step not advanced")]
    RallyStepNotAdvanced,

    #[error("units lost support but no rout state was recorded")]
    MissingRoutState,

    #[error("phase is not complete: {0}")]
    PhaseIncomplete(&'static str),

    #[error("{0} is not on the board")]
    UnitNotOnBoard(UnitInstance),

    #[error("unknown unit type {0}")]
    UnknownUnitType(UnitTypeId),

    #[error("unknown card {0}")]
    UnknownCard(CardId),

    #[error("{0} has no card in play")]
    NoCardInPlay(PlayerSide),

    #[error("event belongs to {found}, expected {expected}")]
    WrongPlayer {
        expected: PlayerSide,
        found: PlayerSide,
    },

    #[error("engaged units must belong to opposite sides ({0} and {1})")]
    SameSideEngagement(UnitInstance, UnitInstance),

    #[error("{0} is not engaged")]
    NotEngaged(Coordinate),

    #[error("{0}")]
    Inconsistent(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_violation_reason() {
        let coordinate: Coordinate = "E-5".parse().unwrap();
        let violation = RuleViolation::FriendlyOccupied(coordinate);

        assert_eq!(violation.to_string(), "E-5 is occupied by a friendly unit");
    }

    #[test]
    fn test_invariant_message() {
        let violation = InvariantViolation::MissingResolutionState("command");
        assert_eq!(
            violation.to_string(),
            "no current command resolution state found"
        );
    }

    #[test]
    fn test_board_error_reason() {
        let error = BoardError::TooManyRows { rows: 30, max: 26 };
        assert_eq!(error.to_string(), "board has 30 rows but at most 26 are supported");
    }

    #[test]
    fn test_flexibility_reason() {
        let violation = RuleViolation::InsufficientFlexibility {
            combined: 3,
            required: 4,
        };
        assert!(violation.to_string().contains("below the pass-through threshold 4"));
    }
}
