//! Retreats, reverses and routs shared by the commands, melee and cleanup
//! reducers.

use im::Vector;

use super::super::event::GameEffect;
use crate::cards::CardId;
use crate::core::{GameState, InvariantViolation};
use crate::phases::{ForcedMoveKind, ForcedMoveState, RoutDiscardState};
use crate::rules::combat::forced_move_destination;
use crate::units::{UnitInstance, UnitPlacement};

pub(super) fn kind_of(effect: &GameEffect) -> ForcedMoveKind {
    match effect {
        GameEffect::CompleteReverse => ForcedMoveKind::Reverse,
        _ => ForcedMoveKind::Retreat,
    }
}

fn kind_name(kind: ForcedMoveKind) -> &'static str {
    match kind {
        ForcedMoveKind::Retreat => "retreat",
        ForcedMoveKind::Reverse => "reverse",
    }
}

/// Carry out a pending forced move, or mark it failed if blocked.
pub(super) fn complete(
    state: &GameState,
    forced: &ForcedMoveState,
    kind: ForcedMoveKind,
) -> Result<(GameState, ForcedMoveState), InvariantViolation> {
    if forced.kind != kind {
        return Err(InvariantViolation::StepMismatch {
            expected: kind_name(forced.kind).to_string(),
            found: kind_name(kind).to_string(),
        });
    }
    if forced.completed || forced.failed {
        return Err(InvariantViolation::ResolutionCompleted(kind_name(kind)));
    }

    let origin = forced.from.coordinate;
    let Some(destination) = forced_move_destination(&state.board, origin, forced.direction) else {
        tracing::debug!(unit = %forced.unit, from = %origin, "{} blocked", kind_name(kind));
        let failed = ForcedMoveState {
            failed: true,
            ..forced.clone()
        };
        return Ok((state.clone(), failed));
    };

    let board = state
        .board
        .without_unit(&forced.unit)
        .ok_or(InvariantViolation::UnitNotOnBoard(forced.unit))?;
    let placement = UnitPlacement::new(destination, forced.from.facing);
    let board = board.with_unit(forced.unit, placement.coordinate, placement.facing);

    let moved = ForcedMoveState {
        final_placement: Some(placement),
        completed: true,
        ..forced.clone()
    };
    Ok((state.with_board(board), moved))
}

/// Take units off the board as routed and open the discard they owe.
pub(super) fn rout(
    state: &GameState,
    units: &Vector<UnitInstance>,
) -> Result<(GameState, RoutDiscardState), InvariantViolation> {
    let player = units
        .front()
        .map(|u| u.side)
        .ok_or_else(|| InvariantViolation::Inconsistent("rout with no units".to_string()))?;

    let mut board = state.board.clone();
    for unit in units {
        board = board
            .without_unit(unit)
            .ok_or(InvariantViolation::UnitNotOnBoard(*unit))?;
    }
    tracing::debug!(%player, count = units.len(), "units routed");

    let next = state.with_board(board).with_routed(units.iter().copied());
    let discard = RoutDiscardState::new(player, units.clone(), next.cards.hands[player].len());
    Ok((next, discard))
}

/// Rout the unit of a failed forced move.
pub(super) fn rout_forced(
    state: &GameState,
    forced: &ForcedMoveState,
) -> Result<(GameState, ForcedMoveState), InvariantViolation> {
    if !forced.failed || forced.completed {
        return Err(InvariantViolation::Inconsistent(format!(
            "{} of {} has not failed",
            kind_name(forced.kind),
            forced.unit
        )));
    }
    let (next, discard) = rout(state, &Vector::unit(forced.unit))?;
    let routed = ForcedMoveState {
        rout_discard: Some(discard),
        completed: true,
        ..forced.clone()
    };
    Ok((next, routed))
}

/// Discard cards owed for a rout.
pub(super) fn discard(
    state: &GameState,
    rout: Option<&RoutDiscardState>,
    player: crate::core::PlayerSide,
    cards: &[CardId],
) -> Result<(GameState, RoutDiscardState), InvariantViolation> {
    let rout = rout.ok_or(InvariantViolation::MissingResolutionState("rout discard"))?;
    if rout.completed {
        return Err(InvariantViolation::ResolutionCompleted("rout discard"));
    }
    super::require_player(rout.player, player)?;
    let next = state.with_cards(state.cards.discard_from_hand(player, cards));
    Ok((next, rout.with_discarded(cards.to_vec())))
}
