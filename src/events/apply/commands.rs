use crate::board::{Coordinate, UnitPresence};
use crate::cards::{ActivationKind, CardId};
use crate::core::{GameState, InvariantViolation, PlayerSide};
use crate::phases::{
    advance_step, require_step, CommandResolutionState, ForcedMoveKind, ForcedMoveState, IssueCommandsPhaseState,
    IssueCommandsStep, MovementResolutionState, PhaseState, RangedAttackResolutionState,
};
use crate::rules::combat::roll_ranged;
use crate::rules::commands::{consume_command, find_command};
use crate::rules::{classify_engagement, Ruleset};
use crate::units::{UnitInstance, UnitPlacement, UnitWithPlacement};

use super::forced;

fn step_of(state: &GameState, player: PlayerSide) -> IssueCommandsStep {
    if player == state.first_player() {
        IssueCommandsStep::FirstPlayerIssueCommands
    } else {
        IssueCommandsStep::SecondPlayerIssueCommands
    }
}

/// The phase, checked to be waiting on `player` with nothing in progress.
fn issuing<'a>(state: &'a GameState, player: PlayerSide) -> Result<&'a IssueCommandsPhaseState, InvariantViolation> {
    let phase = state.phase_state().commands()?;
    require_step(phase.step, step_of(state, player))?;
    if let Some(resolution) = &phase.current_command_resolution_state {
        return Err(InvariantViolation::ResolutionInProgress(resolution.name()));
    }
    Ok(phase)
}

/// Use one activation on `unit` and open its resolution record.
fn command_unit(
    ruleset: &Ruleset,
    state: &GameState,
    phase: &IssueCommandsPhaseState,
    unit: UnitInstance,
    kind: ActivationKind,
    resolution: CommandResolutionState,
) -> Result<GameState, InvariantViolation> {
    let remaining = phase.remaining_commands();
    let index = find_command(ruleset, remaining, &unit, kind)
        .ok_or_else(|| InvariantViolation::Inconsistent(format!("no remaining command admits {unit}")))?;
    let phase = phase
        .with_remaining_commands(consume_command(remaining, index))
        .with_resolution(Some(resolution));
    let round = state
        .round_state
        .with_commanded(unit)
        .with_phase_state(PhaseState::Commands(phase));
    Ok(state.with_round_state(round))
}

/// Store `resolution`, clearing it once no work is left.
fn settle(state: &GameState, phase: &IssueCommandsPhaseState, resolution: CommandResolutionState) -> GameState {
    let resolution = (!resolution.is_resolved()).then_some(resolution);
    state.with_phase_state(PhaseState::Commands(phase.with_resolution(resolution)))
}

/// Order a unit to move.
pub(super) fn move_unit(
    ruleset: &Ruleset,
    state: &GameState,
    player: PlayerSide,
    unit: UnitInstance,
    from: UnitPlacement,
    to: UnitPlacement,
) -> Result<GameState, InvariantViolation> {
    let phase = issuing(state, player)?;
    let resolution = CommandResolutionState::Movement(MovementResolutionState {
        player,
        unit,
        from,
        to,
        final_placement: None,
        engagement: None,
        completed: false,
    });
    tracing::debug!(%player, %unit, %from, %to, "move ordered");
    command_unit(ruleset, state, phase, unit, ActivationKind::Move, resolution)
}

/// Order a unit to shoot at the enemy on `target`.
pub(super) fn perform_ranged_attack(
    ruleset: &Ruleset,
    state: &GameState,
    player: PlayerSide,
    unit: UnitInstance,
    target: Coordinate,
) -> Result<GameState, InvariantViolation> {
    let phase = issuing(state, player)?;
    let placement = state
        .board
        .placement_of(&unit)
        .ok_or(InvariantViolation::UnitNotOnBoard(unit))?;
    let UnitPresence::Single { unit: target_unit, .. } = state.board.presence(target) else {
        return Err(InvariantViolation::Inconsistent(format!("no single unit to shoot at {target}")));
    };
    let resolution = CommandResolutionState::RangedAttack(RangedAttackResolutionState {
        player,
        attacker: UnitWithPlacement::new(unit, placement),
        target: target_unit,
        target_coordinate: target,
        roll: None,
        hit: None,
        retreat: None,
        completed: false,
    });
    tracing::debug!(%player, %unit, %target, "ranged attack ordered");
    command_unit(ruleset, state, phase, unit, ActivationKind::RangedAttack, resolution)
}

/// Hand the phase to the next player.
pub(super) fn end_commands(state: &GameState, player: PlayerSide) -> Result<GameState, InvariantViolation> {
    let phase = issuing(state, player)?;
    let step = advance_step(phase.step, step_of(state, player))?;
    tracing::debug!(%player, "commands ended");
    Ok(state.with_phase_state(PhaseState::Commands(phase.with_step(step))))
}

/// Carry out the pending move, engaging if it ends on an enemy.
pub(super) fn complete_unit_movement(state: &GameState) -> Result<GameState, InvariantViolation> {
    let phase = state.phase_state().commands()?;
    let Some(CommandResolutionState::Movement(movement)) = &phase.current_command_resolution_state else {
        return Err(InvariantViolation::MissingResolutionState("movement"));
    };
    if movement.completed {
        return Err(InvariantViolation::ResolutionCompleted("movement"));
    }

    let unit = movement.unit;
    let to = movement.to;
    let board = state
        .board
        .without_unit(&unit)
        .ok_or(InvariantViolation::UnitNotOnBoard(unit))?;
    let (board, engagement) = match board.presence(to.coordinate) {
        UnitPresence::None => (board.with_unit(unit, to.coordinate, to.facing), None),
        UnitPresence::Single { unit: enemy, facing } if !enemy.is_friendly_to(&unit) => {
            let angle = classify_engagement(to.facing, facing);
            let engaged = UnitPresence::engaged(unit, to.facing, enemy, angle)?;
            tracing::debug!(%unit, %enemy, ?angle, at = %to.coordinate, "units engaged");
            (board.with_presence(to.coordinate, engaged), Some(angle))
        }
        _ => {
            return Err(InvariantViolation::Inconsistent(format!(
                "{unit} cannot end its move on {}",
                to.coordinate
            )))
        }
    };

    let moved = CommandResolutionState::Movement(MovementResolutionState {
        final_placement: Some(to),
        engagement,
        completed: true,
        ..movement.clone()
    });
    Ok(settle(&state.with_board(board), phase, moved))
}

/// Roll the pending ranged attack; a hit forces the target to retreat.
pub(super) fn complete_ranged_attack(ruleset: &Ruleset, state: &GameState) -> Result<GameState, InvariantViolation> {
    let phase = state.phase_state().commands()?;
    let ranged = ranged_in(phase)?;
    if ranged.hit.is_some() {
        return Err(InvariantViolation::ResolutionCompleted("ranged attack"));
    }

    let attacker = ranged.attacker.unit;
    let strength = ruleset
        .known_unit_type(&attacker)?
        .ranged
        .map(|profile| profile.strength)
        .ok_or_else(|| InvariantViolation::Inconsistent(format!("{attacker} has no ranged attack")))?;
    let defense = ruleset.known_unit_type(&ranged.target)?.defense;

    let mut dice = state.dice();
    let (roll, hit) = roll_ranged(&mut dice, &ruleset.config, strength, defense);
    tracing::debug!(%attacker, target = %ranged.target, roll, hit, "ranged attack rolled");

    let retreat = if hit {
        let from = state
            .board
            .placement_of(&ranged.target)
            .ok_or(InvariantViolation::UnitNotOnBoard(ranged.target))?;
        Some(ForcedMoveState::retreat(ranged.target, from, ranged.attacker.placement.facing))
    } else {
        None
    };
    let rolled = CommandResolutionState::RangedAttack(RangedAttackResolutionState {
        roll: Some(roll),
        hit: Some(hit),
        retreat,
        completed: true,
        ..ranged.clone()
    });
    Ok(settle(&state.with_rng(&dice), phase, rolled))
}

fn ranged_in(phase: &IssueCommandsPhaseState) -> Result<&RangedAttackResolutionState, InvariantViolation> {
    match &phase.current_command_resolution_state {
        Some(CommandResolutionState::RangedAttack(ranged)) => Ok(ranged),
        _ => Err(InvariantViolation::MissingResolutionState("ranged attack")),
    }
}

fn retreat_in(ranged: &RangedAttackResolutionState) -> Result<&ForcedMoveState, InvariantViolation> {
    ranged
        .retreat
        .as_ref()
        .ok_or(InvariantViolation::MissingResolutionState("retreat"))
}

fn with_retreat(
    next: &GameState,
    phase: &IssueCommandsPhaseState,
    ranged: &RangedAttackResolutionState,
    retreat: ForcedMoveState,
) -> GameState {
    let resolution = CommandResolutionState::RangedAttack(RangedAttackResolutionState {
        retreat: Some(retreat),
        ..ranged.clone()
    });
    settle(next, phase, resolution)
}

/// Carry out the retreat forced by a ranged hit.
pub(super) fn complete_forced_move(state: &GameState, kind: ForcedMoveKind) -> Result<GameState, InvariantViolation> {
    let phase = state.phase_state().commands()?;
    let ranged = ranged_in(phase)?;
    let (next, retreat) = forced::complete(state, retreat_in(ranged)?, kind)?;
    Ok(with_retreat(&next, phase, ranged, retreat))
}

/// Rout a target whose retreat was blocked.
pub(super) fn rout_units(state: &GameState) -> Result<GameState, InvariantViolation> {
    let phase = state.phase_state().commands()?;
    let ranged = ranged_in(phase)?;
    let (next, retreat) = forced::rout_forced(state, retreat_in(ranged)?)?;
    Ok(with_retreat(&next, phase, ranged, retreat))
}

/// Discard cards for a target routed by a ranged hit.
pub(super) fn choose_rout_discard(
    state: &GameState,
    player: PlayerSide,
    cards: &[CardId],
) -> Result<GameState, InvariantViolation> {
    let phase = state.phase_state().commands()?;
    let ranged = ranged_in(phase)?;
    let retreat = retreat_in(ranged)?;
    let (next, discard) = forced::discard(state, retreat.rout_discard.as_ref(), player, cards)?;
    let retreat = ForcedMoveState {
        rout_discard: Some(discard),
        ..retreat.clone()
    };
    Ok(with_retreat(&next, phase, ranged, retreat))
}
