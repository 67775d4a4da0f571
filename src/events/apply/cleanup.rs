use im::Vector;

use crate::cards::CardId;
use crate::core::{GameState, InvariantViolation, PlayerSide};
use crate::phases::{
    advance_step, require_step, CleanupPhaseState, CleanupStep, PhaseState, RallyResolutionState,
};
use crate::rules::combat::units_out_of_support;
use crate::rules::Ruleset;
use crate::units::UnitInstance;

use super::forced;

fn choose_step_of(state: &GameState, player: PlayerSide) -> CleanupStep {
    if player == state.first_player() {
        CleanupStep::FirstPlayerChooseRally
    } else {
        CleanupStep::SecondPlayerChooseRally
    }
}

fn resolve_step_of(state: &GameState, player: PlayerSide) -> CleanupStep {
    if player == state.first_player() {
        CleanupStep::FirstPlayerResolveRally
    } else {
        CleanupStep::SecondPlayerResolveRally
    }
}

/// Store `rally`; once nothing is left, clear it and advance past the
/// resolve step in the same transition.
fn settle(
    state: &GameState,
    phase: &CleanupPhaseState,
    rally: RallyResolutionState,
) -> Result<GameState, InvariantViolation> {
    let phase = if rally.is_resolved() {
        let step = advance_step(phase.step, resolve_step_of(state, rally.player))?;
        tracing::debug!(player = %rally.player, rallied = rally.perform_rally, "rally resolved");
        phase.with_step(step).with_rally(None)
    } else {
        phase.with_rally(Some(rally))
    };
    Ok(state.with_phase_state(PhaseState::Cleanup(phase)))
}

fn rally_in(phase: &CleanupPhaseState) -> Result<&RallyResolutionState, InvariantViolation> {
    phase
        .current_rally_resolution_state
        .as_ref()
        .ok_or(InvariantViolation::MissingResolutionState("rally"))
}

/// Move both in-play cards to the discard piles.
pub(super) fn discard_played_cards(state: &GameState) -> Result<GameState, InvariantViolation> {
    let phase = state.phase_state().cleanup()?;
    let step = advance_step(phase.step, CleanupStep::DiscardPlayedCards)?;
    Ok(state
        .with_cards(state.cards.discard_played())
        .with_phase_state(PhaseState::Cleanup(phase.with_step(step))))
}

/// Record a player's rally decision.
pub(super) fn choose_rally(
    state: &GameState,
    player: PlayerSide,
    perform_rally: bool,
) -> Result<GameState, InvariantViolation> {
    let phase = state.phase_state().cleanup()?;
    let step = advance_step(phase.step, choose_step_of(state, player))?;
    if phase.current_rally_resolution_state.is_some() {
        return Err(InvariantViolation::ResolutionInProgress("rally"));
    }
    let rally = RallyResolutionState::new(player, perform_rally);
    Ok(state.with_phase_state(PhaseState::Cleanup(phase.with_step(step).with_rally(Some(rally)))))
}

/// Carry out a rally decision and check command support.
pub(super) fn resolve_rally(
    ruleset: &Ruleset,
    state: &GameState,
    player: PlayerSide,
) -> Result<GameState, InvariantViolation> {
    let phase = state.phase_state().cleanup()?;
    require_step(phase.step, resolve_step_of(state, player))?;
    let rally = rally_in(phase)?;
    super::require_player(rally.player, player)?;
    if rally.completed || rally.units_lost_support.is_some() {
        return Err(InvariantViolation::ResolutionCompleted("rally"));
    }

    if !rally.perform_rally {
        let declined = RallyResolutionState {
            completed: true,
            ..rally.clone()
        };
        return settle(state, phase, declined);
    }

    let next = state.with_cards(state.cards.rally(player));
    let lost: Vector<UnitInstance> = units_out_of_support(&next.board, player, ruleset.config.support_distance)
        .into_iter()
        .collect();
    if !lost.is_empty() {
        tracing::debug!(%player, count = lost.len(), "units out of support");
    }
    let rallied = RallyResolutionState {
        completed: lost.is_empty(),
        units_lost_support: Some(lost),
        ..rally.clone()
    };
    settle(&next, phase, rallied)
}

/// Rout every unit that lost support.
pub(super) fn rout_units(state: &GameState) -> Result<GameState, InvariantViolation> {
    let phase = state.phase_state().cleanup()?;
    let rally = rally_in(phase)?;
    require_step(phase.step, resolve_step_of(state, rally.player))?;
    let lost = rally
        .units_lost_support
        .as_ref()
        .ok_or(InvariantViolation::MissingResolutionState("support check"))?;
    if rally.rout_discard.is_some() {
        return Err(InvariantViolation::ResolutionCompleted("rally rout"));
    }
    let (next, discard) = forced::rout(state, lost)?;
    let routed = RallyResolutionState {
        rout_discard: Some(discard),
        completed: true,
        ..rally.clone()
    };
    settle(&next, phase, routed)
}

/// Discard cards for units routed by lost support.
pub(super) fn choose_rout_discard(
    state: &GameState,
    player: PlayerSide,
    cards: &[CardId],
) -> Result<GameState, InvariantViolation> {
    let phase = state.phase_state().cleanup()?;
    let rally = rally_in(phase)?;
    require_step(phase.step, resolve_step_of(state, rally.player))?;
    let (next, discard) = forced::discard(state, rally.rout_discard.as_ref(), player, cards)?;
    let discarded = RallyResolutionState {
        rout_discard: Some(discard),
        ..rally.clone()
    };
    settle(&next, phase, discarded)
}
