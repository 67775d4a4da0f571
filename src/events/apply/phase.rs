use im::Vector;

use crate::cards::Command;
use crate::core::{GameState, InvariantViolation, PlayerSide};
use crate::phases::{
    CardsPhaseState, CleanupPhaseState, CommandersPhaseState, IssueCommandsPhaseState, MeleePhaseState, PhaseState,
};
use crate::rules::Ruleset;

/// Commands granted by a player's in-play card.
fn commands_of(ruleset: &Ruleset, state: &GameState, side: PlayerSide) -> Result<Vector<Command>, InvariantViolation> {
    let card = state.cards.in_play[side].ok_or(InvariantViolation::NoCardInPlay(side))?;
    Ok(ruleset.card(card)?.commands.iter().cloned().collect())
}

/// Leave a finished phase and open the next one.
pub(super) fn complete_phase(ruleset: &Ruleset, state: &GameState) -> Result<GameState, InvariantViolation> {
    let current = state.phase_state();
    if !current.is_complete() {
        return Err(InvariantViolation::PhaseIncomplete(current.phase().name()));
    }

    let next = match current {
        PhaseState::Setup(_) => PhaseState::Cards(CardsPhaseState::new()),
        PhaseState::Cards(_) => PhaseState::Commanders(CommandersPhaseState::new()),
        PhaseState::Commanders(_) => PhaseState::Commands(IssueCommandsPhaseState::new(
            commands_of(ruleset, state, state.first_player())?,
            commands_of(ruleset, state, state.second_player())?,
        )),
        PhaseState::Commands(_) => PhaseState::Melee(MeleePhaseState::new(state.board.engaged_spaces())),
        PhaseState::Melee(_) => PhaseState::Cleanup(CleanupPhaseState::new()),
        PhaseState::Cleanup(_) => {
            let next = state.with_new_round();
            tracing::debug!(round = next.current_round_number, "round started");
            return Ok(next);
        }
    };
    tracing::debug!(
        round = state.current_round_number,
        from = %current.phase(),
        to = %next.phase(),
        "phase complete"
    );
    Ok(state.with_round_state(state.round_state.with_next_phase(next)))
}
