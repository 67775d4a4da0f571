//! Reducers.
//!
//! [`apply`] turns one accepted event and a state into the next state. The
//! input state is never modified: each reducer builds the result by copying
//! and replacing only the nested fields the event touches, so every
//! untouched branch is shared with the input.
//!
//! Each reducer checks its own preconditions (phase, step, acting player,
//! resolution record). A failed precondition means an event got past the
//! expected-event gate that should not have, and is reported as an
//! [`InvariantViolation`].

mod cards;
mod cleanup;
mod commanders;
mod commands;
#[cfg(test)]
mod fixtures;
mod forced;
mod melee;
mod phase;
mod setup;

use super::event::{Event, GameEffect, PlayerChoice};
use crate::core::{GameState, InvariantViolation, PlayerSide};
use crate::phases::PhaseState;
use crate::rules::Ruleset;

/// Apply an accepted event.
pub fn apply(ruleset: &Ruleset, state: &GameState, event: &Event) -> Result<GameState, InvariantViolation> {
    match event {
        Event::PlayerChoice(choice) => apply_choice(ruleset, state, choice),
        Event::GameEffect(effect) => apply_effect(ruleset, state, effect),
    }
}

fn apply_choice(ruleset: &Ruleset, state: &GameState, choice: &PlayerChoice) -> Result<GameState, InvariantViolation> {
    match choice {
        PlayerChoice::SetupUnits {
            player,
            placements,
            commander,
        } => setup::setup_units(state, *player, placements, *commander),
        PlayerChoice::ChooseCard { player, card } => cards::choose_card(state, *player, *card),
        PlayerChoice::MoveCommander { player, from, to } => commanders::move_commander(state, *player, *from, *to),
        PlayerChoice::MoveUnit { player, unit, from, to } => {
            commands::move_unit(ruleset, state, *player, *unit, *from, *to)
        }
        PlayerChoice::PerformRangedAttack { player, unit, target } => {
            commands::perform_ranged_attack(ruleset, state, *player, *unit, *target)
        }
        PlayerChoice::EndCommands { player } => commands::end_commands(state, *player),
        PlayerChoice::ChooseRally { player, perform_rally } => cleanup::choose_rally(state, *player, *perform_rally),
        PlayerChoice::ChooseRoutDiscard { player, cards } => match state.phase_state() {
            PhaseState::Commands(_) => commands::choose_rout_discard(state, *player, cards),
            PhaseState::Melee(_) => melee::choose_rout_discard(state, *player, cards),
            PhaseState::Cleanup(_) => cleanup::choose_rout_discard(state, *player, cards),
            other => Err(no_resolution_in(other)),
        },
    }
}

fn apply_effect(ruleset: &Ruleset, state: &GameState, effect: &GameEffect) -> Result<GameState, InvariantViolation> {
    match effect {
        GameEffect::CompletePhase => phase::complete_phase(ruleset, state),
        GameEffect::RevealCards => cards::reveal_cards(ruleset, state),
        GameEffect::SkipCommanderMove { player } => commanders::skip_commander_move(state, *player),
        GameEffect::CompleteUnitMovement => commands::complete_unit_movement(state),
        GameEffect::CompleteRangedAttack => commands::complete_ranged_attack(ruleset, state),
        GameEffect::ResolveMelee { coordinate } => melee::resolve_melee(ruleset, state, *coordinate),
        GameEffect::EndMelee => melee::end_melee(state),
        GameEffect::DiscardPlayedCards => cleanup::discard_played_cards(state),
        GameEffect::ResolveRally { player } => cleanup::resolve_rally(ruleset, state, *player),
        GameEffect::CompleteRetreat | GameEffect::CompleteReverse => {
            let kind = forced::kind_of(effect);
            match state.phase_state() {
                PhaseState::Commands(_) => commands::complete_forced_move(state, kind),
                PhaseState::Melee(_) => melee::complete_forced_move(state, kind),
                other => Err(no_resolution_in(other)),
            }
        }
        GameEffect::RoutUnits => match state.phase_state() {
            PhaseState::Commands(_) => commands::rout_units(state),
            PhaseState::Melee(_) => melee::rout_units(state),
            PhaseState::Cleanup(_) => cleanup::rout_units(state),
            other => Err(no_resolution_in(other)),
        },
    }
}

fn no_resolution_in(phase: &PhaseState) -> InvariantViolation {
    InvariantViolation::Inconsistent(format!("the {} phase has no forced moves or routs", phase.phase()))
}

/// The acting player must be the one the step is waiting on.
pub(super) fn require_player(expected: PlayerSide, found: PlayerSide) -> Result<(), InvariantViolation> {
    if expected == found {
        Ok(())
    } else {
        Err(InvariantViolation::WrongPlayer { expected, found })
    }
}
