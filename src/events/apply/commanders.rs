use crate::board::Coordinate;
use crate::core::{GameState, InvariantViolation, PlayerSide};
use crate::phases::{advance_step, CommandersPhaseState, CommandersStep, PhaseState};

fn step_of(state: &GameState, player: PlayerSide) -> CommandersStep {
    if player == state.first_player() {
        CommandersStep::FirstPlayerMoveCommander
    } else {
        CommandersStep::SecondPlayerMoveCommander
    }
}

fn advanced(state: &GameState, player: PlayerSide) -> Result<CommandersPhaseState, InvariantViolation> {
    let phase = state.phase_state().commanders()?;
    Ok(phase.with_step(advance_step(phase.step, step_of(state, player))?))
}

/// Move a player's commander.
pub(super) fn move_commander(
    state: &GameState,
    player: PlayerSide,
    from: Coordinate,
    to: Coordinate,
) -> Result<GameState, InvariantViolation> {
    let phase = advanced(state, player)?;
    if state.board.commander_position(player) != Some(from) {
        return Err(InvariantViolation::Inconsistent(format!("{player} commander is not at {from}")));
    }
    tracing::debug!(%player, %from, %to, "commander moved");

    Ok(state
        .with_board(state.board.with_commander_moved(player, Some(from), to))
        .with_phase_state(PhaseState::Commanders(phase)))
}

/// Pass over a player whose commander is lost.
pub(super) fn skip_commander_move(state: &GameState, player: PlayerSide) -> Result<GameState, InvariantViolation> {
    let phase = advanced(state, player)?;
    if !state.is_commander_lost(player) {
        return Err(InvariantViolation::Inconsistent(format!("{player} commander is not lost")));
    }
    Ok(state.with_phase_state(PhaseState::Commanders(phase)))
}

#[cfg(test)]
mod tests {
    use super::super::fixtures::*;
    use super::*;
    use crate::cards::CardState;

    fn commanders() -> GameState {
        let board = empty_board()
            .with_commander_moved(PlayerSide::One, None, c("A-5"))
            .with_commander_moved(PlayerSide::Two, None, c("L-5"));
        state_in(
            PhaseState::Commanders(CommandersPhaseState::new()),
            board,
            CardState::default(),
        )
    }

    #[test]
    fn test_move_then_second_player() {
        let moved = move_commander(&commanders(), PlayerSide::One, c("A-5"), c("D-5")).unwrap();

        assert_eq!(moved.board.commander_position(PlayerSide::One), Some(c("D-5")));
        assert_eq!(moved.phase_state().step_name(), "secondPlayerMoveCommander");

        let done = move_commander(&moved, PlayerSide::Two, c("L-5"), c("L-5")).unwrap();
        assert!(done.phase_state().is_complete());
    }

    #[test]
    fn test_initiative_holder_moves_first() {
        let state = commanders().with_initiative(PlayerSide::Two);
        assert!(move_commander(&state, PlayerSide::One, c("A-5"), c("B-5")).is_err());
        assert!(move_commander(&state, PlayerSide::Two, c("L-5"), c("K-5")).is_ok());
    }

    #[test]
    fn test_skip_needs_lost_commander() {
        assert!(skip_commander_move(&commanders(), PlayerSide::One).is_err());

        let lost = commanders().with_lost_commander(PlayerSide::One);
        let skipped = skip_commander_move(&lost, PlayerSide::One).unwrap();
        assert_eq!(skipped.phase_state().step_name(), "secondPlayerMoveCommander");
    }
}
