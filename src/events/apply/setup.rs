use crate::board::Coordinate;
use crate::core::{GameState, InvariantViolation, PlayerSide};
use crate::phases::{advance_step, PhaseState, SetupStep};
use crate::units::UnitWithPlacement;

/// Deploy a player's units and commander.
pub(super) fn setup_units(
    state: &GameState,
    player: PlayerSide,
    placements: &[UnitWithPlacement],
    commander: Coordinate,
) -> Result<GameState, InvariantViolation> {
    let setup = state.phase_state().setup()?;
    let expected = if player == state.first_player() {
        SetupStep::FirstPlayerSetup
    } else {
        SetupStep::SecondPlayerSetup
    };
    let step = advance_step(setup.step, expected)?;

    let mut board = state.board.clone();
    for placed in placements {
        if !state.reserved_units.contains(&placed.unit) {
            return Err(InvariantViolation::Inconsistent(format!("{} is not in reserve", placed.unit)));
        }
        let coordinate = placed.placement.coordinate;
        if !board.presence(coordinate).is_empty() {
            return Err(InvariantViolation::Inconsistent(format!("{coordinate} is already occupied")));
        }
        board = board.with_unit(placed.unit, coordinate, placed.placement.facing);
    }
    let board = board.with_commander_moved(player, None, commander);
    tracing::debug!(%player, units = placements.len(), %commander, "units deployed");

    Ok(state
        .with_board(board)
        .without_reserved(placements.iter().map(|p| p.unit))
        .with_phase_state(PhaseState::Setup(setup.with_step(step))))
}

#[cfg(test)]
mod tests {
    use super::super::fixtures::*;
    use super::*;
    use crate::board::{BoardShape, Facing};
    use crate::cards::CardState;
    use crate::units::UnitPlacement;

    fn opening() -> GameState {
        GameState::new(
            crate::board::Board::new(BoardShape::STANDARD),
            CardState::default(),
            vec![foot(PlayerSide::One, 1), foot(PlayerSide::Two, 1)],
            5,
        )
    }

    fn deploy(unit: crate::units::UnitInstance, at: &str, facing: Facing) -> UnitWithPlacement {
        UnitWithPlacement::new(unit, UnitPlacement::new(c(at), facing))
    }

    #[test]
    fn test_setup_places_units_and_commander() {
        let state = opening();
        let placements = [deploy(foot(PlayerSide::One, 1), "B-4", Facing::South)];

        let next = setup_units(&state, PlayerSide::One, &placements, c("A-4")).unwrap();

        assert_eq!(
            next.board.placement_of(&foot(PlayerSide::One, 1)),
            Some(UnitPlacement::new(c("B-4"), Facing::South))
        );
        assert_eq!(next.board.commander_position(PlayerSide::One), Some(c("A-4")));
        assert_eq!(next.reserve_of(PlayerSide::One).count(), 0);
        assert_eq!(next.reserve_of(PlayerSide::Two).count(), 1);
        assert_eq!(next.phase_state().step_name(), "secondPlayerSetup");

        // The input state is untouched.
        assert_eq!(state, opening());
    }

    #[test]
    fn test_setup_out_of_turn() {
        let placements = [deploy(foot(PlayerSide::Two, 1), "K-4", Facing::North)];
        let result = setup_units(&opening(), PlayerSide::Two, &placements, c("L-4"));

        assert!(matches!(result, Err(InvariantViolation::StepMismatch { .. })));
    }

    #[test]
    fn test_second_setup_completes_phase() {
        let first = setup_units(
            &opening(),
            PlayerSide::One,
            &[deploy(foot(PlayerSide::One, 1), "B-4", Facing::South)],
            c("A-4"),
        )
        .unwrap();
        let second = setup_units(
            &first,
            PlayerSide::Two,
            &[deploy(foot(PlayerSide::Two, 1), "K-4", Facing::North)],
            c("L-4"),
        )
        .unwrap();

        assert!(second.phase_state().is_complete());
        assert!(second.reserved_units.is_empty());
    }
}
