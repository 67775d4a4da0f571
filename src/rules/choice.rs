//! Legality of a player choice against the current state.
//!
//! Shape (who may choose, which kind of choice) is the oracle's job; this
//! checks the content of a choice that already has the right shape.

use super::cards::{is_legal_card_choice, is_legal_rally_choice, is_legal_rout_discard};
use super::commander::is_legal_commander_move;
use super::commands::{is_commandable, move_speed_bonus};
use super::movement::is_legal_unit_move;
use super::ranged::is_legal_ranged_attack;
use super::ruleset::Ruleset;
use super::setup::is_legal_setup;
use crate::cards::ActivationKind;
use crate::core::{GameState, PlayerSide, RuleViolation, Validation};
use crate::events::PlayerChoice;
use crate::phases::{CommandResolutionState, PhaseState, RoutDiscardState};
use crate::units::{UnitInstance, UnitPlacement};

fn own_unit(player: PlayerSide, unit: &UnitInstance) -> Validation {
    if unit.side == player {
        Ok(())
    } else {
        Err(RuleViolation::NotOwnUnit { side: player, unit: *unit })
    }
}

fn placed(state: &GameState, unit: &UnitInstance) -> Result<UnitPlacement, RuleViolation> {
    state
        .board
        .placement_of(unit)
        .ok_or(RuleViolation::UnitNotDeployed(*unit))
}

/// The rout discard currently waiting on a player, wherever it is nested.
#[must_use]
pub fn pending_rout_discard(state: &GameState) -> Option<&RoutDiscardState> {
    let pending = match state.phase_state() {
        PhaseState::Commands(phase) => match &phase.current_command_resolution_state {
            Some(CommandResolutionState::RangedAttack(ranged)) => {
                ranged.retreat.as_ref().and_then(|r| r.rout_discard.as_ref())
            }
            _ => None,
        },
        PhaseState::Melee(phase) => phase
            .current_melee_resolution_state
            .as_ref()
            .and_then(|m| m.forced_move.as_ref())
            .and_then(|f| f.rout_discard.as_ref()),
        PhaseState::Cleanup(phase) => phase
            .current_rally_resolution_state
            .as_ref()
            .and_then(|r| r.rout_discard.as_ref()),
        _ => None,
    };
    pending.filter(|rout| !rout.completed)
}

/// Check a player choice.
pub fn validate_choice(ruleset: &Ruleset, state: &GameState, choice: &PlayerChoice) -> Validation {
    match choice {
        PlayerChoice::SetupUnits {
            player,
            placements,
            commander,
        } => is_legal_setup(ruleset, state, *player, placements, *commander),

        PlayerChoice::ChooseCard { player, card } => is_legal_card_choice(&state.cards, *player, *card),

        PlayerChoice::MoveCommander { player, from, to } => {
            if state.is_commander_lost(*player) {
                return Err(RuleViolation::CommanderLost(*player));
            }
            is_legal_commander_move(&state.board, *player, *from, *to, ruleset.config.commander_move_distance)
        }

        PlayerChoice::MoveUnit { player, unit, from, to } => {
            own_unit(*player, unit)?;
            if state.board.placement_of(unit) != Some(*from) {
                return Err(RuleViolation::UnitNotAt {
                    unit: *unit,
                    coordinate: from.coordinate,
                });
            }
            let Ok(phase) = state.phase_state().commands() else {
                return Err(RuleViolation::NoCommandForUnit(*unit));
            };
            is_commandable(ruleset, phase, &state.round_state.commanded_units, unit, ActivationKind::Move)?;
            let bonus = move_speed_bonus(ruleset, phase.remaining_commands(), unit);
            is_legal_unit_move(ruleset, &state.board, unit, *from, *to, bonus)
        }

        PlayerChoice::PerformRangedAttack { player, unit, target } => {
            own_unit(*player, unit)?;
            let placement = placed(state, unit)?;
            let Ok(phase) = state.phase_state().commands() else {
                return Err(RuleViolation::NoCommandForUnit(*unit));
            };
            is_commandable(
                ruleset,
                phase,
                &state.round_state.commanded_units,
                unit,
                ActivationKind::RangedAttack,
            )?;
            is_legal_ranged_attack(ruleset, &state.board, unit, placement, *target)
        }

        PlayerChoice::EndCommands { .. } => Ok(()),

        PlayerChoice::ChooseRally { player, perform_rally } => {
            is_legal_rally_choice(&state.cards, *player, *perform_rally)
        }

        PlayerChoice::ChooseRoutDiscard { player, cards } => match pending_rout_discard(state) {
            Some(rout) if rout.player == *player => is_legal_rout_discard(&state.cards, rout, cards),
            _ => Err(RuleViolation::NoRoutDiscard(*player)),
        },
    }
}

#[cfg(test)]
mod tests {
    use im::Vector;

    use super::*;
    use crate::board::{Board, BoardShape, Coordinate, Facing};
    use crate::cards::{CardId, CardRegistry, CardState, Command, CommandSize};
    use crate::core::RulesConfig;
    use crate::phases::{CleanupPhaseState, CleanupStep, IssueCommandsPhaseState, RallyResolutionState, RoundState};
    use crate::units::{UnitRegistry, UnitType, UnitTypeId};

    const FOOT: UnitTypeId = UnitTypeId::new(1);

    fn c(text: &str) -> Coordinate {
        text.parse().unwrap()
    }

    fn ruleset() -> Ruleset {
        let mut units = UnitRegistry::new();
        units.register(UnitType::new(FOOT, "Foot"));
        Ruleset::new(RulesConfig::default(), units, CardRegistry::new())
    }

    fn foot(side: PlayerSide) -> UnitInstance {
        UnitInstance::new(side, FOOT, 1)
    }

    fn issuing() -> GameState {
        let board = Board::new(BoardShape::STANDARD)
            .with_unit(foot(PlayerSide::One), c("C-5"), Facing::South)
            .with_unit(foot(PlayerSide::Two), c("J-5"), Facing::North);
        let phase = IssueCommandsPhaseState::new(
            Vector::unit(Command::new(CommandSize::Units, 1)),
            Vector::unit(Command::new(CommandSize::Units, 1)),
        );
        GameState::new(board, CardState::default(), Vec::new(), 1)
            .with_round_state(RoundState::new(1).with_phase_state(PhaseState::Commands(phase)))
    }

    fn move_choice(unit: UnitInstance, from: &str, to: &str) -> PlayerChoice {
        PlayerChoice::MoveUnit {
            player: PlayerSide::One,
            unit,
            from: UnitPlacement::new(c(from), Facing::South),
            to: UnitPlacement::new(c(to), Facing::South),
        }
    }

    #[test]
    fn test_legal_move() {
        let choice = move_choice(foot(PlayerSide::One), "C-5", "D-5");
        assert_eq!(validate_choice(&ruleset(), &issuing(), &choice), Ok(()));
    }

    #[test]
    fn test_move_checks() {
        let state = issuing();

        let enemy = move_choice(foot(PlayerSide::Two), "J-5", "I-5");
        assert!(matches!(
            validate_choice(&ruleset(), &state, &enemy),
            Err(RuleViolation::NotOwnUnit { .. })
        ));

        let elsewhere = move_choice(foot(PlayerSide::One), "C-6", "D-6");
        assert!(matches!(
            validate_choice(&ruleset(), &state, &elsewhere),
            Err(RuleViolation::UnitNotAt { .. })
        ));

        let too_far = move_choice(foot(PlayerSide::One), "C-5", "H-5");
        assert!(matches!(
            validate_choice(&ruleset(), &state, &too_far),
            Err(RuleViolation::UnreachablePlacement { .. })
        ));

        let commanded = state.with_round_state(state.round_state.with_commanded(foot(PlayerSide::One)));
        let again = move_choice(foot(PlayerSide::One), "C-5", "D-5");
        assert_eq!(
            validate_choice(&ruleset(), &commanded, &again),
            Err(RuleViolation::AlreadyCommanded(foot(PlayerSide::One)))
        );
    }

    #[test]
    fn test_lost_commander_cannot_move() {
        let state = issuing().with_lost_commander(PlayerSide::Two);
        let choice = PlayerChoice::MoveCommander {
            player: PlayerSide::Two,
            from: c("L-5"),
            to: c("K-5"),
        };
        assert_eq!(
            validate_choice(&ruleset(), &state, &choice),
            Err(RuleViolation::CommanderLost(PlayerSide::Two))
        );
    }

    #[test]
    fn test_rout_discard_needs_pending_rout() {
        let choice = PlayerChoice::ChooseRoutDiscard {
            player: PlayerSide::One,
            cards: vec![CardId::new(1)],
        };
        assert_eq!(
            validate_choice(&ruleset(), &issuing(), &choice),
            Err(RuleViolation::NoRoutDiscard(PlayerSide::One))
        );
    }

    #[test]
    fn test_pending_rout_in_rally() {
        let mut rally = RallyResolutionState::new(PlayerSide::Two, true);
        rally.units_lost_support = Some(Vector::unit(foot(PlayerSide::Two)));
        rally.rout_discard = Some(RoutDiscardState::new(PlayerSide::Two, Vector::unit(foot(PlayerSide::Two)), 2));
        rally.completed = true;
        let phase = CleanupPhaseState::new()
            .with_step(CleanupStep::SecondPlayerResolveRally)
            .with_rally(Some(rally));
        let state = issuing().with_phase_state(PhaseState::Cleanup(phase));

        assert_eq!(pending_rout_discard(&state).map(|r| r.cards_to_discard), Some(1));
    }
}
