//! The expected-event oracle.
//!
//! [`expected_event`] walks the nested round, phase and resolution state and
//! returns the only legitimate shape of the next event:
//!
//! - a player choice, naming who may choose and which kinds of choice are
//!   open, or
//! - the exact game effect that must fire next.
//!
//! Incoming events are checked against this before any reducer runs. The
//! oracle fails with an [`InvariantViolation`] when the state cannot have a
//! next event: a resolution record marked completed with nothing left to
//! do, a finished rally whose step never advanced, or units recorded as out
//! of support with no rout record.

use serde::{Deserialize, Serialize};
use smallvec::{smallvec, SmallVec};

use super::event::{Event, GameEffect, PlayerChoiceKind};
use crate::cards::ActivationKind;
use crate::core::{GameState, InvariantViolation, PlayerSide};
use crate::phases::{
    CardsStep, CleanupPhaseState, CleanupStep, CommandResolutionState, CommandersStep, ForcedMoveKind,
    ForcedMoveState, IssueCommandsPhaseState, IssueCommandsStep, MeleePhaseState, MeleeStep, PhaseState,
    PhaseStep, RallyResolutionState, RoutDiscardState, SetupStep,
};
use crate::rules::{commands::find_command, Ruleset};

/// Shape of the next event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "actionType", rename_all = "camelCase")]
pub enum ExpectedEvent {
    /// One of `players` must make a choice of one of `kinds`.
    PlayerChoice {
        players: SmallVec<[PlayerSide; 2]>,
        kinds: SmallVec<[PlayerChoiceKind; 3]>,
    },

    /// Exactly this effect fires next.
    GameEffect { effect: GameEffect },
}

impl ExpectedEvent {
    fn choice(player: PlayerSide, kind: PlayerChoiceKind) -> Self {
        ExpectedEvent::PlayerChoice {
            players: smallvec![player],
            kinds: smallvec![kind],
        }
    }

    fn effect(effect: GameEffect) -> Self {
        ExpectedEvent::GameEffect { effect }
    }

    /// Whether `event` has the expected shape.
    #[must_use]
    pub fn matches(&self, event: &Event) -> bool {
        match (self, event) {
            (ExpectedEvent::PlayerChoice { players, kinds }, Event::PlayerChoice(choice)) => {
                players.contains(&choice.player()) && kinds.contains(&choice.kind())
            }
            (ExpectedEvent::GameEffect { effect }, Event::GameEffect(fired)) => effect == fired,
            _ => false,
        }
    }
}

impl std::fmt::Display for ExpectedEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExpectedEvent::PlayerChoice { players, kinds } => {
                write!(f, "choice {kinds:?} from {players:?}")
            }
            ExpectedEvent::GameEffect { effect } => write!(f, "effect {}", effect.name()),
        }
    }
}

/// The next legitimate event for `state`.
pub fn expected_event(ruleset: &Ruleset, state: &GameState) -> Result<ExpectedEvent, InvariantViolation> {
    if state.phase_state().is_complete() {
        return Ok(ExpectedEvent::effect(GameEffect::CompletePhase));
    }
    match state.phase_state() {
        PhaseState::Setup(setup) => Ok(match setup.step {
            SetupStep::FirstPlayerSetup => ExpectedEvent::choice(state.first_player(), PlayerChoiceKind::SetupUnits),
            SetupStep::SecondPlayerSetup => {
                ExpectedEvent::choice(state.second_player(), PlayerChoiceKind::SetupUnits)
            }
            SetupStep::Complete => ExpectedEvent::effect(GameEffect::CompletePhase),
        }),
        PhaseState::Cards(cards) => Ok(match cards.step {
            CardsStep::ChooseCards => {
                let players: SmallVec<[PlayerSide; 2]> = PlayerSide::ALL
                    .into_iter()
                    .filter(|side| state.cards.chosen[*side].is_none())
                    .collect();
                if players.is_empty() {
                    return Err(InvariantViolation::StepMismatch {
                        expected: CardsStep::RevealCards.name().to_string(),
                        found: CardsStep::ChooseCards.name().to_string(),
                    });
                }
                ExpectedEvent::PlayerChoice {
                    players,
                    kinds: smallvec![PlayerChoiceKind::ChooseCard],
                }
            }
            CardsStep::RevealCards => ExpectedEvent::effect(GameEffect::RevealCards),
            CardsStep::Complete => ExpectedEvent::effect(GameEffect::CompletePhase),
        }),
        PhaseState::Commanders(commanders) => {
            let player = match commanders.step {
                CommandersStep::FirstPlayerMoveCommander => state.first_player(),
                CommandersStep::SecondPlayerMoveCommander => state.second_player(),
                CommandersStep::Complete => return Ok(ExpectedEvent::effect(GameEffect::CompletePhase)),
            };
            Ok(if state.is_commander_lost(player) {
                ExpectedEvent::effect(GameEffect::SkipCommanderMove { player })
            } else {
                ExpectedEvent::choice(player, PlayerChoiceKind::MoveCommander)
            })
        }
        PhaseState::Commands(commands) => expected_in_commands(ruleset, state, commands),
        PhaseState::Melee(melee) => expected_in_melee(state, melee),
        PhaseState::Cleanup(cleanup) => expected_in_cleanup(state, cleanup),
    }
}

fn expected_in_commands(
    ruleset: &Ruleset,
    state: &GameState,
    phase: &IssueCommandsPhaseState,
) -> Result<ExpectedEvent, InvariantViolation> {
    if let Some(resolution) = &phase.current_command_resolution_state {
        return match resolution {
            CommandResolutionState::Movement(movement) => {
                if movement.completed {
                    Err(InvariantViolation::ResolutionCompleted("movement"))
                } else {
                    Ok(ExpectedEvent::effect(GameEffect::CompleteUnitMovement))
                }
            }
            CommandResolutionState::RangedAttack(ranged) => {
                if ranged.hit.is_none() {
                    return Ok(ExpectedEvent::effect(GameEffect::CompleteRangedAttack));
                }
                match &ranged.retreat {
                    Some(retreat) if !retreat.is_resolved() => expected_in_forced_move(state, retreat),
                    _ => Err(InvariantViolation::ResolutionCompleted("ranged attack")),
                }
            }
        };
    }

    let player = match phase.step {
        IssueCommandsStep::FirstPlayerIssueCommands => state.first_player(),
        IssueCommandsStep::SecondPlayerIssueCommands => state.second_player(),
        IssueCommandsStep::Complete => return Ok(ExpectedEvent::effect(GameEffect::CompletePhase)),
    };

    let mut kinds: SmallVec<[PlayerChoiceKind; 3]> = SmallVec::new();
    let remaining = phase.remaining_commands();
    let available = |kind| {
        state.board.units_of(player).iter().any(|u| {
            !state.round_state.commanded_units.contains(&u.unit)
                && find_command(ruleset, remaining, &u.unit, kind).is_some()
        })
    };
    if phase.has_activations() {
        if available(ActivationKind::Move) {
            kinds.push(PlayerChoiceKind::MoveUnit);
        }
        if available(ActivationKind::RangedAttack) {
            kinds.push(PlayerChoiceKind::PerformRangedAttack);
        }
    }
    kinds.push(PlayerChoiceKind::EndCommands);
    Ok(ExpectedEvent::PlayerChoice {
        players: smallvec![player],
        kinds,
    })
}

fn expected_in_melee(state: &GameState, phase: &MeleePhaseState) -> Result<ExpectedEvent, InvariantViolation> {
    match phase.step {
        MeleeStep::Complete => Ok(ExpectedEvent::effect(GameEffect::CompletePhase)),
        MeleeStep::ResolveEngagements => match &phase.current_melee_resolution_state {
            Some(melee) => {
                if melee.outcome.is_none() {
                    return Err(InvariantViolation::Inconsistent(format!(
                        "melee at {} has no outcome",
                        melee.coordinate
                    )));
                }
                match &melee.forced_move {
                    Some(forced) if !forced.is_resolved() => expected_in_forced_move(state, forced),
                    _ => Err(InvariantViolation::ResolutionCompleted("melee")),
                }
            }
            None => Ok(match phase.remaining_engagements.front() {
                Some(coordinate) => ExpectedEvent::effect(GameEffect::ResolveMelee {
                    coordinate: *coordinate,
                }),
                None => ExpectedEvent::effect(GameEffect::EndMelee),
            }),
        },
    }
}

/// Next event inside a retreat or reverse.
fn expected_in_forced_move(
    state: &GameState,
    forced: &ForcedMoveState,
) -> Result<ExpectedEvent, InvariantViolation> {
    if let Some(rout) = &forced.rout_discard {
        return expected_rout_discard(rout);
    }
    if forced.failed {
        if forced.completed || state.routed_units.contains(&forced.unit) {
            return Err(InvariantViolation::MissingRoutState);
        }
        return Ok(ExpectedEvent::effect(GameEffect::RoutUnits));
    }
    if forced.completed {
        let name = match forced.kind {
            ForcedMoveKind::Retreat => "retreat",
            ForcedMoveKind::Reverse => "reverse",
        };
        return Err(InvariantViolation::ResolutionCompleted(name));
    }
    Ok(ExpectedEvent::effect(match forced.kind {
        ForcedMoveKind::Retreat => GameEffect::CompleteRetreat,
        ForcedMoveKind::Reverse => GameEffect::CompleteReverse,
    }))
}

fn expected_rout_discard(rout: &RoutDiscardState) -> Result<ExpectedEvent, InvariantViolation> {
    if rout.completed {
        Err(InvariantViolation::ResolutionCompleted("rout discard"))
    } else {
        Ok(ExpectedEvent::choice(rout.player, PlayerChoiceKind::ChooseRoutDiscard))
    }
}

fn expected_in_cleanup(state: &GameState, phase: &CleanupPhaseState) -> Result<ExpectedEvent, InvariantViolation> {
    match phase.step {
        CleanupStep::DiscardPlayedCards => Ok(ExpectedEvent::effect(GameEffect::DiscardPlayedCards)),
        CleanupStep::FirstPlayerChooseRally => {
            Ok(ExpectedEvent::choice(state.first_player(), PlayerChoiceKind::ChooseRally))
        }
        CleanupStep::SecondPlayerChooseRally => {
            Ok(ExpectedEvent::choice(state.second_player(), PlayerChoiceKind::ChooseRally))
        }
        CleanupStep::FirstPlayerResolveRally | CleanupStep::SecondPlayerResolveRally => {
            let rally = phase
                .current_rally_resolution_state
                .as_ref()
                .ok_or(InvariantViolation::MissingResolutionState("rally"))?;
            expected_in_rally(state, rally)
        }
        CleanupStep::Complete => Ok(ExpectedEvent::effect(GameEffect::CompletePhase)),
    }
}

fn expected_in_rally(state: &GameState, rally: &RallyResolutionState) -> Result<ExpectedEvent, InvariantViolation> {
    if rally.is_resolved() {
        return Err(InvariantViolation::RallyStepNotAdvanced);
    }
    if let Some(rout) = &rally.rout_discard {
        return expected_rout_discard(rout);
    }
    let Some(lost) = &rally.units_lost_support else {
        return Ok(ExpectedEvent::effect(GameEffect::ResolveRally { player: rally.player }));
    };
    if lost.is_empty() {
        return Err(InvariantViolation::Inconsistent(
            "rally found no unsupported units but was not completed".to_string(),
        ));
    }
    if lost.iter().all(|u| state.routed_units.contains(u)) {
        return Err(InvariantViolation::MissingRoutState);
    }
    Ok(ExpectedEvent::effect(GameEffect::RoutUnits))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Board, BoardShape};
    use crate::cards::CardState;
    use crate::events::PlayerChoice;
    use crate::phases::{CleanupPhaseState, RoundState};
    use crate::units::{UnitInstance, UnitTypeId};
    use im::Vector;

    fn state() -> GameState {
        GameState::new(Board::new(BoardShape::STANDARD), CardState::default(), Vec::new(), 3)
    }

    fn in_cleanup(state: &GameState, phase: CleanupPhaseState) -> GameState {
        state.with_round_state(RoundState::new(1).with_phase_state(PhaseState::Cleanup(phase)))
    }

    #[test]
    fn test_setup_expects_first_player() {
        let expected = expected_event(&Ruleset::default(), &state()).unwrap();
        assert_eq!(expected, ExpectedEvent::choice(PlayerSide::One, PlayerChoiceKind::SetupUnits));
    }

    #[test]
    fn test_matches() {
        let expected = ExpectedEvent::PlayerChoice {
            players: smallvec![PlayerSide::One, PlayerSide::Two],
            kinds: smallvec![PlayerChoiceKind::ChooseCard],
        };
        let choice = Event::from(PlayerChoice::ChooseCard {
            player: PlayerSide::Two,
            card: crate::cards::CardId::new(1),
        });
        assert!(expected.matches(&choice));
        assert!(!expected.matches(&Event::from(GameEffect::RevealCards)));
        assert!(!ExpectedEvent::effect(GameEffect::EndMelee).matches(&Event::from(GameEffect::RevealCards)));
    }

    #[test]
    fn test_rally_completed_without_advancing() {
        let mut rally = RallyResolutionState::new(PlayerSide::One, false);
        rally.completed = true;
        let phase = CleanupPhaseState::new()
            .with_step(CleanupStep::FirstPlayerResolveRally)
            .with_rally(Some(rally));

        assert_eq!(
            expected_event(&Ruleset::default(), &in_cleanup(&state(), phase)),
            Err(InvariantViolation::RallyStepNotAdvanced)
        );
    }

    #[test]
    fn test_missing_rally_state() {
        let phase = CleanupPhaseState::new().with_step(CleanupStep::SecondPlayerResolveRally);
        assert_eq!(
            expected_event(&Ruleset::default(), &in_cleanup(&state(), phase)),
            Err(InvariantViolation::MissingResolutionState("rally"))
        );
    }

    #[test]
    fn test_lost_support_without_rout_state() {
        let unit = UnitInstance::new(PlayerSide::One, UnitTypeId::new(1), 1);
        let mut rally = RallyResolutionState::new(PlayerSide::One, true);
        rally.units_lost_support = Some(Vector::unit(unit));
        let phase = CleanupPhaseState::new()
            .with_step(CleanupStep::FirstPlayerResolveRally)
            .with_rally(Some(rally));

        let pending = in_cleanup(&state(), phase);
        assert_eq!(
            expected_event(&Ruleset::default(), &pending),
            Ok(ExpectedEvent::effect(GameEffect::RoutUnits))
        );

        let routed = pending.with_routed(vec![unit]);
        assert_eq!(
            expected_event(&Ruleset::default(), &routed),
            Err(InvariantViolation::MissingRoutState)
        );
    }
}
