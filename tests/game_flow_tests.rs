//! Whole-game flow tests.
//!
//! These drive the standard game through a `Session` with a simple scripted
//! player and check the state machine as a whole:
//! - Every accepted event moves the expectation on (no stalls)
//! - Rounds cycle through every phase in order
//! - Reducers never touch the state they were given
//! - Rejected and unexpected events leave the session untouched

use rust_wargame::board::Coordinate;
use rust_wargame::cards::CardId;
use rust_wargame::core::{GameState, PlayerSide, RuleViolation};
use rust_wargame::events::{apply, Event, ExpectedEvent, GameEffect, PlayerChoice, PlayerChoiceKind};
use rust_wargame::games::standard::{line_deployment, StandardGameBuilder};
use rust_wargame::phases::Phase;
use rust_wargame::rules::{legal_unit_moves, pending_rout_discard, ranged_targets, validate_choice, Ruleset, Session};

const PROBE: CardId = CardId::new(4);

/// Step from `from` toward `to`, at most `max` spaces.
fn toward(from: Coordinate, to: Coordinate, max: u8) -> Coordinate {
    let step = |a: u8, b: u8| {
        if b > a {
            a + (b - a).min(max)
        } else {
            a - (a - b).min(max)
        }
    };
    Coordinate::new(step(from.row(), to.row()), step(from.column(), to.column()))
}

/// Rows toward the enemy edge gained by standing on `coordinate`.
fn progress(side: PlayerSide, coordinate: Coordinate) -> i16 {
    match side {
        PlayerSide::One => i16::from(coordinate.row()),
        PlayerSide::Two => -i16::from(coordinate.row()),
    }
}

fn command_choice(ruleset: &Ruleset, state: &GameState, player: PlayerSide, kinds: &[PlayerChoiceKind]) -> PlayerChoice {
    let units = state.board.units_of(player);

    if kinds.contains(&PlayerChoiceKind::PerformRangedAttack) {
        for u in &units {
            for target in ranged_targets(ruleset, &state.board, &u.unit, u.placement) {
                let choice = PlayerChoice::PerformRangedAttack {
                    player,
                    unit: u.unit,
                    target,
                };
                if validate_choice(ruleset, state, &choice).is_ok() {
                    return choice;
                }
            }
        }
    }

    if kinds.contains(&PlayerChoiceKind::MoveUnit) {
        for u in &units {
            let best = legal_unit_moves(ruleset, &state.board, &u.unit, u.placement, 0)
                .into_iter()
                .filter(|to| progress(player, to.coordinate) > progress(player, u.placement.coordinate))
                .max_by_key(|to| progress(player, to.coordinate));
            if let Some(to) = best {
                let choice = PlayerChoice::MoveUnit {
                    player,
                    unit: u.unit,
                    from: u.placement,
                    to,
                };
                if validate_choice(ruleset, state, &choice).is_ok() {
                    return choice;
                }
            }
        }
    }

    PlayerChoice::EndCommands { player }
}

/// A legal choice for whatever the session is waiting on.
fn scripted_choice(session: &Session, players: &[PlayerSide], kinds: &[PlayerChoiceKind]) -> PlayerChoice {
    let ruleset = session.engine();
    let state = session.state();
    let player = players[0];

    if kinds.contains(&PlayerChoiceKind::SetupUnits) {
        return line_deployment(ruleset, state, player).unwrap();
    }
    if kinds.contains(&PlayerChoiceKind::ChooseCard) {
        let hand = &state.cards.hands[player];
        let card = if hand.contains(&PROBE) { PROBE } else { hand[0] };
        return PlayerChoice::ChooseCard { player, card };
    }
    if kinds.contains(&PlayerChoiceKind::MoveCommander) {
        let from = state.board.commander_position(player).unwrap();
        let units = state.board.units_of(player);
        let to = if units.is_empty() {
            from
        } else {
            let n = units.len();
            let row = units.iter().map(|u| usize::from(u.placement.coordinate.row())).sum::<usize>() / n;
            let column = units.iter().map(|u| usize::from(u.placement.coordinate.column())).sum::<usize>() / n;
            let centre = Coordinate::new(row as u8, column as u8);
            toward(from, centre, ruleset.config.commander_move_distance)
        };
        return PlayerChoice::MoveCommander { player, from, to };
    }
    if kinds.contains(&PlayerChoiceKind::ChooseRally) {
        let cards = &state.cards;
        let perform_rally = !cards.discarded[player].is_empty() && cards.hands[player].len() <= 4;
        return PlayerChoice::ChooseRally { player, perform_rally };
    }
    if kinds.contains(&PlayerChoiceKind::ChooseRoutDiscard) {
        let owed = pending_rout_discard(state).unwrap().cards_to_discard;
        let cards = state.cards.hands[player].iter().copied().take(owed).collect();
        return PlayerChoice::ChooseRoutDiscard { player, cards };
    }
    command_choice(ruleset, state, player, kinds)
}

/// Play until `rounds` rounds have started, the game ends, or `limit`
/// events have been applied. Returns the phases entered, in order.
fn play(session: &mut Session, rounds: u32, limit: usize) -> Vec<Phase> {
    let mut phases = vec![session.state().phase()];
    for _ in 0..limit {
        if session.result().is_some() || session.state().current_round_number > rounds {
            break;
        }
        let expected = session.expected().unwrap();
        let event: Event = match &expected {
            ExpectedEvent::GameEffect { effect } => effect.clone().into(),
            ExpectedEvent::PlayerChoice { players, kinds } => scripted_choice(session, players, kinds).into(),
        };

        let before = session.state().clone();
        session.submit(event.clone()).unwrap_or_else(|e| panic!("{event:?} refused: {e}"));

        if session.result().is_none() {
            let next = session.expected().unwrap();
            assert_ne!(next, expected, "state machine stalled after {event:?}");
        }
        assert_eq!(session.history().back(), Some(&before));
        if session.state().phase() != *phases.last().unwrap() {
            phases.push(session.state().phase());
        }
    }
    phases
}

#[test]
fn test_first_round_visits_every_phase() {
    let mut session = StandardGameBuilder::new().with_seed(21).build_session();
    let phases = play(&mut session, 1, 2_000);

    assert_eq!(
        phases,
        vec![
            Phase::Setup,
            Phase::Cards,
            Phase::Commanders,
            Phase::Commands,
            Phase::Melee,
            Phase::Cleanup,
            Phase::Cards,
        ]
    );
    let state = session.state();
    assert_eq!(state.current_round_number, 2);
    assert!(state.round_state.completed_phases.is_empty());
    assert_eq!(state.cards.discarded[PlayerSide::One].len(), 1);
    assert!(state.cards.in_play[PlayerSide::One].is_none());
    assert!(!session.is_corrupted());
}

#[test]
fn test_several_rounds_without_stalling() {
    for seed in [1, 2, 3] {
        let mut session = StandardGameBuilder::new().with_seed(seed).build_session();
        play(&mut session, 6, 5_000);

        assert!(!session.is_corrupted());
        assert!(session.state().current_round_number > 6 || session.result().is_some());

        // Every unit is on the board or accounted for.
        let state = session.state();
        let on_board = state.board.units().len();
        assert_eq!(on_board + state.routed_units.len() + state.defeated_units.len(), 14);
    }
}

#[test]
fn test_same_seed_replays_identically() {
    let mut first = StandardGameBuilder::new().with_seed(8).build_session();
    let mut second = StandardGameBuilder::new().with_seed(8).build_session();
    play(&mut first, 3, 3_000);
    play(&mut second, 3, 3_000);

    assert_eq!(first.state(), second.state());
    assert_eq!(first.history().len(), second.history().len());
}

#[test]
fn test_apply_leaves_input_untouched() {
    let (ruleset, state) = StandardGameBuilder::new().with_seed(4).build();
    let setup = line_deployment(&ruleset, &state, PlayerSide::One).unwrap();
    let snapshot = serde_json::to_string(&state).unwrap();

    let next = apply(&ruleset, &state, &setup.into()).unwrap();

    assert_eq!(serde_json::to_string(&state).unwrap(), snapshot);
    assert_ne!(next, state);
    assert!(state.board.units().is_empty());
    assert_eq!(next.board.units_of(PlayerSide::One).len(), 7);
}

#[test]
fn test_refused_events_leave_session_untouched() {
    let mut session = StandardGameBuilder::new().with_seed(6).build_session();
    let opening = session.state().clone();

    // Side two may not set up first.
    let early = line_deployment(session.engine(), session.state(), PlayerSide::Two).unwrap();
    assert!(session.submit(early).is_err());

    // Side one may not deploy into no man's land.
    let PlayerChoice::SetupUnits { mut placements, commander, .. } =
        line_deployment(session.engine(), session.state(), PlayerSide::One).unwrap()
    else {
        unreachable!()
    };
    placements[0].placement.coordinate = "F-1".parse().unwrap();
    let bad = PlayerChoice::SetupUnits {
        player: PlayerSide::One,
        placements,
        commander,
    };
    let refused = session.submit(bad);
    assert!(matches!(
        refused,
        Err(rust_wargame::rules::SessionError::Rejected(RuleViolation::OutsideDeploymentZone { .. }))
    ));

    assert!(session.submit(GameEffect::CompletePhase).is_err());
    assert_eq!(session.state(), &opening);
    assert!(session.history().is_empty());
    assert!(!session.is_corrupted());
}

#[test]
fn test_undo_steps_back() {
    let mut session = StandardGameBuilder::new().with_seed(2).build_session();
    play(&mut session, 1, 40);
    let reached = session.state().clone();
    let depth = session.history().len();
    assert!(depth > 0);

    assert!(session.undo());
    assert_eq!(session.history().len(), depth - 1);
    assert_ne!(session.state(), &reached);

    while session.undo() {}
    assert_eq!(session.state().phase(), Phase::Setup);
    assert!(session.state().board.units().is_empty());
}
