use crate::board::{Coordinate, UnitPresence};
use crate::cards::CardId;
use crate::core::{GameState, InvariantViolation, PlayerSide};
use crate::phases::{
    advance_step, require_step, ForcedMoveKind, ForcedMoveState, MeleePhaseState, MeleeResolutionState, MeleeResult,
    MeleeStep, PhaseState,
};
use crate::rules::combat::roll_melee;
use crate::rules::{EngagementAngle, Ruleset};
use crate::units::UnitPlacement;

use super::forced;

/// Store `melee`, clearing it once no work is left.
fn settle(state: &GameState, phase: &MeleePhaseState, melee: MeleeResolutionState) -> GameState {
    let melee = (!melee.is_resolved()).then_some(melee);
    state.with_phase_state(PhaseState::Melee(phase.with_resolution(melee)))
}

/// Roll the melee on the next queued engagement.
pub(super) fn resolve_melee(
    ruleset: &Ruleset,
    state: &GameState,
    coordinate: Coordinate,
) -> Result<GameState, InvariantViolation> {
    let phase = state.phase_state().melee()?;
    require_step(phase.step, MeleeStep::ResolveEngagements)?;
    if phase.current_melee_resolution_state.is_some() {
        return Err(InvariantViolation::ResolutionInProgress("melee"));
    }
    if phase.remaining_engagements.front() != Some(&coordinate) {
        return Err(InvariantViolation::Inconsistent(format!(
            "{coordinate} is not the next engagement"
        )));
    }
    let UnitPresence::Engaged {
        primary,
        primary_facing,
        secondary,
        angle,
    } = state.board.presence(coordinate)
    else {
        return Err(InvariantViolation::NotEngaged(coordinate));
    };

    let attack = ruleset.known_unit_type(&primary)?.attack;
    let defense = ruleset.known_unit_type(&secondary)?.defense;
    let mut dice = state.dice();
    let outcome = roll_melee(&mut dice, &ruleset.config, attack, defense, angle);
    tracing::debug!(
        %coordinate,
        attacker = %primary,
        defender = %secondary,
        attacker_total = outcome.attacker_total,
        defender_total = outcome.defender_total,
        result = ?outcome.result,
        "melee rolled"
    );

    let mut next = state.with_rng(&dice);
    let mut forced_move = None;
    match outcome.result {
        MeleeResult::Stalemate => {
            let reset = UnitPresence::engaged(primary, primary_facing, secondary, EngagementAngle::Front)?;
            next = next.with_board(next.board.with_presence(coordinate, reset));
        }
        MeleeResult::DefenderDefeated => {
            let mut board = next
                .board
                .without_unit(&secondary)
                .ok_or(InvariantViolation::UnitNotOnBoard(secondary))?;
            next = next.with_defeated(secondary);
            let side = secondary.side;
            let cleared = board
                .space(coordinate)
                .filter(|s| s.has_commander(side))
                .map(|s| s.without_commander(side));
            if let Some(space) = cleared {
                board = board.with_space(coordinate, space);
                next = next.with_lost_commander(side);
                tracing::debug!(%side, %coordinate, "commander lost");
            }
            next = next.with_board(board);
        }
        MeleeResult::DefenderRetreats => {
            forced_move = Some(ForcedMoveState::retreat(
                secondary,
                UnitPlacement::new(coordinate, primary_facing.opposite()),
                primary_facing,
            ));
        }
        MeleeResult::AttackerReverses => {
            forced_move = Some(ForcedMoveState::reverse(
                primary,
                UnitPlacement::new(coordinate, primary_facing),
                primary_facing.opposite(),
            ));
        }
    }

    let melee = MeleeResolutionState {
        coordinate,
        attacker: primary,
        attacker_facing: primary_facing,
        defender: secondary,
        angle,
        outcome: Some(outcome),
        forced_move,
        completed: true,
    };
    let phase = MeleePhaseState {
        remaining_engagements: phase.remaining_engagements.skip(1),
        ..phase.clone()
    };
    Ok(settle(&next, &phase, melee))
}

/// Close the phase once the queue is empty.
pub(super) fn end_melee(state: &GameState) -> Result<GameState, InvariantViolation> {
    let phase = state.phase_state().melee()?;
    if phase.current_melee_resolution_state.is_some() {
        return Err(InvariantViolation::ResolutionInProgress("melee"));
    }
    if let Some(coordinate) = phase.remaining_engagements.front() {
        return Err(InvariantViolation::Inconsistent(format!(
            "engagement at {coordinate} is still unresolved"
        )));
    }
    let step = advance_step(phase.step, MeleeStep::ResolveEngagements)?;
    Ok(state.with_phase_state(PhaseState::Melee(phase.with_step(step))))
}

fn current(phase: &MeleePhaseState) -> Result<(&MeleeResolutionState, &ForcedMoveState), InvariantViolation> {
    let melee = phase
        .current_melee_resolution_state
        .as_ref()
        .ok_or(InvariantViolation::MissingResolutionState("melee"))?;
    let forced = melee
        .forced_move
        .as_ref()
        .ok_or(InvariantViolation::MissingResolutionState("forced move"))?;
    Ok((melee, forced))
}

fn with_forced(next: &GameState, phase: &MeleePhaseState, melee: &MeleeResolutionState, forced: ForcedMoveState) -> GameState {
    let melee = MeleeResolutionState {
        forced_move: Some(forced),
        ..melee.clone()
    };
    settle(next, phase, melee)
}

/// Carry out the retreat or reverse a melee forced.
pub(super) fn complete_forced_move(state: &GameState, kind: ForcedMoveKind) -> Result<GameState, InvariantViolation> {
    let phase = state.phase_state().melee()?;
    let (melee, forced) = current(phase)?;
    let (next, forced) = forced::complete(state, forced, kind)?;
    Ok(with_forced(&next, phase, melee, forced))
}

/// Rout a unit whose forced move was blocked.
pub(super) fn rout_units(state: &GameState) -> Result<GameState, InvariantViolation> {
    let phase = state.phase_state().melee()?;
    let (melee, forced) = current(phase)?;
    let (next, forced) = forced::rout_forced(state, forced)?;
    Ok(with_forced(&next, phase, melee, forced))
}

/// Discard cards for a unit routed in melee.
pub(super) fn choose_rout_discard(
    state: &GameState,
    player: PlayerSide,
    cards: &[CardId],
) -> Result<GameState, InvariantViolation> {
    let phase = state.phase_state().melee()?;
    let (melee, forced) = current(phase)?;
    let (next, discard) = forced::discard(state, forced.rout_discard.as_ref(), player, cards)?;
    let forced = ForcedMoveState {
        rout_discard: Some(discard),
        ..forced.clone()
    };
    Ok(with_forced(&next, phase, melee, forced))
}

#[cfg(test)]
mod tests {
    use super::super::fixtures::*;
    use super::*;
    use crate::board::{Board, Facing};
    use crate::cards::CardState;
    use crate::phases::{MeleeOutcome, PhaseStep};
    use crate::units::UnitInstance;

    fn engaged_board(attacker: UnitInstance, defender: UnitInstance, at: &str) -> Board {
        empty_board().with_presence(
            c(at),
            UnitPresence::engaged(attacker, Facing::South, defender, EngagementAngle::Rear).unwrap(),
        )
    }

    fn melee_state(board: Board) -> GameState {
        let queue = board.engaged_spaces();
        state_in(
            PhaseState::Melee(MeleePhaseState::new(queue)),
            board,
            CardState::with_hands(vec![ADVANCE], vec![VOLLEY, HOLD]),
        )
    }

    /// A melee already rolled with a forced move pending.
    fn pending(board: Board, melee: MeleeResolutionState) -> GameState {
        let phase = MeleePhaseState::new(Vec::new()).with_resolution(Some(melee));
        melee_state(board).with_phase_state(PhaseState::Melee(phase))
    }

    fn outcome(result: MeleeResult) -> Option<MeleeOutcome> {
        Some(MeleeOutcome {
            attacker_total: 5,
            defender_total: 4,
            result,
        })
    }

    #[test]
    fn test_decisive_melee_defeats_defender() {
        let champion = unit(PlayerSide::One, CHAMPION, 1);
        let defender = foot(PlayerSide::Two, 1);
        let board = engaged_board(champion, defender, "F-5").with_commander_moved(PlayerSide::Two, None, c("F-5"));
        let state = melee_state(board);

        let resolved = resolve_melee(&ruleset(), &state, c("F-5")).unwrap();

        assert!(resolved.defeated_units.contains(&defender));
        assert_eq!(resolved.board.presence(c("F-5")), UnitPresence::single(champion, Facing::South));
        assert!(resolved.is_commander_lost(PlayerSide::Two));
        assert_eq!(resolved.board.commander_position(PlayerSide::Two), None);

        let phase = resolved.phase_state().melee().unwrap();
        assert!(phase.remaining_engagements.is_empty());
        assert!(phase.current_melee_resolution_state.is_none());
    }

    #[test]
    fn test_resolve_out_of_order() {
        let second = UnitPresence::engaged(
            foot(PlayerSide::One, 2),
            Facing::North,
            foot(PlayerSide::Two, 2),
            EngagementAngle::Front,
        )
        .unwrap();
        let board = engaged_board(foot(PlayerSide::One, 1), foot(PlayerSide::Two, 1), "C-3").with_presence(c("H-8"), second);
        let state = melee_state(board);

        assert!(resolve_melee(&ruleset(), &state, c("H-8")).is_err());
        assert!(resolve_melee(&ruleset(), &state, c("C-3")).is_ok());
    }

    #[test]
    fn test_resolve_not_engaged() {
        let board = empty_board().with_unit(foot(PlayerSide::One, 1), c("C-3"), Facing::South);
        let phase = MeleePhaseState::new(vec![c("C-3")]);
        let state = state_in(PhaseState::Melee(phase), board, CardState::default());

        assert_eq!(
            resolve_melee(&ruleset(), &state, c("C-3")),
            Err(InvariantViolation::NotEngaged(c("C-3")))
        );
    }

    #[test]
    fn test_retreat_leaves_attacker() {
        let attacker = foot(PlayerSide::One, 1);
        let defender = foot(PlayerSide::Two, 1);
        let melee = MeleeResolutionState {
            coordinate: c("F-5"),
            attacker,
            attacker_facing: Facing::South,
            defender,
            angle: EngagementAngle::Rear,
            outcome: outcome(MeleeResult::DefenderRetreats),
            forced_move: Some(ForcedMoveState::retreat(
                defender,
                UnitPlacement::new(c("F-5"), Facing::North),
                Facing::South,
            )),
            completed: true,
        };
        let state = pending(engaged_board(attacker, defender, "F-5"), melee);

        assert!(complete_forced_move(&state, ForcedMoveKind::Reverse).is_err());

        let retreated = complete_forced_move(&state, ForcedMoveKind::Retreat).unwrap();
        assert_eq!(retreated.board.presence(c("F-5")), UnitPresence::single(attacker, Facing::South));
        assert_eq!(retreated.board.presence(c("G-5")), UnitPresence::single(defender, Facing::North));
        assert!(retreated.phase_state().melee().unwrap().current_melee_resolution_state.is_none());
    }

    #[test]
    fn test_blocked_reverse_routs_attacker() {
        let attacker = foot(PlayerSide::One, 1);
        let defender = foot(PlayerSide::Two, 1);
        let blocker = foot(PlayerSide::One, 2);
        let board = engaged_board(attacker, defender, "F-5").with_unit(blocker, c("E-5"), Facing::South);
        let melee = MeleeResolutionState {
            coordinate: c("F-5"),
            attacker,
            attacker_facing: Facing::South,
            defender,
            angle: EngagementAngle::Rear,
            outcome: outcome(MeleeResult::AttackerReverses),
            forced_move: Some(ForcedMoveState::reverse(
                attacker,
                UnitPlacement::new(c("F-5"), Facing::South),
                Facing::North,
            )),
            completed: true,
        };
        let state = pending(board, melee);

        let blocked = complete_forced_move(&state, ForcedMoveKind::Reverse).unwrap();
        let forced = blocked.phase_state().melee().unwrap().current_melee_resolution_state.as_ref().unwrap();
        assert!(forced.forced_move.as_ref().unwrap().failed);

        let routed = rout_units(&blocked).unwrap();
        assert!(routed.routed_units.contains(&attacker));
        assert_eq!(routed.board.presence(c("F-5")), UnitPresence::single(defender, Facing::North));

        // One card in hand, one owed.
        let discarded = choose_rout_discard(&routed, PlayerSide::One, &[ADVANCE]).unwrap();
        assert!(discarded.cards.hands[PlayerSide::One].is_empty());
        assert!(discarded.phase_state().melee().unwrap().current_melee_resolution_state.is_none());

        assert!(choose_rout_discard(&routed, PlayerSide::Two, &[VOLLEY]).is_err());
    }

    #[test]
    fn test_end_melee() {
        let state = melee_state(empty_board());
        let ended = end_melee(&state).unwrap();
        assert_eq!(ended.phase_state().melee().unwrap().step, MeleeStep::Complete);
        assert!(MeleeStep::Complete.is_complete());

        let busy = melee_state(engaged_board(foot(PlayerSide::One, 1), foot(PlayerSide::Two, 1), "B-2"));
        assert!(end_melee(&busy).is_err());
    }
}
