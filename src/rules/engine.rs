//! Rules engine trait and game sessions.
//!
//! `RulesEngine` is the seam between the event state machine and whatever
//! drives it:
//! - What the next event must look like
//! - Whether a player choice is legal
//! - How an event changes the state
//! - Win/loss conditions
//!
//! Every method has a default built on a [`Ruleset`], so an implementation
//! only has to supply one. [`Session`] runs events through the engine in
//! the required order and keeps the state history.
//!
//! ## Submitting an event
//!
//! ```text
//! corrupted? game over?        → refuse
//! matches expected_event?      → otherwise Unexpected
//! player choice legal?         → otherwise Rejected (state unchanged)
//! apply                        → InvariantViolation corrupts the session
//! ```

use im::Vector;
use thiserror::Error;
use tracing::{debug, error, warn};

use super::choice::validate_choice;
use super::ruleset::Ruleset;
use crate::core::{GameState, InvariantViolation, PlayerSide, RuleViolation, Validation};
use crate::events::{apply, expected_event, Event, ExpectedEvent, PlayerChoice};
use crate::phases::{CardsStep, Phase, PhaseState};

/// Result of a finished game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GameResult {
    /// Single winner.
    Winner(PlayerSide),
    /// Both sides eliminated at once.
    Draw,
}

impl GameResult {
    /// Check if a side won.
    #[must_use]
    pub fn is_winner(&self, side: PlayerSide) -> bool {
        matches!(self, GameResult::Winner(s) if *s == side)
    }
}

/// Rules engine trait.
pub trait RulesEngine {
    /// Static rules of the game.
    fn ruleset(&self) -> &Ruleset;

    /// Shape of the next legitimate event.
    fn expected_event(&self, state: &GameState) -> Result<ExpectedEvent, InvariantViolation> {
        expected_event(self.ruleset(), state)
    }

    /// Check a player choice that already has the expected shape.
    fn validate(&self, state: &GameState, choice: &PlayerChoice) -> Validation {
        validate_choice(self.ruleset(), state, choice)
    }

    /// Apply an accepted event.
    fn apply(&self, state: &GameState, event: &Event) -> Result<GameState, InvariantViolation> {
        apply(self.ruleset(), state, event)
    }

    /// Check if the game is over.
    ///
    /// Once setup is finished, a side with no units left on the board has
    /// lost, as has a side that must choose a card with an empty hand. If
    /// both sides are out at once the game is drawn.
    fn game_result(&self, state: &GameState) -> Option<GameResult> {
        if state.phase() == Phase::Setup {
            return None;
        }
        let one = state.board.units_of(PlayerSide::One).is_empty() || out_of_cards(state, PlayerSide::One);
        let two = state.board.units_of(PlayerSide::Two).is_empty() || out_of_cards(state, PlayerSide::Two);
        match (one, two) {
            (true, true) => Some(GameResult::Draw),
            (true, false) => Some(GameResult::Winner(PlayerSide::Two)),
            (false, true) => Some(GameResult::Winner(PlayerSide::One)),
            (false, false) => None,
        }
    }
}

/// A side owing a card choice with nothing in hand cannot continue.
fn out_of_cards(state: &GameState, side: PlayerSide) -> bool {
    matches!(state.phase_state(), PhaseState::Cards(cards) if cards.step == CardsStep::ChooseCards)
        && state.cards.chosen[side].is_none()
        && state.cards.hands[side].is_empty()
}

impl RulesEngine for Ruleset {
    fn ruleset(&self) -> &Ruleset {
        self
    }
}

/// Why a session refused an event.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum SessionError {
    #[error("choice rejected: {0}")]
    Rejected(#[from] RuleViolation),

    #[error("expected {expected}, got {event:?}")]
    Unexpected { expected: ExpectedEvent, event: Event },

    #[error("state machine desynchronized: {0}")]
    Corrupted(InvariantViolation),

    #[error("session is corrupted and accepts no further events")]
    SessionCorrupted,

    #[error("game is over: {0:?}")]
    GameOver(GameResult),
}

/// One game in progress.
///
/// ## Example
///
/// ```
/// use rust_wargame::games::standard::StandardGameBuilder;
/// use rust_wargame::rules::Session;
///
/// let mut session = StandardGameBuilder::new().with_seed(9).build_session();
/// assert_eq!(session.fire_effects().unwrap(), 0);
/// assert!(session.history().is_empty());
/// ```
#[derive(Clone, Debug)]
pub struct Session<R: RulesEngine = Ruleset> {
    engine: R,
    state: GameState,
    history: Vector<GameState>,
    corrupted: bool,
}

impl<R: RulesEngine> Session<R> {
    /// Start a session from `state`.
    pub fn new(engine: R, state: GameState) -> Self {
        Self {
            engine,
            state,
            history: Vector::new(),
            corrupted: false,
        }
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// The rules engine.
    #[must_use]
    pub fn engine(&self) -> &R {
        &self.engine
    }

    /// Earlier states, oldest first.
    #[must_use]
    pub fn history(&self) -> &Vector<GameState> {
        &self.history
    }

    /// Whether an invariant violation has stopped the session.
    #[must_use]
    pub fn is_corrupted(&self) -> bool {
        self.corrupted
    }

    /// Result, if the game is over.
    #[must_use]
    pub fn result(&self) -> Option<GameResult> {
        self.engine.game_result(&self.state)
    }

    /// Shape of the next event.
    pub fn expected(&self) -> Result<ExpectedEvent, SessionError> {
        if self.corrupted {
            return Err(SessionError::SessionCorrupted);
        }
        self.engine.expected_event(&self.state).map_err(SessionError::Corrupted)
    }

    fn corrupt(&mut self, violation: InvariantViolation) -> SessionError {
        error!(
            round = self.state.current_round_number,
            phase = %self.state.phase(),
            step = self.state.phase_state().step_name(),
            %violation,
            "session corrupted"
        );
        self.corrupted = true;
        SessionError::Corrupted(violation)
    }

    /// Validate and apply one event.
    pub fn submit(&mut self, event: impl Into<Event>) -> Result<&GameState, SessionError> {
        let event = event.into();
        if self.corrupted {
            return Err(SessionError::SessionCorrupted);
        }
        if let Some(result) = self.result() {
            return Err(SessionError::GameOver(result));
        }

        let expected = match self.engine.expected_event(&self.state) {
            Ok(expected) => expected,
            Err(violation) => return Err(self.corrupt(violation)),
        };
        if !expected.matches(&event) {
            return Err(SessionError::Unexpected { expected, event });
        }
        if let Event::PlayerChoice(choice) = &event {
            if let Err(violation) = self.engine.validate(&self.state, choice) {
                warn!(player = %choice.player(), kind = ?choice.kind(), %violation, "choice rejected");
                return Err(SessionError::Rejected(violation));
            }
        }

        let next = match self.engine.apply(&self.state, &event) {
            Ok(next) => next,
            Err(violation) => return Err(self.corrupt(violation)),
        };
        debug!(
            round = next.current_round_number,
            phase = %next.phase(),
            step = next.phase_state().step_name(),
            ?event,
            "event applied"
        );
        self.history.push_back(std::mem::replace(&mut self.state, next));
        Ok(&self.state)
    }

    /// Fire game effects until a player choice is needed or the game ends.
    ///
    /// Returns how many effects fired.
    pub fn fire_effects(&mut self) -> Result<usize, SessionError> {
        let mut fired = 0;
        while self.result().is_none() {
            let ExpectedEvent::GameEffect { effect } = self.expected()? else {
                break;
            };
            self.submit(effect)?;
            fired += 1;
        }
        Ok(fired)
    }

    /// Step back to the previous state. Returns false with no history.
    ///
    /// A corrupted session stays corrupted.
    pub fn undo(&mut self) -> bool {
        match self.history.pop_back() {
            Some(previous) => {
                self.state = previous;
                true
            }
            None => false,
        }
    }
}
