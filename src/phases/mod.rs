//! Phase & round state machine.
//!
//! A round cycles through five phases in fixed order:
//!
//! ```text
//! cards → commanders → commands → melee → cleanup → (cards …)
//! ```
//!
//! The game opens with a one-off `setup` phase before the first cards
//! phase. Each phase owns a tagged sub-state whose `step` is a small linear
//! state machine (see [`PhaseStep`]); steps only ever move forward one at a
//! time. Work in progress on a single command, engagement or rally is kept
//! in the nested records of [`resolution`].

mod cards;
mod cleanup;
mod commanders;
mod commands;
mod melee;
pub mod resolution;
mod round;
mod setup;
mod step;

pub use cards::{CardsPhaseState, CardsStep};
pub use cleanup::{CleanupPhaseState, CleanupStep};
pub use commanders::{CommandersPhaseState, CommandersStep};
pub use commands::{IssueCommandsPhaseState, IssueCommandsStep};
pub use melee::{MeleePhaseState, MeleeStep};
pub use resolution::{
    CommandResolutionState, ForcedMoveKind, ForcedMoveState, MeleeOutcome, MeleeResolutionState,
    MeleeResult, MovementResolutionState, RallyResolutionState, RangedAttackResolutionState,
    RoutDiscardState,
};
pub use round::{PhaseState, RoundState};
pub use setup::{SetupPhaseState, SetupStep};
pub use step::{advance_step, require_step, PhaseStep};

use serde::{Deserialize, Serialize};

/// A phase of play.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Phase {
    Setup,
    Cards,
    Commanders,
    Commands,
    Melee,
    Cleanup,
}

/// The phases of a round, in order. Setup is not part of the cycle.
pub const ROUND_PHASES: [Phase; 5] = [
    Phase::Cards,
    Phase::Commanders,
    Phase::Commands,
    Phase::Melee,
    Phase::Cleanup,
];

impl Phase {
    /// Name used in messages and logs.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Phase::Setup => "setup",
            Phase::Cards => "cards",
            Phase::Commanders => "commanders",
            Phase::Commands => "commands",
            Phase::Melee => "melee",
            Phase::Cleanup => "cleanup",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// The phase after `current`. Cleanup wraps to cards; setup leads into cards.
#[must_use]
pub fn next_phase(current: Phase) -> Phase {
    match current {
        Phase::Setup => Phase::Cards,
        Phase::Cards => Phase::Commanders,
        Phase::Commanders => Phase::Commands,
        Phase::Commands => Phase::Melee,
        Phase::Melee => Phase::Cleanup,
        Phase::Cleanup => Phase::Cards,
    }
}
