//! Round state and the tagged per-phase sub-state.

use im::{OrdSet, Vector};
use serde::{Deserialize, Serialize};

use super::cards::CardsPhaseState;
use super::cleanup::CleanupPhaseState;
use super::commanders::CommandersPhaseState;
use super::commands::IssueCommandsPhaseState;
use super::melee::MeleePhaseState;
use super::setup::SetupPhaseState;
use super::step::PhaseStep;
use super::Phase;
use crate::core::InvariantViolation;
use crate::units::UnitInstance;

/// Sub-state of the current phase.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "camelCase")]
pub enum PhaseState {
    Setup(SetupPhaseState),
    Cards(CardsPhaseState),
    Commanders(CommandersPhaseState),
    Commands(IssueCommandsPhaseState),
    Melee(MeleePhaseState),
    Cleanup(CleanupPhaseState),
}

impl PhaseState {
    /// Which phase this is.
    #[must_use]
    pub fn phase(&self) -> Phase {
        match self {
            PhaseState::Setup(_) => Phase::Setup,
            PhaseState::Cards(_) => Phase::Cards,
            PhaseState::Commanders(_) => Phase::Commanders,
            PhaseState::Commands(_) => Phase::Commands,
            PhaseState::Melee(_) => Phase::Melee,
            PhaseState::Cleanup(_) => Phase::Cleanup,
        }
    }

    /// Name of the current step.
    #[must_use]
    pub fn step_name(&self) -> &'static str {
        match self {
            PhaseState::Setup(s) => s.step.name(),
            PhaseState::Cards(s) => s.step.name(),
            PhaseState::Commanders(s) => s.step.name(),
            PhaseState::Commands(s) => s.step.name(),
            PhaseState::Melee(s) => s.step.name(),
            PhaseState::Cleanup(s) => s.step.name(),
        }
    }

    /// Whether the phase has reached its terminal step.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        match self {
            PhaseState::Setup(s) => s.step.is_complete(),
            PhaseState::Cards(s) => s.step.is_complete(),
            PhaseState::Commanders(s) => s.step.is_complete(),
            PhaseState::Commands(s) => s.step.is_complete(),
            PhaseState::Melee(s) => s.step.is_complete(),
            PhaseState::Cleanup(s) => s.step.is_complete(),
        }
    }

    fn mismatch(&self, expected: Phase) -> InvariantViolation {
        InvariantViolation::PhaseMismatch {
            expected: expected.name(),
            found: self.phase().name(),
        }
    }

    /// The setup sub-state, or an invariant violation.
    pub fn setup(&self) -> Result<&SetupPhaseState, InvariantViolation> {
        match self {
            PhaseState::Setup(s) => Ok(s),
            _ => Err(self.mismatch(Phase::Setup)),
        }
    }

    /// The cards sub-state, or an invariant violation.
    pub fn cards(&self) -> Result<&CardsPhaseState, InvariantViolation> {
        match self {
            PhaseState::Cards(s) => Ok(s),
            _ => Err(self.mismatch(Phase::Cards)),
        }
    }

    /// The commanders sub-state, or an invariant violation.
    pub fn commanders(&self) -> Result<&CommandersPhaseState, InvariantViolation> {
        match self {
            PhaseState::Commanders(s) => Ok(s),
            _ => Err(self.mismatch(Phase::Commanders)),
        }
    }

    /// The issue-commands sub-state, or an invariant violation.
    pub fn commands(&self) -> Result<&IssueCommandsPhaseState, InvariantViolation> {
        match self {
            PhaseState::Commands(s) => Ok(s),
            _ => Err(self.mismatch(Phase::Commands)),
        }
    }

    /// The melee sub-state, or an invariant violation.
    pub fn melee(&self) -> Result<&MeleePhaseState, InvariantViolation> {
        match self {
            PhaseState::Melee(s) => Ok(s),
            _ => Err(self.mismatch(Phase::Melee)),
        }
    }

    /// The cleanup sub-state, or an invariant violation.
    pub fn cleanup(&self) -> Result<&CleanupPhaseState, InvariantViolation> {
        match self {
            PhaseState::Cleanup(s) => Ok(s),
            _ => Err(self.mismatch(Phase::Cleanup)),
        }
    }
}

/// Where play stands within one round.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundState {
    /// Round number (starts at 1).
    pub round_number: u32,

    /// Phases finished this round, in order.
    pub completed_phases: Vector<Phase>,

    /// Sub-state of the phase in progress.
    pub current_phase: PhaseState,

    /// Units that have already used a command this round.
    pub commanded_units: OrdSet<UnitInstance>,
}

impl RoundState {
    /// The opening round, in setup.
    #[must_use]
    pub fn opening() -> Self {
        Self::starting(1, PhaseState::Setup(SetupPhaseState::new()))
    }

    /// A new round beginning with the cards phase.
    #[must_use]
    pub fn new(round_number: u32) -> Self {
        Self::starting(round_number, PhaseState::Cards(CardsPhaseState::new()))
    }

    fn starting(round_number: u32, current_phase: PhaseState) -> Self {
        Self {
            round_number,
            completed_phases: Vector::new(),
            current_phase,
            commanded_units: OrdSet::new(),
        }
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.current_phase.phase()
    }

    /// Copy with the phase sub-state replaced.
    #[must_use]
    pub fn with_phase_state(&self, current_phase: PhaseState) -> Self {
        Self {
            current_phase,
            ..self.clone()
        }
    }

    /// Copy with the current phase recorded as finished and `next` begun.
    #[must_use]
    pub fn with_next_phase(&self, next: PhaseState) -> Self {
        let mut completed_phases = self.completed_phases.clone();
        completed_phases.push_back(self.phase());
        Self {
            completed_phases,
            current_phase: next,
            ..self.clone()
        }
    }

    /// Copy with a unit marked as commanded.
    #[must_use]
    pub fn with_commanded(&self, unit: UnitInstance) -> Self {
        Self {
            commanded_units: self.commanded_units.update(unit),
            ..self.clone()
        }
    }
}
