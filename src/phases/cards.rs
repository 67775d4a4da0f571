//! Cards phase: simultaneous secret choice, then reveal.
//!
//! Which players have chosen is read from `CardState::chosen`; the step only
//! records where the phase stands.

use serde::{Deserialize, Serialize};

use super::step::phase_steps;

phase_steps! {
    /// Steps of the cards phase.
    pub enum CardsStep {
        ChooseCards => "chooseCards",
        RevealCards => "revealCards",
        Complete => "complete",
    }
}

/// Cards phase sub-state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardsPhaseState {
    pub step: CardsStep,
}

impl CardsPhaseState {
    /// Fresh cards phase.
    #[must_use]
    pub fn new() -> Self {
        Self {
            step: CardsStep::ChooseCards,
        }
    }

    /// Copy at a different step.
    #[must_use]
    pub fn with_step(&self, step: CardsStep) -> Self {
        Self { step }
    }
}

impl Default for CardsPhaseState {
    fn default() -> Self {
        Self::new()
    }
}
