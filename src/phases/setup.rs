//! Setup phase: each player deploys once, initiative holder first.

use serde::{Deserialize, Serialize};

use super::step::phase_steps;

phase_steps! {
    /// Steps of the setup phase.
    pub enum SetupStep {
        FirstPlayerSetup => "firstPlayerSetup",
        SecondPlayerSetup => "secondPlayerSetup",
        Complete => "complete",
    }
}

/// Setup phase sub-state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetupPhaseState {
    pub step: SetupStep,
}

impl SetupPhaseState {
    /// Fresh setup phase.
    #[must_use]
    pub fn new() -> Self {
        Self {
            step: SetupStep::FirstPlayerSetup,
        }
    }

    /// Copy at a different step.
    #[must_use]
    pub fn with_step(&self, step: SetupStep) -> Self {
        Self { step }
    }
}

impl Default for SetupPhaseState {
    fn default() -> Self {
        Self::new()
    }
}
