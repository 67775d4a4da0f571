//! Commanders phase: each player may reposition their commander.

use serde::{Deserialize, Serialize};

use super::step::phase_steps;

phase_steps! {
    /// Steps of the commanders phase.
    pub enum CommandersStep {
        FirstPlayerMoveCommander => "firstPlayerMoveCommander",
        SecondPlayerMoveCommander => "secondPlayerMoveCommander",
        Complete => "complete",
    }
}

/// Commanders phase sub-state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandersPhaseState {
    pub step: CommandersStep,
}

impl CommandersPhaseState {
    /// Fresh commanders phase.
    #[must_use]
    pub fn new() -> Self {
        Self {
            step: CommandersStep::FirstPlayerMoveCommander,
        }
    }

    /// Copy at a different step.
    #[must_use]
    pub fn with_step(&self, step: CommandersStep) -> Self {
        Self { step }
    }
}

impl Default for CommandersPhaseState {
    fn default() -> Self {
        Self::new()
    }
}
