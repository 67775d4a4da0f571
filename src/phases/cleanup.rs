//! Cleanup phase: discard played cards, then each player may rally.

use serde::{Deserialize, Serialize};

use super::resolution::RallyResolutionState;
use super::step::phase_steps;

phase_steps! {
    /// Steps of the cleanup phase.
    pub enum CleanupStep {
        DiscardPlayedCards => "discardPlayedCards",
        FirstPlayerChooseRally => "firstPlayerChooseRally",
        FirstPlayerResolveRally => "firstPlayerResolveRally",
        SecondPlayerChooseRally => "secondPlayerChooseRally",
        SecondPlayerResolveRally => "secondPlayerResolveRally",
        Complete => "complete",
    }
}

/// Cleanup phase sub-state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanupPhaseState {
    pub step: CleanupStep,

    /// Rally currently being resolved.
    pub current_rally_resolution_state: Option<RallyResolutionState>,
}

impl CleanupPhaseState {
    /// Fresh cleanup phase.
    #[must_use]
    pub fn new() -> Self {
        Self {
            step: CleanupStep::DiscardPlayedCards,
            current_rally_resolution_state: None,
        }
    }

    /// Copy with a different rally record.
    #[must_use]
    pub fn with_rally(&self, rally: Option<RallyResolutionState>) -> Self {
        Self {
            current_rally_resolution_state: rally,
            ..self.clone()
        }
    }

    /// Copy at a different step.
    #[must_use]
    pub fn with_step(&self, step: CleanupStep) -> Self {
        Self {
            step,
            ..self.clone()
        }
    }
}

impl Default for CleanupPhaseState {
    fn default() -> Self {
        Self::new()
    }
}
