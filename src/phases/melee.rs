//! Melee phase: every engagement on the board is resolved once.
//!
//! The engaged spaces are queued in coordinate order when the phase opens.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::resolution::MeleeResolutionState;
use super::step::phase_steps;
use crate::board::Coordinate;

phase_steps! {
    /// Steps of the melee phase.
    pub enum MeleeStep {
        ResolveEngagements => "resolveEngagements",
        Complete => "complete",
    }
}

/// Melee phase sub-state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeleePhaseState {
    pub step: MeleeStep,

    /// Engaged spaces not yet resolved, in order.
    pub remaining_engagements: Vector<Coordinate>,

    /// Engagement currently being resolved.
    pub current_melee_resolution_state: Option<MeleeResolutionState>,
}

impl MeleePhaseState {
    /// Fresh phase over the given engaged spaces.
    #[must_use]
    pub fn new(engagements: impl IntoIterator<Item = Coordinate>) -> Self {
        Self {
            step: MeleeStep::ResolveEngagements,
            remaining_engagements: engagements.into_iter().collect(),
            current_melee_resolution_state: None,
        }
    }

    /// Copy with a different resolution record.
    #[must_use]
    pub fn with_resolution(&self, resolution: Option<MeleeResolutionState>) -> Self {
        Self {
            current_melee_resolution_state: resolution,
            ..self.clone()
        }
    }

    /// Copy at a different step.
    #[must_use]
    pub fn with_step(&self, step: MeleeStep) -> Self {
        Self {
            step,
            ..self.clone()
        }
    }
}
