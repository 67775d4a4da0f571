//! Issue-commands phase.
//!
//! Each player works through the commands on their in-play card, initiative
//! holder first. Commands are consumed one activation at a time; the command
//! being carried out is tracked in `current_command_resolution_state`.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::resolution::CommandResolutionState;
use super::step::phase_steps;
use crate::cards::Command;

phase_steps! {
    /// Steps of the issue-commands phase.
    pub enum IssueCommandsStep {
        FirstPlayerIssueCommands => "firstPlayerIssueCommands",
        SecondPlayerIssueCommands => "secondPlayerIssueCommands",
        Complete => "complete",
    }
}

/// Issue-commands phase sub-state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueCommandsPhaseState {
    pub step: IssueCommandsStep,

    /// Commands left to the initiative holder.
    pub first_player_commands: Vector<Command>,

    /// Commands left to the other player.
    pub second_player_commands: Vector<Command>,

    /// Command currently being carried out.
    pub current_command_resolution_state: Option<CommandResolutionState>,
}

impl IssueCommandsPhaseState {
    /// Fresh phase with each player's commands.
    #[must_use]
    pub fn new(first_player_commands: Vector<Command>, second_player_commands: Vector<Command>) -> Self {
        Self {
            step: IssueCommandsStep::FirstPlayerIssueCommands,
            first_player_commands,
            second_player_commands,
            current_command_resolution_state: None,
        }
    }

    /// Commands left to whoever is issuing at `step`.
    #[must_use]
    pub fn remaining_commands(&self) -> &Vector<Command> {
        match self.step {
            IssueCommandsStep::SecondPlayerIssueCommands => &self.second_player_commands,
            _ => &self.first_player_commands,
        }
    }

    /// Whether the issuing player still has an activation left.
    #[must_use]
    pub fn has_activations(&self) -> bool {
        self.remaining_commands().iter().any(|c| c.quantity > 0)
    }

    /// Copy with the issuing player's commands replaced.
    #[must_use]
    pub fn with_remaining_commands(&self, commands: Vector<Command>) -> Self {
        let mut next = self.clone();
        match self.step {
            IssueCommandsStep::SecondPlayerIssueCommands => next.second_player_commands = commands,
            _ => next.first_player_commands = commands,
        }
        next
    }

    /// Copy with a different resolution record.
    #[must_use]
    pub fn with_resolution(&self, resolution: Option<CommandResolutionState>) -> Self {
        Self {
            current_command_resolution_state: resolution,
            ..self.clone()
        }
    }

    /// Copy at a different step.
    #[must_use]
    pub fn with_step(&self, step: IssueCommandsStep) -> Self {
        Self {
            step,
            ..self.clone()
        }
    }
}
