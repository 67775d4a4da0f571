//! Inbound command surface.
//!
//! Transports deliver [`PlayerCommand`]s that have already passed shape
//! validation. This module turns them into engine [`Event`]s; game-rule
//! legality is left to the `Session`.
//!
//! Setup arrives one unit at a time (`setupUnit`) but is applied as a
//! single `setupUnits` choice, so [`setup_event`] groups a player's
//! `setupUnit` commands together with their commander's starting space.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::board::{Coordinate, Facing};
use crate::cards::CardId;
use crate::core::PlayerSide;
use crate::events::{Event, PlayerChoice};
use crate::units::{UnitInstance, UnitPlacement, UnitWithPlacement};

/// A command as received from a player.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "commandType", rename_all = "camelCase")]
pub enum PlayerCommand {
    ChooseCard {
        player: PlayerSide,
        card: CardId,
    },

    #[serde(rename_all = "camelCase")]
    ChooseRally {
        player: PlayerSide,
        perform_rally: bool,
    },

    MoveCommander {
        player: PlayerSide,
        from: Coordinate,
        to: Coordinate,
    },

    /// Deploy one unit. Without a facing the unit faces the enemy edge.
    SetupUnit {
        player: PlayerSide,
        unit: UnitInstance,
        space: Coordinate,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        facing: Option<Facing>,
    },

    MoveUnit {
        player: PlayerSide,
        unit: UnitInstance,
        from: UnitPlacement,
        to: UnitPlacement,
    },
}

/// Why a command could not be turned into an event.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("setupUnit commands must be grouped with setup_event")]
    UngroupedSetup,

    #[error("{0} is not a setupUnit command")]
    NotSetup(&'static str),

    #[error("setupUnit for {found} grouped with {expected}'s deployment")]
    MixedPlayers { expected: PlayerSide, found: PlayerSide },

    #[error("no setupUnit commands to group")]
    EmptySetup,
}

/// Facing a deployed unit takes when none is given: toward the enemy edge.
#[must_use]
pub fn default_facing(side: PlayerSide) -> Facing {
    match side {
        PlayerSide::One => Facing::South,
        PlayerSide::Two => Facing::North,
    }
}

impl PlayerCommand {
    /// Wire name of the command.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            PlayerCommand::ChooseCard { .. } => "chooseCard",
            PlayerCommand::ChooseRally { .. } => "chooseRally",
            PlayerCommand::MoveCommander { .. } => "moveCommander",
            PlayerCommand::SetupUnit { .. } => "setupUnit",
            PlayerCommand::MoveUnit { .. } => "moveUnit",
        }
    }

    /// The issuing player.
    #[must_use]
    pub fn player(&self) -> PlayerSide {
        match self {
            PlayerCommand::ChooseCard { player, .. }
            | PlayerCommand::ChooseRally { player, .. }
            | PlayerCommand::MoveCommander { player, .. }
            | PlayerCommand::SetupUnit { player, .. }
            | PlayerCommand::MoveUnit { player, .. } => *player,
        }
    }

    /// Translate a command that maps onto exactly one event.
    pub fn into_event(self) -> Result<Event, ProtocolError> {
        let choice = match self {
            PlayerCommand::ChooseCard { player, card } => PlayerChoice::ChooseCard { player, card },
            PlayerCommand::ChooseRally { player, perform_rally } => {
                PlayerChoice::ChooseRally { player, perform_rally }
            }
            PlayerCommand::MoveCommander { player, from, to } => PlayerChoice::MoveCommander { player, from, to },
            PlayerCommand::MoveUnit { player, unit, from, to } => PlayerChoice::MoveUnit { player, unit, from, to },
            PlayerCommand::SetupUnit { .. } => return Err(ProtocolError::UngroupedSetup),
        };
        Ok(choice.into())
    }
}

/// Group one player's `setupUnit` commands into a single setup event.
pub fn setup_event<'a>(
    player: PlayerSide,
    commands: impl IntoIterator<Item = &'a PlayerCommand>,
    commander: Coordinate,
) -> Result<Event, ProtocolError> {
    let mut placements = Vec::new();
    for command in commands {
        let PlayerCommand::SetupUnit {
            player: found,
            unit,
            space,
            facing,
        } = command
        else {
            return Err(ProtocolError::NotSetup(command.name()));
        };
        if *found != player {
            return Err(ProtocolError::MixedPlayers {
                expected: player,
                found: *found,
            });
        }
        let facing = facing.unwrap_or_else(|| default_facing(player));
        placements.push(UnitWithPlacement::new(*unit, UnitPlacement::new(*space, facing)));
    }
    if placements.is_empty() {
        return Err(ProtocolError::EmptySetup);
    }
    Ok(PlayerChoice::SetupUnits {
        player,
        placements,
        commander,
    }
    .into())
}
