//! Event types.
//!
//! Every change to a `GameState` arrives as an [`Event`]:
//!
//! - [`PlayerChoice`]: a decision made by a player. It must match what the
//!   expected-event oracle asks for and pass the legality checks.
//! - [`GameEffect`]: a deterministic consequence the engine fires itself.
//!   It carries nothing but what identifies the effect.

use serde::{Deserialize, Serialize};

use crate::board::Coordinate;
use crate::cards::CardId;
use crate::core::PlayerSide;
use crate::units::{UnitInstance, UnitPlacement, UnitWithPlacement};

/// Any event accepted by the engine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "eventType", rename_all = "camelCase")]
pub enum Event {
    PlayerChoice(PlayerChoice),
    GameEffect(GameEffect),
}

impl From<PlayerChoice> for Event {
    fn from(choice: PlayerChoice) -> Self {
        Event::PlayerChoice(choice)
    }
}

impl From<GameEffect> for Event {
    fn from(effect: GameEffect) -> Self {
        Event::GameEffect(effect)
    }
}

/// A player's decision.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "choiceType", rename_all = "camelCase")]
pub enum PlayerChoice {
    /// Deploy units from reserve and place the commander.
    #[serde(rename_all = "camelCase")]
    SetupUnits {
        player: PlayerSide,
        placements: Vec<UnitWithPlacement>,
        commander: Coordinate,
    },

    /// Secretly choose this round's card.
    ChooseCard { player: PlayerSide, card: CardId },

    /// Move the commander.
    MoveCommander {
        player: PlayerSide,
        from: Coordinate,
        to: Coordinate,
    },

    /// Order a unit to move.
    MoveUnit {
        player: PlayerSide,
        unit: UnitInstance,
        from: UnitPlacement,
        to: UnitPlacement,
    },

    /// Order a unit to shoot at the unit on `target`.
    PerformRangedAttack {
        player: PlayerSide,
        unit: UnitInstance,
        target: Coordinate,
    },

    /// Stop issuing commands this round.
    EndCommands { player: PlayerSide },

    /// Decide whether to rally.
    #[serde(rename_all = "camelCase")]
    ChooseRally { player: PlayerSide, perform_rally: bool },

    /// Cards to discard for routed units.
    ChooseRoutDiscard { player: PlayerSide, cards: Vec<CardId> },
}

/// Discriminant of a [`PlayerChoice`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PlayerChoiceKind {
    SetupUnits,
    ChooseCard,
    MoveCommander,
    MoveUnit,
    PerformRangedAttack,
    EndCommands,
    ChooseRally,
    ChooseRoutDiscard,
}

impl PlayerChoice {
    /// The choosing player.
    #[must_use]
    pub fn player(&self) -> PlayerSide {
        match self {
            PlayerChoice::SetupUnits { player, .. }
            | PlayerChoice::ChooseCard { player, .. }
            | PlayerChoice::MoveCommander { player, .. }
            | PlayerChoice::MoveUnit { player, .. }
            | PlayerChoice::PerformRangedAttack { player, .. }
            | PlayerChoice::EndCommands { player }
            | PlayerChoice::ChooseRally { player, .. }
            | PlayerChoice::ChooseRoutDiscard { player, .. } => *player,
        }
    }

    /// Which kind of choice this is.
    #[must_use]
    pub fn kind(&self) -> PlayerChoiceKind {
        match self {
            PlayerChoice::SetupUnits { .. } => PlayerChoiceKind::SetupUnits,
            PlayerChoice::ChooseCard { .. } => PlayerChoiceKind::ChooseCard,
            PlayerChoice::MoveCommander { .. } => PlayerChoiceKind::MoveCommander,
            PlayerChoice::MoveUnit { .. } => PlayerChoiceKind::MoveUnit,
            PlayerChoice::PerformRangedAttack { .. } => PlayerChoiceKind::PerformRangedAttack,
            PlayerChoice::EndCommands { .. } => PlayerChoiceKind::EndCommands,
            PlayerChoice::ChooseRally { .. } => PlayerChoiceKind::ChooseRally,
            PlayerChoice::ChooseRoutDiscard { .. } => PlayerChoiceKind::ChooseRoutDiscard,
        }
    }
}

/// A deterministic consequence fired by the engine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "effectType", rename_all = "camelCase")]
pub enum GameEffect {
    /// The current phase reached `complete`; move to the next one.
    CompletePhase,
    /// Both cards are chosen; reveal them and settle initiative.
    RevealCards,
    /// The player's commander is lost and cannot move.
    SkipCommanderMove { player: PlayerSide },
    /// Carry out the pending unit move.
    CompleteUnitMovement,
    /// Roll the pending ranged attack.
    CompleteRangedAttack,
    /// Roll the melee on this engaged space.
    ResolveMelee { coordinate: Coordinate },
    /// Carry out the pending retreat.
    CompleteRetreat,
    /// Carry out the pending reverse.
    CompleteReverse,
    /// Remove units whose forced move failed or who lost support.
    RoutUnits,
    /// No engagements remain.
    EndMelee,
    /// Move in-play cards to the discard piles.
    DiscardPlayedCards,
    /// Carry out the player's rally decision.
    ResolveRally { player: PlayerSide },
}

impl GameEffect {
    /// Name used in messages and logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            GameEffect::CompletePhase => "completePhase",
            GameEffect::RevealCards => "revealCards",
            GameEffect::SkipCommanderMove { .. } => "skipCommanderMove",
            GameEffect::CompleteUnitMovement => "completeUnitMovement",
            GameEffect::CompleteRangedAttack => "completeRangedAttack",
            GameEffect::ResolveMelee { .. } => "resolveMelee",
            GameEffect::CompleteRetreat => "completeRetreat",
            GameEffect::CompleteReverse => "completeReverse",
            GameEffect::RoutUnits => "routUnits",
            GameEffect::EndMelee => "endMelee",
            GameEffect::DiscardPlayedCards => "discardPlayedCards",
            GameEffect::ResolveRally { .. } => "resolveRally",
        }
    }
}
