//! Nested resolution records.
//!
//! A resolution record tracks work in progress on one command, one
//! engagement or one rally. Each carries the acting unit(s), a `completed`
//! flag and optional result fields that stay `None` until the matching game
//! effect has run. Records nest: a ranged hit opens a retreat, a blocked
//! retreat routs the unit, and a rout opens a card discard.
//!
//! ## Lifecycle
//!
//! ```text
//! opened by a player choice or effect
//!   → game effects fill in results (and may open nested records)
//!   → resolved once completed with no unresolved nested record
//!   → cleared from the owning phase
//! ```
//!
//! [`is_resolved`](CommandResolutionState::is_resolved) on every record
//! answers "is there any work left here".

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::board::{Coordinate, Facing};
use crate::cards::CardId;
use crate::core::PlayerSide;
use crate::rules::EngagementAngle;
use crate::units::{UnitInstance, UnitPlacement, UnitWithPlacement};

/// Cards a player must discard because units routed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutDiscardState {
    /// Owner of the routed units.
    pub player: PlayerSide,

    /// Units that routed.
    pub units: Vector<UnitInstance>,

    /// How many cards must be discarded.
    pub cards_to_discard: usize,

    /// Cards discarded, once chosen.
    pub discarded: Option<Vec<CardId>>,

    pub completed: bool,
}

impl RoutDiscardState {
    /// One card per routed unit, capped by the cards left in hand.
    ///
    /// Completes immediately when nothing can be discarded.
    #[must_use]
    pub fn new(player: PlayerSide, units: Vector<UnitInstance>, hand_size: usize) -> Self {
        let cards_to_discard = units.len().min(hand_size);
        Self {
            player,
            units,
            cards_to_discard,
            discarded: (cards_to_discard == 0).then(Vec::new),
            completed: cards_to_discard == 0,
        }
    }

    /// Copy with the discard recorded.
    #[must_use]
    pub fn with_discarded(&self, cards: Vec<CardId>) -> Self {
        Self {
            discarded: Some(cards),
            completed: true,
            ..self.clone()
        }
    }
}

/// Kind of forced one-space move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ForcedMoveKind {
    /// Pushed away in the attacker's facing.
    Retreat,
    /// Pulled back against the attacker's own facing.
    Reverse,
}

/// A retreat or reverse in progress.
///
/// If the destination space is blocked the move fails and the unit routs,
/// which opens a nested [`RoutDiscardState`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForcedMoveState {
    pub kind: ForcedMoveKind,

    /// Unit being moved.
    pub unit: UnitInstance,

    /// Where the unit stands before moving.
    pub from: UnitPlacement,

    /// Direction of travel.
    pub direction: Facing,

    /// Where the unit ended up, if the move succeeded.
    pub final_placement: Option<UnitPlacement>,

    /// The destination was blocked; the unit must rout.
    pub failed: bool,

    /// Discard owed for the rout, once the unit has routed.
    pub rout_discard: Option<RoutDiscardState>,

    pub completed: bool,
}

impl ForcedMoveState {
    /// A pending retreat.
    #[must_use]
    pub fn retreat(unit: UnitInstance, from: UnitPlacement, direction: Facing) -> Self {
        Self::new(ForcedMoveKind::Retreat, unit, from, direction)
    }

    /// A pending reverse.
    #[must_use]
    pub fn reverse(unit: UnitInstance, from: UnitPlacement, direction: Facing) -> Self {
        Self::new(ForcedMoveKind::Reverse, unit, from, direction)
    }

    fn new(kind: ForcedMoveKind, unit: UnitInstance, from: UnitPlacement, direction: Facing) -> Self {
        Self {
            kind,
            unit,
            from,
            direction,
            final_placement: None,
            failed: false,
            rout_discard: None,
            completed: false,
        }
    }

    /// Whether any work remains.
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.completed && self.rout_discard.as_ref().map_or(true, |r| r.completed)
    }
}

/// A unit move ordered by a command.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovementResolutionState {
    pub player: PlayerSide,
    pub unit: UnitInstance,
    pub from: UnitPlacement,
    pub to: UnitPlacement,

    /// Placement after the move.
    pub final_placement: Option<UnitPlacement>,

    /// Set when the move ended on an enemy unit.
    pub engagement: Option<EngagementAngle>,

    pub completed: bool,
}

/// A ranged attack ordered by a command.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangedAttackResolutionState {
    pub player: PlayerSide,
    pub attacker: UnitWithPlacement,
    pub target: UnitInstance,
    pub target_coordinate: Coordinate,

    /// Die result, once rolled.
    pub roll: Option<u8>,

    /// Whether the attack hit, once rolled.
    pub hit: Option<bool>,

    /// Retreat forced on the target by a hit.
    pub retreat: Option<ForcedMoveState>,

    pub completed: bool,
}

/// Work in progress on one command.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "substep", rename_all = "camelCase")]
pub enum CommandResolutionState {
    Movement(MovementResolutionState),
    RangedAttack(RangedAttackResolutionState),
}

impl CommandResolutionState {
    /// Whether any work remains.
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        match self {
            CommandResolutionState::Movement(movement) => movement.completed,
            CommandResolutionState::RangedAttack(ranged) => {
                ranged.completed && ranged.retreat.as_ref().map_or(true, ForcedMoveState::is_resolved)
            }
        }
    }

    /// Whether the record is marked completed, ignoring nested records.
    #[must_use]
    pub fn is_completed(&self) -> bool {
        match self {
            CommandResolutionState::Movement(movement) => movement.completed,
            CommandResolutionState::RangedAttack(ranged) => ranged.completed,
        }
    }

    /// Name used in messages.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            CommandResolutionState::Movement(_) => "movement",
            CommandResolutionState::RangedAttack(_) => "ranged attack",
        }
    }
}

/// Result of a melee roll-off.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MeleeResult {
    /// Totals tied; the units stay engaged.
    Stalemate,
    /// The attacker won by at least the defeat margin.
    DefenderDefeated,
    /// The attacker won narrowly.
    DefenderRetreats,
    /// The defender won.
    AttackerReverses,
}

/// Totals rolled for one melee.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MeleeOutcome {
    pub attacker_total: u16,
    pub defender_total: u16,
    pub result: MeleeResult,
}

/// One engagement being resolved.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeleeResolutionState {
    pub coordinate: Coordinate,

    /// The unit that moved into contact.
    pub attacker: UnitInstance,
    pub attacker_facing: Facing,
    pub defender: UnitInstance,
    pub angle: EngagementAngle,

    pub outcome: Option<MeleeOutcome>,

    /// Retreat of the defender or reverse of the attacker.
    pub forced_move: Option<ForcedMoveState>,

    pub completed: bool,
}

impl MeleeResolutionState {
    /// Whether any work remains.
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.completed && self.forced_move.as_ref().map_or(true, ForcedMoveState::is_resolved)
    }
}

/// A player's rally decision during cleanup.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RallyResolutionState {
    pub player: PlayerSide,
    pub perform_rally: bool,

    /// Units out of command support, once checked.
    pub units_lost_support: Option<Vector<UnitInstance>>,

    /// Discard owed for the routed units.
    pub rout_discard: Option<RoutDiscardState>,

    pub completed: bool,
}

impl RallyResolutionState {
    /// A freshly chosen rally.
    #[must_use]
    pub fn new(player: PlayerSide, perform_rally: bool) -> Self {
        Self {
            player,
            perform_rally,
            units_lost_support: None,
            rout_discard: None,
            completed: false,
        }
    }

    /// Whether any work remains.
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.completed && self.rout_discard.as_ref().map_or(true, |r| r.completed)
    }
}
