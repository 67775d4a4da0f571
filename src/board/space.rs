//! Board spaces and unit presence.
//!
//! A `BoardSpace` holds terrain data (read by legality checks) plus what is
//! currently standing on it: a [`UnitPresence`] and the set of commander
//! sides present. Commanders are tracked per space and are never part of
//! unit presence.
//!
//! Spaces are values. Entering, leaving or engaging on a space produces a
//! new `BoardSpace` rather than editing the old one.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::facing::Facing;
use crate::core::{BoardError, InvariantViolation, PlayerSide};
use crate::rules::EngagementAngle;
use crate::units::UnitInstance;

/// Highest elevation a corner may have.
pub const MAX_ELEVATION: u8 = 5;

/// Terrain type of a space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Terrain {
    #[default]
    Plain,
    Forest,
    Hill,
    Road,
    Water,
}

impl Terrain {
    /// Whether units may enter or cross this terrain at all.
    #[must_use]
    pub const fn is_passable(self) -> bool {
        !matches!(self, Terrain::Water)
    }
}

/// What units occupy a space.
///
/// A space never holds more than two units, and two units are only ever
/// together as an engagement between opposing sides.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum UnitPresence {
    /// Empty.
    #[default]
    None,

    /// One unit and its facing.
    Single { unit: UnitInstance, facing: Facing },

    /// Two opposing units in melee. The secondary implicitly faces opposite
    /// the primary. `angle` is how the primary made contact.
    Engaged {
        primary: UnitInstance,
        primary_facing: Facing,
        secondary: UnitInstance,
        angle: EngagementAngle,
    },
}

impl UnitPresence {
    /// A single unit.
    #[must_use]
    pub fn single(unit: UnitInstance, facing: Facing) -> Self {
        UnitPresence::Single { unit, facing }
    }

    /// An engaged pair, rejecting two units of the same side.
    pub fn engaged(
        primary: UnitInstance,
        primary_facing: Facing,
        secondary: UnitInstance,
        angle: EngagementAngle,
    ) -> Result<Self, InvariantViolation> {
        if primary.side == secondary.side {
            return Err(InvariantViolation::SameSideEngagement(primary, secondary));
        }
        Ok(UnitPresence::Engaged {
            primary,
            primary_facing,
            secondary,
            angle,
        })
    }

    /// Check if empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, UnitPresence::None)
    }

    /// Check if two units are engaged here.
    #[must_use]
    pub fn is_engaged(&self) -> bool {
        matches!(self, UnitPresence::Engaged { .. })
    }

    /// Units present (0, 1 or 2).
    #[must_use]
    pub fn units(&self) -> SmallVec<[UnitInstance; 2]> {
        match self {
            UnitPresence::None => SmallVec::new(),
            UnitPresence::Single { unit, .. } => smallvec::smallvec![*unit],
            UnitPresence::Engaged {
                primary, secondary, ..
            } => smallvec::smallvec![*primary, *secondary],
        }
    }

    /// Whether this unit is present.
    #[must_use]
    pub fn contains(&self, unit: &UnitInstance) -> bool {
        self.units().iter().any(|u| u == unit)
    }

    /// The facing of a present unit.
    #[must_use]
    pub fn facing_of(&self, unit: &UnitInstance) -> Option<Facing> {
        match self {
            UnitPresence::None => None,
            UnitPresence::Single { unit: u, facing } => (u == unit).then_some(*facing),
            UnitPresence::Engaged {
                primary,
                primary_facing,
                secondary,
                ..
            } => {
                if primary == unit {
                    Some(*primary_facing)
                } else if secondary == unit {
                    Some(primary_facing.opposite())
                } else {
                    None
                }
            }
        }
    }
}

/// One space of the board.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoardSpace {
    /// Terrain type.
    pub terrain: Terrain,

    /// Elevation at each corner (NW, NE, SE, SW), 0..=5.
    pub elevation: [u8; 4],

    /// Units standing here.
    pub presence: UnitPresence,

    /// Sides whose commander stands here.
    pub commanders: SmallVec<[PlayerSide; 2]>,
}

impl BoardSpace {
    /// Empty plain space at elevation 0.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the terrain.
    #[must_use]
    pub fn with_terrain(mut self, terrain: Terrain) -> Self {
        self.terrain = terrain;
        self
    }

    /// Set the corner elevations, each 0..=[`MAX_ELEVATION`].
    pub fn with_elevation(mut self, elevation: [u8; 4]) -> Result<Self, BoardError> {
        if elevation.iter().any(|e| *e > MAX_ELEVATION) {
            return Err(BoardError::ElevationOutOfRange {
                elevation,
                max: MAX_ELEVATION,
            });
        }
        self.elevation = elevation;
        Ok(self)
    }

    /// Copy of this space with different presence.
    #[must_use]
    pub fn with_presence(&self, presence: UnitPresence) -> Self {
        Self {
            presence,
            ..self.clone()
        }
    }

    /// Whether a side's commander is here.
    #[must_use]
    pub fn has_commander(&self, side: PlayerSide) -> bool {
        self.commanders.contains(&side)
    }

    /// Copy of this space with a commander added.
    #[must_use]
    pub fn with_commander(&self, side: PlayerSide) -> Self {
        let mut next = self.clone();
        if !next.commanders.contains(&side) {
            next.commanders.push(side);
        }
        next
    }

    /// Copy of this space with a commander removed.
    #[must_use]
    pub fn without_commander(&self, side: PlayerSide) -> Self {
        let mut next = self.clone();
        next.commanders.retain(|s| *s != side);
        next
    }
}
