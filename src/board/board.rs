//! The board: a closed mapping from every coordinate to one space.
//!
//! Spaces are stored row-major in an `im::Vector`, so every coordinate of
//! the shape has exactly one space and none can be missing or duplicated.
//! Replacing a space returns a new `Board` sharing all other spaces with the
//! old one.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::coordinate::{BoardGeometry, BoardShape, Coordinate};
use super::facing::Facing;
use super::space::{BoardSpace, Terrain, UnitPresence};
use crate::core::PlayerSide;
use crate::units::{UnitInstance, UnitPlacement, UnitWithPlacement};

/// Board state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    shape: BoardShape,
    spaces: Vector<BoardSpace>,
}

impl Board {
    /// Create a board of empty plain spaces.
    #[must_use]
    pub fn new(shape: BoardShape) -> Self {
        Self {
            shape,
            spaces: (0..shape.space_count()).map(|_| BoardSpace::new()).collect(),
        }
    }

    /// Board dimensions.
    #[must_use]
    pub fn shape(&self) -> BoardShape {
        self.shape
    }

    /// Look up a space. `None` if the coordinate is off the board.
    #[must_use]
    pub fn space(&self, coordinate: Coordinate) -> Option<&BoardSpace> {
        self.shape.index_of(coordinate).and_then(|i| self.spaces.get(i))
    }

    /// Copy of the board with one space replaced.
    ///
    /// Off-board coordinates leave the board unchanged.
    #[must_use]
    pub fn with_space(&self, coordinate: Coordinate, space: BoardSpace) -> Self {
        match self.shape.index_of(coordinate) {
            Some(i) => Self {
                shape: self.shape,
                spaces: self.spaces.update(i, space),
            },
            None => self.clone(),
        }
    }

    /// Copy of the board with one space's presence replaced.
    #[must_use]
    pub fn with_presence(&self, coordinate: Coordinate, presence: UnitPresence) -> Self {
        match self.space(coordinate) {
            Some(space) => self.with_space(coordinate, space.with_presence(presence)),
            None => self.clone(),
        }
    }

    /// Copy of the board with one space's terrain replaced.
    #[must_use]
    pub fn with_terrain(&self, coordinate: Coordinate, terrain: Terrain) -> Self {
        match self.space(coordinate) {
            Some(space) => self.with_space(coordinate, space.clone().with_terrain(terrain)),
            None => self.clone(),
        }
    }

    /// Presence at a coordinate (empty for off-board coordinates).
    #[must_use]
    pub fn presence(&self, coordinate: Coordinate) -> UnitPresence {
        self.space(coordinate)
            .map(|s| s.presence.clone())
            .unwrap_or_default()
    }

    /// Iterate over (coordinate, space) pairs, row-major.
    pub fn spaces(&self) -> impl Iterator<Item = (Coordinate, &BoardSpace)> {
        self.shape.coordinates().into_iter().zip(self.spaces.iter())
    }

    /// Where a unit stands and which way it faces.
    #[must_use]
    pub fn placement_of(&self, unit: &UnitInstance) -> Option<UnitPlacement> {
        self.spaces().find_map(|(coordinate, space)| {
            space
                .presence
                .facing_of(unit)
                .map(|facing| UnitPlacement::new(coordinate, facing))
        })
    }

    /// Every unit on the board with its placement.
    #[must_use]
    pub fn units(&self) -> Vec<UnitWithPlacement> {
        self.spaces()
            .flat_map(|(coordinate, space)| {
                space.presence.units().into_iter().filter_map(move |unit| {
                    space
                        .presence
                        .facing_of(&unit)
                        .map(|facing| UnitWithPlacement::new(unit, UnitPlacement::new(coordinate, facing)))
                })
            })
            .collect()
    }

    /// Every unit of one side on the board.
    #[must_use]
    pub fn units_of(&self, side: PlayerSide) -> Vec<UnitWithPlacement> {
        self.units().into_iter().filter(|u| u.unit.side == side).collect()
    }

    /// Coordinates holding an engaged pair, in coordinate order.
    #[must_use]
    pub fn engaged_spaces(&self) -> Vec<Coordinate> {
        let mut engaged: Vec<Coordinate> = self
            .spaces()
            .filter(|(_, space)| space.presence.is_engaged())
            .map(|(coordinate, _)| coordinate)
            .collect();
        engaged.sort();
        engaged
    }

    /// Where a side's commander stands.
    #[must_use]
    pub fn commander_position(&self, side: PlayerSide) -> Option<Coordinate> {
        self.spaces()
            .find(|(_, space)| space.has_commander(side))
            .map(|(coordinate, _)| coordinate)
    }

    /// Copy of the board with a single unit placed on an empty space.
    #[must_use]
    pub fn with_unit(&self, unit: UnitInstance, coordinate: Coordinate, facing: Facing) -> Self {
        self.with_presence(coordinate, UnitPresence::single(unit, facing))
    }

    /// Copy of the board with a unit taken off its space.
    ///
    /// If the unit was engaged, its opponent stays behind as a single unit
    /// keeping its facing. `None` if the unit is not on the board.
    #[must_use]
    pub fn without_unit(&self, unit: &UnitInstance) -> Option<Self> {
        let placement = self.placement_of(unit)?;
        let remaining = match self.presence(placement.coordinate) {
            UnitPresence::Engaged {
                primary,
                primary_facing,
                secondary,
                ..
            } => {
                if primary == *unit {
                    UnitPresence::single(secondary, primary_facing.opposite())
                } else {
                    UnitPresence::single(primary, primary_facing)
                }
            }
            _ => UnitPresence::None,
        };
        Some(self.with_presence(placement.coordinate, remaining))
    }

    /// Copy of the board with a commander moved (or placed, if `from` is `None`).
    #[must_use]
    pub fn with_commander_moved(&self, side: PlayerSide, from: Option<Coordinate>, to: Coordinate) -> Self {
        let cleared = match from.and_then(|f| self.space(f).map(|s| (f, s.without_commander(side)))) {
            Some((f, space)) => self.with_space(f, space),
            None => self.clone(),
        };
        match cleared.space(to) {
            Some(space) => {
                let placed = space.with_commander(side);
                cleared.with_space(to, placed)
            }
            None => cleared,
        }
    }
}

impl BoardGeometry for Board {
    fn rows(&self) -> u8 {
        self.shape.rows()
    }

    fn columns(&self) -> u8 {
        self.shape.columns()
    }
}
