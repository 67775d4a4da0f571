//! Facing algebra over the eight compass directions.
//!
//! Facings are ordered clockwise starting at north, so rotation is modular
//! arithmetic on the discriminant: 45° is one step, 90° two, 180° four.
//! Orthogonal facings (N/E/S/W) and diagonal facings (NE/SE/SW/NW) are
//! disjoint and together cover all eight.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One of the eight directions a unit can face.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Facing {
    #[serde(rename = "N")]
    North,
    #[serde(rename = "NE")]
    NorthEast,
    #[serde(rename = "E")]
    East,
    #[serde(rename = "SE")]
    SouthEast,
    #[serde(rename = "S")]
    South,
    #[serde(rename = "SW")]
    SouthWest,
    #[serde(rename = "W")]
    West,
    #[serde(rename = "NW")]
    NorthWest,
}

/// Error parsing a facing from text or an index.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
#[error("invalid facing: {0}")]
pub struct FacingParseError(pub String);

impl Facing {
    /// All facings, clockwise from north.
    pub const ALL: [Facing; 8] = [
        Facing::North,
        Facing::NorthEast,
        Facing::East,
        Facing::SouthEast,
        Facing::South,
        Facing::SouthWest,
        Facing::West,
        Facing::NorthWest,
    ];

    /// The four orthogonal facings.
    pub const ORTHOGONAL: [Facing; 4] = [Facing::North, Facing::East, Facing::South, Facing::West];

    /// The four diagonal facings.
    pub const DIAGONAL: [Facing; 4] = [
        Facing::NorthEast,
        Facing::SouthEast,
        Facing::SouthWest,
        Facing::NorthWest,
    ];

    /// Clockwise index, north = 0.
    #[must_use]
    pub const fn index(self) -> u8 {
        self as u8
    }

    fn rotate(self, steps: u8) -> Facing {
        Facing::ALL[((self.index() + steps) % 8) as usize]
    }

    /// Row and column deltas for one step in this direction.
    ///
    /// North decreases the row, east increases the column.
    #[must_use]
    pub const fn delta(self) -> (i8, i8) {
        match self {
            Facing::North => (-1, 0),
            Facing::NorthEast => (-1, 1),
            Facing::East => (0, 1),
            Facing::SouthEast => (1, 1),
            Facing::South => (1, 0),
            Facing::SouthWest => (1, -1),
            Facing::West => (0, -1),
            Facing::NorthWest => (-1, -1),
        }
    }

    /// Whether this is one of N/E/S/W.
    #[must_use]
    pub const fn is_orthogonal(self) -> bool {
        self.index() % 2 == 0
    }

    /// Whether this is one of NE/SE/SW/NW.
    #[must_use]
    pub const fn is_diagonal(self) -> bool {
        !self.is_orthogonal()
    }

    /// The facing rotated 180°.
    #[must_use]
    pub fn opposite(self) -> Facing {
        self.rotate(4)
    }

    /// The facing rotated 90° counter-clockwise.
    #[must_use]
    pub fn left_of(self) -> Facing {
        self.rotate(6)
    }

    /// The facing rotated 90° clockwise.
    #[must_use]
    pub fn right_of(self) -> Facing {
        self.rotate(2)
    }

    /// The two facings 45° away (counter-clockwise first).
    #[must_use]
    pub fn adjacent_facings(self) -> [Facing; 2] {
        [self.rotate(7), self.rotate(1)]
    }

    /// The two facings 90° away (counter-clockwise first).
    #[must_use]
    pub fn orthogonal_facings(self) -> [Facing; 2] {
        [self.left_of(), self.right_of()]
    }

    /// Short compass abbreviation.
    #[must_use]
    pub const fn abbreviation(self) -> &'static str {
        match self {
            Facing::North => "N",
            Facing::NorthEast => "NE",
            Facing::East => "E",
            Facing::SouthEast => "SE",
            Facing::South => "S",
            Facing::SouthWest => "SW",
            Facing::West => "W",
            Facing::NorthWest => "NW",
        }
    }
}

impl std::fmt::Display for Facing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.abbreviation())
    }
}

impl std::str::FromStr for Facing {
    type Err = FacingParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Facing::ALL
            .into_iter()
            .find(|f| f.abbreviation().eq_ignore_ascii_case(s))
            .ok_or_else(|| FacingParseError(s.to_string()))
    }
}

impl TryFrom<u8> for Facing {
    type Error = FacingParseError;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        Facing::ALL
            .get(index as usize)
            .copied()
            .ok_or_else(|| FacingParseError(index.to_string()))
    }
}
