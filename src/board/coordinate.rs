//! Coordinates and board dimensions.
//!
//! A `Coordinate` is a row + column address. Its text form is
//! `"<RowLetter>-<ColumnNumber>"`: rows are lettered from `A` at the north
//! edge, columns are numbered from `1` at the west edge. The text form is
//! also the serialized form.
//!
//! Board size is a capability, not a type parameter: anything implementing
//! [`BoardGeometry`] answers bounds queries, and every spatial query in
//! [`geometry`](super::geometry) is generic over it.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::facing::Facing;
use crate::core::BoardError;

/// Largest supported row count (one letter per row).
pub const MAX_ROWS: u8 = 26;

/// A space address. Row and column are 0-based internally.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Coordinate {
    row: u8,
    column: u8,
}

/// Error parsing a coordinate's text form.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum CoordinateParseError {
    #[error("coordinate {0:?} is not of the form <RowLetter>-<ColumnNumber>")]
    Malformed(String),

    #[error("row letter {0:?} is not A-Z")]
    InvalidRow(String),

    #[error("column {0:?} is not a number from 1")]
    InvalidColumn(String),
}

impl Coordinate {
    /// Create a coordinate from 0-based row and column indices.
    #[must_use]
    pub const fn new(row: u8, column: u8) -> Self {
        Self { row, column }
    }

    /// 0-based row index.
    #[must_use]
    pub const fn row(self) -> u8 {
        self.row
    }

    /// 0-based column index.
    #[must_use]
    pub const fn column(self) -> u8 {
        self.column
    }

    /// Row letter of the text form, if the row has one.
    #[must_use]
    pub fn row_letter(self) -> Option<char> {
        (self.row < MAX_ROWS).then(|| char::from(b'A' + self.row))
    }

    /// Offset by a facing's delta without bounds checks beyond `u8` range.
    #[must_use]
    pub(crate) fn step(self, facing: Facing) -> Option<Coordinate> {
        let (dr, dc) = facing.delta();
        let row = self.row.checked_add_signed(dr)?;
        let column = self.column.checked_add_signed(dc)?;
        Some(Coordinate { row, column })
    }

    /// Chebyshev distance (king moves) between two coordinates.
    #[must_use]
    pub fn distance(self, other: Coordinate) -> u8 {
        self.row.abs_diff(other.row).max(self.column.abs_diff(other.column))
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.row_letter().unwrap_or('?'), self.column as u16 + 1)
    }
}

impl std::str::FromStr for Coordinate {
    type Err = CoordinateParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (row, column) = s
            .split_once('-')
            .ok_or_else(|| CoordinateParseError::Malformed(s.to_string()))?;

        let mut letters = row.chars();
        let row = match (letters.next(), letters.next()) {
            (Some(c), None) if c.is_ascii_uppercase() => c as u8 - b'A',
            _ => return Err(CoordinateParseError::InvalidRow(row.to_string())),
        };

        let column: u8 = column
            .parse()
            .ok()
            .filter(|c| *c >= 1)
            .ok_or_else(|| CoordinateParseError::InvalidColumn(column.to_string()))?;

        Ok(Coordinate::new(row, column - 1))
    }
}

impl TryFrom<String> for Coordinate {
    type Error = CoordinateParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Coordinate> for String {
    fn from(value: Coordinate) -> Self {
        value.to_string()
    }
}

/// Bounds capability of a board.
pub trait BoardGeometry {
    /// Number of rows.
    fn rows(&self) -> u8;

    /// Number of columns.
    fn columns(&self) -> u8;

    /// Whether the coordinate lies on the board.
    fn contains(&self, coordinate: Coordinate) -> bool {
        coordinate.row() < self.rows() && coordinate.column() < self.columns()
    }

    /// Number of spaces.
    fn space_count(&self) -> usize {
        self.rows() as usize * self.columns() as usize
    }

    /// Every coordinate on the board, row-major.
    fn coordinates(&self) -> Vec<Coordinate> {
        let columns = self.columns();
        (0..self.rows())
            .flat_map(|row| (0..columns).map(move |column| Coordinate::new(row, column)))
            .collect()
    }

    /// Row-major index of an on-board coordinate.
    fn index_of(&self, coordinate: Coordinate) -> Option<usize> {
        self.contains(coordinate)
            .then(|| coordinate.row() as usize * self.columns() as usize + coordinate.column() as usize)
    }
}

/// Concrete board dimensions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoardShape {
    rows: u8,
    columns: u8,
}

impl BoardShape {
    /// The standard 12 × 18 board.
    pub const STANDARD: BoardShape = BoardShape {
        rows: 12,
        columns: 18,
    };

    /// Create a board shape. Every row needs a letter, so at most
    /// [`MAX_ROWS`] rows are allowed.
    pub fn new(rows: u8, columns: u8) -> Result<Self, BoardError> {
        if rows == 0 || columns == 0 {
            return Err(BoardError::Empty { rows, columns });
        }
        if rows > MAX_ROWS {
            return Err(BoardError::TooManyRows { rows, max: MAX_ROWS });
        }
        Ok(Self { rows, columns })
    }
}

impl BoardGeometry for BoardShape {
    fn rows(&self) -> u8 {
        self.rows
    }

    fn columns(&self) -> u8 {
        self.columns
    }
}
