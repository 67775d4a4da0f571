//! Board geometry engine.
//!
//! - `facing`: the 8-direction facing algebra
//! - `coordinate`: addresses, their `"E-5"` text form, board bounds
//! - `geometry`: spatial queries derived from the forward-space primitive
//! - `space`: terrain, elevation, unit presence and commanders per space
//! - `board`: the closed coordinate → space mapping

pub mod board;
pub mod coordinate;
pub mod facing;
pub mod geometry;
pub mod space;

pub use board::Board;
pub use coordinate::{BoardGeometry, BoardShape, Coordinate, CoordinateParseError, MAX_ROWS};
pub use facing::{Facing, FacingParseError};
pub use geometry::{
    adjacent_spaces, back_spaces, flanking_spaces, forward_space, front_spaces, inline_spaces,
    spaces_ahead, spaces_behind, spaces_in_arc, spaces_within_distance, Neighbours,
};
pub use space::{BoardSpace, Terrain, UnitPresence, MAX_ELEVATION};
