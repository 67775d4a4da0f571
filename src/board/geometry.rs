//! Derived spatial queries.
//!
//! Every query is built from one primitive, [`forward_space`]: the space one
//! step from a coordinate in a facing, or `None` when that step leaves the
//! board. Higher-level queries compose it and drop the `None`s.
//!
//! All functions are pure and depend only on board bounds, so results can be
//! cached per board shape by callers that need to.

use std::collections::BTreeSet;

use rustc_hash::FxHashSet;
use smallvec::SmallVec;

use super::coordinate::{BoardGeometry, Coordinate};
use super::facing::Facing;

/// Up to eight neighbouring spaces.
pub type Neighbours = SmallVec<[Coordinate; 8]>;

/// The space one step from `coordinate` in `facing`, if on the board.
///
/// Orthogonal facings change exactly one of row/column; diagonal facings
/// change both.
pub fn forward_space<G>(board: &G, coordinate: Coordinate, facing: Facing) -> Option<Coordinate>
where
    G: BoardGeometry + ?Sized,
{
    coordinate.step(facing).filter(|c| board.contains(*c))
}

fn step_all<G>(board: &G, coordinate: Coordinate, facings: &[Facing]) -> Neighbours
where
    G: BoardGeometry + ?Sized,
{
    facings
        .iter()
        .filter_map(|f| forward_space(board, coordinate, *f))
        .collect()
}

/// All on-board neighbours (up to 8).
pub fn adjacent_spaces<G>(board: &G, coordinate: Coordinate) -> Neighbours
where
    G: BoardGeometry + ?Sized,
{
    step_all(board, coordinate, &Facing::ALL)
}

/// The space ahead plus the two spaces 45° either side of it.
pub fn front_spaces<G>(board: &G, coordinate: Coordinate, facing: Facing) -> Neighbours
where
    G: BoardGeometry + ?Sized,
{
    let [left, right] = facing.adjacent_facings();
    step_all(board, coordinate, &[left, facing, right])
}

/// The three spaces behind: the front spaces of the opposite facing.
pub fn back_spaces<G>(board: &G, coordinate: Coordinate, facing: Facing) -> Neighbours
where
    G: BoardGeometry + ?Sized,
{
    front_spaces(board, coordinate, facing.opposite())
}

/// The two spaces 90° either side.
pub fn flanking_spaces<G>(board: &G, coordinate: Coordinate, facing: Facing) -> Neighbours
where
    G: BoardGeometry + ?Sized,
{
    step_all(board, coordinate, &facing.orthogonal_facings())
}

fn ray<G>(board: &G, from: Coordinate, facing: Facing, out: &mut BTreeSet<Coordinate>)
where
    G: BoardGeometry + ?Sized,
{
    let mut current = from;
    while let Some(next) = forward_space(board, current, facing) {
        out.insert(next);
        current = next;
    }
}

/// The unbroken line through `coordinate` perpendicular to `facing`,
/// including `coordinate` itself, running to both board edges.
pub fn inline_spaces<G>(board: &G, coordinate: Coordinate, facing: Facing) -> BTreeSet<Coordinate>
where
    G: BoardGeometry + ?Sized,
{
    let mut line = BTreeSet::new();
    line.insert(coordinate);
    for side in facing.orthogonal_facings() {
        ray(board, coordinate, side, &mut line);
    }
    line
}

fn half_plane<G>(board: &G, coordinate: Coordinate, facing: Facing) -> BTreeSet<Coordinate>
where
    G: BoardGeometry + ?Sized,
{
    let widen = |spaces: &mut dyn Iterator<Item = Coordinate>| -> BTreeSet<Coordinate> {
        spaces.flat_map(|s| inline_spaces(board, s, facing)).collect()
    };

    let mut result = widen(&mut front_spaces(board, coordinate, facing).into_iter());
    let mut frontier = result.clone();

    // Each pass steps the latest lines forward and widens them again, so
    // lines clipped by a board edge never leave gaps behind them.
    while !frontier.is_empty() {
        let mut stepped = frontier.iter().filter_map(|s| forward_space(board, *s, facing));
        let next: BTreeSet<Coordinate> = widen(&mut stepped)
            .into_iter()
            .filter(|s| !result.contains(s))
            .collect();
        result.extend(next.iter().copied());
        frontier = next;
    }

    result.remove(&coordinate);
    result
}

/// Every space ahead of `coordinate` when facing `facing`, to the board edge.
///
/// Starts from the front spaces, widens each into its inline row so diagonal
/// facings do not leave a checkerboard of gaps, then keeps extending the
/// accumulated lines forward to the board edge. The origin is never included.
pub fn spaces_ahead<G>(board: &G, coordinate: Coordinate, facing: Facing) -> BTreeSet<Coordinate>
where
    G: BoardGeometry + ?Sized,
{
    half_plane(board, coordinate, facing)
}

/// Every space behind `coordinate` when facing `facing`.
pub fn spaces_behind<G>(board: &G, coordinate: Coordinate, facing: Facing) -> BTreeSet<Coordinate>
where
    G: BoardGeometry + ?Sized,
{
    half_plane(board, coordinate, facing.opposite())
}

/// Every space reachable within `distance` omnidirectional steps.
///
/// Breadth-first over [`adjacent_spaces`]; the origin is excluded.
pub fn spaces_within_distance<G>(board: &G, coordinate: Coordinate, distance: u8) -> BTreeSet<Coordinate>
where
    G: BoardGeometry + ?Sized,
{
    let mut visited: FxHashSet<Coordinate> = FxHashSet::default();
    visited.insert(coordinate);

    let mut frontier = vec![coordinate];
    for _ in 0..distance {
        let mut next = Vec::new();
        for space in frontier {
            for neighbour in adjacent_spaces(board, space) {
                if visited.insert(neighbour) {
                    next.push(neighbour);
                }
            }
        }
        if next.is_empty() {
            break;
        }
        frontier = next;
    }

    visited.remove(&coordinate);
    visited.into_iter().collect()
}

/// The forward cone of `range` steps: repeated [`front_spaces`] expansion.
///
/// Unlike [`spaces_within_distance`] this only ever projects forward. The
/// origin is excluded.
pub fn spaces_in_arc<G>(board: &G, coordinate: Coordinate, facing: Facing, range: u8) -> BTreeSet<Coordinate>
where
    G: BoardGeometry + ?Sized,
{
    let mut result = BTreeSet::new();
    let mut frontier: BTreeSet<Coordinate> = BTreeSet::from([coordinate]);

    for _ in 0..range {
        let next: BTreeSet<Coordinate> = frontier
            .iter()
            .flat_map(|c| front_spaces(board, *c, facing))
            .filter(|c| !result.contains(c))
            .collect();
        if next.is_empty() {
            break;
        }
        result.extend(next.iter().copied());
        frontier = next;
    }

    result.remove(&coordinate);
    result
}
