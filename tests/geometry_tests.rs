//! Board geometry tests.
//!
//! Property tests over every facing and every space of the standard board:
//! - Facing algebra (opposites, adjacent and orthogonal facings)
//! - Neighbourhoods (symmetry, counts at corners, edges and interior)
//! - Forward steps and distance rings

use std::collections::BTreeSet;

use proptest::prelude::*;
use rust_wargame::board::{
    adjacent_spaces, forward_space, front_spaces, spaces_in_arc, spaces_within_distance, BoardGeometry, BoardShape,
    Coordinate, Facing,
};

const BOARD: BoardShape = BoardShape::STANDARD;

fn c(text: &str) -> Coordinate {
    text.parse().unwrap()
}

fn set(texts: &[&str]) -> BTreeSet<Coordinate> {
    texts.iter().map(|t| c(t)).collect()
}

fn facing() -> impl Strategy<Value = Facing> {
    prop::sample::select(Facing::ALL.to_vec())
}

fn coordinate() -> impl Strategy<Value = Coordinate> {
    (0..BOARD.rows(), 0..BOARD.columns()).prop_map(|(row, column)| Coordinate::new(row, column))
}

#[test]
fn test_corner_and_interior_neighbours() {
    let corner: BTreeSet<_> = adjacent_spaces(&BOARD, c("A-1")).into_iter().collect();
    assert_eq!(corner, set(&["B-1", "B-2", "A-2"]));

    let interior: BTreeSet<_> = adjacent_spaces(&BOARD, c("E-5")).into_iter().collect();
    assert_eq!(
        interior,
        set(&["D-4", "D-5", "D-6", "E-4", "E-6", "F-4", "F-5", "F-6"])
    );

    assert_eq!(adjacent_spaces(&BOARD, c("A-9")).len(), 5);
    assert_eq!(adjacent_spaces(&BOARD, c("L-18")).len(), 3);
}

#[test]
fn test_orientation() {
    assert_eq!(forward_space(&BOARD, c("E-5"), Facing::North), Some(c("D-5")));
    assert_eq!(forward_space(&BOARD, c("E-5"), Facing::SouthEast), Some(c("F-6")));
    assert_eq!(forward_space(&BOARD, c("A-5"), Facing::North), None);

    let front: BTreeSet<_> = front_spaces(&BOARD, c("E-5"), Facing::South).into_iter().collect();
    assert_eq!(front, set(&["F-4", "F-5", "F-6"]));
}

#[test]
fn test_arc_stays_ahead() {
    let arc = spaces_in_arc(&BOARD, c("C-9"), Facing::South, 3);
    assert!(arc.contains(&c("F-9")));
    assert!(!arc.contains(&c("C-9")));
    assert!(arc.iter().all(|target| target.row() > c("C-9").row()));
}

proptest! {
    #[test]
    fn opposite_is_an_involution(f in facing()) {
        prop_assert_eq!(f.opposite().opposite(), f);
        prop_assert_ne!(f.opposite(), f);
    }

    #[test]
    fn adjacent_and_orthogonal_facings_are_disjoint(f in facing()) {
        let adjacent = f.adjacent_facings();
        let orthogonal = f.orthogonal_facings();
        prop_assert_eq!(adjacent.len(), 2);
        prop_assert_ne!(adjacent[0], adjacent[1]);
        for a in adjacent {
            prop_assert!(!orthogonal.contains(&a));
            prop_assert_ne!(a, f);
        }
    }

    #[test]
    fn turning_left_then_right_returns(f in facing()) {
        prop_assert_eq!(f.left_of().right_of(), f);
        prop_assert!(f.orthogonal_facings().contains(&f.left_of()));
    }

    #[test]
    fn adjacency_is_symmetric(at in coordinate()) {
        let neighbours = adjacent_spaces(&BOARD, at);
        prop_assert!((3..=8).contains(&neighbours.len()));
        for n in neighbours {
            prop_assert_eq!(at.distance(n), 1);
            prop_assert!(adjacent_spaces(&BOARD, n).contains(&at));
        }
    }

    #[test]
    fn forward_then_back_returns(at in coordinate(), f in facing()) {
        if let Some(ahead) = forward_space(&BOARD, at, f) {
            prop_assert!(BOARD.contains(ahead));
            prop_assert_eq!(forward_space(&BOARD, ahead, f.opposite()), Some(at));
        }
    }

    #[test]
    fn distance_ring_is_bounded(at in coordinate(), distance in 0u8..5) {
        let within = spaces_within_distance(&BOARD, at, distance);
        prop_assert!(within.iter().all(|s| s.distance(at) <= distance && BOARD.contains(*s)));
        if distance >= 1 {
            for n in adjacent_spaces(&BOARD, at) {
                prop_assert!(within.contains(&n));
            }
        }
    }

    #[test]
    fn coordinate_text_round_trips(at in coordinate()) {
        let text = at.to_string();
        prop_assert_eq!(text.parse::<Coordinate>().unwrap(), at);
    }
}
