//! Commander movement legality.

use crate::board::{spaces_within_distance, Board, Coordinate};
use crate::core::{PlayerSide, RuleViolation, Validation};

/// Can `side` move its commander from `from` to `to`.
///
/// The commander must stand at `from`, and `to` must lie within
/// `max_distance` omnidirectional steps. Staying put is allowed. Off-board
/// coordinates are rejected rather than looked up.
pub fn is_legal_commander_move(
    board: &Board,
    side: PlayerSide,
    from: Coordinate,
    to: Coordinate,
    max_distance: u8,
) -> Validation {
    let origin = board.space(from).ok_or(RuleViolation::OffBoard(from))?;
    if board.space(to).is_none() {
        return Err(RuleViolation::OffBoard(to));
    }
    if !origin.has_commander(side) {
        return Err(RuleViolation::CommanderNotPresent { side, coordinate: from });
    }
    if from == to || spaces_within_distance(board, from, max_distance).contains(&to) {
        Ok(())
    } else {
        Err(RuleViolation::CommanderOutOfRange {
            from,
            to,
            max: max_distance,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::BoardShape;

    fn c(text: &str) -> Coordinate {
        text.parse().unwrap()
    }

    fn board() -> Board {
        Board::new(BoardShape::STANDARD).with_commander_moved(PlayerSide::One, None, c("E-5"))
    }

    #[test]
    fn test_distance_limit() {
        let board = board();
        assert!(is_legal_commander_move(&board, PlayerSide::One, c("E-5"), c("I-5"), 4).is_ok());
        assert!(is_legal_commander_move(&board, PlayerSide::One, c("E-5"), c("I-9"), 4).is_ok());
        assert_eq!(
            is_legal_commander_move(&board, PlayerSide::One, c("E-5"), c("J-5"), 4),
            Err(RuleViolation::CommanderOutOfRange {
                from: c("E-5"),
                to: c("J-5"),
                max: 4
            })
        );
    }

    #[test]
    fn test_commander_must_be_present() {
        let board = board();
        assert_eq!(
            is_legal_commander_move(&board, PlayerSide::Two, c("E-5"), c("E-6"), 4),
            Err(RuleViolation::CommanderNotPresent {
                side: PlayerSide::Two,
                coordinate: c("E-5")
            })
        );
        assert!(is_legal_commander_move(&board, PlayerSide::One, c("E-6"), c("E-7"), 4).is_err());
    }

    #[test]
    fn test_off_board_fails_closed() {
        let board = board();
        let off = Coordinate::new(20, 3);
        assert_eq!(
            is_legal_commander_move(&board, PlayerSide::One, off, c("E-5"), 4),
            Err(RuleViolation::OffBoard(off))
        );
        assert_eq!(
            is_legal_commander_move(&board, PlayerSide::One, c("E-5"), off, 4),
            Err(RuleViolation::OffBoard(off))
        );
    }

    #[test]
    fn test_staying_put() {
        assert!(is_legal_commander_move(&board(), PlayerSide::One, c("E-5"), c("E-5"), 4).is_ok());
    }
}
