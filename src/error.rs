use crate::board::{Coord, Symbol};

/// Rejected game parameters: the board must be non-empty and the win length
/// must fit on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("invalid game config: size {size}, win length {win_length} (need size >= 1 and 1 <= win length <= size)")]
pub struct InvalidConfig {
    pub size: usize,
    pub win_length: usize,
}

/// Reasons a move is refused. The game state is untouched in every case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("{coord} is outside the {size}x{size} board")]
    OutOfBounds { coord: Coord, size: usize },

    #[error("{0} is already taken")]
    CellOccupied(Coord),

    #[error("game is already decided")]
    GameAlreadyDecided,

    #[error("it is {expected}'s turn, not {got}'s")]
    NotYourTurn { expected: Symbol, got: Symbol },
}

/// Why a text position could not be read as a [`crate::board::Board`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ParseBoardError {
    #[error("no rows given")]
    Empty,

    #[error("row {row} is too short: {len} cells, expected {expected}")]
    ShortRow { row: usize, len: usize, expected: usize },

    #[error("row {row} is too long: {len} cells, expected {expected}")]
    LongRow { row: usize, len: usize, expected: usize },

    #[error("unexpected '{ch}' at ({row}, {col}), use X, O or .")]
    InvalidChar { ch: char, row: usize, col: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_config_display() {
        let err = InvalidConfig {
            size: 3,
            win_length: 5,
        };
        assert_eq!(
            err.to_string(),
            "invalid game config: size 3, win length 5 (need size >= 1 and 1 <= win length <= size)"
        );
    }

    #[test]
    fn test_move_error_display() {
        let err = MoveError::OutOfBounds {
            coord: Coord::new(3, 0),
            size: 3,
        };
        assert_eq!(err.to_string(), "(3, 0) is outside the 3x3 board");

        let err = MoveError::CellOccupied(Coord::new(1, 1));
        assert_eq!(err.to_string(), "(1, 1) is already taken");

        let err = MoveError::NotYourTurn {
            expected: Symbol::X,
            got: Symbol::O,
        };
        assert_eq!(err.to_string(), "it is X's turn, not O's");
    }

    #[test]
    fn test_parse_board_error_display() {
        let err = ParseBoardError::InvalidChar {
            ch: 'Z',
            row: 1,
            col: 2,
        };
        assert_eq!(err.to_string(), "unexpected 'Z' at (1, 2), use X, O or .");

        let err = ParseBoardError::ShortRow {
            row: 0,
            len: 2,
            expected: 3,
        };
        assert_eq!(err.to_string(), "row 0 is too short: 2 cells, expected 3");
    }
}
