use std::fmt;
use std::str::FromStr;

use crate::error::{MoveError, ParseBoardError};

/// Axes searched for runs, in tie-break order: horizontal, vertical,
/// down-right diagonal, up-right diagonal.
const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbol {
    X,
    O,
}

impl Symbol {
    pub fn opponent(self) -> Self {
        match self {
            Symbol::X => Symbol::O,
            Symbol::O => Symbol::X,
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Symbol::X => write!(f, "X"),
            Symbol::O => write!(f, "O"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Spot {
    Empty,
    Filled(Symbol),
}

/// A 0-indexed `(row, col)` position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl From<(usize, usize)> for Coord {
    fn from((row, col): (usize, usize)) -> Self {
        Self::new(row, col)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Endpoints of a run. `start` lies in the negative direction of the axis,
/// `end` in the positive one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line {
    pub start: Coord,
    pub end: Coord,
}

impl Line {
    /// Number of cells between the endpoints, inclusive.
    pub fn cell_count(&self) -> usize {
        let rows = self.start.row.abs_diff(self.end.row);
        let cols = self.start.col.abs_diff(self.end.col);
        rows.max(cols) + 1
    }
}

/// Square grid of spots, stored row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    size: usize,
    spots: Vec<Spot>,
}

impl Board {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            spots: vec![Spot::Empty; size * size],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn contains(&self, coord: Coord) -> bool {
        coord.row < self.size && coord.col < self.size
    }

    /// The spot at `coord`, or `None` when it is off the board.
    pub fn get(&self, coord: Coord) -> Option<Spot> {
        if self.contains(coord) {
            Some(self.spots[coord.row * self.size + coord.col])
        } else {
            None
        }
    }

    /// Callers check bounds first.
    pub(crate) fn set(&mut self, coord: Coord, spot: Spot) {
        let idx = coord.row * self.size + coord.col;
        self.spots[idx] = spot;
    }

    pub fn is_full(&self) -> bool {
        self.spots.iter().all(|&spot| spot != Spot::Empty)
    }

    pub fn filled_count(&self) -> usize {
        self.spots.iter().filter(|&&spot| spot != Spot::Empty).count()
    }

    /// Every empty cell, row-major.
    pub fn empty_coords(&self) -> Vec<Coord> {
        let mut coords = Vec::new();
        for row in 0..self.size {
            for col in 0..self.size {
                let coord = Coord::new(row, col);
                if self.spots[row * self.size + col] == Spot::Empty {
                    coords.push(coord);
                }
            }
        }
        coords
    }

    /// The run through `at` if the symbol standing there completes at least
    /// `win_length` in a row. An empty or off-board cell never wins.
    pub fn winning_line_at(&self, at: Coord, win_length: usize) -> Option<Line> {
        match self.get(at)? {
            Spot::Filled(symbol) => self.winning_line_if(at, symbol, win_length),
            Spot::Empty => None,
        }
    }

    /// Same as [`Board::winning_line_at`], but reads `at` as if `symbol`
    /// stood there, whatever it actually holds. The board is not touched.
    pub fn winning_line_if(&self, at: Coord, symbol: Symbol, win_length: usize) -> Option<Line> {
        if !self.contains(at) {
            return None;
        }

        for (dr, dc) in DIRECTIONS {
            let (forward, end) = self.extend(at, dr, dc, symbol);
            let (backward, start) = self.extend(at, -dr, -dc, symbol);
            if 1 + forward + backward >= win_length {
                return Some(Line { start, end });
            }
        }

        None
    }

    /// A copy of the board with `symbol` written at `coord`. Turn order is
    /// not checked; this is for positions outside a running game.
    pub fn placed(&self, coord: Coord, symbol: Symbol) -> Result<Board, MoveError> {
        match self.get(coord) {
            None => Err(MoveError::OutOfBounds {
                coord,
                size: self.size,
            }),
            Some(Spot::Filled(_)) => Err(MoveError::CellOccupied(coord)),
            Some(Spot::Empty) => {
                let mut board = self.clone();
                board.set(coord, Spot::Filled(symbol));
                Ok(board)
            }
        }
    }

    /// Scans every filled cell for a run of `win_length`. For positions that
    /// were not built move by move, such as parsed ones.
    pub fn find_winner(&self, win_length: usize) -> Option<(Symbol, Line)> {
        for row in 0..self.size {
            for col in 0..self.size {
                let coord = Coord::new(row, col);
                if let (Some(Spot::Filled(symbol)), Some(line)) =
                    (self.get(coord), self.winning_line_at(coord, win_length))
                {
                    return Some((symbol, line));
                }
            }
        }
        None
    }

    // Counts matching cells beyond `from` and returns the last one reached.
    fn extend(&self, from: Coord, dr: isize, dc: isize, symbol: Symbol) -> (usize, Coord) {
        let mut count = 0;
        let mut last = from;
        while let Some(next) = self.neighbour(last, dr, dc) {
            if self.get(next) != Some(Spot::Filled(symbol)) {
                break;
            }
            count += 1;
            last = next;
        }
        (count, last)
    }

    fn neighbour(&self, coord: Coord, dr: isize, dc: isize) -> Option<Coord> {
        let row = coord.row.checked_add_signed(dr)?;
        let col = coord.col.checked_add_signed(dc)?;
        let next = Coord::new(row, col);
        self.contains(next).then_some(next)
    }

    #[cfg(test)]
    pub(crate) fn from_rows(rows: &[&str]) -> Self {
        rows.join("\n").parse().unwrap()
    }
}

/// Reads one row per line using `X`, `O` and `.`. Whitespace inside a line
/// is ignored, so the [`Display`](fmt::Display) output parses back. The
/// number of rows sets the board size.
impl FromStr for Board {
    type Err = ParseBoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows: Vec<Vec<char>> = s
            .lines()
            .map(|line| line.chars().filter(|ch| !ch.is_whitespace()).collect::<Vec<_>>())
            .filter(|row| !row.is_empty())
            .collect();
        if rows.is_empty() {
            return Err(ParseBoardError::Empty);
        }

        let size = rows.len();
        let mut board = Board::new(size);
        for (row, cells) in rows.iter().enumerate() {
            if cells.len() < size {
                return Err(ParseBoardError::ShortRow {
                    row,
                    len: cells.len(),
                    expected: size,
                });
            }
            if cells.len() > size {
                return Err(ParseBoardError::LongRow {
                    row,
                    len: cells.len(),
                    expected: size,
                });
            }
            for (col, &ch) in cells.iter().enumerate() {
                let spot = match ch {
                    'X' | 'x' => Spot::Filled(Symbol::X),
                    'O' | 'o' => Spot::Filled(Symbol::O),
                    '.' => Spot::Empty,
                    _ => return Err(ParseBoardError::InvalidChar { ch, row, col }),
                };
                board.set(Coord::new(row, col), spot);
            }
        }
        Ok(board)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in self.spots.chunks(self.size.max(1)) {
            for spot in row {
                let symbol = match spot {
                    Spot::Empty => ".",
                    Spot::Filled(Symbol::X) => "X",
                    Spot::Filled(Symbol::O) => "O",
                };
                write!(f, "{} ", symbol)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new(4);
        assert_eq!(board.size(), 4);
        assert_eq!(board.filled_count(), 0);
        assert_eq!(board.empty_coords().len(), 16);
        assert!(!board.is_full());
    }

    #[test]
    fn test_get_out_of_bounds() {
        let board = Board::new(3);
        assert_eq!(board.get(Coord::new(2, 2)), Some(Spot::Empty));
        assert_eq!(board.get(Coord::new(3, 0)), None);
        assert_eq!(board.get(Coord::new(0, 3)), None);
    }

    #[test]
    fn test_empty_coords_row_major() {
        let board = Board::from_rows(&["X.O", ".X.", "OO."]);
        assert_eq!(
            board.empty_coords(),
            vec![
                Coord::new(0, 1),
                Coord::new(1, 0),
                Coord::new(1, 2),
                Coord::new(2, 2),
            ]
        );
        assert_eq!(board.empty_coords().len() + board.filled_count(), 9);
    }

    #[test]
    fn test_winning_line_horizontal() {
        let board = Board::from_rows(&["XXX", "OO.", "..."]);
        let line = board.winning_line_at(Coord::new(0, 1), 3);
        assert_eq!(
            line,
            Some(Line {
                start: Coord::new(0, 0),
                end: Coord::new(0, 2),
            })
        );
        assert_eq!(board.winning_line_at(Coord::new(1, 0), 3), None);
    }

    #[test]
    fn test_winning_line_vertical_and_diagonals() {
        let board = Board::from_rows(&["O..", "O..", "O.."]);
        assert_eq!(
            board.winning_line_at(Coord::new(2, 0), 3),
            Some(Line {
                start: Coord::new(0, 0),
                end: Coord::new(2, 0),
            })
        );

        let board = Board::from_rows(&["X..", ".X.", "..X"]);
        assert_eq!(
            board.winning_line_at(Coord::new(1, 1), 3),
            Some(Line {
                start: Coord::new(0, 0),
                end: Coord::new(2, 2),
            })
        );

        // (1, -1) runs down-left, so `end` is the bottom-left cell.
        let board = Board::from_rows(&["..O", ".O.", "O.."]);
        assert_eq!(
            board.winning_line_at(Coord::new(0, 2), 3),
            Some(Line {
                start: Coord::new(0, 2),
                end: Coord::new(2, 0),
            })
        );
    }

    #[test]
    fn test_overlength_run_reports_whole_run() {
        let board = Board::from_rows(&["XXXXX", ".....", ".....", ".....", "....."]);
        let line = board.winning_line_at(Coord::new(0, 2), 4).unwrap();
        assert_eq!(line.start, Coord::new(0, 0));
        assert_eq!(line.end, Coord::new(0, 4));
        assert_eq!(line.cell_count(), 5);
    }

    #[test]
    fn test_first_direction_wins_tie() {
        // Both the row and the column through (0, 0) are complete.
        let board = Board::from_rows(&["XXX", "X..", "X.."]);
        assert_eq!(
            board.winning_line_at(Coord::new(0, 0), 3),
            Some(Line {
                start: Coord::new(0, 0),
                end: Coord::new(0, 2),
            })
        );
    }

    #[test]
    fn test_winning_line_if_does_not_touch_board() {
        let board = Board::from_rows(&["XX.", "OO.", "..."]);
        let before = board.clone();

        assert!(board.winning_line_if(Coord::new(0, 2), Symbol::X, 3).is_some());
        assert!(board.winning_line_if(Coord::new(0, 2), Symbol::O, 3).is_none());
        assert!(board.winning_line_if(Coord::new(1, 2), Symbol::O, 3).is_some());
        assert!(board.winning_line_if(Coord::new(5, 5), Symbol::O, 3).is_none());
        assert_eq!(board, before);
        assert_eq!(board.get(Coord::new(0, 2)), Some(Spot::Empty));
    }

    #[test]
    fn test_win_length_one() {
        let board = Board::new(2);
        assert_eq!(
            board.winning_line_if(Coord::new(1, 1), Symbol::O, 1),
            Some(Line {
                start: Coord::new(1, 1),
                end: Coord::new(1, 1),
            })
        );
        assert_eq!(board.winning_line_at(Coord::new(1, 1), 1), None);
    }

    #[test]
    fn test_display() {
        let board = Board::from_rows(&["X.", ".O"]);
        assert_eq!(board.to_string(), "X . \n. O \n");
    }

    #[test]
    fn test_parse() {
        let board: Board = "X.O\n.x.\n\nOO.\n".parse().unwrap();
        assert_eq!(board.size(), 3);
        assert_eq!(board.get(Coord::new(0, 0)), Some(Spot::Filled(Symbol::X)));
        assert_eq!(board.get(Coord::new(1, 1)), Some(Spot::Filled(Symbol::X)));
        assert_eq!(board.get(Coord::new(2, 1)), Some(Spot::Filled(Symbol::O)));
        assert_eq!(board.get(Coord::new(2, 2)), Some(Spot::Empty));
        assert_eq!(board.filled_count(), 5);

        // Display output reads back unchanged.
        let again: Board = board.to_string().parse().unwrap();
        assert_eq!(again, board);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("".parse::<Board>(), Err(ParseBoardError::Empty));
        assert_eq!("  \n\n".parse::<Board>(), Err(ParseBoardError::Empty));
        assert_eq!(
            "X..\n.O\n...".parse::<Board>(),
            Err(ParseBoardError::ShortRow {
                row: 1,
                len: 2,
                expected: 3,
            })
        );
        assert_eq!(
            "X..\n....\n...".parse::<Board>(),
            Err(ParseBoardError::LongRow {
                row: 1,
                len: 4,
                expected: 3,
            })
        );
        assert_eq!(
            "X..\n...\n.Z.".parse::<Board>(),
            Err(ParseBoardError::InvalidChar {
                ch: 'Z',
                row: 2,
                col: 1,
            })
        );
    }

    #[test]
    fn test_placed() {
        let board = Board::from_rows(&["X..", "...", "..."]);
        let after = board.placed(Coord::new(1, 1), Symbol::O).unwrap();
        assert_eq!(after.get(Coord::new(1, 1)), Some(Spot::Filled(Symbol::O)));
        assert_eq!(board.get(Coord::new(1, 1)), Some(Spot::Empty));
        assert_eq!(
            board.placed(Coord::new(0, 0), Symbol::O),
            Err(MoveError::CellOccupied(Coord::new(0, 0)))
        );
        assert_eq!(
            board.placed(Coord::new(0, 3), Symbol::O),
            Err(MoveError::OutOfBounds {
                coord: Coord::new(0, 3),
                size: 3,
            })
        );
    }

    #[test]
    fn test_find_winner() {
        let board = Board::from_rows(&["O...", ".O..", "..O.", "XXX."]);
        assert_eq!(
            board.find_winner(3),
            Some((
                Symbol::O,
                Line {
                    start: Coord::new(0, 0),
                    end: Coord::new(2, 2),
                }
            ))
        );
        assert_eq!(board.find_winner(4), None);
        assert_eq!(Board::new(3).find_winner(1), None);
    }
}
