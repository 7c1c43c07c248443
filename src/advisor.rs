use std::ops::RangeInclusive;

use log::debug;

use crate::board::{Board, Coord, Spot, Symbol};
use crate::tic_tac_toe::TicTacToe;

const WIN_SCORE: i32 = 1000;

/// Depth-limited minimax with alpha-beta pruning. Unlike
/// [`crate::selector::choose_move`] it looks past the next move, and prefers
/// quicker wins and slower losses.
///
/// Only cells in the active box, one cell around the occupied area, are
/// searched; on an empty board every cell is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Advisor {
    max_depth: Option<usize>,
}

impl Advisor {
    /// Search depth picked from the number of empty cells.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_depth(max_depth: usize) -> Self {
        Self {
            max_depth: Some(max_depth.max(1)),
        }
    }

    /// Best move for the current player, `None` once the game is decided.
    pub fn advise(&self, game: &TicTacToe) -> Option<Coord> {
        if game.is_decided() {
            return None;
        }
        self.recommend(game.board(), game.current_player(), game.config().win_length())
    }

    /// Best move for `player` on an arbitrary position, `None` when no cell
    /// is empty.
    pub fn recommend(&self, board: &Board, player: Symbol, win_length: usize) -> Option<Coord> {
        let empty = board.size() * board.size() - board.filled_count();
        if empty == 0 {
            return None;
        }
        let max_depth = self.max_depth.unwrap_or_else(|| depth_limit(empty));

        let mut search = Search {
            board: board.clone(),
            me: player,
            win_length,
            max_depth,
        };

        let mut best: Option<(Coord, i32)> = None;
        for coord in candidate_moves(&search.board) {
            let alpha = best.map_or(i32::MIN, |(_, score)| score);
            search.board.set(coord, Spot::Filled(player));
            let score = search.minimax(coord, player, 1, alpha, i32::MAX);
            search.board.set(coord, Spot::Empty);

            if best.map_or(true, |(_, best_score)| score > best_score) {
                best = Some((coord, score));
            }
        }

        debug!(
            "advice for {} at depth {}: {:?}",
            player, max_depth, best
        );
        best.map(|(coord, _)| coord)
    }
}

struct Search {
    board: Board,
    me: Symbol,
    win_length: usize,
    max_depth: usize,
}

impl Search {
    fn minimax(&mut self, last: Coord, moved: Symbol, depth: usize, mut alpha: i32, mut beta: i32) -> i32 {
        if self.board.winning_line_at(last, self.win_length).is_some() {
            return if moved == self.me {
                WIN_SCORE - depth as i32
            } else {
                -WIN_SCORE + depth as i32
            };
        }
        if depth >= self.max_depth || self.board.is_full() {
            return 0;
        }

        let to_move = moved.opponent();
        let maximizing = to_move == self.me;
        let mut best = if maximizing { i32::MIN } else { i32::MAX };

        for coord in candidate_moves(&self.board) {
            self.board.set(coord, Spot::Filled(to_move));
            let score = self.minimax(coord, to_move, depth + 1, alpha, beta);
            self.board.set(coord, Spot::Empty);

            if maximizing {
                best = best.max(score);
                alpha = alpha.max(score);
            } else {
                best = best.min(score);
                beta = beta.min(score);
            }
            if beta <= alpha {
                break;
            }
        }

        if best == i32::MIN || best == i32::MAX {
            0
        } else {
            best
        }
    }
}

fn depth_limit(empty: usize) -> usize {
    match empty {
        0..=9 => empty,
        10..=16 => 5,
        17..=36 => 4,
        _ => 3,
    }
}

/// Bounding box of the occupied cells grown by one, clipped to the board.
fn active_box(board: &Board) -> (RangeInclusive<usize>, RangeInclusive<usize>) {
    let last = board.size().saturating_sub(1);
    let mut bounds: Option<(usize, usize, usize, usize)> = None;
    for row in 0..board.size() {
        for col in 0..board.size() {
            if board.get(Coord::new(row, col)) == Some(Spot::Empty) {
                continue;
            }
            bounds = Some(match bounds {
                None => (row, row, col, col),
                Some((r0, r1, c0, c1)) => (r0.min(row), r1.max(row), c0.min(col), c1.max(col)),
            });
        }
    }

    match bounds {
        None => (0..=last, 0..=last),
        Some((r0, r1, c0, c1)) => (
            r0.saturating_sub(1)..=(r1 + 1).min(last),
            c0.saturating_sub(1)..=(c1 + 1).min(last),
        ),
    }
}

/// Empty cells inside the active box, row-major.
fn candidate_moves(board: &Board) -> Vec<Coord> {
    let (rows, cols) = active_box(board);
    let mut moves = Vec::new();
    for row in rows {
        for col in cols.clone() {
            let coord = Coord::new(row, col);
            if board.get(coord) == Some(Spot::Empty) {
                moves.push(coord);
            }
        }
    }
    moves
}
