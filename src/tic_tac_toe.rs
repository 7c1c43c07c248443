use std::fmt;

use log::{debug, info};

use crate::board::{Board, Coord, Line, Spot, Symbol};
use crate::error::{InvalidConfig, MoveError};
use crate::game::Game;

/// Board size and the run length needed to win. Always `1 <= win_length <= size`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    size: usize,
    win_length: usize,
}

impl GameConfig {
    pub fn new(size: usize, win_length: usize) -> Result<Self, InvalidConfig> {
        if size == 0 || win_length == 0 || win_length > size {
            return Err(InvalidConfig { size, win_length });
        }
        Ok(Self { size, win_length })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn win_length(&self) -> usize {
        self.win_length
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    InProgress,
    Win { symbol: Symbol, line: Line },
    Draw,
}

impl Outcome {
    pub fn is_decided(&self) -> bool {
        !matches!(self, Outcome::InProgress)
    }

    pub fn winner(&self) -> Option<Symbol> {
        match self {
            Outcome::Win { symbol, .. } => Some(*symbol),
            _ => None,
        }
    }

    pub fn line(&self) -> Option<Line> {
        match self {
            Outcome::Win { line, .. } => Some(*line),
            _ => None,
        }
    }
}

/// What a successful move did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppliedMove {
    pub coord: Coord,
    pub symbol: Symbol,
    pub outcome: Outcome,
}

/// One round of k-in-a-row. The board only changes through
/// [`TicTacToe::apply_move`], and never again once the outcome is decided.
#[derive(Debug, Clone)]
pub struct TicTacToe {
    board: Board,
    config: GameConfig,
    current_player: Symbol,
    outcome: Outcome,
}

/// Validates the parameters and starts an empty round.
pub fn new_game(size: usize, win_length: usize, starting: Symbol) -> Result<TicTacToe, InvalidConfig> {
    let config = GameConfig::new(size, win_length)?;
    Ok(TicTacToe::new(config, starting))
}

impl TicTacToe {
    pub fn new(config: GameConfig, starting: Symbol) -> Self {
        Self {
            board: Board::new(config.size()),
            config,
            current_player: starting,
            outcome: Outcome::InProgress,
        }
    }

    /// Places `symbol` at `coord`. `symbol` must be the current player's.
    pub fn apply_move(&mut self, coord: Coord, symbol: Symbol) -> Result<AppliedMove, MoveError> {
        if self.outcome.is_decided() {
            debug!("rejected {} at {}: game already decided", symbol, coord);
            return Err(MoveError::GameAlreadyDecided);
        }
        match self.board.get(coord) {
            None => {
                debug!("rejected {} at {}: out of bounds", symbol, coord);
                return Err(MoveError::OutOfBounds {
                    coord,
                    size: self.config.size(),
                });
            }
            Some(Spot::Filled(_)) => {
                debug!("rejected {} at {}: occupied", symbol, coord);
                return Err(MoveError::CellOccupied(coord));
            }
            Some(Spot::Empty) => {}
        }
        if symbol != self.current_player {
            debug!("rejected {} at {}: not their turn", symbol, coord);
            return Err(MoveError::NotYourTurn {
                expected: self.current_player,
                got: symbol,
            });
        }

        self.board.set(coord, Spot::Filled(symbol));
        debug!("{} plays {}", symbol, coord);

        // Win before draw: filling the last cell with a winning move is a win.
        if let Some(line) = self.board.winning_line_at(coord, self.config.win_length()) {
            self.outcome = Outcome::Win { symbol, line };
            info!("{} wins along {} -> {}", symbol, line.start, line.end);
        } else if self.board.is_full() {
            self.outcome = Outcome::Draw;
            info!("draw after {} moves", self.board.filled_count());
        } else {
            self.current_player = symbol.opponent();
        }

        Ok(AppliedMove {
            coord,
            symbol,
            outcome: self.outcome,
        })
    }

    /// Applies a move for whoever is to play.
    pub fn play(&mut self, coord: Coord) -> Result<AppliedMove, MoveError> {
        self.apply_move(coord, self.current_player)
    }

    /// Empty cells in row-major order. A decided game still lists its
    /// empty cells; [`TicTacToe::apply_move`] is what refuses them.
    pub fn legal_moves(&self) -> Vec<Coord> {
        self.board.empty_coords()
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn spot(&self, coord: Coord) -> Option<Spot> {
        self.board.get(coord)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    /// The symbol to move next. After a win this stays on the winner.
    pub fn current_player(&self) -> Symbol {
        self.current_player
    }

    pub fn winning_line(&self) -> Option<Line> {
        self.outcome.line()
    }

    pub fn move_count(&self) -> usize {
        self.board.filled_count()
    }

    pub fn is_decided(&self) -> bool {
        self.outcome.is_decided()
    }

    /// Whether `symbol` would complete a run by taking the empty cell `coord`.
    pub fn would_win(&self, coord: Coord, symbol: Symbol) -> bool {
        self.board.get(coord) == Some(Spot::Empty)
            && self
                .board
                .winning_line_if(coord, symbol, self.config.win_length())
                .is_some()
    }
}

impl Game for TicTacToe {
    type Action = Coord;
    type Player = Symbol;
    type Error = MoveError;

    fn step(&mut self, action: Coord) -> Result<(), MoveError> {
        self.play(action).map(|_| ())
    }

    fn get_available_moves(&self) -> Vec<Coord> {
        self.legal_moves()
    }

    fn current_player(&self) -> Symbol {
        self.current_player
    }

    fn opponent(&self, player: &Symbol) -> Symbol {
        player.opponent()
    }

    fn done(&self) -> bool {
        self.is_decided()
    }

    fn check_winner(&self) -> Option<Symbol> {
        self.outcome.winner()
    }

    fn wins_with(&self, action: &Coord, player: &Symbol) -> bool {
        self.would_win(*action, *player)
    }
}

impl fmt::Display for TicTacToe {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.board)
    }
}
