//! Tic-tac-toe generalised to an n×n board where k in a row wins, with a
//! one-ply heuristic opponent and a minimax move advisor.

pub mod advisor;
pub mod board;
pub mod error;
pub mod game;
pub mod selector;
pub mod tic_tac_toe;

pub use advisor::Advisor;
pub use board::{Board, Coord, Line, Spot, Symbol};
pub use error::{InvalidConfig, MoveError, ParseBoardError};
pub use game::Game;
pub use selector::{choose_move, MoveSelector};
pub use tic_tac_toe::{new_game, AppliedMove, GameConfig, Outcome, TicTacToe};
