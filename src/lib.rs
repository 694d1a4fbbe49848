// Checkers engine: board transitions, mandatory-capture move generation, turn search
pub mod board;
pub mod config;
pub mod error;
pub mod game;
pub mod movegen;
pub mod perft;
pub mod search;
pub mod selfplay;

pub use board::{Board, Cell, Move, Side, Square, Turn};
pub use error::{EngineError, Result};
pub use game::{Game, GameStatus};
pub use movegen::{legal_moves, legal_moves_for_square, MoveSet};
pub use search::{find_best_turn, ScoringMode, SearchParams, Searcher};

/// Applies one move to a board, leaving the input untouched.
pub fn apply_move(board: &Board, mv: Move) -> Result<Board> {
    board.apply(mv)
}
