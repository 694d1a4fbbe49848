use thiserror::Error;

use crate::board::{Move, Side};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// The move does not fit the piece on its origin square, or the squares it touches.
    #[error("invalid move {mv}: {reason}")]
    InvalidMove { mv: Move, reason: &'static str },

    /// Search was asked to play for a side that has nothing to play.
    #[error("no legal moves for {0}")]
    NoLegalMoves(Side),

    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("invalid board: {0}")]
    InvalidBoard(String),

    #[error("invalid notation: {0}")]
    Notation(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;
