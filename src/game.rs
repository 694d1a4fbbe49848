use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::board::{Board, Move, Side, Square, Turn};
use crate::error::{EngineError, Result};
use crate::movegen::{legal_moves, legal_moves_for_square, MoveSet};
use crate::search::{Evaluate, Searcher};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    InProgress,
    Won(Side),
    /// The turn cap was reached.
    Draw,
}

#[derive(Debug, Clone, Copy)]
struct Snapshot {
    board: Board,
    to_move: Side,
    turns_played: u32,
}

/// A game in progress: the position, whose turn it is, and the boards needed to take turns back.
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    to_move: Side,
    turns_played: u32,
    chain: Option<Square>,
    history: Vec<Snapshot>,
}

impl Default for Game {
    fn default() -> Self { Self::new() }
}

impl Game {
    pub fn new() -> Self {
        Self::from_position(Board::startpos(), Side::White)
    }

    pub fn from_position(board: Board, to_move: Side) -> Self {
        Self { board, to_move, turns_played: 0, chain: None, history: Vec::new() }
    }

    pub fn board(&self) -> &Board { &self.board }
    pub fn side_to_move(&self) -> Side { self.to_move }
    pub fn turns_played(&self) -> u32 { self.turns_played }

    /// Square of the piece that must keep capturing, while a chain is unfinished.
    pub fn chain_square(&self) -> Option<Square> { self.chain }

    pub fn legal_moves(&self) -> MoveSet {
        match self.chain {
            Some(sq) => legal_moves_for_square(&self.board, sq),
            None => legal_moves(&self.board, self.to_move),
        }
    }

    /// Plays one move. Returns true when the turn passed to the opponent, false when the
    /// same piece has to keep capturing.
    pub fn play(&mut self, mv: Move) -> Result<bool> {
        let legal = self.legal_moves();
        if !legal.contains(&mv) {
            let reason = if legal.must_capture && !mv.is_capture() {
                "a capture is available and must be played"
            } else {
                "not legal in this position"
            };
            return Err(EngineError::InvalidMove { mv, reason });
        }
        if self.chain.is_none() {
            self.history.push(Snapshot { board: self.board, to_move: self.to_move, turns_played: self.turns_played });
        }
        self.board = self.board.apply(mv)?;
        if mv.is_capture() && legal_moves_for_square(&self.board, mv.to).must_capture {
            self.chain = Some(mv.to);
            return Ok(false);
        }
        self.chain = None;
        self.to_move = self.to_move.opponent();
        self.turns_played += 1;
        Ok(true)
    }

    /// Plays a whole turn. Fails if it stops short of the end of a chain or runs past it,
    /// in which case the game is restored to where the turn started.
    pub fn play_turn(&mut self, turn: &Turn) -> Result<()> {
        let saved = self.clone();
        let result = self.play_moves(turn);
        if result.is_err() {
            *self = saved;
        }
        result
    }

    fn play_moves(&mut self, turn: &Turn) -> Result<()> {
        let count = turn.len();
        for (i, &mv) in turn.moves().iter().enumerate() {
            let done = self.play(mv)?;
            if done != (i + 1 == count) {
                let reason = if done {
                    "turn continues after the chain ended"
                } else {
                    "capture chain left unfinished"
                };
                return Err(EngineError::InvalidMove { mv, reason });
            }
        }
        Ok(())
    }

    /// Lets `searcher` choose and play the side to move's turn.
    pub fn play_bot_turn<E: Evaluate>(&mut self, searcher: &mut Searcher<E>) -> Result<Turn> {
        let t0 = Instant::now();
        let side = self.to_move;
        let turn = searcher.find_best_turn(&self.board, side)?;
        self.play_turn(&turn)?;
        info!("{} bot played {} in {} ms", side, turn, t0.elapsed().as_millis());
        Ok(turn)
    }

    /// Back to the start position with white to move and no history.
    pub fn reset(&mut self) {
        debug!("reset after {} turns", self.turns_played);
        *self = Self::new();
    }

    /// Takes back the last complete turn, or the moves of an unfinished chain.
    pub fn undo(&mut self) -> bool {
        let Some(snap) = self.history.pop() else { return false };
        debug!("undo to turn {}", snap.turns_played);
        self.board = snap.board;
        self.to_move = snap.to_move;
        self.turns_played = snap.turns_played;
        self.chain = None;
        true
    }

    pub fn status(&self, max_turns: u32) -> GameStatus {
        if self.chain.is_some() { return GameStatus::InProgress; }
        if self.turns_played >= max_turns { return GameStatus::Draw; }
        if self.legal_moves().is_empty() { return GameStatus::Won(self.to_move.opponent()); }
        GameStatus::InProgress
    }
}
