use std::fmt;
use std::str::FromStr;

use crate::board::{Board, Side};
use crate::error::EngineError;

/// Score of a lost position: the perspective has no pieces, or no legal reply.
pub const MAX_SCORE: f64 = 1e9;
/// Score of a won position: the opponent has no pieces left.
pub const WIN_SCORE: f64 = 0.0;

/// Bonus per row a man has advanced, under [`ScoringMode::NumberAndPotential`].
const POTENTIAL_PER_ROW: f64 = 0.05;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ScoringMode {
    /// Men count one, kings four.
    #[default]
    NumberOnly,
    /// Men count one plus an advancement bonus, kings five.
    NumberAndPotential,
}

impl ScoringMode {
    pub fn king_weight(self) -> f64 {
        match self {
            ScoringMode::NumberOnly => 4.0,
            ScoringMode::NumberAndPotential => 5.0,
        }
    }
}

impl FromStr for ScoringMode {
    type Err = EngineError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NumberOnly" => Ok(ScoringMode::NumberOnly),
            "NumberAndPotential" => Ok(ScoringMode::NumberAndPotential),
            other => Err(EngineError::Configuration(format!("unknown scoring mode '{other}'"))),
        }
    }
}

impl fmt::Display for ScoringMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ScoringMode::NumberOnly => "NumberOnly",
            ScoringMode::NumberAndPotential => "NumberAndPotential",
        })
    }
}

/// Static evaluation seam used by the search. Lower is better for `perspective`.
pub trait Evaluate: Send + Sync {
    fn score(&self, board: &Board, perspective: Side) -> f64;
}

/// Material ratio heuristic: opponent strength over own strength.
#[derive(Clone, Copy, Debug, Default)]
pub struct Material {
    pub mode: ScoringMode,
}

impl Material {
    pub fn new(mode: ScoringMode) -> Self { Self { mode } }

    /// Men (plus advancement bonus) and kings, weighted, for one side.
    pub fn strength(&self, board: &Board, side: Side) -> f64 {
        let mut men = 0.0;
        let mut kings = 0.0;
        for sq in board.pieces(side) {
            if board.get(sq).is_king() {
                kings += 1.0;
            } else {
                men += 1.0;
                if self.mode == ScoringMode::NumberAndPotential {
                    men += POTENTIAL_PER_ROW * side.advancement(sq.row()) as f64;
                }
            }
        }
        men + self.mode.king_weight() * kings
    }
}

impl Evaluate for Material {
    fn score(&self, board: &Board, perspective: Side) -> f64 {
        if board.count(perspective) == 0 { return MAX_SCORE; }
        if board.count(perspective.opponent()) == 0 { return WIN_SCORE; }
        self.strength(board, perspective.opponent()) / self.strength(board, perspective)
    }
}

/// Convenience wrapper over [`Material`].
pub fn score(board: &Board, perspective: Side, mode: ScoringMode) -> f64 {
    Material::new(mode).score(board, perspective)
}
