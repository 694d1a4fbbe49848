use std::fmt;
use std::str::FromStr;

use super::moves::Move;
use super::square::Square;
use super::{Cell, Side};
use crate::error::{EngineError, Result};

/// An 8x8 grid of cells. Copying a board is cheap; every transition returns a new value.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [[Cell; 8]; 8],
}

impl Default for Board {
    fn default() -> Self { Self::startpos() }
}

impl Board {
    pub fn empty() -> Self {
        Self { cells: [[Cell::Empty; 8]; 8] }
    }

    /// Black men on the dark squares of rows 0..=2, white men on rows 5..=7.
    pub fn startpos() -> Self {
        let mut board = Self::empty();
        for sq in Square::all().filter(|s| s.is_dark()) {
            if sq.row() < 3 {
                board.set(sq, Cell::BlackMan);
            } else if sq.row() > 4 {
                board.set(sq, Cell::WhiteMan);
            }
        }
        board
    }

    pub fn get(&self, sq: Square) -> Cell {
        self.cells[sq.row() as usize][sq.col() as usize]
    }

    fn set(&mut self, sq: Square, cell: Cell) {
        self.cells[sq.row() as usize][sq.col() as usize] = cell;
    }

    /// Returns a copy with `cell` placed on `sq`. Meant for building positions.
    pub fn with(mut self, sq: Square, cell: Cell) -> Self {
        self.set(sq, cell);
        self
    }

    pub fn pieces(&self, side: Side) -> impl Iterator<Item = Square> + '_ {
        Square::all().filter(move |&sq| self.get(sq).side() == Some(side))
    }

    pub fn count(&self, side: Side) -> usize {
        self.pieces(side).count()
    }

    /// Validates `mv` against the piece on its origin and returns the resulting board.
    /// The receiver is left untouched.
    pub fn apply(&self, mv: Move) -> Result<Board> {
        self.validate(mv)?;
        Ok(self.play(mv))
    }

    /// Transition without validation, for moves that came out of move generation.
    pub(crate) fn play(&self, mv: Move) -> Board {
        let mut next = *self;
        if let Some(cap) = mv.captured {
            next.set(cap, Cell::Empty);
        }
        let mut piece = next.get(mv.from);
        next.set(mv.from, Cell::Empty);
        if let Some(side) = piece.side() {
            if piece.is_man() && mv.to.row() == side.promotion_row() {
                piece = piece.crowned();
            }
        }
        next.set(mv.to, piece);
        next
    }

    fn validate(&self, mv: Move) -> Result<()> {
        let invalid = |reason| EngineError::InvalidMove { mv, reason };
        let piece = self.get(mv.from);
        let side = piece.side().ok_or_else(|| invalid("origin square is empty"))?;
        if !self.get(mv.to).is_empty() {
            return Err(invalid("destination square is occupied"));
        }
        let (dr, dc) = mv.from.delta(mv.to);
        if dr == 0 || dr.abs() != dc.abs() {
            return Err(invalid("destination is not on a diagonal"));
        }
        let dist = dr.abs();
        let (sr, sc) = (dr.signum(), dc.signum());
        let between = (1..dist).filter_map(move |k| mv.from.offset(sr * k, sc * k));

        match mv.captured {
            None => {
                if piece.is_man() {
                    if dist != 1 || dr != side.forward() {
                        return Err(invalid("a man steps one square forward"));
                    }
                } else if between.clone().any(|s| !self.get(s).is_empty()) {
                    return Err(invalid("path is blocked"));
                }
            }
            Some(cap) => {
                if self.get(cap).side() != Some(side.opponent()) {
                    return Err(invalid("captured square holds no opposing piece"));
                }
                if !between.clone().any(|s| s == cap) {
                    return Err(invalid("captured square is not between origin and destination"));
                }
                if piece.is_man() && dist != 2 {
                    return Err(invalid("a man jumps exactly one square"));
                }
                if between.clone().any(|s| s != cap && !self.get(s).is_empty()) {
                    return Err(invalid("path is blocked"));
                }
            }
        }
        Ok(())
    }

    /// Parses an 8-line diagram, row 0 first. See [`Cell::from_char`] for the symbols.
    pub fn from_diagram(text: &str) -> Result<Board> {
        let rows: Vec<&str> = text.lines().map(str::trim).filter(|l| !l.is_empty()).collect();
        if rows.len() != 8 {
            return Err(EngineError::InvalidBoard(format!("expected 8 rows, found {}", rows.len())));
        }
        let mut board = Board::empty();
        for (r, line) in rows.iter().enumerate() {
            let cells: Vec<char> = line.chars().filter(|c| !c.is_whitespace()).collect();
            if cells.len() != 8 {
                return Err(EngineError::InvalidBoard(format!("row {r} has {} cells", cells.len())));
            }
            for (c, ch) in cells.into_iter().enumerate() {
                let cell = Cell::from_char(ch)
                    .ok_or_else(|| EngineError::InvalidBoard(format!("unknown symbol '{ch}' in row {r}")))?;
                if let Some(sq) = Square::new(r as u8, c as u8) {
                    board.set(sq, cell);
                }
            }
        }
        Ok(board)
    }
}

impl FromStr for Board {
    type Err = EngineError;
    fn from_str(s: &str) -> Result<Self> { Board::from_diagram(s) }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            let line: String = row.iter().map(|c| c.to_char()).collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\n{self}")
    }
}
