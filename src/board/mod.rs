pub mod moves;
pub mod position;
pub mod square;

pub use moves::{Move, Turn};
pub use position::Board;
pub use square::{Square, DIAGONALS};

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Starts on rows 5..=7 and moves first, toward row 0.
    White,
    /// Starts on rows 0..=2, toward row 7.
    Black,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }

    /// Row delta of a man's step.
    pub fn forward(self) -> i8 {
        match self {
            Side::White => -1,
            Side::Black => 1,
        }
    }

    pub fn promotion_row(self) -> u8 {
        match self {
            Side::White => 0,
            Side::Black => 7,
        }
    }

    /// Rows a man of this side has advanced from its own back rank.
    pub fn advancement(self, row: u8) -> u8 {
        match self {
            Side::White => 7 - row,
            Side::Black => row,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Side::White => "white",
            Side::Black => "black",
        })
    }
}

/// Contents of one square. Odd discriminants are white, even are black, above two are kings.
#[repr(u8)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Cell {
    #[default]
    Empty = 0,
    WhiteMan = 1,
    BlackMan = 2,
    WhiteKing = 3,
    BlackKing = 4,
}

impl Cell {
    pub fn man(side: Side) -> Cell {
        match side {
            Side::White => Cell::WhiteMan,
            Side::Black => Cell::BlackMan,
        }
    }

    pub fn king(side: Side) -> Cell {
        match side {
            Side::White => Cell::WhiteKing,
            Side::Black => Cell::BlackKing,
        }
    }

    pub fn side(self) -> Option<Side> {
        match self as u8 {
            0 => None,
            v if v % 2 == 1 => Some(Side::White),
            _ => Some(Side::Black),
        }
    }

    pub fn is_empty(self) -> bool { self == Cell::Empty }
    pub fn is_king(self) -> bool { self as u8 > 2 }
    pub fn is_man(self) -> bool { matches!(self, Cell::WhiteMan | Cell::BlackMan) }

    /// Kings and empty cells are returned unchanged.
    pub fn crowned(self) -> Cell {
        match self {
            Cell::WhiteMan => Cell::WhiteKing,
            Cell::BlackMan => Cell::BlackKing,
            other => other,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::WhiteMan => 'w',
            Cell::BlackMan => 'b',
            Cell::WhiteKing => 'W',
            Cell::BlackKing => 'B',
        }
    }

    pub fn from_char(c: char) -> Option<Cell> {
        match c {
            '.' | '_' => Some(Cell::Empty),
            'w' => Some(Cell::WhiteMan),
            'b' => Some(Cell::BlackMan),
            'W' => Some(Cell::WhiteKing),
            'B' => Some(Cell::BlackKing),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parity_encodes_color_and_rank_encodes_kingship() {
        assert_eq!(Cell::WhiteMan.side(), Some(Side::White));
        assert_eq!(Cell::WhiteKing.side(), Some(Side::White));
        assert_eq!(Cell::BlackMan.side(), Some(Side::Black));
        assert_eq!(Cell::BlackKing.side(), Some(Side::Black));
        assert_eq!(Cell::Empty.side(), None);
        assert!(Cell::BlackKing.is_king() && !Cell::BlackMan.is_king());
        assert_eq!(Cell::BlackMan.crowned(), Cell::BlackKing);
        assert_eq!(Cell::WhiteKing.crowned(), Cell::WhiteKing);
    }
}
