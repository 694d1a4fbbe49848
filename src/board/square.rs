use std::fmt;
use std::str::FromStr;

use crate::error::EngineError;

/// The four diagonal directions as (row, col) deltas.
pub const DIAGONALS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

/// A square on the 8x8 grid. Row 0 is the top of the board (rank 8), column 0 is file `a`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square {
    row: u8,
    col: u8,
}

impl Square {
    pub const fn new(row: u8, col: u8) -> Option<Square> {
        if row < 8 && col < 8 { Some(Square { row, col }) } else { None }
    }

    pub fn row(self) -> u8 { self.row }
    pub fn col(self) -> u8 { self.col }

    /// Playable squares are the dark ones.
    pub fn is_dark(self) -> bool { (self.row + self.col) % 2 == 1 }

    pub fn offset(self, dr: i8, dc: i8) -> Option<Square> {
        let r = self.row as i8 + dr;
        let c = self.col as i8 + dc;
        if (0..8).contains(&r) && (0..8).contains(&c) {
            Some(Square { row: r as u8, col: c as u8 })
        } else {
            None
        }
    }

    /// Squares along one diagonal ray, nearest first, stopping at the edge.
    pub fn ray(self, (dr, dc): (i8, i8)) -> impl Iterator<Item = Square> {
        let mut cur = Some(self);
        std::iter::from_fn(move || {
            cur = cur.and_then(|s| s.offset(dr, dc));
            cur
        })
    }

    pub(crate) fn delta(self, to: Square) -> (i8, i8) {
        (to.row as i8 - self.row as i8, to.col as i8 - self.col as i8)
    }

    pub fn all() -> impl Iterator<Item = Square> {
        (0..8u8).flat_map(|row| (0..8u8).map(move |col| Square { row, col }))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (b'a' + self.col) as char, 8 - self.row)
    }
}

impl FromStr for Square {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.trim().as_bytes();
        if bytes.len() != 2 { return Err(EngineError::Notation(format!("bad square '{s}'"))); }
        let file = bytes[0].to_ascii_lowercase();
        let rank = bytes[1];
        if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
            return Err(EngineError::Notation(format!("bad square '{s}'")));
        }
        Ok(Square { row: 8 - (rank - b'0'), col: file - b'a' })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn algebraic_names_map_rank_one_to_row_seven() {
        let sq: Square = "a1".parse().unwrap();
        assert_eq!((sq.row(), sq.col()), (7, 0));
        let sq: Square = "h8".parse().unwrap();
        assert_eq!((sq.row(), sq.col()), (0, 7));
        assert_eq!(Square::new(5, 2).unwrap().to_string(), "c3");
        assert!("i3".parse::<Square>().is_err());
        assert!("c9".parse::<Square>().is_err());
    }

    #[test]
    fn ray_stops_at_the_edge() {
        let sq = Square::new(2, 1).unwrap();
        let up_left: Vec<Square> = sq.ray((-1, -1)).collect();
        assert_eq!(up_left, vec![Square::new(1, 0).unwrap()]);
        assert_eq!(sq.ray((1, 1)).count(), 5);
        assert!(Square::new(8, 0).is_none());
    }
}
