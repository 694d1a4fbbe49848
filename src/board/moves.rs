use std::fmt;

use super::square::Square;
use crate::error::{EngineError, Result};

/// One piece relocation. `captured` is the opposing piece removed by a jump.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub captured: Option<Square>,
}

impl Move {
    pub fn step(from: Square, to: Square) -> Move {
        Move { from, to, captured: None }
    }

    pub fn capture(from: Square, to: Square, captured: Square) -> Move {
        Move { from, to, captured: Some(captured) }
    }

    pub fn is_capture(&self) -> bool { self.captured.is_some() }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sep = if self.is_capture() { 'x' } else { '-' };
        write!(f, "{}{}{}", self.from, sep, self.to)
    }
}

/// Parses `c3d4`, `c3-d4` or `c3xe5` into origin and destination.
/// The captured square is not part of the text; match the pair against a move set.
pub fn parse_squares(text: &str) -> Result<(Square, Square)> {
    let cleaned: String = text.trim().chars().filter(|c| !matches!(c, '-' | 'x' | ':' | ' ')).collect();
    if cleaned.len() != 4 || !cleaned.is_ascii() {
        return Err(EngineError::Notation(format!("expected two squares, got '{text}'")));
    }
    Ok((cleaned[0..2].parse()?, cleaned[2..4].parse()?))
}

/// Moves played by one side before the opponent replies; more than one only for capture chains.
/// Never empty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Turn(Vec<Move>);

impl Turn {
    /// `None` for an empty sequence.
    pub fn new(moves: Vec<Move>) -> Option<Turn> {
        if moves.is_empty() { None } else { Some(Turn(moves)) }
    }

    pub fn single(mv: Move) -> Turn { Turn(vec![mv]) }

    /// This turn extended by one more jump.
    pub(crate) fn then(&self, mv: Move) -> Turn {
        let mut moves = self.0.clone();
        moves.push(mv);
        Turn(moves)
    }

    pub fn moves(&self) -> &[Move] { &self.0 }
    pub fn into_moves(self) -> Vec<Move> { self.0 }
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize { self.0.len() }
    pub fn first(&self) -> Move { self.0[0] }

    pub fn captures(&self) -> usize {
        self.0.iter().filter(|m| m.is_capture()).count()
    }

    /// Each move after the first starts where the previous one landed.
    pub fn is_connected(&self) -> bool {
        self.0.windows(2).all(|w| w[1].from == w[0].to)
    }
}

impl<'a> IntoIterator for &'a Turn {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;
    fn into_iter(self) -> Self::IntoIter { self.0.iter() }
}

impl fmt::Display for Turn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some((first, rest)) = self.0.split_first() {
            write!(f, "{first}")?;
            for m in rest {
                write!(f, "x{}", m.to)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notation_accepts_plain_dashed_and_capture_forms() {
        let c3: Square = "c3".parse().unwrap();
        let d4: Square = "d4".parse().unwrap();
        assert_eq!(parse_squares("c3d4").unwrap(), (c3, d4));
        assert_eq!(parse_squares("c3-d4").unwrap(), (c3, d4));
        assert_eq!(parse_squares(" c3xd4 ").unwrap(), (c3, d4));
        assert!(parse_squares("c3").is_err());
    }

    #[test]
    fn chain_prints_every_landing_square() {
        let sq = |s: &str| s.parse::<Square>().unwrap();
        let turn = Turn::single(Move::capture(sq("c3"), sq("e5"), sq("d4")))
            .then(Move::capture(sq("e5"), sq("g7"), sq("f6")));
        assert_eq!(turn.to_string(), "c3xe5xg7");
        assert!(turn.is_connected());
        assert_eq!(turn.captures(), 2);
        assert_eq!(turn.first().to_string(), "c3xe5");
    }

    #[test]
    fn empty_sequence_is_not_a_turn() {
        assert_eq!(Turn::new(Vec::new()), None);
        let sq = |s: &str| s.parse::<Square>().unwrap();
        assert_eq!(Turn::new(vec![Move::step(sq("c3"), sq("d4"))]).map(|t| t.len()), Some(1));
    }
}
