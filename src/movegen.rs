use rand::seq::SliceRandom;
use rand::Rng;

use crate::board::{Board, Cell, Move, Side, Square, Turn, DIAGONALS};

/// Legal moves for a side or a single piece.
///
/// When `must_capture` is set every move in `moves` is a capture. For a single
/// piece the flag just reports whether that piece has a capture.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MoveSet {
    pub moves: Vec<Move>,
    pub must_capture: bool,
}

impl MoveSet {
    pub fn is_empty(&self) -> bool { self.moves.is_empty() }
    pub fn len(&self) -> usize { self.moves.len() }
    pub fn iter(&self) -> std::slice::Iter<'_, Move> { self.moves.iter() }
    pub fn contains(&self, mv: &Move) -> bool { self.moves.contains(mv) }

    /// The move going from `from` to `to`, if there is one.
    pub fn find(&self, from: Square, to: Square) -> Option<Move> {
        self.moves.iter().copied().find(|m| m.from == from && m.to == to)
    }

    /// Distinct origin squares, in move order.
    pub fn origins(&self) -> Vec<Square> {
        let mut out: Vec<Square> = Vec::new();
        for m in &self.moves {
            if !out.contains(&m.from) { out.push(m.from); }
        }
        out
    }

    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.moves.shuffle(rng);
    }
}

/// Moves for every piece of `side`. Captures anywhere on the board exclude all simple moves.
pub fn legal_moves(board: &Board, side: Side) -> MoveSet {
    let mut captures = Vec::new();
    let mut steps = Vec::new();
    for sq in board.pieces(side) {
        let piece = board.get(sq);
        push_captures(board, sq, piece, &mut captures);
        if captures.is_empty() {
            push_steps(board, sq, piece, &mut steps);
        }
    }
    if captures.is_empty() {
        MoveSet { moves: steps, must_capture: false }
    } else {
        MoveSet { moves: captures, must_capture: true }
    }
}

/// Moves of the single piece on `sq`: its captures if it has any, its simple moves otherwise.
/// Used to continue a capture chain one jump at a time.
pub fn legal_moves_for_square(board: &Board, sq: Square) -> MoveSet {
    let piece = board.get(sq);
    if piece.is_empty() { return MoveSet::default(); }
    let mut moves = Vec::new();
    push_captures(board, sq, piece, &mut moves);
    if !moves.is_empty() {
        return MoveSet { moves, must_capture: true };
    }
    push_steps(board, sq, piece, &mut moves);
    MoveSet { moves, must_capture: false }
}

pub fn has_capture(board: &Board, side: Side) -> bool {
    let mut buf = Vec::new();
    board.pieces(side).any(|sq| {
        push_captures(board, sq, board.get(sq), &mut buf);
        !buf.is_empty()
    })
}

fn push_captures(board: &Board, from: Square, piece: Cell, out: &mut Vec<Move>) {
    let Some(side) = piece.side() else { return };
    let enemy = |sq: Square| board.get(sq).side() == Some(side.opponent());

    if piece.is_man() {
        // Men jump in all four directions, backward included.
        for (dr, dc) in DIAGONALS {
            let (Some(mid), Some(land)) = (from.offset(dr, dc), from.offset(2 * dr, 2 * dc)) else { continue };
            if enemy(mid) && board.get(land).is_empty() {
                out.push(Move::capture(from, land, mid));
            }
        }
        return;
    }

    for dir in DIAGONALS {
        let mut victim: Option<Square> = None;
        for sq in from.ray(dir) {
            let cell = board.get(sq);
            match (cell.is_empty(), victim) {
                (true, Some(v)) => out.push(Move::capture(from, sq, v)),
                (true, None) => {}
                (false, None) if enemy(sq) => victim = Some(sq),
                // own piece first, or a second piece behind the victim
                (false, _) => break,
            }
        }
    }
}

fn push_steps(board: &Board, from: Square, piece: Cell, out: &mut Vec<Move>) {
    let Some(side) = piece.side() else { return };
    if piece.is_man() {
        for dc in [-1, 1] {
            if let Some(to) = from.offset(side.forward(), dc) {
                if board.get(to).is_empty() { out.push(Move::step(from, to)); }
            }
        }
        return;
    }
    for dir in DIAGONALS {
        for to in from.ray(dir).take_while(|&s| board.get(s).is_empty()) {
            out.push(Move::step(from, to));
        }
    }
}

/// Every complete turn for `side`, capture chains followed to their end, with the board after it.
pub fn legal_turns(board: &Board, side: Side) -> Vec<(Turn, Board)> {
    let set = legal_moves(board, side);
    let mut out = Vec::with_capacity(set.len());
    for mv in set.moves {
        let child = board.play(mv);
        if mv.is_capture() {
            extend_chain(&child, mv.to, Turn::single(mv), &mut out);
        } else {
            out.push((Turn::single(mv), child));
        }
    }
    out
}

fn extend_chain(board: &Board, at: Square, prefix: Turn, out: &mut Vec<(Turn, Board)>) {
    let next = legal_moves_for_square(board, at);
    if !next.must_capture {
        out.push((prefix, *board));
        return;
    }
    for mv in next.moves {
        extend_chain(&board.play(mv), mv.to, prefix.then(mv), out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn piece_with_capture_reports_only_captures() {
        let board = Board::from_diagram(
            "........
             ........
             ........
             ........
             ...b....
             ..w.....
             ........
             ........",
        ).unwrap();
        let c3 = Square::new(5, 2).unwrap();
        let set = legal_moves_for_square(&board, c3);
        assert!(set.must_capture);
        assert_eq!(set.moves, vec![Move::capture(c3, Square::new(3, 4).unwrap(), Square::new(4, 3).unwrap())]);
    }

    #[test]
    fn empty_square_has_no_moves() {
        let set = legal_moves_for_square(&Board::startpos(), Square::new(4, 4).unwrap());
        assert!(set.is_empty() && !set.must_capture);
    }
}
