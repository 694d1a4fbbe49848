use crate::board::{Board, Side};
use crate::movegen::legal_turns;

/// Counts complete turns (capture chains followed to their end) `depth` plies deep.
pub fn perft(board: &Board, side: Side, depth: u32) -> u64 {
    if depth == 0 { return 1; }
    let turns = legal_turns(board, side);
    if depth == 1 { return turns.len() as u64; }
    let mut nodes = 0u64;
    for (_, child) in &turns {
        nodes += perft(child, side.opponent(), depth - 1);
    }
    nodes
}
