#![allow(dead_code)]
use checkerbot::{Board, Square};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

pub fn sq(name: &str) -> Square {
    name.parse().expect("valid square")
}

pub fn board(diagram: &str) -> Board {
    Board::from_diagram(diagram).expect("valid diagram")
}

/// Positions reached by random play from the start, for property-style checks.
pub fn random_positions(seed: u64, games: usize, max_turns: usize) -> Vec<(Board, checkerbot::Side)> {
    use checkerbot::movegen::legal_turns;
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut out = Vec::new();
    for _ in 0..games {
        let mut b = Board::startpos();
        let mut side = checkerbot::Side::White;
        for _ in 0..max_turns {
            out.push((b, side));
            let mut turns = legal_turns(&b, side);
            if turns.is_empty() { break; }
            b = turns.swap_remove(rng.gen_range(0..turns.len())).1;
            side = side.opponent();
        }
    }
    out
}
