use log::debug;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use std::time::Instant;

use crate::board::{Board, Move, Side, Square, Turn};
use crate::error::{EngineError, Result};
use crate::movegen::{legal_moves, legal_moves_for_square, MoveSet};
use crate::search::eval::{Evaluate, Material, ScoringMode, MAX_SCORE, WIN_SCORE};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchParams {
    /// Opponent replies looked at after the root turn. Zero is a one-ply lookahead.
    pub depth: u32,
    pub mode: ScoringMode,
    /// Alpha-beta cutoffs. Off means plain minimax; the chosen turn is the same either way.
    pub pruning: bool,
    pub seed: u64,
    pub threads: usize,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self { depth: 3, mode: ScoringMode::default(), pruning: true, seed: 0, threads: 1 }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    pub turn: Turn,
    pub score: f64,
    pub nodes: u64,
    /// Workers the root split ran on; 1 for a serial search.
    pub threads: usize,
}

/// Picks a full turn for a side. The root mover minimizes the evaluator score, the opponent maximizes.
pub struct Searcher<E: Evaluate = Material> {
    eval: E,
    params: SearchParams,
    rng: SmallRng,
    nodes: u64,
    pool: Option<ThreadPool>,
}

impl Searcher<Material> {
    pub fn new(params: SearchParams) -> Self {
        Self::with_evaluator(params, Material::new(params.mode))
    }
}

impl<E: Evaluate> Searcher<E> {
    pub fn with_evaluator(params: SearchParams, eval: E) -> Self {
        Self { eval, params, rng: SmallRng::seed_from_u64(params.seed), nodes: 0, pool: None }
    }

    pub fn params(&self) -> &SearchParams { &self.params }
    pub fn nodes(&self) -> u64 { self.nodes }

    pub fn set_depth(&mut self, depth: u32) { self.params.depth = depth; }
    pub fn set_threads(&mut self, threads: usize) { self.params.threads = threads.max(1); }

    /// Restarts the move-order random stream.
    pub fn reseed(&mut self, seed: u64) {
        self.params.seed = seed;
        self.rng = SmallRng::seed_from_u64(seed);
    }

    pub fn find_best_turn(&mut self, board: &Board, side: Side) -> Result<Turn> {
        self.search(board, side).map(|r| r.turn)
    }

    pub fn search(&mut self, board: &Board, side: Side) -> Result<SearchResult> {
        let mut root = legal_moves(board, side);
        if root.is_empty() {
            return Err(EngineError::NoLegalMoves(side));
        }
        root.shuffle(&mut self.rng);
        // One stream per root move for the chain nodes below it, so serial and parallel agree.
        let seeds: Vec<u64> = root.iter().map(|_| self.rng.gen()).collect();

        let t0 = Instant::now();
        let split = self.params.threads > 1 && root.len() > 1;
        if split {
            self.ensure_pool()?;
        }
        let (best, threads) = match self.pool.as_ref().filter(|_| split) {
            Some(pool) => pool.install(|| {
                (self.search_parallel(board, side, &root, &seeds), rayon::current_num_threads())
            }),
            None => (self.search_serial(board, side, &root, &seeds), 1),
        };
        self.nodes = best.nodes;
        let turn = Turn::new(best.line).ok_or(EngineError::NoLegalMoves(side))?;
        debug!(
            "search {} depth={} mode={} threads={} turn={} score={:.4} nodes={} elapsed={:.3}s",
            side,
            self.params.depth,
            self.params.mode,
            threads,
            turn,
            best.score,
            best.nodes,
            t0.elapsed().as_secs_f64()
        );
        Ok(SearchResult { turn, score: best.score, nodes: best.nodes, threads })
    }

    /// Builds the root-split pool, or rebuilds it when the thread count changed.
    fn ensure_pool(&mut self) -> Result<()> {
        let threads = self.params.threads;
        if self.pool.as_ref().map_or(false, |p| p.current_num_threads() == threads) {
            return Ok(());
        }
        let pool = ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .map_err(|e| EngineError::Configuration(format!("cannot start {threads} search threads: {e}")))?;
        self.pool = Some(pool);
        Ok(())
    }

    fn walker(&self, root: Side) -> Walker<'_, E> {
        Walker { eval: &self.eval, root, limit: self.params.depth, pruning: self.params.pruning, nodes: 0 }
    }

    fn search_serial(&self, board: &Board, side: Side, root: &MoveSet, seeds: &[u64]) -> Best {
        let mut w = self.walker(side);
        let mut best = Best::new();
        for (&mv, &seed) in root.iter().zip(seeds) {
            let (score, line) = w.root_move(board, side, mv, seed, best.score);
            best.offer(score, line);
        }
        best.nodes = w.nodes;
        best
    }

    // Root split: each root move gets a full window, reduced in shuffled order by the same rule.
    fn search_parallel(&self, board: &Board, side: Side, root: &MoveSet, seeds: &[u64]) -> Best {
        let results: Vec<(f64, Vec<Move>, u64)> = root
            .moves
            .par_iter()
            .zip(seeds.par_iter())
            .map(|(&mv, &seed)| {
                let mut w = self.walker(side);
                let (score, line) = w.root_move(board, side, mv, seed, f64::INFINITY);
                (score, line, w.nodes)
            })
            .collect();

        let mut best = Best::new();
        for (score, line, n) in results {
            best.nodes += n;
            best.offer(score, line);
        }
        best
    }
}

/// Lowest-scoring root line seen so far. Ties keep the earlier line.
struct Best {
    score: f64,
    line: Vec<Move>,
    nodes: u64,
}

impl Best {
    fn new() -> Self {
        Self { score: f64::INFINITY, line: Vec::new(), nodes: 0 }
    }

    fn offer(&mut self, score: f64, line: Vec<Move>) {
        if score < self.score {
            self.score = score;
            self.line = line;
        }
    }
}

/// One recursive tree walk. Owns nothing but its counter, so root tasks can run side by side.
struct Walker<'a, E> {
    eval: &'a E,
    root: Side,
    limit: u32,
    pruning: bool,
    nodes: u64,
}

impl<'a, E: Evaluate> Walker<'a, E> {
    fn root_move(&mut self, board: &Board, side: Side, mv: Move, seed: u64, beta: f64) -> (f64, Vec<Move>) {
        let child = board.play(mv);
        if mv.is_capture() {
            let mut rng = SmallRng::seed_from_u64(seed);
            let (score, mut rest) = self.root_chain(&child, side, mv.to, beta, &mut rng);
            rest.insert(0, mv);
            (score, rest)
        } else {
            (self.alphabeta(&child, side.opponent(), 0, f64::NEG_INFINITY, beta, None), vec![mv])
        }
    }

    /// Root side continuing a capture from `at`. Returns the best score and the rest of the chain.
    fn root_chain(
        &mut self,
        board: &Board,
        side: Side,
        at: Square,
        beta: f64,
        rng: &mut SmallRng,
    ) -> (f64, Vec<Move>) {
        self.nodes += 1;
        let mut next = legal_moves_for_square(board, at);
        if !next.must_capture {
            return (self.alphabeta(board, side.opponent(), 0, f64::NEG_INFINITY, beta, None), Vec::new());
        }
        next.shuffle(rng);
        let mut best_score = f64::INFINITY;
        let mut best_line = Vec::new();
        for mv in next.moves {
            let bound = beta.min(best_score);
            let (score, mut rest) = self.root_chain(&board.play(mv), side, mv.to, bound, rng);
            if score < best_score {
                rest.insert(0, mv);
                best_score = score;
                best_line = rest;
            }
        }
        (best_score, best_line)
    }

    fn loss_for(&self, side: Side) -> f64 {
        if side == self.root { MAX_SCORE } else { WIN_SCORE }
    }

    /// `depth` counts completed turns after the root turn. A capture keeps the same side
    /// and depth until the chain runs out.
    fn alphabeta(
        &mut self,
        board: &Board,
        side: Side,
        depth: u32,
        mut alpha: f64,
        mut beta: f64,
        chain: Option<Square>,
    ) -> f64 {
        self.nodes += 1;
        let set = match chain {
            Some(at) => {
                let next = legal_moves_for_square(board, at);
                if !next.must_capture {
                    return self.alphabeta(board, side.opponent(), depth + 1, alpha, beta, None);
                }
                next
            }
            None => {
                if depth >= self.limit { return self.eval.score(board, self.root); }
                legal_moves(board, side)
            }
        };
        if set.is_empty() { return self.loss_for(side); }

        let minimizing = side == self.root;
        let mut best = if minimizing { f64::INFINITY } else { f64::NEG_INFINITY };
        for mv in set.moves {
            let child = board.play(mv);
            let score = if mv.is_capture() {
                self.alphabeta(&child, side, depth, alpha, beta, Some(mv.to))
            } else {
                self.alphabeta(&child, side.opponent(), depth + 1, alpha, beta, None)
            };
            if minimizing {
                if score < best { best = score; }
                if best < beta { beta = best; }
            } else {
                if score > best { best = score; }
                if best > alpha { alpha = best; }
            }
            if self.pruning && alpha >= beta { break; }
        }
        best
    }
}

/// Searches `board` for `side` with a fresh [`Searcher`].
pub fn find_best_turn(board: &Board, side: Side, depth: u32, mode: ScoringMode, seed: u64) -> Result<Turn> {
    let params = SearchParams { depth, mode, seed, ..SearchParams::default() };
    Searcher::new(params).find_best_turn(board, side)
}
