pub mod alphabeta;
pub mod eval;

pub use alphabeta::{find_best_turn, SearchParams, SearchResult, Searcher};
pub use eval::{Evaluate, Material, ScoringMode, MAX_SCORE, WIN_SCORE};
