use anyhow::Context;
use log::{info, warn};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::fs::{create_dir_all, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use std::time::Instant;

use crate::board::Side;
use crate::game::{Game, GameStatus};
use crate::movegen::legal_turns;
use crate::search::{SearchParams, Searcher};

#[derive(Clone, Debug)]
pub struct SelfPlayParams {
    pub games: usize,
    pub max_turns: u32,
    /// Turns played uniformly at random before the bots take over.
    pub random_opening_turns: u32,
    pub white: SearchParams,
    pub black: SearchParams,
    pub seed: u64,
}

impl Default for SelfPlayParams {
    fn default() -> Self {
        Self {
            games: 10,
            max_turns: 120,
            random_opening_turns: 2,
            white: SearchParams::default(),
            black: SearchParams::default(),
            seed: 42,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    /// Turns in notation, white first.
    pub turns: Vec<String>,
    pub status: GameStatus,
}

pub fn generate_games(params: &SelfPlayParams) -> Vec<GameRecord> {
    generate_games_with(params, |_, _| {})
}

/// Plays `params.games` games, calling `on_game` after each one finishes.
pub fn generate_games_with<F: FnMut(usize, &GameRecord)>(params: &SelfPlayParams, mut on_game: F) -> Vec<GameRecord> {
    let mut games = Vec::with_capacity(params.games);
    for gi in 0..params.games {
        let record = play_game(params, gi);
        on_game(gi, &record);
        games.push(record);
    }
    games
}

pub fn play_game(params: &SelfPlayParams, index: usize) -> GameRecord {
    let t0 = Instant::now();
    let game_seed = params.seed ^ (index as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15);
    let mut rng = SmallRng::seed_from_u64(game_seed);
    let mut white = Searcher::new(SearchParams { seed: rng.gen(), ..params.white });
    let mut black = Searcher::new(SearchParams { seed: rng.gen(), ..params.black });

    let mut game = Game::new();
    let mut record = GameRecord { turns: Vec::new(), status: GameStatus::InProgress };
    loop {
        let status = game.status(params.max_turns);
        if status != GameStatus::InProgress {
            record.status = status;
            break;
        }
        let played = if game.turns_played() < params.random_opening_turns {
            let mut turns = legal_turns(game.board(), game.side_to_move());
            let turn = turns.swap_remove(rng.gen_range(0..turns.len())).0;
            game.play_turn(&turn).map(|_| turn)
        } else {
            let searcher = match game.side_to_move() {
                Side::White => &mut white,
                Side::Black => &mut black,
            };
            game.play_bot_turn(searcher)
        };
        match played {
            Ok(turn) => record.turns.push(turn.to_string()),
            Err(e) => {
                warn!("game {index} stopped: {e}");
                break;
            }
        }
    }
    info!(
        "game {} finished {:?} after {} turns in {} ms",
        index,
        record.status,
        record.turns.len(),
        t0.elapsed().as_millis()
    );
    record
}

pub fn write_jsonl<P: AsRef<Path>>(games: &[GameRecord], path: P) -> anyhow::Result<()> {
    let path = path.as_ref();
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        create_dir_all(dir)?;
    }
    let mut w = BufWriter::new(File::create(path).with_context(|| format!("creating {}", path.display()))?);
    for g in games {
        writeln!(w, "{}", serde_json::to_string(g)?)?;
    }
    w.flush()?;
    Ok(())
}

pub fn read_jsonl<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<GameRecord>> {
    let path = path.as_ref();
    let rdr = BufReader::new(File::open(path).with_context(|| format!("opening {}", path.display()))?);
    let mut out = Vec::new();
    for (i, line) in rdr.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() { continue; }
        out.push(serde_json::from_str(&line).with_context(|| format!("line {} of {}", i + 1, path.display()))?);
    }
    Ok(out)
}
