use clap::Parser;
use checkerbot::search::{ScoringMode, SearchParams};
use checkerbot::selfplay::{generate_games_with, write_jsonl, SelfPlayParams};
use checkerbot::GameStatus;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "checkerbot-selfplay", about = "Play engine-versus-engine games and write them as JSON lines")]
struct Args {
    #[arg(long, default_value_t = 20)]
    games: usize,
    #[arg(long, default_value_t = 120)]
    max_turns: u32,
    #[arg(long, default_value_t = 2)]
    random_opening_turns: u32,
    #[arg(long, default_value_t = 3)]
    white_depth: u32,
    #[arg(long, default_value_t = 3)]
    black_depth: u32,
    #[arg(long, default_value = "NumberAndPotential")]
    white_mode: String,
    #[arg(long, default_value = "NumberAndPotential")]
    black_mode: String,
    #[arg(long, default_value_t = 1)]
    threads: usize,
    #[arg(long, default_value_t = 42)]
    seed: u64,
    #[arg(long, default_value = "out/selfplay.jsonl")]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let a = Args::parse();
    let white_mode: ScoringMode = a.white_mode.parse()?;
    let black_mode: ScoringMode = a.black_mode.parse()?;
    let base = SearchParams { threads: a.threads.max(1), ..SearchParams::default() };
    let params = SelfPlayParams {
        games: a.games,
        max_turns: a.max_turns,
        random_opening_turns: a.random_opening_turns,
        white: SearchParams { depth: a.white_depth, mode: white_mode, ..base },
        black: SearchParams { depth: a.black_depth, mode: black_mode, ..base },
        seed: a.seed,
    };

    let pb = ProgressBar::new(a.games as u64);
    pb.set_style(
        ProgressStyle::with_template("{bar:40} {pos}/{len} games {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    let (mut white_wins, mut black_wins, mut draws) = (0, 0, 0);
    let games = generate_games_with(&params, |_, g| {
        match g.status {
            GameStatus::Won(checkerbot::Side::White) => white_wins += 1,
            GameStatus::Won(checkerbot::Side::Black) => black_wins += 1,
            _ => draws += 1,
        }
        pb.set_message(format!("W {white_wins} / B {black_wins} / D {draws}"));
        pb.inc(1);
    });
    pb.finish();

    write_jsonl(&games, &a.out)?;
    eprintln!("Wrote {} games to {}", games.len(), a.out.display());
    Ok(())
}
