use anyhow::Context;
use checkerbot::movegen::legal_turns;
use checkerbot::perft::perft;
use checkerbot::{Board, Side};
use clap::Parser;
use rayon::prelude::*;
use std::path::PathBuf;
use std::time::Instant;

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum SideArg {
    White,
    Black,
}

#[derive(Parser, Debug)]
#[command(name = "perft", about = "Turn-count driver for checkerbot")]
struct Args {
    /// Search depth in turns
    #[arg(value_name = "DEPTH")]
    depth: u32,
    /// Board diagram file (8 rows of . w b W B); start position when absent
    #[arg(long)]
    board: Option<PathBuf>,
    /// Side to move
    #[arg(long, value_enum, default_value = "white")]
    side: SideArg,
    /// Worker threads; more than one splits the root turns across a rayon pool
    #[arg(long, default_value_t = 1)]
    threads: usize,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();
    let board = match &args.board {
        Some(path) => {
            let text = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
            Board::from_diagram(&text)?
        }
        None => Board::startpos(),
    };
    let side = match args.side {
        SideArg::White => Side::White,
        SideArg::Black => Side::Black,
    };

    let threads = args.threads.max(1);
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .with_context(|| format!("starting {threads} perft threads"))?;
    let (nodes, dt) = pool.install(|| {
        let t0 = Instant::now();
        let nodes = if threads > 1 && args.depth > 1 {
            let roots = legal_turns(&board, side);
            roots.par_iter().map(|(_, child)| perft(child, side.opponent(), args.depth - 1)).sum::<u64>()
        } else {
            perft(&board, side, args.depth)
        };
        (nodes, t0.elapsed().as_secs_f64())
    });
    let nps = if dt > 0.0 { nodes as f64 / dt } else { 0.0 };
    println!("nodes: {} elapsed: {:.3}s nps: {:.0}", nodes, dt, nps);
    Ok(())
}
