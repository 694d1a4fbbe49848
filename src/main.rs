use anyhow::Result;
use checkerbot::board::moves::parse_squares;
use checkerbot::config::Settings;
use checkerbot::{Board, Game, GameStatus, Searcher, Side};
use clap::{Parser, ValueEnum};
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Player {
    Human,
    Bot,
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Play checkers against the engine", long_about = None)]
struct Args {
    /// Path to settings.json
    #[arg(long, default_value = "settings.json")]
    settings: PathBuf,

    /// Who plays white (overrides settings)
    #[arg(long, value_enum)]
    white: Option<Player>,

    /// Who plays black (overrides settings)
    #[arg(long, value_enum)]
    black: Option<Player>,

    /// Threads for root-split search (overrides settings)
    #[arg(long)]
    threads: Option<usize>,

    /// Turn cap before the game is drawn (overrides settings)
    #[arg(long)]
    max_turns: Option<u32>,
}

enum Input {
    Move(checkerbot::Move),
    Undo,
    Restart,
    Quit,
}

fn print_board(board: &Board) {
    println!();
    for (r, line) in board.to_string().lines().enumerate() {
        let cells: Vec<String> = line.chars().map(|c| c.to_string()).collect();
        println!("{} {}", 8 - r, cells.join(" "));
    }
    println!("  a b c d e f g h");
}

fn read_human_move(game: &Game) -> Result<Input> {
    let legal = game.legal_moves();
    loop {
        match game.chain_square() {
            Some(sq) => print!("Continue capturing from {sq}: "),
            None => print!("Your move (e.g. c3d4, 'undo', 'restart', 'quit'): "),
        }
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 { return Ok(Input::Quit); }
        let input = input.trim();
        match input {
            "quit" => return Ok(Input::Quit),
            "undo" => return Ok(Input::Undo),
            "restart" => return Ok(Input::Restart),
            _ => {}
        }
        match parse_squares(input) {
            Ok((from, to)) => {
                if let Some(mv) = legal.find(from, to) { return Ok(Input::Move(mv)); }
                let options: Vec<String> = legal.iter().map(|m| m.to_string()).collect();
                println!("Illegal move! Legal moves: {}", options.join(" "));
            }
            Err(e) => println!("{e}"),
        }
    }
}

/// Settings file with the command-line overrides applied.
fn load_settings(args: &Args) -> Result<Settings> {
    let mut settings = Settings::load_or_default(&args.settings)?;
    if let Some(p) = args.white { settings.bot.is_white_bot = p == Player::Bot; }
    if let Some(p) = args.black { settings.bot.is_black_bot = p == Player::Bot; }
    if let Some(t) = args.threads { settings.bot.threads = t; }
    Ok(settings)
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut settings = load_settings(&args)?;
    let mut max_turns = args.max_turns.unwrap_or(settings.game.max_num_turns);

    // Fail on bad scoring/optimization strings before the first move.
    let mut white = Searcher::new(settings.search_params(Side::White)?);
    let mut black = Searcher::new(settings.search_params(Side::Black)?);

    let start = Instant::now();
    let mut game = Game::new();
    loop {
        let status = game.status(max_turns);
        if status != GameStatus::InProgress {
            print_board(game.board());
            match status {
                GameStatus::Won(side) => println!("\n{side} wins after {} turns!", game.turns_played()),
                GameStatus::Draw => println!("\nDraw: {max_turns} turns played."),
                GameStatus::InProgress => {}
            }
            break;
        }

        let side = game.side_to_move();
        if game.chain_square().is_none() {
            println!("\n{side} to move (turn {})", game.turns_played() + 1);
        }
        print_board(game.board());

        if settings.is_bot(side) {
            let searcher = match side {
                Side::White => &mut white,
                Side::Black => &mut black,
            };
            let turn = game.play_bot_turn(searcher)?;
            println!("Engine plays: {turn}");
            continue;
        }

        match read_human_move(&game)? {
            Input::Quit => break,
            Input::Move(mv) => { game.play(mv)?; }
            Input::Restart => {
                settings = load_settings(&args)?;
                max_turns = args.max_turns.unwrap_or(settings.game.max_num_turns);
                white = Searcher::new(settings.search_params(Side::White)?);
                black = Searcher::new(settings.search_params(Side::Black)?);
                game.reset();
                println!("\nNew game.");
            }
            Input::Undo => {
                // Against a bot, take back its reply as well.
                let mid_chain = game.chain_square().is_some();
                if game.undo() && !mid_chain && settings.is_bot(game.side_to_move()) {
                    game.undo();
                }
            }
        }
    }
    log::info!("game time: {} ms", start.elapsed().as_millis());
    Ok(())
}
