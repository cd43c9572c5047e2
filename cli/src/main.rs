use std::fmt;
use std::io::{self, BufRead};
use std::str::FromStr;

use anyhow::{Context, anyhow};
use clap::Parser;
use sweeper_core::*;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Board width
    #[arg(long, default_value_t = GameConfig::default().size.0)]
    width: Coord,

    /// Board height
    #[arg(long, default_value_t = GameConfig::default().size.1)]
    height: Coord,

    /// Number of mines
    #[arg(short, long, default_value_t = GameConfig::default().mines)]
    mines: CellCount,

    /// Force a seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Print the whole board, mines included, before playing
    #[arg(long)]
    disclose: bool,

    /// Moves to play in order, `r:X,Y` reveals and `f:X,Y` toggles a flag.
    /// Moves are read from stdin, one per line, when none are given.
    moves: Vec<Move>,
}

#[derive(Copy, Clone, Debug, PartialEq)]
enum Move {
    Reveal(Coord2),
    Flag(Coord2),
}

impl FromStr for Move {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        let (kind, coords) = s
            .trim()
            .split_once(':')
            .ok_or_else(|| anyhow!("expected `r:X,Y` or `f:X,Y`, got {:?}", s))?;
        let (x, y) = coords
            .split_once(',')
            .ok_or_else(|| anyhow!("expected coordinates as `X,Y`, got {:?}", coords))?;
        let coords = (
            x.trim().parse::<Coord>().context("invalid x coordinate")?,
            y.trim().parse::<Coord>().context("invalid y coordinate")?,
        );

        match kind {
            "r" | "reveal" => Ok(Self::Reveal(coords)),
            "f" | "flag" => Ok(Self::Flag(coords)),
            other => Err(anyhow!("unknown move {:?}", other)),
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reveal((x, y)) => write!(f, "r:{},{}", x, y),
            Self::Flag((x, y)) => write!(f, "f:{},{}", x, y),
        }
    }
}

/// Applies one move and prints the board. Returns true once the game is over.
fn play(game: &mut GameState, mv: Move) -> bool {
    let result = match mv {
        Move::Reveal(coords) => game.reveal(coords),
        Move::Flag(coords) => game.toggle_flag(coords).map(|_| Outcome::Continue),
    };

    match result {
        Ok(outcome) => {
            log::debug!("{} -> {:?}", mv, outcome);
            print!("{}", game.snapshot());
            println!();
            outcome.is_terminal()
        }
        Err(err) => {
            eprintln!("{}: {}", mv, err);
            false
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_max_level(args.verbose.tracing_level_filter())
        .with_writer(io::stderr)
        .init();

    let config = GameConfig::new((args.width, args.height), args.mines)
        .context("invalid board configuration")?;
    let seed = args
        .seed
        .unwrap_or_else(|| RandomMineGenerator::from_entropy().seed());
    log::info!("seed: {}", seed);

    let mut game = GameState::new_game_with_seed(config, seed)?;

    if args.disclose {
        print!("{}", BoardSnapshot::disclosed(game.board()));
        println!();
    }
    print!("{}", game.snapshot());
    println!();

    if args.moves.is_empty() {
        for line in io::stdin().lock().lines() {
            let line = line.context("failed to read move")?;
            if line.trim().is_empty() {
                continue;
            }
            match line.parse::<Move>() {
                Ok(mv) => {
                    if play(&mut game, mv) {
                        break;
                    }
                }
                Err(err) => eprintln!("{:#}", err),
            }
        }
    } else {
        for mv in args.moves {
            if play(&mut game, mv) {
                break;
            }
        }
    }

    let (width, height) = game.size();
    println!(
        "{:?} on {}x{} with {} mines, {} left unflagged",
        game.status(),
        width,
        height,
        game.total_mines(),
        game.mines_left()
    );
    Ok(())
}
