use std::io::{BufRead, Write};

use anyhow::{bail, Context};
use clap::Parser;
use pairup_core::{
    CellView, Coord, Coord2, Dealer, Game, GameConfig, MatchOutcome, Player, RandomDealer, Symbol,
};
use tracing::info;
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use input::parse_coords;

mod input;

/// Two-player memory card game in the terminal.
#[derive(Parser)]
struct Args {
    /// Number of board rows
    #[arg(long, default_value_t = 4)]
    rows: Coord,

    /// Number of board columns
    #[arg(long, default_value_t = 4)]
    columns: Coord,

    /// Force a seed for the card shuffle instead of a random one
    #[arg(long)]
    seed: Option<u64>,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "warn")]
    log_level: LevelFilter,
}

fn initialize_logging(level: LevelFilter) {
    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .compact();

    let filter = Targets::new().with_default(level);

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().event_format(format))
        .with(filter)
        .init();
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    initialize_logging(args.log_level);

    let config = GameConfig::new((args.rows, args.columns));
    if args.rows == 0 || args.columns == 0 {
        bail!("the board needs at least one row and one column");
    }
    if config.total_cells() % 2 != 0 {
        bail!("the board needs an even number of cells, got {}", config.total_cells());
    }
    let symbols = match Symbol::alphabet(config.pair_count()) {
        Some(symbols) => symbols,
        None => bail!("boards larger than 52 cells are not supported"),
    };

    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed);

    let layout = RandomDealer::new(seed).deal(config, &symbols)?;
    let mut game = Game::new(layout);

    let stdin = std::io::stdin();
    play(&mut game, &mut stdin.lock())?;
    declare_winner(&game)
}

fn play(game: &mut Game, input: &mut impl BufRead) -> anyhow::Result<()> {
    while !game.is_finished() {
        println!("{}'s turn!", game.turn());
        loop {
            print_board(game);
            let first = prompt_pick(game, input)?;
            print_board(game);
            let second = prompt_pick(game, input)?;
            print_board(game);

            let outcome = game.resolve_pair(first, second)?;
            if outcome.is_match() {
                println!("{} found a match!", game.turn());
            } else {
                println!("No match for {}.", game.turn());
            }
            match outcome {
                MatchOutcome::Won => {
                    println!("Congratulations, the game is over!");
                    break;
                }
                MatchOutcome::NotMatched => {
                    game.advance_turn()?;
                    break;
                }
                MatchOutcome::Matched => {}
            }
        }
    }
    Ok(())
}

/// Keeps prompting until a hidden cell was flipped; bad input and picks of
/// face-up cells just re-prompt.
fn prompt_pick(game: &mut Game, input: &mut impl BufRead) -> anyhow::Result<Coord2> {
    loop {
        print!("Enter the position of the card (row,column): ");
        std::io::stdout().flush().context("could not flush stdout")?;

        let mut line = String::new();
        let read = input.read_line(&mut line).context("could not read input")?;
        if read == 0 {
            bail!("input ended before the game finished");
        }

        let coords = match parse_coords(&line, game.size()) {
            Ok(coords) => coords,
            Err(err) => {
                println!("{err}. Try again.");
                continue;
            }
        };

        if game.reveal(coords)?.has_update() {
            return Ok(coords);
        }
        println!("Card already flipped or matched!");
    }
}

fn print_board(game: &Game) {
    let (rows, columns) = game.size();
    for r in 0..rows {
        let mut line = String::new();
        for c in 0..columns {
            if c > 0 {
                line.push(' ');
            }
            match game.view_at((r, c)) {
                CellView::Revealed(symbol) => line.push(symbol.0),
                CellView::Hidden => line.push('X'),
            }
        }
        println!("{line}");
    }
    println!();
}

fn declare_winner(game: &Game) -> anyhow::Result<()> {
    let outcome = game.outcome()?;
    println!(
        "Final Scores - Player 1: {}, Player 2: {}",
        outcome.scores[0], outcome.scores[1]
    );
    match outcome.winner {
        Some(Player::One) => println!("Player 1 wins!"),
        Some(Player::Two) => println!("Player 2 wins!"),
        None => println!("It's a tie!"),
    }
    Ok(())
}
