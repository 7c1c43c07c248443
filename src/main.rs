use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use log::info;

use k_in_a_row::{
    new_game, Advisor, Board, Coord, GameConfig, MoveSelector, Outcome, Symbol, TicTacToe,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SymbolArg {
    X,
    O,
}

impl From<SymbolArg> for Symbol {
    fn from(arg: SymbolArg) -> Self {
        match arg {
            SymbolArg::X => Symbol::X,
            SymbolArg::O => Symbol::O,
        }
    }
}

/// Play k-in-a-row against the computer in the terminal.
#[derive(Debug, Parser)]
#[command(name = "k-in-a-row", args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    play: PlayArgs,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Recommend a move for a position given as rows of X, O and .
    Advise(AdviseArgs),
}

#[derive(Debug, clap::Args)]
struct PlayArgs {
    /// Board size n (the board is n x n)
    #[arg(long, default_value_t = 3)]
    size: usize,

    /// Symbols in a row needed to win, defaults to the board size
    #[arg(long)]
    win_length: Option<usize>,

    /// Symbol the human plays
    #[arg(long, value_enum, default_value = "x")]
    human_symbol: SymbolArg,

    /// Let the computer open every round
    #[arg(long)]
    computer_first: bool,

    /// Seed for the computer's random moves
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Debug, clap::Args)]
struct AdviseArgs {
    /// Board rows, e.g. `XX. .O. ...`; read from stdin when omitted
    rows: Vec<String>,

    /// Symbol to find a move for
    #[arg(long, value_enum, default_value = "o")]
    player: SymbolArg,

    /// Symbols in a row needed to win, defaults to the board size
    #[arg(long)]
    win_length: Option<usize>,

    /// Search depth, picked from the number of empty cells when omitted
    #[arg(long)]
    depth: Option<usize>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Some(Command::Advise(args)) => advise(args),
        None => play(cli.play),
    }
}

fn play(args: PlayArgs) -> Result<()> {
    let win_length = args.win_length.unwrap_or(args.size);
    let human: Symbol = args.human_symbol.into();
    let starting = if args.computer_first {
        human.opponent()
    } else {
        human
    };
    let mut selector = match args.seed {
        Some(seed) => MoveSelector::seeded(seed),
        None => MoveSelector::new(),
    };

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        let mut game = new_game(args.size, win_length, starting)?;
        info!(
            "new round: {}x{} board, {} in a row, {} starts",
            args.size, args.size, win_length, starting
        );

        if !play_round(&mut game, human, &mut selector, &mut lines)? {
            break;
        }

        println!("{}", game);
        match game.outcome() {
            Outcome::Win { symbol, line } => {
                let who = if symbol == human { "You win" } else { "Computer wins" };
                println!(
                    "{} ({}) with {} in a row, {} -> {}.",
                    who,
                    symbol,
                    line.cell_count(),
                    line.start,
                    line.end
                );
            }
            Outcome::Draw => println!("Draw."),
            Outcome::InProgress => {}
        }

        match prompt(&mut lines, "Play again? [y/N] ")? {
            Some(answer) if answer.eq_ignore_ascii_case("y") => continue,
            _ => break,
        }
    }

    Ok(())
}

fn advise(args: AdviseArgs) -> Result<()> {
    let text = if args.rows.is_empty() {
        io::read_to_string(io::stdin()).context("failed to read position from stdin")?
    } else {
        args.rows.join("\n")
    };
    let board: Board = text.parse().context("failed to read position")?;
    let win_length = args.win_length.unwrap_or(board.size());
    GameConfig::new(board.size(), win_length)?;
    let player: Symbol = args.player.into();

    println!("Position:\n{}", board);

    if let Some((symbol, line)) = board.find_winner(win_length) {
        println!(
            "{} already has {} in a row, {} -> {}.",
            symbol,
            line.cell_count(),
            line.start,
            line.end
        );
        return Ok(());
    }

    let advisor = match args.depth {
        Some(depth) => Advisor::with_depth(depth),
        None => Advisor::new(),
    };
    let Some(coord) = advisor.recommend(&board, player, win_length) else {
        println!("No empty cells left, no move possible.");
        return Ok(());
    };

    println!("Recommended move for {}: row {}, column {}", player, coord.row, coord.col);
    let after = board.placed(coord, player)?;
    println!("Position after {}'s move:\n{}", player, after);
    Ok(())
}

/// Runs one round to completion. Returns `false` if input ran out first.
fn play_round<I>(
    game: &mut TicTacToe,
    human: Symbol,
    selector: &mut MoveSelector,
    lines: &mut I,
) -> Result<bool>
where
    I: Iterator<Item = io::Result<String>>,
{
    while !game.is_decided() {
        if game.current_player() == human {
            println!("{}", game);
            let Some(coord) = read_move(lines)? else {
                return Ok(false);
            };
            if let Err(err) = game.apply_move(coord, human) {
                println!("{}", err);
            }
        } else {
            let Some(coord) = selector.select_move(game) else {
                break;
            };
            game.play(coord).context("computer picked an illegal move")?;
            println!("Computer plays {}", coord);
        }
    }
    Ok(true)
}

fn read_move<I>(lines: &mut I) -> Result<Option<Coord>>
where
    I: Iterator<Item = io::Result<String>>,
{
    loop {
        let Some(input) = prompt(lines, "Your move (row col): ")? else {
            return Ok(None);
        };
        match parse_move(&input) {
            Some(coord) => return Ok(Some(coord)),
            None => println!("Expected two non-negative numbers, e.g. `1 2`"),
        }
    }
}

fn parse_move(input: &str) -> Option<Coord> {
    let mut parts = input.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(row), Some(col), None) => {
            let row = row.parse::<usize>().ok()?;
            let col = col.parse::<usize>().ok()?;
            Some(Coord::new(row, col))
        }
        _ => None,
    }
}

fn prompt<I>(lines: &mut I, message: &str) -> Result<Option<String>>
where
    I: Iterator<Item = io::Result<String>>,
{
    print!("{}", message);
    io::stdout().flush().context("failed to flush stdout")?;
    match lines.next() {
        Some(line) => Ok(Some(line.context("failed to read stdin")?.trim().to_string())),
        None => Ok(None),
    }
}
