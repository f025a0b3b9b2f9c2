//! Example command-line front-end: load a position, apply SAN moves, and
//! print the board, status flags, FEN, and the legal-move table.

use anyhow::{bail, Context, Result};
use tracing::info;

use matto_book::OpeningBook;
use matto_core::{ClientOptions, GameClient};

struct Args {
    fen: Option<String>,
    moves: Vec<String>,
    pgn: bool,
}

fn parse_args() -> Result<Args> {
    let mut args = Args {
        fen: None,
        moves: Vec::new(),
        pgn: false,
    };

    let mut iter = std::env::args().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--fen" => {
                args.fen = Some(iter.next().context("--fen requires a FEN string")?);
            }
            "--moves" => {
                let list = iter.next().context("--moves requires a move list")?;
                args.moves = list.split_whitespace().map(str::to_string).collect();
            }
            "--pgn" => args.pgn = true,
            other => bail!("unknown argument: {other}"),
        }
    }

    Ok(args)
}

fn print_position(client: &GameClient) {
    let status = client.status();

    println!("{}", client.game().board().pretty());
    println!("FEN: {}", client.fen());
    println!(
        "Check: {}  Checkmate: {}  Stalemate: {}  Repetition: {}",
        status.is_check, status.is_checkmate, status.is_stalemate, status.is_repetition
    );

    let mut keys: Vec<&String> = status.notated_moves.keys().collect();
    keys.sort();
    println!("Next moves ({}):", keys.len());
    for key in keys {
        println!(" - {key}");
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = parse_args()?;
    let options = ClientOptions { pgn: args.pgn };

    let mut client = match &args.fen {
        Some(fen) => GameClient::from_fen_with_options(fen, options)
            .with_context(|| format!("failed to load FEN: {fen}"))?,
        None => GameClient::with_options(options),
    };

    for san in &args.moves {
        client
            .play(san)
            .with_context(|| format!("failed to apply move {san}"))?;
    }

    print_position(&client);

    let book = OpeningBook::embedded();
    if let Some(opening) = book.find_by_result_fen(&client.fen()) {
        info!(eco = %opening.eco, name = %opening.name, "position found in opening book");
        println!("Opening: {} ({})", opening.name, opening.eco);
    }

    Ok(())
}
