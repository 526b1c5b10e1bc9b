//! Alfiere command line: pick a move for one position and print it.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use shakmaty::CastlingMode;
use tracing_subscriber::EnvFilter;

use alfiere::game::{Game, START_FEN};
use alfiere::search::params::DEFAULT_DEPTH;
use alfiere::{Search, SearchParams};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Position to search, in FEN
    #[arg(short, long, default_value_t = String::from(START_FEN))]
    fen: String,

    /// Moves played from the FEN position, in UCI notation
    #[arg(short, long, num_args = 1..)]
    moves: Vec<String>,

    /// Search depth in plies
    #[arg(short, long, default_value_t = DEFAULT_DEPTH)]
    depth: u8,

    /// Polyglot opening book
    #[arg(short, long)]
    book: Option<PathBuf>,

    /// Search moves in generation order instead of ordering them
    #[arg(long)]
    no_order: bool,

    /// Print search diagnostics
    #[arg(long)]
    debug: bool,
}

impl Args {
    fn params(&self) -> SearchParams {
        let params = SearchParams::new()
            .depth(self.depth)
            .order_moves(!self.no_order)
            .debug(self.debug);
        match &self.book {
            Some(book) => params.book_path(book),
            None => params,
        }
    }

    /// Position to search: the FEN with the given moves played on it
    fn game(&self) -> anyhow::Result<Game> {
        let mut game = Game::from_fen(&self.fen).with_context(|| format!("bad FEN '{}'", self.fen))?;
        for mv in &self.moves {
            game.play_uci(mv)?;
        }
        Ok(game)
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let default_level = if args.debug { "info" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut game = args.game()?;
    let search = Search::new(args.params());
    let result = search.search(&mut game).context("search failed")?;

    if args.debug {
        match result.score {
            Some(score) => println!("info depth {} score {} {}", args.depth, score, result.stats),
            None => println!("info book {}", result.stats),
        }
    }
    println!("bestmove {}", result.best_move.to_uci(CastlingMode::Standard));

    Ok(())
}
