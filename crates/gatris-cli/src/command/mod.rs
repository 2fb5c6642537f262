use clap::{Parser, Subcommand};
use gatris_engine::{PieceSeed, PieceSource};
use gatris_evaluator::{HeuristicEvaluator, MoveSearch, WeightVector};
use rand::{Rng as _, SeedableRng as _};
use rand_pcg::Pcg32;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, prelude::*};

use self::{compare::CompareArg, play::PlayArg, show_model::ShowModelArg, train::TrainArg};

mod compare;
mod play;
mod show_model;
mod train;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// Log level used when `RUST_LOG` is not set
    #[arg(long, global = true, default_value = "info")]
    log_level: LevelFilter,
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Let the heuristic AI play games
    Play(#[clap(flatten)] PlayArg),
    /// Compare a trained model against baseline weights on the same games
    Compare(#[clap(flatten)] CompareArg),
    /// Optimize weights using a genetic algorithm
    Train(#[clap(flatten)] TrainArg),
    /// Print a trained model record
    ShowModel(#[clap(flatten)] ShowModelArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    init_tracing(args.log_level);
    match args.mode {
        Mode::Play(arg) => play::run(&arg)?,
        Mode::Compare(arg) => compare::run(&arg)?,
        Mode::Train(arg) => train::run(&arg)?,
        Mode::ShowModel(arg) => show_model::run(&arg)?,
    }
    Ok(())
}

/// Logs go to stderr so that stdout only carries results.
fn init_tracing(level: LevelFilter) {
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

/// Options shared by commands that play a batch of games.
#[derive(Debug, Clone, clap::Args)]
pub(crate) struct GameSetArg {
    /// Number of games to play
    #[arg(long, default_value_t = 5)]
    games: usize,
    /// Score moves with one-piece lookahead
    #[arg(long)]
    lookahead: bool,
    /// Piece randomizer (`uniform` or `bag`) [default: bag with --lookahead, uniform otherwise]
    #[arg(long)]
    piece_source: Option<PieceSource>,
    /// Stop each game after this many pieces
    #[arg(long)]
    max_pieces: Option<usize>,
    /// Seed for reproducible piece sequences
    #[arg(long)]
    seed: Option<u64>,
}

impl GameSetArg {
    fn piece_source(&self) -> PieceSource {
        self.piece_source
            .unwrap_or(PieceSource::default_for(self.lookahead))
    }

    /// One piece seed per game.
    ///
    /// With `--seed` the sequence is reproducible; every player given the
    /// same seeds sees the same pieces.
    fn piece_seeds(&self) -> anyhow::Result<Vec<PieceSeed>> {
        anyhow::ensure!(self.games > 0, "--games must be at least 1");
        let mut rng = match self.seed {
            Some(seed) => Pcg32::seed_from_u64(seed),
            None => Pcg32::from_rng(&mut rand::rng()),
        };
        Ok((0..self.games).map(|_| rng.random()).collect())
    }

    fn search(&self, weights: WeightVector) -> MoveSearch {
        MoveSearch::new(HeuristicEvaluator::new(weights)).with_lookahead(self.lookahead)
    }
}
