use std::{
    path::{Path, PathBuf},
    thread,
    time::Duration,
};

use gatris_engine::{PieceGenerator, PieceSeed, PieceSource};
use gatris_evaluator::{
    GameSummary, HeuristicEvaluator, MoveSearch, Preset, WeightVector, play_game,
};
use tracing::info;

use crate::{
    command::GameSetArg,
    schema::{
        model::TrainedModel,
        play_report::{PlayReport, PlayedGame},
    },
    util::Output,
    view::{BoardView, GamesSummaryView},
};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    #[command(flatten)]
    game_set: GameSetArg,
    #[command(flatten)]
    weights: WeightsArg,
    /// Print the board after every placement
    #[arg(long)]
    show_board: bool,
    /// Pause after each printed board, in milliseconds
    #[arg(long, default_value_t = 0)]
    delay: u64,
    /// Write the piece seed and result of every game to a JSON file
    #[arg(long)]
    report: Option<PathBuf>,
    /// Play the games recorded in a report written by `--report` again
    #[arg(
        long,
        conflicts_with_all = [
            "games", "lookahead", "piece_source", "max_pieces", "seed",
            "weights", "preset", "model",
        ]
    )]
    replay: Option<PathBuf>,
}

/// Where the weights come from. Defaults to the built-in weights.
#[derive(Debug, Clone, clap::Args)]
#[group(multiple = false)]
struct WeightsArg {
    /// Weights as `height,lines,holes,bumpiness`
    #[arg(long, allow_hyphen_values = true)]
    weights: Option<WeightVector>,
    /// Named weight preset (`lee`, `defensive`, `aggressive`, `balanced`)
    #[arg(long)]
    preset: Option<Preset>,
    /// Trained model file to take the weights from
    #[arg(long)]
    model: Option<PathBuf>,
}

impl WeightsArg {
    fn resolve(&self) -> anyhow::Result<(WeightVector, String)> {
        if let Some(weights) = self.weights {
            return Ok((weights, "command line".to_owned()));
        }
        if let Some(preset) = self.preset {
            return Ok((preset.weights(), format!("preset {preset}")));
        }
        if let Some(path) = &self.model {
            let model = TrainedModel::open(path)?;
            let label = format!("model {} ({})", path.display(), model.info);
            return Ok((model.weights, label));
        }
        Ok((WeightVector::DEFAULT, "default".to_owned()))
    }
}

/// Everything that decides which games are played and how.
#[derive(Debug, Clone, PartialEq)]
struct GamePlan {
    weights: WeightVector,
    label: String,
    lookahead: bool,
    piece_source: PieceSource,
    max_pieces: Option<usize>,
    seeds: Vec<PieceSeed>,
}

impl GamePlan {
    fn from_args(game_set: &GameSetArg, weights: &WeightsArg) -> anyhow::Result<Self> {
        let (weights, label) = weights.resolve()?;
        Ok(Self {
            weights,
            label,
            lookahead: game_set.lookahead,
            piece_source: game_set.piece_source(),
            max_pieces: game_set.max_pieces,
            seeds: game_set.piece_seeds()?,
        })
    }

    fn from_report(path: &Path) -> anyhow::Result<Self> {
        let report = PlayReport::open(path)?;
        Ok(Self {
            weights: report.weights,
            label: format!("replay of {}", path.display()),
            lookahead: report.lookahead,
            piece_source: report.piece_source,
            max_pieces: report.max_pieces,
            seeds: report.piece_seeds(),
        })
    }

    fn search(&self) -> MoveSearch {
        MoveSearch::new(HeuristicEvaluator::new(self.weights)).with_lookahead(self.lookahead)
    }

    fn report(&self, summaries: &[GameSummary]) -> PlayReport {
        PlayReport {
            weights: self.weights,
            lookahead: self.lookahead,
            piece_source: self.piece_source,
            max_pieces: self.max_pieces,
            games: self
                .seeds
                .iter()
                .zip(summaries)
                .map(|(&piece_seed, &summary)| PlayedGame {
                    piece_seed,
                    summary,
                })
                .collect(),
        }
    }
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let PlayArg {
        game_set,
        weights,
        show_board,
        delay,
        report,
        replay,
    } = arg;
    let plan = match replay {
        Some(path) => GamePlan::from_report(path)?,
        None => GamePlan::from_args(game_set, weights)?,
    };
    let search = plan.search();
    let delay = Duration::from_millis(*delay);

    println!("Weights ({}):", plan.label);
    for (feature, value) in plan.weights.iter() {
        println!("  {:<12}: {value:+.6}", feature.to_string());
    }
    println!(
        "Playing {} game(s) with {} pieces{}",
        plan.seeds.len(),
        plan.piece_source,
        if plan.lookahead {
            " and one-piece lookahead"
        } else {
            ""
        }
    );
    println!();

    let mut summaries: Vec<GameSummary> = Vec::with_capacity(plan.seeds.len());
    for (i, seed) in plan.seeds.iter().enumerate() {
        let mut pieces = PieceGenerator::new(plan.piece_source, *seed);
        let summary = play_game(&search, &mut pieces, plan.max_pieces, |turn| {
            if !*show_board {
                return;
            }
            println!(
                "Turn {}: {:?} rotation {} column {}",
                turn.number, turn.piece, turn.chosen.rotation, turn.chosen.column
            );
            println!("{}", BoardView::new(turn.state));
            println!();
            if !delay.is_zero() {
                thread::sleep(delay);
            }
        });
        println!(
            "Game {}/{}: {} lines, {} pieces, score {}{} [seed {seed}]",
            i + 1,
            plan.seeds.len(),
            summary.lines_cleared,
            summary.pieces_placed,
            summary.score,
            if summary.game_over {
                ""
            } else {
                " (piece limit reached)"
            }
        );
        summaries.push(summary);
    }

    println!();
    println!("{}", GamesSummaryView::new(&summaries));
    println!();
    if let Some(path) = report {
        Output::save_json(&plan.report(&summaries), path.clone())?;
        info!(path = %path.display(), games = summaries.len(), "saved play report");
        println!("To replay these games: gatris play --replay={}", path.display());
    }
    println!(
        "To play with these weights again: gatris play --weights={}",
        plan.weights
    );
    Ok(())
}
