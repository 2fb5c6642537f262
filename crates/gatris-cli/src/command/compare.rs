use std::path::PathBuf;

use gatris_engine::{PieceGenerator, PieceSeed, PieceSource};
use gatris_evaluator::{GameSummary, MoveSearch, Preset, play_game};
use tracing::info;

use crate::{command::GameSetArg, schema::model::TrainedModel};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct CompareArg {
    /// Trained model file
    #[arg(long)]
    model: PathBuf,
    /// Weights to compare against
    #[arg(long, default_value = "lee")]
    baseline: Preset,
    #[command(flatten)]
    game_set: GameSetArg,
}

pub(crate) fn run(arg: &CompareArg) -> anyhow::Result<()> {
    let CompareArg {
        model: model_path,
        baseline,
        game_set,
    } = arg;
    let model = TrainedModel::open(model_path)?;
    let seeds = game_set.piece_seeds()?;
    let source = game_set.piece_source();
    info!(model = %model_path.display(), %baseline, games = seeds.len(), "comparing weights");

    println!("Model:    {} ({})", model_path.display(), model.info);
    println!("Baseline: preset {baseline} ({})", baseline.weights());
    println!();

    println!("Baseline weights:");
    let baseline_games = play_all(&game_set.search(baseline.weights()), source, &seeds, game_set);
    println!();
    println!("Trained weights:");
    let trained_games = play_all(&game_set.search(model.weights), source, &seeds, game_set);

    let baseline_avg = mean_lines(&baseline_games);
    let trained_avg = mean_lines(&trained_games);
    println!();
    println!("Baseline: {baseline_avg:.1} lines (avg)");
    println!("Trained:  {trained_avg:.1} lines (avg)");

    match relative_improvement(baseline_avg, trained_avg) {
        Some(pct) if pct > 0.0 => println!("Trained model is {pct:.1}% better"),
        Some(pct) if pct < 0.0 => println!("Trained model is {:.1}% worse", -pct),
        Some(_) => println!("Equal performance"),
        None => println!("Baseline cleared no lines; relative improvement is undefined"),
    }
    Ok(())
}

fn play_all(
    search: &MoveSearch,
    source: PieceSource,
    seeds: &[PieceSeed],
    game_set: &GameSetArg,
) -> Vec<GameSummary> {
    seeds
        .iter()
        .enumerate()
        .map(|(i, seed)| {
            let mut pieces = PieceGenerator::new(source, *seed);
            let summary = play_game(search, &mut pieces, game_set.max_pieces, |_| {});
            println!(
                "  Game {}/{}: {} lines",
                i + 1,
                seeds.len(),
                summary.lines_cleared
            );
            summary
        })
        .collect()
}

#[expect(clippy::cast_precision_loss)]
fn mean_lines(games: &[GameSummary]) -> f32 {
    if games.is_empty() {
        return 0.0;
    }
    games.iter().map(|g| g.lines_cleared).sum::<usize>() as f32 / games.len() as f32
}

/// Percentage change from `baseline` to `trained`; `None` when the baseline is 0.
fn relative_improvement(baseline: f32, trained: f32) -> Option<f32> {
    (baseline > 0.0).then(|| (trained - baseline) / baseline * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_improvement() {
        assert_eq!(relative_improvement(100.0, 150.0), Some(50.0));
        assert_eq!(relative_improvement(100.0, 75.0), Some(-25.0));
        assert_eq!(relative_improvement(0.0, 10.0), None);
    }

    #[test]
    fn test_mean_lines() {
        let games = [10, 20, 45].map(|lines| GameSummary {
            lines_cleared: lines,
            ..GameSummary::default()
        });
        assert_eq!(mean_lines(&games), 25.0);
        assert_eq!(mean_lines(&[]), 0.0);
    }
}
