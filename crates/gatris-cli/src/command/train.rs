use std::{fs, path::PathBuf};

use anyhow::Context;
use gatris_engine::PieceSource;
use gatris_training::{GenerationReport, GeneticConfig, GeneticOptimizer, ScopedThreads};
use tracing::info;

use crate::{
    schema::{checkpoint::Checkpoint, model::TrainedModel},
    util::{self, Output},
};

const BEST_MODEL_FILE: &str = "best_model.json";
const FINAL_RESULTS_FILE: &str = "ga_final_results.json";

/// Flags override values from `--config`, which override the defaults.
#[derive(Debug, Clone, clap::Args)]
pub(crate) struct TrainArg {
    /// JSON file with a (partial) training configuration
    #[arg(long)]
    config: Option<PathBuf>,
    /// Start from the quick preset: 20 individuals, 10 generations, 3 games
    #[arg(long, conflicts_with = "config")]
    quick: bool,
    /// Individuals per generation
    #[arg(long)]
    population: Option<usize>,
    /// Number of generations
    #[arg(long)]
    generations: Option<usize>,
    /// Games per individual for fitness evaluation
    #[arg(long)]
    games: Option<usize>,
    /// Use one-piece lookahead in fitness games (slower, stronger)
    #[arg(long)]
    lookahead: bool,
    /// Per-feature mutation probability
    #[arg(long)]
    mutation_rate: Option<f32>,
    /// Standard deviation of mutation noise
    #[arg(long)]
    mutation_strength: Option<f32>,
    /// Probability of crossover instead of copying a parent
    #[arg(long)]
    crossover_rate: Option<f32>,
    /// Individuals carried over unchanged
    #[arg(long)]
    elite_size: Option<usize>,
    /// Individuals compared per tournament
    #[arg(long)]
    tournament_size: Option<usize>,
    /// Piece randomizer for fitness games
    #[arg(long)]
    piece_source: Option<PieceSource>,
    /// Stop each fitness game after this many pieces
    #[arg(long)]
    max_pieces: Option<usize>,
    /// Seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,
    /// Worker threads for fitness evaluation [default: available CPUs]
    #[arg(long)]
    workers: Option<usize>,
    /// Directory for the model and checkpoint files
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,
    /// Write a checkpoint every N generations (0 disables)
    #[arg(long, default_value_t = 10)]
    checkpoint_interval: usize,
}

impl TrainArg {
    fn build_config(&self) -> anyhow::Result<GeneticConfig> {
        let mut config = match &self.config {
            Some(path) => util::read_json_file("training config", path)?,
            None if self.quick => GeneticConfig::quick(),
            None => GeneticConfig::default(),
        };
        if let Some(population) = self.population {
            config.population_size = population;
        }
        if let Some(generations) = self.generations {
            config.generations = generations;
        }
        if let Some(games) = self.games {
            config.games_per_individual = games;
        }
        if let Some(rate) = self.mutation_rate {
            config.mutation_rate = rate;
        }
        if let Some(strength) = self.mutation_strength {
            config.mutation_strength = strength;
        }
        if let Some(rate) = self.crossover_rate {
            config.crossover_rate = rate;
        }
        if let Some(elite_size) = self.elite_size {
            config.elite_size = elite_size;
        }
        if let Some(tournament_size) = self.tournament_size {
            config.tournament_size = tournament_size;
        }
        if self.lookahead {
            config.lookahead = true;
        }
        if self.piece_source.is_some() {
            config.piece_source = self.piece_source;
        }
        if self.max_pieces.is_some() {
            config.max_pieces = self.max_pieces;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        Ok(config)
    }
}

pub(crate) fn run(arg: &TrainArg) -> anyhow::Result<()> {
    let config = arg.build_config()?;
    let runner = arg
        .workers
        .map_or_else(ScopedThreads::available, ScopedThreads::new);
    let mut optimizer =
        GeneticOptimizer::new(config).context("Invalid genetic algorithm configuration")?;
    fs::create_dir_all(&arg.output_dir).with_context(|| {
        format!(
            "Failed to create output directory: {}",
            arg.output_dir.display()
        )
    })?;
    info!(
        workers = runner.workers(),
        output_dir = %arg.output_dir.display(),
        "starting training"
    );

    let total = optimizer.config().generations;
    while let Some(report) = optimizer.step(&runner) {
        print_generation(&report, total);

        if report.improved {
            let model = TrainedModel::new(
                &report.best_ever,
                optimizer.config().lookahead,
                optimizer.config().games_per_individual,
            );
            let path = arg.output_dir.join(BEST_MODEL_FILE);
            Output::save_json(&model, path.clone())?;
            info!(path = %path.display(), fitness = model.fitness, "saved best model");
        }

        let generation = report.record.generation;
        if arg.checkpoint_interval > 0 && generation % arg.checkpoint_interval == 0 {
            let path = arg
                .output_dir
                .join(format!("ga_checkpoint_gen{generation}.json"));
            save_checkpoint(&optimizer, path)?;
        }
    }

    save_checkpoint(&optimizer, arg.output_dir.join(FINAL_RESULTS_FILE))?;

    if let Some(best) = optimizer.best_ever() {
        println!();
        println!("Training complete");
        println!(
            "  Best fitness: {:.1} lines (generation {})",
            best.fitness, best.generation
        );
        for (feature, value) in best.weights.iter() {
            println!("  {:<12}: {value:+.6}", feature.to_string());
        }
        println!();
        println!("To play with these weights: gatris play --weights={}", best.weights);
    }
    Ok(())
}

fn print_generation(report: &GenerationReport, total: usize) {
    let record = &report.record;
    println!(
        "Generation {}/{}: best {:.1}, avg {:.1}, worst {:.1} | best ever {:.1}{}",
        record.generation,
        total,
        record.max_fitness,
        record.avg_fitness,
        record.min_fitness,
        report.best_ever.fitness,
        if report.improved { " (new best)" } else { "" }
    );
}

fn save_checkpoint(optimizer: &GeneticOptimizer, path: PathBuf) -> anyhow::Result<()> {
    let Some(checkpoint) = Checkpoint::from_optimizer(optimizer) else {
        return Ok(());
    };
    let mut output = Output::open(path)?;
    output.write_json(&checkpoint)?;
    info!(
        path = %output.path().display(),
        generation = checkpoint.generation,
        "saved checkpoint"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[derive(Debug, Parser)]
    struct TestCli {
        #[command(flatten)]
        train: TrainArg,
    }

    fn parse(args: &[&str]) -> TrainArg {
        TestCli::try_parse_from(std::iter::once("train").chain(args.iter().copied()))
            .unwrap()
            .train
    }

    #[test]
    fn test_defaults() {
        let arg = parse(&[]);
        assert_eq!(arg.build_config().unwrap(), GeneticConfig::default());
        assert_eq!(arg.checkpoint_interval, 10);
        assert_eq!(arg.output_dir, PathBuf::from("."));
    }

    #[test]
    fn test_flags_override_quick_preset() {
        let arg = parse(&["--quick", "--generations", "3", "--lookahead", "--seed", "5"]);
        let config = arg.build_config().unwrap();
        assert_eq!(config.population_size, 20);
        assert_eq!(config.generations, 3);
        assert!(config.lookahead);
        assert_eq!(config.seed, Some(5));
        assert_eq!(config.effective_piece_source(), PieceSource::Bag);
    }

    #[test]
    fn test_quick_conflicts_with_config() {
        let result = TestCli::try_parse_from(["train", "--quick", "--config", "x.json"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_training_writes_files() {
        let dir = std::env::temp_dir().join(format!("gatris-train-{}", std::process::id()));
        let arg = parse(&[
            "--population",
            "4",
            "--generations",
            "2",
            "--games",
            "1",
            "--elite-size",
            "1",
            "--tournament-size",
            "2",
            "--max-pieces",
            "10",
            "--seed",
            "3",
            "--workers",
            "2",
            "--checkpoint-interval",
            "1",
            "--output-dir",
            dir.to_str().unwrap(),
        ]);
        run(&arg).unwrap();

        let model = TrainedModel::open(dir.join(BEST_MODEL_FILE)).unwrap();
        assert!((1..=2).contains(&model.generation));
        let final_results: Checkpoint =
            util::read_json_file("results", dir.join(FINAL_RESULTS_FILE)).unwrap();
        assert_eq!(final_results.generation, 2);
        assert_eq!(final_results.history.len(), 2);
        assert_eq!(final_results.best_ever_fitness, model.fitness);
        assert!(dir.join("ga_checkpoint_gen1.json").exists());
        assert!(dir.join("ga_checkpoint_gen2.json").exists());
        fs::remove_dir_all(dir).unwrap();
    }
}
