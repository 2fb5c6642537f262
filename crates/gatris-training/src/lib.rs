//! Genetic optimization of heuristic weights.
//!
//! This crate searches for a [`WeightVector`](gatris_evaluator::WeightVector)
//! that makes the heuristic player clear as many lines as possible. Fitness is
//! measured by simulated play, so a run is mostly spent inside
//! [`gatris_evaluator::play_game`].
//!
//! # How Training Works
//!
//! 1. **Population** - Preset weight sets plus random individuals within [`WeightBounds`]
//! 2. **Evaluation** - Each individual plays several games ([`FitnessEvaluator`])
//! 3. **Record** - Per-generation statistics go into the [`History`]
//! 4. **Selection** - Elites survive, the rest come from tournaments
//! 5. **Reproduction** - Uniform crossover and Gaussian mutation ([`operators`])
//! 6. **Repeat** - Until the configured number of generations has run
//!
//! # Architecture
//!
//! ```text
//! GeneticOptimizer
//!     ↓ dispatches (weights, seed) jobs via
//! JobRunner (Sequential / ScopedThreads)
//!     ↓ each job runs
//! FitnessEvaluator
//!     ↓ plays games with
//! MoveSearch + HeuristicEvaluator (gatris-evaluator)
//!     ↓ produces
//! Fitness (mean lines cleared)
//! ```
//!
//! # Parameters
//!
//! - **Population size** - Individuals per generation
//! - **Elite size** - Top individuals copied unchanged
//! - **Tournament size** - Candidates compared per selection
//! - **Crossover rate** - Probability of combining two parents
//! - **Mutation rate** - Per-feature probability of Gaussian noise
//! - **Mutation strength** - Standard deviation of that noise
//!
//! See [`GeneticConfig`] for defaults and validation rules.
//!
//! # Example
//!
//! ```
//! use gatris_training::{GeneticConfig, GeneticOptimizer, ScopedThreads};
//!
//! let config = GeneticConfig {
//!     population_size: 6,
//!     generations: 2,
//!     games_per_individual: 1,
//!     elite_size: 2,
//!     tournament_size: 2,
//!     max_pieces: Some(30),
//!     seed: Some(7),
//!     ..GeneticConfig::default()
//! };
//! let mut optimizer = GeneticOptimizer::new(config)?;
//! optimizer.run(&ScopedThreads::new(2), |report| {
//!     println!("gen {}: max {}", report.record.generation, report.record.max_fitness);
//!     Ok::<_, std::io::Error>(())
//! })?;
//! let best = optimizer.best_ever().unwrap();
//! assert!(best.fitness >= 0.0);
//! # Ok::<_, Box<dyn std::error::Error>>(())
//! ```
//!
//! # Current Limitations
//!
//! - **Single objective**: fitness is lines cleared only; score and survival
//!   time are not traded off against each other
//! - **Fixed operators**: mutation rate and strength stay constant for a run

pub use self::{
    bounds::{FeatureBound, WeightBounds},
    config::{ConfigError, GeneticConfig},
    fitness::FitnessEvaluator,
    genetic::{BestIndividual, GenerationReport, GeneticOptimizer, Individual},
    history::{GenerationRecord, History},
    runner::{JobRunner, ScopedThreads, Sequential},
};

pub mod bounds;
pub mod config;
pub mod fitness;
pub mod genetic;
pub mod history;
pub mod operators;
pub mod runner;
