//! Genetic algorithm evolving heuristic weights.
//!
//! # Algorithm Overview
//!
//! Each generation:
//!
//! 1. **Evaluate Fitness** - every individual plays `games_per_individual`
//!    games; fitness is mean lines cleared. Jobs run through a [`JobRunner`].
//! 2. **Record** - max/avg/min fitness and the generation's best weights are
//!    appended to the [`History`].
//! 3. **Ratchet** - the best-ever individual is replaced only by a strictly
//!    fitter one, so best-ever fitness never decreases.
//! 4. **Evolve** (skipped after the last generation) - individuals are sorted
//!    by fitness (stable, descending), the top `elite_size` are copied
//!    unchanged, and every remaining slot is filled by tournament selection,
//!    optional uniform crossover and Gaussian mutation.
//!
//! # Reproducibility
//!
//! The optimizer owns a single [`Pcg32`]. Before each evaluation round it
//! draws one seed per individual, so fitness values do not depend on how
//! jobs are scheduled across threads. With [`GeneticConfig::seed`] set, a
//! whole run is deterministic.
//!
//! # Initial Population
//!
//! The four [`Preset`](gatris_evaluator::Preset) weight sets come first
//! (clamped to the bounds), followed by individuals drawn uniformly within the
//! bounds.

use gatris_evaluator::WeightVector;
use rand::{Rng, SeedableRng as _};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{
    config::{ConfigError, GeneticConfig},
    fitness::FitnessEvaluator,
    history::{GenerationRecord, History},
    operators,
    runner::JobRunner,
};

/// A weight vector together with its fitness in the current generation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Individual {
    weights: WeightVector,
    fitness: f32,
}

impl Individual {
    #[must_use]
    pub const fn new(weights: WeightVector, fitness: f32) -> Self {
        Self { weights, fitness }
    }

    #[must_use]
    pub const fn weights(&self) -> &WeightVector {
        &self.weights
    }

    #[must_use]
    pub const fn fitness(&self) -> f32 {
        self.fitness
    }
}

/// The best individual seen so far in a run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BestIndividual {
    pub weights: WeightVector,
    pub fitness: f32,
    /// 1-based generation in which it was found.
    pub generation: usize,
}

/// Outcome of one [`GeneticOptimizer::step`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationReport {
    pub record: GenerationRecord,
    pub best_ever: BestIndividual,
    /// `true` if this generation replaced the best-ever individual.
    pub improved: bool,
}

/// Evolves a population of [`WeightVector`]s.
///
/// # Example
///
/// ```
/// use gatris_training::{GeneticConfig, GeneticOptimizer, Sequential};
///
/// let config = GeneticConfig {
///     population_size: 6,
///     generations: 2,
///     games_per_individual: 1,
///     elite_size: 1,
///     tournament_size: 2,
///     max_pieces: Some(20),
///     seed: Some(1),
///     ..GeneticConfig::default()
/// };
/// let mut optimizer = GeneticOptimizer::new(config).unwrap();
/// optimizer.run(&Sequential, |_| Ok::<_, ()>(())).unwrap();
///
/// assert_eq!(optimizer.history().len(), 2);
/// assert!(optimizer.best_ever().is_some());
/// ```
#[derive(Debug, Clone)]
pub struct GeneticOptimizer {
    config: GeneticConfig,
    fitness: FitnessEvaluator,
    rng: Pcg32,
    population: Vec<WeightVector>,
    history: History,
    best_ever: Option<BestIndividual>,
    generation: usize,
}

impl GeneticOptimizer {
    /// Validates `config` and builds the initial population.
    pub fn new(config: GeneticConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut rng = match config.seed {
            Some(seed) => Pcg32::seed_from_u64(seed),
            None => Pcg32::from_rng(&mut rand::rng()),
        };
        let population = initial_population(&config, &mut rng);
        info!(
            population = config.population_size,
            generations = config.generations,
            games = config.games_per_individual,
            lookahead = config.lookahead,
            piece_source = %config.effective_piece_source(),
            "initialized genetic optimizer"
        );
        Ok(Self {
            fitness: FitnessEvaluator::from_config(&config),
            config,
            rng,
            population,
            history: History::default(),
            best_ever: None,
            generation: 0,
        })
    }

    #[must_use]
    pub fn config(&self) -> &GeneticConfig {
        &self.config
    }

    /// The individuals that the next [`Self::step`] will evaluate.
    #[must_use]
    pub fn population(&self) -> &[WeightVector] {
        &self.population
    }

    #[must_use]
    pub fn history(&self) -> &History {
        &self.history
    }

    #[must_use]
    pub fn best_ever(&self) -> Option<&BestIndividual> {
        self.best_ever.as_ref()
    }

    /// Number of generations evaluated so far.
    #[must_use]
    pub fn generation(&self) -> usize {
        self.generation
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.generation >= self.config.generations
    }

    /// Evaluates the current population, records it, updates the best-ever
    /// individual and, unless this was the last generation, breeds the next one.
    ///
    /// Returns `None` once all configured generations have run.
    pub fn step<R>(&mut self, runner: &R) -> Option<GenerationReport>
    where
        R: JobRunner,
    {
        if self.is_finished() {
            return None;
        }
        let generation = self.generation + 1;

        let jobs: Vec<(WeightVector, u64)> = self
            .population
            .iter()
            .map(|w| (*w, self.rng.random()))
            .collect();
        let fitness = &self.fitness;
        let fitnesses = runner.run(jobs, |(weights, seed)| fitness.evaluate(&weights, seed));

        let mut individuals: Vec<Individual> = self
            .population
            .iter()
            .zip(fitnesses)
            .map(|(w, f)| Individual::new(*w, f))
            .collect();
        // Stable: equal fitness keeps population order.
        individuals.sort_by(|a, b| b.fitness.total_cmp(&a.fitness));

        let best = individuals[0];
        let sorted_fitnesses: Vec<f32> = individuals.iter().map(Individual::fitness).collect();
        let record = GenerationRecord::new(generation, &sorted_fitnesses, best.weights)?;
        self.history.push(record);

        let improved = self
            .best_ever
            .is_none_or(|best_ever| best.fitness > best_ever.fitness);
        if improved {
            self.best_ever = Some(BestIndividual {
                weights: best.weights,
                fitness: best.fitness,
                generation,
            });
            info!(generation, fitness = best.fitness, weights = %best.weights, "new best individual");
        }
        let best_ever = self.best_ever.unwrap_or(BestIndividual {
            weights: best.weights,
            fitness: best.fitness,
            generation,
        });

        info!(
            generation,
            max = record.max_fitness,
            avg = record.avg_fitness,
            min = record.min_fitness,
            best_ever = best_ever.fitness,
            "generation evaluated"
        );

        self.generation = generation;
        if !self.is_finished() {
            self.population = evolve(&individuals, &self.config, &mut self.rng);
            debug!(generation, "bred next generation");
        }

        Some(GenerationReport {
            record,
            best_ever,
            improved,
        })
    }

    /// Runs the remaining generations, calling `on_generation` after each one.
    ///
    /// An error from the callback stops the run and is returned as-is.
    pub fn run<R, F, E>(&mut self, runner: &R, mut on_generation: F) -> Result<(), E>
    where
        R: JobRunner,
        F: FnMut(&GenerationReport) -> Result<(), E>,
    {
        while let Some(report) = self.step(runner) {
            on_generation(&report)?;
        }
        Ok(())
    }
}

fn initial_population<R>(config: &GeneticConfig, rng: &mut R) -> Vec<WeightVector>
where
    R: Rng + ?Sized,
{
    let seeds = operators::seed_individuals(&config.bounds);
    let mut population: Vec<WeightVector> = seeds
        .into_iter()
        .take(config.population_size)
        .collect();
    while population.len() < config.population_size {
        population.push(config.bounds.sample(rng));
    }
    population
}

/// Builds the next generation from `individuals` sorted best first.
fn evolve<R>(individuals: &[Individual], config: &GeneticConfig, rng: &mut R) -> Vec<WeightVector>
where
    R: Rng + ?Sized,
{
    debug_assert!(individuals.is_sorted_by(|a, b| a.fitness >= b.fitness));
    let mut next: Vec<WeightVector> = individuals
        .iter()
        .take(config.elite_size)
        .map(|ind| ind.weights)
        .collect();

    while next.len() < individuals.len() {
        let p1 = operators::tournament_select(individuals, config.tournament_size, rng);
        let mut child = if rng.random_bool(config.crossover_rate.into()) {
            let p2 = operators::tournament_select(individuals, config.tournament_size, rng);
            operators::uniform_crossover(&p1.weights, &p2.weights, rng)
        } else {
            p1.weights
        };
        operators::mutate(
            &mut child,
            config.mutation_rate,
            config.mutation_strength,
            &config.bounds,
            rng,
        );
        next.push(child);
    }
    next
}
