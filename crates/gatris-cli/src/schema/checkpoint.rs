use gatris_evaluator::WeightVector;
use gatris_training::{GeneticConfig, GeneticOptimizer, History};
use serde::{Deserialize, Serialize};

/// Snapshot of a training run, written periodically and at the end.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Checkpoint {
    /// Generations evaluated so far.
    pub generation: usize,
    pub best_ever_fitness: f32,
    pub best_ever_weights: WeightVector,
    pub history: History,
    pub parameters: GeneticConfig,
}

impl Checkpoint {
    /// Returns `None` before the first generation has been evaluated.
    pub fn from_optimizer(optimizer: &GeneticOptimizer) -> Option<Self> {
        let best = optimizer.best_ever()?;
        Some(Self {
            generation: optimizer.generation(),
            best_ever_fitness: best.fitness,
            best_ever_weights: best.weights,
            history: optimizer.history().clone(),
            parameters: optimizer.config().clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use gatris_training::Sequential;

    use super::*;

    #[test]
    fn test_checkpoint_after_generation() {
        let config = GeneticConfig {
            population_size: 4,
            generations: 2,
            games_per_individual: 1,
            elite_size: 1,
            tournament_size: 2,
            max_pieces: Some(10),
            seed: Some(9),
            ..GeneticConfig::default()
        };
        let mut optimizer = GeneticOptimizer::new(config.clone()).unwrap();
        assert!(Checkpoint::from_optimizer(&optimizer).is_none());

        optimizer.step(&Sequential).unwrap();
        let checkpoint = Checkpoint::from_optimizer(&optimizer).unwrap();
        assert_eq!(checkpoint.generation, 1);
        assert_eq!(checkpoint.history.len(), 1);
        assert_eq!(checkpoint.parameters, config);

        let json = serde_json::to_value(&checkpoint).unwrap();
        assert!(json["history"].is_array());
        assert_eq!(json["parameters"]["population_size"], 4);
        let back: Checkpoint = serde_json::from_value(json).unwrap();
        assert_eq!(back, checkpoint);
    }
}
