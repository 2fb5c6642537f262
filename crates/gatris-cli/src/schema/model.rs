use std::path::Path;

use anyhow::Context;
use chrono::{DateTime, Utc};
use gatris_evaluator::WeightVector;
use gatris_training::BestIndividual;
use serde::{Deserialize, Serialize};

use crate::util;

/// Best weights found by a training run, as stored in `best_model.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainedModel {
    /// Mean lines cleared per fitness game.
    pub fitness: f32,
    pub weights: WeightVector,
    /// 1-based generation that produced the weights.
    pub generation: usize,
    pub trained_with_lookahead: bool,
    pub info: String,
    pub trained_at: DateTime<Utc>,
}

impl TrainedModel {
    pub fn new(best: &BestIndividual, trained_with_lookahead: bool, games: usize) -> Self {
        Self {
            fitness: best.fitness,
            weights: best.weights,
            generation: best.generation,
            trained_with_lookahead,
            info: format!(
                "Generation {}: {:.1} lines on average over {games} games",
                best.generation, best.fitness
            ),
            trained_at: Utc::now(),
        }
    }

    /// Loads a model, failing with a hint to train one first.
    pub fn open<P>(path: P) -> anyhow::Result<Self>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        util::read_json_file("trained model", path).with_context(|| {
            format!(
                "No usable trained model at {}; run `gatris train` to create one",
                path.display()
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use std::{env, fs, process};

    use super::*;

    #[test]
    fn test_model_json_layout() {
        let best = BestIndividual {
            weights: WeightVector::DEFAULT,
            fitness: 123.5,
            generation: 7,
        };
        let model = TrainedModel::new(&best, true, 5);
        let json = serde_json::to_value(&model).unwrap();
        for key in [
            "fitness",
            "weights",
            "generation",
            "trained_with_lookahead",
            "info",
            "trained_at",
        ] {
            assert!(json.get(key).is_some(), "missing {key}");
        }
        assert_eq!(json["generation"], 7);
        assert_eq!(json["trained_with_lookahead"], true);
        assert_eq!(model.info, "Generation 7: 123.5 lines on average over 5 games");

        let back: TrainedModel = serde_json::from_value(json).unwrap();
        assert_eq!(back, model);
    }

    #[test]
    fn test_missing_model_suggests_training() {
        let path = env::temp_dir().join(format!("gatris-no-model-{}.json", process::id()));
        let err = TrainedModel::open(&path).unwrap_err();
        assert!(err.to_string().contains("gatris train"));
    }

    #[test]
    fn test_corrupt_model_is_rejected() {
        let path = env::temp_dir().join(format!("gatris-bad-model-{}.json", process::id()));
        fs::write(&path, r#"{"fitness": 1.0}"#).unwrap();
        let err = TrainedModel::open(&path).unwrap_err();
        assert!(format!("{err:#}").contains("Failed to parse trained model JSON file"));
        fs::remove_file(path).unwrap();
    }
}
