use gatris_engine::PieceSource;
use gatris_evaluator::Feature;
use serde::{Deserialize, Serialize};

use crate::bounds::WeightBounds;

/// Parameters of a genetic optimization run.
///
/// Every field has a default, so a partial JSON document is a valid
/// configuration:
///
/// ```
/// use gatris_training::GeneticConfig;
///
/// let config: GeneticConfig = serde_json::from_str(r#"{"generations": 5}"#).unwrap();
/// assert_eq!(config.generations, 5);
/// assert_eq!(config.population_size, 50);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneticConfig {
    /// Individuals per generation (fixed for the whole run).
    pub population_size: usize,
    pub generations: usize,
    /// Games each individual plays per fitness evaluation.
    pub games_per_individual: usize,
    /// Score moves with one-piece lookahead during fitness games.
    pub lookahead: bool,
    /// Per-feature probability of Gaussian mutation.
    pub mutation_rate: f32,
    /// Standard deviation of the Gaussian mutation noise.
    pub mutation_strength: f32,
    /// Probability that a child is bred from two parents instead of copied from one.
    pub crossover_rate: f32,
    /// Best individuals copied unchanged into the next generation.
    pub elite_size: usize,
    pub tournament_size: usize,
    pub bounds: WeightBounds,
    /// Piece source for fitness games. `None` picks the bag with lookahead and
    /// uniform draws otherwise.
    pub piece_source: Option<PieceSource>,
    /// Cap on pieces per fitness game. `None` plays every game to the end.
    pub max_pieces: Option<usize>,
    /// Seed of the optimizer's RNG. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for GeneticConfig {
    fn default() -> Self {
        Self {
            population_size: 50,
            generations: 50,
            games_per_individual: 5,
            lookahead: false,
            mutation_rate: 0.2,
            mutation_strength: 0.3,
            crossover_rate: 0.7,
            elite_size: 5,
            tournament_size: 5,
            bounds: WeightBounds::default(),
            piece_source: None,
            max_pieces: None,
            seed: None,
        }
    }
}

impl GeneticConfig {
    /// A small configuration for smoke runs: 10 generations of 20 individuals,
    /// 3 games each.
    #[must_use]
    pub fn quick() -> Self {
        Self {
            population_size: 20,
            generations: 10,
            games_per_individual: 3,
            ..Self::default()
        }
    }

    /// The piece source actually used for fitness games.
    #[must_use]
    pub fn effective_piece_source(&self) -> PieceSource {
        self.piece_source
            .unwrap_or(PieceSource::default_for(self.lookahead))
    }

    /// Checks parameter consistency before any simulation starts.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population_size == 0 {
            return Err(ConfigError::EmptyPopulation);
        }
        if self.games_per_individual == 0 {
            return Err(ConfigError::NoGames);
        }
        if self.elite_size > self.population_size {
            return Err(ConfigError::EliteTooLarge {
                elite_size: self.elite_size,
                population_size: self.population_size,
            });
        }
        if self.tournament_size == 0 || self.tournament_size > self.population_size {
            return Err(ConfigError::InvalidTournamentSize {
                tournament_size: self.tournament_size,
                population_size: self.population_size,
            });
        }
        for (name, value) in [
            ("mutation_rate", self.mutation_rate),
            ("crossover_rate", self.crossover_rate),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::RateOutOfRange { name, value });
            }
        }
        if !(self.mutation_strength.is_finite() && self.mutation_strength >= 0.0) {
            return Err(ConfigError::InvalidMutationStrength {
                value: self.mutation_strength,
            });
        }
        self.bounds.validate()
    }
}

/// Inconsistent optimizer parameters.
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    #[display("population size must be at least 1")]
    EmptyPopulation,
    #[display("games per individual must be at least 1")]
    NoGames,
    #[display("elite size {elite_size} exceeds population size {population_size}")]
    EliteTooLarge {
        elite_size: usize,
        population_size: usize,
    },
    #[display("tournament size {tournament_size} must be between 1 and population size {population_size}")]
    InvalidTournamentSize {
        tournament_size: usize,
        population_size: usize,
    },
    #[display("{name} must be within [0, 1], got {value}")]
    RateOutOfRange { name: &'static str, value: f32 },
    #[display("mutation strength must be a finite non-negative number, got {value}")]
    InvalidMutationStrength { value: f32 },
    #[display("invalid bound for {feature}: [{low}, {high}]")]
    InvalidBound { feature: Feature, low: f32, high: f32 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert_eq!(GeneticConfig::default().validate(), Ok(()));
        assert_eq!(GeneticConfig::quick().validate(), Ok(()));
    }

    #[test]
    fn test_effective_piece_source() {
        let mut config = GeneticConfig::default();
        assert_eq!(config.effective_piece_source(), PieceSource::Uniform);
        config.lookahead = true;
        assert_eq!(config.effective_piece_source(), PieceSource::Bag);
        config.piece_source = Some(PieceSource::Uniform);
        assert_eq!(config.effective_piece_source(), PieceSource::Uniform);
    }

    #[test]
    fn test_validate_rejects_bad_parameters() {
        let base = GeneticConfig::default();
        let cases = [
            GeneticConfig {
                population_size: 0,
                ..base.clone()
            },
            GeneticConfig {
                games_per_individual: 0,
                ..base.clone()
            },
            GeneticConfig {
                elite_size: 51,
                ..base.clone()
            },
            GeneticConfig {
                tournament_size: 0,
                ..base.clone()
            },
            GeneticConfig {
                tournament_size: 51,
                ..base.clone()
            },
            GeneticConfig {
                mutation_rate: 1.5,
                ..base.clone()
            },
            GeneticConfig {
                crossover_rate: -0.1,
                ..base.clone()
            },
            GeneticConfig {
                mutation_strength: -1.0,
                ..base.clone()
            },
        ];
        for config in cases {
            assert!(config.validate().is_err(), "{config:?}");
        }
    }

    #[test]
    fn test_error_messages() {
        let err = GeneticConfig {
            elite_size: 8,
            population_size: 4,
            tournament_size: 2,
            ..GeneticConfig::default()
        }
        .validate()
        .unwrap_err();
        assert_eq!(err.to_string(), "elite size 8 exceeds population size 4");
    }

    #[test]
    fn test_elite_may_equal_population() {
        let config = GeneticConfig {
            population_size: 3,
            elite_size: 3,
            tournament_size: 3,
            ..GeneticConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_json_round_trip() {
        let config = GeneticConfig {
            piece_source: Some(PieceSource::Bag),
            max_pieces: Some(500),
            seed: Some(9),
            ..GeneticConfig::quick()
        };
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains(r#""piece_source":"bag""#));
        let back: GeneticConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
