use gatris_engine::{PieceGenerator, PieceSeed, PieceSource};
use gatris_evaluator::{HeuristicEvaluator, MoveSearch, WeightVector, play_game};
use rand::{Rng as _, SeedableRng as _};
use rand_pcg::Pcg32;
use tracing::debug;

use crate::config::GeneticConfig;

/// Scores a weight vector by simulated play.
///
/// Fitness is the mean number of lines cleared over `games` independent games.
/// Every evaluation takes an explicit seed, from which the piece seed of each
/// game is derived, so the result depends only on the weights and the seed.
///
/// # Example
///
/// ```
/// use gatris_engine::PieceSource;
/// use gatris_evaluator::WeightVector;
/// use gatris_training::FitnessEvaluator;
///
/// let fitness = FitnessEvaluator::new(2, false, PieceSource::Uniform, Some(40));
/// let a = fitness.evaluate(&WeightVector::DEFAULT, 7);
/// let b = fitness.evaluate(&WeightVector::DEFAULT, 7);
/// assert_eq!(a, b);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FitnessEvaluator {
    games: usize,
    lookahead: bool,
    piece_source: PieceSource,
    max_pieces: Option<usize>,
}

impl FitnessEvaluator {
    #[must_use]
    pub const fn new(
        games: usize,
        lookahead: bool,
        piece_source: PieceSource,
        max_pieces: Option<usize>,
    ) -> Self {
        Self {
            games,
            lookahead,
            piece_source,
            max_pieces,
        }
    }

    #[must_use]
    pub fn from_config(config: &GeneticConfig) -> Self {
        Self::new(
            config.games_per_individual,
            config.lookahead,
            config.effective_piece_source(),
            config.max_pieces,
        )
    }

    #[must_use]
    pub const fn games(&self) -> usize {
        self.games
    }

    /// Plays the configured games with `weights` and returns mean lines cleared.
    ///
    /// Returns 0 when configured with zero games.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn evaluate(&self, weights: &WeightVector, seed: u64) -> f32 {
        if self.games == 0 {
            return 0.0;
        }
        let search = MoveSearch::new(HeuristicEvaluator::new(*weights)).with_lookahead(self.lookahead);
        let mut seeds = Pcg32::seed_from_u64(seed);
        let total_lines: usize = (0..self.games)
            .map(|_| {
                let piece_seed: PieceSeed = seeds.random();
                let mut pieces = PieceGenerator::new(self.piece_source, piece_seed);
                play_game(&search, &mut pieces, self.max_pieces, |_| {}).lines_cleared
            })
            .sum();
        let fitness = total_lines as f32 / self.games as f32;
        debug!(%weights, seed, fitness, "evaluated fitness");
        fitness
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_games() {
        let fitness = FitnessEvaluator::new(0, false, PieceSource::Uniform, None);
        assert_eq!(fitness.evaluate(&WeightVector::DEFAULT, 0), 0.0);
    }

    #[test]
    fn test_fitness_is_non_negative_and_bounded_by_cap() {
        let fitness = FitnessEvaluator::new(3, false, PieceSource::Bag, Some(25));
        let value = fitness.evaluate(&WeightVector::DEFAULT, 1);
        // 25 pieces place 100 cells, which can clear at most 10 rows.
        assert!((0.0..=10.0).contains(&value));
    }

    #[test]
    fn test_good_weights_beat_bad_weights() {
        let fitness = FitnessEvaluator::new(2, false, PieceSource::Uniform, Some(200));
        let good = fitness.evaluate(&WeightVector::DEFAULT, 5);
        let bad = fitness.evaluate(&WeightVector::from_array([1.0, 0.0, 1.0, 1.0]), 5);
        assert!(good > bad, "good={good} bad={bad}");
    }

    #[test]
    fn test_from_config() {
        let config = GeneticConfig {
            games_per_individual: 4,
            lookahead: true,
            max_pieces: Some(10),
            ..GeneticConfig::default()
        };
        let fitness = FitnessEvaluator::from_config(&config);
        assert_eq!(
            fitness,
            FitnessEvaluator::new(4, true, PieceSource::Bag, Some(10))
        );
    }
}
