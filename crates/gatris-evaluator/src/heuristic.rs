//! State evaluation: mapping a game state to a single score.

use std::fmt;

use gatris_engine::GameState;

use crate::{board_feature::BoardFeatures, weights::WeightVector};

/// Scores game states (higher is better).
///
/// [`MoveSearch`](crate::move_search::MoveSearch) is generic over this trait so
/// alternative evaluators can be plugged in.
pub trait StateEvaluator: fmt::Debug + Send + Sync {
    /// Returns the score of `state`. Terminal states score negative infinity.
    fn evaluate(&self, state: &GameState) -> f32;
}

/// Linear evaluator over the four board features.
///
/// ```text
/// score = w_height·aggregate_height + w_lines·complete_lines
///       + w_holes·holes + w_bumpiness·bumpiness
/// ```
///
/// # Example
///
/// ```
/// use gatris_engine::GameState;
/// use gatris_evaluator::{HeuristicEvaluator, StateEvaluator, WeightVector};
///
/// let evaluator = HeuristicEvaluator::new(WeightVector::DEFAULT);
/// assert_eq!(evaluator.evaluate(&GameState::new()), 0.0);
///
/// let mut over = GameState::new();
/// over.mark_game_over();
/// assert_eq!(evaluator.evaluate(&over), f32::NEG_INFINITY);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HeuristicEvaluator {
    weights: WeightVector,
}

impl HeuristicEvaluator {
    #[must_use]
    pub const fn new(weights: WeightVector) -> Self {
        Self { weights }
    }

    #[must_use]
    pub const fn weights(&self) -> &WeightVector {
        &self.weights
    }
}

impl StateEvaluator for HeuristicEvaluator {
    fn evaluate(&self, state: &GameState) -> f32 {
        if state.is_game_over() {
            return f32::NEG_INFINITY;
        }
        self.weights.dot(&BoardFeatures::from_board(state.board()))
    }
}
