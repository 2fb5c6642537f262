//! Heuristic evaluation and move search for Tetris placements.
//!
//! # Architecture
//!
//! ```text
//! play_game (whole game, piece stream, piece cap)
//!     ↓ uses
//! MoveSearch (pick the best (rotation, column), optional lookahead)
//!     ↓ uses
//! StateEvaluator / HeuristicEvaluator (score one state)
//!     ↓ uses
//! board_feature (aggregate height, complete lines, holes, bumpiness)
//! ```
//!
//! Scores are a linear combination of four board features weighted by a
//! [`WeightVector`]. Weights are usually learned by the `gatris-training`
//! genetic optimizer.
//!
//! # Example
//!
//! ```
//! use gatris_engine::{GameState, PieceKind};
//! use gatris_evaluator::{HeuristicEvaluator, MoveSearch, WeightVector};
//!
//! let search = MoveSearch::new(HeuristicEvaluator::new(WeightVector::DEFAULT));
//! let outcome = search
//!     .select_best_move(&GameState::new(), PieceKind::O, None)
//!     .unwrap();
//! assert_eq!(outcome.evaluated_positions, 9);
//! ```

pub use self::{
    board_feature::BoardFeatures,
    heuristic::{HeuristicEvaluator, StateEvaluator},
    move_search::{MoveSearch, SearchOutcome},
    session::{GameSummary, Turn, play_game},
    weights::{Feature, ParseWeightsError, Preset, WeightVector},
};

pub mod board_feature;
pub mod heuristic;
pub mod move_search;
pub mod session;
pub mod weights;
