//! Move search: choosing a placement for the current piece.
//!
//! Every legal `(rotation, column)` for the current piece is simulated on a
//! clone of the state and scored with a [`StateEvaluator`]. With lookahead
//! enabled and the next piece known, a move is scored by the best result
//! reachable with the next piece instead.
//!
//! # Tie-break
//!
//! Moves are scanned in [`GameState::enumerate_moves`] order (rotation, then
//! column, both ascending) and a later move only replaces the current best if
//! its score is strictly greater. Among equal scores the first enumerated move
//! wins, which keeps play deterministic for a given piece sequence.
//!
//! # Cost
//!
//! Without lookahead one decision costs one evaluation per legal move (at most
//! 34 for the seven standard pieces). Lookahead multiplies this by the next
//! piece's own move count.

use gatris_engine::{GameState, Move, PieceKind};
use tracing::trace;

use crate::heuristic::{HeuristicEvaluator, StateEvaluator};

/// Result of a successful search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchOutcome {
    /// The selected placement.
    pub best: Move,
    /// Score of the selected placement (may be negative infinity).
    pub score: f32,
    /// Number of states passed to the evaluator during this search.
    pub evaluated_positions: usize,
}

/// Chooses placements by exhaustive one- or two-piece search.
#[derive(Debug, Clone)]
pub struct MoveSearch<E = HeuristicEvaluator> {
    evaluator: E,
    lookahead: bool,
}

impl<E> MoveSearch<E>
where
    E: StateEvaluator,
{
    /// Creates a search without lookahead.
    #[must_use]
    pub const fn new(evaluator: E) -> Self {
        Self {
            evaluator,
            lookahead: false,
        }
    }

    /// Enables or disables one-piece lookahead.
    #[must_use]
    pub const fn with_lookahead(mut self, lookahead: bool) -> Self {
        self.lookahead = lookahead;
        self
    }

    #[must_use]
    pub const fn lookahead(&self) -> bool {
        self.lookahead
    }

    /// Selects the best placement for `current`.
    ///
    /// `next` is only consulted when lookahead is enabled. Returns `None` when
    /// `current` has no legal placement, which callers treat as game over.
    #[must_use]
    pub fn select_best_move(
        &self,
        state: &GameState,
        current: PieceKind,
        next: Option<PieceKind>,
    ) -> Option<SearchOutcome> {
        let next = next.filter(|_| self.lookahead);
        let mut evaluated_positions = 0;
        let mut best: Option<(Move, f32)> = None;

        for mv in state.enumerate_moves(current) {
            let Some(after) = state.simulate_move(current, mv) else {
                continue;
            };
            let score = match next {
                Some(next) => self.best_follow_up(&after, next, &mut evaluated_positions),
                None => {
                    evaluated_positions += 1;
                    self.evaluator.evaluate(&after)
                }
            };
            trace!(piece = ?current, rotation = mv.rotation, column = mv.column, score, "scored move");
            if best.is_none_or(|(_, best_score)| score > best_score) {
                best = Some((mv, score));
            }
        }

        best.map(|(best, score)| SearchOutcome {
            best,
            score,
            evaluated_positions,
        })
    }

    /// Best score reachable by placing `next` on `state`, or negative infinity
    /// if `next` has no legal placement.
    fn best_follow_up(&self, state: &GameState, next: PieceKind, evaluated: &mut usize) -> f32 {
        state
            .enumerate_moves(next)
            .into_iter()
            .filter_map(|mv| state.simulate_move(next, mv))
            .map(|after| {
                *evaluated += 1;
                self.evaluator.evaluate(&after)
            })
            .fold(f32::NEG_INFINITY, f32::max)
    }
}

#[cfg(test)]
mod tests {
    use gatris_engine::Board;

    use super::*;
    use crate::weights::WeightVector;

    #[derive(Debug)]
    struct Constant;

    impl StateEvaluator for Constant {
        fn evaluate(&self, _state: &GameState) -> f32 {
            1.0
        }
    }

    fn default_search() -> MoveSearch {
        MoveSearch::new(HeuristicEvaluator::new(WeightVector::DEFAULT))
    }

    #[test]
    fn test_no_legal_move() {
        let mut board = Board::EMPTY;
        board.fill_row_span(0, 0..Board::WIDTH, PieceKind::Z);
        board.fill_row_span(1, 0..Board::WIDTH, PieceKind::Z);
        let state = GameState::with_board(board);
        assert!(default_search().select_best_move(&state, PieceKind::T, None).is_none());
    }

    #[test]
    fn test_ties_pick_first_enumerated_move() {
        let search = MoveSearch::new(Constant);
        let outcome = search
            .select_best_move(&GameState::new(), PieceKind::T, None)
            .unwrap();
        assert_eq!(outcome.best, Move::new(0, 0));
        assert_eq!(outcome.evaluated_positions, 34);
    }

    #[test]
    fn test_completes_the_line() {
        let mut board = Board::EMPTY;
        board.fill_row_span(19, 0..9, PieceKind::L);
        let state = GameState::with_board(board);
        let outcome = default_search()
            .select_best_move(&state, PieceKind::I, None)
            .unwrap();
        assert_eq!(outcome.best, Move::new(1, 9));
    }

    #[test]
    fn test_search_does_not_mutate_state() {
        let state = GameState::new();
        let before = state.clone();
        let _ = default_search().with_lookahead(true).select_best_move(
            &state,
            PieceKind::S,
            Some(PieceKind::Z),
        );
        assert_eq!(state, before);
    }

    #[test]
    fn test_lookahead_evaluates_follow_ups() {
        let search = default_search().with_lookahead(true);
        let outcome = search
            .select_best_move(&GameState::new(), PieceKind::O, Some(PieceKind::O))
            .unwrap();
        assert_eq!(outcome.evaluated_positions, 9 * 9);

        // Without a known next piece lookahead has nothing to look at.
        let outcome = search
            .select_best_move(&GameState::new(), PieceKind::O, None)
            .unwrap();
        assert_eq!(outcome.evaluated_positions, 9);
    }

    #[test]
    fn test_lookahead_disabled_ignores_next() {
        let outcome = default_search()
            .select_best_move(&GameState::new(), PieceKind::O, Some(PieceKind::I))
            .unwrap();
        assert_eq!(outcome.evaluated_positions, 9);
    }

    #[test]
    fn test_lookahead_dead_end_scores_negative_infinity() {
        // Row 1 is filled except column 9, and (2, 9) blocks vertical I drops,
        // so only flat I placements on row 0 are legal and no O fits afterwards.
        let mut board = Board::EMPTY;
        board.fill_row_span(1, 0..9, PieceKind::J);
        board.set_cell(2, 9, Some(PieceKind::J));
        let state = GameState::with_board(board);

        let outcome = default_search()
            .with_lookahead(true)
            .select_best_move(&state, PieceKind::I, Some(PieceKind::O))
            .unwrap();
        assert_eq!(outcome.best, Move::new(0, 0));
        assert_eq!(outcome.score, f32::NEG_INFINITY);
        assert_eq!(outcome.evaluated_positions, 0);
    }
}
