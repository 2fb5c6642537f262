//! Playing whole games with a [`MoveSearch`].

use gatris_engine::{GameState, Move, PieceGenerator, PieceKind};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{heuristic::StateEvaluator, move_search::MoveSearch};

/// One completed turn, handed to the observer of [`play_game`].
#[derive(Debug, Clone, Copy)]
pub struct Turn<'a> {
    /// 1-based turn number (equals pieces placed so far).
    pub number: usize,
    pub piece: PieceKind,
    /// The preview piece, when lookahead is enabled.
    pub next: Option<PieceKind>,
    pub chosen: Move,
    pub lines_cleared: usize,
    /// State after the placement.
    pub state: &'a GameState,
}

/// Final statistics of one game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GameSummary {
    pub lines_cleared: usize,
    pub pieces_placed: usize,
    pub score: usize,
    pub evaluated_positions: usize,
    /// Placements that cleared 0, 1, 2, 3 and 4 lines.
    pub line_clear_counts: [usize; 5],
    /// `false` when the game stopped at the piece cap.
    pub game_over: bool,
}

impl GameSummary {
    fn new(state: &GameState, evaluated_positions: usize) -> Self {
        Self {
            lines_cleared: state.lines_cleared(),
            pieces_placed: state.pieces_placed(),
            score: state.score(),
            evaluated_positions,
            line_clear_counts: *state.stats().line_clear_counts(),
            game_over: state.is_game_over(),
        }
    }
}

/// Plays one game from an empty board until it ends or `max_pieces` pieces
/// have been placed.
///
/// Pieces come from `pieces`. With lookahead enabled the generator is read one
/// piece ahead so the search sees the next piece. When the current piece has
/// no legal placement the game is marked over.
///
/// # Example
///
/// ```
/// use gatris_engine::{PieceGenerator, PieceSeed, PieceSource};
/// use gatris_evaluator::{HeuristicEvaluator, MoveSearch, WeightVector, play_game};
///
/// let search = MoveSearch::new(HeuristicEvaluator::new(WeightVector::DEFAULT));
/// let mut pieces = PieceGenerator::new(PieceSource::Uniform, PieceSeed::from_u64(1));
/// let summary = play_game(&search, &mut pieces, Some(50), |_| {});
///
/// assert!(summary.pieces_placed <= 50);
/// ```
pub fn play_game<E, F>(
    search: &MoveSearch<E>,
    pieces: &mut PieceGenerator,
    max_pieces: Option<usize>,
    mut observer: F,
) -> GameSummary
where
    E: StateEvaluator,
    F: FnMut(&Turn<'_>),
{
    let mut state = GameState::new();
    let mut evaluated_positions = 0;
    let mut current = pieces.draw();
    let mut upcoming = search.lookahead().then(|| pieces.draw());

    while !state.is_game_over() {
        if max_pieces.is_some_and(|max| state.pieces_placed() >= max) {
            break;
        }

        let Some(outcome) = search.select_best_move(&state, current, upcoming) else {
            state.mark_game_over();
            break;
        };
        evaluated_positions += outcome.evaluated_positions;

        match state.place(current, outcome.best) {
            Ok(lines_cleared) => observer(&Turn {
                number: state.pieces_placed(),
                piece: current,
                next: upcoming,
                chosen: outcome.best,
                lines_cleared,
                state: &state,
            }),
            Err(err) => {
                debug!(%err, piece = ?current, "placement rejected");
                break;
            }
        }

        current = match upcoming {
            Some(next) => {
                upcoming = Some(pieces.draw());
                next
            }
            None => pieces.draw(),
        };
    }

    let summary = GameSummary::new(&state, evaluated_positions);
    debug!(
        lines = summary.lines_cleared,
        pieces = summary.pieces_placed,
        score = summary.score,
        game_over = summary.game_over,
        "game finished"
    );
    summary
}

#[cfg(test)]
mod tests {
    use gatris_engine::{PieceSeed, PieceSource};

    use super::*;
    use crate::{heuristic::HeuristicEvaluator, weights::WeightVector};

    fn search(lookahead: bool) -> MoveSearch {
        MoveSearch::new(HeuristicEvaluator::new(WeightVector::DEFAULT)).with_lookahead(lookahead)
    }

    #[test]
    fn test_piece_cap_stops_game() {
        let mut pieces = PieceGenerator::new(PieceSource::Bag, PieceSeed::from_u64(5));
        let summary = play_game(&search(false), &mut pieces, Some(30), |_| {});
        assert_eq!(summary.pieces_placed, 30);
        assert!(!summary.game_over);
        assert_eq!(summary.line_clear_counts.iter().sum::<usize>(), 30);
    }

    #[test]
    fn test_zero_cap_places_nothing() {
        let mut pieces = PieceGenerator::new(PieceSource::Uniform, PieceSeed::from_u64(5));
        let summary = play_game(&search(false), &mut pieces, Some(0), |_| {});
        assert_eq!(summary, GameSummary::default());
    }

    #[test]
    fn test_same_seed_same_game() {
        let play = || {
            let mut pieces = PieceGenerator::new(PieceSource::Uniform, PieceSeed::from_u64(11));
            play_game(&search(true), &mut pieces, Some(100), |_| {})
        };
        assert_eq!(play(), play());
    }

    #[test]
    fn test_observer_sees_every_turn() {
        let mut pieces = PieceGenerator::new(PieceSource::Bag, PieceSeed::from_u64(2));
        let mut turns = Vec::new();
        let mut lines = 0;
        let summary = play_game(&search(true), &mut pieces, Some(40), |turn| {
            turns.push(turn.number);
            lines += turn.lines_cleared;
            assert!(turn.next.is_some());
            assert_eq!(turn.state.pieces_placed(), turn.number);
        });
        assert_eq!(turns, (1..=40).collect::<Vec<_>>());
        assert_eq!(lines, summary.lines_cleared);
    }

    #[test]
    fn test_bad_weights_lose_quickly() {
        // Rewarding height stacks pieces until the top is reached.
        let search = MoveSearch::new(HeuristicEvaluator::new(WeightVector::from_array([
            1.0, 0.0, 0.0, 1.0,
        ])));
        let mut pieces = PieceGenerator::new(PieceSource::Uniform, PieceSeed::from_u64(3));
        let summary = play_game(&search, &mut pieces, Some(10_000), |_| {});
        assert!(summary.game_over);
        assert!(summary.pieces_placed < 10_000);
    }
}
