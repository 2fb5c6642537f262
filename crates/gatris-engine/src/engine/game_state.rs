use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use crate::{Board, GameStats, PieceKind, PlaceError};

/// A placement choice: which rotation state and which leftmost column offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub rotation: usize,
    pub column: usize,
}

impl Move {
    #[must_use]
    pub const fn new(rotation: usize, column: usize) -> Self {
        Self { rotation, column }
    }
}

/// Upper bound on the number of legal moves for one piece.
pub const MAX_MOVES: usize = 4 * Board::WIDTH;

/// List of legal moves, in rotation-major then column order.
pub type MoveList = ArrayVec<Move, MAX_MOVES>;

/// Mutable state of one game: the board, running statistics and the
/// game-over flag.
///
/// Placement is the only way the board changes during play: drop the piece
/// straight down, lock it, clear full rows, then update the score. Once
/// `game_over` is set it never resets except through [`Self::reset`].
///
/// # Example
///
/// ```
/// use gatris_engine::{GameState, Move, PieceKind};
///
/// let mut state = GameState::new();
/// let cleared = state.place(PieceKind::I, Move::new(0, 0)).unwrap();
///
/// assert_eq!(cleared, 0);
/// assert_eq!(state.stats().pieces_placed(), 1);
/// assert!(!state.is_game_over());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    stats: GameStats,
    game_over: bool,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// Creates a fresh game on an empty board.
    #[must_use]
    pub const fn new() -> Self {
        Self::with_board(Board::EMPTY)
    }

    /// Starts a game from an arbitrary board position with zeroed statistics.
    #[must_use]
    pub const fn with_board(board: Board) -> Self {
        Self {
            board,
            stats: GameStats::new(),
            game_over: false,
        }
    }

    #[must_use]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub const fn stats(&self) -> &GameStats {
        &self.stats
    }

    #[must_use]
    pub const fn score(&self) -> usize {
        self.stats.score()
    }

    #[must_use]
    pub const fn lines_cleared(&self) -> usize {
        self.stats.lines_cleared()
    }

    #[must_use]
    pub const fn pieces_placed(&self) -> usize {
        self.stats.pieces_placed()
    }

    #[must_use]
    pub const fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// Ends the game, e.g. when the next piece has no legal placement.
    pub fn mark_game_over(&mut self) {
        self.game_over = true;
    }

    /// Returns `true` if `kind` in `rotation` fits at `(row, column)` without
    /// overlapping occupied cells or leaving the board.
    ///
    /// Unknown rotations are never valid.
    #[must_use]
    pub fn is_valid_position(
        &self,
        kind: PieceKind,
        rotation: usize,
        column: usize,
        row: usize,
    ) -> bool {
        kind.shape(rotation)
            .is_some_and(|shape| self.board.is_valid_position(shape, column, row))
    }

    /// Returns the resting row offset for dropping `kind` at `mv`, or `None`
    /// if it does not fit even at the top.
    #[must_use]
    pub fn drop_row(&self, kind: PieceKind, mv: Move) -> Option<usize> {
        let shape = kind.shape(mv.rotation)?;
        self.board.drop_row(shape, mv.column)
    }

    /// Drops and locks `kind` using `mv`, then clears lines and scores.
    ///
    /// Returns the number of lines cleared.
    ///
    /// # Errors
    ///
    /// - [`PlaceError::GameOver`] if the game has already ended.
    /// - [`PlaceError::OutOfBounds`] if the rotation is unknown or the piece
    ///   would stick out of the board horizontally. The state is untouched.
    /// - [`PlaceError::Blocked`] if the piece cannot occupy even row 0. The
    ///   game ends and nothing else changes.
    pub fn place(&mut self, kind: PieceKind, mv: Move) -> Result<usize, PlaceError> {
        if self.game_over {
            return Err(PlaceError::GameOver);
        }
        let shape = kind.shape(mv.rotation).ok_or(PlaceError::OutOfBounds)?;
        if !Board::fits_horizontally(shape, mv.column) {
            return Err(PlaceError::OutOfBounds);
        }
        let Some(row) = self.board.drop_row(shape, mv.column) else {
            self.game_over = true;
            return Err(PlaceError::Blocked);
        };

        self.board.fill_shape(shape, mv.column, row, kind);
        let cleared = self.board.clear_lines();
        self.stats.record_placement(cleared);
        Ok(cleared)
    }

    /// Enumerates every `(rotation, column)` that can legally be placed for
    /// `kind`, in rotation-major, column-ascending order.
    ///
    /// Returns an empty list when no placement fits, which signals game over.
    #[must_use]
    pub fn enumerate_moves(&self, kind: PieceKind) -> MoveList {
        let mut moves = MoveList::new();
        for (rotation, shape) in kind.shapes().iter().enumerate() {
            for column in 0..Board::WIDTH {
                if self.board.is_valid_position(shape, column, 0) {
                    moves.push(Move::new(rotation, column));
                }
            }
        }
        moves
    }

    /// Returns the state that would result from placing `kind` with `mv`,
    /// leaving `self` unchanged.
    ///
    /// Returns `None` when the placement is rejected.
    #[must_use]
    pub fn simulate_move(&self, kind: PieceKind, mv: Move) -> Option<Self> {
        let mut next = self.clone();
        next.place(kind, mv).ok()?;
        Some(next)
    }
}
