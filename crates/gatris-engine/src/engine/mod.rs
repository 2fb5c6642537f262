//! Game rules on top of the core data structures.
//!
//! - [`GameState`] - board, statistics and game-over flag; placement and move enumeration
//! - [`GameStats`] - score, line and piece counters
//! - [`PieceGenerator`] - seeded piece stream, uniform or 7-bag ([`PieceSource`])
//! - [`PieceSeed`] - seed for deterministic piece generation
//!
//! # Game Flow
//!
//! 1. Draw the next piece from a [`PieceGenerator`]
//! 2. Enumerate legal moves with [`GameState::enumerate_moves`]
//! 3. Pick one and call [`GameState::place`]
//! 4. Repeat until no legal move exists or placement is blocked
//!
//! # Example
//!
//! ```
//! use gatris_engine::{GameState, PieceGenerator, PieceSeed, PieceSource};
//!
//! let mut state = GameState::new();
//! let mut pieces = PieceGenerator::new(PieceSource::Bag, PieceSeed::from_u64(0));
//!
//! for _ in 0..10 {
//!     let kind = pieces.draw();
//!     let Some(&mv) = state.enumerate_moves(kind).first() else {
//!         state.mark_game_over();
//!         break;
//!     };
//!     if state.place(kind, mv).is_err() {
//!         break;
//!     }
//! }
//! assert!(state.pieces_placed() > 0);
//! ```

pub use self::{game_state::*, piece_source::*, scoring::*};

mod game_state;
mod piece_source;
mod scoring;
