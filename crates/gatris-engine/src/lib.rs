pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

/// Reasons a placement can be rejected by [`GameState::place`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::IsVariant)]
pub enum PlaceError {
    /// Unknown rotation, or the piece would leave the board horizontally.
    #[display("placement is outside the board")]
    OutOfBounds,
    /// The piece cannot occupy even the top row: the game is over.
    #[display("placement is blocked at the top of the board")]
    Blocked,
    #[display("game is already over")]
    GameOver,
}
