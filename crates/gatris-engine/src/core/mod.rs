//! Core data structures: the piece catalog and the playfield.

pub use self::{board::*, piece::*};

pub(crate) mod board;
pub(crate) mod piece;
