pub use self::{board::BoardView, summary::GamesSummaryView};

mod board;
mod summary;
