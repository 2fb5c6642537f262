use std::fmt;

use gatris_engine::{Board, GameState};

/// Framed text rendering of a game in progress.
///
/// ```text
/// ┌──────────┐
/// │..........│
/// │....TTT...│
/// └──────────┘
/// Lines: 0 | Pieces: 1 | Score: 0
/// ```
#[derive(Debug, Clone, Copy)]
pub struct BoardView<'a> {
    state: &'a GameState,
}

impl<'a> BoardView<'a> {
    pub fn new(state: &'a GameState) -> Self {
        Self { state }
    }
}

impl fmt::Display for BoardView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let border = "─".repeat(Board::WIDTH);
        writeln!(f, "┌{border}┐")?;
        for line in self.state.board().to_string().lines() {
            writeln!(f, "│{line}│")?;
        }
        writeln!(f, "└{border}┘")?;
        write!(
            f,
            "Lines: {} | Pieces: {} | Score: {}",
            self.state.lines_cleared(),
            self.state.pieces_placed(),
            self.state.score()
        )?;
        if self.state.is_game_over() {
            write!(f, " | GAME OVER")?;
        }
        Ok(())
    }
}
