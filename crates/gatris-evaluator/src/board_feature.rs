//! Board features used by the heuristic evaluator.
//!
//! Each feature is a pure function of the board:
//!
//! | Feature            | Meaning                                                        |
//! |--------------------|----------------------------------------------------------------|
//! | `aggregate_height` | Sum of all column heights                                      |
//! | `complete_lines`   | Rows that are currently completely filled                      |
//! | `holes`            | Empty cells with at least one occupied cell above, per column  |
//! | `bumpiness`        | Sum of absolute height differences between adjacent columns    |
//!
//! `complete_lines` is measured on the board as it is handed in. The evaluator
//! scores post-placement states, where full rows have already been cleared, so
//! it is almost always 0 in practice.

use gatris_engine::Board;
use serde::{Deserialize, Serialize};

/// Sum of the heights of all columns.
#[must_use]
pub fn aggregate_height(board: &Board) -> usize {
    board.column_heights().iter().sum()
}

/// Number of completely filled rows.
#[must_use]
pub fn complete_lines(board: &Board) -> usize {
    board.filled_row_count()
}

/// Number of empty cells lying below the topmost occupied cell of their column.
#[must_use]
pub fn holes(board: &Board) -> usize {
    let mut count = 0;
    for col in 0..Board::WIDTH {
        let mut covered = false;
        for row in 0..Board::HEIGHT {
            if board.is_occupied(row, col) {
                covered = true;
            } else if covered {
                count += 1;
            }
        }
    }
    count
}

/// Sum of absolute height differences between adjacent columns.
#[must_use]
pub fn bumpiness(board: &Board) -> usize {
    board
        .column_heights()
        .windows(2)
        .map(|pair| pair[0].abs_diff(pair[1]))
        .sum()
}

/// All four feature values for one board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BoardFeatures {
    pub aggregate_height: usize,
    pub complete_lines: usize,
    pub holes: usize,
    pub bumpiness: usize,
}

impl BoardFeatures {
    #[must_use]
    pub fn from_board(board: &Board) -> Self {
        Self {
            aggregate_height: aggregate_height(board),
            complete_lines: complete_lines(board),
            holes: holes(board),
            bumpiness: bumpiness(board),
        }
    }
}
