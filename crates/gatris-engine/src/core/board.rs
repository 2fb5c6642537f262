use std::fmt;

use super::piece::{PieceKind, PieceShape};

/// A single row of the playfield.
///
/// Each cell is either empty (`None`) or holds the kind of the piece that was
/// locked there. The tag is only used for rendering; occupancy is all the
/// simulation cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardRow {
    cells: [Option<PieceKind>; Board::WIDTH],
}

impl BoardRow {
    const EMPTY: Self = Self {
        cells: [None; Board::WIDTH],
    };

    /// Returns the cells of this row from left to right.
    #[must_use]
    pub const fn cells(&self) -> &[Option<PieceKind>; Board::WIDTH] {
        &self.cells
    }

    /// Returns `true` if every cell in the row is occupied.
    #[must_use]
    pub fn is_filled(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// Returns `true` if no cell in the row is occupied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(Option::is_none)
    }
}

/// The 10×20 playfield.
///
/// Row 0 is the top of the board and row 19 is the bottom. Pieces are placed
/// by choosing a rotation and a column offset, then dropping straight down
/// (see [`Self::drop_row`]); there is no sliding, soft drop or kicks.
///
/// # Example
///
/// ```
/// use gatris_engine::{Board, PieceKind};
///
/// let board = Board::EMPTY;
/// let shape = PieceKind::O.shape(0).unwrap();
///
/// // An O-piece dropped onto an empty board rests on the floor.
/// assert_eq!(board.drop_row(shape, 0), Some(18));
/// assert_eq!(board.column_heights(), [0; Board::WIDTH]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: [BoardRow; Board::HEIGHT],
}

impl Default for Board {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Board {
    /// Number of columns.
    pub const WIDTH: usize = 10;
    /// Number of rows.
    pub const HEIGHT: usize = 20;

    /// A board with every cell empty.
    pub const EMPTY: Self = Self {
        rows: [BoardRow::EMPTY; Board::HEIGHT],
    };

    /// Returns an iterator over the rows from top (row 0) to bottom.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = &BoardRow> {
        self.rows.iter()
    }

    /// Returns the tag stored at `(row, col)`, or `None` if the cell is empty
    /// or outside the board.
    #[must_use]
    pub fn cell(&self, row: usize, col: usize) -> Option<PieceKind> {
        self.rows.get(row)?.cells.get(col).copied().flatten()
    }

    /// Returns `true` if `(row, col)` lies on the board and is occupied.
    #[must_use]
    pub fn is_occupied(&self, row: usize, col: usize) -> bool {
        self.cell(row, col).is_some()
    }

    /// Overwrites a single cell.
    ///
    /// Intended for setting up positions; normal play goes through
    /// [`GameState::place`](crate::GameState::place).
    ///
    /// # Panics
    ///
    /// Panics if `(row, col)` is outside the board.
    pub fn set_cell(&mut self, row: usize, col: usize, cell: Option<PieceKind>) {
        self.rows[row].cells[col] = cell;
    }

    /// Fills every cell of `row` in `cols` with `kind`.
    ///
    /// # Panics
    ///
    /// Panics if `row` or any column in `cols` is outside the board.
    pub fn fill_row_span(
        &mut self,
        row: usize,
        cols: impl IntoIterator<Item = usize>,
        kind: PieceKind,
    ) {
        for col in cols {
            self.set_cell(row, col, Some(kind));
        }
    }

    /// Returns `true` if every cell of `shape` at the given offsets lies
    /// inside the board and lands on an empty cell.
    #[must_use]
    pub fn is_valid_position(&self, shape: &PieceShape, col_offset: usize, row_offset: usize) -> bool {
        shape.iter().all(|&(r, c)| {
            let (row, col) = (row_offset + r, col_offset + c);
            row < Self::HEIGHT && col < Self::WIDTH && !self.is_occupied(row, col)
        })
    }

    /// Returns `true` if every cell of `shape` shifted by `col_offset` lies
    /// within the board's columns.
    #[must_use]
    pub fn fits_horizontally(shape: &PieceShape, col_offset: usize) -> bool {
        shape.iter().all(|&(_, c)| col_offset + c < Self::WIDTH)
    }

    /// Returns the deepest row offset at which `shape` can rest after a
    /// straight drop at `col_offset`.
    ///
    /// The drop scans downward from row 0 and stops at the first invalid row
    /// offset. Returns `None` when the piece does not fit even at row 0
    /// (either the spawn area is blocked or the column is out of range).
    #[must_use]
    pub fn drop_row(&self, shape: &PieceShape, col_offset: usize) -> Option<usize> {
        if !self.is_valid_position(shape, col_offset, 0) {
            return None;
        }
        let mut row = 0;
        while row + 1 < Self::HEIGHT && self.is_valid_position(shape, col_offset, row + 1) {
            row += 1;
        }
        Some(row)
    }

    /// Writes `kind` into every cell of `shape` at the given offsets.
    pub(crate) fn fill_shape(
        &mut self,
        shape: &PieceShape,
        col_offset: usize,
        row_offset: usize,
        kind: PieceKind,
    ) {
        for &(r, c) in shape {
            self.set_cell(row_offset + r, col_offset + c, Some(kind));
        }
    }

    /// Clears filled lines and returns the number of lines cleared.
    ///
    /// Cleared rows are removed, rows above shift down preserving their
    /// relative order, and empty rows are inserted at the top.
    pub fn clear_lines(&mut self) -> usize {
        let mut count = 0;
        for y in (0..Self::HEIGHT).rev() {
            if self.rows[y].is_filled() {
                count += 1;
                continue;
            }
            if count > 0 {
                self.rows[y + count] = self.rows[y];
            }
        }
        self.rows[..count].fill(BoardRow::EMPTY);
        count
    }

    /// Returns the number of rows that are currently completely filled.
    #[must_use]
    pub fn filled_row_count(&self) -> usize {
        self.rows.iter().filter(|row| row.is_filled()).count()
    }

    /// Returns the height of each column.
    ///
    /// The height of a column is `HEIGHT - r` where `r` is the topmost
    /// occupied row, or 0 for an empty column.
    #[must_use]
    pub fn column_heights(&self) -> [usize; Self::WIDTH] {
        std::array::from_fn(|col| {
            (0..Self::HEIGHT)
                .find(|&row| self.is_occupied(row, col))
                .map_or(0, |top| Self::HEIGHT - top)
        })
    }

    /// Returns the total number of occupied cells.
    #[must_use]
    pub fn occupied_cell_count(&self) -> usize {
        self.rows
            .iter()
            .map(|row| row.cells.iter().filter(|c| c.is_some()).count())
            .sum()
    }
}

/// Renders the board as text: one line per row, `.` for empty cells and the
/// piece letter for occupied ones.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for cell in &row.cells {
                let ch = cell.map_or('.', PieceKind::as_char);
                write!(f, "{ch}")?;
            }
        }
        Ok(())
    }
}
