use super::piece::PieceColor;

/// Default number of board rows.
pub const DEFAULT_ROWS: usize = 20;
/// Default number of board columns.
pub const DEFAULT_COLS: usize = 10;

/// A single board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, derive_more::IsVariant)]
pub enum Cell {
    #[default]
    Empty,
    /// Locked piece cell, tagged with the piece's color.
    Filled(PieceColor),
}

/// Fixed-size grid of locked cells.
///
/// Row 0 is the top of the board. Dimensions are fixed at construction.
///
/// # Example
///
/// ```
/// use blockfall_engine::{Board, PieceColor};
///
/// let mut board = Board::new();
/// for col in 0..board.cols() {
///     board.occupy(19, col, PieceColor::Cyan);
/// }
/// assert_eq!(board.clear_full_lines(), 1);
/// assert!(board.is_empty(19, 0));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: Vec<Box<[Cell]>>,
    cols: usize,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Creates an empty 20×10 board.
    #[must_use]
    pub fn new() -> Self {
        Self::with_size(DEFAULT_ROWS, DEFAULT_COLS)
    }

    /// Creates an empty board with the given dimensions.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    #[must_use]
    pub fn with_size(rows: usize, cols: usize) -> Self {
        assert!(rows > 0 && cols > 0, "board must not be empty");
        Self {
            rows: (0..rows).map(|_| Self::empty_row(cols)).collect(),
            cols,
        }
    }

    fn empty_row(cols: usize) -> Box<[Cell]> {
        vec![Cell::Empty; cols].into_boxed_slice()
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn rows_count(&self) -> usize {
        self.rows.len()
    }

    /// Returns the number of columns.
    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Returns the cell at `(row, col)`, or `None` when out of bounds.
    #[must_use]
    pub fn cell(&self, row: usize, col: usize) -> Option<Cell> {
        self.rows.get(row).and_then(|r| r.get(col)).copied()
    }

    /// Returns true iff `(row, col)` is in bounds and empty.
    #[must_use]
    pub fn is_empty(&self, row: usize, col: usize) -> bool {
        self.cell(row, col).is_some_and(|cell| cell.is_empty())
    }

    /// Locks `color` into the cell at `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if `(row, col)` is out of bounds. Callers only occupy cells
    /// that passed a placement check.
    pub fn occupy(&mut self, row: usize, col: usize, color: PieceColor) {
        let rows = self.rows.len();
        let cols = self.cols;
        let Some(cell) = self.rows.get_mut(row).and_then(|r| r.get_mut(col)) else {
            panic!("cell ({row}, {col}) is outside the {rows}x{cols} board");
        };
        *cell = Cell::Filled(color);
    }

    /// Removes every full row and inserts an empty row at the top for each.
    ///
    /// Rows are scanned bottom to top. After a removal the same index is
    /// checked again, since it now holds the row that was above, so adjacent
    /// full rows are all cleared in one call.
    ///
    /// Returns the number of rows removed.
    pub fn clear_full_lines(&mut self) -> usize {
        let mut cleared = 0;
        let mut row = self.rows.len();
        while row > 0 {
            if self.rows[row - 1].iter().all(|cell| cell.is_filled()) {
                self.rows.remove(row - 1);
                self.rows.insert(0, Self::empty_row(self.cols));
                cleared += 1;
            } else {
                row -= 1;
            }
        }
        cleared
    }

    /// Empties every cell.
    pub fn reset(&mut self) {
        for row in &mut self.rows {
            row.fill(Cell::Empty);
        }
    }

    /// Iterates over rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        self.rows.iter().map(|row| &row[..])
    }
}
