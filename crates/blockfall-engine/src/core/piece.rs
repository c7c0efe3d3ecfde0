use arrayvec::ArrayVec;
use rand::{
    Rng,
    distr::{Distribution, StandardUniform},
};

/// Largest bounding box (rows or columns) a shape grid can have.
pub const MAX_SHAPE_SIZE: usize = 4;

/// Color marker of a piece.
///
/// The board stores this value for locked cells; it carries no meaning for
/// the simulation beyond "occupied".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum PieceColor {
    #[display("orange")]
    Orange,
    #[display("blue")]
    Blue,
    #[display("red")]
    Red,
    #[display("green")]
    Green,
    #[display("yellow")]
    Yellow,
    #[display("purple")]
    Purple,
    #[display("cyan")]
    Cyan,
}

/// One of the seven piece templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PieceKind {
    /// 2×2 square.
    Square = 0,
    /// T pointing right, three rows tall.
    TeeRight = 1,
    /// S-shaped.
    Ess = 2,
    /// Z-shaped.
    Zed = 3,
    /// T pointing up.
    TeeUp = 4,
    /// L lying on its side.
    Ell = 5,
    /// J lying on its side.
    Jay = 6,
}

impl Distribution<PieceKind> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceKind {
        PieceKind::ALL[rng.random_range(0..PieceKind::LEN)]
    }
}

impl PieceKind {
    /// Number of piece kinds (7).
    pub const LEN: usize = 7;

    pub const ALL: [PieceKind; Self::LEN] = [
        PieceKind::Square,
        PieceKind::TeeRight,
        PieceKind::Ess,
        PieceKind::Zed,
        PieceKind::TeeUp,
        PieceKind::Ell,
        PieceKind::Jay,
    ];

    /// Returns the immutable template of this kind.
    #[must_use]
    pub fn template(self) -> &'static PieceTemplate {
        &PIECE_TEMPLATES[self as usize]
    }

    /// Returns the color of this kind's template.
    #[must_use]
    pub fn color(self) -> PieceColor {
        self.template().color
    }
}

/// Immutable piece template: a shape paired with a color.
///
/// Templates are never handed out mutably. [`PieceTemplate::shape`] returns a
/// fresh [`ShapeGrid`] that the caller owns.
#[derive(Debug)]
pub struct PieceTemplate {
    kind: PieceKind,
    color: PieceColor,
    rows: &'static [&'static [bool]],
}

impl PieceTemplate {
    /// Returns which kind this template describes.
    #[must_use]
    pub const fn kind(&self) -> PieceKind {
        self.kind
    }

    /// Returns the color locked cells of this piece get.
    #[must_use]
    pub const fn color(&self) -> PieceColor {
        self.color
    }

    /// Width of the template's bounding box.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.rows[0].len()
    }

    /// Returns a new, independently owned copy of the template's shape.
    #[must_use]
    pub fn shape(&self) -> ShapeGrid {
        ShapeGrid::from_rows(self.rows)
    }
}

static PIECE_TEMPLATES: [PieceTemplate; PieceKind::LEN] = {
    const C: bool = true;
    const E: bool = false;
    [
        PieceTemplate {
            kind: PieceKind::Square,
            color: PieceColor::Orange,
            rows: &[&[C, C], &[C, C]],
        },
        PieceTemplate {
            kind: PieceKind::TeeRight,
            color: PieceColor::Blue,
            rows: &[&[C, E], &[C, C], &[C, E]],
        },
        PieceTemplate {
            kind: PieceKind::Ess,
            color: PieceColor::Red,
            rows: &[&[E, C, C], &[C, C, E]],
        },
        PieceTemplate {
            kind: PieceKind::Zed,
            color: PieceColor::Green,
            rows: &[&[C, C, E], &[E, C, C]],
        },
        PieceTemplate {
            kind: PieceKind::TeeUp,
            color: PieceColor::Yellow,
            rows: &[&[E, C, E], &[C, C, C]],
        },
        PieceTemplate {
            kind: PieceKind::Ell,
            color: PieceColor::Purple,
            rows: &[&[C, C, C], &[C, E, E]],
        },
        PieceTemplate {
            kind: PieceKind::Jay,
            color: PieceColor::Cyan,
            rows: &[&[C, E, E], &[C, C, C]],
        },
    ]
};

/// Boolean matrix describing which cells of a piece's bounding box are filled.
///
/// Row-major: `grid.is_filled(row, col)`. Every row has the same length.
///
/// # Example
///
/// ```
/// use blockfall_engine::ShapeGrid;
///
/// let shape = ShapeGrid::from_rows(&[&[true, false], &[true, true], &[true, false]]);
/// assert_eq!((shape.height(), shape.width()), (3, 2));
///
/// let transposed = shape.transposed();
/// assert_eq!((transposed.height(), transposed.width()), (2, 3));
/// assert!(transposed.is_filled(1, 1));
/// assert!(!transposed.is_filled(1, 0));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeGrid {
    rows: ArrayVec<ArrayVec<bool, MAX_SHAPE_SIZE>, MAX_SHAPE_SIZE>,
}

impl ShapeGrid {
    /// Builds a grid from row slices.
    ///
    /// # Panics
    ///
    /// Panics if the grid is empty, ragged, or larger than [`MAX_SHAPE_SIZE`]
    /// in either direction.
    #[must_use]
    pub fn from_rows<R>(rows: &[R]) -> Self
    where
        R: AsRef<[bool]>,
    {
        assert!(
            !rows.is_empty() && rows.len() <= MAX_SHAPE_SIZE,
            "shape must have 1..={MAX_SHAPE_SIZE} rows, got {}",
            rows.len()
        );
        let width = rows[0].as_ref().len();
        assert!(
            (1..=MAX_SHAPE_SIZE).contains(&width),
            "shape must have 1..={MAX_SHAPE_SIZE} columns, got {width}"
        );
        let rows = rows
            .iter()
            .map(|row| {
                let row = row.as_ref();
                assert_eq!(row.len(), width, "shape rows must have equal length");
                row.iter().copied().collect()
            })
            .collect();
        Self { rows }
    }

    /// Number of rows in the bounding box.
    #[must_use]
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns in the bounding box.
    #[must_use]
    pub fn width(&self) -> usize {
        self.rows[0].len()
    }

    /// Returns whether the cell at `(row, col)` is filled. Out of range is `false`.
    #[must_use]
    pub fn is_filled(&self, row: usize, col: usize) -> bool {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .copied()
            .unwrap_or(false)
    }

    /// Iterates over `(row, col)` of every filled cell, top to bottom, left to right.
    pub fn filled_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.rows.iter().enumerate().flat_map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .filter(|&(_, filled)| *filled)
                .map(move |(col, _)| (row, col))
        })
    }

    /// Matrix transpose: `new[col][row] = old[row][col]`.
    ///
    /// This is what [`GameState::rotate`](crate::GameState::rotate) applies.
    /// It is a reflection across the main diagonal, so it is only a true
    /// quarter turn for symmetric shapes.
    #[must_use]
    pub fn transposed(&self) -> Self {
        let rows = (0..self.width())
            .map(|col| self.rows.iter().map(|row| row[col]).collect())
            .collect();
        Self { rows }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_template_shapes_have_four_cells() {
        for kind in PieceKind::ALL {
            let shape = kind.template().shape();
            assert_eq!(shape.filled_cells().count(), 4, "{kind:?}");
            assert_eq!(kind.template().kind(), kind);
        }
    }

    #[test]
    fn test_template_colors_are_distinct() {
        let colors: HashSet<_> = PieceKind::ALL.iter().map(|kind| kind.color()).collect();
        assert_eq!(colors.len(), PieceKind::LEN);
    }

    #[test]
    fn test_shape_is_independent_copy() {
        let template = PieceKind::TeeRight.template();
        let shape = template.shape().transposed();
        assert_ne!(shape, template.shape());
        assert_eq!(template.shape().height(), 3);
    }

    #[test]
    fn test_transpose_non_square() {
        let shape = PieceKind::Ell.template().shape();
        let transposed = shape.transposed();
        assert_eq!(
            transposed,
            ShapeGrid::from_rows(&[[true, true], [true, false], [true, false]])
        );
    }

    #[test]
    fn test_transpose_twice_is_identity() {
        for kind in PieceKind::ALL {
            let shape = kind.template().shape();
            assert_eq!(shape.transposed().transposed(), shape, "{kind:?}");
        }
    }

    #[test]
    fn test_square_transpose_is_noop() {
        let shape = PieceKind::Square.template().shape();
        assert_eq!(shape.transposed(), shape);
    }

    #[test]
    fn test_filled_cells_order() {
        let shape = PieceKind::TeeUp.template().shape();
        let cells: Vec<_> = shape.filled_cells().collect();
        assert_eq!(cells, vec![(0, 1), (1, 0), (1, 1), (1, 2)]);
    }

    #[test]
    #[should_panic(expected = "equal length")]
    fn test_ragged_rows_rejected() {
        let _ = ShapeGrid::from_rows(&[&[true, true][..], &[true][..]]);
    }
}
