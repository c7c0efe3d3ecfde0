use crate::{Board, PieceColor, PieceKind, ShapeGrid};

/// The falling, player-controlled piece.
///
/// Holds its own [`ShapeGrid`], copied from the template at spawn time, so
/// rotation never touches the template. `x` is the column and `y` the row of
/// the shape's top-left corner in board coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivePiece {
    kind: PieceKind,
    color: PieceColor,
    shape: ShapeGrid,
    x: i32,
    y: i32,
}

impl ActivePiece {
    /// Instantiates `kind` at the spawn position for `board`.
    ///
    /// Column is `floor(cols / 2) - floor(width / 2)`, row is 0.
    #[must_use]
    pub fn spawn(kind: PieceKind, board: &Board) -> Self {
        let template = kind.template();
        let x = to_coord(board.cols() / 2) - to_coord(template.width() / 2);
        Self {
            kind,
            color: template.color(),
            shape: template.shape(),
            x,
            y: 0,
        }
    }

    /// Returns the template kind this piece was spawned from.
    #[must_use]
    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    /// Returns the color the piece locks with.
    #[must_use]
    pub fn color(&self) -> PieceColor {
        self.color
    }

    /// Returns the current, possibly rotated, shape.
    #[must_use]
    pub fn shape(&self) -> &ShapeGrid {
        &self.shape
    }

    /// Column of the top-left corner of the shape.
    #[must_use]
    pub fn x(&self) -> i32 {
        self.x
    }

    /// Row of the top-left corner of the shape.
    #[must_use]
    pub fn y(&self) -> i32 {
        self.y
    }

    /// Board `(row, col)` of every filled cell at the current position.
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.shape
            .filled_cells()
            .map(|(row, col)| (self.y + to_coord(row), self.x + to_coord(col)))
    }

    pub(crate) fn set_position(&mut self, x: i32, y: i32) {
        self.x = x;
        self.y = y;
    }

    pub(crate) fn replace_shape(&mut self, shape: ShapeGrid) -> ShapeGrid {
        std::mem::replace(&mut self.shape, shape)
    }
}

/// Converts a board or shape index to a signed coordinate.
pub(crate) fn to_coord(n: usize) -> i32 {
    i32::try_from(n).expect("board dimensions fit in i32")
}
