use crate::{
    Board, PieceCollisionError, PieceKind, ShapeGrid,
    engine::{
        active_piece::{ActivePiece, to_coord},
        game_stats::GameStats,
        piece_generator::PieceGenerator,
    },
};

/// Direction of a translation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    Down,
}

/// Result of [`GameState::move_piece`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum MoveOutcome {
    /// The piece moved.
    Moved,
    /// A sideways move was rejected; nothing changed.
    Blocked,
    /// The piece could not descend, was locked, and the next piece spawned.
    Locked { cleared_lines: usize },
    /// The piece was locked but the next piece does not fit at its spawn position.
    GameOver { cleared_lines: usize },
}

/// Board, active piece and score of one game.
///
/// All simulation operations are synchronous; the caller decides when
/// gravity ticks happen.
///
/// # Example
///
/// ```
/// use blockfall_engine::{Direction, GameState, MoveOutcome};
///
/// let mut state = GameState::new();
/// assert_eq!(state.move_piece(Direction::Left), MoveOutcome::Moved);
///
/// // Drop until the piece locks.
/// while state.move_piece(Direction::Down).is_moved() {}
/// assert_eq!(state.stats().locked_pieces(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    active_piece: ActivePiece,
    generator: PieceGenerator,
    stats: GameStats,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// Creates a 20×10 game with a randomly seeded generator.
    #[must_use]
    pub fn new() -> Self {
        Self::with_parts(Board::new(), PieceGenerator::new())
    }

    /// Creates a game on `board` drawing pieces from `generator`.
    ///
    /// The first piece is spawned immediately.
    ///
    /// # Panics
    ///
    /// Panics if the board is smaller than 3×3 or already has locked cells,
    /// since the first piece could not be placed.
    #[must_use]
    pub fn with_parts(board: Board, mut generator: PieceGenerator) -> Self {
        assert!(
            board.rows_count() >= 3 && board.cols() >= 3,
            "board must be at least 3x3"
        );
        assert!(
            board.rows().flatten().all(|cell| cell.is_empty()),
            "board must start empty"
        );
        let active_piece = ActivePiece::spawn(generator.next_kind(), &board);
        Self {
            board,
            active_piece,
            generator,
            stats: GameStats::new(),
        }
    }

    /// Returns the locked cells.
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the falling piece.
    #[must_use]
    pub fn active_piece(&self) -> &ActivePiece {
        &self.active_piece
    }

    /// Returns the statistics of the current game.
    #[must_use]
    pub fn stats(&self) -> &GameStats {
        &self.stats
    }

    /// Returns the current score.
    #[must_use]
    pub fn score(&self) -> u64 {
        self.stats.score()
    }

    /// Returns whether `shape` fits with its top-left corner at column `x`, row `y`.
    ///
    /// Every filled cell must land in a column in `[0, cols)` and a row
    /// `< rows`, on an empty board cell. Rows above the board are not
    /// checked against the board.
    #[must_use]
    pub fn can_place(&self, x: i32, y: i32, shape: &ShapeGrid) -> bool {
        let cols = to_coord(self.board.cols());
        let rows = to_coord(self.board.rows_count());
        shape.filled_cells().all(|(dr, dc)| {
            let col = x + to_coord(dc);
            let row = y + to_coord(dr);
            if col < 0 || col >= cols || row >= rows {
                return false;
            }
            let Ok(row) = usize::try_from(row) else {
                return true;
            };
            usize::try_from(col).is_ok_and(|col| self.board.is_empty(row, col))
        })
    }

    /// Replaces the active piece with a fresh, uniformly chosen one at the top.
    ///
    /// Returns an error if the new piece overlaps locked cells; the piece is
    /// still installed so it can be drawn.
    pub fn spawn(&mut self) -> Result<(), PieceCollisionError> {
        let kind = self.generator.next_kind();
        self.spawn_kind(kind)
    }

    /// Like [`Self::spawn`], with a chosen kind.
    pub fn spawn_kind(&mut self, kind: PieceKind) -> Result<(), PieceCollisionError> {
        self.active_piece = ActivePiece::spawn(kind, &self.board);
        if self.fits(&self.active_piece) {
            Ok(())
        } else {
            Err(PieceCollisionError)
        }
    }

    fn fits(&self, piece: &ActivePiece) -> bool {
        self.can_place(piece.x(), piece.y(), piece.shape())
    }

    /// Moves the active piece one cell.
    ///
    /// Rejected left/right moves leave the state unchanged. A rejected down
    /// move locks the piece, clears full rows, scores them and spawns the
    /// next piece.
    pub fn move_piece(&mut self, direction: Direction) -> MoveOutcome {
        let (x, y) = (self.active_piece.x(), self.active_piece.y());
        let (nx, ny) = match direction {
            Direction::Left => (x - 1, y),
            Direction::Right => (x + 1, y),
            Direction::Down => (x, y + 1),
        };
        if self.can_place(nx, ny, self.active_piece.shape()) {
            self.active_piece.set_position(nx, ny);
            return MoveOutcome::Moved;
        }
        match direction {
            Direction::Left | Direction::Right => MoveOutcome::Blocked,
            Direction::Down => self.lock_and_spawn(),
        }
    }

    /// Transposes the active piece's shape in place, unless the result would not fit.
    ///
    /// Returns whether the rotation was applied. No wall kicks are attempted.
    pub fn rotate(&mut self) -> bool {
        let rotated = self.active_piece.shape().transposed();
        let previous = self.active_piece.replace_shape(rotated);
        if self.fits(&self.active_piece) {
            true
        } else {
            self.active_piece.replace_shape(previous);
            false
        }
    }

    /// Merges the active piece into the board.
    fn lock_active_piece(&mut self) {
        let color = self.active_piece.color();
        for (row, col) in self.active_piece.cells() {
            let row = usize::try_from(row).expect("locked cell row is on the board");
            let col = usize::try_from(col).expect("locked cell column is on the board");
            self.board.occupy(row, col, color);
        }
    }

    fn lock_and_spawn(&mut self) -> MoveOutcome {
        self.lock_active_piece();
        let cleared_lines = self.board.clear_full_lines();
        self.stats.complete_piece_lock(cleared_lines);
        match self.spawn() {
            Ok(()) => MoveOutcome::Locked { cleared_lines },
            Err(PieceCollisionError) => MoveOutcome::GameOver { cleared_lines },
        }
    }

    /// Clears the board and score and spawns a new piece.
    pub fn reset(&mut self) {
        self.board.reset();
        self.stats = GameStats::new();
        self.spawn().expect("an empty board always has room for a piece");
    }

    #[cfg(test)]
    pub(crate) fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Cell, PieceColor, PieceSeed};

    fn seeded_state() -> GameState {
        let seed: PieceSeed = "00112233445566778899aabbccddeeff".parse().unwrap();
        GameState::with_parts(Board::new(), PieceGenerator::with_seed(seed))
    }

    fn state_with(kind: PieceKind) -> GameState {
        let mut state = seeded_state();
        state.spawn_kind(kind).unwrap();
        state
    }

    fn fill_row(board: &mut Board, row: usize) {
        for col in 0..board.cols() {
            board.occupy(row, col, PieceColor::Red);
        }
    }

    #[test]
    fn test_square_spawn_can_place() {
        let state = state_with(PieceKind::Square);
        let piece = state.active_piece();
        assert_eq!((piece.x(), piece.y()), (4, 0));
        assert!(state.can_place(4, 0, piece.shape()));
    }

    #[test]
    fn test_can_place_bounds() {
        let state = state_with(PieceKind::Square);
        let shape = state.active_piece().shape().clone();
        assert!(state.can_place(0, 0, &shape));
        assert!(state.can_place(8, 18, &shape));
        assert!(!state.can_place(-1, 0, &shape));
        assert!(!state.can_place(9, 0, &shape));
        assert!(!state.can_place(0, 19, &shape));
        // Above the top edge is not checked against the board.
        assert!(state.can_place(0, -1, &shape));
    }

    #[test]
    fn test_can_place_obstacle() {
        let mut state = state_with(PieceKind::Square);
        state.board_mut().occupy(1, 5, PieceColor::Blue);
        let shape = state.active_piece().shape().clone();
        assert!(!state.can_place(4, 0, &shape));
        assert!(state.can_place(6, 0, &shape));
    }

    #[test]
    fn test_left_right_stop_at_walls() {
        let mut state = state_with(PieceKind::Square);
        for _ in 0..4 {
            assert_eq!(state.move_piece(Direction::Left), MoveOutcome::Moved);
        }
        assert_eq!(state.active_piece().x(), 0);
        assert_eq!(state.move_piece(Direction::Left), MoveOutcome::Blocked);
        assert_eq!(state.active_piece().x(), 0);

        for _ in 0..8 {
            assert_eq!(state.move_piece(Direction::Right), MoveOutcome::Moved);
        }
        assert_eq!(state.active_piece().x(), 8);
        assert_eq!(state.move_piece(Direction::Right), MoveOutcome::Blocked);
        assert_eq!(state.active_piece().x(), 8);
    }

    #[test]
    fn test_sideways_blocked_by_locked_cell() {
        let mut state = state_with(PieceKind::Square);
        state.board_mut().occupy(0, 3, PieceColor::Blue);
        let before = state.active_piece().clone();
        assert_eq!(state.move_piece(Direction::Left), MoveOutcome::Blocked);
        assert_eq!(state.active_piece(), &before);
    }

    #[test]
    fn test_down_then_lock() {
        let mut state = state_with(PieceKind::Square);
        for expected_y in 1..=18 {
            assert_eq!(state.move_piece(Direction::Down), MoveOutcome::Moved);
            assert_eq!(state.active_piece().y(), expected_y);
        }
        assert_eq!(
            state.move_piece(Direction::Down),
            MoveOutcome::Locked { cleared_lines: 0 }
        );
        let orange = Some(Cell::Filled(PieceColor::Orange));
        for (row, col) in [(18, 4), (18, 5), (19, 4), (19, 5)] {
            assert_eq!(state.board().cell(row, col), orange);
        }
        let filled = state.board().rows().flatten().filter(|c| c.is_filled()).count();
        assert_eq!(filled, 4);
        assert_eq!(state.active_piece().y(), 0);
        assert_eq!(state.stats().locked_pieces(), 1);
    }

    #[test]
    fn test_lock_clears_line_and_scores() {
        let mut state = state_with(PieceKind::Square);
        for col in (0..10).filter(|c| !(4..6).contains(c)) {
            state.board_mut().occupy(19, col, PieceColor::Blue);
        }
        while state.move_piece(Direction::Down).is_moved() {}
        assert_eq!(state.score(), 100);
        assert_eq!(state.stats().total_cleared_lines(), 1);
        assert_eq!(state.board().cell(19, 4), Some(Cell::Filled(PieceColor::Orange)));
        assert!(state.board().is_empty(19, 0));
    }

    #[test]
    fn test_lock_clears_two_lines() {
        let mut state = state_with(PieceKind::Square);
        for row in [18, 19] {
            for col in (0..10).filter(|c| !(4..6).contains(c)) {
                state.board_mut().occupy(row, col, PieceColor::Blue);
            }
        }
        let mut outcome = state.move_piece(Direction::Down);
        while outcome.is_moved() {
            outcome = state.move_piece(Direction::Down);
        }
        assert_eq!(outcome, MoveOutcome::Locked { cleared_lines: 2 });
        assert_eq!(state.score(), 200);
        assert_eq!(state.board(), &Board::new());
    }

    #[test]
    fn test_rotate_four_times_restores_shape() {
        for kind in PieceKind::ALL {
            let mut state = state_with(kind);
            for _ in 0..3 {
                state.move_piece(Direction::Down);
            }
            let original = state.active_piece().shape().clone();
            for _ in 0..4 {
                assert!(state.rotate(), "{kind:?} should rotate in open space");
            }
            assert_eq!(state.active_piece().shape(), &original);
        }
    }

    #[test]
    fn test_rotate_square_is_noop() {
        let mut state = state_with(PieceKind::Square);
        let original = state.active_piece().clone();
        assert!(state.rotate());
        assert_eq!(state.active_piece(), &original);
    }

    #[test]
    fn test_rotate_is_transpose() {
        let mut state = state_with(PieceKind::TeeRight);
        assert!(state.rotate());
        assert_eq!(
            state.active_piece().shape(),
            &ShapeGrid::from_rows(&[[true, true, true], [false, true, false]])
        );
    }

    #[test]
    fn test_rotate_rejected_near_wall() {
        let mut state = state_with(PieceKind::TeeRight);
        while state.move_piece(Direction::Right).is_moved() {}
        assert_eq!(state.active_piece().x(), 8);
        let before = state.active_piece().clone();
        assert!(!state.rotate());
        assert_eq!(state.active_piece(), &before);
    }

    #[test]
    fn test_rotate_rejected_by_obstacle() {
        let mut state = state_with(PieceKind::Ell);
        // The transposed shape reaches row 2 in column 4.
        state.board_mut().occupy(2, 4, PieceColor::Blue);
        let before = state.active_piece().clone();
        assert!(!state.rotate());
        assert_eq!(state.active_piece(), &before);
    }

    #[test]
    fn test_spawn_into_occupied_top_is_game_over() {
        let mut state = seeded_state();
        for col in 0..10 {
            state.board_mut().occupy(0, col, PieceColor::Red);
        }
        assert!(state.spawn().is_err());
    }

    #[test]
    fn test_lock_reports_game_over() {
        let mut state = state_with(PieceKind::Square);
        for row in 2..20 {
            state.board_mut().occupy(row, 4, PieceColor::Red);
            state.board_mut().occupy(row, 5, PieceColor::Red);
        }
        // The square locks on rows 0..2 and every kind's spawn cells
        // include column 4 or 5 there.
        assert_eq!(
            state.move_piece(Direction::Down),
            MoveOutcome::GameOver { cleared_lines: 0 }
        );
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut state = state_with(PieceKind::Square);
        fill_row(state.board_mut(), 10);
        state.board_mut().occupy(19, 0, PieceColor::Red);
        while state.move_piece(Direction::Down).is_moved() {}
        state.reset();
        assert_eq!(state.board(), &Board::new());
        assert_eq!(state.score(), 0);
        assert_eq!(state.stats(), &GameStats::new());
        assert_eq!(state.active_piece().y(), 0);
    }
}
