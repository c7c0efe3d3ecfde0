/// Points awarded for each cleared row.
///
/// Rows cleared by the same lock each earn this amount; there is no bonus
/// for clearing several at once.
pub const SCORE_PER_LINE: u64 = 100;

/// Per-game statistics: score, cleared rows and locked pieces.
///
/// # Example
///
/// ```
/// use blockfall_engine::GameStats;
///
/// let mut stats = GameStats::new();
/// stats.complete_piece_lock(2);
///
/// assert_eq!(stats.score(), 200);
/// assert_eq!(stats.total_cleared_lines(), 2);
/// assert_eq!(stats.locked_pieces(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameStats {
    score: u64,
    locked_pieces: u64,
    total_cleared_lines: u64,
}

impl GameStats {
    /// Creates empty statistics.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            score: 0,
            locked_pieces: 0,
            total_cleared_lines: 0,
        }
    }

    /// Returns the total score.
    #[must_use]
    pub const fn score(&self) -> u64 {
        self.score
    }

    /// Returns the number of pieces locked so far.
    #[must_use]
    pub const fn locked_pieces(&self) -> u64 {
        self.locked_pieces
    }

    /// Returns the number of rows cleared so far.
    #[must_use]
    pub const fn total_cleared_lines(&self) -> u64 {
        self.total_cleared_lines
    }

    /// Records a lock that cleared `cleared_lines` rows.
    pub const fn complete_piece_lock(&mut self, cleared_lines: usize) {
        let cleared_lines = cleared_lines as u64;
        self.locked_pieces += 1;
        self.total_cleared_lines += cleared_lines;
        self.score += SCORE_PER_LINE * cleared_lines;
    }
}
