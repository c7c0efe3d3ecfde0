//! Game simulation and control.
//!
//! - [`GameState`] - Board, active piece and score of one game
//! - [`ActivePiece`] - The falling piece and its position
//! - [`PieceGenerator`] - Uniform random piece selection, optionally seeded
//! - [`GameStats`] - Score and line counters
//! - [`GameLoop`] - Owner of the single gravity tick source
//! - [`HighScore`] - Best score kept in a [`KeyValueStore`]
//! - [`GameController`] - Phases, input and ticks for a whole session
//!
//! # Game Flow
//!
//! 1. Pick a [`Level`]; [`GameController::start`] resets the game and starts
//!    ticks at the level's interval
//! 2. Each tick moves the piece down; a blocked down-move locks it, clears
//!    full rows and spawns the next piece
//! 3. When the next piece does not fit, ticks stop and the game waits in
//!    [`GamePhase::GameOver`] until dismissed, then starts over
//!
//! # Example
//!
//! ```
//! use blockfall_engine::{
//!     Direction, GameController, GameState, Level, MemoryStore, PlayerAction, TickDriver,
//!     TickHandle,
//! };
//! use std::time::Duration;
//!
//! #[derive(Default)]
//! struct ManualTicks(u64);
//!
//! impl TickDriver for ManualTicks {
//!     fn start_ticks(&mut self, _interval: Duration) -> TickHandle {
//!         self.0 += 1;
//!         TickHandle::new(self.0)
//!     }
//!
//!     fn cancel_ticks(&mut self, _handle: TickHandle) {}
//! }
//!
//! let mut ticks = ManualTicks::default();
//! let mut controller = GameController::new(GameState::new(), MemoryStore::new());
//! controller.start(&mut ticks, Level::Easy);
//!
//! controller.handle(&mut ticks, PlayerAction::Move(Direction::Left)).unwrap();
//! controller.tick(&mut ticks).unwrap();
//! assert_eq!(controller.state().active_piece().y(), 1);
//! ```

pub use self::{
    active_piece::*, controller::*, game_loop::*, game_state::*, game_stats::*, high_score::*,
    piece_generator::*,
};

mod active_piece;
mod controller;
mod game_loop;
mod game_state;
mod game_stats;
mod high_score;
mod piece_generator;

#[cfg(test)]
mod test_util;
