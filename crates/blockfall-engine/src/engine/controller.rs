use std::time::Duration;

use crate::{
    DEFAULT_DROP_INTERVAL, Direction, GameLoop, GameState, HighScore, KeyValueStore, Level,
    MoveOutcome, StoreError, TickDriver,
};

/// Where a controlled game currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::IsVariant)]
pub enum GamePhase {
    /// No game running; waiting for a level.
    Idle,
    Playing,
    Paused,
    /// The last lock left no room for the next piece. Waiting for the
    /// player to acknowledge.
    GameOver,
}

/// A player request applied to the active piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerAction {
    Move(Direction),
    Rotate,
}

/// Runs a [`GameState`] against a tick source and a high-score store.
///
/// The controller owns the only [`GameLoop`]; every transition that starts
/// gravity goes through it. Input and ticks are ignored outside
/// [`GamePhase::Playing`].
#[derive(Debug)]
pub struct GameController<S> {
    state: GameState,
    high_score: HighScore<S>,
    game_loop: GameLoop,
    level: Option<Level>,
    phase: GamePhase,
}

impl<S> GameController<S>
where
    S: KeyValueStore,
{
    /// Wraps `state` in an idle controller and reads the best score from `store`.
    pub fn new(state: GameState, store: S) -> Self {
        Self {
            state,
            high_score: HighScore::load(store),
            game_loop: GameLoop::new(),
            level: None,
            phase: GamePhase::Idle,
        }
    }

    /// The game being played, for rendering.
    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Returns the current phase.
    #[must_use]
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Level of the current or last game. `None` until a game is started.
    #[must_use]
    pub fn level(&self) -> Option<Level> {
        self.level
    }

    /// Best score seen so far, including the game in progress.
    #[must_use]
    pub fn high_score(&self) -> u64 {
        self.high_score.best()
    }

    /// Gravity interval of the chosen level.
    #[must_use]
    pub fn drop_interval(&self) -> Duration {
        self.level.map_or(DEFAULT_DROP_INTERVAL, Level::drop_interval)
    }

    /// Returns `true` if a tick source is running.
    #[must_use]
    pub fn is_ticking(&self) -> bool {
        self.game_loop.is_running()
    }

    /// Starts a fresh game at `level`.
    pub fn start<D>(&mut self, driver: &mut D, level: Level)
    where
        D: TickDriver + ?Sized,
    {
        self.level = Some(level);
        self.restart(driver);
    }

    /// Clears the board and score and resumes gravity at the current level.
    pub fn restart<D>(&mut self, driver: &mut D)
    where
        D: TickDriver + ?Sized,
    {
        self.state.reset();
        self.phase = GamePhase::Playing;
        self.game_loop.start(driver, self.drop_interval());
    }

    /// Stops gravity and returns to [`GamePhase::Idle`].
    pub fn leave<D>(&mut self, driver: &mut D)
    where
        D: TickDriver + ?Sized,
    {
        self.game_loop.stop(driver);
        self.phase = GamePhase::Idle;
    }

    /// Pauses a running game or resumes a paused one.
    pub fn toggle_pause<D>(&mut self, driver: &mut D)
    where
        D: TickDriver + ?Sized,
    {
        match self.phase {
            GamePhase::Playing => {
                self.game_loop.stop(driver);
                self.phase = GamePhase::Paused;
            }
            GamePhase::Paused => {
                self.game_loop.start(driver, self.drop_interval());
                self.phase = GamePhase::Playing;
            }
            GamePhase::Idle | GamePhase::GameOver => {}
        }
    }

    /// Acknowledges a game over and starts the next game at the same level.
    pub fn dismiss_game_over<D>(&mut self, driver: &mut D)
    where
        D: TickDriver + ?Sized,
    {
        if self.phase.is_game_over() {
            self.restart(driver);
        }
    }

    /// Applies one gravity step.
    ///
    /// Returns `Ok(None)` when no game is running. A store error is reported
    /// after the move has been fully applied.
    pub fn tick<D>(&mut self, driver: &mut D) -> Result<Option<MoveOutcome>, StoreError>
    where
        D: TickDriver + ?Sized,
    {
        self.handle(driver, PlayerAction::Move(Direction::Down))
    }

    /// Applies a player action. Same contract as [`Self::tick`].
    pub fn handle<D>(
        &mut self,
        driver: &mut D,
        action: PlayerAction,
    ) -> Result<Option<MoveOutcome>, StoreError>
    where
        D: TickDriver + ?Sized,
    {
        if !self.phase.is_playing() {
            return Ok(None);
        }
        let outcome = match action {
            PlayerAction::Move(direction) => self.state.move_piece(direction),
            PlayerAction::Rotate if self.state.rotate() => MoveOutcome::Moved,
            PlayerAction::Rotate => MoveOutcome::Blocked,
        };
        if outcome.is_game_over() {
            self.game_loop.stop(driver);
            self.phase = GamePhase::GameOver;
        }
        self.high_score.submit(self.state.score())?;
        Ok(Some(outcome))
    }
}
