use std::time::Duration;

/// Drop interval used before a level has been chosen.
pub const DEFAULT_DROP_INTERVAL: Duration = Duration::from_millis(1000);

/// Difficulty level, selecting the gravity interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum Level {
    Easy,
    Medium,
    Hard,
}

impl Level {
    pub const ALL: [Level; 3] = [Level::Easy, Level::Medium, Level::Hard];

    /// Time between automatic down-moves.
    #[must_use]
    pub const fn drop_interval(self) -> Duration {
        match self {
            Level::Easy => Duration::from_millis(900),
            Level::Medium => Duration::from_millis(600),
            Level::Hard => Duration::from_millis(400),
        }
    }
}

/// Identifies one tick source started by a [`TickDriver`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TickHandle(u64);

impl TickHandle {
    /// Wraps a driver-specific source id.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the driver-specific source id.
    #[must_use]
    pub const fn id(self) -> u64 {
        self.0
    }
}

/// Something that can deliver periodic ticks, such as a terminal event loop.
pub trait TickDriver {
    /// Starts delivering ticks every `interval`.
    fn start_ticks(&mut self, interval: Duration) -> TickHandle;

    /// Stops the tick source identified by `handle`.
    fn cancel_ticks(&mut self, handle: TickHandle);
}

/// Owner of the single gravity tick source.
///
/// [`GameLoop::start`] always cancels the running source before starting a
/// new one, so at most one is active at any time.
#[derive(Debug, Default)]
pub struct GameLoop {
    running: Option<TickHandle>,
}

impl GameLoop {
    /// Creates a loop with no tick source running.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// (Re)starts ticking every `interval`.
    pub fn start<D>(&mut self, driver: &mut D, interval: Duration)
    where
        D: TickDriver + ?Sized,
    {
        self.stop(driver);
        self.running = Some(driver.start_ticks(interval));
    }

    /// Stops ticking. Does nothing if not running.
    pub fn stop<D>(&mut self, driver: &mut D)
    where
        D: TickDriver + ?Sized,
    {
        if let Some(handle) = self.running.take() {
            driver.cancel_ticks(handle);
        }
    }

    /// Returns `true` if a tick source is running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::test_util::FakeDriver;

    #[test]
    fn test_level_intervals() {
        assert_eq!(Level::Easy.drop_interval(), Duration::from_millis(900));
        assert_eq!(Level::Medium.drop_interval(), Duration::from_millis(600));
        assert_eq!(Level::Hard.drop_interval(), Duration::from_millis(400));
    }

    #[test]
    fn test_start_twice_keeps_one_source() {
        let mut driver = FakeDriver::default();
        let mut game_loop = GameLoop::new();

        game_loop.start(&mut driver, Level::Easy.drop_interval());
        game_loop.start(&mut driver, Level::Hard.drop_interval());
        game_loop.start(&mut driver, Level::Hard.drop_interval());

        assert_eq!(driver.active.len(), 1);
        assert_eq!(driver.max_active, 1);
        assert_eq!(
            driver.started,
            [
                Level::Easy.drop_interval(),
                Level::Hard.drop_interval(),
                Level::Hard.drop_interval(),
            ]
        );
    }

    #[test]
    fn test_stop_cancels() {
        let mut driver = FakeDriver::default();
        let mut game_loop = GameLoop::new();

        game_loop.start(&mut driver, DEFAULT_DROP_INTERVAL);
        assert!(game_loop.is_running());
        game_loop.stop(&mut driver);
        assert!(!game_loop.is_running());
        assert!(driver.active.is_empty());

        // Stopping again is harmless.
        game_loop.stop(&mut driver);
        assert!(driver.active.is_empty());
    }
}
