use std::{
    io,
    time::{Duration, Instant},
};

use crate::{
    App,
    event::LoopEvent,
    event_loop::{EventLoop, RenderMode},
};

/// Runs an [`App`] in the terminal.
///
/// Owns a single tick timer. [`Runtime::start_ticks`] replaces whatever timer
/// was running and returns an id; [`Runtime::cancel_ticks`] only stops the
/// timer that id names, so a stale id cannot cancel a newer timer.
#[derive(Default, Debug)]
pub struct Runtime {
    events: EventLoop,
}

impl Runtime {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts ticking every `interval`, first tick one interval from now.
    pub fn start_ticks(&mut self, interval: Duration) -> u64 {
        self.events.start_ticks(interval, Instant::now())
    }

    /// Stops the timer started with `id`. Returns `false` if it was already replaced or stopped.
    pub fn cancel_ticks(&mut self, id: u64) -> bool {
        self.events.cancel_ticks(id)
    }

    pub fn set_render_mode(&mut self, mode: RenderMode) {
        self.events.set_render_mode(mode);
    }

    /// Takes over the terminal and runs `app` until it asks to exit.
    ///
    /// The terminal is restored before returning, including on error.
    pub fn run<A>(mut self, app: &mut A) -> io::Result<()>
    where
        A: App,
    {
        app.init(&mut self);

        ratatui::run(|terminal| {
            while !app.should_exit() {
                match self.events.next()? {
                    LoopEvent::Tick => app.update(&mut self),
                    LoopEvent::Render => {
                        terminal.draw(|f| app.draw(f))?;
                    }
                    LoopEvent::Crossterm(event) => app.handle_event(&mut self, event),
                }
            }
            Ok(())
        })
    }
}
