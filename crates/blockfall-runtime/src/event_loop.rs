use std::{
    io,
    time::{Duration, Instant},
};

use crossterm::event;

use crate::event::LoopEvent;

/// When frames are drawn.
#[derive(Debug, Clone, Copy, Default)]
pub enum RenderMode {
    /// After every tick or terminal event.
    #[default]
    OnDirty,
    /// After changes, at most once per `Duration`.
    Throttled(Duration),
}

impl RenderMode {
    /// `Throttled` mode capped at `rate` frames per second.
    #[must_use]
    pub fn throttled_from_rate(rate: f64) -> Self {
        Self::Throttled(Duration::from_secs_f64(1.0 / rate))
    }
}

/// The single periodic timer. Starting a new one replaces it.
#[derive(Debug, Clone, Copy)]
struct TickTimer {
    id: u64,
    interval: Duration,
    last_tick: Instant,
}

#[derive(Debug)]
pub(super) struct EventLoop {
    timer: Option<TickTimer>,
    last_timer_id: u64,
    render_mode: RenderMode,
    last_render: Instant,
    dirty: bool,
}

impl Default for EventLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl EventLoop {
    pub fn new() -> Self {
        let now = Instant::now();
        let long_ago = now.checked_sub(Duration::from_secs(86400)).unwrap_or(now);
        Self {
            timer: None,
            last_timer_id: 0,
            render_mode: RenderMode::default(),
            last_render: long_ago,
            // The first frame is always drawn.
            dirty: true,
        }
    }

    /// Starts the tick timer, replacing any running one. The first tick
    /// fires one full `interval` after `now`.
    pub(super) fn start_ticks(&mut self, interval: Duration, now: Instant) -> u64 {
        self.last_timer_id += 1;
        self.timer = Some(TickTimer {
            id: self.last_timer_id,
            interval,
            last_tick: now,
        });
        self.last_timer_id
    }

    /// Stops the tick timer if `id` still names it. Returns whether it did.
    pub(super) fn cancel_ticks(&mut self, id: u64) -> bool {
        if self.timer.is_some_and(|timer| timer.id == id) {
            self.timer = None;
            true
        } else {
            false
        }
    }

    pub(super) fn set_render_mode(&mut self, render_mode: RenderMode) {
        self.render_mode = render_mode;
    }

    /// Blocks until the next tick, frame or terminal event.
    pub(super) fn next(&mut self) -> io::Result<LoopEvent> {
        loop {
            let now = Instant::now();
            if let Some(event) = self.poll_due(now) {
                return Ok(event);
            }

            if let Some(timeout) = self.compute_timeout(now)
                && !event::poll(timeout)?
            {
                continue;
            }

            self.dirty = true;
            return Ok(event::read()?.into());
        }
    }

    /// Returns a tick or render event if one is due at `now`.
    fn poll_due(&mut self, now: Instant) -> Option<LoopEvent> {
        if let Some(timer) = &mut self.timer
            && now.duration_since(timer.last_tick) >= timer.interval
        {
            timer.last_tick = now;
            self.dirty = true;
            return Some(LoopEvent::Tick);
        }

        let render_due = match self.render_mode {
            RenderMode::OnDirty => self.dirty,
            RenderMode::Throttled(interval) => {
                self.dirty && now.duration_since(self.last_render) >= interval
            }
        };
        if render_due {
            self.last_render = now;
            self.dirty = false;
            return Some(LoopEvent::Render);
        }
        None
    }

    fn compute_timeout(&self, now: Instant) -> Option<Duration> {
        let next_tick_at = self.timer.map(|timer| timer.last_tick + timer.interval);
        let next_render_at = match self.render_mode {
            RenderMode::OnDirty => self.dirty.then_some(now),
            RenderMode::Throttled(interval) => self.dirty.then(|| self.last_render + interval),
        };
        let next_at = [next_tick_at, next_render_at].into_iter().flatten().min()?;
        Some(next_at.saturating_duration_since(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INTERVAL: Duration = Duration::from_millis(600);

    /// An event loop whose initial frame has already been drawn.
    fn drawn_loop(now: Instant) -> EventLoop {
        let mut events = EventLoop::new();
        assert!(events.poll_due(now).is_some_and(|e| e.is_render()));
        events
    }

    #[test]
    fn test_first_tick_after_full_interval() {
        let now = Instant::now();
        let mut events = drawn_loop(now);
        events.start_ticks(INTERVAL, now);

        assert!(events.poll_due(now + INTERVAL / 2).is_none());
        assert!(events.poll_due(now + INTERVAL).is_some_and(|e| e.is_tick()));
        // A tick marks the screen dirty.
        assert!(events.poll_due(now + INTERVAL).is_some_and(|e| e.is_render()));
        assert!(events.poll_due(now + INTERVAL).is_none());
    }

    #[test]
    fn test_restart_resets_phase() {
        let now = Instant::now();
        let mut events = drawn_loop(now);
        events.start_ticks(INTERVAL, now);

        let later = now + INTERVAL / 2;
        events.start_ticks(INTERVAL, later);
        assert!(events.poll_due(now + INTERVAL).is_none());
        assert!(events.poll_due(later + INTERVAL).is_some_and(|e| e.is_tick()));
    }

    #[test]
    fn test_cancel_stops_ticks() {
        let now = Instant::now();
        let mut events = drawn_loop(now);
        let id = events.start_ticks(INTERVAL, now);

        assert!(events.cancel_ticks(id));
        assert!(events.poll_due(now + INTERVAL * 3).is_none());
        assert_eq!(events.compute_timeout(now), None);
    }

    #[test]
    fn test_stale_cancel_is_ignored() {
        let now = Instant::now();
        let mut events = drawn_loop(now);
        let old = events.start_ticks(INTERVAL, now);
        let new = events.start_ticks(INTERVAL, now);
        assert_ne!(old, new);

        assert!(!events.cancel_ticks(old));
        assert!(events.poll_due(now + INTERVAL).is_some_and(|e| e.is_tick()));
    }

    #[test]
    fn test_throttled_render_waits_for_frame() {
        let now = Instant::now();
        let mut events = drawn_loop(now);
        let frame = Duration::from_millis(16);
        events.set_render_mode(RenderMode::Throttled(frame));
        events.dirty = true;

        assert!(events.poll_due(now + frame / 2).is_none());
        assert_eq!(events.compute_timeout(now), Some(frame));
        assert!(events.poll_due(now + frame).is_some_and(|e| e.is_render()));
    }

    #[test]
    fn test_timeout_waits_for_next_tick() {
        let now = Instant::now();
        let mut events = drawn_loop(now);
        events.start_ticks(INTERVAL, now);
        assert_eq!(events.compute_timeout(now), Some(INTERVAL));
    }
}
