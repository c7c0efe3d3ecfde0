use std::time::Duration;

use blockfall_engine::{
    Direction, GameController, GamePhase, KeyValueStore, Level, MoveOutcome, PlayerAction,
    StoreError, TickDriver, TickHandle,
};
use blockfall_runtime::{App, RenderMode, Runtime};
use crossterm::event::{Event, KeyCode};
use ratatui::{
    Frame,
    layout::{Constraint, Layout},
    text::Line,
};

use crate::ui::widgets::{GameDisplay, KeyBindingDisplay, LevelMenuDisplay, style};

const FPS: f64 = 60.0;

/// Lends the runtime's tick timer to the game controller.
struct RuntimeTicks<'a>(&'a mut Runtime);

impl TickDriver for RuntimeTicks<'_> {
    fn start_ticks(&mut self, interval: Duration) -> TickHandle {
        TickHandle::new(self.0.start_ticks(interval))
    }

    fn cancel_ticks(&mut self, handle: TickHandle) {
        self.0.cancel_ticks(handle.id());
    }
}

#[derive(Debug)]
pub(crate) struct PlayApp<S> {
    controller: GameController<S>,
    start_level: Option<Level>,
    menu_cursor: usize,
    status: Option<String>,
    is_exiting: bool,
}

impl<S> PlayApp<S>
where
    S: KeyValueStore,
{
    /// With `start_level`, the first game starts immediately; otherwise the
    /// level menu is shown.
    pub(crate) fn new(controller: GameController<S>, start_level: Option<Level>) -> Self {
        Self {
            controller,
            start_level,
            menu_cursor: 0,
            status: None,
            is_exiting: false,
        }
    }

    pub(crate) fn high_score(&self) -> u64 {
        self.controller.high_score()
    }

    fn handle_key<D>(&mut self, ticks: &mut D, code: KeyCode)
    where
        D: TickDriver + ?Sized,
    {
        if code == KeyCode::Char('q') {
            self.quit(ticks);
            return;
        }
        match self.controller.phase() {
            GamePhase::Idle => self.handle_menu_key(ticks, code),
            GamePhase::Playing => match code {
                KeyCode::Left => self.act(ticks, PlayerAction::Move(Direction::Left)),
                KeyCode::Right => self.act(ticks, PlayerAction::Move(Direction::Right)),
                KeyCode::Down => self.act(ticks, PlayerAction::Move(Direction::Down)),
                KeyCode::Up => self.act(ticks, PlayerAction::Rotate),
                KeyCode::Char('p') => self.controller.toggle_pause(ticks),
                KeyCode::Char('r') => self.controller.restart(ticks),
                KeyCode::Esc => self.controller.leave(ticks),
                _ => {}
            },
            GamePhase::Paused => match code {
                KeyCode::Char('p') => self.controller.toggle_pause(ticks),
                KeyCode::Char('r') => self.controller.restart(ticks),
                KeyCode::Esc => self.controller.leave(ticks),
                _ => {}
            },
            GamePhase::GameOver => match code {
                KeyCode::Enter | KeyCode::Char(' ') => self.controller.dismiss_game_over(ticks),
                KeyCode::Esc => self.controller.leave(ticks),
                _ => {}
            },
        }
    }

    fn handle_menu_key<D>(&mut self, ticks: &mut D, code: KeyCode)
    where
        D: TickDriver + ?Sized,
    {
        let level = match code {
            KeyCode::Up => {
                self.menu_cursor = self.menu_cursor.saturating_sub(1);
                None
            }
            KeyCode::Down => {
                self.menu_cursor = (self.menu_cursor + 1).min(Level::ALL.len() - 1);
                None
            }
            KeyCode::Enter => Level::ALL.get(self.menu_cursor).copied(),
            KeyCode::Char(c) => c
                .to_digit(10)
                .and_then(|n| n.checked_sub(1))
                .and_then(|n| Level::ALL.get(usize::try_from(n).ok()?).copied()),
            KeyCode::Esc => {
                self.quit(ticks);
                None
            }
            _ => None,
        };
        if let Some(level) = level {
            self.start(ticks, level);
        }
    }

    fn start<D>(&mut self, ticks: &mut D, level: Level)
    where
        D: TickDriver + ?Sized,
    {
        if let Some(index) = Level::ALL.iter().position(|&l| l == level) {
            self.menu_cursor = index;
        }
        self.status = None;
        self.controller.start(ticks, level);
    }

    fn quit<D>(&mut self, ticks: &mut D)
    where
        D: TickDriver + ?Sized,
    {
        self.controller.leave(ticks);
        self.is_exiting = true;
    }

    fn act<D>(&mut self, ticks: &mut D, action: PlayerAction)
    where
        D: TickDriver + ?Sized,
    {
        let result = self.controller.handle(ticks, action);
        self.report(result);
    }

    fn tick<D>(&mut self, ticks: &mut D)
    where
        D: TickDriver + ?Sized,
    {
        let result = self.controller.tick(ticks);
        self.report(result);
    }

    /// Shows a store failure on the status line until a later step succeeds.
    fn report(&mut self, result: Result<Option<MoveOutcome>, StoreError>) {
        self.status = match result {
            Ok(_) => None,
            Err(err) => Some(format!("{:#}", anyhow::Error::new(err))),
        };
    }
}

impl<S> App for PlayApp<S>
where
    S: KeyValueStore,
{
    fn init(&mut self, runtime: &mut Runtime) {
        runtime.set_render_mode(RenderMode::throttled_from_rate(FPS));
        if let Some(level) = self.start_level {
            self.start(&mut RuntimeTicks(runtime), level);
        }
    }

    fn should_exit(&self) -> bool {
        self.is_exiting
    }

    fn handle_event(&mut self, runtime: &mut Runtime, event: Event) {
        if let Some(key) = event.as_key_press_event() {
            self.handle_key(&mut RuntimeTicks(runtime), key.code);
        }
    }

    fn update(&mut self, runtime: &mut Runtime) {
        self.tick(&mut RuntimeTicks(runtime));
    }

    fn draw(&self, frame: &mut Frame) {
        let phase = self.controller.phase();
        let [main_area, help_area, status_area] = Layout::vertical([
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(frame.area());

        if phase.is_idle() {
            let menu = LevelMenuDisplay::new(self.menu_cursor, self.controller.high_score());
            frame.render_widget(menu, main_area);
        } else {
            frame.render_widget(GameDisplay::new(&self.controller), main_area);
        }
        frame.render_widget(KeyBindingDisplay::for_phase(phase), help_area);
        if let Some(status) = &self.status {
            frame.render_widget(
                Line::styled(status.as_str(), style::ERROR).centered(),
                status_area,
            );
        }
    }
}
