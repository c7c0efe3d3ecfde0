use blockfall_engine::{GameController, GamePhase, GameState, KeyValueStore, Level};
use ratatui::{
    layout::{Constraint, Flex, Layout},
    prelude::{Buffer, Rect},
    style::Style,
    text::{Line, Text},
    widgets::{Block, Clear, Padding, Widget},
};

use crate::ui::widgets::{BoardDisplay, StatsDisplay, color, style};

/// Board and stats side by side, with a popup while paused or after a game over.
#[derive(Debug)]
pub struct GameDisplay<'a> {
    state: &'a GameState,
    phase: GamePhase,
    high_score: u64,
    level: Option<Level>,
}

impl<'a> GameDisplay<'a> {
    pub fn new<S>(controller: &'a GameController<S>) -> Self
    where
        S: KeyValueStore,
    {
        Self {
            state: controller.state(),
            phase: controller.phase(),
            high_score: controller.high_score(),
            level: controller.level(),
        }
    }

    fn popup(&self) -> Option<(Text<'static>, Style)> {
        match self.phase {
            GamePhase::Idle | GamePhase::Playing => None,
            GamePhase::Paused => Some((Text::from("PAUSED"), style::PAUSED)),
            GamePhase::GameOver => {
                let text = Text::from(vec![
                    Line::from("GAME OVER"),
                    Line::from(format!("Score: {}", self.state.score())),
                    Line::from("Enter: play again"),
                ]);
                Some((text, style::GAME_OVER))
            }
        }
    }
}

impl Widget for GameDisplay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = match self.phase {
            GamePhase::Idle | GamePhase::Playing => color::WHITE,
            GamePhase::Paused => color::YELLOW,
            GamePhase::GameOver => color::RED,
        };

        let board = BoardDisplay::new(self.state.board())
            .active_piece(self.state.active_piece())
            .block(
                Block::bordered()
                    .border_style(border_style)
                    .style(style::DEFAULT),
            );
        let stats = StatsDisplay::new(self.state.stats(), self.high_score)
            .level(self.level)
            .block(
                Block::bordered()
                    .title(Line::from("STATS").centered())
                    .padding(Padding::horizontal(1))
                    .border_style(border_style)
                    .style(style::DEFAULT),
            );

        let [stats_column, board_column] = Layout::horizontal([
            Constraint::Length(stats.width()),
            Constraint::Length(board.width()),
        ])
        .flex(Flex::Center)
        .spacing(1)
        .areas(area);
        let [stats_area] = Layout::vertical([Constraint::Length(stats.height())]).areas(stats_column);
        let [board_area] = Layout::vertical([Constraint::Length(board.height())]).areas(board_column);

        let popup = self.popup();
        stats.render(stats_area, buf);
        board.render(board_area, buf);

        if let Some((text, style)) = popup {
            let height = u16::try_from(text.height()).unwrap_or(1) + 2;
            let block = Block::new().style(style);
            let area = board_area.centered(
                Constraint::Length(board_area.width),
                Constraint::Length(height),
            );
            let inner = block.inner(area);
            Clear.render(area, buf);
            block.render(area, buf);
            text.style(style)
                .centered()
                .render(inner.centered_vertically(Constraint::Length(height - 2)), buf);
        }
    }
}
