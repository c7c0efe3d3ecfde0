use blockfall_engine::Level;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::Line,
    widgets::{Block as BlockWidget, Padding, Widget},
};

use crate::ui::widgets::style;

/// Level selection shown before a game starts.
#[derive(Debug)]
pub struct LevelMenuDisplay {
    selected: usize,
    high_score: u64,
}

impl LevelMenuDisplay {
    pub fn new(selected: usize, high_score: u64) -> Self {
        Self {
            selected,
            high_score,
        }
    }

    pub fn width() -> u16 {
        32
    }

    pub fn height() -> u16 {
        // Border, padding, levels and the high-score line.
        super::cells_to_u16(Level::ALL.len(), 1) + 6
    }
}

impl Widget for LevelMenuDisplay {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let area = area.centered(
            Constraint::Length(Self::width()),
            Constraint::Length(Self::height()),
        );
        let block = BlockWidget::bordered()
            .title(Line::from(" BLOCKFALL ").centered())
            .padding(Padding::uniform(1))
            .style(style::DEFAULT);
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::vertical((0..Level::ALL.len() + 2).map(|_| Constraint::Length(1)));
        let mut rows = inner.layout_vec(&layout).into_iter();

        for (i, level) in Level::ALL.into_iter().enumerate() {
            let Some(row) = rows.next() else { return };
            let name = level.to_string();
            let interval = level.drop_interval().as_millis();
            let text = format!("{name:<8}{interval:>5} ms");
            let line = if i == self.selected {
                Line::styled(format!("> {text} "), style::SELECTED)
            } else {
                Line::styled(format!("  {text} "), style::DEFAULT)
            };
            line.centered().render(row, buf);
        }

        rows.next();
        if let Some(row) = rows.next() {
            Line::styled(format!("High score: {}", self.high_score), style::DIM)
                .centered()
                .render(row, buf);
        }
    }
}
