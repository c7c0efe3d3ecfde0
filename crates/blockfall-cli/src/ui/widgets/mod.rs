use ratatui::{layout::Rect, widgets::Block as BlockWidget};

pub use self::{
    block_display::*, board_display::*, game_display::*, key_binding_display::*,
    level_menu_display::*, stats_display::*,
};

mod block_display;
mod board_display;
mod game_display;
mod key_binding_display;
mod level_menu_display;
mod stats_display;

mod color {
    use ratatui::style::Color;

    pub const ORANGE: Color = Color::Rgb(255, 127, 0);
    pub const BLUE: Color = Color::Rgb(0, 0, 255);
    pub const RED: Color = Color::Rgb(255, 0, 0);
    pub const GREEN: Color = Color::Rgb(0, 255, 0);
    pub const YELLOW: Color = Color::Rgb(255, 255, 0);
    pub const PURPLE: Color = Color::Rgb(160, 32, 240);
    pub const CYAN: Color = Color::Rgb(0, 255, 255);
    pub const GRAY: Color = Color::Rgb(127, 127, 127);
    pub const BLACK: Color = Color::Rgb(0, 0, 0);
    pub const WHITE: Color = Color::Rgb(255, 255, 255);
}

pub mod style {
    use blockfall_engine::PieceColor;
    use ratatui::style::{Color, Style};

    use crate::ui::widgets::color;

    const fn fg_bg(fg: Color, bg: Color) -> Style {
        Style::new().fg(fg).bg(bg)
    }

    const fn bg_only(color: Color) -> Style {
        Style::new().fg(color).bg(color)
    }

    pub const DEFAULT: Style = fg_bg(color::WHITE, color::BLACK);
    pub const DIM: Style = fg_bg(color::GRAY, color::BLACK);
    pub const EMPTY: Style = bg_only(color::BLACK);
    pub const EMPTY_DOT: Style = fg_bg(color::GRAY, color::BLACK);
    pub const SELECTED: Style = fg_bg(color::BLACK, color::CYAN);
    pub const PAUSED: Style = fg_bg(color::BLACK, color::YELLOW);
    pub const GAME_OVER: Style = fg_bg(color::WHITE, color::RED);
    pub const ERROR: Style = fg_bg(color::RED, color::BLACK);

    pub const fn piece(piece_color: PieceColor) -> Style {
        bg_only(match piece_color {
            PieceColor::Orange => color::ORANGE,
            PieceColor::Blue => color::BLUE,
            PieceColor::Red => color::RED,
            PieceColor::Green => color::GREEN,
            PieceColor::Yellow => color::YELLOW,
            PieceColor::Purple => color::PURPLE,
            PieceColor::Cyan => color::CYAN,
        })
    }
}

fn block_vertical_margin(block: Option<&BlockWidget>) -> u16 {
    let dummy_rect = Rect::new(0, 0, 100, 100);
    let inner_rect = block.map_or(dummy_rect, |block| block.inner(dummy_rect));
    dummy_rect.height - inner_rect.height
}

fn block_horizontal_margin(block: Option<&BlockWidget>) -> u16 {
    let dummy_rect = Rect::new(0, 0, 100, 100);
    let inner_rect = block.map_or(dummy_rect, |block| block.inner(dummy_rect));
    dummy_rect.width - inner_rect.width
}

/// Terminal cells needed for `count` board cells of `size` each.
fn cells_to_u16(count: usize, size: u16) -> u16 {
    u16::try_from(count).map_or(u16::MAX, |count| count.saturating_mul(size))
}
