use blockfall_engine::GamePhase;
use ratatui::{
    prelude::{Buffer, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Widget,
};

/// Keys and what they do, e.g. `(&["←", "→"], "Move")`.
pub type KeyBinding = (&'static [&'static str], &'static str);

const MENU: &[KeyBinding] = &[
    (&["↑", "↓"], "Choose"),
    (&["Enter", "1-3"], "Start"),
    (&["Q", "Esc"], "Quit"),
];
const PLAYING: &[KeyBinding] = &[
    (&["←", "→"], "Move"),
    (&["↓"], "Down"),
    (&["↑"], "Rotate"),
    (&["P"], "Pause"),
    (&["R"], "Restart"),
    (&["Esc"], "Menu"),
    (&["Q"], "Quit"),
];
const PAUSED: &[KeyBinding] = &[
    (&["P"], "Resume"),
    (&["R"], "Restart"),
    (&["Esc"], "Menu"),
    (&["Q"], "Quit"),
];
const GAME_OVER: &[KeyBinding] = &[
    (&["Enter", "Space"], "Play again"),
    (&["Esc"], "Menu"),
    (&["Q"], "Quit"),
];

/// One-line help for the keys available in a [`GamePhase`].
#[derive(Debug)]
pub struct KeyBindingDisplay {
    bindings: &'static [KeyBinding],
}

impl KeyBindingDisplay {
    pub fn for_phase(phase: GamePhase) -> Self {
        let bindings = match phase {
            GamePhase::Idle => MENU,
            GamePhase::Playing => PLAYING,
            GamePhase::Paused => PAUSED,
            GamePhase::GameOver => GAME_OVER,
        };
        Self { bindings }
    }
}

const KEY_STYLE: Style = Style::new().fg(Color::Cyan);
const SEPARATOR_STYLE: Style = Style::new().fg(Color::DarkGray);
const DESCRIPTION_STYLE: Style = Style::new().fg(Color::Gray);

impl Widget for KeyBindingDisplay {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut spans = vec![];
        for (i, (keys, description)) in self.bindings.iter().copied().enumerate() {
            if i > 0 {
                spans.push(Span::styled(" | ", SEPARATOR_STYLE));
            }
            for (j, key) in keys.iter().copied().enumerate() {
                if j > 0 {
                    spans.push(Span::styled("/", SEPARATOR_STYLE));
                }
                spans.push(Span::styled(key, KEY_STYLE));
            }
            spans.push(Span::styled(format!(" {description}"), DESCRIPTION_STYLE));
        }
        Line::from(spans).centered().render(area, buf);
    }
}
