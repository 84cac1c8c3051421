use crate::grid::{CellState, CellStyler};
use ratatui::style::{Color, Modifier, Style};

pub(crate) const BASE_STYLE: Style = Style::new().fg(Color::White).bg(Color::Black);

pub(crate) const HEADER_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

pub(crate) const AGE_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

pub(crate) const EMPTY_CELL_STYLE: Style = BASE_STYLE.fg(Color::DarkGray);

pub(crate) const HELP_KEY_STYLE: Style = Style::new().add_modifier(Modifier::BOLD);

pub(crate) const STATUS_STYLE: Style = BASE_STYLE.add_modifier(Modifier::REVERSED);

/// Color of lived weeks when none is configured
pub(crate) const DEFAULT_LIVED_COLOR: Color = Color::Gray;

/// Styles cells by their state, drawing lived weeks in a configurable color
/// and making the most recent one blink
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Palette {
    lived: Color,
}

impl Palette {
    pub(crate) fn new(lived: Color) -> Palette {
        Palette { lived }
    }
}

impl Default for Palette {
    fn default() -> Palette {
        Palette::new(DEFAULT_LIVED_COLOR)
    }
}

impl CellStyler for Palette {
    fn cell_style(&self, state: CellState) -> Style {
        match state {
            CellState::Empty => EMPTY_CELL_STYLE,
            CellState::Lived => BASE_STYLE.fg(self.lived),
            CellState::Current => BASE_STYLE
                .fg(self.lived)
                .add_modifier(Modifier::BOLD | Modifier::SLOW_BLINK),
        }
    }
}

pub(crate) mod birthdate {
    use super::*;

    pub(crate) const UNFILLED_CELL_STYLE: Style = BASE_STYLE.fg(Color::DarkGray);

    pub(crate) const READY_ENTER_STYLE: Style = BASE_STYLE.add_modifier(Modifier::UNDERLINED);
}
