use crate::paint::Birthdate;
use crate::theme::{
    birthdate::{READY_ENTER_STYLE, UNFILLED_CELL_STYLE},
    BASE_STYLE,
};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Flex, Layout, Margin, Rect},
    text::{Line, Span, Text},
    widgets::{Block, Clear, StatefulWidget, Widget},
};

const OUTER_WIDTH: u16 = 16;
const OUTER_HEIGHT: u16 = 8;
const ENTER_POS: usize = 8;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct BirthdateInput;

impl StatefulWidget for BirthdateInput {
    type State = BirthdateInputState;

    /*
     * ................
     * .┌ Birthdate ─┐.
     * .│            │.
     * .│ DD/MM/YYYY │.
     * .│            │.
     * .│  [ENTER]   │.
     * .└────────────┘.
     * ................
     */

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let [outer_area] = Layout::horizontal([OUTER_WIDTH])
            .flex(Flex::Center)
            .areas(area);
        let [outer_area] = Layout::vertical([OUTER_HEIGHT])
            .flex(Flex::Center)
            .areas(outer_area);
        Clear.render(outer_area, buf);
        Block::new().style(BASE_STYLE).render(outer_area, buf);
        let block_area = outer_area.inner(Margin::new(1, 1));
        Block::bordered()
            .title(" Birthdate ")
            .title_alignment(Alignment::Center)
            .render(block_area, buf);
        let text_area = block_area.inner(Margin::new(1, 1));
        state.to_text().render(text_area, buf);
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct BirthdateInputState {
    day: [Option<u8>; 2],
    month: [Option<u8>; 2],
    year: [Option<u8>; 4],
    pos: usize,
}

impl BirthdateInputState {
    pub(crate) fn new() -> BirthdateInputState {
        BirthdateInputState::default()
    }

    fn to_text(self) -> Text<'static> {
        Text::from_iter([
            Line::styled("", BASE_STYLE),
            self.to_line(),
            Line::styled("", BASE_STYLE),
            // Style a span and convert it to a line rather than creating a
            // styled line directly so that only the "[ENTER]" text and not any
            // of its centering padding will be underlined:
            Line::from(Span::styled(
                "[ENTER]",
                if self.pos == ENTER_POS {
                    READY_ENTER_STYLE
                } else {
                    BASE_STYLE
                },
            )),
        ])
        .centered()
    }

    fn to_line(self) -> Line<'static> {
        let mut spans = Vec::new();
        let mut first = true;
        for (fallback, digits) in [
            ("D", self.day.as_slice()),
            ("M", self.month.as_slice()),
            ("Y", self.year.as_slice()),
        ] {
            if !std::mem::replace(&mut first, false) {
                spans.push(Span::styled("/", BASE_STYLE));
            }
            for dg in digits {
                spans.push(match dg {
                    Some(d) => Span::styled(format!("{d}"), BASE_STYLE),
                    None => Span::styled(fallback, UNFILLED_CELL_STYLE),
                });
            }
        }
        Line::from_iter(spans)
    }

    fn slot(&mut self, pos: usize) -> Option<&mut Option<u8>> {
        match pos {
            0..2 => self.day.get_mut(pos),
            2..4 => self.month.get_mut(pos - 2),
            4..8 => self.year.get_mut(pos - 4),
            _ => None,
        }
    }

    pub(crate) fn handle_input(&mut self, input: BirthdateInputEvent) -> BirthdateInputOutput {
        match (input, self.pos) {
            (BirthdateInputEvent::Digit(d), 0..ENTER_POS) => {
                if let Some(slot) = self.slot(self.pos) {
                    *slot = Some(d);
                }
                self.pos += 1;
                BirthdateInputOutput::Ok
            }
            (BirthdateInputEvent::Backspace, 1..) => {
                self.pos -= 1;
                if let Some(slot) = self.slot(self.pos) {
                    *slot = None;
                }
                BirthdateInputOutput::Ok
            }
            (BirthdateInputEvent::Enter, ENTER_POS) => match self.to_birthdate() {
                Some(b) => BirthdateInputOutput::Submit(b),
                None => BirthdateInputOutput::Invalid,
            },
            _ => BirthdateInputOutput::Invalid,
        }
    }

    fn to_birthdate(self) -> Option<Birthdate> {
        let day = self.day.iter().try_fold(0u8, |acc, d| Some(acc * 10 + (*d)?))?;
        let month = self
            .month
            .iter()
            .try_fold(0u8, |acc, d| Some(acc * 10 + (*d)?))?;
        let year = self
            .year
            .iter()
            .try_fold(0i32, |acc, d| Some(acc * 10 + i32::from((*d)?)))?;
        let month = time::Month::try_from(month).ok()?;
        time::Date::from_calendar_date(year, month, day)
            .ok()
            .map(Birthdate::new)
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum BirthdateInputEvent {
    Digit(u8),
    Backspace,
    Enter,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum BirthdateInputOutput {
    Ok,
    Invalid,
    Submit(Birthdate),
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn type_digits(state: &mut BirthdateInputState, digits: &str) {
        for c in digits.chars() {
            let d = c.to_digit(10).and_then(|d| u8::try_from(d).ok()).unwrap();
            assert_eq!(
                state.handle_input(BirthdateInputEvent::Digit(d)),
                BirthdateInputOutput::Ok
            );
        }
    }

    #[test]
    fn test_submit() {
        let mut state = BirthdateInputState::new();
        type_digits(&mut state, "02031999");
        assert_eq!(
            state.handle_input(BirthdateInputEvent::Enter),
            BirthdateInputOutput::Submit(Birthdate::new(date!(1999 - 03 - 02)))
        );
    }

    #[test]
    fn test_enter_too_early() {
        let mut state = BirthdateInputState::new();
        type_digits(&mut state, "0203");
        assert_eq!(
            state.handle_input(BirthdateInputEvent::Enter),
            BirthdateInputOutput::Invalid
        );
    }

    #[test]
    fn test_too_many_digits() {
        let mut state = BirthdateInputState::new();
        type_digits(&mut state, "01011990");
        assert_eq!(
            state.handle_input(BirthdateInputEvent::Digit(5)),
            BirthdateInputOutput::Invalid
        );
    }

    #[test]
    fn test_impossible_date() {
        let mut state = BirthdateInputState::new();
        type_digits(&mut state, "31022001");
        assert_eq!(
            state.handle_input(BirthdateInputEvent::Enter),
            BirthdateInputOutput::Invalid
        );
    }

    #[test]
    fn test_backspace() {
        let mut state = BirthdateInputState::new();
        assert_eq!(
            state.handle_input(BirthdateInputEvent::Backspace),
            BirthdateInputOutput::Invalid
        );
        type_digits(&mut state, "31022001");
        for _ in 0..5 {
            assert_eq!(
                state.handle_input(BirthdateInputEvent::Backspace),
                BirthdateInputOutput::Ok
            );
        }
        type_digits(&mut state, "32000");
        assert_eq!(
            state.handle_input(BirthdateInputEvent::Enter),
            BirthdateInputOutput::Submit(Birthdate::new(date!(2000 - 03 - 31)))
        );
    }

    #[test]
    fn test_render_partial() {
        let mut state = BirthdateInputState::new();
        type_digits(&mut state, "150");
        let area = Rect::new(0, 0, 16, 8);
        let mut buffer = Buffer::empty(area);
        BirthdateInput.render(area, &mut buffer, &mut state);
        let mut expected = Buffer::with_lines([
            "                ",
            " ┌ Birthdate ─┐ ",
            " │            │ ",
            " │ 15/0M/YYYY │ ",
            " │            │ ",
            " │  [ENTER]   │ ",
            " └────────────┘ ",
            "                ",
        ]);
        expected.set_style(area, BASE_STYLE);
        expected.set_style(Rect::new(7, 3, 1, 1), UNFILLED_CELL_STYLE);
        expected.set_style(Rect::new(9, 3, 4, 1), UNFILLED_CELL_STYLE);
        assert_eq!(buffer, expected);
    }
}
