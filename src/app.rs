use crate::birthdate::{
    BirthdateInput, BirthdateInputEvent, BirthdateInputOutput, BirthdateInputState,
};
use crate::grid::{CellStyler, GridWindow, LifeCalendar};
use crate::help::Help;
use crate::paint::{Birthdate, Painting};
use crate::theme::{BASE_STYLE, STATUS_STYLE};
use crossterm::event::{read, KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    backend::Backend,
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    widgets::{Paragraph, StatefulWidget, Widget},
    Terminal,
};
use std::io::{self, Write};
use time::Date;

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct App<S> {
    window: GridWindow<S>,
    today: Date,
    painting: Option<Painting>,
    state: AppState,
}

impl<S: CellStyler> App<S> {
    pub(crate) fn new(window: GridWindow<S>, today: Date) -> App<S> {
        App {
            window,
            today,
            painting: None,
            state: AppState::Calendar,
        }
    }

    pub(crate) fn with_birthdate(mut self, birthdate: Birthdate) -> App<S> {
        self.set_birthdate(birthdate);
        self
    }

    pub(crate) fn run<B: Backend>(mut self, mut terminal: Terminal<B>) -> io::Result<()> {
        while !self.quitting() {
            self.draw(&mut terminal)?;
            self.handle_input()?;
        }
        Ok(())
    }

    fn draw<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        terminal.draw(|frame| frame.render_widget(self, frame.area()))?;
        Ok(())
    }

    fn handle_input(&mut self) -> io::Result<()> {
        let normal_modifiers = KeyModifiers::NONE | KeyModifiers::SHIFT;
        if let Some(KeyEvent {
            code, modifiers, ..
        }) = read()?.as_key_press_event()
        {
            if modifiers == KeyModifiers::CONTROL && code == KeyCode::Char('c') {
                self.state = AppState::Quitting;
            } else if !normal_modifiers.contains(modifiers) || !self.handle_key(code) {
                self.beep()?;
            }
        }
        // else: Redraw on resize, and we might as well redraw on other stuff
        // too
        Ok(())
    }

    // Returns `false` if the user pressed an invalid key
    fn handle_key(&mut self, key: KeyCode) -> bool {
        match &mut self.state {
            AppState::Calendar => match key {
                KeyCode::Char('j') | KeyCode::Down => self.window.one_line_forwards().is_ok(),
                KeyCode::Char('k') | KeyCode::Up => self.window.one_line_backwards().is_ok(),
                KeyCode::Char('z') | KeyCode::PageDown => self.window.one_page_forwards().is_ok(),
                KeyCode::Char('w') | KeyCode::PageUp => self.window.one_page_backwards().is_ok(),
                KeyCode::Char('0') | KeyCode::Home => {
                    self.reset();
                    true
                }
                KeyCode::Char('b') => {
                    self.state = AppState::Entering(BirthdateInputState::new());
                    true
                }
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.state = AppState::Quitting;
                    true
                }
                KeyCode::Char('?') => {
                    self.state = AppState::Helping;
                    true
                }
                _ => false,
            },
            AppState::Helping => {
                self.state = AppState::Calendar;
                true
            }
            AppState::Entering(state) => {
                if matches!(key, KeyCode::Char('q' | 'b') | KeyCode::Esc) {
                    self.state = AppState::Calendar;
                    true
                } else {
                    let output = match key {
                        KeyCode::Char(c) => match c.to_digit(10).map(u8::try_from) {
                            Some(Ok(d)) => state.handle_input(BirthdateInputEvent::Digit(d)),
                            _ => BirthdateInputOutput::Invalid,
                        },
                        KeyCode::Backspace | KeyCode::Delete => {
                            state.handle_input(BirthdateInputEvent::Backspace)
                        }
                        KeyCode::Enter => state.handle_input(BirthdateInputEvent::Enter),
                        _ => BirthdateInputOutput::Invalid,
                    };
                    match output {
                        BirthdateInputOutput::Ok => true,
                        BirthdateInputOutput::Invalid => false,
                        BirthdateInputOutput::Submit(birthdate) => {
                            self.state = AppState::Calendar;
                            self.set_birthdate(birthdate);
                            true
                        }
                    }
                }
            }
            AppState::Quitting => false,
        }
    }

    fn beep(&self) -> io::Result<()> {
        io::stdout().write_all(b"\x07")
    }

    fn quitting(&self) -> bool {
        self.state == AppState::Quitting
    }

    fn reset(&mut self) {
        if self.painting.and_then(|p| p.current).is_some() {
            self.window.jump_to_current();
        } else {
            self.window.jump_to_top();
        }
    }

    fn set_birthdate(&mut self, birthdate: Birthdate) {
        self.painting = Some(self.window.paint(birthdate, self.today));
    }

    fn status_text(&self) -> String {
        match self.painting {
            Some(Painting {
                birthdate,
                weeks_lived,
                ..
            }) => format!(
                " Born {birthdate} · {weeks_lived} of {} weeks lived",
                self.window.grid().total_weeks()
            ),
            None => String::from(" Press b to enter a birthdate, ? for help"),
        }
    }
}

impl<S: CellStyler> Widget for &mut App<S> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, BASE_STYLE);
        let [calendar_area, status_area] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(area);
        LifeCalendar::<S>::new().render(calendar_area, buf, &mut self.window);
        Paragraph::new(self.status_text())
            .style(STATUS_STYLE)
            .render(status_area, buf);
        if self.state == AppState::Helping {
            Help(BASE_STYLE).render(area, buf);
        } else if let AppState::Entering(ref mut state) = self.state {
            BirthdateInput.render(area, buf, state);
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum AppState {
    Calendar,
    Helping,
    Entering(BirthdateInputState),
    Quitting,
}
