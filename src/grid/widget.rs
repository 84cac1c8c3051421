use super::window::{GridLine, GridWindow};
use super::{CellState, CellStyler};
use crate::config::{GridConfig, RECTS_PER_DECADE};
use crate::theme::{AGE_STYLE, HEADER_STYLE};
use ratatui::{prelude::*, widgets::*};
use std::marker::PhantomData;

/// Number of lines taken up by the header and its rule
pub(crate) const HEADER_LINES: u16 = 2;

/// Minimum number of columns in which the age of each row is written, enough
/// for the header
const MIN_AGE_WIDTH: u16 = 3;

/// Columns between the age and the first rectangle
const AGE_GUTTER: u16 = 1;

/// Columns between the two rectangles of a decade
const RECT_GAP: u16 = 2;

static AGE_HEADER: &str = "Age";

const EMPTY_GLYPH: &str = "□";
const LIVED_GLYPH: &str = "■";
const CURRENT_GLYPH: &str = "▣";

const ACS_HLINE: char = '─';

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) struct LifeCalendar<S> {
    _data: PhantomData<S>,
}

impl<S> LifeCalendar<S> {
    pub(crate) fn new() -> LifeCalendar<S> {
        LifeCalendar { _data: PhantomData }
    }
}

/// Number of columns in which ages are written: the width of the oldest age,
/// but no less than the header
fn age_width(config: &GridConfig) -> u16 {
    let oldest = (config.num_decades() * config.rows_per_rect()).saturating_sub(1);
    let digits = oldest.checked_ilog10().map_or(1, |n| n + 1);
    u16::try_from(digits).unwrap_or(u16::MAX).max(MIN_AGE_WIDTH)
}

/// Number of columns on the left side of the grid, used as the margin in
/// which ages are written
fn left_margin(config: &GridConfig) -> u16 {
    age_width(config).saturating_add(AGE_GUTTER)
}

/// Width of both rectangles and the gap between them
fn main_width(config: &GridConfig) -> Option<u16> {
    u16::try_from(config.cols_per_rect())
        .ok()?
        .checked_mul(2)?
        .checked_add(RECT_GAP)
}

/// Number of columns needed to draw the grid without truncation, or `None`
/// if that is more than a terminal buffer can hold
pub(crate) fn total_width(config: &GridConfig) -> Option<u16> {
    left_margin(config).checked_add(main_width(config)?)
}

/// Number of lines needed to draw the header and every decade at once, or
/// `None` if that is more than a terminal buffer can hold
pub(crate) fn total_height(config: &GridConfig) -> Option<u16> {
    u16::try_from(config.body_lines())
        .ok()?
        .checked_add(HEADER_LINES)
}

impl<S: CellStyler> StatefulWidget for LifeCalendar<S> {
    type State = GridWindow<S>;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let config = *state.grid().config();
        // Both widths are known to fit once the config has been validated.
        let width = total_width(&config).unwrap_or(u16::MAX);
        let left = area.width.saturating_sub(width) / 2;
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(left),
                Constraint::Length(width.min(area.width)),
                Constraint::Min(0),
            ])
            .split(area);
        let area = chunks[1];
        let lines = state.visible_lines(usize::from(area.height.saturating_sub(HEADER_LINES)));
        let grid = state.grid();
        let mut canvas = BufferCanvas::new(area, buf, age_width(&config), config.cols_per_rect());
        canvas.draw_header(main_width(&config).unwrap_or(u16::MAX));
        for (y, line) in std::iter::zip(HEADER_LINES.., lines) {
            let GridLine::Row { decade, row } = line else {
                continue;
            };
            let Some(decade) = grid.decades().get(decade) else {
                continue;
            };
            canvas.draw_age(y, decade.number() * config.rows_per_rect() + row);
            for (rect_no, rect) in decade.rects().iter().enumerate() {
                for (col, &week) in rect.row(row).iter().enumerate() {
                    let cell = grid.cell_state(week);
                    canvas.draw_cell(y, rect_no, col, cell, state.styler.cell_style(cell));
                }
            }
        }
    }
}

#[derive(Debug, Eq, PartialEq)]
struct BufferCanvas<'a> {
    area: Rect,
    buf: &'a mut Buffer,
    age_width: usize,
    cols: usize,
}

impl<'a> BufferCanvas<'a> {
    fn new(area: Rect, buf: &'a mut Buffer, age_width: u16, cols: usize) -> Self {
        Self {
            area,
            buf,
            age_width: usize::from(age_width),
            cols,
        }
    }

    fn left_margin(&self) -> usize {
        self.age_width + usize::from(AGE_GUTTER)
    }

    fn rect_left(&self, rect_no: usize) -> usize {
        self.left_margin() + rect_no * (self.cols + usize::from(RECT_GAP))
    }

    // Labels each rectangle with the week-of-year numbers of its first and
    // last columns
    fn draw_header(&mut self, main_width: u16) {
        self.mvprint(0, 0, AGE_HEADER, Some(HEADER_STYLE));
        for rect_no in 0..RECTS_PER_DECADE {
            let left = self.rect_left(rect_no);
            let first = rect_no * self.cols + 1;
            let last = (rect_no + 1) * self.cols;
            let last = last.to_string();
            let last_x = (left + self.cols).saturating_sub(last.len());
            self.mvprint(0, last_x, last, Some(HEADER_STYLE));
            self.mvprint(0, left, first.to_string(), Some(HEADER_STYLE));
        }
        self.hline(1, self.left_margin(), ACS_HLINE, usize::from(main_width));
    }

    fn draw_age(&mut self, y: u16, age: usize) {
        let width = self.age_width;
        self.mvprint(
            usize::from(y),
            0,
            format!("{age:>width$}"),
            Some(AGE_STYLE),
        );
    }

    fn draw_cell(&mut self, y: u16, rect_no: usize, col: usize, cell: CellState, style: Style) {
        let glyph = match cell {
            CellState::Empty => EMPTY_GLYPH,
            CellState::Lived => LIVED_GLYPH,
            CellState::Current => CURRENT_GLYPH,
        };
        let x = self.rect_left(rect_no) + col;
        self.mvprint(usize::from(y), x, glyph, Some(style));
    }

    fn mvprint<S: AsRef<str>>(&mut self, y: usize, x: usize, s: S, style: Option<Style>) {
        let Ok(y) = u16::try_from(y) else {
            return;
        };
        let Ok(x) = u16::try_from(x) else {
            return;
        };
        if y < self.area.height && x < self.area.width {
            let text = Text::styled(s.as_ref(), style.unwrap_or_default());
            let width = u16::try_from(text.width()).unwrap_or(u16::MAX);
            // Using a Paragraph lets us truncate text that extends beyond the
            // grid's area, though we need to be sure that the Rect passed to
            // the Paragraph is entirely within the frame lest a panic result.
            Paragraph::new(text).render(
                Rect {
                    x: x + self.area.x,
                    y: y + self.area.y,
                    width: (self.area.width - x).min(width),
                    height: 1,
                },
                self.buf,
            );
        }
    }

    fn hline(&mut self, y: usize, x: usize, ch: char, length: usize) {
        self.mvprint(y, x, String::from(ch).repeat(length), None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::window::EdgeError;
    use crate::grid::LifeGrid;
    use crate::paint::Birthdate;
    use crate::theme::{Palette, EMPTY_CELL_STYLE};
    use time::macros::date;

    // 2 decades of 2 rows of 2×3 cells: 6 weeks per year, 24 weeks in all
    fn small_window() -> GridWindow<Palette> {
        GridWindow::new(
            LifeGrid::build(GridConfig::new(20, 2, 3).unwrap()),
            Palette::new(Color::Yellow),
        )
    }

    #[test]
    fn test_total_size() {
        assert_eq!(total_width(&GridConfig::default()), Some(58));
        assert_eq!(total_height(&GridConfig::default()), Some(2 + 80 + 7));
        let small = GridConfig::new(20, 2, 3).unwrap();
        assert_eq!(total_width(&small), Some(12));
        assert_eq!(total_height(&small), Some(7));
    }

    #[test]
    fn test_age_width_grows_with_lifespan() {
        assert_eq!(age_width(&GridConfig::new(1000, 10, 26).unwrap()), 3);
        assert_eq!(age_width(&GridConfig::new(1010, 10, 26).unwrap()), 4);
        let config = GridConfig::new(10010, 1, 1).unwrap();
        assert_eq!(age_width(&config), 4);
        assert_eq!(total_width(&config), Some(9));
    }

    #[test]
    fn test_render_wide_ages() {
        // 1001 decades of one 1-week row each, so the last age is 1000
        let mut window = GridWindow::new(
            LifeGrid::build(GridConfig::new(10010, 1, 1).unwrap()),
            Palette::default(),
        );
        let area = Rect::new(0, 0, 9, 3);
        let mut buffer = Buffer::empty(area);
        LifeCalendar::new().render(area, &mut buffer, &mut window);
        window.one_page_forwards().unwrap();
        while window.one_page_forwards().is_ok() {}
        LifeCalendar::new().render(area, &mut buffer, &mut window);
        let mut expected = Buffer::with_lines(["Age  1  2", "     ────", "1000 □  □"]);
        expected.set_style(Rect::new(0, 0, 3, 1), HEADER_STYLE);
        expected.set_style(Rect::new(5, 0, 1, 1), HEADER_STYLE);
        expected.set_style(Rect::new(8, 0, 1, 1), HEADER_STYLE);
        expected.set_style(Rect::new(0, 2, 4, 1), AGE_STYLE);
        expected.set_style(Rect::new(5, 2, 1, 1), EMPTY_CELL_STYLE);
        expected.set_style(Rect::new(8, 2, 1, 1), EMPTY_CELL_STYLE);
        assert_eq!(buffer, expected);
    }

    #[test]
    fn test_render_painted() {
        let mut window = small_window();
        // 365 + 14 days: one year and two weeks at 6 weeks per year
        window.paint(
            Birthdate::new(date!(2023 - 06 - 02)),
            date!(2024 - 06 - 15),
        );
        let area = Rect::new(0, 0, 12, 7);
        let mut buffer = Buffer::empty(area);
        LifeCalendar::new().render(area, &mut buffer, &mut window);
        let mut expected = Buffer::with_lines([
            "Age 1 3  4 6",
            "    ────────",
            "  0 ■■■  ■■■",
            "  1 ■▣□  □□□",
            "            ",
            "  2 □□□  □□□",
            "  3 □□□  □□□",
        ]);
        let lived = Palette::new(Color::Yellow).cell_style(CellState::Lived);
        let current = Palette::new(Color::Yellow).cell_style(CellState::Current);
        expected.set_style(Rect::new(0, 0, 3, 1), HEADER_STYLE);
        expected.set_style(Rect::new(4, 0, 1, 1), HEADER_STYLE);
        expected.set_style(Rect::new(6, 0, 1, 1), HEADER_STYLE);
        expected.set_style(Rect::new(9, 0, 1, 1), HEADER_STYLE);
        expected.set_style(Rect::new(11, 0, 1, 1), HEADER_STYLE);
        for y in [2, 3, 5, 6] {
            expected.set_style(Rect::new(0, y, 3, 1), AGE_STYLE);
        }
        expected.set_style(Rect::new(4, 2, 3, 1), lived);
        expected.set_style(Rect::new(9, 2, 3, 1), lived);
        expected.set_style(Rect::new(4, 3, 1, 1), lived);
        expected.set_style(Rect::new(5, 3, 1, 1), current);
        expected.set_style(Rect::new(6, 3, 1, 1), EMPTY_CELL_STYLE);
        expected.set_style(Rect::new(9, 3, 3, 1), EMPTY_CELL_STYLE);
        expected.set_style(Rect::new(4, 5, 3, 1), EMPTY_CELL_STYLE);
        expected.set_style(Rect::new(9, 5, 3, 1), EMPTY_CELL_STYLE);
        expected.set_style(Rect::new(4, 6, 3, 1), EMPTY_CELL_STYLE);
        expected.set_style(Rect::new(9, 6, 3, 1), EMPTY_CELL_STYLE);
        assert_eq!(buffer, expected);
    }

    #[test]
    fn test_render_centered_and_scrolled() {
        let mut window = small_window();
        let area = Rect::new(0, 0, 16, 4);
        let mut buffer = Buffer::empty(area);
        LifeCalendar::new().render(area, &mut buffer, &mut window);
        window.one_page_forwards().unwrap();
        window.one_page_forwards().unwrap();
        assert_eq!(window.one_page_forwards(), Err(EdgeError));
        LifeCalendar::new().render(area, &mut buffer, &mut window);
        let mut expected = Buffer::with_lines([
            "  Age 1 3  4 6  ",
            "      ────────  ",
            "    2 □□□  □□□  ",
            "    3 □□□  □□□  ",
        ]);
        expected.set_style(Rect::new(2, 0, 3, 1), HEADER_STYLE);
        expected.set_style(Rect::new(6, 0, 1, 1), HEADER_STYLE);
        expected.set_style(Rect::new(8, 0, 1, 1), HEADER_STYLE);
        expected.set_style(Rect::new(11, 0, 1, 1), HEADER_STYLE);
        expected.set_style(Rect::new(13, 0, 1, 1), HEADER_STYLE);
        for y in [2, 3] {
            expected.set_style(Rect::new(2, y, 3, 1), AGE_STYLE);
            expected.set_style(Rect::new(6, y, 3, 1), EMPTY_CELL_STYLE);
            expected.set_style(Rect::new(11, y, 3, 1), EMPTY_CELL_STYLE);
        }
        assert_eq!(buffer, expected);
    }

    #[test]
    fn test_render_truncated() {
        let mut window = small_window();
        let area = Rect::new(0, 0, 8, 3);
        let mut buffer = Buffer::empty(area);
        LifeCalendar::new().render(area, &mut buffer, &mut window);
        let mut expected = Buffer::with_lines(["Age 1 3 ", "    ────", "  0 □□□ "]);
        expected.set_style(Rect::new(0, 0, 3, 1), HEADER_STYLE);
        expected.set_style(Rect::new(4, 0, 1, 1), HEADER_STYLE);
        expected.set_style(Rect::new(6, 0, 1, 1), HEADER_STYLE);
        expected.set_style(Rect::new(0, 2, 3, 1), AGE_STYLE);
        expected.set_style(Rect::new(4, 2, 3, 1), EMPTY_CELL_STYLE);
        assert_eq!(buffer, expected);
    }
}
