use super::{CellStyler, LifeGrid, WeekIndex};
use crate::paint::{fill_calendar, Birthdate, Painting};
use thiserror::Error;
use time::Date;

/// One line of the grid body: either one row of a decade (a year of life),
/// or the blank line between two decades
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) enum GridLine {
    Row { decade: usize, row: usize },
    Separator,
}

/// The life grid together with the part of it currently scrolled into view
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct GridWindow<S> {
    grid: LifeGrid,
    pub(super) styler: S,
    /// Index of the first visible body line
    offset: usize,
    /// Number of body lines shown at once, known after the first render
    page: Option<usize>,
    /// Set when asked to center on the current week before the page size was
    /// known
    recenter: bool,
}

impl<S: CellStyler> GridWindow<S> {
    pub(crate) fn new(grid: LifeGrid, styler: S) -> Self {
        GridWindow {
            grid,
            styler,
            offset: 0,
            page: None,
            recenter: false,
        }
    }

    pub(crate) fn grid(&self) -> &LifeGrid {
        &self.grid
    }

    pub(crate) fn paint(&mut self, birthdate: Birthdate, today: Date) -> Painting {
        let painting = fill_calendar(&mut self.grid, birthdate, today);
        self.jump_to_current();
        painting
    }

    fn body_lines(&self) -> usize {
        self.grid.config().body_lines()
    }

    fn line_at(&self, line: usize) -> Option<GridLine> {
        let rows = self.grid.config().rows_per_rect();
        let decade = line / (rows + 1);
        let row = line % (rows + 1);
        if decade >= self.grid.decades().len() {
            None
        } else if row == rows {
            (decade + 1 < self.grid.decades().len()).then_some(GridLine::Separator)
        } else {
            Some(GridLine::Row { decade, row })
        }
    }

    fn line_of_week(&self, week: WeekIndex) -> usize {
        let config = self.grid.config();
        let decade = week / config.weeks_per_decade();
        let row = (week % config.weeks_per_decade()) / config.weeks_per_year();
        decade * (config.rows_per_rect() + 1) + row
    }

    pub(super) fn visible_lines(&mut self, page: usize) -> Vec<GridLine> {
        self.page = Some(page);
        if std::mem::take(&mut self.recenter) {
            self.jump_to_current();
        }
        self.offset = self.offset.min(self.max_offset(page));
        (self.offset..self.offset.saturating_add(page))
            .map_while(|i| self.line_at(i))
            .collect()
    }

    fn max_offset(&self, page: usize) -> usize {
        self.body_lines().saturating_sub(page)
    }

    pub(crate) fn jump_to_top(&mut self) {
        self.offset = 0;
        self.recenter = false;
    }

    /// Scrolls so that the row holding the current week is in the middle of
    /// the view, or will be once the view is first drawn.  Does nothing if no
    /// week is current.
    pub(crate) fn jump_to_current(&mut self) {
        let Some(week) = self.grid.current_week() else {
            return;
        };
        let Some(page) = self.page else {
            self.recenter = true;
            return;
        };
        let line = self.line_of_week(week);
        self.offset = line
            .saturating_sub(page.saturating_sub(1) / 2)
            .min(self.max_offset(page));
    }

    pub(crate) fn one_line_forwards(&mut self) -> Result<(), EdgeError> {
        let Some(page) = self.page else {
            return Ok(());
        };
        if self.offset < self.max_offset(page) {
            self.offset += 1;
            Ok(())
        } else {
            Err(EdgeError)
        }
    }

    pub(crate) fn one_line_backwards(&mut self) -> Result<(), EdgeError> {
        if self.page.is_none() {
            return Ok(());
        }
        self.offset = self.offset.checked_sub(1).ok_or(EdgeError)?;
        Ok(())
    }

    pub(crate) fn one_page_forwards(&mut self) -> Result<(), EdgeError> {
        let Some(page) = self.page else {
            return Ok(());
        };
        let max = self.max_offset(page);
        if self.offset < max {
            self.offset = self.offset.saturating_add(page.max(1)).min(max);
            Ok(())
        } else {
            Err(EdgeError)
        }
    }

    pub(crate) fn one_page_backwards(&mut self) -> Result<(), EdgeError> {
        let Some(page) = self.page else {
            return Ok(());
        };
        if self.offset > 0 {
            self.offset = self.offset.saturating_sub(page.max(1));
            Ok(())
        } else {
            Err(EdgeError)
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, Error, PartialEq)]
#[error("reached the edge of the calendar")]
pub(crate) struct EdgeError;
