use crate::grid::{CellState, LifeGrid, WeekIndex};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use time::{format_description::FormatItem, macros::format_description, Date};

static DMY_FMT: &[FormatItem<'_>] =
    format_description!("[day padding:none]/[month padding:none]/[year]");

/// Years are approximated as 365 days, so the week count drifts by a day
/// each year (52 weeks are only 364 days) and ignores leap days.
const DAYS_PER_YEAR: u64 = 365;

const DAYS_PER_WEEK: u64 = 7;

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub(crate) struct Birthdate(Date);

impl Birthdate {
    pub(crate) fn new(date: Date) -> Birthdate {
        Birthdate(date)
    }

    pub(crate) fn date(&self) -> Date {
        self.0
    }
}

impl FromStr for Birthdate {
    type Err = BirthdateError;

    fn from_str(s: &str) -> Result<Birthdate, BirthdateError> {
        Date::parse(s.trim(), &DMY_FMT)
            .map(Birthdate)
            .map_err(|source| BirthdateError {
                input: s.to_owned(),
                source,
            })
    }
}

impl fmt::Display for Birthdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}/{:02}/{:04}",
            self.0.day(),
            u8::from(self.0.month()),
            self.0.year()
        )
    }
}

#[derive(Debug, Error)]
#[error("invalid birthdate {input:?}; expected DD/MM/YYYY")]
pub(crate) struct BirthdateError {
    input: String,
    source: time::error::Parse,
}

/// Outcome of painting a birthdate onto a grid
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Painting {
    pub(crate) birthdate: Birthdate,
    /// Number of weeks lived, which may exceed the number of cells in the
    /// grid
    pub(crate) weeks_lived: usize,
    pub(crate) current: Option<WeekIndex>,
}

/// Returns the number of whole weeks from `birth` to `today`, counting each
/// full 365 days as `weeks_per_year` weeks.  Birthdates on or after `today`
/// give zero.
pub(crate) fn weeks_lived(birth: Date, today: Date, weeks_per_year: usize) -> usize {
    let Ok(days) = u64::try_from((today - birth).whole_days()) else {
        return 0;
    };
    let years = days / DAYS_PER_YEAR;
    let weeks = (days % DAYS_PER_YEAR) / DAYS_PER_WEEK;
    let weeks_per_year = u64::try_from(weeks_per_year).unwrap_or(u64::MAX);
    let total = years.saturating_mul(weeks_per_year).saturating_add(weeks);
    usize::try_from(total).unwrap_or(usize::MAX)
}

/// Marks every week lived between `birthdate` and `today` as filled, with the
/// last one flagged as current.  Any earlier painting is cleared first.
/// Weeks beyond the end of the grid are skipped.
pub(crate) fn fill_calendar(grid: &mut LifeGrid, birthdate: Birthdate, today: Date) -> Painting {
    grid.clear();
    let lived = weeks_lived(birthdate.date(), today, grid.config().weeks_per_year());
    if lived == 0 {
        if birthdate.date() > today {
            tracing::warn!(%birthdate, %today, "Birthdate is in the future; nothing to paint");
        }
        return Painting {
            birthdate,
            weeks_lived: 0,
            current: None,
        };
    }
    let total = grid.total_weeks();
    for week in 0..lived.min(total) {
        if let Some(cell) = grid.cell_mut(week) {
            cell.set_state(CellState::Lived);
        }
    }
    let current = grid.cell_mut(lived - 1).map(|cell| {
        cell.set_state(CellState::Current);
        cell.index()
    });
    if lived > total {
        tracing::debug!(lived, total, "Weeks lived exceed the grid; clipping");
    }
    tracing::info!(%birthdate, weeks_lived = lived, "Painted weeks lived");
    Painting {
        birthdate,
        weeks_lived: lived,
        current,
    }
}
