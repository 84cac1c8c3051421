use crate::grid::{total_height, total_width};
use std::num::NonZeroUsize;
use thiserror::Error;

/// Assumed lifespan in years when none is given
pub(crate) const DEFAULT_LIFESPAN: u16 = 81;

pub(crate) const DEFAULT_ROWS_PER_RECT: NonZeroUsize = match NonZeroUsize::new(10) {
    Some(n) => n,
    None => panic!("default rows per rectangle should be nonzero"),
};

pub(crate) const DEFAULT_COLS_PER_RECT: NonZeroUsize = match NonZeroUsize::new(26) {
    Some(n) => n,
    None => panic!("default columns per rectangle should be nonzero"),
};

const YEARS_PER_DECADE: u16 = 10;

/// Upper bound on the number of cells in a grid
const MAX_TOTAL_WEEKS: usize = 1 << 22;

/// Every decade is drawn as two rectangles side by side, each holding half of
/// every year's weeks
pub(crate) const RECTS_PER_DECADE: usize = 2;

/// Dimensions of the life grid.  All of the derived quantities used to build
/// and paint the grid are computed from here so that the two can never
/// disagree about how many weeks are in a year.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct GridConfig {
    lifespan: u16,
    rows_per_rect: NonZeroUsize,
    cols_per_rect: NonZeroUsize,
}

impl GridConfig {
    pub(crate) fn new(
        lifespan: u16,
        rows_per_rect: usize,
        cols_per_rect: usize,
    ) -> Result<GridConfig, ConfigError> {
        let rows_per_rect =
            NonZeroUsize::new(rows_per_rect).ok_or(ConfigError::Zero("rows per rectangle"))?;
        let cols_per_rect =
            NonZeroUsize::new(cols_per_rect).ok_or(ConfigError::Zero("columns per rectangle"))?;
        // All other arithmetic on the dimensions is bounded by this product.
        usize::from(lifespan / YEARS_PER_DECADE)
            .checked_mul(RECTS_PER_DECADE)
            .and_then(|n| n.checked_mul(rows_per_rect.get()))
            .and_then(|n| n.checked_mul(cols_per_rect.get()))
            .filter(|&n| n <= MAX_TOTAL_WEEKS)
            .ok_or(ConfigError::TooLarge)?;
        let config = GridConfig {
            lifespan,
            rows_per_rect,
            cols_per_rect,
        };
        if total_width(&config).is_none() || total_height(&config).is_none() {
            return Err(ConfigError::TooLarge);
        }
        Ok(config)
    }

    pub(crate) fn lifespan(&self) -> u16 {
        self.lifespan
    }

    pub(crate) fn num_decades(&self) -> usize {
        usize::from(self.lifespan / YEARS_PER_DECADE)
    }

    pub(crate) fn rows_per_rect(&self) -> usize {
        self.rows_per_rect.get()
    }

    pub(crate) fn cols_per_rect(&self) -> usize {
        self.cols_per_rect.get()
    }

    pub(crate) fn weeks_per_year(&self) -> usize {
        RECTS_PER_DECADE * self.cols_per_rect()
    }

    pub(crate) fn weeks_per_decade(&self) -> usize {
        self.weeks_per_year() * self.rows_per_rect()
    }

    pub(crate) fn total_weeks(&self) -> usize {
        self.num_decades() * self.weeks_per_decade()
    }

    /// Total number of lines in the body of the drawn grid: one per row of
    /// every decade, plus a separator between consecutive decades
    pub(crate) fn body_lines(&self) -> usize {
        let decades = self.num_decades();
        decades * self.rows_per_rect() + decades.saturating_sub(1)
    }

    /// Returns the week index of the cell at the given position.  A row
    /// across both rectangles of a decade is one year, with rectangle 0
    /// holding the first half of the year.
    pub(crate) fn week_index(&self, decade: usize, rect: usize, row: usize, col: usize) -> usize {
        decade * self.weeks_per_decade()
            + row * self.weeks_per_year()
            + rect * self.cols_per_rect()
            + col
    }
}

impl Default for GridConfig {
    fn default() -> GridConfig {
        GridConfig {
            lifespan: DEFAULT_LIFESPAN,
            rows_per_rect: DEFAULT_ROWS_PER_RECT,
            cols_per_rect: DEFAULT_COLS_PER_RECT,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub(crate) enum ConfigError {
    #[error("number of {0} must be positive")]
    Zero(&'static str),
    #[error("grid dimensions are too large")]
    TooLarge,
}
