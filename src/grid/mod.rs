mod widget;
mod window;
pub(crate) use self::widget::{total_height, total_width, LifeCalendar};
pub(crate) use self::window::GridWindow;
use crate::config::{GridConfig, RECTS_PER_DECADE};
use ratatui::style::Style;

/// Position of a cell in the chronological order of a life, starting from 0
/// for the week of birth
pub(crate) type WeekIndex = usize;

pub(crate) trait CellStyler {
    fn cell_style(&self, state: CellState) -> Style;
}

#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub(crate) enum CellState {
    #[default]
    Empty,
    Lived,
    /// The most recently lived week
    Current,
}

impl CellState {
    pub(crate) fn is_lived(self) -> bool {
        self != CellState::Empty
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Cell {
    index: WeekIndex,
    state: CellState,
}

impl Cell {
    fn new(index: WeekIndex) -> Cell {
        Cell {
            index,
            state: CellState::Empty,
        }
    }

    pub(crate) fn index(&self) -> WeekIndex {
        self.index
    }

    pub(crate) fn state(&self) -> CellState {
        self.state
    }

    pub(crate) fn set_state(&mut self, state: CellState) {
        self.state = state;
    }
}

/// A `rows_per_rect` × `cols_per_rect` block of cells, stored row-major as
/// the week indices of its cells
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Rectangle {
    cols: usize,
    weeks: Vec<WeekIndex>,
}

impl Rectangle {
    fn spawn(config: &GridConfig, decade: usize, rect: usize) -> Rectangle {
        let cols = config.cols_per_rect();
        let weeks = (0..config.rows_per_rect())
            .flat_map(|row| (0..cols).map(move |col| config.week_index(decade, rect, row, col)))
            .collect();
        Rectangle { cols, weeks }
    }

    pub(crate) fn row(&self, row: usize) -> &[WeekIndex] {
        self.weeks.chunks(self.cols).nth(row).unwrap_or_default()
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Decade {
    number: usize,
    rects: [Rectangle; RECTS_PER_DECADE],
}

impl Decade {
    fn spawn(config: &GridConfig, number: usize) -> Decade {
        Decade {
            number,
            rects: std::array::from_fn(|rect| Rectangle::spawn(config, number, rect)),
        }
    }

    pub(crate) fn number(&self) -> usize {
        self.number
    }

    pub(crate) fn rects(&self) -> &[Rectangle; RECTS_PER_DECADE] {
        &self.rects
    }
}

/// The full calendar of a life: its decades, and every week cell addressable
/// by week index.  The structure is fixed once built; only cell states change.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct LifeGrid {
    config: GridConfig,
    decades: Vec<Decade>,
    // Invariant: cells[i].index == i
    cells: Vec<Cell>,
}

impl LifeGrid {
    pub(crate) fn build(config: GridConfig) -> LifeGrid {
        let decades = (0..config.num_decades())
            .map(|number| Decade::spawn(&config, number))
            .collect::<Vec<_>>();
        let cells = (0..config.total_weeks()).map(Cell::new).collect::<Vec<_>>();
        tracing::debug!(
            lifespan = config.lifespan(),
            decades = decades.len(),
            weeks = cells.len(),
            weeks_per_year = config.weeks_per_year(),
            "Built life grid"
        );
        LifeGrid {
            config,
            decades,
            cells,
        }
    }

    pub(crate) fn config(&self) -> &GridConfig {
        &self.config
    }

    pub(crate) fn decades(&self) -> &[Decade] {
        &self.decades
    }

    pub(crate) fn total_weeks(&self) -> usize {
        self.cells.len()
    }

    pub(crate) fn cell(&self, index: WeekIndex) -> Option<&Cell> {
        self.cells.get(index)
    }

    pub(crate) fn cell_mut(&mut self, index: WeekIndex) -> Option<&mut Cell> {
        self.cells.get_mut(index)
    }

    pub(crate) fn cell_state(&self, index: WeekIndex) -> CellState {
        self.cell(index).map(Cell::state).unwrap_or_default()
    }

    pub(crate) fn clear(&mut self) {
        for cell in &mut self.cells {
            cell.set_state(CellState::Empty);
        }
    }

    pub(crate) fn lived_weeks(&self) -> usize {
        self.cells.iter().filter(|c| c.state().is_lived()).count()
    }

    pub(crate) fn current_week(&self) -> Option<WeekIndex> {
        self.cells
            .iter()
            .find(|c| c.state() == CellState::Current)
            .map(Cell::index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_reference_grid() {
        let grid = LifeGrid::build(GridConfig::default());
        assert_eq!(grid.decades().len(), 8);
        assert_eq!(grid.total_weeks(), 4160);
        let mut seen = HashSet::new();
        for decade in grid.decades() {
            for rect in decade.rects() {
                for row in 0..10 {
                    assert_eq!(rect.row(row).len(), 26);
                    for &w in rect.row(row) {
                        assert!(w < 4160, "week {w} out of range");
                        assert!(seen.insert(w), "week {w} assigned twice");
                    }
                }
                assert!(rect.row(10).is_empty());
            }
        }
        assert_eq!(seen.len(), 4160);
    }

    #[test]
    fn test_cells_indexed_by_week() {
        let grid = LifeGrid::build(GridConfig::new(20, 2, 3).unwrap());
        for i in 0..grid.total_weeks() {
            let cell = grid.cell(i).unwrap();
            assert_eq!(cell.index(), i);
            assert_eq!(cell.state(), CellState::Empty);
        }
        assert_eq!(grid.cell(23).map(Cell::index), Some(23));
        assert_eq!(grid.cell(24), None);
    }

    #[test]
    fn test_chronological_order() {
        let grid = LifeGrid::build(GridConfig::new(30, 4, 5).unwrap());
        let rows = grid.config().rows_per_rect();
        let mut weeks = Vec::new();
        for decade in grid.decades() {
            for row in 0..rows {
                for rect in decade.rects() {
                    weeks.extend_from_slice(rect.row(row));
                }
            }
        }
        assert_eq!(weeks, (0..grid.total_weeks()).collect::<Vec<_>>());
    }

    #[test]
    fn test_rectangle_rows() {
        let grid = LifeGrid::build(GridConfig::new(20, 2, 3).unwrap());
        let decade = &grid.decades()[1];
        assert_eq!(decade.number(), 1);
        let [left, right] = decade.rects();
        assert_eq!(left.row(0), [12, 13, 14]);
        assert_eq!(right.row(0), [15, 16, 17]);
        assert_eq!(left.row(1), [18, 19, 20]);
        assert_eq!(right.row(1), [21, 22, 23]);
        assert!(left.row(2).is_empty());
    }

    #[test]
    fn test_cell_counts() {
        for lifespan in [0, 9, 10, 45, 81, 100] {
            let config = GridConfig::new(lifespan, 3, 4).unwrap();
            let grid = LifeGrid::build(config);
            let decades = usize::from(lifespan / 10);
            assert_eq!(grid.decades().len(), decades);
            assert_eq!(grid.total_weeks(), decades * 2 * 3 * 4);
        }
    }

    #[test]
    fn test_clear() {
        let mut grid = LifeGrid::build(GridConfig::new(10, 1, 2).unwrap());
        if let Some(cell) = grid.cell_mut(0) {
            cell.set_state(CellState::Lived);
        }
        if let Some(cell) = grid.cell_mut(1) {
            cell.set_state(CellState::Current);
        }
        assert_eq!(grid.lived_weeks(), 2);
        assert_eq!(grid.current_week(), Some(1));
        grid.clear();
        assert_eq!(grid.lived_weeks(), 0);
        assert_eq!(grid.current_week(), None);
        assert_eq!(grid.cell_state(1), CellState::Empty);
    }
}
