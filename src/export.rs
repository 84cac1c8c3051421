use crate::grid::{total_height, total_width, CellStyler, GridWindow, LifeCalendar};
use ratatui::{buffer::Buffer, layout::Rect, widgets::StatefulWidget};
use thiserror::Error;

/// Renders the whole grid, every decade at once, into an off-screen buffer
/// and returns its rows as plain text with trailing blanks removed
pub(crate) fn snapshot<S: CellStyler>(
    window: &mut GridWindow<S>,
) -> Result<Vec<String>, SnapshotError> {
    let config = window.grid().config();
    let width = total_width(config).ok_or(SnapshotError)?;
    let height = total_height(config).ok_or(SnapshotError)?;
    let area = Rect::new(0, 0, width, height);
    let mut buf = Buffer::empty(area);
    window.jump_to_top();
    LifeCalendar::new().render(area, &mut buf, window);
    let rows = (0..height)
        .map(|y| {
            let row = (0..width)
                .filter_map(|x| buf.cell((x, y)))
                .map(ratatui::buffer::Cell::symbol)
                .collect::<String>();
            row.trim_end().to_owned()
        })
        .collect();
    Ok(rows)
}

#[derive(Copy, Clone, Debug, Eq, Error, PartialEq)]
#[error("calendar is too large to print")]
pub(crate) struct SnapshotError;
