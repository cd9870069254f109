//! Splits the terminal area into panes.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Search box and catalog on the left, the two forms stacked on the right,
/// and a one-line status bar underneath.
pub struct AppLayout {
    pub search_area: Rect,
    pub catalog_area: Rect,
    pub add_area: Rect,
    pub rent_area: Rect,
    pub status_area: Rect,
}

impl AppLayout {
    /// Compute the layout from the full terminal area.
    pub fn from_area(area: Rect) -> Self {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(6),    // panes
                Constraint::Length(1), // status bar
            ])
            .split(area);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
            .split(rows[0]);

        let left = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // search box
                Constraint::Min(3),    // catalog
            ])
            .split(columns[0]);

        let right = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(6), // 4 add-form rows + border
                Constraint::Length(5), // 3 rent-form rows + border
                Constraint::Min(0),
            ])
            .split(columns[1]);

        Self {
            search_area: left[0],
            catalog_area: left[1],
            add_area: right[0],
            rent_area: right[1],
            status_area: rows[1],
        }
    }
}
