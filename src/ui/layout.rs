//! Layout helpers — split the terminal area into panes.

use ratatui::layout::{Constraint, Direction, Layout, Margin, Rect};

/// Primary screen layout: a ticker strip on top, two sidebar marquees, the
/// reader pane in the middle, and a bottom status bar.
pub struct AppLayout {
    pub ticker_area: Rect,
    pub left_area: Rect,
    /// The reader's enclosing region (its hover "parent").
    pub center_area: Rect,
    pub reader_area: Rect,
    pub right_area: Rect,
    pub status_area: Rect,
}

impl AppLayout {
    /// Compute the layout from the full terminal area.
    pub fn from_area(area: Rect) -> Self {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // ticker strip
                Constraint::Min(5),    // body
                Constraint::Length(1), // status bar
            ])
            .split(area);

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(26), // left marquee
                Constraint::Min(24),    // center / reader
                Constraint::Length(26), // right marquee
            ])
            .split(rows[1]);

        let center_area = body[1];
        let reader_area = center_area.inner(Margin {
            horizontal: 2,
            vertical: 1,
        });

        Self {
            ticker_area: rows[0],
            left_area: body[0],
            center_area,
            reader_area,
            right_area: body[2],
            status_area: rows[2],
        }
    }
}
