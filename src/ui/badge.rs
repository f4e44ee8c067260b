//! Pause indicator — a small label rendered in the top-right corner of a
//! pane whose animation is currently held.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::Widget,
};

use super::theme::Theme;

/// A "paused" badge drawn over a pane's top border.
///
/// Invisible when `visible` is false or the pane is too narrow.
pub struct PausedBadge {
    pub visible: bool,
}

impl Widget for PausedBadge {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if !self.visible || area.width < 14 || area.height == 0 {
            return;
        }

        let label = " paused ";
        let label_width = label.len() as u16;
        // Top-right, inside the border (leave 1 col for the border char).
        let x = area.x + area.width.saturating_sub(label_width + 2);
        let y = area.y;

        let line = Line::from(Span::styled(label, Theme::badge_style()));
        buf.set_line(x, y, &line, label_width);
    }
}
