//! Reader pane widget — text rendered at the bounce controller's native
//! scroll position, with an optional scrollbar.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{
        Block, Scrollbar, ScrollbarOrientation, ScrollbarState, StatefulWidget, Widget,
    },
};

pub struct ReaderPane<'a> {
    lines: &'a [String],
    /// First visible content row.
    scroll: u16,
    style: Style,
    block: Option<Block<'a>>,
    show_scrollbar: bool,
}

impl<'a> ReaderPane<'a> {
    pub fn new(lines: &'a [String], scroll: u16) -> Self {
        Self {
            lines,
            scroll,
            style: Style::default(),
            block: None,
            show_scrollbar: false,
        }
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    pub fn show_scrollbar(mut self, show: bool) -> Self {
        self.show_scrollbar = show;
        self
    }
}

impl Widget for ReaderPane<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let inner = if let Some(ref block) = self.block {
            let inner = block.inner(area);
            block.clone().render(area, buf);
            inner
        } else {
            area
        };
        if inner.width == 0 || inner.height == 0 {
            return;
        }

        for row in 0..inner.height {
            let index = self.scroll as usize + row as usize;
            let Some(text) = self.lines.get(index) else {
                break;
            };
            let line = Line::from(Span::styled(text.as_str(), self.style));
            buf.set_line(inner.x, inner.y + row, &line, inner.width);
        }

        let max_scroll = self.lines.len().saturating_sub(inner.height as usize);
        if self.show_scrollbar && max_scroll > 0 {
            let mut state = ScrollbarState::new(max_scroll).position(self.scroll as usize);
            StatefulWidget::render(
                Scrollbar::new(ScrollbarOrientation::VerticalRight),
                area,
                buf,
                &mut state,
            );
        }
    }
}
