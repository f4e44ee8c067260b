//! Marquee pane widget.
//!
//! Renders a [`LoopScroller`]'s duplicated item sequence translated by its
//! current offset.  Forward motion means negative offsets: content slides
//! up (vertical) or left (horizontal).  Rows past the duplicated sequence
//! render blank — the wrap-to-zero in the core guarantees the window never
//! reaches them under normal geometry.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Widget},
};

use crate::core::loop_scroll::{Axis, LoopScroller};

/// Marquee widget — created fresh each frame over the scroller state.
pub struct MarqueeWidget<'a> {
    scroller: &'a LoopScroller<String>,
    style: Style,
    block: Option<Block<'a>>,
}

impl<'a> MarqueeWidget<'a> {
    pub fn new(scroller: &'a LoopScroller<String>) -> Self {
        Self {
            scroller,
            style: Style::default(),
            block: None,
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
}

impl Widget for MarqueeWidget<'_> {
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

        match self.scroller.config().axis {
            Axis::Vertical => render_vertical(self.scroller, self.style, inner, buf),
            Axis::Horizontal => render_horizontal(self.scroller, self.style, inner, buf),
        }
    }
}

/// Each item occupies one row plus the configured gap, margins split evenly.
fn render_vertical(scroller: &LoopScroller<String>, style: Style, inner: Rect, buf: &mut Buffer) {
    let gap = i64::from(scroller.config().gap);
    let extent = 1 + gap;
    let margin_top = gap / 2;
    let shift = scroller.offset().round() as i64;
    let items = scroller.items();

    for row in 0..i64::from(inner.height) {
        let content_row = row - shift;
        if content_row < 0 {
            continue;
        }
        let slide = (content_row / extent) as usize;
        if content_row % extent != margin_top || slide >= items.len() {
            continue;
        }
        let line = Line::from(Span::styled(items[slide].as_str(), style));
        buf.set_line(inner.x, inner.y + row as u16, &line, inner.width);
    }
}

/// Items flow left-to-right, each as wide as its text plus the gap.
fn render_horizontal(scroller: &LoopScroller<String>, style: Style, inner: Rect, buf: &mut Buffer) {
    let gap = i64::from(scroller.config().gap);
    let shift = scroller.offset().round() as i64;
    let y = inner.y + inner.height / 2;
    let width = i64::from(inner.width);

    let mut cursor = 0i64;
    for item in scroller.items() {
        let item_width = item.chars().count() as i64;
        let screen = cursor + gap / 2 + shift;
        cursor += item_width + gap;

        if screen + item_width <= 0 {
            continue;
        }
        if screen >= width {
            break;
        }

        if screen < 0 {
            // Clipped on the left edge — drop the hidden prefix.
            let cut = (-screen) as usize;
            let visible: String = item.chars().skip(cut).collect();
            buf.set_stringn(inner.x, y, &visible, inner.width as usize, style);
        } else {
            let remaining = (width - screen) as usize;
            buf.set_stringn(inner.x + screen as u16, y, item, remaining, style);
        }
    }
}
