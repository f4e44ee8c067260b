//! Central application state.
//!
//! All mutable state lives here so that the rest of the app can be pure
//! functions over `&AppState` (rendering) or `&mut AppState` (event
//! handling).  Each pane is animated by exactly one scroller instance; the
//! instances never share state beyond the frame scheduler.

use std::time::{Duration, Instant};

use ratatui::layout::Rect;

use crate::config::AppConfig;
use crate::core::{
    bounce::{BounceController, ScrollSurface},
    frame::FrameScheduler,
    idle::HoverGate,
    loop_scroll::{Axis, LoopConfig, LoopScroller},
};
use crate::ui::layout::AppLayout;

// ───────────────────────────────────────── panes ─────────────

/// The fixed panes of the screen.  `Center` is the reader's enclosing
/// region (its "parent" for hover purposes).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaneId {
    Ticker,
    Left,
    Right,
    Reader,
    Center,
}

impl PaneId {
    /// Resolve a pane name from the config file.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "ticker" => Some(PaneId::Ticker),
            "left" => Some(PaneId::Left),
            "right" => Some(PaneId::Right),
            "reader" => Some(PaneId::Reader),
            "center" => Some(PaneId::Center),
            _ => None,
        }
    }
}

// ───────────────────────────────────────── hover router ──────

/// Registry of pane-hover routes that pause the reader.
///
/// Registration returns a stable id; the controller stores those ids and
/// destroy removes the routes by that same identity, so deregistration can
/// never miss (the listener-leak failure mode of removing by a freshly
/// built callback).
#[derive(Debug, Default)]
pub struct HoverRouter {
    next_id: u64,
    routes: Vec<(u64, PaneId)>,
}

impl HoverRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, pane: PaneId) -> u64 {
        self.next_id += 1;
        self.routes.push((self.next_id, pane));
        self.next_id
    }

    pub fn remove(&mut self, route_id: u64) {
        self.routes.retain(|(id, _)| *id != route_id);
    }

    /// Whether hovering `pane` is currently routed to the reader.
    pub fn pane_routed(&self, pane: PaneId) -> bool {
        self.routes.iter().any(|(_, p)| *p == pane)
    }
}

// ───────────────────────────────────────── reader surface ────

/// The reader pane as a scroll surface: content rows vs. viewport rows,
/// with a fractional native scroll position.
#[derive(Debug)]
pub struct PaneSurface {
    content_rows: f64,
    viewport_rows: f64,
    position: f64,
}

impl PaneSurface {
    pub fn new(content_rows: usize) -> Self {
        Self {
            content_rows: content_rows as f64,
            viewport_rows: 0.0,
            position: 0.0,
        }
    }

    /// Called every frame before ticking — the viewport tracks the layout.
    pub fn set_viewport(&mut self, rows: f64) {
        self.viewport_rows = rows;
    }
}

impl ScrollSurface for PaneSurface {
    fn content_extent(&self) -> f64 {
        self.content_rows
    }

    fn viewport_extent(&self) -> f64 {
        self.viewport_rows
    }

    fn position(&self) -> f64 {
        self.position
    }

    fn set_position(&mut self, position: f64) {
        self.position = position;
    }
}

// ───────────────────────────────────────── content ───────────

/// The item sequences and reader text the panes animate.
#[derive(Debug, Clone)]
pub struct PaneContent {
    pub ticker: Vec<String>,
    pub left: Vec<String>,
    pub right: Vec<String>,
    pub reader: Vec<String>,
}

// ───────────────────────────────────────── state ─────────────

/// Top-level application state.
pub struct AppState {
    /// Shared tick scheduler; one slot per bounce instance.
    pub scheduler: FrameScheduler,
    /// Horizontal marquee across the top.
    pub ticker: LoopScroller<String>,
    /// Vertical sidebar marquees.
    pub left: LoopScroller<String>,
    pub right: LoopScroller<String>,
    /// The bouncing reader pane.
    pub reader: BounceController<PaneSurface>,
    /// Reader text, rendered at the surface's scroll position.
    pub reader_lines: Vec<String>,
    /// Debounce gate shared by all hover routes that pause the reader.
    pub reader_gate: HoverGate,
    /// Pane-hover → reader-pause routes.
    pub hover: HoverRouter,
    /// Pane currently under the mouse pointer.
    pub hovered: Option<PaneId>,
    /// Last known terminal area, updated on every draw/resize.
    pub terminal_area: Rect,
    /// Controls the main event loop.
    pub should_quit: bool,
    /// An optional status message shown in the bottom bar.
    pub status_message: Option<String>,
    pub show_scrollbar: bool,
    pub config: AppConfig,
}

impl AppState {
    pub fn new(config: AppConfig, content: PaneContent) -> Self {
        let mut scheduler = FrameScheduler::new();
        let loop_config = config.loop_config();

        let ticker = LoopScroller::new(
            content.ticker,
            LoopConfig {
                axis: Axis::Horizontal,
                ..loop_config.clone()
            },
            |s: &String| s.chars().count() as f64,
        );
        let left = LoopScroller::new(content.left, loop_config.clone(), |_| 1.0);
        let right = LoopScroller::new(content.right, loop_config, |_| 1.0);

        let mut reader = BounceController::new(config.bounce_options());
        let show_scrollbar = !reader.options().hide_scrollbar;
        let mut hover = HoverRouter::new();

        if !content.reader.is_empty() {
            reader.add_target(PaneSurface::new(content.reader.len()), &mut scheduler);

            if reader.options().pause_on_hover {
                let id = hover.register(PaneId::Reader);
                reader.adopt_hover_route(id);
            }
            if reader.options().pause_on_parent_hover {
                let id = hover.register(PaneId::Center);
                reader.adopt_hover_route(id);
            }
            for name in reader.options().extra_hover_targets.clone() {
                match PaneId::from_name(&name) {
                    Some(pane) => {
                        let id = hover.register(pane);
                        reader.adopt_hover_route(id);
                    }
                    None => tracing::warn!("unknown hover target `{name}` in config"),
                }
            }
        }
        // An empty controller logs its own warning here and stays inert.
        reader.arm(Instant::now());

        tracing::debug!(
            "panes initialised: ticker {} items over {:.0} cols, sidebars {}+{} items, reader {} rows in {} instance(s)",
            ticker.items().len(),
            ticker.total_extent(),
            left.original_count(),
            right.original_count(),
            content.reader.len(),
            reader.len(),
        );

        let reader_gate = HoverGate::new(Duration::from_millis(config.pause_delay_ms));

        Self {
            scheduler,
            ticker,
            left,
            right,
            reader,
            reader_lines: content.reader,
            reader_gate,
            hover,
            hovered: None,
            terminal_area: Rect::default(),
            should_quit: false,
            status_message: None,
            show_scrollbar,
            config,
        }
    }

    /// Advance every scroller by one frame.
    ///
    /// Marquees tick unconditionally (pause freezes their offset only);
    /// the reader ticks through its scheduled handles, so paused instances
    /// do not run at all.
    pub fn on_frame(&mut self) {
        let now = Instant::now();

        self.ticker.tick(now);
        self.left.tick(now);
        self.right.tick(now);

        // Hover debounce decay → resume edge for the reader.
        if self.reader_gate.poll(now) {
            self.reader.resume_all(&mut self.scheduler);
            tracing::debug!("reader resumed after quiet period");
        }

        // The reader viewport tracks the current layout.
        let layout = AppLayout::from_area(self.terminal_area);
        let viewport = f64::from(layout.reader_area.height.saturating_sub(2));
        if let Some(surface) = self.reader.surface_mut(0) {
            surface.set_viewport(viewport);
        }

        self.reader.tick_all(now, &mut self.scheduler);
    }

    /// Current reader scroll row for rendering.
    pub fn reader_scroll_row(&self) -> u16 {
        self.reader
            .position(0)
            .map(|p| p.round().max(0.0) as u16)
            .unwrap_or(0)
    }
}
