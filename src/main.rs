//! Terminal marquee panes.
//!
//! Run the binary to launch the showcase: a looping ticker and two looping
//! sidebars, plus a center reader pane that bounces between its content
//! boundaries.  Hovering any pane with the mouse pauses its animation.

mod app;
mod config;
mod core;
mod ui;

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    widgets::{Block, Borders, Paragraph},
    Terminal,
};

use crate::app::{
    event::{spawn_event_reader, AppEvent},
    handler,
    state::{AppState, PaneContent},
};
use crate::config::AppConfig;
use crate::ui::{
    badge::PausedBadge, layout::AppLayout, marquee::MarqueeWidget, reader::ReaderPane,
    theme::Theme,
};

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), about = "Terminal marquee panes")]
struct Cli {
    /// Text file for the reader pane (defaults to a built-in sample).
    path: Option<PathBuf>,

    /// Animation frames per second.
    #[arg(long)]
    fps: Option<u16>,

    /// Reader scroll speed (rows per tick).
    #[arg(long)]
    speed: Option<f64>,

    /// Show the reader scrollbar.
    #[arg(long)]
    scrollbar: bool,

    /// Write the default config file and exit.
    #[arg(long = "write-config")]
    write_config: bool,
}

// ───────────────────────────────────────── sample content ────

const TICKER_ITEMS: &[&str] = &[
    "now booking spring consultations",
    "rated five stars by our clients",
    "new downtown office open",
    "free first meeting, no obligation",
];

const LEFT_ITEMS: &[&str] = &[
    "\"They made it painless.\"",
    "— Priya S.",
    "\"Clear answers, fast.\"",
    "— Marcus D.",
    "\"Would hire again.\"",
    "— Elena V.",
];

const RIGHT_ITEMS: &[&str] = &[
    "family law",
    "estate planning",
    "small business",
    "real estate",
    "immigration",
    "civil disputes",
];

const READER_TEXT: &str = "\
Our practice began twenty years ago with a single desk,
a borrowed typewriter, and the conviction that plain
answers beat billable mystery every time.

We still work that way.

Every matter starts with a conversation, not a contract.
You tell us where it hurts; we tell you, in ordinary
words, what the law can and cannot do about it, what it
will cost, and how long it will take.

No surprises on the invoice. No jargon in the hallway.

Along the way we have argued in small rooms and large
ones, closed hundreds of purchases, steadied family
estates through difficult seasons, and helped new
businesses open their doors with the paperwork done
right the first time.

The people on our wall of notes — the quotes scrolling
beside this page — are not actors. They are neighbors,
and they are why the lights stay on.

If you are reading this in the lobby, the coffee is
free and the second chair is for you.

Come say hello.";

// ───────────────────────────────────────── main ──────────────

fn sample_lines(text: &str) -> Vec<String> {
    text.lines().map(str::to_string).collect()
}

fn items(raw: &[&str]) -> Vec<String> {
    raw.iter().map(|s| s.to_string()).collect()
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise tracing (only when RUST_LOG is set).
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr) // never draw over the UI on stdout
        .init();

    let cli = Cli::parse();

    if cli.write_config {
        let config = AppConfig::default();
        config.save()?;
        println!("wrote default config");
        return Ok(());
    }

    // ── configuration ─────────────────────────────────────────
    let mut config = AppConfig::load();
    if let Some(fps) = cli.fps {
        config.fps = fps.clamp(10, 120);
    }
    if let Some(speed) = cli.speed {
        config.bounce_speed = speed.clamp(0.05, 20.0);
    }
    if cli.scrollbar {
        config.hide_scrollbar = false;
    }

    // ── content ───────────────────────────────────────────────
    let reader = match cli.path {
        Some(ref path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            sample_lines(&text)
        }
        None => sample_lines(READER_TEXT),
    };
    let content = PaneContent {
        ticker: items(TICKER_ITEMS),
        left: items(LEFT_ITEMS),
        right: items(RIGHT_ITEMS),
        reader,
    };

    let mut state = AppState::new(config, content);

    // ── terminal setup ────────────────────────────────────────
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    let frame_interval = Duration::from_secs_f64(1.0 / f64::from(state.config.fps));
    let mut events = spawn_event_reader(frame_interval);

    // ── event loop ────────────────────────────────────────────
    loop {
        terminal.draw(|frame| {
            state.terminal_area = frame.area();
            let layout = AppLayout::from_area(frame.area());

            let pane_block = |title: &'static str| {
                Block::default()
                    .title(title)
                    .title_style(Theme::title_style())
                    .borders(Borders::ALL)
                    .border_style(Theme::border_style())
            };

            frame.render_widget(
                MarqueeWidget::new(&state.ticker)
                    .style(Theme::ticker_item_style())
                    .block(pane_block(" headlines ")),
                layout.ticker_area,
            );
            frame.render_widget(
                MarqueeWidget::new(&state.left)
                    .style(Theme::marquee_item_style())
                    .block(pane_block(" clients ")),
                layout.left_area,
            );
            frame.render_widget(
                MarqueeWidget::new(&state.right)
                    .style(Theme::marquee_item_style())
                    .block(pane_block(" practice areas ")),
                layout.right_area,
            );
            let reader_title = if state.reader.is_destroyed() {
                " our story (stopped) "
            } else if state.reader.direction_sign(0) == Some(-1.0) {
                " our story ▲ "
            } else {
                " our story ▼ "
            };
            frame.render_widget(
                ReaderPane::new(&state.reader_lines, state.reader_scroll_row())
                    .style(Theme::reader_text_style())
                    .show_scrollbar(state.show_scrollbar)
                    .block(pane_block(reader_title)),
                layout.reader_area,
            );

            // Pause badges on hovered/held panes.
            frame.render_widget(
                PausedBadge {
                    visible: state.ticker.is_paused(),
                },
                layout.ticker_area,
            );
            frame.render_widget(
                PausedBadge {
                    visible: state.left.is_paused(),
                },
                layout.left_area,
            );
            frame.render_widget(
                PausedBadge {
                    visible: state.right.is_paused(),
                },
                layout.right_area,
            );
            let reader_held = !state.reader.is_empty() && !state.reader.is_running(0);
            frame.render_widget(
                PausedBadge {
                    visible: reader_held,
                },
                layout.reader_area,
            );

            let hint = state.config.status_bar_hint();
            let status_text = state.status_message.as_deref().unwrap_or(&hint);
            let status = Paragraph::new(status_text).style(Theme::status_bar_style());
            frame.render_widget(status, layout.status_area);
        })?;

        match events.recv().await {
            Some(AppEvent::Key(key)) => handler::handle_key(&mut state, key),
            Some(AppEvent::Mouse(mouse)) => handler::handle_mouse(&mut state, mouse),
            Some(AppEvent::Resize(_, _)) => {}
            Some(AppEvent::Frame) => state.on_frame(),
            None => break,
        }

        if state.should_quit {
            break;
        }
    }

    // ── teardown ──────────────────────────────────────────────
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    Ok(())
}
