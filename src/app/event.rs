//! Terminal event abstraction.
//!
//! Wraps crossterm events into a simpler enum and runs two background tasks
//! that forward them over one channel: an input reader polling the terminal,
//! and a frame ticker emitting `Frame` at a steady cadence so animation
//! never starves behind a burst of input events.

use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyEvent, MouseEvent};
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;

/// High-level events consumed by the application.
#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize(u16, u16),
    /// One animation frame — every scroller ticks exactly once per `Frame`.
    Frame,
}

/// Spawns the input reader and the frame ticker, returning the merged
/// event channel.
pub fn spawn_event_reader(frame_interval: Duration) -> mpsc::UnboundedReceiver<AppEvent> {
    let (tx, rx) = mpsc::unbounded_channel();

    // Input reader.  The short poll timeout doubles as the exit check
    // cadence once the receiver is gone.
    let input_tx = tx.clone();
    tokio::spawn(async move {
        loop {
            let has_event = event::poll(Duration::from_millis(25)).unwrap_or(false);
            if !has_event {
                if input_tx.is_closed() {
                    break;
                }
                continue;
            }
            if let Ok(ev) = event::read() {
                let app_event = match ev {
                    CtEvent::Key(k) => AppEvent::Key(k),
                    CtEvent::Mouse(m) => AppEvent::Mouse(m),
                    CtEvent::Resize(w, h) => AppEvent::Resize(w, h),
                    _ => continue,
                };
                if input_tx.send(app_event).is_err() {
                    break; // receiver dropped
                }
            }
        }
    });

    // Frame ticker — drives the scroller cores.
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(frame_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            ticker.tick().await;
            if tx.send(AppEvent::Frame).is_err() {
                break;
            }
        }
    });

    rx
}
