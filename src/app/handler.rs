//! Input handling — maps key/mouse events to state mutations.

use std::time::Instant;

use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind,
};
use ratatui::layout::Rect;

use crate::config::Action;
use crate::ui::layout::AppLayout;

use super::state::{AppState, PaneId};

/// Process a key event.
pub fn handle_key(state: &mut AppState, key: KeyEvent) {
    if key.kind == KeyEventKind::Release {
        return;
    }

    // Ctrl+c always quits, regardless of bindings.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return;
    }

    let Some(action) = state.config.match_key(key) else {
        return;
    };

    match action {
        Action::Quit => {
            state.should_quit = true;
        }
        Action::PauseAll => {
            state.reader.pause_all(&mut state.scheduler);
            state.status_message = Some("reader paused".into());
        }
        Action::ResumeAll => {
            state.reader.resume_all(&mut state.scheduler);
            state.status_message = Some("reader resumed".into());
        }
        Action::SpeedUp => {
            let speed = (state.reader.speed() + 0.5).min(20.0);
            state.reader.update_speed(speed);
            state.status_message = Some(format!("reader speed {speed:.1}"));
        }
        Action::SpeedDown => {
            let speed = (state.reader.speed() - 0.5).max(0.5);
            state.reader.update_speed(speed);
            state.status_message = Some(format!("reader speed {speed:.1}"));
        }
        Action::ToggleScrollbar => {
            state.show_scrollbar = !state.show_scrollbar;
        }
        Action::StopReader => {
            // Remove the hover routes by the exact ids registered at
            // construction — identity-correct deregistration.
            let routes = state.reader.destroy(&mut state.scheduler);
            for id in routes {
                state.hover.remove(id);
            }
            tracing::debug!(
                "reader stopped; {} ticks still scheduled",
                state.scheduler.pending_count()
            );
            state.status_message = Some("reader stopped".into());
        }
    }
}

/// Process a mouse event.  Every pointer position report feeds the hover
/// tracking; button/scroll kinds carry a position too.
pub fn handle_mouse(state: &mut AppState, mouse: MouseEvent) {
    match mouse.kind {
        MouseEventKind::Moved
        | MouseEventKind::Drag(_)
        | MouseEventKind::Down(_)
        | MouseEventKind::ScrollUp
        | MouseEventKind::ScrollDown => {
            update_hover(state, mouse.column, mouse.row);
        }
        _ => {}
    }
}

/// Track which pane the pointer is over and drive the pause wiring:
/// marquees get direct pointer notifications; panes routed to the reader
/// arm the shared debounce gate.
fn update_hover(state: &mut AppState, column: u16, row: u16) {
    let layout = AppLayout::from_area(state.terminal_area);
    let pane = pane_at(&layout, column, row);
    let now = Instant::now();

    if pane != state.hovered {
        if let Some(old) = state.hovered {
            on_pane_left(state, old);
        }
        state.hovered = pane;
    }

    match pane {
        Some(PaneId::Ticker) => state.ticker.notice_pointer(now),
        Some(PaneId::Left) => state.left.notice_pointer(now),
        Some(PaneId::Right) => state.right.notice_pointer(now),
        _ => {}
    }

    if let Some(pane) = pane {
        if state.hover.pane_routed(pane) {
            let was_paused = state.reader_gate.is_paused();
            state.reader_gate.touch(now);
            if !was_paused {
                state.reader.pause_all(&mut state.scheduler);
                tracing::debug!("reader paused by hover over {pane:?}");
            }
        }
    }
}

fn on_pane_left(state: &mut AppState, old: PaneId) {
    match old {
        PaneId::Ticker => state.ticker.pointer_left(),
        PaneId::Left => state.left.pointer_left(),
        PaneId::Right => state.right.pointer_left(),
        PaneId::Reader | PaneId::Center => {}
    }

    if state.hover.pane_routed(old) {
        state.reader_gate.leave();
        state.reader.resume_all(&mut state.scheduler);
    }
}

/// Most specific pane under the pointer: the reader wins over its
/// enclosing center region.
fn pane_at(layout: &AppLayout, column: u16, row: u16) -> Option<PaneId> {
    if point_in_rect(layout.reader_area, column, row) {
        Some(PaneId::Reader)
    } else if point_in_rect(layout.center_area, column, row) {
        Some(PaneId::Center)
    } else if point_in_rect(layout.ticker_area, column, row) {
        Some(PaneId::Ticker)
    } else if point_in_rect(layout.left_area, column, row) {
        Some(PaneId::Left)
    } else if point_in_rect(layout.right_area, column, row) {
        Some(PaneId::Right)
    } else {
        None
    }
}

fn point_in_rect(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x
        && column < rect.x + rect.width
        && row >= rect.y
        && row < rect.y + rect.height
}
