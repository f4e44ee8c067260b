//! UI / rendering layer — everything that touches Ratatui widgets.
//!
//! This layer takes the *core* scroller state and turns it into cells on
//! the terminal.  No animation state is mutated here.

pub mod badge;
pub mod layout;
pub mod marquee;
pub mod reader;
pub mod theme;
