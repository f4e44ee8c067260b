//! Hover gate — the debounce-to-resume pause automaton.
//!
//! Two states: `Idle` (animation runs) and `Armed` (animation paused, a
//! deadline pending).  Pointer activity re-arms the deadline rather than
//! toggling, so the gate only drops back to `Idle` after a full quiet
//! period — or immediately when the pointer leaves.

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Gate {
    Idle,
    Armed { deadline: Instant },
}

/// Debounced pause gate with a single pending deadline as its only timer.
#[derive(Debug, Clone)]
pub struct HoverGate {
    state: Gate,
    delay: Duration,
}

impl HoverGate {
    pub fn new(delay: Duration) -> Self {
        Self {
            state: Gate::Idle,
            delay,
        }
    }

    /// Pointer entered or moved — pause now and restart the quiet period.
    pub fn touch(&mut self, now: Instant) {
        self.state = Gate::Armed {
            deadline: now + self.delay,
        };
    }

    /// Pointer left — resume immediately, discarding any pending deadline.
    pub fn leave(&mut self) {
        self.state = Gate::Idle;
    }

    /// Decay `Armed` → `Idle` once the quiet period has elapsed.
    /// Returns `true` exactly on the resuming edge.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.state {
            Gate::Armed { deadline } if now >= deadline => {
                self.state = Gate::Idle;
                true
            }
            _ => false,
        }
    }

    pub fn is_paused(&self) -> bool {
        matches!(self.state, Gate::Armed { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gate() -> HoverGate {
        HoverGate::new(Duration::from_millis(2000))
    }

    #[test]
    fn touch_pauses_immediately() {
        let mut g = gate();
        assert!(!g.is_paused());
        g.touch(Instant::now());
        assert!(g.is_paused());
    }

    #[test]
    fn stays_paused_until_quiet_period_elapses() {
        let mut g = gate();
        let t0 = Instant::now();
        g.touch(t0);
        assert!(!g.poll(t0 + Duration::from_millis(1999)));
        assert!(g.is_paused());
        assert!(g.poll(t0 + Duration::from_millis(2000)));
        assert!(!g.is_paused());
    }

    #[test]
    fn repeated_activity_extends_the_deadline() {
        let mut g = gate();
        let t0 = Instant::now();
        g.touch(t0);
        g.touch(t0 + Duration::from_millis(1500));
        // 2000ms after the *first* touch the gate is still armed.
        assert!(!g.poll(t0 + Duration::from_millis(2100)));
        assert!(g.is_paused());
        assert!(g.poll(t0 + Duration::from_millis(3500)));
    }

    #[test]
    fn leave_resumes_immediately() {
        let mut g = gate();
        let t0 = Instant::now();
        g.touch(t0);
        g.leave();
        assert!(!g.is_paused());
        // No stale deadline fires later.
        assert!(!g.poll(t0 + Duration::from_millis(5000)));
    }

    #[test]
    fn resume_edge_is_reported_once() {
        let mut g = gate();
        let t0 = Instant::now();
        g.touch(t0);
        let later = t0 + Duration::from_millis(2500);
        assert!(g.poll(later));
        assert!(!g.poll(later));
    }
}
