//! Offset-loop marquee core.
//!
//! The item sequence is duplicated up front so the rendered window can slide
//! through several identical passes; each tick nudges a signed offset and
//! wraps it back to zero once one full original pass has gone by, hiding the
//! seam.  Pausing (via the hover gate) freezes the offset but the marquee
//! keeps being ticked every frame — scheduling never stops.

use std::time::{Duration, Instant};

use crate::core::idle::HoverGate;

/// Scroll axis of a marquee pane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Axis {
    #[default]
    Vertical,
    Horizontal,
}

/// Travel direction along the axis.  `Forward` is up/left, i.e. content
/// translated toward negative offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MoveDirection {
    #[default]
    Forward,
    Backward,
}

impl MoveDirection {
    pub fn sign(self) -> f64 {
        match self {
            MoveDirection::Forward => -1.0,
            MoveDirection::Backward => 1.0,
        }
    }
}

/// Immutable per-marquee settings.  Never mutated after construction.
#[derive(Debug, Clone)]
pub struct LoopConfig {
    /// Rows (or columns) advanced per tick.
    pub speed: f64,
    pub axis: Axis,
    pub direction: MoveDirection,
    /// Total inter-item gap, split evenly around each item.
    pub gap: u16,
    /// How many times the original sequence is appended after itself.
    pub duplicate_times: usize,
    /// Quiet period before hover-pause releases.
    pub pause_delay: Duration,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            speed: 0.5,
            axis: Axis::Vertical,
            direction: MoveDirection::Forward,
            gap: 2,
            duplicate_times: 5,
            pause_delay: Duration::from_millis(2000),
        }
    }
}

/// A looping marquee over items of type `T`.
///
/// Owns the duplicated item sequence and all runtime state; mutated only by
/// its own `tick` and its own pointer notifications.
#[derive(Debug)]
pub struct LoopScroller<T> {
    config: LoopConfig,
    /// The original sequence followed by `duplicate_times` copies.
    items: Vec<T>,
    originals: usize,
    /// Scrollable length of the full duplicated sequence, gaps included.
    total_extent: f64,
    offset: f64,
    gate: HoverGate,
}

impl<T: Clone> LoopScroller<T> {
    /// Build a marquee from `originals`, measuring each item along the
    /// scroll axis with `measure` (rows for vertical, columns for
    /// horizontal).  An empty sequence yields an inert marquee.
    pub fn new(originals: Vec<T>, config: LoopConfig, measure: impl Fn(&T) -> f64) -> Self {
        if originals.is_empty() {
            tracing::warn!("marquee built over an empty item sequence; it will not animate");
        }

        let k = originals.len();
        let mut items = originals.clone();
        for _ in 0..config.duplicate_times {
            items.extend(originals.iter().cloned());
        }

        let gap = f64::from(config.gap);
        let total_extent = items.iter().map(|item| measure(item) + gap).sum();
        let gate = HoverGate::new(config.pause_delay);

        Self {
            config,
            items,
            originals: k,
            total_extent,
            offset: 0.0,
            gate,
        }
    }
}

impl<T> LoopScroller<T> {
    /// The duplicated item sequence (`K * (duplicate_times + 1)` entries).
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Original (pre-duplication) item count.
    pub fn original_count(&self) -> usize {
        self.originals
    }

    pub fn config(&self) -> &LoopConfig {
        &self.config
    }

    /// Current translation along the scroll axis.
    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn total_extent(&self) -> f64 {
        self.total_extent
    }

    /// Displacement at which one original pass has scrolled by and the
    /// offset must wrap.  Item extents are uniform across passes, so this
    /// equals the pre-duplication pass length exactly.
    pub fn loop_point(&self) -> f64 {
        self.total_extent / (self.config.duplicate_times as f64 + 1.0)
    }

    pub fn is_paused(&self) -> bool {
        self.gate.is_paused()
    }

    /// Pointer entered or moved over the pane.
    pub fn notice_pointer(&mut self, now: Instant) {
        self.gate.touch(now);
    }

    /// Pointer left the pane.
    pub fn pointer_left(&mut self) {
        self.gate.leave();
    }

    /// Advance one frame.  Called unconditionally every frame; a paused
    /// gate freezes the offset without stopping the ticking.
    pub fn tick(&mut self, now: Instant) {
        self.gate.poll(now);
        if self.gate.is_paused() || self.items.is_empty() {
            return;
        }

        self.offset += self.config.direction.sign() * self.config.speed;

        let loop_point = self.loop_point();
        let wrapped = match self.config.direction {
            MoveDirection::Forward => self.offset.abs() >= loop_point,
            MoveDirection::Backward => self.offset >= loop_point,
        };
        if wrapped {
            self.offset = 0.0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("item {i}")).collect()
    }

    fn vertical(config: LoopConfig, k: usize) -> LoopScroller<String> {
        LoopScroller::new(labels(k), config, |_| 1.0)
    }

    #[test]
    fn duplication_yields_k_times_n_plus_one_items() {
        let config = LoopConfig {
            duplicate_times: 5,
            ..Default::default()
        };
        let m = vertical(config, 4);
        assert_eq!(m.items().len(), 4 * 6);
        assert_eq!(m.original_count(), 4);
    }

    #[test]
    fn loop_point_is_one_original_pass() {
        let config = LoopConfig {
            gap: 2,
            duplicate_times: 5,
            ..Default::default()
        };
        let m = vertical(config, 4);
        // 4 items × (1 row + 2 gap) per pass.
        assert!((m.loop_point() - 12.0).abs() < 1e-9);
        assert!((m.total_extent() - 72.0).abs() < 1e-9);
    }

    #[test]
    fn forward_offset_wraps_to_exactly_zero() {
        let config = LoopConfig {
            speed: 5.0,
            gap: 2,
            duplicate_times: 5,
            ..Default::default()
        };
        let mut m = vertical(config, 4);
        let loop_point = m.loop_point();
        let now = Instant::now();

        for _ in 0..100 {
            m.tick(now);
            // Never left beyond the loop point, and a wrap lands on 0.
            assert!(m.offset().abs() < loop_point);
            assert!(m.offset() <= 0.0);
        }
    }

    #[test]
    fn backward_offset_wraps_to_exactly_zero() {
        let config = LoopConfig {
            speed: 5.0,
            gap: 2,
            duplicate_times: 5,
            direction: MoveDirection::Backward,
            ..Default::default()
        };
        let mut m = vertical(config, 4);
        let loop_point = m.loop_point();
        let now = Instant::now();

        for _ in 0..100 {
            m.tick(now);
            assert!(m.offset() < loop_point);
            assert!(m.offset() >= 0.0);
        }
    }

    #[test]
    fn wrap_happens_within_one_speed_increment_of_the_bound() {
        let config = LoopConfig {
            speed: 0.7,
            gap: 0,
            duplicate_times: 2,
            ..Default::default()
        };
        let mut m = vertical(config, 3);
        let loop_point = m.loop_point();
        let now = Instant::now();
        let mut prev = m.offset();

        for _ in 0..50 {
            m.tick(now);
            if m.offset() == 0.0 && prev != 0.0 {
                // The offset that triggered the wrap overshot by < speed.
                assert!(prev.abs() + 0.7 >= loop_point);
            }
            prev = m.offset();
        }
    }

    #[test]
    fn pointer_activity_freezes_the_offset() {
        let mut m = vertical(LoopConfig::default(), 4);
        let t0 = Instant::now();

        m.tick(t0);
        let before = m.offset();
        m.notice_pointer(t0);
        for ms in [100u64, 500, 1500, 1999] {
            m.tick(t0 + Duration::from_millis(ms));
            assert_eq!(m.offset(), before);
        }

        // Quiet period over — the next tick advances again.
        m.tick(t0 + Duration::from_millis(2000));
        assert!(m.offset() != before);
    }

    #[test]
    fn continuous_activity_keeps_it_frozen() {
        let mut m = vertical(LoopConfig::default(), 4);
        let t0 = Instant::now();
        m.tick(t0);
        let before = m.offset();

        for ms in (0..5000u64).step_by(500) {
            m.notice_pointer(t0 + Duration::from_millis(ms));
            m.tick(t0 + Duration::from_millis(ms + 1));
            assert_eq!(m.offset(), before);
        }
    }

    #[test]
    fn pointer_leave_resumes_immediately() {
        let mut m = vertical(LoopConfig::default(), 4);
        let t0 = Instant::now();
        m.notice_pointer(t0);
        m.tick(t0);
        assert!(m.is_paused());

        m.pointer_left();
        m.tick(t0 + Duration::from_millis(1));
        assert!(!m.is_paused());
        assert!(m.offset() != 0.0);
    }

    #[test]
    fn empty_marquee_is_inert() {
        let mut m: LoopScroller<String> = LoopScroller::new(vec![], LoopConfig::default(), |_| 1.0);
        let now = Instant::now();
        for _ in 0..10 {
            m.tick(now);
        }
        assert_eq!(m.offset(), 0.0);
        assert_eq!(m.items().len(), 0);
    }
}
