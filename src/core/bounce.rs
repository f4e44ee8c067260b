//! Bouncing native-scroll controller.
//!
//! Drives one or more scroll surfaces' positions up and down between the
//! content boundaries, reversing direction at each end.  Unlike the marquee,
//! pausing an instance cancels its pending tick handle — no ticks run while
//! paused — and resuming re-arms scheduling only from the paused state.

use std::time::{Duration, Instant};

use crate::core::frame::{FrameScheduler, TickHandle};

/// A scrollable viewport the controller can animate.
///
/// Extents are in the same units as `speed` (terminal rows here, but the
/// controller never assumes so).
pub trait ScrollSurface {
    /// Full scrollable length of the content.
    fn content_extent(&self) -> f64;
    /// Visible length of the viewport.
    fn viewport_extent(&self) -> f64;
    fn position(&self) -> f64;
    fn set_position(&mut self, position: f64);
}

/// Initial travel sense.  `Forward` moves toward the bottom bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BounceDirection {
    #[default]
    Forward,
    Backward,
}

impl BounceDirection {
    pub fn sign(self) -> f64 {
        match self {
            BounceDirection::Forward => 1.0,
            BounceDirection::Backward => -1.0,
        }
    }
}

/// Immutable controller settings, shared by every instance it manages.
#[derive(Debug, Clone)]
pub struct BounceOptions {
    /// Distance advanced per tick.
    pub speed: f64,
    pub direction: BounceDirection,
    /// Delay before the first start_all after arming.
    pub start_delay: Duration,
    /// Hovering the animated pane itself pauses it.
    pub pause_on_hover: bool,
    /// Hovering the pane's enclosing region pauses it too.
    pub pause_on_parent_hover: bool,
    /// Suppress the scrollbar next to the animated pane.
    pub hide_scrollbar: bool,
    /// Names of additional panes whose hover also pauses the controller.
    pub extra_hover_targets: Vec<String>,
}

impl Default for BounceOptions {
    fn default() -> Self {
        Self {
            speed: 1.0,
            direction: BounceDirection::Forward,
            start_delay: Duration::from_millis(1000),
            pause_on_hover: true,
            pause_on_parent_hover: false,
            hide_scrollbar: true,
            extra_hover_targets: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RunState {
    Running,
    Paused,
}

#[derive(Debug)]
struct BounceInstance<S> {
    surface: S,
    /// Current travel sign: +1.0 toward the bottom bound, -1.0 toward 0.
    direction: f64,
    state: RunState,
    slot: usize,
    /// The single outstanding tick handle.  `None` while paused.
    handle: Option<TickHandle>,
}

/// Controller over zero or more bouncing scroll instances.
#[derive(Debug)]
pub struct BounceController<S: ScrollSurface> {
    opts: BounceOptions,
    /// Live speed — `update_speed` replaces it and the very next tick uses
    /// the new value.
    speed: f64,
    instances: Vec<BounceInstance<S>>,
    start_at: Option<Instant>,
    destroyed: bool,
    /// Hover route ids adopted from the router, removed by identity on
    /// destroy.
    hover_routes: Vec<u64>,
}

impl<S: ScrollSurface> BounceController<S> {
    pub fn new(opts: BounceOptions) -> Self {
        let speed = opts.speed;
        Self {
            opts,
            speed,
            instances: Vec::new(),
            start_at: None,
            destroyed: false,
            hover_routes: Vec::new(),
        }
    }

    /// Register one more surface with this controller.  The instance starts
    /// paused; `arm`/`start_all` bring it to life.
    pub fn add_target(&mut self, surface: S, sched: &mut FrameScheduler) -> usize {
        let slot = sched.register();
        self.instances.push(BounceInstance {
            surface,
            direction: self.opts.direction.sign(),
            state: RunState::Paused,
            slot,
            handle: None,
        });
        self.instances.len() - 1
    }

    /// Schedule the initial start after the configured delay.  A controller
    /// with no targets logs a warning and stays inert.
    pub fn arm(&mut self, now: Instant) {
        if self.instances.is_empty() {
            tracing::warn!("bounce controller armed with no scroll targets; it will stay inert");
            return;
        }
        self.start_at = Some(now + self.opts.start_delay);
    }

    pub fn start(&mut self, index: usize, sched: &mut FrameScheduler) {
        if self.destroyed {
            return;
        }
        if let Some(inst) = self.instances.get_mut(index) {
            if inst.state != RunState::Running {
                inst.state = RunState::Running;
                inst.handle = Some(sched.schedule(inst.slot));
            }
        }
    }

    /// Cancel the pending tick and freeze the instance.  The cancelled
    /// handle is exactly the outstanding one, so no stale tick can fire.
    pub fn pause(&mut self, index: usize, sched: &mut FrameScheduler) {
        if let Some(inst) = self.instances.get_mut(index) {
            if inst.state == RunState::Running {
                if let Some(handle) = inst.handle.take() {
                    sched.cancel(handle);
                }
                inst.state = RunState::Paused;
            }
        }
    }

    /// Restart scheduling, but only from the paused state — resuming a
    /// running instance is a no-op.
    pub fn resume(&mut self, index: usize, sched: &mut FrameScheduler) {
        if self.destroyed {
            return;
        }
        if let Some(inst) = self.instances.get_mut(index) {
            if inst.state == RunState::Paused {
                inst.state = RunState::Running;
                inst.handle = Some(sched.schedule(inst.slot));
            }
        }
    }

    pub fn start_all(&mut self, sched: &mut FrameScheduler) {
        for i in 0..self.instances.len() {
            self.start(i, sched);
        }
    }

    pub fn pause_all(&mut self, sched: &mut FrameScheduler) {
        for i in 0..self.instances.len() {
            self.pause(i, sched);
        }
    }

    pub fn resume_all(&mut self, sched: &mut FrameScheduler) {
        for i in 0..self.instances.len() {
            self.resume(i, sched);
        }
    }

    /// Replace the per-tick increment for all instances.  Takes effect on
    /// the very next tick, never retroactively.
    pub fn update_speed(&mut self, speed: f64) {
        self.speed = speed;
    }

    /// Cancel every pending tick, discard every instance record, and hand
    /// back the adopted hover route ids so the caller can deregister them
    /// by identity.
    pub fn destroy(&mut self, sched: &mut FrameScheduler) -> Vec<u64> {
        for inst in &mut self.instances {
            if let Some(handle) = inst.handle.take() {
                sched.cancel(handle);
            }
        }
        self.instances.clear();
        self.destroyed = true;
        tracing::debug!("bounce controller destroyed");
        std::mem::take(&mut self.hover_routes)
    }

    /// Advance every due instance by one frame and re-arm its handle.
    /// Instances whose handle was cancelled (paused) are skipped entirely.
    pub fn tick_all(&mut self, now: Instant, sched: &mut FrameScheduler) {
        if self.destroyed {
            return;
        }

        if let Some(at) = self.start_at {
            if now >= at {
                self.start_at = None;
                self.start_all(sched);
                tracing::debug!("bounce controller started after delay");
            }
        }

        let speed = self.speed;
        for inst in &mut self.instances {
            let Some(handle) = inst.handle else {
                continue;
            };
            if sched.fire(handle) {
                step(inst, speed);
                inst.handle = Some(sched.schedule(inst.slot));
            } else {
                // A fired-or-cancelled handle we still hold is stale.
                inst.handle = None;
            }
        }
    }

    /// Track a hover route registered on this controller's behalf.
    pub fn adopt_hover_route(&mut self, route_id: u64) {
        self.hover_routes.push(route_id);
    }

    pub fn options(&self) -> &BounceOptions {
        &self.opts
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    pub fn is_running(&self, index: usize) -> bool {
        self.instances
            .get(index)
            .is_some_and(|inst| inst.state == RunState::Running)
    }

    pub fn position(&self, index: usize) -> Option<f64> {
        self.instances.get(index).map(|inst| inst.surface.position())
    }

    pub fn direction_sign(&self, index: usize) -> Option<f64> {
        self.instances.get(index).map(|inst| inst.direction)
    }

    pub fn surface_mut(&mut self, index: usize) -> Option<&mut S> {
        self.instances.get_mut(index).map(|inst| &mut inst.surface)
    }
}

/// One frame of bouncing motion.  Content that does not overflow the
/// viewport is a legitimate steady state — the tick is a no-op.
fn step<S: ScrollSurface>(inst: &mut BounceInstance<S>, speed: f64) {
    let max_scroll = inst.surface.content_extent() - inst.surface.viewport_extent();
    if max_scroll <= 0.0 {
        return;
    }

    let mut position = inst.surface.position() + inst.direction * speed;
    if position >= max_scroll {
        position = max_scroll;
        inst.direction = -1.0;
    } else if position <= 0.0 {
        position = 0.0;
        inst.direction = 1.0;
    }
    inst.surface.set_position(position);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct FakeSurface {
        content: f64,
        viewport: f64,
        position: f64,
    }

    impl FakeSurface {
        fn new(content: f64, viewport: f64) -> Self {
            Self {
                content,
                viewport,
                position: 0.0,
            }
        }
    }

    impl ScrollSurface for FakeSurface {
        fn content_extent(&self) -> f64 {
            self.content
        }
        fn viewport_extent(&self) -> f64 {
            self.viewport
        }
        fn position(&self) -> f64 {
            self.position
        }
        fn set_position(&mut self, position: f64) {
            self.position = position;
        }
    }

    fn controller(opts: BounceOptions) -> (BounceController<FakeSurface>, FrameScheduler) {
        let mut sched = FrameScheduler::new();
        let mut ctl = BounceController::new(opts);
        ctl.add_target(FakeSurface::new(1000.0, 400.0), &mut sched);
        ctl.start_all(&mut sched);
        (ctl, sched)
    }

    fn immediate() -> BounceOptions {
        BounceOptions {
            speed: 3.0,
            start_delay: Duration::ZERO,
            ..Default::default()
        }
    }

    #[test]
    fn direction_flips_exactly_at_the_bounds() {
        let (mut ctl, mut sched) = controller(immediate());
        let now = Instant::now();

        // Pause, drag to 700 (past the 600 bottom bound), resume.
        ctl.pause(0, &mut sched);
        ctl.surface_mut(0).unwrap().set_position(700.0);
        ctl.resume(0, &mut sched);

        ctl.tick_all(now, &mut sched);
        assert_eq!(ctl.position(0), Some(600.0));
        assert_eq!(ctl.direction_sign(0), Some(-1.0));

        // Walk back up; the flip to +1 happens exactly at position 0.
        for _ in 0..200 {
            ctl.tick_all(now, &mut sched);
            if ctl.position(0) == Some(0.0) {
                break;
            }
            assert_eq!(ctl.direction_sign(0), Some(-1.0));
        }
        assert_eq!(ctl.position(0), Some(0.0));
        assert_eq!(ctl.direction_sign(0), Some(1.0));
    }

    #[test]
    fn pause_then_resume_has_zero_net_position_change() {
        let (mut ctl, mut sched) = controller(immediate());
        let before = ctl.position(0);

        ctl.pause(0, &mut sched);
        ctl.resume(0, &mut sched);

        assert!(ctl.is_running(0));
        assert_eq!(ctl.position(0), before);
    }

    #[test]
    fn no_ticks_while_paused() {
        let (mut ctl, mut sched) = controller(immediate());
        let now = Instant::now();
        ctl.tick_all(now, &mut sched);
        let frozen = ctl.position(0);

        ctl.pause(0, &mut sched);
        for _ in 0..10 {
            ctl.tick_all(now, &mut sched);
        }
        assert_eq!(ctl.position(0), frozen);
    }

    #[test]
    fn resume_is_idempotent_and_never_double_speeds() {
        let (mut ctl, mut sched) = controller(immediate());
        let now = Instant::now();

        ctl.resume(0, &mut sched); // already running — no-op
        ctl.pause(0, &mut sched);
        ctl.resume(0, &mut sched);
        ctl.resume(0, &mut sched);

        let before = ctl.position(0).unwrap();
        ctl.tick_all(now, &mut sched);
        // Exactly one speed increment, not two.
        assert_eq!(ctl.position(0), Some(before + 3.0));
        assert_eq!(sched.pending_count(), 1);
    }

    #[test]
    fn update_speed_applies_on_the_next_tick() {
        let (mut ctl, mut sched) = controller(immediate());
        let now = Instant::now();
        ctl.tick_all(now, &mut sched);
        let after_first = ctl.position(0).unwrap();

        ctl.update_speed(5.0);
        ctl.tick_all(now, &mut sched);
        assert_eq!(ctl.position(0), Some(after_first + 5.0));
    }

    #[test]
    fn destroy_leaves_zero_scheduled_ticks() {
        let (mut ctl, mut sched) = controller(immediate());
        let now = Instant::now();
        ctl.adopt_hover_route(7);
        ctl.adopt_hover_route(9);

        let routes = ctl.destroy(&mut sched);
        assert_eq!(routes, vec![7, 9]);
        assert_eq!(sched.pending_count(), 0);
        assert!(ctl.is_destroyed());

        // Any number of later frames change nothing.
        for _ in 0..10 {
            ctl.tick_all(now, &mut sched);
        }
        assert_eq!(sched.pending_count(), 0);
        assert_eq!(ctl.len(), 0);
    }

    #[test]
    fn non_overflowing_content_is_a_steady_state() {
        let mut sched = FrameScheduler::new();
        let mut ctl = BounceController::new(immediate());
        ctl.add_target(FakeSurface::new(100.0, 400.0), &mut sched);
        ctl.start_all(&mut sched);
        let now = Instant::now();

        for _ in 0..10 {
            ctl.tick_all(now, &mut sched);
        }
        // No motion, but the instance keeps rescheduling.
        assert_eq!(ctl.position(0), Some(0.0));
        assert!(ctl.is_running(0));
        assert_eq!(sched.pending_count(), 1);
    }

    #[test]
    fn start_delay_gates_the_first_motion() {
        let mut sched = FrameScheduler::new();
        let mut ctl = BounceController::new(BounceOptions {
            speed: 3.0,
            start_delay: Duration::from_millis(500),
            ..Default::default()
        });
        ctl.add_target(FakeSurface::new(1000.0, 400.0), &mut sched);
        let t0 = Instant::now();
        ctl.arm(t0);

        ctl.tick_all(t0 + Duration::from_millis(100), &mut sched);
        assert_eq!(ctl.position(0), Some(0.0));
        assert!(!ctl.is_running(0));

        ctl.tick_all(t0 + Duration::from_millis(600), &mut sched);
        assert!(ctl.is_running(0));
        assert_eq!(ctl.position(0), Some(3.0));
    }

    #[test]
    fn arming_an_empty_controller_is_inert() {
        let mut sched = FrameScheduler::new();
        let mut ctl: BounceController<FakeSurface> = BounceController::new(immediate());
        ctl.arm(Instant::now());

        ctl.tick_all(Instant::now(), &mut sched);
        assert_eq!(ctl.len(), 0);
        assert_eq!(sched.pending_count(), 0);
    }
}
