//! Ring controller
//!
//! Owns every piece of ring state and wires the gesture recognizer, the
//! angular and radius dynamics and the layout pass together. The host feeds
//! input events as they arrive and calls [`RingController::tick`] once per
//! displayed frame with a monotonic timestamp in milliseconds.
//!
//! Per tick: snap force, integration, snap settle, radius spring, layout,
//! then active-index publication.

use crate::config::{RingConfig, RingConfigPatch};
use crate::haptics::{HapticPulse, HapticSink, NoHaptics};
use crate::observer::{ObserverId, ObserverList};
use crate::snapshot::{MotionPhase, RingSnapshot};
use ring_gesture::{
    GestureEvent, GesturePhase, GestureRecognizer, GestureSettings, NoCapture, PointerCapture,
    PointerId, PointerSample,
};
use ring_layout::{active_index, layout_ring, ActiveIndexTracker, IndexChange, ItemTransform};
use ring_physics::{
    elastic_target, grid_offset, nearest_grid, rotation_for_index, sign, AngularInputs, AngularMode,
    AngularState, DragMetrics, RadiusSpring, Release, SnapInputs, SnapPhase, SnapState,
};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Discrete navigation keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RingKey {
    Prev,
    Next,
    Home,
    End,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown ring key `{0}`")]
pub struct UnknownKey(pub String);

impl FromStr for RingKey {
    type Err = UnknownKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "prev" | "previous" | "left" | "arrowleft" => Ok(Self::Prev),
            "next" | "right" | "arrowright" => Ok(Self::Next),
            "home" => Ok(Self::Home),
            "end" => Ok(Self::End),
            _ => Err(UnknownKey(s.to_string())),
        }
    }
}

/// A single interactive ring
pub struct RingController {
    config: RingConfig,
    step: f64,
    base_radius: f64,

    angular: AngularState,
    radius: RadiusSpring,
    gesture: GestureRecognizer,
    drag: DragMetrics,
    snap: SnapState,

    tracker: ActiveIndexTracker,
    observers: ObserverList,
    items: Vec<ItemTransform>,
    phase: MotionPhase,

    driven_progress: Option<f64>,
    reduced_motion: bool,
    last_tick_ms: Option<f64>,
    /// Latest finite timestamp seen on any event or tick
    clock_ms: f64,
    last_discrete_ms: Option<f64>,
    destroyed: bool,

    capture: Box<dyn PointerCapture>,
    haptics: Box<dyn HapticSink>,
}

fn gesture_settings(config: &RingConfig) -> GestureSettings {
    GestureSettings {
        threshold: config.gesture_threshold,
        horizontal_bias: config.horizontal_bias,
        drag_sensitivity: config.drag_sensitivity,
        step_deg: config.step_deg(),
    }
}

impl RingController {
    pub fn new(config: RingConfig) -> Self {
        let config = config.sanitized();
        let step = config.step_deg();
        let base_radius = config.effective_base_radius();
        let gesture = GestureRecognizer::new(gesture_settings(&config), config.feel.drag);

        let mut ring = Self {
            step,
            base_radius,
            angular: AngularState::default(),
            radius: RadiusSpring::new(base_radius),
            gesture,
            drag: DragMetrics::new(),
            snap: SnapState::new(),
            tracker: ActiveIndexTracker::new(0),
            observers: ObserverList::new(),
            items: Vec::with_capacity(config.item_count()),
            phase: MotionPhase::Idle,
            driven_progress: None,
            reduced_motion: false,
            last_tick_ms: None,
            clock_ms: 0.0,
            last_discrete_ms: None,
            destroyed: false,
            capture: Box::new(NoCapture),
            haptics: Box::new(NoHaptics),
            config,
        };
        ring.relayout();

        log::debug!(
            "ring created: {} items, step {:.2}°, radius {:.1}",
            ring.config.item_count(),
            step,
            base_radius
        );
        ring
    }

    /// Use a host pointer-capture hook
    pub fn with_capture(mut self, capture: impl PointerCapture + 'static) -> Self {
        self.capture = Box::new(capture);
        self
    }

    /// Use a host haptics hook
    pub fn with_haptics(mut self, haptics: impl HapticSink + 'static) -> Self {
        self.haptics = Box::new(haptics);
        self
    }

    /// Apply a partial configuration update
    ///
    /// Geometry is recomputed right away; the radius spring animates from its
    /// current value toward the new base.
    pub fn update_config(&mut self, patch: RingConfigPatch) {
        if self.destroyed {
            return;
        }

        let mut config = self.config.clone();
        config.apply(&patch);
        self.config = config.sanitized();
        self.step = self.config.step_deg();
        self.base_radius = self.config.effective_base_radius();
        self.gesture
            .configure(gesture_settings(&self.config), self.config.feel.drag);

        if patch.item_count.is_some() {
            // Explicit targets from the old grid no longer line up
            if let Some(target) = self.snap.target {
                self.snap.target = Some(nearest_grid(target, self.step));
            }
        }
        if patch.scroll_rotations.is_some() {
            self.apply_driven_target();
        }
        if patch.touches_geometry() {
            self.relayout();
        }

        log::debug!(
            "config updated: {} items, step {:.2}°, base radius {:.1}",
            self.config.item_count(),
            self.step,
            self.base_radius
        );
    }

    pub fn on_pointer_down(&mut self, sample: PointerSample) {
        if self.destroyed {
            return;
        }
        self.event_time(sample.timestamp_ms);
        if let Some(GestureEvent::Pending { pointer_id }) = self.gesture.on_down(&sample) {
            log::trace!("pointer {pointer_id:?} pressed");
            self.drag.reset();
        }
    }

    pub fn on_pointer_move(&mut self, sample: PointerSample) {
        if self.destroyed {
            return;
        }
        self.event_time(sample.timestamp_ms);

        match self.gesture.on_move(&sample) {
            Some(GestureEvent::Rotate(step)) => {
                if step.committed {
                    self.begin_drag(sample.pointer_id);
                }
                self.drag
                    .record(step.velocity, step.dt, self.step, &self.config.feel.release);
                self.angular.apply_drag(step.delta_deg, step.smoothed_velocity);
            }
            Some(GestureEvent::Rejected { pointer_id }) => {
                log::trace!("pointer {pointer_id:?} handed back to the host");
            }
            _ => {}
        }
    }

    pub fn on_pointer_up(&mut self, sample: PointerSample) {
        if self.destroyed {
            return;
        }
        let now = self.event_time(sample.timestamp_ms);
        let event = self.gesture.on_up(&sample);
        self.end_gesture(event, now);
    }

    pub fn on_pointer_cancel(&mut self, sample: PointerSample) {
        if self.destroyed {
            return;
        }
        let now = self.event_time(sample.timestamp_ms);
        let event = self.gesture.on_cancel(&sample);
        self.end_gesture(event, now);
    }

    /// The pointer left the ring's hit area
    pub fn on_pointer_leave(&mut self, sample: PointerSample, buttons_down: bool) {
        if self.destroyed {
            return;
        }
        let now = self.event_time(sample.timestamp_ms);
        let event = self.gesture.on_leave(&sample, buttons_down);
        self.end_gesture(event, now);
    }

    /// One wheel notch; positive `delta_y` moves to the next item
    pub fn on_wheel(&mut self, delta_y: f64, timestamp_ms: f64) {
        if self.destroyed || !delta_y.is_finite() || delta_y == 0.0 {
            return;
        }
        let now = self.event_time(timestamp_ms);
        self.page(sign(delta_y), now);
    }

    pub fn on_key(&mut self, key: RingKey) {
        if self.destroyed {
            return;
        }
        let now = self.clock_ms;
        match key {
            RingKey::Prev => self.page(-1.0, now),
            RingKey::Next => self.page(1.0, now),
            RingKey::Home => self.go_to(0),
            RingKey::End => self.go_to(self.config.item_count() - 1),
        }
    }

    /// Snap to `index` along the shortest path
    pub fn go_to(&mut self, index: usize) {
        if self.destroyed || !self.accepts_discrete_input() {
            return;
        }

        let count = self.config.item_count();
        let target = rotation_for_index(index % count, count, self.angular.rotation_deg);
        let diff = target - self.angular.rotation_deg;
        let cap = self.config.feel.release.max_release_velocity;
        self.snap.set_target(target, self.clock_ms);
        self.angular.angular_velocity = (diff * self.coast_rate()).clamp(-cap, cap);

        log::trace!("go to item {} (target {target:.2}°)", index % count);
    }

    /// Follow host scroll progress; `None` hands the ring back to the user
    pub fn set_external_driven_progress(&mut self, progress: Option<f64>) {
        if self.destroyed {
            return;
        }
        match progress {
            Some(p) if !p.is_finite() => {
                log::warn!("ignoring non-finite scroll progress");
            }
            Some(p) => {
                if self.driven_progress.is_none() {
                    log::debug!("ring driven by host progress");
                    self.snap.clear();
                }
                self.driven_progress = Some(p);
                self.apply_driven_target();
            }
            None => {
                if self.driven_progress.take().is_some() {
                    log::debug!("ring released from host progress");
                }
                self.angular.desired_rotation_deg = None;
            }
        }
    }

    pub fn set_reduced_motion(&mut self, reduced: bool) {
        self.reduced_motion = reduced;
    }

    /// Advance the ring to `now_ms` and return its state
    pub fn tick(&mut self, now_ms: f64) -> RingSnapshot {
        if self.destroyed {
            return self.snapshot();
        }

        let dt = self.frame_dt(now_ms);
        let now = self.clock_ms;
        let feel = self.config.feel;
        let dragging = self.gesture.is_rotating();
        let driven = self.angular.desired_rotation_deg.is_some() && !dragging;
        let snapping = !dragging && !driven;

        let snap_inputs = SnapInputs {
            step_deg: self.step,
            snap_enabled: self.config.snap_enabled,
            velocity_threshold: self.config.snap_velocity_threshold,
            snap_strength: self.config.snap_strength,
            now_ms: now,
        };
        let mut snap_phase = SnapPhase::Disabled;
        if snapping {
            snap_phase = self
                .snap
                .apply_force(&mut self.angular, dt, &snap_inputs, &feel.snap);
        }

        let angular_inputs = AngularInputs {
            dragging,
            inertia: self.config.inertia,
            friction: self.config.friction,
            reduced_motion: self.reduced_motion,
        };
        let mode = self.angular.integrate(dt, &angular_inputs, &feel.motion);

        if snapping {
            let settled = self.snap.try_settle(&mut self.angular, &snap_inputs, &feel.snap);
            if let Some(target) = settled {
                log::debug!("snapped to {target:.2}°");
                snap_phase = SnapPhase::Idle;
                self.haptics.pulse(HapticPulse::Settle);
            }
        }

        self.radius.target = elastic_target(
            self.base_radius,
            self.angular.angular_velocity,
            self.config.radius_elasticity,
            self.config.radius_vel_influence,
            self.reduced_motion,
        );
        self.radius
            .step(dt, self.config.spring_stiffness, self.config.spring_damping);

        self.phase = match mode {
            AngularMode::Held => MotionPhase::Dragging,
            AngularMode::Driven => MotionPhase::Driven,
            AngularMode::Free => match snap_phase {
                SnapPhase::Pulling | SnapPhase::Debouncing => MotionPhase::Snapping,
                _ if self.angular.angular_velocity != 0.0 => MotionPhase::Coasting,
                _ => MotionPhase::Idle,
            },
        };

        self.relayout();
        let change = self.publish_index();
        self.build_snapshot(change)
    }

    /// Current state without advancing time
    pub fn snapshot(&self) -> RingSnapshot {
        self.build_snapshot(None)
    }

    /// Subscribe to active-index changes
    pub fn on_active_index_change(
        &mut self,
        handler: impl FnMut(IndexChange) + 'static,
    ) -> ObserverId {
        self.observers.subscribe(handler)
    }

    /// Returns false when `id` was not subscribed
    pub fn off(&mut self, id: ObserverId) -> bool {
        self.observers.unsubscribe(id)
    }

    /// Release the pointer, drop observers and stop responding to input
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        if self.gesture.is_rotating() {
            if let Some(pointer) = self.gesture.pointer_id() {
                self.release_capture(pointer);
            }
        }
        self.gesture.reset();
        self.drag.reset();
        self.snap.clear();
        self.observers.clear();
        self.angular.angular_velocity = 0.0;
        self.angular.desired_rotation_deg = None;
        self.driven_progress = None;
        self.phase = MotionPhase::Idle;
        self.destroyed = true;
        log::debug!("ring destroyed");
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    pub fn rotation_deg(&self) -> f64 {
        self.angular.rotation_deg
    }

    pub fn angular_velocity(&self) -> f64 {
        self.angular.angular_velocity
    }

    /// Current dynamic radius
    pub fn radius(&self) -> f64 {
        self.radius.current
    }

    pub fn active_index(&self) -> usize {
        active_index(self.angular.rotation_deg, self.config.item_count())
    }

    pub fn step_deg(&self) -> f64 {
        self.step
    }

    /// Base radius after auto-spacing
    pub fn effective_base_radius(&self) -> f64 {
        self.base_radius
    }

    pub fn config(&self) -> &RingConfig {
        &self.config
    }

    pub fn items(&self) -> &[ItemTransform] {
        &self.items
    }

    pub fn is_dragging(&self) -> bool {
        self.gesture.is_rotating()
    }

    pub fn gesture_phase(&self) -> GesturePhase {
        self.gesture.phase()
    }

    pub fn reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    /// Angle the pending snap is heading for, if a snap is pending
    pub fn snap_target(&self) -> Option<f64> {
        self.snap
            .pending
            .then(|| self.snap.anchor(self.angular.rotation_deg, self.step))
    }

    fn begin_drag(&mut self, pointer: PointerId) {
        self.snap.clear();
        self.last_discrete_ms = None;
        if let Err(err) = self.capture.capture(pointer) {
            log::debug!("pointer capture unavailable: {err}");
        }
    }

    fn release_capture(&mut self, pointer: PointerId) {
        if let Err(err) = self.capture.release(pointer) {
            log::debug!("pointer release failed: {err}");
        }
    }

    fn end_gesture(&mut self, event: Option<GestureEvent>, now_ms: f64) {
        let Some(GestureEvent::Released {
            pointer_id,
            smoothed_velocity,
            cancelled,
            ..
        }) = event
        else {
            return;
        };

        self.release_capture(pointer_id);
        let release = if self.config.inertia {
            self.drag.release_velocity(
                smoothed_velocity,
                grid_offset(self.angular.rotation_deg, self.step),
                self.step,
                &self.config.feel.release,
            )
        } else {
            Release::Stop
        };

        match release {
            Release::Coast(velocity) => {
                self.angular.angular_velocity = velocity;
                self.snap
                    .schedule_after_release(now_ms, &self.config.feel.snap);
            }
            Release::Stop => {
                self.angular.angular_velocity = 0.0;
                self.snap.schedule_immediate(now_ms);
            }
        }
        self.drag.reset();

        log::debug!(
            "drag {} at {:.2}° with {:.1}°/s",
            if cancelled { "cancelled" } else { "released" },
            self.angular.rotation_deg,
            self.angular.angular_velocity
        );
    }

    fn accepts_discrete_input(&self) -> bool {
        !self.gesture.is_rotating() && self.driven_progress.is_none()
    }

    /// Velocity per degree of distance that lets the ring coast onto a target
    fn coast_rate(&self) -> f64 {
        let friction = if self.config.inertia { self.config.friction } else { 0.0 };
        self.config.feel.snap.damping_base + friction
    }

    /// Advance the explicit target one step; `direction` > 0 is the next item
    fn page(&mut self, direction: f64, now_ms: f64) {
        if !self.accepts_discrete_input() {
            log::trace!("discrete input ignored while dragging or driven");
            return;
        }

        let feel = self.config.feel.snap;
        let anchor = self.snap.anchor(self.angular.rotation_deg, self.step);
        let target = nearest_grid(anchor - direction * self.step, self.step);
        self.snap.set_target(target, now_ms);

        let recency = match self.last_discrete_ms {
            Some(last) if feel.discrete_recency_ms > 0.0 => {
                (1.0 - (now_ms - last) / feel.discrete_recency_ms).clamp(0.0, 1.0)
            }
            _ => 0.0,
        };
        let boost = 1.0 + (feel.discrete_max_boost - 1.0).max(0.0) * recency;
        let impulse = -direction * self.step * feel.discrete_impulse_steps * boost;
        let cap = self.config.feel.release.max_release_velocity;
        let velocity = (self.angular.angular_velocity + impulse).clamp(-cap, cap);
        self.angular.angular_velocity = velocity;
        self.last_discrete_ms = Some(now_ms);

        log::trace!("paged to {target:.2}° (boost {boost:.2}, {velocity:.1}°/s)");
    }

    fn apply_driven_target(&mut self) {
        self.angular.desired_rotation_deg = self
            .driven_progress
            .map(|p| -p * 360.0 * self.config.scroll_rotations);
    }

    /// Frame step in seconds, clamped; the first tick uses the minimum step
    fn frame_dt(&mut self, now_ms: f64) -> f64 {
        let motion = self.config.feel.motion;
        if !now_ms.is_finite() {
            log::warn!("non-finite tick timestamp, using minimum frame step");
            return motion.min_dt();
        }

        let elapsed = match self.last_tick_ms {
            Some(last) => (now_ms - last) / 1000.0,
            None => motion.min_dt(),
        };
        self.last_tick_ms = Some(self.last_tick_ms.map_or(now_ms, |last| last.max(now_ms)));
        self.event_time(now_ms);
        motion.clamp_dt(elapsed)
    }

    /// Timestamp to attribute to an event, advancing the clock
    fn event_time(&mut self, timestamp_ms: f64) -> f64 {
        if timestamp_ms.is_finite() {
            self.clock_ms = self.clock_ms.max(timestamp_ms);
            timestamp_ms
        } else {
            log::warn!("non-finite event timestamp, using {:.1} ms", self.clock_ms);
            self.clock_ms
        }
    }

    fn relayout(&mut self) {
        layout_ring(
            &mut self.items,
            self.config.item_count(),
            self.angular.rotation_deg,
            self.radius.current,
            self.config.orientation,
        );
    }

    fn publish_index(&mut self) -> Option<IndexChange> {
        let change = self.tracker.observe(self.active_index())?;
        log::debug!("active item {} -> {}", change.previous, change.current);
        self.haptics.pulse(HapticPulse::Detent);
        self.observers.notify(change);
        Some(change)
    }

    fn build_snapshot(&self, index_change: Option<IndexChange>) -> RingSnapshot {
        RingSnapshot {
            rotation_deg: self.angular.rotation_deg,
            angular_velocity: self.angular.angular_velocity,
            radius: self.radius.current,
            active_index: self.active_index(),
            index_change,
            phase: self.phase,
            snap_pending: self.snap.pending,
            items: self.items.clone(),
        }
    }
}

impl Default for RingController {
    fn default() -> Self {
        Self::new(RingConfig::default())
    }
}

impl fmt::Debug for RingController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RingController")
            .field("rotation_deg", &self.angular.rotation_deg)
            .field("angular_velocity", &self.angular.angular_velocity)
            .field("radius", &self.radius.current)
            .field("phase", &self.phase)
            .field("gesture", &self.gesture.phase())
            .field("snap", &self.snap)
            .field("observers", &self.observers)
            .field("destroyed", &self.destroyed)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ring_gesture::CaptureError;
    use ring_physics::{FeelParams, MotionFeel};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn sample(x: f32, y: f32, t: f64) -> PointerSample {
        PointerSample::new(1, x, y, t)
    }

    /// Tick at 60 Hz from `start_ms` until the ring is at rest
    fn settle(ring: &mut RingController, start_ms: f64, frames: usize) -> RingSnapshot {
        let mut snapshot = ring.snapshot();
        for frame in 1..=frames {
            snapshot = ring.tick(start_ms + frame as f64 * 16.0);
            if snapshot.is_at_rest() {
                return snapshot;
            }
        }
        panic!("ring did not come to rest: {snapshot:?}");
    }

    fn flick(ring: &mut RingController) {
        ring.on_pointer_down(sample(400.0, 300.0, 0.0));
        ring.on_pointer_move(sample(430.0, 301.0, 25.0));
        ring.on_pointer_move(sample(460.0, 302.0, 50.0));
        ring.on_pointer_up(sample(460.0, 302.0, 50.0));
    }

    #[derive(Clone)]
    struct Recorder<T>(Rc<RefCell<Vec<T>>>);

    impl<T> Default for Recorder<T> {
        fn default() -> Self {
            Self(Rc::new(RefCell::new(Vec::new())))
        }
    }

    impl HapticSink for Recorder<HapticPulse> {
        fn pulse(&mut self, pulse: HapticPulse) {
            self.0.borrow_mut().push(pulse);
        }
    }

    impl PointerCapture for Recorder<&'static str> {
        fn capture(&mut self, _pointer: PointerId) -> Result<(), CaptureError> {
            self.0.borrow_mut().push("capture");
            Err(CaptureError::Unsupported)
        }

        fn release(&mut self, _pointer: PointerId) -> Result<(), CaptureError> {
            self.0.borrow_mut().push("release");
            Ok(())
        }
    }

    #[test]
    fn test_parse_keys() {
        assert_eq!("next".parse::<RingKey>(), Ok(RingKey::Next));
        assert_eq!(" Prev ".parse::<RingKey>(), Ok(RingKey::Prev));
        assert_eq!("END".parse::<RingKey>(), Ok(RingKey::End));
        assert_eq!(
            "sideways".parse::<RingKey>(),
            Err(UnknownKey("sideways".to_string()))
        );
    }

    #[test]
    fn test_flick_settles_on_an_item() {
        let mut ring = RingController::default();
        ring.tick(0.0);

        ring.on_pointer_down(sample(400.0, 300.0, 0.0));
        ring.on_pointer_move(sample(430.0, 301.0, 25.0));
        ring.on_pointer_move(sample(460.0, 302.0, 50.0));
        assert!(ring.is_dragging());

        let dragged = ring.rotation_deg();
        assert!(dragged > 0.0);
        assert!(dragged <= 60.0 * 0.35 * 3.4);

        ring.on_pointer_up(sample(460.0, 302.0, 50.0));
        assert!(!ring.is_dragging());
        assert!(ring.angular_velocity() > 0.0);
        assert!(ring.angular_velocity() <= 840.0);

        let snapshot = settle(&mut ring, 50.0, 1200);
        let slots = snapshot.rotation_deg / 45.0;
        assert_eq!(slots, slots.round());
        assert!(snapshot.rotation_deg > dragged);
        assert_eq!(snapshot.angular_velocity, 0.0);
        assert!(!snapshot.snap_pending);
        assert_eq!(snapshot.active_index, active_index(snapshot.rotation_deg, 8));
    }

    #[test]
    fn test_vertical_drag_leaves_ring_alone() {
        let mut ring = RingController::default();
        ring.tick(0.0);

        ring.on_pointer_down(sample(100.0, 100.0, 0.0));
        ring.on_pointer_move(sample(102.0, 110.0, 16.0));
        assert_eq!(ring.gesture_phase(), GesturePhase::Idle);
        ring.on_pointer_move(sample(160.0, 140.0, 32.0));
        ring.on_pointer_up(sample(160.0, 140.0, 48.0));

        let snapshot = ring.tick(64.0);
        assert_eq!(snapshot.rotation_deg, 0.0);
        assert_eq!(snapshot.angular_velocity, 0.0);
        assert!(snapshot.is_at_rest());
    }

    #[test]
    fn test_slow_drag_stops_and_snaps_immediately() {
        let mut ring = RingController::default();
        ring.tick(0.0);

        ring.on_pointer_down(sample(400.0, 300.0, 0.0));
        ring.on_pointer_move(sample(410.0, 300.0, 200.0));
        for frame in 1..=30 {
            let x = 410.0 + frame as f32;
            ring.on_pointer_move(sample(x, 300.0, 200.0 + frame as f64 * 16.0));
        }
        let released_at = 200.0 + 30.0 * 16.0;
        ring.on_pointer_up(sample(440.0, 300.0, released_at));

        assert_eq!(ring.angular_velocity(), 0.0);
        assert_eq!(ring.snap_target(), Some(0.0));

        let snapshot = settle(&mut ring, released_at, 600);
        assert_eq!(snapshot.rotation_deg, 0.0);
    }

    #[test]
    fn test_three_wheel_notches_page_three_items() {
        let mut ring = RingController::default();
        ring.tick(0.0);

        for t in [10.0, 26.0, 42.0] {
            ring.on_wheel(120.0, t);
        }
        assert_eq!(ring.snap_target(), Some(-135.0));

        let snapshot = settle(&mut ring, 42.0, 1200);
        assert_eq!(snapshot.rotation_deg, -135.0);
        assert_eq!(snapshot.active_index, 3);
    }

    #[test]
    fn test_paging_stays_within_release_cap() {
        let cap = RingConfig::default().feel.release.max_release_velocity;
        let mut ring = RingController::default();
        ring.tick(0.0);

        for t in [10.0, 26.0, 42.0, 58.0] {
            ring.on_wheel(120.0, t);
            assert!(ring.angular_velocity().abs() <= cap);
        }
        let mut fastest = 0.0_f64;
        let mut snapshot = ring.snapshot();
        for frame in 1..=1200 {
            snapshot = ring.tick(58.0 + frame as f64 * 16.0);
            fastest = fastest.max(snapshot.angular_velocity.abs());
            if snapshot.is_at_rest() {
                break;
            }
        }
        assert!(snapshot.is_at_rest());
        assert!(fastest <= cap, "peaked at {fastest}°/s");
        assert_eq!(snapshot.rotation_deg, -180.0);
        assert_eq!(snapshot.active_index, 4);

        ring.go_to(0);
        assert!(ring.angular_velocity().abs() <= cap);
        let snapshot = settle(&mut ring, 30_000.0, 1200);
        assert_eq!(snapshot.active_index, 0);
    }

    #[test]
    fn test_odd_item_count_settles_once_per_page() {
        let pulses = Recorder::<HapticPulse>::default();
        let mut ring = RingController::new(RingConfig {
            item_count: 7,
            ..RingConfig::default()
        })
        .with_haptics(pulses.clone());
        ring.tick(0.0);

        let mut t = 0.0;
        for page in 1..=10 {
            t += 20_000.0;
            ring.on_wheel(120.0, t);
            let snapshot = settle(&mut ring, t, 1200);
            assert_eq!(snapshot.active_index, page % 7);
            assert_eq!(grid_offset(snapshot.rotation_deg, ring.step_deg()), 0.0);
        }

        let rest = ring.snapshot();
        t += 20_000.0;
        for frame in 1..=300 {
            let snapshot = ring.tick(t + frame as f64 * 16.0);
            assert_eq!(snapshot.rotation_deg, rest.rotation_deg);
            assert_eq!(snapshot.angular_velocity, 0.0);
            assert!(!snapshot.snap_pending);
        }

        let settles = pulses
            .0
            .borrow()
            .iter()
            .filter(|p| **p == HapticPulse::Settle)
            .count();
        assert_eq!(settles, 10);
    }

    #[test]
    fn test_keys_navigate() {
        let mut ring = RingController::default();
        ring.tick(0.0);

        ring.on_key(RingKey::End);
        assert_eq!(ring.snap_target(), Some(45.0));
        let snapshot = settle(&mut ring, 0.0, 1200);
        assert_eq!(snapshot.active_index, 7);

        ring.on_key(RingKey::Home);
        let snapshot = settle(&mut ring, 20_000.0, 1200);
        assert_eq!(snapshot.rotation_deg, 0.0);
        assert_eq!(snapshot.active_index, 0);

        ring.on_key(RingKey::Prev);
        assert_eq!(ring.snap_target(), Some(45.0));
    }

    #[test]
    fn test_explicit_targets_engage_without_auto_snap() {
        let mut ring = RingController::new(RingConfig {
            snap_enabled: false,
            ..RingConfig::default()
        });
        ring.tick(0.0);
        ring.go_to(2);

        let snapshot = settle(&mut ring, 0.0, 1200);
        assert_eq!(snapshot.rotation_deg, -90.0);
        assert_eq!(snapshot.active_index, 2);
    }

    #[test]
    fn test_driven_progress_under_reduced_motion() {
        let mut ring = RingController::default();
        ring.tick(0.0);
        ring.set_reduced_motion(true);
        ring.set_external_driven_progress(Some(0.25));

        let snapshot = ring.tick(16.0);
        assert_eq!(snapshot.rotation_deg, -90.0);
        assert_eq!(snapshot.phase, MotionPhase::Driven);
        assert_eq!(snapshot.active_index, 2);
        assert_eq!(
            snapshot.index_change,
            Some(IndexChange {
                previous: 0,
                current: 2
            })
        );

        // Discrete input is ignored while driven
        ring.on_wheel(120.0, 20.0);
        assert!(ring.snap_target().is_none());

        ring.set_external_driven_progress(None);
        let snapshot = settle(&mut ring, 32.0, 10);
        assert_eq!(snapshot.rotation_deg, -90.0);
    }

    #[test]
    fn test_radius_stretches_then_returns() {
        let mut ring = RingController::default();
        let base = ring.effective_base_radius();
        assert!((base - 344.93).abs() < 0.01);
        ring.tick(0.0);
        flick(&mut ring);

        let mut widest: f64 = 0.0;
        for frame in 1..=600 {
            let snapshot = ring.tick(50.0 + frame as f64 * 16.0);
            widest = widest.max(snapshot.radius);
            assert!(snapshot.radius >= 0.0);
        }
        assert!(widest > base + 1.0);
        assert!((ring.radius() - base).abs() < 0.01);
    }

    #[test]
    fn test_reduced_motion_keeps_radius_fixed() {
        let mut ring = RingController::default();
        ring.set_reduced_motion(true);
        let base = ring.effective_base_radius();
        ring.tick(0.0);
        flick(&mut ring);

        for frame in 1..=120 {
            let snapshot = ring.tick(50.0 + frame as f64 * 16.0);
            assert_eq!(snapshot.radius, base);
        }
    }

    #[test]
    fn test_index_changes_reach_observers_and_haptics() {
        let pulses = Recorder::<HapticPulse>::default();
        let mut ring = RingController::default().with_haptics(pulses.clone());
        let changes = Rc::new(RefCell::new(Vec::new()));
        let id = {
            let changes = Rc::clone(&changes);
            ring.on_active_index_change(move |change| changes.borrow_mut().push(change))
        };
        ring.tick(0.0);

        ring.on_wheel(120.0, 10.0);
        let snapshot = settle(&mut ring, 10.0, 1200);
        assert_eq!(snapshot.active_index, 1);

        let seen = changes.borrow().clone();
        assert_eq!(seen.first().map(|c| c.previous), Some(0));
        assert_eq!(seen.last().map(|c| c.current), Some(1));
        for pair in seen.windows(2) {
            assert_eq!(pair[0].current, pair[1].previous);
        }

        let pulses = pulses.0.borrow().clone();
        let detents = pulses.iter().filter(|p| **p == HapticPulse::Detent).count();
        let settles = pulses.iter().filter(|p| **p == HapticPulse::Settle).count();
        assert_eq!(detents, seen.len());
        assert_eq!(settles, 1);

        assert!(ring.off(id));
        ring.on_wheel(120.0, 5_000.0);
        settle(&mut ring, 5_000.0, 1200);
        assert_eq!(changes.borrow().len(), seen.len());
    }

    #[test]
    fn test_capture_failures_do_not_stop_rotation() {
        let log = Recorder::<&'static str>::default();
        let mut ring = RingController::default().with_capture(log.clone());
        ring.tick(0.0);

        ring.on_pointer_down(sample(400.0, 300.0, 0.0));
        ring.on_pointer_move(sample(430.0, 300.0, 25.0));
        assert!(ring.is_dragging());
        assert!(ring.rotation_deg() > 0.0);

        // Leaving with the button held keeps the drag alive
        ring.on_pointer_leave(sample(460.0, 300.0, 40.0), true);
        assert!(ring.is_dragging());

        ring.on_pointer_cancel(sample(460.0, 300.0, 50.0));
        assert_eq!(ring.gesture_phase(), GesturePhase::Idle);
        assert_eq!(*log.0.borrow(), vec!["capture", "release"]);
    }

    #[test]
    fn test_update_config_rebuilds_geometry() {
        let mut ring = RingController::default();
        ring.tick(0.0);

        let patch: RingConfigPatch = serde_json::from_str(r#"{ "item_count": 4 }"#).unwrap();
        ring.update_config(patch);
        assert_eq!(ring.step_deg(), 90.0);
        assert_eq!(ring.items().len(), 4);
        assert_eq!(ring.effective_base_radius(), 320.0);

        let snapshot = ring.tick(16.0);
        assert_eq!(snapshot.items.len(), 4);
        assert_eq!(ring.config().item_count, 4);
    }

    #[test]
    fn test_destroy_makes_everything_inert() {
        let mut ring = RingController::default();
        ring.on_active_index_change(|_| panic!("no notifications after destroy"));
        ring.tick(0.0);
        ring.on_wheel(120.0, 10.0);
        ring.destroy();
        assert!(ring.is_destroyed());

        let before = ring.snapshot();
        ring.on_wheel(120.0, 20.0);
        ring.on_key(RingKey::Next);
        ring.on_pointer_down(sample(0.0, 0.0, 30.0));
        ring.on_pointer_move(sample(50.0, 0.0, 40.0));
        let after = ring.tick(500.0);
        assert_eq!(before, after);
    }

    #[test]
    fn test_bad_timestamps_are_tolerated() {
        let mut ring = RingController::default();
        ring.tick(1000.0);
        ring.on_wheel(120.0, f64::NAN);
        let snapshot = ring.tick(f64::NAN);
        assert!(snapshot.rotation_deg.is_finite());

        // Backwards time uses the minimum frame step
        let snapshot = ring.tick(500.0);
        assert!(snapshot.rotation_deg.is_finite());
        assert!(snapshot.radius.is_finite());
    }

    #[test]
    fn test_broken_frame_bounds_keep_time_moving_forward() {
        let json = r#"{ "feel": { "motion": { "min_frame_dt": -0.04 } } }"#;
        let config: RingConfig = serde_json::from_str(json).unwrap();
        let mut ring = RingController::new(config);
        ring.tick(0.0);
        ring.on_wheel(120.0, 10.0);

        let before = ring.tick(1000.0).rotation_deg;
        let after = ring.tick(900.0).rotation_deg;
        assert!(after <= before, "rotated back from {before} to {after}");

        ring.update_config(RingConfigPatch {
            feel: Some(FeelParams {
                motion: MotionFeel {
                    min_frame_dt: f64::NAN,
                    ..MotionFeel::default()
                },
                ..FeelParams::default()
            }),
            ..RingConfigPatch::default()
        });
        let snapshot = ring.tick(f64::NAN);
        assert!(snapshot.rotation_deg.is_finite());
        let snapshot = settle(&mut ring, 1000.0, 1200);
        assert_eq!(snapshot.active_index, 1);
    }
}
