//! Snap-to-item state machine
//!
//! Once the ring slows down near a grid line, a PD controller pulls it onto
//! the line and then hard-sets the rotation so alignment is exact. Discrete
//! input (wheel notches, arrow keys) instead sets an explicit target one step
//! from the last anchor, which turns free spin into index-by-index paging.
//!
//! All timing is measured against event and tick timestamps in
//! milliseconds; the controller owns no clock.

use crate::angular::AngularState;
use crate::constants::GRID_EPSILON_DEG;
use crate::grid::{grid_offset, nearest_grid, sign};
use crate::params::SnapFeel;

/// Per-tick inputs for the snap controller
#[derive(Debug, Clone, Copy)]
pub struct SnapInputs {
    pub step_deg: f64,
    pub snap_enabled: bool,
    /// Configured snap velocity threshold (deg/s)
    pub velocity_threshold: f64,
    pub snap_strength: f64,
    pub now_ms: f64,
}

/// What the snap controller did this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapPhase {
    /// Snapping disabled and no explicit target
    Disabled,
    /// Resting on a grid line
    Idle,
    /// Moving too fast to snap yet
    Coasting,
    /// Pending, waiting out the post-release debounce
    Debouncing,
    /// Force applied toward the target
    Pulling,
}

/// Transient snap state, cleared whenever a drag starts
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SnapState {
    pub pending: bool,
    /// Explicit target angle; `None` means the nearest grid line
    pub target: Option<f64>,
    pub last_drag_end_ms: Option<f64>,
    engage_at_ms: Option<f64>,
    forced: bool,
    motion_since_ms: Option<f64>,
}

impl SnapState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop all snap state (a new drag took over)
    pub fn clear(&mut self) {
        *self = Self {
            last_drag_end_ms: self.last_drag_end_ms,
            ..Self::default()
        };
    }

    /// Whether the force-snap fallback is currently engaged
    pub fn is_forced(&self) -> bool {
        self.forced
    }

    /// A drag ended with coasting velocity: snap after the debounce
    pub fn schedule_after_release(&mut self, now_ms: f64, feel: &SnapFeel) {
        self.pending = false;
        self.target = None;
        self.forced = false;
        self.last_drag_end_ms = Some(now_ms);
        self.engage_at_ms = Some(now_ms + feel.debounce_ms);
        self.motion_since_ms = Some(now_ms);
    }

    /// A deliberate slow drag ended: snap to the nearest line right away
    pub fn schedule_immediate(&mut self, now_ms: f64) {
        self.pending = true;
        self.target = None;
        self.forced = false;
        self.last_drag_end_ms = Some(now_ms);
        self.engage_at_ms = None;
        self.motion_since_ms = Some(now_ms);
    }

    /// Snap to an explicit angle, engaging immediately
    pub fn set_target(&mut self, target: f64, now_ms: f64) {
        self.pending = true;
        self.target = Some(target);
        self.engage_at_ms = None;
        self.motion_since_ms.get_or_insert(now_ms);
    }

    /// Angle that the next discrete step is measured from
    pub fn anchor(&self, rotation_deg: f64, step_deg: f64) -> f64 {
        self.target
            .unwrap_or_else(|| nearest_grid(rotation_deg, step_deg))
    }

    fn debouncing(&self, now_ms: f64) -> bool {
        self.engage_at_ms.is_some_and(|at| now_ms < at)
    }

    /// Update pending state and apply the snap force to the angular velocity
    ///
    /// Call before integrating the rotation; call [`SnapState::try_settle`]
    /// after it.
    pub fn apply_force(
        &mut self,
        state: &mut AngularState,
        dt: f64,
        inputs: &SnapInputs,
        feel: &SnapFeel,
    ) -> SnapPhase {
        let step = inputs.step_deg;
        if !inputs.snap_enabled && self.target.is_none() {
            self.pending = false;
            self.forced = false;
            return SnapPhase::Disabled;
        }

        let velocity = state.angular_velocity;
        if !self.pending {
            let offset = grid_offset(state.rotation_deg, step);
            if velocity == 0.0 && offset.abs() < GRID_EPSILON_DEG {
                self.motion_since_ms = None;
                return SnapPhase::Idle;
            }

            let entry_threshold = inputs.velocity_threshold.max(feel.entry_steps * step);
            if velocity.abs() < entry_threshold && offset.abs() <= feel.capture_steps * step {
                log::debug!("snap pending at {:.2}° ({velocity:.2}°/s)", state.rotation_deg);
                self.pending = true;
            } else {
                let since = *self.motion_since_ms.get_or_insert(inputs.now_ms);
                if inputs.now_ms - since < feel.force_snap_ms {
                    return SnapPhase::Coasting;
                }
                log::debug!("force-snapping sustained spin at {velocity:.1}°/s");
                self.pending = true;
                self.forced = true;
            }
        }

        if self.debouncing(inputs.now_ms) {
            return SnapPhase::Debouncing;
        }

        if !self.forced {
            if let Some(since) = self.motion_since_ms {
                if inputs.now_ms - since >= feel.force_snap_ms {
                    log::debug!("snap unsettled after {:.0} ms, adding decay", feel.force_snap_ms);
                    self.forced = true;
                }
            }
        }

        let target = self.anchor(state.rotation_deg, step);
        let diff = target - state.rotation_deg;
        let distance_steps = diff.abs() / step;
        let proximity = 1.0 - distance_steps.min(1.0);
        let strength = inputs.snap_strength
            * (feel.strength_base + (1.0 - proximity) * feel.strength_far_gain);
        let damp = feel.damping_base + proximity * feel.damping_near_gain;
        // Nearest-line snaps never start past half a step, so only explicit targets feel this
        let far_pull = feel.far_pull_gain * (distance_steps - feel.far_pull_start_steps).max(0.0);
        let pull = proximity.max(feel.min_pull) + far_pull;

        state.angular_velocity +=
            (strength * sign(diff) * pull - damp * state.angular_velocity) * dt;
        if self.forced {
            state.angular_velocity *= (-feel.force_snap_decay * dt).exp();
        }

        SnapPhase::Pulling
    }

    /// Lock onto the target once close and slow enough
    ///
    /// Returns the target angle when the ring settled this tick.
    pub fn try_settle(
        &mut self,
        state: &mut AngularState,
        inputs: &SnapInputs,
        feel: &SnapFeel,
    ) -> Option<f64> {
        if !self.pending || self.debouncing(inputs.now_ms) {
            return None;
        }

        let step = inputs.step_deg;
        let target = self.anchor(state.rotation_deg, step);
        let diff = target - state.rotation_deg;
        let position_tolerance = feel.settle_min_deg.max(step * feel.settle_fraction);
        let velocity_tolerance = feel
            .settle_min_velocity
            .max(inputs.velocity_threshold * feel.settle_velocity_fraction);

        if diff.abs() < position_tolerance && state.angular_velocity.abs() < velocity_tolerance {
            state.rotation_deg = target;
            state.angular_velocity = 0.0;
            self.pending = false;
            self.target = None;
            self.forced = false;
            self.engage_at_ms = None;
            self.motion_since_ms = None;
            return Some(target);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::angular::{AngularInputs, AngularMode};
    use crate::params::MotionFeel;

    const DT: f64 = 1.0 / 60.0;

    fn inputs(now_ms: f64) -> SnapInputs {
        SnapInputs {
            step_deg: 45.0,
            snap_enabled: true,
            velocity_threshold: 30.0,
            snap_strength: 240.0,
            now_ms,
        }
    }

    fn angular() -> AngularInputs {
        AngularInputs {
            dragging: false,
            inertia: true,
            friction: 2.2,
            reduced_motion: false,
        }
    }

    /// Run the force/integrate/settle sequence until settled or out of frames
    fn run(
        snap: &mut SnapState,
        state: &mut AngularState,
        start_ms: f64,
        frames: usize,
    ) -> Option<f64> {
        let feel = SnapFeel::default();
        let motion = MotionFeel::default();
        for frame in 0..frames {
            let now = start_ms + frame as f64 * DT * 1000.0;
            snap.apply_force(state, DT, &inputs(now), &feel);
            assert_eq!(state.integrate(DT, &angular(), &motion), AngularMode::Free);
            if let Some(target) = snap.try_settle(state, &inputs(now), &feel) {
                return Some(target);
            }
        }
        None
    }

    #[test]
    fn test_settles_exactly_on_nearest_line() {
        let mut snap = SnapState::new();
        let mut state = AngularState::new(52.0);
        state.angular_velocity = 10.0;

        let target = run(&mut snap, &mut state, 0.0, 600);
        assert_eq!(target, Some(45.0));
        assert_eq!(state.rotation_deg, 45.0);
        assert_eq!(state.angular_velocity, 0.0);
        assert!(!snap.pending);
    }

    #[test]
    fn test_settled_state_is_idempotent() {
        let feel = SnapFeel::default();
        let motion = MotionFeel::default();
        let mut snap = SnapState::new();
        let mut state = AngularState::new(-20.0);
        run(&mut snap, &mut state, 0.0, 600).expect("snap should settle");
        let settled = state;

        for frame in 0..300 {
            let now = 20_000.0 + frame as f64 * 16.0;
            assert_eq!(snap.apply_force(&mut state, DT, &inputs(now), &feel), SnapPhase::Idle);
            state.integrate(DT, &angular(), &motion);
            snap.try_settle(&mut state, &inputs(now), &feel);
        }
        assert_eq!(state, settled);
    }

    #[test]
    fn test_rounding_noise_on_a_line_is_idle() {
        let feel = SnapFeel::default();
        let step = 360.0 / 7.0;
        let odd = SnapInputs {
            step_deg: step,
            ..inputs(0.0)
        };
        for rotation in [-6.0 * step, 3.0 * step + 1e-12, -2.0 * step - 1e-12] {
            let mut snap = SnapState::new();
            let mut state = AngularState::new(rotation);
            assert_eq!(snap.apply_force(&mut state, DT, &odd, &feel), SnapPhase::Idle);
            assert!(!snap.pending);
            assert_eq!(state.angular_velocity, 0.0);
        }
    }

    #[test]
    fn test_far_target_pulls_harder_than_near_one() {
        let feel = SnapFeel::default();
        let mut near = AngularState::new(0.0);
        let mut far = AngularState::new(0.0);
        let mut snap = SnapState::new();
        snap.set_target(-45.0, 0.0);
        snap.apply_force(&mut near, DT, &inputs(0.0), &feel);
        let mut snap = SnapState::new();
        snap.set_target(-180.0, 0.0);
        snap.apply_force(&mut far, DT, &inputs(0.0), &feel);

        assert!(near.angular_velocity < 0.0);
        assert!(far.angular_velocity < 3.0 * near.angular_velocity);
    }

    #[test]
    fn test_debounce_holds_force() {
        let feel = SnapFeel::default();
        let mut snap = SnapState::new();
        let mut state = AngularState::new(10.0);
        state.angular_velocity = 5.0;
        snap.schedule_after_release(1000.0, &feel);

        let phase = snap.apply_force(&mut state, DT, &inputs(1050.0), &feel);
        assert_eq!(phase, SnapPhase::Debouncing);
        assert_eq!(state.angular_velocity, 5.0);
        assert!(snap.try_settle(&mut state, &inputs(1050.0), &feel).is_none());

        let phase = snap.apply_force(&mut state, DT, &inputs(1121.0), &feel);
        assert_eq!(phase, SnapPhase::Pulling);
    }

    #[test]
    fn test_fast_spin_coasts_then_force_engages() {
        let feel = SnapFeel::default();
        let mut snap = SnapState::new();
        let mut state = AngularState::new(0.0);
        state.angular_velocity = 400.0;
        snap.schedule_after_release(0.0, &feel);

        let phase = snap.apply_force(&mut state, DT, &inputs(500.0), &feel);
        assert_eq!(phase, SnapPhase::Coasting);
        assert!(!snap.pending);

        state.angular_velocity = 400.0;
        let phase = snap.apply_force(&mut state, DT, &inputs(950.0), &feel);
        assert_eq!(phase, SnapPhase::Pulling);
        assert!(snap.pending);
        assert!(snap.is_forced());
    }

    #[test]
    fn test_explicit_target_overrides_nearest() {
        let mut snap = SnapState::new();
        let mut state = AngularState::new(0.0);
        snap.set_target(-45.0, 0.0);
        assert_eq!(snap.anchor(0.0, 45.0), -45.0);

        let target = run(&mut snap, &mut state, 0.0, 1200);
        assert_eq!(target, Some(-45.0));
        assert_eq!(state.rotation_deg, -45.0);
        assert!(snap.target.is_none());
    }

    #[test]
    fn test_disabled_without_target() {
        let feel = SnapFeel::default();
        let mut snap = SnapState::new();
        let mut state = AngularState::new(10.0);
        let disabled = SnapInputs {
            snap_enabled: false,
            ..inputs(0.0)
        };
        assert_eq!(snap.apply_force(&mut state, DT, &disabled, &feel), SnapPhase::Disabled);
        assert_eq!(state.angular_velocity, 0.0);
    }

    #[test]
    fn test_clear_keeps_last_drag_end() {
        let feel = SnapFeel::default();
        let mut snap = SnapState::new();
        snap.schedule_after_release(250.0, &feel);
        snap.set_target(90.0, 260.0);
        snap.clear();
        assert!(!snap.pending);
        assert!(snap.target.is_none());
        assert_eq!(snap.last_drag_end_ms, Some(250.0));
    }
}
