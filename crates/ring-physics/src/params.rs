//! Feel parameters for runtime tuning

use crate::constants::*;
use serde::{Deserialize, Serialize};

/// Drag shaping: how pointer motion turns into rotation
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DragFeel {
    pub fast_pointer_speed: f64,
    pub min_intensity: f64,
    pub max_intensity: f64,
    pub fast_intensity_threshold: f64,
    pub curve_exponent_fast: f64,
    pub curve_exponent: f64,
    pub curve_clamp_base: f64,
    pub curve_clamp_intensity_gain: f64,
    pub curve_knee_deg: f64,
    pub min_sample_dt: f64,
    pub velocity_window: usize,
}

impl Default for DragFeel {
    fn default() -> Self {
        Self {
            fast_pointer_speed: FAST_POINTER_SPEED,
            min_intensity: MIN_INTENSITY,
            max_intensity: MAX_INTENSITY,
            fast_intensity_threshold: FAST_INTENSITY_THRESHOLD,
            curve_exponent_fast: CURVE_EXPONENT_FAST,
            curve_exponent: CURVE_EXPONENT,
            curve_clamp_base: CURVE_CLAMP_BASE,
            curve_clamp_intensity_gain: CURVE_CLAMP_INTENSITY_GAIN,
            curve_knee_deg: CURVE_KNEE_DEG,
            min_sample_dt: MIN_SAMPLE_DT,
            velocity_window: VELOCITY_WINDOW,
        }
    }
}

/// Release model: how a finished drag becomes coasting velocity
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReleaseFeel {
    pub peak_velocity_weight: f64,
    pub accel_boost: f64,
    pub accel_boost_cap: f64,
    pub energy_cap: f64,
    pub energy_boost: f64,
    pub energy_floor_threshold: f64,
    pub release_floor_steps: f64,
    pub max_release_velocity: f64,
    pub slow_drag_steps: f64,
    pub slow_drag_min_frames: u32,
}

impl Default for ReleaseFeel {
    fn default() -> Self {
        Self {
            peak_velocity_weight: PEAK_VELOCITY_WEIGHT,
            accel_boost: ACCEL_BOOST,
            accel_boost_cap: ACCEL_BOOST_CAP,
            energy_cap: ENERGY_CAP,
            energy_boost: ENERGY_BOOST,
            energy_floor_threshold: ENERGY_FLOOR_THRESHOLD,
            release_floor_steps: RELEASE_FLOOR_STEPS,
            max_release_velocity: MAX_RELEASE_VELOCITY,
            slow_drag_steps: SLOW_DRAG_STEPS,
            slow_drag_min_frames: SLOW_DRAG_MIN_FRAMES,
        }
    }
}

/// Snap controller timing, gains and settle windows
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapFeel {
    pub debounce_ms: f64,
    pub force_snap_ms: f64,
    pub force_snap_decay: f64,
    pub entry_steps: f64,
    pub capture_steps: f64,
    pub strength_base: f64,
    pub strength_far_gain: f64,
    pub damping_base: f64,
    pub damping_near_gain: f64,
    pub min_pull: f64,
    pub far_pull_gain: f64,
    pub far_pull_start_steps: f64,
    pub settle_fraction: f64,
    pub settle_min_deg: f64,
    pub settle_velocity_fraction: f64,
    pub settle_min_velocity: f64,
    pub discrete_impulse_steps: f64,
    pub discrete_recency_ms: f64,
    pub discrete_max_boost: f64,
}

impl Default for SnapFeel {
    fn default() -> Self {
        Self {
            debounce_ms: SNAP_DEBOUNCE_MS,
            force_snap_ms: FORCE_SNAP_MS,
            force_snap_decay: FORCE_SNAP_DECAY,
            entry_steps: SNAP_ENTRY_STEPS,
            capture_steps: SNAP_CAPTURE_STEPS,
            strength_base: SNAP_STRENGTH_BASE,
            strength_far_gain: SNAP_STRENGTH_FAR_GAIN,
            damping_base: SNAP_DAMPING_BASE,
            damping_near_gain: SNAP_DAMPING_NEAR_GAIN,
            min_pull: SNAP_MIN_PULL,
            far_pull_gain: SNAP_FAR_PULL_GAIN,
            far_pull_start_steps: SNAP_FAR_PULL_START_STEPS,
            settle_fraction: SETTLE_FRACTION,
            settle_min_deg: SETTLE_MIN_DEG,
            settle_velocity_fraction: SETTLE_VELOCITY_FRACTION,
            settle_min_velocity: SETTLE_MIN_VELOCITY,
            discrete_impulse_steps: DISCRETE_IMPULSE_STEPS,
            discrete_recency_ms: DISCRETE_RECENCY_MS,
            discrete_max_boost: DISCRETE_MAX_BOOST,
        }
    }
}

/// Frame-step handling and free-motion thresholds
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionFeel {
    pub driven_blend_rate: f64,
    pub rest_velocity: f64,
    pub max_frame_dt: f64,
    pub min_frame_dt: f64,
}

impl Default for MotionFeel {
    fn default() -> Self {
        Self {
            driven_blend_rate: DRIVEN_BLEND_RATE,
            rest_velocity: REST_VELOCITY,
            max_frame_dt: MAX_FRAME_DT,
            min_frame_dt: MIN_FRAME_DT,
        }
    }
}

/// All empirically tuned feel parameters, grouped by the stage that uses them
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeelParams {
    pub drag: DragFeel,
    pub release: ReleaseFeel,
    pub snap: SnapFeel,
    pub motion: MotionFeel,
}

/// Replace a non-finite or negative value with its default
fn non_negative(group: &str, name: &str, value: &mut f64, fallback: f64) {
    if !(value.is_finite() && *value >= 0.0) {
        log::warn!("feel `{group}.{name}` = {value} is invalid, using {fallback}");
        *value = fallback;
    }
}

/// Replace anything but a finite, strictly positive value with its default
fn positive(group: &str, name: &str, value: &mut f64, fallback: f64) {
    if !(value.is_finite() && *value > 0.0) {
        log::warn!("feel `{group}.{name}` = {value} must be positive, using {fallback}");
        *value = fallback;
    }
}

impl DragFeel {
    pub fn sanitized(mut self) -> Self {
        let d = Self::default();
        for (name, value, fallback) in [
            ("fast_pointer_speed", &mut self.fast_pointer_speed, d.fast_pointer_speed),
            ("min_intensity", &mut self.min_intensity, d.min_intensity),
            ("max_intensity", &mut self.max_intensity, d.max_intensity),
            (
                "fast_intensity_threshold",
                &mut self.fast_intensity_threshold,
                d.fast_intensity_threshold,
            ),
            ("curve_exponent_fast", &mut self.curve_exponent_fast, d.curve_exponent_fast),
            ("curve_exponent", &mut self.curve_exponent, d.curve_exponent),
            ("curve_clamp_base", &mut self.curve_clamp_base, d.curve_clamp_base),
            (
                "curve_clamp_intensity_gain",
                &mut self.curve_clamp_intensity_gain,
                d.curve_clamp_intensity_gain,
            ),
            ("curve_knee_deg", &mut self.curve_knee_deg, d.curve_knee_deg),
        ] {
            non_negative("drag", name, value, fallback);
        }
        positive("drag", "min_sample_dt", &mut self.min_sample_dt, d.min_sample_dt);

        if self.max_intensity < self.min_intensity {
            log::warn!(
                "feel `drag.max_intensity` is below `drag.min_intensity`, using {}",
                self.min_intensity
            );
            self.max_intensity = self.min_intensity;
        }
        if self.velocity_window == 0 {
            log::warn!("feel `drag.velocity_window` = 0, clamping to 1");
            self.velocity_window = 1;
        }
        self
    }
}

impl ReleaseFeel {
    pub fn sanitized(mut self) -> Self {
        let d = Self::default();
        for (name, value, fallback) in [
            ("peak_velocity_weight", &mut self.peak_velocity_weight, d.peak_velocity_weight),
            ("accel_boost", &mut self.accel_boost, d.accel_boost),
            ("accel_boost_cap", &mut self.accel_boost_cap, d.accel_boost_cap),
            ("energy_cap", &mut self.energy_cap, d.energy_cap),
            ("energy_boost", &mut self.energy_boost, d.energy_boost),
            (
                "energy_floor_threshold",
                &mut self.energy_floor_threshold,
                d.energy_floor_threshold,
            ),
            ("release_floor_steps", &mut self.release_floor_steps, d.release_floor_steps),
            ("max_release_velocity", &mut self.max_release_velocity, d.max_release_velocity),
            ("slow_drag_steps", &mut self.slow_drag_steps, d.slow_drag_steps),
        ] {
            non_negative("release", name, value, fallback);
        }
        self
    }
}

impl SnapFeel {
    pub fn sanitized(mut self) -> Self {
        let d = Self::default();
        for (name, value, fallback) in [
            ("debounce_ms", &mut self.debounce_ms, d.debounce_ms),
            ("force_snap_ms", &mut self.force_snap_ms, d.force_snap_ms),
            ("force_snap_decay", &mut self.force_snap_decay, d.force_snap_decay),
            ("entry_steps", &mut self.entry_steps, d.entry_steps),
            ("capture_steps", &mut self.capture_steps, d.capture_steps),
            ("strength_base", &mut self.strength_base, d.strength_base),
            ("strength_far_gain", &mut self.strength_far_gain, d.strength_far_gain),
            ("damping_base", &mut self.damping_base, d.damping_base),
            ("damping_near_gain", &mut self.damping_near_gain, d.damping_near_gain),
            ("min_pull", &mut self.min_pull, d.min_pull),
            ("far_pull_gain", &mut self.far_pull_gain, d.far_pull_gain),
            ("far_pull_start_steps", &mut self.far_pull_start_steps, d.far_pull_start_steps),
            ("settle_fraction", &mut self.settle_fraction, d.settle_fraction),
            ("settle_min_deg", &mut self.settle_min_deg, d.settle_min_deg),
            (
                "settle_velocity_fraction",
                &mut self.settle_velocity_fraction,
                d.settle_velocity_fraction,
            ),
            ("settle_min_velocity", &mut self.settle_min_velocity, d.settle_min_velocity),
            (
                "discrete_impulse_steps",
                &mut self.discrete_impulse_steps,
                d.discrete_impulse_steps,
            ),
            ("discrete_recency_ms", &mut self.discrete_recency_ms, d.discrete_recency_ms),
            ("discrete_max_boost", &mut self.discrete_max_boost, d.discrete_max_boost),
        ] {
            non_negative("snap", name, value, fallback);
        }
        self
    }
}

impl MotionFeel {
    pub fn sanitized(mut self) -> Self {
        let d = Self::default();
        for (name, value, fallback) in [
            ("driven_blend_rate", &mut self.driven_blend_rate, d.driven_blend_rate),
            ("rest_velocity", &mut self.rest_velocity, d.rest_velocity),
        ] {
            non_negative("motion", name, value, fallback);
        }
        positive("motion", "min_frame_dt", &mut self.min_frame_dt, d.min_frame_dt);
        positive("motion", "max_frame_dt", &mut self.max_frame_dt, d.max_frame_dt);
        if self.max_frame_dt < self.min_frame_dt {
            log::warn!(
                "feel `motion.max_frame_dt` is below `motion.min_frame_dt`, using {}",
                self.min_frame_dt
            );
            self.max_frame_dt = self.min_frame_dt;
        }
        self
    }

    /// Smallest frame step, falling back to the default when unusable
    pub fn min_dt(&self) -> f64 {
        if self.min_frame_dt.is_finite() && self.min_frame_dt > 0.0 {
            self.min_frame_dt
        } else {
            MIN_FRAME_DT
        }
    }

    fn max_dt(&self) -> f64 {
        let max = if self.max_frame_dt.is_finite() {
            self.max_frame_dt
        } else {
            MAX_FRAME_DT
        };
        max.max(self.min_dt())
    }

    /// Clamp a raw frame step into `[min_frame_dt, max_frame_dt]`
    ///
    /// Non-finite, zero and negative steps become the minimum so a stalled
    /// or reordered frame can never poison the integrators. The result is
    /// always finite and positive, even for unsanitized bounds.
    pub fn clamp_dt(&self, dt: f64) -> f64 {
        if dt.is_finite() && dt > 0.0 {
            dt.clamp(self.min_dt(), self.max_dt())
        } else {
            self.min_dt()
        }
    }
}

impl FeelParams {
    /// Replace every invalid tuning value with its default
    pub fn sanitized(self) -> Self {
        Self {
            drag: self.drag.sanitized(),
            release: self.release.sanitized(),
            snap: self.snap.sanitized(),
            motion: self.motion.sanitized(),
        }
    }
}
