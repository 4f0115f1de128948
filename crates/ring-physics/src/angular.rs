//! Angular integration of the ring rotation

use crate::params::MotionFeel;

/// Rotation state of the ring
///
/// `rotation_deg` is an unbounded accumulator and is never wrapped; item
/// indices are derived from it by normalization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AngularState {
    /// Current rotation in degrees
    pub rotation_deg: f64,
    /// Angular velocity in degrees per second
    pub angular_velocity: f64,
    /// Rotation requested by an external progress source, if any
    pub desired_rotation_deg: Option<f64>,
}

/// Per-tick inputs for [`AngularState::integrate`]
#[derive(Debug, Clone, Copy)]
pub struct AngularInputs {
    pub dragging: bool,
    pub inertia: bool,
    /// Exponential decay rate of free spin (1/s)
    pub friction: f64,
    pub reduced_motion: bool,
}

/// Which integration path a tick took
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AngularMode {
    /// Rotation followed the external progress target
    Driven,
    /// Rotation advanced under its own velocity
    Free,
    /// A drag owns the rotation; nothing was integrated
    Held,
}

impl AngularState {
    pub fn new(rotation_deg: f64) -> Self {
        Self {
            rotation_deg,
            angular_velocity: 0.0,
            desired_rotation_deg: None,
        }
    }

    /// Advance rotation by one frame step
    pub fn integrate(
        &mut self,
        dt: f64,
        inputs: &AngularInputs,
        motion: &MotionFeel,
    ) -> AngularMode {
        let previous = self.rotation_deg;

        let mode = match self.desired_rotation_deg {
            Some(desired) if !inputs.dragging => {
                let factor = if inputs.reduced_motion {
                    1.0
                } else {
                    (dt * motion.driven_blend_rate).min(1.0)
                };
                if factor >= 1.0 {
                    self.rotation_deg = desired;
                } else {
                    self.rotation_deg += (desired - self.rotation_deg) * factor;
                }
                self.angular_velocity = 0.0;
                AngularMode::Driven
            }
            // Drag deltas move the ring directly; velocity only tracks them
            _ if inputs.dragging => AngularMode::Held,
            _ => {
                self.rotation_deg += self.angular_velocity * dt;
                if inputs.inertia {
                    self.angular_velocity *= (-inputs.friction * dt).exp();
                    if self.angular_velocity.abs() < motion.rest_velocity {
                        self.angular_velocity = 0.0;
                    }
                }
                AngularMode::Free
            }
        };

        self.guard(previous);
        mode
    }

    /// Apply a drag delta directly, tracking the drag's smoothed velocity
    pub fn apply_drag(&mut self, delta_deg: f64, smoothed_velocity: f64) {
        let previous = self.rotation_deg;
        self.rotation_deg += delta_deg;
        self.angular_velocity = smoothed_velocity;
        self.guard(previous);
    }

    /// Keep NaN and infinities out of the accumulator
    fn guard(&mut self, previous: f64) {
        if !self.angular_velocity.is_finite() {
            log::warn!("discarding non-finite angular velocity");
            self.angular_velocity = 0.0;
        }
        if !self.rotation_deg.is_finite() {
            log::warn!("discarding non-finite rotation, keeping {previous:.3}");
            self.rotation_deg = if previous.is_finite() { previous } else { 0.0 };
        }
    }
}

impl Default for AngularState {
    fn default() -> Self {
        Self::new(0.0)
    }
}
