//! Release-velocity model
//!
//! The last raw drag sample is too noisy to hand to the integrator, so the
//! velocity a drag leaves behind is built from the whole gesture: its
//! smoothed release velocity, its peak velocity and acceleration, and an
//! energy integral `∫|v·a|dt` that rewards sustained accelerating flicks over
//! twitches.

use crate::grid::sign;
use crate::params::ReleaseFeel;

/// Per-gesture drag history, reset at every pointer-down
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DragMetrics {
    /// Largest instantaneous speed seen (deg/s)
    pub peak_velocity: f64,
    /// Largest instantaneous acceleration magnitude seen (deg/s²)
    pub peak_acceleration: f64,
    /// Accumulated `|v·a|·dt`, capped at `energy_cap`
    pub energy: f64,
    pub last_velocity: f64,
    /// Frames whose speed stayed under the slow-drag threshold
    pub slow_frames: u32,
    pub frames: u32,
}

/// Outcome of a finished drag
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Release {
    /// Coast with this signed angular velocity (deg/s)
    Coast(f64),
    /// Deliberate slow drag: stop where released and snap immediately
    Stop,
}

impl DragMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Record one rotate step's instantaneous velocity
    pub fn record(&mut self, velocity: f64, dt: f64, step_deg: f64, feel: &ReleaseFeel) {
        if !velocity.is_finite() {
            return;
        }
        let dt = if dt.is_finite() && dt > 0.0 { dt } else { return };

        let acceleration = (velocity - self.last_velocity) / dt;
        let speed = velocity.abs();

        self.peak_velocity = self.peak_velocity.max(speed);
        if acceleration.is_finite() {
            self.peak_acceleration = self.peak_acceleration.max(acceleration.abs());
            self.energy = (self.energy + (velocity * acceleration).abs() * dt).min(feel.energy_cap);
        }
        if speed < feel.slow_drag_steps * step_deg {
            self.slow_frames += 1;
        }
        self.frames += 1;
        self.last_velocity = velocity;
    }

    /// Whether the gesture was a deliberate slow drag
    pub fn is_slow(&self, step_deg: f64, feel: &ReleaseFeel) -> bool {
        self.frames > 0
            && self.peak_velocity < feel.slow_drag_steps * step_deg
            && self.slow_frames >= feel.slow_drag_min_frames
    }

    /// Velocity the ring keeps after the drag ends
    ///
    /// `grid_offset` is the signed displacement from the nearest grid line;
    /// it only decides direction when no velocity sample has a sign.
    pub fn release_velocity(
        &self,
        smoothed_velocity: f64,
        grid_offset: f64,
        step_deg: f64,
        feel: &ReleaseFeel,
    ) -> Release {
        if self.is_slow(step_deg, feel) {
            log::debug!(
                "slow drag (peak {:.1}°/s over {} frames), stopping in place",
                self.peak_velocity,
                self.frames
            );
            return Release::Stop;
        }

        let smoothed = if smoothed_velocity.is_finite() { smoothed_velocity } else { 0.0 };
        let energy = self.energy.min(feel.energy_cap);

        let mut magnitude = smoothed
            .abs()
            .max(self.peak_velocity * feel.peak_velocity_weight);
        magnitude += (self.peak_acceleration * feel.accel_boost).min(feel.accel_boost_cap);
        if feel.energy_cap > 0.0 {
            magnitude += energy / feel.energy_cap * feel.energy_boost;
        }
        if energy > feel.energy_floor_threshold {
            magnitude = magnitude.max(feel.release_floor_steps * step_deg);
        }
        magnitude = magnitude.min(feel.max_release_velocity);

        let direction = [smoothed, self.last_velocity, grid_offset]
            .into_iter()
            .map(sign)
            .find(|s| *s != 0.0)
            .unwrap_or(0.0);

        log::debug!(
            "release {:.1}°/s (smoothed {smoothed:.1}, peak {:.1}, energy {energy:.0})",
            direction * magnitude,
            self.peak_velocity
        );
        Release::Coast(direction * magnitude)
    }
}
