//! Rotate-vs-scroll gesture recognition
//!
//! `Idle → Pending` on a primary-button press. While pending, the
//! displacement from the press point is measured; once it crosses the
//! threshold the gesture either commits to `Rotate` (mostly horizontal) or
//! is rejected back to `Idle` so the host can let the page scroll.

use crate::curve::{drag_curve, drag_intensity};
use crate::pointer::{PointerId, PointerSample};
use crate::velocity::VelocityWindow;
use glam::Vec2;
use ring_physics::DragFeel;

/// Gesture state machine phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GesturePhase {
    #[default]
    Idle,
    Pending,
    Rotate,
}

/// Settings the recognizer needs from the ring configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureSettings {
    /// Pixels of travel before intent is decided
    pub threshold: f32,
    /// Weight of horizontal travel against vertical when deciding intent
    pub horizontal_bias: f32,
    /// Degrees of rotation per pixel at unit intensity
    pub drag_sensitivity: f64,
    pub step_deg: f64,
}

impl Default for GestureSettings {
    fn default() -> Self {
        Self {
            threshold: 8.0,
            horizontal_bias: 1.2,
            drag_sensitivity: 0.35,
            step_deg: 45.0,
        }
    }
}

/// One accepted rotate move
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotateStep {
    /// Shaped rotation delta in degrees
    pub delta_deg: f64,
    /// Instantaneous angular velocity (deg/s)
    pub velocity: f64,
    /// Mean of the velocity window (deg/s)
    pub smoothed_velocity: f64,
    /// Sample interval used for the velocity (s)
    pub dt: f64,
    /// True for the move that committed the gesture
    pub committed: bool,
}

/// Output of the recognizer
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEvent {
    /// A press was accepted and intent is undecided
    Pending { pointer_id: PointerId },
    /// Intent was vertical; the gesture is handed back to the host
    Rejected { pointer_id: PointerId },
    /// Rotation delta for the tracked pointer
    Rotate(RotateStep),
    /// A rotate gesture ended
    Released {
        pointer_id: PointerId,
        smoothed_velocity: f64,
        last_velocity: f64,
        cancelled: bool,
    },
    /// The press ended before intent was decided
    Abandoned { pointer_id: PointerId },
}

/// Single-pointer gesture recognizer
#[derive(Debug, Clone)]
pub struct GestureRecognizer {
    phase: GesturePhase,
    pointer_id: Option<PointerId>,
    start: Vec2,
    last: Vec2,
    last_timestamp_ms: f64,
    window: VelocityWindow,
    last_velocity: f64,
    settings: GestureSettings,
    feel: DragFeel,
}

impl GestureRecognizer {
    pub fn new(settings: GestureSettings, feel: DragFeel) -> Self {
        Self {
            phase: GesturePhase::Idle,
            pointer_id: None,
            start: Vec2::ZERO,
            last: Vec2::ZERO,
            last_timestamp_ms: 0.0,
            window: VelocityWindow::new(feel.velocity_window),
            last_velocity: 0.0,
            settings,
            feel,
        }
    }

    /// Replace settings and feel; an in-flight gesture continues with them
    pub fn configure(&mut self, settings: GestureSettings, feel: DragFeel) {
        self.window.set_capacity(feel.velocity_window);
        self.settings = settings;
        self.feel = feel;
    }

    pub fn phase(&self) -> GesturePhase {
        self.phase
    }

    /// Pointer currently tracked, if any
    pub fn pointer_id(&self) -> Option<PointerId> {
        self.pointer_id
    }

    pub fn is_rotating(&self) -> bool {
        self.phase == GesturePhase::Rotate
    }

    /// Mean of the current velocity window
    pub fn smoothed_velocity(&self) -> f64 {
        self.window.mean()
    }

    pub fn on_down(&mut self, sample: &PointerSample) -> Option<GestureEvent> {
        if !sample.is_primary_button || self.phase != GesturePhase::Idle {
            return None;
        }

        self.phase = GesturePhase::Pending;
        self.pointer_id = Some(sample.pointer_id);
        self.start = sample.position;
        self.last = sample.position;
        self.last_timestamp_ms = finite_or(sample.timestamp_ms, 0.0);
        self.window.clear();
        self.last_velocity = 0.0;

        Some(GestureEvent::Pending {
            pointer_id: sample.pointer_id,
        })
    }

    pub fn on_move(&mut self, sample: &PointerSample) -> Option<GestureEvent> {
        if self.pointer_id != Some(sample.pointer_id) {
            return None;
        }

        match self.phase {
            GesturePhase::Idle => None,
            GesturePhase::Pending => {
                let offset = sample.position - self.start;
                if !offset.is_finite() || offset.length() < self.settings.threshold {
                    return None;
                }

                if offset.x.abs() * self.settings.horizontal_bias > offset.y.abs() {
                    log::debug!(
                        "rotate gesture committed for {:?} (dx {:.1}, dy {:.1})",
                        sample.pointer_id,
                        offset.x,
                        offset.y
                    );
                    self.phase = GesturePhase::Rotate;
                    Some(GestureEvent::Rotate(self.advance(sample, true)))
                } else {
                    log::debug!(
                        "vertical intent for {:?} (dx {:.1}, dy {:.1}), passing through",
                        sample.pointer_id,
                        offset.x,
                        offset.y
                    );
                    self.reset();
                    Some(GestureEvent::Rejected {
                        pointer_id: sample.pointer_id,
                    })
                }
            }
            GesturePhase::Rotate => Some(GestureEvent::Rotate(self.advance(sample, false))),
        }
    }

    pub fn on_up(&mut self, sample: &PointerSample) -> Option<GestureEvent> {
        self.finish(sample.pointer_id, false)
    }

    pub fn on_cancel(&mut self, sample: &PointerSample) -> Option<GestureEvent> {
        self.finish(sample.pointer_id, true)
    }

    /// The pointer left the hit area
    ///
    /// Leaving with a button still held is not a release, so fast flicks that
    /// overshoot the ring are not cut short.
    pub fn on_leave(&mut self, sample: &PointerSample, buttons_down: bool) -> Option<GestureEvent> {
        if buttons_down {
            return None;
        }
        self.finish(sample.pointer_id, false)
    }

    /// Drop any gesture without emitting events
    pub fn reset(&mut self) {
        self.phase = GesturePhase::Idle;
        self.pointer_id = None;
        self.window.clear();
        self.last_velocity = 0.0;
    }

    fn finish(&mut self, pointer_id: PointerId, cancelled: bool) -> Option<GestureEvent> {
        if self.pointer_id != Some(pointer_id) {
            return None;
        }

        let event = match self.phase {
            GesturePhase::Idle => None,
            GesturePhase::Pending => Some(GestureEvent::Abandoned { pointer_id }),
            GesturePhase::Rotate => Some(GestureEvent::Released {
                pointer_id,
                smoothed_velocity: self.window.mean(),
                last_velocity: self.last_velocity,
                cancelled,
            }),
        };
        self.reset();
        event
    }

    fn advance(&mut self, sample: &PointerSample, committed: bool) -> RotateStep {
        let timestamp = finite_or(sample.timestamp_ms, self.last_timestamp_ms);
        let elapsed = (timestamp - self.last_timestamp_ms) / 1000.0;
        let dt = if elapsed.is_finite() {
            elapsed.max(self.feel.min_sample_dt)
        } else {
            self.feel.min_sample_dt
        };

        // The committing move spans everything since the press
        let dx: f32 = match sample.native_delta {
            Some(delta) if !committed && delta.x.is_finite() => delta.x,
            _ => sample.position.x - self.last.x,
        };
        let dx = f64::from(dx);

        let intensity = drag_intensity(dx / dt, &self.feel);
        let raw = dx * self.settings.drag_sensitivity * intensity;
        let delta_deg = drag_curve(raw, intensity, self.settings.step_deg, &self.feel);
        let velocity = delta_deg / dt;

        self.window.push(velocity);
        self.last_velocity = velocity;
        self.last = sample.position;
        self.last_timestamp_ms = self.last_timestamp_ms.max(timestamp);

        log::trace!("rotate step {delta_deg:.3}° ({velocity:.1}°/s, intensity {intensity:.2})");
        RotateStep {
            delta_deg,
            velocity,
            smoothed_velocity: self.window.mean(),
            dt,
            committed,
        }
    }
}

impl Default for GestureRecognizer {
    fn default() -> Self {
        Self::new(GestureSettings::default(), DragFeel::default())
    }
}

fn finite_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        fallback
    }
}
