//! Elastic ring radius
//!
//! The ring widens while it spins fast and springs back once it slows. The
//! radius is a damped spring `a = −k(x − target) − c·v` whose target grows
//! with angular speed.

use std::f64::consts::PI;

/// Spring state of the ring radius
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadiusSpring {
    pub current: f64,
    pub target: f64,
    pub velocity: f64,
}

impl RadiusSpring {
    /// A spring at rest at `radius`
    pub fn new(radius: f64) -> Self {
        let radius = radius.max(0.0);
        Self {
            current: radius,
            target: radius,
            velocity: 0.0,
        }
    }

    /// Integrate one frame step (semi-implicit Euler: velocity, then position)
    pub fn step(&mut self, dt: f64, stiffness: f64, damping: f64) {
        let acceleration = -stiffness * (self.current - self.target) - damping * self.velocity;
        self.velocity += acceleration * dt;
        self.current += self.velocity * dt;

        if !self.current.is_finite() || !self.velocity.is_finite() {
            log::warn!("radius spring diverged, resetting to target {:.1}", self.target);
            self.current = self.target;
            self.velocity = 0.0;
        }
        if self.current < 0.0 {
            self.current = 0.0;
            self.velocity = self.velocity.max(0.0);
        }
    }

    /// Whether the spring sits within `epsilon` of its target with no motion
    pub fn is_at_rest(&self, epsilon: f64) -> bool {
        (self.current - self.target).abs() < epsilon && self.velocity.abs() < epsilon
    }
}

/// Radius the ring stretches toward at a given angular velocity
///
/// The elastic term vanishes under reduced motion.
pub fn elastic_target(
    base_radius: f64,
    angular_velocity: f64,
    elasticity: f64,
    velocity_influence: f64,
    reduced_motion: bool,
) -> f64 {
    if reduced_motion {
        return base_radius;
    }
    let influence = if velocity_influence > 0.0 {
        (angular_velocity.abs() / velocity_influence).min(1.0)
    } else {
        1.0
    };
    let stretch = if influence.is_finite() { influence } else { 0.0 };
    base_radius + stretch * base_radius * elasticity
}

/// Smallest radius at which adjacent cards do not overlap
///
/// Cards sit on the vertices of a regular `n`-gon; the chord between
/// neighbours must be at least `card_width + min_gap`. A single item has no
/// neighbour and needs no radius.
pub fn min_spacing_radius(item_count: usize, card_width: f64, min_gap: f64) -> f64 {
    if item_count < 2 {
        return 0.0;
    }
    let chord = (card_width + min_gap).max(0.0);
    chord / (2.0 * (PI / item_count as f64).sin())
}

/// Base radius after auto-spacing is applied
pub fn effective_base_radius(
    base_radius: f64,
    item_count: usize,
    card_width: f64,
    min_gap: f64,
    auto_spacing: bool,
) -> f64 {
    let base = base_radius.max(0.0);
    if auto_spacing {
        base.max(min_spacing_radius(item_count, card_width, min_gap))
    } else {
        base
    }
}
