//! Ring configuration and partial updates

use ring_layout::Orientation;
use ring_physics::{effective_base_radius, step_deg, FeelParams};
use serde::{Deserialize, Serialize};

/// Everything a ring is created with
///
/// Missing fields fall back to their defaults when deserialized, so a host
/// can ship a partial JSON document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RingConfig {
    /// Number of items on the ring (0 is treated as 1)
    pub item_count: usize,
    /// Configured ring radius in pixels
    pub base_radius: f64,
    pub card_width: f64,
    pub card_height: f64,
    /// Minimum gap between neighbouring cards when auto-spacing
    pub min_gap_px: f64,
    /// Grow the radius so cards never overlap
    pub auto_radius_spacing: bool,
    pub orientation: Orientation,
    /// Degrees of rotation per dragged pixel at unit intensity
    pub drag_sensitivity: f64,
    /// Exponential decay rate of free spin (1/s)
    pub friction: f64,
    /// Keep velocity after a drag ends
    pub inertia: bool,
    pub snap_enabled: bool,
    /// Speed (deg/s) under which snapping may begin
    pub snap_velocity_threshold: f64,
    /// Peak snap acceleration (deg/s²)
    pub snap_strength: f64,
    /// Fractional radius growth at full speed
    pub radius_elasticity: f64,
    /// Speed (deg/s) at which the radius reaches full stretch
    pub radius_vel_influence: f64,
    pub spring_stiffness: f64,
    pub spring_damping: f64,
    /// Pixels of travel before gesture intent is decided
    pub gesture_threshold: f32,
    /// Weight of horizontal travel when deciding gesture intent
    pub horizontal_bias: f32,
    /// Full ring turns across the host's scroll progress range
    pub scroll_rotations: f64,
    pub feel: FeelParams,
}

impl Default for RingConfig {
    fn default() -> Self {
        Self {
            item_count: 8,
            base_radius: 320.0,
            card_width: 240.0,
            card_height: 320.0,
            min_gap_px: 24.0,
            auto_radius_spacing: true,
            orientation: Orientation::Outward,
            drag_sensitivity: 0.35,
            friction: 2.2,
            inertia: true,
            snap_enabled: true,
            snap_velocity_threshold: 30.0,
            snap_strength: 240.0,
            radius_elasticity: 0.12,
            radius_vel_influence: 720.0,
            spring_stiffness: 120.0,
            spring_damping: 18.0,
            gesture_threshold: 8.0,
            horizontal_bias: 1.2,
            scroll_rotations: 1.0,
            feel: FeelParams::default(),
        }
    }
}

/// Replace a non-finite or negative value with its default
fn non_negative(name: &str, value: f64, fallback: f64) -> f64 {
    if value.is_finite() && value >= 0.0 {
        value
    } else {
        log::warn!("config `{name}` = {value} is invalid, using {fallback}");
        fallback
    }
}

fn non_negative_f32(name: &str, value: f32, fallback: f32) -> f32 {
    non_negative(name, f64::from(value), f64::from(fallback)) as f32
}

impl RingConfig {
    /// Clamp counts and replace invalid physical quantities and feel values with defaults
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        if self.item_count == 0 {
            log::warn!("config `item_count` = 0, clamping to 1");
            self.item_count = 1;
        }
        self.base_radius = non_negative("base_radius", self.base_radius, defaults.base_radius);
        self.card_width = non_negative("card_width", self.card_width, defaults.card_width);
        self.card_height = non_negative("card_height", self.card_height, defaults.card_height);
        self.min_gap_px = non_negative("min_gap_px", self.min_gap_px, defaults.min_gap_px);
        self.drag_sensitivity =
            non_negative("drag_sensitivity", self.drag_sensitivity, defaults.drag_sensitivity);
        self.friction = non_negative("friction", self.friction, defaults.friction);
        self.snap_velocity_threshold = non_negative(
            "snap_velocity_threshold",
            self.snap_velocity_threshold,
            defaults.snap_velocity_threshold,
        );
        self.snap_strength =
            non_negative("snap_strength", self.snap_strength, defaults.snap_strength);
        self.radius_elasticity =
            non_negative("radius_elasticity", self.radius_elasticity, defaults.radius_elasticity);
        self.radius_vel_influence = non_negative(
            "radius_vel_influence",
            self.radius_vel_influence,
            defaults.radius_vel_influence,
        );
        self.spring_stiffness =
            non_negative("spring_stiffness", self.spring_stiffness, defaults.spring_stiffness);
        self.spring_damping =
            non_negative("spring_damping", self.spring_damping, defaults.spring_damping);
        self.gesture_threshold = non_negative_f32(
            "gesture_threshold",
            self.gesture_threshold,
            defaults.gesture_threshold,
        );
        self.horizontal_bias =
            non_negative_f32("horizontal_bias", self.horizontal_bias, defaults.horizontal_bias);
        if !self.scroll_rotations.is_finite() {
            log::warn!(
                "config `scroll_rotations` is not finite, using {}",
                defaults.scroll_rotations
            );
            self.scroll_rotations = defaults.scroll_rotations;
        }
        self.feel = self.feel.sanitized();
        self
    }

    /// Item count after clamping
    pub fn item_count(&self) -> usize {
        self.item_count.max(1)
    }

    pub fn step_deg(&self) -> f64 {
        step_deg(self.item_count())
    }

    /// Base radius after auto-spacing
    pub fn effective_base_radius(&self) -> f64 {
        effective_base_radius(
            self.base_radius,
            self.item_count(),
            self.card_width,
            self.min_gap_px,
            self.auto_radius_spacing,
        )
    }

    /// Overwrite every field the patch carries
    pub fn apply(&mut self, patch: &RingConfigPatch) {
        macro_rules! patch_fields {
            ($($field:ident),+ $(,)?) => {
                $(
                    if let Some(value) = patch.$field {
                        self.$field = value;
                    }
                )+
            };
        }

        patch_fields!(
            item_count,
            base_radius,
            card_width,
            card_height,
            min_gap_px,
            auto_radius_spacing,
            orientation,
            drag_sensitivity,
            friction,
            inertia,
            snap_enabled,
            snap_velocity_threshold,
            snap_strength,
            radius_elasticity,
            radius_vel_influence,
            spring_stiffness,
            spring_damping,
            gesture_threshold,
            horizontal_bias,
            scroll_rotations,
            feel,
        );
    }
}

/// Partial configuration update; `None` leaves a field untouched
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RingConfigPatch {
    pub item_count: Option<usize>,
    pub base_radius: Option<f64>,
    pub card_width: Option<f64>,
    pub card_height: Option<f64>,
    pub min_gap_px: Option<f64>,
    pub auto_radius_spacing: Option<bool>,
    pub orientation: Option<Orientation>,
    pub drag_sensitivity: Option<f64>,
    pub friction: Option<f64>,
    pub inertia: Option<bool>,
    pub snap_enabled: Option<bool>,
    pub snap_velocity_threshold: Option<f64>,
    pub snap_strength: Option<f64>,
    pub radius_elasticity: Option<f64>,
    pub radius_vel_influence: Option<f64>,
    pub spring_stiffness: Option<f64>,
    pub spring_damping: Option<f64>,
    pub gesture_threshold: Option<f32>,
    pub horizontal_bias: Option<f32>,
    pub scroll_rotations: Option<f64>,
    pub feel: Option<FeelParams>,
}

impl RingConfigPatch {
    /// Whether applying the patch can change ring geometry
    pub fn touches_geometry(&self) -> bool {
        self.item_count.is_some()
            || self.base_radius.is_some()
            || self.card_width.is_some()
            || self.min_gap_px.is_some()
            || self.auto_radius_spacing.is_some()
            || self.orientation.is_some()
    }
}
