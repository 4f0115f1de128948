//! Angular grid helpers shared by the physics and layout passes
//!
//! Rotation is kept as an unbounded angle in degrees; these helpers derive
//! item-aligned angles from it without ever wrapping the accumulator itself.

/// Angular spacing between adjacent items (`360 / item_count`)
///
/// A count of zero is treated as one item.
pub fn step_deg(item_count: usize) -> f64 {
    360.0 / item_count.max(1) as f64
}

/// Wrap an angle into `[0, 360)`
pub fn normalize_deg(angle: f64) -> f64 {
    if !angle.is_finite() {
        return 0.0;
    }
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid rounds tiny negative inputs up to exactly 360
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Grid line closest to `angle`
pub fn nearest_grid(angle: f64, step: f64) -> f64 {
    (angle / step).round() * step
}

/// Signed distance from the nearest grid line to `angle`
pub fn grid_offset(angle: f64, step: f64) -> f64 {
    angle - nearest_grid(angle, step)
}

/// Sign of `x`, mapping zero to zero (unlike [`f64::signum`])
pub fn sign(x: f64) -> f64 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Rotation nearest to `reference` that brings `index` to the front
pub fn rotation_for_index(index: usize, item_count: usize, reference: f64) -> f64 {
    let count = item_count.max(1);
    let step = step_deg(count);
    let base = -((index % count) as f64) * step;
    nearest_grid(base + ((reference - base) / 360.0).round() * 360.0, step)
}
