//! Drag intensity and the drag curve
//!
//! Intensity is a speed-dependent gain: a pointer at rest moves the ring by
//! `drag_sensitivity` degrees per pixel, a fast flick by up to 3.4 times
//! that. The curve then clamps single-move spikes and compresses large deltas
//! while leaving small motion linear.

use ring_physics::{sign, DragFeel};

/// Map pointer speed (px/s) to a drag gain
pub fn drag_intensity(speed_px_per_s: f64, feel: &DragFeel) -> f64 {
    let t = if feel.fast_pointer_speed > 0.0 {
        (speed_px_per_s.abs() / feel.fast_pointer_speed).clamp(0.0, 1.0)
    } else {
        1.0
    };
    let t = if t.is_finite() { t } else { 0.0 };
    feel.min_intensity + (feel.max_intensity - feel.min_intensity) * t
}

/// Shape a raw rotation delta (degrees)
///
/// The magnitude is clamped to `step·(clamp_base + intensity·gain)`. Beyond
/// the knee the curve follows `knee·(|d|/knee)^exp`, with the faster
/// exponent once intensity passes the fast threshold. Sign is preserved and
/// the result never exceeds the input magnitude.
pub fn drag_curve(delta_deg: f64, intensity: f64, step_deg: f64, feel: &DragFeel) -> f64 {
    if !delta_deg.is_finite() {
        return 0.0;
    }
    let limit = step_deg * (feel.curve_clamp_base + intensity * feel.curve_clamp_intensity_gain);
    let magnitude = delta_deg.abs().min(limit.max(0.0));
    let exponent = if intensity > feel.fast_intensity_threshold {
        feel.curve_exponent_fast
    } else {
        feel.curve_exponent
    };

    let knee = feel.curve_knee_deg;
    let shaped = if knee <= 0.0 || magnitude <= knee {
        magnitude
    } else {
        knee * (magnitude / knee).powf(exponent)
    };
    sign(delta_deg) * shaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intensity_range() {
        let feel = DragFeel::default();
        assert_eq!(drag_intensity(0.0, &feel), 1.0);
        assert!((drag_intensity(900.0, &feel) - 2.2).abs() < 1e-12);
        assert_eq!(drag_intensity(1800.0, &feel), 3.4);
        assert_eq!(drag_intensity(50_000.0, &feel), 3.4);
        assert_eq!(drag_intensity(f64::NAN, &feel), 1.0);
    }

    #[test]
    fn test_small_motion_stays_linear() {
        let feel = DragFeel::default();
        assert_eq!(drag_curve(0.5, 1.0, 45.0, &feel), 0.5);
        assert_eq!(drag_curve(-0.75, 3.0, 45.0, &feel), -0.75);
    }

    #[test]
    fn test_large_motion_is_compressed() {
        let feel = DragFeel::default();
        let slow = drag_curve(20.0, 1.2, 45.0, &feel);
        assert!((slow - 20.0_f64.powf(0.9)).abs() < 1e-9);

        let fast = drag_curve(-20.0, 2.0, 45.0, &feel);
        assert!((fast + 20.0_f64.powf(0.82)).abs() < 1e-9);
    }

    #[test]
    fn test_spikes_are_clamped() {
        let feel = DragFeel::default();
        // limit = 45 * (1.2 + 1.0 * 1.6) = 126
        let spike = drag_curve(10_000.0, 1.0, 45.0, &feel);
        assert!((spike - 126.0_f64.powf(0.9)).abs() < 1e-9);
    }

    #[test]
    fn test_curve_never_amplifies() {
        let feel = DragFeel::default();
        for i in 0..200 {
            let delta = i as f64 * 0.37;
            for intensity in [1.0, 1.5, 3.4] {
                assert!(drag_curve(delta, intensity, 45.0, &feel) <= delta);
            }
        }
    }
}
