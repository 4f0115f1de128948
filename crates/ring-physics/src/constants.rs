//! Default feel constants for the ring simulation
//!
//! These values were tuned by hand for a ring of cards on a display-rate
//! tick. They are the defaults of [`crate::FeelParams`], which is where a
//! host overrides them.

// Drag shaping

/// Pointer speed (px/s) at which drag intensity saturates
pub const FAST_POINTER_SPEED: f64 = 1800.0;

/// Drag gain for a stationary pointer
pub const MIN_INTENSITY: f64 = 1.0;

/// Drag gain at or above [`FAST_POINTER_SPEED`]
pub const MAX_INTENSITY: f64 = 3.4;

/// Intensity above which the fast curve exponent is used
pub const FAST_INTENSITY_THRESHOLD: f64 = 1.4;

/// Drag curve exponent for fast flicks
pub const CURVE_EXPONENT_FAST: f64 = 0.82;

/// Drag curve exponent for ordinary drags
pub const CURVE_EXPONENT: f64 = 0.9;

/// Per-move clamp, in steps, before intensity is added
pub const CURVE_CLAMP_BASE: f64 = 1.2;

/// Per-move clamp growth, in steps per unit of intensity
pub const CURVE_CLAMP_INTENSITY_GAIN: f64 = 1.6;

/// Deltas below this magnitude (degrees) pass through the curve unchanged
pub const CURVE_KNEE_DEG: f64 = 1.0;

/// Smallest sample interval used for velocity estimates (1/240 s)
pub const MIN_SAMPLE_DT: f64 = 1.0 / 240.0;

/// Number of samples in the smoothing window
pub const VELOCITY_WINDOW: usize = 6;

// Release model

/// Weight of the peak drag velocity in the release estimate
pub const PEAK_VELOCITY_WEIGHT: f64 = 0.85;

/// Release boost per deg/s² of peak acceleration
pub const ACCEL_BOOST: f64 = 0.015;

/// Upper bound of the acceleration boost (deg/s)
pub const ACCEL_BOOST_CAP: f64 = 120.0;

/// Energy integral saturation (deg²/s²)
pub const ENERGY_CAP: f64 = 1.0e6;

/// Release boost at saturated energy (deg/s)
pub const ENERGY_BOOST: f64 = 90.0;

/// Energy above which a flick is guaranteed a visible coast
pub const ENERGY_FLOOR_THRESHOLD: f64 = 2.0e4;

/// Minimum coast velocity, in steps per second, for energetic flicks
pub const RELEASE_FLOOR_STEPS: f64 = 2.5;

/// Hard cap on release velocity (deg/s)
pub const MAX_RELEASE_VELOCITY: f64 = 840.0;

/// Peak velocity, in steps per second, under which a drag counts as slow
pub const SLOW_DRAG_STEPS: f64 = 3.5;

/// Slow frames needed before a drag is classified as deliberate
pub const SLOW_DRAG_MIN_FRAMES: u32 = 12;

// Snap

/// Delay after drag end before the snap force engages (ms)
pub const SNAP_DEBOUNCE_MS: f64 = 120.0;

/// Unsettled motion after which snapping engages regardless (ms)
pub const FORCE_SNAP_MS: f64 = 900.0;

/// Extra exponential velocity decay while force-snapping (1/s)
pub const FORCE_SNAP_DECAY: f64 = 4.0;

/// Entry velocity threshold, in steps per second
pub const SNAP_ENTRY_STEPS: f64 = 1.05;

/// Capture window around a grid line, in steps
pub const SNAP_CAPTURE_STEPS: f64 = 0.55;

/// Snap strength multiplier at the target
pub const SNAP_STRENGTH_BASE: f64 = 0.85;

/// Additional strength multiplier one full step away
pub const SNAP_STRENGTH_FAR_GAIN: f64 = 0.45;

/// Snap damping one full step away (1/s)
pub const SNAP_DAMPING_BASE: f64 = 6.0;

/// Additional snap damping at the target (1/s)
pub const SNAP_DAMPING_NEAR_GAIN: f64 = 6.0;

/// Lower bound of the proximity factor so distant targets still pull
pub const SNAP_MIN_PULL: f64 = 0.1;

/// Extra pull per step of distance beyond [`SNAP_FAR_PULL_START_STEPS`]
pub const SNAP_FAR_PULL_GAIN: f64 = 2.0;

/// Distance (in steps) past which the far pull applies
pub const SNAP_FAR_PULL_START_STEPS: f64 = 0.5;

/// Settle window as a fraction of a step
pub const SETTLE_FRACTION: f64 = 0.018;

/// Settle window floor (degrees)
pub const SETTLE_MIN_DEG: f64 = 0.01;

/// Settle velocity as a fraction of the snap velocity threshold
pub const SETTLE_VELOCITY_FRACTION: f64 = 0.12;

/// Offsets below this count as on the grid (degrees)
pub const GRID_EPSILON_DEG: f64 = 1e-6;

/// Settle velocity floor (deg/s)
pub const SETTLE_MIN_VELOCITY: f64 = 0.04;

/// Wheel/key impulse, in steps per second
pub const DISCRETE_IMPULSE_STEPS: f64 = 3.0;

/// Window in which repeated discrete input boosts the impulse (ms)
pub const DISCRETE_RECENCY_MS: f64 = 320.0;

/// Impulse multiplier for back-to-back discrete input
pub const DISCRETE_MAX_BOOST: f64 = 6.0;

// Integration

/// Blend rate toward an externally driven rotation (1/s)
pub const DRIVEN_BLEND_RATE: f64 = 12.0;

/// Angular velocity treated as stopped (deg/s)
pub const REST_VELOCITY: f64 = 0.01;

/// Largest frame step the integrators accept (s)
pub const MAX_FRAME_DT: f64 = 0.05;

/// Frame step used for malformed or non-advancing timestamps (s)
pub const MIN_FRAME_DT: f64 = 0.001;
