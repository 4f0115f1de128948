//! Best-effort haptic feedback hook

/// Pulse kinds the ring emits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HapticPulse {
    /// The active item changed
    Detent,
    /// A snap locked onto its target
    Settle,
}

/// Host hook for vibration or other tactile feedback
pub trait HapticSink {
    fn pulse(&mut self, pulse: HapticPulse);
}

/// Sink for hosts without haptics
#[derive(Debug, Default, Clone, Copy)]
pub struct NoHaptics;

impl HapticSink for NoHaptics {
    fn pulse(&mut self, _pulse: HapticPulse) {}
}
