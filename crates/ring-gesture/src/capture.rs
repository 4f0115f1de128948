//! Pointer capture at the host boundary
//!
//! Capturing keeps a drag alive when the pointer leaves the ring's hit area.
//! Hosts that cannot capture still get working rotation; only drag
//! continuity outside the hit area degrades.

use crate::pointer::PointerId;
use thiserror::Error;

/// Why the host could not capture or release a pointer
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("pointer capture is not supported by this surface")]
    Unsupported,
    #[error("pointer {0:?} is no longer active")]
    InactivePointer(PointerId),
    #[error("pointer capture failed: {0}")]
    Platform(String),
}

/// Host hook for capturing the pointer that drives a rotate gesture
pub trait PointerCapture {
    fn capture(&mut self, pointer: PointerId) -> Result<(), CaptureError>;
    fn release(&mut self, pointer: PointerId) -> Result<(), CaptureError>;
}

/// Capture sink for hosts without pointer capture
#[derive(Debug, Default, Clone, Copy)]
pub struct NoCapture;

impl PointerCapture for NoCapture {
    fn capture(&mut self, _pointer: PointerId) -> Result<(), CaptureError> {
        Ok(())
    }

    fn release(&mut self, _pointer: PointerId) -> Result<(), CaptureError> {
        Ok(())
    }
}
