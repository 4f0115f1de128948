//! Platform-neutral pointer samples

use glam::Vec2;

/// Identifier of a pointer (mouse, pen, or one touch contact)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PointerId(pub u32);

/// A single pointer event as delivered by the host
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSample {
    pub pointer_id: PointerId,
    /// Position in surface pixels
    pub position: Vec2,
    /// Host timestamp in milliseconds
    pub timestamp_ms: f64,
    /// Whether the primary button (or a touch contact) is involved
    pub is_primary_button: bool,
    /// Inter-frame movement reported by the platform, when it has one
    pub native_delta: Option<Vec2>,
}

impl PointerSample {
    /// A primary-button sample without a native delta
    pub fn new(pointer_id: u32, x: f32, y: f32, timestamp_ms: f64) -> Self {
        Self {
            pointer_id: PointerId(pointer_id),
            position: Vec2::new(x, y),
            timestamp_ms,
            is_primary_button: true,
            native_delta: None,
        }
    }

    pub fn with_native_delta(mut self, delta: Vec2) -> Self {
        self.native_delta = Some(delta);
        self
    }

    pub fn with_primary_button(mut self, primary: bool) -> Self {
        self.is_primary_button = primary;
        self
    }
}
