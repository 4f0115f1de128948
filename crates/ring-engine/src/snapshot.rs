//! Render-ready output of a tick

use ring_layout::{IndexChange, ItemTransform};

/// What the ring is doing this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MotionPhase {
    /// At rest
    #[default]
    Idle,
    /// A rotate gesture owns the rotation
    Dragging,
    /// Following host scroll progress
    Driven,
    /// Spinning freely under friction
    Coasting,
    /// Pulled toward a grid line or explicit target
    Snapping,
}

/// State of the ring after a tick
#[derive(Debug, Clone, PartialEq)]
pub struct RingSnapshot {
    pub rotation_deg: f64,
    pub angular_velocity: f64,
    /// Current dynamic radius
    pub radius: f64,
    pub active_index: usize,
    /// Set only on the tick the active index changed
    pub index_change: Option<IndexChange>,
    pub phase: MotionPhase,
    pub snap_pending: bool,
    /// One transform per item, in item order
    pub items: Vec<ItemTransform>,
}

impl RingSnapshot {
    /// Whether nothing is moving
    pub fn is_at_rest(&self) -> bool {
        self.phase == MotionPhase::Idle && self.angular_velocity == 0.0 && !self.snap_pending
    }

    /// Items sorted back to front, for painters without a depth buffer
    pub fn items_back_to_front(&self) -> Vec<ItemTransform> {
        let mut items = self.items.clone();
        items.sort_by(|a, b| a.depth.total_cmp(&b.depth));
        items
    }
}
