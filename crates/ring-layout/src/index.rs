//! Active index and edge-triggered index changes

use ring_physics::{normalize_deg, step_deg};

/// Index of the item facing the viewer
///
/// `round(normalize(−rotation) / step) mod item_count`, so the result is
/// periodic in rotation with period 360.
pub fn active_index(rotation_deg: f64, item_count: usize) -> usize {
    let count = item_count.max(1);
    let slot = (normalize_deg(-rotation_deg) / step_deg(count)).round() as usize;
    slot % count
}

/// A change of the active index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexChange {
    pub previous: usize,
    pub current: usize,
}

/// Emits an [`IndexChange`] only when the index differs from the last one emitted
#[derive(Debug, Clone, Default)]
pub struct ActiveIndexTracker {
    last_emitted: Option<usize>,
}

impl ActiveIndexTracker {
    /// A tracker that treats `initial` as already emitted
    pub fn new(initial: usize) -> Self {
        Self {
            last_emitted: Some(initial),
        }
    }

    pub fn last_emitted(&self) -> Option<usize> {
        self.last_emitted
    }

    /// Feed the current index; returns a change on edges only
    pub fn observe(&mut self, index: usize) -> Option<IndexChange> {
        match self.last_emitted.replace(index) {
            Some(previous) if previous != index => Some(IndexChange {
                previous,
                current: index,
            }),
            _ => None,
        }
    }
}
