//! Per-item ring placement

use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use ring_physics::{normalize_deg, step_deg};
use serde::{Deserialize, Serialize};

/// Which way each card faces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Card front points away from the ring axis
    #[default]
    Outward,
    /// Card front points toward the ring axis (flipped 180°)
    Inward,
    /// Card always faces the viewer (billboard)
    Camera,
}

/// Render-ready geometry for one item
///
/// The ring axis is +Y; angle 0 sits at +Z, closest to the viewer.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct ItemTransform {
    /// Position on the ring
    pub position: [f32; 3],
    /// Item index
    pub index: u32,
    /// Ring angle including rotation, in `[0, 360)`
    pub angle_deg: f32,
    /// Yaw of the card front in world space, in `[0, 360)`
    pub yaw_deg: f32,
    /// Distance from the ring axis
    pub distance: f32,
    /// `cos(angle)`: 1 at the front, -1 at the back
    pub depth: f32,
}

impl ItemTransform {
    /// Placement of item `index` on a ring
    pub fn new(
        index: usize,
        step_deg: f64,
        rotation_deg: f64,
        radius: f64,
        orientation: Orientation,
    ) -> Self {
        let angle = normalize_deg(index as f64 * step_deg + rotation_deg);
        let theta = angle.to_radians();
        let radius = radius.max(0.0);
        let position = Vec3::new(
            (radius * theta.sin()) as f32,
            0.0,
            (radius * theta.cos()) as f32,
        );

        let yaw = match orientation {
            Orientation::Outward => angle,
            Orientation::Inward => normalize_deg(angle + 180.0),
            Orientation::Camera => 0.0,
        };

        Self {
            position: position.to_array(),
            index: index as u32,
            angle_deg: angle as f32,
            yaw_deg: yaw as f32,
            distance: radius as f32,
            depth: theta.cos() as f32,
        }
    }

    pub fn position(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }
}

/// Lay out every item of the ring into `out`, reusing its allocation
pub fn layout_ring(
    out: &mut Vec<ItemTransform>,
    item_count: usize,
    rotation_deg: f64,
    radius: f64,
    orientation: Orientation,
) {
    let count = item_count.max(1);
    let step = step_deg(count);
    out.clear();
    out.extend(
        (0..count).map(|index| ItemTransform::new(index, step, rotation_deg, radius, orientation)),
    );
}
