//! # ring-layout
//!
//! Converts ring rotation and radius into per-item geometry.
//!
//! The output is plain geometric data (ring angle, position, yaw, depth) in a
//! `Pod` layout a renderer can upload or turn into transforms as it sees fit.

mod index;
mod layout;

pub use index::*;
pub use layout::*;
