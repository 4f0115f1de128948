//! # Ring Physics
//!
//! Rotational dynamics for a ring carousel: one angular degree of freedom
//! with inertia, a snap-to-item controller, the release-velocity model for
//! finished drags, and the elastic radius spring.

pub mod angular;
pub mod constants;
pub mod grid;
pub mod params;
pub mod radius;
pub mod release;
pub mod snap;

pub use angular::*;
pub use grid::*;
pub use params::*;
pub use radius::*;
pub use release::*;
pub use snap::*;
