//! # ring-gesture
//!
//! Pointer gesture recognition for the ring carousel.
//!
//! Raw pointer samples go in; rotate deltas and velocities come out. The
//! recognizer decides whether a press is a horizontal rotate gesture or a
//! vertical scroll that belongs to the page, and shapes accepted motion so
//! fast flicks travel further per pixel than slow drags. It has no
//! dependency on any windowing or DOM layer.

mod capture;
mod curve;
mod pointer;
mod recognizer;
mod velocity;

pub use capture::*;
pub use curve::*;
pub use pointer::*;
pub use recognizer::*;
pub use velocity::*;
