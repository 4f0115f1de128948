//! # ring-engine
//!
//! The interactive ring carousel: a fixed set of items on a virtual
//! cylinder that the user spins by drag, wheel or keyboard, with momentum,
//! snap-to-item alignment and an elastic radius.
//!
//! [`RingController`] is the single entry point. It is host-driven: feed it
//! pointer, wheel and key events as they arrive and call
//! [`RingController::tick`] once per displayed frame. Each tick returns a
//! [`RingSnapshot`] with per-item geometry ready for a renderer.
//!
//! ```no_run
//! use ring_engine::{PointerSample, RingConfig, RingController};
//!
//! let mut ring = RingController::new(RingConfig::default());
//! ring.on_pointer_down(PointerSample::new(1, 400.0, 300.0, 0.0));
//! ring.on_pointer_move(PointerSample::new(1, 460.0, 302.0, 50.0));
//! ring.on_pointer_up(PointerSample::new(1, 460.0, 302.0, 50.0));
//! let snapshot = ring.tick(66.0);
//! println!("front item: {}", snapshot.active_index);
//! ```

mod config;
mod controller;
mod haptics;
mod observer;
mod snapshot;

pub use config::*;
pub use controller::*;
pub use haptics::*;
pub use observer::*;
pub use snapshot::*;

pub use ring_gesture::{
    CaptureError, GesturePhase, NoCapture, PointerCapture, PointerId, PointerSample,
};
pub use ring_layout::{IndexChange, ItemTransform, Orientation};
pub use ring_physics::FeelParams;
