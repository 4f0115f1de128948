//! Ring carousel demo
//!
//! Drives a ring through a scripted session (a jittered flick, wheel paging,
//! keyboard navigation and a stretch of host-driven scrolling) and logs what
//! a renderer would receive. Pass a JSON file to override the configuration:
//!
//! ```text
//! RUST_LOG=debug cargo run -- ring.json
//! ```

use glam::Vec3;
use rand::Rng;
use ring_engine::{
    HapticPulse, HapticSink, PointerSample, RingConfig, RingController, RingKey, RingSnapshot,
    UnknownKey,
};
use std::path::PathBuf;
use std::process::ExitCode;
use thiserror::Error;

const FRAME_MS: f64 = 1000.0 / 60.0;
const MAX_SETTLE_FRAMES: usize = 60 * 10;

#[derive(Debug, Error)]
enum DemoError {
    #[error("could not read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error(transparent)]
    Key(#[from] UnknownKey),
}

/// Haptics that only log
struct LogHaptics;

impl HapticSink for LogHaptics {
    fn pulse(&mut self, pulse: HapticPulse) {
        log::debug!("haptic {pulse:?}");
    }
}

/// Host-side clock and frame loop
struct Session {
    ring: RingController,
    now_ms: f64,
}

impl Session {
    fn frame(&mut self) -> RingSnapshot {
        self.now_ms += FRAME_MS;
        self.ring.tick(self.now_ms)
    }

    /// Tick until the ring comes to rest
    fn run_until_rest(&mut self, label: &str) -> RingSnapshot {
        let mut snapshot = self.frame();
        let mut frames = 1;
        while !snapshot.is_at_rest() && frames < MAX_SETTLE_FRAMES {
            if frames % 15 == 0 {
                log::debug!(
                    "  {label}: {:>8.2}° {:>8.1}°/s radius {:.1} {:?}",
                    snapshot.rotation_deg,
                    snapshot.angular_velocity,
                    snapshot.radius,
                    snapshot.phase
                );
            }
            snapshot = self.frame();
            frames += 1;
        }

        log::info!(
            "{label}: rest at {:.2}° on item {} after {frames} frames",
            snapshot.rotation_deg,
            snapshot.active_index
        );
        snapshot
    }

    fn flick(&mut self, rng: &mut impl Rng) {
        let (mut x, mut y) = (400.0_f32, 300.0_f32);
        self.ring.on_pointer_down(PointerSample::new(1, x, y, self.now_ms));

        for _ in 0..6 {
            self.now_ms += FRAME_MS + rng.random_range(-3.0..3.0);
            x += 14.0 + rng.random_range(-4.0..4.0);
            y += rng.random_range(-1.5..1.5);
            self.ring.on_pointer_move(PointerSample::new(1, x, y, self.now_ms));
            self.ring.tick(self.now_ms);
        }

        self.ring.on_pointer_up(PointerSample::new(1, x, y, self.now_ms));
        log::info!(
            "flick released at {:.2}° with {:.1}°/s",
            self.ring.rotation_deg(),
            self.ring.angular_velocity()
        );
    }
}

fn load_config(path: Option<PathBuf>) -> Result<RingConfig, DemoError> {
    match path {
        Some(path) => {
            log::info!("Loading config from {}", path.display());
            let text = std::fs::read_to_string(&path)?;
            Ok(serde_json::from_str(&text)?)
        }
        None => Ok(RingConfig::default()),
    }
}

fn log_layout(snapshot: &RingSnapshot) {
    for item in snapshot.items_back_to_front() {
        let position: Vec3 = item.position();
        log::info!(
            "  item {} at ({:>7.1}, {:>7.1}) yaw {:>6.1}° depth {:>5.2}",
            item.index,
            position.x,
            position.z,
            item.yaw_deg,
            item.depth
        );
    }
}

fn run() -> Result<(), DemoError> {
    let config = load_config(std::env::args_os().nth(1).map(PathBuf::from))?;
    let mut ring = RingController::new(config).with_haptics(LogHaptics);
    ring.on_active_index_change(|change| {
        log::info!("active item {} -> {}", change.previous, change.current);
    });

    log::info!(
        "✓ Ring with {} items, step {:.1}°, radius {:.1}",
        ring.config().item_count(),
        ring.step_deg(),
        ring.effective_base_radius()
    );

    let mut session = Session { ring, now_ms: 0.0 };
    let mut rng = rand::rng();
    session.frame();

    session.flick(&mut rng);
    session.run_until_rest("flick");

    for _ in 0..3 {
        session.now_ms += 40.0;
        session.ring.on_wheel(120.0, session.now_ms);
    }
    session.run_until_rest("wheel x3");

    for name in ["next", "next", "prev", "end", "home"] {
        let key: RingKey = name.parse()?;
        session.ring.on_key(key);
        session.run_until_rest(name);
    }

    log::info!("Host scroll takes over");
    for step in 0..=30 {
        let progress = f64::from(step) / 60.0;
        session.ring.set_external_driven_progress(Some(progress));
        session.frame();
    }
    session.ring.set_external_driven_progress(None);
    let snapshot = session.run_until_rest("scroll");

    log::info!("Final layout (back to front):");
    log_layout(&snapshot);

    session.ring.destroy();
    Ok(())
}

fn main() -> ExitCode {
    // Initialize logger (RUST_LOG=debug for verbose output)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Starting ring carousel demo...");
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}
