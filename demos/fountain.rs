//! # Fountain
//!
//! A thousand particles burst from the origin, arc under gravity and
//! respawn as soon as their lifetime runs out.
//!
//! ## What This Demonstrates
//!
//! - `Population::Burst` - every slot spawns at startup and is always alive
//! - Fixed-step ticking: `update(0.01)` every 16 ms
//!
//! ## Try This
//!
//! - Pass a JSON config path: `cargo run --example fountain -- fountain.json`
//! - Press `Space` to pause, `R` to restart
//! - Set `RUST_LOG=debug` to see per-tick logging
//!
//! Run with: `cargo run --example fountain`

use sparks::prelude::*;

fn main() -> Result<(), AppError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match std::env::args().nth(1) {
        Some(path) => DemoConfig::from_path(path)?,
        None => DemoConfig::default()
            .with_title("sparks - fountain")
            .with_emitter(EmitterConfig::new(Vec3::ZERO, 1000)),
    };

    sparks::run(config)
}
