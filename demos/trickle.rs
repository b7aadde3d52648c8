//! # Trickle
//!
//! Starts with a handful of particles and activates more every tick until
//! the population reaches `max_alive`. Expired particles drop out and wait
//! for a later activation before they are drawn as alive again.
//!
//! ## What This Demonstrates
//!
//! - `Population::Trickle` - gradual activation with `max_alive` / `max_per_frame`
//! - `DrawFilter` - press `F` to hide inactive slots
//!
//! ## Try This
//!
//! - Lower `max_per_frame` to 2 for a sparse stream
//! - Run with `RUST_LOG=debug` to watch the alive count each tick
//!
//! Run with: `cargo run --example trickle`

use sparks::prelude::*;

fn main() -> Result<(), AppError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match std::env::args().nth(1) {
        Some(path) => DemoConfig::from_path(path)?,
        None => DemoConfig::default()
            .with_title("sparks - trickle")
            .with_draw_filter(DrawFilter::AliveOnly)
            .with_emitter(EmitterConfig::trickle(Vec3::ZERO, 4000, 3000, 40, 30..200)),
    };

    sparks::run(config)
}
