//! # sparks
//!
//! Host-side particle emitter with a small wgpu viewer.
//!
//! An [`Emitter`] owns a fixed pool of particle slots stored as parallel
//! arrays. Each call to [`Emitter::update`] applies gravity, moves, ages and
//! grows every slot, then respawns the ones whose lifetime ran out. A renderer
//! reads the arrays back after each tick.
//!
//! ## Quick Start
//!
//! ```ignore
//! use sparks::prelude::*;
//!
//! fn main() -> Result<(), AppError> {
//!     env_logger::init();
//!     sparks::run(DemoConfig::default().with_emitter(EmitterConfig::new(Vec3::ZERO, 1000)))
//! }
//! ```
//!
//! ## Headless use
//!
//! ```ignore
//! let mut emitter = Emitter::trickle(Vec3::ZERO, 2000, 1500, 40, 30..200)?;
//! for _ in 0..600 {
//!     emitter.update(0.01);
//! }
//! println!("{} alive", emitter.alive_count());
//! ```
//!
//! ## Populations
//!
//! | Policy | Behaviour |
//! |--------|-----------|
//! | [`Population::Burst`] | all slots spawn at once and are always alive |
//! | [`Population::Trickle`] | slots activate gradually, capped by `max_alive` and `max_per_frame` |

mod app;
pub mod config;
mod emitter;
pub mod error;
pub mod gpu;
pub mod pool;
pub mod render;
pub mod spawn;
pub mod time;

pub use app::run;
pub use config::{DemoConfig, EmitterConfig, Population};
pub use emitter::Emitter;
pub use error::{AppError, ConfigError, GpuError};
pub use glam::Vec3;
pub use pool::ParticlePool;
pub use render::{DrawFilter, ParticleVertex};
pub use spawn::SpawnSampler;
pub use time::FrameClock;

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use sparks::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::{DemoConfig, EmitterConfig, Population};
    pub use crate::emitter::Emitter;
    pub use crate::error::{AppError, ConfigError};
    pub use crate::render::DrawFilter;
    pub use crate::time::FrameClock;
    pub use crate::Vec3;
}
