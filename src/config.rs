//! Emitter and viewer configuration.
//!
//! Both configs are plain serde structs with chaining `with_*` setters, so they
//! can be built in code or loaded from JSON:
//!
//! ```ignore
//! let config = EmitterConfig::trickle(Vec3::new(1.0, 2.0, 3.0), 100, 50, 200, 30..200)
//!     .with_seed(7);
//! let emitter = Emitter::from_config(&config)?;
//! ```
//!
//! ```json
//! {
//!   "origin": [0.0, 0.0, 0.0],
//!   "capacity": 2000,
//!   "population": { "kind": "trickle", "max_alive": 1500, "max_per_frame": 40 },
//!   "life_range": { "start": 30, "end": 200 }
//! }
//! ```

use std::ops::{Range, RangeInclusive};
use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};
use crate::render::DrawFilter;

/// Downward acceleration applied every tick.
pub const GRAVITY: Vec3 = Vec3::new(0.0, -9.81, 0.0);
/// Magnitude of the random component of a fresh direction.
pub const SPREAD: f32 = 15.0;
/// Size of a freshly spawned particle.
pub const INITIAL_SIZE: f32 = 0.01;
/// Lifetime range (ticks, exclusive end) used by burst emitters.
pub const DEFAULT_LIFE_RANGE: Range<u32> = 10..51;
/// Per-tick size growth for burst emitters.
pub const BURST_SIZE_STEP: f32 = 0.5;
/// Per-tick size growth for trickle emitters.
pub const TRICKLE_SIZE_STEP: f32 = 0.1;
/// How many slots a trickle emitter spawns at construction, before clamping to capacity.
pub const INITIAL_TRICKLE: RangeInclusive<u32> = 10..=50;

/// Population policy of an emitter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Population {
    /// Every slot spawns at construction and is always alive.
    #[default]
    Burst,
    /// A small initial burst, then gradual activation of inactive slots.
    Trickle {
        /// Activation only happens while `alive_count <= max_alive`.
        max_alive: u32,
        /// Upper bound (inclusive) of activations per tick.
        max_per_frame: u32,
    },
}

impl Population {
    /// Per-tick size growth used when the config leaves `size_step` unset.
    pub fn default_size_step(&self) -> f32 {
        match self {
            Population::Burst => BURST_SIZE_STEP,
            Population::Trickle { .. } => TRICKLE_SIZE_STEP,
        }
    }
}

/// Emitter construction parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmitterConfig {
    /// Spawn position shared by every respawned slot.
    pub origin: Vec3,
    /// Number of slots in the pool.
    pub capacity: u32,
    /// `max_life` is sampled from this range (exclusive end).
    pub life_range: Range<u32>,
    /// Random spread added to the emit direction.
    pub spread: f32,
    /// Size assigned at spawn.
    pub initial_size: f32,
    /// Size growth per tick; `None` picks the population default.
    pub size_step: Option<f32>,
    /// Acceleration integrated with a half step every tick.
    pub gravity: Vec3,
    /// Population policy.
    pub population: Population,
    /// RNG seed; `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self {
            origin: Vec3::ZERO,
            capacity: 1000,
            life_range: DEFAULT_LIFE_RANGE,
            spread: SPREAD,
            initial_size: INITIAL_SIZE,
            size_step: None,
            gravity: GRAVITY,
            population: Population::Burst,
            seed: None,
        }
    }
}

impl EmitterConfig {
    /// Burst emitter at `origin` with `capacity` slots.
    pub fn new(origin: Vec3, capacity: u32) -> Self {
        Self {
            origin,
            capacity,
            ..Default::default()
        }
    }

    /// Trickle emitter with population control.
    pub fn trickle(
        origin: Vec3,
        capacity: u32,
        max_alive: u32,
        max_per_frame: u32,
        life_range: Range<u32>,
    ) -> Self {
        Self {
            origin,
            capacity,
            life_range,
            population: Population::Trickle {
                max_alive,
                max_per_frame,
            },
            ..Default::default()
        }
    }

    pub fn with_origin(mut self, origin: Vec3) -> Self {
        self.origin = origin;
        self
    }

    pub fn with_capacity(mut self, capacity: u32) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn with_life_range(mut self, life_range: Range<u32>) -> Self {
        self.life_range = life_range;
        self
    }

    pub fn with_spread(mut self, spread: f32) -> Self {
        self.spread = spread;
        self
    }

    pub fn with_initial_size(mut self, size: f32) -> Self {
        self.initial_size = size;
        self
    }

    pub fn with_size_step(mut self, step: f32) -> Self {
        self.size_step = Some(step);
        self
    }

    pub fn with_gravity(mut self, gravity: Vec3) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn with_population(mut self, population: Population) -> Self {
        self.population = population;
        self
    }

    /// Seed the emitter's RNG for reproducible runs.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Effective per-tick size growth.
    pub fn size_step(&self) -> f32 {
        self.size_step
            .unwrap_or_else(|| self.population.default_size_step())
    }

    /// Check every construction constraint.
    ///
    /// Nothing is clamped: a bad value is a caller bug and is reported as such.
    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        if self.life_range.start == 0 || self.life_range.start >= self.life_range.end {
            return Err(ConfigError::InvalidLifeRange(self.life_range.clone()));
        }
        if let Population::Trickle { max_alive, .. } = self.population {
            if max_alive == 0 || max_alive > self.capacity {
                return Err(ConfigError::InvalidMaxAlive {
                    max_alive,
                    capacity: self.capacity,
                });
            }
        }
        if !self.origin.is_finite() {
            return Err(ConfigError::NonFinite("origin"));
        }
        if !self.gravity.is_finite() {
            return Err(ConfigError::NonFinite("gravity"));
        }
        if !self.spread.is_finite() {
            return Err(ConfigError::NonFinite("spread"));
        }
        if !self.initial_size.is_finite() {
            return Err(ConfigError::NonFinite("initial_size"));
        }
        if !self.size_step().is_finite() {
            return Err(ConfigError::NonFinite("size_step"));
        }
        Ok(())
    }

    /// Parse and validate a JSON config.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }
}

/// Viewer settings for the demo binaries.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Wall-clock interval between simulation ticks.
    pub tick_interval_ms: u64,
    /// Step passed to `Emitter::update` on each tick.
    pub dt: f32,
    pub clear_color: [f64; 3],
    /// Base sprite half-size in clip space.
    pub point_size: f32,
    /// How strongly the per-particle size enlarges the sprite.
    pub size_influence: f32,
    pub camera_distance: f32,
    pub fov_degrees: f32,
    /// MSAA samples per pixel; 1 disables multisampling.
    pub sample_count: u32,
    /// Whether inactive slots are drawn.
    pub draw_filter: DrawFilter,
    pub emitter: EmitterConfig,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            title: "sparks".to_string(),
            width: 1024,
            height: 720,
            tick_interval_ms: 16,
            dt: 0.01,
            clear_color: [0.4, 0.4, 0.4],
            point_size: 0.006,
            size_influence: 0.04,
            camera_distance: 20.0,
            fov_degrees: 45.0,
            sample_count: 4,
            draw_filter: DrawFilter::All,
            emitter: EmitterConfig::default(),
        }
    }
}

impl DemoConfig {
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_emitter(mut self, emitter: EmitterConfig) -> Self {
        self.emitter = emitter;
        self
    }

    pub fn with_draw_filter(mut self, filter: DrawFilter) -> Self {
        self.draw_filter = filter;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::ZeroTickInterval);
        }
        if !self.dt.is_finite() {
            return Err(ConfigError::NonFinite("dt"));
        }
        if !self.point_size.is_finite() {
            return Err(ConfigError::NonFinite("point_size"));
        }
        if !self.size_influence.is_finite() {
            return Err(ConfigError::NonFinite("size_influence"));
        }
        // Counts every adapter must support for a render attachment.
        if !matches!(self.sample_count, 1 | 4) {
            return Err(ConfigError::InvalidSampleCount(self.sample_count));
        }
        self.emitter.validate()
    }

    /// Load and validate a JSON viewer config file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&json)?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_is_valid_burst() {
        let config = EmitterConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.population, Population::Burst);
        assert_eq!(config.size_step(), BURST_SIZE_STEP);
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let config = EmitterConfig::new(Vec3::ZERO, 0);
        assert!(matches!(config.validate(), Err(ConfigError::ZeroCapacity)));
    }

    #[test]
    fn test_inverted_life_range_rejected() {
        let config = EmitterConfig::trickle(Vec3::ZERO, 100, 50, 10, 200..30);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidLifeRange(_))
        ));

        let empty = EmitterConfig::new(Vec3::ZERO, 10).with_life_range(30..30);
        assert!(empty.validate().is_err());

        let from_zero = EmitterConfig::new(Vec3::ZERO, 10).with_life_range(0..30);
        assert!(from_zero.validate().is_err());
    }

    #[test]
    fn test_max_alive_bounds() {
        let over = EmitterConfig::trickle(Vec3::ZERO, 100, 101, 10, 30..200);
        assert!(matches!(
            over.validate(),
            Err(ConfigError::InvalidMaxAlive {
                max_alive: 101,
                capacity: 100
            })
        ));

        let zero = EmitterConfig::trickle(Vec3::ZERO, 100, 0, 10, 30..200);
        assert!(zero.validate().is_err());

        let full = EmitterConfig::trickle(Vec3::ZERO, 100, 100, 0, 30..200);
        assert!(full.validate().is_ok());
    }

    #[test]
    fn test_non_finite_rejected() {
        let config = EmitterConfig::new(Vec3::new(f32::NAN, 0.0, 0.0), 10);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonFinite("origin"))
        ));

        let config = EmitterConfig::new(Vec3::ZERO, 10).with_size_step(f32::INFINITY);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonFinite("size_step"))
        ));
    }

    #[test]
    fn test_trickle_size_step_default() {
        let config = EmitterConfig::trickle(Vec3::ZERO, 100, 50, 10, 30..200);
        assert_eq!(config.size_step(), TRICKLE_SIZE_STEP);
        assert_eq!(config.with_size_step(0.25).size_step(), 0.25);
    }

    #[test]
    fn test_from_json_str() {
        let json = r#"{
            "origin": [1.0, 2.0, 3.0],
            "capacity": 100,
            "life_range": { "start": 30, "end": 200 },
            "population": { "kind": "trickle", "max_alive": 50, "max_per_frame": 200 },
            "seed": 9
        }"#;
        let config = EmitterConfig::from_json_str(json).unwrap();
        assert_eq!(config.origin, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(config.life_range, 30..200);
        assert_eq!(
            config.population,
            Population::Trickle {
                max_alive: 50,
                max_per_frame: 200
            }
        );
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.spread, SPREAD);
    }

    #[test]
    fn test_from_json_str_validates() {
        let json = r#"{ "capacity": 0 }"#;
        assert!(matches!(
            EmitterConfig::from_json_str(json),
            Err(ConfigError::ZeroCapacity)
        ));
        assert!(matches!(
            EmitterConfig::from_json_str("{ not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_demo_config_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "title": "test", "tick_interval_ms": 8, "draw_filter": "alive_only" }}"#
        )
        .unwrap();

        let config = DemoConfig::from_path(file.path()).unwrap();
        assert_eq!(config.title, "test");
        assert_eq!(config.tick_interval_ms, 8);
        assert_eq!(config.draw_filter, DrawFilter::AliveOnly);
        assert_eq!(config.dt, 0.01);
    }

    #[test]
    fn test_demo_config_zero_interval() {
        let config = DemoConfig {
            tick_interval_ms: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ZeroTickInterval)
        ));
    }

    #[test]
    fn test_demo_config_non_finite_sizes() {
        let config = DemoConfig {
            size_influence: f32::NAN,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonFinite("size_influence"))
        ));

        let config = DemoConfig {
            point_size: f32::INFINITY,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonFinite("point_size"))
        ));
    }

    #[test]
    fn test_demo_config_sample_count() {
        assert_eq!(DemoConfig::default().sample_count, 4);
        for count in [1, 4] {
            let config = DemoConfig {
                sample_count: count,
                ..Default::default()
            };
            assert!(config.validate().is_ok());
        }
        for count in [0, 2, 3, 8] {
            let config = DemoConfig {
                sample_count: count,
                ..Default::default()
            };
            assert!(matches!(
                config.validate(),
                Err(ConfigError::InvalidSampleCount(c)) if c == count
            ));
        }
    }

    #[test]
    fn test_missing_file() {
        let result = EmitterConfig::from_path("/definitely/not/here.json");
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
