//! The particle emitter.
//!
//! An [`Emitter`] owns a fixed pool of slots and advances all of them once per
//! call to [`Emitter::update`]. Slots are never added or removed; expired slots
//! are respawned in place at the emitter origin.
//!
//! # Populations
//!
//! | Policy | Startup | Per tick |
//! |--------|---------|----------|
//! | [`Population::Burst`] | every slot spawns | expired slots respawn |
//! | [`Population::Trickle`] | 10-50 random slots spawn | up to `max_per_frame` inactive slots activate; expired slots respawn inactive |
//!
//! # Example
//!
//! ```ignore
//! let mut emitter = Emitter::new(Vec3::ZERO, 1000)?;
//! loop {
//!     emitter.update(0.01);
//!     upload(emitter.position(), emitter.color(), emitter.size());
//! }
//! ```

use std::ops::Range;

use glam::Vec3;

use crate::config::{EmitterConfig, Population, INITIAL_TRICKLE};
use crate::error::Result;
use crate::pool::ParticlePool;
use crate::render::{DrawFilter, ParticleVertex};
use crate::spawn::{SpawnSampler, SpawnState};

/// Fixed-capacity particle emitter.
#[derive(Debug)]
pub struct Emitter {
    origin: Vec3,
    life_range: Range<u32>,
    spread: f32,
    initial_size: f32,
    size_step: f32,
    gravity: Vec3,
    population: Population,
    pool: ParticlePool,
    sampler: SpawnSampler,
}

impl Emitter {
    /// Burst emitter: all `capacity` slots spawn immediately and stay alive.
    pub fn new(origin: Vec3, capacity: u32) -> Result<Self> {
        Self::from_config(&EmitterConfig::new(origin, capacity))
    }

    /// Trickle emitter: a small initial burst, then at most `max_per_frame`
    /// activations per tick while `alive_count() <= max_alive`.
    pub fn trickle(
        origin: Vec3,
        capacity: u32,
        max_alive: u32,
        max_per_frame: u32,
        life_range: Range<u32>,
    ) -> Result<Self> {
        Self::from_config(&EmitterConfig::trickle(
            origin,
            capacity,
            max_alive,
            max_per_frame,
            life_range,
        ))
    }

    /// Build an emitter from a validated config.
    pub fn from_config(config: &EmitterConfig) -> Result<Self> {
        config.validate()?;

        let capacity = config.capacity as usize;
        let mut emitter = Self {
            origin: config.origin,
            life_range: config.life_range.clone(),
            spread: config.spread,
            initial_size: config.initial_size,
            size_step: config.size_step(),
            gravity: config.gravity,
            population: config.population,
            pool: ParticlePool::zeroed(capacity),
            sampler: SpawnSampler::new(config.seed),
        };

        let initial: Vec<usize> = match emitter.population {
            Population::Burst => (0..capacity).collect(),
            Population::Trickle { .. } => {
                let count = emitter.sampler.random_count(INITIAL_TRICKLE) as usize;
                emitter.sampler.random_indices(capacity, count)
            }
        };
        emitter.respawn(&initial);
        for &i in &initial {
            emitter.pool.alive[i] = true;
        }

        log::info!(
            "Emitter at ({}, {}, {}): {} slots, {:?}, {} alive",
            emitter.origin.x,
            emitter.origin.y,
            emitter.origin.z,
            capacity,
            emitter.population,
            initial.len()
        );

        Ok(emitter)
    }

    /// Reinitialize exactly the slots in `indices`.
    ///
    /// All random draws for the batch are made before any slot is written.
    /// Does not change `alive` flags.
    ///
    /// # Panics
    ///
    /// If any index is `>= num_particles()`.
    pub fn respawn(&mut self, indices: &[usize]) {
        if indices.is_empty() {
            return;
        }
        let len = self.pool.len();
        assert!(
            indices.iter().all(|&i| i < len),
            "respawn index out of range for {len} slots"
        );

        let spawns: Vec<SpawnState> = indices
            .iter()
            .map(|_| self.sampler.spawn(self.spread, self.life_range.clone()))
            .collect();

        for (&i, state) in indices.iter().zip(spawns) {
            self.pool
                .write_spawn(i, self.origin, self.initial_size, state);
        }
    }

    /// Advance every slot by one tick.
    ///
    /// Gravity is applied with half of `dt`; `life` and `size` advance by a
    /// fixed amount regardless of `dt`.
    pub fn update(&mut self, dt: f32) {
        self.pool.integrate(self.gravity, dt, self.size_step);

        if let Population::Trickle {
            max_alive,
            max_per_frame,
        } = self.population
        {
            self.activate(max_alive, max_per_frame);
        }

        let expired = self.pool.expired();
        match self.population {
            Population::Burst => self.respawn(&expired),
            Population::Trickle { .. } => {
                // Respawned slots stay inactive until a later activation.
                if !expired.is_empty() && self.pool.alive_count() > 0 {
                    self.respawn(&expired);
                    for &i in &expired {
                        self.pool.alive[i] = false;
                    }
                }
                log::debug!("alive particles: {}", self.pool.alive_count());
            }
        }
    }

    fn activate(&mut self, max_alive: u32, max_per_frame: u32) {
        if self.pool.alive_count() > max_alive as usize {
            return;
        }
        let count = self.sampler.random_count(0..=max_per_frame) as usize;
        let picked = self.pool.inactive(count);
        self.respawn(&picked);
        for &i in &picked {
            self.pool.alive[i] = true;
        }
    }

    /// Pack slots into `out` for upload, replacing its contents.
    pub fn write_vertices(&self, filter: DrawFilter, out: &mut Vec<ParticleVertex>) {
        out.clear();
        let pool = &self.pool;
        out.extend(
            (0..pool.len())
                .filter(|&i| filter == DrawFilter::All || pool.alive[i])
                .map(|i| ParticleVertex {
                    position: pool.position[i].to_array(),
                    size: pool.size[i],
                    color: pool.color[i].to_array(),
                    _pad: 0.0,
                }),
        );
    }

    #[inline]
    pub fn num_particles(&self) -> usize {
        self.pool.len()
    }

    #[inline]
    pub fn position(&self) -> &[Vec3] {
        &self.pool.position
    }

    #[inline]
    pub fn direction(&self) -> &[Vec3] {
        &self.pool.direction
    }

    #[inline]
    pub fn color(&self) -> &[Vec3] {
        &self.pool.color
    }

    #[inline]
    pub fn size(&self) -> &[f32] {
        &self.pool.size
    }

    #[inline]
    pub fn life(&self) -> &[u32] {
        &self.pool.life
    }

    #[inline]
    pub fn max_life(&self) -> &[u32] {
        &self.pool.max_life
    }

    /// Per-slot activity. Always all `true` for burst emitters.
    #[inline]
    pub fn alive(&self) -> &[bool] {
        &self.pool.alive
    }

    pub fn alive_count(&self) -> usize {
        self.pool.alive_count()
    }

    pub fn pool(&self) -> &ParticlePool {
        &self.pool
    }

    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    pub fn population(&self) -> Population {
        self.population
    }

    pub fn life_range(&self) -> Range<u32> {
        self.life_range.clone()
    }

    pub fn size_step(&self) -> f32 {
        self.size_step
    }

    pub fn initial_size(&self) -> f32 {
        self.initial_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BURST_SIZE_STEP, INITIAL_SIZE};
    use crate::error::ConfigError;

    fn burst(capacity: u32, seed: u64) -> Emitter {
        Emitter::from_config(&EmitterConfig::new(Vec3::ZERO, capacity).with_seed(seed)).unwrap()
    }

    #[test]
    fn test_respawn_empty_is_noop() {
        let mut emitter = burst(8, 1);
        emitter.update(0.01);
        let before = emitter.position().to_vec();
        emitter.respawn(&[]);
        assert_eq!(emitter.position(), before.as_slice());
    }

    #[test]
    fn test_respawn_only_touches_selected() {
        let mut emitter = burst(6, 2);
        for _ in 0..3 {
            emitter.update(0.01);
        }
        let positions = emitter.position().to_vec();
        let lives = emitter.life().to_vec();

        emitter.respawn(&[1, 4]);

        for i in 0..6 {
            if i == 1 || i == 4 {
                assert_eq!(emitter.life()[i], 0);
                assert_eq!(emitter.position()[i], Vec3::ZERO);
                assert_eq!(emitter.size()[i], INITIAL_SIZE);
            } else {
                assert_eq!(emitter.life()[i], lives[i]);
                assert_eq!(emitter.position()[i], positions[i]);
            }
        }
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_respawn_out_of_range_panics() {
        let mut emitter = burst(4, 3);
        emitter.respawn(&[4]);
    }

    #[test]
    fn test_burst_all_alive() {
        let emitter = burst(16, 4);
        assert_eq!(emitter.alive_count(), 16);
        assert_eq!(emitter.size_step(), BURST_SIZE_STEP);
    }

    #[test]
    fn test_constructors_reject_bad_config() {
        assert!(matches!(
            Emitter::new(Vec3::ZERO, 0),
            Err(ConfigError::ZeroCapacity)
        ));
        assert!(matches!(
            Emitter::trickle(Vec3::ZERO, 10, 5, 5, 50..10),
            Err(ConfigError::InvalidLifeRange(_))
        ));
        assert!(matches!(
            Emitter::trickle(Vec3::ZERO, 10, 11, 5, 10..50),
            Err(ConfigError::InvalidMaxAlive { .. })
        ));
    }

    #[test]
    fn test_trickle_without_activation_dies_out() {
        let config = EmitterConfig::trickle(Vec3::ZERO, 100, 100, 0, 1..2).with_seed(5);
        let mut emitter = Emitter::from_config(&config).unwrap();
        assert!(emitter.alive_count() >= 10);

        // max_life is 1 for every spawned slot, so all of them expire on tick 2.
        emitter.update(0.01);
        emitter.update(0.01);
        assert_eq!(emitter.alive_count(), 0);

        // With nothing alive, expired slots are no longer respawned.
        let lives = emitter.life().to_vec();
        emitter.update(0.01);
        for (before, after) in lives.iter().zip(emitter.life()) {
            assert_eq!(*after, before + 1);
        }
    }

    #[test]
    fn test_write_vertices_filter() {
        let config = EmitterConfig::trickle(Vec3::ONE, 100, 100, 0, 30..200).with_seed(6);
        let emitter = Emitter::from_config(&config).unwrap();
        let mut out = Vec::new();

        emitter.write_vertices(DrawFilter::All, &mut out);
        assert_eq!(out.len(), 100);

        emitter.write_vertices(DrawFilter::AliveOnly, &mut out);
        assert_eq!(out.len(), emitter.alive_count());
        assert!(out.iter().all(|v| v.position == [1.0, 1.0, 1.0]));
        assert!(out.iter().all(|v| v.size == INITIAL_SIZE));
    }
}
