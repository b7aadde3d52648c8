//! Random sampling for particle spawns.
//!
//! Every emitter owns one [`SpawnSampler`]. Seeding it makes a whole run
//! reproducible; nothing in the crate touches a global RNG.

use std::ops::{Range, RangeInclusive};

use glam::Vec3;
use rand::rngs::SmallRng;
use rand::seq::index;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;

/// Fresh initial conditions for one slot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpawnState {
    pub direction: Vec3,
    pub color: Vec3,
    pub max_life: u32,
}

/// Emitter-owned RNG with helpers for the spawn distributions.
#[derive(Debug)]
pub struct SpawnSampler {
    rng: SmallRng,
}

impl SpawnSampler {
    /// Sampler seeded from OS entropy.
    pub fn from_entropy() -> Self {
        Self {
            rng: SmallRng::from_entropy(),
        }
    }

    /// Deterministic sampler.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_entropy(),
        }
    }

    /// Random f32 in `[0, 1)`.
    #[inline]
    pub fn random(&mut self) -> f32 {
        self.rng.gen()
    }

    /// Random u32 in `range` (exclusive end).
    #[inline]
    pub fn random_life(&mut self, range: Range<u32>) -> u32 {
        self.rng.gen_range(range)
    }

    /// Random count in `range` (inclusive end).
    #[inline]
    pub fn random_count(&mut self, range: RangeInclusive<u32>) -> u32 {
        self.rng.gen_range(range)
    }

    /// Random RGB color (each channel `[0, 1)`).
    pub fn random_color(&mut self) -> Vec3 {
        Vec3::new(self.rng.gen(), self.rng.gen(), self.rng.gen())
    }

    /// Gaussian vector scaled to unit length.
    ///
    /// A zero-length draw divides by 1 instead, giving `Vec3::ZERO`.
    pub fn random_unit_normal(&mut self) -> Vec3 {
        let v = Vec3::new(
            self.rng.sample(StandardNormal),
            self.rng.sample(StandardNormal),
            self.rng.sample(StandardNormal),
        );
        unit_or_zero(v)
    }

    /// Direction for a new particle: upward bias plus a scalar jitter plus
    /// `spread` times a random unit vector, never pointing down.
    pub fn random_direction(&mut self, spread: f32) -> Vec3 {
        let t = self.random();
        let unit = self.random_unit_normal();
        let mut dir = Vec3::Y + Vec3::splat(t) + unit * spread;
        dir.y = dir.y.abs();
        dir
    }

    /// Draw everything a respawned slot needs.
    pub fn spawn(&mut self, spread: f32, life_range: Range<u32>) -> SpawnState {
        let direction = self.random_direction(spread);
        let color = self.random_color();
        let max_life = self.random_life(life_range);
        SpawnState {
            direction,
            color,
            max_life,
        }
    }

    /// `amount` distinct indices from `0..length`, in ascending order.
    pub fn random_indices(&mut self, length: usize, amount: usize) -> Vec<usize> {
        let mut picked = index::sample(&mut self.rng, length, amount.min(length)).into_vec();
        picked.sort_unstable();
        picked
    }
}

/// Normalize `v`, treating a zero norm as 1.
pub(crate) fn unit_or_zero(v: Vec3) -> Vec3 {
    let norm = v.length();
    if norm == 0.0 {
        v
    } else {
        v / norm
    }
}
