//! Structure-of-arrays particle storage.

use glam::Vec3;

use crate::spawn::SpawnState;

/// Fixed-size columnar store of particle slots.
///
/// Every column has exactly `len()` entries for the lifetime of the pool.
/// Slots start zeroed and are only ever rewritten in place.
#[derive(Clone, Debug, Default)]
pub struct ParticlePool {
    pub(crate) position: Vec<Vec3>,
    pub(crate) direction: Vec<Vec3>,
    pub(crate) color: Vec<Vec3>,
    pub(crate) size: Vec<f32>,
    pub(crate) life: Vec<u32>,
    pub(crate) max_life: Vec<u32>,
    pub(crate) alive: Vec<bool>,
}

impl ParticlePool {
    /// Allocate `len` zeroed, inactive slots.
    pub fn zeroed(len: usize) -> Self {
        Self {
            position: vec![Vec3::ZERO; len],
            direction: vec![Vec3::ZERO; len],
            color: vec![Vec3::ZERO; len],
            size: vec![0.0; len],
            life: vec![0; len],
            max_life: vec![0; len],
            alive: vec![false; len],
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.position.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.position.is_empty()
    }

    /// Reset slot `i` to a fresh spawn at `origin`.
    #[inline]
    pub(crate) fn write_spawn(&mut self, i: usize, origin: Vec3, size: f32, state: SpawnState) {
        self.position[i] = origin;
        self.direction[i] = state.direction;
        self.color[i] = state.color;
        self.size[i] = size;
        self.life[i] = 0;
        self.max_life[i] = state.max_life;
    }

    /// Half-step gravity, position integration, aging and growth for every slot.
    pub(crate) fn integrate(&mut self, gravity: Vec3, dt: f32, size_step: f32) {
        let dv = gravity * (dt * 0.5);
        for (pos, dir) in self.position.iter_mut().zip(self.direction.iter_mut()) {
            *dir += dv;
            *pos += *dir * dt;
        }
        for life in &mut self.life {
            *life = life.saturating_add(1);
        }
        for size in &mut self.size {
            *size += size_step;
        }
    }

    /// Indices of slots whose `life` exceeds their `max_life`.
    pub(crate) fn expired(&self) -> Vec<usize> {
        self.life
            .iter()
            .zip(&self.max_life)
            .enumerate()
            .filter(|(_, (life, max_life))| life > max_life)
            .map(|(i, _)| i)
            .collect()
    }

    /// First `limit` inactive slots, in index order.
    pub(crate) fn inactive(&self, limit: usize) -> Vec<usize> {
        self.alive
            .iter()
            .enumerate()
            .filter(|(_, alive)| !**alive)
            .map(|(i, _)| i)
            .take(limit)
            .collect()
    }

    pub fn alive_count(&self) -> usize {
        self.alive.iter().filter(|a| **a).count()
    }

    /// Whether slot `i` has never been spawned (or was reset to zero).
    pub fn is_zeroed(&self, i: usize) -> bool {
        self.position[i] == Vec3::ZERO
            && self.direction[i] == Vec3::ZERO
            && self.color[i] == Vec3::ZERO
            && self.size[i] == 0.0
            && self.life[i] == 0
            && self.max_life[i] == 0
    }
}
