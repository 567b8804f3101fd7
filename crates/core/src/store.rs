//! Bounded particle collection with FIFO eviction.
//!
//! The store is the single owner of all particles. It enforces the capacity
//! invariant on every spawn: at capacity, the particle with the smallest
//! insertion counter is evicted before the new one is inserted. Removal uses
//! swap-remove, so vec positions are not meaningful — spawn order lives in
//! each particle's `seq` field.

use glam::DVec2;

use crate::particle::{Particle, SpawnOptions};
use crate::prng::SplitMix64;

/// Bounded, insertion-ordered (by counter, not position) particle collection.
#[derive(Debug, Clone)]
pub struct ParticleStore {
    particles: Vec<Particle>,
    capacity: usize,
    next_seq: u64,
}

impl ParticleStore {
    /// Creates an empty store bounded by `capacity`.
    ///
    /// Capacity validation happens in
    /// [`SimulationConfig::validate`](crate::config::SimulationConfig::validate);
    /// a zero capacity never reaches here through the public engine API.
    pub fn new(capacity: usize) -> Self {
        Self {
            particles: Vec::with_capacity(capacity),
            capacity,
            next_seq: 0,
        }
    }

    /// Current population.
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// True when no particles are alive.
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// The capacity bound this store enforces.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Read-only snapshot of the current population.
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Mutable access for the integrator and proximity graph. Not part of
    /// the read-only snapshot surface.
    pub(crate) fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    /// Creates one particle at `(x, y)`.
    ///
    /// Unset options are randomized from `rng`. At capacity, the oldest
    /// surviving particle (smallest `seq`) is evicted first, so the store
    /// never exceeds its bound and spawning never fails.
    pub fn spawn(
        &mut self,
        x: f64,
        y: f64,
        options: &SpawnOptions,
        rng: &mut SplitMix64,
    ) -> &Particle {
        if self.particles.len() >= self.capacity {
            self.evict_oldest();
        }
        let seq = self.next_seq;
        self.next_seq += 1;
        let idx = self.particles.len();
        self.particles.push(options.build(x, y, seq, rng));
        &self.particles[idx]
    }

    /// Creates `count` particles at `(x, y)` with velocities radiating
    /// outward: `angle_i = 2π·i/count`, speed drawn per particle from the
    /// options' speed range. Returns the number spawned (always `count`;
    /// eviction absorbs any overflow).
    pub fn spawn_burst(
        &mut self,
        x: f64,
        y: f64,
        count: usize,
        options: &SpawnOptions,
        rng: &mut SplitMix64,
    ) -> usize {
        let (speed_min, speed_max) = options.speed_range();
        for i in 0..count {
            let angle = std::f64::consts::TAU * i as f64 / count as f64;
            let speed = rng.next_range(speed_min, speed_max);
            let radiating = SpawnOptions {
                velocity: Some(DVec2::from_angle(angle) * speed),
                ..options.clone()
            };
            self.spawn(x, y, &radiating, rng);
        }
        count
    }

    /// Empties the collection unconditionally. The insertion counter keeps
    /// running so eviction order stays globally monotonic.
    pub fn clear(&mut self) {
        self.particles.clear();
    }

    /// Removes every dead particle (post-integration pass). Returns how many
    /// were removed. Swap-remove, O(1) per removal.
    pub(crate) fn cull_dead(&mut self) -> usize {
        let mut removed = 0;
        let mut i = 0;
        while i < self.particles.len() {
            if self.particles[i].is_dead() {
                self.particles.swap_remove(i);
                removed += 1;
            } else {
                i += 1;
            }
        }
        removed
    }

    /// Swap-removes the particle with the smallest insertion counter.
    fn evict_oldest(&mut self) {
        let oldest = self
            .particles
            .iter()
            .enumerate()
            .min_by_key(|(_, p)| p.seq)
            .map(|(i, _)| i);
        if let Some(i) = oldest {
            self.particles.swap_remove(i);
        }
    }
}
