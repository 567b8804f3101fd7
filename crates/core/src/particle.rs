//! The particle data model.
//!
//! A particle is plain data: there is no behavior hierarchy. Demo-specific
//! specialization is supplied to the integrator as [`Behavior`](crate::behavior)
//! strategies instead of subclasses.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::prng::SplitMix64;

/// Radius below which a particle is considered dead.
pub const RADIUS_EPSILON: f64 = 0.1;

/// Default spawn velocity component range, per axis.
const DEFAULT_VELOCITY_RANGE: (f64, f64) = (-1.0, 1.0);
/// Default spawn radius range.
const DEFAULT_RADIUS_RANGE: (f64, f64) = (1.0, 4.0);
/// Default burst speed range.
const DEFAULT_SPEED_RANGE: (f64, f64) = (1.0, 3.0);

/// A point entity owned by the [`ParticleStore`](crate::store::ParticleStore).
///
/// Mutated only by the integrator (motion, age) and the proximity graph
/// (connection count); everything else reads snapshots.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    /// Position in viewport coordinates.
    pub pos: DVec2,
    /// Velocity in viewport units per tick.
    pub vel: DVec2,
    /// Radius; doubles as mass in force magnitudes and as a rendering hint.
    pub radius: f64,
    /// Opaque visual tag in degrees [0, 360); not part of core semantics.
    pub hue: f64,
    /// Ticks since spawn.
    pub age: u64,
    /// Tick budget; `None` means unbounded.
    pub life: Option<u64>,
    /// Connections found by the current tick's proximity pass. Reset at the
    /// start of every tick; never stale across frames.
    pub connections: u32,
    /// Monotonic insertion counter; authoritative spawn order for FIFO
    /// eviction (vec position is meaningless after swap-removals).
    pub(crate) seq: u64,
}

impl Particle {
    /// True once the particle's tick budget is spent or its radius has
    /// decayed below [`RADIUS_EPSILON`].
    pub fn is_dead(&self) -> bool {
        matches!(self.life, Some(life) if self.age >= life) || self.radius < RADIUS_EPSILON
    }

    /// Insertion-order rank; smaller means spawned earlier.
    pub fn seq(&self) -> u64 {
        self.seq
    }
}

/// Optional overrides for spawned particles.
///
/// Unset fields are randomized from the engine PRNG using the module's
/// default ranges, so `SpawnOptions::default()` gives fully randomized
/// particles with unbounded life.
#[derive(Debug, Clone, Default)]
pub struct SpawnOptions {
    /// Exact initial velocity. `spawn_burst` ignores this and radiates.
    pub velocity: Option<DVec2>,
    /// Exact radius.
    pub radius: Option<f64>,
    /// Exact hue in degrees.
    pub hue: Option<f64>,
    /// Tick budget; `None` leaves the particle unbounded (the default).
    pub life: Option<u64>,
    /// Burst speed range `(min, max)`; defaults to [`DEFAULT_SPEED_RANGE`].
    pub speed: Option<(f64, f64)>,
}

impl SpawnOptions {
    /// Materializes a particle at `(x, y)`, drawing unset fields from `rng`.
    pub(crate) fn build(&self, x: f64, y: f64, seq: u64, rng: &mut SplitMix64) -> Particle {
        let vel = self.velocity.unwrap_or_else(|| {
            DVec2::new(
                rng.next_range(DEFAULT_VELOCITY_RANGE.0, DEFAULT_VELOCITY_RANGE.1),
                rng.next_range(DEFAULT_VELOCITY_RANGE.0, DEFAULT_VELOCITY_RANGE.1),
            )
        });
        Particle {
            pos: DVec2::new(x, y),
            vel,
            radius: self
                .radius
                .unwrap_or_else(|| rng.next_range(DEFAULT_RADIUS_RANGE.0, DEFAULT_RADIUS_RANGE.1)),
            hue: self.hue.unwrap_or_else(|| rng.next_range(0.0, 360.0)),
            age: 0,
            life: self.life,
            connections: 0,
            seq,
        }
    }

    /// Burst speed range, falling back to the module default.
    pub(crate) fn speed_range(&self) -> (f64, f64) {
        self.speed.unwrap_or(DEFAULT_SPEED_RANGE)
    }
}
