//! Deterministic PRNG based on the SplitMix64 algorithm.
//!
//! Randomized spawn defaults (velocity, radius, hue, lifetime) must replay
//! identically for a given seed across platforms, so the engine carries its
//! own integer-arithmetic generator instead of a platform RNG. SplitMix64
//! has no bad seeds (including 0) and a full 2^64 period.

use serde::{Deserialize, Serialize};

/// SplitMix64 deterministic PRNG. Same seed always produces the same sequence.
///
/// The state advances by the golden-ratio increment and each output is a
/// finalized mix of the new state, so consecutive outputs are decorrelated
/// even for adjacent seeds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SplitMix64 {
    state: u64,
}

impl SplitMix64 {
    /// Creates a new PRNG with the given seed. Every seed is valid.
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Advances the state and returns the next 64-bit value.
    pub fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Returns a uniformly distributed f64 in [0, 1).
    ///
    /// Uses the upper 53 bits of `next_u64()` for full mantissa precision.
    pub fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Returns a uniformly distributed f64 in [min, max).
    pub fn next_range(&mut self, min: f64, max: f64) -> f64 {
        min + self.next_f64() * (max - min)
    }

    /// Returns a uniformly distributed angle in [0, 2π).
    pub fn next_angle(&mut self) -> f64 {
        self.next_f64() * std::f64::consts::TAU
    }
}
