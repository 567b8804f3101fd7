//! Per-particle behavior strategies.
//!
//! Demo-specific particle specialization is composition, not subclassing:
//! a [`Behavior`] is applied by the integrator to every particle after force
//! accumulation and before position integration. The trait is object-safe so
//! hosts can stack `Box<dyn Behavior>` strategies at runtime.

use crate::particle::Particle;

/// A per-tick mutation applied to every particle.
///
/// `Send` so a whole simulation can move behind a mutex in multi-threaded
/// hosts.
pub trait Behavior: Send {
    /// Mutates one particle. Runs after forces, before position integration.
    fn apply(&self, particle: &mut Particle);
}

/// Multiplies the radius by `rate` every tick.
///
/// Combined with the radius death epsilon this produces shrink-and-die
/// particles without a finite `life` budget.
#[derive(Debug, Clone, Copy)]
pub struct RadiusDecay {
    pub rate: f64,
}

impl Behavior for RadiusDecay {
    fn apply(&self, particle: &mut Particle) {
        particle.radius *= self.rate;
    }
}

/// Advances the hue by `step` degrees per tick, wrapping at 360.
#[derive(Debug, Clone, Copy)]
pub struct HueCycle {
    pub step: f64,
}

impl Behavior for HueCycle {
    fn apply(&self, particle: &mut Particle) {
        particle.hue = (particle.hue + self.step).rem_euclid(360.0);
    }
}
