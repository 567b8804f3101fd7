//! The force-field catalogue.
//!
//! Each force is a pure function from (particle, target, strength) to a
//! velocity delta. Forces are applied additively by the integrator and are
//! never stored across ticks. All magnitudes use the particle's radius as
//! its mass.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::error::SimError;
use crate::particle::Particle;

/// Distance under which no force is applied. Guards the 1/dist² magnitudes
/// against singularities near the target.
pub const FORCE_EPSILON: f64 = 10.0;
/// Repulsion acts only inside this distance.
pub const REPEL_RANGE: f64 = 200.0;
/// Inverse-square scale for attraction.
const ATTRACT_SCALE: f64 = 0.01;
/// Inverse-square scale for repulsion (stronger falloff compensation).
const REPEL_SCALE: f64 = 0.001;
/// Tangential gain for orbit.
const ORBIT_TANGENTIAL_SCALE: f64 = 0.01;
/// Inward pull keeping orbiting particles from spiraling away.
const ORBIT_INWARD_GAIN: f64 = 0.5;
/// Spiral gain for vortex.
const VORTEX_SCALE: f64 = 0.1;
/// Spiral pitch: the radial direction rotated by 45°.
const VORTEX_PITCH: f64 = std::f64::consts::FRAC_PI_4;

/// The available force kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ForceKind {
    /// Inverse-square pull toward the target.
    Attract,
    /// Inverse-square push away from the target, short range.
    Repel,
    /// Tangential circulation around the target with a small inward pull.
    Orbit,
    /// Spiral pull: the radial direction rotated by 45°.
    Vortex,
}

impl ForceKind {
    /// All catalogue entries, in `from_name` order.
    pub const ALL: &'static [ForceKind] = &[
        ForceKind::Attract,
        ForceKind::Repel,
        ForceKind::Orbit,
        ForceKind::Vortex,
    ];

    /// Parses a force from its lowercase name.
    pub fn from_name(name: &str) -> Result<Self, SimError> {
        match name {
            "attract" => Ok(ForceKind::Attract),
            "repel" => Ok(ForceKind::Repel),
            "orbit" => Ok(ForceKind::Orbit),
            "vortex" => Ok(ForceKind::Vortex),
            _ => Err(SimError::UnknownForce(name.to_string())),
        }
    }

    /// The lowercase name of this force.
    pub fn name(&self) -> &'static str {
        match self {
            ForceKind::Attract => "attract",
            ForceKind::Repel => "repel",
            ForceKind::Orbit => "orbit",
            ForceKind::Vortex => "vortex",
        }
    }
}

/// One active force for the current tick: kind, target point, strength.
/// Stateless; the interaction layer rebuilds specs every tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForceSpec {
    pub kind: ForceKind,
    pub target: DVec2,
    pub strength: f64,
}

impl ForceSpec {
    pub fn new(kind: ForceKind, target: DVec2, strength: f64) -> Self {
        Self {
            kind,
            target,
            strength,
        }
    }

    /// Velocity delta this force contributes to `particle`.
    ///
    /// Pure. Returns zero inside [`FORCE_EPSILON`] of the target for every
    /// kind, and outside [`REPEL_RANGE`] for repulsion.
    pub fn delta(&self, particle: &Particle) -> DVec2 {
        let d = self.target - particle.pos;
        let dist = d.length();
        if dist <= FORCE_EPSILON {
            return DVec2::ZERO;
        }
        let mass = particle.radius;
        match self.kind {
            ForceKind::Attract => {
                let magnitude = self.strength * mass / (dist * dist * ATTRACT_SCALE);
                d / dist * magnitude
            }
            ForceKind::Repel => {
                if dist >= REPEL_RANGE {
                    return DVec2::ZERO;
                }
                let magnitude = self.strength * mass / (dist * dist * REPEL_SCALE);
                -d / dist * magnitude
            }
            ForceKind::Orbit => {
                let tangential = DVec2::new(-d.y, d.x) / dist
                    * (self.strength * dist * ORBIT_TANGENTIAL_SCALE);
                let inward = d / dist * (self.strength * ORBIT_INWARD_GAIN);
                tangential + inward
            }
            ForceKind::Vortex => {
                let angle = d.y.atan2(d.x) + VORTEX_PITCH;
                DVec2::from_angle(angle) * (self.strength * dist * VORTEX_SCALE)
            }
        }
    }
}
