//! Serializable frame capture.
//!
//! A [`FrameSnapshot`] freezes everything a presentation layer needs from
//! one tick — particle views, edge triples, metrics — into a serde value.
//! The CLI prints these as JSON; rendering hosts can consume the same shape.

use serde::Serialize;

use crate::engine::Simulation;
use crate::graph::Edge;
use crate::metrics::MetricsSnapshot;

/// One particle as exposed to presentation layers.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ParticleView {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub radius: f64,
    pub hue: f64,
    pub connections: u32,
}

/// A complete frame: tick number, particles, edges, metrics.
#[derive(Debug, Clone, Serialize)]
pub struct FrameSnapshot {
    pub tick: u64,
    pub particles: Vec<ParticleView>,
    pub edges: Vec<Edge>,
    pub metrics: MetricsSnapshot,
}

impl FrameSnapshot {
    /// Captures the simulation's current post-tick state.
    pub fn capture(sim: &Simulation) -> Self {
        Self {
            tick: sim.tick_count(),
            particles: sim
                .particles()
                .iter()
                .map(|p| ParticleView {
                    x: p.pos.x,
                    y: p.pos.y,
                    vx: p.vel.x,
                    vy: p.vel.y,
                    radius: p.radius,
                    hue: p.hue,
                    connections: p.connections,
                })
                .collect(),
            edges: sim.edges().to_vec(),
            metrics: *sim.metrics(),
        }
    }
}
