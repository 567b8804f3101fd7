//! Per-tick proximity graph.
//!
//! Every tick the graph is derived from scratch over all unordered particle
//! pairs; edges are never diffed against the previous frame. An optional
//! [`SimilarityScorer`] gates edge creation on domain-specific closeness
//! (the original demos scored lexical similarity between words; any
//! symmetric [0, 1] scorer satisfies the contract).

use serde::Serialize;

use crate::config::SimulationConfig;
use crate::particle::Particle;
use crate::store::ParticleStore;

/// One undirected connection for the current frame.
///
/// `a` and `b` index the store's current particle slice with `a < b`;
/// indices are only valid until the next mutation of the store.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Edge {
    pub a: usize,
    pub b: usize,
    /// In [0, 1]: proximity weight, scaled by similarity when a scorer is
    /// installed.
    pub weight: f64,
}

/// Domain-specific closeness between two particles, in [0, 1].
///
/// Implementations must be symmetric: `score(a, b) == score(b, a)`.
/// `Send` so a whole simulation can move behind a mutex in multi-threaded
/// hosts.
pub trait SimilarityScorer: Send {
    fn score(&self, a: &Particle, b: &Particle) -> f64;
}

/// Stock scorer: angular closeness of the two hues.
///
/// 1.0 at identical hue, 0.0 at 180° apart, linear in between. Symmetric by
/// construction. Stands in for content-aware scorers in tests and the CLI.
#[derive(Debug, Clone, Copy, Default)]
pub struct HueAffinity;

impl SimilarityScorer for HueAffinity {
    fn score(&self, a: &Particle, b: &Particle) -> f64 {
        let diff = (a.hue - b.hue).rem_euclid(360.0);
        let angular = diff.min(360.0 - diff);
        1.0 - angular / 180.0
    }
}

/// Derives the frame's edge set and refreshes connection counts.
pub struct ProximityGraph;

impl ProximityGraph {
    /// Scans all unordered pairs and emits an edge for every pair closer
    /// than `config.connection_distance` (and, with a scorer, more similar
    /// than `config.min_similarity`). Increments both endpoints'
    /// `connections` per edge.
    ///
    /// Weight is `1 − dist/connection_distance`, multiplied by the
    /// similarity score when a scorer is present; always in [0, 1] and
    /// symmetric. O(n²), acceptable at the capacities this engine bounds
    /// itself to.
    pub fn compute(
        store: &mut ParticleStore,
        config: &SimulationConfig,
        scorer: Option<&dyn SimilarityScorer>,
    ) -> Vec<Edge> {
        let particles = store.particles_mut();
        let n = particles.len();
        let mut edges = Vec::new();
        for i in 0..n {
            for j in (i + 1)..n {
                let dist = particles[i].pos.distance(particles[j].pos);
                if dist >= config.connection_distance {
                    continue;
                }
                let proximity = 1.0 - dist / config.connection_distance;
                let weight = match scorer {
                    Some(scorer) => {
                        let score = scorer.score(&particles[i], &particles[j]);
                        if score <= config.min_similarity {
                            continue;
                        }
                        score * proximity
                    }
                    None => proximity,
                };
                edges.push(Edge { a: i, b: j, weight });
                particles[i].connections += 1;
                particles[j].connections += 1;
            }
        }
        edges
    }
}
