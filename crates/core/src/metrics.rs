//! Qualitative metrics over the current particle/edge snapshot.
//!
//! Each metric follows the same shape: one scalar reduction pushed through
//! an ordered threshold table into a discrete label. The bucket boundaries
//! are part of the engine's compatibility surface — hosts display the
//! labels, and downstream tests pin them — so the tables live here as
//! named constants.

use serde::Serialize;
use serde_json::{json, Value};

use crate::config::SimulationConfig;
use crate::graph::Edge;
use crate::particle::Particle;

/// Coherence buckets: how tightly the population clusters around its
/// centroid. Scalar is `1 − mean_distance_from_centroid / (diagonal/2)`.
pub const COHERENCE_BUCKETS: &[(f64, &str)] = &[
    (0.8, "unified"),
    (0.6, "coherent"),
    (0.4, "coalescing"),
    (0.2, "scattered"),
];
/// Label when coherence falls below every threshold (or no particles).
pub const COHERENCE_FLOOR: &str = "void";

/// Emergence buckets: mean connection count per particle.
pub const EMERGENCE_BUCKETS: &[(f64, &str)] = &[
    (10.0, "conscious"),
    (6.0, "manifesting"),
    (3.0, "emerging"),
    (1.0, "stirring"),
];
/// Label when emergence falls below every threshold.
pub const EMERGENCE_FLOOR: &str = "dormant";

/// Entropy buckets: variance of the velocity magnitudes.
pub const ENTROPY_BUCKETS: &[(f64, &str)] = &[
    (8.0, "turbulent"),
    (4.0, "agitated"),
    (1.0, "drifting"),
    (0.1, "settling"),
];
/// Label when entropy falls below every threshold.
pub const ENTROPY_FLOOR: &str = "still";

/// One reduced metric: the raw scalar and its bucketed label.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Metric {
    pub value: f64,
    pub label: &'static str,
}

/// The full metrics snapshot for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricsSnapshot {
    pub coherence: Metric,
    pub emergence: Metric,
    pub entropy: Metric,
    pub particle_count: usize,
    pub edge_count: usize,
}

impl MetricsSnapshot {
    /// The empty-simulation snapshot: every scalar zero, floor labels.
    pub fn empty() -> Self {
        Self {
            coherence: Metric {
                value: 0.0,
                label: COHERENCE_FLOOR,
            },
            emergence: Metric {
                value: 0.0,
                label: EMERGENCE_FLOOR,
            },
            entropy: Metric {
                value: 0.0,
                label: ENTROPY_FLOOR,
            },
            particle_count: 0,
            edge_count: 0,
        }
    }

    /// Named string/number pairs for display layers.
    pub fn to_json(&self) -> Value {
        json!({
            "coherence": self.coherence.value,
            "coherence_label": self.coherence.label,
            "emergence": self.emergence.value,
            "emergence_label": self.emergence.label,
            "entropy": self.entropy.value,
            "entropy_label": self.entropy.label,
            "particle_count": self.particle_count,
            "edge_count": self.edge_count,
        })
    }
}

/// Pure reduction over a post-tick snapshot.
pub struct MetricsAggregator;

impl MetricsAggregator {
    /// Reduces the current frame into bucketed descriptors.
    pub fn summarize(
        particles: &[Particle],
        edges: &[Edge],
        config: &SimulationConfig,
    ) -> MetricsSnapshot {
        if particles.is_empty() {
            return MetricsSnapshot::empty();
        }
        let n = particles.len() as f64;

        let centroid = particles.iter().map(|p| p.pos).sum::<glam::DVec2>() / n;
        let mean_spread = particles
            .iter()
            .map(|p| p.pos.distance(centroid))
            .sum::<f64>()
            / n;
        let coherence = (1.0 - mean_spread / (config.diagonal() / 2.0)).clamp(0.0, 1.0);

        let emergence = particles.iter().map(|p| p.connections as f64).sum::<f64>() / n;

        let mean_speed = particles.iter().map(|p| p.vel.length()).sum::<f64>() / n;
        let entropy = particles
            .iter()
            .map(|p| {
                let dev = p.vel.length() - mean_speed;
                dev * dev
            })
            .sum::<f64>()
            / n;

        MetricsSnapshot {
            coherence: bucket(coherence, COHERENCE_BUCKETS, COHERENCE_FLOOR),
            emergence: bucket(emergence, EMERGENCE_BUCKETS, EMERGENCE_FLOOR),
            entropy: bucket(entropy, ENTROPY_BUCKETS, ENTROPY_FLOOR),
            particle_count: particles.len(),
            edge_count: edges.len(),
        }
    }
}

/// Reduces a scalar through an ordered (descending) threshold table.
fn bucket(value: f64, table: &[(f64, &'static str)], floor: &'static str) -> Metric {
    let label = table
        .iter()
        .find(|(threshold, _)| value >= *threshold)
        .map(|(_, label)| *label)
        .unwrap_or(floor);
    Metric { value, label }
}
