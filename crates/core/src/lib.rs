#![deny(unsafe_code)]
//! Core particle/force simulation engine.
//!
//! A bounded population of point particles advanced one `tick()` per host
//! frame: the [`Integrator`](integrator::Integrator) applies pluggable
//! forces and motion, the [`ProximityGraph`](graph::ProximityGraph) derives
//! the frame's weighted connection set, and the
//! [`MetricsAggregator`](metrics::MetricsAggregator) reduces the result to
//! bucketed qualitative descriptors. Rendering and input capture live in
//! host layers; this crate is pure in-process computation.

pub mod behavior;
pub mod config;
pub mod engine;
pub mod error;
pub mod forces;
pub mod graph;
pub mod integrator;
pub mod metrics;
pub mod particle;
pub mod prng;
pub mod snapshot;
pub mod store;

pub use behavior::{Behavior, HueCycle, RadiusDecay};
pub use config::{BoundaryPolicy, SimulationConfig};
pub use engine::{InteractionMode, Pointer, Simulation};
pub use error::SimError;
pub use forces::{ForceKind, ForceSpec};
pub use graph::{Edge, HueAffinity, SimilarityScorer};
pub use metrics::{MetricsAggregator, MetricsSnapshot};
pub use particle::{Particle, SpawnOptions};
pub use prng::SplitMix64;
pub use snapshot::FrameSnapshot;
pub use store::ParticleStore;
