//! The `Simulation` façade: one `tick()` per host frame.
//!
//! A tick is integrate → derive proximity graph → summarize metrics, run to
//! completion before any reader observes state. The host loop owns pacing:
//! pausing is simply not requesting the next tick. Input arrives through
//! `set_pointer`/`set_mode`/`resize`; output is the read-only snapshot
//! surface (`particles`, `edges`, `metrics`).

use glam::DVec2;
use serde_json::{json, Value};

use crate::behavior::Behavior;
use crate::config::SimulationConfig;
use crate::error::SimError;
use crate::forces::{ForceKind, ForceSpec};
use crate::graph::{Edge, ProximityGraph, SimilarityScorer};
use crate::integrator::Integrator;
use crate::metrics::{MetricsAggregator, MetricsSnapshot};
use crate::particle::{Particle, SpawnOptions};
use crate::prng::SplitMix64;
use crate::store::ParticleStore;

/// Particles spawned per tick while the pointer is pressed in spawn mode.
pub const SPAWN_PER_TICK: usize = 2;
/// Strength of the pointer-driven force in force modes.
pub const POINTER_STRENGTH: f64 = 1.0;

/// What a pressed pointer does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionMode {
    /// Pointer input is ignored.
    Idle,
    /// Pressed pointer spawns particles at its position.
    Spawn,
    /// Pressed pointer applies the given force at its position.
    Force(ForceKind),
}

impl InteractionMode {
    /// All mode names the UI layer can select, in display order.
    pub const NAMES: &'static [&'static str] =
        &["idle", "spawn", "attract", "repel", "orbit", "vortex"];

    /// Parses a mode from its name: `"idle"`, `"spawn"`, or any force name.
    pub fn from_name(name: &str) -> Result<Self, SimError> {
        match name {
            "idle" => Ok(InteractionMode::Idle),
            "spawn" => Ok(InteractionMode::Spawn),
            other => ForceKind::from_name(other)
                .map(InteractionMode::Force)
                .map_err(|_| SimError::UnknownMode(name.to_string())),
        }
    }

    /// The lowercase name of this mode.
    pub fn name(&self) -> &'static str {
        match self {
            InteractionMode::Idle => "idle",
            InteractionMode::Spawn => "spawn",
            InteractionMode::Force(kind) => kind.name(),
        }
    }
}

/// Pointer state pushed in by the input layer, read once per tick.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Pointer {
    pub pos: DVec2,
    pub pressed: bool,
}

/// A complete particle simulation: store, integrator inputs, per-tick graph
/// and metrics.
///
/// Single-threaded and cooperative; `Simulation` is `Send`, so a
/// multi-threaded host can move it behind a mutex held for the duration of
/// each tick.
pub struct Simulation {
    config: SimulationConfig,
    store: ParticleStore,
    rng: SplitMix64,
    pointer: Pointer,
    mode: InteractionMode,
    scorer: Option<Box<dyn SimilarityScorer>>,
    behaviors: Vec<Box<dyn Behavior>>,
    edges: Vec<Edge>,
    metrics: MetricsSnapshot,
    ticks: u64,
}

impl Simulation {
    /// Creates a simulation from a validated config and a PRNG seed.
    ///
    /// Fails fast with the config's validation error; this is the only
    /// error path — steady-state ticking never fails.
    pub fn new(config: SimulationConfig, seed: u64) -> Result<Self, SimError> {
        config.validate()?;
        let store = ParticleStore::new(config.capacity);
        Ok(Self {
            config,
            store,
            rng: SplitMix64::new(seed),
            pointer: Pointer::default(),
            mode: InteractionMode::Idle,
            scorer: None,
            behaviors: Vec::new(),
            edges: Vec::new(),
            metrics: MetricsSnapshot::empty(),
            ticks: 0,
        })
    }

    /// Advances one frame: interaction, integration, proximity graph,
    /// metrics. Completes fully before returning; readers only ever see
    /// post-tick state.
    pub fn tick(&mut self) -> Result<(), SimError> {
        let mut forces: Vec<ForceSpec> = Vec::new();
        if self.pointer.pressed {
            match self.mode {
                InteractionMode::Idle => {}
                InteractionMode::Spawn => {
                    self.store.spawn_burst(
                        self.pointer.pos.x,
                        self.pointer.pos.y,
                        SPAWN_PER_TICK,
                        &SpawnOptions::default(),
                        &mut self.rng,
                    );
                }
                InteractionMode::Force(kind) => {
                    forces.push(ForceSpec::new(kind, self.pointer.pos, POINTER_STRENGTH));
                }
            }
        }

        Integrator::step(&mut self.store, &self.config, &forces, &self.behaviors);
        self.edges =
            ProximityGraph::compute(&mut self.store, &self.config, self.scorer.as_deref());
        self.metrics =
            MetricsAggregator::summarize(self.store.particles(), &self.edges, &self.config);
        self.ticks += 1;
        Ok(())
    }

    // -- input surface --

    /// Latest pointer position and button state from the input layer.
    pub fn set_pointer(&mut self, x: f64, y: f64, pressed: bool) {
        self.pointer = Pointer {
            pos: DVec2::new(x, y),
            pressed,
        };
    }

    /// Selects what a pressed pointer does.
    pub fn set_mode(&mut self, mode: InteractionMode) {
        self.mode = mode;
    }

    /// Host viewport resize.
    pub fn resize(&mut self, width: f64, height: f64) -> Result<(), SimError> {
        self.config.resize(width, height)
    }

    /// Installs (or removes) the similarity scorer gating edge creation.
    pub fn set_scorer(&mut self, scorer: Option<Box<dyn SimilarityScorer>>) {
        self.scorer = scorer;
    }

    /// Appends a per-particle behavior strategy.
    pub fn push_behavior(&mut self, behavior: Box<dyn Behavior>) {
        self.behaviors.push(behavior);
    }

    // -- spawn passthroughs --

    /// Spawns one particle; see [`ParticleStore::spawn`].
    pub fn spawn(&mut self, x: f64, y: f64, options: &SpawnOptions) {
        self.store.spawn(x, y, options, &mut self.rng);
    }

    /// Spawns a radial burst; see [`ParticleStore::spawn_burst`].
    pub fn spawn_burst(&mut self, x: f64, y: f64, count: usize, options: &SpawnOptions) {
        self.store.spawn_burst(x, y, count, options, &mut self.rng);
    }

    /// Removes every particle.
    pub fn clear(&mut self) {
        self.store.clear();
    }

    // -- read-only snapshot surface --

    /// The current population. Valid until the next `tick`/spawn/clear.
    pub fn particles(&self) -> &[Particle] {
        self.store.particles()
    }

    /// The previous tick's edge set (indices into [`Self::particles`]).
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// The previous tick's metrics.
    pub fn metrics(&self) -> &MetricsSnapshot {
        &self.metrics
    }

    /// The active configuration.
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Completed tick count.
    pub fn tick_count(&self) -> u64 {
        self.ticks
    }

    /// The current interaction mode.
    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    // -- JSON param surface --

    /// Current parameter values as a JSON object.
    pub fn params(&self) -> Value {
        json!({
            "friction": self.config.friction,
            "boundary": self.config.boundary.name(),
            "connection_distance": self.config.connection_distance,
            "width": self.config.width,
            "height": self.config.height,
            "capacity": self.config.capacity,
            "min_similarity": self.config.min_similarity,
            "mode": self.mode.name(),
        })
    }

    /// Schema describing all tunable parameters, their types, ranges, and
    /// defaults.
    pub fn param_schema(&self) -> Value {
        json!({
            "friction": {
                "type": "number",
                "default": crate::config::DEFAULT_FRICTION,
                "min": 0.0,
                "max": 1.0,
                "description": "Velocity multiplier applied every tick"
            },
            "boundary": {
                "type": "string",
                "default": "wrap",
                "values": crate::config::BoundaryPolicy::NAMES,
                "description": "What happens when a particle leaves the viewport"
            },
            "connection_distance": {
                "type": "number",
                "default": crate::config::DEFAULT_CONNECTION_DISTANCE,
                "min": 1.0,
                "max": 1000.0,
                "description": "Pairwise distance under which particles connect"
            },
            "width": {
                "type": "number",
                "default": crate::config::DEFAULT_WIDTH,
                "description": "Viewport width"
            },
            "height": {
                "type": "number",
                "default": crate::config::DEFAULT_HEIGHT,
                "description": "Viewport height"
            },
            "capacity": {
                "type": "integer",
                "default": crate::config::DEFAULT_CAPACITY,
                "min": 1,
                "description": "Maximum particle population"
            },
            "min_similarity": {
                "type": "number",
                "default": crate::config::DEFAULT_MIN_SIMILARITY,
                "min": 0.0,
                "max": 1.0,
                "description": "Similarity gate when a scorer is installed"
            },
            "mode": {
                "type": "string",
                "default": "idle",
                "values": InteractionMode::NAMES,
                "description": "What a pressed pointer does"
            }
        })
    }
}
