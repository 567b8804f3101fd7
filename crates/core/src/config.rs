//! Simulation configuration: viewport, friction, boundary policy, capacity.
//!
//! A [`SimulationConfig`] is set once per simulation instance and validated
//! fail-fast; the only field that changes afterwards is the viewport, via
//! [`SimulationConfig::resize`]. Configs round-trip through serde and can be
//! assembled from loosely-typed JSON with fallback defaults, so UI layers
//! can override a subset of fields without knowing the full schema.

use crate::error::SimError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Default friction coefficient applied after each integration step.
pub const DEFAULT_FRICTION: f64 = 0.98;
/// Default distance threshold under which two particles connect.
pub const DEFAULT_CONNECTION_DISTANCE: f64 = 100.0;
/// Default viewport width.
pub const DEFAULT_WIDTH: f64 = 800.0;
/// Default viewport height.
pub const DEFAULT_HEIGHT: f64 = 600.0;
/// Default particle capacity.
pub const DEFAULT_CAPACITY: usize = 300;
/// Default similarity gate when a scorer is installed (middle of the
/// recommended 0.3–0.4 range).
pub const DEFAULT_MIN_SIMILARITY: f64 = 0.35;

/// Rule applied when an integrated position leaves the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryPolicy {
    /// Re-enter at the opposite edge; velocity unchanged.
    Wrap,
    /// Invert the offending velocity component; position left as computed.
    Bounce,
    /// Clip the coordinate into the viewport and zero the component.
    Clamp,
}

impl BoundaryPolicy {
    /// All policy names, in `from_name` order.
    pub const NAMES: &'static [&'static str] = &["wrap", "bounce", "clamp"];

    /// Parses a policy from its lowercase name.
    pub fn from_name(name: &str) -> Result<Self, SimError> {
        match name {
            "wrap" => Ok(BoundaryPolicy::Wrap),
            "bounce" => Ok(BoundaryPolicy::Bounce),
            "clamp" => Ok(BoundaryPolicy::Clamp),
            _ => Err(SimError::UnknownBoundary(name.to_string())),
        }
    }

    /// The lowercase name of this policy.
    pub fn name(&self) -> &'static str {
        match self {
            BoundaryPolicy::Wrap => "wrap",
            BoundaryPolicy::Bounce => "bounce",
            BoundaryPolicy::Clamp => "clamp",
        }
    }
}

/// Process-wide simulation parameters.
///
/// Validated once at simulation construction; see [`SimulationConfig::validate`]
/// for the exact rejection rules.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SimulationConfig {
    /// Velocity multiplier applied every tick, in (0, 1].
    pub friction: f64,
    /// What happens when a particle leaves the viewport.
    pub boundary: BoundaryPolicy,
    /// Pairwise distance under which particles connect, > 0.
    pub connection_distance: f64,
    /// Viewport width, > 0.
    pub width: f64,
    /// Viewport height, > 0.
    pub height: f64,
    /// Maximum particle population, >= 1. Spawning beyond this evicts the
    /// oldest surviving particle.
    pub capacity: usize,
    /// Similarity gate in [0, 1]; only consulted when a scorer is installed.
    pub min_similarity: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            friction: DEFAULT_FRICTION,
            boundary: BoundaryPolicy::Wrap,
            connection_distance: DEFAULT_CONNECTION_DISTANCE,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            capacity: DEFAULT_CAPACITY,
            min_similarity: DEFAULT_MIN_SIMILARITY,
        }
    }
}

impl SimulationConfig {
    /// Checks every invariant the rest of the engine relies on.
    ///
    /// Rejects: `capacity == 0`; friction outside (0, 1]; non-positive or
    /// non-finite dimensions or connection distance; `min_similarity`
    /// outside [0, 1].
    pub fn validate(&self) -> Result<(), SimError> {
        if self.capacity == 0 {
            return Err(SimError::InvalidCapacity);
        }
        if !(self.friction > 0.0 && self.friction <= 1.0) {
            return Err(SimError::InvalidFriction(self.friction));
        }
        if !(self.width > 0.0 && self.width.is_finite())
            || !(self.height > 0.0 && self.height.is_finite())
        {
            return Err(SimError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if !(self.connection_distance > 0.0 && self.connection_distance.is_finite()) {
            return Err(SimError::InvalidConnectionDistance(self.connection_distance));
        }
        if !(0.0..=1.0).contains(&self.min_similarity) {
            return Err(SimError::InvalidSimilarityThreshold(self.min_similarity));
        }
        Ok(())
    }

    /// Updates the viewport dimensions (host resize).
    ///
    /// Returns `SimError::InvalidDimensions` for non-positive dimensions;
    /// the config is left unchanged on error.
    pub fn resize(&mut self, width: f64, height: f64) -> Result<(), SimError> {
        if !(width > 0.0 && width.is_finite()) || !(height > 0.0 && height.is_finite()) {
            return Err(SimError::InvalidDimensions { width, height });
        }
        self.width = width;
        self.height = height;
        Ok(())
    }

    /// Length of the viewport diagonal; the coherence metric normalizes
    /// against half of this.
    pub fn diagonal(&self) -> f64 {
        self.width.hypot(self.height)
    }

    /// Builds a config from a loosely-typed JSON object, falling back to
    /// defaults for missing or mistyped keys, then validates.
    ///
    /// Recognized keys: `friction`, `boundary`, `connection_distance`,
    /// `width`, `height`, `capacity`, `min_similarity`. An unrecognized
    /// `boundary` string is an error (not a silent default) since it is
    /// almost certainly a typo.
    pub fn from_json(params: &Value) -> Result<Self, SimError> {
        let defaults = Self::default();
        let boundary = match params.get("boundary").and_then(Value::as_str) {
            Some(name) => BoundaryPolicy::from_name(name)?,
            None => defaults.boundary,
        };
        let config = Self {
            friction: param_f64(params, "friction", defaults.friction),
            boundary,
            connection_distance: param_f64(
                params,
                "connection_distance",
                defaults.connection_distance,
            ),
            width: param_f64(params, "width", defaults.width),
            height: param_f64(params, "height", defaults.height),
            capacity: param_usize(params, "capacity", defaults.capacity),
            min_similarity: param_f64(params, "min_similarity", defaults.min_similarity),
        };
        config.validate()?;
        Ok(config)
    }
}

/// Extracts an `f64` from `params[name]`, returning `default` if the key is
/// missing or not a number. Never fails.
pub fn param_f64(params: &Value, name: &str, default: f64) -> f64 {
    params.get(name).and_then(Value::as_f64).unwrap_or(default)
}

/// Extracts a `usize` from `params[name]`, returning `default` if the key is
/// missing or not a non-negative integer.
pub fn param_usize(params: &Value, name: &str, default: usize) -> usize {
    params
        .get(name)
        .and_then(Value::as_u64)
        .map(|v| v as usize)
        .unwrap_or(default)
}
