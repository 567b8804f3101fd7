//! Error types for the emergence-engine core.

use thiserror::Error;

/// Errors produced by simulation construction and name-based dispatch.
///
/// Steady-state operation never errors: spawning at capacity evicts, and
/// numeric singularities are avoided structurally by the force epsilon guard.
/// Everything here is detected fail-fast, at construction or parse time.
#[derive(Debug, Error)]
pub enum SimError {
    /// Capacity was zero when building a configuration.
    #[error("invalid capacity: must be at least 1")]
    InvalidCapacity,

    /// Friction coefficient outside (0, 1].
    #[error("invalid friction {0}: must be in (0, 1]")]
    InvalidFriction(f64),

    /// Viewport width or height was non-positive or non-finite.
    #[error("invalid viewport {width}x{height}: dimensions must be positive")]
    InvalidDimensions { width: f64, height: f64 },

    /// Connection distance was non-positive or non-finite.
    #[error("invalid connection distance {0}: must be positive")]
    InvalidConnectionDistance(f64),

    /// Similarity threshold outside [0, 1].
    #[error("invalid similarity threshold {0}: must be in [0, 1]")]
    InvalidSimilarityThreshold(f64),

    /// A force name was not found in the catalogue.
    #[error("unknown force: {0}")]
    UnknownForce(String),

    /// A boundary policy name was not recognized.
    #[error("unknown boundary policy: {0}")]
    UnknownBoundary(String),

    /// An interaction mode name was not recognized.
    #[error("unknown interaction mode: {0}")]
    UnknownMode(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_friction_includes_value() {
        let err = SimError::InvalidFriction(1.5);
        let msg = format!("{err}");
        assert!(msg.contains("1.5"), "expected value in message, got: {msg}");
    }

    #[test]
    fn invalid_dimensions_includes_both_dimensions() {
        let err = SimError::InvalidDimensions {
            width: -3.0,
            height: 600.0,
        };
        let msg = format!("{err}");
        assert!(msg.contains("-3"), "missing width in: {msg}");
        assert!(msg.contains("600"), "missing height in: {msg}");
    }

    #[test]
    fn unknown_force_includes_name() {
        let err = SimError::UnknownForce("gravity".into());
        let msg = format!("{err}");
        assert!(msg.contains("gravity"), "missing name in: {msg}");
    }

    #[test]
    fn unknown_boundary_includes_name() {
        let err = SimError::UnknownBoundary("reflect".into());
        assert!(format!("{err}").contains("reflect"));
    }

    #[test]
    fn unknown_mode_includes_name() {
        let err = SimError::UnknownMode("paint".into());
        assert!(format!("{err}").contains("paint"));
    }

    #[test]
    fn sim_error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SimError>();
    }

    #[test]
    fn sim_error_implements_std_error() {
        fn assert_std_error<T: std::error::Error>() {}
        assert_std_error::<SimError>();
    }
}
