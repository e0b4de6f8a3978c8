//! Error type for rig construction and configuration loading.
//!
//! Every variant is raised while setting a controller up. Per-tick updates
//! never fail: missing hits, embedded probes and zero tick durations are
//! absorbed into the control signals instead.

use thiserror::Error;

/// Errors that can occur while building a controller or loading its config.
#[derive(Debug, Error)]
pub enum RigError {
    /// The camera guard needs at least one camera under its pivot.
    #[error("camera clip guard requires at least one camera under the pivot")]
    NoCameras,

    /// Capsule dimensions must be positive and finite.
    #[error("invalid capsule dimensions: height {height}, radius {radius}")]
    InvalidCapsule { height: f32, radius: f32 },

    /// A tunable is outside its allowed range.
    #[error("invalid config value `{field}`: {reason}")]
    InvalidConfig {
        field: &'static str,
        reason: String,
    },

    /// Standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl RigError {
    /// Shorthand for [`RigError::InvalidConfig`].
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        RigError::InvalidConfig {
            field,
            reason: reason.into(),
        }
    }
}
