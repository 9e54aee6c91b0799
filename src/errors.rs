//! Error types shared by every fallible operation of the crate.

use thiserror::Error;

/// Errors raised while building, training or querying a [`Network`](crate::Network).
#[derive(Debug, Error)]
pub enum NetworkError {
    /// Malformed construction parameters. Nothing is built.
    #[error("Invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    /// A vector length disagrees with the layer it is bound to.
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// A training algorithm was handed layers/weights it cannot reconcile.
    #[error("Incompatible shapes: {message}")]
    IncompatibleShapes { message: String },

    /// A cluster exhausted its training budget without converging.
    #[error("Cluster {cluster} did not converge after {passes} passes ({elapsed_ms} ms)")]
    NonConvergence {
        cluster: usize,
        passes: usize,
        elapsed_ms: u64,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl NetworkError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        NetworkError::InvalidConfiguration {
            message: message.into(),
        }
    }

    pub(crate) fn shapes(message: impl Into<String>) -> Self {
        NetworkError::IncompatibleShapes {
            message: message.into(),
        }
    }
}
