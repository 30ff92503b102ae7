//! Error taxonomy for the scoring engine.
//!
//! Startup artifact failures ([`DataLoadError`]) degrade the engine to a
//! synthetic dataset; the process continues. Per-request failures
//! ([`ScoreError`]) are typed results caught at the orchestrator boundary,
//! so a bad lookup never takes the feed down with it.

use std::path::PathBuf;

/// Failure while loading persisted dataset artifacts at startup.
#[derive(Debug, thiserror::Error)]
pub enum DataLoadError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("dataset artifact is malformed: {0}")]
    Malformed(String),
}

/// Failure while scoring a single transaction.
#[derive(Debug, thiserror::Error)]
pub enum ScoreError {
    /// Feature vector length disagrees with the projection matrix row count.
    /// Dimensions are never silently realigned.
    #[error("feature vector has {actual} elements, projection expects {expected}")]
    ShapeMismatch { expected: usize, actual: usize },

    /// Malformed or out-of-bounds transaction id.
    #[error("transaction not found: {0}")]
    NotFound(String),
}
