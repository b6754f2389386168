//! Error types for chronograph.
//!
//! Anomalies inside the pipeline (malformed samples, dangling edges, empty
//! intersections) degrade to fewer results and never surface here. These
//! errors are only returned for invalid caller requests.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ChronoError>;

#[derive(Debug, Error)]
pub enum ChronoError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid window [{start}, {end}]: bounds must be finite and start <= end")]
    InvalidWindow { start: f64, end: f64 },

    #[error("Unknown entity: {0}")]
    UnknownEntity(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
