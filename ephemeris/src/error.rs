//! Error types for position calculations

use thiserror::Error;

/// Errors that can occur while resolving bodies or computing positions.
///
/// Every failure is reported to the immediate caller; no fallback position
/// is ever substituted for a failed calculation.
#[derive(Error, Debug)]
pub enum EphemerisError {
    #[error("Unknown body: {0}")]
    UnknownBody(String),

    #[error("Kepler solver did not converge after {iterations} iterations (last correction {last_correction:e} rad)")]
    DidNotConverge {
        iterations: usize,
        last_correction: f64,
    },

    #[error("Invalid orbital elements: {0}")]
    InvalidElements(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, EphemerisError>;
