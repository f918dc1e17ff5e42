//! Calculation error types.

use thiserror::Error;

use crate::AstrologySystem;

/// Errors that can occur while invoking the external astrology engine.
#[derive(Debug, Error)]
pub enum CalculationError {
    /// The engine process could not be started (missing runtime or script).
    #[error("failed to start calculation engine: {0}")]
    Spawn(String),

    /// The engine exited with a non-zero status.
    #[error("calculation engine exited with status {status}: {stderr}")]
    Failed { status: i32, stderr: String },

    /// Standard output was not a parseable result document.
    #[error("unparseable engine output: {0}")]
    Parse(String),

    /// The document reported `success: false`.
    #[error("calculation unsuccessful: {0}")]
    Unsuccessful(String),

    /// The document's system tag did not match the requested system.
    #[error("engine returned {got} result for a {requested} request")]
    SystemMismatch {
        requested: AstrologySystem,
        got: String,
    },

    /// The engine did not complete within the configured deadline.
    #[error("calculation timed out after {0}s")]
    Timeout(u64),

    /// The engine is not available at all.
    #[error("calculation engine unavailable: {0}")]
    Unavailable(String),
}
