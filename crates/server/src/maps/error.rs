//! Mapping service error types.

use thiserror::Error;

/// Errors from the external mapping capability.
///
/// A hard failure here aborts the whole sequencing attempt. Per-leg
/// failures inside an otherwise successful response are NOT errors; they
/// surface as `None` metrics and are tolerated by the sequencer.
#[derive(Debug, Error)]
pub enum MapsError {
    /// Transport-level failure (network, TLS, timeout).
    #[error("mapping request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success top-level status.
    #[error("mapping service returned status {status}")]
    Api {
        /// Provider status string, e.g. `REQUEST_DENIED`.
        status: String,
    },

    /// The response body did not match the expected shape.
    #[error("failed to parse mapping response: {0}")]
    Parse(String),

    /// No API key is configured; sequencing and geocoding are disabled.
    #[error("no mapping API key configured")]
    NotConfigured,
}
