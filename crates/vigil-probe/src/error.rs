//! Probe error types.

use thiserror::Error;

/// Errors that can occur while querying the target registry.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("registry request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("registry returned status {status} for {url}")]
    Status {
        status: reqwest::StatusCode,
        url: String,
    },

    #[error("registry returned a malformed body: {0}")]
    Malformed(String),
}

pub type ProbeResult<T> = Result<T, ProbeError>;
