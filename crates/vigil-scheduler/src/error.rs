//! Scheduler error types.

use thiserror::Error;

/// Errors from the trigger-rule backend.
#[derive(Debug, Error)]
pub enum SchedulerError {
    #[error("scheduler request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("scheduler returned status {status} for rule {rule}")]
    Status {
        status: reqwest::StatusCode,
        rule: String,
    },

    #[error("failed to encode rule payload: {0}")]
    Payload(#[from] serde_json::Error),
}

pub type SchedulerResult<T> = Result<T, SchedulerError>;
