//! Notifier error types.
//!
//! These never cross the [`crate::Notifier`] trait boundary — callers only
//! see a delivered/not-delivered bool. They exist so the internal send path
//! can use `?` and so log lines carry a precise failure cause.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("chat request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("chat API returned status {0}")]
    Status(reqwest::StatusCode),

    #[error("chat API rejected the message: {0}")]
    Rejected(String),
}
