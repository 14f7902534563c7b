//! Monitor error types.
//!
//! Only failures of the health-determination step propagate. Notification
//! and scheduling failures degrade in place — they are logged where they
//! happen and folded into the [`crate::Outcome`].

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MonitorError {
    /// The registry could not be queried or returned garbage. Fatal to the
    /// invocation: reporting "healthy" on a failed probe would mask outages.
    #[error("health probe failed: {0}")]
    Probe(#[from] vigil_probe::ProbeError),
}
