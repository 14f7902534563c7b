//! vigil-probe — queries the target registry and summarizes health.
//!
//! The [`Prober`] asks the registry for every target bound to the monitored
//! group and folds the rows into a [`vigil_core::HealthSnapshot`]. A probe
//! failure is never interpreted as "no unhealthy targets" — it propagates so
//! the orchestrator can report it instead of masking a real outage.

pub mod error;
pub mod registry;

pub use error::{ProbeError, ProbeResult};
pub use registry::{HttpRegistry, Prober, TargetRegistry};
