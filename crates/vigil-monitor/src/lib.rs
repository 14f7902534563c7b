//! vigil-monitor — the health-check/notification state machine.
//!
//! Every invocation flows through [`Monitor::handle`]:
//!
//! ```text
//! TriggerEvent ──▶ probe ──▶ route() ──▶ compose ──▶ notify ──▶ arm/disarm
//! ```
//!
//! Incident state is never persisted. Each run reconstructs it from the
//! event payload plus a fresh [`vigil_core::HealthSnapshot`]; the recheck
//! trigger's embedded context is the only thing carried between runs.
//! [`route`] is a pure function over (event, snapshot), so the whole
//! transition table is testable without I/O.

pub mod compose;
pub mod error;
pub mod monitor;

pub use error::MonitorError;
pub use monitor::{Action, Monitor, MonitorSettings, Outcome, route};
