//! vigil-core — shared types for the target-group health monitor.
//!
//! Holds the three pieces every other crate agrees on:
//! - [`HealthSnapshot`] — one point-in-time health query result.
//! - [`IncidentContext`] — the state carried across re-invocations of an
//!   ongoing incident via the recheck trigger payload.
//! - [`TriggerEvent`] — classification of the JSON payload that invoked us.
//!
//! Plus the [`Config`] struct assembled once at process start.

pub mod config;
pub mod event;
pub mod types;

pub use config::{Config, ConfigError};
pub use event::TriggerEvent;
pub use types::*;
