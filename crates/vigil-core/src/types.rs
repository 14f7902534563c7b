//! Domain types for health snapshots and incident state.
//!
//! A `HealthSnapshot` is constructed fresh on every invocation and discarded
//! after use. An `IncidentContext` is created when an alarm first confirms
//! real unhealthy targets and is threaded through every recheck until a
//! snapshot shows the group healthy again. Neither is persisted anywhere —
//! the recheck trigger's embedded payload is the only state between runs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The health state string the registry reports for a passing target.
pub const HEALTHY_STATE: &str = "healthy";

/// One row from the target registry: a registered target and its current
/// health state. Any state other than `"healthy"` carries a reason.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TargetHealth {
    /// Target identifier (instance id, address, etc.).
    pub id: String,
    /// Health state label as reported by the registry.
    pub state: String,
    /// Human-readable reason for a non-healthy state.
    pub reason: Option<String>,
}

impl TargetHealth {
    pub fn is_healthy(&self) -> bool {
        self.state == HEALTHY_STATE
    }
}

/// A target that failed its health check, as carried in a snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UnhealthyTarget {
    pub id: String,
    pub state: String,
    pub reason: String,
}

/// Immutable result of one health probe.
///
/// `healthy_count + unhealthy_targets.len() == total_targets` always holds:
/// snapshots are only built through [`HealthSnapshot::from_targets`], which
/// derives both counts from the same row set. The unhealthy count is never
/// stored separately.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthSnapshot {
    pub total_targets: u32,
    pub healthy_count: u32,
    /// Unhealthy targets in registry order.
    pub unhealthy_targets: Vec<UnhealthyTarget>,
    /// When this snapshot was captured.
    pub captured_at: DateTime<Utc>,
}

impl HealthSnapshot {
    /// Fold raw registry rows into a snapshot, computing the counts.
    ///
    /// A missing reason on an unhealthy target renders as `"Unknown"`.
    pub fn from_targets(targets: Vec<TargetHealth>, captured_at: DateTime<Utc>) -> Self {
        let total_targets = targets.len() as u32;
        let mut healthy_count = 0;
        let mut unhealthy_targets = Vec::new();

        for target in targets {
            if target.is_healthy() {
                healthy_count += 1;
            } else {
                unhealthy_targets.push(UnhealthyTarget {
                    id: target.id,
                    state: target.state,
                    reason: target.reason.unwrap_or_else(|| "Unknown".to_string()),
                });
            }
        }

        Self {
            total_targets,
            healthy_count,
            unhealthy_targets,
            captured_at,
        }
    }

    /// Number of targets currently failing their health check.
    pub fn unhealthy_count(&self) -> u32 {
        self.unhealthy_targets.len() as u32
    }

    /// Whether every registered target is healthy.
    pub fn all_healthy(&self) -> bool {
        self.unhealthy_targets.is_empty()
    }
}

/// State carried across re-invocations of an ongoing incident.
///
/// Serialized verbatim into the recheck trigger payload and read back on the
/// next firing. The original alert timestamp and the destination channel are
/// immutable for the lifetime of the incident; current health is always
/// re-derived from a fresh snapshot, never cached here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IncidentContext {
    /// When the incident was first confirmed. Never changes once set.
    pub original_timestamp: DateTime<Utc>,
    /// Channel the incident is being reported to.
    pub channel: String,
    /// Monitored resource (target group) identifier.
    pub target_group: String,
}
