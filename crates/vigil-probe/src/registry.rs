//! Target registry client and the prober built on top of it.

use async_trait::async_trait;
use chrono::Utc;
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;

use vigil_core::{HealthSnapshot, TargetHealth};

use crate::error::{ProbeError, ProbeResult};

/// Capability the prober needs from the registry backend: the current
/// health of every target bound to a group.
#[async_trait]
pub trait TargetRegistry: Send + Sync {
    async fn target_health(&self, target_group: &str) -> ProbeResult<Vec<TargetHealth>>;
}

/// Wire shape of the registry's health endpoint.
#[derive(Debug, Deserialize)]
struct HealthResponse {
    targets: Vec<TargetHealth>,
}

/// Registry client over `GET {base}/v1/target-groups/{id}/health`.
pub struct HttpRegistry {
    base_url: String,
    client: reqwest::Client,
}

impl HttpRegistry {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl TargetRegistry for HttpRegistry {
    async fn target_health(&self, target_group: &str) -> ProbeResult<Vec<TargetHealth>> {
        let url = format!("{}/v1/target-groups/{target_group}/health", self.base_url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ProbeError::Status { status, url });
        }

        let body: HealthResponse = response
            .json()
            .await
            .map_err(|e| ProbeError::Malformed(e.to_string()))?;
        Ok(body.targets)
    }
}

/// Queries the registry and summarizes per-target health into a snapshot.
pub struct Prober {
    registry: Arc<dyn TargetRegistry>,
}

impl Prober {
    pub fn new(registry: Arc<dyn TargetRegistry>) -> Self {
        Self { registry }
    }

    /// Capture a fresh [`HealthSnapshot`] for the group.
    ///
    /// Registry errors propagate; there is no "assume healthy" fallback.
    pub async fn probe(&self, target_group: &str) -> ProbeResult<HealthSnapshot> {
        let targets = self.registry.target_health(target_group).await?;
        let snapshot = HealthSnapshot::from_targets(targets, Utc::now());

        debug!(
            %target_group,
            total = snapshot.total_targets,
            healthy = snapshot.healthy_count,
            unhealthy = snapshot.unhealthy_count(),
            "captured health snapshot"
        );
        Ok(snapshot)
    }
}
