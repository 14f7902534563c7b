//! The recheck scheduler the orchestrator drives.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::info;

use vigil_core::IncidentContext;
use vigil_core::event::RecheckEnvelope;

use crate::error::SchedulerResult;
use crate::rules::{RuleSpec, TriggerRules};

/// Arm/disarm contract the orchestrator sees.
///
/// Both operations are idempotent: arming an already-armed trigger replaces
/// its payload with the latest context, disarming an already-disarmed (or
/// never-armed) trigger succeeds.
#[async_trait]
pub trait RecheckTrigger: Send + Sync {
    async fn arm(&self, context: &IncidentContext) -> SchedulerResult<()>;
    async fn disarm(&self) -> SchedulerResult<()>;
}

/// Drives one named rule derived from the monitored group.
pub struct RecheckScheduler {
    rules: Arc<dyn TriggerRules>,
    group_name: String,
    interval: Duration,
}

impl RecheckScheduler {
    pub fn new(rules: Arc<dyn TriggerRules>, group_name: impl Into<String>, interval: Duration) -> Self {
        Self {
            rules,
            group_name: group_name.into(),
            interval,
        }
    }

    /// Deterministic rule name for this group. One group, one rule;
    /// overlapping arms overwrite it rather than fan out.
    pub fn rule_name(&self) -> String {
        format!("health-recheck-{}", self.group_name)
    }
}

#[async_trait]
impl RecheckTrigger for RecheckScheduler {
    async fn arm(&self, context: &IncidentContext) -> SchedulerResult<()> {
        let name = self.rule_name();
        let input = serde_json::to_value(RecheckEnvelope::new(context.clone()))?;

        self.rules
            .put_rule(&RuleSpec {
                name: name.clone(),
                description: format!("Health recheck for target group {}", self.group_name),
                period: self.interval,
                input,
            })
            .await?;

        info!(rule = %name, period_secs = self.interval.as_secs(), "recheck trigger armed");
        Ok(())
    }

    async fn disarm(&self) -> SchedulerResult<()> {
        let name = self.rule_name();
        self.rules.disable_rule(&name).await?;
        info!(rule = %name, "recheck trigger disarmed");
        Ok(())
    }
}
