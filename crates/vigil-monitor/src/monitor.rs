//! The orchestrator: classify → probe → route → compose → notify → schedule.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use serde::Serialize;
use tracing::{debug, error, info, warn};

use vigil_core::{HealthSnapshot, IncidentContext, TriggerEvent};
use vigil_notify::Notifier;
use vigil_probe::Prober;
use vigil_scheduler::RecheckTrigger;

use crate::compose;
use crate::error::MonitorError;

/// What the transition table decided for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// First confirmed-unhealthy alarm: alert, create context, arm.
    OpenIncident { alarm_name: String },
    /// Alarm fired but the group is healthy: notice only.
    FalseAlarm { alarm_name: String },
    /// Alarm event in a non-firing state: nothing to do.
    Ignore,
    /// Recheck found the group still unhealthy: update, re-arm.
    ContinueIncident(IncidentContext),
    /// Recheck found the group healthy: recovery message, disarm.
    CloseIncident(IncidentContext),
    /// Direct invocation: plain summary.
    Report,
}

/// The transition table. Pure: same (event, snapshot) ⇒ same action.
pub fn route(event: &TriggerEvent, snapshot: &HealthSnapshot) -> Action {
    match event {
        TriggerEvent::Alarm { name, .. } if event.is_firing_alarm() => {
            if snapshot.all_healthy() {
                Action::FalseAlarm {
                    alarm_name: name.clone(),
                }
            } else {
                Action::OpenIncident {
                    alarm_name: name.clone(),
                }
            }
        }
        TriggerEvent::Alarm { .. } => Action::Ignore,
        TriggerEvent::Recheck(context) => {
            if snapshot.all_healthy() {
                Action::CloseIncident(context.clone())
            } else {
                Action::ContinueIncident(context.clone())
            }
        }
        TriggerEvent::Direct => Action::Report,
    }
}

/// Result of one invocation, printed by the binary on success.
#[derive(Debug, Clone, Serialize)]
pub struct Outcome {
    /// Which transition ran.
    pub action: &'static str,
    /// Whether the notification reached the channel.
    pub delivered: bool,
    /// The snapshot this run decided on. Absent only for ignored events.
    pub snapshot: Option<HealthSnapshot>,
}

impl Outcome {
    fn ignored() -> Self {
        Self {
            action: "ignored",
            delivered: false,
            snapshot: None,
        }
    }
}

/// Settings the orchestrator needs, split out from the process [`vigil_core::Config`]
/// so tests can construct them directly.
#[derive(Debug, Clone)]
pub struct MonitorSettings {
    /// Monitored resource identifier, passed to the prober.
    pub target_group: String,
    /// Display name used in messages.
    pub group_name: String,
    /// Channel for new incidents and ad hoc summaries.
    pub default_channel: String,
    /// Period promised in messages and programmed into the trigger.
    pub recheck_interval: Duration,
}

/// The state machine. Holds injected capabilities, owns no incident state —
/// everything is reconstructed per invocation from payload + fresh probe.
pub struct Monitor {
    prober: Prober,
    notifier: Arc<dyn Notifier>,
    trigger: Arc<dyn RecheckTrigger>,
    settings: MonitorSettings,
}

impl Monitor {
    pub fn new(
        prober: Prober,
        notifier: Arc<dyn Notifier>,
        trigger: Arc<dyn RecheckTrigger>,
        settings: MonitorSettings,
    ) -> Self {
        Self {
            prober,
            notifier,
            trigger,
            settings,
        }
    }

    /// Entry point for one invocation.
    ///
    /// On failure a best-effort error report goes to the default channel and
    /// the error is returned, so the invoking trigger records a failed run.
    pub async fn handle(&self, event: TriggerEvent) -> Result<Outcome, MonitorError> {
        match self.process(event).await {
            Ok(outcome) => Ok(outcome),
            Err(e) => {
                error!(error = %e, "invocation failed");
                let text = compose::monitor_error(&e.to_string(), Utc::now());
                self.notifier.notify(&text, None).await;
                Err(e)
            }
        }
    }

    async fn process(&self, event: TriggerEvent) -> Result<Outcome, MonitorError> {
        // Non-firing alarms are ignored before any probe happens.
        if let TriggerEvent::Alarm { name, state } = &event {
            if !event.is_firing_alarm() {
                debug!(alarm = %name, %state, "alarm not in firing state, ignoring");
                return Ok(Outcome::ignored());
            }
        }

        let snapshot = self.prober.probe(&self.settings.target_group).await?;
        let action = route(&event, &snapshot);
        self.execute(action, snapshot).await
    }

    async fn execute(&self, action: Action, snapshot: HealthSnapshot) -> Result<Outcome, MonitorError> {
        let settings = &self.settings;
        let now = Utc::now();

        match action {
            Action::OpenIncident { alarm_name } => {
                info!(
                    alarm = %alarm_name,
                    unhealthy = snapshot.unhealthy_count(),
                    "opening incident"
                );
                let text = compose::initial_alert(
                    &settings.group_name,
                    &alarm_name,
                    &snapshot,
                    settings.recheck_interval,
                    now,
                );
                let delivered = self.notifier.notify(&text, None).await;

                let context = IncidentContext {
                    original_timestamp: now,
                    channel: settings.default_channel.clone(),
                    target_group: settings.target_group.clone(),
                };
                self.arm(&context).await;

                Ok(Outcome {
                    action: "initial-alert",
                    delivered,
                    snapshot: Some(snapshot),
                })
            }

            Action::FalseAlarm { alarm_name } => {
                info!(alarm = %alarm_name, "alarm fired but all targets healthy");
                let text = compose::false_alarm(&alarm_name, now);
                let delivered = self.notifier.notify(&text, None).await;

                Ok(Outcome {
                    action: "false-alarm",
                    delivered,
                    snapshot: Some(snapshot),
                })
            }

            Action::Ignore => Ok(Outcome::ignored()),

            Action::ContinueIncident(context) => {
                info!(
                    unhealthy = snapshot.unhealthy_count(),
                    since = %context.original_timestamp,
                    "incident continues"
                );
                let text = compose::still_unhealthy(
                    &settings.group_name,
                    &snapshot,
                    context.original_timestamp,
                    settings.recheck_interval,
                    now,
                );
                let delivered = self.notifier.notify(&text, Some(&context.channel)).await;

                // Refresh the trigger payload; original timestamp unchanged.
                self.arm(&context).await;

                Ok(Outcome {
                    action: "still-unhealthy",
                    delivered,
                    snapshot: Some(snapshot),
                })
            }

            Action::CloseIncident(context) => {
                info!(since = %context.original_timestamp, "incident recovered");
                let text = compose::recovered(
                    &settings.group_name,
                    &snapshot,
                    context.original_timestamp,
                    now,
                );
                let delivered = self.notifier.notify(&text, Some(&context.channel)).await;

                if let Err(e) = self.trigger.disarm().await {
                    // Harmless if the next firing sees a healthy group; it
                    // will disarm again.
                    warn!(error = %e, "failed to disarm recheck trigger");
                }

                Ok(Outcome {
                    action: "recovered",
                    delivered,
                    snapshot: Some(snapshot),
                })
            }

            Action::Report => {
                let text = compose::summary(&settings.group_name, &snapshot, now);
                let delivered = self.notifier.notify(&text, None).await;

                Ok(Outcome {
                    action: "summary",
                    delivered,
                    snapshot: Some(snapshot),
                })
            }
        }
    }

    /// Arm the recheck trigger. On failure, warn the channel — the incident
    /// would otherwise silently stop being rechecked.
    async fn arm(&self, context: &IncidentContext) {
        if let Err(e) = self.trigger.arm(context).await {
            error!(error = %e, "failed to arm recheck trigger");
            let text = compose::arm_failure(&self.settings.group_name, Utc::now());
            self.notifier.notify(&text, Some(&context.channel)).await;
        }
    }
}
