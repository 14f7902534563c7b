//! Classification of invocation payloads.
//!
//! Every invocation arrives with a JSON payload in one of three shapes:
//! a recheck envelope written by our own scheduler rule, an alarm
//! notification envelope, or anything else (treated as a direct check).
//! Classification is total — there is no "invalid event" error; an
//! unrecognized payload is a direct invocation.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::IncidentContext;

/// `source` field stamped on recheck envelopes we emit.
pub const RECHECK_SOURCE: &str = "vigil.scheduler";
/// `detail-type` field stamped on recheck envelopes we emit.
pub const RECHECK_DETAIL_TYPE: &str = "Health Check Recheck";

/// Alarm state value that means the alarm is firing.
pub const ALARM_STATE_FIRING: &str = "ALARM";

/// The stimulus behind one invocation. Exactly one variant per run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TriggerEvent {
    /// An alarm notification: alarm name plus its new state value.
    Alarm { name: String, state: String },
    /// A firing of our own recheck rule, carrying the incident context.
    Recheck(IncidentContext),
    /// Ad hoc / manual invocation with no lifecycle framing.
    Direct,
}

impl TriggerEvent {
    /// Whether this is an alarm event in the firing state.
    pub fn is_firing_alarm(&self) -> bool {
        matches!(self, TriggerEvent::Alarm { state, .. } if state == ALARM_STATE_FIRING)
    }
}

/// Envelope our scheduler rule delivers on each firing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecheckEnvelope {
    pub source: String,
    #[serde(rename = "detail-type")]
    pub detail_type: String,
    pub detail: IncidentContext,
}

impl RecheckEnvelope {
    /// Wrap an incident context for embedding in the trigger rule.
    pub fn new(context: IncidentContext) -> Self {
        Self {
            source: RECHECK_SOURCE.to_string(),
            detail_type: RECHECK_DETAIL_TYPE.to_string(),
            detail: context,
        }
    }
}

#[derive(Debug, Deserialize)]
struct AlarmEnvelope {
    #[serde(rename = "AlarmName")]
    alarm_name: String,
    #[serde(rename = "NewStateValue")]
    new_state_value: Option<String>,
}

/// Classify an invocation payload into a [`TriggerEvent`].
///
/// Recheck envelopes are matched first (they are the only shape we author
/// ourselves), then alarm envelopes; everything else is a direct check.
/// An alarm envelope without a `NewStateValue` classifies with state
/// `"Unknown"` and is later ignored by the routing table.
pub fn classify(payload: &Value) -> TriggerEvent {
    if let Ok(envelope) = serde_json::from_value::<RecheckEnvelope>(payload.clone()) {
        if envelope.detail_type == RECHECK_DETAIL_TYPE {
            return TriggerEvent::Recheck(envelope.detail);
        }
    }

    if let Ok(envelope) = serde_json::from_value::<AlarmEnvelope>(payload.clone()) {
        return TriggerEvent::Alarm {
            name: envelope.alarm_name,
            state: envelope
                .new_state_value
                .unwrap_or_else(|| "Unknown".to_string()),
        };
    }

    TriggerEvent::Direct
}
