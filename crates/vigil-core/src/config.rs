//! Process configuration.
//!
//! All configuration comes from environment variables, read exactly once at
//! startup into a [`Config`] that is passed down to the subsystems. Nothing
//! reads the environment after that point.

use std::time::Duration;

use thiserror::Error;

/// Default recheck period when `VIGIL_RECHECK_INTERVAL` is unset.
pub const DEFAULT_RECHECK_INTERVAL: Duration = Duration::from_secs(120);

/// Default chat API base URL.
pub const DEFAULT_CHAT_API_URL: &str = "https://slack.com/api";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

/// Everything the monitor needs to run, assembled from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    /// Monitored resource (target group) identifier.
    pub target_group: String,
    /// Display name used in notifications and the derived rule name.
    pub target_group_name: String,
    /// Base URL of the target registry API.
    pub registry_url: String,
    /// Base URL of the recurring-trigger scheduler API.
    pub scheduler_url: String,
    /// Bearer token for chat delivery. Absent ⇒ notifications are disabled.
    pub chat_token: Option<String>,
    /// Default notification channel.
    pub chat_channel: String,
    /// Chat API base URL.
    pub chat_api_url: String,
    /// Bot display name attached to outgoing messages.
    pub bot_name: String,
    /// Period between rechecks while an incident is open.
    pub recheck_interval: Duration,
}

impl Config {
    /// Read configuration from the environment.
    ///
    /// Log verbosity is not part of this struct — it is consumed directly by
    /// the tracing `EnvFilter` in the binary, via `RUST_LOG`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let target_group = require("VIGIL_TARGET_GROUP")?;
        let target_group_name =
            optional("VIGIL_TARGET_GROUP_NAME").unwrap_or_else(|| target_group.clone());

        let recheck_interval = match optional("VIGIL_RECHECK_INTERVAL") {
            Some(raw) => parse_duration(&raw).ok_or(ConfigError::Invalid {
                key: "VIGIL_RECHECK_INTERVAL",
                value: raw,
            })?,
            None => DEFAULT_RECHECK_INTERVAL,
        };

        Ok(Self {
            target_group,
            target_group_name,
            registry_url: require("VIGIL_REGISTRY_URL")?,
            scheduler_url: require("VIGIL_SCHEDULER_URL")?,
            chat_token: optional("VIGIL_SLACK_TOKEN"),
            chat_channel: require("VIGIL_SLACK_CHANNEL")?,
            chat_api_url: optional("VIGIL_SLACK_API_URL")
                .unwrap_or_else(|| DEFAULT_CHAT_API_URL.to_string()),
            bot_name: optional("VIGIL_BOT_NAME").unwrap_or_else(|| "vigil".to_string()),
            recheck_interval,
        })
    }
}

fn require(key: &'static str) -> Result<String, ConfigError> {
    optional(key).ok_or(ConfigError::Missing(key))
}

fn optional(key: &str) -> Option<String> {
    match std::env::var(key) {
        Ok(value) if !value.is_empty() => Some(value),
        _ => None,
    }
}

/// Parse a duration string like "2m", "30s", "500ms", or plain seconds.
pub fn parse_duration(s: &str) -> Option<Duration> {
    let s = s.trim();
    if let Some(secs) = s.strip_suffix('s') {
        if let Some(ms) = secs.strip_suffix('m') {
            ms.parse::<u64>().ok().map(Duration::from_millis)
        } else {
            secs.parse::<u64>().ok().map(Duration::from_secs)
        }
    } else if let Some(mins) = s.strip_suffix('m') {
        mins.parse::<u64>().ok().map(|m| Duration::from_secs(m * 60))
    } else {
        s.parse::<u64>().ok().map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_duration_minutes() {
        assert_eq!(parse_duration("2m"), Some(Duration::from_secs(120)));
    }

    #[test]
    fn parse_duration_seconds() {
        assert_eq!(parse_duration("90s"), Some(Duration::from_secs(90)));
    }

    #[test]
    fn parse_duration_milliseconds() {
        assert_eq!(parse_duration("250ms"), Some(Duration::from_millis(250)));
    }

    #[test]
    fn parse_duration_plain_number_as_seconds() {
        assert_eq!(parse_duration("45"), Some(Duration::from_secs(45)));
    }

    #[test]
    fn parse_duration_rejects_garbage() {
        assert_eq!(parse_duration("soon"), None);
        assert_eq!(parse_duration(""), None);
    }

    #[test]
    fn missing_key_error_names_the_key() {
        let err = ConfigError::Missing("VIGIL_TARGET_GROUP");
        assert!(err.to_string().contains("VIGIL_TARGET_GROUP"));
    }
}
