//! Chat delivery over a Slack-style `chat.postMessage` API.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::error::NotifyError;

/// Bound on the chat call so a slow endpoint cannot stall an invocation.
const DELIVERY_TIMEOUT: Duration = Duration::from_secs(10);

/// Capability the orchestrator uses to reach the channel.
///
/// `channel: None` means the configured default channel. The return value is
/// whether the message was delivered; implementations must not error.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, text: &str, channel: Option<&str>) -> bool;
}

/// Settings for the chat notifier.
#[derive(Debug, Clone)]
pub struct ChatSettings {
    /// API base URL (e.g. `https://slack.com/api`).
    pub api_url: String,
    /// Bearer token. `None` disables delivery entirely.
    pub token: Option<String>,
    /// Default channel when the caller does not name one.
    pub default_channel: String,
    /// Bot display name attached to messages.
    pub bot_name: String,
}

#[derive(Serialize)]
struct PostMessage<'a> {
    channel: &'a str,
    text: &'a str,
    username: &'a str,
    icon_emoji: &'a str,
}

#[derive(Deserialize)]
struct PostMessageAck {
    ok: bool,
    error: Option<String>,
}

/// Posts messages with a bearer token; disabled mode without one.
pub struct ChatNotifier {
    settings: ChatSettings,
    client: reqwest::Client,
}

impl ChatNotifier {
    pub fn new(settings: ChatSettings) -> Self {
        Self {
            settings,
            client: reqwest::Client::new(),
        }
    }

    async fn post(&self, token: &str, text: &str, channel: &str) -> Result<(), NotifyError> {
        let url = format!("{}/chat.postMessage", self.settings.api_url);
        let payload = PostMessage {
            channel,
            text,
            username: &self.settings.bot_name,
            icon_emoji: ":satellite_antenna:",
        };

        let response = self
            .client
            .post(&url)
            .timeout(DELIVERY_TIMEOUT)
            .bearer_auth(token)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(NotifyError::Status(status));
        }

        let ack: PostMessageAck = response.json().await?;
        if !ack.ok {
            return Err(NotifyError::Rejected(
                ack.error.unwrap_or_else(|| "unknown error".to_string()),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl Notifier for ChatNotifier {
    async fn notify(&self, text: &str, channel: Option<&str>) -> bool {
        let Some(token) = self.settings.token.clone() else {
            warn!("chat token not configured, skipping notification");
            return false;
        };

        let channel = channel.unwrap_or(&self.settings.default_channel);
        match self.post(&token, text, channel).await {
            Ok(()) => {
                info!(%channel, "chat message delivered");
                true
            }
            Err(e) => {
                error!(%channel, error = %e, "chat delivery failed");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(api_url: String, token: Option<&str>) -> ChatSettings {
        ChatSettings {
            api_url,
            token: token.map(|t| t.to_string()),
            default_channel: "#ops".to_string(),
            bot_name: "vigil".to_string(),
        }
    }

    #[tokio::test]
    async fn delivers_and_reports_true() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/chat.postMessage")
            .match_header("authorization", "Bearer xoxb-test")
            .with_status(200)
            .with_body(r#"{"ok": true}"#)
            .create_async()
            .await;

        let notifier = ChatNotifier::new(settings(server.url(), Some("xoxb-test")));
        assert!(notifier.notify("all good", None).await);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn missing_token_short_circuits_without_request() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/chat.postMessage")
            .expect(0)
            .create_async()
            .await;

        let notifier = ChatNotifier::new(settings(server.url(), None));
        assert!(!notifier.notify("never sent", None).await);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn rejected_ack_reports_false() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/chat.postMessage")
            .with_status(200)
            .with_body(r#"{"ok": false, "error": "channel_not_found"}"#)
            .create_async()
            .await;

        let notifier = ChatNotifier::new(settings(server.url(), Some("xoxb-test")));
        assert!(!notifier.notify("hello", Some("#nope")).await);
    }

    #[tokio::test]
    async fn non_success_status_reports_false() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/chat.postMessage")
            .with_status(429)
            .create_async()
            .await;

        let notifier = ChatNotifier::new(settings(server.url(), Some("xoxb-test")));
        assert!(!notifier.notify("hello", None).await);
    }

    #[tokio::test]
    async fn unreachable_endpoint_reports_false() {
        let notifier = ChatNotifier::new(settings(
            "http://127.0.0.1:1".to_string(),
            Some("xoxb-test"),
        ));
        assert!(!notifier.notify("hello", None).await);
    }

    #[tokio::test]
    async fn explicit_channel_overrides_default() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/chat.postMessage")
            .match_body(mockito::Matcher::PartialJsonString(
                r##"{"channel": "#incidents"}"##.to_string(),
            ))
            .with_status(200)
            .with_body(r#"{"ok": true}"#)
            .create_async()
            .await;

        let notifier = ChatNotifier::new(settings(server.url(), Some("xoxb-test")));
        assert!(notifier.notify("routed", Some("#incidents")).await);
        mock.assert_async().await;
    }
}
