//! Client for the external recurring-trigger primitive.
//!
//! The backend exposes named rules: `PUT /v1/rules/{name}` creates or
//! replaces a rule wholesale, `POST /v1/rules/{name}/disable` turns one off.
//! Rule identity is the name — there is no way to create two rules with the
//! same name, which is what makes arming idempotent upstream.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use crate::error::{SchedulerError, SchedulerResult};

/// A named recurring rule: fire every `period`, delivering `input` to the
/// monitor's entry point.
#[derive(Debug, Clone)]
pub struct RuleSpec {
    pub name: String,
    pub description: String,
    pub period: Duration,
    pub input: Value,
}

/// Capability the scheduler needs from the rule backend.
#[async_trait]
pub trait TriggerRules: Send + Sync {
    /// Create or replace the rule, enabled. Keyed by `rule.name`.
    async fn put_rule(&self, rule: &RuleSpec) -> SchedulerResult<()>;

    /// Disable the named rule. Disabling a nonexistent rule succeeds.
    async fn disable_rule(&self, name: &str) -> SchedulerResult<()>;
}

#[derive(Serialize)]
struct PutRuleBody<'a> {
    description: &'a str,
    period_seconds: u64,
    state: &'a str,
    input: &'a Value,
}

/// Rule backend client over HTTP.
pub struct HttpRules {
    base_url: String,
    client: reqwest::Client,
}

impl HttpRules {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl TriggerRules for HttpRules {
    async fn put_rule(&self, rule: &RuleSpec) -> SchedulerResult<()> {
        let url = format!("{}/v1/rules/{}", self.base_url, rule.name);
        let body = PutRuleBody {
            description: &rule.description,
            period_seconds: rule.period.as_secs(),
            state: "enabled",
            input: &rule.input,
        };

        let response = self.client.put(&url).json(&body).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SchedulerError::Status {
                status,
                rule: rule.name.clone(),
            });
        }
        Ok(())
    }

    async fn disable_rule(&self, name: &str) -> SchedulerResult<()> {
        let url = format!("{}/v1/rules/{name}/disable", self.base_url);

        let response = self.client.post(&url).send().await?;
        let status = response.status();
        // A rule that no longer exists is already as disabled as it gets.
        if !status.is_success() && status != reqwest::StatusCode::NOT_FOUND {
            return Err(SchedulerError::Status {
                status,
                rule: name.to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rule(name: &str, input: Value) -> RuleSpec {
        RuleSpec {
            name: name.to_string(),
            description: "recheck".to_string(),
            period: Duration::from_secs(120),
            input,
        }
    }

    #[tokio::test]
    async fn put_rule_sends_enabled_spec() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("PUT", "/v1/rules/health-recheck-api")
            .match_body(mockito::Matcher::PartialJsonString(
                r#"{"period_seconds": 120, "state": "enabled"}"#.to_string(),
            ))
            .with_status(200)
            .create_async()
            .await;

        let rules = HttpRules::new(server.url());
        rules
            .put_rule(&rule("health-recheck-api", json!({"k": "v"})))
            .await
            .unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn put_rule_surfaces_backend_errors() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("PUT", "/v1/rules/health-recheck-api")
            .with_status(500)
            .create_async()
            .await;

        let rules = HttpRules::new(server.url());
        let err = rules
            .put_rule(&rule("health-recheck-api", json!({})))
            .await
            .unwrap_err();
        assert!(matches!(err, SchedulerError::Status { .. }));
    }

    #[tokio::test]
    async fn disable_rule_tolerates_missing_rule() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/v1/rules/health-recheck-api/disable")
            .with_status(404)
            .create_async()
            .await;

        let rules = HttpRules::new(server.url());
        rules.disable_rule("health-recheck-api").await.unwrap();
    }

    #[tokio::test]
    async fn disable_rule_surfaces_other_errors() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/v1/rules/health-recheck-api/disable")
            .with_status(500)
            .create_async()
            .await;

        let rules = HttpRules::new(server.url());
        let err = rules.disable_rule("health-recheck-api").await.unwrap_err();
        assert!(matches!(err, SchedulerError::Status { .. }));
    }
}
