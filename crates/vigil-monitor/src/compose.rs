//! Notification text, one builder per lifecycle phase.
//!
//! All builders are pure: the wall-clock instant comes in as an argument, so
//! identical inputs produce identical text. Composition only ever runs on a
//! valid snapshot — a failed probe never reaches this module.

use std::fmt::Write;
use std::time::Duration;

use chrono::{DateTime, Utc};

use vigil_core::HealthSnapshot;

/// First notification of an incident: the group just became unhealthy.
pub fn initial_alert(
    group_name: &str,
    alarm_name: &str,
    snapshot: &HealthSnapshot,
    interval: Duration,
    now: DateTime<Utc>,
) -> String {
    let mut message = String::new();
    let _ = writeln!(message, "🚨 *Target Group Health Alert*");
    let _ = writeln!(message, "Target Group: `{group_name}`");
    let _ = writeln!(message, "Alarm: `{alarm_name}`");
    let _ = writeln!(message, "Time: `{}`", now.to_rfc3339());
    message.push('\n');
    message.push_str(&health_status_block(snapshot));
    message.push_str(&unhealthy_list(snapshot, "Unhealthy Targets"));
    let _ = write!(
        message,
        "\nI'll check again in {} and update this message.",
        format_interval(interval)
    );
    message
}

/// The alarm fired but the registry disagrees: everything is healthy.
pub fn false_alarm(alarm_name: &str, now: DateTime<Utc>) -> String {
    format!(
        "✅ *False Alarm - Targets Healthy*\n\
         Alarm: `{alarm_name}`\n\
         Time: `{}`\n\
         All targets in the group are healthy.",
        now.to_rfc3339()
    )
}

/// A recheck found the group still unhealthy.
pub fn still_unhealthy(
    group_name: &str,
    snapshot: &HealthSnapshot,
    original: DateTime<Utc>,
    interval: Duration,
    now: DateTime<Utc>,
) -> String {
    let mut message = String::new();
    let _ = writeln!(message, "⚠️ *Target Group Still Unhealthy*");
    let _ = writeln!(message, "Target Group: `{group_name}`");
    let _ = writeln!(message, "Original Alert: `{}`", original.to_rfc3339());
    let _ = writeln!(message, "Current Time: `{}`", now.to_rfc3339());
    message.push('\n');
    message.push_str(&health_status_block(snapshot));
    message.push_str(&unhealthy_list(snapshot, "Still Unhealthy Targets"));
    let _ = write!(
        message,
        "\nI'll check again in {}.",
        format_interval(interval)
    );
    message
}

/// A recheck found every target healthy again.
pub fn recovered(
    group_name: &str,
    snapshot: &HealthSnapshot,
    original: DateTime<Utc>,
    now: DateTime<Utc>,
) -> String {
    let mut message = String::new();
    let _ = writeln!(message, "✅ *Target Group Recovered*");
    let _ = writeln!(message, "Target Group: `{group_name}`");
    let _ = writeln!(message, "Original Alert: `{}`", original.to_rfc3339());
    let _ = writeln!(message, "Recovery Time: `{}`", now.to_rfc3339());
    message.push('\n');
    message.push_str(&health_status_block(snapshot));
    message.push_str("\nAll targets are now healthy! 🎉");
    message
}

/// Ad hoc health summary, no lifecycle framing.
pub fn summary(group_name: &str, snapshot: &HealthSnapshot, now: DateTime<Utc>) -> String {
    let mut message = String::new();
    let _ = writeln!(message, "📊 *Target Group Health Summary*");
    let _ = writeln!(message, "Target Group: `{group_name}`");
    let _ = writeln!(message, "Time: `{}`", now.to_rfc3339());
    message.push('\n');
    message.push_str(&health_status_block(snapshot));
    message
}

/// Best-effort report for an invocation that failed outright.
pub fn monitor_error(error: &str, now: DateTime<Utc>) -> String {
    format!(
        "🚨 *Error in Health Monitor*\n\
         Error: {error}\n\
         Time: `{}`",
        now.to_rfc3339()
    )
}

/// Warning that arming the recheck trigger failed: the incident is open but
/// nothing will automatically re-check it.
pub fn arm_failure(group_name: &str, now: DateTime<Utc>) -> String {
    format!(
        "⚠️ *Recheck Scheduling Failed*\n\
         Target Group: `{group_name}`\n\
         Time: `{}`\n\
         Automatic re-checks may have stopped. Trigger a manual health check \
         and investigate the scheduler.",
        now.to_rfc3339()
    )
}

fn health_status_block(snapshot: &HealthSnapshot) -> String {
    format!(
        "*Health Status:*\n\
         • Total Targets: {}\n\
         • Healthy: {}\n\
         • Unhealthy: {}\n",
        snapshot.total_targets,
        snapshot.healthy_count,
        snapshot.unhealthy_count()
    )
}

fn unhealthy_list(snapshot: &HealthSnapshot, heading: &str) -> String {
    if snapshot.unhealthy_targets.is_empty() {
        return String::new();
    }

    let mut block = format!("\n*{heading}:*\n");
    for target in &snapshot.unhealthy_targets {
        let _ = writeln!(block, "• `{}` - {} ({})", target.id, target.state, target.reason);
    }
    block
}

fn format_interval(interval: Duration) -> String {
    let secs = interval.as_secs();
    if secs % 60 == 0 && secs >= 60 {
        let minutes = secs / 60;
        if minutes == 1 {
            "1 minute".to_string()
        } else {
            format!("{minutes} minutes")
        }
    } else {
        format!("{secs} seconds")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vigil_core::TargetHealth;

    fn snapshot() -> HealthSnapshot {
        HealthSnapshot::from_targets(
            vec![
                TargetHealth {
                    id: "i-1".to_string(),
                    state: "healthy".to_string(),
                    reason: None,
                },
                TargetHealth {
                    id: "i-2".to_string(),
                    state: "unhealthy".to_string(),
                    reason: Some("Health checks failed".to_string()),
                },
                TargetHealth {
                    id: "i-3".to_string(),
                    state: "draining".to_string(),
                    reason: None,
                },
            ],
            ts("2026-03-01T12:00:00Z"),
        )
    }

    fn ts(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    #[test]
    fn initial_alert_enumerates_unhealthy_targets() {
        let text = initial_alert(
            "tg-api",
            "tg-api-unhealthy-hosts",
            &snapshot(),
            Duration::from_secs(120),
            ts("2026-03-01T12:00:05Z"),
        );

        assert!(text.contains("Target Group Health Alert"));
        assert!(text.contains("`tg-api`"));
        assert!(text.contains("`tg-api-unhealthy-hosts`"));
        assert!(text.contains("`i-2` - unhealthy (Health checks failed)"));
        assert!(text.contains("`i-3` - draining (Unknown)"));
        assert!(!text.contains("i-1"));
        assert!(text.contains("I'll check again in 2 minutes"));
    }

    #[test]
    fn still_unhealthy_shows_both_timestamps() {
        let text = still_unhealthy(
            "tg-api",
            &snapshot(),
            ts("2026-03-01T12:00:00Z"),
            Duration::from_secs(120),
            ts("2026-03-01T12:04:00Z"),
        );

        assert!(text.contains("Original Alert: `2026-03-01T12:00:00+00:00`"));
        assert!(text.contains("Current Time: `2026-03-01T12:04:00+00:00`"));
        assert!(text.contains("Still Unhealthy Targets"));
    }

    #[test]
    fn recovered_references_original_alert() {
        let healthy = HealthSnapshot::from_targets(
            vec![TargetHealth {
                id: "i-1".to_string(),
                state: "healthy".to_string(),
                reason: None,
            }],
            ts("2026-03-01T12:06:00Z"),
        );

        let text = recovered(
            "tg-api",
            &healthy,
            ts("2026-03-01T12:00:00Z"),
            ts("2026-03-01T12:06:00Z"),
        );

        assert!(text.contains("Target Group Recovered"));
        assert!(text.contains("Original Alert: `2026-03-01T12:00:00+00:00`"));
        assert!(text.contains("Recovery Time: `2026-03-01T12:06:00+00:00`"));
        assert!(text.contains("All targets are now healthy!"));
    }

    #[test]
    fn summary_has_no_lifecycle_framing() {
        let text = summary("tg-api", &snapshot(), ts("2026-03-01T12:00:00Z"));

        assert!(text.contains("Target Group Health Summary"));
        assert!(!text.contains("Original Alert"));
        assert!(!text.contains("check again"));
    }

    #[test]
    fn builders_are_deterministic() {
        let a = summary("tg-api", &snapshot(), ts("2026-03-01T12:00:00Z"));
        let b = summary("tg-api", &snapshot(), ts("2026-03-01T12:00:00Z"));
        assert_eq!(a, b);
    }

    #[test]
    fn current_time_advances_between_rechecks() {
        let first = still_unhealthy(
            "tg-api",
            &snapshot(),
            ts("2026-03-01T12:00:00Z"),
            Duration::from_secs(120),
            ts("2026-03-01T12:02:00Z"),
        );
        let second = still_unhealthy(
            "tg-api",
            &snapshot(),
            ts("2026-03-01T12:00:00Z"),
            Duration::from_secs(120),
            ts("2026-03-01T12:04:00Z"),
        );

        // Same original, advancing current time.
        assert_ne!(first, second);
        assert!(first.contains("12:02:00"));
        assert!(second.contains("12:04:00"));
    }

    #[test]
    fn interval_formatting() {
        assert_eq!(format_interval(Duration::from_secs(120)), "2 minutes");
        assert_eq!(format_interval(Duration::from_secs(60)), "1 minute");
        assert_eq!(format_interval(Duration::from_secs(90)), "90 seconds");
    }
}
