//! vigild — the vigil entry point.
//!
//! One process run handles exactly one invocation: the external trigger
//! (alarm webhook, recheck rule, or an operator) executes `vigild run` with
//! the event payload, and the exit status tells the trigger whether the run
//! succeeded. No state survives between runs.
//!
//! # Usage
//!
//! ```text
//! vigild run --event payload.json    # handle an invocation payload
//! echo '{}' | vigild run             # same, payload from stdin
//! vigild check                       # ad hoc health summary
//! ```

use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing::{debug, info};

use vigil_core::{Config, TriggerEvent, event};
use vigil_monitor::{Monitor, MonitorSettings};
use vigil_notify::{ChatNotifier, ChatSettings};
use vigil_probe::{HttpRegistry, Prober};
use vigil_scheduler::{HttpRules, RecheckScheduler};

#[derive(Parser)]
#[command(name = "vigild", about = "Target group health monitor")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Handle one invocation payload (from a file, or stdin if omitted).
    Run {
        /// Path to the JSON event payload.
        #[arg(long)]
        event: Option<PathBuf>,
    },
    /// Run an ad hoc health check and post the summary.
    Check,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,vigil=debug".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?;

    let event = match cli.command {
        Command::Run { event: file } => {
            let payload = read_payload(file.as_deref())?;
            debug!(%payload, "received event");
            event::classify(&payload)
        }
        Command::Check => TriggerEvent::Direct,
    };

    let monitor = build_monitor(&config);
    let outcome = monitor.handle(event).await?;

    info!(action = outcome.action, delivered = outcome.delivered, "invocation complete");
    println!("{}", serde_json::to_string_pretty(&outcome)?);
    Ok(())
}

/// Assemble the monitor from configuration.
fn build_monitor(config: &Config) -> Monitor {
    let prober = Prober::new(Arc::new(HttpRegistry::new(config.registry_url.clone())));

    let notifier = Arc::new(ChatNotifier::new(ChatSettings {
        api_url: config.chat_api_url.clone(),
        token: config.chat_token.clone(),
        default_channel: config.chat_channel.clone(),
        bot_name: config.bot_name.clone(),
    }));

    let trigger = Arc::new(RecheckScheduler::new(
        Arc::new(HttpRules::new(config.scheduler_url.clone())),
        config.target_group_name.clone(),
        config.recheck_interval,
    ));

    Monitor::new(
        prober,
        notifier,
        trigger,
        MonitorSettings {
            target_group: config.target_group.clone(),
            group_name: config.target_group_name.clone(),
            default_channel: config.chat_channel.clone(),
            recheck_interval: config.recheck_interval,
        },
    )
}

/// Read the invocation payload from a file or stdin.
///
/// An empty payload classifies as a direct check, so piping nothing in
/// behaves like `vigild check`.
fn read_payload(path: Option<&std::path::Path>) -> anyhow::Result<serde_json::Value> {
    let raw = match path {
        Some(path) => std::fs::read_to_string(path)?,
        None => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };

    if raw.trim().is_empty() {
        return Ok(serde_json::Value::Object(Default::default()));
    }
    Ok(serde_json::from_str(&raw)?)
}
