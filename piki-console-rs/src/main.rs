//! Piki console
//!
//! Interactive menu front-end for the Piki n8n workflow: shipment status,
//! shared and local reports, and a free chat with the assistant.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use piki_sdk::config::{keys, CompositeConfigProvider, EnvConfigProvider, MemoryConfigProvider};
use piki_sdk::{Conversation, SessionId, WebhookConfig, WorkflowClient};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod app;
mod handlers;
mod ui;

use app::App;
use ui::{Formatter, Interactive};

/// Command-line overrides; anything unset comes from the environment or `.env`
#[derive(Parser, Debug)]
#[command(name = "piki", version, about = "Consola de Piki: tu envío, sin estrés.")]
struct Cli {
    /// n8n webhook URL (overrides N8N_WEBHOOK_URL)
    #[arg(long)]
    webhook_url: Option<String>,

    /// Per-request timeout, e.g. "120", "90s", "2m" (overrides TIMEOUT)
    #[arg(long)]
    timeout: Option<String>,

    /// Default directory for local reports (overrides REPORTS_DIR)
    #[arg(long)]
    reports_dir: Option<PathBuf>,

    /// Plain output: no colors, no emojis
    #[arg(long)]
    plain: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    /// Flags first, then the process environment
    fn config_provider(&self) -> CompositeConfigProvider {
        let mut overrides = MemoryConfigProvider::new();
        if let Some(ref url) = self.webhook_url {
            overrides.set(keys::WEBHOOK_URL, url);
        }
        if let Some(ref timeout) = self.timeout {
            overrides.set(keys::TIMEOUT, timeout);
        }
        if let Some(ref dir) = self.reports_dir {
            overrides.set(keys::REPORTS_DIR, dir.display());
        }

        CompositeConfigProvider::new()
            .with_provider(overrides)
            .with_provider(EnvConfigProvider::new())
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = WebhookConfig::from_provider(&cli.config_provider())
        .context("Invalid Piki configuration")?;
    info!(
        webhook = %config.webhook_url,
        timeout = ?config.timeout,
        reports_dir = %config.reports_dir.display(),
        "Configuration loaded"
    );

    let session = SessionId::generate(&config.session_prefix);
    let reports_dir = config.reports_dir.clone();
    let client = WorkflowClient::new_with_config(config).context("Failed to build webhook client")?;

    let formatter = if cli.plain {
        Formatter::with_settings(false, false)
    } else {
        Formatter::default()
    };

    let app = App::new(
        Conversation::new(client, session),
        Interactive::with_formatter(formatter),
        reports_dir,
    );
    app.run().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_flags_override_environment() {
        let cli = Cli::try_parse_from([
            "piki",
            "--webhook-url",
            "https://n8n.example.com/webhook/piki",
            "--timeout",
            "45s",
            "--reports-dir",
            "/tmp/piki-reports",
            "-vv",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 2);

        let config = WebhookConfig::from_provider(&cli.config_provider()).unwrap();
        assert_eq!(config.webhook_url, "https://n8n.example.com/webhook/piki");
        assert_eq!(config.timeout, Duration::from_secs(45));
        assert_eq!(config.reports_dir, PathBuf::from("/tmp/piki-reports"));
    }

    #[test]
    fn test_rejects_bad_timeout_flag() {
        let cli = Cli::try_parse_from(["piki", "--timeout", "nunca"]).unwrap();
        assert!(WebhookConfig::from_provider(&cli.config_provider()).is_err());
    }
}
