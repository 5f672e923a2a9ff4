use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use breach_check_rs::checker::Checker;
use breach_check_rs::config::Config;
use breach_check_rs::notifier::{LogTransport, Notifier};
use breach_check_rs::server::{self, AppState};
use breach_check_rs::wordlist::Wordlist;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cfg = Config::parse();
    info!(
        bind = %cfg.bind,
        wordlist = %cfg.wordlist.display(),
        sender = %cfg.sender,
        operator = cfg.operator_email.as_deref().unwrap_or("<none>"),
        ui_dir = %cfg
            .ui_dir
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "<none>".to_string()),
        "breach-check-rs configuration"
    );

    let wordlist = Arc::new(Wordlist::load_or_empty(&cfg.wordlist));
    let notifier = Notifier::new(
        Arc::new(LogTransport),
        cfg.sender.clone(),
        cfg.operator_email.clone(),
    );
    let checker = Checker::new(wordlist, notifier)
        .with_notify_timeout(Duration::from_secs(cfg.notify_timeout_secs));
    let state = AppState::new(checker);

    tokio::select! {
        res = server::spawn_server(&cfg.bind, state, cfg.ui_dir.as_deref()) => res?,
        _ = tokio::signal::ctrl_c() => info!("shutting down"),
    }

    Ok(())
}
