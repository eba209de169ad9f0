//! mikobot, a small cat-shaped IRC bot.
//!
//! Startup order matters: the handler is attached when the connection
//! is constructed, so every event from registration onward has a
//! listener. A separate task waits for Ctrl+C or SIGTERM and asks the
//! session for a graceful quit.

mod cli;
mod config;
mod handlers;
mod logging;
mod replies;
mod rng;

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tokio::signal;
use tracing::info;

use mikobot_client::{ClientConfig, Connection};

use crate::cli::Cli;
use crate::handlers::MikoHandler;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logging comes up between load and validation: the subscriber
    // needs the loaded debug toggle, and validation's warnings need
    // the subscriber.
    let config = config::load_config(&cli.config)
        .with_context(|| format!("loading configuration from {}", cli.config.display()))?;
    logging::init(config.debug);
    config::validate_config(&config)
        .with_context(|| format!("validating configuration from {}", cli.config.display()))?;

    info!(
        server = %config.server,
        nick = %config.nick,
        channels = config.channels.len(),
        "Starting mikobot"
    );

    let client_config =
        ClientConfig::new(config.server.clone(), config.nick.clone()).with_tls(config.tls);
    let handler = Arc::new(MikoHandler::new(Arc::new(config)));
    let mut conn = Connection::new(client_config, handler);

    conn.connect()
        .await
        .context("establishing the server connection")?;

    let session = conn.session();
    tokio::spawn(async move {
        wait_for_shutdown().await;
        session.quit();
    });

    conn.run().await.context("session ended abnormally")?;

    info!("Goodbye");
    Ok(())
}

/// Waits for shutdown signals (Ctrl+C or SIGTERM).
async fn wait_for_shutdown() {
    #[cfg(unix)]
    {
        let mut sigterm = signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to register SIGTERM handler");

        tokio::select! {
            _ = signal::ctrl_c() => {
                info!("Received Ctrl+C, shutting down");
            }
            _ = sigterm.recv() => {
                info!("Received SIGTERM, shutting down");
            }
        }
    }

    #[cfg(not(unix))]
    {
        signal::ctrl_c().await.expect("Failed to listen for Ctrl+C");
        info!("Received Ctrl+C, shutting down");
    }
}
