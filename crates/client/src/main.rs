//! Leaderboard viewer - Main entry point
//!
//! Connects to the leaderboard stream and prints every competition table
//! to stdout as updates arrive.

use anyhow::Context;
use leaderboard_viewer::ws::TungsteniteTransport;
use leaderboard_viewer::{ConnectionManager, Synchronizer, TerminalSink, ViewerConfig};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so they don't interleave with the tables on stdout.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("leaderboard_viewer=debug")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = ViewerConfig::from_env().context("invalid viewer configuration")?;
    tracing::info!(
        url = %config.ws_url,
        reconnect_delay_ms = config.reconnect.delay.as_millis() as u64,
        "starting leaderboard viewer"
    );

    let sync = Synchronizer::new(TerminalSink::new(std::io::stdout()));
    let mut manager =
        ConnectionManager::new(config.ws_url, TungsteniteTransport, config.reconnect, sync);
    manager.run().await;

    Ok(())
}
