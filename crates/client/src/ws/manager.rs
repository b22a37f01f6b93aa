//! Connection manager: keeps the leaderboard stream alive and feeds the
//! synchronizer.

use std::time::Duration;

use futures_util::StreamExt;
use tokio::sync::watch;

use super::connection::{ConnectionState, ConnectionStateMachine, ReconnectPolicy};
use super::transport::{Frame, Transport};
use crate::render::RenderSink;
use crate::stores::CompetitionStore;
use crate::sync::Synchronizer;

/// Owns the transport connection and the synchronizer behind it.
///
/// The store lives in the synchronizer, so it survives reconnects: the first
/// snapshot after a reconnect is diffed against the last one before it.
pub struct ConnectionManager<T, S> {
    url: String,
    transport: T,
    machine: ConnectionStateMachine,
    sync: Synchronizer<S>,
    state_tx: watch::Sender<ConnectionState>,
}

impl<T: Transport, S: RenderSink> ConnectionManager<T, S> {
    pub fn new(
        url: impl Into<String>,
        transport: T,
        policy: ReconnectPolicy,
        sync: Synchronizer<S>,
    ) -> Self {
        let machine = ConnectionStateMachine::new(policy);
        let (state_tx, _) = watch::channel(machine.state().clone());
        Self {
            url: url.into(),
            transport,
            machine,
            sync,
            state_tx,
        }
    }

    /// Watch connection state changes.
    pub fn subscribe_state(&self) -> watch::Receiver<ConnectionState> {
        self.state_tx.subscribe()
    }

    pub fn state(&self) -> &ConnectionState {
        self.machine.state()
    }

    /// Number of connection attempts made so far.
    pub fn attempts(&self) -> u64 {
        self.machine.attempts()
    }

    pub fn store(&self) -> &CompetitionStore {
        self.sync.store()
    }

    /// Connect and keep reconnecting to the same URL forever.
    ///
    /// Never returns; the process lifetime is the only teardown.
    pub async fn run(&mut self) {
        self.machine.connect();
        self.publish();

        loop {
            let delay = self.session().await;
            tracing::info!(
                url = %self.url,
                delay_ms = delay.as_millis() as u64,
                "reconnecting after delay"
            );
            tokio::time::sleep(delay).await;

            self.machine.reconnect_due();
            self.publish();
        }
    }

    /// One connection attempt, pumped until the connection is lost.
    /// Returns how long to wait before the next attempt.
    async fn session(&mut self) -> Duration {
        tracing::info!(
            url = %self.url,
            attempt = self.machine.attempts(),
            "connecting to leaderboard stream"
        );

        let mut frames = match self.transport.connect(&self.url).await {
            Ok(frames) => frames,
            Err(e) => {
                tracing::warn!(url = %self.url, error = %e, "connection attempt failed");
                let delay = self.machine.errored(e.to_string());
                return self.after_loss(delay);
            }
        };

        self.machine.opened();
        self.publish();
        tracing::info!(url = %self.url, "connected to leaderboard stream");

        let delay = loop {
            match frames.next().await {
                Some(Ok(Frame::Text(text))) => self.handle_text(&text),
                Some(Ok(Frame::Close(reason))) => {
                    let reason = reason
                        .filter(|r| !r.is_empty())
                        .unwrap_or_else(|| "closed by server".to_string());
                    tracing::info!(url = %self.url, %reason, "leaderboard stream closed");
                    break self.machine.closed(reason);
                }
                Some(Err(e)) => {
                    tracing::warn!(url = %self.url, error = %e, "leaderboard stream failed");
                    break self.machine.errored(e.to_string());
                }
                None => {
                    tracing::info!(url = %self.url, "leaderboard stream ended");
                    break self.machine.closed("stream ended");
                }
            }
        };

        self.after_loss(delay)
    }

    fn after_loss(&mut self, delay: Option<Duration>) -> Duration {
        self.publish();
        // `session` is the only place a loss is reported, so a reconnect is
        // never already pending here.
        delay.unwrap_or(self.machine.policy().delay)
    }

    fn handle_text(&mut self, text: &str) {
        if let Err(e) = self.sync.apply_frame(text) {
            tracing::warn!(error = %e, "dropping malformed frame");
        }
    }

    fn publish(&self) {
        self.state_tx.send_replace(self.machine.state().clone());
    }
}
