//! Connection lifecycle: states, retry policy and the state machine.

use std::time::Duration;

/// Connection state of the leaderboard stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Connected,
    /// The server or the network closed the stream; a reconnect is pending.
    Closed { reason: String },
    /// The transport failed; a reconnect is pending.
    Errored { reason: String },
}

impl ConnectionState {
    pub fn is_connected(&self) -> bool {
        matches!(self, ConnectionState::Connected)
    }

    pub fn is_connecting(&self) -> bool {
        matches!(self, ConnectionState::Connecting)
    }

    /// Closed or errored, waiting for the reconnect delay.
    pub fn is_waiting(&self) -> bool {
        matches!(
            self,
            ConnectionState::Closed { .. } | ConnectionState::Errored { .. }
        )
    }
}

/// Retry policy for a lost connection: one attempt after a fixed delay,
/// forever. No backoff, no jitter, no attempt limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconnectPolicy {
    pub delay: Duration,
}

impl ReconnectPolicy {
    pub const DEFAULT_DELAY: Duration = Duration::from_millis(1000);

    pub fn fixed(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for ReconnectPolicy {
    fn default() -> Self {
        Self::fixed(Self::DEFAULT_DELAY)
    }
}

/// Explicit connection state machine.
///
/// ```text
/// Disconnected -> Connecting -> Connected -> Closed | Errored -> Connecting -> ...
/// ```
///
/// There is no terminal state. A close or an error yields a reconnect delay
/// only when no reconnect is already pending, so at most one timer exists.
#[derive(Debug, Clone)]
pub struct ConnectionStateMachine {
    state: ConnectionState,
    policy: ReconnectPolicy,
    reconnect_pending: bool,
    attempts: u64,
}

impl ConnectionStateMachine {
    pub fn new(policy: ReconnectPolicy) -> Self {
        Self {
            state: ConnectionState::Disconnected,
            policy,
            reconnect_pending: false,
            attempts: 0,
        }
    }

    pub fn state(&self) -> &ConnectionState {
        &self.state
    }

    pub fn policy(&self) -> ReconnectPolicy {
        self.policy
    }

    /// Number of opens attempted so far.
    pub fn attempts(&self) -> u64 {
        self.attempts
    }

    pub fn reconnect_pending(&self) -> bool {
        self.reconnect_pending
    }

    /// Start the first connection. Returns `true` when an open should be
    /// attempted, which is only the case from `Disconnected`.
    pub fn connect(&mut self) -> bool {
        if self.state != ConnectionState::Disconnected {
            return false;
        }
        self.begin_attempt();
        true
    }

    /// The transport opened.
    pub fn opened(&mut self) {
        if self.state.is_connecting() {
            self.state = ConnectionState::Connected;
        }
    }

    /// The stream closed. Returns the delay for the one reconnect to
    /// schedule, or `None` if one is already pending.
    pub fn closed(&mut self, reason: impl Into<String>) -> Option<Duration> {
        self.lost(ConnectionState::Closed {
            reason: reason.into(),
        })
    }

    /// The transport failed, either while opening or while connected.
    /// Recovery is the same as for [`closed`](Self::closed).
    pub fn errored(&mut self, reason: impl Into<String>) -> Option<Duration> {
        self.lost(ConnectionState::Errored {
            reason: reason.into(),
        })
    }

    /// The reconnect timer fired. Returns `true` when an open should be
    /// attempted.
    pub fn reconnect_due(&mut self) -> bool {
        if !self.reconnect_pending {
            return false;
        }
        self.reconnect_pending = false;
        self.begin_attempt();
        true
    }

    fn begin_attempt(&mut self) {
        self.attempts += 1;
        self.state = ConnectionState::Connecting;
    }

    fn lost(&mut self, next: ConnectionState) -> Option<Duration> {
        if self.state == ConnectionState::Disconnected {
            return None;
        }
        self.state = next;
        if self.reconnect_pending {
            return None;
        }
        self.reconnect_pending = true;
        Some(self.policy.delay)
    }
}
