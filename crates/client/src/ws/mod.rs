//! WebSocket module for the live leaderboard stream.
//!
//! This module provides:
//! - An explicit connection state machine with a fixed-delay retry policy
//! - A transport seam (`tokio-tungstenite` in production, scripted in tests)
//! - The connection manager that pumps frames into the synchronizer
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │                 ConnectionManager                   │
//! │   (state machine + reconnect timer, runs forever)   │
//! └─────────────────────────────────────────────────────┘
//!            │ connect(url)              │ text frames
//!            ▼                           ▼
//!   ┌─────────────────┐      ┌───────────────────────┐
//!   │    Transport    │      │     Synchronizer      │
//!   │ (WebSocket I/O) │      │ decode → store → diff │
//!   └─────────────────┘      └───────────────────────┘
//!                                        │
//!                                        ▼
//!                            ┌───────────────────────┐
//!                            │      RenderSink       │
//!                            └───────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use leaderboard_viewer::render::TerminalSink;
//! use leaderboard_viewer::sync::Synchronizer;
//! use leaderboard_viewer::ws::{ConnectionManager, ReconnectPolicy, TungsteniteTransport};
//!
//! # async fn demo() {
//! let sync = Synchronizer::new(TerminalSink::new(std::io::stdout()));
//! let mut manager = ConnectionManager::new(
//!     "ws://localhost:8080/ws",
//!     TungsteniteTransport,
//!     ReconnectPolicy::default(),
//!     sync,
//! );
//! manager.run().await;
//! # }
//! ```

mod connection;
mod manager;
mod transport;

pub use connection::{ConnectionState, ConnectionStateMachine, ReconnectPolicy};
pub use manager::ConnectionManager;
pub use transport::{Frame, FrameStream, Transport, TransportError, TungsteniteTransport};
