//! Leaderboard viewer - live competition scores over WebSocket
//!
//! This crate keeps a per-competition view of the latest leaderboard
//! snapshots, works out which scores just changed, and keeps the stream
//! connected across network failures.

pub mod config;
pub mod diff;
pub mod render;
pub mod stores;
pub mod sync;
pub mod ws;

pub use config::ViewerConfig;
pub use diff::{diff, ChangeSet};
pub use render::{Changed, RenderSink, TerminalSink};
pub use stores::CompetitionStore;
pub use sync::Synchronizer;
pub use ws::{ConnectionManager, ConnectionState, ReconnectPolicy};
