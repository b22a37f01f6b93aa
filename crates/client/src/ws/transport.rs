//! Transport seam for the receive-only leaderboard stream.

use async_trait::async_trait;
use futures_util::stream::BoxStream;
use futures_util::StreamExt;
use thiserror::Error;
use tokio_tungstenite::{connect_async, tungstenite::Message};

/// An inbound frame the manager cares about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    Text(String),
    /// Close frame from the peer, with its reason if one was given.
    Close(Option<String>),
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
    #[error("failed to connect: {0}")]
    Connect(String),
    #[error("failed to receive: {0}")]
    Receive(String),
}

pub type FrameStream = BoxStream<'static, Result<Frame, TransportError>>;

/// Opens connections to the stream endpoint.
///
/// The returned stream ends (or yields `Frame::Close` / an error) when the
/// connection is lost.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn connect(&self, url: &str) -> Result<FrameStream, TransportError>;
}

/// WebSocket transport backed by `tokio-tungstenite`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TungsteniteTransport;

#[async_trait]
impl Transport for TungsteniteTransport {
    async fn connect(&self, url: &str) -> Result<FrameStream, TransportError> {
        let (ws_stream, _response) = connect_async(url)
            .await
            .map_err(|e| TransportError::Connect(e.to_string()))?;

        let frames = ws_stream.filter_map(|msg| async move {
            match msg {
                Ok(Message::Text(text)) => Some(Ok(Frame::Text(text.as_str().to_owned()))),
                Ok(Message::Close(frame)) => Some(Ok(Frame::Close(
                    frame.map(|f| f.reason.as_str().to_owned()),
                ))),
                Ok(Message::Ping(data)) => {
                    // Pong is handled automatically by tungstenite
                    tracing::trace!(len = data.len(), "received ping");
                    None
                }
                // Binary, pong and raw frames carry no snapshots.
                Ok(_) => None,
                Err(e) => Some(Err(TransportError::Receive(e.to_string()))),
            }
        });

        Ok(frames.boxed())
    }
}
