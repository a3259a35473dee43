//! Order Feed WebSocket Client
//!
//! Connects once to the relay's feed and forwards decoded orders as
//! [`FeedEvent`]s. There is no reconnect: when the socket closes or fails the
//! client reports it and stops, leaving the viewer up until the operator
//! interrupts the process.
//!
//! # Protocol
//!
//! Each text (or UTF-8 binary) frame carries one or more concatenated order
//! objects. Pings are answered; everything else is ignored.

use std::time::Duration;

use futures_util::{SinkExt, Stream, StreamExt};
use relay_core::{JwtError, Order, decode_orders};
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::Message;
use tokio_util::sync::CancellationToken;
use url::Url;

/// Upper bound on waiting for the peer's half of the close handshake.
const CLOSE_HANDSHAKE_TIMEOUT: Duration = Duration::from_secs(2);

// =============================================================================
// Error Type
// =============================================================================

/// Errors that can occur in the feed client.
#[derive(Debug, thiserror::Error)]
pub enum FeedClientError {
    /// Feed URL is not valid.
    #[error("invalid feed URL {url}: {reason}")]
    InvalidUrl {
        /// URL as configured.
        url: String,
        /// Parser message.
        reason: String,
    },

    /// Feed token could not be signed.
    #[error("token signing failed: {0}")]
    Token(#[from] JwtError),

    /// WebSocket error.
    #[error("{0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),

    /// Event receiver was dropped.
    #[error("channel send error")]
    ChannelSend,
}

// =============================================================================
// Feed Events
// =============================================================================

/// Events emitted by the feed client.
#[derive(Debug, Clone, PartialEq)]
pub enum FeedEvent {
    /// WebSocket handshake completed.
    Connected,
    /// Orders decoded from one frame.
    Orders(Vec<Order>),
    /// A frame could not be decoded.
    ParseError(String),
    /// Connection failed or broke.
    Error(String),
    /// Connection is finished; no further events follow.
    Closed,
}

// =============================================================================
// Feed Client
// =============================================================================

/// Single-attempt feed client.
pub struct FeedClient {
    url: Url,
    event_tx: mpsc::Sender<FeedEvent>,
    cancel: CancellationToken,
}

impl FeedClient {
    /// Create a new feed client.
    #[must_use]
    pub const fn new(url: Url, event_tx: mpsc::Sender<FeedEvent>, cancel: CancellationToken) -> Self {
        Self {
            url,
            event_tx,
            cancel,
        }
    }

    /// Connect and stream until the server closes, the socket fails, or the
    /// token is cancelled.
    ///
    /// Always finishes by emitting [`FeedEvent::Closed`]; a failure is
    /// emitted as [`FeedEvent::Error`] first and also returned.
    pub async fn run(self) -> Result<(), FeedClientError> {
        let result = self.connect_and_run().await;

        if let Err(e) = &result {
            tracing::warn!(error = %e, "Feed connection error");
            let _ = self.event_tx.send(FeedEvent::Error(e.to_string())).await;
        }
        let _ = self.event_tx.send(FeedEvent::Closed).await;

        result
    }

    /// Connect to WebSocket and run until close, error or cancellation.
    async fn connect_and_run(&self) -> Result<(), FeedClientError> {
        tracing::info!(
            host = self.url.host_str().unwrap_or_default(),
            path = self.url.path(),
            "Connecting to order feed"
        );

        let (ws_stream, _response) = tokio::select! {
            biased;
            () = self.cancel.cancelled() => {
                tracing::info!("Feed client cancelled before connecting");
                return Ok(());
            }
            connected = tokio_tungstenite::connect_async(self.url.as_str()) => connected?,
        };
        let (mut write, mut read) = ws_stream.split();

        self.emit(FeedEvent::Connected).await?;
        tracing::info!("Connected to order feed");

        loop {
            tokio::select! {
                () = self.cancel.cancelled() => {
                    match write.send(Message::Close(None)).await {
                        Ok(()) => finish_close(&mut read).await,
                        Err(e) => tracing::debug!(error = %e, "Close frame not sent"),
                    }
                    tracing::info!("Feed client cancelled");
                    return Ok(());
                }
                msg = read.next() => {
                    match msg {
                        Some(Ok(Message::Text(text))) => {
                            self.handle_frame(text.as_str()).await?;
                        }
                        Some(Ok(Message::Binary(data))) => {
                            if let Ok(text) = std::str::from_utf8(&data) {
                                self.handle_frame(text).await?;
                            } else {
                                tracing::warn!(len = data.len(), "Received non-UTF8 binary message");
                                self.emit(FeedEvent::ParseError("non-UTF8 binary frame".to_string()))
                                    .await?;
                            }
                        }
                        Some(Ok(Message::Ping(data))) => {
                            write.send(Message::Pong(data)).await?;
                        }
                        Some(Ok(Message::Close(frame))) => {
                            tracing::info!(?frame, "Server sent close frame");
                            finish_close(&mut read).await;
                            return Ok(());
                        }
                        Some(Ok(_)) => {}
                        Some(Err(e)) => return Err(e.into()),
                        None => {
                            tracing::info!("WebSocket stream ended");
                            return Ok(());
                        }
                    }
                }
            }
        }
    }

    async fn handle_frame(&self, text: &str) -> Result<(), FeedClientError> {
        match decode_orders(text) {
            Ok(orders) if orders.is_empty() => {
                tracing::trace!("Ignoring empty frame");
                Ok(())
            }
            Ok(orders) => {
                tracing::debug!(count = orders.len(), "Orders received");
                self.emit(FeedEvent::Orders(orders)).await
            }
            Err(e) => {
                tracing::warn!(error = %e, len = text.len(), "Failed to decode order frame");
                self.emit(FeedEvent::ParseError(e.to_string())).await
            }
        }
    }

    async fn emit(&self, event: FeedEvent) -> Result<(), FeedClientError> {
        self.event_tx
            .send(event)
            .await
            .map_err(|_| FeedClientError::ChannelSend)
    }
}

/// Keep reading until the socket reports closed.
///
/// tungstenite queues the Close reply and only flushes it on a later read,
/// so the handshake is incomplete until the stream ends.
async fn finish_close<S>(read: &mut S)
where
    S: Stream<Item = Result<Message, tokio_tungstenite::tungstenite::Error>> + Unpin,
{
    let drained = tokio::time::timeout(CLOSE_HANDSHAKE_TIMEOUT, async {
        while let Some(Ok(_)) = read.next().await {}
    })
    .await;

    if drained.is_err() {
        tracing::debug!("Close handshake timed out");
    }
}
