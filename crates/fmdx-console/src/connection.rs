/// Control-channel session over a websocket.
///
/// ```text
///   Session::open()
///         │
///         └── transport_task  ← outbound commands via mpsc → socket
///                             → text frames / lifecycle     → events channel
/// ```
///
/// The session only moves bytes.  Frames are decoded by the event loop, which
/// handles them one at a time in arrival order.  One session owns one socket
/// for its whole life; there is no reconnect, a caller wanting one builds a
/// new `Session`.
use std::fmt;

use futures_util::{SinkExt, StreamExt};
use thiserror::Error;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tokio_tungstenite::tungstenite::Message;
use tracing::{debug, info, warn};

const OUTBOUND_CAPACITY: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Connecting,
    Open,
    Closed,
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ConnectionState::Connecting => "connecting",
            ConnectionState::Open => "open",
            ConnectionState::Closed => "closed",
        };
        f.write_str(s)
    }
}

/// Everything the transport task reports back.
#[derive(Debug, Clone, PartialEq)]
pub enum ConnectionEvent {
    Opened,
    Frame(String),
    /// Sent exactly once, whatever ended the session.
    Closed { reason: String },
}

#[derive(Debug, Error, PartialEq)]
pub enum SendError {
    #[error("connection is {0}")]
    NotOpen(ConnectionState),
    #[error("outbound queue full")]
    Backpressure,
}

pub struct Session {
    url: String,
    state: ConnectionState,
    outbound: mpsc::Sender<String>,
    task: tokio::task::JoinHandle<()>,
}

impl Session {
    /// Start connecting to `url`.  Lifecycle events arrive on `events`; feed
    /// each one back through [`Session::apply`] before acting on it.
    pub fn open(url: impl Into<String>, events: mpsc::Sender<ConnectionEvent>) -> Self {
        let url = url.into();
        let (outbound, outbound_rx) = mpsc::channel(OUTBOUND_CAPACITY);
        info!("connection: opening {}", url);
        let task = tokio::spawn(transport_task(url.clone(), outbound_rx, events));
        Self {
            url,
            state: ConnectionState::Connecting,
            outbound,
            task,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    /// Advance the lifecycle for an event coming from this session's transport.
    /// Connecting → Open → Closed, never backwards.
    pub fn apply(&mut self, event: &ConnectionEvent) {
        let next = match (self.state, event) {
            (ConnectionState::Connecting, ConnectionEvent::Opened) => ConnectionState::Open,
            (_, ConnectionEvent::Closed { .. }) => ConnectionState::Closed,
            (state, ConnectionEvent::Frame(_)) => state,
            (state, ConnectionEvent::Opened) => {
                warn!("connection: ignoring open event while {}", state);
                state
            }
        };
        if next != self.state {
            info!("connection: {} → {}", self.state, next);
            self.state = next;
        }
    }

    /// Queue a raw command for the device.  Never blocks and never queues while
    /// the session is not open: the caller reports the returned error.
    pub fn send(&self, command: &str) -> Result<(), SendError> {
        if self.state != ConnectionState::Open {
            return Err(SendError::NotOpen(self.state));
        }
        match self.outbound.try_send(command.to_string()) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(_)) => Err(SendError::Backpressure),
            Err(TrySendError::Closed(_)) => Err(SendError::NotOpen(ConnectionState::Closed)),
        }
    }

    /// Drop the socket.  No further events are delivered.
    pub fn close(&mut self) {
        self.task.abort();
        self.state = ConnectionState::Closed;
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.task.abort();
    }
}

// ── transport task ────────────────────────────────────────────────────────────

async fn transport_task(
    url: String,
    mut outbound: mpsc::Receiver<String>,
    events: mpsc::Sender<ConnectionEvent>,
) {
    let ws = match tokio_tungstenite::connect_async(url.as_str()).await {
        Ok((ws, _)) => ws,
        Err(e) => {
            warn!("connection: connect to {} failed: {}", url, e);
            let _ = events
                .send(ConnectionEvent::Closed {
                    reason: e.to_string(),
                })
                .await;
            return;
        }
    };
    if events.send(ConnectionEvent::Opened).await.is_err() {
        return;
    }

    let (mut sink, mut stream) = ws.split();
    let reason = loop {
        tokio::select! {
            msg = stream.next() => match msg {
                Some(Ok(Message::Text(text))) => {
                    if events.send(ConnectionEvent::Frame(text)).await.is_err() {
                        break "event loop gone".to_string();
                    }
                }
                Some(Ok(Message::Ping(payload))) => {
                    debug!("connection: ping");
                    if let Err(e) = sink.send(Message::Pong(payload)).await {
                        break e.to_string();
                    }
                }
                Some(Ok(Message::Close(frame))) => {
                    break match frame {
                        Some(f) if !f.reason.is_empty() => {
                            format!("closed by server: {}", f.reason)
                        }
                        _ => "closed by server".to_string(),
                    };
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => break e.to_string(),
                None => break "stream ended".to_string(),
            },
            cmd = outbound.recv() => match cmd {
                Some(text) => {
                    debug!("connection: → {}", text);
                    if let Err(e) = sink.send(Message::Text(text)).await {
                        break e.to_string();
                    }
                }
                None => {
                    let _ = sink.close().await;
                    break "session dropped".to_string();
                }
            },
        }
    };

    info!("connection: closed ({})", reason);
    let _ = events.send(ConnectionEvent::Closed { reason }).await;
}
