//! GraphQL subscription channel over websocket (graphql-transport-ws).
//!
//! ARCHITECTURE
//! ============
//! One websocket connection per subscription. Connect carries the bearer
//! credential as a connection parameter, read from the credential store at
//! connect time — the same binding rule as the HTTP transport. After the
//! server acks, a single `subscribe` is issued and a pump task forwards
//! `next` payloads into an mpsc stream until `complete`/`error`/close.
//!
//! LIFECYCLE
//! =========
//! The returned [`Subscription`] is an explicit cancellable resource:
//! `recv()` yields events, `close()` tears down gracefully (client
//! `complete` + websocket close), and dropping the handle aborts the pump
//! task so navigation away can never leak a live channel.

#[cfg(test)]
#[path = "subscription_test.rs"]
mod tests;

use futures::{SinkExt, StreamExt};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::net::TcpStream;
use tokio::sync::{mpsc, oneshot};
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::http::HeaderValue;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};
use uuid::Uuid;

use crate::auth::store::CredentialStore;
use crate::net::ApiError;

/// Subprotocol negotiated with the subscription endpoint.
pub const WS_SUBPROTOCOL: &str = "graphql-transport-ws";

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

// =============================================================================
// PROTOCOL MESSAGES
// =============================================================================

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub(crate) enum ClientMessage<'a> {
    ConnectionInit { payload: serde_json::Value },
    Subscribe { id: &'a str, payload: SubscribePayload<'a> },
    Complete { id: &'a str },
    Pong,
}

#[derive(Debug, Serialize)]
pub(crate) struct SubscribePayload<'a> {
    pub query: &'a str,
    pub variables: serde_json::Value,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub(crate) enum ServerMessage {
    ConnectionAck,
    Next {
        id: String,
        payload: NextPayload,
    },
    Error {
        #[serde(default)]
        id: String,
        #[serde(default)]
        payload: serde_json::Value,
    },
    Complete {
        #[serde(default)]
        id: String,
    },
    Ping,
    Pong,
    /// Forward-compatible: unknown message types are ignored.
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Deserialize)]
pub(crate) struct NextPayload {
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

fn encode(message: &ClientMessage<'_>) -> String {
    // Protocol messages contain nothing unserializable.
    serde_json::to_string(message).unwrap_or_default()
}

fn parse(text: &str) -> Option<ServerMessage> {
    match serde_json::from_str(text) {
        Ok(message) => Some(message),
        Err(e) => {
            tracing::debug!(error = %e, "unparseable subscription message dropped");
            None
        }
    }
}

/// Connection parameters for `connection_init` — the bearer credential from
/// the store, or an empty object when absent/unreadable.
pub(crate) fn connection_params(store: &CredentialStore) -> serde_json::Value {
    match store.read().and_then(|record| record.token) {
        Some(token) => json!({ "Authorization": format!("Bearer {token}") }),
        None => json!({}),
    }
}

// =============================================================================
// CLIENT
// =============================================================================

/// Opens subscription channels against the configured endpoint.
pub struct SubscriptionClient {
    ws_url: String,
    store: CredentialStore,
}

impl SubscriptionClient {
    #[must_use]
    pub fn new(ws_url: impl Into<String>, store: CredentialStore) -> Self {
        Self { ws_url: ws_url.into(), store }
    }

    /// Open one subscription: connect, init with credentials, await ack,
    /// subscribe, and hand back the event stream.
    ///
    /// # Errors
    ///
    /// `Transport` when the socket cannot be established, `Server` when the
    /// endpoint rejects the handshake.
    pub async fn subscribe(
        &self,
        query: &str,
        variables: serde_json::Value,
    ) -> Result<Subscription, ApiError> {
        let mut request = self
            .ws_url
            .as_str()
            .into_client_request()
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        request
            .headers_mut()
            .insert("Sec-WebSocket-Protocol", HeaderValue::from_static(WS_SUBPROTOCOL));

        let (mut socket, _response) = connect_async(request)
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let init = ClientMessage::ConnectionInit { payload: connection_params(&self.store) };
        socket
            .send(Message::text(encode(&init)))
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        wait_for_ack(&mut socket).await?;

        let id = Uuid::new_v4().to_string();
        let subscribe = ClientMessage::Subscribe {
            id: &id,
            payload: SubscribePayload { query, variables },
        };
        socket
            .send(Message::text(encode(&subscribe)))
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let (event_tx, event_rx) = mpsc::channel(64);
        let (close_tx, close_rx) = oneshot::channel();
        let task = tokio::spawn(pump(socket, id.clone(), event_tx, close_rx));

        Ok(Subscription { id, events: event_rx, close: Some(close_tx), task })
    }
}

async fn wait_for_ack(socket: &mut WsStream) -> Result<(), ApiError> {
    loop {
        let message = socket
            .next()
            .await
            .ok_or_else(|| ApiError::Transport("connection closed during handshake".to_owned()))?
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let Message::Text(text) = message else { continue };
        match parse(text.as_str()) {
            Some(ServerMessage::ConnectionAck) => return Ok(()),
            Some(ServerMessage::Ping) => {
                socket
                    .send(Message::text(encode(&ClientMessage::Pong)))
                    .await
                    .map_err(|e| ApiError::Transport(e.to_string()))?;
            }
            Some(ServerMessage::Error { payload, .. }) => {
                return Err(ApiError::Server(payload.to_string()));
            }
            _ => {}
        }
    }
}

/// Forward `next` payloads to the subscriber until the stream ends or the
/// handle asks for teardown.
async fn pump(
    mut socket: WsStream,
    id: String,
    events: mpsc::Sender<serde_json::Value>,
    mut close: oneshot::Receiver<()>,
) {
    loop {
        tokio::select! {
            message = socket.next() => {
                let Some(Ok(message)) = message else { break };
                let Message::Text(text) = message else { continue };
                match parse(text.as_str()) {
                    Some(ServerMessage::Next { id: message_id, payload }) => {
                        // Single subscription per connection; drop strays.
                        if message_id != id {
                            continue;
                        }
                        if let Some(data) = payload.data {
                            // Receiver gone means the handle was dropped.
                            if events.send(data).await.is_err() {
                                break;
                            }
                        }
                    }
                    Some(ServerMessage::Ping) => {
                        if socket.send(Message::text(encode(&ClientMessage::Pong))).await.is_err() {
                            break;
                        }
                    }
                    Some(ServerMessage::Error { id: message_id, payload }) => {
                        tracing::warn!(id = %message_id, error = %payload, "subscription errored");
                        break;
                    }
                    Some(ServerMessage::Complete { id: message_id }) => {
                        if message_id == id {
                            break;
                        }
                    }
                    _ => {}
                }
            }
            _ = &mut close => {
                let complete = ClientMessage::Complete { id: &id };
                let _ = socket.send(Message::text(encode(&complete))).await;
                let _ = socket.close(None).await;
                break;
            }
        }
    }
}

// =============================================================================
// HANDLE
// =============================================================================

/// A live subscription channel.
///
/// Scoped resource: close it when leaving the view that opened it. Dropping
/// the handle aborts the pump task outright.
pub struct Subscription {
    id: String,
    events: mpsc::Receiver<serde_json::Value>,
    close: Option<oneshot::Sender<()>>,
    task: tokio::task::JoinHandle<()>,
}

impl Subscription {
    /// Protocol id of this subscription on its connection.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Next event payload. `None` once the channel has ended.
    pub async fn recv(&mut self) -> Option<serde_json::Value> {
        self.events.recv().await
    }

    /// Graceful teardown: sends `complete`, closes the socket, and waits for
    /// the pump task to finish.
    pub async fn close(mut self) {
        if let Some(close) = self.close.take() {
            let _ = close.send(());
        }
        let _ = (&mut self.task).await;
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(close) = self.close.take() {
            let _ = close.send(());
        }
        self.task.abort();
    }
}
