//! WebSocket connection handlers and the per-connection session machine.
//!
//! Each accepted socket runs the handshake protocol
//! `Connected → Joined → Closed`: a connection starts with no identity,
//! binds it exactly once on a well-formed `init` frame and only then
//! becomes a broadcast target. Identity lives in the session task, not in
//! shared state; once bound it is read-only for the connection's lifetime.

use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::sync::mpsc;

use crate::{
    domain::{ConnectionId, MessageBody, PusherChannel, UserId, Username, ValueError},
    infrastructure::dto::websocket::InboundFrame,
    usecase::SendMessageError,
};

use super::super::state::AppState;

/// Session handshake states.
enum SessionPhase {
    /// Transport open, no identity bound yet.
    Connected,
    /// Identity bound; the connection is a broadcast target.
    Joined(Username),
}

/// Outcome of handling one inbound frame.
enum FrameOutcome {
    /// Keep reading.
    Continue,
    /// Protocol requires the connection to be closed.
    Close,
}

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_socket(socket, state))
}

/// Spawns a task that drains the connection's outbound channel into the
/// WebSocket sink.
///
/// Fan-out writes into the channel are non-blocking, so a connection that
/// stops reading stalls only this task, never the broadcast engine.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let connection_id = ConnectionId::generate();
    let (sender, mut receiver) = socket.split();

    // The channel exists for the whole session so protocol warnings can
    // reach the client even before it has joined; the registry only learns
    // about it once `init` succeeds.
    let (tx, rx) = mpsc::unbounded_channel();

    let mut send_task = pusher_loop(rx, sender);

    let recv_state = state.clone();
    let recv_connection_id = connection_id.clone();
    let recv_tx = tx.clone();

    // One task per connection reads inbound frames and drives the session
    // state machine.
    let mut recv_task = tokio::spawn(async move {
        let mut phase = SessionPhase::Connected;

        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::error!("WebSocket error on '{}': {}", recv_connection_id, e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    let outcome = handle_frame(
                        &recv_state,
                        &recv_connection_id,
                        &recv_tx,
                        &mut phase,
                        &text,
                    )
                    .await;
                    if matches!(outcome, FrameOutcome::Close) {
                        break;
                    }
                }
                Message::Ping(_) => {
                    // Pong is handled by the protocol layer.
                    tracing::debug!("Received ping on '{}'", recv_connection_id);
                }
                Message::Close(_) => {
                    tracing::info!("Connection '{}' requested close", recv_connection_id);
                    break;
                }
                _ => {}
            }
        }
    });

    // If either side finishes, tear down the other.
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    // Closed: remove from the registry before any further fan-out can
    // reference this connection.
    state.leave_chat_usecase.execute(&connection_id).await;
}

/// Drive the session state machine with one inbound text frame.
async fn handle_frame(
    state: &Arc<AppState>,
    connection_id: &ConnectionId,
    tx: &PusherChannel,
    phase: &mut SessionPhase,
    text: &str,
) -> FrameOutcome {
    let frame = match serde_json::from_str::<InboundFrame>(text) {
        Ok(frame) => frame,
        Err(e) => {
            // Malformed input: discard, no connection impact.
            tracing::warn!("Discarding malformed frame on '{}': {}", connection_id, e);
            return FrameOutcome::Continue;
        }
    };

    match frame {
        InboundFrame::Init { user_id, username } => {
            if matches!(phase, SessionPhase::Joined(_)) {
                // Identity must not be re-bindable mid-session.
                tracing::warn!(
                    "Duplicate init on '{}'; closing connection",
                    connection_id
                );
                return FrameOutcome::Close;
            }

            let (user_id, claimed) = match parse_init(user_id, username) {
                Ok(parsed) => parsed,
                Err(e) => {
                    tracing::warn!("Rejecting init on '{}': {}", connection_id, e);
                    return FrameOutcome::Close;
                }
            };

            let display_name = state
                .join_chat_usecase
                .execute(connection_id.clone(), user_id, claimed, tx.clone())
                .await;
            *phase = SessionPhase::Joined(display_name);
            FrameOutcome::Continue
        }
        InboundFrame::Message {
            user_id, message, ..
        } => {
            let username = match phase {
                SessionPhase::Joined(username) => username.clone(),
                SessionPhase::Connected => {
                    // Protocol violation, but lenient: identity resolution
                    // can race message entry on the client side.
                    tracing::warn!(
                        "Message before init on '{}' (user id '{}'); discarding",
                        connection_id,
                        user_id
                    );
                    warn_client(tx, "message discarded: send init first");
                    return FrameOutcome::Continue;
                }
            };

            let body = match MessageBody::new(message) {
                Ok(body) => body,
                Err(ValueError::EmptyMessageBody) => {
                    tracing::warn!("Empty message on '{}'; discarding", connection_id);
                    warn_client(tx, "empty message discarded");
                    return FrameOutcome::Continue;
                }
                Err(e) => {
                    tracing::warn!("Invalid message on '{}': {}; discarding", connection_id, e);
                    warn_client(tx, "message discarded: body too long");
                    return FrameOutcome::Continue;
                }
            };

            match state.send_message_usecase.execute(username, body).await {
                Ok(_) => {}
                Err(SendMessageError::Persistence(e)) => {
                    // Fatal to this request only: nothing was broadcast.
                    tracing::error!(
                        "Failed to persist message from '{}': {}",
                        connection_id,
                        e
                    );
                    warn_client(tx, "message not delivered: history unavailable");
                }
            }
            FrameOutcome::Continue
        }
    }
}

fn parse_init(user_id: String, username: String) -> Result<(UserId, Username), ValueError> {
    Ok((UserId::new(user_id)?, Username::new(username)?))
}

/// Push a warning line to this client only, in the outbound wire shape.
fn warn_client(tx: &PusherChannel, warning: &str) {
    let _ = tx.send(format!("server: {}", warning));
}
