//! WebSocket handler: one session per connection.
//!
//! The `/ws` endpoint upgrades an HTTP connection to a WebSocket. Once
//! connected, the handler:
//!
//! - Opens a session through the dispatcher (which registers the outbound
//!   channel and eagerly creates the session's context).
//! - Spawns a writer task draining the session's outbound queue into the
//!   socket.
//! - Reads inbound text frames in a strictly sequential loop -- one frame is
//!   fully dispatched before the next is read, so a connection never
//!   pipelines against itself. A slow tool call only stalls its own
//!   connection; other connections run on their own tasks.
//!
//! Disconnecting releases the connection entry but **not** the session's
//! context: history survives until explicitly cleared.

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::IntoResponse;
use futures_util::{SinkExt, StreamExt};

use crate::state::AppState;

/// Upgrade an HTTP request to a WebSocket connection.
///
/// This is mounted at `/ws` in the router.
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_ws_connection(socket, state))
}

/// Core WebSocket connection handler.
async fn handle_ws_connection(socket: WebSocket, state: AppState) {
    let (mut ws_sender, mut ws_receiver) = socket.split();

    // The dispatcher writes serialized frames into this queue; the writer
    // task is the only place that touches the socket's send half.
    let (outbound_tx, mut outbound_rx) = tokio::sync::mpsc::unbounded_channel::<String>();
    let session_id = state.dispatcher.open_session(outbound_tx);
    tracing::info!(%session_id, "WebSocket client connected");

    let writer = tokio::spawn(async move {
        while let Some(text) = outbound_rx.recv().await {
            if ws_sender.send(Message::Text(text.into())).await.is_err() {
                // Client disconnected
                break;
            }
        }
    });

    // Strictly request/response: consume one frame, dispatch it to
    // completion, then read the next.
    while let Some(msg_result) = ws_receiver.next().await {
        match msg_result {
            Ok(Message::Text(text)) => {
                state.dispatcher.dispatch(session_id, &text).await;
            }
            Ok(Message::Close(_)) => break,
            Err(err) => {
                tracing::debug!(%session_id, error = %err, "WebSocket receive error");
                break;
            }
            // Ignore binary, ping, pong protocol frames (handled by axum/tungstenite)
            Ok(_) => {}
        }
    }

    state.dispatcher.close_session(session_id);
    writer.abort();
    tracing::info!(%session_id, "WebSocket client disconnected");
}
