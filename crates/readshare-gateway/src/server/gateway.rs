//! Structured WebSocket handler
//!
//! One long-lived socket per client on `/ws/gateway`. The client identifies
//! with a member id, subscribes to topics, and heartbeats; the server pushes
//! topic payloads through the session's outbound channel. Socket close
//! drives the presence disconnect transition.

use crate::protocol::{ClientMessage, ServerMessage};
use crate::server::GatewayState;
use axum::{
    extract::{ws::Message, State, WebSocketUpgrade},
    response::IntoResponse,
};
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;

/// WebSocket upgrade handler for the structured transport
pub async fn gateway_handler(
    State(state): State<GatewayState>,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_socket(state, socket))
}

/// Handle an upgraded structured socket
async fn handle_socket(state: GatewayState, socket: axum::extract::ws::WebSocket) {
    let session_id = uuid::Uuid::new_v4().to_string();
    let buffer = state.config().presence.channel_buffer;

    // Outbound channel: broker and handlers write, the send task drains
    let (tx, mut rx) = mpsc::channel::<ServerMessage>(buffer);
    state.broker().register_session(&session_id, tx.clone());

    tracing::info!(session_id = %session_id, "Gateway connection established");

    let (mut ws_sink, mut ws_stream) = socket.split();

    // Tell the client its session id immediately
    let ready = ServerMessage::Ready {
        session_id: session_id.clone(),
    };
    if let Ok(json) = ready.to_json() {
        if ws_sink.send(Message::Text(json.into())).await.is_err() {
            tracing::warn!(session_id = %session_id, "Failed to send ready message");
            cleanup(&state, &session_id).await;
            return;
        }
    }

    let state_recv = state.clone();
    let session_id_recv = session_id.clone();

    // Receive loop: parse client frames and drive the coordinator
    let recv_task = tokio::spawn(async move {
        while let Some(frame) = ws_stream.next().await {
            match frame {
                Ok(Message::Text(text)) => {
                    handle_client_message(&state_recv, &session_id_recv, &tx, &text).await;
                }
                Ok(Message::Ping(_) | Message::Pong(_)) => {
                    tracing::trace!(session_id = %session_id_recv, "Ping/pong");
                }
                Ok(Message::Binary(_)) => {
                    tracing::debug!(session_id = %session_id_recv, "Binary frames not supported");
                }
                Ok(Message::Close(_)) => {
                    tracing::info!(session_id = %session_id_recv, "Client closed connection");
                    break;
                }
                Err(e) => {
                    tracing::warn!(session_id = %session_id_recv, error = %e, "WebSocket error");
                    break;
                }
            }
        }
    });

    let session_id_send = session_id.clone();

    // Send loop: drain the outbound channel into the socket
    let send_task = tokio::spawn(async move {
        while let Some(message) = rx.recv().await {
            if let Ok(json) = message.to_json() {
                if ws_sink.send(Message::Text(json.into())).await.is_err() {
                    tracing::warn!(session_id = %session_id_send, "Failed to send to WebSocket");
                    break;
                }
            }
        }

        let _ = ws_sink.close().await;
    });

    tokio::select! {
        _ = recv_task => {
            tracing::debug!(session_id = %session_id, "Receive task ended");
        }
        _ = send_task => {
            tracing::debug!(session_id = %session_id, "Send task ended");
        }
    }

    cleanup(&state, &session_id).await;
}

/// Parse and act on one client frame
async fn handle_client_message(
    state: &GatewayState,
    session_id: &str,
    tx: &mpsc::Sender<ServerMessage>,
    text: &str,
) {
    let message = match ClientMessage::from_json(text) {
        Ok(message) => message,
        Err(e) => {
            tracing::debug!(session_id = %session_id, error = %e, "Unparseable client frame");
            return;
        }
    };

    match message {
        ClientMessage::Identify { member_id } => {
            state.coordinator().on_connect(session_id, member_id).await;
        }
        ClientMessage::Subscribe { topic } => {
            state.broker().subscribe(session_id, &topic);
            // Subscribing counts as activity
            state.coordinator().on_heartbeat(session_id).await;
        }
        ClientMessage::Unsubscribe { topic } => {
            state.broker().unsubscribe(session_id, &topic);
        }
        ClientMessage::Heartbeat => {
            state.coordinator().on_heartbeat(session_id).await;
            if tx.try_send(ServerMessage::HeartbeatAck).is_err() {
                tracing::debug!(session_id = %session_id, "Heartbeat ack dropped");
            }
        }
    }
}

/// Tear down a session on socket close
async fn cleanup(state: &GatewayState, session_id: &str) {
    tracing::info!(session_id = %session_id, "Cleaning up gateway session");
    state.broker().unregister_session(session_id);
    state.coordinator().on_disconnect(session_id).await;
}
