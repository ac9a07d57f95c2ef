//! Raw per-room notification channels
//!
//! Lightweight sockets on `/ws/notifications/:room_id` that only receive
//! broadcasts for one room. No handshake and no session identity; any client
//! that connects with a well-formed room id gets the room's traffic. These
//! connections do not participate in presence.

use crate::server::GatewayState;
use axum::{
    extract::{ws::Message, Path, State, WebSocketUpgrade},
    http::StatusCode,
    response::IntoResponse,
};
use futures_util::{SinkExt, StreamExt};
use readshare_core::RoomId;
use readshare_realtime::RoomConnection;
use tokio::sync::mpsc;

/// WebSocket upgrade handler for a room's notification channel
pub async fn notifications_handler(
    State(state): State<GatewayState>,
    Path(room_id): Path<String>,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    let Ok(room_id) = RoomId::parse(&room_id) else {
        tracing::debug!(room_id = %room_id, "Rejected notification channel with malformed room id");
        return StatusCode::BAD_REQUEST.into_response();
    };

    ws.on_upgrade(move |socket| handle_socket(state, room_id, socket)).into_response()
}

/// Handle an upgraded raw notification socket
async fn handle_socket(state: GatewayState, room_id: RoomId, socket: axum::extract::ws::WebSocket) {
    let buffer = state.config().presence.channel_buffer;
    let (tx, mut rx) = mpsc::channel::<String>(buffer);

    let connection = RoomConnection::new(tx);
    let connection_id = connection.id().to_string();
    state.channels().join(room_id, connection);

    tracing::info!(
        room_id = %room_id,
        connection_id = %connection_id,
        "Notification channel opened"
    );

    let (mut ws_sink, mut ws_stream) = socket.split();

    // Forward broadcasts until the channel or socket closes
    let send_task = tokio::spawn(async move {
        while let Some(payload) = rx.recv().await {
            if ws_sink.send(Message::Text(payload)).await.is_err() {
                break;
            }
        }

        let _ = ws_sink.close().await;
    });

    // Inbound frames are drained and ignored; the channel is one-way
    let recv_task = tokio::spawn(async move {
        while let Some(frame) = ws_stream.next().await {
            match frame {
                Ok(Message::Close(_)) | Err(_) => break,
                Ok(_) => {}
            }
        }
    });

    tokio::select! {
        _ = send_task => {}
        _ = recv_task => {}
    }

    state.channels().leave(room_id, &connection_id);

    tracing::info!(
        room_id = %room_id,
        connection_id = %connection_id,
        "Notification channel closed"
    );
}
