//! WebSocket handler
//!
//! Accepts connections, authenticates the handshake token, and relays
//! client events to their recipients.

use crate::connection::{Connection, ConnectionState};
use crate::protocol::ClientEvent;
use crate::server::GatewayState;
use axum::{
    extract::{
        ws::{close_code, CloseFrame, Message, WebSocket},
        Query, State, WebSocketUpgrade,
    },
    response::IntoResponse,
};
use futures_util::{SinkExt, StreamExt};
use hub_core::Snowflake;
use hub_service::PresenceService;
use serde::Deserialize;
use tokio::sync::mpsc;

/// Channel buffer size for outgoing events
const EVENT_BUFFER_SIZE: usize = 100;

/// Handshake query parameters
#[derive(Debug, Deserialize)]
pub struct ConnectQuery {
    #[serde(default)]
    pub token: Option<String>,
}

/// WebSocket gateway handler
///
/// The token travels in the handshake query string; it is validated after
/// the upgrade so failures produce a proper close frame.
pub async fn gateway_handler(
    State(state): State<GatewayState>,
    Query(query): Query<ConnectQuery>,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| handle_socket(state, socket, query.token))
}

/// Handle an upgraded WebSocket connection
async fn handle_socket(state: GatewayState, mut socket: WebSocket, token: Option<String>) {
    let session_id = Connection::generate_id();

    // Authenticate before anything else
    let Some(user_id) = authenticate(&state, token.as_deref()).await else {
        tracing::info!(session_id = %session_id, "Closing unauthenticated connection");
        let _ = socket
            .send(Message::Close(Some(CloseFrame {
                code: close_code::POLICY,
                reason: "Authentication failed".into(),
            })))
            .await;
        return;
    };

    // Create event channel for outgoing frames
    let (tx, mut rx) = mpsc::channel(EVENT_BUFFER_SIZE);

    // Register connection
    state
        .connection_manager()
        .add_connection(session_id.clone(), tx);
    state
        .connection_manager()
        .authenticate_connection(&session_id, user_id)
        .await;

    tracing::info!(
        session_id = %session_id,
        user_id = %user_id,
        "WebSocket connection established"
    );

    // Mark the user online
    if let Err(e) = PresenceService::new(state.service_context())
        .set_online(user_id)
        .await
    {
        tracing::warn!(user_id = %user_id, error = %e, "Failed to mark user online");
    }

    // Split the WebSocket
    let (mut ws_sink, mut ws_stream) = socket.split();

    let state_recv = state.clone();
    let session_id_recv = session_id.clone();

    // Task to receive frames from the socket
    let recv_task = tokio::spawn(async move {
        while let Some(msg) = ws_stream.next().await {
            match msg {
                Ok(Message::Text(text)) => {
                    handle_text_frame(&state_recv, &session_id_recv, user_id, &text).await;
                }
                Ok(Message::Binary(_)) => {
                    tracing::debug!(
                        session_id = %session_id_recv,
                        "Binary frames not supported"
                    );
                }
                Ok(Message::Ping(_) | Message::Pong(_)) => {
                    // Pong is handled automatically by axum
                }
                Ok(Message::Close(_)) => {
                    tracing::info!(session_id = %session_id_recv, "Client closed connection");
                    return;
                }
                Err(e) => {
                    tracing::warn!(
                        session_id = %session_id_recv,
                        error = %e,
                        "WebSocket error"
                    );
                    return;
                }
            }
        }
    });

    let session_id_send = session_id.clone();

    // Task to push relayed events out to the socket
    let send_task = tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            if let Ok(json) = event.to_json() {
                if ws_sink.send(Message::Text(json.into())).await.is_err() {
                    tracing::warn!(
                        session_id = %session_id_send,
                        "Failed to send event to WebSocket"
                    );
                    break;
                }
            }
        }

        // Close the WebSocket when the channel is closed
        let _ = ws_sink.close().await;
    });

    // Either task ending means the connection is done
    tokio::select! {
        _ = recv_task => {
            tracing::debug!(session_id = %session_id, "Receive task ended");
        }
        _ = send_task => {
            tracing::debug!(session_id = %session_id, "Send task ended");
        }
    }

    cleanup_connection(&state, &session_id, user_id).await;
}

/// Validate the handshake token and resolve the user
///
/// A token whose user row has since been deleted fails the handshake the
/// same way an expired token does.
async fn authenticate(state: &GatewayState, token: Option<&str>) -> Option<Snowflake> {
    let token = token?;

    let claims = state
        .service_context()
        .jwt_service()
        .validate_token(token)
        .map_err(|e| {
            tracing::debug!(error = %e, "Invalid handshake token");
        })
        .ok()?;

    let user_id = claims
        .user_id()
        .map_err(|e| {
            tracing::debug!(error = %e, "Invalid user ID in token");
        })
        .ok()?;

    let user = state
        .service_context()
        .user_repo()
        .find_by_id(user_id)
        .await
        .map_err(|e| {
            tracing::warn!(error = %e, "User lookup failed during handshake");
        })
        .ok()?;

    if user.is_none() {
        tracing::debug!(user_id = %user_id, "Handshake token user no longer exists");
        return None;
    }

    Some(user_id)
}

/// Handle a text frame from the client
///
/// Relay is fire-and-forget: malformed frames and unknown recipients are
/// logged and dropped rather than closing the connection.
async fn handle_text_frame(state: &GatewayState, session_id: &str, user_id: Snowflake, text: &str) {
    let event = match ClientEvent::from_json(text) {
        Ok(event) => event,
        Err(e) => {
            tracing::debug!(
                session_id = %session_id,
                error = %e,
                "Dropping malformed frame"
            );
            return;
        }
    };

    let recipient = match event.recipient() {
        Ok(id) => id,
        Err(e) => {
            tracing::debug!(
                session_id = %session_id,
                error = %e,
                "Dropping frame with bad recipient"
            );
            return;
        }
    };

    tracing::trace!(
        session_id = %session_id,
        event = %event.event,
        recipient = %recipient,
        "Relaying event"
    );

    state
        .connection_manager()
        .send_to_user(recipient, event.relay(user_id))
        .await;
}

/// Clean up a connection on disconnect
async fn cleanup_connection(state: &GatewayState, session_id: &str, user_id: Snowflake) {
    tracing::info!(session_id = %session_id, "Cleaning up connection");

    if let Some(connection) = state.connection_manager().get_connection(session_id) {
        connection.set_state(ConnectionState::Disconnected).await;
    }

    // Going offline only when the last connection drops; last-seen is
    // stamped by the presence update.
    let has_others = state
        .connection_manager()
        .has_other_connections(user_id, session_id);

    state.connection_manager().remove_connection(session_id).await;

    if !has_others {
        if let Err(e) = PresenceService::new(state.service_context())
            .set_offline(user_id)
            .await
        {
            tracing::warn!(user_id = %user_id, error = %e, "Failed to mark user offline");
        }
    }
}
