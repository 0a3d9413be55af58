//! Direct message handlers
//!
//! Endpoints for sending messages and browsing conversations.

use axum::{
    extract::{Path, State},
    Json,
};
use hub_service::{
    ConversationResponse, ConversationSummaryResponse, MarkedReadResponse, MessageResponse,
    MessageService, SendMessageRequest, UnreadCountResponse,
};

use crate::extractors::{
    AuthUser, MessageIdPath, Pagination, UserIdPath, ValidatedJson, CONVERSATION_LIMIT,
};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// Send a direct message
///
/// POST /messages
pub async fn send_message(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<SendMessageRequest>,
) -> ApiResult<Created<Json<MessageResponse>>> {
    let service = MessageService::new(state.service_context());
    let response = service.send(auth.user_id, request).await?;
    Ok(Created(Json(response)))
}

/// Conversation overview: latest message and unread count per peer
///
/// GET /messages/conversations
pub async fn get_conversations(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<Vec<ConversationSummaryResponse>>> {
    let service = MessageService::new(state.service_context());
    let response = service.conversations(auth.user_id).await?;
    Ok(Json(response))
}

/// Page of the conversation with a peer; marks their messages read
///
/// GET /messages/conversation/{user_id}
pub async fn get_conversation(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<UserIdPath>,
    pagination: Pagination,
) -> ApiResult<Json<ConversationResponse>> {
    let peer_id = path.user_id()?;

    let service = MessageService::new(state.service_context());
    let response = service
        .conversation(
            auth.user_id,
            peer_id,
            pagination.page(),
            pagination.limit_or(CONVERSATION_LIMIT),
        )
        .await?;
    Ok(Json(response))
}

/// Mark every message from a peer as read
///
/// PUT /messages/conversation/{user_id}/read
pub async fn mark_conversation_read(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<UserIdPath>,
) -> ApiResult<Json<MarkedReadResponse>> {
    let peer_id = path.user_id()?;

    let service = MessageService::new(state.service_context());
    let marked_count = service.mark_read(auth.user_id, peer_id).await?;
    Ok(Json(MarkedReadResponse { marked_count }))
}

/// Unread message count
///
/// GET /messages/unread-count
pub async fn unread_count(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<UnreadCountResponse>> {
    let service = MessageService::new(state.service_context());
    let response = service.unread_count(auth.user_id).await?;
    Ok(Json(response))
}

/// Delete a message (sender only)
///
/// DELETE /messages/{message_id}
pub async fn delete_message(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<MessageIdPath>,
) -> ApiResult<NoContent> {
    let message_id = path.message_id()?;

    let service = MessageService::new(state.service_context());
    service.delete(message_id, auth.user_id).await?;
    Ok(NoContent)
}
