//! Notification handlers
//!
//! Endpoints for the recipient-scoped notification feed.

use axum::{
    extract::{Path, State},
    Json,
};
use hub_service::{NotificationListResponse, NotificationService, UnreadCountResponse};

use crate::extractors::{AuthUser, NotificationIdPath, Pagination, NOTIFICATION_LIMIT};
use crate::response::{ApiResult, NoContent};
use crate::state::AppState;

/// List the authenticated user's notifications
///
/// GET /notifications
pub async fn list_notifications(
    State(state): State<AppState>,
    auth: AuthUser,
    pagination: Pagination,
) -> ApiResult<Json<NotificationListResponse>> {
    let service = NotificationService::new(state.service_context());
    let response = service
        .list(auth.user_id, pagination.page(), pagination.limit_or(NOTIFICATION_LIMIT))
        .await?;
    Ok(Json(response))
}

/// Unread notification count
///
/// GET /notifications/unread-count
pub async fn unread_count(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<UnreadCountResponse>> {
    let service = NotificationService::new(state.service_context());
    let response = service.unread_count(auth.user_id).await?;
    Ok(Json(response))
}

/// Mark one notification read
///
/// PUT /notifications/{notification_id}/read
pub async fn mark_read(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<NotificationIdPath>,
) -> ApiResult<NoContent> {
    let notification_id = path.notification_id()?;

    let service = NotificationService::new(state.service_context());
    service.mark_read(notification_id, auth.user_id).await?;
    Ok(NoContent)
}

/// Mark every notification read
///
/// PUT /notifications/read-all
pub async fn mark_all_read(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<NoContent> {
    let service = NotificationService::new(state.service_context());
    service.mark_all_read(auth.user_id).await?;
    Ok(NoContent)
}

/// Delete a notification
///
/// DELETE /notifications/{notification_id}
pub async fn delete_notification(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<NotificationIdPath>,
) -> ApiResult<NoContent> {
    let notification_id = path.notification_id()?;

    let service = NotificationService::new(state.service_context());
    service.delete(notification_id, auth.user_id).await?;
    Ok(NoContent)
}
