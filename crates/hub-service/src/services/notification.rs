//! Notification service
//!
//! Every mutating operation elsewhere in the application that should alert a
//! user funnels its `NotificationEvent`s through [`NotificationService::dispatch`],
//! so persistence rules (like dropping self-directed events) live in one place.

use chrono::Utc;
use hub_core::{DomainError, Notification, NotificationEvent, Snowflake};
use tracing::{debug, instrument};

use crate::dto::mappers::deleted_user_placeholder;
use crate::dto::{NotificationListResponse, NotificationResponse, UnreadCountResponse, UserResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Notification service
pub struct NotificationService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> NotificationService<'a> {
    /// Create a new NotificationService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Persist a notification event, unless the actor would be notifying
    /// themselves
    #[instrument(skip(self, event), fields(kind = event.kind.as_str()))]
    pub async fn dispatch(&self, event: NotificationEvent) -> ServiceResult<()> {
        if event.is_self_directed() {
            debug!("Dropping self-directed notification");
            return Ok(());
        }

        let notification = Notification {
            id: self.ctx.generate_id(),
            recipient_id: event.recipient_id,
            sender_id: event.sender_id,
            kind: event.kind,
            post_id: event.post_id,
            comment_id: event.comment_id,
            body: event.body,
            is_read: false,
            created_at: Utc::now(),
        };

        self.ctx.notification_repo().create(&notification).await?;

        Ok(())
    }

    /// Dispatch a batch of events from one operation
    pub async fn dispatch_all(&self, events: Vec<NotificationEvent>) -> ServiceResult<()> {
        for event in events {
            self.dispatch(event).await?;
        }
        Ok(())
    }

    /// Page of the recipient's notifications, newest first, with senders
    /// expanded and the unread badge count attached
    #[instrument(skip(self))]
    pub async fn list(
        &self,
        recipient_id: Snowflake,
        page: i64,
        limit: i64,
    ) -> ServiceResult<NotificationListResponse> {
        let offset = (page - 1) * limit;

        let notifications = self
            .ctx
            .notification_repo()
            .list_for(recipient_id, offset, limit)
            .await?;
        let total = self.ctx.notification_repo().count_for(recipient_id).await?;
        let unread_count = self
            .ctx
            .notification_repo()
            .unread_count(recipient_id)
            .await?;

        let sender_ids: Vec<Snowflake> = notifications.iter().map(|n| n.sender_id).collect();
        let senders = self.ctx.user_repo().find_by_ids(&sender_ids).await?;

        let responses = notifications
            .into_iter()
            .map(|n| {
                let sender = senders
                    .iter()
                    .find(|u| u.id == n.sender_id)
                    .map_or_else(|| deleted_user_placeholder(n.sender_id), UserResponse::from);
                NotificationResponse {
                    id: n.id.to_string(),
                    sender,
                    kind: n.kind.as_str().to_string(),
                    post_id: n.post_id.map(|id| id.to_string()),
                    comment_id: n.comment_id.map(|id| id.to_string()),
                    body: n.body,
                    is_read: n.is_read,
                    created_at: n.created_at,
                }
            })
            .collect();

        Ok(NotificationListResponse {
            notifications: responses,
            current_page: page,
            total_pages: super::total_pages(total, limit),
            unread_count,
        })
    }

    /// Unread badge count on its own
    #[instrument(skip(self))]
    pub async fn unread_count(&self, recipient_id: Snowflake) -> ServiceResult<UnreadCountResponse> {
        let unread_count = self
            .ctx
            .notification_repo()
            .unread_count(recipient_id)
            .await?;

        Ok(UnreadCountResponse { unread_count })
    }

    /// Mark one notification read; only its recipient may do so
    #[instrument(skip(self))]
    pub async fn mark_read(&self, id: Snowflake, user_id: Snowflake) -> ServiceResult<()> {
        let notification = self
            .ctx
            .notification_repo()
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Notification", id.to_string()))?;

        if !notification.owned_by(user_id) {
            return Err(DomainError::NotNotificationRecipient.into());
        }

        self.ctx.notification_repo().mark_read(id).await?;
        Ok(())
    }

    /// Mark all of the user's notifications read
    #[instrument(skip(self))]
    pub async fn mark_all_read(&self, user_id: Snowflake) -> ServiceResult<()> {
        self.ctx.notification_repo().mark_all_read(user_id).await?;
        Ok(())
    }

    /// Delete a notification; only its recipient may do so
    #[instrument(skip(self))]
    pub async fn delete(&self, id: Snowflake, user_id: Snowflake) -> ServiceResult<()> {
        let notification = self
            .ctx
            .notification_repo()
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Notification", id.to_string()))?;

        if !notification.owned_by(user_id) {
            return Err(DomainError::NotNotificationRecipient.into());
        }

        self.ctx.notification_repo().delete(id).await?;
        Ok(())
    }
}
