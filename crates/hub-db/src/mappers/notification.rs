//! Notification entity <-> model mapper

use hub_core::{Notification, NotificationKind, Snowflake};

use crate::models::NotificationModel;

/// Convert NotificationModel to Notification entity
impl From<NotificationModel> for Notification {
    fn from(model: NotificationModel) -> Self {
        Notification {
            id: Snowflake::new(model.id),
            recipient_id: Snowflake::new(model.recipient_id),
            sender_id: Snowflake::new(model.sender_id),
            // the kind column is constrained by a CHECK, unknown values cannot appear
            kind: NotificationKind::parse(&model.kind).unwrap_or(NotificationKind::Message),
            post_id: model.post_id.map(Snowflake::new),
            comment_id: model.comment_id.map(Snowflake::new),
            body: model.body,
            is_read: model.is_read,
            created_at: model.created_at,
        }
    }
}

/// Convert Notification entity reference to values for database insertion
pub struct NotificationInsert<'a> {
    pub id: i64,
    pub recipient_id: i64,
    pub sender_id: i64,
    pub kind: &'static str,
    pub post_id: Option<i64>,
    pub comment_id: Option<i64>,
    pub body: &'a str,
}

impl<'a> NotificationInsert<'a> {
    pub fn new(notification: &'a Notification) -> Self {
        Self {
            id: notification.id.into_inner(),
            recipient_id: notification.recipient_id.into_inner(),
            sender_id: notification.sender_id.into_inner(),
            kind: notification.kind.as_str(),
            post_id: notification.post_id.map(Snowflake::into_inner),
            comment_id: notification.comment_id.map(Snowflake::into_inner),
            body: &notification.body,
        }
    }
}
