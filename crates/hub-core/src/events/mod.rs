//! Notification fan-out contract
//!
//! Mutating operations describe their side effects as [`NotificationEvent`]
//! values instead of writing notifications inline. A single dispatch point in
//! the service layer consumes them, which keeps the fan-out rules (most
//! importantly: never notify an actor about their own action) in one place
//! and makes them testable without a database.

use serde::{Deserialize, Serialize};

use crate::entities::NotificationKind;
use crate::value_objects::Snowflake;

/// A pending notification produced by a mutating action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationEvent {
    pub recipient_id: Snowflake,
    pub sender_id: Snowflake,
    pub kind: NotificationKind,
    pub post_id: Option<Snowflake>,
    pub comment_id: Option<Snowflake>,
    pub body: String,
}

impl NotificationEvent {
    /// Create an event with no post/comment references
    pub fn new(
        recipient_id: Snowflake,
        sender_id: Snowflake,
        kind: NotificationKind,
        body: impl Into<String>,
    ) -> Self {
        Self {
            recipient_id,
            sender_id,
            kind,
            post_id: None,
            comment_id: None,
            body: body.into(),
        }
    }

    /// Attach a post reference
    pub fn with_post(mut self, post_id: Snowflake) -> Self {
        self.post_id = Some(post_id);
        self
    }

    /// Attach a comment reference
    pub fn with_comment(mut self, comment_id: Snowflake) -> Self {
        self.comment_id = Some(comment_id);
        self
    }

    /// An event is droppable when the actor would be notifying themselves
    #[inline]
    pub fn is_self_directed(&self) -> bool {
        self.recipient_id == self.sender_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_self_directed_event() {
        let event = NotificationEvent::new(
            Snowflake::new(1),
            Snowflake::new(1),
            NotificationKind::Like,
            "you liked your own post",
        );
        assert!(event.is_self_directed());

        let event = NotificationEvent::new(
            Snowflake::new(1),
            Snowflake::new(2),
            NotificationKind::Like,
            "bob liked your post",
        );
        assert!(!event.is_self_directed());
    }

    #[test]
    fn test_builder_references() {
        let event = NotificationEvent::new(
            Snowflake::new(1),
            Snowflake::new(2),
            NotificationKind::Comment,
            "bob commented on your post",
        )
        .with_post(Snowflake::new(5))
        .with_comment(Snowflake::new(6));

        assert_eq!(event.post_id, Some(Snowflake::new(5)));
        assert_eq!(event.comment_id, Some(Snowflake::new(6)));
    }
}
