//! Notification entity - a fan-out record created as a side effect of an action

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// The action that produced a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Like,
    Comment,
    Follow,
    Share,
    Message,
}

impl NotificationKind {
    /// Stable string form used in the database and API
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Like => "like",
            Self::Comment => "comment",
            Self::Follow => "follow",
            Self::Share => "share",
            Self::Message => "message",
        }
    }

    /// Parse from the stable string form
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "like" => Some(Self::Like),
            "comment" => Some(Self::Comment),
            "follow" => Some(Self::Follow),
            "share" => Some(Self::Share),
            "message" => Some(Self::Message),
            _ => None,
        }
    }
}

impl std::fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Notification entity, visible only to its recipient
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: Snowflake,
    pub recipient_id: Snowflake,
    pub sender_id: Snowflake,
    pub kind: NotificationKind,
    pub post_id: Option<Snowflake>,
    pub comment_id: Option<Snowflake>,
    pub body: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// Only the recipient may read, mutate, or delete a notification
    #[inline]
    pub fn owned_by(&self, user_id: Snowflake) -> bool {
        self.recipient_id == user_id
    }

    /// Mark as read
    pub fn mark_read(&mut self) {
        self.is_read = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_round_trip() {
        for kind in [
            NotificationKind::Like,
            NotificationKind::Comment,
            NotificationKind::Follow,
            NotificationKind::Share,
            NotificationKind::Message,
        ] {
            assert_eq!(NotificationKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(NotificationKind::parse("poke"), None);
    }

    #[test]
    fn test_ownership() {
        let n = Notification {
            id: Snowflake::new(1),
            recipient_id: Snowflake::new(10),
            sender_id: Snowflake::new(20),
            kind: NotificationKind::Like,
            post_id: Some(Snowflake::new(5)),
            comment_id: None,
            body: "alice liked your post".to_string(),
            is_read: false,
            created_at: Utc::now(),
        };
        assert!(n.owned_by(Snowflake::new(10)));
        assert!(!n.owned_by(Snowflake::new(20)));
    }
}
