//! Message entity - a direct message between two identities

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// Message content type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageType {
    #[default]
    Text,
    Image,
    File,
}

impl MessageType {
    /// Stable string form used in the database and API
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Image => "image",
            Self::File => "file",
        }
    }

    /// Parse from the stable string form, defaulting to text
    pub fn parse(s: &str) -> Self {
        match s {
            "image" => Self::Image,
            "file" => Self::File,
            _ => Self::Text,
        }
    }
}

/// Direct message entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: Snowflake,
    pub sender_id: Snowflake,
    pub recipient_id: Snowflake,
    pub content: String,
    pub message_type: MessageType,
    pub attachments: Vec<String>,
    pub is_read: bool,
    pub read_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// Create a new unread Message
    pub fn new(
        id: Snowflake,
        sender_id: Snowflake,
        recipient_id: Snowflake,
        content: String,
        message_type: MessageType,
        attachments: Vec<String>,
    ) -> Self {
        Self {
            id,
            sender_id,
            recipient_id,
            content,
            message_type,
            attachments,
            is_read: false,
            read_at: None,
            created_at: Utc::now(),
        }
    }

    /// Check if `user_id` is a party to this message
    #[inline]
    pub fn involves(&self, user_id: Snowflake) -> bool {
        self.sender_id == user_id || self.recipient_id == user_id
    }

    /// Only the sender may delete a message
    #[inline]
    pub fn deletable_by(&self, user_id: Snowflake) -> bool {
        self.sender_id == user_id
    }

    /// Get a truncated preview of the message (for notifications)
    pub fn preview(&self, max_len: usize) -> &str {
        if self.content.len() <= max_len {
            &self.content
        } else {
            let mut end = max_len;
            while !self.content.is_char_boundary(end) && end > 0 {
                end -= 1;
            }
            &self.content[..end]
        }
    }
}
