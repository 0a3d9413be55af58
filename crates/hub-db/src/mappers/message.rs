//! Message entity <-> model mapper

use hub_core::{ConversationSummary, Message, MessageType, Snowflake};

use crate::models::{ConversationRowModel, MessageModel};

/// Convert MessageModel to Message entity
impl From<MessageModel> for Message {
    fn from(model: MessageModel) -> Self {
        Message {
            id: Snowflake::new(model.id),
            sender_id: Snowflake::new(model.sender_id),
            recipient_id: Snowflake::new(model.recipient_id),
            content: model.content,
            message_type: MessageType::parse(&model.message_type),
            attachments: model.attachments,
            is_read: model.is_read,
            read_at: model.read_at,
            created_at: model.created_at,
        }
    }
}

/// Convert a conversation-overview row to a ConversationSummary
impl From<ConversationRowModel> for ConversationSummary {
    fn from(row: ConversationRowModel) -> Self {
        ConversationSummary {
            peer_id: Snowflake::new(row.peer_id),
            last_message: Message {
                id: Snowflake::new(row.id),
                sender_id: Snowflake::new(row.sender_id),
                recipient_id: Snowflake::new(row.recipient_id),
                content: row.content,
                message_type: MessageType::parse(&row.message_type),
                attachments: row.attachments,
                is_read: row.is_read,
                read_at: row.read_at,
                created_at: row.created_at,
            },
            unread_count: row.unread_count,
        }
    }
}

/// Convert Message entity reference to values for database insertion
pub struct MessageInsert<'a> {
    pub id: i64,
    pub sender_id: i64,
    pub recipient_id: i64,
    pub content: &'a str,
    pub message_type: &'static str,
    pub attachments: &'a [String],
}

impl<'a> MessageInsert<'a> {
    pub fn new(message: &'a Message) -> Self {
        Self {
            id: message.id.into_inner(),
            sender_id: message.sender_id.into_inner(),
            recipient_id: message.recipient_id.into_inner(),
            content: &message.content,
            message_type: message.message_type.as_str(),
            attachments: &message.attachments,
        }
    }
}
