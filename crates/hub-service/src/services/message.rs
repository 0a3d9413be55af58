//! Direct message service
//!
//! Sending, conversation history, the conversation overview, and deletion.

use hub_core::{
    DomainError, Message, MessageType, NotificationEvent, NotificationKind, Snowflake,
};
use tracing::{info, instrument};

use crate::dto::mappers::deleted_user_placeholder;
use crate::dto::{
    ConversationResponse, ConversationSummaryResponse, MessageResponse, SendMessageRequest,
    UnreadCountResponse, UserResponse,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::notification::NotificationService;

/// How much of a message is quoted inside the notification body
const PREVIEW_LEN: usize = 50;

/// Direct message service
pub struct MessageService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> MessageService<'a> {
    /// Create a new MessageService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Send a direct message, notifying the recipient
    #[instrument(skip(self, request))]
    pub async fn send(
        &self,
        sender_id: Snowflake,
        request: SendMessageRequest,
    ) -> ServiceResult<MessageResponse> {
        let recipient_id: Snowflake = request
            .recipient_id
            .parse()
            .map_err(|_| ServiceError::validation("Invalid recipient ID"))?;

        if recipient_id == sender_id {
            return Err(DomainError::SelfMessage.into());
        }

        let sender = self
            .ctx
            .user_repo()
            .find_by_id(sender_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", sender_id.to_string()))?;

        // Recipient must exist before anything is written
        self.ctx
            .user_repo()
            .find_by_id(recipient_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("User", recipient_id.to_string()))?;

        let message_type = request
            .message_type
            .as_deref()
            .map_or(MessageType::Text, MessageType::parse);

        let message = Message::new(
            self.ctx.generate_id(),
            sender_id,
            recipient_id,
            request.content,
            message_type,
            request.attachments,
        );

        self.ctx.message_repo().create(&message).await?;

        info!(message_id = %message.id, "Message sent");

        let event = NotificationEvent::new(
            recipient_id,
            sender_id,
            NotificationKind::Message,
            format!("{}: {}", sender.name, message.preview(PREVIEW_LEN)),
        );
        NotificationService::new(self.ctx).dispatch(event).await?;

        Ok(MessageResponse::from(&message))
    }

    /// Page of the conversation with a peer, oldest first within the page.
    /// Fetching a page marks the peer's messages to the caller as read.
    #[instrument(skip(self))]
    pub async fn conversation(
        &self,
        user_id: Snowflake,
        peer_id: Snowflake,
        page: i64,
        limit: i64,
    ) -> ServiceResult<ConversationResponse> {
        let offset = (page - 1) * limit;

        let mut messages = self
            .ctx
            .message_repo()
            .conversation(user_id, peer_id, offset, limit)
            .await?;
        let total = self
            .ctx
            .message_repo()
            .conversation_count(user_id, peer_id)
            .await?;

        // Repository returns newest first; clients render oldest first
        messages.reverse();

        self.ctx
            .message_repo()
            .mark_conversation_read(peer_id, user_id)
            .await?;

        Ok(ConversationResponse {
            messages: messages.iter().map(MessageResponse::from).collect(),
            current_page: page,
            total_pages: super::total_pages(total, limit),
            total_messages: total,
        })
    }

    /// Conversation overview: latest message and unread count per peer
    #[instrument(skip(self))]
    pub async fn conversations(
        &self,
        user_id: Snowflake,
    ) -> ServiceResult<Vec<ConversationSummaryResponse>> {
        let summaries = self.ctx.message_repo().conversations(user_id).await?;

        let peer_ids: Vec<Snowflake> = summaries.iter().map(|s| s.peer_id).collect();
        let peers = self.ctx.user_repo().find_by_ids(&peer_ids).await?;

        Ok(summaries
            .into_iter()
            .map(|summary| {
                let peer = peers
                    .iter()
                    .find(|u| u.id == summary.peer_id)
                    .map_or_else(
                        || deleted_user_placeholder(summary.peer_id),
                        UserResponse::from,
                    );
                ConversationSummaryResponse {
                    peer,
                    last_message: MessageResponse::from(&summary.last_message),
                    unread_count: summary.unread_count,
                }
            })
            .collect())
    }

    /// Mark every unread message from a peer as read, returning how many flipped
    #[instrument(skip(self))]
    pub async fn mark_read(&self, user_id: Snowflake, peer_id: Snowflake) -> ServiceResult<u64> {
        let marked = self
            .ctx
            .message_repo()
            .mark_conversation_read(peer_id, user_id)
            .await?;
        Ok(marked)
    }

    /// Total unread messages addressed to the user
    #[instrument(skip(self))]
    pub async fn unread_count(&self, user_id: Snowflake) -> ServiceResult<UnreadCountResponse> {
        let unread_count = self.ctx.message_repo().unread_count(user_id).await?;
        Ok(UnreadCountResponse { unread_count })
    }

    /// Delete a message; only its sender may do so
    #[instrument(skip(self))]
    pub async fn delete(&self, message_id: Snowflake, user_id: Snowflake) -> ServiceResult<()> {
        let message = self
            .ctx
            .message_repo()
            .find_by_id(message_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Message", message_id.to_string()))?;

        if !message.deletable_by(user_id) {
            return Err(DomainError::NotMessageSender.into());
        }

        self.ctx.message_repo().delete(message_id).await?;

        info!(message_id = %message_id, "Message deleted");

        Ok(())
    }
}
