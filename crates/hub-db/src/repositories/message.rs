//! PostgreSQL implementation of MessageRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use hub_core::{ConversationSummary, Message, MessageRepository, RepoResult, Snowflake};

use crate::mappers::MessageInsert;
use crate::models::{ConversationRowModel, MessageModel};

use super::error::{map_db_error, message_not_found};

const MESSAGE_COLUMNS: &str = "id, sender_id, recipient_id, content, message_type, attachments, \
     is_read, read_at, created_at";

/// PostgreSQL implementation of MessageRepository
#[derive(Clone)]
pub struct PgMessageRepository {
    pool: PgPool,
}

impl PgMessageRepository {
    /// Create a new PgMessageRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MessageRepository for PgMessageRepository {
    #[instrument(skip(self))]
    async fn create(&self, message: &Message) -> RepoResult<()> {
        let insert = MessageInsert::new(message);

        sqlx::query(
            r"
            INSERT INTO messages (id, sender_id, recipient_id, content, message_type,
                                  attachments, is_read, read_at, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ",
        )
        .bind(insert.id)
        .bind(insert.sender_id)
        .bind(insert.recipient_id)
        .bind(insert.content)
        .bind(insert.message_type)
        .bind(insert.attachments)
        .bind(message.is_read)
        .bind(message.read_at)
        .bind(message.created_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Message>> {
        let result = sqlx::query_as::<_, MessageModel>(&format!(
            "SELECT {MESSAGE_COLUMNS} FROM messages WHERE id = $1"
        ))
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Message::from))
    }

    #[instrument(skip(self))]
    async fn conversation(
        &self,
        user_a: Snowflake,
        user_b: Snowflake,
        offset: i64,
        limit: i64,
    ) -> RepoResult<Vec<Message>> {
        let results = sqlx::query_as::<_, MessageModel>(&format!(
            r"
            SELECT {MESSAGE_COLUMNS} FROM messages
            WHERE (sender_id = $1 AND recipient_id = $2)
               OR (sender_id = $2 AND recipient_id = $1)
            ORDER BY created_at DESC
            OFFSET $3 LIMIT $4
            "
        ))
        .bind(user_a.into_inner())
        .bind(user_b.into_inner())
        .bind(offset)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Message::from).collect())
    }

    #[instrument(skip(self))]
    async fn conversation_count(&self, user_a: Snowflake, user_b: Snowflake) -> RepoResult<i64> {
        let result = sqlx::query_scalar::<_, i64>(
            r"
            SELECT COUNT(*) FROM messages
            WHERE (sender_id = $1 AND recipient_id = $2)
               OR (sender_id = $2 AND recipient_id = $1)
            ",
        )
        .bind(user_a.into_inner())
        .bind(user_b.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result)
    }

    #[instrument(skip(self))]
    async fn mark_conversation_read(
        &self,
        sender: Snowflake,
        recipient: Snowflake,
    ) -> RepoResult<u64> {
        let result = sqlx::query(
            r"
            UPDATE messages
            SET is_read = TRUE, read_at = NOW()
            WHERE sender_id = $1 AND recipient_id = $2 AND NOT is_read
            ",
        )
        .bind(sender.into_inner())
        .bind(recipient.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected())
    }

    #[instrument(skip(self))]
    async fn conversations(&self, user_id: Snowflake) -> RepoResult<Vec<ConversationSummary>> {
        let results = sqlx::query_as::<_, ConversationRowModel>(
            r"
            WITH convo AS (
                SELECT m.*,
                       CASE WHEN m.sender_id = $1 THEN m.recipient_id
                            ELSE m.sender_id END AS peer_id
                FROM messages m
                WHERE m.sender_id = $1 OR m.recipient_id = $1
            ),
            last_msg AS (
                SELECT DISTINCT ON (peer_id) *
                FROM convo
                ORDER BY peer_id, created_at DESC
            ),
            unread AS (
                SELECT sender_id AS peer_id, COUNT(*) AS unread_count
                FROM messages
                WHERE recipient_id = $1 AND NOT is_read
                GROUP BY sender_id
            )
            SELECT last_msg.peer_id, last_msg.id, last_msg.sender_id, last_msg.recipient_id,
                   last_msg.content, last_msg.message_type, last_msg.attachments,
                   last_msg.is_read, last_msg.read_at, last_msg.created_at,
                   COALESCE(unread.unread_count, 0) AS unread_count
            FROM last_msg
            LEFT JOIN unread USING (peer_id)
            ORDER BY last_msg.created_at DESC
            ",
        )
        .bind(user_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(ConversationSummary::from).collect())
    }

    #[instrument(skip(self))]
    async fn unread_count(&self, recipient_id: Snowflake) -> RepoResult<i64> {
        let result = sqlx::query_scalar::<_, i64>(
            r"
            SELECT COUNT(*) FROM messages WHERE recipient_id = $1 AND NOT is_read
            ",
        )
        .bind(recipient_id.into_inner())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM messages WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(message_not_found(id));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgMessageRepository>();
    }
}
