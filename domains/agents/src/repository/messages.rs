//! Message repository

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entities::Message;
use crate::repository::MessageStore;
use aurora_common::{Error, Result};

#[derive(Clone)]
pub struct MessageRepository {
    pool: PgPool,
}

impl MessageRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MessageStore for MessageRepository {
    /// List messages for a conversation, ordered by sequence ASC
    async fn list_by_conversation(&self, conversation_id: Uuid) -> Result<Vec<Message>> {
        let messages = sqlx::query_as::<_, Message>(
            r#"
            SELECT id, conversation_id, role, content,
                   model, input_tokens, output_tokens,
                   sequence, created_at
            FROM messages
            WHERE conversation_id = $1
            ORDER BY sequence ASC
            "#,
        )
        .bind(conversation_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(messages)
    }

    /// Create a new message
    ///
    /// The unique index on (conversation_id, sequence) turns a concurrent
    /// sequence race into a Conflict instead of silent reordering.
    async fn create(&self, message: &Message) -> Result<Message> {
        let created = sqlx::query_as::<_, Message>(
            r#"
            INSERT INTO messages (
                id, conversation_id, role, content,
                model, input_tokens, output_tokens,
                sequence, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id, conversation_id, role, content,
                      model, input_tokens, output_tokens,
                      sequence, created_at
            "#,
        )
        .bind(message.id)
        .bind(message.conversation_id)
        .bind(message.role)
        .bind(&message.content)
        .bind(&message.model)
        .bind(message.input_tokens)
        .bind(message.output_tokens)
        .bind(message.sequence)
        .bind(message.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => Error::Conflict(
                "Concurrent write to conversation, retry the message".to_string(),
            ),
            _ => Error::Database(e),
        })?;

        Ok(created)
    }

    /// Get the next sequence number for a conversation
    async fn next_sequence(&self, conversation_id: Uuid) -> Result<i32> {
        let row = sqlx::query_scalar::<_, Option<i32>>(
            "SELECT MAX(sequence) FROM messages WHERE conversation_id = $1",
        )
        .bind(conversation_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.unwrap_or(0) + 1)
    }
}
