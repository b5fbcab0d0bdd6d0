use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use sqlx::PgConnection;

use super::snippet::{decode_snippets_metadata, parse_snippets_metadata, Snippet};

/// Raised when a contact has no row in `contact_conversations`.
///
/// Kept distinct from "conversation with an empty transcript", which is valid.
#[derive(Debug, thiserror::Error)]
#[error("No conversation found for contact {contact_id}")]
pub struct ConversationNotFound {
    pub contact_id: String,
}

/// Conversation record for a contact, as ingested upstream.
///
/// `snippets_metadata` is read through a `::text` cast so both JSON-typed and
/// text-typed columns come back the same way; decode with [`Conversation::snippets`].
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Conversation {
    pub contact_id: String,
    pub transcript: Option<String>,
    pub snippets_metadata: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Conversation {
    pub async fn find_by_contact_id(
        contact_id: &str,
        conn: &mut PgConnection,
    ) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            r#"
            SELECT contact_id, transcript, snippets_metadata::text AS snippets_metadata, updated_at
            FROM contact_conversations
            WHERE contact_id = $1
            LIMIT 1
            "#,
        )
        .bind(contact_id)
        .fetch_optional(conn)
        .await
        .map_err(Into::into)
    }

    /// Like [`Conversation::find_by_contact_id`] but a missing row is an error
    /// ([`ConversationNotFound`]) the HTTP layer can recognise.
    pub async fn fetch(contact_id: &str, conn: &mut PgConnection) -> Result<Self> {
        match Self::find_by_contact_id(contact_id, conn).await? {
            Some(conversation) => Ok(conversation),
            None => Err(ConversationNotFound {
                contact_id: contact_id.to_string(),
            }
            .into()),
        }
    }

    /// Transcript text, `None` when absent or blank.
    pub fn transcript_text(&self) -> Option<&str> {
        self.transcript
            .as_deref()
            .filter(|text| !text.trim().is_empty())
    }

    pub fn snippets(&self) -> Result<Vec<Snippet>> {
        decode_snippets_metadata(self.snippets_metadata.as_deref())
    }

    /// Snippet entries exactly as stored.
    pub fn raw_snippets(&self) -> Result<Vec<Value>> {
        parse_snippets_metadata(self.snippets_metadata.as_deref())
    }
}
