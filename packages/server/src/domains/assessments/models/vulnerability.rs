use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgConnection;
use uuid::Uuid;

/// Outcome of a vulnerability assessment, before persistence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VulnerabilityResult {
    pub vulnerability_flag: bool,
    pub vulnerability_reasoning: String,
    pub relevant_snippet_ids: Vec<String>,
}

/// Stored vulnerability assessment, one row per contact.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct VulnerabilityAssessment {
    pub id: Uuid,
    pub contact_id: String,
    pub vulnerability_flag: bool,
    pub vulnerability_reasoning: String,
    pub relevant_snippet_ids: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl VulnerabilityAssessment {
    /// Insert or fully replace the contact's row. Returns the row as stored.
    pub async fn upsert(
        contact_id: &str,
        result: &VulnerabilityResult,
        conn: &mut PgConnection,
    ) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO ai_assess_vulnerability (
                contact_id, vulnerability_flag, vulnerability_reasoning, relevant_snippet_ids
            )
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (contact_id) DO UPDATE SET
                vulnerability_flag = EXCLUDED.vulnerability_flag,
                vulnerability_reasoning = EXCLUDED.vulnerability_reasoning,
                relevant_snippet_ids = EXCLUDED.relevant_snippet_ids,
                updated_at = NOW()
            RETURNING *
            "#,
        )
        .bind(contact_id)
        .bind(result.vulnerability_flag)
        .bind(&result.vulnerability_reasoning)
        .bind(&result.relevant_snippet_ids)
        .fetch_one(conn)
        .await
        .map_err(Into::into)
    }

    pub async fn find_by_contact_id(
        contact_id: &str,
        conn: &mut PgConnection,
    ) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM ai_assess_vulnerability WHERE contact_id = $1")
            .bind(contact_id)
            .fetch_optional(conn)
            .await
            .map_err(Into::into)
    }
}
