use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgConnection;
use uuid::Uuid;

/// Outcome of a complaints assessment, before persistence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplaintsResult {
    pub complaints_flag: bool,
    pub complaints_reasoning: String,
    pub physical_disability_flag: bool,
    pub physical_disability_reasoning: String,
    pub relevant_snippet_ids: Vec<String>,
}

/// Stored complaints assessment, one row per contact.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ComplaintsAssessment {
    pub id: Uuid,
    pub contact_id: String,
    pub complaints_flag: bool,
    pub complaints_reasoning: String,
    pub physical_disability_flag: bool,
    pub physical_disability_reasoning: String,
    pub relevant_snippet_ids: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ComplaintsAssessment {
    /// Insert or fully replace the contact's row. Returns the row as stored.
    pub async fn upsert(
        contact_id: &str,
        result: &ComplaintsResult,
        conn: &mut PgConnection,
    ) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO ai_assess_complaints (
                contact_id, complaints_flag, complaints_reasoning,
                physical_disability_flag, physical_disability_reasoning, relevant_snippet_ids
            )
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (contact_id) DO UPDATE SET
                complaints_flag = EXCLUDED.complaints_flag,
                complaints_reasoning = EXCLUDED.complaints_reasoning,
                physical_disability_flag = EXCLUDED.physical_disability_flag,
                physical_disability_reasoning = EXCLUDED.physical_disability_reasoning,
                relevant_snippet_ids = EXCLUDED.relevant_snippet_ids,
                updated_at = NOW()
            RETURNING *
            "#,
        )
        .bind(contact_id)
        .bind(result.complaints_flag)
        .bind(&result.complaints_reasoning)
        .bind(result.physical_disability_flag)
        .bind(&result.physical_disability_reasoning)
        .bind(&result.relevant_snippet_ids)
        .fetch_one(conn)
        .await
        .map_err(Into::into)
    }

    pub async fn find_by_contact_id(
        contact_id: &str,
        conn: &mut PgConnection,
    ) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM ai_assess_complaints WHERE contact_id = $1")
            .bind(contact_id)
            .fetch_optional(conn)
            .await
            .map_err(Into::into)
    }
}
