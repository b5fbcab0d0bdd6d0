use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgConnection;
use uuid::Uuid;

/// Reviewer-supplied flags and reasoning for a contact.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackInput {
    pub complaints_flag: bool,
    pub vulnerability_flag: bool,
    pub complaints_reasoning: String,
    pub vulnerability_reasoning: String,
}

/// One evaluator's feedback on one contact.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct QualityAssessorFeedback {
    pub id: Uuid,
    pub contact_id: String,
    pub evaluator: String,
    pub complaints_flag: bool,
    pub vulnerability_flag: bool,
    pub complaints_reasoning: String,
    pub vulnerability_reasoning: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl QualityAssessorFeedback {
    /// Insert or fully replace the (contact, evaluator) row.
    pub async fn upsert(
        contact_id: &str,
        evaluator: &str,
        input: &FeedbackInput,
        conn: &mut PgConnection,
    ) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO quality_assessor_feedback (
                contact_id, evaluator, complaints_flag, vulnerability_flag,
                complaints_reasoning, vulnerability_reasoning
            )
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (contact_id, evaluator) DO UPDATE SET
                complaints_flag = EXCLUDED.complaints_flag,
                vulnerability_flag = EXCLUDED.vulnerability_flag,
                complaints_reasoning = EXCLUDED.complaints_reasoning,
                vulnerability_reasoning = EXCLUDED.vulnerability_reasoning,
                updated_at = NOW()
            RETURNING *
            "#,
        )
        .bind(contact_id)
        .bind(evaluator)
        .bind(input.complaints_flag)
        .bind(input.vulnerability_flag)
        .bind(&input.complaints_reasoning)
        .bind(&input.vulnerability_reasoning)
        .fetch_one(conn)
        .await
        .map_err(Into::into)
    }

    /// All evaluators' feedback for a contact, ordered by evaluator.
    pub async fn find_for_contact(contact_id: &str, conn: &mut PgConnection) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            r#"
            SELECT *
            FROM quality_assessor_feedback
            WHERE contact_id = $1
            ORDER BY evaluator ASC
            "#,
        )
        .bind(contact_id)
        .fetch_all(conn)
        .await
        .map_err(Into::into)
    }
}
