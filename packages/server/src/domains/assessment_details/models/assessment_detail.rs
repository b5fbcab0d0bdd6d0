use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgConnection;
use uuid::Uuid;

/// Reviewer assessment form as posted by the UI (camelCase keys).
///
/// Only `aws_ref_id` is required; everything else falls back to empty/false.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AssessmentDetailsInput {
    pub aws_ref_id: Option<String>,
    pub tracksmart_id: Option<String>,
    pub special_service_team_flag: bool,
    pub transcript: Option<String>,
    pub overall_summary: Option<String>,
    pub detailed_summary: Option<String>,
    pub physical_disability_status: bool,
    pub complaints_assessment: bool,
    pub vulnerability_assessment: bool,
    pub complaints: bool,
    pub complaints_reason: Vec<String>,
    pub complaints_reason_other: String,
    pub complaints_assessment_reasoning: String,
    pub complaints_review_evidence: String,
    pub vulnerability: bool,
    pub vulnerability_categories: Vec<String>,
    pub vulnerability_categories_other: String,
    pub vulnerability_assessment_reasoning: String,
    pub vulnerability_review_evidence: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct AssessmentDetails {
    pub id: Uuid,
    pub aws_ref_id: String,
    pub tracksmart_id: Option<String>,
    pub special_service_team_flag: bool,
    pub transcript: Option<String>,
    pub overall_summary: Option<String>,
    pub detailed_summary: Option<String>,
    pub physical_disability_status: bool,
    pub complaints_assessment: bool,
    pub vulnerability_assessment: bool,
    pub complaints: bool,
    pub complaints_reason: Vec<String>,
    pub complaints_reason_other: String,
    pub complaints_assessment_reasoning: String,
    pub complaints_review_evidence: String,
    pub vulnerability: bool,
    pub vulnerability_categories: Vec<String>,
    pub vulnerability_categories_other: String,
    pub vulnerability_assessment_reasoning: String,
    pub vulnerability_review_evidence: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl AssessmentDetails {
    /// Insert or fully replace the row for `aws_ref_id`.
    pub async fn upsert(
        aws_ref_id: &str,
        input: &AssessmentDetailsInput,
        conn: &mut PgConnection,
    ) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO assessment_details (
                aws_ref_id, tracksmart_id, special_service_team_flag,
                transcript, overall_summary, detailed_summary,
                physical_disability_status, complaints_assessment, vulnerability_assessment,
                complaints, complaints_reason, complaints_reason_other,
                complaints_assessment_reasoning, complaints_review_evidence,
                vulnerability, vulnerability_categories, vulnerability_categories_other,
                vulnerability_assessment_reasoning, vulnerability_review_evidence,
                updated_at
            )
            VALUES (
                $1, $2, $3,
                $4, $5, $6,
                $7, $8, $9,
                $10, $11, $12,
                $13, $14,
                $15, $16, $17,
                $18, $19,
                NOW()
            )
            ON CONFLICT (aws_ref_id) DO UPDATE SET
                tracksmart_id = EXCLUDED.tracksmart_id,
                special_service_team_flag = EXCLUDED.special_service_team_flag,
                transcript = EXCLUDED.transcript,
                overall_summary = EXCLUDED.overall_summary,
                detailed_summary = EXCLUDED.detailed_summary,
                physical_disability_status = EXCLUDED.physical_disability_status,
                complaints_assessment = EXCLUDED.complaints_assessment,
                vulnerability_assessment = EXCLUDED.vulnerability_assessment,
                complaints = EXCLUDED.complaints,
                complaints_reason = EXCLUDED.complaints_reason,
                complaints_reason_other = EXCLUDED.complaints_reason_other,
                complaints_assessment_reasoning = EXCLUDED.complaints_assessment_reasoning,
                complaints_review_evidence = EXCLUDED.complaints_review_evidence,
                vulnerability = EXCLUDED.vulnerability,
                vulnerability_categories = EXCLUDED.vulnerability_categories,
                vulnerability_categories_other = EXCLUDED.vulnerability_categories_other,
                vulnerability_assessment_reasoning = EXCLUDED.vulnerability_assessment_reasoning,
                vulnerability_review_evidence = EXCLUDED.vulnerability_review_evidence,
                updated_at = NOW()
            RETURNING *
            "#,
        )
        .bind(aws_ref_id)
        .bind(&input.tracksmart_id)
        .bind(input.special_service_team_flag)
        .bind(&input.transcript)
        .bind(&input.overall_summary)
        .bind(&input.detailed_summary)
        .bind(input.physical_disability_status)
        .bind(input.complaints_assessment)
        .bind(input.vulnerability_assessment)
        .bind(input.complaints)
        .bind(&input.complaints_reason)
        .bind(&input.complaints_reason_other)
        .bind(&input.complaints_assessment_reasoning)
        .bind(&input.complaints_review_evidence)
        .bind(input.vulnerability)
        .bind(&input.vulnerability_categories)
        .bind(&input.vulnerability_categories_other)
        .bind(&input.vulnerability_assessment_reasoning)
        .bind(&input.vulnerability_review_evidence)
        .fetch_one(conn)
        .await
        .map_err(Into::into)
    }

    pub async fn find_by_aws_ref_id(
        aws_ref_id: &str,
        conn: &mut PgConnection,
    ) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM assessment_details WHERE aws_ref_id = $1")
            .bind(aws_ref_id)
            .fetch_optional(conn)
            .await
            .map_err(Into::into)
    }
}
