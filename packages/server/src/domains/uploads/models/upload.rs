use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{Connection, PgConnection};
use uuid::Uuid;

/// A validated upload row ready for insertion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUpload {
    pub contact_id: String,
    pub evaluator: String,
    pub transcript: String,
    pub admin_id: Option<String>,
    pub special_service_team: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct UploadDetail {
    pub id: Uuid,
    pub contact_id: String,
    pub evaluator: String,
    pub transcript: String,
    pub admin_id: Option<String>,
    pub special_service_team: bool,
    pub upload_timestamp: DateTime<Utc>,
}

/// Upload joined with the contact's conversation, for the upload listing.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct UploadOverview {
    pub contact_id: String,
    pub evaluator: String,
    pub upload_timestamp: Option<DateTime<Utc>>,
    pub transcript: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl UploadDetail {
    /// Insert every record in one transaction.
    ///
    /// All-or-nothing: the first failing insert rolls back the whole batch.
    pub async fn bulk_insert(records: &[NewUpload], conn: &mut PgConnection) -> Result<usize> {
        let mut tx = conn.begin().await?;
        let mut inserted = 0;

        for (index, record) in records.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO upload_details (contact_id, evaluator, transcript, admin_id, special_service_team)
                VALUES ($1, $2, $3, $4, $5)
                "#,
            )
            .bind(&record.contact_id)
            .bind(&record.evaluator)
            .bind(&record.transcript)
            .bind(&record.admin_id)
            .bind(record.special_service_team)
            .execute(&mut *tx)
            .await
            .with_context(|| {
                format!(
                    "Failed to insert upload record {} (contact {})",
                    index, record.contact_id
                )
            })?;
            inserted += 1;
        }

        tx.commit().await?;
        Ok(inserted)
    }

    pub async fn find_for_contact(contact_id: &str, conn: &mut PgConnection) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM upload_details WHERE contact_id = $1 ORDER BY upload_timestamp ASC",
        )
        .bind(contact_id)
        .fetch_all(conn)
        .await
        .map_err(Into::into)
    }
}

impl UploadOverview {
    pub async fn list(conn: &mut PgConnection) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            r#"
            SELECT
                ud.contact_id,
                ud.evaluator,
                ud.upload_timestamp,
                cc.transcript,
                cc.updated_at
            FROM upload_details ud
            LEFT JOIN contact_conversations cc ON ud.contact_id = cc.contact_id
            ORDER BY ud.upload_timestamp DESC
            "#,
        )
        .fetch_all(conn)
        .await
        .map_err(Into::into)
    }
}
