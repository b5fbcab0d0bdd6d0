use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use sqlx::{Connection, PgConnection};

use super::complaints::{ComplaintsAssessment, ComplaintsResult};
use super::vulnerability::{VulnerabilityAssessment, VulnerabilityResult};

/// Both stored rows for a contact, shaped as the assessment response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredAssessment {
    pub complaints: ComplaintsAssessment,
    pub vulnerability: VulnerabilityAssessment,
}

/// Upsert both assessment rows for a contact in one transaction.
///
/// Either both rows are committed or neither is. Concurrent runs for the same
/// contact are not serialized: the last commit wins.
pub async fn store_assessment_results(
    contact_id: &str,
    complaints: &ComplaintsResult,
    vulnerability: &VulnerabilityResult,
    conn: &mut PgConnection,
) -> Result<StoredAssessment> {
    tracing::info!(contact_id = %contact_id, "Storing assessment results");

    let mut tx = conn.begin().await?;

    let complaints = ComplaintsAssessment::upsert(contact_id, complaints, &mut *tx)
        .await
        .context("Failed to upsert complaints assessment")?;

    let vulnerability = VulnerabilityAssessment::upsert(contact_id, vulnerability, &mut *tx)
        .await
        .context("Failed to upsert vulnerability assessment")?;

    tx.commit().await?;

    Ok(StoredAssessment {
        complaints,
        vulnerability,
    })
}

/// Read back both rows; `None` unless the contact has been assessed.
pub async fn find_stored_assessment(
    contact_id: &str,
    conn: &mut PgConnection,
) -> Result<Option<StoredAssessment>> {
    let complaints = ComplaintsAssessment::find_by_contact_id(contact_id, conn).await?;
    let vulnerability = VulnerabilityAssessment::find_by_contact_id(contact_id, conn).await?;

    Ok(match (complaints, vulnerability) {
        (Some(complaints), Some(vulnerability)) => Some(StoredAssessment {
            complaints,
            vulnerability,
        }),
        _ => None,
    })
}
