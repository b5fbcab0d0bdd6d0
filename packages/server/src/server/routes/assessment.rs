use axum::{extract::rejection::JsonRejection, extract::Extension, Json};
use serde::Deserialize;
use tracing::info;

use crate::domains::assessments::{assess_contact, StoredAssessment};
use crate::server::app::AppState;
use crate::server::error::{require_field, ApiResult};

#[derive(Debug, Deserialize)]
pub struct ContactAssessmentRequest {
    pub contact_id: Option<String>,
}

/// POST /api/contact-assessment
///
/// Responds with both stored rows: `{ "complaints": {...}, "vulnerability": {...} }`.
pub async fn contact_assessment_handler(
    Extension(state): Extension<AppState>,
    payload: Result<Json<ContactAssessmentRequest>, JsonRejection>,
) -> ApiResult<Json<StoredAssessment>> {
    let Json(request) = payload?;
    let contact_id = require_field(request.contact_id, "contact_id is required")?;

    info!(contact_id = %contact_id, "Contact assessment requested");

    let mut conn = state.db_pool.acquire().await?;
    let stored = assess_contact(&contact_id, &state.deps, &mut conn).await?;

    Ok(Json(stored))
}
