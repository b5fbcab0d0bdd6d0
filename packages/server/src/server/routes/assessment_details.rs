use axum::{extract::rejection::JsonRejection, extract::Extension, Json};
use serde::Serialize;
use tracing::info;

use crate::domains::assessment_details::{AssessmentDetails, AssessmentDetailsInput};
use crate::server::app::AppState;
use crate::server::error::{require_field, ApiResult};

#[derive(Debug, Serialize)]
pub struct SaveAssessmentDetailsResponse {
    pub message: String,
}

/// POST /api/assessment-details
pub async fn save_assessment_details_handler(
    Extension(state): Extension<AppState>,
    payload: Result<Json<AssessmentDetailsInput>, JsonRejection>,
) -> ApiResult<Json<SaveAssessmentDetailsResponse>> {
    let Json(input) = payload?;
    let aws_ref_id = require_field(input.aws_ref_id.clone(), "awsRefId is required")?;

    let mut conn = state.db_pool.acquire().await?;
    AssessmentDetails::upsert(&aws_ref_id, &input, &mut conn).await?;

    info!(aws_ref_id = %aws_ref_id, "Assessment details saved");

    Ok(Json(SaveAssessmentDetailsResponse {
        message: "Assessment details saved/updated successfully.".to_string(),
    }))
}
