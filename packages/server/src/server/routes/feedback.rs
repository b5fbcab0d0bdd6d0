use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    extract::{Extension, Query},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domains::feedback::{FeedbackInput, QualityAssessorFeedback};
use crate::server::app::AppState;
use crate::server::error::{require_field, ApiError, ApiResult};

#[derive(Debug, Deserialize)]
pub struct FeedbackRequest {
    pub contact_id: Option<String>,
    pub evaluator: Option<String>,
    pub complaints_flag: Option<bool>,
    pub vulnerability_flag: Option<bool>,
    pub complaints_reasoning: Option<String>,
    pub vulnerability_reasoning: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct FeedbackResponse {
    pub data: QualityAssessorFeedback,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct FeedbackQuery {
    pub contact_id: Option<String>,
}

/// POST /api/qa-feedback
pub async fn upsert_feedback_handler(
    Extension(state): Extension<AppState>,
    payload: Result<Json<FeedbackRequest>, JsonRejection>,
) -> ApiResult<Json<FeedbackResponse>> {
    let Json(request) = payload?;
    let contact_id = require_field(request.contact_id, "contact_id is required")?;
    let evaluator = require_field(request.evaluator, "evaluator is required")?;

    let input = FeedbackInput {
        complaints_flag: request.complaints_flag.unwrap_or_default(),
        vulnerability_flag: request.vulnerability_flag.unwrap_or_default(),
        complaints_reasoning: request.complaints_reasoning.unwrap_or_default(),
        vulnerability_reasoning: request.vulnerability_reasoning.unwrap_or_default(),
    };

    let mut conn = state.db_pool.acquire().await?;
    let data = QualityAssessorFeedback::upsert(&contact_id, &evaluator, &input, &mut conn).await?;

    info!(contact_id = %contact_id, evaluator = %evaluator, "Feedback saved");

    Ok(Json(FeedbackResponse {
        data,
        message: "Quality assessor feedback upserted successfully".to_string(),
    }))
}

/// GET /api/qa-feedback?contact_id=...
pub async fn list_feedback_handler(
    Extension(state): Extension<AppState>,
    query: Result<Query<FeedbackQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<QualityAssessorFeedback>>> {
    let Query(query) = query.map_err(|e| ApiError::Validation(e.body_text()))?;
    let contact_id = require_field(query.contact_id, "contact_id is required")?;

    let mut conn = state.db_pool.acquire().await?;
    let rows = QualityAssessorFeedback::find_for_contact(&contact_id, &mut conn).await?;

    Ok(Json(rows))
}
