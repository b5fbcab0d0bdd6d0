use axum::{extract::rejection::JsonRejection, extract::Extension, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domains::uploads::{NewUpload, UploadDetail, UploadOverview};
use crate::server::app::AppState;
use crate::server::error::{require_field, ApiError, ApiResult};

#[derive(Debug, Deserialize)]
pub struct UploadRecord {
    pub contact_id: Option<String>,
    pub evaluator: Option<String>,
    #[serde(default)]
    pub transcript: Option<String>,
    #[serde(default)]
    pub admin_id: Option<String>,
    #[serde(default)]
    pub special_service_team: bool,
}

impl UploadRecord {
    fn validate(self, index: usize) -> Result<NewUpload, ApiError> {
        let contact_id = require_field(
            self.contact_id,
            &format!("data[{}].contact_id is required", index),
        )?;
        let evaluator = require_field(
            self.evaluator,
            &format!("data[{}].evaluator is required", index),
        )?;

        Ok(NewUpload {
            contact_id,
            evaluator,
            transcript: self.transcript.unwrap_or_default(),
            admin_id: self.admin_id,
            special_service_team: self.special_service_team,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct UploadDetailsRequest {
    pub data: Option<Vec<UploadRecord>>,
}

#[derive(Debug, Serialize)]
pub struct UploadDetailsResponse {
    pub success: bool,
    pub inserted: usize,
}

/// POST /api/upload-details
///
/// Every record is validated before anything is written, then the batch is
/// inserted in one transaction.
pub async fn upload_details_handler(
    Extension(state): Extension<AppState>,
    payload: Result<Json<UploadDetailsRequest>, JsonRejection>,
) -> ApiResult<Json<UploadDetailsResponse>> {
    let Json(request) = payload?;
    let records = request
        .data
        .ok_or_else(|| ApiError::Validation("data is required".to_string()))?;

    let uploads = records
        .into_iter()
        .enumerate()
        .map(|(index, record)| record.validate(index))
        .collect::<Result<Vec<_>, _>>()?;

    let mut conn = state.db_pool.acquire().await?;
    let inserted = UploadDetail::bulk_insert(&uploads, &mut conn).await?;

    info!(inserted, "Upload details stored");

    Ok(Json(UploadDetailsResponse {
        success: true,
        inserted,
    }))
}

/// GET /api/upload-details
pub async fn list_uploads_handler(
    Extension(state): Extension<AppState>,
) -> ApiResult<Json<Vec<UploadOverview>>> {
    let mut conn = state.db_pool.acquire().await?;
    let rows = UploadOverview::list(&mut conn).await?;

    Ok(Json(rows))
}
