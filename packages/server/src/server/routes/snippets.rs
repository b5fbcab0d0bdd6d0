use axum::{extract::rejection::JsonRejection, extract::Extension, Json};
use serde::Deserialize;
use serde_json::Value;
use tracing::info;

use crate::domains::conversations::{filter_raw_snippets, Conversation};
use crate::server::app::AppState;
use crate::server::error::{require_field, ApiResult};

#[derive(Debug, Deserialize)]
pub struct SnippetsRequest {
    pub contact_id: Option<String>,
    #[serde(default)]
    pub snippet_ids: Option<Vec<String>>,
}

/// POST /api/snippets
///
/// Returns the contact's snippets as stored, narrowed to `snippet_ids` when given.
/// A contact without a conversation gets `[]`.
pub async fn snippets_handler(
    Extension(state): Extension<AppState>,
    payload: Result<Json<SnippetsRequest>, JsonRejection>,
) -> ApiResult<Json<Vec<Value>>> {
    let Json(request) = payload?;
    let contact_id = require_field(request.contact_id, "contact_id is required")?;

    let mut conn = state.db_pool.acquire().await?;
    let Some(conversation) = Conversation::find_by_contact_id(&contact_id, &mut conn).await? else {
        info!(contact_id = %contact_id, "No conversation for snippets request");
        return Ok(Json(Vec::new()));
    };

    let snippets = conversation.raw_snippets()?;
    let snippets = match request.snippet_ids {
        Some(ids) => filter_raw_snippets(snippets, &ids),
        None => snippets,
    };

    info!(contact_id = %contact_id, count = snippets.len(), "Returning snippets");
    Ok(Json(snippets))
}
