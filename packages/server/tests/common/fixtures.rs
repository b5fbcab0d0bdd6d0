//! Test fixtures for creating test data.

use anyhow::Result;
use axum::body::Body;
use axum::http::{header::CONTENT_TYPE, Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

/// Contact id that no other test will reuse.
pub fn unique_contact_id(prefix: &str) -> String {
    format!("{}-{}", prefix, Uuid::new_v4())
}

/// Insert a conversation with JSONB snippets metadata.
pub async fn create_conversation(
    pool: &PgPool,
    contact_id: &str,
    transcript: Option<&str>,
    snippets: Value,
) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO contact_conversations (contact_id, transcript, snippets_metadata)
        VALUES ($1, $2, $3)
        "#,
    )
    .bind(contact_id)
    .bind(transcript)
    .bind(snippets)
    .execute(pool)
    .await?;
    Ok(())
}

/// Snippet array `[{"id": "s1", "text": "..."}, ...]` for the given ids.
pub fn snippets_json(ids: &[&str]) -> Value {
    Value::Array(
        ids.iter()
            .map(|id| serde_json::json!({ "id": id, "text": format!("excerpt {}", id) }))
            .collect(),
    )
}

pub async fn count_rows(pool: &PgPool, table: &str, contact_id: &str) -> Result<i64> {
    let count: (i64,) = sqlx::query_as(&format!(
        "SELECT COUNT(*) FROM {} WHERE contact_id = $1",
        table
    ))
    .bind(contact_id)
    .fetch_one(pool)
    .await?;
    Ok(count.0)
}

/// Send a request through the router and decode the JSON body (Null if empty).
pub async fn send(
    app: Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let request = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => request
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => request.body(Body::empty()),
    }
    .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::GET, uri, None).await
}
