//! HTTP-level tests for the assessment and snippets endpoints.

mod common;

use std::collections::HashSet;
use std::sync::Arc;

use assessment_core::kernel::{AssessmentTopic, Classification, MockClassifier};
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use common::{
    count_rows, create_conversation, get_json, post_json, snippets_json, unique_contact_id,
    TestHarness,
};
use serde_json::{json, Value};
use test_context::test_context;
use tower::ServiceExt;

fn string_ids(value: &Value) -> Vec<String> {
    value
        .as_array()
        .expect("expected an array")
        .iter()
        .map(|v| v.as_str().expect("expected a string id").to_string())
        .collect()
}

#[test_context(TestHarness)]
#[tokio::test]
async fn assessment_returns_three_ids_from_the_conversation(ctx: &TestHarness) {
    let contact_id = unique_contact_id("c1");
    create_conversation(
        &ctx.db_pool,
        &contact_id,
        Some("I want to cancel"),
        snippets_json(&["s1", "s2", "s3", "s4"]),
    )
    .await
    .unwrap();

    let (status, body) = post_json(
        ctx.app(),
        "/api/contact-assessment",
        json!({ "contact_id": contact_id }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let allowed: HashSet<&str> = ["s1", "s2", "s3", "s4"].into_iter().collect();

    for key in ["complaints", "vulnerability"] {
        let row = &body[key];
        assert_eq!(row["contact_id"], json!(contact_id));
        assert!(row["id"].is_string());
        assert!(row["created_at"].is_string());
        assert!(row["updated_at"].is_string());

        let ids = string_ids(&row["relevant_snippet_ids"]);
        assert_eq!(ids.len(), 3, "{} should carry three ids", key);
        assert_eq!(ids.iter().collect::<HashSet<_>>().len(), 3);
        assert!(ids.iter().all(|id| allowed.contains(id.as_str())));
    }

    assert_eq!(body["complaints"]["complaints_flag"], json!(false));
    assert_eq!(body["vulnerability"]["vulnerability_flag"], json!(false));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn classifier_verdicts_are_persisted(ctx: &TestHarness) {
    let contact_id = unique_contact_id("flagged");
    create_conversation(
        &ctx.db_pool,
        &contact_id,
        Some("My husband passed and I can't pay the fee you charged twice"),
        snippets_json(&["s1"]),
    )
    .await
    .unwrap();

    let classifier = MockClassifier::new()
        .with_answer(
            AssessmentTopic::Complaints,
            Classification::new(true, "Customer disputes a double charge"),
        )
        .with_answer(
            AssessmentTopic::Vulnerability,
            Classification::new(true, "Recent bereavement"),
        );

    let (status, body) = post_json(
        ctx.app_with_classifier(Arc::new(classifier)),
        "/api/contact-assessment",
        json!({ "contact_id": contact_id }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["complaints"]["complaints_flag"], json!(true));
    assert_eq!(
        body["complaints"]["complaints_reasoning"],
        json!("Customer disputes a double charge")
    );
    assert_eq!(body["complaints"]["physical_disability_flag"], json!(false));
    assert_eq!(body["vulnerability"]["vulnerability_flag"], json!(true));
    assert_eq!(body["complaints"]["relevant_snippet_ids"], json!(["s1"]));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn missing_conversation_is_404_and_writes_nothing(ctx: &TestHarness) {
    let contact_id = unique_contact_id("missing");
    let classifier = Arc::new(MockClassifier::new());

    let (status, body) = post_json(
        ctx.app_with_classifier(classifier.clone()),
        "/api/contact-assessment",
        json!({ "contact_id": contact_id }),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body["error"],
        json!(format!("No conversation found for contact {}", contact_id))
    );
    assert!(classifier.calls().is_empty());
    assert_eq!(count_rows(&ctx.db_pool, "ai_assess_complaints", &contact_id).await.unwrap(), 0);
    assert_eq!(count_rows(&ctx.db_pool, "ai_assess_vulnerability", &contact_id).await.unwrap(), 0);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn null_transcript_is_still_assessed(ctx: &TestHarness) {
    let contact_id = unique_contact_id("no-transcript");
    create_conversation(&ctx.db_pool, &contact_id, None, Value::Null)
        .await
        .unwrap();
    let classifier = Arc::new(MockClassifier::new());

    let (status, body) = post_json(
        ctx.app_with_classifier(classifier.clone()),
        "/api/contact-assessment",
        json!({ "contact_id": contact_id }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["complaints"]["relevant_snippet_ids"], json!([]));
    assert_eq!(body["vulnerability"]["relevant_snippet_ids"], json!([]));
    assert!(classifier.calls().iter().all(|(_, transcript)| transcript.is_none()));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn classifier_failure_is_500_and_writes_nothing(ctx: &TestHarness) {
    let contact_id = unique_contact_id("upstream");
    create_conversation(&ctx.db_pool, &contact_id, Some("hello"), snippets_json(&["s1"]))
        .await
        .unwrap();

    let (status, body) = post_json(
        ctx.app_with_classifier(Arc::new(MockClassifier::failing("model overloaded"))),
        "/api/contact-assessment",
        json!({ "contact_id": contact_id }),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("model overloaded"));
    assert_eq!(count_rows(&ctx.db_pool, "ai_assess_complaints", &contact_id).await.unwrap(), 0);
    assert_eq!(count_rows(&ctx.db_pool, "ai_assess_vulnerability", &contact_id).await.unwrap(), 0);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn missing_contact_id_is_400(ctx: &TestHarness) {
    let (status, body) = post_json(ctx.app(), "/api/contact-assessment", json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], json!("contact_id is required"));

    let (status, _) = post_json(
        ctx.app(),
        "/api/contact-assessment",
        json!({ "contact_id": "   " }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn malformed_body_gets_error_envelope(ctx: &TestHarness) {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/contact-assessment")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = ctx.app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert!(body["error"].is_string());
}

#[test_context(TestHarness)]
#[tokio::test]
async fn preflight_is_204_with_cors_headers(ctx: &TestHarness) {
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/contact-assessment")
        .header("origin", "https://review.example.com")
        .header("access-control-request-method", "POST")
        .header("access-control-request-headers", "content-type")
        .body(Body::empty())
        .unwrap();

    let response = ctx.app().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert_eq!(
        response.headers().get("access-control-allow-origin").unwrap(),
        "*"
    );
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert!(bytes.is_empty());
}

#[test_context(TestHarness)]
#[tokio::test]
async fn responses_carry_cors_origin(ctx: &TestHarness) {
    let request = Request::builder()
        .method(Method::GET)
        .uri("/health")
        .header("origin", "https://review.example.com")
        .body(Body::empty())
        .unwrap();

    let response = ctx.app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("access-control-allow-origin").unwrap(),
        "*"
    );
}

#[test_context(TestHarness)]
#[tokio::test]
async fn health_reports_database_ok(ctx: &TestHarness) {
    let (status, body) = get_json(ctx.app(), "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], json!("healthy"));
    assert_eq!(body["database"]["status"], json!("ok"));
    assert_eq!(body["classifier"], json!("mock"));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn snippets_filtered_by_ids(ctx: &TestHarness) {
    let contact_id = unique_contact_id("snippets");
    create_conversation(
        &ctx.db_pool,
        &contact_id,
        Some("text"),
        snippets_json(&["s1", "s2", "s3"]),
    )
    .await
    .unwrap();

    let (status, body) = post_json(
        ctx.app(),
        "/api/snippets",
        json!({ "contact_id": contact_id, "snippet_ids": ["s3", "s1", "nope"] }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let ids: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["s1", "s3"]);
    assert_eq!(body[0]["text"], json!("excerpt s1"));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn snippets_without_filter_return_everything(ctx: &TestHarness) {
    let contact_id = unique_contact_id("snippets-all");
    create_conversation(&ctx.db_pool, &contact_id, None, snippets_json(&["a", "b"]))
        .await
        .unwrap();

    let (status, body) = post_json(ctx.app(), "/api/snippets", json!({ "contact_id": contact_id })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn snippets_for_unknown_contact_are_empty(ctx: &TestHarness) {
    let (status, body) = post_json(
        ctx.app(),
        "/api/snippets",
        json!({ "contact_id": unique_contact_id("nobody") }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn snippets_are_returned_as_stored(ctx: &TestHarness) {
    let contact_id = unique_contact_id("snippets-raw");
    let stored = json!([
        { "id": 7, "text": "a" },
        { "id": true, "text": "b" },
        "stray",
        { "id": "s1" }
    ]);
    create_conversation(&ctx.db_pool, &contact_id, Some("text"), stored.clone())
        .await
        .unwrap();

    let (status, body) = post_json(ctx.app(), "/api/snippets", json!({ "contact_id": contact_id })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, stored);

    let (status, body) = post_json(
        ctx.app(),
        "/api/snippets",
        json!({ "contact_id": contact_id, "snippet_ids": ["7", "s1"] }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([{ "id": 7, "text": "a" }, { "id": "s1" }]));
}
