//! Application setup and router configuration.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Extension, Request},
    http::{
        header::{AUTHORIZATION, CONTENT_LENGTH, CONTENT_TYPE},
        Method, StatusCode,
    },
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
    Router,
};
use sqlx::PgPool;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::kernel::ServerDeps;
use crate::server::routes::{
    contact_assessment_handler, health_handler, list_feedback_handler, list_uploads_handler,
    save_assessment_details_handler, snippets_handler, upload_details_handler,
    upsert_feedback_handler,
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub deps: Arc<ServerDeps>,
}

impl AppState {
    pub fn new(db_pool: PgPool, deps: ServerDeps) -> Self {
        Self {
            db_pool,
            deps: Arc::new(deps),
        }
    }
}

/// Preflight requests get an empty 204 whatever the route.
///
/// Wraps the CORS layer, so the headers it sets on preflight answers are kept.
async fn preflight_no_content(request: Request, next: Next) -> Response {
    let is_preflight = request.method() == Method::OPTIONS;
    let response = next.run(request).await;

    if !is_preflight {
        return response;
    }

    let (mut parts, _) = response.into_parts();
    parts.status = StatusCode::NO_CONTENT;
    parts.headers.remove(CONTENT_TYPE);
    parts.headers.remove(CONTENT_LENGTH);
    Response::from_parts(parts, Body::empty())
}

/// Build the Axum application router
pub fn build_app(state: AppState) -> Router {
    // CORS configuration - any origin, as the browser front-end is hosted separately
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION]);

    Router::new()
        .route("/api/contact-assessment", post(contact_assessment_handler))
        .route("/api/snippets", post(snippets_handler))
        .route(
            "/api/qa-feedback",
            post(upsert_feedback_handler).get(list_feedback_handler),
        )
        .route(
            "/api/upload-details",
            post(upload_details_handler).get(list_uploads_handler),
        )
        .route(
            "/api/assessment-details",
            post(save_assessment_details_handler),
        )
        .route("/health", get(health_handler))
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(Extension(state))
        .layer(cors)
        .layer(middleware::from_fn(preflight_no_content))
        .layer(TraceLayer::new_for_http())
}
