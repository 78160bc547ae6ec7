//! Router assembly
//!
//! Shared by the binary and the integration tests.

use std::time::Instant;

use axum::{
    extract::Request,
    middleware::Next,
    response::Response,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

use crate::api;
use crate::state::SharedState;

/// Request ID middleware - adds unique ID to each request for tracing
async fn request_id_middleware(request: Request, next: Next) -> Response {
    let request_id = Uuid::new_v4().to_string();
    let method = request.method().clone();
    let uri = request.uri().clone();
    let start = Instant::now();

    let span = info_span!(
        "request",
        request_id = %request_id,
        method = %method,
        uri = %uri,
    );

    let response = next.run(request).instrument(span).await;

    let duration = start.elapsed();
    info!(
        request_id = %request_id,
        method = %method,
        uri = %uri,
        status = %response.status().as_u16(),
        duration_ms = duration.as_millis(),
        "Request completed"
    );

    response
}

/// Build the application router
///
/// API routes are matched first; everything else falls through to the
/// static UI bundle.
pub fn router(state: SharedState) -> Router {
    let static_files = api::webui::static_files(&state.config.web.static_dir);

    Router::new()
        .route("/api", get(api::health::api_status))
        .route("/api/health", get(api::health::health_check))
        .route("/api/chat", post(api::chat::chat))
        .route("/api/debug/prompt", post(api::debug::prompt_preview))
        .fallback_service(static_files)
        // Middleware (order matters - request_id should be first)
        .layer(axum::middleware::from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    uri = %request.uri(),
                )
            }),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}
