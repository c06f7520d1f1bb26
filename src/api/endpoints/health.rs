//! Health check endpoint.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::api::types::ApiContext;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub classifiers: Vec<String>,
    pub uploads_in_window: usize,
}

/// `GET /api/health` — liveness plus the loaded classifier set.
pub async fn check(State(ctx): State<ApiContext>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: crate::config::APP_VERSION,
        classifiers: ctx.pipeline.classifier_ids(),
        uploads_in_window: ctx.pipeline.gate().rate_limiter().in_window(),
    })
}
