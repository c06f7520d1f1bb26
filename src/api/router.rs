//! HTTP router.
//!
//! Returns a composable `Router` that can be mounted on any axum server.
//! Routes are nested under `/api/`.

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;

use crate::api::endpoints;
use crate::api::types::ApiContext;
use crate::pipeline::processor::AnalysisPipeline;

/// Build the analysis API router.
pub fn api_router(pipeline: Arc<AnalysisPipeline>) -> Router {
    build_router(ApiContext::new(pipeline))
}

fn build_router(ctx: ApiContext) -> Router {
    // The gate enforces the real ceiling; this only stops absurd bodies early.
    let body_limit = ctx.body_limit();

    let routes = Router::new()
        .route("/health", get(endpoints::health::check))
        .route("/analyze", post(endpoints::analyze::analyze))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(ctx);

    Router::new().nest("/api", routes)
}
