//! Axum router — maps all URL paths to handlers.

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{
    services::ServeDir,
    cors::CorsLayer,
    trace::TraceLayer,
    compression::CompressionLayer,
};

use crate::state::{AppState, SharedState};
use crate::handlers::{
    system::{health, contact},
    params::default_params,
    calculate::calculate,
    demo::demo,
    ai_estimate::ai_estimate,
};

/// Build and return the full Axum router.
pub fn build_router(state: AppState) -> Router {
    let static_dir = state.static_dir.clone();
    let shared: SharedState = Arc::new(state);

    Router::new()
        .route("/api/health",         get(health))
        .route("/api/params/default", get(default_params))
        .route("/api/calculate",      post(calculate))
        .route("/api/demo",           get(demo))
        .route("/api/demo/cardib",    get(demo))
        .route("/api/ai/estimate",    post(ai_estimate))
        .route("/api/contact",        post(contact))

        // Static files
        .nest_service("/static", ServeDir::new(static_dir))

        // Middleware
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(shared)
}
