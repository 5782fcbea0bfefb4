//! Axum router: maps all URL paths to handlers.

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{
    cors::CorsLayer,
    trace::TraceLayer,
    compression::CompressionLayer,
};
use std::sync::Arc;
use crate::state::{AppState, SharedState};
use crate::handlers::{
    api::{api_profiles, api_rank},
    diagnose::{diagnose_submit, form_page},
    health::health,
    report::report_download,
};

/// Build and return the full Axum router.
pub fn build_router(state: AppState) -> Router {
    let shared: SharedState = Arc::new(state);

    Router::new()
        // Pages
        .route("/",         get(form_page))
        .route("/diagnose", post(diagnose_submit))
        .route("/report",   post(report_download))

        // API endpoints
        .route("/api/rank",     post(api_rank))
        .route("/api/profiles", get(api_profiles))
        .route("/health",       get(health))

        // Middleware
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(shared)
}
