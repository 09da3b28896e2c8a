//! Route definitions for the dashboard API

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;

/// Creates the main application router with all routes and middleware
pub fn create_router(state: Arc<AppState>) -> Router {
    // Allow all origins; the dashboard frontend is served separately
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // KPI endpoints
        .route("/kpis", get(handlers::get_kpis))
        .route("/kpis/growth", get(handlers::get_growth))
        .route("/summary", get(handlers::get_summary))
        // Filtered dataset views
        .route("/activity", get(handlers::get_activity))
        .route("/feedback", get(handlers::get_feedback))
        .route("/features", get(handlers::get_features))
        // Tabular export
        .route("/export/:dataset", get(handlers::export_dataset))
        // Add middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        // Add shared state
        .with_state(state)
}
