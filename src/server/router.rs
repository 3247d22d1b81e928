//! Router builder utilities for record routes

use super::handlers::{AppState, create_record, get_record, health_check, list_records};
use axum::{Router, routing::get};

/// Build record routes
///
/// - GET /api/records - Filtered records with totals
/// - POST /api/records - Validate and store a record
/// - GET /api/records/{id} - Get a specific record
pub fn build_record_routes(state: AppState) -> Router {
    Router::new()
        .route("/api/records", get(list_records).post(create_record))
        .route("/api/records/{id}", get(get_record))
        .with_state(state)
}

/// Build health check routes
pub fn build_health_routes() -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/healthz", get(health_check))
}
