//! Observability HTTP Routes
//!
//! Health check and counter snapshot.

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};

use crate::api::HealthResponse;
use crate::observability::{MetricsRegistry, MetricsSnapshot};

/// Create `/health` and `/metrics` routes
pub fn observability_routes(metrics: Arc<MetricsRegistry>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        .with_state(metrics)
}

/// Static reachability probe, checked by the admin client before any call
async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}

async fn metrics_handler(State(metrics): State<Arc<MetricsRegistry>>) -> Json<MetricsSnapshot> {
    Json(metrics.snapshot())
}
