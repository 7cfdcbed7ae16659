//! Health check handlers

use axum::{extract::State, Json};
use serde::Serialize;
use shared::Lifecycle;

use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub environment: String,
    pub lifecycle: Lifecycle,
}

/// Health check endpoint handler
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let inventory = state.inventory.lock().await;

    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        environment: state.config.environment.clone(),
        lifecycle: inventory.lifecycle(),
    })
}
