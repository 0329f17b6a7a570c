//! Admin Handlers
//!
//! Health check endpoint.

use std::sync::Arc;

use axum::{Extension, Json};

use crate::rest::dto::{ApiResponse, HealthDto};
use crate::rest::AppState;

/// Health check endpoint
pub async fn health(Extension(state): Extension<Arc<AppState>>) -> Json<ApiResponse<HealthDto>> {
    let health = HealthDto {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.uptime_seconds(),
    };

    Json(ApiResponse::success(health))
}
