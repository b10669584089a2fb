//! Health check handler

use std::sync::Arc;

use axum::extract::State;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::api::response::ApiResponse;
use crate::AppState;

/// Liveness report
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthStatus {
    /// Always `ok` while the process serves requests
    pub status: String,
    /// Configured storage backend
    pub storage: String,
    /// Crate version
    pub version: String,
}

/// Report process liveness and the storage backend in use
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is up", body = HealthStatus)
    ),
    tag = "health"
)]
pub async fn health(State(state): State<Arc<AppState>>) -> ApiResponse<HealthStatus> {
    ApiResponse::new(HealthStatus {
        status: "ok".to_string(),
        storage: state.account_service.storage().to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
