/// Health check endpoint
///
/// The only public route. Reports whether the process is up and whether the
/// database answers, so a load balancer can tell "down" from "up but
/// degraded".
///
/// # Endpoint
///
/// ```text
/// GET /health
/// ```

use crate::{app::AppState, error::ApiResult};
use axum::{extract::State, Json};
use careerpath_shared::db::pool::health_check;
use serde::{Deserialize, Serialize};

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// "healthy" or "degraded"
    pub status: String,

    /// Application version
    pub version: String,

    /// "connected" or "disconnected"
    pub database: String,
}

/// Health check handler
///
/// A database failure degrades the response but never fails the request;
/// the endpoint itself answering 200 is the liveness signal.
pub async fn health_check_handler(State(state): State<AppState>) -> ApiResult<Json<HealthResponse>> {
    let database_ok = health_check(&state.db).await.is_ok();

    let (status, database) = if database_ok {
        ("healthy", "connected")
    } else {
        ("degraded", "disconnected")
    };

    Ok(Json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: database.to_string(),
    }))
}
