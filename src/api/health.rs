// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Taskguard

use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::state::AppState;

/// Simple health check response for probes.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

/// Liveness probe handler.
///
/// Always returns 200 if the process is running. No auth: health endpoints
/// carry no user data.
#[utoipa::path(
    get,
    path = "/health/live",
    tag = "Health",
    responses((status = 200, description = "Service is alive", body = HealthResponse))
)]
pub async fn liveness() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// Readiness probe handler.
///
/// Confirms the store lock is acquirable before reporting ready.
#[utoipa::path(
    get,
    path = "/health/ready",
    tag = "Health",
    responses((status = 200, description = "Service is ready", body = HealthResponse))
)]
pub async fn readiness(State(state): State<AppState>) -> Json<HealthResponse> {
    let _store = state.store.read().await;
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::TokenVerifier;
    use crate::store::InMemoryTaskStore;

    #[tokio::test]
    async fn probes_report_ok() {
        let Json(live) = liveness().await;
        assert_eq!(live.status, "ok");

        let state = AppState::new(
            InMemoryTaskStore::new(),
            TokenVerifier::new(b"test-secret-key-of-32-bytes-min!"),
        );
        let Json(ready) = readiness(State(state)).await;
        assert_eq!(ready.status, "ok");
    }
}
