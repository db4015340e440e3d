// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::state::AppState;

/// Readiness response with individual component status.
#[derive(Debug, Serialize, ToSchema)]
pub struct ReadyResponse {
    /// Overall status, always "ok" once the process is serving.
    pub status: String,
    /// Individual component observations.
    pub checks: HealthChecks,
}

/// Individual health check results.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthChecks {
    /// Whether the service process is running.
    pub service: String,
    /// JWKS cache state: "ok" when a fresh document is cached, "cold"
    /// before the first authenticated request (not a failure; keys are
    /// fetched on demand).
    pub jwks: String,
}

/// Readiness probe handler.
///
/// This path bypasses both the CORS gate and the auth middleware.
#[utoipa::path(
    get,
    path = "/ready",
    tag = "Health",
    responses(
        (status = 200, description = "Service is ready", body = ReadyResponse)
    )
)]
pub async fn ready(State(state): State<AppState>) -> Json<ReadyResponse> {
    let jwks = if state.jwks.is_cached().await {
        "ok"
    } else {
        "cold"
    };

    Json(ReadyResponse {
        status: "ok".to_string(),
        checks: HealthChecks {
            service: "ok".to_string(),
            jwks: jwks.to_string(),
        },
    })
}
