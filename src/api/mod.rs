// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{middleware, routing::get, Router};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{auth, cors::cors_layer, state::AppState};

pub mod health;
pub mod users;

pub fn router(state: AppState) -> Router {
    let cors = cors_layer(&state.config);
    let ready_path = state.config.ready_path.clone();

    // The auth middleware bypasses the ready path itself; CORS is applied
    // outside it so preflight requests never hit authentication.
    let routes = Router::new()
        .route("/user-details", get(users::user_details))
        .route(&ready_path, get(health::ready))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::middleware::require_jwt,
        ))
        .with_state(state);

    Router::new()
        .merge(routes)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}

#[derive(OpenApi)]
#[openapi(
    paths(health::ready, users::user_details),
    components(schemas(health::ReadyResponse, health::HealthChecks)),
    tags(
        (name = "Health", description = "Readiness probe"),
        (name = "Users", description = "Authenticated user lookups against DXP")
    )
)]
struct ApiDoc;
