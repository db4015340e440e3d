// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! User endpoints.

use axum::{extract::State, Extension, Json};
use serde_json::Value;
use tracing::error;

use crate::auth::TokenClaims;
use crate::error::ApiError;
use crate::platform::PlatformError;
use crate::state::AppState;

/// End-user identity claim consumed by [`user_details`].
///
/// Contract: user-agent tokens issued by DXP carry the end user's email in
/// `username`. Client-credentials tokens do not carry it, in which case the
/// lookup legitimately reports not-found. The middleware attaches the full
/// claims object; this handler alone decides which claim it reads.
const IDENTITY_CLAIM: &str = "username";

/// Fetch the authenticated user's DXP account.
///
/// Requires the auth middleware: claims must already be attached to the
/// request.
#[utoipa::path(
    get,
    path = "/user-details",
    tag = "Users",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "User account", body = Object),
        (status = 401, description = "Unauthorized - invalid or missing token"),
        (status = 404, description = "No user account for the token's identity"),
        (status = 500, description = "DXP lookup failed"),
    )
)]
pub async fn user_details(
    State(state): State<AppState>,
    Extension(claims): Extension<TokenClaims>,
) -> Result<Json<Value>, ApiError> {
    let Some(email) = claims.claim_str(IDENTITY_CLAIM) else {
        return Err(ApiError::not_found("User not found"));
    };

    match state.platform.user_account_by_email(email).await {
        Ok(user) => Ok(Json(user)),
        Err(PlatformError::NotFound(detail)) => {
            error!(error = %detail, "user account lookup matched nothing");
            Err(ApiError::not_found("User not found"))
        }
        Err(err) => {
            error!(error = %err, "error fetching user account");
            Err(ApiError::internal("Unable to retrieve user"))
        }
    }
}
