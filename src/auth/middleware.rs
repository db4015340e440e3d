// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authentication middleware for Axum.
//!
//! Apply with `axum::middleware::from_fn_with_state(state, require_jwt)`.
//! The pipeline per request is strictly ordered: resolve the signing key,
//! verify the signature, then check the asserted client identity. On
//! success the decoded [`TokenClaims`] are inserted into the request
//! extensions for downstream handlers.

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::{error, warn};

use super::claims::TokenClaims;
use super::error::AuthError;
use super::verifier::verify_token;
use crate::state::AppState;

/// Outcome of the authentication pipeline. Every rejection path is a value,
/// not a thrown short-circuit, so each one is enumerable and testable.
pub enum AuthOutcome {
    Authenticated(TokenClaims),
    Rejected(AuthError),
}

/// Require a verified bearer token on every path except the ready path.
pub async fn require_jwt(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    if request.uri().path() == state.config.ready_path {
        return next.run(request).await;
    }

    match authenticate(&state, request.headers()).await {
        AuthOutcome::Authenticated(claims) => {
            request.extensions_mut().insert(claims);
            next.run(request).await
        }
        AuthOutcome::Rejected(err) => err.into_response(),
    }
}

/// Run the authentication pipeline against a request's headers.
pub async fn authenticate(state: &AppState, headers: &HeaderMap) -> AuthOutcome {
    let Some(authorization) = headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok()) else {
        return AuthOutcome::Rejected(AuthError::MissingAuthHeader);
    };

    // A header without the Bearer scheme yields an empty token; it fails
    // signature verification downstream rather than being rejected here.
    let token = authorization.strip_prefix("Bearer ").unwrap_or("").trim();

    match verify_pipeline(state, token).await {
        Ok(claims) => AuthOutcome::Authenticated(claims),
        Err(err) => {
            match &err {
                AuthError::ClientIdMismatch => {
                    warn!("JWT client_id value does not match expected client_id value");
                }
                other => {
                    error!(error = %other, "error validating JWT");
                }
            }
            AuthOutcome::Rejected(err)
        }
    }
}

async fn verify_pipeline(state: &AppState, token: &str) -> Result<TokenClaims, AuthError> {
    // Key resolution, then signature, then client identity. Later steps
    // depend on earlier results; no reordering.
    let key = state.jwks.decoding_key().await?;

    let claims = match verify_token(token, &key, state.config.enforce_expiration) {
        Ok(claims) => claims,
        Err(err) => {
            // The cached key may have been rotated out from under us.
            state.jwks.invalidate().await;
            return Err(err);
        }
    };

    let application = state
        .platform
        .application_metadata()
        .await
        .map_err(|e| AuthError::ApplicationLookup(e.to_string()))?;

    if claims.client_id != application.client_id {
        return Err(AuthError::ClientIdMismatch);
    }

    Ok(claims)
}
