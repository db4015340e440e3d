// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authentication errors.
//!
//! The response bodies here are part of the wire contract with existing
//! clients: every authentication failure maps to a 401 with one of three
//! fixed plain-text bodies. Diagnostic detail never leaves the server; the
//! middleware logs it instead.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// Authentication failure reasons.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// No `Authorization` header on the request.
    #[error("no authorization header")]
    MissingAuthHeader,

    /// The JWKS endpoint returned a non-200 status, was unreachable, or
    /// produced a body that is not a key set.
    #[error("failed to fetch JWKS: {0}")]
    JwksFetch(String),

    /// The JWKS document contained no usable signing key.
    #[error("no signing key available in JWKS")]
    NoSigningKey,

    /// Signature, algorithm, or structural verification failed.
    #[error("token verification failed: {0}")]
    TokenVerification(String),

    /// The OAuth application metadata lookup failed.
    #[error("application metadata lookup failed: {0}")]
    ApplicationLookup(String),

    /// The token's `client_id` claim does not match the registered
    /// application's client id.
    #[error("token client_id does not match the registered application")]
    ClientIdMismatch,
}

impl AuthError {
    /// Fixed response body for this rejection.
    pub fn body(&self) -> &'static str {
        match self {
            AuthError::MissingAuthHeader => "No authorization header",
            AuthError::JwksFetch(_)
            | AuthError::NoSigningKey
            | AuthError::TokenVerification(_)
            | AuthError::ApplicationLookup(_) => "Invalid authorization header",
            AuthError::ClientIdMismatch => "Invalid authorization",
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        (StatusCode::UNAUTHORIZED, self.body()).into_response()
    }
}
