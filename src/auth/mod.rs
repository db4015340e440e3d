// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Authentication Module
//!
//! OAuth2 resource-server authentication for Liferay client extensions.
//!
//! ## Auth Flow
//!
//! 1. A front end obtains a bearer JWT from the DXP instance
//! 2. The request arrives with `Authorization: Bearer <JWT>`
//! 3. This service:
//!    - Resolves the DXP signing key from the published JWKS (cached, TTL-bounded)
//!    - Verifies the JWT signature (RS256 only; expiration enforcement is
//!      configurable and off by default)
//!    - Checks the token's `client_id` claim against the OAuth application
//!      registered under the configured external reference code
//!    - Attaches the decoded claims to the request for downstream handlers
//!
//! ## Security
//!
//! - All API routes require authentication; only the ready path and the
//!   Swagger UI under `/docs` (plus its OpenAPI document) are exempt
//! - Rejection bodies are fixed strings; diagnostic detail is logged only
//! - The JWKS cache is invalidated on signature failure so key rotation
//!   takes effect on the next request

pub mod claims;
pub mod error;
pub mod jwks;
pub mod middleware;
pub mod verifier;

pub use claims::TokenClaims;
pub use error::AuthError;
pub use jwks::JwksCache;
