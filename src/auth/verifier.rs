// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Bearer-token signature verification.

use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};

use super::claims::TokenClaims;
use super::error::AuthError;

/// Clock skew tolerance (60 seconds), applied when expiration is enforced.
const CLOCK_SKEW_LEEWAY: u64 = 60;

/// Verify a bearer token's signature and decode its claims.
///
/// The algorithm allow-list is RS256 only. Expiration is checked only when
/// `enforce_expiration` is set; the platform default leaves it off, so
/// expired tokens still decode. Audience and issuer are not validated at
/// this layer — asserted identity is checked separately against the
/// registered application's `client_id`.
pub fn verify_token(
    token: &str,
    key: &DecodingKey,
    enforce_expiration: bool,
) -> Result<TokenClaims, AuthError> {
    let mut validation = Validation::new(Algorithm::RS256);
    validation.validate_aud = false;
    validation.validate_exp = enforce_expiration;
    validation.leeway = CLOCK_SKEW_LEEWAY;
    if !enforce_expiration {
        // Validation::new requires an exp claim by default.
        validation.required_spec_claims.clear();
    }

    let data = decode::<TokenClaims>(token, key, &validation)
        .map_err(|e| AuthError::TokenVerification(e.to_string()))?;

    Ok(data.claims)
}
