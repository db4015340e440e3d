// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! JWKS (JSON Web Key Set) fetching and caching.
//!
//! The DXP instance publishes one signing key set; this service verifies
//! against the first key in it. The document is cached with a configurable
//! TTL so steady-state requests do not pay a network round trip, and the
//! auth middleware invalidates the cache whenever signature verification
//! fails, so a rotated key is picked up on the next request.

use std::sync::Arc;
use std::time::{Duration, Instant};

use jsonwebtoken::jwk::{AlgorithmParameters, JwkSet};
use jsonwebtoken::DecodingKey;
use tokio::sync::RwLock;
use url::Url;

use super::error::AuthError;

struct CacheEntry {
    jwks: JwkSet,
    fetched_at: Instant,
}

/// TTL-cached JWKS source for one JWKS URI.
#[derive(Clone)]
pub struct JwksCache {
    jwks_url: Url,
    cache_ttl: Duration,
    cache: Arc<RwLock<Option<CacheEntry>>>,
    http: reqwest::Client,
}

impl JwksCache {
    pub fn new(jwks_url: Url, cache_ttl: Duration, http: reqwest::Client) -> Self {
        Self {
            jwks_url,
            cache_ttl,
            cache: Arc::new(RwLock::new(None)),
            http,
        }
    }

    /// Resolve the current verification key.
    ///
    /// Serves from cache while the entry is fresh, otherwise fetches the
    /// JWKS document and converts its first key.
    pub async fn decoding_key(&self) -> Result<DecodingKey, AuthError> {
        let jwks = self.get_jwks().await?;
        first_signing_key(&jwks)
    }

    /// Drop the cached document so the next request re-fetches.
    pub async fn invalidate(&self) {
        let mut cache = self.cache.write().await;
        *cache = None;
    }

    /// Whether a fresh JWKS document is currently cached.
    pub async fn is_cached(&self) -> bool {
        let cache = self.cache.read().await;
        match &*cache {
            Some(entry) => entry.fetched_at.elapsed() < self.cache_ttl,
            None => false,
        }
    }

    async fn get_jwks(&self) -> Result<JwkSet, AuthError> {
        {
            let cache = self.cache.read().await;
            if let Some(entry) = &*cache {
                if entry.fetched_at.elapsed() < self.cache_ttl {
                    return Ok(entry.jwks.clone());
                }
            }
        }

        let jwks = self.fetch_jwks().await?;

        {
            let mut cache = self.cache.write().await;
            *cache = Some(CacheEntry {
                jwks: jwks.clone(),
                fetched_at: Instant::now(),
            });
        }

        Ok(jwks)
    }

    async fn fetch_jwks(&self) -> Result<JwkSet, AuthError> {
        let response = self
            .http
            .get(self.jwks_url.clone())
            .send()
            .await
            .map_err(|e| AuthError::JwksFetch(e.to_string()))?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(AuthError::JwksFetch(format!(
                "{} {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("unknown")
            )));
        }

        response
            .json::<JwkSet>()
            .await
            .map_err(|e| AuthError::JwksFetch(e.to_string()))
    }
}

/// Convert the first key of the set into a verification key.
///
/// The pipeline is RS256-only, so anything other than an RSA first key is
/// treated the same as an empty set.
fn first_signing_key(jwks: &JwkSet) -> Result<DecodingKey, AuthError> {
    let jwk = jwks.keys.first().ok_or(AuthError::NoSigningKey)?;

    match &jwk.algorithm {
        AlgorithmParameters::RSA(rsa) => DecodingKey::from_rsa_components(&rsa.n, &rsa.e)
            .map_err(|e| AuthError::TokenVerification(format!("failed to build RSA key: {e}"))),
        _ => Err(AuthError::NoSigningKey),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cache_for(url: &str) -> JwksCache {
        JwksCache::new(
            Url::parse(url).unwrap(),
            Duration::from_secs(300),
            reqwest::Client::new(),
        )
    }

    #[tokio::test]
    async fn cache_initially_empty() {
        let cache = cache_for("https://dxp.example.com/o/oauth2/jwks");
        assert!(!cache.is_cached().await);
    }

    #[tokio::test]
    async fn invalidate_on_empty_cache_is_a_noop() {
        let cache = cache_for("https://dxp.example.com/o/oauth2/jwks");
        cache.invalidate().await;
        assert!(!cache.is_cached().await);
    }

    #[test]
    fn empty_key_set_is_a_resolution_failure() {
        let jwks: JwkSet = serde_json::from_str(r#"{"keys":[]}"#).unwrap();
        assert!(matches!(
            first_signing_key(&jwks),
            Err(AuthError::NoSigningKey)
        ));
    }

    #[test]
    fn first_rsa_key_converts() {
        let jwks: JwkSet = serde_json::from_str(include_str!("../../tests/fixtures/jwks.json"))
            .unwrap();
        assert!(first_signing_key(&jwks).is_ok());
    }

    #[test]
    fn non_rsa_first_key_is_rejected() {
        let jwks: JwkSet = serde_json::from_str(
            r#"{"keys":[{"kty":"EC","crv":"P-256","alg":"ES256",
                "x":"f83OJ3D2xF1Bg8vub9tLe1gHMzV76e8Tus9uPHvRVEU",
                "y":"x_FEzRu9m36HLN_tue659LNpXW6pCyStikYjKIWI5a0"}]}"#,
        )
        .unwrap();
        assert!(matches!(
            first_signing_key(&jwks),
            Err(AuthError::NoSigningKey)
        ));
    }
}
