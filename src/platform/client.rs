// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! DXP platform REST client.
//!
//! Owns the service's own (client-credentials) identity: obtains admin
//! access tokens, caches them until shortly before expiry, and wraps every
//! outbound headless API call with standard JSON headers plus bearer
//! authorization.

use std::sync::Arc;
use std::time::{Duration, Instant};

use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Method;
use serde::Deserialize;
use serde_json::Value;
use tokio::sync::RwLock;
use url::Url;

use super::endpoints::Endpoints;

/// Leeway subtracted from `expires_in` when caching admin tokens.
const TOKEN_EXPIRY_LEEWAY: Duration = Duration::from_secs(30);

#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    /// Client-credentials grant rejected or unreachable.
    #[error("Failed to fetch admin token: {0}")]
    TokenGrant(String),

    /// Upstream call returned a non-success status.
    #[error("{method} {endpoint} returned {status}")]
    Request {
        method: Method,
        endpoint: String,
        status: reqwest::StatusCode,
    },

    /// Transport-level failure before a status was received.
    #[error("{method} {endpoint} failed: {source}")]
    Transport {
        method: Method,
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    /// Upstream body could not be parsed as expected.
    #[error("invalid response from {endpoint}: {reason}")]
    InvalidResponse { endpoint: String, reason: String },

    /// Lookup matched nothing.
    #[error("{0}")]
    NotFound(String),
}

/// Access token obtained via the client-credentials grant.
#[derive(Debug, Clone, Deserialize)]
pub struct AdminToken {
    pub token_type: String,
    pub access_token: String,
    #[serde(default)]
    pub expires_in: Option<u64>,
}

/// Registered OAuth application metadata, keyed by external reference code.
#[derive(Debug, Clone, Deserialize)]
pub struct ApplicationMetadata {
    pub client_id: String,
}

/// Parsed response of the generic invoker.
#[derive(Debug)]
pub enum Payload {
    Json(Value),
    Text(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseKind {
    Json,
    Text,
}

struct CachedToken {
    token: AdminToken,
    fetched_at: Instant,
    ttl: Duration,
}

impl CachedToken {
    fn is_fresh(&self) -> bool {
        self.fetched_at.elapsed() < self.ttl
    }
}

/// REST client for the DXP instance, authenticated as the service itself.
#[derive(Clone)]
pub struct PlatformClient {
    http: reqwest::Client,
    endpoints: Endpoints,
    fallback_token_ttl: Duration,
    // One admin client per process, so a single cache slot suffices.
    token_cache: Arc<RwLock<Option<CachedToken>>>,
}

impl PlatformClient {
    pub fn new(endpoints: Endpoints, http: reqwest::Client, fallback_token_ttl: Duration) -> Self {
        Self {
            http,
            endpoints,
            fallback_token_ttl,
            token_cache: Arc::new(RwLock::new(None)),
        }
    }

    /// Obtain an admin access token via the client-credentials grant.
    ///
    /// Tokens are cached until `expires_in` minus a leeway, or the
    /// configured fallback TTL when the grant response carries no lifetime.
    pub async fn admin_token(&self) -> Result<AdminToken, PlatformError> {
        {
            let cache = self.token_cache.read().await;
            if let Some(cached) = &*cache {
                if cached.is_fresh() {
                    return Ok(cached.token.clone());
                }
            }
        }

        let token = self.fetch_admin_token().await?;

        let ttl = token
            .expires_in
            .map(|secs| Duration::from_secs(secs).saturating_sub(TOKEN_EXPIRY_LEEWAY))
            .unwrap_or(self.fallback_token_ttl);

        {
            let mut cache = self.token_cache.write().await;
            *cache = Some(CachedToken {
                token: token.clone(),
                fetched_at: Instant::now(),
                ttl,
            });
        }

        Ok(token)
    }

    async fn fetch_admin_token(&self) -> Result<AdminToken, PlatformError> {
        let response = self
            .http
            .post(self.endpoints.token_url())
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .send()
            .await
            .map_err(|e| PlatformError::TokenGrant(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(PlatformError::TokenGrant(format!(
                "{} {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("unknown")
            )));
        }

        response
            .json::<AdminToken>()
            .await
            .map_err(|e| PlatformError::TokenGrant(format!("invalid token response: {e}")))
    }

    /// Fetch the registered OAuth application's metadata.
    ///
    /// This endpoint is public; no admin token is attached.
    pub async fn application_metadata(&self) -> Result<ApplicationMetadata, PlatformError> {
        let url = self.endpoints.application_url();
        let endpoint = url.path().to_string();

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|source| PlatformError::Transport {
                method: Method::GET,
                endpoint: endpoint.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(PlatformError::Request {
                method: Method::GET,
                endpoint,
                status,
            });
        }

        response
            .json::<ApplicationMetadata>()
            .await
            .map_err(|e| PlatformError::InvalidResponse {
                endpoint,
                reason: e.to_string(),
            })
    }

    /// Generic authenticated call against a DXP endpoint.
    ///
    /// A JSON body is attached only for POST and PUT. The response is
    /// parsed as JSON for GET requests or when `kind` is
    /// [`ResponseKind::Json`]; raw text otherwise.
    pub async fn request(
        &self,
        method: Method,
        url: Url,
        body: Option<&Value>,
        kind: ResponseKind,
    ) -> Result<Payload, PlatformError> {
        let token = self.admin_token().await?;
        let endpoint = url.path().to_string();

        let mut builder = self
            .http
            .request(method.clone(), url)
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json")
            .header(
                AUTHORIZATION,
                format!("{} {}", token.token_type, token.access_token),
            );

        if let Some(body) = body {
            if method == Method::POST || method == Method::PUT {
                builder = builder.json(body);
            }
        }

        let response = builder
            .send()
            .await
            .map_err(|source| PlatformError::Transport {
                method: method.clone(),
                endpoint: endpoint.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(PlatformError::Request {
                method,
                endpoint,
                status,
            });
        }

        if method == Method::GET || kind == ResponseKind::Json {
            let value =
                response
                    .json::<Value>()
                    .await
                    .map_err(|e| PlatformError::InvalidResponse {
                        endpoint,
                        reason: e.to_string(),
                    })?;
            Ok(Payload::Json(value))
        } else {
            let text = response
                .text()
                .await
                .map_err(|e| PlatformError::InvalidResponse {
                    endpoint,
                    reason: e.to_string(),
                })?;
            Ok(Payload::Text(text))
        }
    }

    /// Look up a user account by email address; first match wins.
    pub async fn user_account_by_email(&self, email: &str) -> Result<Value, PlatformError> {
        let url = self.endpoints.user_accounts_url(email);
        let endpoint = url.path().to_string();

        let payload = self
            .request(Method::GET, url, None, ResponseKind::Json)
            .await?;

        let Payload::Json(body) = payload else {
            return Err(PlatformError::InvalidResponse {
                endpoint,
                reason: "expected a JSON collection".to_string(),
            });
        };

        let items = body
            .get("items")
            .and_then(Value::as_array)
            .ok_or_else(|| PlatformError::InvalidResponse {
                endpoint,
                reason: "missing items array".to_string(),
            })?;

        items
            .first()
            .cloned()
            .ok_or_else(|| PlatformError::NotFound(format!("User with email {email} not found")))
    }
}
