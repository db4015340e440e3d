// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use crate::auth::JwksCache;
use crate::config::Config;
use crate::platform::{Endpoints, PlatformClient};

#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error("invalid DXP URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("failed to build HTTP client: {0}")]
    Http(#[from] reqwest::Error),
}

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub jwks: Arc<JwksCache>,
    pub platform: Arc<PlatformClient>,
}

impl AppState {
    /// Build the application state from a resolved configuration.
    ///
    /// One HTTP client is shared between the JWKS cache and the platform
    /// client; the configured timeout applies to every outbound call.
    pub fn new(config: Config) -> Result<Self, StateError> {
        let http = reqwest::Client::builder()
            .timeout(config.http_timeout)
            .build()?;

        let endpoints = Endpoints::new(&config)?;
        let jwks = JwksCache::new(endpoints.jwks_url(), config.jwks_cache_ttl, http.clone());
        let platform = PlatformClient::new(endpoints, http, config.admin_token_ttl);

        Ok(Self {
            config: Arc::new(config),
            jwks: Arc::new(jwks),
            platform: Arc::new(platform),
        })
    }
}
