// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! Configuration is resolved from the environment once at startup into an
//! immutable [`Config`] value that is passed explicitly into every component
//! constructor. Nothing reads the environment after startup.
//!
//! The variable names mirror the Liferay LXC configuration-tree keys
//! (dots become underscores, upper-cased).
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `COM_LIFERAY_LXC_DXP_DOMAINS` | Comma-separated CORS allow-list domains | Required |
//! | `COM_LIFERAY_LXC_DXP_MAIN_DOMAIN` | DXP main domain (JWKS, OAuth, headless APIs) | Required |
//! | `COM_LIFERAY_LXC_DXP_SERVER_PROTOCOL` | Scheme used for all DXP URLs | `https` |
//! | `LIFERAY_OAUTH_APPLICATION_EXTERNAL_REFERENCE_CODES` | Comma-separated ERC list; first entry is used | Required |
//! | `LIFERAY_OAUTH_HEADLESS_SERVER_CLIENT_ID` | Admin (client-credentials) client id | Required |
//! | `LIFERAY_OAUTH_HEADLESS_SERVER_CLIENT_SECRET` | Admin client secret | Required |
//! | `OAUTH2_JWKS_URI_PATH` | JWKS path on the main domain | `/o/oauth2/jwks` |
//! | `READY_PATH` | Health/ready path that bypasses CORS and auth | `/ready` |
//! | `ENFORCE_EXPIRATION` | Reject expired bearer tokens (`true`/`false`) | `false` |
//! | `HTTP_TIMEOUT_SECS` | Timeout for all outbound DXP calls | `10` |
//! | `JWKS_CACHE_TTL_SECS` | JWKS cache lifetime | `300` |
//! | `ADMIN_TOKEN_TTL_SECS` | Admin token cache lifetime when the grant has no `expires_in` | `300` |
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::time::Duration;

const DEFAULT_JWKS_URI_PATH: &str = "/o/oauth2/jwks";
const DEFAULT_READY_PATH: &str = "/ready";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;
const DEFAULT_JWKS_CACHE_TTL_SECS: u64 = 300;
const DEFAULT_ADMIN_TOKEN_TTL_SECS: u64 = 300;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("configuration missing: {0}")]
    Missing(&'static str),

    #[error("configuration invalid: {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Resolved service configuration, immutable for the process lifetime.
#[derive(Debug, Clone)]
pub struct Config {
    /// CORS allow-list domains (without scheme).
    pub domains: Vec<String>,
    /// DXP main domain hosting JWKS, OAuth and headless endpoints.
    pub main_domain: String,
    /// Scheme used for every DXP URL.
    pub server_protocol: String,
    /// External reference code of the OAuth application whose tokens we accept.
    pub external_reference_code: String,
    /// Client id of the service's own (client-credentials) OAuth application.
    pub client_id: String,
    /// Client secret of the service's own OAuth application.
    pub client_secret: String,
    /// JWKS path on the main domain.
    pub jwks_uri_path: String,
    /// Path that bypasses both the CORS gate and the auth middleware.
    pub ready_path: String,
    /// Whether bearer-token expiration is enforced. Off by default: the
    /// platform's user-agent tokens are refreshed out of band, and rejecting
    /// expired tokens here needs a refresh-token strategy first.
    pub enforce_expiration: bool,
    /// Timeout applied to every outbound DXP call.
    pub http_timeout: Duration,
    /// JWKS cache lifetime.
    pub jwks_cache_ttl: Duration,
    /// Admin token cache lifetime when the grant response has no `expires_in`.
    pub admin_token_ttl: Duration,
}

impl Config {
    /// Resolve the configuration from the environment.
    ///
    /// Missing required variables fail here, by name, instead of surfacing
    /// as opaque downstream request failures.
    pub fn from_env() -> Result<Self, ConfigError> {
        let domains = env_required("COM_LIFERAY_LXC_DXP_DOMAINS")?
            .split(',')
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty())
            .collect::<Vec<_>>();

        // Multiple ERCs may be configured; tokens are checked against the first.
        let external_reference_code =
            env_required("LIFERAY_OAUTH_APPLICATION_EXTERNAL_REFERENCE_CODES")?
                .split(',')
                .map(str::trim)
                .find(|erc| !erc.is_empty())
                .map(str::to_string)
                .ok_or(ConfigError::Missing(
                    "LIFERAY_OAUTH_APPLICATION_EXTERNAL_REFERENCE_CODES",
                ))?;

        Ok(Self {
            domains,
            main_domain: env_required("COM_LIFERAY_LXC_DXP_MAIN_DOMAIN")?,
            server_protocol: env_or_default("COM_LIFERAY_LXC_DXP_SERVER_PROTOCOL", "https"),
            external_reference_code,
            client_id: env_required("LIFERAY_OAUTH_HEADLESS_SERVER_CLIENT_ID")?,
            client_secret: env_required("LIFERAY_OAUTH_HEADLESS_SERVER_CLIENT_SECRET")?,
            jwks_uri_path: env_or_default("OAUTH2_JWKS_URI_PATH", DEFAULT_JWKS_URI_PATH),
            ready_path: env_or_default("READY_PATH", DEFAULT_READY_PATH),
            enforce_expiration: env_bool("ENFORCE_EXPIRATION", false)?,
            http_timeout: Duration::from_secs(env_u64(
                "HTTP_TIMEOUT_SECS",
                DEFAULT_HTTP_TIMEOUT_SECS,
            )?),
            jwks_cache_ttl: Duration::from_secs(env_u64(
                "JWKS_CACHE_TTL_SECS",
                DEFAULT_JWKS_CACHE_TTL_SECS,
            )?),
            admin_token_ttl: Duration::from_secs(env_u64(
                "ADMIN_TOKEN_TTL_SECS",
                DEFAULT_ADMIN_TOKEN_TTL_SECS,
            )?),
        })
    }

    /// Base URL of the DXP instance: `{protocol}://{main_domain}`.
    pub fn base_url(&self) -> String {
        format!("{}://{}", self.server_protocol, self.main_domain)
    }

    /// CORS allow-list origins: each domain combined with the protocol.
    pub fn allow_list(&self) -> Vec<String> {
        self.domains
            .iter()
            .map(|domain| format!("{}://{}", self.server_protocol, domain))
            .collect()
    }
}

fn env_optional(name: &'static str) -> Option<String> {
    match std::env::var(name) {
        Ok(value) => {
            let trimmed = value.trim().to_string();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed)
            }
        }
        Err(_) => None,
    }
}

fn env_required(name: &'static str) -> Result<String, ConfigError> {
    env_optional(name).ok_or(ConfigError::Missing(name))
}

fn env_or_default(name: &'static str, default: &str) -> String {
    env_optional(name).unwrap_or_else(|| default.to_string())
}

fn env_bool(name: &'static str, default: bool) -> Result<bool, ConfigError> {
    match env_optional(name) {
        None => Ok(default),
        Some(value) => value.parse::<bool>().map_err(|_| ConfigError::Invalid {
            name,
            reason: format!("expected true or false, got {value:?}"),
        }),
    }
}

fn env_u64(name: &'static str, default: u64) -> Result<u64, ConfigError> {
    match env_optional(name) {
        None => Ok(default),
        Some(value) => value.parse::<u64>().map_err(|_| ConfigError::Invalid {
            name,
            reason: format!("expected an integer, got {value:?}"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_config() -> Config {
        Config {
            domains: vec![
                "app.example.com".to_string(),
                "admin.example.com".to_string(),
            ],
            main_domain: "dxp.example.com".to_string(),
            server_protocol: "https".to_string(),
            external_reference_code: "liferay-sample-oauth".to_string(),
            client_id: "id-abc".to_string(),
            client_secret: "secret".to_string(),
            jwks_uri_path: "/o/oauth2/jwks".to_string(),
            ready_path: "/ready".to_string(),
            enforce_expiration: false,
            http_timeout: Duration::from_secs(10),
            jwks_cache_ttl: Duration::from_secs(300),
            admin_token_ttl: Duration::from_secs(300),
        }
    }

    #[test]
    fn base_url_combines_protocol_and_domain() {
        assert_eq!(sample_config().base_url(), "https://dxp.example.com");
    }

    #[test]
    fn allow_list_prefixes_every_domain() {
        let allow = sample_config().allow_list();
        assert_eq!(
            allow,
            vec![
                "https://app.example.com".to_string(),
                "https://admin.example.com".to_string(),
            ]
        );
    }

    #[test]
    fn allow_list_entries_are_distinct() {
        let allow = sample_config().allow_list();
        let mut deduped = allow.clone();
        deduped.dedup();
        assert_eq!(allow, deduped);
    }
}
