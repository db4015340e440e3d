// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Shared test harness: a mock DXP instance (wiremock) plus helpers to
//! build the service against it and mint RS256 bearer tokens with the
//! fixture keypair.

#![allow(dead_code)]

use std::time::Duration;

use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use lxc_resource_server::config::Config;
use lxc_resource_server::state::AppState;

/// Private key matching the JWKS fixture.
pub const SIGNING_KEY_PEM: &str = include_str!("../fixtures/rsa_2048.pem");
/// A second key that is NOT in the JWKS fixture.
pub const OTHER_KEY_PEM: &str = include_str!("../fixtures/rsa_2048_other.pem");
/// JWKS document published by the mock DXP instance.
pub const JWKS_JSON: &str = include_str!("../fixtures/jwks.json");

/// client_id registered for the configured external reference code.
pub const REGISTERED_CLIENT_ID: &str = "id-12345";

pub struct MockDxp {
    pub server: MockServer,
}

impl MockDxp {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Service configuration pointing at this mock instance.
    pub fn config(&self) -> Config {
        let uri = self.server.uri();
        let main_domain = uri
            .strip_prefix("http://")
            .expect("mock server uri is http")
            .to_string();

        Config {
            domains: vec!["app.example.com".to_string()],
            main_domain,
            server_protocol: "http".to_string(),
            external_reference_code: "liferay-sample-oauth".to_string(),
            client_id: "admin-client-id".to_string(),
            client_secret: "admin-client-secret".to_string(),
            jwks_uri_path: "/o/oauth2/jwks".to_string(),
            ready_path: "/ready".to_string(),
            enforce_expiration: false,
            http_timeout: Duration::from_secs(5),
            jwks_cache_ttl: Duration::from_secs(300),
            admin_token_ttl: Duration::from_secs(300),
        }
    }

    pub fn state(&self) -> AppState {
        AppState::new(self.config()).expect("state builds")
    }

    pub fn state_with(&self, adjust: impl FnOnce(&mut Config)) -> AppState {
        let mut config = self.config();
        adjust(&mut config);
        AppState::new(config).expect("state builds")
    }

    /// Serve the fixture JWKS document.
    pub async fn mock_jwks(&self) {
        let jwks: Value = serde_json::from_str(JWKS_JSON).unwrap();
        Mock::given(method("GET"))
            .and(path("/o/oauth2/jwks"))
            .respond_with(ResponseTemplate::new(200).set_body_json(jwks))
            .mount(&self.server)
            .await;
    }

    /// Serve a failing JWKS endpoint.
    pub async fn mock_jwks_status(&self, status: u16) {
        Mock::given(method("GET"))
            .and(path("/o/oauth2/jwks"))
            .respond_with(ResponseTemplate::new(status))
            .mount(&self.server)
            .await;
    }

    /// Serve OAuth application metadata with the given client_id.
    pub async fn mock_application(&self, client_id: &str) {
        Mock::given(method("GET"))
            .and(path("/o/oauth2/application"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "client_id": client_id })),
            )
            .mount(&self.server)
            .await;
    }

    /// Serve a successful client-credentials grant.
    pub async fn mock_token_grant(&self) {
        Mock::given(method("POST"))
            .and(path("/o/oauth2/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "token_type": "Bearer",
                "access_token": "admin-access-token",
                "expires_in": 600
            })))
            .mount(&self.server)
            .await;
    }

    /// Serve a failing client-credentials grant.
    pub async fn mock_token_grant_status(&self, status: u16) {
        Mock::given(method("POST"))
            .and(path("/o/oauth2/token"))
            .respond_with(ResponseTemplate::new(status))
            .mount(&self.server)
            .await;
    }

    /// Serve the user-accounts collection.
    pub async fn mock_user_accounts(&self, items: Value) {
        Mock::given(method("GET"))
            .and(path("/o/headless-admin-user/v1.0/user-accounts"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "items": items })),
            )
            .mount(&self.server)
            .await;
    }

    /// Happy path: JWKS, matching application, grant, and one user account.
    pub async fn mock_happy_path(&self, email: &str) {
        self.mock_jwks().await;
        self.mock_application(REGISTERED_CLIENT_ID).await;
        self.mock_token_grant().await;
        self.mock_user_accounts(json!([{
            "id": 20124,
            "emailAddress": email,
            "name": "Test User"
        }]))
        .await;
    }
}

/// Mint an RS256 token over the given claims with the fixture signing key.
pub fn sign_token(claims: Value) -> String {
    sign_token_with(claims, SIGNING_KEY_PEM)
}

/// Mint an RS256 token with an arbitrary PEM key.
pub fn sign_token_with(claims: Value, pem: &str) -> String {
    encode(
        &Header::new(Algorithm::RS256),
        &claims,
        &EncodingKey::from_rsa_pem(pem.as_bytes()).expect("fixture key parses"),
    )
    .expect("token signs")
}

/// Claims of a typical user-agent token.
pub fn user_claims(email: &str) -> Value {
    json!({
        "client_id": REGISTERED_CLIENT_ID,
        "username": email,
        "scope": "everything",
        "exp": 4_000_000_000u64
    })
}
