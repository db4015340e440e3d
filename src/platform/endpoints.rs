// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Typed URL construction for the DXP endpoints this service calls.
//!
//! All URLs are derived once from the configuration; per-call parameters
//! (the user-lookup email filter) go through the `url` crate's query-pair
//! encoding so a value can never break out of its query parameter.

use url::Url;

use crate::config::Config;

const APPLICATION_PATH: &str = "/o/oauth2/application";
const TOKEN_PATH: &str = "/o/oauth2/token";
const USER_ACCOUNTS_PATH: &str = "/o/headless-admin-user/v1.0/user-accounts";

#[derive(Debug, Clone)]
pub struct Endpoints {
    jwks: Url,
    application: Url,
    token: Url,
    user_accounts: Url,
}

impl Endpoints {
    pub fn new(config: &Config) -> Result<Self, url::ParseError> {
        let base = Url::parse(&config.base_url())?;

        let jwks = base.join(&config.jwks_uri_path)?;

        let mut application = base.join(APPLICATION_PATH)?;
        application
            .query_pairs_mut()
            .append_pair("externalReferenceCode", &config.external_reference_code);

        // The token endpoint expects the grant parameters query-encoded.
        let mut token = base.join(TOKEN_PATH)?;
        token
            .query_pairs_mut()
            .append_pair("grant_type", "client_credentials")
            .append_pair("client_id", &config.client_id)
            .append_pair("client_secret", &config.client_secret);

        let user_accounts = base.join(USER_ACCOUNTS_PATH)?;

        Ok(Self {
            jwks,
            application,
            token,
            user_accounts,
        })
    }

    /// JWKS document of the DXP instance.
    pub fn jwks_url(&self) -> Url {
        self.jwks.clone()
    }

    /// OAuth application metadata for the configured external reference code.
    pub fn application_url(&self) -> Url {
        self.application.clone()
    }

    /// Client-credentials token grant.
    pub fn token_url(&self) -> Url {
        self.token.clone()
    }

    /// User-accounts collection filtered by email address.
    pub fn user_accounts_url(&self, email: &str) -> Url {
        // OData string literals escape embedded single quotes by doubling.
        let literal = email.replace('\'', "''");
        let mut url = self.user_accounts.clone();
        url.query_pairs_mut()
            .append_pair("filter", &format!("emailAddress eq '{literal}'"));
        url
    }
}
