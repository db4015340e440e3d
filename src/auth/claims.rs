// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Decoded bearer-token claims.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Claims decoded from a verified bearer token.
///
/// `client_id` is the only claim this service interprets itself (it is
/// checked against the registered OAuth application). Everything else is
/// kept verbatim in `extra` so handlers can select whichever claim
/// represents the identity they need — user-agent tokens carry a
/// `username` claim, client-credentials tokens do not.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// OAuth client id the token was issued to.
    pub client_id: String,

    /// All remaining claims, unmodified.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl TokenClaims {
    /// Look up a claim by name (other than `client_id`).
    pub fn claim(&self, name: &str) -> Option<&Value> {
        self.extra.get(name)
    }

    /// Look up a string-valued claim by name.
    pub fn claim_str(&self, name: &str) -> Option<&str> {
        self.claim(name).and_then(Value::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserializes_client_id_and_keeps_the_rest() {
        let claims: TokenClaims = serde_json::from_value(json!({
            "client_id": "id-12345",
            "username": "test@liferay.com",
            "exp": 1700003600,
            "scope": "everything"
        }))
        .unwrap();

        assert_eq!(claims.client_id, "id-12345");
        assert_eq!(claims.claim_str("username"), Some("test@liferay.com"));
        assert_eq!(claims.claim("exp"), Some(&json!(1700003600)));
    }

    #[test]
    fn missing_client_id_fails_deserialization() {
        let result: Result<TokenClaims, _> =
            serde_json::from_value(json!({ "username": "test@liferay.com" }));
        assert!(result.is_err());
    }

    #[test]
    fn claim_str_is_none_for_non_strings() {
        let claims: TokenClaims = serde_json::from_value(json!({
            "client_id": "id-12345",
            "exp": 1700003600
        }))
        .unwrap();
        assert_eq!(claims.claim_str("exp"), None);
        assert_eq!(claims.claim_str("absent"), None);
    }
}
