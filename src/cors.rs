// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! CORS gate.
//!
//! Cross-origin access is restricted to the configured domain allow-list
//! (each domain combined with the configured protocol). The ready path is
//! exempt so platform probes work from anywhere. Preflight handling comes
//! from `tower_http`'s CORS middleware; this module only supplies the
//! origin decision.

use axum::http::{HeaderValue, Method};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::config::Config;

pub fn cors_layer(config: &Config) -> CorsLayer {
    let allow_list = config.allow_list();
    let ready_path = config.ready_path.clone();

    CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(
            move |origin: &HeaderValue, parts: &axum::http::request::Parts| {
                if parts.uri.path() == ready_path {
                    return true;
                }
                origin_allowed(origin, &allow_list)
            },
        ))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(Any)
}

fn origin_allowed(origin: &HeaderValue, allow_list: &[String]) -> bool {
    match origin.to_str() {
        Ok(origin) => allow_list.iter().any(|allowed| allowed == origin),
        Err(_) => false,
    }
}
