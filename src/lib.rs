// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! LXC Resource Server - OAuth2 resource server for Liferay client extensions
//!
//! This crate authenticates inbound requests against a Liferay DXP instance
//! (JWKS-verified bearer JWTs, client-id checked against the registered
//! OAuth application), gates cross-origin access to a configured domain
//! allow-list, and calls the DXP headless REST APIs on the service's own
//! behalf using a cached client-credentials grant.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers and router assembly (Axum)
//! - `auth` - JWKS resolution, token verification, auth middleware
//! - `cors` - CORS gate over the configured allow-list
//! - `platform` - DXP endpoints, credential manager, REST invoker

pub mod api;
pub mod auth;
pub mod config;
pub mod cors;
pub mod error;
pub mod platform;
pub mod state;
