// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! DXP platform client.
//!
//! - `endpoints` — typed URL construction for every DXP endpoint this
//!   service calls; no string concatenation of caller-supplied values.
//! - `client` — client-credentials token management and the generic REST
//!   invoker used by feature endpoints.

pub mod client;
pub mod endpoints;

pub use client::{
    AdminToken, ApplicationMetadata, Payload, PlatformClient, PlatformError, ResponseKind,
};
pub use endpoints::Endpoints;
