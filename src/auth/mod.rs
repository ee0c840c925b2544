// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Taskguard

//! # Authentication Module
//!
//! Stateless JWT authentication for the Taskguard API.
//!
//! ## Auth Flow
//!
//! 1. An external identity provider signs a JWT with the shared secret
//! 2. The client sends `Authorization: Bearer <JWT>`
//! 3. This server:
//!    - Verifies the HS256 signature against the shared secret
//!    - Checks expiry against the current time
//!    - Extracts the canonical subject (`sub`, with `user_id`/`id` accepted
//!      as migration-compatibility fallbacks)
//!
//! ## Security
//!
//! - Verification is local and stateless: no session lookup, no network I/O
//! - The accepted algorithm is fixed to HS256; tokens naming any other
//!   algorithm are rejected before their payload is inspected
//! - All rejection reasons map to one identical 401 response; the specific
//!   reason is only visible in server logs
//! - The shared secret is loaded once at startup and never mutated; rotating
//!   it invalidates every outstanding token

pub mod claims;
pub mod error;
pub mod extractor;
pub mod verifier;

pub use claims::{AuthenticatedUser, ClaimSet};
pub use error::AuthError;
pub use extractor::Auth;
pub use verifier::TokenVerifier;
