// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Taskguard

//! Axum extractor for authenticated users.
//!
//! Use the `Auth` extractor in handlers to require authentication:
//!
//! ```rust,ignore
//! async fn my_handler(Auth(user): Auth) -> impl IntoResponse {
//!     // user is AuthenticatedUser
//! }
//! ```

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use chrono::Utc;

use super::{AuthenticatedUser, AuthError};
use crate::state::AppState;

/// Extractor that gates a handler on a valid bearer token.
///
/// Per-request state machine: no credential → verifying → verified or
/// rejected. There is no retry and no partial-trust intermediate: a
/// rejection short-circuits the request before the handler runs, and the
/// extractor never touches the task store.
///
/// Missing credentials fail closed. There is no anonymous or guest
/// identity.
pub struct Auth(pub AuthenticatedUser);

impl FromRequestParts<AppState> for Auth {
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        // An identity attached earlier in the request (e.g. by a test
        // harness) wins; verification already happened.
        if let Some(user) = parts.extensions.get::<AuthenticatedUser>().cloned() {
            return Ok(Auth(user));
        }

        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .ok_or(AuthError::MissingAuthHeader)?
            .to_str()
            .map_err(|_| AuthError::InvalidAuthHeader)?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or(AuthError::InvalidAuthHeader)?
            .trim();

        // Verification completes strictly before any store access: handlers
        // only run once this returns Ok.
        let claims = state.verifier.verify(token, Utc::now().timestamp())?;
        let user = AuthenticatedUser::from_claims(&claims)?;

        Ok(Auth(user))
    }
}
