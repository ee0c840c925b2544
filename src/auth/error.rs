// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Taskguard

//! Authentication errors.
//!
//! The taxonomy is a closed set so the extractor can map every verification
//! outcome deterministically. Externally all variants collapse into one
//! identical 401 response: clients never learn which part of a credential
//! was wrong. The specific reason is logged server-side only.

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Generic message returned for every authentication failure.
const GENERIC_AUTH_MESSAGE: &str = "invalid authentication credentials";

/// Authentication error type.
#[derive(Debug)]
pub enum AuthError {
    /// No authorization header present
    MissingAuthHeader,
    /// Authorization header is not a well-formed `Bearer <token>` value
    InvalidAuthHeader,
    /// Token is structurally invalid (segments, encoding, algorithm, claims)
    MalformedToken,
    /// Token signature does not match the shared secret
    InvalidSignature,
    /// Token has expired
    TokenExpired,
    /// No accepted subject claim present in a verified token
    MissingSubject,
}

#[derive(Serialize)]
struct AuthErrorBody {
    error: String,
}

impl AuthError {
    /// Internal reason code, for operator logs only.
    pub fn reason_code(&self) -> &'static str {
        match self {
            AuthError::MissingAuthHeader => "missing_auth_header",
            AuthError::InvalidAuthHeader => "invalid_auth_header",
            AuthError::MalformedToken => "malformed_token",
            AuthError::InvalidSignature => "invalid_signature",
            AuthError::TokenExpired => "token_expired",
            AuthError::MissingSubject => "missing_subject",
        }
    }
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthError::MissingAuthHeader => write!(f, "Authorization header is required"),
            AuthError::InvalidAuthHeader => {
                write!(f, "Invalid authorization header format (expected 'Bearer <token>')")
            }
            AuthError::MalformedToken => write!(f, "Token is malformed"),
            AuthError::InvalidSignature => write!(f, "Token signature is invalid"),
            AuthError::TokenExpired => write!(f, "Token has expired"),
            AuthError::MissingSubject => write!(f, "Token carries no subject claim"),
        }
    }
}

impl std::error::Error for AuthError {}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        // Operators see the real reason; clients see the generic message.
        tracing::debug!(reason = self.reason_code(), "authentication rejected: {self}");

        let body = Json(AuthErrorBody {
            error: GENERIC_AUTH_MESSAGE.to_string(),
        });
        let mut response = (StatusCode::UNAUTHORIZED, body).into_response();
        response.headers_mut().insert(
            header::WWW_AUTHENTICATE,
            HeaderValue::from_static("Bearer"),
        );
        response
    }
}
