// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Taskguard

//! JWT claims and authenticated user representation.

use serde::Deserialize;

use super::AuthError;

/// Subject claim fields accepted during identity extraction, in priority
/// order.
///
/// `sub` is the canonical field per RFC 7519 and is what the issuer is
/// expected to emit going forward. `user_id` and `id` are accepted only as
/// migration-compatibility fallbacks for tokens minted by older issuer
/// deployments. The first present, non-empty field wins.
pub const SUBJECT_CLAIM_FIELDS: &[&str] = &["sub", "user_id", "id"];

/// Claims decoded from a verified JWT payload.
///
/// A `ClaimSet` is only ever produced by [`TokenVerifier::verify`] after the
/// signature check has passed; no code path builds one from an unverified
/// payload.
///
/// [`TokenVerifier::verify`]: super::TokenVerifier::verify
#[derive(Debug, Clone, Deserialize)]
pub struct ClaimSet {
    /// Subject (canonical caller identity).
    #[serde(default)]
    pub sub: Option<String>,

    /// Legacy subject field emitted by older issuer deployments.
    #[serde(default)]
    pub user_id: Option<String>,

    /// Legacy subject field, lowest priority.
    #[serde(default)]
    pub id: Option<String>,

    /// Expiration timestamp (Unix seconds). Deserialization fails if absent
    /// or not an integer, which the verifier reports as a malformed token.
    pub exp: i64,

    /// Issued-at timestamp (Unix seconds).
    #[serde(default)]
    pub iat: Option<i64>,

    /// Email address, display only. Never used for authorization decisions.
    #[serde(default)]
    pub email: Option<String>,
}

impl ClaimSet {
    /// Resolve the subject by walking [`SUBJECT_CLAIM_FIELDS`] in order.
    ///
    /// Empty strings are skipped so a token carrying `"sub": ""` falls
    /// through to the legacy fields rather than yielding a blank identity.
    pub fn subject(&self) -> Option<&str> {
        SUBJECT_CLAIM_FIELDS
            .iter()
            .filter_map(|field| self.claim_field(field))
            .find(|value| !value.is_empty())
    }

    fn claim_field(&self, name: &str) -> Option<&str> {
        match name {
            "sub" => self.sub.as_deref(),
            "user_id" => self.user_id.as_deref(),
            "id" => self.id.as_deref(),
            _ => None,
        }
    }
}

/// Authenticated caller identity extracted from verified JWT claims.
///
/// Created once per request by the `Auth` extractor, carried through the
/// request, and discarded when the response completes. Never cached and
/// never derived from the request body or query parameters.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    /// Canonical caller identity (resolved subject claim).
    pub subject: String,

    /// Email address for display purposes only.
    pub email: Option<String>,
}

impl AuthenticatedUser {
    /// Build an identity from verified claims.
    ///
    /// # Errors
    /// Returns `AuthError::MissingSubject` if none of the accepted subject
    /// fields is present. An identity is never fabricated or defaulted.
    pub fn from_claims(claims: &ClaimSet) -> Result<Self, AuthError> {
        let subject = claims.subject().ok_or(AuthError::MissingSubject)?;

        Ok(Self {
            subject: subject.to_string(),
            email: claims.email.clone(),
        })
    }
}
