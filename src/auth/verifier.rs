// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Taskguard

//! Stateless JWT verification against the shared secret.
//!
//! The verifier is a pure component: it performs no I/O, reads no clock
//! (callers supply `now`), and holds no mutable state. The only shared
//! resource is the immutable decoding key, so concurrent requests need no
//! synchronization.

use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};

use super::{AuthError, ClaimSet};

/// The single accepted signing algorithm. There is no negotiation: a token
/// whose header names anything else is rejected before its payload is read.
pub const TOKEN_ALGORITHM: Algorithm = Algorithm::HS256;

/// Verifies bearer tokens issued by the external identity provider.
///
/// Holds the decoding key derived from the shared secret, loaded once at
/// startup. Rotating the secret requires a restart and invalidates every
/// previously issued token, which is the intended behavior.
pub struct TokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    /// Create a verifier from the shared secret.
    ///
    /// The secret length is enforced at configuration load time
    /// (see [`crate::config::MIN_SECRET_BYTES`]).
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(TOKEN_ALGORITHM);
        // Expiry is checked against the caller-supplied `now` below, with an
        // inclusive boundary. The crate's built-in check reads the system
        // clock and treats `now == exp` as still valid.
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.required_spec_claims.clear();

        Self {
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// Verify a bearer token and return its claims.
    ///
    /// Order of checks:
    /// 1. structural decode: segment count, base64, header algorithm
    /// 2. signature recomputed over header+payload and compared in constant
    ///    time (ring HMAC inside `jsonwebtoken`)
    /// 3. payload decode into [`ClaimSet`], only after signature success
    /// 4. expiry: `now >= exp` is expired (boundary inclusive)
    ///
    /// # Errors
    /// - `MalformedToken`: empty token, wrong segment count, undecodable
    ///   encoding, wrong algorithm, or missing/mistyped claims
    /// - `InvalidSignature`: signature mismatch, including tokens signed
    ///   with a previously rotated secret
    /// - `TokenExpired`: expiry reached
    pub fn verify(&self, token: &str, now: i64) -> Result<ClaimSet, AuthError> {
        if token.is_empty() {
            return Err(AuthError::MalformedToken);
        }

        let token_data = decode::<ClaimSet>(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::InvalidSignature => AuthError::InvalidSignature,
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::MalformedToken,
            })?;

        let claims = token_data.claims;

        if now >= claims.exp {
            return Err(AuthError::TokenExpired);
        }

        Ok(claims)
    }
}
