// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Taskguard

//! Ownership enforcement for resource lookups.
//!
//! Every single-resource operation must pass through these checks. A
//! resource that exists but belongs to another identity produces the same
//! `NotFound` as a resource that does not exist at all, so a caller probing
//! foreign identifiers observes nothing that distinguishes them. Do not
//! split this into a separate forbidden outcome: a distinguishable status
//! is an enumeration side channel.

use crate::auth::AuthenticatedUser;
use crate::store::StoreError;

/// Trait for resources that have an owning identity.
pub trait OwnedResource {
    /// Subject of the identity that owns this resource.
    fn owner_subject(&self) -> &str;
}

/// Lookup helper that folds ownership into resource resolution.
pub trait OwnedLookup<T> {
    /// Return the resource only if `user` owns it.
    ///
    /// # Errors
    /// Returns `StoreError::NotFound` both when the resource is absent and
    /// when it is owned by someone else; the two cases are deliberately
    /// indistinguishable.
    fn find_owned(self, user: &AuthenticatedUser) -> Result<T, StoreError>;
}

impl<T: OwnedResource> OwnedLookup<T> for Option<T> {
    fn find_owned(self, user: &AuthenticatedUser) -> Result<T, StoreError> {
        match self {
            Some(resource) if resource.owner_subject() == user.subject => Ok(resource),
            _ => Err(StoreError::NotFound),
        }
    }
}
