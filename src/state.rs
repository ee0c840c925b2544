// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Taskguard

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::auth::TokenVerifier;
use crate::store::InMemoryTaskStore;

/// Shared application state.
///
/// The verifier is immutable after startup; the store is behind an async
/// `RwLock` so collection reads proceed concurrently. Concurrent requests
/// share nothing else.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RwLock<InMemoryTaskStore>>,
    pub verifier: Arc<TokenVerifier>,
}

impl AppState {
    pub fn new(store: InMemoryTaskStore, verifier: TokenVerifier) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
            verifier: Arc::new(verifier),
        }
    }
}
