// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Taskguard

//! Taskguard - Per-User Task API with Stateless JWT Authentication
//!
//! This crate serves a multi-user task list behind bearer-token
//! authentication. Tokens are minted by an external identity provider and
//! verified locally against a shared HMAC secret; every task operation is
//! scoped to the verified caller, with no server-side session state.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `auth` - JWT verification and identity extraction
//! - `ownership` - ownership enforcement for resource lookups
//! - `store` - owner-scoped task store

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod ownership;
pub mod state;
pub mod store;
