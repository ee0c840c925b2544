// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Taskguard

//! # API Data Models
//!
//! Request and response data structures for the task API. All types derive
//! `Serialize`/`Deserialize` and `ToSchema` for JSON handling and OpenAPI
//! documentation.
//!
//! The create and update request types deliberately carry no owner field:
//! ownership is assigned from the authenticated identity at creation time
//! and is immutable afterwards. An `owner_subject`-shaped field in a request
//! body is ignored during deserialization.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::ownership::OwnedResource;

/// Maximum title length, in characters after trimming.
pub const MAX_TITLE_LEN: usize = 500;

/// Maximum description length, in characters after trimming.
pub const MAX_DESCRIPTION_LEN: usize = 5000;

/// A task owned by exactly one user.
///
/// `owner_subject` is set once at creation from the authenticated identity
/// and never modified. All other fields are mutable by the owner only.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct Task {
    /// Unique identifier (UUID).
    pub id: String,
    /// Subject of the owning identity, from the creating request's token.
    pub owner_subject: String,
    /// Short task title.
    pub title: String,
    /// Optional longer description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Completion flag.
    pub completed: bool,
    /// Creation time (UTC).
    pub created_at: DateTime<Utc>,
    /// Last modification time (UTC).
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Refresh the modification timestamp.
    pub fn mark_updated(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl OwnedResource for Task {
    fn owner_subject(&self) -> &str {
        &self.owner_subject
    }
}

/// Request body for creating a task.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateTaskRequest {
    /// Task title (1 to 500 characters after trimming).
    pub title: String,
    /// Optional description (up to 5000 characters).
    #[serde(default)]
    pub description: Option<String>,
}

/// Request body for updating a task. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateTaskRequest {
    /// New title, if changing.
    #[serde(default)]
    pub title: Option<String>,
    /// New description, if changing.
    #[serde(default)]
    pub description: Option<String>,
}
