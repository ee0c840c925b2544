// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Taskguard

//! In-memory task store.
//!
//! The store exposes only owner-aware operations: the single collection
//! read takes an [`OwnerScope`], and every mutation of an existing task is
//! conditional on the caller owning it. There is no unscoped `list_all`,
//! and each mutation is a single-step conditional update, so a cancelled
//! request can never leave a half-applied write.

use std::collections::HashMap;

use chrono::Utc;
use thiserror::Error;
use uuid::Uuid;

use crate::auth::AuthenticatedUser;
use crate::models::{
    CreateTaskRequest, Task, UpdateTaskRequest, MAX_DESCRIPTION_LEN, MAX_TITLE_LEN,
};
use crate::ownership::OwnedResource;

/// Store-level errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    /// Task absent, or present but owned by another identity. The two cases
    /// share one variant on purpose.
    #[error("Task not found")]
    NotFound,
    /// Request content violates a task-level constraint.
    #[error("{0}")]
    Validation(String),
}

/// Proof that a collection read is scoped to one owner.
///
/// The field is private and the only constructor takes an authenticated
/// identity, so a new collection-read code path cannot be written without
/// one. Query scoping is structural, not an afterthought filter.
pub struct OwnerScope(String);

impl From<&AuthenticatedUser> for OwnerScope {
    fn from(user: &AuthenticatedUser) -> Self {
        OwnerScope(user.subject.clone())
    }
}

impl OwnerScope {
    fn subject(&self) -> &str {
        &self.0
    }
}

#[derive(Default)]
pub struct InMemoryTaskStore {
    tasks: HashMap<String, Task>,
}

impl InMemoryTaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch a task by id alone, with no owner filter. Callers resolve
    /// ownership through [`OwnedLookup::find_owned`].
    ///
    /// [`OwnedLookup::find_owned`]: crate::ownership::OwnedLookup::find_owned
    pub fn get(&self, task_id: &str) -> Option<&Task> {
        self.tasks.get(task_id)
    }

    /// List the scope owner's tasks, newest first.
    ///
    /// Ordering is deterministic: `created_at` descending, id as tiebreak.
    /// No task of another owner ever appears in the result.
    pub fn list(&self, scope: &OwnerScope) -> Vec<Task> {
        let mut tasks: Vec<Task> = self
            .tasks
            .values()
            .filter(|task| task.owner_subject() == scope.subject())
            .cloned()
            .collect();

        tasks.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        tasks
    }

    /// Create a task owned by `owner`.
    ///
    /// The owner is taken unconditionally from the authenticated identity;
    /// the request type has no owner field to honor.
    pub fn create(
        &mut self,
        owner: &AuthenticatedUser,
        request: CreateTaskRequest,
    ) -> Result<Task, StoreError> {
        let title = validate_title(&request.title)?;
        let description = validate_description(request.description)?;

        let now = Utc::now();
        let task = Task {
            id: Uuid::new_v4().to_string(),
            owner_subject: owner.subject.clone(),
            title,
            description,
            completed: false,
            created_at: now,
            updated_at: now,
        };
        self.tasks.insert(task.id.clone(), task.clone());
        Ok(task)
    }

    /// Update title and/or description, if `owner` owns the task.
    pub fn update_if_owner(
        &mut self,
        task_id: &str,
        owner: &AuthenticatedUser,
        request: UpdateTaskRequest,
    ) -> Result<Task, StoreError> {
        let title = request.title.as_deref().map(validate_title).transpose()?;
        let description = match request.description {
            Some(d) => Some(validate_description(Some(d))?),
            None => None,
        };

        let task = self.get_owned_mut(task_id, owner)?;
        if let Some(title) = title {
            task.title = title;
        }
        if let Some(description) = description {
            task.description = description;
        }
        task.mark_updated();
        Ok(task.clone())
    }

    /// Toggle the completion flag, if `owner` owns the task.
    pub fn toggle_if_owner(
        &mut self,
        task_id: &str,
        owner: &AuthenticatedUser,
    ) -> Result<Task, StoreError> {
        let task = self.get_owned_mut(task_id, owner)?;
        task.completed = !task.completed;
        task.mark_updated();
        Ok(task.clone())
    }

    /// Delete a task, if `owner` owns it.
    pub fn delete_if_owner(
        &mut self,
        task_id: &str,
        owner: &AuthenticatedUser,
    ) -> Result<(), StoreError> {
        // Check-then-remove under one &mut borrow; no intermediate state.
        self.get_owned_mut(task_id, owner)?;
        self.tasks.remove(task_id);
        Ok(())
    }

    fn get_owned_mut(
        &mut self,
        task_id: &str,
        owner: &AuthenticatedUser,
    ) -> Result<&mut Task, StoreError> {
        match self.tasks.get_mut(task_id) {
            Some(task) if task.owner_subject() == owner.subject => Ok(task),
            // Absent and foreign-owned collapse into the same error.
            _ => Err(StoreError::NotFound),
        }
    }
}

fn validate_title(raw: &str) -> Result<String, StoreError> {
    let title = raw.trim();
    if title.is_empty() {
        return Err(StoreError::Validation(
            "title must not be empty or whitespace-only".to_string(),
        ));
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(StoreError::Validation(format!(
            "title must not exceed {MAX_TITLE_LEN} characters"
        )));
    }
    Ok(title.to_string())
}

fn validate_description(raw: Option<String>) -> Result<Option<String>, StoreError> {
    let Some(raw) = raw else { return Ok(None) };
    let description = raw.trim();
    if description.chars().count() > MAX_DESCRIPTION_LEN {
        return Err(StoreError::Validation(format!(
            "description must not exceed {MAX_DESCRIPTION_LEN} characters"
        )));
    }
    if description.is_empty() {
        Ok(None)
    } else {
        Ok(Some(description.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(subject: &str) -> AuthenticatedUser {
        AuthenticatedUser {
            subject: subject.to_string(),
            email: None,
        }
    }

    fn create_request(title: &str) -> CreateTaskRequest {
        CreateTaskRequest {
            title: title.to_string(),
            description: None,
        }
    }

    #[test]
    fn create_sets_owner_from_identity() {
        let mut store = InMemoryTaskStore::new();
        let task = store.create(&user("user_a"), create_request("buy milk")).unwrap();

        assert_eq!(task.owner_subject, "user_a");
        assert!(!task.completed);
        assert_eq!(task.created_at, task.updated_at);
    }

    #[test]
    fn create_trims_title_and_blank_description_becomes_none() {
        let mut store = InMemoryTaskStore::new();
        let task = store
            .create(
                &user("user_a"),
                CreateTaskRequest {
                    title: "  buy milk  ".to_string(),
                    description: Some("   ".to_string()),
                },
            )
            .unwrap();

        assert_eq!(task.title, "buy milk");
        assert!(task.description.is_none());
    }

    #[test]
    fn create_rejects_empty_and_oversized_titles() {
        let mut store = InMemoryTaskStore::new();

        let err = store.create(&user("user_a"), create_request("   ")).unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));

        let long = "x".repeat(MAX_TITLE_LEN + 1);
        let err = store.create(&user("user_a"), create_request(&long)).unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));
    }

    #[test]
    fn create_rejects_oversized_description() {
        let mut store = InMemoryTaskStore::new();
        let err = store
            .create(
                &user("user_a"),
                CreateTaskRequest {
                    title: "ok".to_string(),
                    description: Some("x".repeat(MAX_DESCRIPTION_LEN + 1)),
                },
            )
            .unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));
    }

    #[test]
    fn list_is_scoped_to_the_owner() {
        let mut store = InMemoryTaskStore::new();
        let u1 = user("user_1");
        let u2 = user("user_2");

        for i in 0..3 {
            store.create(&u1, create_request(&format!("u1 task {i}"))).unwrap();
        }
        for i in 0..5 {
            store.create(&u2, create_request(&format!("u2 task {i}"))).unwrap();
        }

        let listed = store.list(&OwnerScope::from(&u1));
        assert_eq!(listed.len(), 3);
        assert!(listed.iter().all(|t| t.owner_subject == "user_1"));
    }

    #[test]
    fn list_orders_newest_first() {
        let mut store = InMemoryTaskStore::new();
        let u = user("user_1");

        let first = store.create(&u, create_request("first")).unwrap();
        let second = store.create(&u, create_request("second")).unwrap();
        let third = store.create(&u, create_request("third")).unwrap();

        let listed = store.list(&OwnerScope::from(&u));
        let ids: Vec<&str> = listed.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec![&third.id, &second.id, &first.id]);
    }

    #[test]
    fn update_by_owner_changes_fields_and_timestamp() {
        let mut store = InMemoryTaskStore::new();
        let u = user("user_1");
        let task = store
            .create(
                &u,
                CreateTaskRequest {
                    title: "old".to_string(),
                    description: Some("old desc".to_string()),
                },
            )
            .unwrap();

        let updated = store
            .update_if_owner(
                &task.id,
                &u,
                UpdateTaskRequest {
                    title: Some("new".to_string()),
                    description: None,
                },
            )
            .unwrap();

        assert_eq!(updated.title, "new");
        // Absent fields are left unchanged.
        assert_eq!(updated.description.as_deref(), Some("old desc"));
        assert!(updated.updated_at >= task.updated_at);
        assert_eq!(updated.created_at, task.created_at);
        assert_eq!(updated.owner_subject, "user_1");
    }

    #[test]
    fn cross_owner_mutations_look_like_missing_tasks() {
        let mut store = InMemoryTaskStore::new();
        let owner = user("user_1");
        let intruder = user("user_2");
        let task = store.create(&owner, create_request("mine")).unwrap();

        let update_foreign = store
            .update_if_owner(&task.id, &intruder, UpdateTaskRequest::default())
            .unwrap_err();
        let toggle_foreign = store.toggle_if_owner(&task.id, &intruder).unwrap_err();
        let delete_foreign = store.delete_if_owner(&task.id, &intruder).unwrap_err();
        let delete_missing = store.delete_if_owner("no-such-id", &intruder).unwrap_err();

        assert_eq!(update_foreign, StoreError::NotFound);
        assert_eq!(toggle_foreign, StoreError::NotFound);
        assert_eq!(delete_foreign, delete_missing);

        // The task survived every foreign attempt untouched.
        let survivor = store.get(&task.id).unwrap();
        assert_eq!(survivor, &task);
    }

    #[test]
    fn toggle_flips_completion_both_ways() {
        let mut store = InMemoryTaskStore::new();
        let u = user("user_1");
        let task = store.create(&u, create_request("toggle me")).unwrap();

        let toggled = store.toggle_if_owner(&task.id, &u).unwrap();
        assert!(toggled.completed);

        let toggled_back = store.toggle_if_owner(&task.id, &u).unwrap();
        assert!(!toggled_back.completed);
    }

    #[test]
    fn delete_by_owner_removes_the_task() {
        let mut store = InMemoryTaskStore::new();
        let u = user("user_1");
        let task = store.create(&u, create_request("remove me")).unwrap();

        store.delete_if_owner(&task.id, &u).unwrap();
        assert!(store.get(&task.id).is_none());
        assert!(store.list(&OwnerScope::from(&u)).is_empty());
    }

    #[test]
    fn invalid_update_content_reports_validation_not_lookup() {
        let mut store = InMemoryTaskStore::new();
        let u = user("user_1");
        let task = store.create(&u, create_request("fine")).unwrap();

        let err = store
            .update_if_owner(
                &task.id,
                &u,
                UpdateTaskRequest {
                    title: Some("  ".to_string()),
                    description: None,
                },
            )
            .unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));
    }
}
