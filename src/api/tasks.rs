// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Taskguard

//! Task CRUD handlers.
//!
//! Every handler takes the `Auth` extractor, so the authentication gate has
//! already run before any store access. Ownership is resolved per operation:
//! single-task reads go through `find_owned`, mutations through the store's
//! `*_if_owner` operations, and the collection read through an `OwnerScope`.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    auth::Auth,
    error::ApiError,
    models::{CreateTaskRequest, Task, UpdateTaskRequest},
    ownership::OwnedLookup,
    state::AppState,
    store::OwnerScope,
};

#[utoipa::path(
    post,
    path = "/v1/tasks",
    request_body = CreateTaskRequest,
    tag = "Tasks",
    responses(
        (status = 201, body = Task),
        (status = 401, description = "Invalid authentication credentials"),
        (status = 422, description = "Validation failed")
    )
)]
pub async fn create_task(
    State(state): State<AppState>,
    Auth(user): Auth,
    Json(request): Json<CreateTaskRequest>,
) -> Result<(StatusCode, Json<Task>), ApiError> {
    let mut store = state.store.write().await;
    let task = store.create(&user, request)?;
    tracing::debug!(subject = %user.subject, task_id = %task.id, "task created");
    Ok((StatusCode::CREATED, Json(task)))
}

#[utoipa::path(
    get,
    path = "/v1/tasks",
    tag = "Tasks",
    responses(
        (status = 200, body = [Task]),
        (status = 401, description = "Invalid authentication credentials")
    )
)]
pub async fn list_tasks(
    State(state): State<AppState>,
    Auth(user): Auth,
) -> Result<Json<Vec<Task>>, ApiError> {
    let store = state.store.read().await;
    Ok(Json(store.list(&OwnerScope::from(&user))))
}

#[utoipa::path(
    get,
    path = "/v1/tasks/{task_id}",
    params(("task_id" = String, Path, description = "Identifier of the task")),
    tag = "Tasks",
    responses(
        (status = 200, body = Task),
        (status = 401, description = "Invalid authentication credentials"),
        (status = 404, description = "Task not found")
    )
)]
pub async fn get_task(
    Path(task_id): Path<String>,
    State(state): State<AppState>,
    Auth(user): Auth,
) -> Result<Json<Task>, ApiError> {
    let store = state.store.read().await;
    let task = store.get(&task_id).cloned().find_owned(&user)?;
    Ok(Json(task))
}

#[utoipa::path(
    put,
    path = "/v1/tasks/{task_id}",
    params(("task_id" = String, Path, description = "Identifier of the task to update")),
    request_body = UpdateTaskRequest,
    tag = "Tasks",
    responses(
        (status = 200, body = Task),
        (status = 401, description = "Invalid authentication credentials"),
        (status = 404, description = "Task not found"),
        (status = 422, description = "Validation failed")
    )
)]
pub async fn update_task(
    Path(task_id): Path<String>,
    State(state): State<AppState>,
    Auth(user): Auth,
    Json(request): Json<UpdateTaskRequest>,
) -> Result<Json<Task>, ApiError> {
    let mut store = state.store.write().await;
    let task = store.update_if_owner(&task_id, &user, request)?;
    Ok(Json(task))
}

#[utoipa::path(
    patch,
    path = "/v1/tasks/{task_id}/complete",
    params(("task_id" = String, Path, description = "Identifier of the task to toggle")),
    tag = "Tasks",
    responses(
        (status = 200, body = Task),
        (status = 401, description = "Invalid authentication credentials"),
        (status = 404, description = "Task not found")
    )
)]
pub async fn toggle_task_completion(
    Path(task_id): Path<String>,
    State(state): State<AppState>,
    Auth(user): Auth,
) -> Result<Json<Task>, ApiError> {
    let mut store = state.store.write().await;
    let task = store.toggle_if_owner(&task_id, &user)?;
    Ok(Json(task))
}

#[utoipa::path(
    delete,
    path = "/v1/tasks/{task_id}",
    params(("task_id" = String, Path, description = "Identifier of the task to delete")),
    tag = "Tasks",
    responses(
        (status = 204),
        (status = 401, description = "Invalid authentication credentials"),
        (status = 404, description = "Task not found")
    )
)]
pub async fn delete_task(
    Path(task_id): Path<String>,
    State(state): State<AppState>,
    Auth(user): Auth,
) -> Result<StatusCode, ApiError> {
    let mut store = state.store.write().await;
    store.delete_if_owner(&task_id, &user)?;
    tracing::debug!(subject = %user.subject, task_id = %task_id, "task deleted");
    Ok(StatusCode::NO_CONTENT)
}
