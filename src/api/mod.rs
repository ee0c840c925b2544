// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Taskguard

use axum::{
    routing::{get, patch},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    models::{CreateTaskRequest, Task, UpdateTaskRequest},
    state::AppState,
};

pub mod health;
pub mod tasks;

pub fn router(state: AppState) -> Router {
    let v1_routes = Router::new()
        .route("/tasks", get(tasks::list_tasks).post(tasks::create_task))
        .route(
            "/tasks/{task_id}",
            get(tasks::get_task)
                .put(tasks::update_task)
                .delete(tasks::delete_task),
        )
        .route(
            "/tasks/{task_id}/complete",
            patch(tasks::toggle_task_completion),
        );

    Router::new()
        .nest("/v1", v1_routes)
        .route("/health/live", get(health::liveness))
        .route("/health/ready", get(health::readiness))
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

#[derive(OpenApi)]
#[openapi(
    paths(
        tasks::create_task,
        tasks::list_tasks,
        tasks::get_task,
        tasks::update_task,
        tasks::toggle_task_completion,
        tasks::delete_task,
        health::liveness,
        health::readiness
    ),
    components(
        schemas(
            Task,
            CreateTaskRequest,
            UpdateTaskRequest,
            health::HealthResponse
        )
    ),
    tags(
        (name = "Tasks", description = "Per-user task management"),
        (name = "Health", description = "Liveness and readiness probes")
    )
)]
struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::TokenVerifier;
    use crate::store::InMemoryTaskStore;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use chrono::Utc;
    use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
    use serde_json::json;
    use tower::ServiceExt;

    const SECRET: &[u8] = b"test-secret-key-of-32-bytes-min!";

    fn test_router() -> Router {
        router(AppState::new(
            InMemoryTaskStore::new(),
            TokenVerifier::new(SECRET),
        ))
    }

    fn bearer(subject: &str) -> String {
        let now = Utc::now().timestamp();
        let token = encode(
            &Header::new(Algorithm::HS256),
            &json!({ "sub": subject, "iat": now, "exp": now + 3600 }),
            &EncodingKey::from_secret(SECRET),
        )
        .unwrap();
        format!("Bearer {token}")
    }

    async fn json_body(response: axum::response::Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn router_builds_with_all_routes() {
        let app = test_router();
        let _ = app.into_make_service();
    }

    #[tokio::test]
    async fn unauthenticated_request_gets_generic_401() {
        let app = test_router();
        let response = app
            .oneshot(Request::get("/v1/tasks").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response
                .headers()
                .get(header::WWW_AUTHENTICATE)
                .and_then(|v| v.to_str().ok()),
            Some("Bearer")
        );
        let body = json_body(response).await;
        assert_eq!(body["error"], "invalid authentication credentials");
    }

    #[tokio::test]
    async fn bad_token_and_missing_header_look_identical() {
        let app = test_router();

        let missing = app
            .clone()
            .oneshot(Request::get("/v1/tasks").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let tampered = app
            .oneshot(
                Request::get("/v1/tasks")
                    .header(header::AUTHORIZATION, "Bearer not.a.token")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(missing.status(), tampered.status());
        assert_eq!(json_body(missing).await, json_body(tampered).await);
    }

    #[tokio::test]
    async fn cross_user_isolation_end_to_end() {
        let app = test_router();

        // u1 creates a task.
        let created = app
            .clone()
            .oneshot(
                Request::post("/v1/tasks")
                    .header(header::AUTHORIZATION, bearer("u1"))
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"title":"u1 private task"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(created.status(), StatusCode::CREATED);
        let task = json_body(created).await;
        let task_id = task["id"].as_str().unwrap().to_string();
        assert_eq!(task["owner_subject"], "u1");

        // u2 cannot see it, and the response matches a nonexistent id.
        let foreign = app
            .clone()
            .oneshot(
                Request::get(format!("/v1/tasks/{task_id}"))
                    .header(header::AUTHORIZATION, bearer("u2"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let missing = app
            .clone()
            .oneshot(
                Request::get("/v1/tasks/11111111-2222-3333-4444-555555555555")
                    .header(header::AUTHORIZATION, bearer("u2"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(foreign.status(), StatusCode::NOT_FOUND);
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
        assert_eq!(json_body(foreign).await, json_body(missing).await);

        // The owner still reads it back.
        let own = app
            .oneshot(
                Request::get(format!("/v1/tasks/{task_id}"))
                    .header(header::AUTHORIZATION, bearer("u1"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(own.status(), StatusCode::OK);
        assert_eq!(json_body(own).await["id"], task_id.as_str());
    }

    #[tokio::test]
    async fn owner_field_in_create_body_is_ignored() {
        let app = test_router();
        let created = app
            .oneshot(
                Request::post("/v1/tasks")
                    .header(header::AUTHORIZATION, bearer("honest_user"))
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(
                        r#"{"title":"sneaky","owner_subject":"victim","user_id":"victim"}"#,
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(created.status(), StatusCode::CREATED);
        let task = json_body(created).await;
        assert_eq!(task["owner_subject"], "honest_user");
    }

    #[tokio::test]
    async fn health_probes_need_no_auth() {
        let app = test_router();
        let response = app
            .oneshot(Request::get("/health/live").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
