mod common;

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use common::{RecordingMailer, TestApp, test_app, test_jwt_config, unique_email};
use courseload::router::init_router;
use courseload::state::AppState;
use courseload_config::{AppConfig, CorsConfig, Environment};
use courseload_db::{CourseRepository, InMemoryStore, StoreError, StoreResult};
use courseload_models::{Course, CourseId, NewCourse};
use tower::ServiceExt;

/// Course storage that has lost its connection.
struct UnreachableCourses;

#[async_trait]
impl CourseRepository for UnreachableCourses {
    async fn create(&self, _course: NewCourse) -> StoreResult<Course> {
        Err(unreachable_store())
    }

    async fn find_by_id(&self, _id: CourseId) -> StoreResult<Option<Course>> {
        Err(unreachable_store())
    }

    async fn list(&self) -> StoreResult<Vec<Course>> {
        Err(unreachable_store())
    }

    async fn save(&self, _course: Course) -> StoreResult<Course> {
        Err(unreachable_store())
    }
}

fn unreachable_store() -> StoreError {
    StoreError::Unexpected(anyhow::anyhow!("connection refused"))
}

fn app_with_broken_courses(environment: Environment) -> TestApp {
    let mailer = Arc::new(RecordingMailer::default());
    let state = AppState {
        users: Arc::new(InMemoryStore::new()),
        courses: Arc::new(UnreachableCourses),
        mailer: mailer.clone(),
        jwt_config: test_jwt_config(),
        cors_config: CorsConfig::default(),
        app_config: AppConfig {
            environment,
            ..AppConfig::default()
        },
    };
    TestApp {
        router: init_router(state.clone()),
        state,
        mailer,
    }
}

#[tokio::test]
async fn test_server_error_exposes_stack_in_development() {
    let app = app_with_broken_courses(Environment::Development);
    let (token, _) = app.register_lecturer("Jane", &unique_email()).await;

    let (status, body) = app.get("/api/courses", &token).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["message"].as_str().is_some());
    assert!(
        body["stack"]
            .as_str()
            .is_some_and(|stack| stack.contains("connection refused"))
    );
}

#[tokio::test]
async fn test_server_error_hides_stack_outside_development() {
    for environment in [Environment::Test, Environment::Production] {
        let app = app_with_broken_courses(environment);
        let (token, _) = app.register_lecturer("Jane", &unique_email()).await;

        let (status, body) = app.get("/api/courses", &token).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body.get("stack").is_none());
    }
}

#[tokio::test]
async fn test_health() {
    let app = test_app();
    let (status, body) = app.request(Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_unknown_route_returns_not_found_message() {
    let app = test_app();
    let (status, body) = app
        .request(Method::GET, "/api/nowhere", None, None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Not Found - /api/nowhere");
}

#[tokio::test]
async fn test_openapi_document_served() {
    let app = test_app();
    let (status, body) = app
        .request(Method::GET, "/api-docs/openapi.json", None, None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"].get("/api/courses").is_some());
}

#[tokio::test]
async fn test_cors_preflight_allows_any_origin_by_default() {
    let app = test_app();
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/courses")
        .header(header::ORIGIN, "http://localhost:5173")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "PUT")
        .body(Body::empty())
        .unwrap();

    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .unwrap(),
        "*"
    );
}
