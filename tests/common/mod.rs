#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use courseload::router::init_router;
use courseload::state::AppState;
use courseload::utils::email::{Email, Mailer};
use courseload_auth::create_access_token;
use courseload_config::{AppConfig, CorsConfig, Environment, JwtConfig};
use courseload_core::{AppError, hash_password};
use courseload_db::{InMemoryStore, UserRepository};
use courseload_models::{InstitutionalEmail, NewUser};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;
use uuid::Uuid;

pub const DOMAIN: &str = "utg.edu.gm";
pub const PASSWORD: &str = "password123";

/// Keeps every email it is asked to send. Addresses in `failing` are refused.
#[derive(Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<Email>>,
    failing: HashSet<String>,
}

impl RecordingMailer {
    pub fn failing_for(addresses: &[&str]) -> Self {
        Self {
            sent: Mutex::default(),
            failing: addresses.iter().map(|a| a.to_string()).collect(),
        }
    }

    pub fn sent(&self) -> Vec<Email> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, email: Email) -> Result<(), AppError> {
        if self.failing.contains(&email.to) {
            return Err(AppError::internal_error("SMTP unavailable"));
        }
        self.sent.lock().unwrap().push(email);
        Ok(())
    }
}

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub mailer: Arc<RecordingMailer>,
}

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "integration-test-secret".to_string(),
        access_token_expiry: 3600,
    }
}

pub fn test_app() -> TestApp {
    test_app_with_mailer(RecordingMailer::default())
}

pub fn test_app_with_mailer(mailer: RecordingMailer) -> TestApp {
    let mailer = Arc::new(mailer);
    let store = Arc::new(InMemoryStore::new());
    let state = AppState {
        users: store.clone(),
        courses: store,
        mailer: mailer.clone(),
        jwt_config: test_jwt_config(),
        cors_config: CorsConfig::default(),
        app_config: AppConfig {
            environment: Environment::Test,
            ..AppConfig::default()
        },
    };

    TestApp {
        router: init_router(state.clone()),
        state,
        mailer,
    }
}

pub fn unique_email() -> String {
    format!("user-{}@{DOMAIN}", Uuid::new_v4().simple())
}

impl TestApp {
    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let body = match body {
            Some(body) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(serde_json::to_vec(&body).unwrap())
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, json)
    }

    pub async fn get(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        self.request(Method::GET, uri, Some(token), None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, token, Some(body)).await
    }

    pub async fn put(&self, uri: &str, token: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::PUT, uri, Some(token), Some(body)).await
    }

    pub async fn patch(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        self.request(Method::PATCH, uri, Some(token), None).await
    }

    /// Registers a lecturer through the API and returns `(token, user id)`.
    pub async fn register_lecturer(&self, name: &str, email: &str) -> (String, String) {
        let (status, body) = self
            .post("/api/auth/register", None, registration(name, email))
            .await;
        assert_eq!(status, StatusCode::CREATED, "register failed: {body}");
        (
            body["token"].as_str().unwrap().to_string(),
            body["user"]["id"].as_str().unwrap().to_string(),
        )
    }

    /// Stores a QA user directly, since no public route creates the first one.
    pub async fn seed_qa(&self, email: &str) -> (String, String) {
        let user = self
            .state
            .users
            .create(NewUser::qa(
                "QA Officer",
                InstitutionalEmail::parse(email, DOMAIN).unwrap(),
                hash_password(PASSWORD).unwrap(),
            ))
            .await
            .unwrap();
        let token = create_access_token(user.id.into_inner(), &self.state.jwt_config).unwrap();
        (token, user.id.to_string())
    }

    pub async fn create_course(&self, token: &str, body: Value) -> Value {
        let (status, body) = self.post("/api/courses", Some(token), body).await;
        assert_eq!(status, StatusCode::CREATED, "create course failed: {body}");
        body["course"].clone()
    }
}

pub fn registration(name: &str, email: &str) -> Value {
    json!({
        "name": name,
        "email": email,
        "password": PASSWORD,
        "bankName": "Trust Bank",
        "bankAccountNumber": "12345678",
        "bankBBAN": "1234567890",
        "school": "School of ICT"
    })
}

pub fn cs101() -> Value {
    json!({
        "title": "CS101",
        "semester": "First",
        "enrolled": 10,
        "capacity": 30
    })
}
