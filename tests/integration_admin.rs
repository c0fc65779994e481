mod common;

use axum::http::{Method, StatusCode};
use common::{PASSWORD, RecordingMailer, test_app, test_app_with_mailer, unique_email};
use courseload_db::UserRepository;
use serde_json::json;

#[tokio::test]
async fn test_admin_routes_require_qa() {
    let app = test_app();
    let (lecturer, _) = app.register_lecturer("Jane", &unique_email()).await;

    let (status, body) = app.get("/api/admin/users", &lecturer).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Access denied. Only QA users are allowed.");

    let (status, _) = app
        .request(Method::GET, "/api/admin/users", None, None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_create_qa_success() {
    let app = test_app();
    let (qa, _) = app.seed_qa(&unique_email()).await;
    let email = unique_email();

    let (status, body) = app
        .post(
            "/api/admin/create-qa",
            Some(&qa),
            json!({ "name": "New QA", "email": email, "password": PASSWORD }),
        )
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "QA user created successfully.");
    assert_eq!(body["user"]["role"], "QA");
    assert_eq!(body["user"]["school"], "N/A");
    assert!(body["token"].as_str().is_some());

    let (status, _) = app
        .post(
            "/api/auth/login",
            None,
            json!({ "email": email, "password": PASSWORD }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_create_qa_rejects_foreign_domain() {
    let app = test_app();
    let (qa, _) = app.seed_qa(&unique_email()).await;

    let (status, _) = app
        .post(
            "/api/admin/create-qa",
            Some(&qa),
            json!({ "name": "Outsider", "email": "outsider@example.com", "password": PASSWORD }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let users = app.state.users.list().await.unwrap();
    assert_eq!(users.len(), 1);
}

#[tokio::test]
async fn test_create_qa_duplicate_and_missing_fields() {
    let app = test_app();
    let email = unique_email();
    let (qa, _) = app.seed_qa(&email).await;

    let (status, body) = app
        .post(
            "/api/admin/create-qa",
            Some(&qa),
            json!({ "name": "Copy", "email": email, "password": PASSWORD }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "User already exists with this email.");

    let (status, body) = app
        .post("/api/admin/create-qa", Some(&qa), json!({ "name": "Copy" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Name, email, and password are required.");
}

#[tokio::test]
async fn test_list_users_hides_passwords() {
    let app = test_app();
    let (qa, _) = app.seed_qa(&unique_email()).await;
    app.register_lecturer("Jane", &unique_email()).await;

    let (status, body) = app.get("/api/admin/users", &qa).await;
    assert_eq!(status, StatusCode::OK);

    let users = body["users"].as_array().unwrap();
    assert_eq!(users.len(), 2);
    for user in users {
        assert!(user.get("password").is_none());
        assert!(user.get("passwordHash").is_none());
        assert!(user.get("bankBBAN").is_some());
    }
}

#[tokio::test]
async fn test_assign_role_promotes_and_notifies() {
    let app = test_app();
    let (qa, _) = app.seed_qa(&unique_email()).await;
    let email = unique_email();
    let (lecturer, lecturer_id) = app.register_lecturer("Jane", &email).await;

    let (status, body) = app
        .post(
            "/api/admin/assign-role",
            Some(&qa),
            json!({ "userId": lecturer_id, "role": "QA" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "User role updated to 'QA'.");
    assert_eq!(body["user"]["role"], "QA");

    let sent = app.mailer.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, email);
    assert_eq!(sent[0].subject, "Role Assignment Notification");

    // The role is reloaded per request, so the old token now carries QA rights.
    let (status, _) = app.get("/api/admin/users", &lecturer).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_assign_role_accepts_user_alias() {
    let app = test_app();
    let (qa, _) = app.seed_qa(&unique_email()).await;
    let (_, lecturer_id) = app.register_lecturer("Jane", &unique_email()).await;

    let (status, body) = app
        .post(
            "/api/admin/assign-role",
            Some(&qa),
            json!({ "userId": lecturer_id, "role": "User" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["role"], "Lecturer");
}

#[tokio::test]
async fn test_assign_role_errors() {
    let app = test_app();
    let (qa, _) = app.seed_qa(&unique_email()).await;
    let (_, lecturer_id) = app.register_lecturer("Jane", &unique_email()).await;

    let (status, body) = app
        .post("/api/admin/assign-role", Some(&qa), json!({ "role": "QA" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "User ID and role are required.");

    let (status, _) = app
        .post(
            "/api/admin/assign-role",
            Some(&qa),
            json!({ "userId": lecturer_id, "role": "Dean" }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = app
        .post(
            "/api/admin/assign-role",
            Some(&qa),
            json!({ "userId": uuid::Uuid::new_v4().to_string(), "role": "QA" }),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "User not found.");

    let (status, _) = app
        .post(
            "/api/admin/assign-role",
            Some(&qa),
            json!({ "userId": "garbage", "role": "QA" }),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_assign_role_survives_mail_failure() {
    let email = unique_email();
    let app = test_app_with_mailer(RecordingMailer::failing_for(&[&email]));
    let (qa, _) = app.seed_qa(&unique_email()).await;
    let (_, lecturer_id) = app.register_lecturer("Jane", &email).await;

    let (status, body) = app
        .post(
            "/api/admin/assign-role",
            Some(&qa),
            json!({ "userId": lecturer_id, "role": "QA" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["role"], "QA");
    assert!(app.mailer.sent().is_empty());
}
