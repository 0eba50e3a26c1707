//! Tests of routing and the authentication/authorization guard layer.
//!
//! These exercise the full middleware stack up to (but not into) the
//! repository layer, so they need no live database.

mod common;

use axum::http::{Method, StatusCode};

use lectern_api::auth::jwt::generate_access_token;

#[tokio::test]
async fn unknown_route_returns_404() {
    let app = common::build_test_app();
    let response = common::get(app, "/this-route-does-not-exist").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn health_returns_ok_with_version() {
    let app = common::build_test_app();
    let response = common::get(app, "/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = common::body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
    assert!(json["db_healthy"].is_boolean());
}

#[tokio::test]
async fn missing_token_is_rejected_with_401() {
    let app = common::build_test_app();
    let response = common::request(app, Method::GET, "/api/v1/modules", None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let json = common::body_json(response).await;
    assert_eq!(json["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn malformed_bearer_token_is_rejected_with_401() {
    let app = common::build_test_app();
    let response = common::request(
        app,
        Method::GET,
        "/api/v1/modules",
        Some("not-a-real-token"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn token_with_wrong_secret_is_rejected_with_401() {
    let mut other = common::test_config();
    other.jwt.secret = "a-different-secret".to_string();
    let token = generate_access_token(1, "admin", &other.jwt).unwrap();

    let app = common::build_test_app();
    let response = common::request(app, Method::GET, "/api/v1/modules", Some(&token)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn student_cannot_create_modules() {
    let config = common::test_config();
    let token = generate_access_token(7, "student", &config.jwt).unwrap();

    let app = common::build_test_app();
    let response = common::request(app, Method::POST, "/api/v1/modules", Some(&token)).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let json = common::body_json(response).await;
    assert_eq!(json["code"], "FORBIDDEN");
}

#[tokio::test]
async fn student_cannot_trigger_sync() {
    let config = common::test_config();
    let token = generate_access_token(7, "student", &config.jwt).unwrap();

    let app = common::build_test_app();
    let response =
        common::request(app, Method::POST, "/api/v1/modules/3/sync", Some(&token)).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn faculty_cannot_manage_users() {
    let config = common::test_config();
    let token = generate_access_token(2, "faculty", &config.jwt).unwrap();

    let app = common::build_test_app();
    let response = common::request(app, Method::GET, "/api/v1/admin/users", Some(&token)).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
