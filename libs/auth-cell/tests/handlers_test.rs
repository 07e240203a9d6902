use std::sync::Arc;
use axum::{extract::State, http::{HeaderMap, HeaderValue}};
use assert_matches::assert_matches;

use auth_cell::handlers::{get_session, validate_token, verify_token};
use shared_config::AppConfig;
use shared_models::error::AppError;
use shared_utils::test_utils::{TestConfig, TestUser, JwtTestUtils};

fn create_test_config() -> Arc<AppConfig> {
    TestConfig::default().to_arc()
}

fn create_auth_header(token: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        "authorization",
        HeaderValue::from_str(&format!("Bearer {}", token)).unwrap(),
    );
    headers
}

#[tokio::test]
async fn test_validate_token_success() {
    let config = create_test_config();
    let user = TestUser::new(12, "patient@example.com");
    let token = JwtTestUtils::create_test_token(&user, &config.jwt_secret, Some(24));

    let response = validate_token(State(config), create_auth_header(&token)).await.unwrap().0;

    assert!(response.valid);
    assert_eq!(response.user_id, 12);
    assert_eq!(response.email.as_deref(), Some("patient@example.com"));
}

#[tokio::test]
async fn test_validate_token_missing_header() {
    let result = validate_token(State(create_test_config()), HeaderMap::new()).await;

    assert_matches!(result, Err(AppError::Auth(msg)) if msg == "Missing authorization header");
}

#[tokio::test]
async fn test_validate_token_no_bearer_prefix() {
    let mut headers = HeaderMap::new();
    headers.insert("authorization", HeaderValue::from_static("sometoken"));

    let result = validate_token(State(create_test_config()), headers).await;

    assert_matches!(result, Err(AppError::Auth(msg)) if msg == "Invalid authorization header format");
}

#[tokio::test]
async fn test_validate_token_expired() {
    let config = create_test_config();
    let token = JwtTestUtils::create_expired_token(&TestUser::default(), &config.jwt_secret);

    let result = validate_token(State(config), create_auth_header(&token)).await;

    assert_matches!(result, Err(AppError::Auth(_)));
}

#[tokio::test]
async fn test_validate_token_invalid_signature() {
    let token = JwtTestUtils::create_invalid_signature_token(&TestUser::default());

    let result = validate_token(State(create_test_config()), create_auth_header(&token)).await;

    assert_matches!(result, Err(AppError::Auth(_)));
}

#[tokio::test]
async fn test_verify_token_reports_validity_without_failing() {
    let config = create_test_config();
    let good = JwtTestUtils::create_test_token(&TestUser::default(), &config.jwt_secret, Some(1));
    let bad = JwtTestUtils::create_malformed_token();

    let valid = verify_token(State(config.clone()), create_auth_header(&good)).await.unwrap().0;
    let invalid = verify_token(State(config), create_auth_header(&bad)).await.unwrap().0;

    assert_eq!(valid["valid"], true);
    assert_eq!(invalid["valid"], false);
}

#[tokio::test]
async fn test_get_session_echoes_user() {
    let user = TestUser::new(5, "five@example.com").to_session_user();

    let response = get_session(axum::Extension(user)).await.unwrap().0;

    assert_eq!(response["user_id"], 5);
    assert_eq!(response["email"], "five@example.com");
}
