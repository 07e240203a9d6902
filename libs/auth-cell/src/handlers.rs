use std::sync::Arc;

use axum::{
    extract::{Extension, Json, State},
    http::{HeaderMap, StatusCode},
};
use serde_json::{json, Value};
use tracing::debug;

use shared_config::AppConfig;
use shared_models::auth::{SessionUser, TokenResponse};
use shared_models::error::AppError;
use shared_utils::extractor::extract_bearer_token;
use shared_utils::jwt;

use crate::models::{AuthError, AuthRequest, ChangePasswordRequest, LoginResponse};
use crate::services::AccountService;

pub async fn signup(
    State(config): State<Arc<AppConfig>>,
    Json(request): Json<AuthRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    debug!("Handling signup");

    let service = AccountService::new(&config);
    service.signup(&request).await.map_err(|e| match e {
        AuthError::Store(msg) | AuthError::PasswordHash(msg) => AuthError::CreateFailed(msg),
        other => other,
    })?;

    Ok((StatusCode::CREATED, Json(json!({ "message": "User created successfully" }))))
}

pub async fn login(
    State(config): State<Arc<AppConfig>>,
    Json(request): Json<AuthRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    debug!("Handling login");

    let service = AccountService::new(&config);
    let response = service.login(&request).await?;

    Ok(Json(response))
}

pub async fn validate_token(
    State(config): State<Arc<AppConfig>>,
    headers: HeaderMap,
) -> Result<Json<TokenResponse>, AppError> {
    debug!("Validating token");

    let token = extract_bearer_token(&headers)?;
    let user = jwt::validate_token(&token, &config.jwt_secret).map_err(AppError::Auth)?;

    Ok(Json(TokenResponse {
        valid: true,
        user_id: user.id,
        email: user.email,
    }))
}

pub async fn verify_token(
    State(config): State<Arc<AppConfig>>,
    headers: HeaderMap,
) -> Result<Json<Value>, AppError> {
    debug!("Verifying token");

    let token = extract_bearer_token(&headers)?;
    let valid = jwt::validate_token(&token, &config.jwt_secret).is_ok();

    Ok(Json(json!({ "valid": valid })))
}

pub async fn get_session(
    Extension(user): Extension<SessionUser>,
) -> Result<Json<Value>, AppError> {
    debug!("Getting session for user: {}", user.id);

    Ok(Json(json!({
        "user_id": user.id,
        "email": user.email,
    })))
}

pub async fn change_password(
    State(config): State<Arc<AppConfig>>,
    Extension(user): Extension<SessionUser>,
    Json(request): Json<ChangePasswordRequest>,
) -> Result<Json<Value>, AppError> {
    let email = user.email
        .ok_or_else(|| AppError::Auth("Session carries no email".to_string()))?;

    let service = AccountService::new(&config);
    service
        .change_password(
            &email,
            request.current_password.as_deref().unwrap_or_default(),
            request.new_password.as_deref().unwrap_or_default(),
        )
        .await?;

    Ok(Json(json!({ "message": "Password updated successfully" })))
}
