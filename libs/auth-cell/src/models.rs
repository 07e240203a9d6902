use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;

use shared_models::error::AppError;

/// Client-facing text for failures whose details stay in the logs.
pub const INTERNAL_FAILURE: &str = "An error occurred. Please try again.";

/// Body of both `/signup` and `/login`. Fields are optional so that missing
/// values surface as a 400 rather than a JSON rejection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    #[serde(rename = "confirmPassword", skip_serializing_if = "Option::is_none")]
    pub confirm_password: Option<String>,
}

impl AuthRequest {
    /// Returns the normalized (trimmed, lowercased) email and the password.
    pub fn credentials(&self) -> Result<(String, &str), AuthError> {
        let email = self.email.as_deref().map(str::trim).unwrap_or_default();
        let password = self.password.as_deref().unwrap_or_default();

        if email.is_empty() || password.is_empty() {
            return Err(AuthError::MissingCredentials);
        }

        Ok((email.to_lowercase(), password))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: Option<String>,
    pub new_password: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    pub user_id: i64,
    pub email: String,
    pub password_hash: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub message: String,
    #[serde(rename = "userID")]
    pub user_id: i64,
    pub token: String,
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Email and password are required")]
    MissingCredentials,

    #[error("Invalid email address")]
    InvalidEmail,

    #[error("User already exists")]
    UserExists,

    #[error("User not found")]
    UserNotFound,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("An error occurred while creating the user")]
    CreateFailed(String),

    #[error("Password hashing failed: {0}")]
    PasswordHash(String),

    #[error("Token error: {0}")]
    Token(String),

    #[error("Store error: {0}")]
    Store(String),
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::MissingCredentials | AuthError::UserExists => AppError::BadRequest(err.to_string()),
            AuthError::InvalidEmail => AppError::ValidationError(err.to_string()),
            AuthError::UserNotFound => AppError::NotFound(err.to_string()),
            AuthError::InvalidCredentials => AppError::Auth(err.to_string()),
            AuthError::CreateFailed(ref detail) => {
                error!("User creation failed: {}", detail);
                AppError::Internal(err.to_string())
            }
            AuthError::PasswordHash(_) | AuthError::Token(_) => {
                error!("{}", err);
                AppError::Internal(INTERNAL_FAILURE.to_string())
            }
            AuthError::Store(msg) => {
                error!("User store failure: {}", msg);
                AppError::Database(INTERNAL_FAILURE.to_string())
            }
        }
    }
}
