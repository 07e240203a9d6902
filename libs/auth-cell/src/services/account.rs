use regex::Regex;
use tracing::{debug, info, warn};

use shared_config::AppConfig;
use shared_utils::jwt::issue_token;

use crate::models::{AuthError, AuthRequest, LoginResponse, UserRecord};
use crate::services::{PasswordService, UserService};

const EMAIL_PATTERN: &str = r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$";

/// Signup, login and password changes on top of the `users` table.
pub struct AccountService {
    users: UserService,
    jwt_secret: String,
    token_ttl_hours: i64,
}

impl AccountService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            users: UserService::new(config),
            jwt_secret: config.jwt_secret.clone(),
            token_ttl_hours: config.token_ttl_hours,
        }
    }

    pub fn is_valid_email(email: &str) -> bool {
        Regex::new(EMAIL_PATTERN)
            .map(|re| re.is_match(email) && email.len() <= 254)
            .unwrap_or(false)
    }

    pub async fn signup(&self, request: &AuthRequest) -> Result<UserRecord, AuthError> {
        let (email, password) = request.credentials()?;

        if !Self::is_valid_email(&email) {
            return Err(AuthError::InvalidEmail);
        }

        if self.users.get_user_by_email(&email).await?.is_some() {
            warn!("Signup rejected, user already exists: {}", email);
            return Err(AuthError::UserExists);
        }

        let password_hash = PasswordService::hash_password(password)?;
        let user = self.users.create_user(&email, &password_hash).await?;

        info!("Created user {}", user.user_id);
        Ok(user)
    }

    pub async fn login(&self, request: &AuthRequest) -> Result<LoginResponse, AuthError> {
        let (email, password) = request.credentials()?;

        let user = self.users
            .get_user_by_email(&email)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if !PasswordService::verify_password(password, &user.password_hash)? {
            debug!("Password mismatch for user {}", user.user_id);
            return Err(AuthError::InvalidCredentials);
        }

        let token = issue_token(user.user_id, Some(&user.email), &self.jwt_secret, self.token_ttl_hours)
            .map_err(AuthError::Token)?;

        info!("User {} logged in", user.user_id);
        Ok(LoginResponse {
            message: "Login successful".to_string(),
            user_id: user.user_id,
            token,
        })
    }

    pub async fn change_password(
        &self,
        email: &str,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), AuthError> {
        if current_password.is_empty() || new_password.is_empty() {
            return Err(AuthError::MissingCredentials);
        }

        let user = self.users
            .get_user_by_email(email)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        if !PasswordService::verify_password(current_password, &user.password_hash)? {
            return Err(AuthError::InvalidCredentials);
        }

        let password_hash = PasswordService::hash_password(new_password)?;
        self.users.update_user_password(user.user_id, &password_hash).await?;

        info!("Password changed for user {}", user.user_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_validation() {
        assert!(AccountService::is_valid_email("testuser@example.com"));
        assert!(AccountService::is_valid_email("first.last+tag@clinic.co.uk"));
        assert!(!AccountService::is_valid_email("testuser"));
        assert!(!AccountService::is_valid_email("testuser@example"));
        assert!(!AccountService::is_valid_email("@example.com"));
    }
}
