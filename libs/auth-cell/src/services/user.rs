use chrono::Utc;
use reqwest::Method;
use serde_json::{json, Value};
use tracing::{debug, error};

use shared_config::AppConfig;
use shared_database::supabase::SupabaseClient;

use crate::models::{AuthError, UserRecord};

/// Access to the `users` table.
pub struct UserService {
    supabase: SupabaseClient,
}

impl UserService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            supabase: SupabaseClient::new(config),
        }
    }

    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<UserRecord>, AuthError> {
        debug!("Fetching user by email: {}", email);

        let path = format!("/rest/v1/users?email=eq.{}&limit=1", urlencoding::encode(email));
        let result: Vec<Value> = self.supabase
            .request(Method::GET, &path, None)
            .await
            .map_err(|e| {
                error!("Error fetching user by email: {}", e);
                AuthError::Store(e.to_string())
            })?;

        match result.into_iter().next() {
            Some(row) => serde_json::from_value(row)
                .map(Some)
                .map_err(|e| AuthError::Store(e.to_string())),
            None => Ok(None),
        }
    }

    pub async fn create_user(&self, email: &str, password_hash: &str) -> Result<UserRecord, AuthError> {
        debug!("Creating user: {}", email);

        let now = Utc::now().to_rfc3339();
        let body = json!({
            "email": email,
            "password_hash": password_hash,
            "created_at": now,
            "updated_at": now,
        });

        let result: Vec<Value> = self.supabase
            .request_with_headers(
                Method::POST,
                "/rest/v1/users",
                Some(body),
                Some(SupabaseClient::representation_headers()),
            )
            .await
            .map_err(|e| {
                error!("Error creating user: {}", e);
                AuthError::CreateFailed(e.to_string())
            })?;

        let row = result
            .into_iter()
            .next()
            .ok_or_else(|| AuthError::CreateFailed("store returned no row".to_string()))?;

        serde_json::from_value(row).map_err(|e| AuthError::CreateFailed(e.to_string()))
    }

    pub async fn update_user_password(&self, user_id: i64, password_hash: &str) -> Result<(), AuthError> {
        debug!("Updating password for user: {}", user_id);

        let path = format!("/rest/v1/users?user_id=eq.{}", user_id);
        let body = json!({
            "password_hash": password_hash,
            "updated_at": Utc::now().to_rfc3339(),
        });

        let result: Vec<Value> = self.supabase
            .request_with_headers(
                Method::PATCH,
                &path,
                Some(body),
                Some(SupabaseClient::representation_headers()),
            )
            .await
            .map_err(|e| {
                error!("Error updating user password: {}", e);
                AuthError::Store(e.to_string())
            })?;

        if result.is_empty() {
            return Err(AuthError::UserNotFound);
        }

        Ok(())
    }
}
