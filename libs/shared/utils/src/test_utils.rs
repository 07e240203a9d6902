use std::sync::Arc;
use serde_json::{json, Value};

use shared_config::AppConfig;
use shared_models::auth::SessionUser;

use crate::jwt::issue_token;

pub struct TestConfig {
    pub jwt_secret: String,
    pub supabase_url: String,
    pub supabase_anon_key: String,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            jwt_secret: "test-secret-key-for-jwt-validation-must-be-long-enough".to_string(),
            supabase_url: "http://localhost:54321".to_string(),
            supabase_anon_key: "test-anon-key".to_string(),
        }
    }
}

impl TestConfig {
    /// Config pointing the store client at a mock server.
    pub fn with_store(url: &str) -> Self {
        Self {
            supabase_url: url.to_string(),
            ..Self::default()
        }
    }

    pub fn to_app_config(&self) -> AppConfig {
        AppConfig {
            supabase_url: self.supabase_url.clone(),
            supabase_anon_key: self.supabase_anon_key.clone(),
            jwt_secret: self.jwt_secret.clone(),
            token_ttl_hours: 24,
            bind_address: "127.0.0.1:0".to_string(),
        }
    }

    pub fn to_arc(&self) -> Arc<AppConfig> {
        Arc::new(self.to_app_config())
    }
}

pub struct TestUser {
    pub id: i64,
    pub email: String,
}

impl Default for TestUser {
    fn default() -> Self {
        Self {
            id: 1,
            email: "testuser@example.com".to_string(),
        }
    }
}

impl TestUser {
    pub fn new(id: i64, email: &str) -> Self {
        Self {
            id,
            email: email.to_string(),
        }
    }

    pub fn to_session_user(&self) -> SessionUser {
        SessionUser {
            id: self.id,
            email: Some(self.email.clone()),
            created_at: None,
        }
    }
}

pub struct JwtTestUtils;

impl JwtTestUtils {
    pub fn create_test_token(user: &TestUser, secret: &str, exp_hours: Option<i64>) -> String {
        issue_token(user.id, Some(&user.email), secret, exp_hours.unwrap_or(24))
            .expect("test secret must not be empty")
    }

    pub fn create_expired_token(user: &TestUser, secret: &str) -> String {
        Self::create_test_token(user, secret, Some(-1))
    }

    pub fn create_invalid_signature_token(user: &TestUser) -> String {
        Self::create_test_token(user, "wrong-secret", Some(24))
    }

    pub fn create_malformed_token() -> String {
        "invalid.token.format".to_string()
    }
}

/// Rows shaped like the store's tables.
pub struct MockStoreResponses;

impl MockStoreResponses {
    pub fn user_row(user_id: i64, email: &str, password_hash: &str) -> Value {
        json!({
            "user_id": user_id,
            "email": email,
            "password_hash": password_hash,
            "created_at": "2024-01-01T00:00:00+00:00",
            "updated_at": "2024-01-01T00:00:00+00:00"
        })
    }

    pub fn hospital_row(hospital_id: i64, name: &str, address: &str) -> Value {
        json!({
            "hospital_id": hospital_id,
            "name": name,
            "address": address,
            "phone_number": "555-1234"
        })
    }

    pub fn timeslot_row(timeslot_id: i64, hospital_id: i64, date: &str, time: &str) -> Value {
        json!({
            "timeslot_id": timeslot_id,
            "hospital_id": hospital_id,
            "timeslot_date": date,
            "timeslot_time": time
        })
    }

    pub fn appointment_row(
        appointment_id: i64,
        user_id: i64,
        hospital_id: i64,
        appointment_time: &str,
        status: &str,
    ) -> Value {
        json!({
            "appointment_id": appointment_id,
            "user_id": user_id,
            "hospital_id": hospital_id,
            "appointment_time": appointment_time,
            "status": status,
            "notes": null
        })
    }

    pub fn history_row(history_id: i64, user_id: i64, report_date: &str) -> Value {
        json!({
            "history_id": history_id,
            "user_id": user_id,
            "report_date": report_date,
            "lab_results": "CBC within normal limits",
            "doctor_notes": "Follow up in six months"
        })
    }

    pub fn condition_row(history_id: i64, name: &str, diagnosed_date: &str) -> Value {
        json!({
            "history_id": history_id,
            "condition_name": name,
            "condition_description": format!("{} (chronic)", name),
            "diagnosed_date": diagnosed_date
        })
    }

    pub fn medication_row(history_id: i64, name: &str, start_date: &str) -> Value {
        json!({
            "history_id": history_id,
            "medication_name": name,
            "dosage": "10mg daily",
            "start_date": start_date,
            "end_date": null
        })
    }

    pub fn error_response(message: &str, code: &str) -> Value {
        json!({
            "message": message,
            "code": code
        })
    }
}
