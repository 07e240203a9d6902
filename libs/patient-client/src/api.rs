use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::error::ClientError;
use crate::models::{
    AvailableTime, Condition, Hospital, LabResult, LoginResponse, Medication, MessageResponse,
    PriorAppointment, SessionInfo, TokenStatus, UpcomingAppointment,
};

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000/api";

/// One method per MedTrack endpoint. Non-2xx responses become
/// [`ClientError::Api`].
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    token: Option<String>,
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
        }
    }

    /// Sends `Authorization: Bearer <token>` on every request.
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn builder(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        debug!("{} {}", method, url);

        let builder = self.http.request(method, url);
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn handle_response<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
        let status = response.status();
        let bytes = response.bytes().await?;

        if !status.is_success() {
            let message = serde_json::from_slice::<Value>(&bytes)
                .ok()
                .and_then(|body| body.get("error").and_then(Value::as_str).map(str::to_string))
                .unwrap_or_default();
            warn!("API returned {}: {}", status, message);

            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<T, ClientError> {
        let response = self.builder(Method::GET, path).query(query).send().await?;
        Self::handle_response(response).await
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Value,
    ) -> Result<T, ClientError> {
        let response = self.builder(method, path).json(&body).send().await?;
        Self::handle_response(response).await
    }

    // ==========================================================================
    // AUTH
    // ==========================================================================

    pub async fn signup(
        &self,
        email: &str,
        password: &str,
        confirm_password: Option<&str>,
    ) -> Result<MessageResponse, ClientError> {
        let mut body = json!({ "email": email, "password": password });
        if let Some(confirm) = confirm_password.filter(|c| !c.is_empty()) {
            body["confirmPassword"] = json!(confirm);
        }
        self.send_json(Method::POST, "/auth/signup", body).await
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ClientError> {
        self.send_json(Method::POST, "/auth/login", json!({ "email": email, "password": password }))
            .await
    }

    /// Whether the configured token is still accepted by the server.
    pub async fn verify_token(&self) -> Result<bool, ClientError> {
        let response = self.builder(Method::POST, "/auth/verify").send().await?;
        let status: TokenStatus = Self::handle_response(response).await?;
        Ok(status.valid)
    }

    pub async fn session(&self) -> Result<SessionInfo, ClientError> {
        self.get("/auth/session", &[]).await
    }

    pub async fn change_password(
        &self,
        current_password: &str,
        new_password: &str,
    ) -> Result<MessageResponse, ClientError> {
        self.send_json(Method::POST, "/auth/change-password", json!({
            "current_password": current_password,
            "new_password": new_password,
        }))
        .await
    }

    // ==========================================================================
    // APPOINTMENTS
    // ==========================================================================

    pub async fn hospitals(&self) -> Result<Vec<Hospital>, ClientError> {
        self.get("/appointments/hospitals", &[]).await
    }

    pub async fn available_times(
        &self,
        user_id: &str,
        date: &str,
        hospital_id: i64,
    ) -> Result<Vec<AvailableTime>, ClientError> {
        self.get("/appointments/available-times", &[
            ("user_id", user_id.to_string()),
            ("date", date.to_string()),
            ("hospital_id", hospital_id.to_string()),
        ])
        .await
    }

    /// The next appointment, or `None` when the server reports there is none.
    pub async fn upcoming(&self, user_id: &str) -> Result<Option<UpcomingAppointment>, ClientError> {
        let body: Value = self.get("/appointments/upcoming", &[("user_id", user_id.to_string())]).await?;

        if body.get("appointment_id").is_none() {
            return Ok(None);
        }
        Ok(Some(serde_json::from_value(body)?))
    }

    pub async fn list_upcoming(&self, user_id: &str) -> Result<Vec<UpcomingAppointment>, ClientError> {
        self.get("/appointments/list", &[("user_id", user_id.to_string())]).await
    }

    pub async fn book(
        &self,
        user_id: &str,
        appointment_time: &str,
        hospital_id: i64,
    ) -> Result<MessageResponse, ClientError> {
        self.send_json(Method::POST, "/appointments/book", json!({
            "user_id": user_id,
            "appointment_time": appointment_time,
            "hospital_id": hospital_id,
        }))
        .await
    }

    pub async fn reschedule(&self, appointment_id: i64, new_time: &str) -> Result<MessageResponse, ClientError> {
        self.send_json(Method::POST, "/appointments/reschedule", json!({
            "appointment_id": appointment_id,
            "new_time": new_time,
        }))
        .await
    }

    pub async fn cancel(&self, appointment_id: i64) -> Result<MessageResponse, ClientError> {
        self.send_json(Method::POST, "/appointments/cancel", json!({ "appointment_id": appointment_id }))
            .await
    }

    pub async fn complete(&self, appointment_id: i64, notes: Option<&str>) -> Result<MessageResponse, ClientError> {
        let mut body = json!({ "appointment_id": appointment_id });
        if let Some(notes) = notes {
            body["notes"] = json!(notes);
        }
        self.send_json(Method::POST, "/appointments/complete", body).await
    }

    pub async fn appointment_id(
        &self,
        user_id: &str,
        appointment_time: &str,
        hospital_id: i64,
    ) -> Result<i64, ClientError> {
        let body: Value = self.get("/appointments/get-appointment-id", &[
            ("user_id", user_id.to_string()),
            ("appointment_time", appointment_time.to_string()),
            ("hospital_id", hospital_id.to_string()),
        ])
        .await?;

        match body.get("appointment_id").and_then(Value::as_i64) {
            Some(id) => Ok(id),
            None => Err(ClientError::Api {
                status: 404,
                message: "Appointment not found".to_string(),
            }),
        }
    }

    // ==========================================================================
    // MEDICAL HISTORY
    // ==========================================================================

    pub async fn conditions(&self, user_id: &str) -> Result<Vec<Condition>, ClientError> {
        self.get("/medical_history/conditions", &[("user_id", user_id.to_string())]).await
    }

    pub async fn medications(&self, user_id: &str) -> Result<Vec<Medication>, ClientError> {
        self.get("/medical_history/medications", &[("user_id", user_id.to_string())]).await
    }

    pub async fn lab_results(&self, user_id: &str) -> Result<Vec<LabResult>, ClientError> {
        self.get("/medical_history", &[("user_id", user_id.to_string())]).await
    }

    pub async fn prior_appointments(&self, user_id: &str) -> Result<Vec<PriorAppointment>, ClientError> {
        self.get("/medical_history/appointments", &[("user_id", user_id.to_string())]).await
    }

    pub async fn add_record(
        &self,
        user_id: &str,
        report_date: &str,
        lab_results: Option<&str>,
        doctor_notes: Option<&str>,
    ) -> Result<LabResult, ClientError> {
        self.send_json(Method::POST, "/medical_history", json!({
            "user_id": user_id,
            "report_date": report_date,
            "lab_results": lab_results,
            "doctor_notes": doctor_notes,
        }))
        .await
    }

    pub async fn delete_record(&self, user_id: &str, history_id: i64) -> Result<MessageResponse, ClientError> {
        let path = format!("/medical_history/{}", history_id);
        let response = self
            .builder(Method::DELETE, &path)
            .query(&[("user_id", user_id)])
            .send()
            .await?;
        Self::handle_response(response).await
    }
}
