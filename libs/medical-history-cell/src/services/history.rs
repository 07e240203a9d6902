// libs/medical-history-cell/src/services/history.rs
use std::sync::Arc;

use chrono::NaiveDate;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::{debug, info, warn};

use appointment_cell::models::AppointmentStatus;
use shared_config::AppConfig;
use shared_database::supabase::SupabaseClient;

use crate::models::{
    AddRecordRequest, Condition, LabResult, MedicalHistoryError, MedicalHistoryRecord, Medication,
    PriorAppointment,
};

/// Read and write access to a patient's medical history. Conditions and
/// medications hang off `medical_history` rows by `history_id`.
pub struct MedicalHistoryService {
    supabase: Arc<SupabaseClient>,
}

impl MedicalHistoryService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            supabase: Arc::new(SupabaseClient::new(config)),
        }
    }

    async fn fetch_rows<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, MedicalHistoryError> {
        let rows: Vec<Value> = self.supabase.request(Method::GET, path, None).await?;

        rows.into_iter()
            .map(|row| serde_json::from_value(row).map_err(MedicalHistoryError::from))
            .collect()
    }

    /// History records for the user, newest report first.
    pub async fn get_history_records(
        &self,
        user_id: i64,
    ) -> Result<Vec<MedicalHistoryRecord>, MedicalHistoryError> {
        debug!("Fetching history records for user {}", user_id);

        let path = format!(
            "/rest/v1/medical_history?user_id=eq.{}&order=report_date.desc",
            user_id
        );
        self.fetch_rows(&path).await
    }

    async fn history_ids(&self, user_id: i64) -> Result<Vec<i64>, MedicalHistoryError> {
        Ok(self.get_history_records(user_id)
            .await?
            .into_iter()
            .map(|record| record.history_id)
            .collect())
    }

    fn id_list(ids: &[i64]) -> String {
        ids.iter().map(i64::to_string).collect::<Vec<_>>().join(",")
    }

    pub async fn get_conditions(&self, user_id: i64) -> Result<Vec<Condition>, MedicalHistoryError> {
        let ids = self.history_ids(user_id).await?;
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let path = format!(
            "/rest/v1/conditions?history_id=in.({})&select=condition_name,condition_description,diagnosed_date&order=diagnosed_date.desc.nullslast",
            Self::id_list(&ids)
        );
        self.fetch_rows(&path).await
    }

    pub async fn get_medications(&self, user_id: i64) -> Result<Vec<Medication>, MedicalHistoryError> {
        let ids = self.history_ids(user_id).await?;
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let path = format!(
            "/rest/v1/medications?history_id=in.({})&select=medication_name,dosage,start_date,end_date&order=start_date.desc.nullslast",
            Self::id_list(&ids)
        );
        self.fetch_rows(&path).await
    }

    pub async fn get_lab_results(&self, user_id: i64) -> Result<Vec<LabResult>, MedicalHistoryError> {
        Ok(self.get_history_records(user_id)
            .await?
            .into_iter()
            .map(LabResult::from)
            .collect())
    }

    pub async fn get_prior_appointments(
        &self,
        user_id: i64,
    ) -> Result<Vec<PriorAppointment>, MedicalHistoryError> {
        debug!("Fetching completed appointments for user {}", user_id);

        let path = format!(
            "/rest/v1/appointments?user_id=eq.{}&status=eq.{}&select=appointment_id,appointment_time,hospital_id,notes&order=appointment_time.desc",
            user_id,
            AppointmentStatus::Completed,
        );
        self.fetch_rows(&path).await
    }

    pub async fn add_record(
        &self,
        request: &AddRecordRequest,
    ) -> Result<MedicalHistoryRecord, MedicalHistoryError> {
        let user_id = request.user_id.ok_or(MedicalHistoryError::MissingUserId)?;
        let raw_date = request.report_date
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .ok_or(MedicalHistoryError::MissingReportDate)?;
        let report_date = NaiveDate::parse_from_str(raw_date, "%Y-%m-%d")
            .map_err(|_| MedicalHistoryError::InvalidDate(raw_date.to_string()))?;

        let body = json!({
            "user_id": user_id,
            "report_date": report_date,
            "lab_results": request.lab_results,
            "doctor_notes": request.doctor_notes,
        });

        let rows: Vec<Value> = self.supabase
            .request_with_headers(
                Method::POST,
                "/rest/v1/medical_history",
                Some(body),
                Some(SupabaseClient::representation_headers()),
            )
            .await?;

        let record: MedicalHistoryRecord = rows
            .into_iter()
            .next()
            .ok_or_else(|| MedicalHistoryError::Database("Insert returned no rows".to_string()))
            .and_then(|row| serde_json::from_value(row).map_err(MedicalHistoryError::from))?;

        info!("Added medical record {} for user {}", record.history_id, user_id);
        Ok(record)
    }

    /// Deletes one of the user's records along with its conditions and medications.
    pub async fn delete_record(&self, user_id: i64, history_id: i64) -> Result<(), MedicalHistoryError> {
        let lookup = format!(
            "/rest/v1/medical_history?history_id=eq.{}&user_id=eq.{}",
            history_id, user_id
        );
        let existing: Vec<MedicalHistoryRecord> = self.fetch_rows(&lookup).await?;
        if existing.is_empty() {
            warn!("Delete of unknown medical record {} for user {}", history_id, user_id);
            return Err(MedicalHistoryError::RecordNotFound);
        }

        for table in ["conditions", "medications"] {
            let path = format!("/rest/v1/{}?history_id=eq.{}", table, history_id);
            let _: Vec<Value> = self.supabase
                .request_with_headers(
                    Method::DELETE,
                    &path,
                    None,
                    Some(SupabaseClient::representation_headers()),
                )
                .await?;
        }

        let deleted: Vec<Value> = self.supabase
            .request_with_headers(
                Method::DELETE,
                &lookup,
                None,
                Some(SupabaseClient::representation_headers()),
            )
            .await?;
        if deleted.is_empty() {
            return Err(MedicalHistoryError::RecordNotFound);
        }

        info!("Deleted medical record {} for user {}", history_id, user_id);
        Ok(())
    }
}
