// libs/medical-history-cell/src/models.rs
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use shared_models::datetime::appointment_time;
use shared_models::error::AppError;
use shared_models::ids::{flexible_id, query_id};

// ==============================================================================
// STORED RECORDS
// ==============================================================================

/// One row of `medical_history`: a dated report with lab results and notes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MedicalHistoryRecord {
    pub history_id: i64,
    pub user_id: i64,
    pub report_date: NaiveDate,
    #[serde(default)]
    pub lab_results: Option<String>,
    #[serde(default)]
    pub doctor_notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Condition {
    pub condition_name: String,
    #[serde(default)]
    pub condition_description: Option<String>,
    #[serde(default)]
    pub diagnosed_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Medication {
    pub medication_name: String,
    #[serde(default)]
    pub dosage: Option<String>,
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

// ==============================================================================
// RESPONSE MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LabResult {
    pub history_id: i64,
    pub report_date: NaiveDate,
    pub lab_results: Option<String>,
    pub doctor_notes: Option<String>,
}

impl From<MedicalHistoryRecord> for LabResult {
    fn from(record: MedicalHistoryRecord) -> Self {
        Self {
            history_id: record.history_id,
            report_date: record.report_date,
            lab_results: record.lab_results,
            doctor_notes: record.doctor_notes,
        }
    }
}

/// A completed visit and the notes left on it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PriorAppointment {
    pub appointment_id: i64,
    #[serde(with = "appointment_time")]
    pub appointment_time: NaiveDateTime,
    pub hospital_id: i64,
    #[serde(default)]
    pub notes: Option<String>,
}

// ==============================================================================
// REQUEST MODELS
// ==============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HistoryQuery {
    #[serde(default, with = "query_id")]
    pub user_id: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AddRecordRequest {
    #[serde(default, with = "flexible_id")]
    pub user_id: Option<i64>,
    pub report_date: Option<String>,
    pub lab_results: Option<String>,
    pub doctor_notes: Option<String>,
}

// ==============================================================================
// ERRORS
// ==============================================================================

#[derive(Debug, Error)]
pub enum MedicalHistoryError {
    #[error("user_id is required")]
    MissingUserId,

    #[error("report_date is required")]
    MissingReportDate,

    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Medical record not found")]
    RecordNotFound,

    #[error("Database error: {0}")]
    Database(String),
}

impl From<anyhow::Error> for MedicalHistoryError {
    fn from(err: anyhow::Error) -> Self {
        MedicalHistoryError::Database(err.to_string())
    }
}

impl From<serde_json::Error> for MedicalHistoryError {
    fn from(err: serde_json::Error) -> Self {
        MedicalHistoryError::Database(format!("Unexpected row shape: {}", err))
    }
}

impl From<MedicalHistoryError> for AppError {
    fn from(err: MedicalHistoryError) -> Self {
        match err {
            MedicalHistoryError::MissingUserId
            | MedicalHistoryError::MissingReportDate
            | MedicalHistoryError::InvalidDate(_) => AppError::BadRequest(err.to_string()),
            MedicalHistoryError::RecordNotFound => AppError::NotFound(err.to_string()),
            MedicalHistoryError::Database(msg) => {
                tracing::error!("Medical history store failure: {}", msg);
                AppError::Database("Failed to retrieve medical history".to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_lab_result_drops_user_id() {
        let record: MedicalHistoryRecord = serde_json::from_value(json!({
            "history_id": 4,
            "user_id": 1,
            "report_date": "2024-03-15",
            "lab_results": "A1C 6.1%",
            "doctor_notes": null
        })).unwrap();

        let value = serde_json::to_value(LabResult::from(record)).unwrap();

        assert_eq!(value, json!({
            "history_id": 4,
            "report_date": "2024-03-15",
            "lab_results": "A1C 6.1%",
            "doctor_notes": null
        }));
    }

    #[test]
    fn test_condition_ignores_history_id() {
        let condition: Condition = serde_json::from_value(json!({
            "history_id": 4,
            "condition_name": "Asthma",
            "diagnosed_date": "2019-05-01"
        })).unwrap();

        assert_eq!(condition.condition_name, "Asthma");
        assert!(condition.condition_description.is_none());
    }
}
