// libs/medical-history-cell/src/handlers.rs
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use tracing::{debug, error};

use shared_config::AppConfig;
use shared_models::error::AppError;

use crate::models::{
    AddRecordRequest, Condition, HistoryQuery, LabResult, MedicalHistoryError,
    MedicalHistoryRecord, Medication, PriorAppointment,
};
use crate::services::MedicalHistoryService;

fn require_user(query: &HistoryQuery) -> Result<i64, AppError> {
    query.user_id.ok_or_else(|| MedicalHistoryError::MissingUserId.into())
}

pub async fn get_conditions(
    State(config): State<Arc<AppConfig>>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<Vec<Condition>>, AppError> {
    let user_id = require_user(&query)?;
    debug!("Conditions requested for user {}", user_id);

    let conditions = MedicalHistoryService::new(&config).get_conditions(user_id).await?;
    Ok(Json(conditions))
}

pub async fn get_medications(
    State(config): State<Arc<AppConfig>>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<Vec<Medication>>, AppError> {
    let user_id = require_user(&query)?;
    debug!("Medications requested for user {}", user_id);

    let medications = MedicalHistoryService::new(&config).get_medications(user_id).await?;
    Ok(Json(medications))
}

pub async fn get_lab_results(
    State(config): State<Arc<AppConfig>>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<Vec<LabResult>>, AppError> {
    let user_id = require_user(&query)?;
    debug!("Lab results requested for user {}", user_id);

    let results = MedicalHistoryService::new(&config).get_lab_results(user_id).await?;
    Ok(Json(results))
}

pub async fn get_prior_appointments(
    State(config): State<Arc<AppConfig>>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<Vec<PriorAppointment>>, AppError> {
    let user_id = require_user(&query)?;

    let appointments = MedicalHistoryService::new(&config)
        .get_prior_appointments(user_id)
        .await?;
    Ok(Json(appointments))
}

pub async fn add_medical_record(
    State(config): State<Arc<AppConfig>>,
    Json(request): Json<AddRecordRequest>,
) -> Result<(StatusCode, Json<MedicalHistoryRecord>), AppError> {
    let record = MedicalHistoryService::new(&config)
        .add_record(&request)
        .await
        .map_err(|e| match e {
            MedicalHistoryError::Database(msg) => {
                error!("Failed to add medical record: {}", msg);
                AppError::Database("Failed to add medical record".to_string())
            }
            other => other.into(),
        })?;

    Ok((StatusCode::CREATED, Json(record)))
}

pub async fn delete_medical_record(
    State(config): State<Arc<AppConfig>>,
    Path(history_id): Path<String>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<Value>, AppError> {
    let user_id = require_user(&query)?;
    let history_id: i64 = history_id
        .trim()
        .parse()
        .map_err(|_| AppError::from(MedicalHistoryError::RecordNotFound))?;

    MedicalHistoryService::new(&config)
        .delete_record(user_id, history_id)
        .await
        .map_err(|e| match e {
            MedicalHistoryError::Database(msg) => {
                error!("Failed to delete medical record {}: {}", history_id, msg);
                AppError::Database("Failed to delete medical record".to_string())
            }
            other => other.into(),
        })?;

    Ok(Json(json!({ "message": "Medical record deleted" })))
}
