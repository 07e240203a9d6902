// libs/appointment-cell/src/handlers.rs
use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use chrono::Local;
use serde_json::{json, Value};
use tracing::{debug, error};

use shared_config::AppConfig;
use shared_models::error::AppError;

use crate::models::{
    AppointmentError, AppointmentIdQuery, AvailableTime, AvailableTimesQuery,
    BookAppointmentRequest, CancelAppointmentRequest, CompleteAppointmentRequest, Hospital,
    RescheduleAppointmentRequest, UpcomingAppointment, UserQuery,
};
use crate::services::booking::AppointmentBookingService;

/// Maps a service error onto the HTTP edge, using `action` ("book",
/// "reschedule", ...) for the store failure message.
fn to_app_error(err: AppointmentError, action: &str) -> AppError {
    match err {
        AppointmentError::MissingParameters => AppError::BadRequest(err.to_string()),
        AppointmentError::InvalidTime(_) | AppointmentError::InvalidDate(_) => {
            AppError::BadRequest(err.to_string())
        }
        AppointmentError::InvalidStatusTransition { .. } => AppError::BadRequest(err.to_string()),
        AppointmentError::NotFound | AppointmentError::HospitalNotFound => {
            AppError::NotFound(err.to_string())
        }
        AppointmentError::SlotTaken => {
            AppError::Conflict(format!("Failed to {} appointment: {}", action, err))
        }
        AppointmentError::Database(msg) => {
            error!("Failed to {} appointment: {}", action, msg);
            AppError::Database(format!("Failed to {} appointment", action))
        }
    }
}

pub async fn get_hospitals(
    State(config): State<Arc<AppConfig>>,
) -> Result<Json<Vec<Hospital>>, AppError> {
    debug!("Listing hospitals");

    let service = AppointmentBookingService::new(&config);
    let hospitals = service.list_hospitals().await.map_err(|e| {
        error!("Hospital lookup failed: {}", e);
        AppError::Database("Failed to retrieve hospitals".to_string())
    })?;

    Ok(Json(hospitals))
}

pub async fn get_upcoming_appointment(
    State(config): State<Arc<AppConfig>>,
    Query(query): Query<UserQuery>,
) -> Result<Json<Value>, AppError> {
    let user_id = query.user_id
        .ok_or_else(|| AppError::BadRequest("user_id is required".to_string()))?;

    let service = AppointmentBookingService::new(&config);
    let upcoming = service
        .get_upcoming(user_id, Local::now().naive_local())
        .await
        .map_err(|e| to_app_error(e, "retrieve"))?;

    match upcoming {
        Some(appointment) => Ok(Json(serde_json::to_value(appointment)
            .map_err(|e| AppError::Internal(e.to_string()))?)),
        None => Ok(Json(json!({ "message": "No upcoming appointments" }))),
    }
}

pub async fn list_upcoming_appointments(
    State(config): State<Arc<AppConfig>>,
    Query(query): Query<UserQuery>,
) -> Result<Json<Vec<UpcomingAppointment>>, AppError> {
    let user_id = query.user_id
        .ok_or_else(|| AppError::BadRequest("user_id is required".to_string()))?;

    let service = AppointmentBookingService::new(&config);
    let appointments = service
        .list_upcoming(user_id, Local::now().naive_local())
        .await
        .map_err(|e| to_app_error(e, "retrieve"))?;

    Ok(Json(appointments))
}

pub async fn get_available_times(
    State(config): State<Arc<AppConfig>>,
    Query(query): Query<AvailableTimesQuery>,
) -> Result<Json<Vec<AvailableTime>>, AppError> {
    let (date, hospital_id) = match (query.date.as_deref().filter(|d| !d.is_empty()), query.hospital_id) {
        (Some(date), Some(hospital_id)) => (date, hospital_id),
        _ => return Err(AppError::BadRequest("Missing required parameters".to_string())),
    };
    debug!("Available times requested by user {:?}", query.user_id);

    let service = AppointmentBookingService::new(&config);
    let times = service
        .get_available_times(date, hospital_id)
        .await
        .map_err(|e| match e {
            AppointmentError::Database(msg) => {
                error!("Available times lookup failed: {}", msg);
                AppError::Database("Failed to retrieve available times".to_string())
            }
            other => to_app_error(other, "retrieve"),
        })?;

    Ok(Json(times))
}

pub async fn book_appointment(
    State(config): State<Arc<AppConfig>>,
    Json(request): Json<BookAppointmentRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let service = AppointmentBookingService::new(&config);
    service
        .book_appointment(&request)
        .await
        .map_err(|e| to_app_error(e, "book"))?;

    Ok((StatusCode::CREATED, Json(json!({ "message": "Appointment successfully booked" }))))
}

pub async fn reschedule_appointment(
    State(config): State<Arc<AppConfig>>,
    Json(request): Json<RescheduleAppointmentRequest>,
) -> Result<Json<Value>, AppError> {
    let service = AppointmentBookingService::new(&config);
    service
        .reschedule_appointment(&request)
        .await
        .map_err(|e| to_app_error(e, "reschedule"))?;

    Ok(Json(json!({ "message": "Appointment successfully rescheduled" })))
}

pub async fn cancel_appointment(
    State(config): State<Arc<AppConfig>>,
    Json(request): Json<CancelAppointmentRequest>,
) -> Result<Json<Value>, AppError> {
    let service = AppointmentBookingService::new(&config);
    service
        .cancel_appointment(&request)
        .await
        .map_err(|e| to_app_error(e, "cancel"))?;

    Ok(Json(json!({ "message": "Appointment successfully cancelled" })))
}

pub async fn complete_appointment(
    State(config): State<Arc<AppConfig>>,
    Json(request): Json<CompleteAppointmentRequest>,
) -> Result<Json<Value>, AppError> {
    let service = AppointmentBookingService::new(&config);
    service
        .complete_appointment(&request)
        .await
        .map_err(|e| to_app_error(e, "complete"))?;

    Ok(Json(json!({ "message": "Appointment marked as completed" })))
}

pub async fn get_appointment_id(
    State(config): State<Arc<AppConfig>>,
    Query(query): Query<AppointmentIdQuery>,
) -> Result<Json<Value>, AppError> {
    let (user_id, appointment_time, hospital_id) = match (
        query.user_id,
        query.appointment_time.as_deref().filter(|t| !t.is_empty()),
        query.hospital_id,
    ) {
        (Some(user_id), Some(time), Some(hospital_id)) => (user_id, time, hospital_id),
        _ => return Err(AppError::BadRequest("Missing required parameters".to_string())),
    };

    let service = AppointmentBookingService::new(&config);
    let appointment_id = service
        .get_appointment_id(user_id, appointment_time, hospital_id)
        .await
        .map_err(|e| to_app_error(e, "retrieve"))?;

    Ok(Json(json!({ "appointment_id": appointment_id })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AppointmentStatus;
    use assert_matches::assert_matches;

    #[test]
    fn test_error_mapping() {
        assert_matches!(
            to_app_error(AppointmentError::SlotTaken, "book"),
            AppError::Conflict(msg) if msg == "Failed to book appointment: time slot already taken"
        );
        assert_matches!(
            to_app_error(AppointmentError::Database("boom".to_string()), "cancel"),
            AppError::Database(msg) if msg == "Failed to cancel appointment"
        );
        assert_matches!(
            to_app_error(AppointmentError::NotFound, "cancel"),
            AppError::NotFound(msg) if msg == "Appointment not found"
        );
        assert_matches!(
            to_app_error(
                AppointmentError::InvalidStatusTransition {
                    from: AppointmentStatus::Cancelled,
                    to: AppointmentStatus::Cancelled,
                },
                "cancel",
            ),
            AppError::BadRequest(_)
        );
    }
}
