use std::sync::Arc;
use axum::extract::{Json, Query, State};
use assert_matches::assert_matches;

use appointment_cell::handlers::{
    book_appointment, cancel_appointment, get_appointment_id, get_available_times,
    get_upcoming_appointment, reschedule_appointment,
};
use appointment_cell::models::{
    AppointmentIdQuery, AvailableTimesQuery, BookAppointmentRequest, CancelAppointmentRequest,
    RescheduleAppointmentRequest, UserQuery,
};
use shared_config::AppConfig;
use shared_models::error::AppError;
use shared_utils::test_utils::TestConfig;

fn create_test_config() -> Arc<AppConfig> {
    TestConfig::default().to_arc()
}

#[tokio::test]
async fn test_upcoming_requires_user_id() {
    let result = get_upcoming_appointment(
        State(create_test_config()),
        Query(UserQuery::default()),
    ).await;

    assert_matches!(result, Err(AppError::BadRequest(msg)) if msg == "user_id is required");
}

#[tokio::test]
async fn test_available_times_requires_date_and_hospital() {
    let result = get_available_times(
        State(create_test_config()),
        Query(AvailableTimesQuery {
            user_id: Some(1),
            date: Some(String::new()),
            hospital_id: Some(1),
        }),
    ).await;

    assert_matches!(result, Err(AppError::BadRequest(msg)) if msg == "Missing required parameters");
}

#[tokio::test]
async fn test_available_times_rejects_bad_date() {
    let result = get_available_times(
        State(create_test_config()),
        Query(AvailableTimesQuery {
            user_id: Some(1),
            date: Some("01/12/2030".to_string()),
            hospital_id: Some(1),
        }),
    ).await;

    assert_matches!(result, Err(AppError::BadRequest(_)));
}

#[tokio::test]
async fn test_book_rejects_blank_time() {
    let result = book_appointment(
        State(create_test_config()),
        Json(BookAppointmentRequest {
            user_id: Some(1),
            appointment_time: Some("   ".to_string()),
            hospital_id: Some(1),
        }),
    ).await;

    assert_matches!(result, Err(AppError::BadRequest(msg)) if msg == "Missing required parameters");
}

#[tokio::test]
async fn test_book_rejects_malformed_time() {
    let result = book_appointment(
        State(create_test_config()),
        Json(BookAppointmentRequest {
            user_id: Some(1),
            appointment_time: Some("tomorrow at ten".to_string()),
            hospital_id: Some(1),
        }),
    ).await;

    assert_matches!(result, Err(AppError::BadRequest(_)));
}

#[tokio::test]
async fn test_reschedule_requires_new_time() {
    let result = reschedule_appointment(
        State(create_test_config()),
        Json(RescheduleAppointmentRequest {
            appointment_id: Some(5),
            new_time: None,
        }),
    ).await;

    assert_matches!(result, Err(AppError::BadRequest(msg)) if msg == "Missing required parameters");
}

#[tokio::test]
async fn test_cancel_requires_appointment_id() {
    let result = cancel_appointment(
        State(create_test_config()),
        Json(CancelAppointmentRequest::default()),
    ).await;

    assert_matches!(result, Err(AppError::BadRequest(_)));
}

#[tokio::test]
async fn test_get_appointment_id_requires_all_parameters() {
    let result = get_appointment_id(
        State(create_test_config()),
        Query(AppointmentIdQuery {
            user_id: Some(1),
            appointment_time: None,
            hospital_id: Some(1),
        }),
    ).await;

    assert_matches!(result, Err(AppError::BadRequest(msg)) if msg == "Missing required parameters");
}
