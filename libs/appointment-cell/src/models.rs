// libs/appointment-cell/src/models.rs
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use shared_models::datetime::appointment_time;
use shared_models::ids::{flexible_id, query_id};

// ==============================================================================
// CORE MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Hospital {
    pub hospital_id: i64,
    pub name: String,
    pub address: Option<String>,
    pub phone_number: Option<String>,
}

/// A bookable time at a hospital on a given day.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Timeslot {
    #[serde(default)]
    pub timeslot_id: Option<i64>,
    pub hospital_id: i64,
    pub timeslot_date: NaiveDate,
    pub timeslot_time: NaiveTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AvailableTime {
    pub timeslot_time: NaiveTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Appointment {
    pub appointment_id: i64,
    pub user_id: i64,
    pub hospital_id: i64,
    #[serde(with = "appointment_time")]
    pub appointment_time: NaiveDateTime,
    pub status: AppointmentStatus,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum AppointmentStatus {
    #[serde(alias = "scheduled")]
    Scheduled,
    #[serde(alias = "cancelled", alias = "canceled")]
    Cancelled,
    #[serde(alias = "completed")]
    Completed,
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppointmentStatus::Scheduled => write!(f, "Scheduled"),
            AppointmentStatus::Cancelled => write!(f, "Cancelled"),
            AppointmentStatus::Completed => write!(f, "Completed"),
        }
    }
}

/// An appointment joined with its hospital, as shown in the upcoming tab.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UpcomingAppointment {
    pub appointment_id: i64,
    #[serde(with = "appointment_time")]
    pub appointment_time: NaiveDateTime,
    pub status: AppointmentStatus,
    pub hospital_id: i64,
    pub hospital_name: String,
    pub address: Option<String>,
}

impl UpcomingAppointment {
    pub fn from_parts(appointment: Appointment, hospital: Option<&Hospital>) -> Self {
        Self {
            appointment_id: appointment.appointment_id,
            appointment_time: appointment.appointment_time,
            status: appointment.status,
            hospital_id: appointment.hospital_id,
            hospital_name: hospital.map(|h| h.name.clone()).unwrap_or_default(),
            address: hospital.and_then(|h| h.address.clone()),
        }
    }
}

// ==============================================================================
// REQUEST MODELS
// ==============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookAppointmentRequest {
    #[serde(default, with = "flexible_id")]
    pub user_id: Option<i64>,
    pub appointment_time: Option<String>,
    #[serde(default, with = "flexible_id")]
    pub hospital_id: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RescheduleAppointmentRequest {
    #[serde(default, with = "flexible_id")]
    pub appointment_id: Option<i64>,
    pub new_time: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CancelAppointmentRequest {
    #[serde(default, with = "flexible_id")]
    pub appointment_id: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompleteAppointmentRequest {
    #[serde(default, with = "flexible_id")]
    pub appointment_id: Option<i64>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserQuery {
    #[serde(default, with = "query_id")]
    pub user_id: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AvailableTimesQuery {
    #[serde(default, with = "query_id")]
    pub user_id: Option<i64>,
    pub date: Option<String>,
    #[serde(default, with = "query_id")]
    pub hospital_id: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppointmentIdQuery {
    #[serde(default, with = "query_id")]
    pub user_id: Option<i64>,
    pub appointment_time: Option<String>,
    #[serde(default, with = "query_id")]
    pub hospital_id: Option<i64>,
}

// ==============================================================================
// ERRORS
// ==============================================================================

#[derive(Debug, Error)]
pub enum AppointmentError {
    #[error("Missing required parameters")]
    MissingParameters,

    #[error("Invalid appointment time '{0}', expected YYYY-MM-DD HH:MM:SS")]
    InvalidTime(String),

    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Appointment not found")]
    NotFound,

    #[error("Hospital not found")]
    HospitalNotFound,

    #[error("time slot already taken")]
    SlotTaken,

    #[error("Cannot move appointment from {from} to {to}")]
    InvalidStatusTransition {
        from: AppointmentStatus,
        to: AppointmentStatus,
    },

    #[error("Database error: {0}")]
    Database(String),
}

impl From<anyhow::Error> for AppointmentError {
    fn from(err: anyhow::Error) -> Self {
        AppointmentError::Database(err.to_string())
    }
}

impl From<serde_json::Error> for AppointmentError {
    fn from(err: serde_json::Error) -> Self {
        AppointmentError::Database(format!("Unexpected row shape: {}", err))
    }
}
