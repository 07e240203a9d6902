// libs/appointment-cell/src/services/booking.rs
use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDateTime;
use reqwest::Method;
use serde_json::{json, Value};
use tracing::{debug, info, warn};

use shared_config::AppConfig;
use shared_database::supabase::{StoreError, SupabaseClient};
use shared_models::datetime::{format_appointment_time, parse_appointment_time};

use crate::models::{
    Appointment, AppointmentError, AppointmentStatus, AvailableTime, BookAppointmentRequest,
    CancelAppointmentRequest, CompleteAppointmentRequest, Hospital, RescheduleAppointmentRequest,
    UpcomingAppointment,
};
use crate::services::availability::AvailabilityService;
use crate::services::hospital::HospitalService;
use crate::services::lifecycle::AppointmentLifecycleService;

pub struct AppointmentBookingService {
    supabase: Arc<SupabaseClient>,
    hospital_service: HospitalService,
    availability_service: AvailabilityService,
    lifecycle_service: AppointmentLifecycleService,
}

impl AppointmentBookingService {
    pub fn new(config: &AppConfig) -> Self {
        let supabase = Arc::new(SupabaseClient::new(config));

        Self {
            hospital_service: HospitalService::new(Arc::clone(&supabase)),
            availability_service: AvailabilityService::new(Arc::clone(&supabase)),
            lifecycle_service: AppointmentLifecycleService::new(),
            supabase,
        }
    }

    /// A store-side unique violation on a write means another booking got
    /// the slot between our check and our write.
    fn map_write_error(err: anyhow::Error) -> AppointmentError {
        if StoreError::is_conflict(&err) {
            warn!("Store rejected write with conflict: {}", err);
            AppointmentError::SlotTaken
        } else {
            AppointmentError::from(err)
        }
    }

    pub fn parse_time(value: &str) -> Result<NaiveDateTime, AppointmentError> {
        parse_appointment_time(value).ok_or_else(|| AppointmentError::InvalidTime(value.to_string()))
    }

    pub async fn list_hospitals(&self) -> Result<Vec<Hospital>, AppointmentError> {
        self.hospital_service.list_hospitals().await
    }

    pub async fn get_available_times(
        &self,
        date: &str,
        hospital_id: i64,
    ) -> Result<Vec<AvailableTime>, AppointmentError> {
        let date = AvailabilityService::parse_date(date)?;
        self.availability_service.get_available_times(date, hospital_id).await
    }

    pub async fn get_appointment(&self, appointment_id: i64) -> Result<Appointment, AppointmentError> {
        debug!("Fetching appointment {}", appointment_id);

        let path = format!("/rest/v1/appointments?appointment_id=eq.{}", appointment_id);
        let rows: Vec<Value> = self.supabase.request(Method::GET, &path, None).await?;

        match rows.into_iter().next() {
            Some(row) => Ok(serde_json::from_value(row)?),
            None => Err(AppointmentError::NotFound),
        }
    }

    /// The scheduled appointment holding a hospital's slot, if any.
    pub async fn find_scheduled_at(
        &self,
        hospital_id: i64,
        appointment_time: &NaiveDateTime,
    ) -> Result<Option<Appointment>, AppointmentError> {
        let path = format!(
            "/rest/v1/appointments?hospital_id=eq.{}&appointment_time=eq.{}&status=eq.{}",
            hospital_id,
            urlencoding::encode(&format_appointment_time(appointment_time)),
            AppointmentStatus::Scheduled,
        );
        let rows: Vec<Value> = self.supabase.request(Method::GET, &path, None).await?;

        match rows.into_iter().next() {
            Some(row) => Ok(Some(serde_json::from_value(row)?)),
            None => Ok(None),
        }
    }

    pub async fn book_appointment(
        &self,
        request: &BookAppointmentRequest,
    ) -> Result<Appointment, AppointmentError> {
        let (user_id, hospital_id, raw_time) = match (
            request.user_id,
            request.hospital_id,
            request.appointment_time.as_deref().map(str::trim).filter(|t| !t.is_empty()),
        ) {
            (Some(user_id), Some(hospital_id), Some(time)) => (user_id, hospital_id, time),
            _ => return Err(AppointmentError::MissingParameters),
        };
        let appointment_time = Self::parse_time(raw_time)?;

        debug!("Booking appointment for user {} at hospital {} on {}", user_id, hospital_id, appointment_time);

        if self.hospital_service.get_hospital(hospital_id).await?.is_none() {
            return Err(AppointmentError::HospitalNotFound);
        }

        if self.find_scheduled_at(hospital_id, &appointment_time).await?.is_some() {
            warn!("Slot {} at hospital {} already taken", appointment_time, hospital_id);
            return Err(AppointmentError::SlotTaken);
        }

        let body = json!({
            "user_id": user_id,
            "hospital_id": hospital_id,
            "appointment_time": format_appointment_time(&appointment_time),
            "status": AppointmentStatus::Scheduled,
        });

        let rows: Vec<Value> = self.supabase
            .request_with_headers(
                Method::POST,
                "/rest/v1/appointments",
                Some(body),
                Some(SupabaseClient::representation_headers()),
            )
            .await
            .map_err(Self::map_write_error)?;

        let appointment: Appointment = rows
            .into_iter()
            .next()
            .ok_or_else(|| AppointmentError::Database("Insert returned no rows".to_string()))
            .and_then(|row| serde_json::from_value(row).map_err(AppointmentError::from))?;

        info!("Booked appointment {} for user {}", appointment.appointment_id, user_id);
        Ok(appointment)
    }

    pub async fn reschedule_appointment(
        &self,
        request: &RescheduleAppointmentRequest,
    ) -> Result<Appointment, AppointmentError> {
        let (appointment_id, raw_time) = match (
            request.appointment_id,
            request.new_time.as_deref().map(str::trim).filter(|t| !t.is_empty()),
        ) {
            (Some(id), Some(time)) => (id, time),
            _ => return Err(AppointmentError::MissingParameters),
        };
        let new_time = Self::parse_time(raw_time)?;

        let current = self.get_appointment(appointment_id).await?;
        self.lifecycle_service.can_reschedule(current.status)?;

        if let Some(holder) = self.find_scheduled_at(current.hospital_id, &new_time).await? {
            if holder.appointment_id != appointment_id {
                warn!("Reschedule of {} rejected, {} is taken", appointment_id, new_time);
                return Err(AppointmentError::SlotTaken);
            }
        }

        let updated = self
            .update_appointment(appointment_id, json!({
                "appointment_time": format_appointment_time(&new_time),
            }))
            .await?;

        info!("Rescheduled appointment {} to {}", appointment_id, new_time);
        Ok(updated)
    }

    pub async fn cancel_appointment(
        &self,
        request: &CancelAppointmentRequest,
    ) -> Result<Appointment, AppointmentError> {
        let appointment_id = request.appointment_id.ok_or(AppointmentError::MissingParameters)?;

        let current = self.get_appointment(appointment_id).await?;
        self.lifecycle_service
            .validate_status_transition(current.status, AppointmentStatus::Cancelled)?;

        let updated = self
            .update_appointment(appointment_id, json!({ "status": AppointmentStatus::Cancelled }))
            .await?;

        info!("Cancelled appointment {}", appointment_id);
        Ok(updated)
    }

    pub async fn complete_appointment(
        &self,
        request: &CompleteAppointmentRequest,
    ) -> Result<Appointment, AppointmentError> {
        let appointment_id = request.appointment_id.ok_or(AppointmentError::MissingParameters)?;

        let current = self.get_appointment(appointment_id).await?;
        self.lifecycle_service
            .validate_status_transition(current.status, AppointmentStatus::Completed)?;

        let mut changes = json!({ "status": AppointmentStatus::Completed });
        if let Some(notes) = request.notes.as_deref().filter(|n| !n.trim().is_empty()) {
            changes["notes"] = json!(notes);
        }

        let updated = self.update_appointment(appointment_id, changes).await?;

        info!("Completed appointment {}", appointment_id);
        Ok(updated)
    }

    async fn update_appointment(
        &self,
        appointment_id: i64,
        changes: Value,
    ) -> Result<Appointment, AppointmentError> {
        let path = format!("/rest/v1/appointments?appointment_id=eq.{}", appointment_id);
        let rows: Vec<Value> = self.supabase
            .request_with_headers(
                Method::PATCH,
                &path,
                Some(changes),
                Some(SupabaseClient::representation_headers()),
            )
            .await
            .map_err(Self::map_write_error)?;

        match rows.into_iter().next() {
            Some(row) => Ok(serde_json::from_value(row)?),
            None => Err(AppointmentError::NotFound),
        }
    }

    async fn scheduled_after(
        &self,
        user_id: i64,
        now: &NaiveDateTime,
        limit: Option<usize>,
    ) -> Result<Vec<Appointment>, AppointmentError> {
        let mut path = format!(
            "/rest/v1/appointments?user_id=eq.{}&status=eq.{}&appointment_time=gt.{}&order=appointment_time.asc",
            user_id,
            AppointmentStatus::Scheduled,
            urlencoding::encode(&format_appointment_time(now)),
        );
        if let Some(limit) = limit {
            path.push_str(&format!("&limit={}", limit));
        }

        let rows: Vec<Value> = self.supabase.request(Method::GET, &path, None).await?;
        rows.into_iter()
            .map(|row| serde_json::from_value(row).map_err(AppointmentError::from))
            .collect()
    }

    /// Earliest scheduled appointment strictly after `now`.
    pub async fn get_upcoming(
        &self,
        user_id: i64,
        now: NaiveDateTime,
    ) -> Result<Option<UpcomingAppointment>, AppointmentError> {
        debug!("Fetching upcoming appointment for user {}", user_id);

        let appointment = match self.scheduled_after(user_id, &now, Some(1)).await?.into_iter().next() {
            Some(appointment) => appointment,
            None => return Ok(None),
        };

        let hospital = self.hospital_service.get_hospital(appointment.hospital_id).await?;
        Ok(Some(UpcomingAppointment::from_parts(appointment, hospital.as_ref())))
    }

    pub async fn list_upcoming(
        &self,
        user_id: i64,
        now: NaiveDateTime,
    ) -> Result<Vec<UpcomingAppointment>, AppointmentError> {
        debug!("Listing upcoming appointments for user {}", user_id);

        let appointments = self.scheduled_after(user_id, &now, None).await?;
        if appointments.is_empty() {
            return Ok(Vec::new());
        }

        let hospitals: HashMap<i64, Hospital> = self.hospital_service
            .list_hospitals()
            .await?
            .into_iter()
            .map(|h| (h.hospital_id, h))
            .collect();

        Ok(appointments
            .into_iter()
            .map(|a| {
                let hospital = hospitals.get(&a.hospital_id);
                UpcomingAppointment::from_parts(a, hospital)
            })
            .collect())
    }

    pub async fn get_appointment_id(
        &self,
        user_id: i64,
        appointment_time: &str,
        hospital_id: i64,
    ) -> Result<i64, AppointmentError> {
        let appointment_time = Self::parse_time(appointment_time)?;

        let path = format!(
            "/rest/v1/appointments?user_id=eq.{}&hospital_id=eq.{}&appointment_time=eq.{}&status=eq.{}&select=appointment_id",
            user_id,
            hospital_id,
            urlencoding::encode(&format_appointment_time(&appointment_time)),
            AppointmentStatus::Scheduled,
        );
        let rows: Vec<Value> = self.supabase.request(Method::GET, &path, None).await?;

        rows.first()
            .and_then(|row| row["appointment_id"].as_i64())
            .ok_or(AppointmentError::NotFound)
    }
}
