// libs/appointment-cell/src/services/availability.rs
use std::collections::HashSet;
use std::sync::Arc;

use chrono::{Duration, NaiveDate, NaiveTime};
use reqwest::Method;
use serde_json::Value;
use tracing::debug;

use shared_database::supabase::SupabaseClient;
use shared_models::datetime::format_appointment_time;

use crate::models::{Appointment, AppointmentError, AppointmentStatus, AvailableTime, Timeslot};

pub struct AvailabilityService {
    supabase: Arc<SupabaseClient>,
}

impl AvailabilityService {
    pub fn new(supabase: Arc<SupabaseClient>) -> Self {
        Self { supabase }
    }

    pub fn parse_date(date: &str) -> Result<NaiveDate, AppointmentError> {
        NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
            .map_err(|_| AppointmentError::InvalidDate(date.to_string()))
    }

    pub async fn get_timeslots(
        &self,
        date: NaiveDate,
        hospital_id: i64,
    ) -> Result<Vec<Timeslot>, AppointmentError> {
        let path = format!(
            "/rest/v1/timeslots?hospital_id=eq.{}&timeslot_date=eq.{}&order=timeslot_time.asc",
            hospital_id,
            date.format("%Y-%m-%d"),
        );
        let rows: Vec<Value> = self.supabase.request(Method::GET, &path, None).await?;

        rows.into_iter()
            .map(|row| serde_json::from_value(row).map_err(AppointmentError::from))
            .collect()
    }

    /// Scheduled appointments at a hospital during one calendar day.
    pub async fn get_booked_appointments(
        &self,
        date: NaiveDate,
        hospital_id: i64,
    ) -> Result<Vec<Appointment>, AppointmentError> {
        let day_start = date.and_time(NaiveTime::MIN);
        let next_day = day_start + Duration::days(1);

        let path = format!(
            "/rest/v1/appointments?hospital_id=eq.{}&status=eq.{}&appointment_time=gte.{}&appointment_time=lt.{}",
            hospital_id,
            AppointmentStatus::Scheduled,
            urlencoding::encode(&format_appointment_time(&day_start)),
            urlencoding::encode(&format_appointment_time(&next_day)),
        );
        let rows: Vec<Value> = self.supabase.request(Method::GET, &path, None).await?;

        rows.into_iter()
            .map(|row| serde_json::from_value(row).map_err(AppointmentError::from))
            .collect()
    }

    /// Timeslots of the hospital on `date` that no scheduled appointment occupies.
    pub async fn get_available_times(
        &self,
        date: NaiveDate,
        hospital_id: i64,
    ) -> Result<Vec<AvailableTime>, AppointmentError> {
        debug!("Fetching available times for hospital {} on {}", hospital_id, date);

        let timeslots = self.get_timeslots(date, hospital_id).await?;
        if timeslots.is_empty() {
            return Ok(Vec::new());
        }

        let booked = self.get_booked_appointments(date, hospital_id).await?;
        Ok(Self::subtract_booked(timeslots, &booked))
    }

    pub fn subtract_booked(timeslots: Vec<Timeslot>, booked: &[Appointment]) -> Vec<AvailableTime> {
        let taken: HashSet<NaiveTime> = booked
            .iter()
            .filter(|a| a.status == AppointmentStatus::Scheduled)
            .map(|a| a.appointment_time.time())
            .collect();

        let mut times: Vec<NaiveTime> = timeslots
            .into_iter()
            .map(|slot| slot.timeslot_time)
            .filter(|time| !taken.contains(time))
            .collect();
        times.sort();
        times.dedup();

        times
            .into_iter()
            .map(|timeslot_time| AvailableTime { timeslot_time })
            .collect()
    }
}
