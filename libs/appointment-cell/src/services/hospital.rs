// libs/appointment-cell/src/services/hospital.rs
use std::sync::Arc;

use reqwest::Method;
use serde_json::Value;
use tracing::debug;

use shared_database::supabase::SupabaseClient;

use crate::models::{AppointmentError, Hospital};

pub struct HospitalService {
    supabase: Arc<SupabaseClient>,
}

impl HospitalService {
    pub fn new(supabase: Arc<SupabaseClient>) -> Self {
        Self { supabase }
    }

    pub async fn list_hospitals(&self) -> Result<Vec<Hospital>, AppointmentError> {
        debug!("Fetching hospitals");

        let rows: Vec<Value> = self.supabase
            .request(
                Method::GET,
                "/rest/v1/hospitals?select=hospital_id,name,address,phone_number&order=name.asc",
                None,
            )
            .await?;

        rows.into_iter()
            .map(|row| serde_json::from_value(row).map_err(AppointmentError::from))
            .collect()
    }

    pub async fn get_hospital(&self, hospital_id: i64) -> Result<Option<Hospital>, AppointmentError> {
        debug!("Fetching hospital {}", hospital_id);

        let path = format!(
            "/rest/v1/hospitals?hospital_id=eq.{}&select=hospital_id,name,address,phone_number",
            hospital_id
        );
        let rows: Vec<Value> = self.supabase.request(Method::GET, &path, None).await?;

        match rows.into_iter().next() {
            Some(row) => Ok(Some(serde_json::from_value(row)?)),
            None => Ok(None),
        }
    }
}
