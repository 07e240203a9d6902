use tracing::{debug, warn};

use crate::api::ApiClient;
use crate::models::{Condition, LabResult, Medication};
use crate::session::SessionStore;

pub const NOT_LOGGED_IN: &str = "User not logged in";
pub const FETCH_FAILED: &str = "An error occurred while fetching data.";
pub const LOAD_FAILED: &str = "Failed to load medical history.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryTab {
    Medical,
    Lab,
}

#[derive(Debug, Clone)]
pub struct MedicalHistoryView {
    pub tab: HistoryTab,
    pub loading: bool,
    pub error: Option<String>,
    pub conditions: Vec<Condition>,
    pub medications: Vec<Medication>,
    pub lab_results: Vec<LabResult>,
}

impl Default for MedicalHistoryView {
    fn default() -> Self {
        Self {
            tab: HistoryTab::Medical,
            loading: true,
            error: None,
            conditions: Vec::new(),
            medications: Vec::new(),
            lab_results: Vec::new(),
        }
    }
}

impl MedicalHistoryView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_tab(&mut self, tab: HistoryTab) {
        self.tab = tab;
    }

    /// Fetches conditions, medications and lab results for the stored user.
    pub async fn load<S>(&mut self, api: &ApiClient, sessions: &S)
    where
        S: SessionStore + ?Sized,
    {
        self.loading = true;
        self.error = None;

        let session = match sessions.load() {
            Ok(Some(session)) => session,
            Ok(None) => {
                self.error = Some(NOT_LOGGED_IN.to_string());
                self.loading = false;
                return;
            }
            Err(e) => {
                warn!("Could not read session: {}", e);
                self.error = Some(NOT_LOGGED_IN.to_string());
                self.loading = false;
                return;
            }
        };

        debug!("Loading medical history for user {}", session.user_id);
        let result = futures::try_join!(
            api.conditions(&session.user_id),
            api.medications(&session.user_id),
            api.lab_results(&session.user_id),
        );

        match result {
            Ok((conditions, medications, lab_results)) => {
                self.conditions = conditions;
                self.medications = medications;
                self.lab_results = lab_results;
            }
            Err(e) => {
                warn!("Medical history fetch failed: {}", e);
                self.error = Some(if e.is_api() {
                    e.api_message_or(LOAD_FAILED).to_string()
                } else {
                    FETCH_FAILED.to_string()
                });
            }
        }
        self.loading = false;
    }
}
