use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::api::ApiClient;
use crate::error::ClientError;
use crate::models::{AvailableTime, Hospital, UpcomingAppointment};
use crate::session::Session;
use crate::widgets::Alert;

/// Success and error banners disappear after this long.
pub const MESSAGE_TTL: Duration = Duration::from_secs(5);

pub const MISSING_FIELDS: &str = "Please fill in all required fields.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerTab {
    Schedule,
    Upcoming,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub alert: Alert,
    pub expires_at: Instant,
}

/// The row currently being moved to a new time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RescheduleDraft {
    pub appointment_id: i64,
    pub new_time: String,
}

pub struct AppointmentScheduler {
    session: Session,
    pub tab: SchedulerTab,
    pub hospitals: Vec<Hospital>,
    pub selected_hospital: Option<i64>,
    pub selected_date: String,
    pub available_times: Vec<AvailableTime>,
    pub selected_time: String,
    pub upcoming: Option<UpcomingAppointment>,
    pub appointments: Vec<UpcomingAppointment>,
    pub reschedule: Option<RescheduleDraft>,
    pub notice: Option<Notice>,
}

impl AppointmentScheduler {
    pub fn new(session: Session) -> Self {
        Self {
            session,
            tab: SchedulerTab::Schedule,
            hospitals: Vec::new(),
            selected_hospital: None,
            selected_date: String::new(),
            available_times: Vec::new(),
            selected_time: String::new(),
            upcoming: None,
            appointments: Vec::new(),
            reschedule: None,
            notice: None,
        }
    }

    pub fn user_id(&self) -> &str {
        &self.session.user_id
    }

    fn notify(&mut self, alert: Alert, now: Instant) {
        self.notice = Some(Notice {
            alert,
            expires_at: now + MESSAGE_TTL,
        });
    }

    fn fail(&mut self, err: &ClientError, api_fallback: &str, transport_fallback: &str, now: Instant) {
        warn!("Scheduler request failed: {}", err);
        let text = if err.is_api() {
            err.api_message_or(api_fallback)
        } else {
            transport_fallback
        };
        self.notify(Alert::danger(text), now);
    }

    /// Clears the banner once its deadline has passed.
    pub fn dismiss_expired(&mut self, now: Instant) {
        if self.notice.as_ref().is_some_and(|n| now >= n.expires_at) {
            self.notice = None;
        }
    }

    pub fn alert(&self) -> Option<&Alert> {
        self.notice.as_ref().map(|n| &n.alert)
    }

    pub fn set_tab(&mut self, tab: SchedulerTab) {
        self.tab = tab;
    }

    /// Loads hospitals and the user's upcoming appointments side by side.
    pub async fn load(&mut self, api: &ApiClient, now: Instant) {
        let (hospitals, upcoming) = futures::join!(api.hospitals(), self.fetch_upcoming(api));

        match hospitals {
            Ok(hospitals) => self.hospitals = hospitals,
            Err(e) => self.fail(&e, "Failed to load hospitals.", "Failed to load hospitals.", now),
        }
        self.apply_upcoming(upcoming, now);
    }

    async fn fetch_upcoming(
        &self,
        api: &ApiClient,
    ) -> Result<(Option<UpcomingAppointment>, Vec<UpcomingAppointment>), ClientError> {
        futures::try_join!(api.upcoming(self.user_id()), api.list_upcoming(self.user_id()))
    }

    fn apply_upcoming(
        &mut self,
        result: Result<(Option<UpcomingAppointment>, Vec<UpcomingAppointment>), ClientError>,
        now: Instant,
    ) {
        match result {
            Ok((next, all)) => {
                self.upcoming = next;
                self.appointments = all;
            }
            Err(e) => self.fail(
                &e,
                "Failed to load upcoming appointment.",
                "Failed to load upcoming appointment.",
                now,
            ),
        }
    }

    pub async fn refresh_upcoming(&mut self, api: &ApiClient, now: Instant) {
        let result = self.fetch_upcoming(api).await;
        self.apply_upcoming(result, now);
    }

    pub async fn select_hospital(&mut self, api: &ApiClient, hospital_id: Option<i64>, now: Instant) {
        self.selected_hospital = hospital_id;
        self.refresh_times(api, now).await;
    }

    pub async fn select_date(&mut self, api: &ApiClient, date: &str, now: Instant) {
        self.selected_date = date.to_string();
        self.refresh_times(api, now).await;
    }

    pub fn select_time(&mut self, time: &str) {
        self.selected_time = time.to_string();
    }

    /// Refetches open times once both a hospital and a date are chosen.
    async fn refresh_times(&mut self, api: &ApiClient, now: Instant) {
        self.selected_time.clear();

        let hospital_id = match self.selected_hospital {
            Some(id) if !self.selected_date.is_empty() => id,
            _ => {
                self.available_times.clear();
                return;
            }
        };

        debug!("Fetching times for hospital {} on {}", hospital_id, self.selected_date);
        match api.available_times(self.user_id(), &self.selected_date, hospital_id).await {
            Ok(times) => self.available_times = times,
            Err(e) => {
                self.available_times.clear();
                self.fail(&e, "Failed to load available times.", "Failed to load available times.", now);
            }
        }
    }

    fn reset_form(&mut self) {
        self.selected_hospital = None;
        self.selected_date.clear();
        self.selected_time.clear();
        self.available_times.clear();
    }

    /// Books the selected slot. Returns whether the booking went through.
    pub async fn submit(&mut self, api: &ApiClient, now: Instant) -> bool {
        self.notice = None;

        let hospital_id = match self.selected_hospital {
            Some(id) if !self.selected_date.is_empty() && !self.selected_time.is_empty() => id,
            _ => {
                self.notify(Alert::danger(MISSING_FIELDS), now);
                return false;
            }
        };

        let appointment_time = format!("{} {}", self.selected_date, self.selected_time);
        match api.book(self.user_id(), &appointment_time, hospital_id).await {
            Ok(_) => {
                info!("Booked {} at hospital {}", appointment_time, hospital_id);
                self.notify(Alert::success("Appointment successfully booked!"), now);
                self.reset_form();
                self.refresh_upcoming(api, now).await;
                true
            }
            Err(e) => {
                self.fail(
                    &e,
                    "Failed to book appointment.",
                    "An error occurred while booking the appointment.",
                    now,
                );
                false
            }
        }
    }

    pub fn begin_reschedule(&mut self, appointment_id: i64) {
        self.reschedule = Some(RescheduleDraft {
            appointment_id,
            new_time: String::new(),
        });
    }

    pub fn set_reschedule_time(&mut self, new_time: &str) {
        if let Some(draft) = self.reschedule.as_mut() {
            draft.new_time = new_time.to_string();
        }
    }

    pub fn abort_reschedule(&mut self) {
        self.reschedule = None;
    }

    pub fn is_rescheduling(&self, appointment_id: i64) -> bool {
        self.reschedule.as_ref().is_some_and(|d| d.appointment_id == appointment_id)
    }

    pub async fn confirm_reschedule(&mut self, api: &ApiClient, now: Instant) -> bool {
        self.notice = None;

        let draft = match self.reschedule.clone() {
            Some(draft) if !draft.new_time.is_empty() => draft,
            _ => {
                self.notify(Alert::danger(MISSING_FIELDS), now);
                return false;
            }
        };

        match api.reschedule(draft.appointment_id, &draft.new_time).await {
            Ok(_) => {
                self.notify(Alert::success("Appointment successfully rescheduled!"), now);
                self.reschedule = None;
                self.refresh_upcoming(api, now).await;
                true
            }
            Err(e) => {
                self.fail(
                    &e,
                    "Failed to reschedule appointment.",
                    "An error occurred while rescheduling the appointment.",
                    now,
                );
                false
            }
        }
    }

    pub async fn cancel(&mut self, api: &ApiClient, appointment_id: i64, now: Instant) -> bool {
        self.notice = None;

        match api.cancel(appointment_id).await {
            Ok(_) => {
                self.notify(Alert::success("Appointment successfully canceled!"), now);
                if self.is_rescheduling(appointment_id) {
                    self.reschedule = None;
                }
                self.refresh_upcoming(api, now).await;
                true
            }
            Err(e) => {
                self.fail(
                    &e,
                    "Failed to cancel appointment.",
                    "An error occurred while canceling the appointment.",
                    now,
                );
                false
            }
        }
    }
}
