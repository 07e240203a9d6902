// libs/appointment-cell/src/services/lifecycle.rs
use tracing::{debug, warn};

use crate::models::{AppointmentError, AppointmentStatus};

pub struct AppointmentLifecycleService;

impl AppointmentLifecycleService {
    pub fn new() -> Self {
        Self
    }

    /// Validate that a status transition is allowed
    pub fn validate_status_transition(
        &self,
        current_status: AppointmentStatus,
        new_status: AppointmentStatus,
    ) -> Result<(), AppointmentError> {
        debug!("Validating status transition from {} to {}", current_status, new_status);

        if !self.get_valid_transitions(current_status).contains(&new_status) {
            warn!("Invalid status transition attempted: {} -> {}", current_status, new_status);
            return Err(AppointmentError::InvalidStatusTransition {
                from: current_status,
                to: new_status,
            });
        }

        Ok(())
    }

    pub fn get_valid_transitions(&self, current_status: AppointmentStatus) -> Vec<AppointmentStatus> {
        match current_status {
            AppointmentStatus::Scheduled => vec![
                AppointmentStatus::Cancelled,
                AppointmentStatus::Completed,
            ],
            // Terminal states
            AppointmentStatus::Cancelled => vec![],
            AppointmentStatus::Completed => vec![],
        }
    }

    /// Only appointments still on the calendar can move to a new time.
    pub fn can_reschedule(&self, current_status: AppointmentStatus) -> Result<(), AppointmentError> {
        if current_status != AppointmentStatus::Scheduled {
            warn!("Reschedule attempted on {} appointment", current_status);
            return Err(AppointmentError::InvalidStatusTransition {
                from: current_status,
                to: AppointmentStatus::Scheduled,
            });
        }
        Ok(())
    }
}

impl Default for AppointmentLifecycleService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_scheduled_can_be_cancelled_or_completed() {
        let lifecycle = AppointmentLifecycleService::new();

        assert!(lifecycle
            .validate_status_transition(AppointmentStatus::Scheduled, AppointmentStatus::Cancelled)
            .is_ok());
        assert!(lifecycle
            .validate_status_transition(AppointmentStatus::Scheduled, AppointmentStatus::Completed)
            .is_ok());
    }

    #[test]
    fn test_terminal_states_reject_transitions() {
        let lifecycle = AppointmentLifecycleService::new();

        for terminal in [AppointmentStatus::Cancelled, AppointmentStatus::Completed] {
            assert!(lifecycle.get_valid_transitions(terminal).is_empty());
            assert_matches!(
                lifecycle.validate_status_transition(terminal, AppointmentStatus::Cancelled),
                Err(AppointmentError::InvalidStatusTransition { .. })
            );
        }
    }

    #[test]
    fn test_only_scheduled_can_be_rescheduled() {
        let lifecycle = AppointmentLifecycleService::new();

        assert!(lifecycle.can_reschedule(AppointmentStatus::Scheduled).is_ok());
        assert!(lifecycle.can_reschedule(AppointmentStatus::Cancelled).is_err());
        assert!(lifecycle.can_reschedule(AppointmentStatus::Completed).is_err());
    }
}
