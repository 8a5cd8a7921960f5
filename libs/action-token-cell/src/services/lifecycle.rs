// libs/action-token-cell/src/services/lifecycle.rs
use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::models::{ActionError, AppointmentAction, AppointmentStatus};

pub struct AppointmentLifecycleService;

impl Default for AppointmentLifecycleService {
    fn default() -> Self {
        Self::new()
    }
}

impl AppointmentLifecycleService {
    pub fn new() -> Self {
        Self
    }

    /// Validate that `action` may be applied and return the resulting status
    pub fn validate_action(
        &self,
        current_status: AppointmentStatus,
        action: AppointmentAction,
    ) -> Result<AppointmentStatus, ActionError> {
        debug!("Validating action {} on {} appointment", action, current_status);

        if !self.get_allowed_actions(current_status).contains(&action) {
            warn!("Action {} not allowed for status {}", action, current_status);
            return Err(ActionError::NotAllowed {
                action,
                status: current_status,
            });
        }

        let next_status = match action {
            AppointmentAction::Accept => AppointmentStatus::Confirmed,
            AppointmentAction::Cancel => AppointmentStatus::Cancelled,
            // A moved appointment goes back to waiting for acceptance
            AppointmentAction::Reschedule => AppointmentStatus::Pending,
        };

        info!("Action validated: {} -> {}", current_status, next_status);
        Ok(next_status)
    }

    /// Get every action a link holder may still take for a given status
    pub fn get_allowed_actions(&self, current_status: AppointmentStatus) -> Vec<AppointmentAction> {
        match current_status {
            AppointmentStatus::Pending => vec![
                AppointmentAction::Accept,
                AppointmentAction::Cancel,
                AppointmentAction::Reschedule,
            ],
            AppointmentStatus::Confirmed => vec![
                AppointmentAction::Cancel,
                AppointmentAction::Reschedule,
            ],
            // Terminal states - no actions allowed
            AppointmentStatus::Cancelled => vec![],
            AppointmentStatus::Completed => vec![],
            AppointmentStatus::NoShow => vec![],
        }
    }

    pub fn is_terminal(&self, status: AppointmentStatus) -> bool {
        self.get_allowed_actions(status).is_empty()
    }

    pub fn validate_reschedule_window(
        &self,
        start_time: Option<DateTime<Utc>>,
        end_time: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> Result<(DateTime<Utc>, DateTime<Utc>), ActionError> {
        let (Some(start), Some(end)) = (start_time, end_time) else {
            return Err(ActionError::InvalidReschedule(
                "start_time and end_time are required".to_string(),
            ));
        };

        if start >= end {
            return Err(ActionError::InvalidReschedule(
                "start_time must be before end_time".to_string(),
            ));
        }

        if start <= now {
            return Err(ActionError::InvalidReschedule(
                "cannot reschedule into the past".to_string(),
            ));
        }

        Ok((start, end))
    }
}
