use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
    NoShow,
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            AppointmentStatus::Pending => "pending",
            AppointmentStatus::Confirmed => "confirmed",
            AppointmentStatus::Cancelled => "cancelled",
            AppointmentStatus::Completed => "completed",
            AppointmentStatus::NoShow => "no_show",
        };
        write!(f, "{}", value)
    }
}

/// What an emailed link lets its bearer do.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentAction {
    Accept,
    Cancel,
    Reschedule,
}

impl AppointmentAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentAction::Accept => "accept",
            AppointmentAction::Cancel => "cancel",
            AppointmentAction::Reschedule => "reschedule",
        }
    }
}

impl fmt::Display for AppointmentAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: String,
    pub business_id: String,
    pub client_id: Option<String>,
    pub employee_id: Option<String>,
    pub service_id: Option<String>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub status: AppointmentStatus,
    pub notes: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Body of `POST /appointments/{appointment_id}/action`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppointmentActionRequest {
    pub action: AppointmentAction,
    pub token: String,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub struct TokenQuery {
    pub token: String,
}

/// What the link landing page is allowed to see.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppointmentSummary {
    pub id: String,
    pub status: AppointmentStatus,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub allowed_actions: Vec<AppointmentAction>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActionLinks {
    pub accept: String,
    pub cancel: String,
    pub reschedule: String,
}

#[derive(Debug, Error)]
pub enum ActionError {
    /// Covers bad signatures, mismatched ids and unknown appointments alike.
    #[error("Invalid or expired link")]
    InvalidLink,

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Cannot {action} an appointment that is {status}")]
    NotAllowed {
        action: AppointmentAction,
        status: AppointmentStatus,
    },

    #[error("Invalid reschedule request: {0}")]
    InvalidReschedule(String),

    #[error("Database error: {0}")]
    Database(String),
}
