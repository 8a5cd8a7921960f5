// libs/action-token-cell/src/services/appointment.rs
use chrono::Utc;
use reqwest::Method;
use serde_json::json;
use tracing::{debug, error, info, warn};

use shared_config::AppConfig;
use shared_database::supabase::SupabaseClient;

use crate::models::{
    ActionError, Appointment, AppointmentAction, AppointmentActionRequest, AppointmentSummary,
};
use crate::services::lifecycle::AppointmentLifecycleService;
use crate::services::token::ActionTokenService;

/// Carries out the actions an emailed link grants, with no user session.
pub struct AppointmentActionService {
    supabase: SupabaseClient,
    tokens: ActionTokenService,
    lifecycle: AppointmentLifecycleService,
}

impl AppointmentActionService {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            supabase: SupabaseClient::new(config),
            tokens: ActionTokenService::new(config),
            lifecycle: AppointmentLifecycleService::new(),
        }
    }

    async fn fetch_appointment(&self, appointment_id: &str) -> Result<Option<Appointment>, ActionError> {
        let path = format!(
            "/rest/v1/appointments?id=eq.{}&select=*",
            urlencoding::encode(appointment_id)
        );

        let rows: Vec<Appointment> = self.supabase
            .request(Method::GET, &path, None, None)
            .await
            .map_err(|e| {
                error!("Failed to fetch appointment {}: {}", appointment_id, e);
                ActionError::Database(e.to_string())
            })?;

        Ok(rows.into_iter().next())
    }

    /// Resolve the appointment a link points at.
    ///
    /// The path id is validated against the token's embedded id; a bad token and
    /// an unknown appointment are reported identically.
    pub async fn authorize(&self, appointment_id: &str, token: &str) -> Result<Appointment, ActionError> {
        if !self.tokens.is_configured() {
            error!("Appointment action attempted without a signing secret configured");
            return Err(ActionError::Configuration(
                "appointment token secret is not set".to_string(),
            ));
        }

        if !self.tokens.validate(appointment_id, token) {
            warn!("Rejected action token for appointment {}", appointment_id);
            return Err(ActionError::InvalidLink);
        }

        match self.fetch_appointment(appointment_id).await? {
            Some(appointment) => Ok(appointment),
            None => {
                warn!("Valid token for unknown appointment {}", appointment_id);
                Err(ActionError::InvalidLink)
            }
        }
    }

    pub async fn get_summary(&self, appointment_id: &str, token: &str) -> Result<AppointmentSummary, ActionError> {
        let appointment = self.authorize(appointment_id, token).await?;

        Ok(AppointmentSummary {
            allowed_actions: self.lifecycle.get_allowed_actions(appointment.status),
            id: appointment.id,
            status: appointment.status,
            start_time: appointment.start_time,
            end_time: appointment.end_time,
        })
    }

    pub async fn perform_action(
        &self,
        appointment_id: &str,
        request: AppointmentActionRequest,
    ) -> Result<Appointment, ActionError> {
        let appointment = self.authorize(appointment_id, &request.token).await?;
        let next_status = self.lifecycle.validate_action(appointment.status, request.action)?;

        let mut update = json!({
            "status": next_status,
            "updated_at": Utc::now().to_rfc3339(),
        });

        if request.action == AppointmentAction::Reschedule {
            let (start, end) = self.lifecycle.validate_reschedule_window(
                request.start_time,
                request.end_time,
                Utc::now(),
            )?;
            update["start_time"] = json!(start.to_rfc3339());
            update["end_time"] = json!(end.to_rfc3339());
        }

        debug!("Applying {} to appointment {}", request.action, appointment_id);

        // Only touch the row if it still has the status we validated against
        let path = format!(
            "/rest/v1/appointments?id=eq.{}&status=eq.{}",
            urlencoding::encode(appointment_id),
            appointment.status
        );

        let rows: Vec<Appointment> = self.supabase
            .request_with_headers(
                Method::PATCH,
                &path,
                None,
                Some(update),
                Some(vec![("prefer", "return=representation")]),
            )
            .await
            .map_err(|e| {
                error!("Failed to update appointment {}: {}", appointment_id, e);
                ActionError::Database(e.to_string())
            })?;

        let updated = rows.into_iter().next().ok_or_else(|| {
            warn!("Appointment {} changed while applying {}", appointment_id, request.action);
            ActionError::NotAllowed {
                action: request.action,
                status: appointment.status,
            }
        })?;

        info!("Appointment {} is now {}", updated.id, updated.status);
        Ok(updated)
    }
}
