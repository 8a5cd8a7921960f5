use shared_config::AppConfig;

use crate::models::{ActionLinks, AppointmentAction};
use crate::services::token::{ActionTokenService, TokenError};

/// Builds the accept / cancel / reschedule URLs placed in notification emails.
///
/// Links open the GET landing route; the action itself is then POSTed from there.
pub struct ActionLinkBuilder {
    base_url: String,
    tokens: ActionTokenService,
}

impl ActionLinkBuilder {
    pub fn new(config: &AppConfig) -> Self {
        Self::with_tokens(&config.public_base_url, ActionTokenService::new(config))
    }

    pub fn with_tokens(base_url: &str, tokens: ActionTokenService) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            tokens,
        }
    }

    pub fn link_for(
        &self,
        appointment_id: &str,
        action: AppointmentAction,
    ) -> Result<String, TokenError> {
        let token = self.tokens.generate(appointment_id)?;

        Ok(format!(
            "{}/appointments/{}?token={}&action={}",
            self.base_url,
            urlencoding::encode(appointment_id),
            urlencoding::encode(&token),
            action.as_str(),
        ))
    }

    pub fn links_for(&self, appointment_id: &str) -> Result<ActionLinks, TokenError> {
        Ok(ActionLinks {
            accept: self.link_for(appointment_id, AppointmentAction::Accept)?,
            cancel: self.link_for(appointment_id, AppointmentAction::Cancel)?,
            reschedule: self.link_for(appointment_id, AppointmentAction::Reschedule)?,
        })
    }
}
