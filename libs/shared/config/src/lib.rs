use std::env;
use tracing::warn;

pub const APPOINTMENT_TOKEN_SECRET_KEY: &str = "APPOINTMENT_TOKEN_SECRET";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub supabase_url: String,
    pub supabase_anon_key: String,
    /// Signing key for emailed appointment action links. Left unset rather
    /// than defaulted so that signing fails loudly.
    pub appointment_token_secret: Option<String>,
    pub public_base_url: String,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let config = Self {
            supabase_url: env::var("SUPABASE_URL")
                .unwrap_or_else(|_| {
                    warn!("SUPABASE_URL not set, using empty value");
                    String::new()
                }),
            supabase_anon_key: env::var("SUPABASE_ANON_PUBLIC_KEY")
                .unwrap_or_else(|_| {
                    warn!("SUPABASE_ANON_PUBLIC_KEY not set, using empty value");
                    String::new()
                }),
            appointment_token_secret: match env::var(APPOINTMENT_TOKEN_SECRET_KEY) {
                Ok(secret) if !secret.is_empty() => Some(secret),
                _ => {
                    warn!("{} not set, action links cannot be signed", APPOINTMENT_TOKEN_SECRET_KEY);
                    None
                }
            },
            public_base_url: env::var("PUBLIC_BASE_URL")
                .unwrap_or_else(|_| {
                    warn!("PUBLIC_BASE_URL not set, using default");
                    "http://localhost:3000".to_string()
                }),
            port: env::var("PORT")
                .ok()
                .and_then(|port| port.parse().ok())
                .unwrap_or(3000),
        };

        if !config.is_configured() {
            warn!("Application not fully configured - missing environment variables");
        }

        config
    }

    pub fn is_configured(&self) -> bool {
        !self.supabase_url.is_empty()
            && !self.supabase_anon_key.is_empty()
            && self.is_token_signing_configured()
    }

    pub fn is_token_signing_configured(&self) -> bool {
        self.appointment_token_secret
            .as_deref()
            .is_some_and(|secret| !secret.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_secret(secret: Option<&str>) -> AppConfig {
        AppConfig {
            supabase_url: "http://localhost:54321".to_string(),
            supabase_anon_key: "anon".to_string(),
            appointment_token_secret: secret.map(str::to_string),
            public_base_url: "http://localhost:3000".to_string(),
            port: 3000,
        }
    }

    #[test]
    fn test_token_signing_requires_non_empty_secret() {
        assert!(config_with_secret(Some("s3cret")).is_token_signing_configured());
        assert!(!config_with_secret(Some("")).is_token_signing_configured());
        assert!(!config_with_secret(None).is_token_signing_configured());
    }

    #[test]
    fn test_is_configured_includes_secret() {
        assert!(config_with_secret(Some("s3cret")).is_configured());
        assert!(!config_with_secret(None).is_configured());
    }
}
