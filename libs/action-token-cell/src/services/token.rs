// libs/action-token-cell/src/services/token.rs
//! Signed action tokens for emailed appointment links.
//!
//! A token has the wire form `"<subject_id>.<hex hmac-sha256(subject_id)>"`.
//! Tokens carry no expiry and no nonce: the same id and secret always yield
//! the same token, and a token stays valid until the secret is rotated.

use std::fmt;

use hmac::{Hmac, Mac};
use sha2::Sha256;
use thiserror::Error;
use tracing::{debug, error};

use shared_config::{AppConfig, APPOINTMENT_TOKEN_SECRET_KEY};

type HmacSha256 = Hmac<Sha256>;

pub const TOKEN_SEPARATOR: char = '.';

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Configuration error: {0} is not set")]
    Configuration(&'static str),

    #[error("Subject identifier must not be empty")]
    EmptySubject,

    #[error("Subject identifier must not contain '{0}'")]
    SeparatorInSubject(char),
}

#[derive(Clone)]
pub struct ActionTokenService {
    secret: Option<String>,
}

impl fmt::Debug for ActionTokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionTokenService")
            .field("secret", &self.secret.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl ActionTokenService {
    pub fn new(config: &AppConfig) -> Self {
        Self::with_secret(config.appointment_token_secret.clone())
    }

    /// An empty secret is treated the same as a missing one.
    pub fn with_secret(secret: Option<String>) -> Self {
        Self {
            secret: secret.filter(|s| !s.is_empty()),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.secret.is_some()
    }

    fn keyed_mac(&self) -> Result<HmacSha256, TokenError> {
        let secret = self.secret.as_deref()
            .ok_or(TokenError::Configuration(APPOINTMENT_TOKEN_SECRET_KEY))?;

        HmacSha256::new_from_slice(secret.as_bytes())
            .map_err(|_| TokenError::Configuration(APPOINTMENT_TOKEN_SECRET_KEY))
    }

    /// Sign `subject_id` into an action token.
    pub fn generate(&self, subject_id: &str) -> Result<String, TokenError> {
        if subject_id.is_empty() {
            return Err(TokenError::EmptySubject);
        }

        // validate splits on the first separator, so a dotted id could never round-trip
        if subject_id.contains(TOKEN_SEPARATOR) {
            return Err(TokenError::SeparatorInSubject(TOKEN_SEPARATOR));
        }

        let mut mac = self.keyed_mac().map_err(|e| {
            error!("Cannot sign action token: {}", e);
            e
        })?;
        mac.update(subject_id.as_bytes());
        let signature = mac.finalize().into_bytes();

        Ok(format!("{}{}{}", subject_id, TOKEN_SEPARATOR, hex::encode(signature)))
    }

    /// Check that `token` was issued for `subject_id`.
    ///
    /// Never fails loudly: malformed input, a foreign id, a bad signature and a
    /// missing secret all come back as `false`.
    pub fn validate(&self, subject_id: &str, token: &str) -> bool {
        if subject_id.is_empty() || token.is_empty() {
            return false;
        }

        let Some((embedded_id, signature_hex)) = token.split_once(TOKEN_SEPARATOR) else {
            debug!("Action token has no separator");
            return false;
        };

        if embedded_id.is_empty() || signature_hex.is_empty() {
            return false;
        }

        if embedded_id != subject_id {
            debug!("Action token subject does not match requested id");
            return false;
        }

        let Some(signature) = decode_hex(signature_hex) else {
            debug!("Action token signature is not lowercase hex");
            return false;
        };

        let Ok(mut mac) = self.keyed_mac() else {
            error!("{} is not set, rejecting action token", APPOINTMENT_TOKEN_SECRET_KEY);
            return false;
        };
        mac.update(subject_id.as_bytes());

        // verify_slice compares in constant time
        mac.verify_slice(&signature).is_ok()
    }
}

/// Only the lowercase form `generate` emits is accepted.
fn decode_hex(value: &str) -> Option<Vec<u8>> {
    if value.bytes().any(|b| b.is_ascii_uppercase()) {
        return None;
    }
    hex::decode(value).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn service() -> ActionTokenService {
        ActionTokenService::with_secret(Some("unit-test-secret".to_string()))
    }

    #[test]
    fn test_generate_is_deterministic() {
        let tokens = service();
        let id = "4b1c6a52-2f7e-4a0b-9d55-8f2d1f0e7c11";

        assert_eq!(tokens.generate(id).unwrap(), tokens.generate(id).unwrap());
    }

    #[test]
    fn test_generate_wire_format() {
        let token = service().generate("appt-1").unwrap();
        let (id, signature) = token.split_once('.').unwrap();

        assert_eq!(id, "appt-1");
        // hex of a 32 byte sha256 mac
        assert_eq!(signature.len(), 64);
        assert!(signature.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_distinct_ids_produce_distinct_tokens() {
        let tokens = service();
        let ids = ["a", "b", "appt-1", "appt-2", "appt-10", "A"];

        for (i, left) in ids.iter().enumerate() {
            for right in &ids[i + 1..] {
                assert_ne!(tokens.generate(left).unwrap(), tokens.generate(right).unwrap());
            }
        }
    }

    #[test]
    fn test_round_trip_validates() {
        let tokens = service();
        for id in ["appt-1", "x", "4b1c6a52-2f7e-4a0b-9d55-8f2d1f0e7c11"] {
            let token = tokens.generate(id).unwrap();
            assert!(tokens.validate(id, &token), "token for {} should validate", id);
        }
    }

    #[test]
    fn test_tampered_signature_rejected() {
        let tokens = service();
        let token = tokens.generate("appt-1").unwrap();
        let sig_start = token.find('.').unwrap() + 1;

        for position in sig_start..token.len() {
            let mut bytes = token.clone().into_bytes();
            bytes[position] = if bytes[position] == b'0' { b'1' } else { b'0' };
            let tampered = String::from_utf8(bytes).unwrap();
            assert!(!tokens.validate("appt-1", &tampered));
        }
    }

    #[test]
    fn test_uppercase_signature_rejected() {
        let tokens = service();
        let token = tokens.generate("appt-1").unwrap();
        let (id, signature) = token.split_once('.').unwrap();
        let shouted = format!("{}.{}", id, signature.to_uppercase());

        assert!(!tokens.validate("appt-1", &shouted));
    }

    #[test]
    fn test_token_bound_to_identifier() {
        let tokens = service();
        let token = tokens.generate("appt-1").unwrap();

        assert!(!tokens.validate("appt-2", &token));
    }

    #[test]
    fn test_malformed_input_fails_closed() {
        let tokens = service();
        let token = tokens.generate("appt-1").unwrap();

        assert!(!tokens.validate("appt-1", ""));
        assert!(!tokens.validate("", &token));
        assert!(!tokens.validate("appt-1", "no-separator-here"));
        assert!(!tokens.validate("appt-1", "appt-1."));
        assert!(!tokens.validate("appt-1", ".abcdef"));
        assert!(!tokens.validate("appt-1", "appt-1.not-hex"));
        assert!(!tokens.validate("appt-1", "appt-1.abc"));
    }

    #[test]
    fn test_only_first_separator_splits() {
        let tokens = service();
        let token = tokens.generate("appt-1").unwrap();
        let extended = format!("{}.extra", token);

        // the trailing ".extra" becomes part of the signature and breaks it
        assert!(!tokens.validate("appt-1", &extended));
    }

    #[test]
    fn test_missing_secret_is_configuration_error() {
        let tokens = ActionTokenService::with_secret(None);
        let err = tokens.generate("appt-1").unwrap_err();

        assert_eq!(err, TokenError::Configuration("APPOINTMENT_TOKEN_SECRET"));
        assert!(err.to_string().contains("APPOINTMENT_TOKEN_SECRET"));
    }

    #[test]
    fn test_empty_secret_is_treated_as_missing() {
        let tokens = ActionTokenService::with_secret(Some(String::new()));
        assert!(!tokens.is_configured());
        assert_matches!(tokens.generate("appt-1"), Err(TokenError::Configuration(_)));
    }

    #[test]
    fn test_missing_secret_fails_validation_closed() {
        let token = service().generate("appt-1").unwrap();
        let unconfigured = ActionTokenService::with_secret(None);

        assert!(!unconfigured.validate("appt-1", &token));
    }

    #[test]
    fn test_rotated_secret_invalidates_tokens() {
        let token = service().generate("appt-1").unwrap();
        let rotated = ActionTokenService::with_secret(Some("rotated-secret".to_string()));

        assert!(!rotated.validate("appt-1", &token));
    }

    #[test]
    fn test_dotted_subject_rejected() {
        let tokens = service();

        assert_eq!(tokens.generate("appt.1"), Err(TokenError::SeparatorInSubject('.')));
        // any id generate accepts must round-trip
        for id in ["appt-1", "appt_1", "appt:1"] {
            let token = tokens.generate(id).unwrap();
            assert!(tokens.validate(id, &token));
        }
    }

    #[test]
    fn test_empty_subject_rejected() {
        assert_eq!(service().generate(""), Err(TokenError::EmptySubject));
    }

    #[test]
    fn test_debug_redacts_secret() {
        let rendered = format!("{:?}", service());
        assert!(!rendered.contains("unit-test-secret"));
    }

    #[test]
    fn test_decode_hex_lowercase_only() {
        assert_eq!(decode_hex("00abff"), Some(vec![0x00, 0xab, 0xff]));
        assert_eq!(decode_hex("00ABFF"), None);
        assert_eq!(decode_hex("0g"), None);
        assert_eq!(decode_hex("abc"), None);
    }
}
