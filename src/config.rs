//! Environment configuration for the relay process.
//!
//! All provider settings are required at startup; the listening port falls
//! back to a default. A `.env` file is loaded best-effort before the process
//! environment is read.

use crate::domain::{AccountSid, AuthToken, SenderNumber, ValidationError};

/// Listening port used when `PORT` is not set.
pub const DEFAULT_PORT: u16 = 3000;

const SENDER_VAR: &str = "TWILIO_PHONE_NUMBER";
const PORT_VAR: &str = "PORT";

#[derive(Debug, Clone)]
pub struct Config {
    /// Provider account identifier (`TWILIO_ACCOUNT_SID`).
    pub account_sid: AccountSid,
    /// Provider auth secret (`TWILIO_AUTH_TOKEN`).
    pub auth_token: AuthToken,
    /// Provider-registered sender number (`TWILIO_PHONE_NUMBER`).
    pub sender_number: SenderNumber,
    /// Listening port (`PORT`, default 3000).
    pub port: u16,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Required environment variable is missing.
    #[error("missing required environment variable: {0}")]
    MissingVar(&'static str),

    /// Environment variable has an invalid value.
    #[error("invalid value for {var}: {reason}")]
    InvalidValue { var: &'static str, reason: String },
}

impl Config {
    /// Load configuration from the process environment.
    ///
    /// Required variables: `TWILIO_ACCOUNT_SID`, `TWILIO_AUTH_TOKEN`,
    /// `TWILIO_PHONE_NUMBER`. Optional: `PORT` (default 3000).
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build a config from an arbitrary variable lookup. Kept separate from
    /// [`Config::from_env`] so tests never mutate process environment.
    pub(crate) fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let account_sid = AccountSid::new(required(&lookup, AccountSid::ENV)?)
            .map_err(|err| invalid(AccountSid::ENV, err))?;
        let auth_token = AuthToken::new(required(&lookup, AuthToken::ENV)?)
            .map_err(|err| invalid(AuthToken::ENV, err))?;
        let sender_number = SenderNumber::new(required(&lookup, SENDER_VAR)?)
            .map_err(|err| invalid(SENDER_VAR, err))?;

        let port = match lookup(PORT_VAR) {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidValue {
                    var: PORT_VAR,
                    reason: format!("must be a port number, got: {raw}"),
                })?,
            None => DEFAULT_PORT,
        };

        Ok(Self {
            account_sid,
            auth_token,
            sender_number,
            port,
        })
    }
}

fn required(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
) -> Result<String, ConfigError> {
    lookup(var).ok_or(ConfigError::MissingVar(var))
}

fn invalid(var: &'static str, err: ValidationError) -> ConfigError {
    ConfigError::InvalidValue {
        var,
        reason: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_env(name: &str) -> Option<String> {
        match name {
            "TWILIO_ACCOUNT_SID" => Some("ACtest".to_owned()),
            "TWILIO_AUTH_TOKEN" => Some("secret".to_owned()),
            "TWILIO_PHONE_NUMBER" => Some("+15550009999".to_owned()),
            _ => None,
        }
    }

    #[test]
    fn loads_required_variables_and_defaults_the_port() {
        let config = Config::from_lookup(full_env).unwrap();
        assert_eq!(config.account_sid.as_str(), "ACtest");
        assert_eq!(config.auth_token.as_str(), "secret");
        assert_eq!(config.sender_number.as_str(), "+15550009999");
        assert_eq!(config.port, DEFAULT_PORT);
    }

    #[test]
    fn reads_port_override() {
        let config = Config::from_lookup(|name| match name {
            "PORT" => Some("8080".to_owned()),
            other => full_env(other),
        })
        .unwrap();
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn missing_variable_is_reported_by_name() {
        let err = Config::from_lookup(|name| match name {
            "TWILIO_AUTH_TOKEN" => None,
            other => full_env(other),
        })
        .unwrap_err();
        assert!(matches!(err, ConfigError::MissingVar("TWILIO_AUTH_TOKEN")));
    }

    #[test]
    fn empty_variable_is_rejected() {
        let err = Config::from_lookup(|name| match name {
            "TWILIO_ACCOUNT_SID" => Some("   ".to_owned()),
            other => full_env(other),
        })
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue {
                var: "TWILIO_ACCOUNT_SID",
                ..
            }
        ));
    }

    #[test]
    fn non_numeric_port_is_rejected() {
        let err = Config::from_lookup(|name| match name {
            "PORT" => Some("https".to_owned()),
            other => full_env(other),
        })
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { var: "PORT", .. }));
    }
}
