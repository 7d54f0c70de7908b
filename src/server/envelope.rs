//! Request DTOs and the JSON envelopes returned by every endpoint.

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::client::TwilioError;
use crate::domain::{DeliveryReceipt, RawPhoneNumber};

/// Body of `POST /send-emergency-sms`. `contactName` and `hasLocation` are
/// used for logging only.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmsRequest {
    #[serde(default)]
    pub to: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub contact_name: Option<String>,
    #[serde(default)]
    pub has_location: Option<bool>,
}

/// Body of `POST /test-sms`.
#[derive(Debug, Clone, Deserialize)]
pub struct TestSmsRequest {
    #[serde(default)]
    pub to: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct HealthBody {
    pub status: &'static str,
    pub timestamp: String,
}

impl HealthBody {
    pub fn now() -> Self {
        Self {
            status: "ok",
            timestamp: now_timestamp(),
        }
    }
}

/// Success envelope of the emergency endpoint: provider sid and status plus
/// the normalized destination.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmergencySent {
    pub success: bool,
    pub message_sid: String,
    pub status: String,
    pub to: String,
    pub timestamp: String,
}

impl EmergencySent {
    pub fn new(receipt: &DeliveryReceipt, to: &RawPhoneNumber) -> Self {
        Self {
            success: true,
            message_sid: receipt.sid.as_str().to_owned(),
            status: receipt.status.as_str().to_owned(),
            to: to.raw().to_owned(),
            timestamp: now_timestamp(),
        }
    }
}

/// Failure envelope of the emergency endpoint. `code` carries the provider's
/// numeric code when one exists and the string `"UNKNOWN_ERROR"` otherwise.
#[derive(Debug, Serialize)]
pub struct EmergencyFailed {
    pub success: bool,
    pub error: String,
    pub code: ErrorCodeBody,
    pub timestamp: String,
}

impl EmergencyFailed {
    pub fn from_error(err: &TwilioError) -> Self {
        let code = match err {
            TwilioError::Api { code, .. } => ErrorCodeBody::Numeric(code.as_i64()),
            _ => ErrorCodeBody::Label("UNKNOWN_ERROR"),
        };
        Self {
            success: false,
            error: error_text(err),
            code,
            timestamp: now_timestamp(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ErrorCodeBody {
    Numeric(i64),
    Label(&'static str),
}

/// Success envelope of the test endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TestSent {
    pub success: bool,
    pub message_sid: String,
    pub message: &'static str,
}

impl TestSent {
    pub fn new(receipt: &DeliveryReceipt) -> Self {
        Self {
            success: true,
            message_sid: receipt.sid.as_str().to_owned(),
            message: "Test SMS sent successfully",
        }
    }
}

/// Minimal failure envelope: validation failures on both POST endpoints and
/// provider failures on the test endpoint.
#[derive(Debug, Serialize)]
pub struct RequestFailed {
    pub success: bool,
    pub error: String,
}

impl RequestFailed {
    pub fn validation(message: &str) -> Self {
        Self {
            success: false,
            error: message.to_owned(),
        }
    }

    pub fn from_error(err: &TwilioError) -> Self {
        Self {
            success: false,
            error: error_text(err),
        }
    }
}

/// The provider's own message for API failures, the error's display form for
/// everything else.
fn error_text(err: &TwilioError) -> String {
    match err {
        TwilioError::Api { message, .. } => message.clone(),
        other => other.to_string(),
    }
}

fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
