use serde::Deserialize;

use crate::domain::{
    DeliveryReceipt, DeliveryStatus, ErrorCode, MessageSid, MessageText, OutboundSms,
    RawPhoneNumber, SenderNumber, ValidationError,
};

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("invalid JSON response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid value in response: {0}")]
    Invalid(#[from] ValidationError),
}

/// JSON shape of a 2xx message-create response. Twilio returns many more
/// fields; only the ones the relay forwards are decoded.
#[derive(Debug, Clone, Deserialize)]
struct MessageJsonResponse {
    sid: String,
    status: String,
}

/// JSON shape of a non-2xx message-create response.
#[derive(Debug, Clone, Deserialize)]
struct ErrorJsonResponse {
    code: i64,
    message: String,
    #[serde(default)]
    more_info: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Decoded provider-side failure: numeric code and message, passed through to
/// the caller verbatim.
pub struct ApiFailure {
    pub code: ErrorCode,
    pub message: String,
    pub more_info: Option<String>,
}

/// Encode the form parameters of a message-create call.
pub fn encode_send_message_form(sms: &OutboundSms) -> Vec<(String, String)> {
    vec![
        (RawPhoneNumber::FIELD.to_owned(), sms.to().raw().to_owned()),
        (
            SenderNumber::FIELD.to_owned(),
            sms.from_number().as_str().to_owned(),
        ),
        (MessageText::FIELD.to_owned(), sms.body().as_str().to_owned()),
    ]
}

/// Decode a 2xx message-create response body into a [`DeliveryReceipt`].
pub fn decode_send_message_response(json: &str) -> Result<DeliveryReceipt, TransportError> {
    let parsed: MessageJsonResponse = serde_json::from_str(json)?;
    Ok(DeliveryReceipt {
        sid: MessageSid::new(parsed.sid)?,
        status: DeliveryStatus::new(parsed.status)?,
    })
}

/// Decode a non-2xx message-create response body into an [`ApiFailure`].
pub fn decode_error_response(json: &str) -> Result<ApiFailure, TransportError> {
    let parsed: ErrorJsonResponse = serde_json::from_str(json)?;
    Ok(ApiFailure {
        code: ErrorCode::new(parsed.code),
        message: parsed.message,
        more_info: parsed.more_info,
    })
}
