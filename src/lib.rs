//! HTTP relay that forwards emergency SMS messages to the Twilio API.
//!
//! The relay exposes three endpoints (health check, emergency send, test
//! send), validates input, applies an international-format heuristic to the
//! destination number, performs one provider call per request, and maps the
//! outcome into a uniform JSON envelope. The design is layered: a domain
//! layer of strong types, a transport layer for wire-format quirks, a small
//! client layer orchestrating the provider call, and the axum server on top.
//!
//! ```rust,no_run
//! use sms_relay::{Credentials, TwilioClient};
//! use sms_relay::domain::{MessageText, OutboundSms, RawPhoneNumber, SenderNumber};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), sms_relay::TwilioError> {
//!     let client = TwilioClient::new(Credentials::from_parts("AC...", "token")?);
//!     let sms = OutboundSms::new(
//!         RawPhoneNumber::new("555-123-4567")?.normalized(),
//!         SenderNumber::new("+15550009999")?,
//!         MessageText::new("help")?,
//!     );
//!     let receipt = client.send_message(sms).await?;
//!     println!("sent: {}", receipt.sid.as_str());
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod config;
pub mod domain;
pub mod server;
mod transport;

pub use client::{Credentials, TwilioClient, TwilioClientBuilder, TwilioError};
pub use config::{Config, ConfigError};
pub use domain::{
    AccountSid, AuthToken, DeliveryReceipt, DeliveryStatus, ErrorCode, KnownErrorCode, MessageSid,
    MessageText, OutboundSms, RawPhoneNumber, SenderNumber, ValidationError,
};
pub use server::{AppState, router};
