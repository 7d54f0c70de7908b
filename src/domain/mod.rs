//! Domain layer: strong types with validation and invariants (no I/O).

mod request;
mod response;
mod validation;
mod value;

pub use request::OutboundSms;
pub use response::DeliveryReceipt;
pub use validation::ValidationError;
pub use value::{
    AccountSid, AuthToken, DeliveryStatus, ErrorCode, KnownErrorCode, MessageSid, MessageText,
    RawPhoneNumber, SenderNumber,
};
