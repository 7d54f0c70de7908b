//! Transport layer: wire-format details of the Twilio message-create call
//! (form encoding and JSON response decoding).

mod send_message;

pub use send_message::{
    ApiFailure, TransportError, decode_error_response, decode_send_message_response,
    encode_send_message_form,
};
