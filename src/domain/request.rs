use crate::domain::value::{MessageText, RawPhoneNumber, SenderNumber};

#[derive(Debug, Clone)]
/// A single outbound message handed to the client layer: destination, sender,
/// and body, all validated at construction.
///
/// Whether `to` has been normalized is the caller's concern: the emergency
/// endpoint sends [`RawPhoneNumber::normalized`] output, the test endpoint
/// sends the number as received.
pub struct OutboundSms {
    to: RawPhoneNumber,
    from: SenderNumber,
    body: MessageText,
}

impl OutboundSms {
    pub fn new(to: RawPhoneNumber, from: SenderNumber, body: MessageText) -> Self {
        Self { to, from, body }
    }

    pub fn to(&self) -> &RawPhoneNumber {
        &self.to
    }

    pub fn from_number(&self) -> &SenderNumber {
        &self.from
    }

    pub fn body(&self) -> &MessageText {
        &self.body
    }
}
