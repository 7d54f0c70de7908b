use crate::domain::value::{DeliveryStatus, MessageSid};

#[derive(Debug, Clone, PartialEq, Eq)]
/// Successful outcome of a message-create call: the provider-assigned sid and
/// the initial delivery status, both passed through verbatim.
pub struct DeliveryReceipt {
    pub sid: MessageSid,
    pub status: DeliveryStatus,
}
