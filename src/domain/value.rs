use crate::domain::validation::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Twilio account identifier (`AC...`), used both for basic auth and as a
/// path segment of the message-create endpoint.
///
/// Invariant: non-empty after trimming.
pub struct AccountSid(String);

impl AccountSid {
    /// Environment variable the value is usually loaded from.
    pub const ENV: &'static str = "TWILIO_ACCOUNT_SID";

    /// Create a validated [`AccountSid`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::ENV });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated account SID.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Twilio auth token, the basic-auth password for API calls.
///
/// Invariant: must not be empty (whitespace is preserved and allowed).
pub struct AuthToken(String);

impl AuthToken {
    /// Environment variable the value is usually loaded from.
    pub const ENV: &'static str = "TWILIO_AUTH_TOKEN";

    /// Create a validated [`AuthToken`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ValidationError::Empty { field: Self::ENV });
        }
        Ok(Self(value))
    }

    /// Borrow the token as provided.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Provider-registered sender phone number (`From`).
///
/// Invariant: non-empty after trimming. The value must be a number owned by
/// the Twilio account.
pub struct SenderNumber(String);

impl SenderNumber {
    /// Form field name used by the message-create call (`From`).
    pub const FIELD: &'static str = "From";

    /// Create a validated [`SenderNumber`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated sender number.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Destination phone number as sent to the provider (`To`).
///
/// Invariant: non-empty after trimming. This type does not validate digits or
/// country codes; [`RawPhoneNumber::normalized`] applies the relay's
/// international-format heuristic.
pub struct RawPhoneNumber(String);

impl RawPhoneNumber {
    /// Form field name used by the message-create call (`To`).
    pub const FIELD: &'static str = "To";

    /// Create a validated (non-empty) raw phone number.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Raw (trimmed) value as sent to the provider.
    pub fn raw(&self) -> &str {
        &self.0
    }

    /// Apply the international-format heuristic:
    ///
    /// 1. strip every non-digit character;
    /// 2. exactly 10 digits remain: assume a domestic number, prefix `+1`;
    /// 3. otherwise, if the value does not already start with `+`, prefix
    ///    `+` to the stripped digits;
    /// 4. otherwise keep the value as provided.
    ///
    /// The heuristic is ambiguous for numbers that embed a country code
    /// without a leading `+` (step 3 produces e.g. `+4415550000000` from
    /// `4415550000000`); that behavior is kept, not corrected.
    pub fn normalized(&self) -> RawPhoneNumber {
        let digits: String = self.0.chars().filter(|c| c.is_ascii_digit()).collect();
        if digits.len() == 10 {
            Self(format!("+1{digits}"))
        } else if !self.0.starts_with('+') {
            Self(format!("+{digits}"))
        } else {
            self.clone()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Message text (`Body`).
///
/// Invariant: non-empty after trimming. The original value (including
/// whitespace) is preserved.
pub struct MessageText(String);

impl MessageText {
    /// Form field name used by the message-create call (`Body`).
    pub const FIELD: &'static str = "Body";

    /// Create validated message text.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    /// Borrow the message text as provided.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Provider-assigned message identifier (`sid`, `SM...`) returned by the
/// message-create call.
///
/// Invariant: non-empty after trimming.
pub struct MessageSid(String);

impl MessageSid {
    /// JSON field name in the message-create response (`sid`).
    pub const FIELD: &'static str = "sid";

    /// Create a validated [`MessageSid`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated message sid.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Provider delivery status (`status`) as reported by the message-create
/// response, e.g. `queued` or `accepted`.
///
/// The value is preserved verbatim; the relay does not interpret it.
pub struct DeliveryStatus(String);

impl DeliveryStatus {
    /// JSON field name in the message-create response (`status`).
    pub const FIELD: &'static str = "status";

    /// Create a validated (non-empty) delivery status.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the status as reported by the provider.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Twilio error code carried by failed API responses.
///
/// This value is preserved as-is even when the code is unknown to this crate.
pub struct ErrorCode(i64);

impl ErrorCode {
    /// Construct an error code from its integer representation.
    pub fn new(code: i64) -> Self {
        Self(code)
    }

    /// Get the integer code as reported by the provider.
    pub fn as_i64(self) -> i64 {
        self.0
    }

    /// Map this code to a known variant, if one exists.
    pub fn known_kind(self) -> Option<KnownErrorCode> {
        KnownErrorCode::from_code(self.0)
    }

    /// Returns `true` if this code represents an authentication failure.
    pub fn is_auth_error(self) -> bool {
        matches!(
            self.known_kind(),
            Some(kind) if kind.is_auth_error()
        )
    }

    /// Returns `true` if this code indicates the call could succeed if
    /// repeated later (the relay itself never retries).
    pub fn is_retryable(self) -> bool {
        matches!(
            self.known_kind(),
            Some(kind) if kind.is_retryable()
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
/// Known Twilio error codes supported by this crate.
///
/// Unknown codes are preserved as [`ErrorCode`] and return `None` from
/// [`KnownErrorCode::from_code`].
pub enum KnownErrorCode {
    AuthenticationFailed,
    TooManyRequests,
    InvalidToNumber,
    InvalidFromNumber,
    RegionPermissionMissing,
    MessageBodyRequired,
    FromNumberNotSmsCapable,
    UnverifiedToNumber,
    RecipientOptedOut,
    SendingQueueFull,
    ToNumberNotMobile,
}

impl KnownErrorCode {
    /// Convert a raw Twilio integer code into a known variant.
    pub fn from_code(code: i64) -> Option<Self> {
        Some(match code {
            20003 => Self::AuthenticationFailed,
            20429 => Self::TooManyRequests,
            21211 => Self::InvalidToNumber,
            21212 => Self::InvalidFromNumber,
            21408 => Self::RegionPermissionMissing,
            21602 => Self::MessageBodyRequired,
            21606 => Self::FromNumberNotSmsCapable,
            21608 => Self::UnverifiedToNumber,
            21610 => Self::RecipientOptedOut,
            21611 => Self::SendingQueueFull,
            21614 => Self::ToNumberNotMobile,
            _ => return None,
        })
    }

    /// Returns `true` for credential problems.
    pub fn is_auth_error(self) -> bool {
        matches!(self, Self::AuthenticationFailed)
    }

    /// Returns `true` for transient provider-side conditions.
    pub fn is_retryable(self) -> bool {
        matches!(self, Self::TooManyRequests | Self::SendingQueueFull)
    }
}
