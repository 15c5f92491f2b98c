use std::fmt;

use crate::domain::validation::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// EgoSMS account username.
///
/// Invariant: non-empty after trimming.
pub struct Username(String);

impl Username {
    /// JSON field name used inside `userdata` (`username`).
    pub const FIELD: &'static str = "username";

    /// Create a validated [`Username`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated username.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Clone, PartialEq, Eq, Hash)]
/// EgoSMS account password.
///
/// Invariant: must not be empty (whitespace is preserved and allowed).
pub struct Password(String);

impl Password {
    /// JSON field name used inside `userdata` (`password`).
    pub const FIELD: &'static str = "password";

    /// Create a validated [`Password`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    /// Borrow the password as provided.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(***)")
    }
}

#[derive(Clone, PartialEq, Eq, Hash)]
/// EgoSMS API key.
///
/// Invariant: non-empty after trimming. The gateway does not accept API keys yet,
/// see [`crate::Credentials::ApiKey`].
pub struct ApiKey(String);

impl ApiKey {
    /// Field name reported in validation errors (`api_key`).
    pub const FIELD: &'static str = "api_key";

    /// Create a validated [`ApiKey`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated key.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Sender id shown on the recipient's handset (`senderid`).
///
/// Invariant: non-empty after trimming. Values longer than
/// [`SenderId::RECOMMENDED_MAX_LEN`] are accepted but some networks truncate them.
pub struct SenderId(String);

impl SenderId {
    /// JSON field name used inside `msgdata` (`senderid`).
    pub const FIELD: &'static str = "senderid";

    /// Longest sender id every network delivers unchanged.
    pub const RECOMMENDED_MAX_LEN: usize = 11;

    /// Sender id used when none is configured.
    pub const DEFAULT: &'static str = "EgoSMS";

    /// Create a validated [`SenderId`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the validated sender id.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the id exceeds [`SenderId::RECOMMENDED_MAX_LEN`] characters.
    pub fn exceeds_recommended_len(&self) -> bool {
        self.0.chars().count() > Self::RECOMMENDED_MAX_LEN
    }
}

impl Default for SenderId {
    fn default() -> Self {
        Self(Self::DEFAULT.to_owned())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// SMS message text (`message`).
///
/// Invariant: non-empty and longer than one character. The value is preserved as given.
pub struct MessageText(String);

impl MessageText {
    /// JSON field name used inside `msgdata` (`message`).
    pub const FIELD: &'static str = "message";

    /// Create validated message text.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        match value.chars().count() {
            0 => Err(ValidationError::EmptyMessage),
            1 => Err(ValidationError::SingleCharacterMessage),
            _ => Ok(Self(value)),
        }
    }

    /// Borrow the message text as provided.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Canonical phone number: digits only, country code first, no leading `+`.
///
/// Only [`crate::NumberValidator`] produces values of this type.
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// JSON field name used inside `msgdata` (`number`).
    pub const FIELD: &'static str = "number";

    pub(crate) fn from_canonical(value: String) -> Self {
        Self(value)
    }

    /// Borrow the canonical digits.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PhoneNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
