//! Credential modes and the check that moves a client to the authenticated state.

use std::fmt;

use tracing::debug;

use super::{EgoSmsClient, EgoSmsError};
use crate::domain::{ApiKey, Password, Username, ValidationError};
use crate::transport::{UserData, balance_envelope};

pub(crate) const API_KEY_UNSUPPORTED: &str =
    "API Key authentication is not supported yet; authenticate with a username and password";

#[derive(Debug, Clone)]
/// Credentials sent in the envelope's `userdata`.
///
/// Only [`Credentials::Basic`] is accepted by the gateway today.
pub enum Credentials {
    /// Account username + password.
    Basic { username: Username, password: Password },
    /// API key. Declared for forward compatibility; validation fails with
    /// [`EgoSmsError::NotImplemented`].
    ApiKey(ApiKey),
}

impl Credentials {
    /// Create [`Credentials::Basic`] and validate that both parts are non-empty.
    pub fn basic(
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Ok(Self::Basic {
            username: Username::new(username)?,
            password: Password::new(password)?,
        })
    }

    /// Create [`Credentials::ApiKey`] and validate that the key is non-empty.
    pub fn api_key(value: impl Into<String>) -> Result<Self, ValidationError> {
        Ok(Self::ApiKey(ApiKey::new(value)?))
    }

    pub fn mode(&self) -> AuthMode {
        match self {
            Self::Basic { .. } => AuthMode::Basic,
            Self::ApiKey(_) => AuthMode::ApiKey,
        }
    }

    pub fn username(&self) -> Option<&Username> {
        match self {
            Self::Basic { username, .. } => Some(username),
            Self::ApiKey(_) => None,
        }
    }

    pub(crate) fn user_data(&self) -> Result<UserData<'_>, EgoSmsError> {
        match self {
            Self::Basic { username, password } => Ok(UserData {
                username: username.as_str(),
                password: password.as_str(),
            }),
            Self::ApiKey(_) => Err(EgoSmsError::NotImplemented(API_KEY_UNSUPPORTED)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthMode {
    Basic,
    ApiKey,
}

impl fmt::Display for AuthMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Basic => f.write_str("basic auth"),
            Self::ApiKey => f.write_str("an api key"),
        }
    }
}

/// Check the client's stored credentials against the gateway and record the outcome.
///
/// Sends a `Balance` envelope and sets the client's authenticated flag to whether
/// the gateway answered `OK`. A gateway rejection or a network failure is reported
/// on the diagnostic stream and yields `Ok(false)`.
///
/// Errors:
/// - [`EgoSmsError::InvalidArgument`] when the client holds no credentials,
/// - [`EgoSmsError::NotImplemented`] for [`Credentials::ApiKey`].
pub async fn validate_credentials(client: &mut EgoSmsClient) -> Result<bool, EgoSmsError> {
    let credentials = client
        .credentials
        .as_ref()
        .ok_or(ValidationError::MissingCredentials)?;
    let mode = credentials.mode();
    let userdata = credentials.user_data()?;

    let outcome = client
        .gateway
        .send(client.endpoint.resolve(), &balance_envelope(userdata))
        .await;

    let validated = match outcome {
        Ok(response) if response.is_ok() => {
            client.reporter.success("Credentials validated successfully.");
            client.reporter.success(&format!("Validated using {mode}"));
            true
        }
        Ok(response) => {
            client.reporter.diagnostic(&format!(
                "Error validating credentials: {}",
                response.message.as_deref().unwrap_or("unknown error")
            ));
            false
        }
        Err(err) => {
            client.reporter.diagnostic(&format!(
                "Error validating credentials: {}",
                super::underlying_message(&err)
            ));
            false
        }
    };

    debug!(mode = %mode, validated, "credential validation finished");
    client.authenticated = validated;
    Ok(validated)
}
