//! Gateway server selection.
//!
//! The sandbox/live choice is process-wide configuration, normally made once at
//! startup with [`set_default_server`] (or `EgoSmsClient::use_sandbox`). Every
//! client whose [`Endpoint`] is [`Endpoint::ProcessDefault`] reads it at each
//! request, so switching servers affects all such clients at once. Clients built
//! with a pinned base URL never observe the toggle.

use std::sync::atomic::{AtomicBool, Ordering};

use crate::domain::ValidationError;

const SANDBOX_URL: &str = "http://sandbox.egosms.co/api/v1/json/";
const LIVE_URL: &str = "https://www.egosms.co/api/v1/json/";

static USE_SANDBOX: AtomicBool = AtomicBool::new(false);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Server {
    /// Test server; messages are not delivered.
    Sandbox,
    #[default]
    Live,
}

impl Server {
    pub fn url(self) -> &'static str {
        match self {
            Self::Sandbox => SANDBOX_URL,
            Self::Live => LIVE_URL,
        }
    }
}

/// Change the process-wide default server.
pub fn set_default_server(server: Server) {
    USE_SANDBOX.store(server == Server::Sandbox, Ordering::SeqCst);
}

/// Current process-wide default server ([`Server::Live`] unless changed).
pub fn default_server() -> Server {
    if USE_SANDBOX.load(Ordering::SeqCst) {
        Server::Sandbox
    } else {
        Server::Live
    }
}

/// Validated `http`/`https` base URL a client can be pinned to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BaseUrl(String);

impl BaseUrl {
    /// Parse and keep the trimmed URL. Only `http` and `https` are accepted.
    pub fn new(url: impl Into<String>) -> Result<Self, ValidationError> {
        let url = url.into();
        let trimmed = url.trim();
        match url::Url::parse(trimmed) {
            Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => {
                Ok(Self(trimmed.to_owned()))
            }
            _ => Err(ValidationError::InvalidBaseUrl { input: url }),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<Server> for BaseUrl {
    fn from(server: Server) -> Self {
        Self(server.url().to_owned())
    }
}

/// Where a client sends its requests.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Endpoint {
    /// Follow the process-wide default server.
    #[default]
    ProcessDefault,
    /// Always use this base URL.
    Pinned(BaseUrl),
}

impl Endpoint {
    /// Pin an explicit base URL. See [`BaseUrl::new`].
    pub fn pinned(url: impl Into<String>) -> Result<Self, ValidationError> {
        BaseUrl::new(url).map(Self::Pinned)
    }

    pub fn server(server: Server) -> Self {
        Self::Pinned(server.into())
    }

    /// Base URL to use for the next request.
    pub fn resolve(&self) -> &str {
        match self {
            Self::ProcessDefault => default_server().url(),
            Self::Pinned(url) => url.as_str(),
        }
    }
}
