//! Client layer: orchestrates transport calls and maps transport ↔ domain.

mod credentials;
mod protocol;
mod server;
#[cfg(test)]
mod testing;

use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

pub use credentials::{AuthMode, Credentials, validate_credentials};
pub use server::{BaseUrl, Endpoint, Server, default_server, set_default_server};

use crate::domain::{
    ApiResponse, MessageRequest, MessageText, NumberPlan, NumberValidator, SendOptions, SenderId,
    ValidationError,
};
use crate::report::{ConsoleReporter, Reporter};
use crate::transport::{UserData, balance_envelope, send_sms_envelope};
use protocol::{Gateway, HttpTransport, ReqwestTransport};

const NOT_AUTHENTICATED: &str =
    "SDK is not authenticated. Please authenticate before performing actions.";
const REAUTHENTICATING: &str = "Attempting to re-authenticate with provided credentials...";
const NO_VALID_NUMBERS: &str = "No valid phone numbers provided. Please check inputs.";
const SENDER_ID_TOO_LONG: &str = "Warning: Sender ID length exceeds 11 characters. Some networks may truncate or reject messages.";

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`EgoSmsClient`].
///
/// Gateway rejections (`Status: Failed`) are not errors; they surface as `false`
/// or `None` from the high-level calls and as [`ApiResponse`] from the `query_*` calls.
pub enum EgoSmsError {
    /// HTTP client / transport failure (DNS, TLS, timeouts, etc).
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn StdError + Send + Sync>),

    /// The balance request could not reach the gateway.
    #[error("Failed to get balance: {0}")]
    Balance(#[source] Box<dyn StdError + Send + Sync>),

    /// The request envelope could not be serialized.
    #[error("{0}")]
    Encode(#[source] Box<dyn StdError + Send + Sync>),

    /// The requested capability exists in the API surface but is not available.
    #[error("{0}")]
    NotImplemented(&'static str),

    /// A precondition on the arguments or client state was violated.
    #[error("invalid argument: {0}")]
    InvalidArgument(#[from] ValidationError),
}

fn underlying_message(err: &EgoSmsError) -> String {
    match err {
        EgoSmsError::Transport(source) | EgoSmsError::Balance(source) => source.to_string(),
        other => other.to_string(),
    }
}

#[derive(Debug, Clone)]
/// Builder for [`EgoSmsClient`].
///
/// Use this when you need to pin a server, change the number plan, the timeout,
/// the user-agent, or where reports are written.
pub struct EgoSmsClientBuilder {
    credentials: Option<Credentials>,
    sender_id: SenderId,
    endpoint: Endpoint,
    base_url: Option<String>,
    number_plan: NumberPlan,
    timeout: Option<Duration>,
    user_agent: Option<String>,
    reporter: Arc<dyn Reporter>,
}

impl Default for EgoSmsClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl EgoSmsClientBuilder {
    /// Create a builder with no credentials, the process-wide server, the default
    /// sender id, the Ugandan number plan and console reporting.
    pub fn new() -> Self {
        Self {
            credentials: None,
            sender_id: SenderId::default(),
            endpoint: Endpoint::ProcessDefault,
            base_url: None,
            number_plan: NumberPlan::default(),
            timeout: None,
            user_agent: None,
            reporter: Arc::new(ConsoleReporter),
        }
    }

    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    pub fn sender_id(mut self, sender_id: SenderId) -> Self {
        self.sender_id = sender_id;
        self
    }

    /// Pin the client to one server, ignoring the process-wide toggle.
    pub fn server(mut self, server: Server) -> Self {
        self.endpoint = Endpoint::server(server);
        self.base_url = None;
        self
    }

    /// Pin the client to an explicit base URL (validated by [`Self::build`]).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn number_plan(mut self, plan: NumberPlan) -> Self {
        self.number_plan = plan;
        self
    }

    /// Set an HTTP client timeout applied to the entire request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Send success lines and diagnostics to `reporter` instead of the console.
    pub fn reporter(mut self, reporter: Arc<dyn Reporter>) -> Self {
        self.reporter = reporter;
        self
    }

    /// Build an unauthenticated [`EgoSmsClient`].
    pub fn build(self) -> Result<EgoSmsClient, EgoSmsError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(user_agent) = self.user_agent.as_deref() {
            builder = builder.user_agent(user_agent);
        }

        let client = builder
            .build()
            .map_err(|err| EgoSmsError::Transport(Box::new(err)))?;

        self.finish(Arc::new(ReqwestTransport { client }))
    }

    /// Build the client and validate its credentials against the gateway.
    ///
    /// A rejection by the gateway is not an error: the returned client is simply
    /// unauthenticated (see [`EgoSmsClient::is_authenticated`]).
    pub async fn authenticate(self) -> Result<EgoSmsClient, EgoSmsError> {
        let mut client = self.build()?;
        validate_credentials(&mut client).await?;
        Ok(client)
    }

    fn finish(self, http: Arc<dyn HttpTransport>) -> Result<EgoSmsClient, EgoSmsError> {
        let endpoint = match self.base_url {
            Some(url) => Endpoint::pinned(url)?,
            None => self.endpoint,
        };

        Ok(EgoSmsClient {
            credentials: self.credentials,
            sender_id: self.sender_id,
            authenticated: false,
            endpoint,
            numbers: NumberValidator::new(self.number_plan),
            gateway: Gateway::new(http),
            reporter: self.reporter,
        })
    }
}

#[derive(Clone)]
/// High-level EgoSMS client.
///
/// Holds the session (credentials, sender id, authenticated flag, endpoint) and
/// exposes the three gateway operations: credential validation, sending messages
/// and reading the balance. Success lines and diagnostics are written through the
/// configured [`Reporter`].
///
/// Unless a base URL is pinned, requests go to the process-wide server selected
/// with [`EgoSmsClient::use_sandbox`] / [`EgoSmsClient::use_live_server`].
pub struct EgoSmsClient {
    credentials: Option<Credentials>,
    sender_id: SenderId,
    authenticated: bool,
    endpoint: Endpoint,
    numbers: NumberValidator,
    gateway: Gateway,
    reporter: Arc<dyn Reporter>,
}

impl EgoSmsClient {
    /// Create a client without credentials.
    ///
    /// Every operation fails with [`EgoSmsError::InvalidArgument`] until the client
    /// is rebuilt with credentials; use [`EgoSmsClient::authenticate`] instead.
    pub fn new() -> Self {
        let builder = EgoSmsClientBuilder::new();
        Self {
            credentials: None,
            sender_id: builder.sender_id,
            authenticated: false,
            endpoint: builder.endpoint,
            numbers: NumberValidator::new(builder.number_plan),
            gateway: Gateway::new(Arc::new(ReqwestTransport {
                client: reqwest::Client::new(),
            })),
            reporter: builder.reporter,
        }
    }

    /// Start building a client with custom settings.
    pub fn builder() -> EgoSmsClientBuilder {
        EgoSmsClientBuilder::new()
    }

    /// Create a client for `username`/`password` on the process-wide server and
    /// validate the credentials. Use [`EgoSmsClientBuilder::authenticate`] to pick
    /// the server or base URL first.
    ///
    /// A rejection by the gateway is not an error: the returned client is simply
    /// unauthenticated (see [`EgoSmsClient::is_authenticated`]).
    pub async fn authenticate(
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, EgoSmsError> {
        Self::builder()
            .credentials(Credentials::basic(username, password)?)
            .authenticate()
            .await
    }

    /// API-key authentication. Not supported by the gateway yet; always fails with
    /// [`EgoSmsError::NotImplemented`].
    pub fn authenticate_with_api_key(_api_key: impl Into<String>) -> Result<Self, EgoSmsError> {
        Err(EgoSmsError::NotImplemented(credentials::API_KEY_UNSUPPORTED))
    }

    /// Route every client without a pinned base URL to the sandbox server.
    pub fn use_sandbox() {
        set_default_server(Server::Sandbox);
    }

    /// Route every client without a pinned base URL to the live server.
    pub fn use_live_server() {
        set_default_server(Server::Live);
    }

    /// Set the default sender id on this client and return it for chaining.
    ///
    /// This mutates the receiver; every holder of the client sees the new id.
    pub fn with_sender_id(
        &mut self,
        sender_id: impl Into<String>,
    ) -> Result<&mut Self, ValidationError> {
        self.sender_id = SenderId::new(sender_id)?;
        Ok(self)
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    pub fn sender_id(&self) -> &SenderId {
        &self.sender_id
    }

    pub fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    /// Base URL the next request will be sent to.
    pub fn base_url(&self) -> &str {
        self.endpoint.resolve()
    }

    /// Send `text` to `numbers` with the client's sender id and the highest priority.
    ///
    /// See [`EgoSmsClient::send_message_with`].
    pub async fn send_message<S: AsRef<str>>(
        &mut self,
        numbers: &[S],
        text: &str,
    ) -> Result<bool, EgoSmsError> {
        self.send_message_with(numbers, text, SendOptions::default())
            .await
    }

    /// Send `text` to `numbers`.
    ///
    /// Returns `Ok(true)` when the gateway accepted the message. Returns `Ok(false)`
    /// (after a diagnostic) when the client cannot authenticate, no number survives
    /// validation, the gateway rejects the message, or the request cannot reach it.
    ///
    /// Errors:
    /// - [`EgoSmsError::InvalidArgument`] for an empty number list, an empty or
    ///   single-character message, or a client without credentials,
    /// - [`EgoSmsError::NotImplemented`] for API-key credentials.
    pub async fn send_message_with<S: AsRef<str>>(
        &mut self,
        numbers: &[S],
        text: &str,
        options: SendOptions,
    ) -> Result<bool, EgoSmsError> {
        let response = match self.query_send_message(numbers, text, options).await {
            Ok(Some(response)) => response,
            Ok(None) => return Ok(false),
            Err(EgoSmsError::Transport(source)) => {
                self.reporter
                    .diagnostic(&format!("Failed to send SMS: {source}"));
                return Ok(false);
            }
            Err(err) => return Err(err),
        };

        if response.is_ok() {
            self.reporter.success("SMS sent successfully.");
            if let Some(code) = response.follow_up_code.as_deref() {
                self.reporter
                    .success(&format!("MessageFollowUpUniqueCode: {code}"));
            }
            Ok(true)
        } else {
            self.reporter.diagnostic(&format!(
                "Failed: {}",
                response.message.as_deref().unwrap_or("unknown error")
            ));
            Ok(false)
        }
    }

    /// Same as [`EgoSmsClient::send_message_with`] but returns the decoded reply.
    ///
    /// Returns `Ok(None)` when the client cannot authenticate or no number survives
    /// validation; no request is sent in either case. Network failures are returned
    /// as [`EgoSmsError::Transport`].
    pub async fn query_send_message<S: AsRef<str>>(
        &mut self,
        numbers: &[S],
        text: &str,
        options: SendOptions,
    ) -> Result<Option<ApiResponse>, EgoSmsError> {
        if !self.ensure_authenticated().await? {
            return Ok(None);
        }

        if numbers.is_empty() {
            return Err(ValidationError::EmptyNumbers.into());
        }
        let text = MessageText::new(text)?;

        let sender_id = options
            .sender_id
            .unwrap_or_else(|| self.sender_id.clone());
        if sender_id.exceeds_recommended_len() {
            self.reporter.diagnostic(SENDER_ID_TOO_LONG);
        }

        let validated = self.numbers.validate(numbers);
        for issue in &validated.issues {
            self.reporter.diagnostic(&issue.to_string());
        }
        if validated.is_empty() {
            self.reporter.diagnostic(NO_VALID_NUMBERS);
            return Ok(None);
        }

        let request = MessageRequest::new(validated.numbers, text, sender_id, options.priority)?;
        debug!(
            recipients = request.numbers().len(),
            priority = request.priority().as_wire(),
            "sending message"
        );

        let envelope = send_sms_envelope(self.user_data()?, &request);
        let response = self.gateway.send(self.endpoint.resolve(), &envelope).await?;
        Ok(Some(response))
    }

    /// Read the account balance.
    ///
    /// Returns `Ok(None)` (after a diagnostic) when the client is not authenticated
    /// or the gateway rejects the request. Unlike [`EgoSmsClient::send_message`],
    /// no re-authentication is attempted.
    ///
    /// Errors:
    /// - [`EgoSmsError::Balance`] when the request cannot reach the gateway.
    pub async fn get_balance(&self) -> Result<Option<String>, EgoSmsError> {
        let Some(response) = self.query_balance().await? else {
            return Ok(None);
        };

        if !response.is_ok() {
            self.reporter.diagnostic(&format!(
                "Failed: {}",
                response.message.as_deref().unwrap_or("unknown error")
            ));
            return Ok(None);
        }

        if let Some(code) = response.follow_up_code.as_deref() {
            self.reporter
                .success(&format!("MessageFollowUpUniqueCode: {code}"));
        }
        Ok(response.balance)
    }

    /// Same as [`EgoSmsClient::get_balance`] but returns the decoded reply.
    pub async fn query_balance(&self) -> Result<Option<ApiResponse>, EgoSmsError> {
        if !self.authenticated {
            self.reporter.diagnostic(NOT_AUTHENTICATED);
            return Ok(None);
        }

        let envelope = balance_envelope(self.user_data()?);
        match self.gateway.send(self.endpoint.resolve(), &envelope).await {
            Ok(response) => Ok(Some(response)),
            Err(EgoSmsError::Transport(source) | EgoSmsError::Encode(source)) => {
                Err(EgoSmsError::Balance(source))
            }
            Err(err) => Err(err),
        }
    }

    async fn ensure_authenticated(&mut self) -> Result<bool, EgoSmsError> {
        if self.authenticated {
            return Ok(true);
        }

        self.reporter.diagnostic(REAUTHENTICATING);
        if validate_credentials(self).await? {
            return Ok(true);
        }
        self.reporter.diagnostic(NOT_AUTHENTICATED);
        Ok(false)
    }

    fn user_data(&self) -> Result<UserData<'_>, EgoSmsError> {
        self.credentials
            .as_ref()
            .ok_or(ValidationError::MissingCredentials)?
            .user_data()
    }
}

impl Default for EgoSmsClient {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for EgoSmsClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EgoSmsClient")
            .field("credentials", &self.credentials)
            .field("sender_id", &self.sender_id)
            .field("authenticated", &self.authenticated)
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for EgoSmsClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let username = self
            .credentials
            .as_ref()
            .and_then(Credentials::username)
            .map_or("<no user>", |it| it.as_str());
        write!(f, "SDK({username} => {})", self.base_url())
    }
}

#[cfg(test)]
fn test_client(
    credentials: Option<Credentials>,
    transport: testing::FakeTransport,
    reporter: Arc<testing::RecordingReporter>,
) -> EgoSmsClient {
    let builder = EgoSmsClient::builder()
        .base_url("https://example.invalid/api/v1/json/")
        .reporter(reporter);
    let builder = match credentials {
        Some(credentials) => builder.credentials(credentials),
        None => builder,
    };
    builder.finish(Arc::new(transport)).unwrap()
}
