//! Typed Rust client for the EgoSMS JSON HTTP API.
//!
//! The crate is split the usual way: a domain layer of validated types (numbers,
//! sender ids, message text), a transport layer for the JSON envelope and its
//! quirks, and a small client layer holding the session and talking to the gateway.
//!
//! ```rust,no_run
//! use egosms::{EgoSmsClient, MessagePriority, SendOptions};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), egosms::EgoSmsError> {
//!     EgoSmsClient::use_sandbox();
//!
//!     let mut client = EgoSmsClient::authenticate("username", "password").await?;
//!     let sent = client
//!         .send_message_with(
//!             &["0771234567"],
//!             "hello",
//!             SendOptions::default().priority(MessagePriority::High),
//!         )
//!         .await?;
//!     println!("sent: {sent}, balance: {:?}", client.get_balance().await?);
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod domain;
pub mod report;
mod transport;

pub use client::{
    AuthMode, BaseUrl, Credentials, EgoSmsClient, EgoSmsClientBuilder, EgoSmsError, Endpoint,
    Server, validate_credentials,
};
pub use domain::{
    ApiKey, ApiResponse, MessagePriority, MessageRequest, MessageText, NumberIssue, NumberPlan,
    NumberValidator, Password, PhoneNumber, SendOptions, SenderId, Status, Username,
    ValidatedNumbers, ValidationError,
};
pub use report::{ConsoleReporter, Reporter};
