use std::io;

use egosms::{EgoSmsClient, SendOptions};
use tracing_subscriber::EnvFilter;

fn required(name: &str) -> Result<String, io::Error> {
    std::env::var(name).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{name} environment variable is required"),
        )
    })
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let username = required("EGOSMS_USERNAME")?;
    let password = required("EGOSMS_PASSWORD")?;
    let phone = required("EGOSMS_PHONE")?;
    let message = std::env::var("EGOSMS_MESSAGE")
        .unwrap_or_else(|_| "Hello from the egosms example.".to_owned());
    let sender_id = std::env::var("EGOSMS_SENDER_ID").unwrap_or_default();

    if std::env::var_os("EGOSMS_SANDBOX").is_some() {
        EgoSmsClient::use_sandbox();
    }

    let mut client = EgoSmsClient::authenticate(username, password).await?;
    let sent = client
        .send_message_with(&[phone], &message, SendOptions::default().sender_id(sender_id))
        .await?;
    println!("sent: {sent}");

    Ok(())
}
