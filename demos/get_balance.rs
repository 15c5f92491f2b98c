use std::io;

use egosms::EgoSmsClient;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let username = std::env::var("EGOSMS_USERNAME").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "EGOSMS_USERNAME environment variable is required",
        )
    })?;
    let password = std::env::var("EGOSMS_PASSWORD").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "EGOSMS_PASSWORD environment variable is required",
        )
    })?;

    if std::env::var_os("EGOSMS_SANDBOX").is_some() {
        EgoSmsClient::use_sandbox();
    }

    let client = EgoSmsClient::authenticate(username, password).await?;
    match client.get_balance().await? {
        Some(balance) => println!("balance: {balance}"),
        None => println!("balance unavailable"),
    }

    Ok(())
}
