use std::net::SocketAddr;
use std::time::Duration;

use tracing_subscriber::EnvFilter;

use sms_relay::client::{Credentials, TwilioClient};
use sms_relay::config::Config;
use sms_relay::server::{self, AppState};

const PROVIDER_TIMEOUT: Duration = Duration::from_secs(30);

#[tokio::main]
async fn main() {
    // Top-level fault boundary: anything that escapes the handlers or the
    // startup sequence terminates the process with a nonzero status.
    if let Err(err) = run().await {
        eprintln!("fatal: {err}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("sms_relay=info")),
        )
        .init();

    let config = Config::from_env()?;
    tracing::info!(
        sender = config.sender_number.as_str(),
        port = config.port,
        "configuration loaded"
    );

    let client = TwilioClient::builder(Credentials::new(config.account_sid, config.auth_token))
        .timeout(PROVIDER_TIMEOUT)
        .user_agent(concat!("sms-relay/", env!("CARGO_PKG_VERSION")))
        .build()?;
    let state = AppState::new(client, config.sender_number);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "listening");

    // No graceful-shutdown drain: an interrupt terminates the process with
    // in-flight requests unfinished.
    axum::serve(listener, server::router(state)).await?;

    Ok(())
}
