//! Resy Ping - Credential Check
//!
//! Calls the authenticated user endpoint once and reports whether the
//! configured credentials are accepted. There are no retries: a transport
//! failure, a rejected token and a success are the three possible outcomes.
//!
//! # Usage
//!
//! ```bash
//! # Credentials from the environment
//! RESY_API_KEY=... RESY_AUTH_TOKEN=... resy-ping
//!
//! # Against another API root
//! resy-ping --api-base http://localhost:8080 --timeout 5
//! ```

use clap::Parser;
use resy_common::{ApiArgs, ResyClient, error_message};
use std::fmt;
use tracing_subscriber::EnvFilter;

/// Checks that Resy accepts the configured credentials.
#[derive(Parser, Debug, Clone)]
#[command(name = "resy-ping")]
#[command(about = "Checks connectivity and authentication against the Resy API")]
struct Args {
    #[command(flatten)]
    api: ApiArgs,
}

/// Result of a single ping.
#[derive(Debug, Clone, PartialEq, Eq)]
enum PingOutcome {
    /// No response was received.
    Unreachable(String),
    /// Resy answered with a status of 400 or above.
    Rejected { status: u16, message: Option<String> },
    Authenticated,
}

impl PingOutcome {
    /// Classifies a response. Bodies that are not `{"message": ...}` are ignored.
    fn from_response(status: u16, body: &[u8]) -> Self {
        if status >= 400 {
            PingOutcome::Rejected {
                status,
                message: error_message(body),
            }
        } else {
            PingOutcome::Authenticated
        }
    }
}

impl fmt::Display for PingOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PingOutcome::Unreachable(error) => {
                write!(f, "Error: could not ping the auth server: {error}")
            }
            PingOutcome::Rejected { status, message } => {
                writeln!(f, "Error: Could not authenticate with resy.")?;
                writeln!(f, "Status Code: {status}")?;
                if let Some(message) = message {
                    writeln!(f, "Message: {message}")?;
                }
                write!(
                    f,
                    "Set RESY_API_KEY and RESY_AUTH_TOKEN to reset your authentication information."
                )
            }
            PingOutcome::Authenticated => {
                write!(f, "Success! You're all set to begin booking.")
            }
        }
    }
}

/// Pings the user endpoint once.
async fn ping(client: &ResyClient) -> PingOutcome {
    match client.fetch_user().await {
        Ok(response) => PingOutcome::from_response(response.status, &response.body),
        Err(e) => {
            tracing::warn!(error = %e, "ping failed before a response arrived");
            PingOutcome::Unreachable(e.to_string())
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let client = ResyClient::new(&args.api)?;

    let outcome = ping(&client).await;
    println!("{outcome}");

    Ok(())
}
