//! Resy Schedule - Booking Request Collector
//!
//! Walks the user through the questions needed to book a reservation:
//! venue (by id or by search), party size, date, acceptable times,
//! reservation types, slot release time and dry run. After confirmation the
//! booking request is written to stdout as JSON for the scheduler.
//!
//! Prompts and messages go to the terminal; only the request is printed on
//! stdout, so the output can be piped.
//!
//! # Usage
//!
//! ```bash
//! # Ask the questions and print the request
//! resy-schedule
//!
//! # Pretty JSON, at most five search suggestions
//! resy-schedule --pretty --search-limit 5 > booking.json
//! ```

mod collector;
mod prompt;

use clap::Parser;
use prompt::TerminalPrompter;
use resy_common::{ApiArgs, BookingRequest, ResyClient};
use tracing_subscriber::EnvFilter;

/// Interactive booking request collector.
#[derive(Parser, Debug, Clone)]
#[command(name = "resy-schedule")]
#[command(about = "Collects the details of a reservation to book")]
struct Args {
    #[command(flatten)]
    api: ApiArgs,

    /// Pretty-print the JSON request.
    #[arg(short, long, env = "RESY_SCHEDULE_PRETTY")]
    pretty: bool,

    /// Maximum number of venue suggestions per search.
    #[arg(long, env = "RESY_SCHEDULE_SEARCH_LIMIT", default_value = "10")]
    search_limit: usize,
}

/// Formats the request for the scheduler.
fn format_request(request: &BookingRequest, pretty: bool) -> Result<String, serde_json::Error> {
    if pretty {
        serde_json::to_string_pretty(request)
    } else {
        serde_json::to_string(request)
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
    let client = ResyClient::new(&args.api)?.with_search_limit(args.search_limit);
    let mut prompter = TerminalPrompter::new();

    let Some(request) = collector::collect(&mut prompter, &client).await? else {
        return Ok(());
    };

    tracing::debug!(venue_id = %request.venue_id, book_at = %request.book_at, "booking request confirmed");
    println!("{}", format_request(&request, args.pretty)?);

    Ok(())
}
