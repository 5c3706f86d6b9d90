//! Shared building blocks for the Resy command-line tools.
//!
//! - [`config`] - connection settings read from flags or the environment
//! - [`client`] - the authenticated HTTP client for the Resy API
//! - [`venue`] - venue records, suggestion strings and venue search
//! - [`validate`] - named input validators used by the interactive prompts
//! - [`booking`] - the booking request handed to the scheduler

pub mod booking;
pub mod client;
pub mod config;
pub mod error;
pub mod validate;
pub mod venue;

pub use booking::{BookingAnswers, BookingRequest, booking_datetime};
pub use client::{RawResponse, ResyClient};
pub use config::ApiArgs;
pub use error::{ApiError, error_message};
pub use validate::{ValidationError, Validator};
pub use venue::{Venue, VenueSearch, VenueSelection};
