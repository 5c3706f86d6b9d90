//! The booking request produced by the schedule prompts.

use crate::validate::{ValidationError, parse_date, parse_time};
use crate::venue::VenueSelection;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A confirmed booking request, handed to the scheduler as JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    /// Skip the actual booking attempt downstream.
    pub dry_run: bool,
    pub venue_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub venue_name: Option<String>,
    /// Validated digit string.
    pub party_size: String,
    /// `YYYY-MM-DD`.
    pub reservation_date: String,
    /// Acceptable start times, `HH:MM`, in order of preference.
    pub reservation_times: Vec<String>,
    /// Lower-cased reservation type tags. Empty accepts any type.
    #[serde(default)]
    pub reservation_types: Vec<String>,
    /// When the platform releases slots, `HH:MM`.
    pub slot_time: String,
    /// Local time at which the scheduler should attempt the booking.
    pub book_at: NaiveDateTime,
}

/// Answers collected before the venue is resolved into an id.
#[derive(Debug, Clone)]
pub struct BookingAnswers {
    pub venue: VenueSelection,
    pub party_size: String,
    pub reservation_date: String,
    pub reservation_times: Vec<String>,
    pub reservation_types: Vec<String>,
    pub slot_time: String,
    pub dry_run: bool,
}

impl BookingAnswers {
    /// Resolves the venue and computes the booking time.
    pub fn into_request(self) -> Result<BookingRequest, ValidationError> {
        let book_at = booking_datetime(&self.reservation_date, &self.slot_time)?;
        Ok(BookingRequest {
            dry_run: self.dry_run,
            venue_id: self.venue.venue_id().to_string(),
            venue_name: self.venue.venue_name().map(str::to_string),
            party_size: self.party_size,
            reservation_date: self.reservation_date,
            reservation_times: self.reservation_times,
            reservation_types: self.reservation_types,
            slot_time: self.slot_time,
            book_at,
        })
    }
}

/// Combines a `YYYY-MM-DD` date and an `HH:MM` time into one local timestamp.
pub fn booking_datetime(date: &str, time: &str) -> Result<NaiveDateTime, ValidationError> {
    Ok(parse_date(date)?.and_time(parse_time(time)?))
}
