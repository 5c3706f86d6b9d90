//! Named validators for prompt answers.
//!
//! Each field carries an ordered list of validators. [`validate_all`] runs
//! them in order and stops at the first failure, so `required` placed first
//! always reports before any format rule.

use chrono::{NaiveDate, NaiveTime};
use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

#[allow(clippy::expect_used)]
static DATE_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("date pattern is valid"));

#[allow(clippy::expect_used)]
static TIME_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{2}:\d{2}$").expect("time pattern is valid"));

/// A rejected answer. `message` is shown to the user before re-asking.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    pub rule: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(rule: &'static str, message: impl Into<String>) -> Self {
        Self {
            rule,
            message: message.into(),
        }
    }
}

/// A named predicate over a raw answer.
#[derive(Clone, Copy)]
pub struct Validator {
    pub name: &'static str,
    check: fn(&str) -> Result<(), ValidationError>,
}

impl Validator {
    pub const fn new(name: &'static str, check: fn(&str) -> Result<(), ValidationError>) -> Self {
        Self { name, check }
    }

    pub fn check(&self, input: &str) -> Result<(), ValidationError> {
        (self.check)(input)
    }
}

impl std::fmt::Debug for Validator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Validator").field(&self.name).finish()
    }
}

pub const REQUIRED: Validator = Validator::new("required", required);
pub const VENUE_FORMAT: Validator = Validator::new("venue-format", venue_format);
pub const INTEGER_DIGITS: Validator = Validator::new("integer-digits", integer_digits);
pub const DATE_FORMAT: Validator = Validator::new("date-format", date_format);
pub const TIME_FORMAT: Validator = Validator::new("time-format", time_format);
pub const TIMES_FORMAT: Validator = Validator::new("times-format", times_format);

/// Runs `validators` in order, returning the first failure.
pub fn validate_all(validators: &[Validator], input: &str) -> Result<(), ValidationError> {
    validators.iter().try_for_each(|v| v.check(input))
}

fn required(input: &str) -> Result<(), ValidationError> {
    if input.trim().is_empty() {
        return Err(ValidationError::new("required", "Value is required."));
    }
    Ok(())
}

fn venue_format(input: &str) -> Result<(), ValidationError> {
    if !input.chars().any(char::is_alphanumeric) {
        return Err(ValidationError::new(
            "venue-format",
            "Venue must contain letters or digits.",
        ));
    }
    if input.chars().any(char::is_control) {
        return Err(ValidationError::new(
            "venue-format",
            "Venue must not contain control characters.",
        ));
    }
    Ok(())
}

fn integer_digits(input: &str) -> Result<(), ValidationError> {
    let input = input.trim();
    if input.is_empty() || !input.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::new(
            "integer-digits",
            "Party Size must be a number.",
        ));
    }
    if input.chars().all(|c| c == '0') {
        return Err(ValidationError::new(
            "integer-digits",
            "Party Size must be at least 1.",
        ));
    }
    Ok(())
}

fn date_format(input: &str) -> Result<(), ValidationError> {
    parse_date(input).map(|_| ())
}

fn time_format(input: &str) -> Result<(), ValidationError> {
    parse_time(input).map(|_| ())
}

fn times_format(input: &str) -> Result<(), ValidationError> {
    let times = parse_times(input)?;
    if times.is_empty() {
        return Err(ValidationError::new(
            "times-format",
            "Enter at least one time (HH:MM).",
        ));
    }
    Ok(())
}

/// Parses a `YYYY-MM-DD` calendar date.
pub fn parse_date(input: &str) -> Result<NaiveDate, ValidationError> {
    let input = input.trim();
    let invalid = || ValidationError::new("date-format", "Date must be a valid YYYY-MM-DD date.");
    if !DATE_SHAPE.is_match(input) {
        return Err(invalid());
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d").map_err(|_| invalid())
}

/// Parses an `HH:MM` 24-hour time of day.
pub fn parse_time(input: &str) -> Result<NaiveTime, ValidationError> {
    let input = input.trim();
    let invalid = || {
        ValidationError::new(
            "time-format",
            format!("'{input}' is not a valid 24-hour HH:MM time."),
        )
    };
    if !TIME_SHAPE.is_match(input) {
        return Err(invalid());
    }
    NaiveTime::parse_from_str(input, "%H:%M").map_err(|_| invalid())
}

/// Parses one `HH:MM` time per non-blank line, keeping the typed text.
///
/// Duplicates are dropped; first occurrence wins the position.
pub fn parse_times(input: &str) -> Result<Vec<String>, ValidationError> {
    let mut times: Vec<String> = Vec::new();
    for line in input.lines().map(str::trim).filter(|l| !l.is_empty()) {
        parse_time(line).map_err(|e| ValidationError::new("times-format", e.message))?;
        if !times.iter().any(|t| t == line) {
            times.push(line.to_string());
        }
    }
    Ok(times)
}

/// Lower-cases each non-blank line into an ordered, de-duplicated tag list.
pub fn parse_tags(input: &str) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for tag in input
        .lines()
        .map(|l| l.trim().to_lowercase())
        .filter(|l| !l.is_empty())
    {
        if !tags.contains(&tag) {
            tags.push(tag);
        }
    }
    tags
}
