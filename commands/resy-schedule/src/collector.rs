//! The booking question flow.
//!
//! Questions are asked in a fixed order. Each answer is checked against its
//! field's validators and re-asked until it passes. A failed prompt aborts
//! the whole flow and drops everything answered so far.

use crate::prompt::{PromptError, Prompter};
use resy_common::validate::{
    DATE_FORMAT, INTEGER_DIGITS, REQUIRED, TIME_FORMAT, TIMES_FORMAT, VENUE_FORMAT, parse_tags,
    parse_times, validate_all,
};
use resy_common::{BookingAnswers, BookingRequest, Validator, Venue, VenueSearch, VenueSelection};

const SEARCH_AGAIN: &str = "None of these, search again";

/// A free-text question and the validators its answer must pass.
struct Field {
    message: &'static str,
    validators: &'static [Validator],
}

const VENUE_ID: Field = Field {
    message: "Venue ID:",
    validators: &[REQUIRED],
};

const VENUE: Field = Field {
    message: "Venue:",
    validators: &[REQUIRED, VENUE_FORMAT],
};

const PARTY_SIZE: Field = Field {
    message: "Party Size:",
    validators: &[REQUIRED, INTEGER_DIGITS],
};

const RESERVATION_DATE: Field = Field {
    message: "Reservation Date (YYYY-MM-DD):",
    validators: &[REQUIRED, DATE_FORMAT],
};

const RESERVATION_TIMES: Field = Field {
    message: "Reservation Times (HH:MM):",
    validators: &[REQUIRED, TIMES_FORMAT],
};

const RESERVATION_TYPES: Field = Field {
    message: "Reservation Types (ex. 'Indoor dining') - optional:",
    validators: &[],
};

const SLOT_TIME: Field = Field {
    message: "What time do slots open? (HH:MM)",
    validators: &[REQUIRED, TIME_FORMAT],
};

const TYPES_HELP: &str = "Generally this matches the tag shown under the reservation. \
                          Leave empty to book any type of reservation.";

fn ask<P: Prompter>(prompter: &mut P, field: &Field) -> Result<String, PromptError> {
    ask_raw(prompter, field).map(|answer| answer.trim().to_string())
}

/// Like [`ask`] but keeps the answer exactly as typed.
fn ask_raw<P: Prompter>(prompter: &mut P, field: &Field) -> Result<String, PromptError> {
    loop {
        let answer = prompter.input(field.message)?;
        match validate_all(field.validators, &answer) {
            Ok(()) => return Ok(answer),
            Err(e) => prompter.warn(&e.message),
        }
    }
}

fn ask_lines<P: Prompter>(prompter: &mut P, field: &Field) -> Result<String, PromptError> {
    loop {
        let answer = prompter.multiline(field.message)?;
        match validate_all(field.validators, &answer) {
            Ok(()) => return Ok(answer),
            Err(e) => prompter.warn(&e.message),
        }
    }
}

/// Runs the venue search sub-flow until the user picks a venue.
///
/// A query that is already a full suggestion string resolves without
/// searching. Search failures are reported and treated as no results.
async fn choose_venue<P, S>(prompter: &mut P, search: &S) -> Result<Venue, PromptError>
where
    P: Prompter,
    S: VenueSearch,
{
    loop {
        let query = ask(prompter, &VENUE)?;

        let pasted = Venue::from_suggestion(&query);
        if pasted.is_resolved() {
            return Ok(pasted);
        }

        let venues = match search.search_venues(&query).await {
            Ok(venues) => venues,
            Err(e) => {
                tracing::warn!(error = %e, query = %query, "venue search failed");
                prompter.warn(&format!("Venue search failed: {e}"));
                Vec::new()
            }
        };

        if venues.is_empty() {
            prompter.warn(&format!("No venues found for '{query}'. Try another name."));
            continue;
        }

        let mut items: Vec<String> = venues.iter().map(Venue::to_suggestion).collect();
        items.push(SEARCH_AGAIN.to_string());

        let choice = prompter.select("Which venue?", &items)?;
        if let Some(venue) = venues.into_iter().nth(choice) {
            return Ok(venue);
        }
    }
}

/// Asks every booking question, then for confirmation.
///
/// Returns `Ok(None)` when the user declines to schedule.
pub async fn collect<P, S>(
    prompter: &mut P,
    search: &S,
) -> Result<Option<BookingRequest>, PromptError>
where
    P: Prompter,
    S: VenueSearch,
{
    let use_venue_id =
        prompter.confirm("Do you want to specify the venue ID directly?", Some(false))?;

    let venue = if use_venue_id {
        VenueSelection::DirectId(ask_raw(prompter, &VENUE_ID)?)
    } else {
        VenueSelection::Searched(choose_venue(prompter, search).await?)
    };

    let party_size = ask(prompter, &PARTY_SIZE)?;
    let reservation_date = ask(prompter, &RESERVATION_DATE)?;
    let reservation_times = parse_times(&ask_lines(prompter, &RESERVATION_TIMES)?)?;

    prompter.say(TYPES_HELP);
    let reservation_types = parse_tags(&ask_lines(prompter, &RESERVATION_TYPES)?);

    let slot_time = ask(prompter, &SLOT_TIME)?;
    let dry_run = prompter.confirm(
        "Is this a dry run? (dry runs will not actually attempt to book)",
        None,
    )?;

    let answers = BookingAnswers {
        venue,
        party_size,
        reservation_date,
        reservation_times,
        reservation_types,
        slot_time,
        dry_run,
    };
    let label = answers.venue.label();
    let request = answers.into_request()?;

    prompter.say(&format!(
        "Party of {} at {}, booking attempted at {}.",
        request.party_size,
        label,
        request.book_at.format("%Y-%m-%d %H:%M")
    ));

    if !prompter.confirm("Schedule to book with the above information?", Some(false))? {
        prompter.say("Okay, I won't try to book anything.");
        return Ok(None);
    }

    prompter.say(&format!(
        "Great, a booking for a party of {} at {} will be attempted at {}.\n\
         Make sure your credentials are up to date before then by running 'resy-ping',\n\
         and that your computer is awake at this time.",
        request.party_size,
        label,
        request.book_at.format("%Y-%m-%d %H:%M")
    ));

    Ok(Some(request))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use resy_common::ApiError;
    use std::cell::{Cell, RefCell};
    use std::collections::VecDeque;

    #[derive(Debug)]
    enum Answer {
        Yes,
        No,
        Text(&'static str),
        Pick(usize),
    }

    /// Replays canned answers; runs out with an I/O error like a closed stdin.
    #[derive(Default)]
    struct Scripted {
        answers: VecDeque<Answer>,
        asked: Vec<String>,
        said: Vec<String>,
        warnings: Vec<String>,
        offered: Vec<Vec<String>>,
    }

    impl Scripted {
        fn new(answers: impl IntoIterator<Item = Answer>) -> Self {
            Self {
                answers: answers.into_iter().collect(),
                ..Self::default()
            }
        }

        fn next(&mut self, message: &str) -> Result<Answer, PromptError> {
            self.asked.push(message.to_string());
            self.answers.pop_front().ok_or_else(|| {
                PromptError::from(std::io::Error::new(
                    std::io::ErrorKind::UnexpectedEof,
                    "input closed",
                ))
            })
        }
    }

    impl Prompter for Scripted {
        fn confirm(&mut self, message: &str, _default: Option<bool>) -> Result<bool, PromptError> {
            match self.next(message)? {
                Answer::Yes => Ok(true),
                Answer::No => Ok(false),
                other => panic!("expected yes/no for {message:?}, got {other:?}"),
            }
        }

        fn input(&mut self, message: &str) -> Result<String, PromptError> {
            match self.next(message)? {
                Answer::Text(text) => Ok(text.to_string()),
                other => panic!("expected text for {message:?}, got {other:?}"),
            }
        }

        fn multiline(&mut self, message: &str) -> Result<String, PromptError> {
            self.input(message)
        }

        fn select(&mut self, message: &str, items: &[String]) -> Result<usize, PromptError> {
            self.offered.push(items.to_vec());
            match self.next(message)? {
                Answer::Pick(index) => Ok(index),
                other => panic!("expected a pick for {message:?}, got {other:?}"),
            }
        }

        fn say(&mut self, message: &str) {
            self.said.push(message.to_string());
        }

        fn warn(&mut self, message: &str) {
            self.warnings.push(message.to_string());
        }
    }

    /// Venue search returning fixed results and recording queries.
    #[derive(Default)]
    struct FakeSearch {
        venues: Vec<Venue>,
        fail: Cell<bool>,
        queries: RefCell<Vec<String>>,
    }

    impl FakeSearch {
        fn with(suggestions: &[&str]) -> Self {
            Self {
                venues: suggestions.iter().map(|s| Venue::from_suggestion(s)).collect(),
                ..Self::default()
            }
        }
    }

    impl VenueSearch for FakeSearch {
        async fn search_venues(&self, query: &str) -> Result<Vec<Venue>, ApiError> {
            self.queries.borrow_mut().push(query.to_string());
            if self.fail.replace(false) {
                return Err(ApiError::Status {
                    status: 500,
                    message: Some("search is down".to_string()),
                });
            }
            Ok(self.venues.clone())
        }
    }

    const BAR_FOO: &str = "Bar Foo | French | NYC | 4.5 | abc123";

    fn rest_of_flow(confirm: Answer) -> Vec<Answer> {
        vec![
            Answer::Text("2"),
            Answer::Text("2024-07-04"),
            Answer::Text("18:00\n18:15"),
            Answer::Text("Indoor Dining"),
            Answer::Text("09:00"),
            Answer::No,
            confirm,
        ]
    }

    #[tokio::test]
    async fn direct_venue_id_skips_search() {
        let mut answers = vec![Answer::Yes, Answer::Text("834")];
        answers.extend(rest_of_flow(Answer::Yes));
        let mut prompter = Scripted::new(answers);
        let search = FakeSearch::with(&[BAR_FOO]);

        let request = collect(&mut prompter, &search).await.unwrap().unwrap();

        assert!(search.queries.borrow().is_empty());
        assert!(prompter.offered.is_empty());
        assert_eq!(request.venue_id, "834");
        assert_eq!(request.venue_name, None);
        assert_eq!(request.party_size, "2");
        assert_eq!(request.reservation_date, "2024-07-04");
        assert_eq!(request.reservation_times, vec!["18:00", "18:15"]);
        assert_eq!(request.reservation_types, vec!["indoor dining"]);
        assert_eq!(request.slot_time, "09:00");
        assert!(!request.dry_run);
        assert_eq!(request.book_at.to_string(), "2024-07-04 09:00:00");
    }

    #[tokio::test]
    async fn searched_venue_resolves_to_its_id() {
        let mut answers = vec![Answer::No, Answer::Text("bar f"), Answer::Pick(0)];
        answers.extend(rest_of_flow(Answer::Yes));
        let mut prompter = Scripted::new(answers);
        let search = FakeSearch::with(&[BAR_FOO, "Bar Bar | Tapas | SF | 4.1 | zz9"]);

        let request = collect(&mut prompter, &search).await.unwrap().unwrap();

        assert_eq!(search.queries.borrow().as_slice(), ["bar f"]);
        assert_eq!(
            prompter.offered[0],
            vec![
                BAR_FOO.to_string(),
                "Bar Bar | Tapas | SF | 4.1 | zz9".to_string(),
                SEARCH_AGAIN.to_string(),
            ]
        );
        assert_eq!(request.venue_id, "abc123");
        assert_eq!(request.venue_name.as_deref(), Some("Bar Foo"));
        assert!(prompter.said.iter().any(|s| s.contains("Party of 2 at Bar Foo")));
    }

    #[tokio::test]
    async fn pasted_suggestion_needs_no_search() {
        let mut answers = vec![Answer::No, Answer::Text(BAR_FOO)];
        answers.extend(rest_of_flow(Answer::Yes));
        let mut prompter = Scripted::new(answers);
        let search = FakeSearch::default();

        let request = collect(&mut prompter, &search).await.unwrap().unwrap();

        assert!(search.queries.borrow().is_empty());
        assert_eq!(request.venue_id, "abc123");
    }

    #[tokio::test]
    async fn search_again_and_failed_search_re_ask_the_venue() {
        let mut answers = vec![
            Answer::No,
            Answer::Text("first"),
            Answer::Text("second"),
            Answer::Pick(1),
            Answer::Text("third"),
            Answer::Pick(0),
        ];
        answers.extend(rest_of_flow(Answer::Yes));
        let mut prompter = Scripted::new(answers);
        let search = FakeSearch::with(&[BAR_FOO]);
        search.fail.set(true);

        let request = collect(&mut prompter, &search).await.unwrap().unwrap();

        assert_eq!(
            search.queries.borrow().as_slice(),
            ["first", "second", "third"]
        );
        assert!(
            prompter
                .warnings
                .iter()
                .any(|w| w.contains("search is down"))
        );
        assert_eq!(request.venue_id, "abc123");
    }

    #[tokio::test]
    async fn invalid_answers_are_re_asked() {
        let answers = vec![
            Answer::Yes,
            Answer::Text("834"),
            Answer::Text(""),
            Answer::Text("3.5"),
            Answer::Text("4"),
            Answer::Text("07/04/2024"),
            Answer::Text("2024-07-04"),
            Answer::Text(""),
            Answer::Text("7pm"),
            Answer::Text("19:00"),
            Answer::Text(""),
            Answer::Text("9"),
            Answer::Text("10:00"),
            Answer::Yes,
            Answer::Yes,
        ];
        let mut prompter = Scripted::new(answers);

        let request = collect(&mut prompter, &FakeSearch::default())
            .await
            .unwrap()
            .unwrap();

        assert_eq!(request.party_size, "4");
        assert_eq!(request.reservation_times, vec!["19:00"]);
        assert!(request.reservation_types.is_empty());
        assert_eq!(request.slot_time, "10:00");
        assert!(request.dry_run);
        assert_eq!(
            prompter.warnings.first().map(String::as_str),
            Some("Value is required.")
        );
        assert_eq!(prompter.warnings.len(), 6);
    }

    #[tokio::test]
    async fn empty_venue_id_is_re_asked() {
        let mut answers = vec![
            Answer::Yes,
            Answer::Text(""),
            Answer::Text("  "),
            Answer::Text("834"),
        ];
        answers.extend(rest_of_flow(Answer::Yes));
        let mut prompter = Scripted::new(answers);

        let request = collect(&mut prompter, &FakeSearch::default())
            .await
            .unwrap()
            .unwrap();

        assert_eq!(request.venue_id, "834");
        assert_eq!(prompter.warnings, vec!["Value is required.", "Value is required."]);
        assert_eq!(prompter.asked.iter().filter(|m| *m == "Venue ID:").count(), 3);
    }

    #[tokio::test]
    async fn declining_returns_none() {
        let mut answers = vec![Answer::Yes, Answer::Text("834")];
        answers.extend(rest_of_flow(Answer::No));
        let mut prompter = Scripted::new(answers);

        let result = collect(&mut prompter, &FakeSearch::default()).await.unwrap();

        assert!(result.is_none());
        assert_eq!(
            prompter.said.last().map(String::as_str),
            Some("Okay, I won't try to book anything.")
        );
    }

    #[tokio::test]
    async fn closed_input_aborts_the_flow() {
        let mut prompter = Scripted::new([Answer::No, Answer::Text("bar")]);
        let search = FakeSearch::with(&[BAR_FOO]);

        let err = collect(&mut prompter, &search).await.unwrap_err();

        assert!(matches!(err, PromptError::Io(_)));
    }

    #[test]
    fn interrupted_io_maps_to_interrupted() {
        let err = PromptError::from(std::io::Error::from(std::io::ErrorKind::Interrupted));
        assert!(matches!(err, PromptError::Interrupted));
    }
}
