//! Venue records and the search seam used by the booking prompts.

use crate::error::ApiError;
use std::fmt;
use std::future::Future;

/// Separator between the five fields of a suggestion string.
pub const SUGGESTION_DELIMITER: &str = " | ";

const SUGGESTION_FIELDS: usize = 5;

/// A bookable location as returned by venue search.
///
/// Only `id` matters downstream; the other fields are for display.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Venue {
    pub name: String,
    pub cuisine: String,
    pub location: String,
    pub rating: String,
    pub id: String,
}

impl Venue {
    /// Renders the venue as `name | cuisine | location | rating | id`.
    pub fn to_suggestion(&self) -> String {
        [
            self.name.as_str(),
            self.cuisine.as_str(),
            self.location.as_str(),
            self.rating.as_str(),
            self.id.as_str(),
        ]
        .join(SUGGESTION_DELIMITER)
    }

    /// Parses a suggestion string back into a venue.
    ///
    /// Anything after the fourth delimiter belongs to `id`, so rendering the
    /// result reproduces the input. Fewer than five fields yields an empty
    /// venue rather than an error.
    pub fn from_suggestion(suggestion: &str) -> Self {
        let fields: Vec<&str> = suggestion
            .splitn(SUGGESTION_FIELDS, SUGGESTION_DELIMITER)
            .collect();
        let [name, cuisine, location, rating, id] = fields.as_slice() else {
            return Self::default();
        };

        Self {
            name: (*name).to_string(),
            cuisine: (*cuisine).to_string(),
            location: (*location).to_string(),
            rating: (*rating).to_string(),
            id: (*id).to_string(),
        }
    }

    /// True once the venue carries a platform id.
    pub fn is_resolved(&self) -> bool {
        !self.id.is_empty()
    }
}

impl fmt::Display for Venue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_suggestion())
    }
}

/// How the venue for a booking was chosen. Exactly one path is ever taken.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VenueSelection {
    /// The user typed the platform id directly.
    DirectId(String),
    /// The user picked a venue from search results.
    Searched(Venue),
}

impl VenueSelection {
    pub fn venue_id(&self) -> &str {
        match self {
            VenueSelection::DirectId(id) => id,
            VenueSelection::Searched(venue) => &venue.id,
        }
    }

    /// Display name, known only for searched venues.
    pub fn venue_name(&self) -> Option<&str> {
        match self {
            VenueSelection::DirectId(_) => None,
            VenueSelection::Searched(venue) => Some(&venue.name),
        }
    }

    /// Human label for summaries: the name if known, otherwise the id.
    pub fn label(&self) -> String {
        match self {
            VenueSelection::DirectId(id) => format!("venue {id}"),
            VenueSelection::Searched(venue) => venue.name.clone(),
        }
    }
}

/// Looks up venues matching a partially typed query.
pub trait VenueSearch {
    fn search_venues(&self, query: &str) -> impl Future<Output = Result<Vec<Venue>, ApiError>>;
}
