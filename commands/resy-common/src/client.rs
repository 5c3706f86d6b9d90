//! Authenticated HTTP client for the Resy API.

use crate::config::ApiArgs;
use crate::error::{ApiError, error_message};
use crate::venue::{Venue, VenueSearch};
use reqwest::{Client, Method, RequestBuilder};
use serde::Deserialize;
use serde_json::{Value, json};

/// Endpoint used to verify credentials.
pub const USER_PATH: &str = "/2/user";

/// Endpoint for venue search.
pub const VENUE_SEARCH_PATH: &str = "/3/venuesearch/search";

const DEFAULT_SEARCH_LIMIT: usize = 10;

/// Status and body of a response, whatever the status.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

/// Resy API client carrying the user's credentials.
#[derive(Debug, Clone)]
pub struct ResyClient {
    http: Client,
    base_url: String,
    api_key: Option<String>,
    auth_token: Option<String>,
    search_limit: usize,
}

impl ResyClient {
    pub fn new(args: &ApiArgs) -> Result<Self, ApiError> {
        let http = Client::builder().timeout(args.timeout()).build()?;

        Ok(Self {
            http,
            base_url: args.api_base.trim_end_matches('/').to_string(),
            api_key: args.api_key.clone(),
            auth_token: args.auth_token.clone(),
            search_limit: DEFAULT_SEARCH_LIMIT,
        })
    }

    /// Caps the number of venues a search returns.
    pub fn with_search_limit(mut self, limit: usize) -> Self {
        self.search_limit = limit.max(1);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.http.request(method, url);

        if let Some(ref key) = self.api_key {
            request = request.header("Authorization", format!("ResyAPI api_key=\"{key}\""));
        }

        if let Some(ref token) = self.auth_token {
            request = request
                .header("X-Resy-Auth-Token", token)
                .header("X-Resy-Universal-Auth", token);
        }

        request
    }

    /// Fetches the current user. Non-2xx statuses are returned, not raised.
    pub async fn fetch_user(&self) -> Result<RawResponse, ApiError> {
        tracing::debug!(base = %self.base_url, "fetching user");
        let response = self.request(Method::GET, USER_PATH).send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();
        tracing::debug!(status, bytes = body.len(), "user response");

        Ok(RawResponse { status, body })
    }

    /// Searches venues by name.
    pub async fn search(&self, query: &str) -> Result<Vec<Venue>, ApiError> {
        tracing::debug!(query, "searching venues");
        let body = json!({
            "query": query,
            "per_page": self.search_limit,
            "types": ["venue"],
        });
        let response = self
            .request(Method::POST, VENUE_SEARCH_PATH)
            .json(&body)
            .send()
            .await?;

        let status = response.status().as_u16();
        let bytes = response.bytes().await?;
        if status >= 400 {
            return Err(ApiError::Status {
                status,
                message: error_message(&bytes),
            });
        }

        let venues = parse_search(&bytes)?;
        tracing::debug!(count = venues.len(), "venue search results");
        Ok(venues.into_iter().take(self.search_limit).collect())
    }
}

impl VenueSearch for ResyClient {
    async fn search_venues(&self, query: &str) -> Result<Vec<Venue>, ApiError> {
        self.search(query).await
    }
}

#[derive(Debug, Default, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    search: SearchHits,
}

#[derive(Debug, Default, Deserialize)]
struct SearchHits {
    #[serde(default)]
    hits: Vec<VenueHit>,
}

#[derive(Debug, Deserialize)]
struct VenueHit {
    #[serde(default)]
    name: String,
    #[serde(default)]
    cuisine: Vec<String>,
    #[serde(default)]
    neighborhood: String,
    #[serde(default)]
    locality: String,
    #[serde(default)]
    rating: Value,
    #[serde(default)]
    id: Value,
}

impl VenueHit {
    fn into_venue(self) -> Option<Venue> {
        let id = scalar(self.id.get("resy").unwrap_or(&self.id))?;
        let location = [self.neighborhood, self.locality]
            .into_iter()
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(", ");
        let rating = self
            .rating
            .get("average")
            .and_then(Value::as_f64)
            .or_else(|| self.rating.as_f64())
            .map(|r| format!("{r:.1}"))
            .unwrap_or_else(|| "-".to_string());

        Some(Venue {
            name: self.name,
            cuisine: self.cuisine.join(", "),
            location,
            rating,
            id,
        })
    }
}

fn scalar(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Decodes a venue search body. Hits without an id are skipped.
fn parse_search(body: &[u8]) -> Result<Vec<Venue>, ApiError> {
    let response: SearchResponse = serde_json::from_slice(body)?;
    Ok(response
        .search
        .hits
        .into_iter()
        .filter_map(VenueHit::into_venue)
        .collect())
}
