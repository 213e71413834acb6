//! OMDb (Open Movie Database) search client
//!
//! Direct REST integration with the `?s=<term>` title search endpoint.

use anyhow::{Context, Result};
use async_trait::async_trait;
use quicksearch_core::{
    cancellable, CancellationToken, DataSource, Query, ResultItem, SourceError, SourceResult,
    NO_RESULTS_MESSAGE,
};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Public OMDb endpoint
pub const DEFAULT_BASE_URL: &str = "https://www.omdbapi.com/";

/// Longest error body excerpt kept in a transport error
const MAX_ERROR_BODY: usize = 500;

/// One title from a search response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieSummary {
    #[serde(rename = "imdbID")]
    pub imdb_id: String,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Year", default)]
    pub year: Option<String>,
    #[serde(rename = "Type", default)]
    pub kind: Option<String>,
    #[serde(rename = "Poster", default)]
    pub poster: Option<String>,
}

impl From<MovieSummary> for ResultItem {
    fn from(movie: MovieSummary) -> Self {
        ResultItem {
            id: movie.imdb_id,
            title: movie.title,
            subtitle: movie.year,
            badge: movie.kind,
        }
    }
}

/// Raw API response structure
///
/// OMDb reports success as the strings "True"/"False" and keeps its HTTP
/// status at 200 for most domain errors.
#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(rename = "Response")]
    response: String,
    #[serde(rename = "Search", default)]
    search: Vec<MovieSummary>,
    #[serde(rename = "Error", default)]
    error: Option<String>,
}

/// Decode a search response body into items or a domain error.
///
/// Bodies that are not OMDb JSON are transport errors.
pub fn parse_search_response(body: &str) -> SourceResult<Vec<ResultItem>> {
    let data: SearchResponse = serde_json::from_str(body)
        .map_err(|err| SourceError::transport(format!("Failed to parse response: {err}")))?;

    if data.response.eq_ignore_ascii_case("true") {
        Ok(data.search.into_iter().map(ResultItem::from).collect())
    } else {
        let message = data
            .error
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| NO_RESULTS_MESSAGE.to_string());
        Err(SourceError::domain(message))
    }
}

/// OMDb title search client
#[derive(Debug, Clone)]
pub struct OmdbClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl OmdbClient {
    /// Create a new client against the public endpoint
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Point the client at another endpoint (e.g. a local mock)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Create client from environment variables
    /// Reads OMDB_API_KEY and, optionally, OMDB_BASE_URL
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("OMDB_API_KEY")
            .context("OMDB_API_KEY not set (add it to ~/.quicksearch/.env or export it)")?;
        let client = Self::new(api_key);
        Ok(match std::env::var("OMDB_BASE_URL") {
            Ok(url) if !url.trim().is_empty() => client.with_base_url(url),
            _ => client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Search titles by keyword
    #[instrument(skip(self), fields(base_url = %self.base_url))]
    pub async fn search_titles(&self, term: &str) -> SourceResult<Vec<ResultItem>> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[("apikey", self.api_key.as_str()), ("s", term)])
            .send()
            .await
            .map_err(|err| SourceError::transport(format!("Failed to send search request: {err}")))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| SourceError::transport(format!("Failed to read response body: {err}")))?;

        let outcome = decode_response(status, &body);
        debug!(%status, ok = outcome.is_ok(), "OMDb response decoded");
        outcome
    }
}

/// Map an HTTP status and body to a search outcome.
///
/// OMDb answers some failures (bad key, limit reached) with a JSON error
/// body and a 4xx status; those keep OMDb's message as a domain error.
/// Any other non-2xx response is a transport error.
pub fn decode_response(status: StatusCode, body: &str) -> SourceResult<Vec<ResultItem>> {
    match parse_search_response(body) {
        Err(SourceError::Transport { .. }) if !status.is_success() => {
            Err(SourceError::transport(format!(
                "OMDb search failed ({}): {}",
                status,
                truncate(body, MAX_ERROR_BODY)
            )))
        }
        Ok(_) if !status.is_success() => Err(SourceError::transport(format!(
            "OMDb search failed ({})",
            status
        ))),
        outcome => outcome,
    }
}

#[async_trait]
impl DataSource for OmdbClient {
    async fn search(
        &self,
        query: &Query,
        cancel: CancellationToken,
    ) -> SourceResult<Vec<ResultItem>> {
        cancellable(&cancel, self.search_titles(query.as_str())).await
    }

    fn name(&self) -> &str {
        "omdb"
    }
}

/// Truncate on a char boundary
fn truncate(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}
