//! OMDb vendor client.
//!
//! One endpoint, call selected by query parameter (`s` search, `i` by-id).
//! OMDb reports failure inside a 200 response (`"Response": "False"` plus an
//! `Error` message) and marks missing fields with the literal string `N/A`,
//! so both get translated here and never leak past the trait boundary.

use tracing::debug;

use cinescout_core::{FetchError, Movie, OmdbConfig, Shape};

use crate::http;
use crate::provider::MovieProvider;
use crate::similar;

/// The vendor's in-band "no value" marker.
const NO_VALUE: &str = "N/A";

/// Keys consumed by the canonical mapping (plus the response envelope flag);
/// the rest of a detail payload lands verbatim in `Movie::extended`.
const CANONICAL_KEYS: &[&str] = &[
    "imdbID", "Title", "Poster", "Year", "imdbRating", "Plot", "Response",
];

pub struct OmdbClient {
    api_key: String,
    config: OmdbConfig,
    client: reqwest::Client,
}

impl OmdbClient {
    pub fn new(api_key: String, config: OmdbConfig) -> Self {
        Self {
            api_key,
            config,
            client: reqwest::Client::new(),
        }
    }

    async fn get_json(&self, params: &[(&str, &str)]) -> Result<serde_json::Value, FetchError> {
        if self.api_key.is_empty() {
            return Err(FetchError::Unauthorized("no API key configured".into()));
        }

        let mut all_params = vec![(self.config.key_param.as_str(), self.api_key.as_str())];
        all_params.extend_from_slice(params);

        http::get_json(&self.client, &self.config.base_url, &all_params).await
    }
}

#[async_trait::async_trait]
impl MovieProvider for OmdbClient {
    fn name(&self) -> &str {
        "omdb"
    }

    async fn default_list(&self) -> Result<Vec<Movie>, FetchError> {
        // OMDb has no popularity endpoint; fall back to a configured term.
        let default_query = self.config.default_query.clone();
        self.search(&default_query).await
    }

    async fn search(&self, query: &str) -> Result<Vec<Movie>, FetchError> {
        let data = self
            .get_json(&[
                (self.config.search_param.as_str(), query),
                (self.config.page_param.as_str(), "1"),
            ])
            .await?;
        search_results(&data)
    }

    async fn detail(&self, id: &str) -> Result<Movie, FetchError> {
        let data = self
            .get_json(&[
                (self.config.id_param.as_str(), id),
                (self.config.plot_param.as_str(), "full"),
            ])
            .await?;

        if let Some(message) = in_band_failure(&data) {
            return Err(FetchError::NotFound(message));
        }

        normalize(&data, Shape::Detail)
    }

    async fn similar(&self, seed: &Movie) -> Vec<Movie> {
        // No native recommendations endpoint: derive them from a title
        // search, re-fetching each candidate for full detail.
        similar::from_title_search(self, &seed.title, &seed.id).await
    }
}

/// Map a search response body onto result rows.
///
/// Zero matches arrives as the in-band failure flag with the vendor's
/// not-found message; that is an empty list, not an error. Any other
/// in-band failure is a real one.
fn search_results(data: &serde_json::Value) -> Result<Vec<Movie>, FetchError> {
    if let Some(message) = in_band_failure(data) {
        if message.to_ascii_lowercase().contains("not found") {
            return Ok(Vec::new());
        }
        return Err(FetchError::Unknown(message));
    }

    let results = data["Search"].as_array().cloned().unwrap_or_default();
    results
        .iter()
        .map(|r| normalize(r, Shape::Summary))
        .collect()
}

/// The vendor's in-band failure flag, with its message when set.
fn in_band_failure(data: &serde_json::Value) -> Option<String> {
    if data["Response"].as_str() == Some("False") {
        let message = data["Error"]
            .as_str()
            .filter(|m| !m.is_empty())
            .unwrap_or("vendor reported failure")
            .to_string();
        debug!(message = %message, "OMDb in-band failure");
        return Some(message);
    }
    None
}

/// Map one OMDb record onto the canonical shape, collapsing `N/A` to absent.
fn normalize(data: &serde_json::Value, shape: Shape) -> Result<Movie, FetchError> {
    let id = field(data, "imdbID")
        .ok_or_else(|| FetchError::Unknown("vendor record missing id".into()))?;
    let title = field(data, "Title")
        .ok_or_else(|| FetchError::Unknown("vendor record missing title".into()))?;

    let mut extended = serde_json::Map::new();
    if shape == Shape::Detail {
        if let Some(obj) = data.as_object() {
            for (key, value) in obj {
                if !CANONICAL_KEYS.contains(&key.as_str()) {
                    extended.insert(key.clone(), value.clone());
                }
            }
        }
    }

    Ok(Movie {
        id,
        title,
        poster_url: field(data, "Poster"),
        release: field(data, "Year"),
        rating: field(data, "imdbRating").and_then(|r| r.parse().ok()),
        overview: field(data, "Plot"),
        extended,
    })
}

/// A string field, absent when missing, empty, or the vendor's no-value
/// sentinel.
fn field(data: &serde_json::Value, key: &str) -> Option<String> {
    data[key]
        .as_str()
        .filter(|s| !s.is_empty() && *s != NO_VALUE)
        .map(|s| s.to_string())
}
