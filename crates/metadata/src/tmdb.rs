//! TMDB (The Movie Database) vendor client.
//!
//! Uses TMDB API v3: https://developer.themoviedb.org/docs

use tracing::debug;

use cinescout_core::{FetchError, Movie, Shape, TmdbConfig};

use crate::http;
use crate::provider::MovieProvider;
use crate::similar::MAX_SIMILAR;

/// Top-level keys consumed by the canonical mapping; everything else in a
/// detail payload is retained verbatim in `Movie::extended`.
const CANONICAL_KEYS: &[&str] = &[
    "id",
    "title",
    "poster_path",
    "release_date",
    "vote_average",
    "overview",
];

pub struct TmdbClient {
    api_key: String,
    config: TmdbConfig,
    client: reqwest::Client,
}

impl TmdbClient {
    pub fn new(api_key: String, config: TmdbConfig) -> Self {
        Self {
            api_key,
            config,
            client: reqwest::Client::new(),
        }
    }

    async fn get_json(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<serde_json::Value, FetchError> {
        if self.api_key.is_empty() {
            return Err(FetchError::Unauthorized("no API key configured".into()));
        }

        let mut all_params = vec![(self.config.key_param.as_str(), self.api_key.as_str())];
        all_params.extend_from_slice(params);

        let url = format!("{}{}", self.config.base_url, path);
        http::get_json(&self.client, &url, &all_params).await
    }

    fn list_from(&self, data: &serde_json::Value) -> Result<Vec<Movie>, FetchError> {
        let results = data["results"].as_array().cloned().unwrap_or_default();
        results
            .iter()
            .map(|r| normalize(r, &self.config.image_base, Shape::Summary))
            .collect()
    }
}

#[async_trait::async_trait]
impl MovieProvider for TmdbClient {
    fn name(&self) -> &str {
        "tmdb"
    }

    async fn default_list(&self) -> Result<Vec<Movie>, FetchError> {
        let data = self.get_json("/movie/popular", &[]).await?;
        self.list_from(&data)
    }

    async fn search(&self, query: &str) -> Result<Vec<Movie>, FetchError> {
        let data = self.get_json("/search/movie", &[("query", query)]).await?;
        self.list_from(&data)
    }

    async fn detail(&self, id: &str) -> Result<Movie, FetchError> {
        let data = self
            .get_json(
                &format!("/movie/{id}"),
                &[("append_to_response", "videos")],
            )
            .await?;
        normalize(&data, &self.config.image_base, Shape::Detail)
    }

    async fn similar(&self, seed: &Movie) -> Vec<Movie> {
        // Native endpoint; recommendations stay best-effort.
        let data = match self
            .get_json(&format!("/movie/{}/similar", seed.id), &[("page", "1")])
            .await
        {
            Ok(data) => data,
            Err(e) => {
                debug!(id = %seed.id, error = %e, "similar lookup failed");
                return Vec::new();
            }
        };

        let results = data["results"].as_array().cloned().unwrap_or_default();
        results
            .iter()
            .filter_map(|r| normalize(r, &self.config.image_base, Shape::Summary).ok())
            .filter(|m| m.id != seed.id)
            .take(MAX_SIMILAR)
            .collect()
    }
}

/// Map one TMDB record onto the canonical shape.
///
/// TMDB ships posters as relative paths; they become absolute against the
/// configured image base. A record without an id or title is malformed.
fn normalize(
    data: &serde_json::Value,
    image_base: &str,
    shape: Shape,
) -> Result<Movie, FetchError> {
    let id = data["id"]
        .as_u64()
        .map(|v| v.to_string())
        .ok_or_else(|| FetchError::Unknown("vendor record missing id".into()))?;
    let title = data["title"]
        .as_str()
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
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
        poster_url: data["poster_path"]
            .as_str()
            .filter(|p| !p.is_empty())
            .map(|p| format!("{image_base}/w500{p}")),
        release: data["release_date"]
            .as_str()
            .filter(|d| !d.is_empty())
            .map(|d| d.to_string()),
        rating: data["vote_average"].as_f64(),
        overview: data["overview"]
            .as_str()
            .filter(|o| !o.is_empty())
            .map(|o| o.to_string()),
        extended,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_summary_row() {
        let json = serde_json::json!({
            "id": 27205,
            "title": "Inception",
            "poster_path": "/poster.jpg",
            "release_date": "2010-07-16",
            "vote_average": 8.4,
            "overview": "A thief who steals corporate secrets...",
            "genre_ids": [28, 878]
        });

        let movie = normalize(&json, "https://image.tmdb.org/t/p", Shape::Summary).unwrap();
        assert_eq!(movie.id, "27205");
        assert_eq!(movie.title, "Inception");
        assert_eq!(
            movie.poster_url.as_deref(),
            Some("https://image.tmdb.org/t/p/w500/poster.jpg")
        );
        assert_eq!(movie.release.as_deref(), Some("2010-07-16"));
        assert!((movie.rating.unwrap() - 8.4).abs() < 0.01);
        // Summary rows never carry extended fields.
        assert!(movie.extended.is_empty());
    }

    #[test]
    fn normalize_detail_retains_vendor_extras_verbatim() {
        let json = serde_json::json!({
            "id": 27205,
            "title": "Inception",
            "release_date": "2010-07-16",
            "vote_average": 8.4,
            "runtime": 148,
            "genres": [{ "id": 28, "name": "Action" }],
            "videos": { "results": [{ "site": "YouTube", "type": "Trailer", "key": "abc" }] }
        });

        let movie = normalize(&json, "https://image.tmdb.org/t/p", Shape::Detail).unwrap();
        assert_eq!(movie.extended["runtime"], 148);
        assert_eq!(movie.extended["genres"][0]["name"], "Action");
        assert_eq!(movie.extended["videos"]["results"][0]["key"], "abc");
        // Canonically mapped keys do not reappear in extended.
        assert!(!movie.extended.contains_key("title"));
        assert!(!movie.extended.contains_key("vote_average"));
    }

    #[test]
    fn zero_rating_is_data_not_absence() {
        let json = serde_json::json!({ "id": 1, "title": "Unrated", "vote_average": 0.0 });
        let movie = normalize(&json, "base", Shape::Summary).unwrap();
        assert_eq!(movie.rating, Some(0.0));

        let json = serde_json::json!({ "id": 1, "title": "Unrated" });
        let movie = normalize(&json, "base", Shape::Summary).unwrap();
        assert_eq!(movie.rating, None);
    }

    #[test]
    fn missing_poster_is_absent_not_placeholder() {
        let json = serde_json::json!({ "id": 1, "title": "Obscure", "poster_path": null });
        let movie = normalize(&json, "base", Shape::Summary).unwrap();
        assert_eq!(movie.poster_url, None);
    }

    #[test]
    fn record_without_id_or_title_is_rejected() {
        let no_id = serde_json::json!({ "title": "Nameless" });
        assert!(normalize(&no_id, "base", Shape::Summary).is_err());

        let no_title = serde_json::json!({ "id": 42 });
        let err = normalize(&no_title, "base", Shape::Summary).unwrap_err();
        assert_eq!(err.kind(), "unknown");
    }

    #[test]
    fn zero_match_page_is_an_empty_list_not_an_error() {
        let client = TmdbClient::new("key".into(), cinescout_core::TmdbConfig::default());
        let page = serde_json::json!({ "page": 1, "results": [], "total_results": 0 });
        assert_eq!(client.list_from(&page).unwrap(), Vec::<Movie>::new());
    }

    #[test]
    fn search_page_preserves_vendor_order_and_absent_posters() {
        let client = TmdbClient::new("key".into(), cinescout_core::TmdbConfig::default());
        let page = serde_json::json!({
            "results": [
                { "id": 1, "title": "Batman", "poster_path": "/b1.jpg" },
                { "id": 2, "title": "Batman Returns", "poster_path": null },
                { "id": 3, "title": "Batman Begins", "poster_path": "/b3.jpg" }
            ]
        });

        let movies = client.list_from(&page).unwrap();
        assert_eq!(movies.len(), 3);
        let titles: Vec<&str> = movies.iter().map(|m| m.title.as_str()).collect();
        assert_eq!(titles, ["Batman", "Batman Returns", "Batman Begins"]);
        assert!(movies[0].poster_url.is_some());
        assert_eq!(movies[1].poster_url, None);
    }

    #[tokio::test]
    async fn empty_api_key_is_unauthorized_before_any_request() {
        let client = TmdbClient::new(String::new(), cinescout_core::TmdbConfig::default());
        assert_eq!(
            client.search("batman").await.unwrap_err().kind(),
            "unauthorized"
        );
        assert_eq!(client.detail("27205").await.unwrap_err().kind(), "unauthorized");

        // Recommendations stay best-effort even without a key.
        let seed = Movie {
            id: "27205".into(),
            title: "Inception".into(),
            ..Default::default()
        };
        assert!(client.similar(&seed).await.is_empty());
    }

    #[test]
    fn normalize_is_deterministic() {
        let json = serde_json::json!({
            "id": 27205,
            "title": "Inception",
            "vote_average": 8.4,
            "runtime": 148
        });
        let a = normalize(&json, "base", Shape::Detail).unwrap();
        let b = normalize(&json, "base", Shape::Detail).unwrap();
        assert_eq!(a, b);
    }
}
