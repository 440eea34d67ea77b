use serde::{Deserialize, Serialize};

/// How much of a vendor record a call asked for.
///
/// Summary rows come from list/search endpoints and carry no `extended`
/// payload; detail records come from a by-id call and keep the vendor's
/// remaining descriptive fields verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Summary,
    Detail,
}

/// Vendor-agnostic movie record.
///
/// Optional fields are `None` when the vendor reported no value, including
/// when it used an in-band "no value" marker. A rating of `Some(0.0)` is
/// real data; `None` means the vendor sent nothing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: String,
    pub title: String,
    pub poster_url: Option<String>,
    /// Release year or full date, exactly as the vendor shaped it.
    pub release: Option<String>,
    /// Community rating on a 0..=10 scale.
    pub rating: Option<f64>,
    pub overview: Option<String>,
    /// Remaining vendor fields (genre, runtime, cast, awards, trailers, ...)
    /// kept verbatim. Shape depends entirely on which vendor answered, so
    /// every field in here is optional to readers. Empty for summary rows.
    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub extended: serde_json::Map<String, serde_json::Value>,
}

impl Movie {
    /// Release year for display, when the vendor string starts with one.
    pub fn year(&self) -> Option<&str> {
        self.release.as_deref().and_then(|r| r.get(..4))
    }
}

/// A full record together with its similar-movie recommendations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieDetail {
    pub movie: Movie,
    /// At most five, never including `movie.id`. Empty when the secondary
    /// lookup failed; that failure is deliberately not reported.
    pub similar: Vec<Movie>,
}
