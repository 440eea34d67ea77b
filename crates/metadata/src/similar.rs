//! Search-based similar-movie derivation, for vendors without a native
//! recommendations endpoint.

use futures::future::join_all;
use tracing::debug;

use cinescout_core::Movie;

use crate::provider::MovieProvider;

/// Cap on recommendations, regardless of how many the vendor returns.
pub const MAX_SIMILAR: usize = 5;

/// Derive up to [`MAX_SIMILAR`] related movies from a title search.
///
/// The seed's own id is dropped from the candidates, the first five
/// survivors (in vendor relevance order) are re-fetched for full detail
/// concurrently, and a candidate whose re-fetch fails is dropped without
/// affecting its siblings. This never errors: a failed search, like an
/// all-failed fan-out, yields an empty list.
pub async fn from_title_search<P>(provider: &P, seed_title: &str, exclude_id: &str) -> Vec<Movie>
where
    P: MovieProvider + ?Sized,
{
    let results = match provider.search(seed_title).await {
        Ok(results) => results,
        Err(e) => {
            debug!(seed_title, error = %e, "similar search failed");
            return Vec::new();
        }
    };

    let candidates: Vec<Movie> = results
        .into_iter()
        .filter(|m| m.id != exclude_id)
        .take(MAX_SIMILAR)
        .collect();

    let fetches = candidates.iter().map(|m| provider.detail(&m.id));
    join_all(fetches)
        .await
        .into_iter()
        .zip(&candidates)
        .filter_map(|(fetched, candidate)| match fetched {
            Ok(movie) => Some(movie),
            Err(e) => {
                debug!(id = %candidate.id, error = %e, "similar candidate dropped");
                None
            }
        })
        .collect()
}
