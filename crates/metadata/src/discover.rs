//! The three operations the view shell consumes: list, detail, similar.

use std::sync::Arc;

use cinescout_core::{Config, FetchError, Movie, MovieDetail};

use crate::latest::Generation;
use crate::provider::{self, MovieProvider};

/// Outcome of a guarded fetch.
///
/// `Superseded` means a newer fetch for the same view began while this one
/// was in flight; the shell must drop it rather than render it over newer
/// state.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewUpdate<T> {
    Latest(T),
    Superseded,
}

impl<T> ViewUpdate<T> {
    pub fn into_latest(self) -> Option<T> {
        match self {
            Self::Latest(value) => Some(value),
            Self::Superseded => None,
        }
    }

    pub fn is_superseded(&self) -> bool {
        matches!(self, Self::Superseded)
    }
}

/// Facade over the configured vendor.
///
/// Holds no state beyond the per-view generation counters; every record it
/// hands out is scoped to the fetch that produced it.
pub struct Discovery {
    provider: Arc<dyn MovieProvider>,
    list_generation: Generation,
    detail_generation: Generation,
}

impl Discovery {
    pub fn new(provider: Arc<dyn MovieProvider>) -> Self {
        Self {
            provider,
            list_generation: Generation::new(),
            detail_generation: Generation::new(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(provider::from_config(config))
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// List fetch for the browse view.
    ///
    /// The query is trimmed; an empty or missing query asks the vendor for
    /// its default list instead. Zero matches is `Ok` with an empty list.
    pub async fn list(&self, query: Option<&str>) -> ViewUpdate<Result<Vec<Movie>, FetchError>> {
        let token = self.list_generation.begin();
        let query = query.map(str::trim).filter(|q| !q.is_empty());

        let result = match query {
            Some(q) => self.provider.search(q).await,
            None => self.provider.default_list().await,
        };

        if !self.list_generation.is_current(token) {
            return ViewUpdate::Superseded;
        }
        ViewUpdate::Latest(result)
    }

    /// Detail fetch for the movie view.
    ///
    /// Similar movies resolve only after the primary record is known (the
    /// seed title comes from it) and can neither fail nor delay an error
    /// into the primary result.
    pub async fn detail(&self, id: &str) -> ViewUpdate<Result<MovieDetail, FetchError>> {
        let token = self.detail_generation.begin();

        let result = match self.provider.detail(id).await {
            Ok(movie) => {
                let similar = self.provider.similar(&movie).await;
                Ok(MovieDetail { movie, similar })
            }
            Err(e) => Err(e),
        };

        if !self.detail_generation.is_current(token) {
            return ViewUpdate::Superseded;
        }
        ViewUpdate::Latest(result)
    }

    /// Standalone similar fetch, for shells that re-resolve recommendations
    /// without re-fetching the seed. Never fails.
    pub async fn similar(&self, seed: &Movie) -> Vec<Movie> {
        self.provider.similar(seed).await
    }
}
