use std::sync::Arc;

use cinescout_core::{Config, FetchError, Movie, Vendor};

use crate::omdb::OmdbClient;
use crate::tmdb::TmdbClient;

/// One movie-metadata vendor.
///
/// Implementations own their HTTP client and normalize every payload into
/// the vendor-agnostic [`Movie`] shape before it leaves the trait boundary.
#[async_trait::async_trait]
pub trait MovieProvider: Send + Sync {
    fn name(&self) -> &str;

    /// List shown when the shell asks for movies without a query.
    async fn default_list(&self) -> Result<Vec<Movie>, FetchError>;

    /// Title search. Zero matches is an empty list, never an error.
    async fn search(&self, query: &str) -> Result<Vec<Movie>, FetchError>;

    /// Full record by vendor id. A vendor-reported miss is
    /// [`FetchError::NotFound`], never a hollow record.
    async fn detail(&self, id: &str) -> Result<Movie, FetchError>;

    /// Up to five recommendations for `seed`, never containing `seed.id`.
    ///
    /// Recommendations are supplementary: this can not fail outward. Any
    /// internal failure degrades to an empty list.
    async fn similar(&self, seed: &Movie) -> Vec<Movie>;
}

/// Build the configured vendor client.
pub fn from_config(config: &Config) -> Arc<dyn MovieProvider> {
    match config.vendor {
        Vendor::Tmdb => Arc::new(TmdbClient::new(config.api_key.clone(), config.tmdb.clone())),
        Vendor::Omdb => Arc::new(OmdbClient::new(config.api_key.clone(), config.omdb.clone())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factory_selects_vendor_from_config() {
        let mut config = Config::default();
        assert_eq!(from_config(&config).name(), "tmdb");
        config.vendor = Vendor::Omdb;
        assert_eq!(from_config(&config).name(), "omdb");
    }
}
