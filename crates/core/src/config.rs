use serde::{Deserialize, Serialize};

/// Which vendor answers fetches. Selected by configuration, never by
/// sniffing response shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Vendor {
    Tmdb,
    Omdb,
}

impl Vendor {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Tmdb => "tmdb",
            Self::Omdb => "omdb",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tmdb" => Some(Self::Tmdb),
            "omdb" => Some(Self::Omdb),
            _ => None,
        }
    }
}

impl std::fmt::Display for Vendor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TmdbConfig {
    pub base_url: String,
    pub image_base: String,
    /// Query parameter carrying the API key.
    pub key_param: String,
}

impl Default for TmdbConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.themoviedb.org/3".into(),
            image_base: "https://image.tmdb.org/t/p".into(),
            key_param: "api_key".into(),
        }
    }
}

/// OMDb query surface. The vendor addresses everything through one endpoint
/// and distinguishes calls by parameter name, so the names are configuration
/// rather than code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OmdbConfig {
    pub base_url: String,
    /// Query parameter carrying the API key.
    pub key_param: String,
    /// Title-search parameter.
    pub search_param: String,
    /// By-id lookup parameter.
    pub id_param: String,
    pub page_param: String,
    /// Plot verbosity parameter for detail calls.
    pub plot_param: String,
    /// Search term used when the shell asks for a list without a query;
    /// OMDb has no "popular" endpoint.
    pub default_query: String,
}

impl Default for OmdbConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.omdbapi.com".into(),
            key_param: "apikey".into(),
            search_param: "s".into(),
            id_param: "i".into(),
            page_param: "page".into(),
            plot_param: "plot".into(),
            default_query: "movie".into(),
        }
    }
}

/// Runtime configuration, read from `CINESCOUT_*` environment variables.
///
/// A missing API key is not a startup error: the key stays empty and the
/// first fetch reports `unauthorized`, so the shell can show a real message
/// instead of the process dying before it renders anything.
#[derive(Debug, Clone)]
pub struct Config {
    pub vendor: Vendor,
    pub api_key: String,
    pub tmdb: TmdbConfig,
    pub omdb: OmdbConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            vendor: Vendor::Tmdb,
            api_key: String::new(),
            tmdb: TmdbConfig::default(),
            omdb: OmdbConfig::default(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(v) = std::env::var("CINESCOUT_VENDOR") {
            if let Some(vendor) = Vendor::parse(&v) {
                config.vendor = vendor;
            }
        }
        if let Ok(key) = std::env::var("CINESCOUT_API_KEY") {
            config.api_key = key;
        }
        if let Ok(url) = std::env::var("CINESCOUT_BASE_URL") {
            let url = url.trim_end_matches('/').to_string();
            match config.vendor {
                Vendor::Tmdb => config.tmdb.base_url = url,
                Vendor::Omdb => config.omdb.base_url = url,
            }
        }

        config
    }
}
