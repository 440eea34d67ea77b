use thiserror::Error;

/// Classified fetch failure, created only at the fetch boundary.
///
/// List and detail fetches hand this to the caller unchanged; the shell
/// renders it and offers a manual retry. Nothing in the data layer retries
/// automatically.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FetchError {
    /// No HTTP response was received at all.
    #[error("network error: {0}")]
    Network(String),

    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("forbidden: {0}")]
    Forbidden(String),

    #[error("rate limited: {message}")]
    RateLimited {
        message: String,
        /// Seconds to wait, when the vendor sent a Retry-After value.
        retry_after: Option<u64>,
    },

    #[error("not found: {0}")]
    NotFound(String),

    #[error("unknown error: {0}")]
    Unknown(String),
}

impl FetchError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Network(_) => "network",
            Self::Unauthorized(_) => "unauthorized",
            Self::Forbidden(_) => "forbidden",
            Self::RateLimited { .. } => "rate-limited",
            Self::NotFound(_) => "not-found",
            Self::Unknown(_) => "unknown",
        }
    }

    /// Classify a non-success HTTP response.
    ///
    /// Precedence is fixed: 401, 403, 429, 404, everything else `Unknown`.
    /// Transport failures (no response) never reach this; they become
    /// [`FetchError::Network`] at the call site. `vendor_message` is the
    /// error text extracted from the response body, when there was one.
    pub fn from_status(
        status: u16,
        vendor_message: Option<String>,
        retry_after: Option<u64>,
    ) -> Self {
        match status {
            401 => Self::Unauthorized(
                vendor_message.unwrap_or_else(|| "vendor rejected the API key".into()),
            ),
            403 => Self::Forbidden(
                vendor_message.unwrap_or_else(|| "vendor denied access".into()),
            ),
            429 => Self::RateLimited {
                message: vendor_message.unwrap_or_else(|| "vendor rate limit reached".into()),
                retry_after,
            },
            404 => Self::NotFound(vendor_message.unwrap_or_else(|| "no such record".into())),
            s => Self::Unknown(
                vendor_message.unwrap_or_else(|| format!("vendor returned HTTP {s}")),
            ),
        }
    }
}
