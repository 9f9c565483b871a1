use thiserror::Error;

/// The primary error type for all fallible operations in this crate.
#[derive(Debug, Error)]
pub enum DashError {
    /// An error occurred during an HTTP request (connect, timeout, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider answered with HTTP 429.
    #[error("rate limited at {url}")]
    RateLimited {
        /// The URL that was throttled.
        url: String,
    },

    /// The server returned an unexpected or unsuccessful HTTP status code.
    #[error("Unexpected response status: {status} at {url}")]
    Status {
        /// The HTTP status code.
        status: u16,
        /// The URL that returned the error.
        url: String,
    },

    /// Cookie or crumb acquisition failed.
    #[error("authentication error: {0}")]
    Auth(String),

    /// The payload could not be parsed or lacked a required node.
    #[error("Data format unexpected or missing field: {0}")]
    Malformed(String),

    /// The symbol is well-formed but the provider has no data for it.
    #[error("no data found for symbol {symbol}")]
    NotFound {
        /// The symbol that was looked up.
        symbol: String,
    },

    /// Rejected before any network call (empty or garbage symbol, bad transition).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A provided URL could not be parsed.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

/// Coarse classification used for user-facing messaging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Transport failure, non-success status or rate-limit exhaustion.
    RemoteUnavailable,
    /// Provider payload could not be parsed.
    MalformedResponse,
    /// Symbol valid but no data.
    NotFound,
    /// Rejected locally.
    InvalidInput,
}

impl DashError {
    /// Maps the error onto the four user-visible kinds.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Http(_) | Self::RateLimited { .. } | Self::Status { .. } | Self::Auth(_) => {
                ErrorKind::RemoteUnavailable
            }
            Self::Malformed(_) => ErrorKind::MalformedResponse,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::InvalidInput(_) | Self::Url(_) => ErrorKind::InvalidInput,
        }
    }

    /// True only for HTTP 429; the retry policy absorbs nothing else.
    #[must_use]
    pub const fn is_rate_limited(&self) -> bool {
        matches!(self, Self::RateLimited { .. })
    }

    /// A message suitable for showing to the end user.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::RateLimited { .. } => {
                "429: too many requests. Please try again later.".to_string()
            }
            Self::Http(_) | Self::Status { .. } | Self::Auth(_) => {
                format!("Data provider unavailable ({self}). Please try again later.")
            }
            Self::Malformed(_) => {
                "Could not parse the provider response. Please try again later.".to_string()
            }
            Self::NotFound { symbol } => format!("No data found for '{symbol}'."),
            Self::InvalidInput(msg) => format!("Invalid input: {msg}."),
            Self::Url(_) => "Invalid ticker symbol.".to_string(),
        }
    }
}
