use std::time::Duration;

/// Errors raised while looking up metadata.
///
/// None of these abort a run: the enrichment stage turns every variant into a
/// "not found" result. The variants exist so retries and logs can tell them apart.
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    /// API key missing, invalid or revoked (HTTP 401).
    #[error("unauthorized: {message}")]
    Unauthorized { message: String },

    /// Too many requests (HTTP 429).
    #[error("rate limited: retry after {retry_after:?}")]
    RateLimited { retry_after: Option<Duration> },

    /// Unexpected HTTP status.
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// Connection, timeout or other transport failure.
    #[error("network error: {message}")]
    Network { message: String },

    /// Response body did not have the expected shape.
    #[error("invalid response: {message}")]
    InvalidResponse { message: String },
}

impl LookupError {
    /// Whether the request may succeed if sent again.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::RateLimited { .. } | Self::Network { .. } => true,
            Self::Http { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Short category used to group failures in progress summaries.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Unauthorized { .. } => "unauthorized",
            Self::RateLimited { .. } => "rate_limited",
            Self::Http { .. } => "http",
            Self::Network { .. } => "network",
            Self::InvalidResponse { .. } => "invalid_response",
        }
    }
}

impl From<reqwest::Error> for LookupError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::InvalidResponse {
                message: err.to_string(),
            }
        } else {
            Self::Network {
                message: err.to_string(),
            }
        }
    }
}

pub type LookupResult<T> = Result<T, LookupError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_errors() {
        assert!(LookupError::RateLimited { retry_after: None }.is_retryable());
        assert!(LookupError::Network { message: "reset".into() }.is_retryable());
        assert!(LookupError::Http { status: 503, message: "down".into() }.is_retryable());
        assert!(!LookupError::Http { status: 400, message: "bad".into() }.is_retryable());
        assert!(!LookupError::Unauthorized { message: "nope".into() }.is_retryable());
    }
}
