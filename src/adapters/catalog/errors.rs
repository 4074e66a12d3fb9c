use reqwest::StatusCode;
use thiserror::Error;

/// Failures while fetching the breed list from the catalog.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Connection refused, DNS failure, timeout and similar transport errors
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Catalog answered with a non-success status
    #[error("unexpected status {0}")]
    Status(StatusCode),

    /// Body was not a JSON array of breeds
    #[error("malformed breed list: {0}")]
    Decode(String),
}

impl FetchError {
    /// Network failures, 5xx, 408 and 429 are worth another attempt.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network(_) => true,
            Self::Status(status) => {
                status.is_server_error()
                    || *status == StatusCode::REQUEST_TIMEOUT
                    || *status == StatusCode::TOO_MANY_REQUESTS
            }
            Self::Decode(_) => false,
        }
    }
}
