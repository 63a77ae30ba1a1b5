use reqwest::StatusCode;
use thiserror::Error;

/// Failure of a single outbound provider call. These never propagate past
/// the fetch boundary: a failed source contributes zero items while the
/// rest of the pipeline proceeds.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{provider} returned status {status}")]
    Status {
        provider: &'static str,
        status: StatusCode,
    },

    #[error("request to {provider} timed out")]
    Timeout { provider: &'static str },

    #[error("malformed {provider} payload: {detail}")]
    Payload {
        provider: &'static str,
        detail: String,
    },
}

impl SourceError {
    pub fn status(provider: &'static str, status: StatusCode) -> Self {
        Self::Status { provider, status }
    }

    /// Map a reqwest error, folding client-side timeouts into the
    /// dedicated variant so they read the same as any other failure.
    pub fn from_reqwest(provider: &'static str, err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout { provider }
        } else {
            Self::Http(err)
        }
    }

    pub fn payload(provider: &'static str, detail: impl Into<String>) -> Self {
        Self::Payload {
            provider,
            detail: detail.into(),
        }
    }
}
