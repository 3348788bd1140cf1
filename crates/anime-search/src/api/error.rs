//! Fetch failure taxonomy.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP error, status {status}")]
    Http { status: u16 },
    #[error("request could not complete")]
    Network(#[source] reqwest::Error),
    #[error("response body is not a valid search result")]
    Parse(#[source] serde_json::Error),
}

impl FetchError {
    /// Short category name used in structured logs
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::Http { .. } => "http",
            FetchError::Network(_) => "network",
            FetchError::Parse(_) => "parse",
        }
    }
}
