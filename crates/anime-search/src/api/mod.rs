//! Jikan API v4 search client.
//!
//! `SearchBackend` is the seam the controller depends on; `JikanClient` is
//! the HTTP implementation.

pub mod client;
pub mod error;
pub mod types;

pub use client::JikanClient;
pub use error::FetchError;
pub use types::*;

use crate::query::SearchQuery;
use async_trait::async_trait;

/// Something that can answer a search with a result set
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Perform exactly one lookup for `query`.
    async fn search(&self, query: &SearchQuery) -> Result<ResultSet, FetchError>;
}
