//! Jikan API client.
//!
//! One GET per search. No rate limiting, retry or caching: a failed request
//! is reported to the caller as a `FetchError`.

use super::error::FetchError;
use super::types::{ResultSet, SearchResponse};
use super::SearchBackend;
use crate::query::SearchQuery;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

/// Jikan API v4 client
pub struct JikanClient {
    /// HTTP client
    client: Client,
    /// Base URL for Jikan API, without trailing slash
    base_url: String,
}

impl JikanClient {
    /// Create a new Jikan client
    pub fn new(base_url: &str, user_agent: &str, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder().user_agent(user_agent);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Build the search URL for `query`, percent-encoding the query text
    pub fn search_url(&self, query: &SearchQuery) -> String {
        format!(
            "{}/anime?q={}",
            self.base_url,
            urlencoding::encode(query.as_str())
        )
    }

    async fn fetch(&self, url: &str) -> Result<ResultSet, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(FetchError::Network)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Http {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(FetchError::Network)?;
        let envelope = SearchResponse::from_slice(&body).map_err(FetchError::Parse)?;

        Ok(envelope.into_records())
    }
}

#[async_trait]
impl SearchBackend for JikanClient {
    async fn search(&self, query: &SearchQuery) -> Result<ResultSet, FetchError> {
        let url = self.search_url(query);
        debug!(url = %url, "Making API request");

        match self.fetch(&url).await {
            Ok(records) => {
                debug!(url = %url, records = records.len(), "Request successful");
                Ok(records)
            }
            Err(e) => {
                warn!(url = %url, kind = e.kind(), error = %e, "Fetch error");
                Err(e)
            }
        }
    }
}
