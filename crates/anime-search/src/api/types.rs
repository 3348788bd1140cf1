//! Jikan API v4 search response types.
//!
//! Only the fields the result cards need are modelled; everything else in
//! the payload is ignored. Every card field tolerates `null` so one sparse
//! entry never sinks the rest of the result set.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Top-level search envelope
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Result array; absent or `null` means no results
    #[serde(default)]
    pub data: Option<Vec<ResultRecord>>,
}

impl SearchResponse {
    /// Parse a response body.
    ///
    /// Valid JSON that is not an object carries no `data` field and yields
    /// an empty envelope. Invalid JSON, or a `data` field that is not an
    /// array of records, is an error.
    pub fn from_slice(body: &[u8]) -> Result<Self, serde_json::Error> {
        let value: Value = serde_json::from_slice(body)?;
        if !value.is_object() {
            return Ok(Self::default());
        }
        serde_json::from_value(value)
    }

    pub fn into_records(self) -> ResultSet {
        self.data.unwrap_or_default()
    }
}

/// One catalog entry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultRecord {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub episodes: Option<u32>,
    #[serde(default)]
    pub images: Option<AnimeImages>,
}

impl ResultRecord {
    /// Title, empty when the entry has none
    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or("")
    }

    /// JPG cover URL, empty when the entry has none
    pub fn image_url(&self) -> &str {
        self.images
            .as_ref()
            .and_then(|images| images.jpg.as_ref())
            .and_then(|jpg| jpg.image_url.as_deref())
            .unwrap_or("")
    }

    /// Episode count, 0 when unknown
    pub fn episode_count(&self) -> u32 {
        self.episodes.unwrap_or(0)
    }
}

/// Anime images
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnimeImages {
    #[serde(default)]
    pub jpg: Option<ImageSet>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageSet {
    #[serde(default)]
    pub image_url: Option<String>,
}

/// Records of one completed search, in API order
pub type ResultSet = Vec<ResultRecord>;
