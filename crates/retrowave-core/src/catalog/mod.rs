//! Remote track catalog: response model and conversion to download descriptors.

mod fetch;

pub use fetch::{catalog_url, fetch_catalog, CatalogRequest};

use serde::{Deserialize, Serialize};

use crate::descriptor::DownloadDescriptor;
use crate::naming::track_file_name;

/// Top-level catalog API response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogResponse {
    #[serde(default)]
    pub status: i64,
    #[serde(default)]
    pub body: CatalogBody,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogBody {
    #[serde(default)]
    pub cursor: i64,
    #[serde(default)]
    pub tracks: Vec<Track>,
}

/// One catalog entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub duration: f64,
    #[serde(default)]
    pub stream_url: String,
    #[serde(default)]
    pub artwork_url: String,
}

impl Track {
    /// Local filename (`<title>.mp3`), or empty when the track has no id.
    pub fn file_name(&self) -> String {
        if self.id.is_empty() {
            return String::new();
        }
        track_file_name(&self.id, &self.title)
    }

    /// Absolute stream URL. An absolute `streamUrl` is used as-is; anything else
    /// is appended to `base_url`, so a base path prefix is preserved.
    pub fn stream_link(&self, base_url: &str) -> String {
        if url::Url::parse(&self.stream_url).is_ok() {
            return self.stream_url.clone();
        }
        let base = base_url.trim_end_matches('/');
        if self.stream_url.starts_with('/') {
            format!("{}{}", base, self.stream_url)
        } else {
            format!("{}/{}", base, self.stream_url)
        }
    }

    pub fn descriptor(&self, base_url: &str) -> DownloadDescriptor {
        DownloadDescriptor::new(
            self.id.clone(),
            self.file_name(),
            self.stream_link(base_url),
        )
    }
}

impl CatalogResponse {
    pub fn tracks(&self) -> &[Track] {
        &self.body.tracks
    }

    /// Descriptors for every track in catalog order. Entries without an id are
    /// kept here and dropped by the engine.
    pub fn descriptors(&self, base_url: &str) -> Vec<DownloadDescriptor> {
        self.body
            .tracks
            .iter()
            .map(|t| t.descriptor(base_url))
            .collect()
    }
}
