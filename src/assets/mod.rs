//! Offline fallback for static assets.
//!
//! This module provides the `AssetCacheProxy`, a request interceptor
//! that pre-warms a named cache bucket from a fixed manifest and then
//! serves matching requests cache-first, with the live network as the
//! fallback. Cache entries are populated once at install time and never
//! revalidated.

pub mod cache;
pub mod proxy;

pub use cache::{normalize_key, BlobCache, CacheEntry, DiskBlobCache, MemoryBlobCache, BUCKET_NAME};
pub use proxy::{default_manifest, AssetCacheProxy, DEFAULT_MANIFEST};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AssetError {
    /// Transport-level failure for an asset request.
    #[error("network error for {url}: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The asset endpoint answered with a non-success status.
    #[error("request for {url} failed with status {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    /// The cache bucket cannot be opened or written.
    #[error("asset cache unavailable: {0}")]
    CacheUnavailable(#[source] std::io::Error),

    /// The cache index exists but cannot be deserialized.
    #[error("asset cache index is corrupt: {0}")]
    CacheCorrupt(String),

    /// A manifest entry is not a valid URL.
    #[error("invalid asset url: {0}")]
    InvalidUrl(String),
}
