use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use futures::future::try_join_all;
use reqwest::Client;
use tracing::{debug, warn};
use url::Url;

use super::cache::{normalize_key, BlobCache, CacheEntry};
use super::AssetError;

/// Fixed set of assets pre-cached at install time, relative to the site
/// root.
pub const DEFAULT_MANIFEST: &[&str] = &[
    "/",
    "index.html",
    "restaurant.html",
    "css/styles.css",
    "data/restaurants.json",
    "js/dbhelper.js",
    "js/main.js",
    "js/restaurant_info.js",
    "img/1.jpg",
    "img/2.jpg",
    "img/3.jpg",
    "img/4.jpg",
    "img/5.jpg",
    "img/6.jpg",
    "img/7.jpg",
    "img/8.jpg",
    "img/9.jpg",
    "img/10.jpg",
];

/// Resolve the default manifest against a site base URL.
pub fn default_manifest(base: &Url) -> Result<Vec<Url>, AssetError> {
    DEFAULT_MANIFEST
        .iter()
        .map(|path| {
            base.join(path)
                .map_err(|_| AssetError::InvalidUrl(format!("{} + {}", base, path)))
        })
        .collect()
}

/// Interceptor serving static assets cache-first once activated.
///
/// Lifecycle is install → activate → intercept: installation populates
/// the bucket all-or-nothing, activation flips the proxy live for
/// subsequent requests, and interception answers from the bucket with
/// the live network as the fallback. Requests intercepted before
/// activation pass straight through to the network.
pub struct AssetCacheProxy {
    client: Client,
    cache: Arc<dyn BlobCache>,
    active: AtomicBool,
}

impl AssetCacheProxy {
    pub fn new(cache: Arc<dyn BlobCache>) -> Self {
        Self {
            client: Client::new(),
            cache,
            active: AtomicBool::new(false),
        }
    }

    /// Pre-warm the bucket from a fixed manifest. All-or-nothing:
    /// fetched entries are staged in memory and committed only after
    /// every fetch succeeded, so a single failed asset leaves the
    /// bucket untouched.
    pub async fn install(&self, manifest: &[Url]) -> Result<(), AssetError> {
        let staged = try_join_all(manifest.iter().map(|url| self.fetch_entry(url))).await?;
        for (key, entry) in staged {
            self.cache.put(&key, entry)?;
        }
        debug!(assets = manifest.len(), "Asset cache installed");
        Ok(())
    }

    /// Make the proxy live for all subsequent requests, immediately.
    pub fn activate(&self) {
        self.active.store(true, Ordering::SeqCst);
        debug!("Asset cache proxy activated");
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    /// Serve one request: bucket first (ignoring query strings), live
    /// network on a miss. Errors are logged before being surfaced; no
    /// synthetic offline page is produced.
    pub async fn intercept(&self, url: &Url) -> Result<CacheEntry, AssetError> {
        if self.is_active() {
            match self.cache.matching(url) {
                Ok(Some(entry)) => {
                    debug!(url = %url, "Asset served from cache");
                    return Ok(entry);
                }
                Ok(None) => {}
                Err(e) => {
                    // A broken bucket downgrades to a plain network fetch.
                    warn!(url = %url, error = %e, "Asset cache lookup failed");
                }
            }
        }

        match self.fetch_entry(url).await {
            Ok((_, entry)) => Ok(entry),
            Err(e) => {
                warn!(url = %url, error = %e, "Asset request failed");
                Err(e)
            }
        }
    }

    async fn fetch_entry(&self, url: &Url) -> Result<(String, CacheEntry), AssetError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|source| AssetError::Network {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(AssetError::Status {
                url: url.to_string(),
                status,
            });
        }

        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();
        let body = response
            .bytes()
            .await
            .map_err(|source| AssetError::Network {
                url: url.to_string(),
                source,
            })?
            .to_vec();

        Ok((normalize_key(url), CacheEntry { headers, body }))
    }
}
