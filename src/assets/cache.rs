use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use url::Url;

use super::AssetError;

/// Default cache bucket name.
pub const BUCKET_NAME: &str = "restaurant-cache";

/// Bucket index file mapping request keys to body files and headers.
const INDEX_FILE: &str = "index.json";

/// Raw response bytes plus the headers they were served with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl CacheEntry {
    pub fn content_type(&self) -> Option<&str> {
        self.headers
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case("content-type"))
            .map(|(_, value)| value.as_str())
    }
}

/// Cache key for a request: the URL with query string and fragment
/// stripped, so lookups ignore search parameters.
pub fn normalize_key(url: &Url) -> String {
    let mut key = url.clone();
    key.set_query(None);
    key.set_fragment(None);
    key.to_string()
}

/// Keyed storage for asset bytes.
pub trait BlobCache: Send + Sync {
    /// Store an entry under an already-normalized request key.
    fn put(&self, key: &str, entry: CacheEntry) -> Result<(), AssetError>;

    /// Look up the entry matching a request URL, ignoring its query
    /// string. `None` is a miss, not an error.
    fn matching(&self, url: &Url) -> Result<Option<CacheEntry>, AssetError>;
}

/// In-memory bucket for tests.
#[derive(Default)]
pub struct MemoryBlobCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl MemoryBlobCache {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BlobCache for MemoryBlobCache {
    fn put(&self, key: &str, entry: CacheEntry) -> Result<(), AssetError> {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.insert(key.to_string(), entry);
        Ok(())
    }

    fn matching(&self, url: &Url) -> Result<Option<CacheEntry>, AssetError> {
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        Ok(entries.get(&normalize_key(url)).cloned())
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct IndexEntry {
    file: String,
    headers: Vec<(String, String)>,
}

/// Durable bucket: body files keyed by content hash of the request key,
/// plus a JSON index written atomically (temp file + rename).
pub struct DiskBlobCache {
    dir: PathBuf,
}

impl DiskBlobCache {
    /// Open the bucket directory, creating it if absent.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, AssetError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(AssetError::CacheUnavailable)?;
        Ok(Self { dir })
    }

    fn index_path(&self) -> PathBuf {
        self.dir.join(INDEX_FILE)
    }

    fn load_index(&self) -> Result<HashMap<String, IndexEntry>, AssetError> {
        let contents = match fs::read_to_string(self.index_path()) {
            Ok(c) => c,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(HashMap::new()),
            Err(e) => return Err(AssetError::CacheUnavailable(e)),
        };
        serde_json::from_str(&contents).map_err(|e| AssetError::CacheCorrupt(e.to_string()))
    }

    fn write_index(&self, index: &HashMap<String, IndexEntry>) -> Result<(), AssetError> {
        let tmp = self.dir.join(format!("{}.tmp", INDEX_FILE));
        let contents =
            serde_json::to_string_pretty(index).map_err(|e| AssetError::CacheCorrupt(e.to_string()))?;
        fs::write(&tmp, contents).map_err(AssetError::CacheUnavailable)?;
        fs::rename(&tmp, self.index_path()).map_err(AssetError::CacheUnavailable)?;
        Ok(())
    }

    fn body_file(key: &str) -> String {
        let digest = Sha256::digest(key.as_bytes());
        format!("{}.bin", hex::encode(digest))
    }
}

impl BlobCache for DiskBlobCache {
    fn put(&self, key: &str, entry: CacheEntry) -> Result<(), AssetError> {
        let file = Self::body_file(key);
        fs::write(self.dir.join(&file), &entry.body).map_err(AssetError::CacheUnavailable)?;

        let mut index = self.load_index()?;
        index.insert(
            key.to_string(),
            IndexEntry {
                file,
                headers: entry.headers,
            },
        );
        self.write_index(&index)
    }

    fn matching(&self, url: &Url) -> Result<Option<CacheEntry>, AssetError> {
        let index = self.load_index()?;
        let Some(indexed) = index.get(&normalize_key(url)) else {
            return Ok(None);
        };
        let body = fs::read(self.dir.join(&indexed.file)).map_err(AssetError::CacheUnavailable)?;
        Ok(Some(CacheEntry {
            headers: indexed.headers.clone(),
            body,
        }))
    }
}
