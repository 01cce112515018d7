//! Local record store module for offline data access.
//!
//! This module provides the `RecordStore` trait for persisting the
//! last-known-good copy of the restaurant dataset, keyed by record id,
//! with two backends:
//!
//! - `DiskStore`: durable JSON-backed store for production use
//! - `MemoryStore`: in-memory store for tests and ephemeral use

pub mod disk;
pub mod memory;

pub use disk::DiskStore;
pub use memory::MemoryStore;

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::models::Restaurant;

/// Database directory name.
pub const STORE_NAME: &str = "RestaurantDB";

/// Keyed collection inside the database.
pub const COLLECTION_NAME: &str = "RestaurantStore";

/// On-disk schema version. Bumped only on incompatible layout changes.
pub const SCHEMA_VERSION: u32 = 1;

#[derive(Error, Debug)]
pub enum StoreError {
    /// The backing persistence mechanism cannot be opened or written.
    #[error("store unavailable: {0}")]
    Unavailable(#[source] std::io::Error),

    /// Persisted data exists but cannot be deserialized. Never treated
    /// as an empty store; the caller decides how to react.
    #[error("stored data is corrupt: {0}")]
    Corrupt(String),
}

/// Keyed local persistence for the most recent restaurant dataset.
pub trait RecordStore: Send + Sync {
    /// Upsert the given records by id: entries with matching ids are
    /// replaced, others are left in place. Atomic with respect to
    /// `get_all` - a reader never observes a partially written
    /// collection.
    fn put_all(&self, records: &[Restaurant]) -> Result<(), StoreError>;

    /// All stored records, order unspecified. Returns an empty
    /// collection (not an error) if the store has never been populated.
    fn get_all(&self) -> Result<Vec<Restaurant>, StoreError>;

    /// Remove every stored record.
    fn clear(&self) -> Result<(), StoreError>;

    /// When the collection was last written, if ever.
    fn last_refreshed(&self) -> Result<Option<DateTime<Utc>>, StoreError>;
}
