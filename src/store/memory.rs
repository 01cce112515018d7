use std::collections::BTreeMap;
use std::sync::Mutex;

use chrono::{DateTime, Utc};

use super::{RecordStore, StoreError};
use crate::models::Restaurant;

/// In-memory record store, primarily for tests.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    records: BTreeMap<i64, Restaurant>,
    cached_at: Option<DateTime<Utc>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordStore for MemoryStore {
    fn put_all(&self, records: &[Restaurant]) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        for record in records {
            inner.records.insert(record.id, record.clone());
        }
        inner.cached_at = Some(Utc::now());
        Ok(())
    }

    fn get_all(&self) -> Result<Vec<Restaurant>, StoreError> {
        let inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        Ok(inner.records.values().cloned().collect())
    }

    fn clear(&self) -> Result<(), StoreError> {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        inner.records.clear();
        inner.cached_at = None;
        Ok(())
    }

    fn last_refreshed(&self) -> Result<Option<DateTime<Utc>>, StoreError> {
        let inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        Ok(inner.cached_at)
    }
}
