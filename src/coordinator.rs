//! Online/offline branching for restaurant data queries.
//!
//! `FetchCoordinator` is the single entry point for all data queries.
//! Connectivity is checked once at the start of each query: online
//! queries hit the endpoint and refresh the local store as a side
//! effect, offline queries read straight from the store. Derived
//! queries (by id, by facet, distinct facet values) are pure filters
//! over one full-dataset query and never issue extra requests.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::api::{ApiClient, FetchError};
use crate::models::Restaurant;
use crate::store::RecordStore;

/// Wildcard facet value: no filtering applied for that facet.
pub const FILTER_ALL: &str = "all";

/// Connectivity predicate, evaluated once at query start. A query that
/// starts online but loses connectivity mid-request surfaces as a
/// network error rather than falling back to the store.
pub trait ConnectivityProbe: Send + Sync {
    fn is_online(&self) -> bool;
}

impl<F> ConnectivityProbe for F
where
    F: Fn() -> bool + Send + Sync,
{
    fn is_online(&self) -> bool {
        self()
    }
}

/// Probe for deployments without a connectivity signal: always take the
/// online path and let the request itself fail.
pub struct AssumeOnline;

impl ConnectivityProbe for AssumeOnline {
    fn is_online(&self) -> bool {
        true
    }
}

pub struct FetchCoordinator {
    client: ApiClient,
    store: Arc<dyn RecordStore>,
    probe: Box<dyn ConnectivityProbe>,
}

impl FetchCoordinator {
    pub fn new(client: ApiClient, store: Arc<dyn RecordStore>) -> Self {
        Self {
            client,
            store,
            probe: Box::new(AssumeOnline),
        }
    }

    /// Replace the connectivity probe. Closures are accepted.
    pub fn with_probe(mut self, probe: impl ConnectivityProbe + 'static) -> Self {
        self.probe = Box::new(probe);
        self
    }

    /// Fetch the full dataset.
    ///
    /// Online: one network request; on success the store is refreshed
    /// best-effort (a store failure is logged, never fails the query)
    /// and the fetched collection returned. A failed fetch is reported
    /// once, with no fallback to the store.
    ///
    /// Offline: the stored collection, or `NoCachedData` if the store
    /// has never been populated.
    pub async fn fetch_all(&self) -> Result<Vec<Restaurant>, FetchError> {
        if self.probe.is_online() {
            let restaurants = self.client.fetch_restaurants().await?;
            if let Err(e) = self.store.put_all(&restaurants) {
                warn!(error = %e, "Failed to refresh record store");
            }
            Ok(restaurants)
        } else {
            debug!("No connection, serving cached data");
            let cached = self.store.get_all()?;
            if cached.is_empty() {
                return Err(FetchError::NoCachedData);
            }
            Ok(cached)
        }
    }

    /// Fetch one restaurant by id. A miss is `NotFound`, distinguished
    /// from fetch failures.
    pub async fn fetch_by_id(&self, id: i64) -> Result<Restaurant, FetchError> {
        let restaurants = self.fetch_all().await?;
        restaurants
            .into_iter()
            .find(|r| r.id == id)
            .ok_or(FetchError::NotFound(id))
    }

    /// Restaurants with the given cuisine type.
    pub async fn fetch_by_cuisine(&self, cuisine: &str) -> Result<Vec<Restaurant>, FetchError> {
        self.fetch_by_cuisine_and_neighborhood(cuisine, FILTER_ALL)
            .await
    }

    /// Restaurants in the given neighborhood.
    pub async fn fetch_by_neighborhood(
        &self,
        neighborhood: &str,
    ) -> Result<Vec<Restaurant>, FetchError> {
        self.fetch_by_cuisine_and_neighborhood(FILTER_ALL, neighborhood)
            .await
    }

    /// Restaurants matching both facets; `"all"` for either facet
    /// disables that filter.
    pub async fn fetch_by_cuisine_and_neighborhood(
        &self,
        cuisine: &str,
        neighborhood: &str,
    ) -> Result<Vec<Restaurant>, FetchError> {
        let mut results = self.fetch_all().await?;
        if cuisine != FILTER_ALL {
            results.retain(|r| r.cuisine_type == cuisine);
        }
        if neighborhood != FILTER_ALL {
            results.retain(|r| r.neighborhood == neighborhood);
        }
        Ok(results)
    }

    /// Distinct neighborhoods, in first-occurrence order.
    pub async fn neighborhoods(&self) -> Result<Vec<String>, FetchError> {
        let restaurants = self.fetch_all().await?;
        Ok(dedup_first_occurrence(
            restaurants.into_iter().map(|r| r.neighborhood),
        ))
    }

    /// Distinct cuisine types, in first-occurrence order.
    pub async fn cuisines(&self) -> Result<Vec<String>, FetchError> {
        let restaurants = self.fetch_all().await?;
        Ok(dedup_first_occurrence(
            restaurants.into_iter().map(|r| r.cuisine_type),
        ))
    }
}

fn dedup_first_occurrence(values: impl Iterator<Item = String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for value in values {
        if !out.contains(&value) {
            out.push(value);
        }
    }
    out
}
