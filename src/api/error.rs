use thiserror::Error;

use crate::store::StoreError;

#[derive(Error, Debug)]
pub enum FetchError {
    /// Transport-level failure reaching the endpoint.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status.
    #[error("request failed with status {0}")]
    Status(reqwest::StatusCode),

    /// The response body did not match the expected schema.
    #[error("failed to parse response: {0}")]
    Parse(#[from] serde_json::Error),

    /// Reading the local store failed on the offline path.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Id lookup miss, distinguished from a generic fetch failure so
    /// callers can render a not-found message.
    #[error("no restaurant with id {0}")]
    NotFound(i64),

    /// Offline with nothing in the local store.
    #[error("offline and no cached data available")]
    NoCachedData,
}
