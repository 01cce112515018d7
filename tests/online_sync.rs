//! Integration tests for the online fetch path against a mock HTTP
//! endpoint, including the cache-refresh side effect and error
//! surfacing.

use std::sync::Arc;

use platecache::{ApiClient, FetchCoordinator, FetchError, MemoryStore, RecordStore, StoreError};

const DATASET: &str = r#"[
    {
        "id": 1,
        "name": "Roberta's",
        "cuisine_type": "Italian",
        "neighborhood": "Downtown",
        "latlng": {"lat": 40.705089, "lng": -73.933585},
        "photograph": "1"
    },
    {
        "id": 2,
        "name": "Pok Pok",
        "cuisine_type": "Thai",
        "neighborhood": "Uptown",
        "latlng": {"lat": 40.688813, "lng": -73.996893}
    }
]"#;

fn coordinator_for(server: &mockito::Server, store: Arc<MemoryStore>) -> FetchCoordinator {
    let client = ApiClient::new(server.url()).unwrap();
    FetchCoordinator::new(client, store)
}

#[tokio::test]
async fn online_fetch_returns_dataset_and_refreshes_store() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/restaurants")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(DATASET)
        .create_async()
        .await;

    let store = Arc::new(MemoryStore::new());
    let coordinator = coordinator_for(&server, store.clone());

    let fetched = coordinator.fetch_all().await.unwrap();
    assert_eq!(fetched.len(), 2);
    mock.assert_async().await;

    // Cache refreshed as a side effect of the successful fetch
    let cached = store.get_all().unwrap();
    assert_eq!(cached.len(), 2);
    assert!(cached.iter().any(|r| r.name == "Roberta's"));
    assert!(store.last_refreshed().unwrap().is_some());
}

#[tokio::test]
async fn non_success_status_surfaces_without_cache_fallback() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/restaurants")
        .with_status(500)
        .with_body("boom")
        .create_async()
        .await;

    // Even with cached data on hand, an online failure is reported as
    // such rather than silently answered from the store.
    let store = Arc::new(MemoryStore::new());
    store
        .put_all(&[serde_json::from_str(
            r#"{"id": 9, "name": "Stale", "cuisine_type": "Thai",
                "neighborhood": "Uptown", "latlng": {"lat": 0.0, "lng": 0.0}}"#,
        )
        .unwrap()])
        .unwrap();

    let coordinator = coordinator_for(&server, store);
    assert!(matches!(
        coordinator.fetch_all().await,
        Err(FetchError::Status(status)) if status.as_u16() == 500
    ));
}

#[tokio::test]
async fn unparsable_body_is_a_parse_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/restaurants")
        .with_status(200)
        .with_body("this is not json")
        .create_async()
        .await;

    let coordinator = coordinator_for(&server, Arc::new(MemoryStore::new()));
    assert!(matches!(
        coordinator.fetch_all().await,
        Err(FetchError::Parse(_))
    ));
}

#[tokio::test]
async fn offline_query_never_touches_the_network() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/restaurants")
        .with_status(200)
        .with_body(DATASET)
        .expect(0)
        .create_async()
        .await;

    let store = Arc::new(MemoryStore::new());
    let records: Vec<platecache::Restaurant> = serde_json::from_str(DATASET).unwrap();
    store.put_all(&records).unwrap();

    let client = ApiClient::new(server.url()).unwrap();
    let coordinator = FetchCoordinator::new(client, store).with_probe(|| false);

    let got = coordinator.fetch_all().await.unwrap();
    assert_eq!(got.len(), 2);
    mock.assert_async().await;
}

#[tokio::test]
async fn fetch_by_id_distinguishes_not_found_from_fetch_failure() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/restaurants")
        .with_status(200)
        .with_body(DATASET)
        .expect_at_least(2)
        .create_async()
        .await;

    let coordinator = coordinator_for(&server, Arc::new(MemoryStore::new()));

    let found = coordinator.fetch_by_id(1).await.unwrap();
    assert_eq!(found.name, "Roberta's");

    assert!(matches!(
        coordinator.fetch_by_id(404).await,
        Err(FetchError::NotFound(404))
    ));
}

/// Store whose writes always fail, for exercising the best-effort
/// refresh policy.
struct BrokenStore;

impl RecordStore for BrokenStore {
    fn put_all(&self, _records: &[platecache::Restaurant]) -> Result<(), StoreError> {
        Err(StoreError::Unavailable(std::io::Error::other("disk full")))
    }

    fn get_all(&self) -> Result<Vec<platecache::Restaurant>, StoreError> {
        Ok(Vec::new())
    }

    fn clear(&self) -> Result<(), StoreError> {
        Ok(())
    }

    fn last_refreshed(&self) -> Result<Option<chrono::DateTime<chrono::Utc>>, StoreError> {
        Ok(None)
    }
}

#[tokio::test]
async fn store_write_failure_does_not_fail_the_online_query() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/restaurants")
        .with_status(200)
        .with_body(DATASET)
        .create_async()
        .await;

    let client = ApiClient::new(server.url()).unwrap();
    let coordinator = FetchCoordinator::new(client, Arc::new(BrokenStore));

    // The fetched data is still returned to the caller
    let got = coordinator.fetch_all().await.unwrap();
    assert_eq!(got.len(), 2);
}
