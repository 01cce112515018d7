//! platecache - offline-first core for a restaurant directory.
//!
//! The crate mirrors a remote restaurant dataset for offline use. Three
//! cooperating components:
//!
//! - `store::RecordStore`: durable keyed store holding the
//!   last-known-good dataset copy
//! - `coordinator::FetchCoordinator`: decides per query between the
//!   network and the local store, refreshing the store after every
//!   successful fetch
//! - `assets::AssetCacheProxy`: pre-warmed cache bucket serving static
//!   assets when the network is unavailable
//!
//! Rendering, map display, and URL glue are the consumer's concern; the
//! core only hands back records and bytes.

pub mod api;
pub mod assets;
pub mod config;
pub mod coordinator;
pub mod models;
pub mod store;

pub use api::{ApiClient, FetchError};
pub use coordinator::{AssumeOnline, ConnectivityProbe, FetchCoordinator, FILTER_ALL};
pub use models::{LatLng, Restaurant};
pub use store::{DiskStore, MemoryStore, RecordStore, StoreError};
