//! HTTP client module for the remote restaurant data endpoint.
//!
//! This module provides the `ApiClient` for fetching the full
//! restaurant dataset as a JSON array from `{base_url}/restaurants`.

pub mod client;
pub mod error;

pub use client::ApiClient;
pub use error::FetchError;
