//! Data models for restaurant directory entities.
//!
//! This module contains the data structures mirrored from the remote
//! dataset:
//!
//! - `Restaurant`: one directory entry with identity, display fields,
//!   and map coordinates
//! - `LatLng`: a coordinate pair for map marker placement

pub mod restaurant;

pub use restaurant::{LatLng, Restaurant};
