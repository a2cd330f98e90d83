#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Boundary dataset loading, normalization, and caching.
//!
//! Each top-level region (sido) has one `GeoJSON` `FeatureCollection` of
//! administrative-dong boundaries. Sources are defined as TOML files
//! embedded at compile time, normalized into
//! [`BoundaryDataset`](area_map_region_models::BoundaryDataset) values, and
//! kept for the life of the process in a [`BoundaryCache`].

pub mod cache;
pub mod load;
pub mod normalize;
pub mod paths;
pub mod registry;
pub mod store;

pub use cache::BoundaryCache;
pub use store::BoundaryStore;

use thiserror::Error;

/// Errors that can occur while loading boundary datasets.
#[derive(Debug, Error)]
pub enum BoundaryError {
    /// Reading a boundary file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not valid `GeoJSON`.
    #[error("GeoJSON error: {0}")]
    GeoJson(#[from] geojson::Error),

    /// No boundary source is registered for the requested sido code.
    #[error("Unknown boundary source: {code}")]
    UnknownSource {
        /// The requested sido code.
        code: String,
    },

    /// Data conversion or normalization error.
    #[error("Conversion error: {message}")]
    Conversion {
        /// Description of what went wrong.
        message: String,
    },
}
