//! Canonical file paths for boundary data.
//!
//! Defaults are relative to the project root's `data/` directory and can be
//! overridden with `AREA_MAP_GEOJSON_DIR`.

use std::path::{Path, PathBuf};

/// Environment variable overriding [`geojson_dir`].
pub const GEOJSON_DIR_ENV: &str = "AREA_MAP_GEOJSON_DIR";

/// Returns the workspace root directory.
///
/// Resolved at compile time from `CARGO_MANIFEST_DIR`.
///
/// # Panics
///
/// Panics if the project root cannot be resolved.
#[must_use]
pub fn project_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .ancestors()
        .nth(2)
        .expect("Failed to find project root from CARGO_MANIFEST_DIR")
        .to_path_buf()
}

/// Returns the `data/` directory path.
#[must_use]
pub fn data_dir() -> PathBuf {
    project_root().join("data")
}

/// Returns the directory holding the per-sido boundary `GeoJSON` files.
///
/// Uses `AREA_MAP_GEOJSON_DIR` when set and non-empty, otherwise
/// `data/geojson/`.
#[must_use]
pub fn geojson_dir() -> PathBuf {
    std::env::var(GEOJSON_DIR_ENV)
        .ok()
        .filter(|dir| !dir.trim().is_empty())
        .map_or_else(|| data_dir().join("geojson"), PathBuf::from)
}
