//! Loads boundary datasets on demand through a shared [`BoundaryCache`].

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use area_map_boundary_models::BoundarySource;
use area_map_region_models::BoundaryDataset;

use crate::cache::BoundaryCache;
use crate::{BoundaryError, load, paths, registry};

/// Resolves sido codes to boundary datasets, loading each at most once.
///
/// Cache hits never touch the disk. Loads are serialized behind a lock and
/// re-check the cache, so concurrent requests for the same sido parse its
/// file once.
#[derive(Debug)]
pub struct BoundaryStore {
    cache: Arc<BoundaryCache>,
    geojson_dir: PathBuf,
    sources: BTreeMap<String, BoundarySource>,
    load_lock: Mutex<()>,
}

impl BoundaryStore {
    /// Creates a store over the registered sources.
    #[must_use]
    pub fn new(cache: Arc<BoundaryCache>, geojson_dir: PathBuf) -> Self {
        Self::with_sources(cache, geojson_dir, registry::all_sources())
    }

    /// Creates a store reading from [`paths::geojson_dir`].
    #[must_use]
    pub fn from_env(cache: Arc<BoundaryCache>) -> Self {
        Self::new(cache, paths::geojson_dir())
    }

    /// Creates a store over an explicit source list.
    #[must_use]
    pub fn with_sources(
        cache: Arc<BoundaryCache>,
        geojson_dir: PathBuf,
        sources: Vec<BoundarySource>,
    ) -> Self {
        let sources = sources
            .into_iter()
            .map(|source| (source.code.clone(), source))
            .collect();

        Self {
            cache,
            geojson_dir,
            sources,
            load_lock: Mutex::new(()),
        }
    }

    #[must_use]
    pub const fn cache(&self) -> &Arc<BoundaryCache> {
        &self.cache
    }

    #[must_use]
    pub fn geojson_dir(&self) -> &Path {
        &self.geojson_dir
    }

    /// Sources known to this store, ordered by sido code.
    pub fn sources(&self) -> impl Iterator<Item = &BoundarySource> {
        self.sources.values()
    }

    /// Returns the source for `code`.
    ///
    /// # Errors
    ///
    /// Returns [`BoundaryError::UnknownSource`] if no source has this code.
    pub fn source(&self, code: &str) -> Result<&BoundarySource, BoundaryError> {
        self.sources
            .get(code)
            .ok_or_else(|| BoundaryError::UnknownSource {
                code: code.to_string(),
            })
    }

    /// Returns the dataset for `code`, loading and caching it on first use.
    ///
    /// # Errors
    ///
    /// Returns [`BoundaryError`] if the code is unknown or its file cannot
    /// be read or parsed. Failed loads are not cached.
    pub fn dataset(&self, code: &str) -> Result<Arc<BoundaryDataset>, BoundaryError> {
        if let Some(dataset) = self.cache.get(code) {
            return Ok(dataset);
        }

        let source = self.source(code)?;

        let _guard = self
            .load_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        if let Some(dataset) = self.cache.get(code) {
            return Ok(dataset);
        }

        let path = self.geojson_dir.join(&source.file);
        let dataset = load::load_dataset(&path, &source.code, &source.fields)?;
        Ok(self.cache.put(code, dataset))
    }
}
