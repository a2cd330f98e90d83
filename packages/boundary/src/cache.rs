//! Process-wide store of loaded boundary datasets.
//!
//! Keyed by sido code. Entries are never evicted or replaced: the first
//! dataset stored under a key is returned for every later read of that key.

use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock};

use area_map_region_models::BoundaryDataset;

/// Boundary datasets keyed by top-level region code.
///
/// Created once at startup and shared by `Arc`. Datasets are stored behind
/// an `Arc`, so readers observe either no entry or a fully built dataset.
#[derive(Debug, Default)]
pub struct BoundaryCache {
    entries: RwLock<BTreeMap<String, Arc<BoundaryDataset>>>,
}

impl BoundaryCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached dataset for `key`, if any. Never loads.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<Arc<BoundaryDataset>> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    /// Stores `dataset` under `key` unless an entry already exists.
    ///
    /// Returns the entry that is cached after the call, which is the
    /// existing one if another writer got there first.
    pub fn put(&self, key: &str, dataset: BoundaryDataset) -> Arc<BoundaryDataset> {
        self.put_arc(key, Arc::new(dataset))
    }

    /// [`BoundaryCache::put`] for an already shared dataset.
    pub fn put_arc(&self, key: &str, dataset: Arc<BoundaryDataset>) -> Arc<BoundaryDataset> {
        let mut entries = self
            .entries
            .write()
            .unwrap_or_else(PoisonError::into_inner);

        if let Some(existing) = entries.get(key) {
            log::debug!("Boundary dataset {key} already cached, ignoring insert");
            return Arc::clone(existing);
        }

        log::info!(
            "Caching boundary dataset {key} ({} regions)",
            dataset.features.len()
        );
        entries.insert(key.to_string(), Arc::clone(&dataset));
        dataset
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(key)
    }

    /// Cached keys in ascending order.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
