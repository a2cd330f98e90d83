#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! In-memory region index for point attribution.
//!
//! Wraps a [`BoundaryDataset`] with a code lookup and per-region envelopes,
//! and assigns scored point records to the first region (in dataset order)
//! whose boundary contains them. Every call is a pure function of its
//! inputs, so an index can be shared freely across threads.

pub mod geometry;

use std::collections::BTreeMap;
use std::sync::Arc;

use area_map_region_models::{
    BoundaryDataset, Coordinate, PointRecord, RegionAggregate, RegionFeature, RegionGeometry,
};
use geo::{BoundingRect, Rect};

pub use geometry::{ContainmentRule, point_in_geometry, point_in_geometry_with, point_in_ring};

/// Region lookup built once per boundary dataset.
///
/// For a fixed dataset and a fixed point, [`RegionIndex::locate`] always
/// returns the same region: regions are scanned in stored order and the
/// first hit wins, so overlapping boundaries resolve by dataset order.
#[derive(Debug, Clone)]
pub struct RegionIndex {
    dataset: Arc<BoundaryDataset>,
    /// region code -> position in `dataset.features`
    by_code: BTreeMap<String, usize>,
    /// Bounding rectangle per feature, `None` for empty or unsupported
    /// geometry.
    envelopes: Vec<Option<Rect<f64>>>,
    rule: ContainmentRule,
}

impl RegionIndex {
    /// Builds an index over `dataset` using the outer-ring containment rule.
    #[must_use]
    pub fn new(dataset: Arc<BoundaryDataset>) -> Self {
        let mut by_code = BTreeMap::new();
        for (position, feature) in dataset.features.iter().enumerate() {
            if by_code.contains_key(&feature.code) {
                log::warn!(
                    "Duplicate region code {} in boundary dataset {}, keeping first",
                    feature.code,
                    dataset.scope_code
                );
                continue;
            }
            by_code.insert(feature.code.clone(), position);
        }

        let envelopes = dataset
            .features
            .iter()
            .map(|feature| compute_envelope(&feature.geometry))
            .collect();

        log::debug!(
            "Indexed {} regions for boundary dataset {}",
            by_code.len(),
            dataset.scope_code
        );

        Self {
            dataset,
            by_code,
            envelopes,
            rule: ContainmentRule::default(),
        }
    }

    /// Returns the index with a different containment rule.
    #[must_use]
    pub const fn with_rule(mut self, rule: ContainmentRule) -> Self {
        self.rule = rule;
        self
    }

    #[must_use]
    pub const fn rule(&self) -> ContainmentRule {
        self.rule
    }

    /// The dataset this index was built from.
    #[must_use]
    pub fn dataset(&self) -> &Arc<BoundaryDataset> {
        &self.dataset
    }

    /// Regions in stored order.
    #[must_use]
    pub fn features(&self) -> &[RegionFeature] {
        &self.dataset.features
    }

    /// Looks up a region by its exact code.
    #[must_use]
    pub fn get(&self, code: &str) -> Option<&RegionFeature> {
        self.by_code
            .get(code)
            .map(|&position| &self.dataset.features[position])
    }

    #[must_use]
    pub fn contains_code(&self, code: &str) -> bool {
        self.by_code.contains_key(code)
    }

    /// Number of distinct region codes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_code.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_code.is_empty()
    }

    /// Returns the first region in stored order whose boundary contains
    /// `point`.
    #[must_use]
    pub fn locate(&self, point: Coordinate) -> Option<&RegionFeature> {
        self.dataset
            .features
            .iter()
            .zip(&self.envelopes)
            .find(|(feature, envelope)| {
                envelope.is_some_and(|rect| envelope_contains(rect, point))
                    && point_in_geometry_with(point, &feature.geometry, self.rule)
            })
            .map(|(feature, _)| feature)
    }
}

/// Builds a [`RegionIndex`] with default settings.
#[must_use]
pub fn build_index(dataset: Arc<BoundaryDataset>) -> RegionIndex {
    RegionIndex::new(dataset)
}

/// Assigns each point to the region containing it and computes per-region
/// aggregates.
///
/// Every region code in the index gets exactly one aggregate, including
/// regions that receive no points (average [`NO_DATA_SCORE`]). Points
/// outside every region are dropped.
///
/// [`NO_DATA_SCORE`]: area_map_region_models::NO_DATA_SCORE
#[must_use]
pub fn assign(points: &[PointRecord], index: &RegionIndex) -> BTreeMap<String, RegionAggregate> {
    let mut aggregates: BTreeMap<String, RegionAggregate> = index
        .by_code
        .iter()
        .map(|(code, &position)| {
            (
                code.clone(),
                RegionAggregate::empty(&index.dataset.features[position]),
            )
        })
        .collect();

    let mut unassigned = 0_usize;

    for point in points {
        let Some(feature) = index.locate(point.coordinate) else {
            unassigned += 1;
            continue;
        };

        // Duplicate codes share the first feature's aggregate.
        if let Some(aggregate) = aggregates.get_mut(&feature.code) {
            aggregate.push(point.clone());
        }
    }

    for aggregate in aggregates.values_mut() {
        aggregate.finalize();
    }

    log::debug!(
        "Assigned {} of {} points to {} regions ({} outside every region)",
        points.len() - unassigned,
        points.len(),
        aggregates.values().filter(|a| a.has_data()).count(),
        unassigned
    );

    aggregates
}

/// Returns aggregates in the index's stored region order.
///
/// Convenience for presentation layers that draw regions in source order.
#[must_use]
pub fn in_stored_order<'a>(
    aggregates: &'a BTreeMap<String, RegionAggregate>,
    index: &RegionIndex,
) -> Vec<&'a RegionAggregate> {
    index
        .features()
        .iter()
        .enumerate()
        .filter(|(position, feature)| index.by_code.get(&feature.code) == Some(position))
        .filter_map(|(_, feature)| aggregates.get(&feature.code))
        .collect()
}

/// Compute the bounding rectangle for a region geometry.
fn compute_envelope(geometry: &RegionGeometry) -> Option<Rect<f64>> {
    match geometry {
        RegionGeometry::Polygon(polygon) => polygon.exterior().bounding_rect(),
        RegionGeometry::MultiPolygon(multi) => multi.bounding_rect(),
        RegionGeometry::Unsupported => None,
    }
}

/// Inclusive envelope test. A point outside the envelope is always outside
/// the region, so this never changes a containment result.
fn envelope_contains(rect: Rect<f64>, point: Coordinate) -> bool {
    point.lng >= rect.min().x
        && point.lng <= rect.max().x
        && point.lat >= rect.min().y
        && point.lat <= rect.max().y
}
