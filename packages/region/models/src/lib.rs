#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Region boundary, point record, and aggregate types.
//!
//! Regions are administrative areas (e.g. administrative dongs) bounded by
//! polygons. Point records are scored commercial areas located by a single
//! coordinate. Aggregates are derived per region and rebuilt on every
//! aggregation pass.

use geo::{MultiPolygon, Polygon};
use serde::{Deserialize, Serialize};

/// Average score reported for a region with no members.
pub const NO_DATA_SCORE: i32 = -1;

/// A WGS84 coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coordinate {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
}

impl Coordinate {
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Geometry positions are `x = lng`, `y = lat`, matching `GeoJSON` order.
impl From<Coordinate> for geo::Coord<f64> {
    fn from(value: Coordinate) -> Self {
        Self {
            x: value.lng,
            y: value.lat,
        }
    }
}

/// The boundary geometry of a single region.
#[derive(Debug, Clone, PartialEq)]
pub enum RegionGeometry {
    /// A single polygon (exterior ring plus optional holes).
    Polygon(Polygon<f64>),
    /// Several polygons; a point inside any member is inside the region.
    MultiPolygon(MultiPolygon<f64>),
    /// Any other or missing geometry. Contains nothing.
    Unsupported,
}

impl RegionGeometry {
    /// Returns `true` for [`RegionGeometry::Unsupported`].
    #[must_use]
    pub const fn is_unsupported(&self) -> bool {
        matches!(self, Self::Unsupported)
    }
}

/// A single region boundary loaded from a boundary dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionFeature {
    /// Administrative code, unique within one dataset (e.g. `"1111051500"`).
    pub code: String,
    /// Full region name (e.g. "서울특별시 종로구 청운효자동").
    pub name: String,
    /// Name of the containing district or city (e.g. "종로구").
    pub parent_name: String,
    pub geometry: RegionGeometry,
}

/// All region boundaries for one top-level administrative scope (sido).
#[derive(Debug, Clone, PartialEq)]
pub struct BoundaryDataset {
    /// Top-level region code the dataset belongs to (e.g. `"11"`).
    pub scope_code: String,
    /// Regions in source order. Assignment and matching scan in this order.
    pub features: Vec<RegionFeature>,
}

impl BoundaryDataset {
    #[must_use]
    pub const fn new(scope_code: String, features: Vec<RegionFeature>) -> Self {
        Self {
            scope_code,
            features,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.features.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

/// A scored commercial area located at a single coordinate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointRecord {
    /// Commercial area code.
    pub code: String,
    /// Human-readable commercial area name.
    #[serde(default)]
    pub name: String,
    #[serde(flatten)]
    pub coordinate: Coordinate,
    /// Score on a 0-100 scale.
    pub score: f64,
}

/// Per-region statistics produced by one aggregation pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionAggregate {
    pub region_code: String,
    pub region_name: String,
    pub parent_name: String,
    /// Number of members. Always equal to `members.len()`.
    pub member_count: usize,
    /// Rounded mean member score, or [`NO_DATA_SCORE`] when there are no
    /// members.
    pub average_score: i32,
    /// Members in processing order.
    pub members: Vec<PointRecord>,
}

impl RegionAggregate {
    /// Creates an empty aggregate for `feature`.
    #[must_use]
    pub fn empty(feature: &RegionFeature) -> Self {
        Self {
            region_code: feature.code.clone(),
            region_name: feature.name.clone(),
            parent_name: feature.parent_name.clone(),
            member_count: 0,
            average_score: NO_DATA_SCORE,
            members: Vec::new(),
        }
    }

    /// Whether at least one point was assigned to this region.
    #[must_use]
    pub const fn has_data(&self) -> bool {
        self.member_count > 0
    }

    /// Appends a member, keeping `member_count` in step.
    pub fn push(&mut self, point: PointRecord) {
        self.members.push(point);
        self.member_count += 1;
        debug_assert_eq!(self.member_count, self.members.len());
    }

    /// Recomputes `average_score` from the current members.
    ///
    /// Rounds half up (`2.5 -> 3`, `-2.5 -> -2`). Leaves the
    /// [`NO_DATA_SCORE`] sentinel in place when there are no members.
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    pub fn finalize(&mut self) {
        debug_assert_eq!(self.member_count, self.members.len());
        if self.member_count == 0 {
            self.average_score = NO_DATA_SCORE;
            return;
        }

        let sum: f64 = self.members.iter().map(|m| m.score).sum();
        let mean = sum / self.member_count as f64;
        self.average_score = round_half_up(mean) as i32;
    }

    /// Returns the highest-scoring member. The later member wins ties.
    #[must_use]
    pub fn best_member(&self) -> Option<&PointRecord> {
        self.members
            .iter()
            .max_by(|a, b| a.score.total_cmp(&b.score))
    }
}

/// Rounds to the nearest integer, halves toward positive infinity.
///
/// Compares the fractional part instead of computing `floor(x + 0.5)`,
/// which rounds values just below a half up through float addition.
fn round_half_up(value: f64) -> f64 {
    let floor = value.floor();
    if value - floor >= 0.5 { floor + 1.0 } else { floor }
}

/// A per-region store summary from a secondary dataset.
///
/// Keyed by an administrative code that may use a different granularity
/// than the boundary dataset's region codes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryRecord {
    /// Administrative code (`adong_cd` upstream).
    #[serde(alias = "adong_cd")]
    pub code: String,
    #[serde(default, alias = "adong_nm")]
    pub name: String,
    #[serde(default, alias = "signgu_nm")]
    pub parent_name: String,
    /// Total number of stores in the region.
    #[serde(default, alias = "total_stores")]
    pub total_stores: u64,
    /// Number of stores in the selected business category.
    #[serde(default, alias = "target_stores")]
    pub target_stores: u64,
    /// Store density score on a 0-100 scale.
    #[serde(default, alias = "density_score")]
    pub density_score: f64,
}
