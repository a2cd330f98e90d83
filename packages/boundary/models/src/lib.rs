#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Boundary source definition types.
//!
//! Defines the TOML schema describing where the administrative-dong
//! boundaries of one top-level region (sido) live and which `GeoJSON`
//! feature properties carry each region's code and names.

use serde::{Deserialize, Serialize};

/// A boundary dataset source, deserialized from TOML.
///
/// Each source covers every administrative dong of a single sido.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoundarySource {
    /// Unique source identifier (e.g., `"seoul"`).
    pub id: String,
    /// Two-digit sido code used as the cache key (e.g., `"11"`).
    pub code: String,
    /// Official sido name (e.g., "서울특별시").
    pub name: String,
    /// `GeoJSON` file name, relative to the boundary directory.
    pub file: String,
    /// Property mapping for region identity.
    #[serde(default)]
    pub fields: BoundaryFieldMapping,
}

impl BoundarySource {
    /// Returns the source identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the sido code.
    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }
}

/// `GeoJSON` feature property names holding region identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundaryFieldMapping {
    /// Property containing the administrative code.
    #[serde(default = "default_code_field")]
    pub code: String,
    /// Property containing the region name.
    #[serde(default = "default_name_field")]
    pub name: String,
    /// Property containing the parent (district) name.
    #[serde(default = "default_parent_field")]
    pub parent: String,
}

impl Default for BoundaryFieldMapping {
    fn default() -> Self {
        Self {
            code: default_code_field(),
            name: default_name_field(),
            parent: default_parent_field(),
        }
    }
}

fn default_code_field() -> String {
    "adm_cd".to_string()
}

fn default_name_field() -> String {
    "adm_nm".to_string()
}

fn default_parent_field() -> String {
    "sggnm".to_string()
}
