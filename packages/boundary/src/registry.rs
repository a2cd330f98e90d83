//! Compile-time registry of sido boundary sources.
//!
//! Each entry is a `(name, toml_content)` pair embedded via `include_str!`.
//! Adding a new sido requires creating a TOML file in `sources/` and adding
//! a corresponding entry here.

use area_map_boundary_models::BoundarySource;

/// Number of registered boundary sources. Enforced by a test.
#[cfg(test)]
const EXPECTED_SOURCE_COUNT: usize = 17;

/// Embedded TOML source definitions.
const SOURCE_TOMLS: &[(&str, &str)] = &[
    ("seoul", include_str!("../sources/seoul.toml")),
    ("busan", include_str!("../sources/busan.toml")),
    ("daegu", include_str!("../sources/daegu.toml")),
    ("incheon", include_str!("../sources/incheon.toml")),
    ("gwangju", include_str!("../sources/gwangju.toml")),
    ("daejeon", include_str!("../sources/daejeon.toml")),
    ("ulsan", include_str!("../sources/ulsan.toml")),
    ("sejong", include_str!("../sources/sejong.toml")),
    ("gyeonggi", include_str!("../sources/gyeonggi.toml")),
    ("gangwon", include_str!("../sources/gangwon.toml")),
    ("chungbuk", include_str!("../sources/chungbuk.toml")),
    ("chungnam", include_str!("../sources/chungnam.toml")),
    ("jeonbuk", include_str!("../sources/jeonbuk.toml")),
    ("jeonnam", include_str!("../sources/jeonnam.toml")),
    ("gyeongbuk", include_str!("../sources/gyeongbuk.toml")),
    ("gyeongnam", include_str!("../sources/gyeongnam.toml")),
    ("jeju", include_str!("../sources/jeju.toml")),
];

/// Returns all registered boundary sources.
///
/// # Panics
///
/// Panics if any embedded TOML file fails to parse. Since these are
/// compile-time constants, parse failures indicate a development error
/// and are caught during CI.
#[must_use]
pub fn all_sources() -> Vec<BoundarySource> {
    SOURCE_TOMLS
        .iter()
        .map(|(name, toml_str)| {
            toml::de::from_str(toml_str)
                .unwrap_or_else(|e| panic!("Failed to parse boundary source '{name}': {e}"))
        })
        .collect()
}

/// Looks up the source registered for a sido code.
#[must_use]
pub fn find(code: &str) -> Option<BoundarySource> {
    all_sources().into_iter().find(|source| source.code == code)
}
