#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Cross-granularity matching between summary records and region
//! boundaries.
//!
//! Summary datasets and boundary datasets are coded independently, so a
//! summary's administrative code may be longer, shorter, or carry a
//! different suffix than the region code it refers to. A
//! [`RegionMatcher`] resolves a summary code to a region; the default
//! [`PrefixMatcher`] tries the exact code first and then falls back to
//! comparing a short and a long leading prefix.

use std::collections::BTreeMap;

use area_map_region_models::{RegionFeature, SummaryRecord};
use area_map_spatial::RegionIndex;
use serde::Serialize;

/// Length of the short (district-level) prefix compared by default.
pub const SHORT_PREFIX_LEN: usize = 5;

/// Length of the long (dong-level) prefix compared by default.
pub const LONG_PREFIX_LEN: usize = 8;

/// Strategy for resolving a summary code to a region.
pub trait RegionMatcher {
    /// Returns the region `code` refers to, or `None` if nothing matches.
    fn match_region<'a>(&self, code: &str, index: &'a RegionIndex) -> Option<&'a RegionFeature>;

    /// Like [`RegionMatcher::match_region`], also reporting how the region
    /// was found.
    fn match_region_kind<'a>(
        &self,
        code: &str,
        index: &'a RegionIndex,
    ) -> Option<(&'a RegionFeature, MatchKind)> {
        if let Some(feature) = index.get(code) {
            return Some((feature, MatchKind::Exact));
        }
        self.match_region(code, index)
            .map(|feature| (feature, MatchKind::Prefix))
    }

    /// Whether a summary code refers to a region code without being equal
    /// to it. Matchers without a fallback never agree.
    fn fallback_agrees(&self, _summary_code: &str, _region_code: &str) -> bool {
        false
    }
}

/// How a summary was matched to its region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchKind {
    /// The summary code equals the region code.
    Exact,
    /// The codes share both leading prefixes.
    Prefix,
}

/// Exact-code lookup only.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExactMatcher;

impl RegionMatcher for ExactMatcher {
    fn match_region<'a>(&self, code: &str, index: &'a RegionIndex) -> Option<&'a RegionFeature> {
        index.get(code)
    }
}

/// Exact lookup with a two-tier prefix fallback.
///
/// A region matches when its code agrees with the summary code on both the
/// first `short_len` and the first `long_len` characters. Ties resolve to
/// the first region in stored order.
#[derive(Debug, Clone, Copy)]
pub struct PrefixMatcher {
    pub short_len: usize,
    pub long_len: usize,
}

impl Default for PrefixMatcher {
    fn default() -> Self {
        Self {
            short_len: SHORT_PREFIX_LEN,
            long_len: LONG_PREFIX_LEN,
        }
    }
}

impl PrefixMatcher {
    /// Whether two codes agree on both prefixes.
    #[must_use]
    pub fn prefixes_agree(&self, a: &str, b: &str) -> bool {
        prefix(a, self.short_len) == prefix(b, self.short_len)
            && prefix(a, self.long_len) == prefix(b, self.long_len)
    }
}

impl RegionMatcher for PrefixMatcher {
    fn match_region<'a>(&self, code: &str, index: &'a RegionIndex) -> Option<&'a RegionFeature> {
        if let Some(feature) = index.get(code) {
            return Some(feature);
        }

        index
            .features()
            .iter()
            .find(|feature| self.prefixes_agree(code, &feature.code))
    }

    fn fallback_agrees(&self, summary_code: &str, region_code: &str) -> bool {
        self.prefixes_agree(summary_code, region_code)
    }
}

/// Resolves `code` with the default [`PrefixMatcher`].
#[must_use]
pub fn match_region<'a>(code: &str, index: &'a RegionIndex) -> Option<&'a RegionFeature> {
    PrefixMatcher::default().match_region(code, index)
}

/// The first `len` characters of `code`, or all of it if shorter.
fn prefix(code: &str, len: usize) -> &str {
    code.char_indices()
        .nth(len)
        .map_or(code, |(end, _)| &code[..end])
}

/// A summary attached to a region.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryMatch<'a> {
    pub summary: &'a SummaryRecord,
    pub kind: MatchKind,
}

impl SummaryMatch<'_> {
    /// Whether the summary carries any store data.
    #[must_use]
    pub const fn has_data(&self) -> bool {
        self.summary.total_stores > 0
    }
}

/// Finds the summary for every region in `index`, keyed by region code.
///
/// Regions are visited in stored order. A summary whose code equals the
/// region code wins; otherwise the region takes the first summary in input
/// order that `matcher` falls back to. One summary may serve several
/// regions. Regions with no summary are left out.
#[must_use]
pub fn attach_summaries<'a, M: RegionMatcher + ?Sized>(
    summaries: &'a [SummaryRecord],
    index: &RegionIndex,
    matcher: &M,
) -> BTreeMap<String, SummaryMatch<'a>> {
    let mut by_code: BTreeMap<&str, &'a SummaryRecord> = BTreeMap::new();
    for summary in summaries {
        by_code.entry(summary.code.as_str()).or_insert(summary);
    }

    let mut attached: BTreeMap<String, SummaryMatch<'a>> = BTreeMap::new();

    for feature in index.features() {
        if attached.contains_key(&feature.code) {
            continue;
        }

        let found = by_code
            .get(feature.code.as_str())
            .copied()
            .map(|summary| SummaryMatch {
                summary,
                kind: MatchKind::Exact,
            })
            .or_else(|| {
                summaries
                    .iter()
                    .find(|summary| matcher.fallback_agrees(&summary.code, &feature.code))
                    .map(|summary| SummaryMatch {
                        summary,
                        kind: MatchKind::Prefix,
                    })
            });

        if let Some(found) = found {
            attached.insert(feature.code.clone(), found);
        }
    }

    log::debug!(
        "Attached summaries to {} of {} regions from {} summaries",
        attached.len(),
        index.len(),
        summaries.len()
    );

    attached
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use area_map_region_models::{BoundaryDataset, RegionGeometry};

    fn region(code: &str) -> RegionFeature {
        RegionFeature {
            code: code.to_string(),
            name: format!("region {code}"),
            parent_name: String::new(),
            geometry: RegionGeometry::Polygon(geo::Polygon::new(
                geo::LineString::from(vec![(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)]),
                vec![],
            )),
        }
    }

    fn index(codes: &[&str]) -> RegionIndex {
        RegionIndex::new(Arc::new(BoundaryDataset::new(
            "41".to_string(),
            codes.iter().copied().map(region).collect(),
        )))
    }

    fn summary(code: &str, total_stores: u64) -> SummaryRecord {
        SummaryRecord {
            code: code.to_string(),
            name: String::new(),
            parent_name: String::new(),
            total_stores,
            target_stores: 0,
            density_score: 50.0,
        }
    }

    #[test]
    fn exact_code_wins_over_prefix_candidate() {
        // Both regions share the summary's 5- and 8-character prefixes.
        let index = index(&["AAAAA000X", "AAAAA000Y"]);
        let found = match_region("AAAAA000Y", &index).unwrap();
        assert_eq!(found.code, "AAAAA000Y");
    }

    #[test]
    fn prefix_fallback_when_both_prefixes_agree() {
        let index = index(&["AAAAA000", "BBBBB000"]);
        let found = match_region("AAAAA000X", &index).unwrap();
        assert_eq!(found.code, "AAAAA000");
    }

    #[test]
    fn no_match_when_long_prefix_differs() {
        let index = index(&["AAAAA000", "BBBBB000"]);
        assert!(match_region("AAAAA123", &index).is_none());
    }

    #[test]
    fn no_match_when_short_prefix_differs() {
        let index = index(&["AAAAA000"]);
        assert!(match_region("AAAAB000", &index).is_none());
        assert!(match_region("CCCCC000", &index).is_none());
    }

    #[test]
    fn ties_resolve_to_first_in_stored_order() {
        let index = index(&["41111566A", "41111566B"]);
        let found = match_region("41111566", &index).unwrap();
        assert_eq!(found.code, "41111566A");
    }

    #[test]
    fn short_codes_compare_whole() {
        let shorter = index(&["4111"]);
        assert!(match_region("41110", &shorter).is_none());

        let exact = index(&["41111"]);
        assert_eq!(
            match_region("41111", &exact).map(|f| f.code.as_str()),
            Some("41111")
        );
    }

    #[test]
    fn prefixes_count_characters_not_bytes() {
        let matcher = PrefixMatcher {
            short_len: 2,
            long_len: 3,
        };
        assert!(matcher.prefixes_agree("동구가1", "동구가2"));
        assert!(!matcher.prefixes_agree("동구가", "동구나"));
    }

    #[test]
    fn exact_matcher_never_falls_back() {
        let index = index(&["AAAAA000"]);
        assert!(ExactMatcher.match_region("AAAAA000X", &index).is_none());
        assert!(ExactMatcher.match_region("AAAAA000", &index).is_some());
    }

    #[test]
    fn attach_prefers_exact_over_earlier_prefix_match() {
        let index = index(&["AAAAA000"]);
        let summaries = vec![summary("AAAAA000X", 3), summary("AAAAA000", 7)];

        let attached = attach_summaries(&summaries, &index, &PrefixMatcher::default());
        let matched = &attached["AAAAA000"];
        assert_eq!(matched.kind, MatchKind::Exact);
        assert_eq!(matched.summary.total_stores, 7);
    }

    #[test]
    fn attach_keeps_first_prefix_match_and_skips_unmatched() {
        let index = index(&["AAAAA000", "BBBBB000"]);
        let summaries = vec![
            summary("AAAAA000X", 3),
            summary("AAAAA000Y", 9),
            summary("ZZZZZ000", 1),
            summary("BBBBB000", 0),
        ];

        let attached = attach_summaries(&summaries, &index, &PrefixMatcher::default());
        assert_eq!(attached.len(), 2);
        assert_eq!(attached["AAAAA000"].summary.code, "AAAAA000X");
        assert_eq!(attached["AAAAA000"].kind, MatchKind::Prefix);
        assert!(attached["AAAAA000"].has_data());
        assert!(!attached["BBBBB000"].has_data());
    }

    #[test]
    fn one_summary_serves_every_agreeing_region() {
        let index = index(&["AAAAA000X", "AAAAA000Y", "BBBBB000"]);
        let summaries = vec![summary("AAAAA000", 5)];

        let attached = attach_summaries(&summaries, &index, &PrefixMatcher::default());
        assert_eq!(attached.len(), 2);
        for code in ["AAAAA000X", "AAAAA000Y"] {
            assert_eq!(attached[code].summary.code, "AAAAA000");
            assert_eq!(attached[code].kind, MatchKind::Prefix);
        }
        assert!(!attached.contains_key("BBBBB000"));
    }

    #[test]
    fn exact_summary_is_not_shared_with_prefix_neighbours() {
        let index = index(&["AAAAA000X", "AAAAA000Y"]);
        let summaries = vec![summary("AAAAA000Y", 4), summary("AAAAA000X", 8)];

        let attached = attach_summaries(&summaries, &index, &PrefixMatcher::default());
        assert_eq!(attached["AAAAA000X"].summary.total_stores, 8);
        assert_eq!(attached["AAAAA000X"].kind, MatchKind::Exact);
        assert_eq!(attached["AAAAA000Y"].summary.total_stores, 4);
        assert_eq!(attached["AAAAA000Y"].kind, MatchKind::Exact);
    }

    #[test]
    fn attach_with_exact_matcher_reports_exact_only() {
        let index = index(&["AAAAA000"]);
        let summaries = vec![summary("AAAAA000X", 3)];
        let attached = attach_summaries(&summaries, &index, &ExactMatcher);
        assert!(attached.is_empty());
    }
}
