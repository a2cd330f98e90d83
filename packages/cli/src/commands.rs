//! Builds the JSON output of the `aggregate` and `match` subcommands.

use std::collections::BTreeSet;
use std::sync::Arc;

use area_map_matcher::{ExactMatcher, PrefixMatcher, SummaryMatch, attach_summaries};
use area_map_region_models::{BoundaryDataset, PointRecord, RegionAggregate, SummaryRecord};
use area_map_spatial::{ContainmentRule, RegionIndex, assign, in_stored_order};
use serde::Serialize;

/// One region in the `match` output.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchedRegion<'a> {
    pub region_code: String,
    pub region_name: String,
    pub parent_name: String,
    /// `None` when no summary matched this region.
    pub summary: Option<SummaryMatch<'a>>,
}

/// Aggregates `points` over `dataset`, in the dataset's region order.
pub fn aggregate(
    dataset: Arc<BoundaryDataset>,
    points: &[PointRecord],
    rule: ContainmentRule,
) -> Vec<RegionAggregate> {
    let index = RegionIndex::new(dataset).with_rule(rule);
    let aggregates = assign(points, &index);

    log::info!(
        "{} of {} regions have data",
        aggregates.values().filter(|a| a.has_data()).count(),
        aggregates.len()
    );

    in_stored_order(&aggregates, &index)
        .into_iter()
        .cloned()
        .collect()
}

/// Attaches `summaries` to the regions of `dataset`, in region order.
pub fn match_summaries<'a>(
    dataset: Arc<BoundaryDataset>,
    summaries: &'a [SummaryRecord],
    exact: bool,
) -> Vec<MatchedRegion<'a>> {
    let index = RegionIndex::new(dataset);
    let attached = if exact {
        attach_summaries(summaries, &index, &ExactMatcher)
    } else {
        attach_summaries(summaries, &index, &PrefixMatcher::default())
    };

    let mut seen = BTreeSet::new();
    index
        .features()
        .iter()
        .filter(|feature| seen.insert(feature.code.as_str()))
        .map(|feature| MatchedRegion {
            region_code: feature.code.clone(),
            region_name: feature.name.clone(),
            parent_name: feature.parent_name.clone(),
            summary: attached.get(&feature.code).copied(),
        })
        .collect()
}
