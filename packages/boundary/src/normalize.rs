//! Normalizes `GeoJSON` features into [`RegionFeature`] values.
//!
//! Uses the source's [`BoundaryFieldMapping`] to extract each region's code
//! and names, regardless of the dataset-specific property naming.

use area_map_boundary_models::BoundaryFieldMapping;
use area_map_region_models::{BoundaryDataset, RegionFeature, RegionGeometry};
use geojson::{Feature, FeatureCollection, GeoJson, JsonValue};

use crate::BoundaryError;

/// Normalizes a parsed `GeoJSON` document into a dataset for `scope_code`.
///
/// A bare `Feature` is treated as a one-feature collection.
///
/// # Errors
///
/// Returns [`BoundaryError::Conversion`] if the document is a bare
/// geometry rather than a feature collection.
pub fn normalize_geojson(
    scope_code: &str,
    geojson: GeoJson,
    fields: &BoundaryFieldMapping,
) -> Result<BoundaryDataset, BoundaryError> {
    match geojson {
        GeoJson::FeatureCollection(collection) => {
            Ok(normalize_collection(scope_code, collection, fields))
        }
        GeoJson::Feature(feature) => Ok(BoundaryDataset::new(
            scope_code.to_string(),
            normalize_feature(feature, fields).into_iter().collect(),
        )),
        GeoJson::Geometry(_) => Err(BoundaryError::Conversion {
            message: format!("Boundary data for {scope_code} is a bare geometry, not a FeatureCollection"),
        }),
    }
}

/// Normalizes every feature of `collection`, keeping source order.
///
/// Skips features without a region code.
#[must_use]
pub fn normalize_collection(
    scope_code: &str,
    collection: FeatureCollection,
    fields: &BoundaryFieldMapping,
) -> BoundaryDataset {
    let total = collection.features.len();
    let features: Vec<RegionFeature> = collection
        .features
        .into_iter()
        .filter_map(|feature| normalize_feature(feature, fields))
        .collect();

    if features.len() < total {
        log::warn!(
            "Skipped {} of {total} boundary features without a '{}' property in {scope_code}",
            total - features.len(),
            fields.code
        );
    }

    BoundaryDataset::new(scope_code.to_string(), features)
}

/// Normalizes a single `GeoJSON` feature.
fn normalize_feature(feature: Feature, fields: &BoundaryFieldMapping) -> Option<RegionFeature> {
    let code = property_string(&feature, &fields.code).filter(|s| !s.is_empty())?;
    let name = property_string(&feature, &fields.name).unwrap_or_default();
    let parent_name = property_string(&feature, &fields.parent).unwrap_or_default();

    let geometry = convert_geometry(feature.geometry);
    if geometry.is_unsupported() {
        log::warn!("Region {code} has no polygonal geometry; it will contain no points");
    }

    Some(RegionFeature {
        code,
        name,
        parent_name,
        geometry,
    })
}

/// Reads a property as a trimmed string. Numeric codes are accepted since
/// some exports store administrative codes as numbers.
fn property_string(feature: &Feature, key: &str) -> Option<String> {
    match feature.property(key)? {
        JsonValue::String(s) => Some(s.trim().to_string()),
        JsonValue::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Converts a `GeoJSON` geometry into a [`RegionGeometry`].
/// Anything other than a `Polygon` or `MultiPolygon` is unsupported.
fn convert_geometry(geometry: Option<geojson::Geometry>) -> RegionGeometry {
    let Some(geometry) = geometry else {
        return RegionGeometry::Unsupported;
    };

    match geo::Geometry::<f64>::try_from(geometry) {
        Ok(geo::Geometry::Polygon(polygon)) => RegionGeometry::Polygon(polygon),
        Ok(geo::Geometry::MultiPolygon(multi)) => RegionGeometry::MultiPolygon(multi),
        Ok(_) => RegionGeometry::Unsupported,
        Err(e) => {
            log::warn!("Failed to convert boundary geometry: {e}");
            RegionGeometry::Unsupported
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> GeoJson {
        json.parse().unwrap()
    }

    const COLLECTION: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "properties": {"adm_cd": "11110515", "adm_nm": "서울특별시 종로구 청운효자동", "sggnm": "종로구"},
                "geometry": {"type": "Polygon", "coordinates": [[[126.96, 37.58], [126.97, 37.59], [126.98, 37.58], [126.96, 37.58]]]}
            },
            {
                "type": "Feature",
                "properties": {"adm_cd": 11110530, "adm_nm": "서울특별시 종로구 사직동", "sggnm": "종로구"},
                "geometry": {"type": "MultiPolygon", "coordinates": [[[[126.96, 37.57], [126.97, 37.575], [126.98, 37.57], [126.96, 37.57]]]]}
            },
            {
                "type": "Feature",
                "properties": {"adm_nm": "no code"},
                "geometry": {"type": "Polygon", "coordinates": [[[0.0, 0.0], [0.0, 1.0], [1.0, 1.0], [0.0, 0.0]]]}
            },
            {
                "type": "Feature",
                "properties": {"adm_cd": "11110540", "adm_nm": "서울특별시 종로구 삼청동", "sggnm": "종로구"},
                "geometry": {"type": "Point", "coordinates": [126.98, 37.59]}
            },
            {
                "type": "Feature",
                "properties": {"adm_cd": "11110550", "adm_nm": "서울특별시 종로구 부암동"},
                "geometry": null
            }
        ]
    }"#;

    #[test]
    fn normalizes_collection_in_source_order() {
        let dataset =
            normalize_geojson("11", parse(COLLECTION), &BoundaryFieldMapping::default()).unwrap();

        assert_eq!(dataset.scope_code, "11");
        let codes: Vec<&str> = dataset.features.iter().map(|f| f.code.as_str()).collect();
        assert_eq!(codes, ["11110515", "11110530", "11110540", "11110550"]);

        let first = &dataset.features[0];
        assert_eq!(first.name, "서울특별시 종로구 청운효자동");
        assert_eq!(first.parent_name, "종로구");
        assert!(matches!(first.geometry, RegionGeometry::Polygon(_)));
        assert!(matches!(
            dataset.features[1].geometry,
            RegionGeometry::MultiPolygon(_)
        ));
    }

    #[test]
    fn non_polygonal_geometry_is_kept_as_unsupported() {
        let dataset =
            normalize_geojson("11", parse(COLLECTION), &BoundaryFieldMapping::default()).unwrap();

        assert!(dataset.features[2].geometry.is_unsupported());
        assert!(dataset.features[3].geometry.is_unsupported());
        assert_eq!(dataset.features[3].parent_name, "");
    }

    #[test]
    fn custom_field_mapping() {
        let json = r#"{
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "properties": {"ADM_DR_CD": "2611051000", "ADM_DR_NM": "중앙동", "SGG": "중구"},
                "geometry": {"type": "Polygon", "coordinates": [[[129.03, 35.10], [129.04, 35.11], [129.05, 35.10], [129.03, 35.10]]]}
            }]
        }"#;
        let fields = BoundaryFieldMapping {
            code: "ADM_DR_CD".to_string(),
            name: "ADM_DR_NM".to_string(),
            parent: "SGG".to_string(),
        };

        let dataset = normalize_geojson("26", parse(json), &fields).unwrap();
        assert_eq!(dataset.features[0].code, "2611051000");
        assert_eq!(dataset.features[0].parent_name, "중구");
    }

    #[test]
    fn bare_geometry_is_rejected() {
        let json = r#"{"type": "Point", "coordinates": [126.98, 37.59]}"#;
        let result = normalize_geojson("11", parse(json), &BoundaryFieldMapping::default());
        assert!(matches!(result, Err(BoundaryError::Conversion { .. })));
    }

    #[test]
    fn single_feature_becomes_one_region() {
        let json = r#"{
            "type": "Feature",
            "properties": {"adm_cd": "5011025000", "adm_nm": "제주특별자치도 제주시 일도1동"},
            "geometry": {"type": "Polygon", "coordinates": [[[126.52, 33.51], [126.53, 33.52], [126.54, 33.51], [126.52, 33.51]]]}
        }"#;
        let dataset =
            normalize_geojson("50", parse(json), &BoundaryFieldMapping::default()).unwrap();
        assert_eq!(dataset.len(), 1);
    }
}
