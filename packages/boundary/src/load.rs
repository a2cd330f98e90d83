//! Reads boundary `GeoJSON` files from disk.

use std::path::Path;

use area_map_boundary_models::BoundaryFieldMapping;
use area_map_region_models::BoundaryDataset;
use geojson::GeoJson;

use crate::BoundaryError;
use crate::normalize::normalize_geojson;

/// Parses `GeoJSON` text into a dataset for `scope_code`.
///
/// # Errors
///
/// Returns [`BoundaryError`] if the text is not valid `GeoJSON` or is not a
/// feature collection.
pub fn parse_dataset(
    scope_code: &str,
    text: &str,
    fields: &BoundaryFieldMapping,
) -> Result<BoundaryDataset, BoundaryError> {
    let geojson: GeoJson = text.parse()?;
    normalize_geojson(scope_code, geojson, fields)
}

/// Reads and normalizes the boundary file at `path`.
///
/// # Errors
///
/// Returns [`BoundaryError`] if the file cannot be read or parsed.
pub fn load_dataset(
    path: &Path,
    scope_code: &str,
    fields: &BoundaryFieldMapping,
) -> Result<BoundaryDataset, BoundaryError> {
    log::info!("Loading boundaries for {scope_code} from {}", path.display());
    let text = std::fs::read_to_string(path)?;
    let dataset = parse_dataset(scope_code, &text, fields)?;
    log::info!(
        "Loaded {} regions for {scope_code}",
        dataset.features.len()
    );
    Ok(dataset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_missing_file_is_io_error() {
        let path = std::env::temp_dir().join("area_map_load_test_missing.geojson");
        let _ = std::fs::remove_file(&path);

        let result = load_dataset(&path, "11", &BoundaryFieldMapping::default());
        assert!(matches!(result, Err(BoundaryError::Io(_))));
    }

    #[test]
    fn invalid_json_is_geojson_error() {
        let result = parse_dataset("11", "{not json", &BoundaryFieldMapping::default());
        assert!(matches!(result, Err(BoundaryError::GeoJson(_))));
    }

    #[test]
    fn load_from_file() {
        let path = std::env::temp_dir().join("area_map_load_test_ok.geojson");
        std::fs::write(
            &path,
            r#"{"type": "FeatureCollection", "features": [{
                "type": "Feature",
                "properties": {"adm_cd": "3611031000", "adm_nm": "세종특별자치시 조치원읍"},
                "geometry": {"type": "Polygon", "coordinates": [[[127.28, 36.60], [127.29, 36.61], [127.30, 36.60], [127.28, 36.60]]]}
            }]}"#,
        )
        .unwrap();

        let dataset = load_dataset(&path, "36", &BoundaryFieldMapping::default()).unwrap();
        assert_eq!(dataset.scope_code, "36");
        assert_eq!(dataset.features[0].code, "3611031000");

        let _ = std::fs::remove_file(&path);
    }
}
