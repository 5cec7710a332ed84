//! Static redlining dataset.
//!
//! The dataset is a GeoJSON `FeatureCollection` read once at start-up. Each
//! feature is validated before it is admitted:
//! - geometry must be a `MultiPolygon` with at least one ring and one position
//! - every position must be finite and inside [-180,180]x[-90,90]
//!
//! Features failing validation are logged and counted, never served. Every
//! admitted feature with an `area_description_data` object also yields a
//! [`DescriptionRecord`] for keyword search.

mod index;

pub use index::{build_index, EnvelopeIndex, FeatureIndex, IndexKind, LinearScan};

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::models::{DescriptionRecord, FeatureProperties, Geometry, RedliningFeature};

/// Errors from loading the dataset.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("Failed to read dataset {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse dataset: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Expected a FeatureCollection, found {0}")]
    NotFeatureCollection(String),
}

/// Summary of what the loader admitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    /// Where the dataset came from (file path), if known.
    pub source: Option<String>,
    pub features: usize,
    pub descriptions: usize,
    pub skipped: usize,
}

#[derive(Deserialize)]
struct RawCollection {
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default)]
    features: Vec<RawFeature>,
}

#[derive(Deserialize)]
struct RawFeature {
    #[serde(default)]
    geometry: Value,
    #[serde(default)]
    properties: Option<FeatureProperties>,
}

/// Immutable in-memory dataset.
#[derive(Debug, Default)]
pub struct Dataset {
    features: Vec<RedliningFeature>,
    descriptions: Vec<DescriptionRecord>,
    report: LoadReport,
}

impl Dataset {
    /// Read and validate a GeoJSON file.
    pub async fn load(path: &Path) -> Result<Self, DatasetError> {
        let contents = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| DatasetError::Io {
                path: path.display().to_string(),
                source,
            })?;

        let mut dataset = Self::from_json_str(&contents)?;
        dataset.report.source = Some(path.display().to_string());

        tracing::info!(
            "Loaded {} features ({} descriptions, {} skipped) from {}",
            dataset.report.features,
            dataset.report.descriptions,
            dataset.report.skipped,
            path.display()
        );
        Ok(dataset)
    }

    /// Parse and validate a GeoJSON `FeatureCollection` document.
    pub fn from_json_str(json: &str) -> Result<Self, DatasetError> {
        let raw: RawCollection = serde_json::from_str(json)?;

        if let Some(kind) = raw.kind.as_deref() {
            if kind != "FeatureCollection" {
                return Err(DatasetError::NotFeatureCollection(kind.to_string()));
            }
        }

        let total = raw.features.len();
        let mut features = Vec::with_capacity(total);
        for (position, raw_feature) in raw.features.into_iter().enumerate() {
            match admit(raw_feature) {
                Ok(feature) => features.push(feature),
                Err(reason) => {
                    tracing::warn!("Skipping feature #{}: {}", position, reason);
                }
            }
        }

        let mut dataset = Self::from_features(features);
        dataset.report.skipped = total - dataset.report.features;
        Ok(dataset)
    }

    /// Build a dataset from already-validated features.
    pub fn from_features(features: Vec<RedliningFeature>) -> Self {
        let descriptions: Vec<DescriptionRecord> = features
            .iter()
            .enumerate()
            .filter_map(|(i, f)| {
                f.properties
                    .area_description()
                    .and_then(|data| DescriptionRecord::from_area_description(i, data))
            })
            .collect();

        let report = LoadReport {
            source: None,
            features: features.len(),
            descriptions: descriptions.len(),
            skipped: 0,
        };

        Self {
            features,
            descriptions,
            report,
        }
    }

    pub fn features(&self) -> &[RedliningFeature] {
        &self.features
    }

    pub fn feature(&self, index: usize) -> Option<&RedliningFeature> {
        self.features.get(index)
    }

    pub fn descriptions(&self) -> &[DescriptionRecord] {
        &self.descriptions
    }

    pub fn report(&self) -> &LoadReport {
        &self.report
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

/// Validate one raw feature, returning the reason when it is rejected.
fn admit(raw: RawFeature) -> Result<RedliningFeature, String> {
    if raw.geometry.is_null() {
        return Err("missing geometry".to_string());
    }

    let geometry: Geometry = serde_json::from_value(raw.geometry)
        .map_err(|e| format!("unsupported geometry: {}", e))?;

    if geometry.ring_count() == 0 {
        return Err("geometry has no polygon rings".to_string());
    }
    if geometry.positions().next().is_none() {
        return Err("geometry has only empty rings".to_string());
    }
    if let Some(bad) = geometry.positions().find(|p| !p.is_valid()) {
        return Err(format!(
            "coordinate ({}, {}) outside [-180,180]x[-90,90]",
            bad.lon, bad.lat
        ));
    }

    Ok(RedliningFeature::new(
        geometry,
        raw.properties.unwrap_or_default(),
    ))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) const SAMPLE: &str = include_str!("../../data/sample.geojson");

    pub(crate) fn sample() -> Dataset {
        Dataset::from_json_str(SAMPLE).unwrap()
    }

    #[test]
    fn test_sample_skips_invalid_features() {
        let dataset = sample();
        let report = dataset.report();

        assert_eq!(report.features, 4);
        assert_eq!(report.skipped, 3);
        assert_eq!(report.descriptions, 3);
        assert_eq!(dataset.len(), 4);
        assert!(dataset
            .features()
            .iter()
            .all(|f| f.geometry.ring_count() > 0 && f.geometry.positions().all(|p| p.is_valid())));
    }

    #[test]
    fn test_descriptions_point_at_their_feature() {
        let dataset = sample();
        for record in dataset.descriptions() {
            let feature = dataset.feature(record.feature).unwrap();
            assert!(feature.properties.area_description().is_some());
        }
        // Oakland has no description block
        assert!(dataset.descriptions().iter().all(|r| r.feature != 3));
    }

    #[test]
    fn test_preserves_dataset_order() {
        let dataset = sample();
        let cities: Vec<_> = dataset
            .features()
            .iter()
            .map(|f| f.properties.city().unwrap_or_default())
            .collect();
        assert_eq!(cities, vec!["Providence", "Providence", "Birmingham", "Oakland"]);
    }

    #[test]
    fn test_rejects_non_collection() {
        let err = Dataset::from_json_str(r#"{"type": "Feature", "features": []}"#).unwrap_err();
        assert!(matches!(err, DatasetError::NotFeatureCollection(ref k) if k == "Feature"));
    }

    #[test]
    fn test_missing_features_key_is_empty() {
        let dataset = Dataset::from_json_str(r#"{"type": "FeatureCollection"}"#).unwrap();
        assert!(dataset.is_empty());
        assert_eq!(dataset.report().skipped, 0);
    }

    #[test]
    fn test_malformed_json() {
        let err = Dataset::from_json_str("{not json").unwrap_err();
        assert!(matches!(err, DatasetError::Json(_)));
    }

    #[test]
    fn test_null_properties_become_empty() {
        let json = r#"{
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "geometry": {
                    "type": "MultiPolygon",
                    "coordinates": [[[[1.0, 2.0], [1.5, 2.0], [1.0, 2.0]]]]
                },
                "properties": null
            }]
        }"#;
        let dataset = Dataset::from_json_str(json).unwrap();
        assert_eq!(dataset.len(), 1);
        assert!(dataset.features()[0].properties.0.is_empty());
        assert!(dataset.descriptions().is_empty());
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("redlining.geojson");
        std::fs::write(&path, SAMPLE).unwrap();

        let dataset = Dataset::load(&path).await.unwrap();
        assert_eq!(dataset.len(), 4);
        assert_eq!(
            dataset.report().source.as_deref(),
            Some(path.display().to_string().as_str())
        );
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let err = Dataset::load(Path::new("/nonexistent/redlining.geojson"))
            .await
            .unwrap_err();
        assert!(matches!(err, DatasetError::Io { .. }));
    }
}
