//! Keyword and bounding-box queries over the static dataset.
//!
//! Both queries are pure functions of the dataset and their parameters:
//! results always come back in dataset order and repeated calls return
//! identical results.

use std::str::FromStr;
use std::sync::Arc;

use thiserror::Error;

use crate::dataset::{build_index, Dataset, FeatureIndex, IndexKind};
use crate::models::{tokenize, BoundingBox, RedliningFeature};

pub const MISSING_KEYWORD: &str = "Missing keyword.";
pub const MISSING_BOUNDS: &str =
    "Missing one or more required parameters: minLon, maxLon, minLat, maxLat";

/// Request validation failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("{0}")]
    MissingParameter(&'static str),
    #[error("Invalid value for {name}: {value}")]
    InvalidParameter { name: &'static str, value: String },
}

/// How a keyword is matched against description records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MatchMode {
    /// Case-insensitive substring of the description text.
    #[default]
    Substring,
    /// Every token of the keyword is one of the record's keywords.
    Token,
}

impl FromStr for MatchMode {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "substring" => Ok(MatchMode::Substring),
            "token" => Ok(MatchMode::Token),
            _ => Err(QueryError::InvalidParameter {
                name: "mode",
                value: s.to_string(),
            }),
        }
    }
}

/// Unparsed rectangle bounds as they arrive on the query string.
#[derive(Debug, Clone, Default)]
pub struct RawBounds {
    pub min_lon: Option<String>,
    pub max_lon: Option<String>,
    pub min_lat: Option<String>,
    pub max_lat: Option<String>,
}

impl RawBounds {
    pub fn new(min_lon: &str, max_lon: &str, min_lat: &str, max_lat: &str) -> Self {
        Self {
            min_lon: Some(min_lon.to_string()),
            max_lon: Some(max_lon.to_string()),
            min_lat: Some(min_lat.to_string()),
            max_lat: Some(max_lat.to_string()),
        }
    }

    /// Validate and normalize into a [`BoundingBox`].
    ///
    /// Any absent or empty bound is a missing parameter; a bound that is not
    /// a finite number is invalid. Inverted pairs are swapped.
    pub fn parse(&self) -> Result<BoundingBox, QueryError> {
        let fields = [
            ("minLon", &self.min_lon),
            ("maxLon", &self.max_lon),
            ("minLat", &self.min_lat),
            ("maxLat", &self.max_lat),
        ];

        if fields
            .iter()
            .any(|(_, v)| v.as_deref().map_or(true, |s| s.trim().is_empty()))
        {
            return Err(QueryError::MissingParameter(MISSING_BOUNDS));
        }

        let mut values = [0.0f64; 4];
        for (slot, (name, raw)) in values.iter_mut().zip(fields) {
            let raw = raw.as_deref().unwrap_or_default();
            *slot = raw
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| QueryError::InvalidParameter {
                    name,
                    value: raw.to_string(),
                })?;
        }

        let [min_lon, max_lon, min_lat, max_lat] = values;
        Ok(BoundingBox::new(min_lon, max_lon, min_lat, max_lat))
    }
}

/// Read-only query front for a loaded dataset.
#[derive(Clone)]
pub struct QueryService {
    dataset: Arc<Dataset>,
    index: Arc<dyn FeatureIndex>,
}

impl QueryService {
    pub fn new(dataset: Arc<Dataset>, kind: IndexKind) -> Self {
        let index = build_index(kind, dataset.clone());
        Self { dataset, index }
    }

    /// Use a caller-supplied index (e.g. an external spatial index).
    pub fn with_index(dataset: Arc<Dataset>, index: Arc<dyn FeatureIndex>) -> Self {
        Self { dataset, index }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn index_name(&self) -> &'static str {
        self.index.name()
    }

    /// Features whose area description matches `keyword`.
    pub fn search_descriptions(
        &self,
        keyword: Option<&str>,
        mode: MatchMode,
    ) -> Result<Vec<&RedliningFeature>, QueryError> {
        let keyword = keyword
            .filter(|k| !k.is_empty())
            .ok_or(QueryError::MissingParameter(MISSING_KEYWORD))?;
        let needle = keyword.to_lowercase();

        let matches: Vec<&RedliningFeature> = match mode {
            MatchMode::Substring => self
                .dataset
                .descriptions()
                .iter()
                .filter(|r| r.contains(&needle))
                .filter_map(|r| self.dataset.feature(r.feature))
                .collect(),
            MatchMode::Token => {
                let tokens = tokenize(&needle);
                if tokens.is_empty() {
                    Vec::new()
                } else {
                    self.dataset
                        .descriptions()
                        .iter()
                        .filter(|r| tokens.iter().all(|t| r.has_keyword(t)))
                        .filter_map(|r| self.dataset.feature(r.feature))
                        .collect()
                }
            }
        };

        tracing::debug!(
            "Keyword '{}' ({:?}) matched {} features",
            keyword,
            mode,
            matches.len()
        );
        Ok(matches)
    }

    /// Features with at least one position inside the given bounds.
    pub fn search_redlining(
        &self,
        bounds: &RawBounds,
    ) -> Result<Vec<&RedliningFeature>, QueryError> {
        let bbox = bounds.parse()?;
        Ok(self.features_in(&bbox))
    }

    /// Features with at least one position inside `bbox`.
    pub fn features_in(&self, bbox: &BoundingBox) -> Vec<&RedliningFeature> {
        let hits: Vec<&RedliningFeature> = self
            .index
            .query(bbox)
            .into_iter()
            .filter_map(|i| self.dataset.feature(i))
            .collect();

        tracing::debug!("Bounding box {} matched {} features", bbox, hits.len());
        hits
    }
}
