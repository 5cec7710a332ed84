//! Pluggable bounding-box index over the dataset.
//!
//! Allows swapping between a plain linear scan and an envelope-prefiltered
//! scan (or an external spatial index) without touching the query contract.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::Dataset;
use crate::models::BoundingBox;

/// Answers "which features have a position inside this box".
pub trait FeatureIndex: Send + Sync {
    /// Short identifier for logs and status output.
    fn name(&self) -> &'static str;

    /// Indices of intersecting features, in dataset order.
    fn query(&self, bbox: &BoundingBox) -> Vec<usize>;
}

/// Which [`FeatureIndex`] implementation to build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexKind {
    /// Check every position of every feature.
    #[default]
    Linear,
    /// Skip features whose envelope misses the box.
    Envelope,
}

impl fmt::Display for IndexKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexKind::Linear => write!(f, "linear"),
            IndexKind::Envelope => write!(f, "envelope"),
        }
    }
}

impl FromStr for IndexKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "linear" => Ok(IndexKind::Linear),
            "envelope" => Ok(IndexKind::Envelope),
            other => Err(format!(
                "unknown index '{}' (expected 'linear' or 'envelope')",
                other
            )),
        }
    }
}

/// Build the configured index over a shared dataset.
pub fn build_index(kind: IndexKind, dataset: Arc<Dataset>) -> Arc<dyn FeatureIndex> {
    match kind {
        IndexKind::Linear => Arc::new(LinearScan::new(dataset)),
        IndexKind::Envelope => Arc::new(EnvelopeIndex::new(dataset)),
    }
}

/// Exhaustive scan of every position.
pub struct LinearScan {
    dataset: Arc<Dataset>,
}

impl LinearScan {
    pub fn new(dataset: Arc<Dataset>) -> Self {
        Self { dataset }
    }
}

impl FeatureIndex for LinearScan {
    fn name(&self) -> &'static str {
        "linear"
    }

    fn query(&self, bbox: &BoundingBox) -> Vec<usize> {
        self.dataset
            .features()
            .iter()
            .enumerate()
            .filter(|(_, f)| f.intersects(bbox))
            .map(|(i, _)| i)
            .collect()
    }
}

/// Linear scan with a per-feature envelope check first.
pub struct EnvelopeIndex {
    dataset: Arc<Dataset>,
    envelopes: Vec<Option<BoundingBox>>,
}

impl EnvelopeIndex {
    pub fn new(dataset: Arc<Dataset>) -> Self {
        let envelopes = dataset.features().iter().map(|f| f.envelope()).collect();
        Self { dataset, envelopes }
    }
}

impl FeatureIndex for EnvelopeIndex {
    fn name(&self) -> &'static str {
        "envelope"
    }

    fn query(&self, bbox: &BoundingBox) -> Vec<usize> {
        self.dataset
            .features()
            .iter()
            .zip(&self.envelopes)
            .enumerate()
            .filter(|(_, (feature, envelope))| {
                envelope.is_some_and(|env| env.intersects(bbox)) && feature.intersects(bbox)
            })
            .map(|(i, _)| i)
            .collect()
    }
}
