//! GeoJSON redlining features.
//!
//! Features keep their `properties` object verbatim so that responses echo
//! every key the dataset carries, while the geometry is parsed into typed
//! positions for the bounding-box path.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::BoundingBox;

/// A `[longitude, latitude]` pair.
///
/// Deserializes from any GeoJSON position with at least two numbers; a
/// trailing altitude is accepted and dropped.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "[f64; 2]")]
pub struct Position {
    pub lon: f64,
    pub lat: f64,
}

impl Position {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// Whether the position lies on the globe (finite, lon in [-180,180], lat in [-90,90]).
    pub fn is_valid(&self) -> bool {
        self.lon.is_finite()
            && self.lat.is_finite()
            && (-180.0..=180.0).contains(&self.lon)
            && (-90.0..=90.0).contains(&self.lat)
    }
}

impl TryFrom<Vec<f64>> for Position {
    type Error = String;

    fn try_from(values: Vec<f64>) -> Result<Self, Self::Error> {
        match values.as_slice() {
            [lon, lat, ..] => Ok(Self::new(*lon, *lat)),
            _ => Err(format!(
                "position needs at least 2 numbers, got {}",
                values.len()
            )),
        }
    }
}

impl From<Position> for [f64; 2] {
    fn from(p: Position) -> Self {
        [p.lon, p.lat]
    }
}

pub type Ring = Vec<Position>;
pub type Polygon = Vec<Ring>;

/// Feature geometry. Only `MultiPolygon` is served; anything else is
/// rejected by the loader.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    MultiPolygon { coordinates: Vec<Polygon> },
}

impl Geometry {
    pub fn type_name(&self) -> &'static str {
        match self {
            Geometry::MultiPolygon { .. } => "MultiPolygon",
        }
    }

    pub fn polygons(&self) -> &[Polygon] {
        match self {
            Geometry::MultiPolygon { coordinates } => coordinates,
        }
    }

    /// Iterate over every position of every ring, in document order.
    pub fn positions(&self) -> impl Iterator<Item = &Position> {
        self.polygons().iter().flatten().flatten()
    }

    pub fn ring_count(&self) -> usize {
        self.polygons().iter().map(Vec::len).sum()
    }
}

/// Free-form feature properties, kept exactly as loaded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureProperties(pub Map<String, Value>);

impl FeatureProperties {
    fn str_field(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    pub fn state(&self) -> Option<&str> {
        self.str_field("state")
    }

    pub fn city(&self) -> Option<&str> {
        self.str_field("city")
    }

    pub fn holc_grade(&self) -> Option<&str> {
        self.str_field("holc_grade")
    }

    pub fn name(&self) -> Option<&str> {
        self.str_field("name")
    }

    /// The `area_description_data` object, if present and an object.
    pub fn area_description(&self) -> Option<&Map<String, Value>> {
        self.0.get("area_description_data").and_then(Value::as_object)
    }
}

/// GeoJSON `"type": "Feature"` marker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeatureTag {
    #[default]
    Feature,
}

/// A single graded neighbourhood polygon set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RedliningFeature {
    #[serde(rename = "type", default)]
    pub kind: FeatureTag,
    pub geometry: Geometry,
    #[serde(default)]
    pub properties: FeatureProperties,
}

impl RedliningFeature {
    pub fn new(geometry: Geometry, properties: FeatureProperties) -> Self {
        Self {
            kind: FeatureTag::Feature,
            geometry,
            properties,
        }
    }

    /// True if any position of the geometry lies inside the closed box.
    pub fn intersects(&self, bbox: &BoundingBox) -> bool {
        self.geometry.positions().any(|p| bbox.contains(p))
    }

    /// Smallest box covering every position, or None for an empty geometry.
    pub fn envelope(&self) -> Option<BoundingBox> {
        BoundingBox::covering(self.geometry.positions())
    }

    /// Short human-readable label, e.g. `Providence, RI [A] Blackstone Boulevard`.
    pub fn label(&self) -> String {
        let p = &self.properties;
        let mut label = format!(
            "{}, {} [{}]",
            p.city().unwrap_or("?"),
            p.state().unwrap_or("?"),
            p.holc_grade().unwrap_or("-")
        );
        if let Some(name) = p.name() {
            label.push(' ');
            label.push_str(name);
        }
        label
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn square(lon: f64, lat: f64) -> Geometry {
        Geometry::MultiPolygon {
            coordinates: vec![vec![vec![
                Position::new(lon, lat),
                Position::new(lon + 0.01, lat),
                Position::new(lon + 0.01, lat + 0.01),
                Position::new(lon, lat),
            ]]],
        }
    }

    #[test]
    fn test_position_drops_altitude() {
        let p: Position = serde_json::from_value(json!([-71.4, 41.8, 12.0])).unwrap();
        assert_eq!(p, Position::new(-71.4, 41.8));
        assert_eq!(serde_json::to_value(p).unwrap(), json!([-71.4, 41.8]));
    }

    #[test]
    fn test_position_rejects_single_number() {
        let result: Result<Position, _> = serde_json::from_value(json!([-71.4]));
        assert!(result.is_err());
    }

    #[test]
    fn test_position_validity() {
        assert!(Position::new(180.0, -90.0).is_valid());
        assert!(!Position::new(-180.5, 0.0).is_valid());
        assert!(!Position::new(0.0, 90.1).is_valid());
        assert!(!Position::new(f64::NAN, 0.0).is_valid());
    }

    #[test]
    fn test_geometry_rejects_other_types() {
        let result: Result<Geometry, _> = serde_json::from_value(json!({
            "type": "Polygon",
            "coordinates": [[[0.0, 0.0], [1.0, 0.0], [0.0, 0.0]]]
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_feature_serializes_as_geojson() {
        let mut props = Map::new();
        props.insert("state".into(), json!("RI"));
        props.insert("holc_grade".into(), json!("A"));
        let feature = RedliningFeature::new(square(-71.4, 41.8), FeatureProperties(props));

        let value = serde_json::to_value(&feature).unwrap();
        assert_eq!(value["type"], "Feature");
        assert_eq!(value["geometry"]["type"], "MultiPolygon");
        assert_eq!(value["geometry"]["coordinates"][0][0][0], json!([-71.4, 41.8]));
        assert_eq!(value["properties"]["state"], "RI");
    }

    #[test]
    fn test_feature_intersects_on_boundary() {
        let feature = RedliningFeature::new(square(10.0, 20.0), FeatureProperties::default());
        assert!(feature.intersects(&BoundingBox::new(10.0, 10.0, 20.0, 20.0)));
        assert!(!feature.intersects(&BoundingBox::new(11.0, 12.0, 20.0, 21.0)));
    }

    #[test]
    fn test_label_handles_missing_fields() {
        let feature = RedliningFeature::new(square(0.0, 0.0), FeatureProperties::default());
        assert_eq!(feature.label(), "?, ? [-]");
    }
}
