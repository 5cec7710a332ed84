//! Data models for Classify.

mod bbox;
mod description;
mod feature;

pub use bbox::BoundingBox;
pub use description::{tokenize, DescriptionRecord};
pub use feature::{
    FeatureProperties, FeatureTag, Geometry, Polygon, Position, RedliningFeature, Ring,
};
