//! Closed longitude/latitude rectangles.

use super::Position;

/// An axis-aligned, closed rectangle in degrees.
///
/// Always normalized: `min_lon <= max_lon` and `min_lat <= max_lat`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_lon: f64,
    pub max_lon: f64,
    pub min_lat: f64,
    pub max_lat: f64,
}

impl BoundingBox {
    /// The whole globe.
    pub const WORLD: BoundingBox = BoundingBox {
        min_lon: -180.0,
        max_lon: 180.0,
        min_lat: -90.0,
        max_lat: 90.0,
    };

    /// Build a box from its four bounds, swapping any inverted pair.
    pub fn new(min_lon: f64, max_lon: f64, min_lat: f64, max_lat: f64) -> Self {
        Self {
            min_lon: min_lon.min(max_lon),
            max_lon: min_lon.max(max_lon),
            min_lat: min_lat.min(max_lat),
            max_lat: min_lat.max(max_lat),
        }
    }

    /// Smallest box covering all positions; None when there are none.
    pub fn covering<'a>(positions: impl IntoIterator<Item = &'a Position>) -> Option<Self> {
        let mut iter = positions.into_iter();
        let first = iter.next()?;
        let mut bbox = Self::new(first.lon, first.lon, first.lat, first.lat);
        for p in iter {
            bbox.min_lon = bbox.min_lon.min(p.lon);
            bbox.max_lon = bbox.max_lon.max(p.lon);
            bbox.min_lat = bbox.min_lat.min(p.lat);
            bbox.max_lat = bbox.max_lat.max(p.lat);
        }
        Some(bbox)
    }

    pub fn contains(&self, p: &Position) -> bool {
        p.lon >= self.min_lon
            && p.lon <= self.max_lon
            && p.lat >= self.min_lat
            && p.lat <= self.max_lat
    }

    /// Whether the two closed boxes share at least one point.
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        self.min_lon <= other.max_lon
            && other.min_lon <= self.max_lon
            && self.min_lat <= other.max_lat
            && other.min_lat <= self.max_lat
    }
}

impl std::fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "lon [{}, {}] lat [{}, {}]",
            self.min_lon, self.max_lon, self.min_lat, self.max_lat
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_swaps_inverted_bounds() {
        let bbox = BoundingBox::new(-71.0, -72.0, 42.1, 42.0);
        assert_eq!(bbox, BoundingBox::new(-72.0, -71.0, 42.0, 42.1));
        assert_eq!(bbox.min_lon, -72.0);
        assert_eq!(bbox.max_lat, 42.1);
    }

    #[test]
    fn test_contains_is_closed() {
        let bbox = BoundingBox::new(0.0, 1.0, 0.0, 1.0);
        assert!(bbox.contains(&Position::new(0.0, 0.0)));
        assert!(bbox.contains(&Position::new(1.0, 1.0)));
        assert!(!bbox.contains(&Position::new(1.0000001, 0.5)));
    }

    #[test]
    fn test_covering() {
        let points = [
            Position::new(3.0, -1.0),
            Position::new(-2.0, 4.0),
            Position::new(0.5, 0.5),
        ];
        let bbox = BoundingBox::covering(&points).unwrap();
        assert_eq!(bbox, BoundingBox::new(-2.0, 3.0, -1.0, 4.0));
        assert!(BoundingBox::covering(std::iter::empty::<&Position>()).is_none());
    }

    #[test]
    fn test_intersects_touching_edges() {
        let a = BoundingBox::new(0.0, 1.0, 0.0, 1.0);
        let b = BoundingBox::new(1.0, 2.0, 1.0, 2.0);
        let c = BoundingBox::new(1.5, 2.0, 0.0, 1.0);
        assert!(a.intersects(&b));
        assert!(!a.intersects(&c));
        assert!(BoundingBox::WORLD.intersects(&a));
    }
}
