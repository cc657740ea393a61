// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Vector features and feature collections.

use super::crs::Crs;
use geo::{BoundingRect, Geometry, Rect};
use serde_json::{Map, Value};

/// One geometric record of a dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    pub geometry: Geometry<f64>,
    /// Attribute fields carried through unchanged.
    pub properties: Map<String, Value>,
}

impl Feature {
    pub fn new(geometry: impl Into<Geometry<f64>>) -> Self {
        Self {
            geometry: geometry.into(),
            properties: Map::new(),
        }
    }

    pub fn with_property(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.properties.insert(key.to_string(), value.into());
        self
    }

    /// Geometry kind name, as used in logs and census output.
    pub fn kind_name(&self) -> &'static str {
        geometry_kind_name(&self.geometry)
    }
}

/// An ordered set of features that share one CRS.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureCollection {
    pub crs: Crs,
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    pub fn new(crs: Crs, features: Vec<Feature>) -> Self {
        Self { crs, features }
    }

    pub fn empty(crs: Crs) -> Self {
        Self::new(crs, Vec::new())
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Combined extent of every feature, or `None` when nothing has coordinates.
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        self.features
            .iter()
            .filter_map(|f| f.geometry.bounding_rect())
            .map(BoundingBox::from)
            .reduce(|acc, bbox| acc.union(&bbox))
    }

    /// Count features per geometry kind, in first-seen order.
    pub fn kind_counts(&self) -> Vec<(&'static str, usize)> {
        let mut counts: Vec<(&'static str, usize)> = Vec::new();
        for feature in &self.features {
            let kind = feature.kind_name();
            match counts.iter_mut().find(|(k, _)| *k == kind) {
                Some((_, n)) => *n += 1,
                None => counts.push((kind, 1)),
            }
        }
        counts
    }
}

/// Axis-aligned extent `(min_x, min_y, max_x, max_y)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Zero width or zero height. Such an extent cannot be scaled onto a canvas.
    pub fn is_degenerate(&self) -> bool {
        self.width() == 0.0 || self.height() == 0.0
    }

    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        BoundingBox {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }
}

impl From<Rect<f64>> for BoundingBox {
    fn from(rect: Rect<f64>) -> Self {
        BoundingBox {
            min_x: rect.min().x,
            min_y: rect.min().y,
            max_x: rect.max().x,
            max_y: rect.max().y,
        }
    }
}

pub fn geometry_kind_name(geometry: &Geometry<f64>) -> &'static str {
    match geometry {
        Geometry::Point(_) => "Point",
        Geometry::Line(_) => "Line",
        Geometry::LineString(_) => "LineString",
        Geometry::Polygon(_) => "Polygon",
        Geometry::MultiPoint(_) => "MultiPoint",
        Geometry::MultiLineString(_) => "MultiLineString",
        Geometry::MultiPolygon(_) => "MultiPolygon",
        Geometry::GeometryCollection(_) => "GeometryCollection",
        Geometry::Rect(_) => "Rect",
        Geometry::Triangle(_) => "Triangle",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{line_string, point};

    #[test]
    fn test_bounding_box_spans_all_features() {
        let collection = FeatureCollection::new(
            Crs::wgs84(),
            vec![
                Feature::new(line_string![(x: 0.0, y: 0.0), (x: 2.0, y: 1.0)]),
                Feature::new(point!(x: -1.0, y: 5.0)),
            ],
        );

        let bbox = collection.bounding_box().unwrap();
        assert_eq!(bbox.min_x, -1.0);
        assert_eq!(bbox.min_y, 0.0);
        assert_eq!(bbox.max_x, 2.0);
        assert_eq!(bbox.max_y, 5.0);
        assert!(!bbox.is_degenerate());
    }

    #[test]
    fn test_bounding_box_empty_collection() {
        assert!(FeatureCollection::empty(Crs::wgs84())
            .bounding_box()
            .is_none());
    }

    #[test]
    fn test_horizontal_line_is_degenerate() {
        let collection = FeatureCollection::new(
            Crs::wgs84(),
            vec![Feature::new(
                line_string![(x: 0.0, y: 3.0), (x: 4.0, y: 3.0)],
            )],
        );
        assert!(collection.bounding_box().unwrap().is_degenerate());
    }

    #[test]
    fn test_kind_counts() {
        let collection = FeatureCollection::new(
            Crs::wgs84(),
            vec![
                Feature::new(line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 1.0)]),
                Feature::new(point!(x: 0.0, y: 0.0)),
                Feature::new(line_string![(x: 1.0, y: 0.0), (x: 1.0, y: 1.0)]),
            ],
        );
        assert_eq!(
            collection.kind_counts(),
            vec![("LineString", 2), ("Point", 1)]
        );
    }
}
