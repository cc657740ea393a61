// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use geo::{Coord, LineString};
use serde_json::json;
use std::path::{Path, PathBuf};
use street_extract::config::Config;
use street_extract::models::{Crs, Feature, FeatureCollection, GeoPoint};
use street_extract::services::geocoder::{GeocodeError, Geocoder};
use street_extract::services::CoordinateProjector;

/// Geocoder that always answers with the same point.
#[allow(dead_code)]
pub struct FixedGeocoder(pub GeoPoint);

impl Geocoder for FixedGeocoder {
    async fn geocode(&self, _address: &str) -> Result<GeoPoint, GeocodeError> {
        Ok(self.0)
    }
}

/// A line feature with an `id` attribute.
#[allow(dead_code)]
pub fn line(id: i64, coords: &[(f64, f64)]) -> Feature {
    Feature::new(LineString::from(coords.to_vec())).with_property("id", id)
}

/// The `id` attributes of a collection, in order.
#[allow(dead_code)]
pub fn ids(collection: &FeatureCollection) -> Vec<i64> {
    collection
        .features
        .iter()
        .map(|f| f.properties["id"].as_i64().expect("feature id"))
        .collect()
}

/// Center of the default search region for `point` in `crs`.
#[allow(dead_code)]
pub fn projected_center(point: GeoPoint, crs: &Crs) -> Coord<f64> {
    CoordinateProjector::default()
        .resolve_region(point, 1.0, crs)
        .expect("region")
        .center
}

/// Write a collection as a GeoJSON file with a named `crs` member.
#[allow(dead_code)]
pub fn write_dataset(dir: &Path, name: &str, collection: &FeatureCollection) -> PathBuf {
    let features: Vec<_> = collection
        .features
        .iter()
        .map(|f| {
            json!({
                "type": "Feature",
                "properties": f.properties,
                "geometry": geojson::Geometry::new(geojson::Value::from(&f.geometry)),
            })
        })
        .collect();
    let doc = json!({
        "type": "FeatureCollection",
        "crs": {"type": "name", "properties": {"name": collection.crs.to_string()}},
        "features": features,
    });

    let path = dir.join(name);
    std::fs::write(&path, doc.to_string()).expect("write dataset");
    path
}

/// Config pointing both datasets at the given files.
#[allow(dead_code)]
pub fn config_with(traffic: PathBuf, pedestrian: PathBuf) -> Config {
    Config {
        traffic_dataset: traffic,
        pedestrian_dataset: pedestrian,
        ..Config::default()
    }
}

/// Parse `points="..."` attributes out of an SVG string.
#[allow(dead_code)]
pub fn svg_polylines(svg: &str) -> Vec<Vec<(f64, f64)>> {
    svg.split("points=\"")
        .skip(1)
        .map(|rest| {
            let attr = &rest[..rest.find('"').expect("closing quote")];
            attr.split_whitespace()
                .map(|pair| {
                    let (x, y) = pair.split_once(',').expect("x,y pair");
                    (x.parse().expect("x"), y.parse().expect("y"))
                })
                .collect()
        })
        .collect()
}

#[allow(dead_code)]
pub fn assert_close(actual: &[(f64, f64)], expected: &[(f64, f64)]) {
    assert_eq!(actual.len(), expected.len(), "{actual:?} vs {expected:?}");
    for (a, e) in actual.iter().zip(expected) {
        assert!(
            (a.0 - e.0).abs() < 1e-6 && (a.1 - e.1).abs() < 1e-6,
            "{actual:?} vs {expected:?}"
        );
    }
}
