// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Spatial filtering of feature collections against a search region.

use crate::models::{FeatureCollection, SearchRegion};
use geo::Intersects;

/// Keep every feature whose geometry intersects the region polygon.
///
/// Touching the boundary and full containment both count. Surviving
/// features keep their relative order; the input is not modified.
pub fn filter(
    collection: &FeatureCollection,
    region: &SearchRegion,
) -> Result<FeatureCollection, FilterError> {
    if collection.crs != region.crs {
        return Err(FilterError::CrsMismatch {
            collection: collection.crs.to_string(),
            region: region.crs.to_string(),
        });
    }

    let features: Vec<_> = collection
        .features
        .iter()
        .filter(|f| f.geometry.intersects(&region.polygon))
        .cloned()
        .collect();

    tracing::info!(
        original = collection.len(),
        filtered = features.len(),
        crs = %collection.crs,
        "Filtered features by search region"
    );

    Ok(FeatureCollection::new(collection.crs, features))
}

/// Errors from spatial filtering.
#[derive(Debug, thiserror::Error)]
pub enum FilterError {
    /// The region and the collection were built in different CRSs. This is
    /// a wiring bug, never a data condition.
    #[error("CRS mismatch: collection is {collection}, search region is {region}")]
    CrsMismatch { collection: String, region: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Crs, Feature};
    use crate::services::projector::circle;
    use geo::{line_string, point, Coord};

    fn region(crs: Crs) -> SearchRegion {
        let center = Coord { x: 0.0, y: 0.0 };
        SearchRegion {
            crs,
            center,
            radius: 10.0,
            polygon: circle(center, 10.0, 64),
        }
    }

    #[test]
    fn test_keeps_crossing_and_contained_features_in_order() {
        let collection = FeatureCollection::new(
            Crs::wgs84(),
            vec![
                Feature::new(line_string![(x: -20.0, y: 0.0), (x: 20.0, y: 0.0)])
                    .with_property("id", 1),
                Feature::new(line_string![(x: 50.0, y: 50.0), (x: 60.0, y: 60.0)])
                    .with_property("id", 2),
                Feature::new(point!(x: 1.0, y: 1.0)).with_property("id", 3),
            ],
        );

        let result = filter(&collection, &region(Crs::wgs84())).unwrap();
        let ids: Vec<_> = result
            .features
            .iter()
            .map(|f| f.properties["id"].as_i64().unwrap())
            .collect();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(collection.len(), 3, "source must not be mutated");
    }

    #[test]
    fn test_boundary_touch_counts() {
        // The buffer vertex at angle 0 sits exactly on (10, 0).
        let collection = FeatureCollection::new(
            Crs::wgs84(),
            vec![Feature::new(
                line_string![(x: 10.0, y: -5.0), (x: 10.0, y: 5.0)],
            )],
        );
        let result = filter(&collection, &region(Crs::wgs84())).unwrap();
        assert_eq!(result.len(), 1);
    }

    #[test]
    fn test_empty_result_is_ok() {
        let collection = FeatureCollection::new(
            Crs::wgs84(),
            vec![Feature::new(point!(x: 100.0, y: 100.0))],
        );
        let result = filter(&collection, &region(Crs::wgs84())).unwrap();
        assert!(result.is_empty());
        assert_eq!(result.crs, Crs::wgs84());
    }

    #[test]
    fn test_crs_mismatch_is_rejected() {
        let collection = FeatureCollection::empty(Crs::wgs84());
        let utm = Crs::from_epsg(32618).unwrap();
        let err = filter(&collection, &region(utm)).unwrap_err();
        assert!(matches!(err, FilterError::CrsMismatch { .. }));
        assert!(err.to_string().contains("EPSG:32618"));
    }
}
