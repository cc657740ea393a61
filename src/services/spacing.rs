// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Block spacing for polygon (sidewalk) datasets.
//!
//! Each feature is pushed away from the dataset center by `ratio` times its
//! own offset from that center, which opens visible gaps between densely
//! packed blocks. The center is the unweighted mean of per-feature
//! centroids, not the centroid of the union, so a small block pulls on it as
//! much as a large one.
//!
//! The bounding box grows as a result, so this must run before any canvas
//! transform is computed.

use crate::models::{Feature, FeatureCollection};
use geo::{Centroid, Coord, Translate};

/// Translate every feature by `(centroid - global_centroid) * ratio`.
///
/// Features without a centroid (empty geometry) are left in place and do
/// not contribute to the global centroid.
pub fn spread(collection: &FeatureCollection, ratio: f64) -> FeatureCollection {
    let centroids: Vec<Option<Coord<f64>>> = collection
        .features
        .iter()
        .map(|f| f.geometry.centroid().map(|p| p.0))
        .collect();

    let Some(global) = mean(centroids.iter().flatten()) else {
        return collection.clone();
    };

    let features = collection
        .features
        .iter()
        .zip(&centroids)
        .map(|(feature, centroid)| match centroid {
            Some(c) => Feature {
                geometry: feature
                    .geometry
                    .translate((c.x - global.x) * ratio, (c.y - global.y) * ratio),
                properties: feature.properties.clone(),
            },
            None => feature.clone(),
        })
        .collect();

    tracing::debug!(
        count = collection.len(),
        ratio,
        global_x = global.x,
        global_y = global.y,
        "Spread blocks away from global centroid"
    );

    FeatureCollection::new(collection.crs, features)
}

fn mean<'a>(coords: impl Iterator<Item = &'a Coord<f64>>) -> Option<Coord<f64>> {
    let (sum, n) = coords.fold((Coord { x: 0.0, y: 0.0 }, 0usize), |(sum, n), c| {
        (sum + *c, n + 1)
    });
    (n > 0).then(|| sum / n as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Crs;
    use geo::{polygon, Point};

    fn square(x: f64, y: f64, size: f64) -> Feature {
        Feature::new(polygon![
            (x: x, y: y),
            (x: x + size, y: y),
            (x: x + size, y: y + size),
            (x: x, y: y + size),
            (x: x, y: y),
        ])
    }

    fn centroid(feature: &Feature) -> Point<f64> {
        feature.geometry.centroid().unwrap()
    }

    fn blocks() -> FeatureCollection {
        FeatureCollection::new(
            Crs::wgs84(),
            vec![
                square(0.0, 0.0, 2.0),
                square(10.0, 0.0, 2.0),
                square(0.0, 10.0, 2.0),
                square(10.0, 10.0, 2.0),
            ],
        )
    }

    #[test]
    fn test_zero_ratio_is_noop() {
        let input = blocks();
        assert_eq!(spread(&input, 0.0), input);
    }

    #[test]
    fn test_blocks_move_away_from_global_centroid() {
        let input = blocks();
        let output = spread(&input, 0.2);
        let global = Point::new(6.0, 6.0);

        for (before, after) in input.features.iter().zip(&output.features) {
            let d_before = (centroid(before) - global).0;
            let d_after = (centroid(after) - global).0;
            assert!(d_after.x.hypot(d_after.y) > d_before.x.hypot(d_before.y));
        }

        // (1,1) is offset (-5,-5) from (6,6): moves by (-1,-1).
        let moved = centroid(&output.features[0]);
        assert!((moved.x() - 0.0).abs() < 1e-12);
        assert!((moved.y() - 0.0).abs() < 1e-12);
    }

    #[test]
    fn test_global_centroid_is_unweighted_mean() {
        // A huge block and a tiny one: the mean of centroids is the midpoint,
        // so both move by the same magnitude.
        let input = FeatureCollection::new(
            Crs::wgs84(),
            vec![square(-50.0, -50.0, 100.0), square(99.5, -0.5, 1.0)],
        );
        let output = spread(&input, 1.0);

        // Centroids (0,0) and (100,0); mean (50,0).
        assert!((centroid(&output.features[0]).x() - -50.0).abs() < 1e-9);
        assert!((centroid(&output.features[1]).x() - 150.0).abs() < 1e-9);
    }

    #[test]
    fn test_feature_at_global_centroid_stays_put() {
        let input = FeatureCollection::new(Crs::wgs84(), vec![square(0.0, 0.0, 4.0)]);
        assert_eq!(spread(&input, 0.5), input);
    }

    #[test]
    fn test_empty_collection() {
        let input = FeatureCollection::empty(Crs::wgs84());
        assert!(spread(&input, 0.2).is_empty());
    }
}
