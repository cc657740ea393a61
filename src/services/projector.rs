// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Search-region construction and coordinate reprojection.
//!
//! Geographic datasets get a buffer built directly in degree space with a
//! fixed meters-per-degree factor. This is an approximation: east-west
//! distortion grows with latitude and with the radius. Projected datasets
//! get the query point transformed into the dataset CRS (`proj4rs`) and an
//! exact buffer in meters.

use crate::config::ProjectionConfig;
use crate::models::{Crs, CrsKind, FeatureCollection, GeoPoint, SearchRegion};
use geo::{Coord, LineString, MapCoords, Polygon};
use proj4rs::proj::Proj;
use std::f64::consts::TAU;

/// Builds search regions in the CRS of the dataset being queried.
#[derive(Debug, Clone, Copy, Default)]
pub struct CoordinateProjector {
    config: ProjectionConfig,
}

impl CoordinateProjector {
    pub fn new(config: ProjectionConfig) -> Self {
        Self { config }
    }

    /// Build a circular buffer of `radius_miles` around `point`, expressed in `target`.
    pub fn resolve_region(
        &self,
        point: GeoPoint,
        radius_miles: f64,
        target: &Crs,
    ) -> Result<SearchRegion, ProjectionError> {
        let radius_meters = radius_miles * self.config.miles_to_meters;

        let (center, radius) = match target.kind() {
            CrsKind::Geographic => {
                let degrees = radius_meters / self.config.meters_per_degree;
                let center = if target.epsg() == crate::models::crs::WGS84_EPSG {
                    Coord {
                        x: point.lon,
                        y: point.lat,
                    }
                } else {
                    self.transform_coord(&Crs::wgs84(), target, point.lon, point.lat)?
                };
                (center, degrees)
            }
            CrsKind::Projected => {
                let center =
                    self.transform_coord(&Crs::wgs84(), target, point.lon, point.lat)?;
                (center, radius_meters)
            }
        };

        let polygon = circle(center, radius, self.config.buffer_segments);
        tracing::debug!(
            crs = %target,
            center_x = center.x,
            center_y = center.y,
            radius,
            "Resolved search region"
        );

        Ok(SearchRegion {
            crs: *target,
            center,
            radius,
            polygon,
        })
    }

    /// Reproject a whole collection into WGS84 longitude/latitude.
    pub fn to_wgs84(
        &self,
        collection: &FeatureCollection,
    ) -> Result<FeatureCollection, ProjectionError> {
        let wgs84 = Crs::wgs84();
        if collection.crs == wgs84 {
            return Ok(collection.clone());
        }

        let src = build_proj(&collection.crs)?;
        let dst = build_proj(&wgs84)?;

        let features = collection
            .features
            .iter()
            .map(|feature| {
                let geometry = feature.geometry.try_map_coords(|c| {
                    transform_with(&src, &collection.crs, &dst, &wgs84, c.x, c.y)
                })?;
                Ok(crate::models::Feature {
                    geometry,
                    properties: feature.properties.clone(),
                })
            })
            .collect::<Result<Vec<_>, ProjectionError>>()?;

        Ok(FeatureCollection::new(wgs84, features))
    }

    fn transform_coord(
        &self,
        from: &Crs,
        to: &Crs,
        x: f64,
        y: f64,
    ) -> Result<Coord<f64>, ProjectionError> {
        let src = build_proj(from)?;
        let dst = build_proj(to)?;
        transform_with(&src, from, &dst, to, x, y)
    }
}

fn build_proj(crs: &Crs) -> Result<Proj, ProjectionError> {
    Proj::from_proj_string(crs.proj4()).map_err(|e| ProjectionError::UnsupportedCrs {
        crs: crs.to_string(),
        reason: e.to_string(),
    })
}

/// proj4rs works in radians for angular systems and native units otherwise.
fn transform_with(
    src: &Proj,
    from: &Crs,
    dst: &Proj,
    to: &Crs,
    x: f64,
    y: f64,
) -> Result<Coord<f64>, ProjectionError> {
    let mut point = if from.is_geographic() {
        (x.to_radians(), y.to_radians(), 0.0)
    } else {
        (x, y, 0.0)
    };

    proj4rs::transform::transform(src, dst, &mut point).map_err(|e| {
        ProjectionError::Transform {
            from: from.to_string(),
            to: to.to_string(),
            reason: e.to_string(),
        }
    })?;

    let (out_x, out_y) = if to.is_geographic() {
        (point.0.to_degrees(), point.1.to_degrees())
    } else {
        (point.0, point.1)
    };

    if !out_x.is_finite() || !out_y.is_finite() {
        return Err(ProjectionError::Transform {
            from: from.to_string(),
            to: to.to_string(),
            reason: format!("non-finite result for ({x}, {y})"),
        });
    }
    Ok(Coord { x: out_x, y: out_y })
}

/// Regular polygon approximating a circle. The ring is closed.
pub fn circle(center: Coord<f64>, radius: f64, segments: usize) -> Polygon<f64> {
    let segments = segments.max(4);
    let ring: Vec<Coord<f64>> = (0..=segments)
        .map(|i| {
            let angle = TAU * (i % segments) as f64 / segments as f64;
            Coord {
                x: center.x + radius * angle.cos(),
                y: center.y + radius * angle.sin(),
            }
        })
        .collect();
    Polygon::new(LineString::from(ring), vec![])
}

/// Errors from region construction and reprojection.
#[derive(Debug, thiserror::Error)]
pub enum ProjectionError {
    #[error("Unsupported CRS {crs}: {reason}")]
    UnsupportedCrs { crs: String, reason: String },

    #[error("Failed to transform coordinates from {from} to {to}: {reason}")]
    Transform {
        from: String,
        to: String,
        reason: String,
    },
}
