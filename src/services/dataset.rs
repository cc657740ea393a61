// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Dataset loading from GeoJSON files.
//!
//! The collection CRS comes from the legacy GeoJSON `crs` member when it is
//! present, and defaults to WGS84 otherwise.

use crate::models::{Crs, CrsError, Feature, FeatureCollection};
use geojson::{GeoJson, JsonObject};
use std::fs;
use std::path::Path;

/// Load a feature collection from a GeoJSON file.
pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<FeatureCollection, DatasetError> {
    let path = path.as_ref();
    tracing::info!(path = %path.display(), "Reading dataset");

    if !path.exists() {
        return Err(DatasetError::NotFound(path.display().to_string()));
    }
    let json_data =
        fs::read_to_string(path).map_err(|e| DatasetError::IoError(e.to_string()))?;
    load_from_json(&json_data)
}

/// Load a feature collection from a GeoJSON string.
pub fn load_from_json(json_data: &str) -> Result<FeatureCollection, DatasetError> {
    let geojson: GeoJson = json_data
        .parse()
        .map_err(|e: geojson::Error| DatasetError::ParseError(e.to_string()))?;

    let GeoJson::FeatureCollection(collection) = geojson else {
        return Err(DatasetError::ParseError(
            "expected a FeatureCollection".to_string(),
        ));
    };

    let crs = match collection.foreign_members.as_ref() {
        Some(members) => crs_from_members(members)?,
        None => Crs::wgs84(),
    };

    let mut features = Vec::with_capacity(collection.features.len());
    let mut skipped = 0usize;
    for feature in collection.features {
        // Features without geometry cannot be queried spatially.
        let Some(geom) = feature.geometry else {
            skipped += 1;
            continue;
        };
        let geometry = geo::Geometry::<f64>::try_from(geom.value)
            .map_err(|e| DatasetError::UnsupportedGeometry(e.to_string()))?;
        features.push(Feature {
            geometry,
            properties: feature.properties.unwrap_or_default(),
        });
    }

    tracing::info!(count = features.len(), skipped, crs = %crs, "Loaded dataset");
    Ok(FeatureCollection::new(crs, features))
}

/// Read the CRS from a `crs` foreign member.
///
/// Both the named form (`{"type": "name", "properties": {"name": "EPSG:2263"}}`)
/// and the older EPSG form (`{"type": "EPSG", "properties": {"code": 2263}}`)
/// are understood.
fn crs_from_members(members: &JsonObject) -> Result<Crs, DatasetError> {
    let Some(crs) = members.get("crs") else {
        return Ok(Crs::wgs84());
    };
    if crs.is_null() {
        return Ok(Crs::wgs84());
    }

    let properties = crs.get("properties");
    if let Some(name) = properties.and_then(|p| p.get("name")).and_then(|v| v.as_str()) {
        return Ok(Crs::parse(name)?);
    }
    if let Some(code) = properties.and_then(|p| p.get("code")).and_then(|v| v.as_u64()) {
        let code = u16::try_from(code).map_err(|_| CrsError::Unrecognized(code.to_string()))?;
        return Ok(Crs::from_epsg(code)?);
    }

    Err(DatasetError::UnsupportedCrs(CrsError::Unrecognized(
        crs.to_string(),
    )))
}

/// Errors from dataset operations.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("Data file not found: {0}")]
    NotFound(String),

    #[error("Failed to read file: {0}")]
    IoError(String),

    #[error("Failed to parse GeoJSON: {0}")]
    ParseError(String),

    #[error("Unsupported dataset CRS: {0}")]
    UnsupportedCrs(#[from] CrsError),

    #[error("Unsupported geometry: {0}")]
    UnsupportedGeometry(String),
}
