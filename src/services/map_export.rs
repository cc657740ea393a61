// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Interactive map export.
//!
//! Writes a single HTML page with a Leaflet base map and the features as an
//! embedded GeoJSON layer. Web maps are degree-based, so projected
//! collections are reprojected to WGS84 first. This is also the fallback
//! output when SVG rendering fails.

use crate::config::MapConfig;
use crate::models::FeatureCollection;
use crate::services::projector::{CoordinateProjector, ProjectionError};
use chrono::{SecondsFormat, Utc};
use std::fs;
use std::path::Path;

const LEAFLET_VERSION: &str = "1.9.4";

/// Reproject `collection` to WGS84 and write it as an HTML map at `path`.
pub fn export_map<P: AsRef<Path>>(
    collection: &FeatureCollection,
    path: P,
    config: &MapConfig,
    projector: &CoordinateProjector,
) -> Result<(), MapExportError> {
    let path = path.as_ref();
    let wgs84 = projector.to_wgs84(collection)?;
    let html = render_html(&wgs84, config)?;

    fs::write(path, html).map_err(|e| MapExportError::Io {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    tracing::info!(path = %path.display(), features = collection.len(), "HTML map written");
    Ok(())
}

/// Build the HTML page for a collection that is already in WGS84.
pub fn render_html(
    collection: &FeatureCollection,
    config: &MapConfig,
) -> Result<String, MapExportError> {
    let (center_lat, center_lon) = match collection.bounding_box() {
        Some(bbox) => (
            (bbox.min_y + bbox.max_y) / 2.0,
            (bbox.min_x + bbox.max_x) / 2.0,
        ),
        None => (config.default_center.lat, config.default_center.lon),
    };

    let geojson = to_geojson(collection)?;
    let generated = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);

    Ok(format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<meta name="generated" content="{generated}">
<title>Street Data</title>
<link rel="stylesheet" href="https://unpkg.com/leaflet@{LEAFLET_VERSION}/dist/leaflet.css">
<script src="https://unpkg.com/leaflet@{LEAFLET_VERSION}/dist/leaflet.js"></script>
<style>html, body, #map {{ height: 100%; margin: 0; }}</style>
</head>
<body>
<div id="map"></div>
<script>
var map = L.map("map").setView([{center_lat}, {center_lon}], {zoom});
L.tileLayer("https://tile.openstreetmap.org/{{z}}/{{x}}/{{y}}.png", {{
  maxZoom: 19,
  attribution: "&copy; OpenStreetMap contributors"
}}).addTo(map);
var streetData = {geojson};
L.geoJSON(streetData, {{
  style: function () {{ return {{ color: "{color}", weight: {weight} }}; }}
}}).bindPopup(function (layer) {{
  return JSON.stringify(layer.feature.properties);
}}).addTo(map);
</script>
</body>
</html>
"#,
        zoom = config.zoom,
        color = config.color,
        weight = config.weight,
    ))
}

/// Serialize features as a GeoJSON FeatureCollection safe to inline in a `<script>`.
fn to_geojson(collection: &FeatureCollection) -> Result<String, MapExportError> {
    let features = collection
        .features
        .iter()
        .map(|f| geojson::Feature {
            bbox: None,
            geometry: Some(geojson::Geometry::new(geojson::Value::from(&f.geometry))),
            id: None,
            properties: Some(f.properties.clone()),
            foreign_members: None,
        })
        .collect();

    let fc = geojson::FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    };
    let json =
        serde_json::to_string(&fc).map_err(|e| MapExportError::Serialize(e.to_string()))?;
    Ok(json.replace("</", "<\\/"))
}

/// Errors from map export.
#[derive(Debug, thiserror::Error)]
pub enum MapExportError {
    #[error(transparent)]
    Projection(#[from] ProjectionError),

    #[error("Failed to serialize GeoJSON: {0}")]
    Serialize(String),

    #[error("Failed to write map to {path}: {reason}")]
    Io { path: String, reason: String },
}
