// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Query inputs: resolved points, search regions and user requests.

use super::crs::Crs;
use geo::Polygon;
use std::fmt;
use std::path::PathBuf;

/// A WGS84 longitude/latitude pair, in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub lon: f64,
    pub lat: f64,
}

impl GeoPoint {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }
}

/// Circular search buffer expressed in a specific CRS.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRegion {
    pub crs: Crs,
    /// Buffer center in `crs` coordinates.
    pub center: geo::Coord<f64>,
    /// Buffer radius in `crs` units (degrees or meters).
    pub radius: f64,
    pub polygon: Polygon<f64>,
}

/// Which dataset a query runs against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    /// Street centerlines (line geometry).
    Traffic,
    /// Sidewalk polygons.
    Pedestrian,
}

impl DataType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataType::Traffic => "traffic",
            DataType::Pedestrian => "pedestrian",
        }
    }

    /// Menu choice used by the interactive prompt (1 or 2).
    pub fn from_choice(choice: &str) -> Option<Self> {
        match choice.trim() {
            "1" => Some(DataType::Traffic),
            "2" => Some(DataType::Pedestrian),
            _ => None,
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Requested output artifacts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Map,
    Vector,
    Both,
}

impl OutputFormat {
    /// Menu choice used by the interactive prompt (1, 2 or 3).
    pub fn from_choice(choice: &str) -> Option<Self> {
        match choice.trim() {
            "1" => Some(OutputFormat::Map),
            "2" => Some(OutputFormat::Vector),
            "3" => Some(OutputFormat::Both),
            _ => None,
        }
    }

    pub fn wants_map(&self) -> bool {
        matches!(self, OutputFormat::Map | OutputFormat::Both)
    }

    pub fn wants_vector(&self) -> bool {
        matches!(self, OutputFormat::Vector | OutputFormat::Both)
    }
}

/// One extraction request.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryRequest {
    pub address: String,
    pub radius_miles: f64,
    pub data_type: DataType,
    pub output_format: OutputFormat,
    /// File base name, explicit file path, or directory. `None` uses defaults.
    pub export_path: Option<PathBuf>,
}
