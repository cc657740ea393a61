// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.
//!
//! Every constant the pipeline depends on (unit conversions, canvas size,
//! stroke widths, geocoder retry policy) lives here and is passed down
//! explicitly, so tests can run the pipeline with any canvas or dataset.

use crate::models::{DataType, GeoPoint};
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// Meters in one statute mile.
pub const MILES_TO_METERS: f64 = 1609.34;

/// Approximate meters in one degree of latitude.
pub const METERS_PER_DEGREE: f64 = 111_000.0;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Street centerline dataset (GeoJSON)
    pub traffic_dataset: PathBuf,
    /// Sidewalk polygon dataset (GeoJSON)
    pub pedestrian_dataset: PathBuf,
    pub projection: ProjectionConfig,
    pub render: RenderConfig,
    pub map: MapConfig,
    pub geocoder: GeocoderConfig,
    /// Block spacing push-out ratio applied to pedestrian data.
    pub spacing_ratio: f64,
}

/// Search-region construction constants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectionConfig {
    pub miles_to_meters: f64,
    pub meters_per_degree: f64,
    /// Vertex count of the circular buffer polygon.
    pub buffer_segments: usize,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            miles_to_meters: MILES_TO_METERS,
            meters_per_degree: METERS_PER_DEGREE,
            buffer_segments: 64,
        }
    }
}

/// SVG canvas and stroke settings.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub margin: u32,
    /// Stroke width for line (traffic) datasets.
    pub narrow_stroke: u32,
    /// Stroke width for polygon (pedestrian) datasets.
    pub wide_stroke: u32,
    pub stroke_color: String,
}

impl RenderConfig {
    pub fn stroke_width(&self, data_type: DataType) -> u32 {
        match data_type {
            DataType::Traffic => self.narrow_stroke,
            DataType::Pedestrian => self.wide_stroke,
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            canvas_width: 1000,
            canvas_height: 1000,
            margin: 40,
            narrow_stroke: 1,
            wide_stroke: 2,
            stroke_color: "blue".to_string(),
        }
    }
}

/// Interactive map (HTML) export settings.
#[derive(Debug, Clone, PartialEq)]
pub struct MapConfig {
    /// Center used when the exported collection has no extent.
    pub default_center: GeoPoint,
    pub zoom: u8,
    pub color: String,
    pub weight: u32,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            default_center: GeoPoint::new(-74.0060, 40.7128),
            zoom: 13,
            color: "blue".to_string(),
            weight: 2,
        }
    }
}

/// Forward-geocoding service settings.
#[derive(Debug, Clone, PartialEq)]
pub struct GeocoderConfig {
    pub base_url: String,
    pub user_agent: String,
    pub timeout: Duration,
    pub attempts: u32,
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            base_url: "https://nominatim.openstreetmap.org".to_string(),
            user_agent: "street-extract".to_string(),
            timeout: Duration::from_secs(10),
            attempts: 3,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            traffic_dataset: PathBuf::from("data/centerline.geojson"),
            pedestrian_dataset: PathBuf::from("data/sidewalk.geojson"),
            projection: ProjectionConfig::default(),
            render: RenderConfig::default(),
            map: MapConfig::default(),
            geocoder: GeocoderConfig::default(),
            spacing_ratio: 0.2,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Unset variables fall back to the defaults; set-but-invalid numeric
    /// values are rejected.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let defaults = Config::default();
        let render_defaults = RenderConfig::default();
        let geocoder_defaults = GeocoderConfig::default();

        Ok(Self {
            traffic_dataset: env::var("TRAFFIC_DATASET_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.traffic_dataset),
            pedestrian_dataset: env::var("PEDESTRIAN_DATASET_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.pedestrian_dataset),
            projection: ProjectionConfig::default(),
            render: RenderConfig {
                canvas_width: parse_var("CANVAS_WIDTH", render_defaults.canvas_width)?,
                canvas_height: parse_var("CANVAS_HEIGHT", render_defaults.canvas_height)?,
                margin: parse_var("CANVAS_MARGIN", render_defaults.margin)?,
                ..render_defaults
            },
            map: MapConfig::default(),
            geocoder: GeocoderConfig {
                base_url: env::var("GEOCODER_URL").unwrap_or(geocoder_defaults.base_url),
                user_agent: env::var("GEOCODER_USER_AGENT")
                    .unwrap_or(geocoder_defaults.user_agent),
                timeout: Duration::from_secs(parse_var(
                    "GEOCODER_TIMEOUT_SECS",
                    geocoder_defaults.timeout.as_secs(),
                )?),
                attempts: parse_var("GEOCODER_ATTEMPTS", geocoder_defaults.attempts)?,
            },
            spacing_ratio: parse_var("BLOCK_SPACING_RATIO", defaults.spacing_ratio)?,
        })
    }

    /// Dataset file for a data type.
    pub fn dataset_path(&self, data_type: DataType) -> &PathBuf {
        match data_type {
            DataType::Traffic => &self.traffic_dataset,
            DataType::Pedestrian => &self.pedestrian_dataset,
        }
    }
}

fn parse_var<T: FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid(name, raw)),
        Err(_) => Ok(default),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable {0}: {1:?}")]
    Invalid(&'static str, String),
}
