// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Query orchestration.
//!
//! Handles the core workflow:
//! 1. Validate the request and load the dataset for its data type
//! 2. Geocode the address (bounded retry)
//! 3. Build the search region in the dataset CRS and filter
//! 4. Write the requested outputs, falling back to the HTML map when the
//!    SVG cannot be rendered

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::models::{DataType, FeatureCollection, GeoPoint, QueryRequest};
use crate::services::geocoder::{resolve_address, Geocoder};
use crate::services::projector::CoordinateProjector;
use crate::services::rasterizer::{self, RenderOptions, RenderOutcome};
use crate::services::{dataset, filter, map_export, output_paths, spacing};
use std::path::{Path, PathBuf};

/// Runs extraction queries against the configured datasets.
pub struct QueryPipeline<G> {
    config: Config,
    projector: CoordinateProjector,
    geocoder: G,
}

/// What happened to a requested SVG.
#[derive(Debug, Clone, PartialEq)]
pub enum VectorOutcome {
    Written(PathBuf),
    /// No line or polygon geometry; no file written.
    NothingToDraw,
    /// Rendering failed and an HTML map was written instead.
    FellBack { path: PathBuf, reason: String },
}

/// Summary of one completed query.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryReport {
    pub point: GeoPoint,
    pub total_features: usize,
    pub matched_features: usize,
    pub map: Option<PathBuf>,
    pub vector: Option<VectorOutcome>,
}

impl<G: Geocoder> QueryPipeline<G> {
    pub fn new(config: Config, geocoder: G) -> Self {
        let projector = CoordinateProjector::new(config.projection);
        Self {
            config,
            projector,
            geocoder,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run a full query: load, geocode, filter, export.
    pub async fn run(&self, request: &QueryRequest) -> Result<QueryReport> {
        validate(request)?;
        tracing::info!(
            address = %request.address,
            radius_miles = request.radius_miles,
            data_type = %request.data_type,
            "Processing query"
        );

        let collection = dataset::load_from_file(self.config.dataset_path(request.data_type))?;

        let point = resolve_address(
            &self.geocoder,
            &request.address,
            self.config.geocoder.attempts,
        )
        .await
        .map_err(|e| AppError::address_not_found(&request.address, &e))?;

        let data = self.extract(&collection, point, request.radius_miles)?;

        let mut report = QueryReport {
            point,
            total_features: collection.len(),
            matched_features: data.len(),
            map: None,
            vector: None,
        };

        if data.is_empty() {
            tracing::info!(
                data_type = %request.data_type,
                radius_miles = request.radius_miles,
                address = %request.address,
                "No data found within radius"
            );
            return Ok(report);
        }

        let paths = output_paths::resolve(request.export_path.as_deref(), request.data_type);

        if request.output_format.wants_map() {
            self.export_map(&data, &paths.html)?;
            report.map = Some(paths.html.clone());
        }
        if request.output_format.wants_vector() {
            report.vector = Some(self.export_vector(&data, request.data_type, &paths.svg)?);
        }

        Ok(report)
    }

    /// Filter `collection` to the features within `radius_miles` of `point`.
    pub fn extract(
        &self,
        collection: &FeatureCollection,
        point: GeoPoint,
        radius_miles: f64,
    ) -> Result<FeatureCollection> {
        let region = self
            .projector
            .resolve_region(point, radius_miles, &collection.crs)?;
        let data = filter::filter(collection, &region)?;

        for (kind, count) in data.kind_counts() {
            tracing::info!(kind, count, "Filtered geometry kind");
        }
        Ok(data)
    }

    pub fn export_map(&self, data: &FeatureCollection, path: &Path) -> Result<()> {
        map_export::export_map(data, path, &self.config.map, &self.projector)?;
        Ok(())
    }

    /// Render `data` to an SVG at `path`, or write the HTML map beside it on failure.
    ///
    /// Pedestrian data gets block spacing before the canvas is fitted.
    pub fn export_vector(
        &self,
        data: &FeatureCollection,
        data_type: DataType,
        path: &Path,
    ) -> Result<VectorOutcome> {
        let drawable = match data_type {
            DataType::Pedestrian => spacing::spread(data, self.config.spacing_ratio),
            DataType::Traffic => data.clone(),
        };
        let options = RenderOptions::for_data_type(&self.config.render, data_type);

        let rendered = rasterizer::render(&drawable, &options).and_then(|outcome| {
            match outcome {
                RenderOutcome::Drawing(drawing) => {
                    drawing.save(path)?;
                    Ok(VectorOutcome::Written(path.to_path_buf()))
                }
                RenderOutcome::NothingToDraw => Ok(VectorOutcome::NothingToDraw),
            }
        });

        match rendered {
            Ok(outcome) => Ok(outcome),
            Err(err) => {
                let fallback = output_paths::fallback_html(path);
                tracing::warn!(
                    error = %err,
                    fallback = %fallback.display(),
                    "SVG generation failed, writing HTML map instead"
                );
                self.export_map(data, &fallback)?;
                Ok(VectorOutcome::FellBack {
                    path: fallback,
                    reason: err.to_string(),
                })
            }
        }
    }
}

fn validate(request: &QueryRequest) -> Result<()> {
    if request.address.trim().is_empty() {
        return Err(AppError::InvalidRequest(
            "address cannot be empty".to_string(),
        ));
    }
    if !(request.radius_miles.is_finite() && request.radius_miles > 0.0) {
        return Err(AppError::InvalidRequest(format!(
            "radius must be greater than 0, got {}",
            request.radius_miles
        )));
    }
    Ok(())
}
