// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Query-level error type.
//!
//! Service errors are folded into the variants a caller acts on: missing
//! dataset, unresolvable address, CRS problems. Rendering errors never
//! appear here because the pipeline turns them into the map fallback.

use crate::services::dataset::DatasetError;
use crate::services::filter::FilterError;
use crate::services::geocoder::GeocodeError;
use crate::services::map_export::MapExportError;
use crate::services::projector::ProjectionError;

/// Errors that terminate a single query.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Data file not found: {0}")]
    DatasetNotFound(String),

    #[error("Dataset error: {0}")]
    Dataset(String),

    #[error("Could not find address {address:?}: {reason}")]
    AddressNotFound { address: String, reason: String },

    /// Search region and dataset disagree on CRS. Indicates a wiring bug.
    #[error("{0}")]
    CrsMismatch(String),

    #[error("Unsupported CRS: {0}")]
    UnsupportedCrs(String),

    #[error("Projection error: {0}")]
    Projection(String),

    #[error("Failed to write output: {0}")]
    Output(String),
}

impl AppError {
    /// Build the address error from the last geocoding failure.
    pub fn address_not_found(address: &str, err: &GeocodeError) -> Self {
        AppError::AddressNotFound {
            address: address.to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<DatasetError> for AppError {
    fn from(err: DatasetError) -> Self {
        match err {
            DatasetError::NotFound(path) => AppError::DatasetNotFound(path),
            DatasetError::UnsupportedCrs(e) => AppError::UnsupportedCrs(e.to_string()),
            other => AppError::Dataset(other.to_string()),
        }
    }
}

impl From<ProjectionError> for AppError {
    fn from(err: ProjectionError) -> Self {
        match err {
            ProjectionError::UnsupportedCrs { .. } => AppError::UnsupportedCrs(err.to_string()),
            ProjectionError::Transform { .. } => AppError::Projection(err.to_string()),
        }
    }
}

impl From<FilterError> for AppError {
    fn from(err: FilterError) -> Self {
        match err {
            FilterError::CrsMismatch { .. } => AppError::CrsMismatch(err.to_string()),
        }
    }
}

impl From<MapExportError> for AppError {
    fn from(err: MapExportError) -> Self {
        match err {
            MapExportError::Projection(e) => e.into(),
            other => AppError::Output(other.to_string()),
        }
    }
}

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, AppError>;
