// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod crs;
pub mod feature;
pub mod query;

pub use crs::{Crs, CrsError, CrsKind};
pub use feature::{BoundingBox, Feature, FeatureCollection};
pub use query::{DataType, GeoPoint, OutputFormat, QueryRequest, SearchRegion};
