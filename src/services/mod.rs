// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - extraction and rendering pipeline.

pub mod dataset;
pub mod filter;
pub mod geocoder;
pub mod map_export;
pub mod output_paths;
pub mod pipeline;
pub mod projector;
pub mod rasterizer;
pub mod retry;
pub mod spacing;

pub use geocoder::{Geocoder, NominatimGeocoder};
pub use pipeline::{QueryPipeline, QueryReport, VectorOutcome};
pub use projector::CoordinateProjector;
pub use rasterizer::{RenderOptions, RenderOutcome, VectorDrawing};
