// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Street-extract: pull street centerlines or sidewalk polygons around an
//! address and render them as a flat SVG drawing or an interactive map.
//!
//! The core is the spatial pipeline: build a search region in the dataset
//! CRS, intersect the dataset against it, and project the result onto a
//! fixed-size canvas.

pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
