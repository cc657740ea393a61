// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! SVG rendering of filtered features onto a fixed-size canvas.
//!
//! Dataset coordinates are mapped with one uniform scale (aspect ratio is
//! preserved) and a flipped Y axis, since canvas Y grows downward:
//!
//! ```text
//! svg_x = (x - min_x) * scale + margin
//! svg_y = (max_y - y) * scale + margin
//! ```
//!
//! Lines become open polylines. Polygons become one closed polyline of the
//! exterior ring; holes are not drawn.
//!
//! Rendering never writes a fallback itself. It returns a [`RasterError`]
//! and the caller decides what to do instead.

use crate::config::RenderConfig;
use crate::models::{BoundingBox, DataType, FeatureCollection};
use geo::{BoundingRect, Coord, Geometry, LineString, MultiLineString, MultiPolygon, Polygon};
use std::fs;
use std::path::Path;
use svg::node::element::Polyline;
use svg::Document;

/// Canvas and stroke settings for one render call.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub margin: u32,
    pub stroke_width: u32,
    pub stroke_color: String,
}

impl RenderOptions {
    /// Options for a dataset type: wide strokes for polygons, narrow for lines.
    pub fn for_data_type(config: &RenderConfig, data_type: DataType) -> Self {
        Self {
            canvas_width: config.canvas_width,
            canvas_height: config.canvas_height,
            margin: config.margin,
            stroke_width: config.stroke_width(data_type),
            stroke_color: config.stroke_color.clone(),
        }
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::for_data_type(&RenderConfig::default(), DataType::Traffic)
    }
}

/// Maps dataset coordinates onto the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasTransform {
    pub scale: f64,
    pub min_x: f64,
    pub max_y: f64,
    pub margin: f64,
}

impl CanvasTransform {
    /// Fit `extent` inside the margin-bounded canvas.
    pub fn fit(extent: &BoundingBox, options: &RenderOptions) -> Result<Self, RasterError> {
        let (width, height) = (extent.width(), extent.height());
        if !width.is_finite() || !height.is_finite() {
            return Err(RasterError::NonFiniteExtent);
        }
        if extent.is_degenerate() {
            return Err(RasterError::DegenerateExtent { width, height });
        }

        let margin = f64::from(options.margin);
        let usable_w = f64::from(options.canvas_width) - 2.0 * margin;
        let usable_h = f64::from(options.canvas_height) - 2.0 * margin;
        if usable_w <= 0.0 || usable_h <= 0.0 {
            return Err(RasterError::InvalidCanvas {
                width: options.canvas_width,
                height: options.canvas_height,
                margin: options.margin,
            });
        }

        Ok(Self {
            scale: (usable_w / width).min(usable_h / height),
            min_x: extent.min_x,
            max_y: extent.max_y,
            margin,
        })
    }

    pub fn apply(&self, c: Coord<f64>) -> (f64, f64) {
        (
            (c.x - self.min_x) * self.scale + self.margin,
            (self.max_y - c.y) * self.scale + self.margin,
        )
    }
}

/// Geometry kinds the rasterizer can draw.
#[derive(Debug, Clone, Copy)]
enum Drawable<'a> {
    Line(&'a LineString<f64>),
    MultiLine(&'a MultiLineString<f64>),
    Polygon(&'a Polygon<f64>),
    MultiPolygon(&'a MultiPolygon<f64>),
}

impl<'a> Drawable<'a> {
    fn from_geometry(geometry: &'a Geometry<f64>) -> Option<Self> {
        match geometry {
            Geometry::LineString(ls) => Some(Drawable::Line(ls)),
            Geometry::MultiLineString(mls) => Some(Drawable::MultiLine(mls)),
            Geometry::Polygon(p) => Some(Drawable::Polygon(p)),
            Geometry::MultiPolygon(mp) => Some(Drawable::MultiPolygon(mp)),
            Geometry::Point(_)
            | Geometry::Line(_)
            | Geometry::MultiPoint(_)
            | Geometry::GeometryCollection(_)
            | Geometry::Rect(_)
            | Geometry::Triangle(_) => None,
        }
    }

    fn bounding_box(&self) -> Option<BoundingBox> {
        let rect = match self {
            Drawable::Line(ls) => ls.bounding_rect(),
            Drawable::MultiLine(mls) => mls.bounding_rect(),
            Drawable::Polygon(p) => p.bounding_rect(),
            Drawable::MultiPolygon(mp) => mp.bounding_rect(),
        };
        rect.map(BoundingBox::from)
    }

    /// The point sequences to stroke, in dataset coordinates.
    fn paths(&self) -> Vec<&'a LineString<f64>> {
        match *self {
            Drawable::Line(ls) => vec![ls],
            Drawable::MultiLine(mls) => mls.0.iter().collect(),
            Drawable::Polygon(p) => vec![p.exterior()],
            Drawable::MultiPolygon(mp) => mp.0.iter().map(|p| p.exterior()).collect(),
        }
    }
}

/// A rendered drawing: one polyline per stroked path, in canvas units.
#[derive(Debug, Clone, PartialEq)]
pub struct VectorDrawing {
    pub width: u32,
    pub height: u32,
    pub stroke_width: u32,
    pub stroke_color: String,
    pub polylines: Vec<Vec<(f64, f64)>>,
}

impl VectorDrawing {
    /// Serialize as a standalone SVG document (no fill, no background).
    pub fn to_svg_string(&self) -> String {
        let mut doc = Document::new()
            .set("width", self.width)
            .set("height", self.height)
            .set("viewBox", (0, 0, self.width, self.height));

        for points in &self.polylines {
            let polyline = Polyline::new()
                .set("points", format_points(points))
                .set("fill", "none")
                .set("stroke", self.stroke_color.as_str())
                .set("stroke-width", self.stroke_width);
            doc = doc.add(polyline);
        }

        // The svg crate omits the XML declaration, so we prepend it.
        format!("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n{doc}\n")
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), RasterError> {
        fs::write(path.as_ref(), self.to_svg_string()).map_err(|e| RasterError::Io {
            path: path.as_ref().display().to_string(),
            reason: e.to_string(),
        })?;
        tracing::info!(
            path = %path.as_ref().display(),
            polylines = self.polylines.len(),
            "SVG file written"
        );
        Ok(())
    }
}

fn format_points(points: &[(f64, f64)]) -> String {
    points
        .iter()
        .map(|(x, y)| format!("{x},{y}"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Result of a successful render call.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderOutcome {
    Drawing(VectorDrawing),
    /// No line or polygon geometry survived; nothing was drawn.
    NothingToDraw,
}

/// Render the drawable features of `collection`.
pub fn render(
    collection: &FeatureCollection,
    options: &RenderOptions,
) -> Result<RenderOutcome, RasterError> {
    let drawables: Vec<Drawable<'_>> = collection
        .features
        .iter()
        .filter_map(|f| Drawable::from_geometry(&f.geometry))
        .collect();

    let skipped = collection.len() - drawables.len();
    if skipped > 0 {
        tracing::debug!(skipped, "Dropped features with non-drawable geometry");
    }

    let Some(extent) = drawables
        .iter()
        .filter_map(Drawable::bounding_box)
        .reduce(|acc, bbox| acc.union(&bbox))
    else {
        tracing::info!("No valid line or polygon data to draw");
        return Ok(RenderOutcome::NothingToDraw);
    };

    let transform = CanvasTransform::fit(&extent, options)?;

    let polylines: Vec<Vec<(f64, f64)>> = drawables
        .iter()
        .flat_map(Drawable::paths)
        .filter(|ls| ls.0.len() > 1)
        .map(|ls| ls.coords().map(|c| transform.apply(*c)).collect())
        .collect();

    Ok(RenderOutcome::Drawing(VectorDrawing {
        width: options.canvas_width,
        height: options.canvas_height,
        stroke_width: options.stroke_width,
        stroke_color: options.stroke_color.clone(),
        polylines,
    }))
}

/// Errors from rendering. All of them trigger the map fallback upstream.
#[derive(Debug, thiserror::Error)]
pub enum RasterError {
    #[error("Data extent is degenerate ({width} x {height}); cannot scale to canvas")]
    DegenerateExtent { width: f64, height: f64 },

    #[error("Data extent contains non-finite coordinates")]
    NonFiniteExtent,

    #[error("Canvas {width}x{height} leaves no room inside a {margin} margin")]
    InvalidCanvas { width: u32, height: u32, margin: u32 },

    #[error("Failed to write SVG to {path}: {reason}")]
    Io { path: String, reason: String },
}
