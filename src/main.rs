// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Street-extract interactive tool
//!
//! Prompts for an address and radius, extracts street or sidewalk features
//! around it, and writes an SVG drawing and/or an HTML map.

use anyhow::Context;
use std::io::{self, Write};
use street_extract::{
    cli,
    config::Config,
    services::{NominatimGeocoder, QueryPipeline, VectorOutcome},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Structured logs go to stderr; prompts own stdout
    init_logging().context("Failed to initialize logging")?;

    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!(
        traffic = %config.traffic_dataset.display(),
        pedestrian = %config.pedestrian_dataset.display(),
        "Starting street-extract"
    );

    let geocoder =
        NominatimGeocoder::new(&config.geocoder).context("Failed to create geocoder client")?;
    let pipeline = QueryPipeline::new(config, geocoder);

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut out = io::stdout();

    loop {
        let Some(request) = cli::prompt_request(&mut input, &mut out)? else {
            break;
        };

        let question = match pipeline.run(&request).await {
            Ok(report) => {
                if report.matched_features == 0 {
                    writeln!(
                        out,
                        "No {} data found within {} miles of {}",
                        request.data_type, request.radius_miles, request.address
                    )?;
                } else {
                    writeln!(
                        out,
                        "\nFound {} {} features",
                        report.matched_features, request.data_type
                    )?;
                }
                if let Some(path) = &report.map {
                    writeln!(out, "HTML map: {}", path.display())?;
                }
                match &report.vector {
                    Some(VectorOutcome::Written(path)) => {
                        writeln!(out, "SVG file: {}", path.display())?
                    }
                    Some(VectorOutcome::NothingToDraw) => writeln!(
                        out,
                        "No valid line or polygon data, no SVG generated."
                    )?,
                    Some(VectorOutcome::FellBack { path, reason }) => writeln!(
                        out,
                        "Warning: could not generate SVG ({reason}). HTML map written instead: {}",
                        path.display()
                    )?,
                    None => {}
                }
                "Do you want to search another location?"
            }
            Err(err) => {
                tracing::error!(error = %err, "Query failed");
                writeln!(out, "Error: {err}")?;
                "Do you want to try again?"
            }
        };

        if !cli::confirm(&mut input, &mut out, question)? {
            break;
        }
    }

    Ok(())
}

/// Initialize structured JSON logging on stderr.
fn init_logging() -> anyhow::Result<()> {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true)
        .with_writer(io::stderr);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("street_extract=debug".parse()?)
                .add_directive("info".parse()?),
        )
        .with(format)
        .init();
    Ok(())
}
