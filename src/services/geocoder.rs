// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Forward geocoding (free-text address to WGS84 point).
//!
//! The [`Geocoder`] trait is the seam the pipeline depends on; the
//! [`NominatimGeocoder`] talks to an OpenStreetMap Nominatim server. The
//! retry policy lives with the caller ([`resolve_address`]), not here.

use crate::config::GeocoderConfig;
use crate::models::GeoPoint;
use crate::services::retry::retry;
use serde::Deserialize;
use std::future::Future;

/// Resolves addresses to points.
pub trait Geocoder {
    /// Look up one address. `Err(GeocodeError::NotFound)` when the service
    /// answered but had no match.
    fn geocode(
        &self,
        address: &str,
    ) -> impl Future<Output = Result<GeoPoint, GeocodeError>> + Send;
}

/// Geocode with a bounded number of attempts, logging each failure.
///
/// Both transport errors and empty answers are retried.
pub async fn resolve_address<G: Geocoder>(
    geocoder: &G,
    address: &str,
    attempts: u32,
) -> Result<GeoPoint, GeocodeError> {
    let point = retry(
        attempts,
        |_| geocoder.geocode(address),
        |attempt, err| {
            tracing::warn!(attempt, error = %err, "Geocoding attempt failed, retrying");
        },
    )
    .await?;

    tracing::info!(lon = point.lon, lat = point.lat, "Address coordinates");
    Ok(point)
}

/// Nominatim search API client.
#[derive(Clone)]
pub struct NominatimGeocoder {
    http: reqwest::Client,
    base_url: String,
}

impl NominatimGeocoder {
    pub fn new(config: &GeocoderConfig) -> Result<Self, GeocodeError> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.timeout)
            .build()
            .map_err(|e| GeocodeError::Http(e.to_string()))?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }
}

impl Geocoder for NominatimGeocoder {
    async fn geocode(&self, address: &str) -> Result<GeoPoint, GeocodeError> {
        let url = format!("{}/search", self.base_url);
        let response = self
            .http
            .get(&url)
            .query(&[("q", address), ("format", "jsonv2"), ("limit", "1")])
            .send()
            .await
            .map_err(|e| GeocodeError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(GeocodeError::Http(format!("Geocoder returned {status}")));
        }

        let places: Vec<NominatimPlace> = response
            .json()
            .await
            .map_err(|e| GeocodeError::Parse(e.to_string()))?;

        first_point(&places)?.ok_or_else(|| GeocodeError::NotFound(address.to_string()))
    }
}

/// One entry of a Nominatim `/search` response. Coordinates arrive as strings.
#[derive(Debug, Deserialize)]
pub struct NominatimPlace {
    pub lat: String,
    pub lon: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

/// Extract the first result's coordinates.
pub fn first_point(places: &[NominatimPlace]) -> Result<Option<GeoPoint>, GeocodeError> {
    let Some(place) = places.first() else {
        return Ok(None);
    };
    let lat: f64 = place
        .lat
        .parse()
        .map_err(|_| GeocodeError::Parse(format!("invalid latitude {:?}", place.lat)))?;
    let lon: f64 = place
        .lon
        .parse()
        .map_err(|_| GeocodeError::Parse(format!("invalid longitude {:?}", place.lon)))?;
    if let Some(name) = &place.display_name {
        tracing::debug!(name = %name, "Geocoder match");
    }
    Ok(Some(GeoPoint::new(lon, lat)))
}

/// Errors from geocoding.
#[derive(Debug, thiserror::Error)]
pub enum GeocodeError {
    #[error("Could not find address: {0}")]
    NotFound(String),

    #[error("Geocoding request failed: {0}")]
    Http(String),

    #[error("Failed to parse geocoder response: {0}")]
    Parse(String),
}
