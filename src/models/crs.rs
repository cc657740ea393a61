// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Coordinate reference system identifiers.
//!
//! A [`Crs`] is an EPSG code resolved against the bundled EPSG registry
//! (`crs-definitions`). Resolution fails for codes the registry does not
//! know, so every `Crs` value can be classified as geographic or projected.

use std::fmt;

/// EPSG code of WGS84 longitude/latitude.
pub const WGS84_EPSG: u16 = 4326;

/// Broad category of a CRS, which decides how a search buffer is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrsKind {
    /// Angular units (degrees), e.g. EPSG:4326.
    Geographic,
    /// Linear units, e.g. a State Plane or UTM zone.
    Projected,
}

/// A resolved coordinate reference system.
#[derive(Debug, Clone, Copy)]
pub struct Crs {
    epsg: u16,
    proj4: &'static str,
}

impl Crs {
    /// WGS84 longitude/latitude.
    pub fn wgs84() -> Self {
        Self {
            epsg: WGS84_EPSG,
            proj4: "+proj=longlat +datum=WGS84 +no_defs",
        }
    }

    /// Resolve an EPSG code against the registry.
    pub fn from_epsg(code: u16) -> Result<Self, CrsError> {
        if code == WGS84_EPSG {
            return Ok(Self::wgs84());
        }
        let def = crs_definitions::from_code(code).ok_or(CrsError::UnknownCode(code))?;
        Ok(Self {
            epsg: code,
            proj4: def.proj4,
        })
    }

    /// Build a CRS from a raw proj4 definition, bypassing the registry.
    #[cfg(test)]
    pub(crate) fn with_definition(epsg: u16, proj4: &'static str) -> Self {
        Self { epsg, proj4 }
    }

    /// Parse a CRS name as it appears in GeoJSON `crs` members or user input.
    ///
    /// Accepts `EPSG:2263`, `epsg:2263`, `urn:ogc:def:crs:EPSG::2263`,
    /// `urn:ogc:def:crs:EPSG:6.6:2263` and the OGC `CRS84` aliases.
    pub fn parse(name: &str) -> Result<Self, CrsError> {
        let trimmed = name.trim();
        let upper = trimmed.to_ascii_uppercase();

        if upper.ends_with("CRS84") {
            return Ok(Self::wgs84());
        }

        let code = if let Some(rest) = upper.strip_prefix("EPSG:") {
            rest
        } else if upper.starts_with("URN:OGC:DEF:CRS:EPSG:") {
            upper.rsplit(':').next().unwrap_or_default()
        } else {
            return Err(CrsError::Unrecognized(trimmed.to_string()));
        };

        let code: u16 = code
            .parse()
            .map_err(|_| CrsError::Unrecognized(trimmed.to_string()))?;
        Self::from_epsg(code)
    }

    pub fn epsg(&self) -> u16 {
        self.epsg
    }

    /// The proj4 definition string used to build transforms.
    pub fn proj4(&self) -> &'static str {
        self.proj4
    }

    pub fn kind(&self) -> CrsKind {
        let is_angular = self
            .proj4
            .split_whitespace()
            .any(|token| token == "+proj=longlat" || token == "+proj=latlong");
        if is_angular {
            CrsKind::Geographic
        } else {
            CrsKind::Projected
        }
    }

    pub fn is_geographic(&self) -> bool {
        self.kind() == CrsKind::Geographic
    }
}

impl Default for Crs {
    fn default() -> Self {
        Self::wgs84()
    }
}

impl PartialEq for Crs {
    fn eq(&self, other: &Self) -> bool {
        self.epsg == other.epsg
    }
}

impl Eq for Crs {}

impl fmt::Display for Crs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EPSG:{}", self.epsg)
    }
}

/// Errors from resolving a CRS name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CrsError {
    #[error("Unrecognized CRS name: {0}")]
    Unrecognized(String),

    #[error("EPSG:{0} is not in the CRS registry")]
    UnknownCode(u16),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wgs84_is_geographic() {
        let crs = Crs::wgs84();
        assert_eq!(crs.epsg(), 4326);
        assert_eq!(crs.kind(), CrsKind::Geographic);
    }

    #[test]
    fn test_parse_name_forms() {
        assert_eq!(Crs::parse("EPSG:4326").unwrap().epsg(), 4326);
        assert_eq!(Crs::parse("epsg:2263").unwrap().epsg(), 2263);
        assert_eq!(
            Crs::parse("urn:ogc:def:crs:EPSG::2263").unwrap().epsg(),
            2263
        );
        assert_eq!(
            Crs::parse("urn:ogc:def:crs:OGC:1.3:CRS84").unwrap().epsg(),
            4326
        );
    }

    #[test]
    fn test_state_plane_is_projected() {
        let crs = Crs::from_epsg(2263).expect("EPSG:2263 should resolve");
        assert_eq!(crs.kind(), CrsKind::Projected);
        assert_eq!(crs.to_string(), "EPSG:2263");
    }

    #[test]
    fn test_unknown_code_rejected() {
        assert_eq!(Crs::from_epsg(1), Err(CrsError::UnknownCode(1)));
    }

    #[test]
    fn test_garbage_name_rejected() {
        assert!(matches!(
            Crs::parse("not a crs"),
            Err(CrsError::Unrecognized(_))
        ));
        assert!(matches!(
            Crs::parse("EPSG:abc"),
            Err(CrsError::Unrecognized(_))
        ));
    }
}
