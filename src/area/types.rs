//! Core types for area resolution.

use std::fmt;
use thiserror::Error;

use crate::geocode::GeocodeError;

/// Location descriptors exactly as the user supplied them.
///
/// Every field is optional; [`crate::area::resolve`] decides which one wins.
/// Numeric fields track presence explicitly, so `--lat 0 --lon 0` is a real
/// point on the equator rather than "nothing given".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawAreaInput {
    /// Bounding box, `"(lat1,lon1),(lat2,lon2)"`. Forwarded verbatim.
    pub bounding_box: Option<String>,
    /// Free-text address to geocode.
    pub address: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// Radius in kilometres.
    pub radius: Option<f64>,
}

/// A rectangular area, kept as the raw descriptor the user typed.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundingBox {
    corners: String,
}

impl BoundingBox {
    pub(crate) fn new(corners: impl Into<String>) -> Self {
        Self { corners: corners.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.corners
    }
}

/// A circular area around a centre point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Radial {
    latitude: f64,
    longitude: f64,
    radius_km: f64,
}

impl Radial {
    pub(crate) fn new(latitude: f64, longitude: f64, radius_km: f64) -> Self {
        Self { latitude, longitude, radius_km }
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    pub fn radius_km(&self) -> f64 {
        self.radius_km
    }
}

/// The canonical shape of a charge-point query.
///
/// Only [`crate::area::resolve`] builds these, so a `SearchArea` in hand has
/// already passed validation.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchArea {
    BoundingBox(BoundingBox),
    Radial(Radial),
}

impl fmt::Display for SearchArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BoundingBox(bbox) => write!(f, "bbox {}", bbox.as_str()),
            Self::Radial(r) => write!(
                f,
                "{} km around ({}, {})",
                r.radius_km, r.latitude, r.longitude
            ),
        }
    }
}

/// Why an area could not be resolved.
#[derive(Debug, Error)]
pub enum AreaError {
    /// No bounding box, address or coordinates at all.
    #[error("either --bbox, --address, or --lat/--lon is required")]
    AreaRequired,

    /// A radial search was selected but no usable radius was given.
    #[error("--radius is required with --address or --lat/--lon")]
    RadiusRequired,

    /// Only one half of a coordinate pair was given.
    #[error("--lat and --lon must be given together")]
    IncompleteCoordinates,

    #[error("no location found for address '{address}'")]
    AddressNotFound { address: String },

    #[error("error finding address '{address}': {source}")]
    GeocodingFailed {
        address: String,
        #[source]
        source: GeocodeError,
    },
}
