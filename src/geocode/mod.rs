//! Address geocoding.
//!
//! The resolver only needs "address in, ordered candidates out", so the
//! collaborator is a single-method trait. Any
//! `Fn(&str) -> Result<Vec<Coordinates>, GeocodeError>` closure implements it,
//! which is what the tests use.

pub mod nominatim;

pub use nominatim::NominatimGeocoder;

use thiserror::Error;

/// A geocoded candidate.
#[derive(Debug, Clone, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
    pub display_name: String,
}

impl Coordinates {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self {
            lat,
            lon,
            display_name: String::new(),
        }
    }
}

/// Geocoding failures. An empty result list is not an error here.
#[derive(Debug, Error)]
pub enum GeocodeError {
    #[error("network error: {0}")]
    Network(String),

    #[error("invalid geocoder response: {0}")]
    InvalidResponse(String),
}

/// Forward geocoder: free text to candidate coordinates, best match first.
pub trait Geocoder {
    fn geocode(&self, query: &str) -> Result<Vec<Coordinates>, GeocodeError>;
}

impl<F> Geocoder for F
where
    F: Fn(&str) -> Result<Vec<Coordinates>, GeocodeError>,
{
    fn geocode(&self, query: &str) -> Result<Vec<Coordinates>, GeocodeError> {
        self(query)
    }
}
