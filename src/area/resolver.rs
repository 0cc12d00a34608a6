//! Area resolver: picks one search area out of the user's inputs.
//!
//! Priority: bounding box → address (+ radius) → lat/lon (+ radius) → error.
//! The first present descriptor wins and later ones are ignored. No range
//! checks are made on coordinates, radius or bbox syntax; the upstream API
//! reports those.

use tracing::{debug, info};

use super::types::{AreaError, BoundingBox, Radial, RawAreaInput, SearchArea};
use crate::geocode::Geocoder;

/// Resolve raw input into a [`SearchArea`].
///
/// The geocoder is called only when an address is the winning descriptor,
/// and then exactly once. When it returns several candidates the first one is
/// used as-is.
pub fn resolve<G>(input: &RawAreaInput, geocoder: &G) -> Result<SearchArea, AreaError>
where
    G: Geocoder + ?Sized,
{
    // 1. Bounding box
    if let Some(bbox) = non_blank(input.bounding_box.as_deref()) {
        debug!(bbox, "using bounding box");
        return Ok(SearchArea::BoundingBox(BoundingBox::new(bbox)));
    }

    // 2. Address
    if let Some(address) = non_blank(input.address.as_deref()) {
        let address = address.trim();
        let candidates = geocoder
            .geocode(address)
            .map_err(|source| AreaError::GeocodingFailed {
                address: address.to_string(),
                source,
            })?;

        let first = candidates.first().ok_or_else(|| AreaError::AddressNotFound {
            address: address.to_string(),
        })?;
        info!(
            address,
            lat = first.lat,
            lon = first.lon,
            place = %first.display_name,
            candidates = candidates.len(),
            "geocoded address"
        );

        let radius = required_radius(input.radius)?;
        return Ok(SearchArea::Radial(Radial::new(first.lat, first.lon, radius)));
    }

    // 3. Explicit coordinates
    match (input.latitude, input.longitude) {
        (None, None) => Err(AreaError::AreaRequired),
        (Some(lat), Some(lon)) => {
            let radius = required_radius(input.radius)?;
            Ok(SearchArea::Radial(Radial::new(lat, lon, radius)))
        }
        _ => Err(AreaError::IncompleteCoordinates),
    }
}

fn non_blank(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.trim().is_empty())
}

/// A radius of exactly zero describes no area, so it counts as missing.
fn required_radius(radius: Option<f64>) -> Result<f64, AreaError> {
    match radius {
        Some(r) if r != 0.0 => Ok(r),
        _ => Err(AreaError::RadiusRequired),
    }
}
