//! OpenStreetMap Nominatim geocoder.

use serde::Deserialize;
use tracing::{debug, warn};

use super::{Coordinates, GeocodeError, Geocoder};

const DEFAULT_BASE_URL: &str = "https://nominatim.openstreetmap.org";

// Nominatim's usage policy requires an identifying User-Agent.
const USER_AGENT: &str = concat!("chargemeup/", env!("CARGO_PKG_VERSION"), " (openchargemap-query)");

#[derive(Deserialize, Debug, Clone)]
struct NominatimResult {
    lat: String,
    lon: String,
    #[serde(default)]
    display_name: String,
}

impl NominatimResult {
    fn into_coordinates(self) -> Result<Coordinates, GeocodeError> {
        let lat = self
            .lat
            .parse()
            .map_err(|_| GeocodeError::InvalidResponse(format!("bad latitude '{}'", self.lat)))?;
        let lon = self
            .lon
            .parse()
            .map_err(|_| GeocodeError::InvalidResponse(format!("bad longitude '{}'", self.lon)))?;
        Ok(Coordinates {
            lat,
            lon,
            display_name: self.display_name,
        })
    }
}

/// Blocking Nominatim client.
pub struct NominatimGeocoder {
    agent: ureq::Agent,
    base_url: String,
}

impl NominatimGeocoder {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Point at a different Nominatim instance (self-hosted, or a mock server in tests).
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            agent: ureq::AgentBuilder::new().user_agent(USER_AGENT).build(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

impl Default for NominatimGeocoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Geocoder for NominatimGeocoder {
    fn geocode(&self, query: &str) -> Result<Vec<Coordinates>, GeocodeError> {
        let url = format!("{}/search", self.base_url);
        debug!(%url, query, "geocoding address");

        let response = self
            .agent
            .get(&url)
            .query("q", query)
            .query("format", "json")
            .call()
            .map_err(|e| GeocodeError::Network(e.to_string()))?;

        let results: Vec<NominatimResult> = response
            .into_json()
            .map_err(|e| GeocodeError::InvalidResponse(e.to_string()))?;

        debug!(count = results.len(), "geocoder returned candidates");
        candidates_from(results)
    }
}

/// The first candidate must parse; later malformed ones are skipped.
fn candidates_from(results: Vec<NominatimResult>) -> Result<Vec<Coordinates>, GeocodeError> {
    let mut results = results.into_iter();
    let Some(first) = results.next() else {
        return Ok(Vec::new());
    };

    let mut candidates = vec![first.into_coordinates()?];
    candidates.extend(results.filter_map(|r| match r.into_coordinates() {
        Ok(c) => Some(c),
        Err(e) => {
            warn!(error = %e, "skipping malformed geocoder candidate");
            None
        }
    }));
    Ok(candidates)
}
