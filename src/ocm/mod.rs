//! OpenChargeMap POI lookup.
//!
//! [`PoiQuery`] is the outbound parameter list built from a [`SearchArea`],
//! [`PoiLookup`] is the single-call seam to the API, and
//! [`QueryDispatcher`] ties them together and renders the result.

pub mod client;
pub mod dispatch;

pub use client::{ClientError, OcmClient};
pub use dispatch::QueryDispatcher;

use serde_json::value::RawValue;
use thiserror::Error;

use crate::area::SearchArea;

/// Distance unit sent with every radial query.
pub const DISTANCE_UNIT: &str = "km";

/// Query parameters for `GET /poi`, excluding the API key.
#[derive(Debug, Clone, PartialEq)]
pub struct PoiQuery {
    params: Vec<(&'static str, String)>,
}

impl PoiQuery {
    pub fn from_area(area: &SearchArea) -> Self {
        let params = match area {
            SearchArea::BoundingBox(bbox) => vec![("boundingbox", bbox.as_str().to_string())],
            SearchArea::Radial(r) => vec![
                ("latitude", r.latitude().to_string()),
                ("longitude", r.longitude().to_string()),
                ("distance", r.radius_km().to_string()),
                ("distanceunit", DISTANCE_UNIT.to_string()),
            ],
        };
        Self { params }
    }

    pub fn params(&self) -> &[(&'static str, String)] {
        &self.params
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// What came back from one lookup call.
///
/// `records` is `None` when the body was missing or not a JSON array. Each
/// record is kept as raw JSON text so it can be re-emitted unchanged.
#[derive(Debug)]
pub struct PoiResponse {
    pub status: Option<u16>,
    pub records: Option<Vec<Box<RawValue>>>,
}

/// One synchronous call to the POI directory.
pub trait PoiLookup {
    fn get_poi(&self, query: &PoiQuery) -> Result<PoiResponse, DispatchError>;
}

impl<T: PoiLookup + ?Sized> PoiLookup for &T {
    fn get_poi(&self, query: &PoiQuery) -> Result<PoiResponse, DispatchError> {
        (**self).get_poi(query)
    }
}

#[derive(Debug, Error)]
pub enum DispatchError {
    /// The request never produced a response.
    #[error("request to OpenChargeMap failed: {0}")]
    Transport(String),

    /// A response arrived but was not the expected JSON array.
    #[error("unexpected response from OpenChargeMap, {}", describe_status(.status))]
    UnexpectedResponse { status: Option<u16> },

    #[error("writing output: {0}")]
    Output(#[from] std::io::Error),

    #[error("encoding output: {0}")]
    Encode(#[from] serde_json::Error),
}

fn describe_status(status: &Option<u16>) -> String {
    match status {
        Some(code) => format!("status: {code}"),
        None => "no status".to_string(),
    }
}
