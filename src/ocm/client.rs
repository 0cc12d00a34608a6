//! Blocking HTTP client for the OpenChargeMap `/poi` endpoint.

use std::io::Read;

use serde_json::value::RawValue;
use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

use super::{DispatchError, PoiLookup, PoiQuery, PoiResponse};
use crate::config::Credentials;

const USER_AGENT: &str = concat!("chargemeup/", env!("CARGO_PKG_VERSION"));

/// Name of the query parameter carrying the API key.
pub const KEY_PARAM: &str = "key";

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid server URL '{url}': {reason}")]
    InvalidServer { url: String, reason: String },
}

/// OpenChargeMap client bound to one server and API key.
#[derive(Clone)]
pub struct OcmClient {
    agent: ureq::Agent,
    poi_url: String,
    api_key: String,
}

impl OcmClient {
    /// Build a client from resolved credentials.
    ///
    /// Fails if the server is not an absolute http(s) URL.
    pub fn new(creds: &Credentials) -> Result<Self, ClientError> {
        let invalid = |reason: String| ClientError::InvalidServer {
            url: creds.server.clone(),
            reason,
        };

        let mut base = Url::parse(creds.server.trim()).map_err(|e| invalid(e.to_string()))?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(invalid(format!("unsupported scheme '{}'", base.scheme())));
        }

        base.set_fragment(None);
        base.path_segments_mut()
            .map_err(|()| invalid("URL cannot be a base".to_string()))?
            .pop_if_empty()
            .push("poi");
        let poi_url = String::from(base);
        debug!(%poi_url, "openchargemap client ready");

        Ok(Self {
            agent: ureq::AgentBuilder::new().user_agent(USER_AGENT).build(),
            poi_url,
            api_key: creds.api_key.clone(),
        })
    }

    pub fn poi_url(&self) -> &str {
        &self.poi_url
    }
}

impl PoiLookup for OcmClient {
    fn get_poi(&self, query: &PoiQuery) -> Result<PoiResponse, DispatchError> {
        let mut request = self.agent.get(&self.poi_url);
        for (name, value) in query.params() {
            request = request.query(name, value);
        }
        request = request.query(KEY_PARAM, &self.api_key);

        debug!(url = %self.poi_url, params = ?query.params(), "requesting charge points");

        let response = match request.call() {
            Ok(response) => response,
            Err(ureq::Error::Status(status, response)) => {
                let body = response.into_string().unwrap_or_default();
                warn!(status, body = %body.trim(), "openchargemap returned an error status");
                return Ok(PoiResponse {
                    status: Some(status),
                    records: None,
                });
            }
            Err(ureq::Error::Transport(transport)) => {
                return Err(DispatchError::Transport(describe_transport(&transport)));
            }
        };

        let status = response.status();
        let mut body = String::new();
        if let Err(e) = response.into_reader().read_to_string(&mut body) {
            warn!(status, error = %e, "failed to read response body");
            return Ok(PoiResponse {
                status: Some(status),
                records: None,
            });
        }

        let records = match serde_json::from_str::<Vec<Box<RawValue>>>(&body) {
            Ok(records) => Some(records),
            Err(e) => {
                warn!(status, error = %e, "response body is not a JSON array");
                None
            }
        };

        Ok(PoiResponse {
            status: Some(status),
            records,
        })
    }
}

/// Describe a transport failure without the request URL, which carries the API key.
fn describe_transport(transport: &ureq::Transport) -> String {
    let mut message = transport.kind().to_string();
    if let Some(detail) = transport.message() {
        message.push_str(": ");
        message.push_str(detail);
    }
    if let Some(source) = std::error::Error::source(transport) {
        message.push_str(": ");
        message.push_str(&source.to_string());
    }
    message
}
