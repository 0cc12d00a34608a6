//! Query dispatcher: one area in, one lookup out, JSON rendered.

use std::io::Write;

use tracing::info;

use super::{DispatchError, PoiLookup, PoiQuery};
use crate::area::SearchArea;

/// Sends a [`SearchArea`] to a [`PoiLookup`] and writes the result set.
pub struct QueryDispatcher<L> {
    lookup: L,
    verbose: bool,
}

impl<L: PoiLookup> QueryDispatcher<L> {
    pub fn new(lookup: L) -> Self {
        Self {
            lookup,
            verbose: false,
        }
    }

    /// Report the record count on the diagnostic stream.
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Issue exactly one lookup and write the returned records to `out`.
    ///
    /// Records are written as one JSON array in upstream order with their
    /// original bytes. Nothing reaches `out` unless the whole call succeeds.
    pub fn dispatch<O, D>(&self, area: &SearchArea, out: &mut O, diag: &mut D) -> Result<usize, DispatchError>
    where
        O: Write + ?Sized,
        D: Write + ?Sized,
    {
        let query = PoiQuery::from_area(area);
        info!(%area, "querying charge points");

        let response = self.lookup.get_poi(&query)?;
        let records = response
            .records
            .ok_or(DispatchError::UnexpectedResponse {
                status: response.status,
            })?;

        if self.verbose {
            writeln!(diag, "found {} responses", records.len())?;
        }

        let mut rendered = serde_json::to_vec(&records)?;
        rendered.push(b'\n');
        out.write_all(&rendered)?;
        out.flush()?;

        Ok(records.len())
    }
}
