//! chargemeup: resolve a search area and query OpenChargeMap for the
//! charge points inside it.
//!
//! The pipeline is linear: [`area::resolve`] turns loosely specified user
//! input into one [`area::SearchArea`], and [`ocm::QueryDispatcher`] sends it
//! upstream and writes the result set as JSON.

pub mod area;
pub mod config;
pub mod error;
pub mod geocode;
pub mod logging;
pub mod ocm;

pub use error::Error;
