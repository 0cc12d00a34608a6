//! Search-area resolution.
//!
//! Accepts a bounding box, an address plus radius, or explicit coordinates
//! plus radius, and produces exactly one [`SearchArea`].

pub mod resolver;
pub mod types;

pub use resolver::resolve;
pub use types::{AreaError, BoundingBox, Radial, RawAreaInput, SearchArea};
