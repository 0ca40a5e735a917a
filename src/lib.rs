//! School-district enrichment pipeline.
//!
//! This library provides shared types and modules for the enrich binary:
//! geocoding, shapefile loading, and point-in-polygon district matching.

pub mod districts;
pub mod geocode;
pub mod models;
pub mod pip;
pub mod schools;

pub use models::{District, GeoPoint, SchoolRecord, SchoolTable};
