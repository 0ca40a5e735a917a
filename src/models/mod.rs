//! Core data models for the enrichment pipeline.

pub mod district;
pub mod grades;
pub mod school;

pub use district::District;
pub use school::{GeoPoint, SchoolRecord, SchoolTable};
