//! Point-in-Polygon (PIP) district matching.
//!
//! Indexes district polygons in an R-tree and matches resolved school
//! coordinates against them with a grade-compatibility filter.

mod index;
mod matcher;

pub use index::DistrictIndex;
pub use matcher::match_districts;
