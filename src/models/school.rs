//! School records as read from the input CSV.

use serde::{Deserialize, Serialize};

/// Geographic point (lon/lat)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lon: f64,
    pub lat: f64,
}

impl GeoPoint {
    /// WKT representation used in the checkpoint CSVs, e.g. `POINT (-112.1 33.5)`
    pub fn to_wkt(&self) -> String {
        format!("POINT ({} {})", self.lon, self.lat)
    }
}

/// A single school row from the input CSV.
///
/// The `row` identifier is assigned at load time and carried through every
/// pipeline stage so match results can be joined back to their source rows
/// without relying on positional alignment.
#[derive(Debug, Clone)]
pub struct SchoolRecord {
    /// Zero-based input row identifier
    pub row: usize,

    /// Street address
    pub address: String,

    /// City
    pub city: String,

    /// State abbreviation (e.g. "AZ")
    pub state: String,

    /// Lowest grade served (unparsable values coerced to 0)
    pub lo_grade: i32,

    /// Highest grade served (unparsable values coerced to 0)
    pub hi_grade: i32,

    /// All original CSV fields, echoed into the checkpoint CSVs
    pub fields: Vec<String>,
}

impl SchoolRecord {
    /// Composite address submitted to the geocoder: `address,city,state`
    pub fn full_address(&self) -> String {
        format!("{},{},{}", self.address, self.city, self.state)
    }
}

/// The full school table, preserving input column order and row order.
#[derive(Debug, Clone)]
pub struct SchoolTable {
    /// Headers normalized to upper-case on load
    pub headers: Vec<String>,
    pub rows: Vec<SchoolRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_address_is_comma_joined() {
        let school = SchoolRecord {
            row: 0,
            address: "100 N Main St".to_string(),
            city: "Phoenix".to_string(),
            state: "AZ".to_string(),
            lo_grade: 0,
            hi_grade: 8,
            fields: vec![],
        };
        assert_eq!(school.full_address(), "100 N Main St,Phoenix,AZ");
    }

    #[test]
    fn test_wkt_point() {
        let point = GeoPoint {
            lon: -112.074,
            lat: 33.448,
        };
        assert_eq!(point.to_wkt(), "POINT (-112.074 33.448)");
    }
}
